//! `multipart/form-data` encoding and decoding over in-memory buffers.
//!
//! The encoder collects named [`Resource`]s and serializes them into one
//! boundary-delimited body; the decoder splits such a body back into named
//! [`Part`]s, either one at a time through [`Parser`] or all at once through
//! the indexed [`Reader`].
//!
//! # Example
//!
//! ```rust
//! use multipart_codec::{FileResource, FormData, JsonResource, Reader};
//!
//! # fn main() -> Result<(), multipart_codec::Error> {
//! let form = FormData::builder()
//!     .add("file", FileResource::new("hello.txt", "hello"))
//!     .add("meta", JsonResource::new(&serde_json::json!({ "a": 1 }))?)
//!     .build();
//!
//! let reader = Reader::new(form.boundary(), form.data().clone());
//!
//! let file = reader.single_parameter("file").unwrap();
//! assert_eq!(file.content_type, "text/plain");
//! assert_eq!(&file.data[..], b"hello");
//!
//! let meta = reader
//!     .converted_parameter("meta", |part| {
//!         serde_json::from_slice::<serde_json::Value>(&part.data).ok()
//!     })
//!     .flatten()
//!     .unwrap();
//! assert_eq!(meta["a"], 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod adapter;
mod error;
mod form;
mod parser;
mod part;
mod reader;
mod resource;
mod utils;

pub use adapter::boundary_from_content_type;

pub use error::Error;

pub use form::{Builder, FormData};

pub use parser::{Parser, ReadOutcome};

pub use part::Part;

pub use reader::Reader;

pub use resource::{FileResource, JsonResource, PathResource, Resource};

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
