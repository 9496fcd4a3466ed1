//!
//! ```
//! RUST_LOG=trace cargo test --test encode -- --nocapture
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};

use multipart_codec::*;

mod lib;

use lib::{expect_part, tracing_init};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Payload {
    name: String,
    mine: f64,
}

#[test]
fn json_and_text_file() -> Result<()> {
    tracing_init();

    let object = Payload {
        name: "xyz".into(),
        mine: 100.3,
    };
    let json = serde_json::to_string(&object)?;

    let form = FormData::builder()
        .add("myObject", JsonResource::new(&object)?)
        .add("file", FileResource::new("test.txt", "xyz"))
        .build();

    let b = form.boundary();
    let expected = format!(
        "\r\n--{b}\r\n\
         Content-Disposition : form-data; filename=\"test.txt\"; name=\"file\"\r\n\
         Content-Type : text/plain\r\n\
         \r\n\
         xyz\r\n\
         --{b}\r\n\
         Content-Disposition : form-data; name=\"myObject\"\r\n\
         Content-Type : application/json\r\n\
         \r\n\
         {json}\r\n\
         --{b}--"
    );

    assert_eq!(form.data().as_ref(), expected.as_bytes());

    Ok(())
}

#[test]
fn sequence_of_files_preserves_order() {
    tracing_init();

    let first = b"\x89PNG\r\n\x1a\nfirst".to_vec();
    let second = b"\x89PNG\r\n\x1a\nsecond".to_vec();

    let form = FormData::builder()
        .add_all(
            "image",
            [
                Box::new(FileResource::new("test1.png", first.clone())) as Box<dyn Resource>,
                Box::new(FileResource::new("test2.png", second.clone())),
            ],
        )
        .build();

    let b = form.boundary();
    let mut expected = Vec::new();
    expected.extend_from_slice(
        format!(
            "\r\n--{b}\r\n\
             Content-Disposition : form-data; filename=\"test1.png\"; name=\"image\"\r\n\
             Content-Type : image/png\r\n\
             \r\n"
        )
        .as_bytes(),
    );
    expected.extend_from_slice(&first);
    expected.extend_from_slice(
        format!(
            "\r\n--{b}\r\n\
             Content-Disposition : form-data; filename=\"test2.png\"; name=\"image\"\r\n\
             Content-Type : image/png\r\n\
             \r\n"
        )
        .as_bytes(),
    );
    expected.extend_from_slice(&second);
    expected.extend_from_slice(format!("\r\n--{b}--").as_bytes());

    assert_eq!(form.data().as_ref(), expected.as_slice());
}

#[test]
fn empty_build() {
    let form = FormData::builder().build();

    assert!(form.data().is_empty());
    assert!(!form.boundary().is_empty());
    assert!(form.boundary().chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(
        form.content_type(),
        format!("multipart/form-data; boundary={}", form.boundary())
    );
}

#[test]
fn build_is_deterministic_up_to_the_boundary() -> Result<()> {
    let builder = FormData::builder()
        .add("b", FileResource::new("b.txt", "bbb"))
        .add("a", JsonResource::from_bytes("{\"a\":1}"));

    let first = builder.build();
    let second = builder.build();

    assert_ne!(first.boundary(), second.boundary());

    let normalize = |form: &FormData| -> Result<String> {
        Ok(String::from_utf8(form.data().to_vec())?.replace(form.boundary(), "BOUNDARY"))
    };
    assert_eq!(normalize(&first)?, normalize(&second)?);

    Ok(())
}

#[test]
fn names_are_emitted_in_lexicographic_order() {
    let form = FormData::builder()
        .add("zeta", FileResource::new("z.txt", "z"))
        .add("alpha", FileResource::new("a.txt", "a"))
        .add("mid", FileResource::new("m.txt", "m"))
        .build();

    let mut parser = Parser::new(form.boundary(), form.data().clone());
    assert_eq!(expect_part(parser.read_part()).name, "alpha");
    assert_eq!(expect_part(parser.read_part()).name, "mid");
    assert_eq!(expect_part(parser.read_part()).name, "zeta");
    assert!(matches!(parser.read_part(), ReadOutcome::EndOfStream));
}

#[test]
fn extra_headers_are_emitted_sorted() {
    use bytes::Bytes;
    use std::collections::HashMap;

    struct Annotated;

    impl Resource for Annotated {
        fn extra_headers(&self) -> HashMap<String, String> {
            HashMap::from([
                ("X-Trace".to_string(), "abc".to_string()),
                ("Content-length".to_string(), "3".to_string()),
            ])
        }

        fn data(&self) -> Bytes {
            Bytes::from_static(b"raw")
        }
    }

    let form = FormData::builder().add("blob", Annotated).build();

    let b = form.boundary();
    let expected = format!(
        "\r\n--{b}\r\n\
         Content-Disposition : form-data; name=\"blob\"\r\n\
         Content-Type : application/octet-stream\r\n\
         Content-length : 3\r\n\
         X-Trace : abc\r\n\
         \r\n\
         raw\r\n\
         --{b}--"
    );

    assert_eq!(form.data().as_ref(), expected.as_bytes());
}
