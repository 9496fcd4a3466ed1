use std::collections::BTreeMap;
use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;
use uuid::Uuid;

use crate::utils::{encode_disposition_parameters, CONTENT_DISPOSITION, CONTENT_TYPE, CRLF};
use crate::Resource;

const BOUNDARY_PREFIX: &str = "FormDataBoundary";

/// A fully serialized `multipart/form-data` body.
pub struct FormData {
    boundary: String,
    data: Bytes,
}

impl FormData {
    /// Starts a builder with no resources.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The boundary token separating parts in [`data`](Self::data).
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the HTTP `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// The serialized body.
    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

impl fmt::Debug for FormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormData")
            .field("boundary", &self.boundary)
            .field("length", &self.data.len())
            .finish()
    }
}

/// Accumulates named resources, then serializes them with
/// [`build`](Self::build).
#[derive(Default)]
pub struct Builder {
    resources: BTreeMap<String, Vec<Box<dyn Resource>>>,
}

impl Builder {
    /// Appends one resource under `name`; duplicate names are expected and
    /// kept in call order.
    #[must_use]
    pub fn add(mut self, name: impl Into<String>, resource: impl Resource + 'static) -> Self {
        self.resources
            .entry(name.into())
            .or_default()
            .push(Box::new(resource));
        self
    }

    /// Appends a whole sequence of resources under `name`, preserving its
    /// order.
    #[must_use]
    pub fn add_all(
        mut self,
        name: impl Into<String>,
        resources: impl IntoIterator<Item = Box<dyn Resource>>,
    ) -> Self {
        self.resources
            .entry(name.into())
            .or_default()
            .extend(resources);
        self
    }

    /// Serializes every accumulated resource under a freshly generated
    /// boundary.
    ///
    /// Names are emitted in ascending lexicographic order, resources under one
    /// name in the order they were added, so the output is deterministic up to
    /// the boundary token. Building with zero resources is valid and yields an
    /// empty body.
    pub fn build(&self) -> FormData {
        let boundary = generate_boundary();
        let mut data = BytesMut::new();

        for (name, resources) in &self.resources {
            for resource in resources {
                let mut parameters = resource.disposition_parameters();
                parameters.insert("name".to_string(), name.clone());

                put_line(&mut data, &format!("\r\n--{boundary}"));
                put_header(
                    &mut data,
                    CONTENT_DISPOSITION,
                    &format!("form-data; {}", encode_disposition_parameters(&parameters)),
                );
                put_header(&mut data, CONTENT_TYPE, &resource.content_type());

                let mut extra = resource.extra_headers().into_iter().collect::<Vec<_>>();
                extra.sort();
                for (key, value) in &extra {
                    put_header(&mut data, key, value);
                }

                data.put_slice(CRLF);
                data.put_slice(&resource.data());

                trace!(%name, "part encoded");
            }
        }

        if !data.is_empty() {
            data.put_slice(format!("\r\n--{boundary}--").as_bytes());
        }

        FormData {
            boundary,
            data: data.freeze(),
        }
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("names", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collision resistance only; the token never needs to be unguessable, just
/// absent from typical payload bytes.
fn generate_boundary() -> String {
    format!("{BOUNDARY_PREFIX}{}", Uuid::new_v4().simple())
}

fn put_line(data: &mut BytesMut, line: &str) {
    data.put_slice(line.as_bytes());
    data.put_slice(CRLF);
}

fn put_header(data: &mut BytesMut, name: &str, value: &str) {
    put_line(data, &format!("{name} : {value}"));
}
