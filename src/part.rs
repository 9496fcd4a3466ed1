use std::collections::HashMap;

use bytes::Bytes;

use crate::Resource;

/// One named payload decoded out of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Field name taken from the `name` disposition parameter.
    pub name: String,
    /// MIME type, `application/octet-stream` when the part declared none.
    pub content_type: String,
    /// Disposition parameters other than `name`.
    pub disposition_parameters: HashMap<String, String>,
    /// Header fields other than `Content-Type` and `Content-Disposition`.
    pub extra_headers: HashMap<String, String>,
    /// The raw payload bytes, taken verbatim.
    pub data: Bytes,
}

impl Part {
    /// Payload as UTF-8 text, `None` when it is not valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    /// The `filename` disposition parameter, if present.
    pub fn filename(&self) -> Option<&str> {
        self.disposition_parameters
            .get("filename")
            .map(String::as_str)
    }
}

/// A decoded part can be fed straight back into a builder.
impl Resource for Part {
    fn content_type(&self) -> String {
        self.content_type.clone()
    }

    fn disposition_parameters(&self) -> HashMap<String, String> {
        self.disposition_parameters.clone()
    }

    fn extra_headers(&self) -> HashMap<String, String> {
        self.extra_headers.clone()
    }

    fn data(&self) -> Bytes {
        self.data.clone()
    }
}
