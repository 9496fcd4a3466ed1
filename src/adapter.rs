//! Adapters between the codec and `http` request/response types.

use bytes::Bytes;
use http::{header::CONTENT_TYPE, Method, Request, Response, Uri};

use crate::{Error, FormData, Reader, Result};

/// Extracts the boundary token from a `multipart/form-data` content type
/// value.
///
/// Everything after `boundary=` (the field is matched case-insensitively) up
/// to the end of the value is taken verbatim.
pub fn boundary_from_content_type(value: &str) -> Option<String> {
    let lowered = value.to_ascii_lowercase();
    let at = lowered.find("boundary=")? + "boundary=".len();
    let boundary = &value[at..];
    if boundary.is_empty() {
        None
    } else {
        Some(boundary.to_string())
    }
}

impl FormData {
    /// Builds a request carrying this body and its content type header.
    pub fn to_request<U>(&self, method: Method, uri: U) -> Result<Request<Bytes>>
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        Ok(Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, self.content_type())
            .body(self.data().clone())?)
    }
}

impl Reader {
    /// Decodes a response body, taking the boundary from the response's
    /// content type header.
    pub fn from_response<B: AsRef<[u8]>>(response: &Response<B>) -> Result<Self> {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let boundary = boundary_from_content_type(content_type)
            .ok_or_else(|| Error::MissingBoundary(content_type.to_string()))?;

        Ok(Self::new(
            boundary,
            Bytes::copy_from_slice(response.body().as_ref()),
        ))
    }
}
