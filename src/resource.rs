use std::collections::HashMap;
use std::path::PathBuf;

use bytes::Bytes;
use serde::Serialize;

use crate::utils::default_content_type;
use crate::Result;

/// Anything that can be packed into one part of a multipart body.
///
/// Implementations supply the payload; the metadata accessors default to
/// `application/octet-stream` and empty maps.
pub trait Resource {
    /// MIME type for the part's `Content-Type` header.
    fn content_type(&self) -> String {
        default_content_type()
    }

    /// Parameters for the part's `Content-Disposition` header.
    fn disposition_parameters(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Header fields other than `Content-Type` and `Content-Disposition`.
    fn extra_headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// The raw part payload.
    fn data(&self) -> Bytes;
}

/// An in-memory payload posted under a filename.
#[derive(Debug, Clone)]
pub struct FileResource {
    filename: String,
    content_type: String,
    data: Bytes,
}

impl FileResource {
    /// Creates a file part, guessing the MIME type from the filename extension.
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let filename = filename.into();
        let content_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string();
        Self {
            filename,
            content_type,
            data: data.into(),
        }
    }

    /// Replaces the guessed MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

impl Resource for FileResource {
    fn content_type(&self) -> String {
        self.content_type.clone()
    }

    fn disposition_parameters(&self) -> HashMap<String, String> {
        HashMap::from([("filename".to_string(), self.filename.clone())])
    }

    fn data(&self) -> Bytes {
        self.data.clone()
    }
}

/// A JSON payload.
#[derive(Debug, Clone)]
pub struct JsonResource {
    data: Bytes,
}

impl JsonResource {
    /// Encodes `value` through `serde_json`.
    pub fn new<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            data: serde_json::to_vec(value)?.into(),
        })
    }

    /// Wraps bytes that already hold JSON.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

impl Resource for JsonResource {
    fn content_type(&self) -> String {
        mime::APPLICATION_JSON.to_string()
    }

    fn data(&self) -> Bytes {
        self.data.clone()
    }
}

/// A payload read from the filesystem when the part is serialized.
///
/// An unreadable path degrades to an empty payload instead of failing the
/// build; callers should treat a suspiciously empty part as a soft failure of
/// this collaborator.
#[derive(Debug, Clone)]
pub struct PathResource {
    path: PathBuf,
    content_type: String,
}

impl PathResource {
    /// Creates a part backed by `path`, guessing the MIME type from its
    /// extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .to_string();
        Self { path, content_type }
    }
}

impl Resource for PathResource {
    fn content_type(&self) -> String {
        self.content_type.clone()
    }

    fn disposition_parameters(&self) -> HashMap<String, String> {
        let filename = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        HashMap::from([("filename".to_string(), filename)])
    }

    fn data(&self) -> Bytes {
        std::fs::read(&self.path).map(Bytes::from).unwrap_or_default()
    }
}
