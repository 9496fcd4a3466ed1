use std::collections::HashMap;

use bytes::Bytes;
use tracing::warn;

use crate::{Parser, Part, ReadOutcome};

/// Eagerly decoded multipart body, indexed by part name.
///
/// Construction drives a [`Parser`] to exhaustion; chunks that fail to parse
/// are skipped with a diagnostic instead of ending the scan. Immutable once
/// built.
#[derive(Debug)]
pub struct Reader {
    parts: HashMap<String, Vec<Part>>,
}

impl Reader {
    /// Decodes `buffer` delimited by `boundary`.
    pub fn new(boundary: impl AsRef<str>, buffer: impl Into<Bytes>) -> Self {
        let mut parser = Parser::new(boundary, buffer);
        let mut parts: HashMap<String, Vec<Part>> = HashMap::new();

        loop {
            match parser.read_part() {
                ReadOutcome::Part(part) => {
                    parts.entry(part.name.clone()).or_default().push(part);
                }
                ReadOutcome::Malformed(reason) => {
                    warn!(%reason, "skipping malformed part");
                }
                ReadOutcome::EndOfStream => break,
            }
        }

        Self { parts }
    }

    /// All parts under `name`, in encounter order; empty when the name is
    /// absent.
    pub fn array_parameter(&self, name: &str) -> &[Part] {
        self.parts.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// First part under `name`.
    pub fn single_parameter(&self, name: &str) -> Option<&Part> {
        self.parts.get(name).and_then(|parts| parts.first())
    }

    /// Applies `converter` to the first part under `name`.
    ///
    /// A converter that can fail should return `Option` or `Result` itself;
    /// the reader does not catch converter errors.
    pub fn converted_parameter<O>(
        &self,
        name: &str,
        converter: impl FnOnce(&Part) -> O,
    ) -> Option<O> {
        self.single_parameter(name).map(converter)
    }

    /// Applies `converter` to every part under `name`, in encounter order.
    pub fn converted_array<O>(&self, name: &str, converter: impl FnMut(&Part) -> O) -> Vec<O> {
        self.array_parameter(name).iter().map(converter).collect()
    }
}
