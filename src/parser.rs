use std::collections::HashMap;
use std::fmt;

use bytes::{Buf, Bytes};
use memchr::memmem;
use tracing::trace;

use crate::utils::{
    default_content_type, parse_disposition_parameters, remove_ignore_case, CONTENT_TYPE, CRLF,
    DASHES,
};
use crate::{Error, Part};

/// Outcome of one [`Parser::read_part`] call.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A complete part was extracted.
    Part(Part),
    /// No further opening boundary marker exists in the remaining buffer.
    EndOfStream,
    /// A boundary-delimited chunk was consumed but could not be parsed. The
    /// cursor has already moved past it, so reading may continue.
    Malformed(Error),
}

/// Single-pass cursor over one `(boundary, buffer)` pair.
///
/// Consecutive reads overlap on the boundary marker: the cursor stops at the
/// start of the next `\r\n--<boundary>`, and the scan that follows the last
/// part finds the terminal `--<boundary>--` line instead of an opening marker.
/// Not thread-safe; one instance per buffer.
pub struct Parser {
    buffer: Bytes,
    /// `--<boundary>\r\n`
    opening: Vec<u8>,
    /// `\r\n--<boundary>`
    closing: Vec<u8>,
    pos: usize,
}

impl Parser {
    /// Binds a parser to one boundary and one fully buffered body.
    pub fn new(boundary: impl AsRef<str>, buffer: impl Into<Bytes>) -> Self {
        let boundary = boundary.as_ref().as_bytes();

        let mut opening = Vec::with_capacity(boundary.len() + 4);
        opening.extend_from_slice(DASHES);
        opening.extend_from_slice(boundary);
        opening.extend_from_slice(CRLF);

        let mut closing = Vec::with_capacity(boundary.len() + 4);
        closing.extend_from_slice(CRLF);
        closing.extend_from_slice(DASHES);
        closing.extend_from_slice(boundary);

        Self {
            buffer: buffer.into(),
            opening,
            closing,
            pos: 0,
        }
    }

    /// Extracts the next part.
    pub fn read_part(&mut self) -> ReadOutcome {
        let Some(start) = memmem::find(&self.buffer[self.pos..], &self.opening) else {
            trace!("no opening boundary marker, stream ends");
            return ReadOutcome::EndOfStream;
        };
        let content_start = self.pos + start + self.opening.len();

        let Some(length) = memmem::find(&self.buffer[content_start..], &self.closing) else {
            trace!("no closing boundary marker, stream ends");
            return ReadOutcome::EndOfStream;
        };

        // The cursor lands on the next marker itself, before parsing, so a
        // malformed chunk is skipped rather than wedging the scan.
        self.pos = content_start + length;

        let mut content = self.buffer.slice(content_start..content_start + length);

        let Some(disposition) = read_line(&mut content) else {
            return ReadOutcome::Malformed(Error::MissingDisposition);
        };
        let mut parameters = parse_disposition_parameters(&disposition);
        let Some(name) = remove_ignore_case(&mut parameters, "name") else {
            return ReadOutcome::Malformed(Error::MissingName);
        };

        let mut headers = HashMap::new();
        while let Some(line) = read_line(&mut content) {
            if line.is_empty() {
                break;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() || key == value {
                continue;
            }
            headers.insert(key.to_string(), value.to_string());
        }

        let content_type =
            remove_ignore_case(&mut headers, CONTENT_TYPE).unwrap_or_else(default_content_type);

        trace!(%name, length = content.len(), "part decoded");

        ReadOutcome::Part(Part {
            name,
            content_type,
            disposition_parameters: parameters,
            extra_headers: headers,
            data: content,
        })
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("pos", &self.pos)
            .field("length", &self.buffer.len())
            .field(
                "boundary",
                &String::from_utf8_lossy(&self.closing[CRLF.len() + DASHES.len()..]),
            )
            .finish()
    }
}

/// Reads one CRLF-terminated line off the front of `content`, dropping the
/// terminator. `None` when no CRLF remains; the leftover bytes then belong to
/// the payload.
fn read_line(content: &mut Bytes) -> Option<String> {
    let at = memmem::find(&content[..], CRLF)?;
    let line = content.split_to(at);
    content.advance(CRLF.len());
    Some(String::from_utf8_lossy(&line).into_owned())
}
