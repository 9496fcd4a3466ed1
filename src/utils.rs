use std::collections::HashMap;

use memchr::{memchr, memchr3};

pub(crate) const CRLF: &[u8] = b"\r\n"; // `\r\n`
pub(crate) const DASHES: &[u8] = b"--"; // `--`

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const CONTENT_DISPOSITION: &str = "Content-Disposition";

pub(crate) fn default_content_type() -> String {
    mime::APPLICATION_OCTET_STREAM.to_string()
}

/// Linear case-insensitive key search; header and parameter maps stay small
/// enough that a dedicated case-insensitive map type is not worth it.
pub(crate) fn remove_ignore_case(map: &mut HashMap<String, String>, key: &str) -> Option<String> {
    let found = map.keys().find(|k| k.eq_ignore_ascii_case(key)).cloned()?;
    map.remove(&found)
}

/// Encodes disposition parameters as `key="value"` pairs, sorted for
/// deterministic output, joined with `; `.
pub(crate) fn encode_disposition_parameters(parameters: &HashMap<String, String>) -> String {
    let mut pairs = parameters.iter().collect::<Vec<_>>();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Extracts `token = "quoted value"` pairs from a content disposition line.
///
/// Keys are runs free of `;`, `=`, space and newline; one optional space is
/// tolerated on either side of the `=`; values are quoted runs free of `"`,
/// `;` and `=`. Anything else on the line is passed over, so the header name
/// prefix and the `form-data` token never produce entries.
pub(crate) fn parse_disposition_parameters(line: &str) -> HashMap<String, String> {
    let bytes = line.as_bytes();
    let mut parameters = HashMap::new();
    let mut i = 0;

    while let Some(eq) = memchr(b'=', &bytes[i..]).map(|at| i + at) {
        let mut key_end = eq;
        if key_end > i && bytes[key_end - 1] == b' ' {
            key_end -= 1;
        }
        let mut key_start = key_end;
        while key_start > i && !matches!(bytes[key_start - 1], b';' | b'=' | b'\n' | b' ') {
            key_start -= 1;
        }

        let mut value_start = eq + 1;
        if bytes.get(value_start) == Some(&b' ') {
            value_start += 1;
        }
        if bytes.get(value_start) != Some(&b'"') {
            i = eq + 1;
            continue;
        }
        value_start += 1;

        let Some(end) = memchr3(b'"', b';', b'=', &bytes[value_start..]).map(|at| value_start + at)
        else {
            break;
        };
        if bytes[end] != b'"' {
            // unterminated value, keep scanning past this `=`
            i = eq + 1;
            continue;
        }

        parameters.insert(
            line[key_start..key_end].to_string(),
            line[value_start..end].to_string(),
        );
        i = end + 1;
    }

    parameters
}
