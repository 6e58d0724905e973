//! Byte-level tokenizer that populates an [`IniDocument`].
//!
//! Input is split on an exact line-separator substring (no regex), each line
//! is trimmed and classified in order: blank, comment, section header,
//! key/value pair. A non-blank line without the key/value separator fails
//! the parse; callers must treat the document contents as unreliable after
//! a [`IniError::MalformedLine`].

use std::fs;
use std::path::Path;

use log::debug;

use crate::document::{
    IniDocument, KvMap, DEFAULT_KV_SEPARATOR, DEFAULT_LINE_SEPARATOR, DEFAULT_SECTION,
};
use crate::error::IniError;

impl IniDocument {
    /// Parse an in-memory buffer with the given separators.
    ///
    /// Section recognition and comment skipping follow the document's
    /// current flags (both off on a fresh document).
    pub fn parse(&mut self, data: &[u8], linesep: &str, kvsep: &str) -> Result<(), IniError> {
        self.parse_ini(data, linesep, kvsep)
    }

    /// Read a file and parse its contents with default separators.
    ///
    /// Section parsing and comment skipping are forced on. An unreadable
    /// file surfaces as [`IniError::Io`].
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), IniError> {
        let path = path.as_ref();
        let contents = fs::read(path)?;
        self.parse_section = true;
        self.skip_comments = true;
        self.parse_ini(&contents, DEFAULT_LINE_SEPARATOR, DEFAULT_KV_SEPARATOR)?;
        debug!(
            "parsed {} with {} section(s)",
            path.display(),
            self.sections.len()
        );
        Ok(())
    }

    fn parse_ini(&mut self, data: &[u8], linesep: &str, kvsep: &str) -> Result<(), IniError> {
        self.linesep = linesep.to_string();
        self.kvsep = kvsep.to_string();

        // Insert the default section
        let mut current = DEFAULT_SECTION.to_string();
        self.sections.insert(current.clone(), KvMap::new());

        for raw in split_on(data, linesep.as_bytes()) {
            let line = raw.trim_ascii();
            let size = line.len();
            if size == 0 {
                // Skip blank lines
                continue;
            }
            // `#` lines are always comments; `;` lines only when the flag
            // is on. Kept for compatibility with existing config files.
            if (self.skip_comments && line[0] == b';') || line[0] == b'#' {
                continue;
            }
            if self.parse_section && line[0] == b'[' && line[size - 1] == b']' {
                // A re-declared section discards its earlier keys
                current = String::from_utf8_lossy(&line[1..size - 1]).into_owned();
                self.sections.insert(current.clone(), KvMap::new());
                continue;
            }

            let Some(pos) = find_subslice(line, kvsep.as_bytes()) else {
                return Err(IniError::MalformedLine {
                    line: String::from_utf8_lossy(line).into_owned(),
                });
            };

            // Split on the first separator occurrence only, so values may
            // themselves contain the separator
            let key = String::from_utf8_lossy(line[..pos].trim_ascii()).into_owned();
            let value =
                String::from_utf8_lossy(line[pos + kvsep.len()..].trim_ascii()).into_owned();
            self.sections
                .get_mut(&current)
                .expect("current section exists")
                .insert(key, value);
        }
        Ok(())
    }
}

/// Split `data` on every occurrence of the exact byte sequence `sep`.
///
/// An empty separator yields the whole buffer as a single segment.
fn split_on<'a>(data: &'a [u8], sep: &[u8]) -> Vec<&'a [u8]> {
    if sep.is_empty() {
        return vec![data];
    }
    let mut segments = Vec::new();
    let mut rest = data;
    while let Some(pos) = find_subslice(rest, sep) {
        segments.push(&rest[..pos]);
        rest = &rest[pos + sep.len()..];
    }
    segments.push(rest);
    segments
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
