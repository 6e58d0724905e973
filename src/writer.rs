//! Serialization of an [`IniDocument`] back to text.
//!
//! The default section is written first without a header, then every named
//! section under a `[name]` line, all using the separators the document was
//! parsed with. Values are written as-is: a value containing a separator
//! will not round-trip through the parser unchanged.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::document::{IniDocument, KvMap, DEFAULT_SECTION};

impl IniDocument {
    /// Write the document to an output stream.
    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        // Default section first, headerless
        if let Some(kv) = self.get_kvmap(DEFAULT_SECTION) {
            self.write_kvmap(kv, w)?;
        }

        for (section, kv) in &self.sections {
            if section == DEFAULT_SECTION {
                continue;
            }
            write!(w, "[{}]{}", section, self.linesep)?;
            self.write_kvmap(kv, w)?;
        }
        Ok(())
    }

    /// Render the document as a string.
    pub fn write_to_string(&self) -> String {
        let mut buf = Vec::new();
        self.write(&mut buf)
            .expect("writing to a Vec cannot fail");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the document to a file, replacing any existing contents.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.write_to_string())
    }

    fn write_kvmap<W: Write>(&self, kv: &KvMap, w: &mut W) -> io::Result<()> {
        for (key, value) in kv {
            write!(w, "{}{}{}{}", key, self.kvsep, value, self.linesep)?;
        }
        Ok(())
    }
}
