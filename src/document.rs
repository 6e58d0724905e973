//! In-memory representation of a parsed INI document.
//!
//! An [`IniDocument`] maps section names to key/value pairs. Keys outside of
//! any `[section]` header live in the default section, whose name is the
//! empty string.

use std::collections::HashMap;

/// Key/value pairs of a single section.
pub type KvMap = HashMap<String, String>;

/// Mapping from section name to its key/value pairs.
pub type SectionMap = HashMap<String, KvMap>;

/// Name of the default (unsectioned) section.
pub const DEFAULT_SECTION: &str = "";

/// Line separator used by `parse_file` and fresh documents.
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Key/value separator used by `parse_file` and fresh documents.
pub const DEFAULT_KV_SEPARATOR: &str = "=";

/// Result of a three-state typed lookup.
///
/// Unlike the tuple-returning getters, this distinguishes a key that is
/// missing from one that is present but does not parse as the requested
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The key does not exist in the section.
    Absent,
    /// The key exists but its value does not parse as the requested type.
    Unparsable,
    /// The key exists and its value parsed.
    Found(T),
}

/// A parsed INI document: sections of key/value pairs plus the separators
/// and parse-mode flags used to read (and later write) it.
#[derive(Debug, Clone)]
pub struct IniDocument {
    pub(crate) sections: SectionMap,
    pub(crate) linesep: String,
    pub(crate) kvsep: String,
    pub(crate) parse_section: bool,
    pub(crate) skip_comments: bool,
}

impl Default for IniDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl IniDocument {
    /// Create an empty document with default separators and both parse-mode
    /// flags off.
    pub fn new() -> Self {
        IniDocument {
            sections: SectionMap::new(),
            linesep: DEFAULT_LINE_SEPARATOR.to_string(),
            kvsep: DEFAULT_KV_SEPARATOR.to_string(),
            parse_section: false,
            skip_comments: false,
        }
    }

    /// Clear all sections. Separators and parse-mode flags are kept.
    pub fn reset(&mut self) {
        self.sections.clear();
    }

    /// Set whether `[name]` lines are recognized as section headers when
    /// parsing.
    pub fn set_parse_section(&mut self, parse_section: bool) {
        self.parse_section = parse_section;
    }

    /// Set whether `;`-comments are skipped when parsing. Lines starting
    /// with `#` are always skipped regardless of this flag.
    pub fn set_skip_comments(&mut self, skip_comments: bool) {
        self.skip_comments = skip_comments;
    }

    /// Look up a value for a key in the default section.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.section_get(DEFAULT_SECTION, key)
    }

    /// Look up a value for a key in a section.
    pub fn section_get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|kv| kv.get(key))
            .map(String::as_str)
    }

    /// Get a value in the default section as an integer.
    ///
    /// Returns `(value, present)`. A present but non-numeric value yields
    /// `(0, true)`; an absent key yields `(0, false)`.
    pub fn get_int(&self, key: &str) -> (i64, bool) {
        self.section_get_int(DEFAULT_SECTION, key)
    }

    /// Get a value in a section as an integer. See [`IniDocument::get_int`].
    pub fn section_get_int(&self, section: &str, key: &str) -> (i64, bool) {
        match self.section_get(section, key) {
            Some(v) => match v.parse::<i64>() {
                Ok(n) => (n, true),
                Err(_) => (0, true),
            },
            None => (0, false),
        }
    }

    /// Get a value in the default section as a float.
    ///
    /// Same presence contract as [`IniDocument::get_int`].
    pub fn get_float(&self, key: &str) -> (f64, bool) {
        self.section_get_float(DEFAULT_SECTION, key)
    }

    /// Get a value in a section as a float.
    pub fn section_get_float(&self, section: &str, key: &str) -> (f64, bool) {
        match self.section_get(section, key) {
            Some(v) => match v.parse::<f64>() {
                Ok(n) => (n, true),
                Err(_) => (0.0, true),
            },
            None => (0.0, false),
        }
    }

    /// Get a value in the default section as a boolean.
    ///
    /// Accepts "1", "t", "T", "true", "TRUE", "True", "on", "ON", "On",
    /// "yes", "YES", "Yes" as true and "0", "f", "F", "false", "FALSE",
    /// "False", "off", "OFF", "Off", "no", "NO", "No" as false. Any other
    /// value returns `(false, false)`, as if the key were absent.
    pub fn get_bool(&self, key: &str) -> (bool, bool) {
        self.section_get_bool(DEFAULT_SECTION, key)
    }

    /// Get a value in a section as a boolean. See [`IniDocument::get_bool`].
    pub fn section_get_bool(&self, section: &str, key: &str) -> (bool, bool) {
        match self.section_get(section, key) {
            Some(v) => match parse_bool_literal(v) {
                Some(b) => (b, true),
                None => (false, false),
            },
            None => (false, false),
        }
    }

    /// Three-state integer lookup, distinguishing absent from unparsable.
    pub fn lookup_int(&self, section: &str, key: &str) -> Lookup<i64> {
        match self.section_get(section, key) {
            Some(v) => match v.parse::<i64>() {
                Ok(n) => Lookup::Found(n),
                Err(_) => Lookup::Unparsable,
            },
            None => Lookup::Absent,
        }
    }

    /// Three-state float lookup.
    pub fn lookup_float(&self, section: &str, key: &str) -> Lookup<f64> {
        match self.section_get(section, key) {
            Some(v) => match v.parse::<f64>() {
                Ok(n) => Lookup::Found(n),
                Err(_) => Lookup::Unparsable,
            },
            None => Lookup::Absent,
        }
    }

    /// Three-state boolean lookup. An unrecognized literal reports
    /// `Unparsable` instead of being folded into `false`.
    pub fn lookup_bool(&self, section: &str, key: &str) -> Lookup<bool> {
        match self.section_get(section, key) {
            Some(v) => match parse_bool_literal(v) {
                Some(b) => Lookup::Found(b),
                None => Lookup::Unparsable,
            },
            None => Lookup::Absent,
        }
    }

    /// Get all key/value pairs of a section.
    pub fn get_kvmap(&self, section: &str) -> Option<&KvMap> {
        self.sections.get(section)
    }

    /// Get the whole section map.
    pub fn get_all(&self) -> &SectionMap {
        &self.sections
    }

    /// Store a key/value pair in the default section.
    pub fn set(&mut self, key: &str, value: &str) {
        self.section_set(DEFAULT_SECTION, key, value);
    }

    /// Store a key/value pair in a section, creating the section if it does
    /// not exist and overwriting any prior value for the key.
    pub fn section_set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Store an integer in the default section, formatted as decimal.
    pub fn set_int(&mut self, key: &str, value: i64) {
        self.section_set_int(DEFAULT_SECTION, key, value);
    }

    /// Store an integer in a section, formatted as decimal.
    pub fn section_set_int(&mut self, section: &str, key: &str, value: i64) {
        self.section_set(section, key, &value.to_string());
    }

    /// Store a float in the default section, fixed-point with 8 fraction
    /// digits.
    pub fn set_float(&mut self, key: &str, value: f64) {
        self.section_set_float(DEFAULT_SECTION, key, value);
    }

    /// Store a float in a section, fixed-point with 8 fraction digits.
    pub fn section_set_float(&mut self, section: &str, key: &str, value: f64) {
        self.section_set(section, key, &format!("{:.8}", value));
    }

    /// Store a boolean in the default section as "true"/"false".
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.section_set_bool(DEFAULT_SECTION, key, value);
    }

    /// Store a boolean in a section as "true"/"false".
    pub fn section_set_bool(&mut self, section: &str, key: &str, value: bool) {
        self.section_set(section, key, if value { "true" } else { "false" });
    }

    /// Delete a key from a section. Deleting from a section that does not
    /// exist is a no-op.
    pub fn delete(&mut self, section: &str, key: &str) {
        if let Some(kv) = self.sections.get_mut(section) {
            kv.remove(key);
        }
    }
}

fn parse_bool_literal(v: &str) -> Option<bool> {
    match v {
        "1" | "t" | "T" | "true" | "TRUE" | "True" | "on" | "ON" | "On" | "yes" | "YES"
        | "Yes" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" | "off" | "OFF" | "Off" | "no" | "NO"
        | "No" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_distinguishes_absent_from_empty() {
        let mut doc = IniDocument::new();
        doc.set("empty", "");
        assert_eq!(doc.get("empty"), Some(""));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn test_get_int_contract() {
        let mut doc = IniDocument::new();
        doc.set("port", "8080");
        doc.set("bogus", "not-a-number");
        assert_eq!(doc.get_int("port"), (8080, true));
        assert_eq!(doc.get_int("bogus"), (0, true));
        assert_eq!(doc.get_int("missing"), (0, false));
    }

    #[test]
    fn test_get_float_contract() {
        let mut doc = IniDocument::new();
        doc.set("ratio", "0.25");
        doc.set("bogus", "x");
        assert_eq!(doc.get_float("ratio"), (0.25, true));
        assert_eq!(doc.get_float("bogus"), (0.0, true));
        assert_eq!(doc.get_float("missing"), (0.0, false));
    }

    #[test]
    fn test_get_bool_literals() {
        let mut doc = IniDocument::new();
        for v in ["1", "t", "T", "true", "TRUE", "True", "on", "ON", "On", "yes", "YES", "Yes"] {
            doc.set("k", v);
            assert_eq!(doc.get_bool("k"), (true, true), "literal {:?}", v);
        }
        for v in ["0", "f", "F", "false", "FALSE", "False", "off", "OFF", "Off", "no", "NO", "No"]
        {
            doc.set("k", v);
            assert_eq!(doc.get_bool("k"), (false, true), "literal {:?}", v);
        }
        // Unrecognized literal reads as absent, unlike int/float.
        doc.set("k", "tRuE");
        assert_eq!(doc.get_bool("k"), (false, false));
        assert_eq!(doc.get_bool("missing"), (false, false));
    }

    #[test]
    fn test_lookup_three_states() {
        let mut doc = IniDocument::new();
        doc.set("n", "12");
        doc.set("bad", "twelve");
        assert_eq!(doc.lookup_int("", "n"), Lookup::Found(12));
        assert_eq!(doc.lookup_int("", "bad"), Lookup::Unparsable);
        assert_eq!(doc.lookup_int("", "missing"), Lookup::Absent);
        doc.set("flag", "maybe");
        assert_eq!(doc.lookup_bool("", "flag"), Lookup::Unparsable);
    }

    #[test]
    fn test_typed_setters_format() {
        let mut doc = IniDocument::new();
        doc.set_int("i", -42);
        doc.set_float("f", 4.4);
        doc.set_bool("b", true);
        assert_eq!(doc.get("i"), Some("-42"));
        assert_eq!(doc.get("f"), Some("4.40000000"));
        assert_eq!(doc.get("b"), Some("true"));
    }

    #[test]
    fn test_section_set_creates_section() {
        let mut doc = IniDocument::new();
        doc.section_set("server", "host", "localhost");
        assert_eq!(doc.section_get("server", "host"), Some("localhost"));
        doc.section_set("server", "host", "0.0.0.0");
        assert_eq!(doc.section_get("server", "host"), Some("0.0.0.0"));
    }

    #[test]
    fn test_delete_missing_section_is_noop() {
        let mut doc = IniDocument::new();
        doc.delete("nope", "key");
        doc.set("key", "value");
        doc.delete(DEFAULT_SECTION, "key");
        assert_eq!(doc.get("key"), None);
    }

    #[test]
    fn test_reset_keeps_flags() {
        let mut doc = IniDocument::new();
        doc.set_parse_section(true);
        doc.set("k", "v");
        doc.reset();
        assert!(doc.get_all().is_empty());
        assert!(doc.parse_section);
    }
}
