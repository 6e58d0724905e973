//! Section merging and chained file inheritance.
//!
//! A configuration file may name a parent file through the reserved
//! `inherited_from` key in its default section. [`load_inherited`] follows
//! that chain, merging each parent underneath its child so that child values
//! win on conflict.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::document::IniDocument;
use crate::error::IniError;

/// Reserved key naming the parent file to inherit from.
pub const INHERITED_FROM: &str = "inherited_from";

impl IniDocument {
    /// Merge another document into this one. `from` is not changed.
    ///
    /// With `override_existing` every value from `from` is adopted;
    /// without it only keys this document does not already have are filled
    /// in.
    pub fn merge(&mut self, from: &IniDocument, override_existing: bool) {
        for (section, kv) in from.get_all() {
            for (key, value) in kv {
                if override_existing || self.section_get(section, key).is_none() {
                    self.section_set(section, key, value);
                }
            }
        }
    }
}

/// Load a configuration file and resolve its inheritance chain.
///
/// Parents are merged without override, so a child's values always win.
/// Relative `inherited_from` paths resolve against the child file's
/// directory. A circular chain is reported as
/// [`IniError::InheritanceCycle`] instead of recursing forever.
pub fn load_inherited<P: AsRef<Path>>(path: P) -> Result<IniDocument, IniError> {
    let mut visited = HashSet::new();
    load_chain(path.as_ref(), &mut visited)
}

fn load_chain(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<IniDocument, IniError> {
    let identity = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(identity) {
        warn!("inheritance cycle at {}", path.display());
        return Err(IniError::InheritanceCycle {
            path: path.display().to_string(),
        });
    }

    let mut doc = IniDocument::new();
    doc.parse_file(path)?;

    let Some(inherited) = doc.get(INHERITED_FROM).map(str::to_string) else {
        return Ok(doc);
    };

    let parent_path = resolve_inherited(path, &inherited);
    debug!(
        "{} inherits from {}",
        path.display(),
        parent_path.display()
    );
    let parent = load_chain(&parent_path, visited).map_err(|e| match e {
        cycle @ IniError::InheritanceCycle { .. } => cycle,
        other => IniError::Inheritance {
            path: parent_path.display().to_string(),
            source: Box::new(other),
        },
    })?;

    doc.merge(&parent, false);
    Ok(doc)
}

/// Absolute paths are used verbatim; relative ones resolve against the
/// directory containing `current`.
fn resolve_inherited(current: &Path, inherited: &str) -> PathBuf {
    let inherited = Path::new(inherited);
    if inherited.is_absolute() {
        return inherited.to_path_buf();
    }
    match current.parent() {
        Some(dir) => dir.join(inherited),
        None => inherited.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(pairs: &[(&str, &str, &str)]) -> IniDocument {
        let mut doc = IniDocument::new();
        for (section, key, value) in pairs {
            doc.section_set(section, key, value);
        }
        doc
    }

    #[test]
    fn test_merge_without_override_keeps_existing() {
        let mut target = doc_with(&[("", "a", "child"), ("s", "x", "1")]);
        let source = doc_with(&[("", "a", "parent"), ("", "b", "parent"), ("s", "y", "2")]);
        target.merge(&source, false);
        assert_eq!(target.get("a"), Some("child"));
        assert_eq!(target.get("b"), Some("parent"));
        assert_eq!(target.section_get("s", "x"), Some("1"));
        assert_eq!(target.section_get("s", "y"), Some("2"));
    }

    #[test]
    fn test_merge_with_override_adopts_source() {
        let mut target = doc_with(&[("", "a", "child")]);
        let source = doc_with(&[("", "a", "parent")]);
        target.merge(&source, true);
        assert_eq!(target.get("a"), Some("parent"));
    }

    #[test]
    fn test_merge_leaves_source_unchanged() {
        let mut target = doc_with(&[("", "a", "child")]);
        let source = doc_with(&[("", "a", "parent"), ("", "b", "parent")]);
        target.merge(&source, false);
        target.merge(&source, true);
        assert_eq!(source.get("a"), Some("parent"));
        assert_eq!(source.get("b"), Some("parent"));
        assert_eq!(source.get_all().len(), 1);
    }

    #[test]
    fn test_resolve_inherited_relative() {
        let resolved = resolve_inherited(Path::new("/etc/app/child.ini"), "base.ini");
        assert_eq!(resolved, Path::new("/etc/app/base.ini"));
    }

    #[test]
    fn test_resolve_inherited_absolute() {
        let resolved = resolve_inherited(Path::new("/etc/app/child.ini"), "/srv/base.ini");
        assert_eq!(resolved, Path::new("/srv/base.ini"));
    }
}
