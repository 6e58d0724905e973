pub mod document;
pub mod error;
pub mod merge;
pub mod parser;
pub mod writer;

// Re-export the main types for easier access
pub use document::{
    IniDocument, KvMap, Lookup, SectionMap, DEFAULT_KV_SEPARATOR, DEFAULT_LINE_SEPARATOR,
    DEFAULT_SECTION,
};
pub use error::IniError;
pub use merge::{load_inherited, INHERITED_FROM};
