use thiserror::Error;

#[derive(Error, Debug)]
pub enum IniError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a valid key/value pair: {line}")]
    MalformedLine { line: String },

    #[error("failed to load inherited file {path}: {source}")]
    Inheritance {
        path: String,
        #[source]
        source: Box<IniError>,
    },

    #[error("inheritance cycle detected at {path}")]
    InheritanceCycle { path: String },
}
