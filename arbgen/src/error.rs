//! All error types for the arbgen crate.
//!
//! These are returned from every fallible stage of a pipeline run: scanning the
//! source directory, loading ARB records, emitting artifacts, and writing them.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read source directory `{}`: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{file}: {source}")]
    File {
        file: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches the name of the input file that failed.
    pub fn in_file(file: impl Into<String>, source: Error) -> Self {
        Error::File {
            file: file.into(),
            source: Box::new(source),
        }
    }

    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Whether the failure is confined to the content of a single input file.
    ///
    /// Directory, write and configuration failures are never confined: they
    /// would hit every remaining file too.
    pub fn is_content_error(&self) -> bool {
        match self {
            Error::Parse(_)
            | Error::XmlParse(_)
            | Error::DataMismatch(_)
            | Error::InvalidResource(_) => true,
            Error::File { source, .. } => source.is_content_error(),
            _ => false,
        }
    }
}
