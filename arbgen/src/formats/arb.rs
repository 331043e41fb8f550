//! Support for Flutter Application Resource Bundle (`.arb`) files.
//!
//! An ARB file is a JSON object mapping message keys to translated text. Keys
//! that start with [`METADATA_MARKER`] describe other entries (placeholders,
//! descriptions) or the file itself (`@@locale`) and are never translatable.

use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    fs::File,
    io::{self, BufRead, Read, Write},
    path::Path,
};

use crate::{error::Error, traits::Parser};

/// Leading character of ARB metadata keys.
pub const METADATA_MARKER: char = '@';

/// File-level metadata entry carrying the locale of the bundle.
pub const LOCALE_KEY: &str = "@@locale";

/// The parsed content of one ARB file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ArbRecord {
    entries: Map<String, Value>,
}

impl ArbRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the value for `key` only when it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The `@@locale` declared inside the file, if any.
    pub fn locale(&self) -> Option<&str> {
        self.get_str(LOCALE_KEY)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for ArbRecord {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Parser for ArbRecord {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader)?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(Error::InvalidResource(format!(
                "ARB content must be a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Override default file reading so a UTF-8 BOM (or a UTF-16 file) is accepted.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder
            .read_to_string(&mut decoded)
            .map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => {
                    Error::InvalidResource(format!("ARB content is not valid UTF-8: {}", e))
                }
                _ => Error::Io(e),
            })?;

        Self::from_str(&decoded)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
