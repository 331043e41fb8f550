//! Flat JSON key-value documents read by the app at runtime.
//!
//! Written with two-space indentation and non-ASCII text kept literal. Keys
//! are written in the order of the filtered record.

use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};
use std::io::{BufRead, Write};

use crate::{error::Error, filter::FilteredRecord, traits::Parser};

const INDENT: &[u8] = b"  ";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Format {
    pub values: Map<String, Value>,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader)?;
        match value {
            Value::Object(values) => Ok(Format { values }),
            _ => Err(Error::InvalidResource(
                "JSON document must be an object".to_string(),
            )),
        }
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
        self.values.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl From<&FilteredRecord> for Format {
    fn from(value: &FilteredRecord) -> Self {
        Format {
            values: value.to_json_map(),
        }
    }
}
