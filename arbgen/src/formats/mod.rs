//! Input and output document formats handled by arbgen.
//!
//! ARB bundles are the only input. [`OutputFormat`] selects how a filtered
//! record is rendered: Android `strings.xml` or a flat JSON object.

pub mod android_strings;
pub mod arb;
pub mod json_map;

use std::fmt::{Display, Formatter};

pub use android_strings::Format as AndroidStringsFormat;
pub use arb::ArbRecord;
pub use json_map::Format as JsonMapFormat;

use crate::{Error, filter::FilteredRecord, traits::Parser};

/// Target format of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Android `strings.xml`, entries in allowlist order.
    AndroidStrings,
    /// Flat JSON object.
    JsonMap,
}

impl OutputFormat {
    /// Serializes `record` into the bytes of one output artifact.
    pub fn render(&self, record: &FilteredRecord) -> Result<Vec<u8>, Error> {
        match self {
            OutputFormat::AndroidStrings => AndroidStringsFormat::try_from(record)?.to_bytes(),
            OutputFormat::JsonMap => JsonMapFormat::from(record).to_bytes(),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::AndroidStrings => write!(f, "android"),
            OutputFormat::JsonMap => write!(f, "json"),
        }
    }
}
