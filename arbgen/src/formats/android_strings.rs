//! Support for Android `strings.xml` resource files.
//!
//! Only singular `<string>` elements are produced. The writer emits an XML
//! declaration, a single `<resources>` root and one indented `<string>` child
//! per entry, in entry order. Empty values are written as self-closing
//! elements. The reader accepts what the writer produces (and
//! ordinary hand-written resource files) so generated files can be checked.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;
use std::io::{BufRead, Write};

use crate::{error::Error, filter::FilteredRecord, traits::Parser};

const ROOT_ELEMENT: &str = "resources";
const STRING_ELEMENT: &str = "string";
const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Format {
    pub strings: Vec<StringResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringResource {
    pub name: String,
    pub value: String,
}

impl Format {
    /// Looks up the text of the `<string>` named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.strings
            .iter()
            .find(|sr| sr.name == name)
            .map(|sr| sr.value.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(|sr| sr.name.as_str())
    }
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        // Whitespace inside <string> is part of the value.
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut strings = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == STRING_ELEMENT.as_bytes() => {
                    let name = parse_name(e)?;
                    let value = read_string_value(&mut xml_reader)?;
                    strings.push(StringResource { name, value });
                }
                Ok(Event::Empty(ref e)) if e.name().as_ref() == STRING_ELEMENT.as_bytes() => {
                    let name = parse_name(e)?;
                    strings.push(StringResource {
                        name,
                        value: String::new(),
                    });
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }
        Ok(Format { strings })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        xml_writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for sr in &self.strings {
            let mut elem = BytesStart::new(STRING_ELEMENT);
            elem.push_attribute(("name", sr.name.as_str()));

            xml_writer.write_event(Event::Text(BytesText::new(INDENT)))?;
            if sr.value.is_empty() {
                xml_writer.write_event(Event::Empty(elem))?;
            } else {
                xml_writer.write_event(Event::Start(elem))?;
                xml_writer.write_event(Event::Text(BytesText::new(&sr.value)))?;
                xml_writer.write_event(Event::End(BytesEnd::new(STRING_ELEMENT)))?;
            }
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

impl TryFrom<&FilteredRecord> for Format {
    type Error = Error;

    fn try_from(value: &FilteredRecord) -> Result<Self, Self::Error> {
        let strings = value
            .string_entries()?
            .into_iter()
            .map(|(name, value)| StringResource {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect();
        Ok(Format { strings })
    }
}

fn parse_name(e: &BytesStart) -> Result<String, Error> {
    let mut name = None;
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            name = Some(attr.unescape_value()?.to_string());
        }
    }
    name.ok_or_else(|| Error::InvalidResource("string tag missing 'name'".to_string()))
}

/// Collects the text of the current `<string>` up to its closing tag.
/// Inline markup such as `<b>` is skipped, its text is kept.
fn read_string_value<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => value.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e).map_err(|e| Error::DataMismatch(e.to_string()))?;
                value.push_str(text);
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) if depth == 0 => break,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
    Ok(value)
}
