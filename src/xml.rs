//! Reference XML-backed [`DataReader`] for the UAS interchange format.
//!
//! The UAS document carries a version token and ordered pattern entry lists
//! for each classification category:
//!
//! ```xml
//! <uasdata>
//!   <description><version>20260823-01</version></description>
//!   <data>
//!     <browsers>
//!       <browser>
//!         <id>1</id><name>Firefox</name><family>Firefox</family>
//!         <order>10</order><pattern>Firefox/(\d+)</pattern>
//!       </browser>
//!     </browsers>
//!     <operating_systems><os>...</os></operating_systems>
//!     <devices><device>...</device></devices>
//!   </data>
//! </uasdata>
//! ```
//!
//! Parsing is all-or-nothing: malformed markup, a missing version, missing
//! required entry fields, or duplicate ids fail the whole read and nothing is
//! handed to the store. Unknown elements are skipped so newer documents with
//! extra sections still parse.

use crate::data::{Category, Data, DataBuilder, PatternEntry};
use crate::error::{Error, Result};
use crate::reader::DataReader;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;

/// Leaf fields recognized inside an entry element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryField {
    Id,
    Name,
    Family,
    Order,
    Pattern,
    Url,
    Icon,
}

impl EntryField {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"id" => Some(EntryField::Id),
            b"name" => Some(EntryField::Name),
            b"family" => Some(EntryField::Family),
            b"order" => Some(EntryField::Order),
            b"pattern" => Some(EntryField::Pattern),
            b"url" => Some(EntryField::Url),
            b"icon" => Some(EntryField::Icon),
            _ => None,
        }
    }
}

/// Partially accumulated entry while its element is open.
#[derive(Debug)]
struct PendingEntry {
    category: Category,
    id: Option<String>,
    name: Option<String>,
    family: Option<String>,
    order: Option<String>,
    pattern: Option<String>,
    url: Option<String>,
    icon: Option<String>,
}

impl PendingEntry {
    fn new(category: Category) -> Self {
        PendingEntry {
            category,
            id: None,
            name: None,
            family: None,
            order: None,
            pattern: None,
            url: None,
            icon: None,
        }
    }
}

/// XML-backed reader for the UAS interchange format.
///
/// Stateless: one instance can be shared across stores and used from many
/// threads at once.
///
/// # Examples
///
/// ```
/// use uadetect::{DataReader, XmlDataReader};
///
/// let xml = r#"<uasdata>
///   <description><version>v1</version></description>
///   <data><browsers><browser>
///     <id>1</id><name>Firefox</name><order>10</order><pattern>Firefox/</pattern>
///   </browser></browsers></data>
/// </uasdata>"#;
///
/// let data = XmlDataReader::new().read_bytes(xml.as_bytes())?;
/// assert_eq!(data.version(), "v1");
/// assert_eq!(data.browsers().len(), 1);
/// # Ok::<(), uadetect::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDataReader;

impl XmlDataReader {
    /// Create a reader. Carries no per-call state.
    pub fn new() -> Self {
        XmlDataReader
    }

    fn parse(&self, text: &str) -> Result<Data> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut version: Option<String> = None;
        let mut in_version = false;
        let mut entry: Option<PendingEntry> = None;
        let mut field: Option<EntryField> = None;
        let mut entries: Vec<(Category, PatternEntry)> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let tag = e.local_name();
                    let tag = tag.as_ref();
                    if let Some(category) = entry_category(tag) {
                        if entry.is_some() {
                            return Err(Error::Format(format!(
                                "nested <{}> entry at position {}",
                                String::from_utf8_lossy(tag),
                                reader.buffer_position()
                            )));
                        }
                        entry = Some(PendingEntry::new(category));
                    } else if tag == b"version" {
                        in_version = true;
                        version = None;
                    } else if let Some(pending) = entry.as_mut() {
                        // Unknown leaf fields inside an entry are skipped.
                        field = EntryField::from_tag(tag);
                        if let Some(field) = field {
                            pending.clear(field);
                        }
                    }
                }
                // Character data may arrive in several chunks (split by a
                // comment, or CDATA next to plain text); accumulate rather
                // than overwrite.
                Ok(Event::Text(t)) => {
                    let value = t.unescape().map_err(|e| {
                        Error::Format(format!(
                            "bad character data at position {}: {}",
                            reader.buffer_position(),
                            e
                        ))
                    })?;
                    append_text(&mut version, in_version, &mut entry, field, &value);
                }
                Ok(Event::CData(t)) => {
                    // CDATA content is literal; no unescaping.
                    let bytes = t.into_inner();
                    let value = std::str::from_utf8(&bytes).map_err(|e| {
                        Error::Format(format!(
                            "bad CDATA at position {}: {}",
                            reader.buffer_position(),
                            e
                        ))
                    })?;
                    append_text(&mut version, in_version, &mut entry, field, value);
                }
                Ok(Event::End(e)) => {
                    let tag = e.local_name();
                    let tag = tag.as_ref();
                    if entry_category(tag).is_some() {
                        let pending = entry.take().ok_or_else(|| {
                            Error::Format(format!(
                                "unexpected closing </{}> at position {}",
                                String::from_utf8_lossy(tag),
                                reader.buffer_position()
                            ))
                        })?;
                        entries.push(pending.finish()?);
                    } else if tag == b"version" {
                        in_version = false;
                    } else {
                        field = None;
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(Error::Format(format!(
                        "malformed XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        let version =
            version.ok_or_else(|| Error::Format("document is missing <version>".to_string()))?;
        if entries.is_empty() {
            return Err(Error::Format(
                "document contains no pattern entries".to_string(),
            ));
        }

        let mut builder = DataBuilder::new(version);
        for (category, parsed) in entries {
            builder.push(category, parsed);
        }
        // Structural problems in a parsed document are format errors.
        builder.build().map_err(|e| match e {
            Error::InvalidData(msg) => Error::Format(msg),
            other => other,
        })
    }
}

impl DataReader for XmlDataReader {
    fn read(&self, source: &mut dyn Read) -> Result<Data> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Format(format!("document is not valid UTF-8: {}", e)))?;
        self.parse(&text)
    }
}

/// Route one chunk of character data to whatever slot is currently open:
/// the version token, or a leaf field of the pending entry.
fn append_text(
    version: &mut Option<String>,
    in_version: bool,
    entry: &mut Option<PendingEntry>,
    field: Option<EntryField>,
    value: &str,
) {
    if in_version {
        append(version, value);
    } else if let (Some(pending), Some(field)) = (entry.as_mut(), field) {
        pending.append(field, value);
    }
}

fn append(slot: &mut Option<String>, value: &str) {
    match slot {
        Some(existing) => existing.push_str(value),
        None => *slot = Some(value.to_string()),
    }
}

/// Map an entry element tag to its category.
fn entry_category(tag: &[u8]) -> Option<Category> {
    match tag {
        b"browser" => Some(Category::Browser),
        b"os" => Some(Category::OperatingSystem),
        b"device" => Some(Category::Device),
        _ => None,
    }
}

impl PendingEntry {
    fn slot(&mut self, field: EntryField) -> &mut Option<String> {
        match field {
            EntryField::Id => &mut self.id,
            EntryField::Name => &mut self.name,
            EntryField::Family => &mut self.family,
            EntryField::Order => &mut self.order,
            EntryField::Pattern => &mut self.pattern,
            EntryField::Url => &mut self.url,
            EntryField::Icon => &mut self.icon,
        }
    }

    /// Reset a field when its element opens, so a repeated element
    /// replaces rather than extends the earlier value.
    fn clear(&mut self, field: EntryField) {
        *self.slot(field) = None;
    }

    fn append(&mut self, field: EntryField, value: &str) {
        append(self.slot(field), value);
    }

    fn finish(self) -> Result<(Category, PatternEntry)> {
        let kind = self.category.as_str();
        let id = parse_number(kind, "id", self.id)?;
        let order = parse_number(kind, "order", self.order)?;
        let name = require(kind, "name", self.name)?;
        let pattern = require(kind, "pattern", self.pattern)?;

        let mut entry = PatternEntry::new(id, name, pattern, order);
        if let Some(family) = self.family {
            entry = entry.with_family(family);
        }
        if let Some(url) = self.url {
            entry = entry.with_url(url);
        }
        if let Some(icon) = self.icon {
            entry = entry.with_icon(icon);
        }
        Ok((self.category, entry))
    }
}

fn require(kind: &str, field: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::Format(format!("{} entry is missing <{}>", kind, field)))
}

fn parse_number(kind: &str, field: &str, value: Option<String>) -> Result<u32> {
    let raw = require(kind, field, value)?;
    raw.parse::<u32>().map_err(|_| {
        Error::Format(format!(
            "{} entry has non-numeric <{}>: {:?}",
            kind, field, raw
        ))
    })
}
