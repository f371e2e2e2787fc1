//! Immutable dataset snapshot and pattern entry model.
//!
//! A [`Data`] value is one fully-constructed snapshot of every classification
//! pattern the matching engine consults: browsers, operating systems, and
//! devices, each an ordered list of [`PatternEntry`] values. Snapshots are
//! never mutated after construction; any change to the reference data is
//! represented by building a new `Data` and publishing it through the store.
//!
//! # Examples
//!
//! ```
//! use uadetect::{DataBuilder, PatternEntry, Category};
//!
//! let data = DataBuilder::new("20260823-01")
//!     .entry(Category::Browser, PatternEntry::new(1, "Firefox", r"Firefox/(\d+)", 10))
//!     .entry(Category::OperatingSystem, PatternEntry::new(7, "Linux", "Linux", 5))
//!     .build()?;
//!
//! assert_eq!(data.version(), "20260823-01");
//! assert_eq!(data.browsers().len(), 1);
//! assert_eq!(data.stats().to_string(),
//!     "UAS data 20260823-01: 1 browsers, 1 operating systems, 0 devices");
//! # Ok::<(), uadetect::Error>(())
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Classification pattern category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Browser patterns
    Browser,
    /// Operating system patterns
    OperatingSystem,
    /// Device patterns
    Device,
}

impl Category {
    /// Human-readable category name as used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Browser => "browser",
            Category::OperatingSystem => "operating system",
            Category::Device => "device",
        }
    }
}

/// One classification pattern entry.
///
/// Carries a stable identifier, the matching expression (opaque text owned by
/// the matching engine's domain - this crate never interprets it), the order
/// used for first-match-wins resolution, and display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    id: u32,
    name: String,
    expression: String,
    order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

impl PatternEntry {
    /// Create an entry from its required fields.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        expression: impl Into<String>,
        order: u32,
    ) -> Self {
        PatternEntry {
            id,
            name: name.into(),
            expression: expression.into(),
            order,
            family: None,
            url: None,
            icon: None,
        }
    }

    /// Set the product family (e.g. "Firefox" for "Firefox Mobile").
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Set the informational URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the icon file name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Stable identifier, unique within its category.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Matching expression text. Opaque here; the matching engine owns its
    /// syntax and semantics.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First-match-wins priority. Lower values are tried first.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Product family, if any.
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Informational URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Icon file name, if any.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

/// Immutable snapshot of the full classification dataset.
///
/// Entries within each category are sorted by `(order, id)` so the matching
/// engine can iterate them in first-match-wins order without re-sorting.
/// Construction goes through [`DataBuilder`], which enforces that ordering
/// along with structural validity - deserialization included, so a snapshot
/// read back from JSON carries the same invariants as one built directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawData")]
pub struct Data {
    version: String,
    browsers: Vec<PatternEntry>,
    operating_systems: Vec<PatternEntry>,
    devices: Vec<PatternEntry>,
}

/// Unvalidated mirror of [`Data`] for deserialization; promoted through
/// [`DataBuilder::build`] so serde input cannot bypass the invariants.
#[derive(Deserialize)]
struct RawData {
    version: String,
    #[serde(default)]
    browsers: Vec<PatternEntry>,
    #[serde(default)]
    operating_systems: Vec<PatternEntry>,
    #[serde(default)]
    devices: Vec<PatternEntry>,
}

impl TryFrom<RawData> for Data {
    type Error = Error;

    fn try_from(raw: RawData) -> Result<Data> {
        let mut builder = DataBuilder::new(raw.version);
        for entry in raw.browsers {
            builder.push(Category::Browser, entry);
        }
        for entry in raw.operating_systems {
            builder.push(Category::OperatingSystem, entry);
        }
        for entry in raw.devices {
            builder.push(Category::Device, entry);
        }
        builder.build()
    }
}

impl Data {
    /// Opaque version token from the source document. Display and logging
    /// only; never compared for ordering.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Browser pattern entries in first-match-wins order.
    pub fn browsers(&self) -> &[PatternEntry] {
        &self.browsers
    }

    /// Operating system pattern entries in first-match-wins order.
    pub fn operating_systems(&self) -> &[PatternEntry] {
        &self.operating_systems
    }

    /// Device pattern entries in first-match-wins order.
    pub fn devices(&self) -> &[PatternEntry] {
        &self.devices
    }

    /// Entries for one category.
    pub fn entries(&self, category: Category) -> &[PatternEntry] {
        match category {
            Category::Browser => &self.browsers,
            Category::OperatingSystem => &self.operating_systems,
            Category::Device => &self.devices,
        }
    }

    /// True when every category is empty. An empty snapshot is
    /// constructible for tests but rejected by the store's publish path.
    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty() && self.operating_systems.is_empty() && self.devices.is_empty()
    }

    /// Derived statistics digest: per-category counts plus the version.
    /// Pure and side-effect free.
    pub fn stats(&self) -> DataStats {
        DataStats {
            version: self.version.clone(),
            browsers: self.browsers.len(),
            operating_systems: self.operating_systems.len(),
            devices: self.devices.len(),
        }
    }
}

/// Summary statistics for a [`Data`] snapshot.
///
/// Emitted as the diagnostic record when the store publishes a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStats {
    /// Version token of the snapshot
    pub version: String,
    /// Number of browser entries
    pub browsers: usize,
    /// Number of operating system entries
    pub operating_systems: usize,
    /// Number of device entries
    pub devices: usize,
}

impl fmt::Display for DataStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UAS data {}: {} browsers, {} operating systems, {} devices",
            self.version, self.browsers, self.operating_systems, self.devices
        )
    }
}

/// Builder for [`Data`] snapshots.
///
/// Accumulates entries per category and enforces structural validity at
/// [`build`](DataBuilder::build) time:
///
/// - the version token must be non-empty
/// - entry ids must be unique within their category
/// - entries are sorted by `(order, id)`
#[derive(Debug, Clone, Default)]
pub struct DataBuilder {
    version: String,
    browsers: Vec<PatternEntry>,
    operating_systems: Vec<PatternEntry>,
    devices: Vec<PatternEntry>,
}

impl DataBuilder {
    /// Start a builder for the given version token.
    pub fn new(version: impl Into<String>) -> Self {
        DataBuilder {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Add one entry to a category.
    pub fn entry(mut self, category: Category, entry: PatternEntry) -> Self {
        self.push(category, entry);
        self
    }

    /// Add one entry by mutable reference. Used by streaming parsers that
    /// can't thread the builder through a fold.
    pub fn push(&mut self, category: Category, entry: PatternEntry) {
        match category {
            Category::Browser => self.browsers.push(entry),
            Category::OperatingSystem => self.operating_systems.push(entry),
            Category::Device => self.devices.push(entry),
        }
    }

    /// Finalize the snapshot.
    ///
    /// Returns [`Error::InvalidData`] if the version is empty or any
    /// category contains duplicate ids.
    pub fn build(mut self) -> Result<Data> {
        if self.version.is_empty() {
            return Err(Error::InvalidData(
                "dataset version must not be empty".to_string(),
            ));
        }

        for (category, entries) in [
            (Category::Browser, &mut self.browsers),
            (Category::OperatingSystem, &mut self.operating_systems),
            (Category::Device, &mut self.devices),
        ] {
            let mut seen = HashSet::with_capacity(entries.len());
            for entry in entries.iter() {
                if !seen.insert(entry.id) {
                    return Err(Error::InvalidData(format!(
                        "duplicate {} entry id {}",
                        category.as_str(),
                        entry.id
                    )));
                }
            }
            // First-match-wins iteration order for the matching engine.
            entries.sort_by_key(|e| (e.order, e.id));
        }

        Ok(Data {
            version: self.version,
            browsers: self.browsers,
            operating_systems: self.operating_systems,
            devices: self.devices,
        })
    }
}
