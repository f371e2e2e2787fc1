//! The versioned data store: one current [`Data`] snapshot, atomically
//! replaceable while arbitrarily many readers keep classifying.
//!
//! The store holds the current snapshot behind an [`ArcSwap`], so a read is a
//! single lock-free pointer load and a publish is a single atomic pointer
//! store. Readers that captured a snapshot before a publish keep using it
//! unchanged; readers that start after the publish returns see the new one.
//! There is no intermediate state: the store is never observably empty or
//! half-updated.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use uadetect::{Category, DataBuilder, DataStore, PatternEntry, XmlDataReader};
//!
//! let initial = DataBuilder::new("v1")
//!     .entry(Category::Browser, PatternEntry::new(1, "Firefox", "Firefox/", 10))
//!     .build()?;
//! let store = DataStore::new(initial, Arc::new(XmlDataReader::new()))?;
//!
//! // Classification callers snapshot the dataset...
//! let snapshot = store.data();
//! assert_eq!(snapshot.version(), "v1");
//!
//! // ...while an update path publishes a replacement.
//! let next = DataBuilder::new("v2")
//!     .entry(Category::Browser, PatternEntry::new(1, "Firefox", "Firefox/", 10))
//!     .entry(Category::Browser, PatternEntry::new(2, "Chrome", "Chrome/", 20))
//!     .build()?;
//! store.set_data(next)?;
//!
//! assert_eq!(snapshot.version(), "v1"); // captured snapshot is untouched
//! assert_eq!(store.data().version(), "v2"); // new reads see the new snapshot
//! # Ok::<(), uadetect::Error>(())
//! ```

use crate::data::Data;
use crate::error::{Error, Result};
use crate::reader::DataReader;
use arc_swap::ArcSwap;
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Holds the current classification dataset and swaps it atomically.
///
/// A store always has a usable [`Data`]: construction fails rather than
/// producing a store without one, and a failed publish leaves the previous
/// snapshot in place. The store remembers the [`DataReader`] it was
/// constructed with so an external update path can re-parse fresh bytes in
/// the same format (see [`refresh_from`](DataStore::refresh_from)); when and
/// where those bytes come from stays outside this crate.
pub struct DataStore {
    current: ArcSwap<Data>,
    reader: Arc<dyn DataReader>,
}

impl DataStore {
    /// Create a store serving `data`, bound to `reader` for later refreshes.
    ///
    /// Returns [`Error::InvalidData`] if `data` has no pattern entries at
    /// all; the store is never allowed to serve an empty dataset.
    pub fn new(data: Data, reader: Arc<dyn DataReader>) -> Result<Self> {
        Self::validate(&data)?;
        Ok(DataStore {
            current: ArcSwap::from_pointee(data),
            reader,
        })
    }

    /// Create a store by reading the initial dataset from `source` through
    /// `reader`.
    ///
    /// Fails atomically with the reader's [`Error::Format`] or
    /// [`Error::Io`] - no store exists if the initial read fails.
    pub fn from_source(source: &mut dyn Read, reader: Arc<dyn DataReader>) -> Result<Self> {
        let data = reader.read(source)?;
        Self::new(data, reader)
    }

    /// Current snapshot. Lock-free; never absent.
    ///
    /// The returned `Arc<Data>` stays valid and unchanged for as long as the
    /// caller holds it, no matter how many publishes happen in the meantime.
    pub fn data(&self) -> Arc<Data> {
        self.current.load_full()
    }

    /// The reader this store was constructed with. Fixed for the store's
    /// lifetime.
    pub fn data_reader(&self) -> Arc<dyn DataReader> {
        Arc::clone(&self.reader)
    }

    /// Publish a new snapshot.
    ///
    /// Validates `data` (same rule as [`new`](DataStore::new)), then swaps it
    /// in with a single atomic store: any [`data`](DataStore::data) call that
    /// starts after `set_data` returns observes the new snapshot, while
    /// snapshots already handed out are unaffected. On failure the previously
    /// published snapshot stays untouched.
    ///
    /// Racing publishers are not ordered by the store; either may end up
    /// current, but readers only ever see one of them whole.
    pub fn set_data(&self, data: Data) -> Result<()> {
        Self::validate(&data)?;
        let data = Arc::new(data);
        self.current.store(Arc::clone(&data));
        // Observability side channel only; correctness does not depend on it.
        debug!(stats = %data.stats(), "published new dataset");
        Ok(())
    }

    /// Re-parse fresh bytes through the bound reader and publish the result.
    ///
    /// This is the hook an external fetch/update path uses after downloading
    /// a new dataset document. Parse failures surface as [`Error::Format`]
    /// and leave the store serving its last good snapshot.
    pub fn refresh_from(&self, source: &mut dyn Read) -> Result<()> {
        let data = self.reader.read(source)?;
        self.set_data(data)
    }

    fn validate(data: &Data) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidData(format!(
                "refusing to serve empty dataset (version {:?})",
                data.version()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("current", &self.current.load().stats())
            .finish_non_exhaustive()
    }
}
