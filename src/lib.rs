//! uadetect - Versioned Data Store for User-Agent Classification Patterns
//!
//! uadetect holds the parsed reference dataset (browser, operating system,
//! and device patterns) that a user-agent classification engine consults on
//! every request, and it supports replacing that dataset at runtime without
//! disrupting in-flight lookups.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use uadetect::{DataStore, XmlDataReader};
//!
//! let xml = r#"<uasdata>
//!   <description><version>20260823-01</version></description>
//!   <data>
//!     <browsers><browser>
//!       <id>1</id><name>Firefox</name><order>10</order><pattern>Firefox/(\d+)</pattern>
//!     </browser></browsers>
//!   </data>
//! </uasdata>"#;
//!
//! // Construct a store from raw bytes through the bound reader.
//! let reader = Arc::new(XmlDataReader::new());
//! let mut stream = xml.as_bytes();
//! let store = DataStore::from_source(&mut stream, reader)?;
//!
//! // Classification callers snapshot the current dataset; the snapshot
//! // stays valid and unchanged even if the store publishes a replacement
//! // concurrently.
//! let data = store.data();
//! for entry in data.browsers() {
//!     println!("{} -> {}", entry.name(), entry.expression());
//! }
//! # Ok::<(), uadetect::Error>(())
//! ```
//!
//! # Key Guarantees
//!
//! - **Always ready**: a successfully constructed store always serves a
//!   fully valid dataset; there is no observable empty or half-updated state
//! - **Lock-free reads**: [`DataStore::data`] is a single atomic pointer
//!   load, safe to call from any number of threads
//! - **Atomic publish**: [`DataStore::set_data`] swaps the whole snapshot in
//!   one atomic store; readers get the old dataset or the new one, never a
//!   mixture
//! - **Fail-safe updates**: a failed parse or an invalid replacement leaves
//!   the store serving its last good snapshot
//!
//! # Architecture
//!
//! ```text
//! bytes ──> DataReader::read ──> Data ──> DataStore::set_data (atomic swap)
//!                                            │
//!                      DataStore::data <─────┘
//!                 (matching engine, any thread, any time)
//! ```
//!
//! The pattern-matching engine itself, and the fetch/polling policy that
//! decides when fresh bytes arrive, live outside this crate. The store only
//! owns the holding, validating, and swapping of the dataset they share.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
/// Dataset snapshot, pattern entries, and statistics
pub mod data;
/// Error types for store and reader operations
pub mod error;
/// Fixture loader for the offline validation harness
pub mod fixtures;
/// The `DataReader` parsing contract
pub mod reader;
/// File/gzip byte-stream acquisition helpers
pub mod source;
/// The atomic-swap data store
pub mod store;
/// Reference XML-backed reader for the UAS interchange format
pub mod xml;

// Re-exports for consumers

/// Immutable dataset snapshot
pub use crate::data::{Category, Data, DataBuilder, DataStats, PatternEntry};

/// Error and result types
pub use crate::error::{Error, Result};

/// Fixture example record
pub use crate::fixtures::Example;

/// Byte-stream to dataset contract
pub use crate::reader::DataReader;

/// The versioned store
pub use crate::store::DataStore;

/// Reference XML reader
pub use crate::xml::XmlDataReader;
