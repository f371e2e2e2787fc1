//! The [`DataReader`] contract: bytes in, a complete dataset out.
//!
//! A reader converts a byte stream in some external representation into a
//! fully-constructed [`Data`] snapshot, or fails. Parsing is all-or-nothing:
//! a reader never hands back a partially populated dataset. Readers are
//! stateless and shareable - one reader instance may serve many stores and
//! many concurrent `read` calls.

use crate::data::Data;
use crate::error::Result;
use std::io::Read;

/// Converts an external byte stream into a [`Data`] snapshot.
///
/// Implementations must not take ownership of the source beyond reading it:
/// the caller keeps the handle and releases it on every exit path, parse
/// failures included.
///
/// The reference implementation is [`XmlDataReader`](crate::XmlDataReader).
pub trait DataReader: Send + Sync {
    /// Parse the stream into a complete dataset.
    ///
    /// Fails with [`Error::Format`](crate::Error::Format) when the content
    /// cannot be parsed into a structurally valid dataset, and
    /// [`Error::Io`](crate::Error::Io) when the stream itself fails.
    fn read(&self, source: &mut dyn Read) -> Result<Data>;

    /// Parse an in-memory byte slice. Convenience over [`read`](Self::read).
    fn read_bytes(&self, bytes: &[u8]) -> Result<Data> {
        let mut source: &[u8] = bytes;
        self.read(&mut source)
    }
}
