//! Byte-stream acquisition for dataset and fixture files.
//!
//! Thin I/O wrapper with no decision logic of its own: opens a file into a
//! buffered reader, auto-decompressing gzip based on the `.gz` extension,
//! with `-` standing for stdin. The resulting reader feeds a
//! [`DataReader`](crate::DataReader) or the fixture loader.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use uadetect::{source, DataStore, XmlDataReader};
//!
//! // Compressed dataset files work transparently.
//! let mut stream = source::open("uas-20260823.xml.gz")?;
//! let store = DataStore::from_source(&mut stream, Arc::new(XmlDataReader::new()))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, stdin, BufRead, BufReader};
use std::path::Path;

/// Buffer size for file reading (64KB; dataset documents are a few MB)
const BUFFER_SIZE: usize = 64 * 1024;

/// Open a file with automatic gzip detection based on file extension.
///
/// Files ending in `.gz` (case-insensitive) are decompressed on the fly.
/// Special case: path "-" reads from stdin.
///
/// # Errors
///
/// Returns an error if the file doesn't exist or can't be opened. Invalid
/// gzip content surfaces later, from reads on the returned stream.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();

    if path.to_str() == Some("-") {
        return Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, stdin())));
    }

    let file = File::open(path)?;

    let is_gzip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gzip {
        let decoder = GzDecoder::new(file);
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}
