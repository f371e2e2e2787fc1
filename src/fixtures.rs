//! Loader for the example fixture files used by the validation harness.
//!
//! A fixture file is delimited text, one record per line, two fields: the
//! user-agent string to classify and the expected classification label.
//! Malformed records (wrong field count, bad encoding) are skipped with a
//! warning rather than failing the run; only stream-level I/O errors abort.

use crate::error::{Error, Result};
use crate::source;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// One (input, expected) pair from a fixture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// User-agent string to classify
    pub user_agent: String,
    /// Expected classification label
    pub expected: String,
}

/// Parse examples from a two-column CSV stream.
///
/// Records with a field count other than two are skipped with a warning, as
/// are records that aren't valid UTF-8. An I/O error on the underlying
/// stream is fatal.
///
/// # Examples
///
/// ```
/// use uadetect::fixtures::load_examples;
///
/// let csv = "Mozilla/5.0 (X11; Linux) Firefox/140.0,Firefox\n\
///            too,many,fields\n\
///            curl/8.5.0,curl\n";
/// let examples = load_examples(csv.as_bytes())?;
/// assert_eq!(examples.len(), 2);
/// assert_eq!(examples[1].expected, "curl");
/// # Ok::<(), uadetect::Error>(())
/// ```
pub fn load_examples(source: impl Read) -> Result<Vec<Example>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut examples = Vec::new();
    for record in csv_reader.byte_records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(Error::Io(e.to_string())),
            Err(e) => {
                // Real file line, not record index: quoted records span lines.
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                warn!(line, error = %e, "skipping unreadable example record");
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 2 {
            warn!(
                line,
                fields = record.len(),
                "skipping example record with wrong field count"
            );
            continue;
        }

        let fields: std::result::Result<Vec<&str>, _> =
            record.iter().map(std::str::from_utf8).collect();
        match fields {
            Ok(fields) => examples.push(Example {
                user_agent: fields[0].to_string(),
                expected: fields[1].to_string(),
            }),
            Err(e) => {
                warn!(line, error = %e, "skipping example record with bad encoding");
            }
        }
    }
    Ok(examples)
}

/// Load examples from a fixture file on disk. `.gz` files are decompressed
/// transparently via [`source::open`].
pub fn load_examples_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Example>> {
    let reader = source::open(path)?;
    load_examples(reader)
}
