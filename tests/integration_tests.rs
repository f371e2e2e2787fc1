//! End-to-end tests: dataset files on disk through the source helpers, the
//! XML reader, the store, and the fixture loader.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use uadetect::{fixtures, source, DataStore, Error, XmlDataReader};

const DATASET_V1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<uasdata>
  <description><version>20260823-01</version></description>
  <data>
    <browsers>
      <browser>
        <id>1</id><name>Firefox</name><family>Firefox</family>
        <order>10</order><pattern>Firefox/(\d+)</pattern>
      </browser>
      <browser>
        <id>2</id><name>Chrome</name><order>20</order><pattern>Chrome/(\d+)</pattern>
      </browser>
    </browsers>
    <operating_systems>
      <os><id>1</id><name>Linux</name><order>1</order><pattern>Linux</pattern></os>
    </operating_systems>
    <devices>
      <device><id>1</id><name>Smartphone</name><order>1</order><pattern>Mobile</pattern></device>
    </devices>
  </data>
</uasdata>"#;

const DATASET_V2: &str = r#"<uasdata>
  <description><version>20260824-01</version></description>
  <data>
    <browsers>
      <browser><id>1</id><name>Firefox</name><order>10</order><pattern>Firefox/(\d+)</pattern></browser>
    </browsers>
  </data>
</uasdata>"#;

#[test]
fn test_store_from_dataset_file() {
    let mut file = NamedTempFile::with_suffix(".xml").unwrap();
    write!(file, "{}", DATASET_V1).unwrap();
    file.flush().unwrap();

    let mut stream = source::open(file.path()).unwrap();
    let store = DataStore::from_source(&mut stream, Arc::new(XmlDataReader::new())).unwrap();

    let data = store.data();
    assert_eq!(data.version(), "20260823-01");
    assert_eq!(data.browsers().len(), 2);
    assert_eq!(data.operating_systems().len(), 1);
    assert_eq!(data.devices().len(), 1);
}

#[test]
fn test_store_from_gzipped_dataset_file() {
    let mut file = NamedTempFile::with_suffix(".xml.gz").unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    write!(encoder, "{}", DATASET_V1).unwrap();
    file.write_all(&encoder.finish().unwrap()).unwrap();
    file.flush().unwrap();

    let mut stream = source::open(file.path()).unwrap();
    let store = DataStore::from_source(&mut stream, Arc::new(XmlDataReader::new())).unwrap();
    assert_eq!(store.data().version(), "20260823-01");
}

#[test]
fn test_refresh_cycle_from_files() {
    let mut v1 = NamedTempFile::with_suffix(".xml").unwrap();
    write!(v1, "{}", DATASET_V1).unwrap();
    v1.flush().unwrap();

    let mut stream = source::open(v1.path()).unwrap();
    let store = DataStore::from_source(&mut stream, Arc::new(XmlDataReader::new())).unwrap();
    assert_eq!(store.data().version(), "20260823-01");

    // A fresh document arrives; the external update path re-parses it
    // through the store's bound reader.
    let mut v2 = NamedTempFile::with_suffix(".xml").unwrap();
    write!(v2, "{}", DATASET_V2).unwrap();
    v2.flush().unwrap();

    let mut stream = source::open(v2.path()).unwrap();
    store.refresh_from(&mut stream).unwrap();
    assert_eq!(store.data().version(), "20260824-01");
    assert_eq!(store.data().browsers().len(), 1);
}

#[test]
fn test_refresh_failure_keeps_serving() {
    let reader = Arc::new(XmlDataReader::new());
    let mut stream = DATASET_V1.as_bytes();
    let store = DataStore::from_source(&mut stream, reader).unwrap();

    let mut broken = NamedTempFile::with_suffix(".xml").unwrap();
    write!(broken, "<uasdata><data><browsers>").unwrap();
    broken.flush().unwrap();

    let mut stream = source::open(broken.path()).unwrap();
    let err = store.refresh_from(&mut stream).unwrap_err();
    assert!(matches!(err, Error::Format(_)));

    // The read path still serves the last good snapshot.
    assert_eq!(store.data().version(), "20260823-01");
    assert_eq!(store.data().browsers().len(), 2);
}

#[test]
fn test_construction_failure_from_file() {
    let mut file = NamedTempFile::with_suffix(".xml").unwrap();
    write!(file, "not xml at all").unwrap();
    file.flush().unwrap();

    let mut stream = source::open(file.path()).unwrap();
    let result = DataStore::from_source(&mut stream, Arc::new(XmlDataReader::new()));
    assert!(matches!(result, Err(Error::Format(_))));
}

#[test]
fn test_fixture_file_with_malformed_rows() {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    writeln!(file, "Mozilla/5.0 (X11; Linux x86_64) Firefox/140.0,Firefox").unwrap();
    writeln!(file, "this row has no label").unwrap();
    writeln!(file, "curl/8.5.0,curl").unwrap();
    writeln!(file, "Mozilla/5.0 (Windows NT 10.0) Chrome/126.0,Chrome").unwrap();
    file.flush().unwrap();

    let examples = fixtures::load_examples_from_path(file.path()).unwrap();
    assert_eq!(examples.len(), 3, "malformed row is skipped, not fatal");
    assert_eq!(examples[1].user_agent, "curl/8.5.0");
    assert_eq!(examples[2].expected, "Chrome");
}

#[test]
fn test_gzipped_fixture_file() {
    let mut file = NamedTempFile::with_suffix(".csv.gz").unwrap();
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    writeln!(encoder, "some agent,Label").unwrap();
    file.write_all(&encoder.finish().unwrap()).unwrap();
    file.flush().unwrap();

    let examples = fixtures::load_examples_from_path(file.path()).unwrap();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].expected, "Label");
}
