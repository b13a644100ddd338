//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::io::{Cursor, Write};

use zip::write::{SimpleFileOptions, ZipWriter};

/// Build an in-memory zip archive from `(entry name, content)` pairs.
#[allow(dead_code)]
pub fn zip_archive(entries: &[(&str, &str)]) -> Cursor<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in entries {
        writer.start_file(name.to_string(), options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap()
}

/// Build an in-memory zip archive containing one raw-bytes entry.
#[allow(dead_code)]
pub fn zip_archive_raw(name: &str, bytes: &[u8]) -> Cursor<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    writer.start_file(name.to_string(), options).unwrap();
    writer.write_all(bytes).unwrap();
    writer.finish().unwrap()
}
