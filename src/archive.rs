//! Export archive ingestion.
//!
//! A note export is a zip of Markdown entries (or the same tree unpacked on
//! disk). Entries ending in the document extension are parsed into
//! [`Record`]s; everything else is ignored. Per-document parse failures are
//! absorbed by the record extractor, but an unreadable archive or an entry
//! that does not decode as UTF-8 aborts the whole operation.

use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
};

use walkdir::WalkDir;
use zip::ZipArchive;

use crate::{
    builder::build_mention_graph,
    error::NotegraphError,
    graph::MentionGraph,
    mentions::DOC_EXTENSION,
    record::Record,
};

/// Parse a zipped note export at `path` into records, in archive entry
/// order.
pub fn parse_export_zip<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, NotegraphError> {
    tracing::debug!("Reading export archive {:?}", path.as_ref());
    let file = File::open(path.as_ref())?;
    parse_export_reader(file)
}

/// Parse a zipped note export from any seekable reader.
pub fn parse_export_reader<R: Read + Seek>(reader: R) -> Result<Vec<Record>, NotegraphError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut records = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        if !name.to_ascii_lowercase().ends_with(DOC_EXTENSION) {
            continue;
        }
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        let content = String::from_utf8(bytes)?;
        if let Some(record) = Record::from_document(&name, &content) {
            records.push(record);
        }
    }
    tracing::debug!("Parsed {} records from archive", records.len());
    Ok(records)
}

/// Parse an unpacked export directory into records. Files are visited in
/// name order for deterministic output.
pub fn parse_export_dir<P: AsRef<Path>>(root: P) -> Result<Vec<Record>, NotegraphError> {
    tracing::debug!("Reading export directory {:?}", root.as_ref());
    let mut records = Vec::new();
    for entry in WalkDir::new(root.as_ref()).sort_by_file_name() {
        let entry = entry.map_err(|e| NotegraphError::Io(format!("Directory walk failed: {e}")))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.path().to_string_lossy().into_owned();
        if !name.to_ascii_lowercase().ends_with(DOC_EXTENSION) {
            continue;
        }
        let content = String::from_utf8(std::fs::read(entry.path())?)?;
        if let Some(record) = Record::from_document(&name, &content) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Convenience: parse a zipped export and assemble its mention graph with
/// default options in one call.
pub fn mention_graph_from_zip<P: AsRef<Path>>(path: P) -> Result<MentionGraph, NotegraphError> {
    let records = parse_export_zip(path)?;
    Ok(build_mention_graph(&records))
}
