//! # notegraph-core
//!
//! A Rust library for deriving a weighted, directed reference graph from an
//! export archive of interlinked Markdown note documents (such as a
//! Capacities export).
//!
//! ## Overview
//!
//! notegraph-core ingests a zip (or unpacked directory) of Markdown entries,
//! parses each entry's YAML frontmatter and body into a [`record::Record`],
//! extracts cross-document references from free text with the
//! [`mentions`] scanner, and assembles the result into a
//! [`graph::MentionGraph`] whose edge weights count aggregated mentions.
//!
//! ### Key behaviors
//!
//! - **Error tolerance**: malformed frontmatter, unparseable dates, and
//!   dangling references all degrade to omission; one bad document never
//!   aborts the batch. Only an unreadable archive or an undecodable entry is
//!   fatal.
//! - **Two-stage assembly**: nodes are registered in one pass, edges
//!   resolved against the completed node index in a second, so reference
//!   resolution is never order-dependent.
//! - **Scalar attributes**: timestamps serialize to ISO-8601 and property
//!   mappings to compact JSON text, so graph attributes stay compatible with
//!   scalar-only exchange formats like GraphML.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notegraph_core::archive::mention_graph_from_zip;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let graph = mention_graph_from_zip("./export.zip")?;
//!     for (source, target, weight) in graph.edges() {
//!         println!("{source} -> {target} ({weight})");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Guide
//!
//! - [`archive`]: zip/directory ingestion into records
//! - [`record`]: frontmatter + body parsing, timestamp handling
//! - [`mentions`]: reference-span scanning and target normalization
//! - [`builder`]: two-stage graph assembly
//! - [`graph`]: graph structures and the export-facing iteration interface
//! - [`export`]: chronological Markdown concatenation

pub mod archive;
pub mod builder;
pub mod error;
pub mod export;
pub mod graph;
pub mod mentions;
pub mod record;

pub use error::*;
