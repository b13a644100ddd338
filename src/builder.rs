//! Two-stage assembly of a [`MentionGraph`] from a record collection.
//!
//! Stage one registers every record as a node, building the identifier
//! index. Stage two resolves mentions against that completed index, so the
//! question "does this reference point to a known node" always has an
//! unambiguous answer. Mentions whose target has no node, and
//! self-references, are dropped rather than stored as dangling or self-loop
//! edges.

use std::collections::btree_map::Entry as BTreeEntry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    graph::{AttrValue, MentionGraph, NoteNode},
    mentions::scan_mentions,
    record::Record,
};

/// Graph assembly options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Serialize the `properties` mapping to compact JSON text instead of
    /// storing the nested structure, for compatibility with scalar-only
    /// export formats such as GraphML. On by default.
    pub normalize_properties: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            normalize_properties: true,
        }
    }
}

/// Builds a [`MentionGraph`] from records. Stateless apart from its options;
/// building twice from the same input yields identical graphs.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    options: GraphOptions,
}

impl GraphBuilder {
    pub fn new(options: GraphOptions) -> Self {
        GraphBuilder { options }
    }

    /// Assemble the mention graph. An empty record collection yields an
    /// empty graph; malformed input degrades to omission, never an error.
    pub fn build(&self, records: &[Record]) -> MentionGraph {
        let mut graph = MentionGraph::default();
        if records.is_empty() {
            return graph;
        }

        // Stage 1: register all nodes, first occurrence winning per
        // identifier.
        for record in records {
            if record.identifier.is_empty() {
                tracing::debug!("Skipping record with empty identifier");
                continue;
            }
            graph.add_node(NoteNode {
                identifier: record.identifier.clone(),
                attrs: self.node_attrs(record),
            });
        }

        // Stage 2: resolve mentions against the completed node index. Every
        // record contributes, including duplicates whose node registration
        // was discarded above.
        for record in records {
            if record.identifier.is_empty() {
                continue;
            }
            let Some(source_idx) = graph.node_index(&record.identifier) else {
                continue;
            };

            for (target, count) in mention_counts(record) {
                let Some(target_idx) = graph.node_index(&target) else {
                    tracing::debug!(
                        "Dropping dangling reference {} -> {target}",
                        record.identifier
                    );
                    continue;
                };
                if target_idx == source_idx {
                    tracing::warn!(
                        "Ignoring self-referencing mention in {}",
                        record.identifier
                    );
                    continue;
                }
                graph.add_mentions(source_idx, target_idx, count);
            }
        }

        graph
    }

    /// Node attributes for one record. Absent values are omitted; the
    /// timestamp is rendered to ISO-8601 so downstream export only sees
    /// scalars.
    fn node_attrs(&self, record: &Record) -> BTreeMap<String, AttrValue> {
        let mut attrs = BTreeMap::new();
        attrs.insert(
            "title".to_string(),
            AttrValue::Text(record.title.clone()),
        );
        attrs.insert(
            "object_type".to_string(),
            AttrValue::Text(record.object_type.clone()),
        );
        let properties = JsonValue::Object(record.properties.clone());
        let properties = if self.options.normalize_properties {
            serde_json::to_string(&properties)
                .map(AttrValue::Text)
                .unwrap_or(AttrValue::Composite(properties))
        } else {
            AttrValue::Composite(properties)
        };
        attrs.insert("properties".to_string(), properties);
        if let Some(timestamp) = &record.timestamp {
            attrs.insert(
                "date".to_string(),
                AttrValue::Text(timestamp.to_iso8601()),
            );
        }
        attrs
    }
}

/// Count mention occurrences from a record's body and string-valued
/// properties into a multiset, preserving first-occurrence order.
///
/// Repeat mentions count multiple times. Only string property values are
/// scanned; lists and nested mappings are not descended into.
fn mention_counts(record: &Record) -> Vec<(String, u64)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    let mut tally = |mention: String| match counts.entry(mention) {
        BTreeEntry::Vacant(entry) => {
            order.push(entry.key().clone());
            entry.insert(1);
        }
        BTreeEntry::Occupied(mut entry) => {
            *entry.get_mut() += 1;
        }
    };

    for mention in scan_mentions(&record.text_content) {
        tally(mention);
    }
    for value in record.properties.values() {
        if let Some(text) = value.as_str() {
            for mention in scan_mentions(text) {
                tally(mention);
            }
        }
    }

    order
        .into_iter()
        .map(|mention| {
            let count = counts.get(&mention).copied().unwrap_or_default();
            (mention, count)
        })
        .collect()
}

/// Build a mention graph with default options.
pub fn build_mention_graph(records: &[Record]) -> MentionGraph {
    GraphBuilder::default().build(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(identifier: &str, body: &str) -> Record {
        Record {
            identifier: identifier.to_string(),
            title: identifier.trim_end_matches(".md").to_string(),
            text_content: body.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn counts_repeat_mentions_per_occurrence() {
        let source = record("A.md", "[b](B.md) then again [b](B.md)");
        let counts = mention_counts(&source);
        assert_eq!(counts, vec![("B.md".to_string(), 2)]);
    }

    #[test]
    fn string_properties_merge_into_the_same_multiset() {
        let mut source = record("A.md", "[b](B.md)");
        source.properties.insert(
            "related".to_string(),
            JsonValue::String("[b](B.md) and [c](C.md)".to_string()),
        );
        source.properties.insert(
            "tags".to_string(),
            serde_json::json!(["[d](D.md) inside a list, not scanned"]),
        );
        let counts = mention_counts(&source);
        assert_eq!(
            counts,
            vec![("B.md".to_string(), 2), ("C.md".to_string(), 1)]
        );
    }
}
