//! Graph data structures for the document mention network.
//!
//! [`MentionGraph`] wraps a directed `petgraph::Graph` whose nodes are
//! [`NoteNode`]s keyed by record identifier and whose edge weights are
//! aggregated mention counts. An identifier index rides alongside the graph
//! so edge resolution and attribute lookup never scan node lists.

use std::{collections::BTreeMap, fmt};

use petgraph::{graph::NodeIndex, Directed};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A node or edge attribute value.
///
/// After normalization only the scalar variants appear, which is what
/// attribute-based exchange formats such as GraphML accept. `Composite`
/// carries the rich value to the export boundary when normalization is
/// disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Composite(JsonValue),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value is already scalar (export-safe without further
    /// normalization).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, AttrValue::Composite(_))
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{s}"),
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::Composite(v) => write!(f, "{v}"),
        }
    }
}

/// One graph node: a record identifier plus its exported attributes.
///
/// Absent values (missing timestamp, empty frontmatter) are omitted from the
/// attribute map rather than stored as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteNode {
    pub identifier: String,
    pub attrs: BTreeMap<String, AttrValue>,
}

impl NoteNode {
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }
}

/// Directed, edge-weighted mention graph over a record collection.
#[derive(Debug, Clone)]
pub struct MentionGraph {
    graph: petgraph::Graph<NoteNode, u64, Directed>,
    index: BTreeMap<String, NodeIndex>,
}

// The identifier index is derivable, so only the graph itself crosses the
// serialization boundary.
impl Serialize for MentionGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.graph.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MentionGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let graph = petgraph::Graph::<NoteNode, u64, Directed>::deserialize(deserializer)?;
        let index = graph
            .node_indices()
            .map(|idx| (graph[idx].identifier.clone(), idx))
            .collect();
        Ok(MentionGraph { graph, index })
    }
}

impl Default for MentionGraph {
    fn default() -> Self {
        MentionGraph {
            graph: petgraph::Graph::new(),
            index: BTreeMap::new(),
        }
    }
}

impl MentionGraph {
    pub fn as_graph(&self) -> &petgraph::Graph<NoteNode, u64, Directed> {
        &self.graph
    }

    pub fn as_graph_mut(&mut self) -> &mut petgraph::Graph<NoteNode, u64, Directed> {
        &mut self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    /// Look up a node's [`NodeIndex`] by identifier.
    pub fn node_index(&self, identifier: &str) -> Option<NodeIndex> {
        self.index.get(identifier).copied()
    }

    pub fn node(&self, identifier: &str) -> Option<&NoteNode> {
        self.node_index(identifier).map(|idx| &self.graph[idx])
    }

    /// Register a node, first occurrence winning on identifier collision.
    /// Returns the node's index either way.
    pub fn add_node(&mut self, node: NoteNode) -> NodeIndex {
        if let Some(existing) = self.index.get(&node.identifier) {
            tracing::debug!(
                "Ignoring duplicate node registration for '{}'",
                node.identifier
            );
            return *existing;
        }
        let identifier = node.identifier.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(identifier, idx);
        idx
    }

    /// Create the directed edge or add `count` onto its existing weight.
    /// Both endpoints must already be registered.
    pub fn add_mentions(&mut self, source: NodeIndex, target: NodeIndex, count: u64) {
        if let Some(edge) = self.graph.find_edge(source, target) {
            self.graph[edge] += count;
        } else {
            self.graph.add_edge(source, target, count);
        }
    }

    /// Iterate nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &NoteNode> {
        self.graph.node_weights()
    }

    /// Iterate edges as `(source identifier, target identifier, weight)` in
    /// creation order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.graph.raw_edges().iter().map(|edge| {
            (
                self.graph[edge.source()].identifier.as_str(),
                self.graph[edge.target()].identifier.as_str(),
                edge.weight,
            )
        })
    }

    /// The aggregated mention count from `source` to `target`, if that edge
    /// exists.
    pub fn weight(&self, source: &str, target: &str) -> Option<u64> {
        let source_idx = self.node_index(source)?;
        let target_idx = self.node_index(target)?;
        self.graph
            .find_edge(source_idx, target_idx)
            .map(|edge| self.graph[edge])
    }

    pub fn display_contents(&self) -> String {
        let nodes = self
            .nodes()
            .map(|n| {
                let title = n
                    .attr("title")
                    .map(|t| format!(": {t}"))
                    .unwrap_or_default();
                format!("{}{title}", n.identifier)
            })
            .collect::<Vec<String>>()
            .join(",\n- ");
        let edges = self
            .edges()
            .map(|(source, target, weight)| format!("{source} -> {target}: {weight}"))
            .collect::<Vec<String>>()
            .join("\n- ");
        format!("nodes:\n- {nodes},\nedges:\n- {edges}")
    }
}

impl fmt::Display for MentionGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_contents())
    }
}
