//! Bracketed edge-list encoding: `[1,2][1,3][2,4]`.

use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{NodeId, Tree, DEFAULT_ROOT};

const EDGE_SEPARATOR: &str = "][";

/// Converts between the bracketed edge list and [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeCodec {
    default_root: NodeId,
}

impl Default for TreeCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl TreeCodec {
    /// `default_root` roots the tree decoded from empty input.
    pub fn new(default_root: NodeId) -> Self {
        Self { default_root }
    }

    pub fn default_root(&self) -> NodeId {
        self.default_root
    }

    /// Parse an edge list into a tree.
    ///
    /// The root is the only parent that never appears as a child. Empty input
    /// yields a lone `default_root`. Surrounding whitespace, including a
    /// trailing newline, is ignored.
    #[instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn decode(&self, text: &str) -> DomainResult<Tree> {
        let edges = parse_edges(text)?;
        if edges.is_empty() {
            debug!("empty edge list, root {}", self.default_root);
            return Ok(Tree::new(self.default_root));
        }

        let root = find_root(&edges)?;
        let mut tree = Tree::new(root);
        for &(parent, child) in &edges {
            tree.add(parent, child);
        }
        debug!("decoded {} edges, root {}", edges.len(), root);
        Ok(tree)
    }

    /// Human-facing indented rendering; not accepted by [`TreeCodec::decode`].
    pub fn encode(&self, tree: &Tree) -> String {
        tree.to_string()
    }

    /// Edge list of `tree` in sorted order, accepted by [`TreeCodec::decode`].
    ///
    /// A tree without edges encodes to the empty string.
    pub fn encode_edges(&self, tree: &Tree) -> String {
        tree.edges()
            .into_iter()
            .map(|(parent, child)| format!("[{},{}]", parent, child))
            .join("")
    }
}

fn parse_edges(text: &str) -> DomainResult<Vec<(NodeId, NodeId)>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let inner = text
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| DomainError::UnbalancedBrackets(text.to_string()))?;

    inner.split(EDGE_SEPARATOR).map(parse_edge).collect()
}

fn parse_edge(edge: &str) -> DomainResult<(NodeId, NodeId)> {
    if edge.contains(['[', ']']) {
        return Err(DomainError::UnbalancedBrackets(edge.to_string()));
    }
    let (parent, child) = edge
        .split(',')
        .collect_tuple()
        .ok_or_else(|| DomainError::MalformedEdge(edge.to_string()))?;
    Ok((parse_node_id(parent)?, parse_node_id(child)?))
}

fn parse_node_id(token: &str) -> DomainResult<NodeId> {
    let token = token.trim();
    token
        .parse()
        .map_err(|_| DomainError::InvalidNodeId(token.to_string()))
}

fn find_root(edges: &[(NodeId, NodeId)]) -> DomainResult<NodeId> {
    let parents: BTreeSet<NodeId> = edges.iter().map(|&(p, _)| p).collect();
    let children: BTreeSet<NodeId> = edges.iter().map(|&(_, c)| c).collect();
    let candidates: Vec<NodeId> = parents.difference(&children).copied().collect();

    match candidates.as_slice() {
        [] => Err(DomainError::NoRoot),
        [root] => Ok(*root),
        _ => Err(DomainError::AmbiguousRoot(candidates)),
    }
}
