//! Rooted tree stored as a parent → children adjacency map.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Opaque node identifier, unique within one tree.
pub type NodeId = i32;

/// Root used for trees created without any edges.
pub const DEFAULT_ROOT: NodeId = 1;

/// Prefix of every rendered node line.
const NODE_MARKER: &str = "L__";

/// A rejected mutation. The tree is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    #[error("root cannot be removed: {0}")]
    RootRemoval(NodeId),

    #[error("non-leaf node cannot be removed: {0}")]
    NonLeaf(NodeId),

    #[error("edge ({parent},{child}) would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

/// Rooted, cycle-free tree of integer node ids.
///
/// Child sets are unordered. A node absent as a key simply has no children.
/// Empty child sets are never significant: two trees are equal when they share
/// the root and the same set of parent → child edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    root: NodeId,
    #[serde(default)]
    children: HashMap<NodeId, HashSet<NodeId>>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.edges() == other.edges()
    }
}

impl Eq for Tree {}

impl Tree {
    /// Create an empty tree consisting of `root` only.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            children: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Children of `node`; empty when the node has none or is unknown.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children.get(&node).into_iter().flatten().copied()
    }

    /// Owned snapshot of the child set, safe to hold across mutation.
    pub(crate) fn child_set(&self, node: NodeId) -> HashSet<NodeId> {
        self.children.get(&node).cloned().unwrap_or_default()
    }

    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.children.get(&node).map_or(true, HashSet::is_empty)
    }

    /// Whether `node` is the root or appears as anyone's child.
    pub fn contains(&self, node: NodeId) -> bool {
        node == self.root || self.children.values().any(|set| set.contains(&node))
    }

    /// Parent of `node`; `None` for the root and unknown nodes.
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(_, set)| set.contains(&node))
            .map(|(&parent, _)| parent)
    }

    /// Refuse an edge that would make `child` its own ancestor.
    ///
    /// [`Tree::add`] does not call this; it guards edges coming from user input.
    pub fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<(), Refusal> {
        let refusal = Refusal::Cycle { parent, child };
        if child == self.root {
            return Err(refusal);
        }
        let mut seen = HashSet::new();
        let mut current = Some(parent);
        while let Some(node) = current {
            if node == child {
                return Err(refusal);
            }
            if !seen.insert(node) {
                break;
            }
            current = self.parent_of(node);
        }
        Ok(())
    }

    /// All parent → child edges, sorted.
    pub fn edges(&self) -> BTreeSet<(NodeId, NodeId)> {
        self.children
            .iter()
            .flat_map(|(&parent, set)| set.iter().map(move |&child| (parent, child)))
            .collect()
    }

    /// Number of nodes reachable from the root, root included.
    pub fn len(&self) -> usize {
        1 + self.count_descendants(self.root)
    }

    /// A tree always holds its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn count_descendants(&self, node: NodeId) -> usize {
        self.children(node)
            .map(|child| 1 + self.count_descendants(child))
            .sum()
    }

    /// Number of levels, a lone root has depth 1.
    pub fn depth(&self) -> usize {
        self.depth_from(self.root)
    }

    fn depth_from(&self, node: NodeId) -> usize {
        1 + self
            .children(node)
            .map(|child| self.depth_from(child))
            .max()
            .unwrap_or(0)
    }

    /// Attach `child` under `parent`.
    ///
    /// No validation is done: callers keep the tree invariants. Adding an
    /// existing edge is a no-op.
    #[instrument(level = "trace", skip(self))]
    pub fn add(&mut self, parent: NodeId, child: NodeId) {
        self.children.entry(parent).or_default().insert(child);
    }

    /// Detach a leaf from its parent.
    ///
    /// The root and nodes with children are refused and the tree is unchanged.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, node: NodeId) -> Result<(), Refusal> {
        if node == self.root {
            debug!("refused: {} is the root", node);
            return Err(Refusal::RootRemoval(node));
        }
        if !self.is_leaf(node) {
            debug!("refused: {} has children", node);
            return Err(Refusal::NonLeaf(node));
        }

        self.children.remove(&node);
        for set in self.children.values_mut() {
            set.remove(&node);
        }
        self.children.retain(|_, set| !set.is_empty());
        Ok(())
    }

    /// Box-drawing rendering of the tree.
    pub fn to_termtree(&self) -> termtree::Tree<NodeId> {
        self.termtree_from(self.root)
    }

    fn termtree_from(&self, node: NodeId) -> termtree::Tree<NodeId> {
        let mut children: Vec<_> = self.children(node).collect();
        children.sort_unstable();
        termtree::Tree::new(node).with_leaves(children.into_iter().map(|c| self.termtree_from(c)))
    }

    fn render_into(&self, node: NodeId, margin: usize, lines: &mut Vec<String>) {
        let line = format!("{}{}{}", " ".repeat(margin), NODE_MARKER, node);
        let child_margin = line.len();
        lines.push(line);
        for child in self.children(node) {
            self.render_into(child, child_margin, lines);
        }
    }
}

/// Indented rendering: one `L__<id>` line per node, each child indented by the
/// full width of its parent's line.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        self.render_into(self.root, 0, &mut lines);
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        // 1
        // ├── 2
        // │   └── 4
        // └── 3
        let mut tree = Tree::new(1);
        tree.add(1, 2);
        tree.add(1, 3);
        tree.add(2, 4);
        tree
    }

    #[test]
    fn given_same_edge_twice_when_adding_then_child_set_unchanged() {
        let mut once = Tree::new(1);
        once.add(1, 2);
        let mut twice = once.clone();
        twice.add(1, 2);

        assert_eq!(once, twice);
        assert_eq!(twice.children(1).count(), 1);
    }

    #[test]
    fn given_root_when_removing_then_refused_and_unchanged() {
        let mut tree = sample();
        let before = tree.clone();

        assert_eq!(tree.remove(1), Err(Refusal::RootRemoval(1)));
        assert_eq!(tree, before);
    }

    #[test]
    fn given_inner_node_when_removing_then_refused_and_unchanged() {
        let mut tree = sample();
        let before = tree.clone();

        assert_eq!(tree.remove(2), Err(Refusal::NonLeaf(2)));
        assert_eq!(tree, before);
    }

    #[test]
    fn given_leaf_when_removing_then_detached_from_parent() {
        let mut tree = sample();

        tree.remove(4).unwrap();

        assert!(!tree.contains(4));
        assert!(tree.is_leaf(2));
        assert_eq!(tree.edges(), BTreeSet::from([(1, 2), (1, 3)]));
    }

    #[test]
    fn given_unknown_node_when_removing_then_noop() {
        let mut tree = sample();
        let before = tree.clone();

        assert!(tree.remove(42).is_ok());
        assert_eq!(tree, before);
    }

    #[test]
    fn given_back_edge_when_checking_attach_then_cycle_refused() {
        let tree = sample();

        assert_eq!(tree.check_attach(2, 1), Err(Refusal::Cycle { parent: 2, child: 1 }));
        assert_eq!(tree.check_attach(4, 2), Err(Refusal::Cycle { parent: 4, child: 2 }));
        assert_eq!(tree.check_attach(3, 3), Err(Refusal::Cycle { parent: 3, child: 3 }));
    }

    #[test]
    fn given_forward_edge_when_checking_attach_then_allowed() {
        let tree = sample();

        assert!(tree.check_attach(4, 5).is_ok());
        assert!(tree.check_attach(3, 2).is_ok(), "moving 2 under a sibling is not a cycle");
        assert_eq!(tree.parent_of(4), Some(2));
        assert_eq!(tree.parent_of(1), None);
    }

    #[test]
    fn given_empty_child_set_when_comparing_then_ignored() {
        let mut left = sample();
        left.children.insert(3, HashSet::new());

        assert_eq!(left, sample());
    }

    #[test]
    fn given_chain_when_rendering_then_margin_grows_by_parent_width() {
        let mut tree = Tree::new(1);
        tree.add(1, 20);
        tree.add(20, 3);

        assert_eq!(tree.to_string(), "L__1\n    L__20\n         L__3");
    }

    #[test]
    fn given_default_tree_when_rendering_then_only_root() {
        assert_eq!(Tree::default().to_string(), "L__1");
        assert_eq!(Tree::default().len(), 1);
        assert_eq!(Tree::default().depth(), 1);
    }

    #[test]
    fn given_sample_when_measuring_then_counts_nodes_and_levels() {
        let tree = sample();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn given_sample_when_termtree_then_children_sorted() {
        let rendered = sample().to_termtree().to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "1");
        assert!(lines[1].ends_with("2"));
        assert!(lines[2].ends_with("4"));
        assert!(lines[3].ends_with("3"));
    }
}
