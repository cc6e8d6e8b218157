//! Trie node types

use crate::blind::BlindedPair;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Index of a node in its [`Trie`](super::Trie) arena
///
/// Nodes are owned by the arena; everything else (edges, the level registry)
/// refers to them by id, never by pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node of every trie
    pub const ROOT: NodeId = NodeId(0);
}

/// One outgoing edge: a blinded label and the child it leads to
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrieEdge {
    pub label: BlindedPair,
    pub child: NodeId,
}

/// A node in the blinded prefix trie
///
/// Edges stay in insertion order. Matching is a left-to-right scan with the
/// oblivious equality test, first hit wins; by the protocol's correctness
/// property at most one edge can match a given probe (up to negligible
/// collision), so order affects scan cost only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrieNode<T: Ord> {
    pub(crate) edges: Vec<TrieEdge>,
    pub(crate) items: BTreeSet<T>,
}

impl<T: Ord> TrieNode<T> {
    pub(crate) fn new() -> Self {
        TrieNode {
            edges: Vec::new(),
            items: BTreeSet::new(),
        }
    }

    /// Items stored at this exact node
    pub fn items(&self) -> &BTreeSet<T> {
        &self.items
    }

    /// Number of outgoing edges
    pub fn fanout(&self) -> usize {
        self.edges.len()
    }
}

impl<T: Ord> Default for TrieNode<T> {
    fn default() -> Self {
        Self::new()
    }
}
