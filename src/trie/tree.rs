//! Arena-backed trie with blinded-label matching

use super::{NodeId, TrieEdge, TrieNode};
use crate::blind::{matches, BlindedPair};
use crate::group::GroupParameters;
use std::fmt;

/// A prefix trie whose edge labels are blinded pairs
///
/// All nodes live in one arena owned by the trie; parents refer to children
/// by [`NodeId`]. The arena only grows (there is no delete), so ids stay
/// valid for the life of the trie, which is what lets the index keep
/// non-owning per-depth references to interior nodes.
#[derive(Clone, Debug)]
pub struct Trie<T: Ord> {
    nodes: Vec<TrieNode<T>>,
}

impl<T: Ord> Trie<T> {
    /// Create a trie holding only an empty root
    pub fn new() -> Self {
        Trie {
            nodes: vec![TrieNode::new()],
        }
    }

    /// Borrow a node by id
    pub fn node(&self, id: NodeId) -> &TrieNode<T> {
        &self.nodes[id.0]
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert an item under a sequence of blinded segment labels
    ///
    /// Descends one level per segment, reusing the first edge whose label
    /// matches and growing a fresh edge where none does. The item lands in
    /// the terminal node's set (re-inserting it there is a no-op). Returns
    /// every node visited, root first, terminal last; the caller uses this
    /// to maintain its level registry.
    ///
    /// Callers guarantee `segments` is non-empty; the index validates names
    /// before blinding them.
    pub fn insert(
        &mut self,
        params: &GroupParameters,
        segments: &[BlindedPair],
        item: T,
    ) -> Vec<NodeId> {
        debug_assert!(!segments.is_empty());
        let mut visited = Vec::with_capacity(segments.len() + 1);
        let mut current = NodeId::ROOT;
        visited.push(current);

        for label in segments {
            current = match self.match_edge(current, label, params) {
                Some(child) => child,
                None => {
                    let child = self.push_node();
                    self.nodes[current.0].edges.push(TrieEdge {
                        label: label.clone(),
                        child,
                    });
                    child
                }
            };
            visited.push(current);
        }

        self.nodes[current.0].items.insert(item);
        visited
    }

    /// Follow blinded segments downward from `start`, without mutating
    ///
    /// Returns the terminal node when every segment found a matching edge,
    /// `None` at the first level with no match.
    pub fn descend(
        &self,
        params: &GroupParameters,
        start: NodeId,
        segments: &[BlindedPair],
    ) -> Option<NodeId> {
        let mut current = start;
        for label in segments {
            current = self.match_edge(current, label, params)?;
        }
        Some(current)
    }

    /// Linear scan of a node's edges with the oblivious equality test
    fn match_edge(
        &self,
        node: NodeId,
        probe: &BlindedPair,
        params: &GroupParameters,
    ) -> Option<NodeId> {
        self.nodes[node.0]
            .edges
            .iter()
            .find(|edge| matches(&edge.label, probe, params))
            .map(|edge| edge.child)
    }

    fn push_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TrieNode::new());
        id
    }
}

impl<T: Ord + fmt::Display> Trie<T> {
    /// Indented diagnostic rendering
    ///
    /// Edge labels appear as their truncated hex pairs, opaque by
    /// construction and never inverted to plaintext.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(NodeId::ROOT, 0, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        let items: Vec<String> = node.items.iter().map(|i| i.to_string()).collect();
        if depth == 0 {
            out.push_str(&format!("root items=[{}]\n", items.join(", ")));
        }
        for edge in &node.edges {
            let child = &self.nodes[edge.child.0];
            let child_items: Vec<String> = child.items.iter().map(|i| i.to_string()).collect();
            out.push_str(&format!(
                "{}{} -> node{} items=[{}]\n",
                "  ".repeat(depth + 1),
                edge.label.short(),
                edge.child.0,
                child_items.join(", ")
            ));
            self.render_node(edge.child, depth + 1, out);
        }
    }
}

impl<T: Ord> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blind::{blind, segment_secret};
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn params() -> GroupParameters {
        GroupParameters::from_parts(
            BigUint::from(998244353u64),
            BigUint::from(3u32),
            BigUint::from(76543u32),
        )
        .unwrap()
    }

    fn blind_all(segments: &[&str], params: &GroupParameters, rng: &mut impl Rng) -> Vec<BlindedPair> {
        segments
            .iter()
            .map(|s| blind(&segment_secret(s), &params.random_salt(rng), params))
            .collect()
    }

    #[test]
    fn test_insert_then_descend() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(1);
        let mut trie: Trie<u32> = Trie::new();

        let visited = trie.insert(&params, &blind_all(&["a", "ab"], &params, &mut rng), 7);
        assert_eq!(visited.len(), 3);
        assert_eq!(visited[0], NodeId::ROOT);

        // Fresh salts on the probe side: matching must still succeed.
        let probe = blind_all(&["a", "ab"], &params, &mut rng);
        let found = trie.descend(&params, NodeId::ROOT, &probe).unwrap();
        assert!(trie.node(found).items().contains(&7));
    }

    #[test]
    fn test_descend_miss_at_first_level() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(2);
        let mut trie: Trie<u32> = Trie::new();
        trie.insert(&params, &blind_all(&["a"], &params, &mut rng), 1);

        let probe = blind_all(&["x"], &params, &mut rng);
        assert!(trie.descend(&params, NodeId::ROOT, &probe).is_none());
    }

    #[test]
    fn test_shared_prefix_reuses_edges() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(3);
        let mut trie: Trie<u32> = Trie::new();

        trie.insert(&params, &blind_all(&["a", "ab", "abc"], &params, &mut rng), 1);
        trie.insert(&params, &blind_all(&["a", "ab", "abd"], &params, &mut rng), 2);

        // root + a + ab + abc + abd: the first two levels are shared.
        assert_eq!(trie.node_count(), 5);
        assert_eq!(trie.node(NodeId::ROOT).fanout(), 1);
    }

    #[test]
    fn test_item_set_semantics() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(4);
        let mut trie: Trie<u32> = Trie::new();

        let first = blind_all(&["a"], &params, &mut rng);
        let second = blind_all(&["a"], &params, &mut rng);
        trie.insert(&params, &first, 9);
        trie.insert(&params, &second, 9);
        trie.insert(&params, &blind_all(&["a"], &params, &mut rng), 10);

        let found = trie.descend(&params, NodeId::ROOT, &blind_all(&["a"], &params, &mut rng)).unwrap();
        let items = trie.node(found).items();
        assert_eq!(items.len(), 2);
        assert!(items.contains(&9) && items.contains(&10));
        // Duplicate inserts never grew the trie either.
        assert_eq!(trie.node_count(), 2);
    }

    #[test]
    fn test_render_shows_items_not_plaintext() {
        let params = params();
        let mut rng = StdRng::seed_from_u64(5);
        let mut trie: Trie<String> = Trie::new();
        trie.insert(
            &params,
            &blind_all(&["srv", "srvcache"], &params, &mut rng),
            "item-one".to_string(),
        );

        let dump = trie.render();
        assert!(dump.contains("item-one"));
        assert!(!dump.contains("srvcache"));
    }
}
