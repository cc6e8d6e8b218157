//! Prefix trie over blinded edge labels
//!
//! The trie never sees plaintext segments: every edge label is a
//! [`BlindedPair`](crate::BlindedPair), and the only comparison primitive is
//! the oblivious equality test. One trie level corresponds to one cumulative
//! prefix segment of the stored names.

mod node;
mod tree;

pub use node::{NodeId, TrieEdge, TrieNode};
pub use tree::Trie;
