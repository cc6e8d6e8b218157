//! High-level Index API
//!
//! This module provides the main entry point for the blinded name index:
//! external `/`-separated names go in, blinded trie operations come out.

use crate::blind::{blind, segment_secret, BlindedPair};
use crate::group::GroupParameters;
use crate::name::prefix_segments;
use crate::trie::{NodeId, Trie};
use crate::{Error, Result};
use rand::Rng;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// Optional instrumentation callback: operation name and elapsed wall time
pub type InstrumentHook = Box<dyn Fn(&str, Duration)>;

/// A privacy-preserving hierarchical name index
///
/// Owns the group parameters, the blinded trie, and a per-depth registry of
/// node ids. The registry lets a lookup resume matching at an arbitrary
/// depth, modeling the multi-hop case where a participant picks up a
/// previously established prefix partway along the path instead of
/// re-verifying it from the root.
///
/// Names are blinded on the way in; nothing reachable from the index exposes
/// a plaintext component.
pub struct Index<T: Ord> {
    params: GroupParameters,
    trie: Trie<T>,
    /// Node ids registered per depth, deduplicated, in first-visit order.
    /// `levels[0]` is always exactly the root.
    levels: Vec<Vec<NodeId>>,
    instrument: Option<InstrumentHook>,
}

impl<T: Ord> Index<T> {
    /// Create an empty index bound to one set of group parameters
    pub fn new(params: GroupParameters) -> Self {
        Index {
            params,
            trie: Trie::new(),
            levels: vec![vec![NodeId::ROOT]],
            instrument: None,
        }
    }

    /// Install an instrumentation hook, invoked after each `add_item` and
    /// `lookup` with the operation name and its elapsed duration
    pub fn with_instrument(mut self, hook: impl Fn(&str, Duration) + 'static) -> Self {
        self.instrument = Some(Box::new(hook));
        self
    }

    /// The group parameters this index was built with
    pub fn params(&self) -> &GroupParameters {
        &self.params
    }

    /// Insert an item under a hierarchical name
    ///
    /// Each cumulative prefix segment is blinded under a fresh salt from
    /// `rng` and inserted one trie level at a time. Inserting the same
    /// `(name, item)` pair again is a no-op; a different item under the same
    /// name accumulates in the terminal node's set.
    pub fn add_item(&mut self, name: &str, item: T, rng: &mut impl Rng) -> Result<()> {
        let started = Instant::now();
        let segments = split_name(name)?;
        let blinded = self.blind_segments(&segments, rng);
        let visited = self.trie.insert(&self.params, &blinded, item);
        self.register(&visited);
        self.observe("add_item", started);
        Ok(())
    }

    /// Look up the item set stored under a name
    ///
    /// `start_depth` resumes matching at a known prefix depth: only the
    /// segments from that depth onward are blinded and matched, starting
    /// from every node registered at that depth. `start_depth = 0` is the
    /// ordinary root descent. Read-only; the registry is never touched.
    ///
    /// Fails with [`Error::InvalidDepth`] when `start_depth` reaches past
    /// the name's last segment or names a depth the registry has never seen.
    pub fn lookup(
        &self,
        name: &str,
        start_depth: usize,
        rng: &mut impl Rng,
    ) -> Result<Option<&BTreeSet<T>>> {
        let started = Instant::now();
        let segments = split_name(name)?;
        if start_depth >= segments.len() || start_depth >= self.levels.len() {
            return Err(Error::InvalidDepth {
                depth: start_depth,
                segments: segments.len(),
            });
        }

        // Only the suffix from start_depth onward is ever compared, so only
        // it gets blinded; each blinding is two modular exponentiations.
        let suffix = self.blind_segments(&segments[start_depth..], rng);
        let mut found = None;
        for &candidate in &self.levels[start_depth] {
            if let Some(node) = self.trie.descend(&self.params, candidate, &suffix) {
                found = Some(self.trie.node(node).items());
                break;
            }
        }
        self.observe("lookup", started);
        Ok(found)
    }

    /// Number of trie nodes, root included
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Number of depths with at least one registered node (root counts)
    pub fn depth_count(&self) -> usize {
        self.levels.len()
    }

    /// Blind cumulative prefix segments under fresh salts, one salt each
    fn blind_segments(&self, segments: &[String], rng: &mut impl Rng) -> Vec<BlindedPair> {
        segments
            .iter()
            .map(|segment| {
                let salt = self.params.random_salt(rng);
                blind(&segment_secret(segment), &salt, &self.params)
            })
            .collect()
    }

    /// Record an insert's visited path in the level registry, one slot per
    /// depth, skipping nodes already registered there
    fn register(&mut self, visited: &[NodeId]) {
        for (depth, &node) in visited.iter().enumerate() {
            if depth == self.levels.len() {
                self.levels.push(Vec::new());
            }
            let level = &mut self.levels[depth];
            if !level.contains(&node) {
                level.push(node);
            }
        }
    }

    fn observe(&self, operation: &str, started: Instant) {
        if let Some(ref hook) = self.instrument {
            hook(operation, started.elapsed());
        }
    }
}

/// Validate a name and produce its cumulative prefix segments
fn split_name(name: &str) -> Result<Vec<String>> {
    let segments = prefix_segments(name);
    if segments.is_empty() {
        return Err(Error::EmptyName(name.to_string()));
    }
    Ok(segments)
}

impl<T: Ord + std::fmt::Display> Index<T> {
    /// Diagnostic tree dump: blinded labels as truncated hex pairs, items
    /// via their `Display` form
    pub fn render(&self) -> String {
        self.trie.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_index() -> Index<u32> {
        let params = GroupParameters::from_parts(
            BigUint::from(998244353u64),
            BigUint::from(3u32),
            BigUint::from(76543u32),
        )
        .unwrap();
        Index::new(params)
    }

    #[test]
    fn test_add_then_lookup() {
        let mut index = test_index();
        let mut rng = StdRng::seed_from_u64(10);
        index.add_item("/a/b/c", 1, &mut rng).unwrap();

        let items = index.lookup("/a/b/c", 0, &mut rng).unwrap().unwrap();
        assert!(items.contains(&1));
    }

    #[test]
    fn test_lookup_miss_returns_none() {
        let mut index = test_index();
        let mut rng = StdRng::seed_from_u64(11);
        index.add_item("/a/b", 1, &mut rng).unwrap();

        assert!(index.lookup("/x/y/z", 0, &mut rng).unwrap().is_none());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut index = test_index();
        let mut rng = StdRng::seed_from_u64(12);
        assert!(matches!(
            index.add_item("///", 1, &mut rng),
            Err(Error::EmptyName(_))
        ));
        assert!(matches!(
            index.lookup("", 0, &mut rng),
            Err(Error::EmptyName(_))
        ));
    }

    #[test]
    fn test_invalid_start_depth() {
        let mut index = test_index();
        let mut rng = StdRng::seed_from_u64(13);
        index.add_item("/a/b", 1, &mut rng).unwrap();

        // Past the name's segments.
        assert!(matches!(
            index.lookup("/a/b", 2, &mut rng),
            Err(Error::InvalidDepth { depth: 2, .. })
        ));
        // Depth never registered by any insert.
        assert!(matches!(
            index.lookup("/a/b/c/d/e", 4, &mut rng),
            Err(Error::InvalidDepth { depth: 4, .. })
        ));
    }

    #[test]
    fn test_resumed_lookup_matches_root_lookup() {
        let mut index = test_index();
        let mut rng = StdRng::seed_from_u64(14);
        index.add_item("/a/b/c", 5, &mut rng).unwrap();

        let from_root = index.lookup("/a/b/c", 0, &mut rng).unwrap().cloned();
        for depth in 1..3 {
            let resumed = index.lookup("/a/b/c", depth, &mut rng).unwrap().cloned();
            assert_eq!(resumed, from_root);
        }
    }

    #[test]
    fn test_registry_is_deduplicated() {
        let mut index = test_index();
        let mut rng = StdRng::seed_from_u64(15);
        index.add_item("/a/b", 1, &mut rng).unwrap();
        index.add_item("/a/b", 2, &mut rng).unwrap();
        index.add_item("/a/c", 3, &mut rng).unwrap();

        // Depth 1 holds the single "a" node despite three inserts through it.
        assert_eq!(index.levels[1].len(), 1);
        assert_eq!(index.levels[0], vec![NodeId::ROOT]);
    }

    #[test]
    fn test_instrument_hook_fires() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut index = test_index().with_instrument(move |op, _elapsed| {
            sink.borrow_mut().push(op.to_string());
        });

        let mut rng = StdRng::seed_from_u64(16);
        index.add_item("/a", 1, &mut rng).unwrap();
        index.lookup("/a", 0, &mut rng).unwrap();

        assert_eq!(*seen.borrow(), vec!["add_item", "lookup"]);
    }

    #[test]
    fn test_concrete_scenario() {
        let mut index = test_index();
        let mut rng = StdRng::seed_from_u64(17);
        index.add_item("/a/b/c1", 1, &mut rng).unwrap();
        index.add_item("/a/b1", 2, &mut rng).unwrap();

        let c1 = index.lookup("/a/b/c1", 0, &mut rng).unwrap().unwrap();
        assert_eq!(c1.iter().copied().collect::<Vec<_>>(), vec![1]);

        let b1 = index.lookup("/a/b1", 0, &mut rng).unwrap().unwrap();
        assert_eq!(b1.iter().copied().collect::<Vec<_>>(), vec![2]);

        assert!(index.lookup("/a/b/c2", 0, &mut rng).unwrap().is_none());
    }
}
