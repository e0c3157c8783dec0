//! An annotated Ukkonen suffix tree whose per-leaf annotation tracks, under
//! a live per-position reuse-cost ceiling, the best source position for
//! copying any given prefix depth. `suffix_tree::SuffixTree` is the single
//! aggregate the rest of this workspace's `lempel_ziv` crate drives through
//! its factorization loop: construct once, then repeatedly search, update
//! cost, and propagate.

pub mod annotate;
pub mod arena;
pub mod builder;
pub mod cost;
pub mod error;
pub mod search;
pub mod segment_tree;

use annotate::Annotator;
use arena::{NodeArena, ROOT};
use cost::CostModel;
pub use error::{Error, Result};
pub use search::Match;

pub struct SuffixTree {
    arena: NodeArena,
    /// Text including the trailing sentinel byte used to make the tree
    /// explicit. `text()` strips it back off.
    text: Vec<u8>,
    original_len: usize,
    cost: CostModel,
}

impl SuffixTree {
    /// Builds the suffix tree over `input` and initializes the cost
    /// bookkeeping with ceiling `cost_ceiling`. Rejects input containing a
    /// zero byte, the byte reserved as the internal end-of-string sentinel.
    pub fn new(input: &[u8], cost_ceiling: usize) -> Result<Self> {
        if let Some(pos) = input.iter().position(|&b| b == 0) {
            return Err(Error::ZeroByteInInput(pos));
        }

        let built = builder::build(input);
        let array_len = input.len() + 2;
        let leaf_info = builder::collect_leaf_info(&built.arena, array_len);

        let mut cost = CostModel::new(input.len(), cost_ceiling);
        cost.inverse_pointers = leaf_info.inverse_pointers;
        cost.max_str_depth = leaf_info.max_str_depth;

        Ok(SuffixTree {
            arena: built.arena,
            text: built.text,
            original_len: input.len(),
            cost,
        })
    }

    pub fn len(&self) -> usize {
        self.original_len
    }

    pub fn is_empty(&self) -> bool {
        self.original_len == 0
    }

    pub fn ceiling(&self) -> usize {
        self.cost.ceiling
    }

    /// Text without the internal sentinel byte.
    pub fn text(&self) -> &[u8] {
        &self.text[..self.original_len]
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Leaves in the tree, one per suffix of `text + sentinel`, so always
    /// `len() + 1`.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = self.arena.get(id);
            if node.is_leaf() {
                count += 1;
            }
            let mut child = node.first_child;
            while let Some(c) = child {
                stack.push(c);
                child = self.arena.get(c).next_sibling;
            }
        }
        count
    }

    /// Cost-aware longest match for `text[q..]`.
    pub fn search(&self, q: usize) -> Result<Match> {
        search::search(&self.arena, &self.cost, &self.text, q)
    }

    pub fn u(&self, p: usize) -> usize {
        self.cost.u(p)
    }

    pub fn d(&self, p: usize) -> i64 {
        self.cost.d(p)
    }

    pub fn set_d(&mut self, p: usize, value: i64) {
        self.cost.set_d(p, value);
    }

    /// Sets `U[p]`, failing if the caller tries to push it past the
    /// ceiling — that can only mean a Searcher bug upstream.
    pub fn set_cost(&mut self, p: usize, value: usize) -> Result<()> {
        if value > self.cost.ceiling {
            return Err(Error::CostCeilingExceeded {
                position: p,
                cost: value,
                ceiling: self.cost.ceiling,
            });
        }
        self.cost.set_u(p, value);
        Ok(())
    }

    pub fn is_exhausted(&self, p: usize) -> bool {
        self.cost.is_exhausted(p)
    }

    /// Refreshes ancestor annotations after a phrase of length `len` was
    /// just emitted starting at `text_pos`.
    pub fn propagate_from_leaf(&mut self, text_pos: usize, len: usize) {
        Annotator::propagate_from_leaf(&mut self.arena, &self.cost, text_pos, len);
    }

    /// Classical, annotation-blind substring search: used only by the
    /// self-test in `ST_SelfTest`-style property checks, never by the
    /// factorization loop itself.
    pub fn find_substring_classical(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        let mut node = ROOT;
        let mut i = 0usize;
        while i < needle.len() {
            let next = self.arena.find_son(node, &self.text, needle[i])?;
            let edge_start = self.arena.get(next).edge_start;
            let edge_end = self.arena.edge_end(next);
            let edge_len = edge_end - edge_start;
            let mut k = 0usize;
            while k < edge_len && i < needle.len() {
                if self.text[edge_start + k] != needle[i] {
                    return None;
                }
                k += 1;
                i += 1;
            }
            node = next;
        }
        Some(self.arena.get(node).path_position)
    }

    /// From any internal node, following suffix links eventually reaches
    /// root. Exposed for the property test in `tests/`.
    pub fn suffix_link_reaches_root(&self, mut node: arena::NodeId) -> bool {
        let mut steps = 0;
        while node != ROOT {
            match self.arena.get(node).suffix_link {
                Some(next) => node = next,
                None => return self.arena.get(node).is_leaf(),
            }
            steps += 1;
            if steps > self.arena.len() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_count_matches_n_plus_one() {
        let st = SuffixTree::new(b"banana", 3).unwrap();
        assert_eq!(st.leaf_count(), 7);
    }

    #[test]
    fn rejects_zero_byte_input() {
        let err = SuffixTree::new(b"ab\0cd", 3).unwrap_err();
        assert_eq!(err, Error::ZeroByteInInput(2));
    }

    #[test]
    fn classical_search_finds_every_substring() {
        let text = b"banana";
        let st = SuffixTree::new(text, 3).unwrap();
        for i in 0..text.len() {
            for j in i + 1..=text.len() {
                let needle = &text[i..j];
                let found = st.find_substring_classical(needle);
                assert!(found.is_some(), "did not find {:?}", String::from_utf8_lossy(needle));
            }
        }
    }

    #[test]
    fn classical_search_misses_absent_substring() {
        let st = SuffixTree::new(b"banana", 3).unwrap();
        assert_eq!(st.find_substring_classical(b"xyz"), None);
    }

    #[test]
    fn suffix_links_all_reach_root() {
        let st = SuffixTree::new(b"abcabcabc", 5).unwrap();
        for id in 1..st.node_count() {
            assert!(st.suffix_link_reaches_root(id), "node {} never reaches root", id);
        }
    }
}
