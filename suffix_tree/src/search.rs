//! Cost-aware substring search: the longest admissible match for `T[q..]`
//! under the live annotations.

use crate::arena::{NodeArena, ROOT};
use crate::cost::CostModel;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Text position of the chosen copy source. `0` only ever means "no
    /// match": a real source is never at position 0, since position 0
    /// only becomes a copy source once it's already been read once as a
    /// literal, and this function never returns a match rooted there.
    pub pos: usize,
    pub length: usize,
}

impl Match {
    pub fn none() -> Self {
        Match { pos: 0, length: 0 }
    }
}

/// Walks the annotated tree from the root, descending as long as the
/// annotation at each node is viable, and returns the longest admissible
/// match it can certify without crossing the cost ceiling.
pub fn search(arena: &NodeArena, cost: &CostModel, text: &[u8], q: usize) -> Result<Match> {
    let mut current = Match::none();
    if q >= text.len() {
        return Ok(current);
    }

    let mut node = match arena.find_son(ROOT, text, text[q]) {
        Some(n) => n,
        None => return Ok(current),
    };
    let mut matched = 0usize;

    loop {
        let annotation = arena.get(node).annotation;

        let optimistic = match annotation.optimistic_min_max {
            None => return Ok(current),
            Some(v) => v,
        };

        if optimistic >= cost.ceiling {
            let candidate_len = cost.d(annotation.optimistic_text_pos);
            if candidate_len > current.length as i64 {
                if annotation.optimistic_text_pos == 0 {
                    return Err(Error::ZeroSourcePosition);
                }
                current = Match {
                    pos: annotation.optimistic_text_pos,
                    length: candidate_len.max(0) as usize,
                };
            }
            return Ok(current);
        }

        let edge_start = arena.get(node).edge_start;
        let edge_end = arena.edge_end(node);
        let edge_len = edge_end - edge_start;

        let mut k = 0usize;
        while k < edge_len && q + matched + k < text.len() && text[edge_start + k] == text[q + matched + k] {
            k += 1;
        }
        matched += k;

        if annotation.optimistic_text_pos == 0 {
            return Err(Error::ZeroSourcePosition);
        }
        current = Match {
            pos: annotation.optimistic_text_pos,
            length: matched,
        };

        if k < edge_len {
            return Ok(current);
        }

        if q + matched >= text.len() {
            return Ok(current);
        }
        match arena.find_son(node, text, text[q + matched]) {
            Some(next) => node = next,
            None => return Ok(current),
        }
    }
}
