//! Per-node annotation propagation.
//!
//! Nodes start annotated `Annotation::UNDEFINED` by construction (see
//! `NodeArena::create_node`), which already is the correct "no viable
//! candidate yet" state for every position still at infinite cost — there
//! is no separate annotate-initialize pass to run beyond that default.
//!
//! Everything here is driven by `propagate_from_leaf`, called once per
//! emitted phrase from `Factorizer`.

use crate::arena::{NodeArena, NodeId};
use crate::cost::CostModel;

pub struct Annotator;

impl Annotator {
    /// Refreshes ancestors of every leaf whose subtree could have been
    /// affected by the phrase that just ran from `text_pos` for `len`
    /// symbols. `max_str_depth` prunes the walk: once the running maximum
    /// over positions `<= i` can no longer reach `text_pos`, nothing
    /// further back can be affected either.
    pub fn propagate_from_leaf(arena: &mut NodeArena, cost: &CostModel, text_pos: usize, len: usize) {
        let final_pos = text_pos + len;
        let mut running_min_max = cost.capped_max(text_pos, final_pos);
        let mut i = text_pos;
        loop {
            if cost.max_str_depth[i] < text_pos {
                break;
            }
            if let Some(leaf) = cost.inverse_pointers[i] {
                let call_len = text_pos - i;
                Self::change_annotation_from_leaf(arena, cost, leaf, i, final_pos, call_len, running_min_max);
            }
            if i == 0 {
                break;
            }
            i -= 1;
            running_min_max = running_min_max.max(cost.u(i));
        }
    }

    /// Walks from `leaf` up to root, stopping once an ancestor's
    /// `str_depth <= len`. For every ancestor still in range, recomputes
    /// the cost of copying `str_depth(v)` symbols from `text_pos` and
    /// folds it into that node's `min_max`/`optimistic_min_max`.
    fn change_annotation_from_leaf(
        arena: &mut NodeArena,
        cost: &CostModel,
        leaf: NodeId,
        text_pos: usize,
        final_pos: usize,
        len: usize,
        _range_min_max: usize,
    ) {
        let mut cur = arena.get(leaf).parent;
        while let Some(v) = cur {
            let str_depth = arena.get(v).str_depth;
            if str_depth <= len {
                break;
            }
            let range_end = text_pos + str_depth - 1;
            if range_end <= final_pos {
                let candidate_cost = cost.capped_max(text_pos, range_end);
                Self::update_min_max(arena, cost, v, text_pos, candidate_cost);
                Self::update_optimistic_min_max(arena, cost, v, text_pos, candidate_cost);
            }
            cur = arena.get(v).parent;
        }
    }

    fn update_min_max(arena: &mut NodeArena, cost: &CostModel, v: NodeId, candidate_pos: usize, candidate_cost: usize) {
        let ann = arena.get(v).annotation;
        let current_is_exhausted_or_undefined = ann.min_max.map(|m| m >= cost.ceiling).unwrap_or(true);
        let accept = if current_is_exhausted_or_undefined {
            let current_d = if ann.min_max.is_some() {
                cost.d(ann.text_pos)
            } else {
                crate::cost::D_UNSET
            };
            candidate_cost < cost.ceiling || cost.d(candidate_pos) > current_d
        } else {
            candidate_cost < ann.min_max.unwrap()
        };
        if accept {
            let a = &mut arena.get_mut(v).annotation;
            a.min_max = Some(candidate_cost);
            a.text_pos = candidate_pos;
        }
    }

    /// `v`'s children, ranked by smallest `optimistic_min_max` and then by
    /// larger `D` of the candidate's text position — the basis for
    /// deciding between two equally-exhausted candidates.
    fn new_min_max_holder(arena: &NodeArena, cost: &CostModel, v: NodeId) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        let mut child = arena.get(v).first_child;
        while let Some(c) = child {
            let ann = arena.get(c).annotation;
            if let Some(om) = ann.optimistic_min_max {
                let candidate = (om, ann.optimistic_text_pos);
                best = Some(match best {
                    None => candidate,
                    Some((bm, bp)) => {
                        if candidate.0 < bm || (candidate.0 == bm && cost.d(candidate.1) > cost.d(bp)) {
                            candidate
                        } else {
                            (bm, bp)
                        }
                    }
                });
            }
            child = arena.get(c).next_sibling;
        }
        best
    }

    fn update_optimistic_min_max(
        arena: &mut NodeArena,
        cost: &CostModel,
        v: NodeId,
        candidate_pos: usize,
        candidate_cost: usize,
    ) {
        let ann = arena.get(v).annotation;
        match ann.optimistic_min_max {
            None => {
                let a = &mut arena.get_mut(v).annotation;
                a.optimistic_min_max = Some(candidate_cost);
                a.optimistic_text_pos = candidate_pos;
            }
            Some(current) if current >= cost.ceiling => {
                if candidate_cost < cost.ceiling {
                    let a = &mut arena.get_mut(v).annotation;
                    a.optimistic_min_max = Some(candidate_cost);
                    a.optimistic_text_pos = candidate_pos;
                    return;
                }
                let holder = Self::new_min_max_holder(arena, cost, v);
                let holder_exhausted = holder.map(|(m, _)| m >= cost.ceiling).unwrap_or(true);
                if holder_exhausted {
                    let winner_pos = match holder {
                        Some((_, hp)) if cost.d(hp) > cost.d(candidate_pos) => hp,
                        _ => candidate_pos,
                    };
                    let a = &mut arena.get_mut(v).annotation;
                    a.optimistic_min_max = Some(cost.ceiling);
                    a.optimistic_text_pos = winner_pos;
                } else {
                    // A child already went non-exhausted (reachable as
                    // `str_depth`/`capped_max` ranges widen ascending from a
                    // leaf): promote its candidate instead of leaving `v`
                    // stuck at the stale exhausted value.
                    let (holder_min_max, holder_pos) = holder.unwrap();
                    let a = &mut arena.get_mut(v).annotation;
                    a.optimistic_min_max = Some(holder_min_max);
                    a.optimistic_text_pos = holder_pos;
                }
            }
            Some(current) => {
                let min_max_floor = ann.min_max.unwrap_or(cost.ceiling);
                let stricter = current.min(min_max_floor);
                if candidate_cost < stricter {
                    let a = &mut arena.get_mut(v).annotation;
                    a.optimistic_min_max = Some(candidate_cost);
                    a.optimistic_text_pos = candidate_pos;
                }
            }
        }
    }
}
