//! Ukkonen's online suffix-tree construction.
//!
//! This follows the textbook phase/extension formulation (Gusfield's SPA /
//! SEA, rules 2 and 3, the single "suffixless" pending node, the skip trick
//! for down-walking a known suffix) re-expressed over the arena + sibling-list
//! node representation instead of a sorted child map, grounded on
//! `mov-rax-rbx-Suffix-Collections`'s `build_ukkonen`/`skip_walk`/`split` and
//! the phase/cursor shape in the `rygorous-ukkonen` reference.
//!
//! The input is built with an internal zero-byte sentinel appended (the
//! byte already reserved as end-of-string by the external interface), which
//! is what turns the implicit tree explicit: every one of the `n + 1`
//! suffixes, including the all-sentinel one, ends at its own leaf.
//!
//! Leaves record `path_position` one past the 0-based byte offset used to
//! build the tree, so the text positions the rest of the crate sees
//! (`U`, `D`, `Annotation.text_pos`, `Match.pos`) run `1..=n+1`, matching
//! the cost arrays sized `n + 2`. That leaves `0` permanently free to mean
//! "no candidate" without colliding with a real leaf at the first byte.

use crate::arena::{EdgeEnd, NodeArena, NodeId, ROOT};

pub struct BuiltTree {
    pub arena: NodeArena,
    /// Text including the trailing sentinel byte.
    pub text: Vec<u8>,
}

/// Builds the suffix tree over `text` with an appended `0x00` sentinel.
/// Caller is responsible for having already rejected zero bytes in `text`.
pub fn build(text: &[u8]) -> BuiltTree {
    let mut sentineled = Vec::with_capacity(text.len() + 1);
    sentineled.extend_from_slice(text);
    sentineled.push(0u8);

    let mut arena = NodeArena::new();
    arena.reserve(2 * sentineled.len());

    let mut b = Builder {
        arena: &mut arena,
        text: &sentineled,
        active_node: ROOT,
        active_edge: 0,
        active_length: 0,
        remaining: 0,
        suffixless: None,
    };
    for i in 0..sentineled.len() {
        b.extend(i);
    }

    finish_nodes(&mut arena, sentineled.len());

    BuiltTree {
        arena,
        text: sentineled,
    }
}

struct Builder<'a> {
    arena: &'a mut NodeArena,
    text: &'a [u8],
    active_node: NodeId,
    active_edge: usize,
    active_length: usize,
    remaining: usize,
    /// The single internal node created earlier in this phase that is
    /// still missing its suffix link. At most one exists at a time.
    suffixless: Option<NodeId>,
}

impl<'a> Builder<'a> {
    /// Single Phase Algorithm: advances the global end to `pos + 1` and runs
    /// Single Extension Algorithm steps until rule 3 fires or every pending
    /// suffix for this phase has been resolved.
    fn extend(&mut self, pos: usize) {
        self.arena.set_global_end(pos + 1);
        self.remaining += 1;
        self.suffixless = None;

        while self.remaining > 0 {
            if self.active_length == 0 {
                self.active_edge = pos;
            }
            let first_byte = self.text[self.active_edge];

            let next = match self.arena.find_son(self.active_node, self.text, first_byte) {
                None => {
                    // Rule 2, new_son: active point sits at a node boundary
                    // with no existing child for this byte.
                    //
                    // `path_position` is the leaf's text position in the
                    // *1-based* convention the cost/annotation arrays use
                    // (U, D, inverse_pointers, Annotation.text_pos): shifted
                    // by one from this phase/extension cursor so that `0`
                    // stays free as the UNDEFINED sentinel and never
                    // collides with a real first-character source.
                    let path_position = pos + 2 - self.remaining;
                    self.arena
                        .create_node(Some(self.active_node), pos, EdgeEnd::Leaf, path_position);
                    self.resolve_suffixless(self.active_node);
                    self.advance(pos);
                    continue;
                }
                Some(n) => n,
            };

            if self.walk_down(next) {
                continue;
            }

            let next_char_pos = self.arena.get(next).edge_start + self.active_length;
            if self.text[next_char_pos] == self.text[pos] {
                // Rule 3: the suffix is already present. End this phase;
                // the next phase resumes this same extension without
                // following a suffix link first.
                self.active_length += 1;
                if self.active_node != ROOT {
                    self.resolve_suffixless(self.active_node);
                }
                return;
            }

            // Rule 2, split: active point is mid-edge and the next
            // character differs, so the edge must fork here.
            let split_point = next_char_pos;
            let old_edge_start = self.arena.get(next).edge_start;
            let old_path_position = self.arena.get(next).path_position;

            let split = self.arena.create_node(
                Some(self.active_node),
                old_edge_start,
                EdgeEnd::Fixed(split_point),
                old_path_position,
            );
            self.arena.detach_child(self.active_node, next);
            self.arena.get_mut(next).edge_start = split_point;
            self.arena.reparent(next, split);

            let path_position = pos + 2 - self.remaining;
            self.arena
                .create_node(Some(split), pos, EdgeEnd::Leaf, path_position);

            self.resolve_suffixless(split);
            self.suffixless = Some(split);

            self.advance(pos);
        }
    }

    /// Skip trick: compares only edge lengths against the remaining string
    /// length to hop across a whole known edge without touching a single
    /// character, the way Ukkonen's down-walk is supposed to behave.
    fn walk_down(&mut self, next: NodeId) -> bool {
        let edge_len = self.arena.edge_len(next);
        if self.active_length >= edge_len {
            self.active_edge += edge_len;
            self.active_length -= edge_len;
            self.active_node = next;
            true
        } else {
            false
        }
    }

    fn resolve_suffixless(&mut self, target: NodeId) {
        if let Some(pending) = self.suffixless.take() {
            self.arena.get_mut(pending).suffix_link = Some(target);
        }
    }

    fn advance(&mut self, pos: usize) {
        self.remaining -= 1;
        if self.active_node == ROOT && self.active_length > 0 {
            self.active_length -= 1;
            self.active_edge = pos - self.remaining + 1;
        } else if self.active_node != ROOT {
            self.active_node = self
                .arena
                .get(self.active_node)
                .suffix_link
                .unwrap_or(ROOT);
        }
    }
}

/// Post-construction DFS: fills in `str_depth` for every node. Leaves'
/// `path_position` was already set during construction; this just needs to
/// walk root-to-leaf accumulating edge lengths.
fn finish_nodes(arena: &mut NodeArena, text_len: usize) {
    let mut stack = vec![ROOT];
    while let Some(id) = stack.pop() {
        let parent_depth = match arena.get(id).parent {
            Some(p) => arena.get(p).str_depth,
            None => 0,
        };
        let edge_len = if id == ROOT { 0 } else { arena.edge_len(id) };
        arena.get_mut(id).str_depth = parent_depth + edge_len;

        let mut child = arena.get(id).first_child;
        while let Some(c) = child {
            stack.push(c);
            child = arena.get(c).next_sibling;
        }
    }
    let _ = text_len;
}

/// Per-leaf bookkeeping filled in by a single post-construction DFS:
/// `inverse_pointers[p]` is the leaf at text position `p`, and
/// `max_str_depth[p]` is the running maximum, over all positions `<= p`,
/// of that position's leaf's closest-branching-ancestor depth (how deep a
/// shared prefix that leaf still has with some other suffix). Once the
/// running max at some earlier position falls below a phrase's frontier,
/// nothing even earlier can be affected either, which is what lets
/// `Annotator::propagate_from_leaf` stop early instead of walking back to
/// position 0 every phrase.
pub struct LeafInfo {
    pub inverse_pointers: Vec<Option<NodeId>>,
    pub max_str_depth: Vec<usize>,
}

pub fn collect_leaf_info(arena: &NodeArena, array_len: usize) -> LeafInfo {
    let mut inverse_pointers = vec![None; array_len];
    let mut reach = vec![0usize; array_len];

    let mut stack = vec![ROOT];
    while let Some(id) = stack.pop() {
        let node = arena.get(id);
        if node.is_leaf() && id != ROOT {
            let p = node.path_position;
            if p < array_len {
                inverse_pointers[p] = Some(id);
                let parent_depth = node.parent.map(|par| arena.get(par).str_depth).unwrap_or(0);
                reach[p] = parent_depth;
            }
        }
        let mut child = node.first_child;
        while let Some(c) = child {
            stack.push(c);
            child = arena.get(c).next_sibling;
        }
    }

    let mut max_str_depth = vec![0usize; array_len];
    let mut running = 0usize;
    for p in 0..array_len {
        running = running.max(reach[p]);
        max_str_depth[p] = running;
    }

    LeafInfo {
        inverse_pointers,
        max_str_depth,
    }
}
