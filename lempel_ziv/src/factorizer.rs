//! The greedy phrase loop (§4.6): repeatedly ask the annotated suffix tree
//! for the longest admissible match at the current frontier, emit a
//! phrase, fold the copy's cost into `U`/`D`, and propagate the affected
//! leaf's ancestors before moving on.
//!
//! Two position conventions meet here and the line between them matters:
//! `suffix_tree::SuffixTree::search`/`text` index the raw 0-based text
//! buffer, while `U`, `D` and the annotations are keyed by the tree's
//! internal 1-based leaf positions (`cost_pos = buffer_pos + 1`, kept that
//! way so position `0` is free to mean "no candidate"). This module is the
//! only place both are in scope at once.

use suffix_tree::SuffixTree;

use crate::error::Result;
use crate::phrase::Phrase;

/// Runs the factorization loop over the whole of `tree`'s text and returns
/// the phrase sequence. `tree` is mutated throughout: every phrase updates
/// `U` (and `D` where a position saturates) and refreshes annotations.
pub fn factorize(tree: &mut SuffixTree) -> Result<Vec<Phrase>> {
    let n = tree.len();
    let ceiling = tree.ceiling();
    let mut phrases = Vec::new();
    // Last buffer position (1-based cost convention) known to be exhausted,
    // so `D` back-fill only ever walks the gap since the previous one.
    let mut last_exhausted: Option<usize> = None;
    let mut text_pos = 0usize;

    while text_pos < n {
        let m = tree.search(text_pos)?;

        // A phrase always leaves room for its trailing literal: clamp a
        // match that would otherwise run to the end of the text (see the
        // `abcabcabc` scenario, whose fourth phrase reuses only part of
        // what the tree could in principle match).
        let max_len = n - text_pos - 1;
        let length = m.length.min(max_len);

        let source = if length == 0 { None } else { Some(m.pos - 1) };
        let next_literal = tree.text()[text_pos + length];
        phrases.push(Phrase {
            source,
            length,
            next_literal,
        });

        let cost_pos = text_pos + 1;
        if length > 0 {
            let distance = cost_pos - m.pos;
            for i in 0..length {
                let k = i % distance;
                let new_cost = tree.u(m.pos + k) + 1;
                tree.set_cost(cost_pos + i, new_cost)?;

                if new_cost == ceiling {
                    let p = cost_pos + i;
                    tree.set_d(p, 0);
                    let start = last_exhausted.map(|e| e + 1).unwrap_or(0);
                    let mut q = p;
                    while q > start {
                        q -= 1;
                        let next_d = tree.d(q + 1);
                        tree.set_d(q, next_d + 1);
                    }
                    last_exhausted = Some(p);
                }
            }
        }

        tree.set_cost(cost_pos + length, 0)?;
        tree.propagate_from_leaf(cost_pos, length);

        text_pos += length + 1;
    }

    Ok(phrases)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factorize_str(s: &str, cost: usize) -> Vec<Phrase> {
        let mut tree = SuffixTree::new(s.as_bytes(), cost).unwrap();
        factorize(&mut tree).unwrap()
    }

    #[test]
    fn single_byte_input_is_one_literal_phrase() {
        let phrases = factorize_str("x", 5);
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].source, None);
        assert_eq!(phrases[0].length, 0);
        assert_eq!(phrases[0].next_literal, b'x');
    }

    #[test]
    fn aaaa_cost_two_never_exceeds_the_ceiling() {
        let text = b"aaaa";
        let mut tree = SuffixTree::new(text, 2).unwrap();
        let phrases = factorize(&mut tree).unwrap();

        assert_eq!(phrases[0].source, None);
        assert_eq!(phrases[0].next_literal, b'a');

        for p in 0..text.len() {
            assert!(tree.u(p + 1) <= 2, "U[{}] exceeded the ceiling", p + 1);
        }

        reassemble_and_check(text, &phrases);
    }

    #[test]
    fn abcabcabc_reuses_the_first_prefix() {
        let text = b"abcabcabc";
        let phrases = factorize_str(std::str::from_utf8(text).unwrap(), 10);
        assert_eq!(phrases[0], Phrase { source: None, length: 0, next_literal: b'a' });
        assert_eq!(phrases[1], Phrase { source: None, length: 0, next_literal: b'b' });
        assert_eq!(phrases[2], Phrase { source: None, length: 0, next_literal: b'c' });
        assert!(phrases[3].source == Some(0) && phrases[3].length >= 4);

        reassemble_and_check(text, &phrases);
    }

    #[test]
    fn banana_cost_three_stays_within_budget() {
        let text = b"banana";
        let mut tree = SuffixTree::new(text, 3).unwrap();
        let phrases = factorize(&mut tree).unwrap();

        assert!(phrases.len() >= 4 && phrases.len() <= 6);
        for p in 0..text.len() {
            assert!(tree.u(p + 1) <= 3);
        }

        reassemble_and_check(text, &phrases);
    }

    #[test]
    fn long_run_of_a_with_cost_one_terminates_within_the_bound() {
        let text = vec![b'a'; 1000];
        let mut tree = SuffixTree::new(&text, 1).unwrap();
        let phrases = factorize(&mut tree).unwrap();

        assert!(phrases.len() <= 2 + (text.len() + 1) / 2);
        for p in 0..text.len() {
            assert!(tree.u(p + 1) <= 1);
        }

        reassemble_and_check(&text, &phrases);
    }

    /// Factorization faithfulness (§8): replaying every phrase against the
    /// already-reconstructed prefix must reproduce the original text.
    fn reassemble_and_check(text: &[u8], phrases: &[Phrase]) {
        let mut out = Vec::with_capacity(text.len());
        for phrase in phrases {
            match phrase.source {
                Some(src) => {
                    for k in 0..phrase.length {
                        out.push(out[src + k]);
                    }
                }
                None => assert_eq!(phrase.length, 0),
            }
            out.push(phrase.next_literal);
        }
        assert_eq!(out, text);
    }
}
