//! Property-based checks for the universal invariants in §8 that don't
//! depend on the factorization loop: tree correctness (every substring is
//! found, the `ST_SelfTest`-style check), leaf count, and suffix-link
//! reachability. Mirrors `lempel_ziv/tests/properties.rs`'s quickcheck
//! style, grounded on the reference workspace's `encode_decode` property
//! test in `relative_lempel_ziv`.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::Rng;
use suffix_tree::SuffixTree;

#[derive(Debug, Clone)]
struct NonZeroBytes(Vec<u8>);

impl Arbitrary for NonZeroBytes {
    fn arbitrary<G: Gen>(g: &mut G) -> Self {
        let len = g.gen_range(1, 20);
        let bytes = (0..len)
            .map(|_| {
                // Keep the alphabet small so substrings repeat and the
                // tree actually exercises edge splits, not just a path.
                let b: u8 = g.gen_range(1, 4);
                b + b'a'
            })
            .collect();
        NonZeroBytes(bytes)
    }
}

#[quickcheck]
fn every_substring_is_found(text: NonZeroBytes) -> bool {
    let st = SuffixTree::new(&text.0, 3).unwrap();
    let t = &text.0;
    for i in 0..t.len() {
        for j in i + 1..=t.len() {
            if st.find_substring_classical(&t[i..j]).is_none() {
                return false;
            }
        }
    }
    true
}

#[quickcheck]
fn leaf_count_is_n_plus_one(text: NonZeroBytes) -> bool {
    let st = SuffixTree::new(&text.0, 3).unwrap();
    st.leaf_count() == text.0.len() + 1
}

#[quickcheck]
fn suffix_links_always_reach_root(text: NonZeroBytes) -> bool {
    let st = SuffixTree::new(&text.0, 3).unwrap();
    (1..st.node_count()).all(|id| st.suffix_link_reaches_root(id))
}

#[test]
fn absent_substring_is_not_found() {
    let st = SuffixTree::new(b"banana", 3).unwrap();
    assert_eq!(st.find_substring_classical(b"xyz"), None);
}
