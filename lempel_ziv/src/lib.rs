//! Bounded-cost LZ-like factorization on top of `suffix_tree`'s annotated
//! Ukkonen tree. `factorize` is the only entry point most callers need;
//! `main.rs` wraps it with file I/O and the CLI surface.

pub mod error;
pub mod factorizer;
pub mod phrase;

pub use error::{Error, Result};
pub use factorizer::factorize;
pub use phrase::Phrase;

use suffix_tree::SuffixTree;

/// Builds the annotated suffix tree over `input` and factorizes it under
/// `cost_ceiling`. Convenience wrapper around `SuffixTree::new` +
/// `factorize` for callers that don't need the intermediate tree.
pub fn factorize_bytes(input: &[u8], cost_ceiling: usize) -> Result<Vec<Phrase>> {
    let mut tree = SuffixTree::new(input, cost_ceiling)?;
    factorize(&mut tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_phrases() {
        let phrases = factorize_bytes(b"", 4).unwrap();
        assert!(phrases.is_empty());
    }

    #[test]
    fn rejects_zero_byte_input() {
        let err = factorize_bytes(b"ab\0cd", 4).unwrap_err();
        assert!(matches!(err, Error::Tree(suffix_tree::Error::ZeroByteInInput(2))));
    }
}
