//! The output of the factorization loop: one `(source_position, length,
//! next_literal)` triple per phrase, in the representation the external
//! interface (§6) specifies.

use std::fmt;

/// One factorized phrase.
///
/// `source` is `None` for a phrase that is a bare literal (no admissible
/// copy was found): printed as `-1`, matching the reference tool's output
/// for the very first phrase of any input. Otherwise it is the 0-based
/// text position the copy started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phrase {
    pub source: Option<usize>,
    pub length: usize,
    pub next_literal: u8,
}

impl fmt::Display for Phrase {
    /// `(source_position_0based, length, next_literal_byte_code)`, one line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            Some(p) => p as i64,
            None => -1,
        };
        write!(f, "({}, {}, {})", source, self.length, self.next_literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_only_phrase_prints_minus_one_source() {
        let p = Phrase {
            source: None,
            length: 0,
            next_literal: b'a',
        };
        assert_eq!(p.to_string(), "(-1, 0, 97)");
    }

    #[test]
    fn copy_phrase_prints_0based_source() {
        let p = Phrase {
            source: Some(0),
            length: 5,
            next_literal: b'c',
        };
        assert_eq!(p.to_string(), "(0, 5, 99)");
    }
}
