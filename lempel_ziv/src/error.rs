//! Error surface for the factorization binary/library, per §7's taxonomy.
//! `suffix_tree::Error` already covers the Invariant class; this adds the
//! InputInvalid/IOFailure variants the CLI boundary needs and wraps the
//! former so callers can match on either.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("COST must be a positive integer, got `{0}`")]
    InvalidCost(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tree(#[from] suffix_tree::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
