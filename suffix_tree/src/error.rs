use thiserror::Error;

/// Invariant-class failures: things that can only happen if the
/// annotated suffix tree has a bug, never from ordinary input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("position {position} reached cost {cost}, above the ceiling {ceiling}")]
    CostCeilingExceeded {
        position: usize,
        cost: usize,
        ceiling: usize,
    },

    #[error("searcher chose source position 0, which is never a valid copy source")]
    ZeroSourcePosition,

    #[error("input of length {0} contains a zero byte, which is reserved as the end-of-string sentinel")]
    ZeroByteInInput(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
