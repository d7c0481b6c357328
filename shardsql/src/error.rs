//! Rewrite engine errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parameter index {0} out of range")]
    ParameterIndex(usize),

    #[error("token spans bytes {start}..={stop} but the statement is {len} bytes")]
    TokenOutOfBounds {
        start: usize,
        stop: usize,
        len: usize,
    },

    #[error("overlapping rewrite tokens at byte {0}")]
    TokenOverlap(usize),

    #[error("invalid data node: \"{0}\"")]
    DataNode(String),
}
