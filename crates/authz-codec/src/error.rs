use thiserror::Error;

/// Decoding errors. Encoding is infallible by construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("message truncated while reading {0}")]
    Truncated(&'static str),

    #[error("array length {length} for {field} exceeds remaining input")]
    LengthOverflow {
        field: &'static str,
        length: u64,
    },

    #[error("{0} trailing bytes after message")]
    TrailingBytes(usize),
}
