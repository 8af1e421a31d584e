use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrError {
    #[error("no digits to parse")]
    Empty,
    #[error("invalid decimal digit {ch:?} at byte {index}")]
    InvalidDigit { ch: char, index: usize },
    #[error("invalid hex digit {ch:?} at byte {index}")]
    InvalidHexDigit { ch: char, index: usize },
    #[error("value overflows the target integer type")]
    Overflow,
    #[error("token of {len} bytes does not fit capacity {capacity}")]
    TokenTooLong { len: usize, capacity: usize },
}
