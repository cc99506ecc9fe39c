//! Low-level format errors.

/// Error raised while decoding or encoding container bytes.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("bad magic at {offset:#x}: expected {expected:#010x}, found {found:#010x}")]
    BadMagic { offset: u64, expected: u32, found: u32 },

    #[error("unexpected end of data at {offset:#x}: need {need} bytes, have {have}")]
    UnexpectedEof { offset: u64, need: usize, have: u64 },

    #[error("invalid UTF-16 string at {offset:#x}")]
    InvalidUtf16 { offset: u64 },

    #[error("unterminated string at {offset:#x}")]
    UnterminatedString { offset: u64 },

    #[error("negative {what} count: {count}")]
    NegativeCount { what: &'static str, count: i64 },

    #[error("negative {what} offset: {offset}")]
    NegativeOffset { what: &'static str, offset: i64 },

    #[error("embedded block at {offset:#x} does not follow its parent's data at {data_offset:#x}")]
    MisplacedBlock { offset: u64, data_offset: u64 },

    #[error("embedded blocks nested deeper than {limit}")]
    NestingTooDeep { limit: usize },

    #[error("instance index {index} out of range (instance count {count})")]
    BadInstanceIndex { index: i64, count: usize },

    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Convert a signed on-disk count into a usize, rejecting negatives.
pub fn count(what: &'static str, value: impl Into<i64>) -> Result<usize> {
    let value = value.into();
    usize::try_from(value).map_err(|_| FormatError::NegativeCount { what, count: value })
}

/// Convert a signed on-disk offset into a position, rejecting negatives.
pub fn offset(what: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| FormatError::NegativeOffset { what, offset: value })
}
