// Error taxonomy shared by the framed codec and the streaming sessions.
//
//   Validation  -- bad constructor/reset arguments, rejected before any mutation
//   SizeLimit   -- input larger than a configured or codec-imposed ceiling
//   Corruption  -- malformed headers, invalid blocks, desynchronised windows

use thiserror::Error;

use crate::varbyte::VarbyteError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    Validation(#[from] ValidationError),

    #[error("{what} of {len} bytes exceeds limit of {limit} bytes")]
    SizeLimit {
        what: &'static str,
        len: usize,
        limit: usize,
    },

    #[error("corrupt data: {0}")]
    Corruption(#[from] CorruptionError),
}

impl Error {
    pub(crate) fn size_limit(what: &'static str, len: usize, limit: usize) -> Self {
        Self::SizeLimit { what, len, limit }
    }

    /// Whether this error reports corrupted input.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corruption(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{name} {value} is outside 0..={max}", max = i32::MAX)]
    BlockSizeOutOfRange { name: &'static str, value: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptionError {
    #[error("malformed length header: {0}")]
    Header(#[from] VarbyteError),

    #[error("declared size {0} is out of range")]
    SizeOutOfRange(u64),

    #[error("{0}")]
    Codec(String),

    #[error("expanded to {actual} bytes, header declared {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl From<VarbyteError> for Error {
    fn from(e: VarbyteError) -> Self {
        Self::Corruption(CorruptionError::Header(e))
    }
}

/// Check a caller-supplied block size against `0..=i32::MAX`.
pub(crate) fn check_block_size(name: &'static str, value: i64) -> Result<u32> {
    if (0..=i64::from(i32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(ValidationError::BlockSizeOutOfRange { name, value }.into())
    }
}
