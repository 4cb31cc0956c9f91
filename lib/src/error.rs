use thiserror::Error;

/// Errors from parsing and encoding around the target checks.
///
/// The checks themselves are total and never fail.
#[derive(Debug, Error)]
pub enum PowError {

    #[error("hash must be 32 bytes, got {0}")]
    InvalidHashLength(usize),

    #[error("invalid hash hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("unknown rule epoch `{0}` (expected `legacy` or `current`)")]
    UnknownRule(String),

    #[error("failed to serialize data: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, PowError>;
