use rsz_core::SchemaError;
use rsz_format::FormatError;

/// Anything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Rsz(#[from] rsz_lib::Error),

    #[error("schema: {0}")]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("no class named or hashed {0:?}")]
    UnknownClass(String),

    #[error("{0}")]
    Usage(&'static str),
}

pub type Result<T> = std::result::Result<T, CliError>;
