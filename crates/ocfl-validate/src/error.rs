//! Error types for the validation crate.
//!
//! Problems found in an inventory are never errors here: they are recorded
//! as diagnostics in a [`ValidationLogger`](crate::ValidationLogger). These
//! variants cover faults in how the caller set up a validation run.

/// Errors that can occur while configuring validation.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// The diagnostic code catalog could not be parsed.
    #[error("invalid diagnostic catalog: {0}")]
    Catalog(String),

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for validation setup results.
pub type Result<T> = std::result::Result<T, ValidateError>;
