//! Error types for bridge-savant.

/// Errors produced by the Savant repository side of the bridge.
#[derive(Debug, thiserror::Error)]
pub enum SavantError {
    /// A filesystem operation failed.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A utility operation failed.
    #[error("{0}")]
    Util(#[from] bridge_util::UtilError),

    /// A license identifier is not a recognized SPDX short name.
    #[error("unknown license identifier \"{identifier}\"")]
    UnknownLicense { identifier: String },

    /// AMD XML generation failed.
    #[error("cannot generate artifact meta data: {message}")]
    Xml { message: String },

    /// A group mappings line could not be interpreted.
    #[error("invalid group mapping at {path}:{line}: {message}")]
    InvalidMapping {
        path: String,
        line: usize,
        message: String,
    },
}
