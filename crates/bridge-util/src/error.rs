//! Error types for bridge-util.

/// Errors produced by utility functions.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// An I/O operation failed.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A download failed for a reason other than the file being absent.
    #[error("download of {url} failed: {message}")]
    Download { url: String, message: String },

    /// The remote returned a status the bridge does not accept.
    #[error("unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// An MD5 sidecar file did not contain a usable checksum.
    #[error("invalid MD5 checksum file for {url}: {message}")]
    InvalidChecksumFile { url: String, message: String },

    /// Downloaded bytes did not hash to the published checksum.
    #[error("MD5 mismatch for {url} — expected {expected}, got {actual}")]
    Md5Mismatch {
        url: String,
        expected: String,
        actual: String,
    },
}
