//! Error types for bridge-pom.

/// Errors produced while reading and interpreting POM files.
#[derive(Debug, thiserror::Error)]
pub enum PomError {
    /// A filesystem operation failed.
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The document is not well-formed XML, even after sanitization.
    /// A diagnostic copy has been written to the quarantine path.
    #[error("malformed POM at {path} (quarantined to {quarantine}): {message}")]
    Malformed {
        path: String,
        quarantine: String,
        message: String,
    },

    /// A `<parent>` block is missing one of its required children.
    #[error("POM at {path} has a parent block without {field}")]
    IncompleteParent { path: String, field: String },

    /// A dependency entry is missing groupId or artifactId.
    #[error("POM at {path} declares a dependency without {field}")]
    IncompleteDependency { path: String, field: String },
}
