//! Error types for bridge-engine.

/// Errors produced while importing a Maven dependency graph.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A download or checksum operation failed.
    #[error("{0}")]
    Util(#[from] bridge_util::UtilError),

    /// A POM could not be read or interpreted.
    #[error("{0}")]
    Pom(#[from] bridge_pom::PomError),

    /// A Savant repository operation failed.
    #[error("{0}")]
    Savant(#[from] bridge_savant::SavantError),

    /// The dependency graph loops back on itself.
    #[error("the Maven artifact you are trying to convert contains a cycle in its dependencies at [{coordinate}] — cycles are impossible in the real world, so it seems as though someone has jimmied the POM")]
    Cycle { coordinate: String },

    /// A required file is not in the remote repository.
    #[error("unable to download [{file}] for Maven artifact [{coordinate}]")]
    MissingArtifact { coordinate: String, file: String },

    /// A dependency's version could not be resolved, even from
    /// `dependencyManagement`.
    #[error("unable to determine the version for dependency [{dependency}]")]
    UnresolvedVersion { dependency: String },

    /// A version is not semantic and prompting is disabled.
    #[error("the version [{version}] is not semantic and prompting is disabled")]
    NotSemantic { version: String },

    /// A node reached the publish phase without a Savant identity.
    #[error("no Savant artifact was computed for [{coordinate}]")]
    Unmapped { coordinate: String },

    /// Reading an interactive answer failed.
    #[error("cannot read from the console: {source}")]
    Console { source: std::io::Error },
}
