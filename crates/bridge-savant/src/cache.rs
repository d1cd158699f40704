//! The cache-backed local Savant repository.

use std::path::{Path, PathBuf};

use crate::artifact::Artifact;

/// Existence checks and path layout for the on-disk repository.
///
/// Layout: `<root>/<group>/<project>/<version>/<file>`, with the group
/// kept dotted (Savant convention, unlike Maven's slash encoding).
#[derive(Debug, Clone)]
pub struct CacheProcess {
    root: PathBuf,
}

impl CacheProcess {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// The path a file of this artifact lives at, whether or not it
    /// exists yet.
    pub fn path(&self, artifact: &Artifact, file_name: &str) -> PathBuf {
        self.root
            .join(&artifact.id.group)
            .join(&artifact.id.project)
            .join(artifact.version.to_string())
            .join(file_name)
    }

    /// Fetch a file of this artifact from the cache. `None` when the
    /// repository does not hold it.
    pub fn fetch(&self, artifact: &Artifact, file_name: &str) -> Option<PathBuf> {
        let path = self.path(artifact, file_name);
        path.is_file().then_some(path)
    }
}
