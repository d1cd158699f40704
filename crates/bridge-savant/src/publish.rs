//! Publishing imported artifacts into the local repository.

use std::path::PathBuf;

use bridge_util::fs as util_fs;

use crate::amd::ArtifactMetaData;
use crate::artifact::Artifact;
use crate::cache::CacheProcess;
use crate::error::SavantError;

/// Everything needed to publish one imported artifact.
#[derive(Debug)]
pub struct Publication {
    pub artifact: Artifact,
    pub amd: ArtifactMetaData,
    pub file: PathBuf,
    /// Sources are best-effort; many Maven artifacts never published any.
    pub source_file: Option<PathBuf>,
}

/// Writes publications into the cache-backed repository.
#[derive(Debug)]
pub struct PublishWorkflow {
    cache: CacheProcess,
}

impl PublishWorkflow {
    pub fn new(cache: CacheProcess) -> Self {
        Self { cache }
    }

    /// Publish the AMD document, the main file, and the sources file when
    /// present. Re-publishing the same artifact overwrites in place.
    ///
    /// # Errors
    /// Returns an error if the AMD cannot be rendered or any file write
    /// fails.
    pub fn publish(&self, publication: &Publication) -> Result<PathBuf, SavantError> {
        let artifact = &publication.artifact;

        let amd_path = self.cache.path(artifact, &artifact.amd_file());
        let xml = publication.amd.to_xml()?;
        if let Some(parent) = amd_path.parent() {
            util_fs::ensure_dir(parent)?;
        }
        std::fs::write(&amd_path, xml).map_err(|source| SavantError::Io {
            path: amd_path.display().to_string(),
            source,
        })?;

        let main_path = self.cache.path(artifact, &artifact.artifact_file());
        util_fs::copy_into(&publication.file, &main_path)?;

        if let Some(source_file) = &publication.source_file {
            let sources_path = self.cache.path(artifact, &artifact.sources_file());
            util_fs::copy_into(source_file, &sources_path)?;
        }

        Ok(main_path)
    }
}
