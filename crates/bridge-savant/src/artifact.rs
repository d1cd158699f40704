//! Savant artifact identities and dependency groups.

use std::collections::BTreeMap;
use std::fmt;

use semver::Version;

use crate::license::License;

/// The four-part identity of a Savant artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactId {
    pub group: String,
    pub project: String,
    /// Project name plus classifier suffix, when the source declared one.
    pub name: String,
    /// Packaging type, `"jar"` when the source declared none.
    pub kind: String,
}

/// A Savant artifact: identity, semantic version, and licenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: ArtifactId,
    pub version: Version,
    pub licenses: Vec<License>,
}

impl Artifact {
    /// File name of the artifact in the repository:
    /// `"{name}-{version}.{kind}"`.
    pub fn artifact_file(&self) -> String {
        format!("{}-{}.{}", self.id.name, self.version, self.id.kind)
    }

    /// File name of the artifact-meta-data document.
    pub fn amd_file(&self) -> String {
        format!("{}.amd", self.artifact_file())
    }

    /// File name of the sources artifact.
    pub fn sources_file(&self) -> String {
        format!("{}-{}-sources.{}", self.id.name, self.version, self.id.kind)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.id.group, self.id.project, self.id.name, self.version, self.id.kind
        )
    }
}

/// One dependency entry inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavantDependency {
    pub id: ArtifactId,
    pub version: Version,
    pub optional: bool,
}

/// A named dependency group (compile, runtime, test-compile, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGroup {
    pub dependencies: Vec<SavantDependency>,
}

/// All dependency groups of an artifact, keyed by group name. Groups are
/// created lazily on first use; BTreeMap keeps the rendered order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    pub groups: BTreeMap<String, DependencyGroup>,
}

impl Dependencies {
    /// Add a dependency to the named group, creating the group if needed.
    pub fn add(&mut self, group_name: &str, dependency: SavantDependency) {
        self.groups
            .entry(group_name.to_owned())
            .or_default()
            .dependencies
            .push(dependency);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
