//! Maven coordinate handling and repository path generation.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Maven Central repository URL.
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";

/// A Maven coordinate identifying a single artifact.
///
/// `kind` holds the POM's `<type>` element. It stays `None` when the POM
/// omitted it and is rendered as `"jar"` only when a file name is built,
/// so parent-resolution checks still see the unset value.
#[derive(Debug, Clone, Eq)]
pub struct MavenCoordinate {
    /// Maven group identifier, e.g. `"org.apache.commons"`.
    pub group: String,
    /// Maven artifact identifier, e.g. `"commons-collections"`.
    pub id: String,
    /// Artifact version, e.g. `"3.2.1"`.
    pub version: String,
    /// Packaging type from the POM, if declared.
    pub kind: Option<String>,
    /// Classifier from the POM, if declared.
    pub classifier: Option<String>,
}

impl MavenCoordinate {
    /// Create a coordinate with no declared type or classifier.
    pub fn new(group: &str, id: &str, version: &str) -> Self {
        Self {
            group: group.to_owned(),
            id: id.to_owned(),
            version: version.to_owned(),
            kind: None,
            classifier: None,
        }
    }

    /// The rendered packaging type: the declared value or `"jar"`.
    pub fn kind_or_jar(&self) -> &str {
        self.kind.as_deref().unwrap_or("jar")
    }

    /// File name of this artifact's POM: `"{id}-{version}.pom"`.
    pub fn pom_file(&self) -> String {
        format!("{}-{}.pom", self.id, self.version)
    }

    /// File name of the main artifact: `"{id}-{version}.{type}"`.
    pub fn main_file(&self) -> String {
        format!("{}-{}.{}", self.id, self.version, self.kind_or_jar())
    }

    /// File name of the sources artifact: `"{id}-{version}-sources.{type}"`.
    pub fn sources_file(&self) -> String {
        format!("{}-{}-sources.{}", self.id, self.version, self.kind_or_jar())
    }

    /// The repository-relative path for one of this coordinate's files.
    ///
    /// Dots in the group are replaced with `/`, then:
    /// `"{group_path}/{id}/{version}/{file_name}"`.
    pub fn repository_path(&self, file_name: &str) -> String {
        let group_path = self.group.replace('.', "/");
        format!("{}/{}/{}/{}", group_path, self.id, self.version, file_name)
    }
}

/// Equality and hashing cover `(group, id, kind, version)`. The classifier
/// is deliberately excluded: two coordinates differing only in classifier
/// collapse to one node during traversal.
impl PartialEq for MavenCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.id == other.id
            && self.kind == other.kind
            && self.version == other.version
    }
}

impl Hash for MavenCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.group.hash(state);
        self.id.hash(state);
        self.kind.hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group,
            self.id,
            self.version,
            self.kind_or_jar()
        )
    }
}
