//! Parsing of Maven project-object-model files.

use std::collections::HashMap;
use std::path::Path;

use roxmltree::{Document, Node};

use bridge_util::maven::MavenCoordinate;

use crate::error::PomError;

/// One `<dependency>` entry, from either `dependencies` or
/// `dependencyManagement`. Fields other than group and id stay unresolved
/// until property substitution and enrichment run.
#[derive(Debug, Clone)]
pub struct PomDependency {
    pub group: String,
    pub id: String,
    pub version: Option<String>,
    pub kind: Option<String>,
    pub scope: Option<String>,
    /// Tri-state: absent, `"true"`, or `"false"` as written in the POM.
    pub optional: Option<String>,
    pub classifier: Option<String>,
    /// The entry declared `<exclusions>`. Exclusions are never honored;
    /// the walker warns about them.
    pub has_exclusions: bool,
}

impl PomDependency {
    /// The coordinate this dependency resolves to. Requires `version` to
    /// have been filled in.
    pub fn coordinate(&self) -> MavenCoordinate {
        MavenCoordinate {
            group: self.group.clone(),
            id: self.id.clone(),
            version: self.version.clone().unwrap_or_default(),
            kind: self.kind.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

/// The information the bridge needs from one POM file.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub name: Option<String>,
    pub packaging: Option<String>,
    /// Coordinate of the `<parent>` POM, when declared.
    pub parent_coordinate: Option<MavenCoordinate>,
    /// Direct properties plus the `project.*` seeds and their deprecated
    /// aliases.
    pub properties: HashMap<String, String>,
    pub dependencies: Vec<PomDependency>,
    pub dependency_management: Vec<PomDependency>,
    /// Linked lazily by the walker as parent POMs are fetched.
    pub parent: Option<Box<Pom>>,
}

impl Pom {
    /// Parse a POM file.
    ///
    /// The file is read as UTF-8 and the literal entity `&oslash;` is
    /// replaced with `O` before parsing; when a replacement occurs the
    /// file is rewritten first. Documents that still fail to parse are
    /// copied into `quarantine_dir` for inspection.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not well-formed
    /// after sanitization, or declares incomplete parent/dependency
    /// blocks.
    pub fn parse(path: &Path, quarantine_dir: &Path) -> Result<Self, PomError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PomError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let text = sanitize(&raw);
        if text != raw {
            std::fs::write(path, &text).map_err(|source| PomError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }

        let document = match Document::parse(&text) {
            Ok(document) => document,
            Err(e) => return Err(quarantine(path, quarantine_dir, &e.to_string())),
        };

        let project = document.root_element();
        let ns = project.tag_name().namespace();

        let mut pom = Self {
            group_id: child_text(project, ns, "groupId"),
            artifact_id: child_text(project, ns, "artifactId"),
            version: child_text(project, ns, "version"),
            name: child_text(project, ns, "name"),
            packaging: child_text(project, ns, "packaging"),
            ..Self::default()
        };

        pom.seed_properties();

        if let Some(parent) = child(project, ns, "parent") {
            pom.parent_coordinate = Some(parse_parent(path, parent, ns)?);
        }

        // Direct children of <properties>, keyed by local name.
        if let Some(properties) = child(project, ns, "properties") {
            for property in properties.children().filter(Node::is_element) {
                if let Some(value) = property.text() {
                    pom.properties
                        .insert(property.tag_name().name().to_owned(), value.trim().to_owned());
                }
            }
        }

        if let Some(dependencies) = child(project, ns, "dependencies") {
            pom.dependencies = parse_dependencies(path, dependencies)?;
        }

        // The <dependencies> inside <dependencyManagement> is looked up in
        // the namespace of <dependencyManagement> itself, which may differ
        // from the root namespace.
        if let Some(management) = child(project, ns, "dependencyManagement") {
            let management_ns = management.tag_name().namespace();
            if let Some(dependencies) = child(management, management_ns, "dependencies") {
                pom.dependency_management = parse_dependencies(path, dependencies)?;
            }
        }

        Ok(pom)
    }

    /// Seed `project.*` properties and their deprecated aliases from the
    /// root coordinate elements, before explicit properties are read (so
    /// explicit declarations win).
    fn seed_properties(&mut self) {
        if let Some(version) = &self.version {
            for key in ["project.version", "pom.version", "version"] {
                self.properties.insert(key.to_owned(), version.clone());
            }
        }
        if let Some(group_id) = &self.group_id {
            for key in ["project.groupId", "pom.groupId", "groupId"] {
                self.properties.insert(key.to_owned(), group_id.clone());
            }
        }
        if let Some(artifact_id) = &self.artifact_id {
            for key in ["project.artifactId", "pom.artifactId", "artifactId"] {
                self.properties.insert(key.to_owned(), artifact_id.clone());
            }
        }
        if let Some(name) = &self.name {
            self.properties.insert("project.name".to_owned(), name.clone());
        }
        if let Some(packaging) = &self.packaging {
            self.properties
                .insert("project.packaging".to_owned(), packaging.clone());
        }
    }

    /// Look up a managed version for `dependency`, walking the parent
    /// chain. The first `(group, id)` match wins, whatever its version.
    pub fn resolve_dependency_version(&self, dependency: &PomDependency) -> Option<String> {
        match self.find_managed(dependency) {
            Some(managed) => managed.version.clone(),
            None => self
                .parent
                .as_ref()
                .and_then(|parent| parent.resolve_dependency_version(dependency)),
        }
    }

    /// Look up a managed scope for `dependency`, walking the parent chain.
    pub fn resolve_dependency_scope(&self, dependency: &PomDependency) -> Option<String> {
        match self.find_managed(dependency) {
            Some(managed) => managed.scope.clone(),
            None => self
                .parent
                .as_ref()
                .and_then(|parent| parent.resolve_dependency_scope(dependency)),
        }
    }

    /// Look up a managed optional flag for `dependency`, walking the
    /// parent chain.
    pub fn resolve_dependency_optional(&self, dependency: &PomDependency) -> Option<String> {
        match self.find_managed(dependency) {
            Some(managed) => managed.optional.clone(),
            None => self
                .parent
                .as_ref()
                .and_then(|parent| parent.resolve_dependency_optional(dependency)),
        }
    }

    fn find_managed(&self, dependency: &PomDependency) -> Option<&PomDependency> {
        self.dependency_management
            .iter()
            .find(|managed| managed.group == dependency.group && managed.id == dependency.id)
    }
}

/// Replace the literal sequence `&oslash;` with `O`. Seen in the wild in
/// author names; the entity is not defined in XML and kills the parser.
fn sanitize(raw: &str) -> String {
    raw.replace("&oslash;", "O")
}

/// Copy a bad POM into the quarantine directory and build the error.
fn quarantine(path: &Path, quarantine_dir: &Path, message: &str) -> PomError {
    let file_name = path.file_name().unwrap_or_default();
    let target = quarantine_dir.join(file_name);
    let copied = std::fs::create_dir_all(quarantine_dir)
        .and_then(|()| std::fs::copy(path, &target).map(|_| ()));
    let quarantine = match copied {
        Ok(()) => target.display().to_string(),
        Err(_) => format!("{} (copy failed)", target.display()),
    };
    PomError::Malformed {
        path: path.display().to_string(),
        quarantine,
        message: message.to_owned(),
    }
}

fn parse_parent(
    path: &Path,
    parent: Node<'_, '_>,
    ns: Option<&str>,
) -> Result<MavenCoordinate, PomError> {
    let require = |field: &str| {
        child_text(parent, ns, field).ok_or_else(|| PomError::IncompleteParent {
            path: path.display().to_string(),
            field: field.to_owned(),
        })
    };
    let group = require("groupId")?;
    let id = require("artifactId")?;
    let version = require("version")?;
    Ok(MavenCoordinate::new(&group, &id, &version))
}

fn parse_dependencies(
    path: &Path,
    dependencies: Node<'_, '_>,
) -> Result<Vec<PomDependency>, PomError> {
    let ns = dependencies.tag_name().namespace();
    dependencies
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "dependency")
        .map(|node| parse_dependency(path, node, ns))
        .collect()
}

fn parse_dependency(
    path: &Path,
    node: Node<'_, '_>,
    ns: Option<&str>,
) -> Result<PomDependency, PomError> {
    let require = |field: &str| {
        child_text(node, ns, field).ok_or_else(|| PomError::IncompleteDependency {
            path: path.display().to_string(),
            field: field.to_owned(),
        })
    };
    let group = require("groupId")?;
    let id = require("artifactId")?;

    Ok(PomDependency {
        group,
        id,
        version: child_text(node, ns, "version"),
        kind: child_text(node, ns, "type"),
        scope: child_text(node, ns, "scope"),
        optional: child_text(node, ns, "optional"),
        classifier: child_text(node, ns, "classifier"),
        has_exclusions: child(node, ns, "exclusions").is_some(),
    })
}

/// Find a direct child element by namespace and local name.
fn child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: Option<&str>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|c| {
        c.is_element() && c.tag_name().name() == name && c.tag_name().namespace() == ns
    })
}

/// Trimmed, non-empty text of a direct child element.
fn child_text(node: Node<'_, '_>, ns: Option<&str>, name: &str) -> Option<String> {
    child(node, ns, name)
        .and_then(|c| c.text())
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
