//! The bridge between Maven artifacts and Savant artifacts: a recursive,
//! cycle-checked walk over the declared dependency graph that downloads,
//! converts, and republishes every reachable artifact.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use bridge_pom::{properties, Pom, PomDependency};
use bridge_savant::{
    Artifact, ArtifactId, ArtifactMetaData, CacheProcess, Dependencies, GroupMappings, License,
    Publication, PublishWorkflow, SavantDependency,
};
use bridge_util::{Fetch, MavenCoordinate};
use semver::Version;

use crate::config::BridgeConfig;
use crate::console::{ask, Console};
use crate::error::BridgeError;

const DIVIDER: &str = "---------------------------------------------------------------------------------------------------------";

/// Savant dependency scopes a user may place a dependency into.
const SAVANT_SCOPES: &[&str] = &[
    "provided",
    "compile",
    "compile-optional",
    "runtime",
    "runtime-optional",
    "test-compile",
    "test-runtime",
];

/// A node in the Maven dependency graph, annotated with its resolved
/// Savant identity once the walker has mapped it.
#[derive(Debug)]
pub struct MavenNode {
    pub coordinate: MavenCoordinate,
    /// Savant scope this node was placed into by its dependent. `None`
    /// for the root.
    pub scope: Option<String>,
    /// Tri-state optional flag as written in the POM.
    pub optional: Option<String>,
    pub dependencies: Vec<MavenNode>,
    pub artifact: Option<Artifact>,
}

impl MavenNode {
    fn new(coordinate: MavenCoordinate) -> Self {
        Self {
            coordinate,
            scope: None,
            optional: None,
            dependencies: Vec::new(),
            artifact: None,
        }
    }

    /// Project the direct children into Savant dependency groups, named
    /// by the child's scope. Groups come into existence on first use.
    pub fn savant_dependencies(&self) -> Dependencies {
        let mut dependencies = Dependencies::default();
        for child in &self.dependencies {
            let Some(artifact) = &child.artifact else {
                continue;
            };
            dependencies.add(
                child.scope.as_deref().unwrap_or("compile"),
                SavantDependency {
                    id: artifact.id.clone(),
                    version: artifact.version.clone(),
                    optional: child.optional.as_deref() == Some("true"),
                },
            );
        }
        dependencies
    }
}

/// The importer. Walks the graph depth-first, converting each Maven
/// artifact into a Savant artifact and publishing it into the local
/// repository on the way back out, so every dependency lands before its
/// dependents.
pub struct SavantBridge<'a, C: Console, F: Fetch> {
    fetcher: &'a F,
    console: &'a mut C,
    config: &'a BridgeConfig,
    cache: CacheProcess,
    publish_workflow: PublishWorkflow,
    group_mappings: &'a mut GroupMappings,
    /// Licenses chosen for a `"group:id"` pair, reused across versions.
    license_cache: HashMap<String, Vec<License>>,
    quarantine_dir: PathBuf,
}

impl<'a, C: Console, F: Fetch> SavantBridge<'a, C, F> {
    pub fn new(
        directory: &Path,
        fetcher: &'a F,
        console: &'a mut C,
        config: &'a BridgeConfig,
        group_mappings: &'a mut GroupMappings,
    ) -> Self {
        let cache = CacheProcess::new(directory);
        Self {
            fetcher,
            console,
            config,
            publish_workflow: PublishWorkflow::new(cache.clone()),
            cache,
            group_mappings,
            license_cache: HashMap::new(),
            quarantine_dir: directory.join("quarantine"),
        }
    }

    /// Ask for the root coordinate, build the graph, and import it.
    ///
    /// # Errors
    /// Returns an error on any fatal condition: cycles, failed required
    /// downloads, malformed POMs, or unresolvable versions in
    /// non-interactive mode.
    pub fn run(&mut self) -> Result<(), BridgeError> {
        let non_blank: &dyn Fn(&str) -> bool = &|answer| !answer.is_empty();
        let group = ask(
            self.console,
            "Maven group (i.e. commons-collections)",
            None,
            "Invalid input. Please re-enter",
            non_blank,
        )?;
        let id = ask(
            self.console,
            "Maven artifact id (i.e. commons-collections)",
            None,
            "Invalid input. Please re-enter",
            non_blank,
        )?;
        let version = ask(
            self.console,
            "Maven artifact version (i.e. 3.0.GA.1)",
            None,
            "Invalid input. Please re-enter",
            non_blank,
        )?;

        let mut root = MavenNode::new(MavenCoordinate::new(&group, &id, &version));
        self.build_graph(&mut root, &mut Vec::new(), &mut HashMap::new())?;
        self.download_and_process(&root)?;
        Ok(())
    }

    /// Recursively populate the dependency graph under `node`.
    ///
    /// `stack` holds the coordinates on the live recursion path and is
    /// popped on unwind; `visited` memoizes every mapped coordinate for
    /// the whole import and is never popped, so a second path to the same
    /// coordinate reuses its Savant artifact without re-prompting.
    fn build_graph(
        &mut self,
        node: &mut MavenNode,
        stack: &mut Vec<MavenCoordinate>,
        visited: &mut HashMap<MavenCoordinate, Artifact>,
    ) -> Result<(), BridgeError> {
        if stack.contains(&node.coordinate) {
            return Err(BridgeError::Cycle {
                coordinate: node.coordinate.to_string(),
            });
        }

        if let Some(artifact) = visited.get(&node.coordinate) {
            node.artifact = Some(artifact.clone());
            return Ok(());
        }

        // Map the node and fetch its POM. An absent POM offers a
        // corrected version and redoes the mapping and cache check.
        let pom_path = loop {
            let artifact = self.make_savant_artifact(&node.coordinate)?;

            if self
                .cache
                .fetch(&artifact, &artifact.artifact_file())
                .is_some()
            {
                println!(
                    "Skipping artifact [{artifact}]. It has already been imported into the repository"
                );
                node.artifact = Some(artifact);
                return Ok(());
            }
            node.artifact = Some(artifact);

            match self
                .fetcher
                .fetch(&node.coordinate, &node.coordinate.pom_file())?
            {
                Some(path) => break path,
                None => {
                    let file = node.coordinate.pom_file();
                    if !self.config.prompt {
                        return Err(BridgeError::MissingArtifact {
                            coordinate: node.coordinate.to_string(),
                            file,
                        });
                    }
                    println!("Unable to download the POM for [{}]", node.coordinate);
                    let again =
                        ask(self.console, "Do you want to try again", Some("y"), "", &|_| true)?;
                    if again != "y" {
                        return Err(BridgeError::MissingArtifact {
                            coordinate: node.coordinate.to_string(),
                            file,
                        });
                    }
                    let version = ask(
                        self.console,
                        "Enter the correct version to use",
                        None,
                        "Invalid input. Please re-enter",
                        &|answer| !answer.is_empty(),
                    )?;
                    node.coordinate.version = version;
                }
            }
        };

        if self.config.debug {
            if let Ok(body) = std::fs::read_to_string(&pom_path) {
                println!("{body}");
            }
        }

        let mut pom = Pom::parse(&pom_path, &self.quarantine_dir)?;
        let mut dependencies = pom.dependencies.clone();
        dependencies.extend(self.link_parents(&mut pom)?);

        let props = properties::effective_properties(&pom);
        for dependency in &mut dependencies {
            properties::apply_to_dependency(dependency, &props);
            properties::enrich_dependency(&pom, dependency, &props);
        }

        // Scope and optional filters run before any version handling, so
        // an unresolvable version on a filtered dependency never prompts.
        dependencies.retain(|dependency| {
            if !self.config.include_test_dependencies
                && dependency.scope.as_deref() == Some("test")
            {
                return false;
            }
            if !self.config.include_optional_dependencies
                && dependency.optional.as_deref() == Some("true")
            {
                return false;
            }
            true
        });

        for dependency in &mut dependencies {
            if dependency.version.is_some() {
                continue;
            }
            let name = format!("{}:{}", dependency.group, dependency.id);
            if !self.config.prompt {
                return Err(BridgeError::UnresolvedVersion { dependency: name });
            }
            println!("Unable to determine the version for dependency [{name}]");
            let version = ask(
                self.console,
                "Enter the version to use",
                None,
                "Invalid input. Please re-enter",
                &|answer| !answer.is_empty(),
            )?;
            dependency.version = Some(version);
        }

        let mut seen = HashSet::new();
        dependencies.retain(|dependency| seen.insert(dependency.coordinate()));

        let mut children = Vec::new();
        for dependency in dependencies {
            if dependency.has_exclusions && self.config.prompt {
                print_exclusions_warning(&dependency);
            }

            let suggested = savant_scope(
                dependency.scope.as_deref().unwrap_or("compile"),
                dependency.optional.as_deref(),
            );
            let coordinate = dependency.coordinate();

            let scope = if self.config.prompt {
                let include = ask(
                    self.console,
                    &format!("Include dependency [{coordinate}] in scope [{suggested}]"),
                    Some("y"),
                    "",
                    &|_| true,
                )?;
                if include != "y" {
                    println!("Skipping dependency [{coordinate}]");
                    continue;
                }
                ask(
                    self.console,
                    &format!("Enter the Savant scope to use for dependency [{coordinate}]"),
                    Some(&suggested),
                    "Invalid scope. Please re-enter",
                    &|answer| SAVANT_SCOPES.contains(&answer),
                )?
            } else {
                suggested
            };

            let mut child = MavenNode::new(coordinate);
            child.scope = Some(scope);
            child.optional = dependency.optional.clone();
            children.push(child);
        }
        node.dependencies = children;

        stack.push(node.coordinate.clone());
        if let Some(artifact) = &node.artifact {
            visited.insert(node.coordinate.clone(), artifact.clone());
        }
        for child in &mut node.dependencies {
            self.build_graph(child, stack, visited)?;
        }
        stack.pop();

        Ok(())
    }

    /// Fetch and link the whole parent chain of `pom`, returning the
    /// dependencies every ancestor contributes to the child.
    fn link_parents(&mut self, pom: &mut Pom) -> Result<Vec<PomDependency>, BridgeError> {
        let Some(parent_coordinate) = pom.parent_coordinate.clone() else {
            return Ok(Vec::new());
        };
        let path = self.fetch_required(&parent_coordinate, &parent_coordinate.pom_file())?;
        let mut parent = Pom::parse(&path, &self.quarantine_dir)?;
        let mut inherited = parent.dependencies.clone();
        inherited.extend(self.link_parents(&mut parent)?);
        pom.parent = Some(Box::new(parent));
        Ok(inherited)
    }

    fn fetch_required(
        &self,
        coordinate: &MavenCoordinate,
        file_name: &str,
    ) -> Result<PathBuf, BridgeError> {
        self.fetcher
            .fetch(coordinate, file_name)?
            .ok_or_else(|| BridgeError::MissingArtifact {
                coordinate: coordinate.to_string(),
                file: file_name.to_owned(),
            })
    }

    /// Compute the Savant identity of a Maven coordinate: remap the
    /// group, validate the version, and choose licenses.
    fn make_savant_artifact(
        &mut self,
        coordinate: &MavenCoordinate,
    ) -> Result<Artifact, BridgeError> {
        println!();
        println!("{DIVIDER}");
        println!("Converting Maven artifact [{coordinate}] to a Savant Artifact");
        println!("{DIVIDER}");

        let group = self.map_group(coordinate)?;
        let version = self.map_version(&coordinate.version)?;

        let name = match &coordinate.classifier {
            Some(classifier) => format!("{}-{classifier}", coordinate.id),
            None => coordinate.id.clone(),
        };
        let id = ArtifactId {
            group,
            project: coordinate.id.clone(),
            name,
            kind: coordinate.kind_or_jar().to_owned(),
        };

        // Already-imported artifacts skip license selection entirely and
        // keep an empty license list.
        let prospective = Artifact {
            id,
            version,
            licenses: Vec::new(),
        };
        if self
            .cache
            .fetch(&prospective, &prospective.artifact_file())
            .is_some()
        {
            return Ok(prospective);
        }

        let licenses = self.map_licenses(coordinate)?;
        Ok(Artifact {
            licenses,
            ..prospective
        })
    }

    fn map_group(&mut self, coordinate: &MavenCoordinate) -> Result<String, BridgeError> {
        if let Some(mapped) = self.group_mappings.get(&coordinate.group) {
            if mapped != coordinate.group {
                println!(
                    "Mapping Maven group [{}] to Savant group [{mapped}]",
                    coordinate.group
                );
                return Ok(mapped.to_owned());
            }
        }

        if coordinate.group.contains('.') || !self.config.prompt {
            return Ok(coordinate.group.clone());
        }

        let savant_group = ask(
            self.console,
            "That group looks weaksauce. Enter the group to use with Savant",
            Some(&coordinate.group),
            "Invalid input. Please re-enter",
            &|answer| !answer.is_empty(),
        )?;
        if savant_group != coordinate.group {
            self.group_mappings.add(&coordinate.group, &savant_group);
        }
        Ok(savant_group)
    }

    fn map_version(&mut self, raw: &str) -> Result<Version, BridgeError> {
        if let Ok(version) = Version::parse(raw) {
            if !self.config.prompt {
                return Ok(version);
            }
            println!("The version [{raw}] appears to be semantic. Do you want to keep it [y]?");
            let answer = self.read_answer()?;
            if answer.is_empty() || answer == "y" {
                return Ok(version);
            }
        } else {
            if !self.config.prompt {
                return Err(BridgeError::NotSemantic {
                    version: raw.to_owned(),
                });
            }
            println!(
                "The version [{raw}] is not semantic. You need to give the project a valid semantic version."
            );
        }

        loop {
            println!("Enter the new version to use");
            let answer = self.read_answer()?;
            match Version::parse(&answer) {
                Ok(version) => return Ok(version),
                Err(_) => println!("Invalid semantic version. Please re-enter."),
            }
        }
    }

    fn map_licenses(&mut self, coordinate: &MavenCoordinate) -> Result<Vec<License>, BridgeError> {
        let key = format!("{}:{}", coordinate.group, coordinate.id);
        if let Some(cached) = self.license_cache.get(&key) {
            return Ok(cached.clone());
        }

        let licenses = if self.config.prompt {
            loop {
                let answer = ask(
                    self.console,
                    "License(s) for this artifact (comma-separated SPDX identifiers)",
                    Some("Apache-2.0"),
                    "",
                    &|_| true,
                )?;
                match parse_license_list(&answer) {
                    Ok(licenses) => break licenses,
                    Err(e) => println!("{e}. Please re-enter."),
                }
            }
        } else {
            parse_license_list("Apache-2.0")?
        };

        self.license_cache.insert(key, licenses.clone());
        Ok(licenses)
    }

    fn read_answer(&mut self) -> Result<String, BridgeError> {
        let answer = self
            .console
            .read_line()
            .map_err(|source| BridgeError::Console { source })?;
        Ok(answer.trim().to_owned())
    }

    /// Publish the graph bottom-up: every dependency lands in the
    /// repository before the artifact depending on it.
    fn download_and_process(&mut self, node: &MavenNode) -> Result<(), BridgeError> {
        for child in &node.dependencies {
            self.download_and_process(child)?;
        }

        let Some(artifact) = &node.artifact else {
            return Err(BridgeError::Unmapped {
                coordinate: node.coordinate.to_string(),
            });
        };

        if self
            .cache
            .fetch(artifact, &artifact.artifact_file())
            .is_some()
        {
            return Ok(());
        }

        let file = self
            .fetcher
            .fetch(&node.coordinate, &node.coordinate.main_file())?
            .ok_or_else(|| BridgeError::MissingArtifact {
                coordinate: node.coordinate.to_string(),
                file: node.coordinate.main_file(),
            })?;

        // Sources are best-effort. Plenty of artifacts never shipped any.
        let source_file = self
            .fetcher
            .fetch(&node.coordinate, &node.coordinate.sources_file())?;

        let amd = ArtifactMetaData {
            licenses: artifact.licenses.clone(),
            dependencies: node.savant_dependencies(),
        };
        if self.config.debug {
            println!("{}", amd.to_xml().map_err(BridgeError::Savant)?);
        }

        println!("Publishing [{artifact}]");
        self.publish_workflow.publish(&Publication {
            artifact: artifact.clone(),
            amd,
            file,
            source_file,
        })?;

        Ok(())
    }
}

/// Map a Maven scope to the Savant group a dependency belongs in. Maven's
/// `test` becomes `test-compile`; the optional flag folds into the group
/// name for the scopes that have an optional variant.
fn savant_scope(maven_scope: &str, optional: Option<&str>) -> String {
    let base = match maven_scope {
        "test" => "test-compile",
        other => other,
    };
    if optional == Some("true") && matches!(base, "compile" | "runtime") {
        format!("{base}-optional")
    } else {
        base.to_owned()
    }
}

fn parse_license_list(answer: &str) -> Result<Vec<License>, bridge_savant::SavantError> {
    answer.split(',').map(License::parse).collect()
}

fn print_exclusions_warning(dependency: &PomDependency) {
    println!("!!!!!!!!!!!!!!!!!!!!!!!!!!!!! WARNING !!!!!!!!!!!!!!!!!!!!!!!!!!!!!");
    println!(
        "This Maven artifact has a dependency [{}:{}] with exclusions.",
        dependency.group, dependency.id
    );
    println!(
        "This indicates that the artifact declared a bad dependency or declared an optional dependency as required."
    );
    println!(
        "There isn't much we can do here since Savant doesn't allow exclusions; they are ignored."
    );
    println!();
}
