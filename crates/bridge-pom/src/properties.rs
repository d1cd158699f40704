//! Property substitution and parent-chain merging.

use std::collections::HashMap;

use crate::pom::{Pom, PomDependency};

/// How many whole-map substitution passes to run before giving up on a
/// value. Nested properties resolve within a couple of passes; the bound
/// keeps pathological self-referencing inputs from looping.
const MAX_PASSES: usize = 10;

/// Replace `${key}` references in `value` with entries from `props`.
///
/// Iterates to a fixed point, bounded by [`MAX_PASSES`]. References with
/// no matching property are left in place.
pub fn substitute(value: &str, props: &HashMap<String, String>) -> String {
    let mut current = value.to_owned();
    for _ in 0..MAX_PASSES {
        if !current.contains("${") {
            break;
        }
        let mut next = current.clone();
        for (key, replacement) in props {
            let token = format!("${{{key}}}");
            if next.contains(&token) {
                next = next.replace(&token, replacement);
            }
        }
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn substitute_field(field: &mut Option<String>, props: &HashMap<String, String>) {
    if let Some(value) = field.take() {
        *field = Some(substitute(&value, props));
    }
}

/// Merge a parent POM's properties into an effective map.
///
/// Each parent entry `(k, v)` contributes `k`, `parent.k`, and
/// `project.parent.k`, none of which overwrite an existing key.
pub fn merge_parent(effective: &mut HashMap<String, String>, parent: &HashMap<String, String>) {
    for (key, value) in parent {
        effective.entry(key.clone()).or_insert_with(|| value.clone());
        effective
            .entry(format!("parent.{key}"))
            .or_insert_with(|| value.clone());
        effective
            .entry(format!("project.parent.{key}"))
            .or_insert_with(|| value.clone());
    }
}

/// Build the effective property map for a POM whose parent chain has been
/// linked: the POM's own properties, then each ancestor's merged under
/// absent-only semantics.
pub fn effective_properties(pom: &Pom) -> HashMap<String, String> {
    let mut effective = pom.properties.clone();
    let mut current = pom.parent.as_deref();
    while let Some(parent) = current {
        merge_parent(&mut effective, &parent.properties);
        current = parent.parent.as_deref();
    }
    effective
}

/// Substitute property references across every field of a dependency.
pub fn apply_to_dependency(dependency: &mut PomDependency, props: &HashMap<String, String>) {
    dependency.group = substitute(&dependency.group, props);
    dependency.id = substitute(&dependency.id, props);
    substitute_field(&mut dependency.version, props);
    substitute_field(&mut dependency.kind, props);
    substitute_field(&mut dependency.scope, props);
    substitute_field(&mut dependency.classifier, props);
    substitute_field(&mut dependency.optional, props);
}

/// Fill unresolved dependency fields from `dependencyManagement`, walking
/// the POM's parent chain.
///
/// After this, `scope` is always set (defaulting to `"compile"`) and
/// `optional` keeps its tri-state; `version` can remain `None`, in which
/// case the caller decides whether to prompt or fail.
pub fn enrich_dependency(
    pom: &Pom,
    dependency: &mut PomDependency,
    props: &HashMap<String, String>,
) {
    if dependency.version.is_none() {
        dependency.version = pom
            .resolve_dependency_version(dependency)
            .map(|version| substitute(&version, props));
    }

    if dependency.scope.is_none() {
        dependency.scope = Some(match pom.resolve_dependency_scope(dependency) {
            Some(scope) => substitute(&scope, props),
            None => "compile".to_owned(),
        });
    }

    if dependency.optional.is_none() {
        dependency.optional = pom
            .resolve_dependency_optional(dependency)
            .map(|optional| substitute(&optional, props));
    }
}
