//! Navigation registry - the validated, immutable set of dashboard entries.
//!
//! The registry is built once at startup, either from the compiled-in
//! `navigation.yml` or from a file named by configuration. Construction
//! validates every entry and fails on the first configuration error.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::entry::{NavEntry, NavEntryDefinition};
use crate::error::NavigationError;

/// Navigation compiled into the binary.
const BUILTIN_NAVIGATION: &str = include_str!("../../navigation.yml");

/// Registry of all navigation entries, in declared order.
#[derive(Debug, Clone)]
pub struct NavigationRegistry {
    /// Top-level entries; children hang off each entry
    entries: Vec<NavEntry>,
    /// Content hash of `entries`
    version: String,
    /// Entry count including nested entries
    len: usize,
}

impl NavigationRegistry {
    /// Validate definitions and build a registry.
    pub fn from_definitions(defs: Vec<NavEntryDefinition>) -> Result<Self, NavigationError> {
        let entries = defs
            .into_iter()
            .map(NavEntry::from_definition)
            .collect::<Result<Vec<_>, _>>()?;

        let version = content_version(&entries)?;

        let len = {
            let mut seen = HashSet::new();
            let mut len = 0;
            walk(&entries, &mut |entry| {
                len += 1;
                if !seen.insert(entry.path.as_str()) {
                    warn!(path = %entry.path, "duplicate navigation path");
                }
            });
            len
        };

        debug!(entries = len, %version, "built navigation registry");

        Ok(Self {
            entries,
            version,
            len,
        })
    }

    /// Parse and validate a YAML sequence of entry definitions.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, NavigationError> {
        let defs: Vec<NavEntryDefinition> = serde_yml::from_str(yaml)?;
        Self::from_definitions(defs)
    }

    /// Parse and validate a JSON array of entry definitions.
    pub fn from_json_str(json: &str) -> Result<Self, NavigationError> {
        let defs: Vec<NavEntryDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(defs)
    }

    /// Load a registry from disk. `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read navigation file {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let registry = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };

        registry.with_context(|| format!("invalid navigation file {}", path.display()))
    }

    /// The navigation compiled into the binary.
    pub fn builtin() -> Result<Self, NavigationError> {
        Self::from_yaml_str(BUILTIN_NAVIGATION)
    }

    /// All top-level entries, in declared order.
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Content hash; equal content gives an equal version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of entries, nested entries included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry routing `path`: the first literal match depth-first in declared
    /// order, else the first pattern match.
    pub fn match_path(&self, path: &str) -> Option<&NavEntry> {
        self.trail(path).and_then(|trail| trail.last().copied())
    }

    /// The matched entry for `path` preceded by its ancestors.
    ///
    /// A literal entry wins over a `:param` pattern wherever each is declared.
    pub fn trail(&self, path: &str) -> Option<Vec<&NavEntry>> {
        let mut trail = Vec::new();
        if find_trail(&self.entries, &|entry: &NavEntry| entry.path == path, &mut trail) {
            return Some(trail);
        }
        find_trail(&self.entries, &|entry: &NavEntry| entry.match_path(path).is_some(), &mut trail)
            .then_some(trail)
    }
}

fn content_version(entries: &[NavEntry]) -> Result<String, NavigationError> {
    let canonical = serde_json::to_vec(entries)?;
    let digest = Sha256::digest(&canonical);
    let mut version = hex::encode(digest);
    version.truncate(16);
    Ok(version)
}

fn walk<'a>(entries: &'a [NavEntry], visit: &mut impl FnMut(&'a NavEntry)) {
    for entry in entries {
        visit(entry);
        walk(&entry.children, visit);
    }
}

fn find_trail<'a>(
    entries: &'a [NavEntry],
    hit: &impl Fn(&NavEntry) -> bool,
    trail: &mut Vec<&'a NavEntry>,
) -> bool {
    for entry in entries {
        trail.push(entry);
        if hit(entry) || find_trail(&entry.children, hit, trail) {
            return true;
        }
        trail.pop();
    }
    false
}
