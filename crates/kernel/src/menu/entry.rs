//! Navigation entries: the unvalidated definition shape and the validated entry.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::models::Role;

/// A navigation entry as written in configuration.
///
/// Roles are kept as raw strings so validation can name the offending
/// entry instead of surfacing a bare deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavEntryDefinition {
    /// Route pattern (e.g., "/fleets", "/fleets/:id")
    pub path: String,
    /// Human-readable label
    pub label: String,
    /// Icon token, opaque to the kernel
    #[serde(default)]
    pub icon: String,
    /// Roles allowed to see this entry
    #[serde(default)]
    pub roles: Vec<String>,
    /// Nested entries, in display order
    #[serde(default)]
    pub children: Vec<NavEntryDefinition>,
}

/// A validated navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub path: String,
    pub label: String,
    pub icon: String,
    pub allowed_roles: BTreeSet<Role>,
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    /// Validate a definition and all of its children.
    pub fn from_definition(def: NavEntryDefinition) -> Result<Self, NavigationError> {
        let path = def.path.trim().to_string();
        if path.is_empty() {
            return Err(NavigationError::EmptyPath { label: def.label });
        }

        if def.roles.is_empty() {
            return Err(NavigationError::NoAllowedRoles { path });
        }

        let mut allowed_roles = BTreeSet::new();
        for name in &def.roles {
            let Ok(role) = name.parse::<Role>() else {
                return Err(NavigationError::UnknownRole {
                    path,
                    role: name.clone(),
                });
            };
            allowed_roles.insert(role);
        }

        let children = def
            .children
            .into_iter()
            .map(NavEntry::from_definition)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path,
            label: def.label,
            icon: def.icon,
            allowed_roles,
            children,
        })
    }

    /// Whether `role` is listed on this entry.
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }

    /// Match a concrete request path against this entry's pattern.
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        match_pattern(&self.path, path)
    }
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/fleets/:id/edit"
/// Path: "/fleets/42/edit"
/// Result: Some({"id": "42"})
pub fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(param_name) = pat.strip_prefix(':') {
            if actual.is_empty() {
                return None;
            }
            params.insert(param_name.to_string(), actual.to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}
