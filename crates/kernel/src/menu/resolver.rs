//! Access resolver: filters the registry down to what one role may see.
//!
//! Resolution is a pure function of the role and the registry. Nothing is
//! cached here; callers re-resolve whenever the session role may have changed.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use tracing::debug;

use super::entry::NavEntry;
use super::registry::NavigationRegistry;
use crate::models::Role;

/// A registry entry visible to a role, with its children already filtered.
///
/// Borrows from the registry; see [`NavItem`] for an owned copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleEntry<'a> {
    pub entry: &'a NavEntry,
    pub children: Vec<VisibleEntry<'a>>,
}

impl<'a> VisibleEntry<'a> {
    pub fn path(&self) -> &'a str {
        &self.entry.path
    }

    pub fn label(&self) -> &'a str {
        &self.entry.label
    }

    pub fn icon(&self) -> &'a str {
        &self.entry.icon
    }

    /// Copy into an owned item that outlives the registry borrow.
    pub fn to_nav_item(&self) -> NavItem {
        NavItem {
            path: self.path().to_string(),
            label: self.label().to_string(),
            icon: self.icon().to_string(),
            children: self.children.iter().map(VisibleEntry::to_nav_item).collect(),
        }
    }
}

impl Serialize for VisibleEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VisibleEntry", 4)?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("icon", self.icon())?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}

/// Owned navigation item, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: String,
    pub label: String,
    pub icon: String,
    pub children: Vec<NavItem>,
}

/// Entries visible to `role`, in registry order.
///
/// `None` (no session) and names outside the role catalog both resolve to
/// an empty list.
pub fn resolve_visible_entries<'a>(
    role: Option<&str>,
    registry: &'a NavigationRegistry,
) -> Vec<VisibleEntry<'a>> {
    match parse_role(role) {
        Some(role) => visible_for(role, registry),
        None => Vec::new(),
    }
}

fn parse_role(role: Option<&str>) -> Option<Role> {
    let name = role?;
    match name.parse::<Role>() {
        Ok(role) => Some(role),
        Err(e) => {
            debug!(error = %e, "no navigation for unrecognized role");
            None
        }
    }
}

/// Entries visible to a catalog role, in registry order.
pub fn visible_for(role: Role, registry: &NavigationRegistry) -> Vec<VisibleEntry<'_>> {
    filter_entries(registry.entries(), role)
}

fn filter_entries(entries: &[NavEntry], role: Role) -> Vec<VisibleEntry<'_>> {
    entries
        .iter()
        .filter(|entry| entry.allows(role))
        .map(|entry| VisibleEntry {
            entry,
            children: filter_entries(&entry.children, role),
        })
        .collect()
}

/// Whether `path` is reachable for `role`.
///
/// See [`reachable_trail`].
pub fn is_path_reachable(role: Option<&str>, path: &str, registry: &NavigationRegistry) -> bool {
    reachable_trail(role, path, registry).is_some()
}

/// The entry `role` reaches `path` through, preceded by its ancestors.
///
/// Searches the role's filtered tree depth-first in registry order, so any
/// link the menu shows is reachable and a child under a hidden parent is not.
/// When some registry entry names `path` literally, only literal entries
/// count; a `:param` sibling never opens it.
pub fn reachable_trail<'a>(
    role: Option<&str>,
    path: &str,
    registry: &'a NavigationRegistry,
) -> Option<Vec<&'a NavEntry>> {
    let role = parse_role(role)?;
    let visible = visible_for(role, registry);
    let literal = registry.match_path(path).is_some_and(|entry| entry.path == path);

    let mut trail = Vec::new();
    let found = find_visible_trail(
        &visible,
        &|entry: &NavEntry| {
            if literal {
                entry.path == path
            } else {
                entry.match_path(path).is_some()
            }
        },
        &mut trail,
    );
    found.then_some(trail)
}

fn find_visible_trail<'a>(
    entries: &[VisibleEntry<'a>],
    hit: &impl Fn(&NavEntry) -> bool,
    trail: &mut Vec<&'a NavEntry>,
) -> bool {
    for visible in entries {
        trail.push(visible.entry);
        if hit(visible.entry) || find_visible_trail(&visible.children, hit, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn registry(yaml: &str) -> NavigationRegistry {
        NavigationRegistry::from_yaml_str(yaml).unwrap()
    }

    fn paths<'a>(entries: &[VisibleEntry<'a>]) -> Vec<&'a str> {
        entries.iter().map(VisibleEntry::path).collect()
    }

    const FLAT: &str = r#"
- {path: /fleets, label: Fleets, roles: [owner, admin]}
- {path: /reimburse, label: Reimburse, roles: [finance]}
"#;

    #[test]
    fn admin_sees_fleets_only() {
        let registry = registry(FLAT);
        let visible = resolve_visible_entries(Some("admin"), &registry);
        assert_eq!(paths(&visible), vec!["/fleets"]);
    }

    #[test]
    fn driver_sees_nothing() {
        let registry = registry(FLAT);
        assert!(resolve_visible_entries(Some("driver"), &registry).is_empty());
    }

    #[test]
    fn no_role_sees_nothing() {
        let registry = registry(FLAT);
        assert!(resolve_visible_entries(None, &registry).is_empty());
    }

    #[test]
    fn unknown_role_sees_nothing() {
        let registry = registry(FLAT);
        assert!(resolve_visible_entries(Some("not_a_real_role"), &registry).is_empty());
        assert!(resolve_visible_entries(Some(""), &registry).is_empty());
    }

    #[test]
    fn parent_kept_when_all_children_hidden() {
        let registry = registry(
            r#"
- path: /orders
  label: Orders
  roles: [owner]
  children:
    - {path: /orders/reports, label: Reports, roles: [finance]}
"#,
        );
        let visible = resolve_visible_entries(Some("owner"), &registry);
        assert_eq!(paths(&visible), vec!["/orders"]);
        assert!(visible[0].children.is_empty());
    }

    #[test]
    fn child_hidden_when_parent_hidden() {
        let registry = registry(
            r#"
- path: /orders
  label: Orders
  roles: [owner]
  children:
    - {path: /orders/reports, label: Reports, roles: [finance]}
"#,
        );
        assert!(resolve_visible_entries(Some("finance"), &registry).is_empty());
        assert!(!is_path_reachable(Some("finance"), "/orders/reports", &registry));
    }

    #[test]
    fn no_implicit_seniority() {
        let registry = registry("- {path: /fleets, label: Fleets, roles: [owner]}");
        assert!(visible_for(Role::SuperAdmin, &registry).is_empty());
        assert_eq!(visible_for(Role::Owner, &registry).len(), 1);
    }

    #[test]
    fn reachability_follows_patterns() {
        let registry = NavigationRegistry::builtin().unwrap();
        assert!(is_path_reachable(Some("operation"), "/fleets/17", &registry));
        assert!(!is_path_reachable(Some("driver"), "/fleets/17", &registry));
        assert!(!is_path_reachable(None, "/fleets", &registry));
    }

    #[test]
    fn pattern_does_not_shadow_literal_sibling() {
        let registry = NavigationRegistry::builtin().unwrap();
        assert!(is_path_reachable(Some("admin"), "/fleets/create", &registry));
        assert!(!is_path_reachable(Some("operation"), "/fleets/create", &registry));
    }

    #[test]
    fn duplicate_path_reachable_through_visible_copy() {
        let registry = registry(
            r#"
- path: /orders
  label: Orders
  roles: [owner]
  children:
    - {path: /orders/reports, label: Reports, roles: [owner, finance]}
- {path: /orders/reports, label: Finance Reports, roles: [finance]}
"#,
        );
        let visible = resolve_visible_entries(Some("finance"), &registry);
        assert_eq!(paths(&visible), vec!["/orders/reports"]);
        assert!(is_path_reachable(Some("finance"), "/orders/reports", &registry));

        let trail = reachable_trail(Some("finance"), "/orders/reports", &registry).unwrap();
        let labels: Vec<&str> = trail.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Finance Reports"]);

        let trail = reachable_trail(Some("owner"), "/orders/reports", &registry).unwrap();
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn literal_sibling_closed_when_pattern_declared_first() {
        let registry = registry(
            r#"
- path: /fleets
  label: Fleets
  roles: [owner, operation]
  children:
    - {path: /fleets/:id, label: Fleet Detail, roles: [owner, operation]}
    - {path: /fleets/create, label: Add Fleet, roles: [owner]}
"#,
        );
        assert!(!is_path_reachable(Some("operation"), "/fleets/create", &registry));
        assert!(is_path_reachable(Some("operation"), "/fleets/9", &registry));
        assert!(is_path_reachable(Some("owner"), "/fleets/create", &registry));
    }

    #[test]
    fn unmatched_path_is_unreachable() {
        let registry = NavigationRegistry::builtin().unwrap();
        assert!(!is_path_reachable(Some("super_admin"), "/nowhere", &registry));
    }

    #[test]
    fn serializes_filtered_tree() {
        let registry = registry(
            r#"
- path: /orders
  label: Orders
  icon: receipt
  roles: [owner]
  children:
    - {path: /orders/reports, label: Reports, roles: [finance]}
"#,
        );
        let visible = resolve_visible_entries(Some("owner"), &registry);
        let json = serde_json::to_value(&visible).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"path": "/orders", "label": "Orders", "icon": "receipt", "children": []}
            ])
        );
        assert_eq!(serde_json::to_value(visible[0].to_nav_item()).unwrap(), json[0]);
    }
}
