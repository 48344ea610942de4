//! CLI command implementations for navigation management.
//!
//! These commands load and validate a registry without starting the server.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::menu::{NavigationRegistry, VisibleEntry, resolve_visible_entries};
use crate::models::{Role, is_valid_role};

/// Load the registry from `file`, or the built-in one.
pub fn load_registry(file: Option<&Path>) -> Result<NavigationRegistry> {
    match file {
        Some(path) => NavigationRegistry::from_file(path),
        None => NavigationRegistry::builtin().context("built-in navigation is invalid"),
    }
}

/// Validate a registry and print its size and version.
pub fn cmd_nav_check(file: Option<&Path>) -> Result<()> {
    let registry = load_registry(file)?;
    println!(
        "ok: {} entries, version {}",
        registry.len(),
        registry.version()
    );
    Ok(())
}

/// Print the navigation tree visible to `role`.
pub fn cmd_nav_show(file: Option<&Path>, role: &str) -> Result<()> {
    if !is_valid_role(role) {
        bail!(
            "unknown role '{role}'. Known roles: {}",
            Role::ALL.map(Role::as_str).join(", ")
        );
    }

    let registry = load_registry(file)?;
    let visible = resolve_visible_entries(Some(role), &registry);

    if visible.is_empty() {
        println!("No entries visible to {role}.");
        return Ok(());
    }

    print!("{}", render_tree(&visible));
    Ok(())
}

/// List the role catalog.
pub fn cmd_roles() -> Result<()> {
    for role in Role::ALL {
        println!("{role}");
    }
    Ok(())
}

/// Render visible entries as an indented tree, one entry per line.
pub fn render_tree(entries: &[VisibleEntry<'_>]) -> String {
    let mut out = String::new();
    render_level(entries, 0, &mut out);
    out
}

fn render_level(entries: &[VisibleEntry<'_>], depth: usize, out: &mut String) {
    for entry in entries {
        out.push_str(&format!(
            "{:indent$}{:<24} {}\n",
            "",
            entry.path(),
            entry.label(),
            indent = depth * 2
        ));
        render_level(&entry.children, depth + 1, out);
    }
}
