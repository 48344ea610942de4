//! Fleetdash test utilities.
//!
//! Builders and canned fixtures for navigation registries. Fixtures are
//! produced as JSON so they go through the same parsing and validation path
//! as a navigation file on disk.

use serde_json::{Value as JsonValue, json};

/// Create a test entry allowing `roles`.
pub fn nav_entry(path: &str, roles: &[&str]) -> TestEntry {
    TestEntry {
        path: path.to_string(),
        label: default_label(path),
        icon: String::new(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        children: Vec::new(),
    }
}

/// A navigation entry builder for creating test fixtures.
#[derive(Debug, Clone)]
pub struct TestEntry {
    pub path: String,
    pub label: String,
    pub icon: String,
    pub roles: Vec<String>,
    pub children: Vec<TestEntry>,
}

impl TestEntry {
    /// Set a custom label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Set the icon token.
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    /// Append a child entry.
    pub fn with_child(mut self, child: TestEntry) -> Self {
        self.children.push(child);
        self
    }

    /// Convert to the JSON shape of a navigation definition.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "path": self.path,
            "label": self.label,
            "icon": self.icon,
            "roles": self.roles,
            "children": self.children.iter().map(TestEntry::to_json).collect::<Vec<_>>(),
        })
    }
}

/// Serialize entries as a navigation JSON document.
pub fn registry_json(entries: &[TestEntry]) -> String {
    JsonValue::Array(entries.iter().map(TestEntry::to_json).collect()).to_string()
}

/// Two flat entries: fleets for owner/admin, reimbursements for finance.
pub fn flat_registry() -> Vec<TestEntry> {
    vec![
        nav_entry("/fleets", &["owner", "admin"]).with_label("Fleets"),
        nav_entry("/reimburse", &["finance"]).with_label("Reimburse"),
    ]
}

/// An owner-only parent with a finance-only child.
pub fn nested_registry() -> Vec<TestEntry> {
    vec![
        nav_entry("/orders", &["owner"])
            .with_label("Orders")
            .with_child(nav_entry("/orders/reports", &["finance"]).with_label("Reports")),
    ]
}

fn default_label(path: &str) -> String {
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("home")
        .to_string()
}
