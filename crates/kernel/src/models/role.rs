//! Role catalog.
//!
//! The set of roles is closed: adding one means adding a variant here, and
//! every `match` over [`Role`] must then account for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Permission level of an authenticated dashboard user.
///
/// Roles carry no ordering or hierarchy. `SuperAdmin` sees exactly the
/// navigation entries that list `super_admin`, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Owner,
    Finance,
    Admin,
    Operation,
    Driver,
}

/// A role name that is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    /// Every role in the catalog, in declaration order.
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::Owner,
        Role::Finance,
        Role::Admin,
        Role::Operation,
        Role::Driver,
    ];

    /// Wire name used in sessions and configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Owner => "owner",
            Role::Finance => "finance",
            Role::Admin => "admin",
            Role::Operation => "operation",
            Role::Driver => "driver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Check whether `name` is a role in the catalog.
pub fn is_valid_role(name: &str) -> bool {
    name.parse::<Role>().is_ok()
}
