//! Domain models.

pub mod role;

pub use role::{Role, UnknownRole, is_valid_role};
