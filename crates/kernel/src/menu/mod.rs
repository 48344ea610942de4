//! Navigation registry and role-based access resolution.
//!
//! The registry is a declarative table of dashboard routes, each listing the
//! roles that may see it. One generic resolver filters it per role; there is
//! no per-role branching anywhere else.

mod cache;
mod entry;
mod registry;
mod resolver;

pub use cache::ResolverCache;
pub use entry::{NavEntry, NavEntryDefinition, match_pattern};
pub use registry::NavigationRegistry;
pub use resolver::{
    NavItem, VisibleEntry, is_path_reachable, reachable_trail, resolve_visible_entries,
    visible_for,
};
