#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// One-time construction of the leaf to parent hierarchy.
pub mod builder;

/// Error types for the reference module.
pub mod error;

/// Named, parent and hierarchy color records.
pub mod named;

/// Sources of hierarchy entries.
pub mod provider;

/// Parsing of resolution requests.
pub mod query;

/// Nearest color lookup.
pub mod resolver;

/// Built-in seed colors and seed file parsing.
pub mod seeds;

pub use crate::builder::{assign_hierarchy, build_hierarchy, BuildReport, ParentMapping};
pub use crate::error::ReferenceError;
pub use crate::named::{HierarchyEntry, HierarchyRow, NamedColor, ParentColor};
pub use crate::provider::{HierarchyProvider, ReferenceHierarchy};
pub use crate::query::{ColorQuery, ErrorBody};
pub use crate::resolver::{Resolution, Resolver};
