//! Semantic analysis for DROP statements.
//!
//! A parsed `DropStatement` is analyzed against an `AnalysisContext`, which
//! resolves the target name and, when authorization is enabled, checks that
//! the session may drop the object. Successful analysis yields a `BoundDrop`
//! that's handed off to planning.
pub mod config;
pub mod context;
pub mod drop;
pub mod object_type;
pub mod qualified_name;
pub mod session;

#[cfg(test)]
mod testutil;

pub use config::AnalyzerConfig;
pub use context::AnalysisContext;
pub use drop::{BoundDrop, DropStatement};
pub use object_type::{ObjectType, PermissionType};
pub use qualified_name::{QualifiedName, QualifiedNameList, ResolvedName};
pub use session::SessionContext;
