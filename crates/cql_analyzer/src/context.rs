use cql_error::{AnalysisError, ErrorCode, Location, ResolveError, Result};

use crate::object_type::{ObjectType, PermissionType};
use crate::qualified_name::{QualifiedName, ResolvedName};

/// Services the surrounding session provides to statement analysis.
///
/// Implementations may be shared between concurrent analyses, each method is
/// expected to be callable from multiple threads at once if the
/// implementation is `Sync`. Analysis never retries a failed call.
pub trait AnalysisContext {
    /// If role management statements (CREATE/ALTER/DROP ROLE) are allowed.
    fn is_role_management_enabled(&self) -> bool;

    /// If permission checks should be performed.
    fn is_authorization_enabled(&self) -> bool;

    /// Resolve a name for some kind of object.
    ///
    /// Each object kind has its own rules for defaulting the keyspace.
    fn resolve_name(
        &self,
        name: &QualifiedName,
        object_type: ObjectType,
    ) -> Result<ResolvedName, ResolveError>;

    fn check_table_permission(
        &self,
        location: Location,
        permission: PermissionType,
        table: &ResolvedName,
    ) -> Result<()>;

    fn check_all_keyspaces_permission(
        &self,
        location: Location,
        permission: PermissionType,
    ) -> Result<()>;

    fn check_keyspace_permission(
        &self,
        location: Location,
        permission: PermissionType,
        keyspace: &str,
    ) -> Result<()>;

    fn check_role_permission(
        &self,
        location: Location,
        permission: PermissionType,
        role: &str,
    ) -> Result<()>;

    /// Role the current session is authenticated as, if any.
    fn current_role_name(&self) -> Option<&str>;

    fn report_error(&self, location: Location, message: String, code: ErrorCode) -> AnalysisError {
        AnalysisError::new(code, message, location)
    }
}
