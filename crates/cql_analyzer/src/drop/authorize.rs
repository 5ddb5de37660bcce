//! Permission checks required before dropping an object.
//!
//! Each object kind that supports authorization gets its own authorizer.
//! Kinds without one are rejected when authorization is enabled.
use cql_error::{ErrorCode, Result};

use super::BoundDrop;
use crate::context::AnalysisContext;
use crate::object_type::{ObjectType, PermissionType};

pub trait DropAuthorizer: Sync {
    /// Check that the current session may drop the (resolved) object.
    fn authorize(&self, ctx: &dyn AnalysisContext, drop: &BoundDrop) -> Result<()>;
}

/// Get the authorizer for an object kind.
pub fn authorizer_for(object_type: ObjectType) -> Option<&'static dyn DropAuthorizer> {
    match object_type {
        ObjectType::Table | ObjectType::Index => Some(&TableDropAuthorizer),
        ObjectType::Type => Some(&TypeDropAuthorizer),
        ObjectType::Schema => Some(&KeyspaceDropAuthorizer),
        ObjectType::Role => Some(&RoleDropAuthorizer),
        ObjectType::View | ObjectType::Function | ObjectType::Aggregate => None,
    }
}

/// Tables and indexes require DROP on the table.
#[derive(Debug, Clone, Copy)]
pub struct TableDropAuthorizer;

impl DropAuthorizer for TableDropAuthorizer {
    fn authorize(&self, ctx: &dyn AnalysisContext, drop: &BoundDrop) -> Result<()> {
        ctx.check_table_permission(drop.location, PermissionType::Drop, &drop.name)
    }
}

/// Types aren't scoped to a keyspace for permission purposes, DROP is
/// required on all keyspaces.
#[derive(Debug, Clone, Copy)]
pub struct TypeDropAuthorizer;

impl DropAuthorizer for TypeDropAuthorizer {
    fn authorize(&self, ctx: &dyn AnalysisContext, drop: &BoundDrop) -> Result<()> {
        ctx.check_all_keyspaces_permission(drop.location, PermissionType::Drop)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeyspaceDropAuthorizer;

impl DropAuthorizer for KeyspaceDropAuthorizer {
    fn authorize(&self, ctx: &dyn AnalysisContext, drop: &BoundDrop) -> Result<()> {
        ctx.check_keyspace_permission(
            drop.location,
            PermissionType::Drop,
            &drop.name.namespace_name,
        )
    }
}

/// Requires DROP on the role, and disallows dropping the role the session is
/// logged in as.
///
/// The permission check happens first so that a session without permission
/// gets a permission error.
#[derive(Debug, Clone, Copy)]
pub struct RoleDropAuthorizer;

impl DropAuthorizer for RoleDropAuthorizer {
    fn authorize(&self, ctx: &dyn AnalysisContext, drop: &BoundDrop) -> Result<()> {
        let role = drop.name.object_name.as_str();
        ctx.check_role_permission(drop.location, PermissionType::Drop, role)?;

        if ctx.current_role_name() == Some(role) {
            return Err(ctx.report_error(
                drop.location,
                "cannot drop primary role for current login".to_string(),
                ErrorCode::InvalidRequest,
            ));
        }

        Ok(())
    }
}
