//! Test helpers.
use cql_error::{AnalysisError, ErrorCode, Location, ResolveError, Result};
use parking_lot::Mutex;

use crate::context::AnalysisContext;
use crate::object_type::{ObjectType, PermissionType};
use crate::qualified_name::{QualifiedName, ResolvedName};

/// Keyspace used when resolving unqualified names.
pub const DEFAULT_TEST_KEYSPACE: &str = "test_ks";

/// A permission primitive invoked on the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionCall {
    Table(ResolvedName),
    AllKeyspaces,
    Keyspace(String),
    Role(String),
}

/// Context that records every name resolution and permission check.
///
/// All permission checks pass unless `deny_all` is set.
#[derive(Debug, Default)]
pub struct RecordingContext {
    role_management: bool,
    authorization: bool,
    current_role: Option<String>,
    deny: bool,
    resolution_error: Option<String>,
    resolve_to: Option<ResolvedName>,
    resolved: Mutex<Vec<(QualifiedName, ObjectType)>>,
    calls: Mutex<Vec<(PermissionType, PermissionCall)>>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role_management(mut self, enabled: bool) -> Self {
        self.role_management = enabled;
        self
    }

    pub fn with_authorization(mut self, enabled: bool) -> Self {
        self.authorization = enabled;
        self
    }

    pub fn with_current_role(mut self, role: &str) -> Self {
        self.current_role = Some(role.to_string());
        self
    }

    pub fn deny_all(mut self) -> Self {
        self.deny = true;
        self
    }

    pub fn fail_resolution(mut self, msg: &str) -> Self {
        self.resolution_error = Some(msg.to_string());
        self
    }

    /// Resolve every name to `name` instead of applying the default rules.
    pub fn resolve_to(mut self, name: ResolvedName) -> Self {
        self.resolve_to = Some(name);
        self
    }

    pub fn resolved(&self) -> Vec<(QualifiedName, ObjectType)> {
        self.resolved.lock().clone()
    }

    pub fn permission_calls(&self) -> Vec<PermissionCall> {
        self.calls.lock().iter().map(|(_, call)| call.clone()).collect()
    }

    /// Permissions requested, in call order.
    pub fn checked_permissions(&self) -> Vec<PermissionType> {
        self.calls.lock().iter().map(|(perm, _)| *perm).collect()
    }

    fn record(
        &self,
        location: Location,
        permission: PermissionType,
        call: PermissionCall,
    ) -> Result<()> {
        let denied = format!("no {permission} permission for {call:?}");
        self.calls.lock().push((permission, call));
        if self.deny {
            return Err(AnalysisError::new(ErrorCode::Unauthorized, denied, location));
        }
        Ok(())
    }
}

impl AnalysisContext for RecordingContext {
    fn is_role_management_enabled(&self) -> bool {
        self.role_management
    }

    fn is_authorization_enabled(&self) -> bool {
        self.authorization
    }

    fn resolve_name(
        &self,
        name: &QualifiedName,
        object_type: ObjectType,
    ) -> Result<ResolvedName, ResolveError> {
        self.resolved.lock().push((name.clone(), object_type));

        if let Some(msg) = &self.resolution_error {
            return Err(ResolveError::new(msg.clone()));
        }
        if let Some(resolved) = &self.resolve_to {
            return Ok(resolved.clone());
        }

        let resolved = match object_type {
            ObjectType::Schema => ResolvedName::new(&name.object_name, &name.object_name),
            ObjectType::Role => ResolvedName::new("", &name.object_name),
            _ => ResolvedName::new(
                name.namespace_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TEST_KEYSPACE.to_string()),
                &name.object_name,
            ),
        };

        Ok(resolved)
    }

    fn check_table_permission(
        &self,
        location: Location,
        permission: PermissionType,
        table: &ResolvedName,
    ) -> Result<()> {
        self.record(location, permission, PermissionCall::Table(table.clone()))
    }

    fn check_all_keyspaces_permission(
        &self,
        location: Location,
        permission: PermissionType,
    ) -> Result<()> {
        self.record(location, permission, PermissionCall::AllKeyspaces)
    }

    fn check_keyspace_permission(
        &self,
        location: Location,
        permission: PermissionType,
        keyspace: &str,
    ) -> Result<()> {
        self.record(location, permission, PermissionCall::Keyspace(keyspace.to_string()))
    }

    fn check_role_permission(
        &self,
        location: Location,
        permission: PermissionType,
        role: &str,
    ) -> Result<()> {
        self.record(location, permission, PermissionCall::Role(role.to_string()))
    }

    fn current_role_name(&self) -> Option<&str> {
        self.current_role.as_deref()
    }
}
