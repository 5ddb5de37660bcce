//! In-memory session state implementing `AnalysisContext`.
pub mod permissions;

use std::sync::Arc;

use cql_error::{ErrorCode, Location, ResolveError, Result};

use tracing::trace;

use crate::config::AnalyzerConfig;
use crate::context::AnalysisContext;
use crate::object_type::{ObjectType, PermissionType};
use crate::qualified_name::{QualifiedName, ResolvedName};
use crate::session::permissions::{PermissionStore, Resource};

/// Analysis state for a single client session.
///
/// The permission store is shared across sessions.
#[derive(Debug, Clone)]
pub struct SessionContext {
    config: AnalyzerConfig,
    current_keyspace: Option<String>,
    current_role: Option<String>,
    store: Arc<PermissionStore>,
}

impl SessionContext {
    pub fn new(config: AnalyzerConfig, store: Arc<PermissionStore>) -> Self {
        SessionContext {
            config,
            current_keyspace: None,
            current_role: None,
            store,
        }
    }

    pub fn with_current_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.current_keyspace = Some(keyspace.into());
        self
    }

    pub fn with_current_role(mut self, role: impl Into<String>) -> Self {
        self.current_role = Some(role.into());
        self
    }

    /// USE <keyspace>
    pub fn set_current_keyspace(&mut self, keyspace: impl Into<String>) {
        self.current_keyspace = Some(keyspace.into());
    }

    pub fn current_keyspace(&self) -> Option<&str> {
        self.current_keyspace.as_deref()
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AnalyzerConfig {
        &mut self.config
    }

    pub fn store(&self) -> &Arc<PermissionStore> {
        &self.store
    }

    fn check_permission(
        &self,
        location: Location,
        permission: PermissionType,
        resource: Resource,
    ) -> Result<()> {
        let Some(role) = self.current_role.as_deref() else {
            return Err(self.report_error(
                location,
                "You have to be logged in and not anonymous to perform this request".to_string(),
                ErrorCode::Unauthorized,
            ));
        };

        trace!(%role, %permission, %resource, "checking permission");
        if self.store.has_permission(role, permission, &resource) {
            return Ok(());
        }

        Err(self.report_error(
            location,
            format!(
                "User {role} has no {permission} permission on {resource} or any of its parents"
            ),
            ErrorCode::Unauthorized,
        ))
    }
}

impl AnalysisContext for SessionContext {
    fn is_role_management_enabled(&self) -> bool {
        self.config.role_management_enabled()
    }

    fn is_authorization_enabled(&self) -> bool {
        self.config.authorization_enabled()
    }

    fn resolve_name(
        &self,
        name: &QualifiedName,
        object_type: ObjectType,
    ) -> Result<ResolvedName, ResolveError> {
        match object_type {
            ObjectType::Role => {
                if name.is_qualified() {
                    return Err(ResolveError::new(format!("invalid role name '{name}'")));
                }
                Ok(ResolvedName::new("", &name.object_name))
            }
            ObjectType::Schema => {
                if name.is_qualified() {
                    return Err(ResolveError::new(format!("invalid keyspace name '{name}'")));
                }
                Ok(ResolvedName::new(&name.object_name, &name.object_name))
            }
            ObjectType::Table
            | ObjectType::Index
            | ObjectType::Type
            | ObjectType::View
            | ObjectType::Function
            | ObjectType::Aggregate => {
                let keyspace = name
                    .namespace_name
                    .as_deref()
                    .or(self.current_keyspace.as_deref())
                    .ok_or_else(|| {
                        ResolveError::new(format!(
                            "No keyspace has been specified. USE a keyspace, or explicitly specify the keyspace for '{name}'"
                        ))
                    })?;
                Ok(ResolvedName::new(keyspace, &name.object_name))
            }
        }
    }

    fn check_table_permission(
        &self,
        location: Location,
        permission: PermissionType,
        table: &ResolvedName,
    ) -> Result<()> {
        let resource = Resource::table(&table.namespace_name, &table.object_name);
        self.check_permission(location, permission, resource)
    }

    fn check_all_keyspaces_permission(
        &self,
        location: Location,
        permission: PermissionType,
    ) -> Result<()> {
        self.check_permission(location, permission, Resource::AllKeyspaces)
    }

    fn check_keyspace_permission(
        &self,
        location: Location,
        permission: PermissionType,
        keyspace: &str,
    ) -> Result<()> {
        self.check_permission(location, permission, Resource::Keyspace(keyspace.to_string()))
    }

    fn check_role_permission(
        &self,
        location: Location,
        permission: PermissionType,
        role: &str,
    ) -> Result<()> {
        self.check_permission(location, permission, Resource::Role(role.to_string()))
    }

    fn current_role_name(&self) -> Option<&str> {
        self.current_role.as_deref()
    }
}
