use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use cql_error::{AnalysisError, ErrorCode, Location, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::object_type::PermissionType;

/// Something permissions can be granted on.
///
/// Resources form two trees: keyspaces and tables under all keyspaces, and
/// roles under all roles. A permission granted on a resource applies to
/// everything below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    AllKeyspaces,
    Keyspace(String),
    Table { keyspace: String, table: String },
    AllRoles,
    Role(String),
}

impl Resource {
    pub fn table(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
        Resource::Table {
            keyspace: keyspace.into(),
            table: table.into(),
        }
    }

    pub fn parent(&self) -> Option<Resource> {
        match self {
            Resource::AllKeyspaces | Resource::AllRoles => None,
            Resource::Keyspace(_) => Some(Resource::AllKeyspaces),
            Resource::Table { keyspace, .. } => Some(Resource::Keyspace(keyspace.clone())),
            Resource::Role(_) => Some(Resource::AllRoles),
        }
    }

    /// Iterate over this resource followed by each of its parents.
    pub fn lineage(&self) -> impl Iterator<Item = Resource> {
        std::iter::successors(Some(self.clone()), |r| r.parent())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::AllKeyspaces => write!(f, "<all keyspaces>"),
            Resource::Keyspace(keyspace) => write!(f, "<keyspace {keyspace}>"),
            Resource::Table { keyspace, table } => write!(f, "<table {keyspace}.{table}>"),
            Resource::AllRoles => write!(f, "<all roles>"),
            Resource::Role(role) => write!(f, "<role {role}>"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleInfo {
    pub is_superuser: bool,
    /// Roles granted to this role.
    pub member_of: BTreeSet<String>,
    pub grants: HashMap<Resource, BTreeSet<PermissionType>>,
}

/// Roles and their granted permissions.
///
/// Shared between sessions, lookups only take a read lock.
#[derive(Debug, Default)]
pub struct PermissionStore {
    roles: RwLock<HashMap<String, RoleInfo>>,
}

impl PermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_role(&self, name: &str, is_superuser: bool) -> Result<()> {
        let mut roles = self.roles.write();
        if roles.contains_key(name) {
            return Err(invalid_request(format!("Role {name} already exists")));
        }
        roles.insert(
            name.to_string(),
            RoleInfo {
                is_superuser,
                ..Default::default()
            },
        );
        Ok(())
    }

    /// Remove a role along with any memberships other roles have in it.
    pub fn drop_role(&self, name: &str) -> Result<()> {
        let mut roles = self.roles.write();
        if roles.remove(name).is_none() {
            return Err(invalid_request(format!("Role {name} doesn't exist")));
        }
        for info in roles.values_mut() {
            info.member_of.remove(name);
            info.grants.remove(&Resource::Role(name.to_string()));
        }
        Ok(())
    }

    /// Grant `role` to `grantee`, `grantee` inherits all of `role`'s
    /// permissions.
    pub fn grant_role(&self, role: &str, grantee: &str) -> Result<()> {
        let mut roles = self.roles.write();
        if !roles.contains_key(role) {
            return Err(invalid_request(format!("Role {role} doesn't exist")));
        }
        let info = roles
            .get_mut(grantee)
            .ok_or_else(|| invalid_request(format!("Role {grantee} doesn't exist")))?;
        info.member_of.insert(role.to_string());
        Ok(())
    }

    pub fn grant_permission(
        &self,
        role: &str,
        permission: PermissionType,
        resource: Resource,
    ) -> Result<()> {
        let mut roles = self.roles.write();
        let info = roles
            .get_mut(role)
            .ok_or_else(|| invalid_request(format!("Role {role} doesn't exist")))?;
        info.grants.entry(resource).or_default().insert(permission);
        Ok(())
    }

    pub fn revoke_permission(
        &self,
        role: &str,
        permission: PermissionType,
        resource: &Resource,
    ) -> Result<()> {
        let mut roles = self.roles.write();
        let info = roles
            .get_mut(role)
            .ok_or_else(|| invalid_request(format!("Role {role} doesn't exist")))?;
        if let Some(perms) = info.grants.get_mut(resource) {
            perms.remove(&permission);
            if perms.is_empty() {
                info.grants.remove(resource);
            }
        }
        Ok(())
    }

    pub fn role_exists(&self, name: &str) -> bool {
        self.roles.read().contains_key(name)
    }

    /// Check if a role, or any role it inherits from, holds `permission` on
    /// the resource or one of its parents.
    ///
    /// Superusers hold every permission.
    pub fn has_permission(
        &self,
        role: &str,
        permission: PermissionType,
        resource: &Resource,
    ) -> bool {
        let roles = self.roles.read();
        let lineage: Vec<_> = resource.lineage().collect();

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([role]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(info) = roles.get(current) else {
                continue;
            };
            if info.is_superuser {
                return true;
            }
            let granted = lineage.iter().any(|r| {
                info.grants
                    .get(r)
                    .is_some_and(|perms| perms.contains(&permission))
            });
            if granted {
                return true;
            }
            queue.extend(info.member_of.iter().map(|s| s.as_str()));
        }

        false
    }
}

fn invalid_request(msg: String) -> AnalysisError {
    AnalysisError::new(ErrorCode::InvalidRequest, msg, Location::default())
}
