use std::fmt;
use std::str::FromStr;

use cql_error::{AnalysisError, ErrorCode, Location};
use serde::{Deserialize, Serialize};

/// An object name as written by the user, optionally qualified by a keyspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub namespace_name: Option<String>,
    pub object_name: String,
}

impl QualifiedName {
    pub fn new(namespace_name: impl Into<String>, object_name: impl Into<String>) -> Self {
        QualifiedName {
            namespace_name: Some(namespace_name.into()),
            object_name: object_name.into(),
        }
    }

    pub fn bare(object_name: impl Into<String>) -> Self {
        QualifiedName {
            namespace_name: None,
            object_name: object_name.into(),
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.namespace_name.is_some()
    }

    /// The right-most component of the name.
    pub fn last_name(&self) -> &str {
        &self.object_name
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace_name {
            Some(namespace) => write!(f, "{namespace}.{}", self.object_name),
            None => write!(f, "{}", self.object_name),
        }
    }
}

impl FromStr for QualifiedName {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            AnalysisError::new(
                ErrorCode::StatementInvalid,
                format!("Invalid object name: '{s}'"),
                Location::default(),
            )
        };

        let parts: Vec<_> = s.split('.').map(str::trim).collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(invalid());
        }

        match parts.as_slice() {
            [object] => Ok(QualifiedName::bare(*object)),
            [namespace, object] => Ok(QualifiedName::new(*namespace, *object)),
            _ => Err(invalid()),
        }
    }
}

/// Ordered names attached to a statement.
///
/// The parser guarantees at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualifiedNameList {
    names: Vec<QualifiedName>,
}

impl QualifiedNameList {
    pub fn new(names: Vec<QualifiedName>) -> Self {
        QualifiedNameList { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn first(&self) -> Option<&QualifiedName> {
        self.names.first()
    }

    /// Get the only name in the list, or `None` if there's zero or more than
    /// one.
    pub fn single(&self) -> Option<&QualifiedName> {
        match self.names.as_slice() {
            [name] => Some(name),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &QualifiedName> {
        self.names.iter()
    }
}

impl From<QualifiedName> for QualifiedNameList {
    fn from(name: QualifiedName) -> Self {
        QualifiedNameList { names: vec![name] }
    }
}

impl FromIterator<QualifiedName> for QualifiedNameList {
    fn from_iter<T: IntoIterator<Item = QualifiedName>>(iter: T) -> Self {
        QualifiedNameList {
            names: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for QualifiedNameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, name) in self.names.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

/// A name after resolution against the session.
///
/// For keyspaces the namespace is the keyspace itself. Roles live outside of
/// any keyspace and have an empty namespace, which `Display` omits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedName {
    pub namespace_name: String,
    pub object_name: String,
}

impl ResolvedName {
    pub fn new(namespace_name: impl Into<String>, object_name: impl Into<String>) -> Self {
        ResolvedName {
            namespace_name: namespace_name.into(),
            object_name: object_name.into(),
        }
    }

    /// Fully qualified `keyspace.object` form.
    pub fn table_name(&self) -> String {
        format!("{}.{}", self.namespace_name, self.object_name)
    }

    pub fn last_name(&self) -> &str {
        &self.object_name
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_name.is_empty() {
            write!(f, "{}", self.object_name)
        } else {
            write!(f, "{}.{}", self.namespace_name, self.object_name)
        }
    }
}
