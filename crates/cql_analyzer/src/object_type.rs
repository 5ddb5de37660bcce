use std::fmt;
use std::str::FromStr;

use cql_error::{AnalysisError, ErrorCode, Location};
use serde::{Deserialize, Serialize};

/// Kind of catalog object a statement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Table,
    Index,
    Type,
    Schema,
    Role,
    View,
    Function,
    Aggregate,
}

impl ObjectType {
    /// Label used when describing analysis results.
    ///
    /// Returns `None` for kinds that can be parsed but aren't supported by
    /// drop analysis yet.
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            ObjectType::Table => Some("Table"),
            ObjectType::Schema => Some("Keyspace"),
            ObjectType::Type => Some("Type"),
            ObjectType::Index => Some("Index"),
            ObjectType::Role => Some("Role"),
            ObjectType::View | ObjectType::Function | ObjectType::Aggregate => None,
        }
    }

    /// Keyword as it appears in statement text.
    pub const fn keyword(&self) -> &'static str {
        match self {
            ObjectType::Table => "TABLE",
            ObjectType::Index => "INDEX",
            ObjectType::Type => "TYPE",
            ObjectType::Schema => "KEYSPACE",
            ObjectType::Role => "ROLE",
            ObjectType::View => "MATERIALIZED VIEW",
            ObjectType::Function => "FUNCTION",
            ObjectType::Aggregate => "AGGREGATE",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl FromStr for ObjectType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        let object_type = match normalized.to_ascii_uppercase().as_str() {
            "TABLE" | "COLUMNFAMILY" => ObjectType::Table,
            "INDEX" => ObjectType::Index,
            "TYPE" => ObjectType::Type,
            "SCHEMA" | "KEYSPACE" => ObjectType::Schema,
            "ROLE" | "USER" => ObjectType::Role,
            "VIEW" | "MATERIALIZED VIEW" => ObjectType::View,
            "FUNCTION" => ObjectType::Function,
            "AGGREGATE" => ObjectType::Aggregate,
            _ => {
                return Err(AnalysisError::new(
                    ErrorCode::StatementInvalid,
                    format!("Unknown object type for drop: '{s}'"),
                    Location::default(),
                ));
            }
        };

        Ok(object_type)
    }
}

/// Permission a role needs to perform an operation on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PermissionType {
    Create,
    Alter,
    Drop,
    Select,
    Modify,
    Authorize,
    Describe,
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PermissionType::Create => "CREATE",
            PermissionType::Alter => "ALTER",
            PermissionType::Drop => "DROP",
            PermissionType::Select => "SELECT",
            PermissionType::Modify => "MODIFY",
            PermissionType::Authorize => "AUTHORIZE",
            PermissionType::Describe => "DESCRIBE",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_types() {
        struct Test {
            input: &'static str,
            expected: ObjectType,
        }

        let tests = vec![
            Test {
                input: "table",
                expected: ObjectType::Table,
            },
            Test {
                input: "KEYSPACE",
                expected: ObjectType::Schema,
            },
            Test {
                input: "schema",
                expected: ObjectType::Schema,
            },
            Test {
                input: "Role",
                expected: ObjectType::Role,
            },
            Test {
                input: "materialized   view",
                expected: ObjectType::View,
            },
            Test {
                input: "type",
                expected: ObjectType::Type,
            },
        ];

        for test in tests {
            let got: ObjectType = test.input.parse().unwrap();
            assert_eq!(test.expected, got, "input: {}", test.input);
        }
    }

    #[test]
    fn parse_unknown_object_type() {
        let err = "trigger".parse::<ObjectType>().unwrap_err();
        assert_eq!(ErrorCode::StatementInvalid, err.code());
    }

    #[test]
    fn labels() {
        assert_eq!(Some("Keyspace"), ObjectType::Schema.label());
        assert_eq!(Some("Index"), ObjectType::Index.label());
        assert_eq!(None, ObjectType::Function.label());
    }

    #[test]
    fn keyword_round_trips_through_parse() {
        let all = [
            ObjectType::Table,
            ObjectType::Index,
            ObjectType::Type,
            ObjectType::Schema,
            ObjectType::Role,
            ObjectType::View,
            ObjectType::Function,
            ObjectType::Aggregate,
        ];
        for object_type in all {
            assert_eq!(object_type, object_type.keyword().parse().unwrap());
        }
    }
}
