pub mod authorize;

use std::fmt;

use cql_error::{AnalysisError, ErrorCode, Location, Result, internal};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::context::AnalysisContext;
use crate::object_type::ObjectType;
use crate::qualified_name::{QualifiedNameList, ResolvedName};

const UNKNOWN_OBJECT_LABEL: &str = "UNKNOWN OBJECT";

/// DROP <object-type> [IF EXISTS] <name>
///
/// Constructed once by the parser and never modified afterwards. Analysis
/// produces a separate `BoundDrop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropStatement {
    drop_type: ObjectType,
    names: QualifiedNameList,
    if_exists: bool,
    location: Location,
}

impl DropStatement {
    pub fn new(
        drop_type: ObjectType,
        names: impl Into<QualifiedNameList>,
        if_exists: bool,
        location: Location,
    ) -> Self {
        DropStatement {
            drop_type,
            names: names.into(),
            if_exists,
            location,
        }
    }

    pub fn drop_type(&self) -> ObjectType {
        self.drop_type
    }

    pub fn names(&self) -> &QualifiedNameList {
        &self.names
    }

    pub fn if_exists(&self) -> bool {
        self.if_exists
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Validate the statement, resolve its name, and check that the current
    /// session is allowed to drop the object.
    ///
    /// Stops at the first failing step.
    pub fn analyze(&self, ctx: &dyn AnalysisContext) -> Result<BoundDrop> {
        // Role statements are rejected on feature availability alone, before
        // looking at the name.
        if self.drop_type == ObjectType::Role && !ctx.is_role_management_enabled() {
            return Err(ctx.report_error(
                self.location,
                "role management requires authentication to be enabled".to_string(),
                ErrorCode::FeatureDisabled,
            ));
        }

        if self.names.len() > 1 {
            return Err(ctx.report_error(
                self.location,
                "only one object name is allowed in a drop statement".to_string(),
                ErrorCode::StatementInvalid,
            ));
        }

        let name = self
            .names
            .first()
            .ok_or_else(|| internal!("drop statement is missing an object name"))?;

        let resolved = ctx
            .resolve_name(name, self.drop_type)
            .map_err(|e| AnalysisError::name_resolution(e, self.location))?;
        let bound = BoundDrop {
            drop_type: self.drop_type,
            name: resolved,
            if_exists: self.if_exists,
            location: self.location,
        };
        debug!(
            drop_type = %self.drop_type,
            %name,
            target = %bound.target_name(),
            "resolved drop target"
        );

        if ctx.is_authorization_enabled() {
            match authorize::authorizer_for(self.drop_type) {
                Some(authorizer) => authorizer.authorize(ctx, &bound)?,
                None => {
                    return Err(ctx.report_error(
                        self.location,
                        format!("DROP {} with authorization enabled", self.drop_type),
                        ErrorCode::FeatureNotSupported,
                    ));
                }
            }
        }

        Ok(bound)
    }

    /// Short description of the statement for tracing.
    ///
    /// Never fails, unsupported object kinds get a placeholder label.
    pub fn describe(&self) -> String {
        let last_name = self.names.first().map(|n| n.last_name()).unwrap_or("");
        describe_line(self.drop_type, last_name, self.if_exists)
    }
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {}", self.drop_type)?;
        if self.if_exists {
            write!(f, " IF EXISTS")?;
        }
        write!(f, " {}", self.names)
    }
}

/// A drop statement that passed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundDrop {
    pub drop_type: ObjectType,
    pub name: ResolvedName,
    pub if_exists: bool,
    pub location: Location,
}

impl BoundDrop {
    /// Name of the dropped object as users refer to it.
    ///
    /// Keyspaces and roles are named by themselves, everything else is
    /// qualified by its keyspace.
    pub fn target_name(&self) -> String {
        match self.drop_type {
            ObjectType::Schema | ObjectType::Role => self.name.object_name.clone(),
            _ => self.name.table_name(),
        }
    }

    pub fn describe(&self) -> String {
        describe_line(self.drop_type, self.name.last_name(), self.if_exists)
    }

    /// Emit the analysis result at trace level.
    pub fn trace_result(&self) {
        trace!(location = %self.location, result = %self.describe(), "semantic analysis result");
    }
}

fn describe_line(drop_type: ObjectType, last_name: &str, if_exists: bool) -> String {
    let label = drop_type.label().unwrap_or(UNKNOWN_OBJECT_LABEL);
    let if_exists = if if_exists { " IF EXISTS" } else { "" };
    format!("\t{label} {last_name}{if_exists}")
}
