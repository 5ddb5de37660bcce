//! Errors produced while analyzing statements.
//!
//! Errors are plain values returned to the statement pipeline. The pipeline
//! surfaces the code and message to the client as-is, so messages should be
//! specific to the statement being analyzed.
mod location;

use std::fmt;

pub use location::Location;

/// Error codes reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    FeatureDisabled,
    StatementInvalid,
    NameResolution,
    Unauthorized,
    InvalidRequest,
    FeatureNotSupported,
    Internal,
}

impl ErrorCode {
    /// The native protocol error code this maps to.
    pub const fn value(&self) -> i32 {
        match self {
            ErrorCode::Internal => 0x0000,
            ErrorCode::Unauthorized => 0x2100,
            ErrorCode::StatementInvalid
            | ErrorCode::NameResolution
            | ErrorCode::InvalidRequest
            | ErrorCode::FeatureNotSupported => 0x2200,
            ErrorCode::FeatureDisabled => 0x2300,
        }
    }

    /// Message used when a caller doesn't provide one.
    pub const fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::FeatureDisabled => "Feature Disabled",
            ErrorCode::StatementInvalid => "Invalid SQL Statement",
            ErrorCode::NameResolution => "Name Resolution Failed",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::FeatureNotSupported => "Feature Not Supported",
            ErrorCode::Internal => "Internal Error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_message())
    }
}

/// Failure reported by a name resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ResolveError(String);

impl ResolveError {
    pub fn new(msg: impl Into<String>) -> Self {
        ResolveError(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Feature disabled: {message}")]
    FeatureDisabled { message: String, location: Location },

    #[error("Invalid statement: {message}")]
    InvalidStatement { message: String, location: Location },

    #[error("Failed to resolve name: {source}")]
    NameResolution {
        location: Location,
        source: ResolveError,
    },

    #[error("Unauthorized: {message}")]
    Permission { message: String, location: Location },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String, location: Location },

    #[error("Feature not supported: {message}")]
    UnsupportedFeature { message: String, location: Location },

    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Construct an error for the given code.
    ///
    /// An empty message is replaced with the code's default message.
    pub fn new(code: ErrorCode, message: impl Into<String>, location: Location) -> Self {
        let mut message = message.into();
        if message.is_empty() {
            message = code.default_message().to_string();
        }

        match code {
            ErrorCode::FeatureDisabled => AnalysisError::FeatureDisabled { message, location },
            ErrorCode::StatementInvalid => AnalysisError::InvalidStatement { message, location },
            ErrorCode::NameResolution => AnalysisError::NameResolution {
                location,
                source: ResolveError(message),
            },
            ErrorCode::Unauthorized => AnalysisError::Permission { message, location },
            ErrorCode::InvalidRequest => AnalysisError::InvalidRequest { message, location },
            ErrorCode::FeatureNotSupported => {
                AnalysisError::UnsupportedFeature { message, location }
            }
            ErrorCode::Internal => AnalysisError::Internal(message),
        }
    }

    pub fn name_resolution(source: ResolveError, location: Location) -> Self {
        AnalysisError::NameResolution { location, source }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::FeatureDisabled { .. } => ErrorCode::FeatureDisabled,
            AnalysisError::InvalidStatement { .. } => ErrorCode::StatementInvalid,
            AnalysisError::NameResolution { .. } => ErrorCode::NameResolution,
            AnalysisError::Permission { .. } => ErrorCode::Unauthorized,
            AnalysisError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            AnalysisError::UnsupportedFeature { .. } => ErrorCode::FeatureNotSupported,
            AnalysisError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Message without the error kind prefix.
    pub fn message(&self) -> &str {
        match self {
            AnalysisError::FeatureDisabled { message, .. }
            | AnalysisError::InvalidStatement { message, .. }
            | AnalysisError::Permission { message, .. }
            | AnalysisError::InvalidRequest { message, .. }
            | AnalysisError::UnsupportedFeature { message, .. }
            | AnalysisError::Internal(message) => message.as_str(),
            AnalysisError::NameResolution { source, .. } => source.message(),
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            AnalysisError::FeatureDisabled { location, .. }
            | AnalysisError::InvalidStatement { location, .. }
            | AnalysisError::NameResolution { location, .. }
            | AnalysisError::Permission { location, .. }
            | AnalysisError::InvalidRequest { location, .. }
            | AnalysisError::UnsupportedFeature { location, .. } => Some(*location),
            AnalysisError::Internal(_) => None,
        }
    }
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;

#[macro_export]
macro_rules! internal {
    ($($arg:tt)*) => {
        $crate::AnalysisError::Internal(std::format!($($arg)*))
    };
}
