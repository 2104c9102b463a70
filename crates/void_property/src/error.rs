//! Codec errors

use crate::kind::PropertyKind;
use thiserror::Error;

/// Failure to decode a transport value into a property value.
///
/// Errors are local to one property; callers setting several properties keep
/// going after a failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("Malformed value{}: {reason}", kind_suffix(.kind))]
    MalformedValue {
        kind: Option<PropertyKind>,
        reason: String,
    },

    #[error("Writing {0} properties is not supported")]
    Unsupported(PropertyKind),

    #[error("Enum member not found: {member}")]
    EnumMemberNotFound { member: String },
}

impl CodecError {
    /// Malformed value for a known kind
    pub fn malformed(kind: PropertyKind, reason: impl Into<String>) -> Self {
        Self::MalformedValue {
            kind: Some(kind),
            reason: reason.into(),
        }
    }

    /// Stable error code reported to remote callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedValue { .. } => "MalformedValue",
            Self::Unsupported(_) => "Unsupported",
            Self::EnumMemberNotFound { .. } => "EnumMemberNotFound",
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

fn kind_suffix(kind: &Option<PropertyKind>) -> String {
    match kind {
        Some(kind) => format!(" for {}", kind),
        None => String::new(),
    }
}
