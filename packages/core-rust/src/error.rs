//! Error taxonomy shared by request binding, projection, and transports.

use crate::operation::OperationKind;

/// A request could not be bound or failed a precondition.
///
/// Raised before any remote call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{operation}: required parameter '{field}' was not supplied")]
    MissingField {
        operation: OperationKind,
        field: &'static str,
    },
    #[error("{operation}: no parameter named '{name}'")]
    UnknownParameter {
        operation: OperationKind,
        name: String,
    },
    #[error("{operation}: parameter '{field}' must not be empty")]
    EmptyValue {
        operation: OperationKind,
        field: &'static str,
    },
    #[error("malformed parameter binding '{0}', expected NAME=VALUE")]
    MalformedParameter(String),
    #[error("{operation}: invalid request document: {reason}")]
    InvalidDocument {
        operation: OperationKind,
        reason: String,
    },
}

/// An output selector does not resolve to a projection for the operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty output selector")]
    Empty,
    #[error("{operation} has no response field '{name}'")]
    UnknownResponseField {
        operation: OperationKind,
        name: String,
    },
    #[error("{operation} has no parameter '{name}' to echo")]
    UnknownParameter {
        operation: OperationKind,
        name: String,
    },
}

/// Failure reported by a transport for a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The endpoint host name could not be resolved.
    #[error("name resolution failed: {detail}")]
    NameResolution { detail: String },
    /// The service answered with an error; code and message are as received.
    #[error("{code}: {message}")]
    Service { code: String, message: String },
    /// Any other failure, carrying the full error context.
    #[error("{0}")]
    Other(String),
}
