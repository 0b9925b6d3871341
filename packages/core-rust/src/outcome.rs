use serde_json::Value;

use crate::response::OperationResponse;

/// The single result of one invocation.
///
/// Either the projected value together with the typed response it came from,
/// or the error that ended the invocation. Never both, never neither.
#[derive(Debug)]
pub enum InvocationOutcome<E> {
    Success {
        projected: Value,
        raw: OperationResponse,
    },
    Failure(E),
}

impl<E> InvocationOutcome<E> {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The projected value, if the invocation succeeded.
    #[must_use]
    pub const fn projected(&self) -> Option<&Value> {
        match self {
            Self::Success { projected, .. } => Some(projected),
            Self::Failure(_) => None,
        }
    }

    /// The error, if the invocation failed.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(e) => Some(e),
        }
    }

    /// Convert into a `Result` of `(projected, raw)`.
    ///
    /// # Errors
    ///
    /// Returns the failure's error.
    pub fn into_result(self) -> Result<(Value, OperationResponse), E> {
        match self {
            Self::Success { projected, raw } => Ok((projected, raw)),
            Self::Failure(e) => Err(e),
        }
    }
}

impl<E> From<Result<(Value, OperationResponse), E>> for InvocationOutcome<E> {
    fn from(result: Result<(Value, OperationResponse), E>) -> Self {
        match result {
            Ok((projected, raw)) => Self::Success { projected, raw },
            Err(e) => Self::Failure(e),
        }
    }
}
