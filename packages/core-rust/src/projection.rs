//! Output projection: what an invocation reports to its caller.
//!
//! A projection is a pure function of the response body and the request
//! that produced it. Selector strings resolve against the operation's
//! descriptor when the invocation is configured, so an unknown name fails
//! before any call is made:
//!
//! - `*` selects the whole response,
//! - `^Name` echoes the bound request parameter `Name`,
//! - `Name` selects the response field `Name`,
//! - no selector uses the operation's default field.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::SelectorError;
use crate::operation::OperationKind;
use crate::request::OperationRequest;

/// Caller-supplied projection function.
pub type ProjectFn = dyn Fn(&Value, &OperationRequest) -> Value + Send + Sync;

/// Selects the value an invocation returns alongside the raw response.
#[derive(Clone, Default)]
pub enum Projection {
    /// The descriptor's default response field.
    #[default]
    Primary,
    /// A named response field. Accepted case-insensitively by `parse` and
    /// canonicalized to the descriptor's spelling.
    Field(&'static str),
    /// The whole response body.
    WholeResponse,
    /// The value bound to a request parameter.
    Parameter(&'static str),
    /// An arbitrary function of the response and request.
    Custom(Arc<ProjectFn>),
}

impl fmt::Debug for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("Primary"),
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::WholeResponse => f.write_str("WholeResponse"),
            Self::Parameter(name) => f.debug_tuple("Parameter").field(name).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Projection {
    /// Resolve an optional selector string for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `SelectorError` if the selector is blank or names a field the
    /// operation does not have.
    pub fn parse(kind: OperationKind, selector: Option<&str>) -> Result<Self, SelectorError> {
        let Some(selector) = selector else {
            return Ok(Self::Primary);
        };
        let selector = selector.trim();
        let descriptor = kind.descriptor();
        if selector == "*" {
            return Ok(Self::WholeResponse);
        }
        if let Some(name) = selector.strip_prefix('^') {
            let name = name.trim();
            if name.is_empty() {
                return Err(SelectorError::Empty);
            }
            return descriptor
                .request_field(name)
                .map(|spec| Self::Parameter(spec.name))
                .ok_or_else(|| SelectorError::UnknownParameter {
                    operation: kind,
                    name: name.to_string(),
                });
        }
        if selector.is_empty() {
            return Err(SelectorError::Empty);
        }
        descriptor
            .response_field(selector)
            .map(Self::Field)
            .ok_or_else(|| SelectorError::UnknownResponseField {
                operation: kind,
                name: selector.to_string(),
            })
    }

    /// Wrap a function as a projection.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value, &OperationRequest) -> Value + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Apply the projection. Absent fields project to `Value::Null`.
    #[must_use]
    pub fn apply(&self, response: &Value, request: &OperationRequest) -> Value {
        match self {
            Self::Primary => field_of(response, request.descriptor().default_projection),
            Self::Field(name) => field_of(response, name),
            Self::WholeResponse => response.clone(),
            Self::Parameter(name) => request
                .field(name)
                .map_or(Value::Null, |v| Value::String(v.to_string())),
            Self::Custom(f) => f(response, request),
        }
    }
}

fn field_of(response: &Value, name: &str) -> Value {
    response.get(name).cloned().unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
