use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use comprehend_core::{
    OperationKind, OperationRequest, OperationResponse, SelectorError, TransportError,
    ValidationError,
};

/// Context carried with every invocation through the pipeline.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub call_id: u64,
    pub operation: OperationKind,
    /// Endpoint of the transport the call is sent through.
    pub endpoint: String,
    pub call_timeout_ms: u64,
}

impl InvocationContext {
    #[must_use]
    pub fn new(
        call_id: u64,
        operation: OperationKind,
        endpoint: impl Into<String>,
        call_timeout_ms: u64,
    ) -> Self {
        Self {
            call_id,
            operation,
            endpoint: endpoint.into(),
            call_timeout_ms,
        }
    }
}

/// One validated request on its way to the transport.
///
/// The request is shared, not owned, so the invoker can still project from
/// it after submission without copying or mutating it.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub ctx: InvocationContext,
    pub request: Arc<OperationRequest>,
}

impl Invocation {
    #[must_use]
    pub const fn ctx(&self) -> &InvocationContext {
        &self.ctx
    }
}

/// Future type returned by every service in the invocation pipeline.
pub type InvocationFuture =
    Pin<Box<dyn Future<Output = Result<OperationResponse, InvocationError>> + Send>>;

/// Errors surfaced to the caller of an invocation.
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error(
        "name resolution failure attempting to reach endpoint {endpoint} for operation {operation}: {detail}"
    )]
    NameResolution {
        operation: OperationKind,
        endpoint: String,
        detail: String,
    },
    /// Transport failure, propagated as the transport reported it.
    #[error(transparent)]
    Transport(TransportError),
    #[error("{operation} was cancelled")]
    Cancelled { operation: OperationKind },
    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: OperationKind,
        timeout_ms: u64,
    },
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl InvocationError {
    /// True for errors raised before any remote call was attempted.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Selector(_))
    }
}
