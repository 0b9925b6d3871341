//! Innermost pipeline service: hands an `Invocation` to the transport.

use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;

use super::operation::{Invocation, InvocationError, InvocationFuture};
use crate::traits::ComprehendTransport;

// ---------------------------------------------------------------------------
// TransportService
// ---------------------------------------------------------------------------

/// Sends each `Invocation` through a shared `ComprehendTransport`.
///
/// Transport errors are wrapped unchanged in `InvocationError::Transport`;
/// translating them is left to the layers above.
pub struct TransportService<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> TransportService<T> {
    #[must_use]
    pub const fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }
}

impl<T: ?Sized> Clone for TransportService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> Service<Invocation> for TransportService<T>
where
    T: ComprehendTransport + ?Sized + 'static,
{
    type Response = comprehend_core::OperationResponse;
    type Error = InvocationError;
    type Future = InvocationFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, invocation: Invocation) -> Self::Future {
        let transport = Arc::clone(&self.transport);
        Box::pin(async move {
            transport
                .send(&invocation.request)
                .await
                .map_err(InvocationError::Transport)
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
