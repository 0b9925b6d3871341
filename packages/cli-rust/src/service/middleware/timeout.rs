//! Per-call deadline for invocations.
//!
//! The deadline is the invocation's `call_timeout_ms`; `0` means the call may
//! run until the transport or cancellation ends it. An elapsed deadline drops
//! the transport future and yields `InvocationError::Timeout`. No retry.

use std::task::{Context, Poll};
use std::time::Duration;

use comprehend_core::OperationResponse;
use tower::{Layer, Service};

use crate::service::operation::{Invocation, InvocationError, InvocationFuture};

#[derive(Debug, Clone)]
pub struct TimeoutLayer;

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
}

impl<S> Service<Invocation> for TimeoutService<S>
where
    S: Service<Invocation, Response = OperationResponse, Error = InvocationError> + Send,
    S::Future: Send + 'static,
{
    type Response = OperationResponse;
    type Error = InvocationError;
    type Future = InvocationFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, invocation: Invocation) -> Self::Future {
        let ctx = invocation.ctx().clone();
        let fut = self.inner.call(invocation);

        if ctx.call_timeout_ms == 0 {
            return Box::pin(fut);
        }

        Box::pin(async move {
            let deadline = Duration::from_millis(ctx.call_timeout_ms);
            tokio::time::timeout(deadline, fut).await.unwrap_or_else(|_elapsed| {
                tracing::debug!(
                    operation = %ctx.operation,
                    endpoint = %ctx.endpoint,
                    timeout_ms = ctx.call_timeout_ms,
                    "deadline elapsed, dropping call"
                );
                Err(InvocationError::Timeout {
                    operation: ctx.operation,
                    timeout_ms: ctx.call_timeout_ms,
                })
            })
        })
    }
}
