//! Cancellation middleware for invocations.
//!
//! Refuses to start an invocation once its `CancellationToken` is cancelled,
//! and stops waiting for one that is in flight when cancellation arrives.
//! Whether the remote call itself is aborted depends on the transport:
//! dropping the inner future is all this layer does.

use std::task::{Context, Poll};

use comprehend_core::OperationResponse;
use tokio_util::sync::CancellationToken;
use tower::{Layer, Service};

use crate::service::operation::{Invocation, InvocationError, InvocationFuture};

// ---------------------------------------------------------------------------
// CancelLayer
// ---------------------------------------------------------------------------

/// Tower layer that ties invocations to a shared cancellation token.
#[derive(Debug, Clone)]
pub struct CancelLayer {
    token: CancellationToken,
}

impl CancelLayer {
    #[must_use]
    pub const fn new(token: CancellationToken) -> Self {
        Self { token }
    }
}

impl<S> Layer<S> for CancelLayer {
    type Service = CancelService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CancelService {
            inner,
            token: self.token.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// CancelService
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CancelService<S> {
    inner: S,
    token: CancellationToken,
}

impl<S> Service<Invocation> for CancelService<S>
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
        let operation = invocation.ctx().operation;

        // Do not hand the invocation to the inner service at all once cancelled.
        if self.token.is_cancelled() {
            return Box::pin(async move { Err(InvocationError::Cancelled { operation }) });
        }

        let token = self.token.clone();
        let fut = self.inner.call(invocation);
        Box::pin(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    tracing::debug!(%operation, "cancellation requested, abandoning call");
                    Err(InvocationError::Cancelled { operation })
                }
                result = fut => result,
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use comprehend_core::response::DescribeDatasetResponse;
    use comprehend_core::{OperationKind, OperationRequest};
    use tower::ServiceExt;

    use super::*;
    use crate::service::operation::InvocationContext;

    /// Service that counts calls and sleeps before answering.
    #[derive(Clone)]
    struct CountingService {
        calls: Arc<AtomicU32>,
        delay_ms: u64,
    }

    impl Service<Invocation> for CountingService {
        type Response = OperationResponse;
        type Error = InvocationError;
        type Future = InvocationFuture;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _invocation: Invocation) -> Self::Future {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self.delay_ms;
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(OperationResponse::DescribeDataset(DescribeDatasetResponse::default()))
            })
        }
    }

    fn make_invocation() -> Invocation {
        Invocation {
            ctx: InvocationContext::new(1, OperationKind::DescribeDataset, "https://comprehend.test", 5000),
            request: Arc::new(OperationRequest::empty(OperationKind::DescribeDataset)),
        }
    }

    fn counting(delay_ms: u64) -> (CountingService, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            CountingService {
                calls: Arc::clone(&calls),
                delay_ms,
            },
            calls,
        )
    }

    #[tokio::test]
    async fn passes_through_when_not_cancelled() {
        let (inner, calls) = counting(1);
        let svc = CancelLayer::new(CancellationToken::new()).layer(inner);
        let resp = svc.oneshot(make_invocation()).await.unwrap();
        assert_eq!(resp.kind(), OperationKind::DescribeDataset);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancelled_before_start_never_calls_inner() {
        let (inner, calls) = counting(1);
        let token = CancellationToken::new();
        token.cancel();
        let svc = CancelLayer::new(token).layer(inner);
        let err = svc.oneshot(make_invocation()).await.unwrap_err();
        assert!(matches!(err, InvocationError::Cancelled { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancel_during_call_stops_waiting() {
        let (inner, calls) = counting(5_000);
        let token = CancellationToken::new();
        let svc = CancelLayer::new(token.clone()).layer(inner);

        let handle = tokio::spawn(svc.oneshot(make_invocation()));
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        let err = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, InvocationError::Cancelled { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_after_completion_has_no_effect() {
        let (inner, _calls) = counting(1);
        let token = CancellationToken::new();
        let svc = CancelLayer::new(token.clone()).layer(inner);
        let result = svc.oneshot(make_invocation()).await;
        token.cancel();
        token.cancel();
        assert!(result.is_ok());
    }
}
