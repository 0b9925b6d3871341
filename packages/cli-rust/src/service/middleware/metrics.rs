//! Metrics middleware for invocations.
//!
//! Sits outermost in the pipeline so every invocation, including one refused
//! or abandoned by cancellation, gets a span with its duration and outcome and
//! exactly one completion event.

use std::task::{Context, Poll};
use std::time::Instant;

use comprehend_core::{OperationResponse, TransportError};
use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::service::operation::{Invocation, InvocationError, InvocationFuture};

/// Outcome label recorded on the invocation span.
fn outcome_label(result: &Result<OperationResponse, InvocationError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(InvocationError::Cancelled { .. }) => "cancelled",
        Err(InvocationError::Timeout { .. }) => "timeout",
        Err(InvocationError::NameResolution { .. }) => "name_resolution",
        Err(InvocationError::Transport(TransportError::Service { .. })) => "service_error",
        Err(_) => "error",
    }
}

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

/// Records one span and one completion event per invocation.
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

impl<S> Service<Invocation> for MetricsService<S>
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
        let ctx = invocation.ctx();
        let operation = ctx.operation.api_name();
        let call_id = ctx.call_id;
        let span = info_span!(
            "invocation",
            operation,
            call_id,
            endpoint = %ctx.endpoint,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        let fut = self.inner.call(invocation);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;

                #[allow(clippy::cast_possible_truncation)]
                let duration_ms = start.elapsed().as_millis() as u64;
                let outcome = outcome_label(&result);
                let span = tracing::Span::current();
                span.record("duration_ms", duration_ms);
                span.record("outcome", outcome);

                match &result {
                    Ok(_) => tracing::info!(operation, call_id, duration_ms, outcome, "invocation complete"),
                    // Requested by the caller, not a fault.
                    Err(InvocationError::Cancelled { .. }) => {
                        tracing::info!(operation, call_id, duration_ms, outcome, "invocation cancelled");
                    }
                    Err(e) => tracing::warn!(
                        operation,
                        call_id,
                        duration_ms,
                        outcome,
                        error = %e,
                        "invocation failed"
                    ),
                }

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use comprehend_core::response::DetectDominantLanguageResponse;
    use comprehend_core::{OperationKind, OperationRequest};
    use tower::ServiceExt;
    use tracing_subscriber::EnvFilter;

    use super::*;
    use crate::service::operation::InvocationContext;
    use crate::test_support::CapturedLogs;

    /// Completes immediately with the given result.
    struct ImmediateService(Option<InvocationError>);

    impl Service<Invocation> for ImmediateService {
        type Response = OperationResponse;
        type Error = InvocationError;
        type Future = InvocationFuture;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _invocation: Invocation) -> Self::Future {
            let err = self.0.take();
            Box::pin(async move {
                match err {
                    Some(e) => Err(e),
                    None => Ok(OperationResponse::DetectDominantLanguage(
                        DetectDominantLanguageResponse::default(),
                    )),
                }
            })
        }
    }

    fn make_invocation() -> Invocation {
        Invocation {
            ctx: InvocationContext::new(
                42,
                OperationKind::DetectDominantLanguage,
                "https://comprehend.test",
                5000,
            ),
            request: Arc::new(OperationRequest::empty(OperationKind::DetectDominantLanguage)),
        }
    }

    #[tokio::test]
    async fn passes_through_response_and_logs_completion() {
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber(EnvFilter::new("info")));

        let resp = MetricsLayer
            .layer(ImmediateService(None))
            .oneshot(make_invocation())
            .await
            .unwrap();
        assert_eq!(resp.kind(), OperationKind::DetectDominantLanguage);

        let out = logs.contents();
        assert!(out.contains("invocation complete"), "{out}");
        assert!(out.contains("call_id=42"), "{out}");
    }

    #[tokio::test]
    async fn failure_is_logged_with_error() {
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber(EnvFilter::new("info")));

        let err = InvocationError::Transport(TransportError::Other("connection reset".to_string()));
        let result = MetricsLayer
            .layer(ImmediateService(Some(err)))
            .oneshot(make_invocation())
            .await;
        assert!(result.is_err());

        let out = logs.contents();
        assert!(out.contains("invocation failed"), "{out}");
        assert!(out.contains("connection reset"), "{out}");
    }

    #[test]
    fn outcome_labels() {
        let operation = OperationKind::DescribeFlywheel;
        let cases = [
            (InvocationError::Cancelled { operation }, "cancelled"),
            (
                InvocationError::Timeout {
                    operation,
                    timeout_ms: 1,
                },
                "timeout",
            ),
            (
                InvocationError::NameResolution {
                    operation,
                    endpoint: "https://x".to_string(),
                    detail: "dns error".to_string(),
                },
                "name_resolution",
            ),
            (
                InvocationError::Transport(TransportError::Service {
                    code: "ThrottlingException".to_string(),
                    message: String::new(),
                }),
                "service_error",
            ),
            (
                InvocationError::Transport(TransportError::Other("x".to_string())),
                "error",
            ),
        ];
        for (err, label) in cases {
            assert_eq!(outcome_label(&Err(err)), label);
        }
        let ok = OperationResponse::DetectDominantLanguage(DetectDominantLanguageResponse::default());
        assert_eq!(outcome_label(&Ok(ok)), "ok");
    }
}
