//! Error-translation middleware for invocations.
//!
//! Name-resolution failures reported by the transport are re-wrapped with the
//! operation name and the endpoint the call was aimed at. Every other error
//! passes through untouched.

use std::error::Error;
use std::task::{Context, Poll};

use comprehend_core::{OperationResponse, TransportError};
use tower::{Layer, Service};

use crate::service::operation::{Invocation, InvocationError, InvocationFuture};

/// Substrings that identify a host-name lookup failure in an error chain.
///
/// Covers hyper's connector (`dns error`), glibc/musl `getaddrinfo`, macOS,
/// and Windows resolver messages.
const NAME_RESOLUTION_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname provided",
    "no such host is known",
    "temporary failure in name resolution",
    "no address associated with hostname",
];

/// If any error in `err`'s source chain is a name-resolution failure,
/// returns the message of the deepest such error.
#[must_use]
pub fn name_resolution_detail(err: &(dyn Error + 'static)) -> Option<String> {
    let mut found = None;
    let mut current = Some(err);
    while let Some(e) = current {
        let message = e.to_string();
        let lower = message.to_ascii_lowercase();
        if NAME_RESOLUTION_MARKERS.iter().any(|m| lower.contains(m)) {
            found = Some(message);
        }
        current = e.source();
    }
    found
}

// ---------------------------------------------------------------------------
// ResolveErrorsLayer
// ---------------------------------------------------------------------------

/// Tower layer that adds diagnostic context to name-resolution failures.
#[derive(Debug, Clone)]
pub struct ResolveErrorsLayer;

impl<S> Layer<S> for ResolveErrorsLayer {
    type Service = ResolveErrorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ResolveErrorsService { inner }
    }
}

// ---------------------------------------------------------------------------
// ResolveErrorsService
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ResolveErrorsService<S> {
    inner: S,
}

impl<S> Service<Invocation> for ResolveErrorsService<S>
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
        let endpoint = invocation.ctx().endpoint.clone();
        let fut = self.inner.call(invocation);
        Box::pin(async move {
            fut.await.map_err(|err| match err {
                InvocationError::Transport(TransportError::NameResolution { detail }) => {
                    InvocationError::NameResolution {
                        operation,
                        endpoint,
                        detail,
                    }
                }
                other => other,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fmt;
    use std::sync::Arc;

    use comprehend_core::{OperationKind, OperationRequest};
    use tower::ServiceExt;

    use super::*;
    use crate::service::operation::InvocationContext;

    /// Service that always fails with the given transport error.
    struct FailingService(TransportError);

    impl Service<Invocation> for FailingService {
        type Response = OperationResponse;
        type Error = InvocationError;
        type Future = InvocationFuture;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _invocation: Invocation) -> Self::Future {
            let err = self.0.clone();
            Box::pin(async move { Err(InvocationError::Transport(err)) })
        }
    }

    fn make_invocation() -> Invocation {
        Invocation {
            ctx: InvocationContext::new(
                7,
                OperationKind::DescribeEntityRecognizer,
                "https://comprehend.nowhere.invalid",
                5000,
            ),
            request: Arc::new(OperationRequest::empty(OperationKind::DescribeEntityRecognizer)),
        }
    }

    #[derive(Debug)]
    struct Chained {
        message: &'static str,
        source: Option<Box<Chained>>,
    }

    impl fmt::Display for Chained {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl Error for Chained {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.source.as_deref().map(|e| e as &(dyn Error + 'static))
        }
    }

    #[tokio::test]
    async fn name_resolution_is_rewrapped_with_context() {
        let svc = ResolveErrorsLayer.layer(FailingService(TransportError::NameResolution {
            detail: "dns error: failed to lookup address information".to_string(),
        }));
        let err = svc.oneshot(make_invocation()).await.unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, InvocationError::NameResolution { .. }));
        assert!(msg.contains("DescribeEntityRecognizer"));
        assert!(msg.contains("https://comprehend.nowhere.invalid"));
    }

    #[tokio::test]
    async fn service_errors_pass_through_unchanged() {
        let original = TransportError::Service {
            code: "ResourceNotFoundException".to_string(),
            message: "Recognizer not found".to_string(),
        };
        let svc = ResolveErrorsLayer.layer(FailingService(original.clone()));
        let err = svc.oneshot(make_invocation()).await.unwrap_err();
        assert!(matches!(err, InvocationError::Transport(e) if e == original));
    }

    #[test]
    fn detects_dns_failure_deep_in_chain() {
        let err = Chained {
            message: "dispatch failure",
            source: Some(Box::new(Chained {
                message: "io error",
                source: Some(Box::new(Chained {
                    message: "failed to lookup address information: Name or service not known",
                    source: None,
                })),
            })),
        };
        assert_eq!(
            name_resolution_detail(&err).as_deref(),
            Some("failed to lookup address information: Name or service not known")
        );
    }

    #[test]
    fn ignores_other_connect_failures() {
        let err = Chained {
            message: "connection refused",
            source: None,
        };
        assert!(name_resolution_detail(&err).is_none());
    }

    #[derive(Debug)]
    struct Message(String);

    impl fmt::Display for Message {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl Error for Message {}

    proptest::proptest! {
        #[test]
        fn marker_is_found_anywhere_in_message(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
            let err = Message(format!("{prefix}DNS error{suffix}"));
            proptest::prop_assert_eq!(name_resolution_detail(&err), Some(err.0.clone()));
        }

        #[test]
        fn digits_never_classify(message in "[0-9 :.]{0,40}") {
            proptest::prop_assert!(name_resolution_detail(&Message(message)).is_none());
        }
    }
}
