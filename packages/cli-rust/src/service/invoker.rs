//! The operation invoker: one validated request in, one outcome out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use comprehend_core::{InvocationOutcome, OperationKind, OperationRequest, Projection};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use super::config::InvokerConfig;
use super::middleware::build_invocation_pipeline;
use super::operation::{Invocation, InvocationContext, InvocationError};
use crate::traits::ComprehendTransport;

// ---------------------------------------------------------------------------
// Invoker
// ---------------------------------------------------------------------------

/// Executes Comprehend operations through a shared transport.
///
/// Each call to [`Invoker::invoke`] validates the request, runs it through the
/// invocation pipeline exactly once, and projects the response. The invoker
/// owns one cancellation token: once it is cancelled, in-flight calls stop
/// waiting and no further invocation starts. The transport is borrowed
/// through an `Arc` and never closed or reconfigured here.
pub struct Invoker<T: ComprehendTransport + ?Sized> {
    transport: Arc<T>,
    config: Arc<InvokerConfig>,
    cancel: CancellationToken,
    call_id_counter: AtomicU64,
}

impl<T> Invoker<T>
where
    T: ComprehendTransport + ?Sized + 'static,
{
    #[must_use]
    pub fn new(transport: Arc<T>, config: Arc<InvokerConfig>) -> Self {
        Self {
            transport,
            config,
            cancel: CancellationToken::new(),
            call_id_counter: AtomicU64::new(1),
        }
    }

    /// Use an externally owned token (e.g. a child of a process-wide one).
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle to this invoker's cancellation token.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Request cancellation. Repeated calls are no-ops.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Endpoint of the underlying transport.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    fn next_call_id(&self) -> u64 {
        self.call_id_counter.fetch_add(1, Ordering::Relaxed)
    }

    fn make_ctx(&self, operation: OperationKind) -> InvocationContext {
        InvocationContext::new(
            self.next_call_id(),
            operation,
            self.transport.endpoint(),
            self.config.call_timeout_ms,
        )
    }

    /// Invoke the operation `request` targets and project its response.
    ///
    /// Validation failures are reported without any remote call. Every other
    /// failure comes from the single attempt made through the pipeline.
    pub async fn invoke(
        &self,
        request: OperationRequest,
        projection: &Projection,
    ) -> InvocationOutcome<InvocationError> {
        self.run(request, projection).await.into()
    }

    /// Like [`Invoker::invoke`], resolving a selector string first.
    ///
    /// An unresolvable selector fails before any remote call.
    pub async fn invoke_with_selector(
        &self,
        request: OperationRequest,
        selector: Option<&str>,
    ) -> InvocationOutcome<InvocationError> {
        match Projection::parse(request.kind(), selector) {
            Ok(projection) => self.invoke(request, &projection).await,
            Err(e) => InvocationOutcome::Failure(e.into()),
        }
    }

    async fn run(
        &self,
        request: OperationRequest,
        projection: &Projection,
    ) -> Result<(serde_json::Value, comprehend_core::OperationResponse), InvocationError> {
        // A cancelled invoker starts nothing and leaves its counter untouched.
        if self.cancel.is_cancelled() {
            return Err(InvocationError::Cancelled {
                operation: request.kind(),
            });
        }
        request.validate()?;

        let ctx = self.make_ctx(request.kind());
        let request = Arc::new(request);
        let invocation = Invocation {
            ctx,
            request: Arc::clone(&request),
        };

        let pipeline = build_invocation_pipeline(Arc::clone(&self.transport), self.cancel.clone());
        let raw = pipeline.oneshot(invocation).await?;

        let body = raw
            .to_json()
            .map_err(|e| InvocationError::Internal(anyhow::Error::new(e).context("encoding response")))?;
        let projected = projection.apply(&body, &request);
        Ok((projected, raw))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    use async_trait::async_trait;
    use comprehend_core::response::{
        DatasetProperties, DescribeDatasetResponse, DetectDominantLanguageResponse,
        DominantLanguage,
    };
    use comprehend_core::{OperationResponse, RequestBuilder, TransportError};
    use serde_json::json;

    use super::*;

    /// Scripted transport: answers by operation, counts calls.
    struct ScriptedTransport {
        calls: AtomicU32,
        delay_ms: u64,
        error: Option<TransportError>,
    }

    impl ScriptedTransport {
        fn ok() -> Self {
            Self {
                calls: AtomicU32::new(0),
                delay_ms: 0,
                error: None,
            }
        }

        fn failing(error: TransportError) -> Self {
            Self {
                error: Some(error),
                ..Self::ok()
            }
        }

        fn slow(delay_ms: u64) -> Self {
            Self {
                delay_ms,
                ..Self::ok()
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ComprehendTransport for ScriptedTransport {
        fn endpoint(&self) -> &str {
            "https://comprehend.eu-west-1.amazonaws.com"
        }

        async fn send(
            &self,
            request: &OperationRequest,
        ) -> Result<OperationResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if let Some(e) = &self.error {
                return Err(e.clone());
            }
            Ok(match request.kind() {
                OperationKind::DetectDominantLanguage => {
                    OperationResponse::DetectDominantLanguage(DetectDominantLanguageResponse {
                        languages: vec![DominantLanguage {
                            language_code: Some("es".to_string()),
                            score: Some(0.99),
                        }],
                    })
                }
                _ => OperationResponse::DescribeDataset(DescribeDatasetResponse {
                    dataset_properties: Some(DatasetProperties {
                        dataset_arn: request.field("DatasetArn").map(str::to_string),
                        status: Some("COMPLETED".to_string()),
                        ..DatasetProperties::default()
                    }),
                }),
            })
        }
    }

    fn invoker(transport: &Arc<ScriptedTransport>) -> Invoker<ScriptedTransport> {
        Invoker::new(Arc::clone(transport), Arc::new(InvokerConfig::default()))
    }

    fn language_request() -> OperationRequest {
        RequestBuilder::new(OperationKind::DetectDominantLanguage)
            .set("Text", "Hola, ¿cómo estás?")
            .unwrap()
            .build()
            .unwrap()
    }

    fn dataset_request() -> OperationRequest {
        RequestBuilder::new(OperationKind::DescribeDataset)
            .set("DatasetArn", "arn:aws:comprehend:eu-west-1:123456789012:dataset/x")
            .unwrap()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn detect_language_projects_languages() {
        let transport = Arc::new(ScriptedTransport::ok());
        let outcome = invoker(&transport)
            .invoke(language_request(), &Projection::Primary)
            .await;
        let (projected, raw) = outcome.into_result().unwrap();
        let languages = projected.as_array().unwrap();
        assert!(!languages.is_empty());
        assert_eq!(languages[0]["LanguageCode"], json!("es"));
        assert_eq!(raw.kind(), OperationKind::DetectDominantLanguage);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn service_failure_is_carried_unmodified() {
        let original = TransportError::Service {
            code: "ResourceNotFoundException".to_string(),
            message: "Could not find dataset x".to_string(),
        };
        let transport = Arc::new(ScriptedTransport::failing(original.clone()));
        let outcome = invoker(&transport)
            .invoke(dataset_request(), &Projection::Primary)
            .await;
        assert!(matches!(
            outcome,
            InvocationOutcome::Failure(InvocationError::Transport(ref e)) if *e == original
        ));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn missing_required_field_makes_no_call() {
        let transport = Arc::new(ScriptedTransport::ok());
        let outcome = invoker(&transport)
            .invoke(
                OperationRequest::empty(OperationKind::DescribeDataset),
                &Projection::Primary,
            )
            .await;
        assert!(matches!(
            outcome,
            InvocationOutcome::Failure(InvocationError::Validation(_))
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn whole_response_projection_equals_raw() {
        let transport = Arc::new(ScriptedTransport::ok());
        let outcome = invoker(&transport)
            .invoke(dataset_request(), &Projection::WholeResponse)
            .await;
        let (projected, raw) = outcome.into_result().unwrap();
        assert_eq!(projected, raw.to_json().unwrap());
    }

    #[tokio::test]
    async fn echo_projection_returns_bound_parameter() {
        let transport = Arc::new(ScriptedTransport::ok());
        let outcome = invoker(&transport)
            .invoke_with_selector(dataset_request(), Some("^DatasetArn"))
            .await;
        assert_eq!(
            outcome.projected(),
            Some(&json!("arn:aws:comprehend:eu-west-1:123456789012:dataset/x"))
        );
    }

    #[tokio::test]
    async fn bad_selector_fails_before_any_call() {
        let transport = Arc::new(ScriptedTransport::ok());
        let outcome = invoker(&transport)
            .invoke_with_selector(dataset_request(), Some("Languages"))
            .await;
        assert!(matches!(
            outcome,
            InvocationOutcome::Failure(InvocationError::Selector(_))
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn dns_failure_names_operation_and_endpoint() {
        let transport = Arc::new(ScriptedTransport::failing(TransportError::NameResolution {
            detail: "dns error: failed to lookup address information".to_string(),
        }));
        let outcome = invoker(&transport)
            .invoke(dataset_request(), &Projection::Primary)
            .await;
        let msg = outcome.error().unwrap().to_string();
        assert!(msg.contains("DescribeDataset"));
        assert!(msg.contains("https://comprehend.eu-west-1.amazonaws.com"));
    }

    #[tokio::test]
    async fn cancelled_invoker_starts_no_calls() {
        let transport = Arc::new(ScriptedTransport::ok());
        let invoker = invoker(&transport);
        invoker.cancel();
        invoker.cancel();
        let outcome = invoker.invoke(dataset_request(), &Projection::Primary).await;
        assert!(matches!(
            outcome,
            InvocationOutcome::Failure(InvocationError::Cancelled {
                operation: OperationKind::DescribeDataset
            })
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn cancel_during_call_yields_cancelled() {
        let transport = Arc::new(ScriptedTransport::slow(5_000));
        let invoker = Arc::new(invoker(&transport));
        let token = invoker.cancellation_token();

        let task = tokio::spawn({
            let invoker = Arc::clone(&invoker);
            async move { invoker.invoke(dataset_request(), &Projection::Primary).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();

        let outcome = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(
            outcome,
            InvocationOutcome::Failure(InvocationError::Cancelled { .. })
        ));
    }

    #[tokio::test]
    async fn cancel_after_completion_keeps_outcome() {
        let transport = Arc::new(ScriptedTransport::ok());
        let invoker = invoker(&transport);
        let outcome = invoker.invoke(dataset_request(), &Projection::Primary).await;
        invoker.cancel();
        assert!(outcome.is_success());
        assert_eq!(
            outcome.projected().unwrap()["Status"],
            json!("COMPLETED")
        );
    }

    #[tokio::test]
    async fn timeout_comes_from_config() {
        let transport = Arc::new(ScriptedTransport::slow(500));
        let config = InvokerConfig {
            call_timeout_ms: 20,
            ..InvokerConfig::default()
        };
        let invoker = Invoker::new(Arc::clone(&transport), Arc::new(config));
        let outcome = invoker.invoke(dataset_request(), &Projection::Primary).await;
        assert!(matches!(
            outcome,
            InvocationOutcome::Failure(InvocationError::Timeout { timeout_ms: 20, .. })
        ));
    }

    #[tokio::test]
    async fn shared_transport_serves_many_invokers() {
        let transport = Arc::new(ScriptedTransport::ok());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let invoker = invoker(&transport);
                tokio::spawn(async move {
                    invoker.invoke(dataset_request(), &Projection::Primary).await.is_success()
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(transport.calls(), 4);
    }

    #[tokio::test]
    async fn call_ids_are_unique_per_invoker() {
        let transport = Arc::new(ScriptedTransport::ok());
        let invoker = invoker(&transport);
        let a = invoker.make_ctx(OperationKind::DescribeDataset).call_id;
        let b = invoker.make_ctx(OperationKind::DescribeDataset).call_id;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn cancelled_invoker_leaves_call_counter_untouched() {
        let transport = Arc::new(ScriptedTransport::ok());
        let invoker = invoker(&transport);
        invoker.cancel();
        let before = invoker.call_id_counter.load(Ordering::SeqCst);
        for _ in 0..3 {
            let outcome = invoker.invoke(dataset_request(), &Projection::Primary).await;
            assert!(matches!(
                outcome,
                InvocationOutcome::Failure(InvocationError::Cancelled { .. })
            ));
        }
        assert_eq!(invoker.call_id_counter.load(Ordering::SeqCst), before);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn cancellation_wins_over_validation() {
        let transport = Arc::new(ScriptedTransport::ok());
        let invoker = invoker(&transport);
        invoker.cancel();
        let outcome = invoker
            .invoke(
                OperationRequest::empty(OperationKind::DescribeFlywheel),
                &Projection::Primary,
            )
            .await;
        assert!(matches!(
            outcome,
            InvocationOutcome::Failure(InvocationError::Cancelled {
                operation: OperationKind::DescribeFlywheel
            })
        ));
    }
}
