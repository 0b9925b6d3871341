//! Pipeline composition: combines all middleware layers into a single service stack.

use std::sync::Arc;

use comprehend_core::OperationResponse;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;

use super::cancel::CancelLayer;
use super::metrics::MetricsLayer;
use super::resolve::ResolveErrorsLayer;
use super::timeout::TimeoutLayer;
use crate::service::dispatch::TransportService;
use crate::service::operation::{Invocation, InvocationError, InvocationFuture};
use crate::traits::ComprehendTransport;

/// Build the invocation pipeline around a shared transport.
///
/// Layer order (outermost to innermost):
/// 1. `MetricsLayer` -- record timing and outcome, including cancellations
/// 2. `CancelLayer` -- refuse or abandon the call once cancelled
/// 3. `TimeoutLayer` -- enforce the per-invocation timeout
/// 4. `ResolveErrorsLayer` -- add endpoint/operation context to DNS failures
///
/// The returned service implements `tower::Service<Invocation>`.
#[must_use]
pub fn build_invocation_pipeline<T>(
    transport: Arc<T>,
    cancel: CancellationToken,
) -> impl tower::Service<
    Invocation,
    Response = OperationResponse,
    Error = InvocationError,
    Future = InvocationFuture,
> + Send
where
    T: ComprehendTransport + ?Sized + 'static,
{
    ServiceBuilder::new()
        .layer(MetricsLayer)
        .layer(CancelLayer::new(cancel))
        .layer(TimeoutLayer)
        .layer(ResolveErrorsLayer)
        .service(TransportService::new(transport))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
