//! Tower middleware layers for the invocation pipeline.
//!
//! - [`cancel`]: Cooperative cancellation via `CancellationToken`
//! - [`metrics`]: Invocation timing and outcome via `tracing` spans
//! - [`timeout`]: Per-invocation timeout enforcement
//! - [`resolve`]: Diagnostic context for name-resolution failures
//! - [`pipeline`]: Composes all layers into a single service stack

pub mod cancel;
pub mod metrics;
pub mod pipeline;
pub mod resolve;
pub mod timeout;

pub use cancel::CancelLayer;
pub use metrics::MetricsLayer;
pub use pipeline::build_invocation_pipeline;
pub use resolve::{name_resolution_detail, ResolveErrorsLayer};
pub use timeout::TimeoutLayer;
