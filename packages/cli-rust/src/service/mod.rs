//! Operation invocation framework.
//!
//! This module implements the invocation pipeline:
//!
//! 1. **Invoker** (`invoker`): validates a request, assigns a call ID, projects the response
//! 2. **Middleware** (`middleware`): Tower layers (cancellation, metrics, timeout, error translation)
//! 3. **Dispatch** (`dispatch`): Hands the invocation to the shared transport
//! 4. **Configuration** (`config`): Client and timeout settings

pub mod config;
pub mod dispatch;
pub mod invoker;
pub mod middleware;
pub mod operation;

// Re-export key types for convenient access.
pub use config::InvokerConfig;
pub use dispatch::TransportService;
pub use invoker::Invoker;
pub use operation::{Invocation, InvocationContext, InvocationError, InvocationFuture};
