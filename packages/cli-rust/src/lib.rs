//! Comprehend CLI: generic operation invoker over the AWS SDK, with a tower pipeline for
//! cancellation, timeouts, and error translation.

pub mod aws;
pub mod cli;
pub mod service;
pub mod telemetry;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use aws::SdkTransport;
pub use service::{InvocationError, Invoker, InvokerConfig};
pub use traits::ComprehendTransport;
