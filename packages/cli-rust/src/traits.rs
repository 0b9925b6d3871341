use async_trait::async_trait;
use comprehend_core::{OperationRequest, OperationResponse, TransportError};

/// Connected client handle that performs one remote operation per call.
///
/// Implementations: the AWS SDK client ([`crate::aws::SdkTransport`]), stubs (tests).
/// A transport is shared by `Arc` across invocations and must tolerate
/// concurrent use. Invokers never close or reconfigure it.
#[async_trait]
pub trait ComprehendTransport: Send + Sync {
    /// Endpoint the transport sends to. Used for diagnostics only.
    fn endpoint(&self) -> &str;

    /// Send one request and wait for its response.
    async fn send(&self, request: &OperationRequest) -> Result<OperationResponse, TransportError>;
}
