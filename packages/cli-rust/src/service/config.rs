/// Invoker-level configuration.
///
/// Controls how the client handle is built and how long a single call may run.
/// `None` fields defer to the AWS SDK's own resolution chain (environment,
/// shared config files, instance metadata).
#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Region to send requests to.
    pub region: Option<String>,
    /// Named profile from the shared AWS config files.
    pub profile: Option<String>,
    /// Endpoint URL override (e.g. a VPC endpoint or local stub).
    pub endpoint_url: Option<String>,
    /// Timeout for a single call in milliseconds. `0` disables the deadline.
    pub call_timeout_ms: u64,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            endpoint_url: None,
            call_timeout_ms: 30_000,
        }
    }
}
