//! Command-line surface: one subcommand per operation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use comprehend_core::{
    OperationKind, OperationRequest, Projection, RequestBuilder, SelectorError, ValidationError,
};

use crate::aws::SdkTransport;
use crate::service::{InvocationError, Invoker, InvokerConfig};
use crate::telemetry::LogFormat;

/// Exit status for validation and selector failures.
const EXIT_USAGE: u8 = 2;
/// Exit status after an interrupt (128 + SIGINT).
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "comprehend", version, about = "Invoke Amazon Comprehend operations")]
pub struct Cli {
    /// AWS region to send requests to.
    #[arg(long, global = true, env = "COMPREHEND_REGION")]
    pub region: Option<String>,
    /// Named profile from the shared AWS config files.
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,
    /// Endpoint URL override.
    #[arg(long, global = true, env = "COMPREHEND_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
    /// Per-call timeout in milliseconds; 0 disables it.
    #[arg(long, global = true, env = "COMPREHEND_TIMEOUT_MS", default_value_t = 30_000)]
    pub timeout_ms: u64,
    /// Output selector: `*`, a response field name, or `^Parameter`.
    #[arg(long, global = true)]
    pub select: Option<String>,
    /// Read request parameters from a JSON document.
    #[arg(long, global = true, value_name = "FILE")]
    pub cli_input_json: Option<PathBuf>,
    /// Bind a request parameter by name. May be repeated.
    #[arg(long = "param", global = true, value_name = "NAME=VALUE")]
    pub params: Vec<String>,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Determine the dominant language of a text.
    DetectDominantLanguage {
        #[arg(long)]
        text: Option<String>,
    },
    /// Describe a flywheel dataset.
    DescribeDataset {
        #[arg(long)]
        dataset_arn: Option<String>,
    },
    /// Describe a document classifier.
    DescribeDocumentClassifier {
        #[arg(long)]
        document_classifier_arn: Option<String>,
    },
    /// Describe an entity recognizer.
    DescribeEntityRecognizer {
        #[arg(long)]
        entity_recognizer_arn: Option<String>,
    },
    /// Describe a flywheel.
    DescribeFlywheel {
        #[arg(long)]
        flywheel_arn: Option<String>,
    },
    /// Describe a targeted sentiment detection job.
    DescribeTargetedSentimentDetectionJob {
        #[arg(long)]
        job_id: Option<String>,
    },
}

impl Command {
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::DetectDominantLanguage { .. } => OperationKind::DetectDominantLanguage,
            Self::DescribeDataset { .. } => OperationKind::DescribeDataset,
            Self::DescribeDocumentClassifier { .. } => OperationKind::DescribeDocumentClassifier,
            Self::DescribeEntityRecognizer { .. } => OperationKind::DescribeEntityRecognizer,
            Self::DescribeFlywheel { .. } => OperationKind::DescribeFlywheel,
            Self::DescribeTargetedSentimentDetectionJob { .. } => {
                OperationKind::DescribeTargetedSentimentDetectionJob
            }
        }
    }

    /// Flag values keyed by request field name.
    fn bindings(&self) -> (&'static str, Option<&String>) {
        match self {
            Self::DetectDominantLanguage { text } => ("Text", text.as_ref()),
            Self::DescribeDataset { dataset_arn } => ("DatasetArn", dataset_arn.as_ref()),
            Self::DescribeDocumentClassifier {
                document_classifier_arn,
            } => ("DocumentClassifierArn", document_classifier_arn.as_ref()),
            Self::DescribeEntityRecognizer {
                entity_recognizer_arn,
            } => ("EntityRecognizerArn", entity_recognizer_arn.as_ref()),
            Self::DescribeFlywheel { flywheel_arn } => ("FlywheelArn", flywheel_arn.as_ref()),
            Self::DescribeTargetedSentimentDetectionJob { job_id } => ("JobId", job_id.as_ref()),
        }
    }
}

impl Cli {
    #[must_use]
    pub fn invoker_config(&self) -> InvokerConfig {
        InvokerConfig {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
            call_timeout_ms: self.timeout_ms,
        }
    }

    /// Bind the request: input document first, then `--param`, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the input document cannot be read, or a
    /// `ValidationError` if binding or validation fails.
    pub fn build_request(&self) -> anyhow::Result<OperationRequest> {
        let kind = self.command.kind();
        let mut builder = match &self.cli_input_json {
            Some(path) => RequestBuilder::from_request(read_input_document(kind, path)?),
            None => RequestBuilder::new(kind),
        };
        for pair in &self.params {
            builder = builder.bind_pair(pair)?;
        }
        let (name, value) = self.command.bindings();
        builder = builder.set_opt(name, value.cloned())?;
        Ok(builder.build()?)
    }
}

fn read_input_document(kind: OperationKind, path: &Path) -> anyhow::Result<OperationRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading input document {}", path.display()))?;
    let document = serde_json::from_str(&raw).map_err(|e| ValidationError::InvalidDocument {
        operation: kind,
        reason: e.to_string(),
    })?;
    Ok(OperationRequest::from_json(kind, document)?)
}

/// Map a failure to the process exit status.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(invocation) = err.downcast_ref::<InvocationError>() {
        return match invocation {
            InvocationError::Cancelled { .. } => EXIT_CANCELLED,
            e if e.is_precondition() => EXIT_USAGE,
            _ => 1,
        };
    }
    if err.downcast_ref::<ValidationError>().is_some()
        || err.downcast_ref::<SelectorError>().is_some()
    {
        return EXIT_USAGE;
    }
    1
}

async fn execute(cli: Cli) -> anyhow::Result<String> {
    let request = cli.build_request()?;
    let projection = Projection::parse(request.kind(), cli.select.as_deref())?;

    let config = Arc::new(cli.invoker_config());
    let transport = Arc::new(SdkTransport::from_config(&config).await);
    let invoker = Invoker::new(transport, config);

    let token = invoker.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling");
            token.cancel();
        }
    });

    let outcome = invoker.invoke(request, &projection).await;
    interrupt.abort();

    let (projected, _raw) = outcome.into_result()?;
    Ok(serde_json::to_string_pretty(&projected)?)
}

/// Run one invocation, printing the projected value to stdout.
pub async fn run(cli: Cli) -> ExitCode {
    match execute(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
