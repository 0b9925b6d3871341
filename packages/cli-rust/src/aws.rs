//! AWS SDK transport.
//!
//! Builds a Comprehend client from the shared AWS configuration chain and maps
//! SDK outputs into the crate's response records. Errors are classified once:
//! service errors keep their code and message, DNS failures are flagged so the
//! pipeline can add endpoint context, everything else keeps its full context.

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_comprehend::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_comprehend::primitives::{DateTime, DateTimeFormat};
use aws_sdk_comprehend::types as sdk;
use aws_sdk_comprehend::Client;
use comprehend_core::request::OperationRequest;
use comprehend_core::response::{
    ClassifierInputDataConfig, ClassifierMetadata, ClassifierOutputDataConfig, DatasetProperties,
    DescribeDatasetResponse, DescribeDocumentClassifierResponse, DescribeEntityRecognizerResponse,
    DescribeFlywheelResponse, DescribeTargetedSentimentDetectionJobResponse,
    DetectDominantLanguageResponse, DocumentClassifierProperties, DominantLanguage,
    EntityRecognizerProperties, EvaluationMetrics, FlywheelProperties, RecognizerMetadata,
    TargetedSentimentDetectionJobProperties, VpcConfig,
};
use comprehend_core::{OperationResponse, TransportError};

use crate::service::config::InvokerConfig;
use crate::service::middleware::name_resolution_detail;
use crate::traits::ComprehendTransport;

// ---------------------------------------------------------------------------
// SdkTransport
// ---------------------------------------------------------------------------

/// `ComprehendTransport` backed by `aws_sdk_comprehend::Client`.
#[derive(Debug, Clone)]
pub struct SdkTransport {
    client: Client,
    endpoint: String,
}

impl SdkTransport {
    /// Load the AWS configuration chain, applying any overrides in `config`.
    pub async fn from_config(config: &InvokerConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(url) = &config.endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;
        Self::new(&sdk_config)
    }

    /// Build a transport from an already loaded `SdkConfig`.
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        let endpoint = endpoint_for(
            sdk_config.endpoint_url(),
            sdk_config.region().map(|r| r.as_ref()),
        );
        tracing::debug!(%endpoint, "comprehend client configured");
        Self {
            client: Client::new(sdk_config),
            endpoint,
        }
    }
}

/// Endpoint used in diagnostics: the override if set, else the regional default.
fn endpoint_for(endpoint_url: Option<&str>, region: Option<&str>) -> String {
    match (endpoint_url, region) {
        (Some(url), _) => url.to_string(),
        (None, Some(region)) if region.starts_with("cn-") => {
            format!("https://comprehend.{region}.amazonaws.com.cn")
        }
        (None, Some(region)) => format!("https://comprehend.{region}.amazonaws.com"),
        (None, None) => "https://comprehend.<unresolved-region>.amazonaws.com".to_string(),
    }
}

#[async_trait]
impl ComprehendTransport for SdkTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &OperationRequest) -> Result<OperationResponse, TransportError> {
        match request {
            OperationRequest::DetectDominantLanguage(r) => {
                let out = self
                    .client
                    .detect_dominant_language()
                    .set_text(r.text.clone())
                    .send()
                    .await
                    .map_err(classify_sdk_error)?;
                Ok(OperationResponse::DetectDominantLanguage(
                    DetectDominantLanguageResponse {
                        languages: out.languages().iter().map(dominant_language).collect(),
                    },
                ))
            }
            OperationRequest::DescribeDataset(r) => {
                let out = self
                    .client
                    .describe_dataset()
                    .set_dataset_arn(r.dataset_arn.clone())
                    .send()
                    .await
                    .map_err(classify_sdk_error)?;
                Ok(OperationResponse::DescribeDataset(DescribeDatasetResponse {
                    dataset_properties: out.dataset_properties().map(dataset_properties),
                }))
            }
            OperationRequest::DescribeDocumentClassifier(r) => {
                let out = self
                    .client
                    .describe_document_classifier()
                    .set_document_classifier_arn(r.document_classifier_arn.clone())
                    .send()
                    .await
                    .map_err(classify_sdk_error)?;
                Ok(OperationResponse::DescribeDocumentClassifier(
                    DescribeDocumentClassifierResponse {
                        document_classifier_properties: out
                            .document_classifier_properties()
                            .map(document_classifier_properties),
                    },
                ))
            }
            OperationRequest::DescribeEntityRecognizer(r) => {
                let out = self
                    .client
                    .describe_entity_recognizer()
                    .set_entity_recognizer_arn(r.entity_recognizer_arn.clone())
                    .send()
                    .await
                    .map_err(classify_sdk_error)?;
                Ok(OperationResponse::DescribeEntityRecognizer(
                    DescribeEntityRecognizerResponse {
                        entity_recognizer_properties: out
                            .entity_recognizer_properties()
                            .map(entity_recognizer_properties),
                    },
                ))
            }
            OperationRequest::DescribeFlywheel(r) => {
                let out = self
                    .client
                    .describe_flywheel()
                    .set_flywheel_arn(r.flywheel_arn.clone())
                    .send()
                    .await
                    .map_err(classify_sdk_error)?;
                Ok(OperationResponse::DescribeFlywheel(DescribeFlywheelResponse {
                    flywheel_properties: out.flywheel_properties().map(flywheel_properties),
                }))
            }
            OperationRequest::DescribeTargetedSentimentDetectionJob(r) => {
                let out = self
                    .client
                    .describe_targeted_sentiment_detection_job()
                    .set_job_id(r.job_id.clone())
                    .send()
                    .await
                    .map_err(classify_sdk_error)?;
                Ok(OperationResponse::DescribeTargetedSentimentDetectionJob(
                    DescribeTargetedSentimentDetectionJobResponse {
                        targeted_sentiment_detection_job_properties: out
                            .targeted_sentiment_detection_job_properties()
                            .map(targeted_sentiment_job_properties),
                    },
                ))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> TransportError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    if let Some(service_err) = err.as_service_error() {
        return TransportError::Service {
            code: service_err.code().unwrap_or("Unknown").to_string(),
            message: service_err.message().unwrap_or_default().to_string(),
        };
    }
    if let Some(detail) = name_resolution_detail(&err) {
        return TransportError::NameResolution { detail };
    }
    TransportError::Other(DisplayErrorContext(&err).to_string())
}

// ---------------------------------------------------------------------------
// Output mapping
// ---------------------------------------------------------------------------

fn text(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn name<T: AsRef<str>>(value: Option<&T>) -> Option<String> {
    value.map(|v| v.as_ref().to_string())
}

fn time(value: Option<&DateTime>) -> Option<String> {
    value.and_then(|t| t.fmt(DateTimeFormat::DateTime).ok())
}

fn vpc_config(vpc: &sdk::VpcConfig) -> VpcConfig {
    VpcConfig {
        security_group_ids: vpc.security_group_ids().to_vec(),
        subnets: vpc.subnets().to_vec(),
    }
}

fn dominant_language(lang: &sdk::DominantLanguage) -> DominantLanguage {
    DominantLanguage {
        language_code: text(lang.language_code()),
        score: lang.score(),
    }
}

fn dataset_properties(p: &sdk::DatasetProperties) -> DatasetProperties {
    DatasetProperties {
        dataset_arn: text(p.dataset_arn()),
        dataset_name: text(p.dataset_name()),
        dataset_type: name(p.dataset_type()),
        dataset_s3_uri: text(p.dataset_s3_uri()),
        description: text(p.description()),
        status: name(p.status()),
        message: text(p.message()),
        number_of_documents: p.number_of_documents(),
        creation_time: time(p.creation_time()),
        end_time: time(p.end_time()),
    }
}

fn document_classifier_properties(
    p: &sdk::DocumentClassifierProperties,
) -> DocumentClassifierProperties {
    DocumentClassifierProperties {
        document_classifier_arn: text(p.document_classifier_arn()),
        language_code: name(p.language_code()),
        status: name(p.status()),
        message: text(p.message()),
        submit_time: time(p.submit_time()),
        end_time: time(p.end_time()),
        training_start_time: time(p.training_start_time()),
        training_end_time: time(p.training_end_time()),
        input_data_config: p.input_data_config().map(|c| ClassifierInputDataConfig {
            s3_uri: text(c.s3_uri()),
            data_format: name(c.data_format()),
        }),
        output_data_config: p.output_data_config().map(|c| ClassifierOutputDataConfig {
            s3_uri: text(c.s3_uri()),
            kms_key_id: text(c.kms_key_id()),
        }),
        classifier_metadata: p.classifier_metadata().map(|m| ClassifierMetadata {
            number_of_labels: m.number_of_labels(),
            number_of_trained_documents: m.number_of_trained_documents(),
            number_of_test_documents: m.number_of_test_documents(),
            evaluation_metrics: m.evaluation_metrics().map(|e| EvaluationMetrics {
                accuracy: e.accuracy(),
                precision: e.precision(),
                recall: e.recall(),
                f1_score: e.f1_score(),
            }),
        }),
        data_access_role_arn: text(p.data_access_role_arn()),
        volume_kms_key_id: text(p.volume_kms_key_id()),
        vpc_config: p.vpc_config().map(vpc_config),
        mode: name(p.mode()),
        model_kms_key_id: text(p.model_kms_key_id()),
        version_name: text(p.version_name()),
        source_model_arn: text(p.source_model_arn()),
        flywheel_arn: text(p.flywheel_arn()),
    }
}

fn entity_recognizer_properties(p: &sdk::EntityRecognizerProperties) -> EntityRecognizerProperties {
    EntityRecognizerProperties {
        entity_recognizer_arn: text(p.entity_recognizer_arn()),
        language_code: name(p.language_code()),
        status: name(p.status()),
        message: text(p.message()),
        submit_time: time(p.submit_time()),
        end_time: time(p.end_time()),
        training_start_time: time(p.training_start_time()),
        training_end_time: time(p.training_end_time()),
        recognizer_metadata: p.recognizer_metadata().map(|m| RecognizerMetadata {
            number_of_trained_documents: m.number_of_trained_documents(),
            number_of_test_documents: m.number_of_test_documents(),
            evaluation_metrics: m.evaluation_metrics().map(|e| EvaluationMetrics {
                accuracy: None,
                precision: e.precision(),
                recall: e.recall(),
                f1_score: e.f1_score(),
            }),
        }),
        data_access_role_arn: text(p.data_access_role_arn()),
        volume_kms_key_id: text(p.volume_kms_key_id()),
        vpc_config: p.vpc_config().map(vpc_config),
        model_kms_key_id: text(p.model_kms_key_id()),
        version_name: text(p.version_name()),
        source_model_arn: text(p.source_model_arn()),
        flywheel_arn: text(p.flywheel_arn()),
    }
}

fn flywheel_properties(p: &sdk::FlywheelProperties) -> FlywheelProperties {
    FlywheelProperties {
        flywheel_arn: text(p.flywheel_arn()),
        active_model_arn: text(p.active_model_arn()),
        data_access_role_arn: text(p.data_access_role_arn()),
        data_lake_s3_uri: text(p.data_lake_s3_uri()),
        status: name(p.status()),
        model_type: name(p.model_type()),
        message: text(p.message()),
        creation_time: time(p.creation_time()),
        last_modified_time: time(p.last_modified_time()),
        latest_flywheel_iteration: text(p.latest_flywheel_iteration()),
    }
}

fn targeted_sentiment_job_properties(
    p: &sdk::TargetedSentimentDetectionJobProperties,
) -> TargetedSentimentDetectionJobProperties {
    TargetedSentimentDetectionJobProperties {
        job_id: text(p.job_id()),
        job_arn: text(p.job_arn()),
        job_name: text(p.job_name()),
        job_status: name(p.job_status()),
        message: text(p.message()),
        submit_time: time(p.submit_time()),
        end_time: time(p.end_time()),
        language_code: name(p.language_code()),
        data_access_role_arn: text(p.data_access_role_arn()),
        volume_kms_key_id: text(p.volume_kms_key_id()),
        vpc_config: p.vpc_config().map(vpc_config),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
