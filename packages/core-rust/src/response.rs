//! Response records.
//!
//! Field names follow the service's PascalCase wire names so that the JSON
//! form of a response is what the API documents. Every field is optional:
//! the service omits what it does not know, and so do we. Timestamps are
//! carried as RFC 3339 strings.

use serde::{Deserialize, Serialize};

use crate::operation::OperationKind;

// ---------------------------------------------------------------------------
// DetectDominantLanguage
// ---------------------------------------------------------------------------

/// A language detected in the input text, with the model's confidence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DominantLanguage {
    /// RFC 5646 language code, e.g. `"es"`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectDominantLanguageResponse {
    #[serde(default)]
    pub languages: Vec<DominantLanguage>,
}

// ---------------------------------------------------------------------------
// DescribeDataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatasetProperties {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dataset_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dataset_name: Option<String>,
    /// `TRAIN` or `TEST`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dataset_type: Option<String>,
    #[serde(rename = "DatasetS3Uri", skip_serializing_if = "Option::is_none", default)]
    pub dataset_s3_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_documents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDatasetResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dataset_properties: Option<DatasetProperties>,
}

// ---------------------------------------------------------------------------
// Shared model metadata
// ---------------------------------------------------------------------------

/// Model quality figures reported after training.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EvaluationMetrics {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub precision: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recall: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub f1_score: Option<f64>,
}

/// Where a classifier reads its training data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassifierInputDataConfig {
    #[serde(rename = "S3Uri", skip_serializing_if = "Option::is_none", default)]
    pub s3_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_format: Option<String>,
}

/// Where a classifier writes its output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassifierOutputDataConfig {
    #[serde(rename = "S3Uri", skip_serializing_if = "Option::is_none", default)]
    pub s3_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kms_key_id: Option<String>,
}

/// VPC placement of a job's compute resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VpcConfig {
    #[serde(default)]
    pub security_group_ids: Vec<String>,
    #[serde(default)]
    pub subnets: Vec<String>,
}

// ---------------------------------------------------------------------------
// DescribeDocumentClassifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClassifierMetadata {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_labels: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_trained_documents: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_test_documents: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub evaluation_metrics: Option<EvaluationMetrics>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentClassifierProperties {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub document_classifier_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub submit_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub training_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub training_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub input_data_config: Option<ClassifierInputDataConfig>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub output_data_config: Option<ClassifierOutputDataConfig>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub classifier_metadata: Option<ClassifierMetadata>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_access_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume_kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vpc_config: Option<VpcConfig>,
    /// `MULTI_CLASS` or `MULTI_LABEL`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model_kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_model_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flywheel_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeDocumentClassifierResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub document_classifier_properties: Option<DocumentClassifierProperties>,
}

// ---------------------------------------------------------------------------
// DescribeEntityRecognizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecognizerMetadata {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_trained_documents: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub number_of_test_documents: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub evaluation_metrics: Option<EvaluationMetrics>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntityRecognizerProperties {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub entity_recognizer_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub submit_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub training_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub training_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recognizer_metadata: Option<RecognizerMetadata>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_access_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume_kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vpc_config: Option<VpcConfig>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model_kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_model_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flywheel_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeEntityRecognizerResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub entity_recognizer_properties: Option<EntityRecognizerProperties>,
}

// ---------------------------------------------------------------------------
// DescribeFlywheel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlywheelProperties {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flywheel_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub active_model_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_access_role_arn: Option<String>,
    #[serde(rename = "DataLakeS3Uri", skip_serializing_if = "Option::is_none", default)]
    pub data_lake_s3_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    /// `DOCUMENT_CLASSIFIER` or `ENTITY_RECOGNIZER`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub creation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub latest_flywheel_iteration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeFlywheelResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub flywheel_properties: Option<FlywheelProperties>,
}

// ---------------------------------------------------------------------------
// DescribeTargetedSentimentDetectionJob
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetedSentimentDetectionJobProperties {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub job_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub job_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub submit_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_access_role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub volume_kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vpc_config: Option<VpcConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTargetedSentimentDetectionJobResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub targeted_sentiment_detection_job_properties: Option<TargetedSentimentDetectionJobProperties>,
}

// ---------------------------------------------------------------------------
// OperationResponse
// ---------------------------------------------------------------------------

/// A typed response from one operation.
///
/// Serializes untagged, so its JSON form is the response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationResponse {
    DetectDominantLanguage(DetectDominantLanguageResponse),
    DescribeDataset(DescribeDatasetResponse),
    DescribeDocumentClassifier(DescribeDocumentClassifierResponse),
    DescribeEntityRecognizer(DescribeEntityRecognizerResponse),
    DescribeFlywheel(DescribeFlywheelResponse),
    DescribeTargetedSentimentDetectionJob(DescribeTargetedSentimentDetectionJobResponse),
}

impl OperationResponse {
    /// The operation that produced this response.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::DetectDominantLanguage(_) => OperationKind::DetectDominantLanguage,
            Self::DescribeDataset(_) => OperationKind::DescribeDataset,
            Self::DescribeDocumentClassifier(_) => OperationKind::DescribeDocumentClassifier,
            Self::DescribeEntityRecognizer(_) => OperationKind::DescribeEntityRecognizer,
            Self::DescribeFlywheel(_) => OperationKind::DescribeFlywheel,
            Self::DescribeTargetedSentimentDetectionJob(_) => {
                OperationKind::DescribeTargetedSentimentDetectionJob
            }
        }
    }

    /// The response body as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a float field is not representable
    /// (NaN or infinite scores are not valid JSON numbers).
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
