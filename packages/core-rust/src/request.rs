//! Request records and parameter binding.
//!
//! Each operation has one request record whose fields are all optional
//! strings. Unset fields are skipped on serialization so they never reach the
//! service as empty values. [`RequestBuilder`] binds named parameters into a
//! record and validates the descriptor's required fields before handing the
//! request to an invoker.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::operation::{OperationDescriptor, OperationKind};

// ---------------------------------------------------------------------------
// Macro for the per-operation request records
// ---------------------------------------------------------------------------

/// Generate a request record with PascalCase wire names and by-name access.
macro_rules! request_record {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "PascalCase", deny_unknown_fields)]
        pub struct $name {
            $(
                #[serde(skip_serializing_if = "Option::is_none", default)]
                pub $field: Option<String>,
            )+
        }

        impl $name {
            fn field(&self, name: &str) -> Option<&str> {
                match name {
                    $($wire => self.$field.as_deref(),)+
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
                match name {
                    $($wire => Some(&mut self.$field),)+
                    _ => None,
                }
            }
        }
    };
}

request_record!(
    /// Input of `DetectDominantLanguage`.
    DetectDominantLanguageRequest { text => "Text" }
);

request_record!(
    /// Input of `DescribeDataset`.
    DescribeDatasetRequest { dataset_arn => "DatasetArn" }
);

request_record!(
    /// Input of `DescribeDocumentClassifier`.
    DescribeDocumentClassifierRequest { document_classifier_arn => "DocumentClassifierArn" }
);

request_record!(
    /// Input of `DescribeEntityRecognizer`.
    DescribeEntityRecognizerRequest { entity_recognizer_arn => "EntityRecognizerArn" }
);

request_record!(
    /// Input of `DescribeFlywheel`.
    DescribeFlywheelRequest { flywheel_arn => "FlywheelArn" }
);

request_record!(
    /// Input of `DescribeTargetedSentimentDetectionJob`.
    DescribeTargetedSentimentDetectionJobRequest { job_id => "JobId" }
);

// ---------------------------------------------------------------------------
// OperationRequest
// ---------------------------------------------------------------------------

/// A fully typed request for one operation.
///
/// Serializes untagged: the JSON form is exactly the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationRequest {
    DetectDominantLanguage(DetectDominantLanguageRequest),
    DescribeDataset(DescribeDatasetRequest),
    DescribeDocumentClassifier(DescribeDocumentClassifierRequest),
    DescribeEntityRecognizer(DescribeEntityRecognizerRequest),
    DescribeFlywheel(DescribeFlywheelRequest),
    DescribeTargetedSentimentDetectionJob(DescribeTargetedSentimentDetectionJobRequest),
}

/// Apply the same expression to whichever record an `OperationRequest` holds.
macro_rules! with_record {
    ($request:expr, $record:ident => $body:expr) => {
        match $request {
            OperationRequest::DetectDominantLanguage($record) => $body,
            OperationRequest::DescribeDataset($record) => $body,
            OperationRequest::DescribeDocumentClassifier($record) => $body,
            OperationRequest::DescribeEntityRecognizer($record) => $body,
            OperationRequest::DescribeFlywheel($record) => $body,
            OperationRequest::DescribeTargetedSentimentDetectionJob($record) => $body,
        }
    };
}

impl OperationRequest {
    /// An empty request for the given operation, with no fields bound.
    #[must_use]
    pub fn empty(kind: OperationKind) -> Self {
        match kind {
            OperationKind::DetectDominantLanguage => Self::DetectDominantLanguage(Default::default()),
            OperationKind::DescribeDataset => Self::DescribeDataset(Default::default()),
            OperationKind::DescribeDocumentClassifier => {
                Self::DescribeDocumentClassifier(Default::default())
            }
            OperationKind::DescribeEntityRecognizer => {
                Self::DescribeEntityRecognizer(Default::default())
            }
            OperationKind::DescribeFlywheel => Self::DescribeFlywheel(Default::default()),
            OperationKind::DescribeTargetedSentimentDetectionJob => {
                Self::DescribeTargetedSentimentDetectionJob(Default::default())
            }
        }
    }

    /// Decode a request document (the JSON request body) for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidDocument` if the document is not an
    /// object of the operation's request fields.
    pub fn from_json(kind: OperationKind, document: serde_json::Value) -> Result<Self, ValidationError> {
        let invalid = |e: serde_json::Error| ValidationError::InvalidDocument {
            operation: kind,
            reason: e.to_string(),
        };
        Ok(match kind {
            OperationKind::DetectDominantLanguage => {
                Self::DetectDominantLanguage(serde_json::from_value(document).map_err(invalid)?)
            }
            OperationKind::DescribeDataset => {
                Self::DescribeDataset(serde_json::from_value(document).map_err(invalid)?)
            }
            OperationKind::DescribeDocumentClassifier => {
                Self::DescribeDocumentClassifier(serde_json::from_value(document).map_err(invalid)?)
            }
            OperationKind::DescribeEntityRecognizer => {
                Self::DescribeEntityRecognizer(serde_json::from_value(document).map_err(invalid)?)
            }
            OperationKind::DescribeFlywheel => {
                Self::DescribeFlywheel(serde_json::from_value(document).map_err(invalid)?)
            }
            OperationKind::DescribeTargetedSentimentDetectionJob => {
                Self::DescribeTargetedSentimentDetectionJob(
                    serde_json::from_value(document).map_err(invalid)?,
                )
            }
        })
    }

    /// The operation this request targets.
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

    #[must_use]
    pub fn descriptor(&self) -> &'static OperationDescriptor {
        self.kind().descriptor()
    }

    /// Value of a bound field, by API field name (case-insensitive).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        let spec = self.descriptor().request_field(name)?;
        with_record!(self, r => r.field(spec.name))
    }

    fn field_mut(&mut self, name: &'static str) -> Option<&mut Option<String>> {
        with_record!(self, r => r.field_mut(name))
    }

    /// Check that every required field of the descriptor is bound and non-empty.
    ///
    /// # Errors
    ///
    /// Returns the first `MissingField` or `EmptyValue` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let operation = self.kind();
        for field in self.descriptor().required_fields() {
            match self.field(field) {
                None => return Err(ValidationError::MissingField { operation, field }),
                Some("") => return Err(ValidationError::EmptyValue { operation, field }),
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// The request body as JSON, with unset fields omitted.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        // Records hold only `Option<String>` fields, which always serialize.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ---------------------------------------------------------------------------
// RequestBuilder
// ---------------------------------------------------------------------------

/// Binds named parameters into an `OperationRequest`.
///
/// Later bindings of the same field replace earlier ones, so a request
/// document can be loaded first and individual flags applied on top.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: OperationRequest,
}

impl RequestBuilder {
    /// Start with no fields bound.
    #[must_use]
    pub fn new(kind: OperationKind) -> Self {
        Self {
            request: OperationRequest::empty(kind),
        }
    }

    /// Start from an existing request (e.g. one decoded from a document).
    #[must_use]
    pub const fn from_request(request: OperationRequest) -> Self {
        Self { request }
    }

    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.request.kind()
    }

    /// Bind `value` to the parameter `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if the operation declares no such field and
    /// `EmptyValue` if `value` is empty.
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Result<Self, ValidationError> {
        let operation = self.kind();
        let spec = self
            .request
            .descriptor()
            .request_field(name)
            .ok_or_else(|| ValidationError::UnknownParameter {
                operation,
                name: name.to_string(),
            })?;
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyValue {
                operation,
                field: spec.name,
            });
        }
        if let Some(slot) = self.request.field_mut(spec.name) {
            *slot = Some(value);
        }
        Ok(self)
    }

    /// Bind `value` if present; `None` leaves the field untouched.
    ///
    /// # Errors
    ///
    /// Same as [`RequestBuilder::set`].
    pub fn set_opt(self, name: &str, value: Option<String>) -> Result<Self, ValidationError> {
        match value {
            Some(v) => self.set(name, v),
            None => Ok(self),
        }
    }

    /// Bind a `NAME=VALUE` pair. Only the first `=` separates name and value.
    ///
    /// # Errors
    ///
    /// Returns `MalformedParameter` if there is no `=` or the name is empty,
    /// otherwise the errors of [`RequestBuilder::set`].
    pub fn bind_pair(self, pair: &str) -> Result<Self, ValidationError> {
        match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => self.set(name.trim(), value),
            _ => Err(ValidationError::MalformedParameter(pair.to_string())),
        }
    }

    /// Validate and return the finished request.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if a required field is missing or empty.
    pub fn build(self) -> Result<OperationRequest, ValidationError> {
        self.request.validate()?;
        tracing::debug!(operation = %self.request.kind(), "request bound");
        Ok(self.request)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
