//! Declarative operation descriptors.
//!
//! Every supported Comprehend operation is described by one static
//! [`OperationDescriptor`]: its API name, the request fields it accepts, the
//! response fields it returns, and the response field projected by default.
//! The invoker is generic over this table; no operation carries its own
//! invocation logic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OperationKind
// ---------------------------------------------------------------------------

/// The Comprehend operations this crate knows how to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    DetectDominantLanguage,
    DescribeDataset,
    DescribeDocumentClassifier,
    DescribeEntityRecognizer,
    DescribeFlywheel,
    DescribeTargetedSentimentDetectionJob,
}

impl OperationKind {
    /// All operation kinds, in descriptor-table order.
    pub const ALL: [Self; 6] = [
        Self::DetectDominantLanguage,
        Self::DescribeDataset,
        Self::DescribeDocumentClassifier,
        Self::DescribeEntityRecognizer,
        Self::DescribeFlywheel,
        Self::DescribeTargetedSentimentDetectionJob,
    ];

    /// The operation name as published by the service API.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::DetectDominantLanguage => "DetectDominantLanguage",
            Self::DescribeDataset => "DescribeDataset",
            Self::DescribeDocumentClassifier => "DescribeDocumentClassifier",
            Self::DescribeEntityRecognizer => "DescribeEntityRecognizer",
            Self::DescribeFlywheel => "DescribeFlywheel",
            Self::DescribeTargetedSentimentDetectionJob => {
                "DescribeTargetedSentimentDetectionJob"
            }
        }
    }

    /// The kebab-case command name used on the command line.
    #[must_use]
    pub const fn command_name(self) -> &'static str {
        match self {
            Self::DetectDominantLanguage => "detect-dominant-language",
            Self::DescribeDataset => "describe-dataset",
            Self::DescribeDocumentClassifier => "describe-document-classifier",
            Self::DescribeEntityRecognizer => "describe-entity-recognizer",
            Self::DescribeFlywheel => "describe-flywheel",
            Self::DescribeTargetedSentimentDetectionJob => {
                "describe-targeted-sentiment-detection-job"
            }
        }
    }

    /// Returns the static descriptor for this operation.
    #[must_use]
    pub fn descriptor(self) -> &'static OperationDescriptor {
        // DESCRIPTORS is ordered like `ALL`; the table test pins this.
        &DESCRIPTORS[self as usize]
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Error returned when a string names no known operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for OperationKind {
    type Err = UnknownOperation;

    /// Accepts either the API name or the command name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.api_name().eq_ignore_ascii_case(s) || kind.command_name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// One request field accepted by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name in the API's PascalCase form (e.g. `"DatasetArn"`).
    pub name: &'static str,
    /// Whether the field must be bound before the operation may be invoked.
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }
}

/// Static description of an operation's request/response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub kind: OperationKind,
    pub request_fields: &'static [FieldSpec],
    /// Top-level members of the response body. Every operation here returns a
    /// single member, so a `Field` selector currently names the same value as
    /// the default projection; it becomes distinct once an operation with
    /// several response members is added.
    pub response_fields: &'static [&'static str],
    /// Response field returned when the caller does not choose a projection.
    pub default_projection: &'static str,
}

impl OperationDescriptor {
    /// The operation's API name.
    #[must_use]
    pub const fn api_name(&self) -> &'static str {
        self.kind.api_name()
    }

    /// Looks up a request field by name (exact match, then case-insensitive).
    #[must_use]
    pub fn request_field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.request_fields
            .iter()
            .find(|f| f.name == name)
            .or_else(|| self.request_fields.iter().find(|f| f.name.eq_ignore_ascii_case(name)))
    }

    /// Looks up a response field by name (exact match, then case-insensitive).
    #[must_use]
    pub fn response_field(&self, name: &str) -> Option<&'static str> {
        self.response_fields
            .iter()
            .copied()
            .find(|f| *f == name)
            .or_else(|| {
                self.response_fields
                    .iter()
                    .copied()
                    .find(|f| f.eq_ignore_ascii_case(name))
            })
    }

    /// Iterates the names of required request fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.request_fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
    }
}

/// The descriptor table, one entry per `OperationKind` in declaration order.
pub static DESCRIPTORS: [OperationDescriptor; 6] = [
    OperationDescriptor {
        kind: OperationKind::DetectDominantLanguage,
        request_fields: &[FieldSpec::required("Text")],
        response_fields: &["Languages"],
        default_projection: "Languages",
    },
    OperationDescriptor {
        kind: OperationKind::DescribeDataset,
        request_fields: &[FieldSpec::required("DatasetArn")],
        response_fields: &["DatasetProperties"],
        default_projection: "DatasetProperties",
    },
    OperationDescriptor {
        kind: OperationKind::DescribeDocumentClassifier,
        request_fields: &[FieldSpec::required("DocumentClassifierArn")],
        response_fields: &["DocumentClassifierProperties"],
        default_projection: "DocumentClassifierProperties",
    },
    OperationDescriptor {
        kind: OperationKind::DescribeEntityRecognizer,
        request_fields: &[FieldSpec::required("EntityRecognizerArn")],
        response_fields: &["EntityRecognizerProperties"],
        default_projection: "EntityRecognizerProperties",
    },
    OperationDescriptor {
        kind: OperationKind::DescribeFlywheel,
        request_fields: &[FieldSpec::required("FlywheelArn")],
        response_fields: &["FlywheelProperties"],
        default_projection: "FlywheelProperties",
    },
    OperationDescriptor {
        kind: OperationKind::DescribeTargetedSentimentDetectionJob,
        request_fields: &[FieldSpec::required("JobId")],
        response_fields: &["TargetedSentimentDetectionJobProperties"],
        default_projection: "TargetedSentimentDetectionJobProperties",
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_table_matches_kind_order() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.descriptor().kind, kind);
        }
    }

    #[test]
    fn each_operation_returns_one_response_member() {
        for desc in &DESCRIPTORS {
            assert_eq!(desc.response_fields, [desc.default_projection], "{}", desc.api_name());
        }
    }

    #[test]
    fn default_projection_is_a_response_field() {
        for desc in &DESCRIPTORS {
            assert!(
                desc.response_fields.contains(&desc.default_projection),
                "{} projects an undeclared field",
                desc.api_name()
            );
        }
    }

    #[test]
    fn every_operation_has_a_required_field() {
        for desc in &DESCRIPTORS {
            assert_eq!(desc.required_fields().count(), 1, "{}", desc.api_name());
        }
    }

    #[test]
    fn parses_api_and_command_names() {
        assert_eq!(
            "DescribeFlywheel".parse::<OperationKind>(),
            Ok(OperationKind::DescribeFlywheel)
        );
        assert_eq!(
            "describe-targeted-sentiment-detection-job".parse::<OperationKind>(),
            Ok(OperationKind::DescribeTargetedSentimentDetectionJob)
        );
        assert_eq!(
            "detectdominantlanguage".parse::<OperationKind>(),
            Ok(OperationKind::DetectDominantLanguage)
        );
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let err = "DeleteDataset".parse::<OperationKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown operation: DeleteDataset");
    }

    #[test]
    fn field_lookup_is_case_insensitive() {
        let desc = OperationKind::DescribeDataset.descriptor();
        assert_eq!(desc.request_field("datasetarn").map(|f| f.name), Some("DatasetArn"));
        assert_eq!(desc.response_field("datasetproperties"), Some("DatasetProperties"));
        assert!(desc.request_field("Text").is_none());
    }

    #[test]
    fn display_uses_api_name() {
        assert_eq!(
            OperationKind::DescribeEntityRecognizer.to_string(),
            "DescribeEntityRecognizer"
        );
    }
}
