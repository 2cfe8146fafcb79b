//! Inbound payload validation
//!
//! Checks publish request bodies against the annotations JSON schema before
//! they are decoded into an [`AnnotationSet`] and handed to the orchestrator.

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use thiserror::Error;

use crate::models::AnnotationSet;

const ANNOTATIONS_SCHEMA: &str = include_str!("../schemas/annotations.json");

/// Errors produced while validating a request body
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("invalid annotations schema: {0}")]
    InvalidSchema(String),

    #[error("failed to parse request body: {0}")]
    MalformedJson(String),

    #[error("failed to validate request body: {}", errors.join("; "))]
    SchemaViolation { errors: Vec<String> },
}

/// Compiled annotations schema
#[derive(Debug)]
pub struct AnnotationsValidator {
    schema: JSONSchema,
}

impl AnnotationsValidator {
    /// Compile the bundled annotations schema
    pub fn new() -> Result<Self, ValidationError> {
        let schema: Value = serde_json::from_str(ANNOTATIONS_SCHEMA)
            .map_err(|e| ValidationError::InvalidSchema(e.to_string()))?;
        Self::from_schema(&schema)
    }

    /// Compile a caller-supplied draft-07 schema
    pub fn from_schema(schema: &Value) -> Result<Self, ValidationError> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| ValidationError::InvalidSchema(e.to_string()))?;

        Ok(Self { schema: compiled })
    }

    /// Validate an already-parsed payload, collecting every violation.
    pub fn validate(&self, payload: &Value) -> Result<(), ValidationError> {
        match self.schema.validate(payload) {
            Ok(()) => Ok(()),
            Err(errors) => {
                let errors = errors
                    .map(|e| {
                        format!(
                            "property '{}': {}",
                            e.instance_path,
                            e.to_string().replace('\n', " ")
                        )
                    })
                    .collect();
                Err(ValidationError::SchemaViolation { errors })
            }
        }
    }

    /// Parse, validate and decode a raw request body.
    pub fn parse_annotations(&self, body: &[u8]) -> Result<AnnotationSet, ValidationError> {
        let payload: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;

        self.validate(&payload)?;

        serde_json::from_value(payload).map_err(|e| ValidationError::MalformedJson(e.to_string()))
    }
}
