//! Capability contracts the orchestrator and health service depend on.
//!
//! Both contracts are object safe so callers can hold them as
//! `Arc<dyn DraftAnnotationsClient>` / `Arc<dyn PublishNotifier>` and swap in
//! fakes under test.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{AnnotationSet, DocumentHash, RequestContext};

/// A document as held by the draft store, with the version token it was served under
#[derive(Debug, Clone, PartialEq)]
pub struct DraftAnnotations {
    pub annotations: AnnotationSet,
    pub hash: DocumentHash,
}

impl DraftAnnotations {
    pub fn new(annotations: AnnotationSet, hash: DocumentHash) -> Self {
        Self { annotations, hash }
    }
}

/// Read/write access to the draft annotations store
#[async_trait]
pub trait DraftAnnotationsClient: Send + Sync {
    /// Fetch the current draft for `uuid`.
    ///
    /// Fails with [`ClientError::NotFound`](crate::error::ClientError::NotFound)
    /// when the store has no document for it.
    async fn get_annotations(
        &self,
        ctx: &RequestContext,
        uuid: &str,
    ) -> ClientResult<DraftAnnotations>;

    /// Persist `annotations` for `uuid`, using `hash` as the write precondition.
    ///
    /// Returns the document as stored together with its new version token.
    async fn save_annotations(
        &self,
        ctx: &RequestContext,
        uuid: &str,
        hash: &DocumentHash,
        annotations: &AnnotationSet,
    ) -> ClientResult<DraftAnnotations>;

    /// Shallow readiness probe
    async fn gtg(&self) -> ClientResult<()>;

    /// The configured read/write endpoint template
    fn endpoint(&self) -> &str;
}

/// Submission of finalised annotations to the publishing pipeline
#[async_trait]
pub trait PublishNotifier: Send + Sync {
    /// Publish `annotations` for `uuid`. The document's `uuid` field is
    /// overwritten with `uuid` before sending.
    async fn publish(
        &self,
        ctx: &RequestContext,
        uuid: &str,
        annotations: AnnotationSet,
    ) -> ClientResult<()>;

    /// Shallow readiness probe
    async fn gtg(&self) -> ClientResult<()>;

    /// The configured publish endpoint
    fn endpoint(&self) -> &str;
}
