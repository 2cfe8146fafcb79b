//! # Annotations Publisher
//!
//! Sequences draft store and notifier calls into the two publish workflows:
//!
//! ```text
//! save_and_publish:    save ──▶ get ──▶ re-save ──▶ publish
//! publish_from_store:           get ──▶ re-save ──▶ publish
//! ```
//!
//! Each arrow is one downstream call; the first failure ends the workflow.
//! Nothing is retried and a completed save is never rolled back. The notifier
//! only ever receives the document returned by the re-save immediately before it.

use std::sync::Arc;

use tracing::{error, info};

use crate::clients::{DraftAnnotationsClient, PublishNotifier};
use crate::error::{PublishError, PublishResult};
use crate::models::{AnnotationSet, DocumentHash, RequestContext};

/// Workflow step a publish failed in, recorded on the failure log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Save,
    Fetch,
    Resave,
    Publish,
}

impl PublishStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStage::Save => "save",
            PublishStage::Fetch => "fetch",
            PublishStage::Resave => "resave",
            PublishStage::Publish => "publish",
        }
    }
}

impl std::fmt::Display for PublishStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orchestrates publication of draft annotations
#[derive(Clone)]
pub struct AnnotationsPublisher {
    draft_store: Arc<dyn DraftAnnotationsClient>,
    notifier: Arc<dyn PublishNotifier>,
}

impl std::fmt::Debug for AnnotationsPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationsPublisher")
            .field("draft_store", &self.draft_store.endpoint())
            .field("notifier", &self.notifier.endpoint())
            .finish()
    }
}

impl AnnotationsPublisher {
    pub fn new(
        draft_store: Arc<dyn DraftAnnotationsClient>,
        notifier: Arc<dyn PublishNotifier>,
    ) -> Self {
        Self {
            draft_store,
            notifier,
        }
    }

    pub fn draft_store(&self) -> &Arc<dyn DraftAnnotationsClient> {
        &self.draft_store
    }

    pub fn notifier(&self) -> &Arc<dyn PublishNotifier> {
        &self.notifier
    }

    /// Save the supplied document to the draft store, then publish it from there.
    ///
    /// A failed initial save ends the workflow; timeouts are reported as
    /// [`PublishError::ServiceTimeout`], anything else is returned as is.
    pub async fn save_and_publish(
        &self,
        ctx: &RequestContext,
        uuid: &str,
        hash: &DocumentHash,
        annotations: &AnnotationSet,
    ) -> PublishResult<()> {
        if let Err(err) = self
            .draft_store
            .save_annotations(ctx, uuid, hash, annotations)
            .await
        {
            let err = PublishError::from(err);
            log_failure(ctx, uuid, PublishStage::Save, &err);
            return Err(err);
        }

        self.publish_from_store(ctx, uuid).await
    }

    /// Publish the draft currently held by the store.
    ///
    /// The fetched document is written back under the hash it was read with and
    /// the store's response is what gets published, so the notifier sees the
    /// document exactly as the store last accepted it.
    pub async fn publish_from_store(&self, ctx: &RequestContext, uuid: &str) -> PublishResult<()> {
        let draft = self
            .draft_store
            .get_annotations(ctx, uuid)
            .await
            .map_err(|err| self.draft_failure(ctx, uuid, PublishStage::Fetch, err))?;

        let saved = self
            .draft_store
            .save_annotations(ctx, uuid, &draft.hash, &draft.annotations)
            .await
            .map_err(|err| self.draft_failure(ctx, uuid, PublishStage::Resave, err))?;

        if let Err(err) = self.notifier.publish(ctx, uuid, saved.annotations).await {
            let err = PublishError::from(err);
            log_failure(ctx, uuid, PublishStage::Publish, &err);
            return Err(err);
        }

        info!(
            transaction_id = %ctx.transaction_id,
            uuid = %uuid,
            origin_system_id = %ctx.origin_system_id,
            "Annotations published"
        );

        Ok(())
    }

    fn draft_failure(
        &self,
        ctx: &RequestContext,
        uuid: &str,
        stage: PublishStage,
        err: crate::error::ClientError,
    ) -> PublishError {
        let err = PublishError::from_draft_store(uuid, err);
        log_failure(ctx, uuid, stage, &err);
        err
    }
}

fn log_failure(ctx: &RequestContext, uuid: &str, stage: PublishStage, err: &PublishError) {
    match err {
        PublishError::DraftNotFound { .. } => info!(
            transaction_id = %ctx.transaction_id,
            uuid = %uuid,
            stage = %stage,
            "No draft annotations to publish"
        ),
        PublishError::ServiceTimeout { .. } => error!(
            transaction_id = %ctx.transaction_id,
            uuid = %uuid,
            stage = %stage,
            error = %err,
            "Timed out publishing annotations"
        ),
        PublishError::Downstream(_) => error!(
            transaction_id = %ctx.transaction_id,
            uuid = %uuid,
            stage = %stage,
            error = %err,
            "Failed to publish annotations"
        ),
    }
}
