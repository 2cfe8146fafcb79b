//! Shared test doubles for the draft store and notifier capabilities.
//!
//! Both fakes record every call in a shared state struct and can be scripted
//! to fail at a particular step.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use annotations_publisher::clients::{DraftAnnotations, DraftAnnotationsClient, PublishNotifier};
use annotations_publisher::error::{ClientError, ClientResult};
use annotations_publisher::models::{
    Annotation, AnnotationSet, DocumentHash, OriginSystemId, RequestContext, TransactionId,
};

pub const DRAFT_STORE_ENDPOINT: &str = "http://draft-store.test/drafts/content/{uuid}/annotations";
pub const NOTIFIER_ENDPOINT: &str = "http://notifier.test/notify";

/// Failure a fake should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Timeout,
    NotFound,
    Status(u16),
}

impl Failure {
    fn into_error(self, endpoint: &str, uuid: &str) -> ClientError {
        match self {
            Failure::Timeout => ClientError::Timeout {
                endpoint: endpoint.to_string(),
            },
            Failure::NotFound => ClientError::NotFound {
                uuid: uuid.to_string(),
            },
            Failure::Status(status) => ClientError::unexpected_status(endpoint, status),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftCall {
    Get {
        uuid: String,
    },
    Save {
        uuid: String,
        hash: DocumentHash,
        annotations: AnnotationSet,
    },
}

#[derive(Debug, Default)]
pub struct FakeDraftStoreState {
    pub documents: HashMap<String, DraftAnnotations>,
    pub calls: Vec<DraftCall>,
    pub saves: usize,
    pub get_failure: Option<Failure>,
    /// Fail the n-th save (1-based)
    pub save_failure: Option<(usize, Failure)>,
    pub gtg_failure: Option<Failure>,
    /// Reject writes whose non-empty precondition does not match the stored hash
    pub enforce_hash: bool,
}

/// In-memory draft store issuing `hash-<n>` version tokens
#[derive(Debug, Default, Clone)]
pub struct FakeDraftStore {
    pub state: Arc<Mutex<FakeDraftStoreState>>,
}

impl FakeDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, uuid: &str, annotations: AnnotationSet, hash: &str) -> Self {
        self.state.lock().unwrap().documents.insert(
            uuid.to_string(),
            DraftAnnotations::new(annotations, DocumentHash::new(hash)),
        );
        self
    }

    pub fn failing_get(self, failure: Failure) -> Self {
        self.state.lock().unwrap().get_failure = Some(failure);
        self
    }

    pub fn failing_save(self, call: usize, failure: Failure) -> Self {
        self.state.lock().unwrap().save_failure = Some((call, failure));
        self
    }

    pub fn failing_gtg(self, failure: Failure) -> Self {
        self.state.lock().unwrap().gtg_failure = Some(failure);
        self
    }

    pub fn enforcing_hash(self) -> Self {
        self.state.lock().unwrap().enforce_hash = true;
        self
    }

    pub fn calls(&self) -> Vec<DraftCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn save_calls(&self) -> Vec<(String, DocumentHash, AnnotationSet)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DraftCall::Save {
                    uuid,
                    hash,
                    annotations,
                } => Some((uuid, hash, annotations)),
                DraftCall::Get { .. } => None,
            })
            .collect()
    }

    pub fn document(&self, uuid: &str) -> Option<DraftAnnotations> {
        self.state.lock().unwrap().documents.get(uuid).cloned()
    }
}

#[async_trait]
impl DraftAnnotationsClient for FakeDraftStore {
    async fn get_annotations(
        &self,
        _ctx: &RequestContext,
        uuid: &str,
    ) -> ClientResult<DraftAnnotations> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(DraftCall::Get {
            uuid: uuid.to_string(),
        });

        if let Some(failure) = state.get_failure {
            return Err(failure.into_error(DRAFT_STORE_ENDPOINT, uuid));
        }

        state
            .documents
            .get(uuid)
            .cloned()
            .ok_or_else(|| Failure::NotFound.into_error(DRAFT_STORE_ENDPOINT, uuid))
    }

    async fn save_annotations(
        &self,
        _ctx: &RequestContext,
        uuid: &str,
        hash: &DocumentHash,
        annotations: &AnnotationSet,
    ) -> ClientResult<DraftAnnotations> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(DraftCall::Save {
            uuid: uuid.to_string(),
            hash: hash.clone(),
            annotations: annotations.clone(),
        });
        state.saves += 1;

        if let Some((call, failure)) = state.save_failure {
            if call == state.saves {
                return Err(failure.into_error(DRAFT_STORE_ENDPOINT, uuid));
            }
        }

        if state.enforce_hash && !hash.is_empty() {
            if let Some(current) = state.documents.get(uuid) {
                if current.hash != *hash {
                    return Err(Failure::Status(409).into_error(DRAFT_STORE_ENDPOINT, uuid));
                }
            }
        }

        let stored = DraftAnnotations::new(
            annotations.clone(),
            DocumentHash::new(format!("hash-{}", state.saves)),
        );
        state.documents.insert(uuid.to_string(), stored.clone());
        Ok(stored)
    }

    async fn gtg(&self) -> ClientResult<()> {
        match self.state.lock().unwrap().gtg_failure {
            Some(failure) => Err(failure.into_error(DRAFT_STORE_ENDPOINT, "")),
            None => Ok(()),
        }
    }

    fn endpoint(&self) -> &str {
        DRAFT_STORE_ENDPOINT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishCall {
    pub uuid: String,
    pub origin_system_id: String,
    pub transaction_id: String,
    pub annotations: AnnotationSet,
}

#[derive(Debug, Default)]
pub struct FakeNotifierState {
    pub published: Vec<PublishCall>,
    pub publish_failure: Option<Failure>,
    pub gtg_failure: Option<Failure>,
}

/// Notifier fake that stamps the uuid like the real client does
#[derive(Debug, Default, Clone)]
pub struct FakeNotifier {
    pub state: Arc<Mutex<FakeNotifierState>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_publish(self, failure: Failure) -> Self {
        self.state.lock().unwrap().publish_failure = Some(failure);
        self
    }

    pub fn failing_gtg(self, failure: Failure) -> Self {
        self.state.lock().unwrap().gtg_failure = Some(failure);
        self
    }

    pub fn published(&self) -> Vec<PublishCall> {
        self.state.lock().unwrap().published.clone()
    }
}

#[async_trait]
impl PublishNotifier for FakeNotifier {
    async fn publish(
        &self,
        ctx: &RequestContext,
        uuid: &str,
        mut annotations: AnnotationSet,
    ) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        annotations.set_uuid(uuid);
        state.published.push(PublishCall {
            uuid: uuid.to_string(),
            origin_system_id: ctx.origin_system_id.to_string(),
            transaction_id: ctx.transaction_id.to_string(),
            annotations,
        });

        match state.publish_failure {
            Some(failure) => Err(failure.into_error(NOTIFIER_ENDPOINT, uuid)),
            None => Ok(()),
        }
    }

    async fn gtg(&self) -> ClientResult<()> {
        match self.state.lock().unwrap().gtg_failure {
            Some(failure) => Err(failure.into_error(NOTIFIER_ENDPOINT, "")),
            None => Ok(()),
        }
    }

    fn endpoint(&self) -> &str {
        NOTIFIER_ENDPOINT
    }
}

pub fn ctx() -> RequestContext {
    RequestContext::new(
        TransactionId::new("tid_test"),
        OriginSystemId::parse("http://cmdb.test/systems/methode-web-pub").unwrap(),
    )
}

pub fn sample_annotations() -> AnnotationSet {
    AnnotationSet::new(vec![Annotation::new("p", "c")])
}

pub fn sample_annotations_json() -> serde_json::Value {
    json!({ "annotations": [{ "predicate": "p", "id": "c" }] })
}
