//! # Web API Application State
//!
//! Shared, read-only state handed to every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::health::HealthService;
use crate::models::{OriginSystemId, RequestContext, TransactionId};
use crate::orchestration::AnnotationsPublisher;
use crate::validation::AnnotationsValidator;

#[derive(Debug)]
pub struct AppState {
    pub publisher: AnnotationsPublisher,
    pub health: Arc<HealthService>,
    pub validator: Arc<AnnotationsValidator>,
    /// Budget for all downstream calls made on behalf of one publish request
    pub request_deadline: Duration,
    /// API description served on `/__api`
    pub api_description: Option<String>,
}

impl AppState {
    pub fn new(
        publisher: AnnotationsPublisher,
        health: Arc<HealthService>,
        validator: Arc<AnnotationsValidator>,
        request_deadline: Duration,
    ) -> Self {
        Self {
            publisher,
            health,
            validator,
            request_deadline,
            api_description: None,
        }
    }

    pub fn with_api_description(mut self, api_description: Option<String>) -> Self {
        self.api_description = api_description;
        self
    }

    /// Context for one inbound request, with its deadline starting now
    pub fn request_context(
        &self,
        transaction_id: TransactionId,
        origin_system_id: OriginSystemId,
    ) -> RequestContext {
        RequestContext::new(transaction_id, origin_system_id).with_timeout(self.request_deadline)
    }
}
