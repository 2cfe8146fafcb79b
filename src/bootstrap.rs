//! # Service Bootstrap
//!
//! Wires configuration into the shared HTTP client, both downstream clients,
//! the publisher, the health service and the validator.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::clients::{
    build_http_client, DraftAnnotationsApiClient, DraftAnnotationsClient, PublishNotifier,
    PublishingNotifierClient,
};
use crate::config::PublisherConfig;
use crate::health::HealthService;
use crate::orchestration::AnnotationsPublisher;
use crate::validation::AnnotationsValidator;
use crate::web::AppState;

/// Build the application state described by `config`
pub fn build_app_state(config: &PublisherConfig) -> anyhow::Result<AppState> {
    let http_client =
        build_http_client(config.http_timeout()).context("Failed to build HTTP client")?;

    let draft_store: Arc<dyn DraftAnnotationsClient> = Arc::new(
        DraftAnnotationsApiClient::new(config.draft_store_config(), http_client.clone())
            .context("Failed to create draft annotations client")?,
    );
    let notifier: Arc<dyn PublishNotifier> = Arc::new(
        PublishingNotifierClient::new(config.notifier_config(), http_client)
            .context("Failed to create publishing notifier client")?,
    );

    let validator =
        AnnotationsValidator::new().context("Failed to compile the annotations schema")?;
    let api_description = config
        .load_api_description()
        .context("Failed to read the API description")?;

    let publisher = AnnotationsPublisher::new(draft_store.clone(), notifier.clone());
    let health = HealthService::new(config.identity(), draft_store.clone(), notifier.clone());

    info!(
        draft_store = %draft_store.endpoint(),
        notifier = %notifier.endpoint(),
        request_deadline_ms = config.request_deadline_ms,
        "Annotations publisher wired"
    );

    Ok(AppState::new(
        publisher,
        Arc::new(health),
        Arc::new(validator),
        config.request_deadline(),
    )
    .with_api_description(api_description))
}
