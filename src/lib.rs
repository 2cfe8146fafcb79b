#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Annotations Publisher
//!
//! Publishes editorially curated annotations for a piece of content. A publish
//! request either supplies a new annotation document, which is saved to the
//! draft annotations store and then published, or asks for the draft already
//! held by the store to be published as is.
//!
//! ## Publish workflow
//!
//! 1. Save the supplied document under the caller's `Previous-Document-Hash`
//!    (skipped when publishing from the store).
//! 2. Fetch the current draft and its document hash.
//! 3. Write it back under that hash, so the published document is the one the
//!    store last accepted.
//! 4. Submit it, with `uuid` set to the content id, to the publishing notifier.
//!
//! Any failure ends the workflow. Nothing is retried.
//!
//! ## Module Organization
//!
//! - [`clients`] - Draft store and notifier HTTP clients behind capability traits
//! - [`orchestration`] - The publish workflow
//! - [`health`] - Readiness probe and detailed health report
//! - [`validation`] - JSON schema validation of request bodies
//! - [`web`] - axum HTTP surface
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use annotations_publisher::bootstrap::build_app_state;
//! use annotations_publisher::config::PublisherConfig;
//! use annotations_publisher::web::create_app;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = PublisherConfig::load(None)?;
//! let app = create_app(Arc::new(build_app_state(&config)?));
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod clients;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod validation;
pub mod web;

pub use clients::{
    DraftAnnotations, DraftAnnotationsApiClient, DraftAnnotationsClient, PublishNotifier,
    PublishingNotifierClient,
};
pub use config::PublisherConfig;
pub use error::{ClientError, ClientResult, ConfigurationError, PublishError, PublishResult};
pub use health::{HealthReport, HealthService};
pub use models::{
    Annotation, AnnotationSet, DocumentHash, OriginSystemId, RequestContext, TransactionId,
};
pub use orchestration::AnnotationsPublisher;
pub use validation::{AnnotationsValidator, ValidationError};
