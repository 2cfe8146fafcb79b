//! Downstream Service Clients
//!
//! HTTP clients for the two services a publish touches: the draft annotations
//! store and the publishing notifier. Both share a single outbound connection
//! pool built by [`build_http_client`].

pub mod draft_store_client;
pub mod http;
pub mod notifier_client;
pub mod traits;

pub use draft_store_client::{DraftAnnotationsApiClient, DraftAnnotationsApiConfig};
pub use http::build_http_client;
pub use notifier_client::{BasicAuth, PublishingNotifierClient, PublishingNotifierConfig};
pub use traits::{DraftAnnotations, DraftAnnotationsClient, PublishNotifier};
