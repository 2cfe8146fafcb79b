//! # Service Configuration
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. `ANNOTATIONS_PUBLISHER_*` environment variables (e.g. `ANNOTATIONS_PUBLISHER_PORT`)
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clients::draft_store_client::UUID_PLACEHOLDER;
use crate::clients::{BasicAuth, DraftAnnotationsApiConfig, PublishingNotifierConfig};
use crate::error::ConfigurationError;
use crate::health::ServiceIdentity;

pub const ENV_PREFIX: &str = "ANNOTATIONS_PUBLISHER";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigurationError::invalid_value(
                "log_format",
                format!("expected 'text' or 'json', got '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    pub app_system_code: String,
    pub app_name: String,
    pub app_description: String,
    pub port: u16,
    /// Draft store endpoint template containing `{uuid}`
    pub draft_annotations_rw_endpoint: String,
    pub annotations_publish_endpoint: String,
    pub annotations_publish_gtg_endpoint: String,
    /// `user:password` credentials for the notifier
    pub annotations_publish_auth: Option<String>,
    /// Per-call transport timeout
    pub http_timeout_ms: u64,
    /// Deadline for a whole publish request, shared by every downstream call
    pub request_deadline_ms: u64,
    /// API description served on `/__api`
    pub api_yml: Option<PathBuf>,
    pub panic_guide: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        let identity = ServiceIdentity::default();
        let draft_store = DraftAnnotationsApiConfig::default();
        let notifier = PublishingNotifierConfig::default();

        Self {
            app_system_code: identity.system_code,
            app_name: identity.name,
            app_description: identity.description,
            port: 8080,
            draft_annotations_rw_endpoint: draft_store.rw_endpoint,
            annotations_publish_endpoint: notifier.publish_endpoint,
            annotations_publish_gtg_endpoint: notifier.gtg_endpoint,
            annotations_publish_auth: None,
            http_timeout_ms: 8000,
            request_deadline_ms: 10000,
            api_yml: None,
            panic_guide: identity.panic_guide,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl PublisherConfig {
    /// Load from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from an optional file and an explicit environment source
    pub fn load_with_env(
        path: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigurationError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let config: Self = builder
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot start with
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.port == 0 {
            return Err(ConfigurationError::invalid_value("port", "must not be 0"));
        }

        if !self.draft_annotations_rw_endpoint.contains(UUID_PLACEHOLDER) {
            return Err(ConfigurationError::invalid_value(
                "draft_annotations_rw_endpoint",
                format!("must contain the {UUID_PLACEHOLDER} placeholder"),
            ));
        }

        for (field, value) in [
            (
                "draft_annotations_rw_endpoint",
                &self.draft_annotations_rw_endpoint,
            ),
            (
                "annotations_publish_endpoint",
                &self.annotations_publish_endpoint,
            ),
            (
                "annotations_publish_gtg_endpoint",
                &self.annotations_publish_gtg_endpoint,
            ),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigurationError::invalid_value(field, e.to_string()))?;
        }

        if self.http_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "http_timeout_ms",
                "must be greater than 0",
            ));
        }

        if self.request_deadline_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "request_deadline_ms",
                "must be greater than 0",
            ));
        }

        if let Some(auth) = self.publish_auth_value() {
            if BasicAuth::parse(auth).is_none() {
                return Err(ConfigurationError::invalid_value(
                    "annotations_publish_auth",
                    "expected 'user:password'",
                ));
            }
        }

        Ok(())
    }

    fn publish_auth_value(&self) -> Option<&str> {
        self.annotations_publish_auth
            .as_deref()
            .filter(|auth| !auth.is_empty())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn request_deadline(&self) -> Duration {
        Duration::from_millis(self.request_deadline_ms)
    }

    pub fn draft_store_config(&self) -> DraftAnnotationsApiConfig {
        DraftAnnotationsApiConfig {
            rw_endpoint: self.draft_annotations_rw_endpoint.clone(),
            timeout_ms: self.http_timeout_ms,
        }
    }

    pub fn notifier_config(&self) -> PublishingNotifierConfig {
        PublishingNotifierConfig {
            publish_endpoint: self.annotations_publish_endpoint.clone(),
            gtg_endpoint: self.annotations_publish_gtg_endpoint.clone(),
            auth: self.publish_auth_value().and_then(BasicAuth::parse),
            timeout_ms: self.http_timeout_ms,
        }
    }

    pub fn identity(&self) -> ServiceIdentity {
        ServiceIdentity {
            system_code: self.app_system_code.clone(),
            name: self.app_name.clone(),
            description: self.app_description.clone(),
            panic_guide: self.panic_guide.clone(),
        }
    }

    /// Read the API description file, if one is configured
    pub fn load_api_description(&self) -> Result<Option<String>, ConfigurationError> {
        match &self.api_yml {
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .map_err(|source| ConfigurationError::FileRead {
                    path: path.display().to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }
}
