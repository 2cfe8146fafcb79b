//! # Publish Orchestration
//!
//! Composes the draft store and notifier clients into the save-then-publish and
//! publish-from-store workflows. This is the only place that sequences
//! downstream calls and classifies their failures.

pub mod publisher;

pub use publisher::{AnnotationsPublisher, PublishStage};
