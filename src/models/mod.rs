//! # Models
//!
//! Request-scoped data carried through a publish: the annotation document and
//! the metadata describing the request it belongs to.

pub mod annotation;
pub mod context;

pub use annotation::{Annotation, AnnotationSet};
pub use context::{
    DocumentHash, OriginSystemId, RequestContext, TransactionId, DOCUMENT_HASH_HEADER,
    ORIGIN_SYSTEM_ID_HEADER, PREVIOUS_DOCUMENT_HASH_HEADER, TRANSACTION_ID_HEADER,
};
