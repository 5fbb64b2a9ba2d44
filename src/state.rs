//! Shared application state, built once at startup and cloned into
//! every request handler.

use std::sync::Arc;

use crate::classifier::CenterClassifier;
use crate::inference::LlmGenerate;
use crate::ingest::DocumentBuckets;

/// Handler state. The buckets are read-only after startup, so sharing
/// is plain `Arc` with no locking. The inference client is an optional
/// capability: absence routes chat requests to the echo fallback.
#[derive(Clone)]
pub struct AppState {
    pub buckets: Arc<DocumentBuckets>,
    pub llm: Option<Arc<dyn LlmGenerate>>,
    pub classifier: Arc<dyn CenterClassifier>,
}

impl AppState {
    pub fn new(
        buckets: Arc<DocumentBuckets>,
        llm: Option<Arc<dyn LlmGenerate>>,
        classifier: Arc<dyn CenterClassifier>,
    ) -> Self {
        Self {
            buckets,
            llm,
            classifier,
        }
    }
}
