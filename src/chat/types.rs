use serde::{Deserialize, Serialize};

use crate::ingest::Category;

/// `POST /chat` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /chat` response body. Always returned with HTTP 200; failures
/// are folded into `reply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(rename = "coverageInfo")]
    pub coverage_info: Vec<CoverageItem>,
}

/// One structured coverage fact extracted from plan documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageItem {
    pub facility: String,
    pub service: String,
    pub coverage: String,
    pub details: String,
}

/// The context chosen for a question: which plan matched (if any) and
/// the document text handed to the model.
#[derive(Debug, Clone)]
pub struct ContextSelection {
    /// `Some` when a plan keyword matched the question; `None` means
    /// the concatenated all-plans context was used.
    pub category: Option<Category>,
    pub text: String,
}

impl ContextSelection {
    pub fn has_context(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
