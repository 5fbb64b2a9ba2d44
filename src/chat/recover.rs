//! Best-effort recovery of `{reply, coverageInfo}` from free-text model
//! output.
//!
//! The endpoint gives no structural guarantee, so recovery runs as a
//! pipeline of named total stages (de-fence, brace-slice, parse,
//! fallback), each returning an explicit result for the next stage.
//! Nothing in here may propagate an error past the endpoint boundary.

use serde::Deserialize;

use super::fallback::fallback_items;
use super::types::{ChatResponse, ContextSelection, CoverageItem};

/// Stage 1: when code fences are present, keep only the content of the
/// first fenced block, preferring a ```json-tagged block over a generic
/// one. Text without fences passes through unchanged.
pub fn strip_code_fences(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        return match rest.find("```") {
            Some(end) => &rest[..end],
            None => rest,
        };
    }
    if let Some(start) = text.find("```") {
        let rest = &text[start + 3..];
        return match rest.find("```") {
            Some(end) => &rest[..end],
            None => rest,
        };
    }
    text
}

/// Stage 2: slice from the first `{` to the last `}` inclusive,
/// discarding surrounding prose. `None` when no object delimiters exist.
pub fn slice_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

/// Outcome of a successful parse stage.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredPayload {
    pub reply: String,
    pub items: Vec<CoverageItem>,
}

/// Stage 3: parse the sliced text. `reply` defaults to empty,
/// `coverageInfo` entries missing any of the four keys are dropped
/// rather than failing the whole parse.
pub fn parse_payload(text: &str) -> Option<RecoveredPayload> {
    #[derive(Deserialize)]
    struct RawPayload {
        #[serde(default)]
        reply: Option<String>,
        #[serde(default, rename = "coverageInfo")]
        coverage_info: Option<Vec<serde_json::Value>>,
    }

    let raw: RawPayload = serde_json::from_str(text).ok()?;
    Some(RecoveredPayload {
        reply: raw.reply.unwrap_or_default(),
        items: parse_items_lenient(raw.coverage_info.as_deref()),
    })
}

/// Parse an array leniently — skip items that fail to deserialize.
fn parse_items_lenient(items: Option<&[serde_json::Value]>) -> Vec<CoverageItem> {
    match items {
        None => vec![],
        Some(arr) => arr
            .iter()
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect(),
    }
}

/// Run the full recovery pipeline over raw model output.
///
/// Parse failure at any stage turns the entire raw text into the reply
/// with no items (stage 4); an empty item list with non-empty context
/// substitutes the static per-plan table (stage 5) so the client never
/// sees an empty coverage list when documents were available.
pub fn recover_response(raw: &str, selection: &ContextSelection) -> ChatResponse {
    let trimmed = raw.trim();
    let defenced = strip_code_fences(trimmed);
    let parsed = slice_braces(defenced).and_then(parse_payload);

    let (reply, mut coverage_info) = match parsed {
        Some(payload) => (payload.reply, payload.items),
        None => (trimmed.to_string(), Vec::new()),
    };

    if coverage_info.is_empty() && selection.has_context() {
        tracing::debug!(category = ?selection.category, "no coverage items recovered, using fallback table");
        coverage_info = fallback_items(selection.category);
    }

    ChatResponse {
        reply,
        coverage_info,
    }
}
