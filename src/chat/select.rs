//! Context selection: route a question to one plan bucket by keyword,
//! or fall back to all plans, then cap the context size.

use crate::ingest::bucket::match_keyword;
use crate::ingest::{Category, DocumentBuckets};

use super::types::ContextSelection;

/// Hard cap on context characters, keeping the leading portion only.
/// Protects the inference endpoint's input-size limit.
pub const MAX_CONTEXT_CHARS: usize = 50_000;

/// Buckets included (in order) when no plan keyword matches the question.
const ALL_PLANS: &[Category] = &[Category::Medicare, Category::AppleCare, Category::Health101];

/// Choose context for a user message.
///
/// Keyword precedence follows the shared table (medicare > apple >
/// health); no match concatenates all three named plans, each under a
/// section header.
pub fn select_context(message: &str, buckets: &DocumentBuckets) -> ContextSelection {
    let (category, text) = match match_keyword(message) {
        Some(category) => (Some(category), buckets.get(category).to_string()),
        None => (None, concat_all_plans(buckets)),
    };

    ContextSelection {
        category,
        text: truncate_chars(&text, MAX_CONTEXT_CHARS),
    }
}

fn concat_all_plans(buckets: &DocumentBuckets) -> String {
    let mut combined = String::new();
    for &category in ALL_PLANS {
        let text = buckets.get(category);
        if text.trim().is_empty() {
            continue;
        }
        if !combined.is_empty() {
            combined.push_str("\n\n");
        }
        combined.push_str(&format!("=== {} ===\n", category.display_name()));
        combined.push_str(text);
    }
    combined
}

/// Truncate to at most `max` characters, keeping the leading portion.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
