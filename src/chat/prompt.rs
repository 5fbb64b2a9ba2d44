//! Prompt assembly for the hosted model.
//!
//! The output-format directive is the only structure guarantee we get:
//! the endpoint returns free text, so the directive is strict and the
//! real enforcement happens in [`recover`](super::recover).

use super::types::ContextSelection;

/// System directive demanding a single bare JSON object.
pub const OUTPUT_DIRECTIVE: &str = r#"You are an insurance coverage assistant. Answer strictly from the plan documents provided in the prompt.

OUTPUT FORMAT — FOLLOW EXACTLY:
1. Respond with a single JSON object and nothing else. Do NOT wrap it in markdown code fences.
2. The object has exactly two top-level keys:
   - "reply": a plain-language answer to the question (string).
   - "coverageInfo": an array of coverage objects.
3. Every coverageInfo entry has exactly four keys: "facility", "service", "coverage", "details" — all strings.
4. Extract at least 3-5 coverage items from the documents.
5. Never mix information across different plans or categories.
6. If the documents do not answer the question, say so in "reply" and extract whatever coverage facts the documents do state."#;

/// Build the user prompt: role statement naming the detected plan, the
/// (already truncated) context, and the verbatim question.
pub fn build_chat_prompt(selection: &ContextSelection, question: &str) -> String {
    let mut prompt = String::new();

    match selection.category {
        Some(category) => prompt.push_str(&format!(
            "You are answering a question about the {} plan.\n\n",
            category.display_name()
        )),
        None => prompt.push_str("You are answering a question using all available insurance plans.\n\n"),
    }

    prompt.push_str("PLAN DOCUMENTS:\n");
    prompt.push_str(&selection.text);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Question: {question}\n"));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::Category;

    fn selection(category: Option<Category>, text: &str) -> ContextSelection {
        ContextSelection {
            category,
            text: text.to_string(),
        }
    }

    #[test]
    fn directive_demands_bare_json_with_both_keys() {
        assert!(OUTPUT_DIRECTIVE.contains("single JSON object"));
        assert!(OUTPUT_DIRECTIVE.contains("\"reply\""));
        assert!(OUTPUT_DIRECTIVE.contains("\"coverageInfo\""));
        assert!(OUTPUT_DIRECTIVE.contains("code fences"));
        assert!(OUTPUT_DIRECTIVE.contains("3-5"));
        assert!(OUTPUT_DIRECTIVE.contains("Never mix"));
    }

    #[test]
    fn prompt_names_detected_plan() {
        let prompt = build_chat_prompt(
            &selection(Some(Category::Medicare), "Part B terms"),
            "What does Part B cover?",
        );
        assert!(prompt.contains("about the Medicare plan"));
        assert!(prompt.contains("Part B terms"));
        assert!(prompt.contains("Question: What does Part B cover?"));
    }

    #[test]
    fn prompt_without_category_references_all_plans() {
        let prompt = build_chat_prompt(&selection(None, "combined context"), "copay?");
        assert!(prompt.contains("all available insurance plans"));
        assert!(prompt.contains("combined context"));
    }

    #[test]
    fn question_is_verbatim() {
        let question = "Is an ER visit covered? (even at 3am!)";
        let prompt = build_chat_prompt(&selection(None, ""), question);
        assert!(prompt.contains(question));
    }
}
