//! Chat endpoint.
//!
//! Always answers HTTP 200: inference failures and unparseable model
//! output are folded into the reply text, never surfaced as error
//! statuses. With no inference client configured, every request is
//! answered in echo mode without touching the network.

use axum::extract::State;
use axum::Json;

use crate::chat::{build_chat_prompt, recover_response, select_context, OUTPUT_DIRECTIVE};
use crate::chat::{ChatRequest, ChatResponse};
use crate::state::AppState;

/// `POST /chat` — answer a coverage question from plan documents.
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    let selection = select_context(&req.message, &state.buckets);
    tracing::debug!(
        category = ?selection.category,
        context_chars = selection.text.len(),
        "context selected"
    );

    let Some(llm) = &state.llm else {
        tracing::info!("inference client unavailable, answering in echo mode");
        return Json(ChatResponse {
            reply: format!("Echo: {}", req.message),
            coverage_info: vec![],
        });
    };

    let prompt = build_chat_prompt(&selection, &req.message);

    match llm.generate(OUTPUT_DIRECTIVE, &prompt).await {
        Ok(raw) => {
            tracing::debug!(raw_chars = raw.len(), "model reply received");
            Json(recover_response(&raw, &selection))
        }
        Err(e) => {
            tracing::warn!(error = %e, "inference call failed");
            Json(ChatResponse {
                reply: format!("Inference error: {e}"),
                coverage_info: vec![],
            })
        }
    }
}
