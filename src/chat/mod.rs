//! Chat pipeline: pick plan context for a question, build the model
//! prompt, and recover a structured answer from free-text model output.

pub mod fallback;
pub mod prompt;
pub mod recover;
pub mod select;
pub mod types;

pub use prompt::{build_chat_prompt, OUTPUT_DIRECTIVE};
pub use recover::recover_response;
pub use select::select_context;
pub use types::{ChatRequest, ChatResponse, ContextSelection, CoverageItem};
