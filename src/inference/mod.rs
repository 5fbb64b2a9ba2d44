//! Hosted-model inference client.

pub mod client;

pub use client::{HostedLlmClient, LlmGenerate, MockLlm};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference endpoint not configured (set INFERENCE_ENDPOINT and INFERENCE_API_KEY)")]
    NotConfigured,

    #[error("Cannot reach inference endpoint: {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Inference endpoint returned HTTP {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("Malformed inference response: {0}")]
    ResponseParsing(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
