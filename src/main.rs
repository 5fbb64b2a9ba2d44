use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use coverage_api::classifier::OnnxCenterClassifier;
use coverage_api::inference::{HostedLlmClient, LlmGenerate};
use coverage_api::ingest::{self, OcrEngine};
use coverage_api::state::AppState;
use coverage_api::{api, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // Plan documents: missing folder degrades to empty buckets.
    let ocr = build_ocr_engine();
    let buckets = ingest::load_documents(&config::docs_dir(), ocr.as_deref());

    // Classifier artifacts are required: refuse to serve /predict without them.
    let classifier = OnnxCenterClassifier::load(&config::model_path(), &config::encoder_path())
        .context("classifier artifacts must be present at startup (model + label encoder)")?;

    // Inference client is optional: without it, chat answers in echo mode.
    let llm: Option<Arc<dyn LlmGenerate>> = match HostedLlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "inference client ready");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "inference client unavailable, serving chat in echo mode");
            None
        }
    };

    let state = AppState::new(Arc::new(buckets), llm, Arc::new(classifier));

    api::server::serve(state, config::bind_addr())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

#[cfg(feature = "ocr")]
fn build_ocr_engine() -> Option<Box<dyn OcrEngine>> {
    match ingest::ocr::BundledTesseract::new(&config::tessdata_dir()) {
        Ok(engine) => Some(Box::new(engine)),
        Err(e) => {
            tracing::warn!(error = %e, "OCR engine unavailable, scanned PDFs will be skipped");
            None
        }
    }
}

#[cfg(not(feature = "ocr"))]
fn build_ocr_engine() -> Option<Box<dyn OcrEngine>> {
    None
}
