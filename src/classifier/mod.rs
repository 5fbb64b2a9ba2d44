//! Pre-trained care-center triage classifier, loaded from disk at
//! startup and invoked by `POST /predict`.

pub mod encoder;
pub mod model;
pub mod types;

pub use encoder::LabelEncoder;
pub use model::OnnxCenterClassifier;
pub use types::{CenterClassifier, MockClassifier, PatientRecord, Prediction};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Classifier model not found at: {0}")]
    ModelNotFound(PathBuf),

    #[error("Label encoder not found at: {0}")]
    EncoderNotFound(PathBuf),

    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    #[error("Label encoder parsing failed: {0}")]
    EncoderParsing(String),

    #[error("Unknown symptom code: {0}")]
    UnknownSymptomCode(String),

    #[error("Classifier inference failed: {0}")]
    Inference(String),

    #[error("Session lock poisoned")]
    LockPoisoned,
}
