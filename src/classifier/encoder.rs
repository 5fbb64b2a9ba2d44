//! Label-encoder artifact: the classifier's fixed center-label order
//! and the categorical symptom-code vocabulary, serialized as JSON next
//! to the model file.

use std::path::Path;

use serde::Deserialize;

use super::ClassifierError;

#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    /// Output class labels, in the classifier's fixed order.
    pub centers: Vec<String>,
    /// Known symptom codes; a record's code is encoded as its index here.
    pub symptom_codes: Vec<String>,
}

impl LabelEncoder {
    /// Load and validate the artifact. Missing or malformed artifacts
    /// are startup-fatal for the service.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        if !path.exists() {
            return Err(ClassifierError::EncoderNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::EncoderParsing(e.to_string()))?;
        let encoder: LabelEncoder =
            serde_json::from_str(&raw).map_err(|e| ClassifierError::EncoderParsing(e.to_string()))?;

        if encoder.centers.is_empty() {
            return Err(ClassifierError::EncoderParsing(
                "encoder has no center labels".into(),
            ));
        }
        if encoder.symptom_codes.is_empty() {
            return Err(ClassifierError::EncoderParsing(
                "encoder has no symptom codes".into(),
            ));
        }
        Ok(encoder)
    }

    /// Categorical index of a symptom code, `None` when out of vocabulary.
    pub fn symptom_index(&self, code: &str) -> Option<usize> {
        self.symptom_codes.iter().position(|c| c == code)
    }
}
