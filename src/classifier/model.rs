//! ONNX-backed care-center classifier.
//!
//! The model artifact must expose a single `[1, n_centers]` float
//! probability output (probability rows sum to 1). The label-encoder
//! artifact pins the center order and the symptom vocabulary.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;

use super::encoder::LabelEncoder;
use super::types::{CenterClassifier, PatientRecord, Prediction};
use super::ClassifierError;

/// Fixed width of the feature vector fed to the model.
pub const FEATURE_COUNT: usize = 11;

/// Build the single-row feature vector for a record.
///
/// The symptom code is label-encoded through the vocabulary; an
/// out-of-vocabulary code is a validation error, caught before the
/// session ever runs.
pub fn encode_features(
    record: &PatientRecord,
    encoder: &LabelEncoder,
) -> Result<Vec<f32>, ClassifierError> {
    let symptom_idx = encoder
        .symptom_index(&record.symptom_code)
        .ok_or_else(|| ClassifierError::UnknownSymptomCode(record.symptom_code.clone()))?;

    Ok(vec![
        record.age as f32,
        record.gender as f32,
        symptom_idx as f32,
        record.urgency as f32,
        record.time_of_day as f32,
        record.hall_health_load as f32,
        record.uwmc_load as f32,
        record.urgent_care_load as f32,
        record.hall_health_match as f32,
        record.uwmc_match as f32,
        record.urgent_care_match as f32,
    ])
}

/// Index of the maximum element. Ties resolve to the first maximum.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Real classifier using ONNX Runtime for inference.
///
/// Uses interior mutability (Mutex) because ort::Session::run requires
/// `&mut self` but the CenterClassifier trait exposes `&self` for
/// shared use across request handlers.
pub struct OnnxCenterClassifier {
    session: Mutex<Session>,
    encoder: LabelEncoder,
}

impl OnnxCenterClassifier {
    /// Load both artifacts. Either one missing fails startup loudly.
    pub fn load(model_path: &Path, encoder_path: &Path) -> Result<Self, ClassifierError> {
        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
        }
        let encoder = LabelEncoder::load(encoder_path)?;

        let session = Session::builder()
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e: ort::Error| ClassifierError::ModelInit(format!("ONNX load failed: {e}")))?;

        tracing::info!(
            model = %model_path.display(),
            centers = encoder.centers.len(),
            symptom_codes = encoder.symptom_codes.len(),
            "care-center classifier loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            encoder,
        })
    }

    pub fn centers(&self) -> &[String] {
        &self.encoder.centers
    }

    fn infer(&self, features: &[f32]) -> Result<Vec<f32>, ClassifierError> {
        use ort::value::TensorRef;

        let array = ndarray::Array2::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let tensor = TensorRef::from_array_view(&array)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let mut session = self.session.lock().map_err(|_| ClassifierError::LockPoisoned)?;

        let outputs = session
            .run(ort::inputs![tensor])
            .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Output extraction: {e}")))?;

        let n_centers = self.encoder.centers.len();
        if data.len() != n_centers {
            return Err(ClassifierError::Inference(format!(
                "Unexpected output shape: {shape:?}, expected [1, {n_centers}]"
            )));
        }

        Ok(data.to_vec())
    }
}

impl CenterClassifier for OnnxCenterClassifier {
    fn predict(&self, record: &PatientRecord) -> Result<Prediction, ClassifierError> {
        let features = encode_features(record, &self.encoder)?;
        let probabilities = self.infer(&features)?;
        let idx = argmax(&probabilities);

        Ok(Prediction {
            predicted_center: self.encoder.centers[idx].clone(),
            probabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_encoder() -> LabelEncoder {
        serde_json::from_str(
            r#"{"centers":["Hall Health","UW Medical Center","Urgent Care"],
                "symptom_codes":["SYM_FEVER","SYM_COUGH","SYM_INJURY"]}"#,
        )
        .unwrap()
    }

    fn record(symptom: &str) -> PatientRecord {
        PatientRecord {
            age: 24,
            gender: 1,
            symptom_code: symptom.to_string(),
            urgency: 2,
            time_of_day: 14,
            hall_health_load: 0.4,
            uwmc_load: 0.7,
            urgent_care_load: 0.2,
            hall_health_match: 1,
            uwmc_match: 0,
            urgent_care_match: 1,
        }
    }

    #[test]
    fn feature_vector_has_fixed_width_and_order() {
        let features = encode_features(&record("SYM_COUGH"), &test_encoder()).unwrap();
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[0], 24.0); // age
        assert_eq!(features[2], 1.0); // SYM_COUGH index
        assert!((features[6] - 0.7).abs() < f32::EPSILON); // uwmc load
        assert_eq!(features[10], 1.0); // urgent care match flag
    }

    #[test]
    fn unknown_symptom_code_is_a_validation_error() {
        let result = encode_features(&record("SYM_NOPE"), &test_encoder());
        assert!(matches!(
            result,
            Err(ClassifierError::UnknownSymptomCode(code)) if code == "SYM_NOPE"
        ));
    }

    #[test]
    fn argmax_picks_maximum() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[0.9]), 0);
    }

    #[test]
    fn argmax_ties_resolve_to_first() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
    }

    #[test]
    fn missing_model_file_fails_load() {
        let encoder_file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            encoder_file.path(),
            r#"{"centers":["A"],"symptom_codes":["S"]}"#,
        )
        .unwrap();

        let result = OnnxCenterClassifier::load(
            Path::new("/no/such/model.onnx"),
            encoder_file.path(),
        );
        assert!(matches!(result, Err(ClassifierError::ModelNotFound(_))));
    }
}
