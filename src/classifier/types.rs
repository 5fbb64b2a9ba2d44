use serde::{Deserialize, Serialize};

use super::model::argmax;
use super::ClassifierError;

/// `POST /predict` request body. Field types are enforced at the
/// request-validation boundary; the symptom code is categorical and
/// must exist in the label encoder's vocabulary.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientRecord {
    pub age: i64,
    pub gender: i64,
    pub symptom_code: String,
    pub urgency: i64,
    pub time_of_day: i64,
    pub hall_health_load: f64,
    pub uwmc_load: f64,
    pub urgent_care_load: f64,
    pub hall_health_match: i64,
    pub uwmc_match: i64,
    pub urgent_care_match: i64,
}

/// `POST /predict` response body. `probabilities` is index-aligned with
/// the encoder's fixed center order; `predicted_center` is the label at
/// the argmax.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_center: String,
    pub probabilities: Vec<f32>,
}

/// Classifier seam: structured record in, label + probability vector out.
pub trait CenterClassifier: Send + Sync {
    fn predict(&self, record: &PatientRecord) -> Result<Prediction, ClassifierError>;
}

/// Mock classifier for testing — returns a fixed probability vector.
pub struct MockClassifier {
    pub centers: Vec<String>,
    pub probabilities: Vec<f32>,
}

impl MockClassifier {
    pub fn new(centers: &[&str], probabilities: &[f32]) -> Self {
        Self {
            centers: centers.iter().map(|c| c.to_string()).collect(),
            probabilities: probabilities.to_vec(),
        }
    }
}

impl CenterClassifier for MockClassifier {
    fn predict(&self, record: &PatientRecord) -> Result<Prediction, ClassifierError> {
        if record.symptom_code.is_empty() {
            return Err(ClassifierError::UnknownSymptomCode(String::new()));
        }
        let idx = argmax(&self.probabilities);
        Ok(Prediction {
            predicted_center: self.centers[idx].clone(),
            probabilities: self.probabilities.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PatientRecord {
        PatientRecord {
            age: 24,
            gender: 1,
            symptom_code: "SYM_FEVER".into(),
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
    fn mock_prediction_is_argmax_aligned() {
        let classifier = MockClassifier::new(
            &["Hall Health", "UW Medical Center", "Urgent Care"],
            &[0.2, 0.1, 0.7],
        );
        let prediction = classifier.predict(&sample_record()).unwrap();
        assert_eq!(prediction.predicted_center, "Urgent Care");
        assert_eq!(prediction.probabilities.len(), 3);
    }

    #[test]
    fn record_deserializes_from_typed_json() {
        let json = r#"{
            "age": 30, "gender": 0, "symptom_code": "SYM_COUGH",
            "urgency": 1, "time_of_day": 9,
            "hall_health_load": 0.5, "uwmc_load": 0.5, "urgent_care_load": 0.5,
            "hall_health_match": 1, "uwmc_match": 1, "urgent_care_match": 0
        }"#;
        let record: PatientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.symptom_code, "SYM_COUGH");
        assert_eq!(record.time_of_day, 9);
    }

    #[test]
    fn record_with_wrong_types_is_rejected() {
        let json = r#"{
            "age": "thirty", "gender": 0, "symptom_code": "SYM_COUGH",
            "urgency": 1, "time_of_day": 9,
            "hall_health_load": 0.5, "uwmc_load": 0.5, "urgent_care_load": 0.5,
            "hall_health_match": 1, "uwmc_match": 1, "urgent_care_match": 0
        }"#;
        assert!(serde_json::from_str::<PatientRecord>(json).is_err());
    }

    #[test]
    fn record_with_missing_field_is_rejected() {
        let json = r#"{"age": 30}"#;
        assert!(serde_json::from_str::<PatientRecord>(json).is_err());
    }
}
