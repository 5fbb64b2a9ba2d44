//! Care-center prediction endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::classifier::{PatientRecord, Prediction};
use crate::state::AppState;

/// `POST /predict` — classify a patient record into a care center.
///
/// Malformed bodies are rejected by the Json extractor before this
/// handler runs; an out-of-vocabulary symptom code surfaces as a 422
/// validation error before the classifier session is invoked.
pub async fn predict(
    State(state): State<AppState>,
    Json(record): Json<PatientRecord>,
) -> Result<Json<Prediction>, ApiError> {
    let prediction = state.classifier.predict(&record)?;
    tracing::debug!(
        predicted_center = %prediction.predicted_center,
        "prediction served"
    );
    Ok(Json(prediction))
}
