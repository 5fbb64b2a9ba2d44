use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Insurance Coverage API";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,coverage_api=debug"
}

/// Root of the plan-document tree scanned at startup.
pub fn docs_dir() -> PathBuf {
    env_path("COVERAGE_DOCS_DIR", "data")
}

/// Path to the serialized care-center classifier.
pub fn model_path() -> PathBuf {
    env_path("COVERAGE_MODEL_PATH", "models/triage_model.onnx")
}

/// Path to the label-encoder artifact (center labels + symptom vocabulary).
pub fn encoder_path() -> PathBuf {
    env_path("COVERAGE_ENCODER_PATH", "models/label_encoder.json")
}

/// Tesseract traineddata directory for the OCR fallback.
pub fn tessdata_dir() -> PathBuf {
    env_path("TESSDATA_DIR", "tessdata")
}

/// Socket address to serve on. Defaults to 127.0.0.1:8000.
pub fn bind_addr() -> SocketAddr {
    let host: IpAddr = std::env::var("COVERAGE_HOST")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let port: u16 = std::env::var("COVERAGE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    SocketAddr::new(host, port)
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_defaults_to_loopback_8000() {
        let addr = bind_addr();
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn docs_dir_defaults_to_data() {
        assert_eq!(docs_dir(), PathBuf::from("data"));
    }

    #[test]
    fn artifact_paths_under_models() {
        assert!(model_path().starts_with("models"));
        assert!(encoder_path().starts_with("models"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
