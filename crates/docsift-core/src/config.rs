use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const OCR_LANGUAGE: &str = "eng";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 120;

/// Fixed recognizer settings handed to the OCR engine at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OcrOptions {
    pub command: String,
    pub language: String,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            command: "tesseract".into(),
            language: OCR_LANGUAGE.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub max_upload_bytes: usize,
    pub extraction_timeout_secs: u64,
    pub ocr: OcrOptions,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            extraction_timeout_secs: std::env::var("EXTRACTION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_EXTRACTION_TIMEOUT_SECS),
            ocr: OcrOptions {
                command: std::env::var("TESSERACT_CMD").unwrap_or_else(|_| "tesseract".into()),
                language: OCR_LANGUAGE.into(),
            },
        }
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".into(),
            server_port: 8080,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            extraction_timeout_secs: DEFAULT_EXTRACTION_TIMEOUT_SECS,
            ocr: OcrOptions::default(),
        }
    }
}
