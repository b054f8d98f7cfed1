use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{ExtractionFailure, ExtractionResult, ExtractionSource};

// --- Extract ---

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
    pub source: ExtractionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

impl From<ExtractionResult> for ExtractResponse {
    fn from(r: ExtractionResult) -> Self {
        Self {
            text: r.text,
            source: r.source,
            pages: r.page_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<ExtractionFailure> for ErrorResponse {
    fn from(f: ExtractionFailure) -> Self {
        Self { error: f.message }
    }
}

// --- Health ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ocr_available: bool,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
}
