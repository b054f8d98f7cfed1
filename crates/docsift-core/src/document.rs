use serde::{Deserialize, Serialize};

use crate::error::{DocsiftError, GENERIC_FAILURE_MESSAGE};

/// A single upload as received from the client. Lives for one request only.
#[derive(Debug, Clone, Default)]
pub struct UploadedDocument {
    /// Raw payload. `None` when the request carried no file at all.
    pub bytes: Option<Vec<u8>>,
    /// Content type attached to the upload. The only routing input.
    pub declared_media_type: String,
    pub file_name: Option<String>,
}

impl UploadedDocument {
    pub fn new(bytes: Vec<u8>, declared_media_type: impl Into<String>) -> Self {
        Self {
            bytes: Some(bytes),
            declared_media_type: declared_media_type.into(),
            file_name: None,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    Pdf,
    Ocr,
}

impl ExtractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Ocr => "ocr",
        }
    }
}

impl std::fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful extraction. `text` is always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
    pub source: ExtractionSource,
    pub page_count: Option<u32>,
}

impl ExtractionResult {
    /// Builds a result from raw engine output, or the source-specific empty
    /// extraction error when nothing but whitespace came back.
    pub fn from_raw(
        raw: &str,
        source: ExtractionSource,
        page_count: Option<u32>,
    ) -> Result<Self, DocsiftError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(DocsiftError::EmptyExtraction(source));
        }
        Ok(Self {
            text: text.to_string(),
            source,
            page_count,
        })
    }
}

/// Structured failure handed back to the caller instead of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub message: String,
    pub status_code: u16,
}

impl From<&DocsiftError> for ExtractionFailure {
    fn from(err: &DocsiftError) -> Self {
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            message,
            status_code: err.status_code(),
        }
    }
}

impl From<DocsiftError> for ExtractionFailure {
    fn from(err: DocsiftError) -> Self {
        Self::from(&err)
    }
}
