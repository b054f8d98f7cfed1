use std::time::Duration;

use thiserror::Error;

use crate::document::ExtractionSource;

/// Message used when an engine failure renders to nothing useful.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to extract text";

#[derive(Error, Debug)]
pub enum DocsiftError {
    #[error("No file provided")]
    MissingInput,

    #[error("Unsupported file type: {0}. Upload a PDF or image.")]
    UnsupportedType(String),

    #[error("{}", empty_extraction_message(.0))]
    EmptyExtraction(ExtractionSource),

    #[error("{message}")]
    Engine { engine: &'static str, message: String },

    #[error("Extraction timed out after {}s while {stage}", .after.as_secs())]
    Timeout { stage: &'static str, after: Duration },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

impl DocsiftError {
    pub fn engine(engine: &'static str, message: impl Into<String>) -> Self {
        Self::Engine {
            engine,
            message: message.into(),
        }
    }

    /// HTTP status the error is surfaced with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingInput | Self::UnsupportedType(_) => 400,
            Self::EmptyExtraction(_) => 422,
            Self::Engine { .. } | Self::Timeout { .. } | Self::Io(_) | Self::Task(_) => 500,
        }
    }

    /// True for failures raised by an engine rather than by request validation
    /// or an empty result. These are the ones logged server-side in full.
    pub fn is_engine_failure(&self) -> bool {
        self.status_code() >= 500
    }
}

fn empty_extraction_message(source: &ExtractionSource) -> &'static str {
    match source {
        ExtractionSource::Pdf => {
            "No text found in the PDF. It may be image-based — try uploading as an image for OCR."
        }
        ExtractionSource::Ocr => "No text could be recognized in the image.",
    }
}

pub type Result<T> = std::result::Result<T, DocsiftError>;
