pub mod api_types;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;

pub use config::{AppConfig, OcrOptions};
pub use document::{ExtractionFailure, ExtractionResult, ExtractionSource, UploadedDocument};
pub use engine::{OcrEngine, OcrWorker, PdfEngine, PdfSession, PdfText};
pub use error::{DocsiftError, Result};
