use async_trait::async_trait;

use crate::error::Result;

/// Text and page metadata reported by a PDF engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfText {
    pub text: String,
    pub page_count: Option<u32>,
}

/// Factory for per-request PDF parser instances.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Parses `bytes` into a session. Nothing needs releasing if this fails.
    async fn open(&self, bytes: Vec<u8>) -> Result<Box<dyn PdfSession>>;
}

/// One parsed document, owned by a single extraction request.
#[async_trait]
pub trait PdfSession: Send {
    async fn extract_text(&mut self) -> Result<PdfText>;

    /// Teardown. Called exactly once, after `extract_text` has settled.
    async fn destroy(self: Box<Self>) -> Result<()>;
}

/// Factory for per-request OCR workers.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn language(&self) -> &str;

    /// Whether the backing recognizer can be reached at all.
    async fn is_available(&self) -> bool;

    async fn create_worker(&self) -> Result<Box<dyn OcrWorker>>;
}

#[async_trait]
pub trait OcrWorker: Send {
    /// Recognizes the whole image as one unit.
    async fn recognize(&mut self, image: &[u8]) -> Result<String>;

    /// Called exactly once, after `recognize` has settled.
    async fn terminate(self: Box<Self>) -> Result<()>;
}
