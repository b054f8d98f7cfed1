use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use docsift_core::document::{ExtractionResult, ExtractionSource};
use docsift_core::engine::OcrEngine;
use docsift_core::error::Result;

use crate::{settle, within};

/// Optical recognition for image uploads.
///
/// The worker is only started once an image actually arrives, and it is
/// terminated on every exit path before the result is handed back.
#[derive(Clone)]
pub struct OcrAdapter {
    engine: Arc<dyn OcrEngine>,
    timeout: Duration,
}

impl OcrAdapter {
    pub fn new(engine: Arc<dyn OcrEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub fn engine(&self) -> &Arc<dyn OcrEngine> {
        &self.engine
    }

    #[instrument(
        skip_all,
        fields(engine = self.engine.name(), language = self.engine.language(), bytes = image.len())
    )]
    pub async fn extract_ocr(&self, image: Vec<u8>) -> Result<ExtractionResult> {
        let mut worker = within(self.timeout, "starting the OCR worker", self.engine.create_worker()).await?;
        debug!("OCR worker started");

        let outcome = within(self.timeout, "recognizing the image", settle(worker.recognize(&image))).await;

        if let Err(e) = worker.terminate().await {
            warn!(error = %e, "OCR worker termination failed");
        }
        debug!("OCR worker terminated");

        let text = outcome?;
        ExtractionResult::from_raw(&text, ExtractionSource::Ocr, None)
    }
}
