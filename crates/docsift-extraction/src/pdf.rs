use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use docsift_core::document::{ExtractionResult, ExtractionSource};
use docsift_core::engine::PdfEngine;
use docsift_core::error::Result;

use crate::{settle, within};

/// Structured text extraction for `application/pdf` uploads.
///
/// Every call opens its own engine session and destroys it before returning,
/// whether extraction succeeded, came back empty, failed or timed out.
#[derive(Clone)]
pub struct PdfAdapter {
    engine: Arc<dyn PdfEngine>,
    timeout: Duration,
}

impl PdfAdapter {
    pub fn new(engine: Arc<dyn PdfEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    #[instrument(skip_all, fields(engine = self.engine.name(), bytes = bytes.len()))]
    pub async fn extract_pdf(&self, bytes: Vec<u8>) -> Result<ExtractionResult> {
        let mut session = within(self.timeout, "opening the PDF", self.engine.open(bytes)).await?;
        debug!("PDF engine acquired");

        let outcome = within(self.timeout, "extracting PDF text", settle(session.extract_text())).await;

        if let Err(e) = session.destroy().await {
            warn!(error = %e, "PDF engine teardown failed");
        }
        debug!("PDF engine released");

        let pdf = outcome?;
        // Engines that cannot report pages still produced one.
        let pages = pdf.page_count.filter(|n| *n >= 1).unwrap_or(1);
        ExtractionResult::from_raw(&pdf.text, ExtractionSource::Pdf, Some(pages))
    }
}
