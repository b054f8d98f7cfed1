use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use docsift_core::config::AppConfig;
use docsift_core::document::{ExtractionFailure, ExtractionResult, UploadedDocument};
use docsift_core::engine::{OcrEngine, PdfEngine};
use docsift_core::error::{DocsiftError, Result};

use crate::classify::{classify, MediaKind};
use crate::lopdf_engine::LopdfEngine;
use crate::ocr::OcrAdapter;
use crate::pdf::PdfAdapter;
use crate::tesseract::TesseractEngine;

/// Single entry point for an upload: classifies it, hands it to the matching
/// adapter, and turns every outcome into either a result or a failure.
#[derive(Clone)]
pub struct ExtractionDispatcher {
    pdf: PdfAdapter,
    ocr: OcrAdapter,
}

impl ExtractionDispatcher {
    pub fn new(pdf_engine: Arc<dyn PdfEngine>, ocr_engine: Arc<dyn OcrEngine>, timeout: Duration) -> Self {
        Self {
            pdf: PdfAdapter::new(pdf_engine, timeout),
            ocr: OcrAdapter::new(ocr_engine, timeout),
        }
    }

    /// lopdf for PDFs, the tesseract binary for images.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(LopdfEngine::new()),
            Arc::new(TesseractEngine::new(config.ocr.clone())),
            config.extraction_timeout(),
        )
    }

    pub fn ocr_engine(&self) -> &Arc<dyn OcrEngine> {
        self.ocr.engine()
    }

    pub async fn extract(
        &self,
        document: UploadedDocument,
    ) -> std::result::Result<ExtractionResult, ExtractionFailure> {
        let span = info_span!(
            "extract",
            request_id = %Uuid::new_v4(),
            media_type = %document.declared_media_type,
            bytes = document.len(),
        );

        async move {
            match self.route(document).await {
                Ok(result) => {
                    info!(
                        source = %result.source,
                        chars = result.text.len(),
                        pages = ?result.page_count,
                        "Extraction succeeded"
                    );
                    Ok(result)
                }
                Err(e) if e.is_engine_failure() => {
                    error!(error = ?e, "Extraction error");
                    Err(ExtractionFailure::from(&e))
                }
                Err(e) => {
                    warn!(status = e.status_code(), error = %e, "Extraction rejected");
                    Err(ExtractionFailure::from(&e))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn route(&self, document: UploadedDocument) -> Result<ExtractionResult> {
        let UploadedDocument {
            bytes,
            declared_media_type,
            ..
        } = document;

        let Some(bytes) = bytes else {
            return Err(DocsiftError::MissingInput);
        };

        // Adapters run on their own task so that a dropped request cannot skip
        // the release step. A panic while acquiring an engine surfaces here as
        // a join error; panics during extraction are caught by the adapter.
        let handle = match classify(&declared_media_type) {
            MediaKind::Pdf => {
                let pdf = self.pdf.clone();
                tokio::spawn(async move { pdf.extract_pdf(bytes).await }.in_current_span())
            }
            MediaKind::Image => {
                let ocr = self.ocr.clone();
                tokio::spawn(async move { ocr.extract_ocr(bytes).await }.in_current_span())
            }
            MediaKind::Unsupported => {
                return Err(DocsiftError::UnsupportedType(declared_media_type));
            }
        };

        handle
            .await
            .map_err(|e| DocsiftError::Task(e.to_string()))?
    }
}
