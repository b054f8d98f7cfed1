use std::sync::Arc;

use async_trait::async_trait;
use lopdf::Document;
use tracing::debug;

use docsift_core::engine::{PdfEngine, PdfSession, PdfText};
use docsift_core::error::{DocsiftError, Result};

const ENGINE: &str = "lopdf";

/// Pure-Rust PDF text extraction. Parsing runs on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

impl LopdfEngine {
    pub fn new() -> Self {
        Self
    }
}

struct LopdfSession {
    document: Arc<Document>,
}

fn engine_error(e: lopdf::Error) -> DocsiftError {
    DocsiftError::engine(ENGINE, e.to_string())
}

fn join_error(e: tokio::task::JoinError) -> DocsiftError {
    DocsiftError::Task(e.to_string())
}

#[async_trait]
impl PdfEngine for LopdfEngine {
    fn name(&self) -> &'static str {
        ENGINE
    }

    async fn open(&self, bytes: Vec<u8>) -> Result<Box<dyn PdfSession>> {
        let document = tokio::task::spawn_blocking(move || Document::load_mem(&bytes))
            .await
            .map_err(join_error)?
            .map_err(engine_error)?;

        debug!(version = %document.version, objects = document.objects.len(), "Parsed PDF");

        Ok(Box::new(LopdfSession {
            document: Arc::new(document),
        }))
    }
}

#[async_trait]
impl PdfSession for LopdfSession {
    async fn extract_text(&mut self) -> Result<PdfText> {
        let document = Arc::clone(&self.document);
        tokio::task::spawn_blocking(move || {
            let pages: Vec<u32> = document.get_pages().keys().copied().collect();
            if pages.is_empty() {
                return Ok(PdfText::default());
            }
            let text = document.extract_text(&pages).map_err(engine_error)?;
            Ok(PdfText {
                text,
                page_count: u32::try_from(pages.len()).ok(),
            })
        })
        .await
        .map_err(join_error)?
    }

    async fn destroy(self: Box<Self>) -> Result<()> {
        drop(self.document);
        Ok(())
    }
}
