use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;

use docsift_core::error::{DocsiftError, Result};

pub mod classify;
pub mod dispatcher;
pub mod lopdf_engine;
pub mod ocr;
pub mod pdf;
pub mod tesseract;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use classify::{classify, MediaKind, IMAGE_MEDIA_TYPES, PDF_MEDIA_TYPE};
pub use dispatcher::ExtractionDispatcher;
pub use lopdf_engine::LopdfEngine;
pub use ocr::OcrAdapter;
pub use pdf::PdfAdapter;
pub use tesseract::TesseractEngine;

/// Awaits `fut` for at most `limit`. On expiry the future is dropped before
/// this returns.
pub(crate) async fn within<T>(
    limit: Duration,
    stage: &'static str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(outcome) => outcome,
        Err(_) => Err(DocsiftError::Timeout {
            stage,
            after: limit,
        }),
    }
}

/// Turns a panic inside `fut` into an error so the caller still reaches its
/// release step.
pub(crate) async fn settle<T>(fut: impl Future<Output = Result<T>>) -> Result<T> {
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Err(DocsiftError::Task(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "engine panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn settle_passes_outcome_through() {
        assert_eq!(settle(async { Ok(7) }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn settle_converts_panic_to_task_error() {
        let err = settle(async {
            if true {
                panic!("decoder exploded");
            }
            Ok(())
        })
        .await
        .unwrap_err();

        assert!(matches!(err, DocsiftError::Task(_)));
        assert_eq!(err.to_string(), "Extraction task failed: decoder exploded");
        assert_eq!(err.status_code(), 500);
    }
}
