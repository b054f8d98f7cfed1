//! OCR through the `tesseract` command-line binary.
//!
//! A worker is a private scratch directory; recognition spawns one process
//! per image and the directory is removed on termination.

use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

use docsift_core::config::OcrOptions;
use docsift_core::engine::{OcrEngine, OcrWorker};
use docsift_core::error::{DocsiftError, Result};

const ENGINE: &str = "tesseract";

pub struct TesseractEngine {
    options: OcrOptions,
}

impl TesseractEngine {
    /// Does not touch the binary; nothing runs until the first image.
    pub fn new(options: OcrOptions) -> Self {
        Self { options }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(OcrOptions::default())
    }
}

struct TesseractWorker {
    options: OcrOptions,
    workdir: TempDir,
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        ENGINE
    }

    fn language(&self) -> &str {
        &self.options.language
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.options.command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    async fn create_worker(&self) -> Result<Box<dyn OcrWorker>> {
        let workdir = tempfile::Builder::new().prefix("docsift-ocr-").tempdir()?;
        debug!(workdir = %workdir.path().display(), "Created OCR scratch directory");
        Ok(Box::new(TesseractWorker {
            options: self.options.clone(),
            workdir,
        }))
    }
}

#[async_trait]
impl OcrWorker for TesseractWorker {
    async fn recognize(&mut self, image: &[u8]) -> Result<String> {
        let input = self.workdir.path().join("input");
        tokio::fs::write(&input, image).await?;

        let output = Command::new(&self.options.command)
            .arg(&input)
            .arg("stdout")
            .args(["-l", &self.options.language])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(DocsiftError::engine(
                    ENGINE,
                    format!("tesseract failed: {}", stderr.trim()),
                ))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DocsiftError::engine(
                ENGINE,
                format!("{} not found (install tesseract-ocr)", self.options.command),
            )),
            Err(e) => Err(DocsiftError::Io(e)),
        }
    }

    async fn terminate(self: Box<Self>) -> Result<()> {
        self.workdir.close()?;
        Ok(())
    }
}
