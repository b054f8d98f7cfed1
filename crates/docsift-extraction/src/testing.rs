//! Scriptable in-memory engines that count acquisitions and releases.
//! Available to other crates through the `testing` feature.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use docsift_core::engine::{OcrEngine, OcrWorker, PdfEngine, PdfSession, PdfText};
use docsift_core::error::{DocsiftError, Result};

/// What a fake engine does once acquired.
#[derive(Debug, Clone)]
pub enum Script {
    Text(String, Option<u32>),
    Fail(String),
    Hang,
    Panic,
}

#[derive(Debug, Default)]
pub struct Counters {
    pub acquired: AtomicUsize,
    pub released: AtomicUsize,
}

impl Counters {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

async fn run_script(script: &Script) -> Result<String> {
    match script {
        Script::Text(text, _) => Ok(text.clone()),
        Script::Fail(message) => Err(DocsiftError::engine("fake", message.clone())),
        Script::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
        Script::Panic => panic!("engine blew up"),
    }
}

pub struct FakePdfEngine {
    pub script: Script,
    pub fail_open: bool,
    pub fail_release: bool,
    pub counters: Arc<Counters>,
}

impl FakePdfEngine {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            fail_open: false,
            fail_release: false,
            counters: Arc::new(Counters::default()),
        }
    }
}

struct FakePdfSession {
    script: Script,
    fail_release: bool,
    counters: Arc<Counters>,
}

#[async_trait]
impl PdfEngine for FakePdfEngine {
    fn name(&self) -> &'static str {
        "fake-pdf"
    }

    async fn open(&self, _bytes: Vec<u8>) -> Result<Box<dyn PdfSession>> {
        if self.fail_open {
            return Err(DocsiftError::engine("fake-pdf", "Invalid PDF structure"));
        }
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePdfSession {
            script: self.script.clone(),
            fail_release: self.fail_release,
            counters: self.counters.clone(),
        }))
    }
}

#[async_trait]
impl PdfSession for FakePdfSession {
    async fn extract_text(&mut self) -> Result<PdfText> {
        let text = run_script(&self.script).await?;
        let page_count = match &self.script {
            Script::Text(_, pages) => *pages,
            _ => None,
        };
        Ok(PdfText { text, page_count })
    }

    async fn destroy(self: Box<Self>) -> Result<()> {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
        if self.fail_release {
            return Err(DocsiftError::engine("fake-pdf", "destroy failed"));
        }
        Ok(())
    }
}

pub struct FakeOcrEngine {
    pub script: Script,
    pub fail_release: bool,
    pub counters: Arc<Counters>,
}

impl FakeOcrEngine {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            fail_release: false,
            counters: Arc::new(Counters::default()),
        }
    }
}

struct FakeOcrWorker {
    script: Script,
    fail_release: bool,
    counters: Arc<Counters>,
}

#[async_trait]
impl OcrEngine for FakeOcrEngine {
    fn name(&self) -> &'static str {
        "fake-ocr"
    }

    fn language(&self) -> &str {
        "eng"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn create_worker(&self) -> Result<Box<dyn OcrWorker>> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeOcrWorker {
            script: self.script.clone(),
            fail_release: self.fail_release,
            counters: self.counters.clone(),
        }))
    }
}

#[async_trait]
impl OcrWorker for FakeOcrWorker {
    async fn recognize(&mut self, _image: &[u8]) -> Result<String> {
        run_script(&self.script).await
    }

    async fn terminate(self: Box<Self>) -> Result<()> {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
        if self.fail_release {
            return Err(DocsiftError::engine("fake-ocr", "terminate failed"));
        }
        Ok(())
    }
}
