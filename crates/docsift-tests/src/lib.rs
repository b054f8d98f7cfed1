//! Shared fixtures for the integration suites: PDF builders and a helper that
//! serves the router on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use docsift_core::AppConfig;
use docsift_extraction::testing::{FakeOcrEngine, FakePdfEngine};
use docsift_extraction::{ExtractionDispatcher, LopdfEngine};
use docsift_server::{build_app, AppState};

/// Builds a single-page PDF. Each entry becomes its own text line; an empty
/// slice yields a page that only paints a filled rectangle.
pub fn build_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = Vec::new();
    if lines.is_empty() {
        operations.push(Operation::new(
            "re",
            vec![50.into(), 50.into(), 400.into(), 600.into()],
        ));
        operations.push(Operation::new("f", vec![]));
    } else {
        let mut y: i64 = 700;
        for line in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 24.into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
            y -= 40;
        }
    }
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("content should encode"),
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("pdf should serialize");
    bytes
}

/// Dispatcher with the real lopdf engine and a scripted OCR engine.
pub fn lopdf_dispatcher(ocr: FakeOcrEngine) -> ExtractionDispatcher {
    ExtractionDispatcher::new(
        Arc::new(LopdfEngine::new()),
        Arc::new(ocr),
        Duration::from_secs(10),
    )
}

pub fn fake_dispatcher(pdf: FakePdfEngine, ocr: FakeOcrEngine) -> ExtractionDispatcher {
    ExtractionDispatcher::new(Arc::new(pdf), Arc::new(ocr), Duration::from_secs(10))
}

/// Serves the full app on 127.0.0.1 and returns its base URL.
pub async fn spawn_app(config: AppConfig, dispatcher: ExtractionDispatcher) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has no address");
    let app = build_app(AppState::new(config, dispatcher));

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    format!("http://{addr}")
}
