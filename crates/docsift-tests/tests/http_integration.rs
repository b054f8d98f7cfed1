use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use docsift_core::AppConfig;
use docsift_extraction::testing::{FakeOcrEngine, FakePdfEngine, Script};
use docsift_tests::{build_pdf, fake_dispatcher, lopdf_dispatcher, spawn_app};

fn file_form(bytes: Vec<u8>, file_name: &str, mime: &str) -> Form {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime)
        .expect("valid mime");
    Form::new().part("file", part)
}

async fn post_form(base: &str, form: Form) -> (StatusCode, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/extract"))
        .multipart(form)
        .send()
        .await
        .expect("request failed");
    let status = response.status();
    let body = response.json().await.expect("body was not JSON");
    (status, body)
}

fn ocr_hello() -> FakeOcrEngine {
    FakeOcrEngine::new(Script::Text("HELLO\n".to_string(), None))
}

// ---------------------------------------------------------------------------
// Success paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pdf_upload_returns_text_source_and_pages() {
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr_hello())).await;

    let (status, body) = post_form(
        &base,
        file_form(build_pdf(&["Invoice #1001"]), "invoice.pdf", "application/pdf"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({ "text": "Invoice #1001", "source": "pdf", "pages": 1 })
    );
}

#[tokio::test]
async fn image_upload_returns_ocr_text_without_pages() {
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr_hello())).await;

    let (status, body) = post_form(&base, file_form(vec![0x89, b'P', b'N', b'G'], "hello.png", "image/png")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "text": "HELLO", "source": "ocr" }));
}

#[tokio::test]
async fn unrelated_fields_are_ignored() {
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr_hello())).await;

    let form = Form::new()
        .text("note", "ignore me")
        .part(
            "file",
            Part::bytes(vec![1, 2, 3])
                .file_name("scan.jpg")
                .mime_str("image/jpeg")
                .expect("valid mime"),
        );
    let (status, body) = post_form(&base, form).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "ocr");
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_file_field_is_400() {
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr_hello())).await;

    let (status, body) = post_form(&base, Form::new().text("other", "value")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "error": "No file provided" }));
}

#[tokio::test]
async fn plain_text_upload_is_400() {
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr_hello())).await;

    let (status, body) = post_form(&base, file_form(b"hello".to_vec(), "notes.txt", "text/plain")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        serde_json::json!({ "error": "Unsupported file type: text/plain. Upload a PDF or image." })
    );
}

#[tokio::test]
async fn scanned_pdf_is_422() {
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr_hello())).await;

    let (status, body) = post_form(&base, file_form(build_pdf(&[]), "scan.pdf", "application/pdf")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        serde_json::json!({
            "error": "No text found in the PDF. It may be image-based — try uploading as an image for OCR."
        })
    );
}

#[tokio::test]
async fn blank_image_is_422() {
    let ocr = FakeOcrEngine::new(Script::Text("  \n".to_string(), None));
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr)).await;

    let (status, body) = post_form(&base, file_form(vec![0; 16], "blank.bmp", "image/bmp")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        serde_json::json!({ "error": "No text could be recognized in the image." })
    );
}

#[tokio::test]
async fn engine_crash_is_500_and_engine_is_released() {
    let pdf = FakePdfEngine::new(Script::Fail("Unexpected end of stream".to_string()));
    let counters = pdf.counters.clone();
    let base = spawn_app(AppConfig::default(), fake_dispatcher(pdf, ocr_hello())).await;

    let (status, body) = post_form(&base, file_form(vec![1, 2, 3], "broken.pdf", "application/pdf")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "Unexpected end of stream" }));
    assert_eq!(counters.acquired(), 1);
    assert_eq!(counters.released(), 1);
}

#[tokio::test]
async fn non_multipart_body_gets_json_error() {
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr_hello())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/extract"))
        .header("content-type", "application/json")
        .body(r#"{"file":"nope"}"#)
        .send()
        .await
        .expect("request failed");

    assert!(response.status().is_client_error());
    let body: serde_json::Value = response.json().await.expect("body was not JSON");
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let config = AppConfig {
        max_upload_bytes: 1024,
        ..AppConfig::default()
    };
    let base = spawn_app(config, lopdf_dispatcher(ocr_hello())).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/extract"))
        .multipart(file_form(vec![7; 8 * 1024], "big.png", "image/png"))
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ocr_availability() {
    let base = spawn_app(AppConfig::default(), lopdf_dispatcher(ocr_hello())).await;

    let response = reqwest::get(format!("{base}/api/health"))
        .await
        .expect("request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("body was not JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ocr_available"], true);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
