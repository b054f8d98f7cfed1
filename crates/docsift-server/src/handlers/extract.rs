use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, warn};

use docsift_core::api_types::{ErrorResponse, ExtractResponse};
use docsift_core::document::UploadedDocument;

use crate::state::AppState;

/// Multipart field carrying the upload.
pub const FILE_FIELD: &str = "file";

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// POST /api/extract: extract text from one uploaded PDF or image.
pub async fn extract_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected extraction request body");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    let document = match read_upload(&mut multipart).await {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e.body_text(), "Failed to read multipart upload");
            return error_response(e.status(), e.body_text());
        }
    };

    info!(
        file_name = document.file_name.as_deref().unwrap_or("-"),
        media_type = %document.declared_media_type,
        bytes = document.len(),
        "Received upload"
    );

    match state.dispatcher.extract(document).await {
        Ok(result) => (StatusCode::OK, Json(ExtractResponse::from(result))).into_response(),
        Err(failure) => {
            let status = StatusCode::from_u16(failure.status_code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorResponse::from(failure))).into_response()
        }
    }
}

/// Takes the first `file` field; other fields are skipped. An absent field
/// yields a document without bytes.
async fn read_upload(
    multipart: &mut Multipart,
) -> Result<UploadedDocument, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let declared_media_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;

        return Ok(UploadedDocument {
            bytes: Some(bytes.to_vec()),
            declared_media_type,
            file_name,
        });
    }

    Ok(UploadedDocument::default())
}
