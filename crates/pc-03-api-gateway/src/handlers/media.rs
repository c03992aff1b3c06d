//! Media upload.

use axum::extract::{Multipart, State};
use axum::Json;

use super::AppState;
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::types::UploadResponse;

/// Multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "image";

/// `POST /upload`: store the `image` field and return its token.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid upload: {e}")))?;
        let filename = state.blobs.put(&original_name, data).await?;
        return Ok(Json(UploadResponse { filename }));
    }

    Err(ApiError::bad_request(format!(
        "missing multipart field '{UPLOAD_FIELD}'"
    )))
}
