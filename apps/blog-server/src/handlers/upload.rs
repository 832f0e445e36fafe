//! Cover image upload.

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures::StreamExt;

use blog_core::DomainError;
use blog_core::ports::{StorageError, is_image};
use blog_shared::dto::ImageUploadResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

struct ImageUpload {
    file_name: Option<String>,
    content_type: String,
    data: Vec<u8>,
}

/// POST /posts/{post_id}/image
///
/// An unknown post is reported before the upload itself is looked at.
/// Replacing an image does not delete the previous file.
pub async fn upload_post_image(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    if !state.store.post_exists(post_id).await {
        return Err(DomainError::post_not_found(post_id).into());
    }

    let upload = read_image_field(&mut payload, state.max_upload_bytes).await?;
    let stored = state
        .files
        .store(upload.file_name.as_deref(), &upload.content_type, &upload.data)
        .await?;

    match state.store.set_post_image(post_id, stored.reference.clone()).await {
        Ok(_) => {
            tracing::info!(
                post_id,
                image_url = %stored.reference,
                size = stored.size,
                content_type = %stored.content_type,
                "Post image uploaded"
            );
            Ok(HttpResponse::Ok().json(ImageUploadResponse {
                message: "Image uploaded successfully".to_string(),
                image_url: stored.reference,
            }))
        }
        Err(e) => {
            // The post vanished while the file was being written.
            if let Err(cleanup) = state.files.remove(&stored.reference).await {
                tracing::warn!(post_id, "Failed to remove orphaned upload: {}", cleanup);
            }
            Err(e.into())
        }
    }
}

/// Find the `file` field and buffer it, rejecting non-images before reading
/// their bodies.
async fn read_image_field(payload: &mut Multipart, limit: usize) -> AppResult<ImageUpload> {
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(invalid_multipart)?;

        if field.name() != Some(FILE_FIELD) {
            drain(&mut field).await?;
            continue;
        }

        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        if !is_image(&content_type) {
            return Err(StorageError::InvalidMedia(content_type).into());
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(String::from);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(invalid_multipart)?;
            if data.len() + chunk.len() > limit {
                return Err(AppError::PayloadTooLarge(format!(
                    "Image exceeds {} bytes",
                    limit
                )));
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(ImageUpload {
            file_name,
            content_type,
            data,
        });
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

async fn drain(field: &mut Field) -> AppResult<()> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(invalid_multipart)?;
    }
    Ok(())
}

fn invalid_multipart(err: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart data: {}", err))
}
