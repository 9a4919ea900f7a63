use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use qrdown_blob::{DocumentId, LogoInfo};
use serde::Serialize;

use crate::{ApiError, AppState};

const FILE_FIELD: &str = "file";
const POST_ID_FIELD: &str = "postId";
const DEFAULT_MIME: &str = "application/octet-stream";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub path: String,
    pub size: usize,
    pub mimetype: String,
}

#[derive(Debug)]
struct UploadedFile {
    filename: String,
    mimetype: String,
    data: Bytes,
}

/// The `file` + `postId` form every upload endpoint takes
#[derive(Debug)]
struct UploadForm {
    post_id: DocumentId,
    file: UploadedFile,
}

impl UploadForm {
    async fn read(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, ApiError> {
        let mut multipart = multipart?;
        let mut post_id = None;
        let mut file = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some(FILE_FIELD) => {
                    let filename = field
                        .file_name()
                        .map(str::to_string)
                        .ok_or_else(|| ApiError::bad_request("Uploaded file has no filename"))?;
                    let mimetype = field.content_type().unwrap_or(DEFAULT_MIME).to_string();
                    let data = field.bytes().await?;
                    file = Some(UploadedFile { filename, mimetype, data });
                }
                Some(POST_ID_FIELD) => {
                    post_id = Some(field.text().await?);
                }
                _ => {}
            }
        }

        let post_id = post_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing postId field"))?;
        let file = file.ok_or_else(|| ApiError::bad_request("Missing file field"))?;

        Ok(Self {
            post_id: DocumentId::from(post_id),
            file,
        })
    }
}

/// `POST /upload`: store a file under `{postId}/{filename}`
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let UploadForm { post_id, file } = UploadForm::read(multipart).await?;
    let size = file.data.len();

    let key = state
        .assets
        .upload_generic(&post_id, &file.filename, file.data, &file.mimetype)
        .await?;

    // Clients of this endpoint receive the object key in `url`
    Ok(Json(UploadResponse {
        url: key,
        path: format!("{}/{}", post_id, file.filename),
        size,
        mimetype: file.mimetype,
    }))
}

/// `POST /upload/logo`: store the document's logo
pub async fn upload_logo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let UploadForm { post_id, file } = UploadForm::read(multipart).await?;
    let size = file.data.len();

    let key = state
        .assets
        .upload_logo(&post_id, file.data, &file.filename, &file.mimetype)
        .await?;

    Ok(Json(UploadResponse {
        url: state.assets.public_url(&key),
        path: key,
        size,
        mimetype: file.mimetype,
    }))
}

/// `GET /upload/logo/{postId}`
pub async fn get_logo(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Json<LogoInfo> {
    Json(state.assets.get_logo(&DocumentId::from(post_id)).await)
}
