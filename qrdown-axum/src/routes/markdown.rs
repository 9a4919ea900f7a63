use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use qrdown_blob::{DocumentId, FetchedDocument, UpsertReceipt};
use serde::Deserialize;

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateMarkdownRequest {
    pub id: DocumentId,
    pub content: String,
    #[serde(default)]
    pub font: Option<String>,
}

/// `GET /markdown/{id}`: never fails, a missing document is an empty body
pub async fn get_markdown(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<FetchedDocument> {
    Json(state.content.fetch(&DocumentId::from(id)).await)
}

/// `POST /markdown`: create or overwrite a document
pub async fn update_markdown(
    State(state): State<AppState>,
    body: Result<Json<CreateMarkdownRequest>, JsonRejection>,
) -> Result<Json<UpsertReceipt>, ApiError> {
    let Json(req) = body?;

    let receipt = state
        .content
        .upsert(&req.id, &req.content, req.font.as_deref())
        .await?;

    Ok(Json(receipt))
}
