//! Document read and save handlers.
//!
//! Identifiers are parsed here and parsed again inside the store; neither
//! layer trusts the other's validation.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use playground_core::{EditorDocument, Identifier};

use crate::error::ApiError;
use crate::schema::save::{SaveQuery, SaveResponse};
use crate::state::AppState;

/// Returns the document stored under an identifier.
///
/// `GET /data/{id}.json` (also answered for `POST`)
pub async fn read_document(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<EditorDocument>, ApiError> {
    let raw_id = file
        .strip_suffix(".json")
        .ok_or_else(|| ApiError::BadRequest("data path must end in .json".to_string()))?;
    let id = Identifier::parse(raw_id).map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let doc = state.store.read(id.as_str()).map_err(ApiError::read)?;
    Ok(Json(doc))
}

/// Saves a document, minting an identifier unless `id` names an existing
/// record.
///
/// `POST /save?id={id?}`
pub async fn save_document(
    State(state): State<AppState>,
    query: Result<Query<SaveQuery>, QueryRejection>,
    headers: HeaderMap,
    body: Result<Json<EditorDocument>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    // Checked before the payload and the identifier are looked at.
    if let Some(gate) = &state.cookie_gate {
        if !gate.admits(&headers) {
            return Err(ApiError::SaveFailed(format!(
                "missing or mismatched {} cookie",
                gate.name()
            )));
        }
    }

    let Query(query) = query.map_err(|err| ApiError::SaveFailed(err.body_text()))?;
    let Json(doc) = body.map_err(|err| ApiError::BadRequest(err.body_text()))?;

    let id = match query.target() {
        Some(raw) => {
            let id = Identifier::parse(raw).map_err(|err| ApiError::SaveFailed(err.to_string()))?;
            state.store.update(id.as_str(), &doc).map_err(ApiError::save)?;
            id
        }
        None => state.store.create(&doc).map_err(ApiError::save)?,
    };

    tracing::info!(%id, files = doc.files.len(), links = doc.links.len(), "document saved");
    Ok(Json(SaveResponse::ok(id)))
}
