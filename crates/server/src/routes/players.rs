use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use models::player::{Player, PlayerInput};
use service::players::PlayerStore;

use crate::errors::ApiError;

/// GET `/` — the whole collection.
pub async fn list_players(
    State(store): State<Arc<dyn PlayerStore>>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let players = store.list().await?;
    Ok(Json(players))
}

/// POST `/` — create a record under a generated id.
pub async fn create_player(
    State(store): State<Arc<dyn PlayerStore>>,
    Json(input): Json<PlayerInput>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let player = store.create(input).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// GET `/:id`.
pub async fn get_player(
    State(store): State<Arc<dyn PlayerStore>>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let player = store.get(&id).await?;
    Ok(Json(player))
}

/// PUT `/:id` — update when present, create otherwise. Answers 200 for both
/// branches.
pub async fn put_player(
    State(store): State<Arc<dyn PlayerStore>>,
    Path(id): Path<String>,
    Json(input): Json<PlayerInput>,
) -> Result<Json<Player>, ApiError> {
    let (player, _created) = store.upsert(&id, input).await?;
    Ok(Json(player))
}

/// PATCH `/:id` — partial update of an existing record.
pub async fn patch_player(
    State(store): State<Arc<dyn PlayerStore>>,
    Path(id): Path<String>,
    Json(input): Json<PlayerInput>,
) -> Result<Json<Player>, ApiError> {
    let player = store.patch(&id, input).await?;
    Ok(Json(player))
}

/// DELETE `/:id` — answers 203 with an empty body. Clients depend on the
/// 203, so it stays even though 204 would be conventional.
pub async fn delete_player(
    State(store): State<Arc<dyn PlayerStore>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(&id).await?;
    Ok(StatusCode::NON_AUTHORITATIVE_INFORMATION)
}
