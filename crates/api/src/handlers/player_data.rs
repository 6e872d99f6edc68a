//! Handlers for the per-instance `/player-data` resource.
//!
//! Writing one's own player data for an instance is what "joining" means:
//! the first upsert creates the membership row the access policy keys on.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use skirmish_core::error::CoreError;
use skirmish_core::types::DbId;
use skirmish_db::models::player_data::{PlayerGameData, SavePlayerGameData};
use skirmish_db::repositories::PlayerGameDataRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::instance;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/instances/{id}/player-data
///
/// Member overview for the instance owner, payloads omitted.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    instance::fetch_owned(&state, user.user_id, id).await?;

    let player_data = PlayerGameDataRepo::list_for_instance(&state.pool, id).await?;
    Ok(Json(json!({ "player_data": player_data })))
}

/// GET /api/v1/instances/{id}/player-data/me
pub async fn get_mine(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<PlayerGameData>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let data = PlayerGameDataRepo::find(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("You have no player data in this game instance.".into())
        })?;
    Ok(Json(data))
}

/// PUT /api/v1/instances/{id}/player-data/me
///
/// Upsert the caller's payload. A first-time write joins the instance and
/// is subject to the capacity limit; owners do not count against capacity.
pub async fn save_mine(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SavePlayerGameData>,
) -> AppResult<Json<PlayerGameData>> {
    let inst = instance::fetch_for_nested(&state, user.user_id, id).await?;

    let joined = PlayerGameDataRepo::exists(&state.pool, id, user.user_id).await?;
    if !joined && user.user_id != inst.owner_id {
        let members = PlayerGameDataRepo::member_count(&state.pool, id).await?;
        if members >= i64::from(inst.capacity) {
            return Err(AppError::Core(CoreError::Conflict(
                "Game instance is full.".into(),
            )));
        }
    }

    let data = PlayerGameDataRepo::upsert(&state.pool, id, user.user_id, &input.game_data).await?;
    if !joined {
        tracing::info!(instance_id = id, user_id = user.user_id, "Player joined instance");
    }
    Ok(Json(data))
}

/// DELETE /api/v1/instances/{id}/player-data/me
///
/// Leave the instance, discarding the caller's payload.
pub async fn delete_mine(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    instance::fetch(&state, id).await?;

    let removed = PlayerGameDataRepo::delete(&state.pool, id, user.user_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(
            "You have no player data in this game instance.".into(),
        ))
    }
}
