//! Handlers for the per-instance `/world-view` resource.
//!
//! Zero-or-one row of shared world state per instance. Reads require view
//! access; writes are reserved for the instance owner.

use axum::extract::{Path, State};
use axum::Json;
use skirmish_core::types::DbId;
use skirmish_db::models::world_view::{SaveWorldViewGameData, WorldViewGameData};
use skirmish_db::repositories::WorldViewRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::instance;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/instances/{id}/world-view
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorldViewGameData>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let data = WorldViewRepo::find(&state.pool, id).await?.ok_or_else(|| {
        AppError::NotFound("World view data not found for this game instance.".into())
    })?;
    Ok(Json(data))
}

/// PUT /api/v1/instances/{id}/world-view
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SaveWorldViewGameData>,
) -> AppResult<Json<WorldViewGameData>> {
    instance::fetch_owned(&state, user.user_id, id).await?;

    let data = WorldViewRepo::upsert(&state.pool, id, &input.game_data).await?;
    Ok(Json(data))
}
