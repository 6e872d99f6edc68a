//! Handlers for the per-instance `/alliances` resource.
//!
//! Alliances are internal to a game world, so every operation requires the
//! caller to be a participant (owner or member) of the instance.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use skirmish_core::error::CoreError;
use skirmish_core::types::DbId;
use skirmish_db::models::alliance::{Alliance, CreateAlliance, UpdateAlliance};
use skirmish_db::models::game_instance::GameInstance;
use skirmish_db::repositories::AllianceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::instance;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

async fn fetch_as_participant(
    state: &AppState,
    user_id: DbId,
    instance_id: DbId,
) -> AppResult<GameInstance> {
    let inst = instance::fetch_for_nested(state, user_id, instance_id).await?;
    if !skirmish_db::access::is_participant(&state.pool, user_id, &inst).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only participants can access alliances in this game instance.".into(),
        )));
    }
    Ok(inst)
}

/// GET /api/v1/instances/{id}/alliances
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    fetch_as_participant(&state, user.user_id, id).await?;

    let alliances = AllianceRepo::list_for_instance(&state.pool, id).await?;
    Ok(Json(json!({ "alliances": alliances })))
}

/// POST /api/v1/instances/{id}/alliances
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateAlliance>,
) -> AppResult<(StatusCode, Json<Alliance>)> {
    fetch_as_participant(&state, user.user_id, id).await?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Alliance name must not be empty.".into(),
        )));
    }
    if AllianceRepo::name_taken(&state.pool, id, &input.name, None).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "An alliance with this name already exists in this game instance.".into(),
        )));
    }

    let alliance = AllianceRepo::create(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(alliance)))
}

/// GET /api/v1/instances/{id}/alliances/{alliance_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, alliance_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Alliance>> {
    fetch_as_participant(&state, user.user_id, id).await?;

    let alliance = AllianceRepo::find(&state.pool, id, alliance_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Alliance",
            id: alliance_id,
        }))?;
    Ok(Json(alliance))
}

/// PUT /api/v1/instances/{id}/alliances/{alliance_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, alliance_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateAlliance>,
) -> AppResult<Json<Alliance>> {
    fetch_as_participant(&state, user.user_id, id).await?;

    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Alliance name must not be empty.".into(),
            )));
        }
        if AllianceRepo::name_taken(&state.pool, id, name, Some(alliance_id)).await? {
            return Err(AppError::Core(CoreError::Conflict(
                "An alliance with this name already exists in this game instance.".into(),
            )));
        }
    }

    let alliance = AllianceRepo::update(&state.pool, id, alliance_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Alliance",
            id: alliance_id,
        }))?;
    Ok(Json(alliance))
}

/// DELETE /api/v1/instances/{id}/alliances/{alliance_id}
///
/// Owner only; members manage alliances but cannot dissolve them.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, alliance_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    instance::fetch_owned(&state, user.user_id, id).await?;

    let removed = AllianceRepo::delete(&state.pool, id, alliance_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Alliance",
            id: alliance_id,
        }))
    }
}
