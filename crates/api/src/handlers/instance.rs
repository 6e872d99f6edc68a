//! Handlers for the `/instances` resource.
//!
//! Access semantics differ by surface: a direct GET of an instance the
//! caller may not view answers 404 (so probing ids reveals nothing), while
//! nested resources under an instance the caller can see exists answer 403.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use skirmish_core::access;
use skirmish_core::error::CoreError;
use skirmish_core::types::DbId;
use skirmish_db::models::game_instance::{CreateGameInstance, GameInstance, UpdateGameInstance};
use skirmish_db::repositories::GameInstanceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared lookups
// ---------------------------------------------------------------------------

/// Fetch an instance or 404.
pub(crate) async fn fetch(state: &AppState, id: DbId) -> AppResult<GameInstance> {
    GameInstanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game instance",
            id,
        }))
}

/// Fetch an instance the caller may view, answering 404 on denial so an
/// invisible instance is indistinguishable from a missing one.
pub(crate) async fn fetch_viewable(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> AppResult<GameInstance> {
    let instance = fetch(state, id).await?;
    if !skirmish_db::access::can_view(&state.pool, user_id, &instance).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Game instance",
            id,
        }));
    }
    Ok(instance)
}

/// Fetch an instance for a nested resource, answering 403 on denial.
pub(crate) async fn fetch_for_nested(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> AppResult<GameInstance> {
    let instance = fetch(state, id).await?;
    if !skirmish_db::access::can_view(&state.pool, user_id, &instance).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this game instance.".into(),
        )));
    }
    Ok(instance)
}

/// Fetch an instance the caller owns, answering 403 on denial.
pub(crate) async fn fetch_owned(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> AppResult<GameInstance> {
    let instance = fetch(state, id).await?;
    if !access::can_manage(user_id, instance.owner_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can manage this game instance.".into(),
        )));
    }
    Ok(instance)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/instances
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateGameInstance>,
) -> AppResult<(StatusCode, Json<GameInstance>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Instance name must not be empty.".into(),
        )));
    }
    if input.capacity < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Capacity must be at least 1.".into(),
        )));
    }

    let instance = GameInstanceRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(instance_id = instance.id, owner_id = user.user_id, "Game instance created");
    Ok((StatusCode::CREATED, Json(instance)))
}

/// GET /api/v1/instances
///
/// Instances the caller owns or has joined.
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let instances = GameInstanceRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "instances": instances })))
}

/// GET /api/v1/instances/browse
///
/// Discoverable instances: not owned or joined by the caller, not involving
/// a blocked party, and either public or friends-visible where the caller
/// is friends with the owner.
pub async fn browse(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let instances = GameInstanceRepo::browse(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "instances": instances })))
}

/// GET /api/v1/instances/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<GameInstance>> {
    let instance = fetch_viewable(&state, user.user_id, id).await?;
    Ok(Json(instance))
}

/// PUT /api/v1/instances/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGameInstance>,
) -> AppResult<Json<GameInstance>> {
    fetch_owned(&state, user.user_id, id).await?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Instance name must not be empty.".into(),
        )));
    }
    if input.capacity < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Capacity must be at least 1.".into(),
        )));
    }

    let instance = GameInstanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game instance",
            id,
        }))?;
    Ok(Json(instance))
}

/// DELETE /api/v1/instances/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    fetch_owned(&state, user.user_id, id).await?;
    GameInstanceRepo::delete(&state.pool, id).await?;
    tracing::info!(instance_id = id, "Game instance deleted");
    Ok(StatusCode::NO_CONTENT)
}
