//! Handlers for the `/saves` resource. Pass-through storage keyed on
//! (user, slot name); the payload is never inspected.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use skirmish_core::error::CoreError;
use skirmish_db::models::game_save::{GameSave, SaveGameRequest};
use skirmish_db::repositories::GameSaveRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Maximum accepted slot-name length.
const MAX_SLOT_NAME_LENGTH: usize = 64;

fn validate_slot_name(slot_name: &str) -> Result<(), AppError> {
    if slot_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Slot name must not be empty.".into(),
        )));
    }
    if slot_name.len() > MAX_SLOT_NAME_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Slot name must be at most {MAX_SLOT_NAME_LENGTH} characters."
        ))));
    }
    Ok(())
}

/// GET /api/v1/saves
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let saves = GameSaveRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "saves": saves })))
}

/// PUT /api/v1/saves
///
/// Create or overwrite the slot named in the body.
pub async fn save(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SaveGameRequest>,
) -> AppResult<Json<GameSave>> {
    validate_slot_name(&input.slot_name)?;

    let saved =
        GameSaveRepo::upsert(&state.pool, user.user_id, &input.slot_name, &input.game_data)
            .await?;
    Ok(Json(saved))
}

/// GET /api/v1/saves/{slot_name}
pub async fn get_slot(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slot_name): Path<String>,
) -> AppResult<Json<GameSave>> {
    let save = GameSaveRepo::find_slot(&state.pool, user.user_id, &slot_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Save slot '{slot_name}' not found")))?;
    Ok(Json(save))
}

/// DELETE /api/v1/saves/{slot_name}
pub async fn delete_slot(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slot_name): Path<String>,
) -> AppResult<StatusCode> {
    let removed = GameSaveRepo::delete_slot(&state.pool, user.user_id, &slot_name).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "Save slot '{slot_name}' not found"
        )))
    }
}
