//! Handlers for the `/blocks` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use skirmish_core::error::CoreError;
use skirmish_core::social;
use skirmish_core::types::DbId;
use skirmish_db::models::user_block::{BlockUserRequest, UserBlock};
use skirmish_db::repositories::{UserBlockRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/blocks
///
/// Block a user. Any friendship with the target (in either direction,
/// any status) is removed in the same transaction.
pub async fn block_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<BlockUserRequest>,
) -> AppResult<(StatusCode, Json<UserBlock>)> {
    if !UserRepo::exists(&state.pool, input.blocked_user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.blocked_user_id,
        }));
    }

    let already_blocked =
        UserBlockRepo::exists_directed(&state.pool, user.user_id, input.blocked_user_id).await?;
    social::check_block(user.user_id, input.blocked_user_id, already_blocked)?;

    let block = UserBlockRepo::create(&state.pool, user.user_id, input.blocked_user_id).await?;

    tracing::info!(
        blocker_id = user.user_id,
        blocked_user_id = input.blocked_user_id,
        "User blocked"
    );
    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /api/v1/blocks
pub async fn list_blocks(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let blocks = UserBlockRepo::list_for(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "blocks": blocks })))
}

/// DELETE /api/v1/blocks/{blocked_user_id}
///
/// Unblock. Does not restore any friendship that was severed by the block.
pub async fn unblock_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(blocked_user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = UserBlockRepo::delete(&state.pool, user.user_id, blocked_user_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("You have not blocked this user.".into()))
    }
}
