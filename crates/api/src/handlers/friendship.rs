//! Handlers for the `/friendships` resource.
//!
//! State transitions are guarded by the pure checks in
//! `skirmish_core::social`; the pair-uniqueness index backstops the
//! send-request race (two simultaneous sends cannot both insert).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use skirmish_core::error::CoreError;
use skirmish_core::social::{self, FriendshipStatus, PairState};
use skirmish_core::types::DbId;
use skirmish_db::models::friendship::{Friendship, SendFriendRequest};
use skirmish_db::repositories::{FriendshipRepo, UserBlockRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Load the social-graph snapshot for the (actor, other) pair.
async fn pair_state(
    state: &AppState,
    actor: DbId,
    other: DbId,
) -> Result<PairState, sqlx::Error> {
    let blocked = UserBlockRepo::exists_between(&state.pool, actor, other).await?;
    let friendship = FriendshipRepo::find_between(&state.pool, actor, other)
        .await?
        .map(|f| (f.status, f.requester_id));
    Ok(PairState {
        blocked,
        friendship,
    })
}

/// POST /api/v1/friendships/requests
pub async fn send_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SendFriendRequest>,
) -> AppResult<(StatusCode, Json<Friendship>)> {
    if !UserRepo::exists(&state.pool, input.addressee_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.addressee_id,
        }));
    }

    let pair = pair_state(&state, user.user_id, input.addressee_id).await?;
    social::check_send_request(user.user_id, input.addressee_id, &pair)?;

    // A concurrent send for the same pair loses on uq_friendships_pair and
    // is reported as 409 by the error classifier.
    let friendship =
        FriendshipRepo::create_pending(&state.pool, user.user_id, input.addressee_id).await?;

    tracing::info!(
        friendship_id = friendship.id,
        requester_id = user.user_id,
        addressee_id = input.addressee_id,
        "Friend request sent"
    );
    Ok((StatusCode::CREATED, Json(friendship)))
}

/// GET /api/v1/friendships/requests/pending
pub async fn list_pending(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let requests = FriendshipRepo::list_pending_incoming(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "requests": requests })))
}

/// GET /api/v1/friendships/requests/sent
pub async fn list_sent(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let requests = FriendshipRepo::list_pending_outgoing(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "requests": requests })))
}

/// POST /api/v1/friendships/requests/{id}/accept
pub async fn accept_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Friendship>> {
    respond(&state, user, id, FriendshipStatus::Accepted).await
}

/// POST /api/v1/friendships/requests/{id}/decline
///
/// A declined record is kept (so the addressee does not get immediately
/// re-requested by an unaware client) until the requester sends again.
pub async fn decline_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Friendship>> {
    respond(&state, user, id, FriendshipStatus::Declined).await
}

async fn respond(
    state: &AppState,
    user: AuthUser,
    id: DbId,
    to: FriendshipStatus,
) -> AppResult<Json<Friendship>> {
    let friendship = FriendshipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Friend request",
            id,
        }))?;

    social::check_respond(user.user_id, friendship.addressee_id, friendship.status)?;

    let updated = FriendshipRepo::set_status(&state.pool, id, to)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Friend request",
            id,
        }))?;

    tracing::info!(friendship_id = id, status = ?to, "Friend request resolved");
    Ok(Json(updated))
}

/// DELETE /api/v1/friendships/requests/{id}
///
/// The requester withdraws a pending request; the record is deleted.
pub async fn cancel_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let friendship = FriendshipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Friend request",
            id,
        }))?;

    social::check_cancel(user.user_id, friendship.requester_id, friendship.status)?;

    FriendshipRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/friendships/friends
pub async fn list_friends(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<serde_json::Value>> {
    let friends = FriendshipRepo::list_friends(&state.pool, user.user_id).await?;
    Ok(Json(json!({ "friends": friends })))
}

/// DELETE /api/v1/friendships/friends/{user_id}
///
/// Remove an accepted friendship with the given user.
pub async fn unfriend(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed =
        FriendshipRepo::delete_accepted_between(&state.pool, user.user_id, user_id).await?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(
            "You are not friends with this user.".into(),
        ))
    }
}
