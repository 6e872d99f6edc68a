//! HTTP-level integration tests for the `/friendships` and `/blocks` APIs.
//!
//! Covers the full request lifecycle, the decline/re-request path, pair
//! uniqueness under reversed orderings, and block interaction.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_empty, post_json, register_user};
use sqlx::PgPool;

async fn send_request(
    app: &axum::Router,
    token: &str,
    addressee_id: i64,
) -> axum::response::Response {
    post_json(
        app.clone(),
        "/api/v1/friendships/requests",
        serde_json::json!({ "addressee_id": addressee_id }),
        Some(token),
    )
    .await
}

// ---------------------------------------------------------------------------
// Request lifecycle
// ---------------------------------------------------------------------------

/// Send -> pending on both sides -> accept -> both are friends -> unfriend.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_friendship_lifecycle(pool: PgPool) {
    let app = build_test_app(pool);
    let (alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, bob) = register_user(&app, "bob").await;

    // Alice sends a request to Bob.
    let response = send_request(&app, &alice, bob_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let request_id = json["id"].as_i64().unwrap();
    assert_eq!(json["status"], "pending");

    // Bob sees it incoming, Alice sees it outgoing.
    let json = body_json(
        get(app.clone(), "/api/v1/friendships/requests/pending", Some(&bob)).await,
    )
    .await;
    assert_eq!(json["requests"].as_array().unwrap().len(), 1);
    assert_eq!(json["requests"][0]["requester_display_name"], "alice");

    let json = body_json(
        get(app.clone(), "/api/v1/friendships/requests/sent", Some(&alice)).await,
    )
    .await;
    assert_eq!(json["requests"].as_array().unwrap().len(), 1);

    // Bob accepts.
    let response = post_empty(
        app.clone(),
        &format!("/api/v1/friendships/requests/{request_id}/accept"),
        Some(&bob),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "accepted");

    // Both now list each other as friends.
    let json =
        body_json(get(app.clone(), "/api/v1/friendships/friends", Some(&alice)).await).await;
    assert_eq!(json["friends"][0]["user_id"], bob_id);

    let json = body_json(get(app.clone(), "/api/v1/friendships/friends", Some(&bob)).await).await;
    assert_eq!(json["friends"][0]["user_id"], alice_id);

    // Alice unfriends Bob; both friend lists are empty.
    let response = delete(
        app.clone(),
        &format!("/api/v1/friendships/friends/{bob_id}"),
        Some(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(app.clone(), "/api/v1/friendships/friends", Some(&bob)).await).await;
    assert!(json["friends"].as_array().unwrap().is_empty());
}

/// Sending a request to yourself returns 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_self_request_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let (alice_id, alice) = register_user(&app, "alice").await;

    let response = send_request(&app, &alice, alice_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "You cannot send a friend request to yourself.");
}

/// While a request is pending, a second send in either direction is 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_pair_is_unique_both_orderings(pool: PgPool) {
    let app = build_test_app(pool);
    let (alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, bob) = register_user(&app, "bob").await;

    assert_eq!(send_request(&app, &alice, bob_id).await.status(), StatusCode::CREATED);

    // Same direction again.
    assert_eq!(send_request(&app, &alice, bob_id).await.status(), StatusCode::CONFLICT);

    // Reversed direction: Bob requesting Alice hits the same pair.
    assert_eq!(send_request(&app, &bob, alice_id).await.status(), StatusCode::CONFLICT);
}

/// Two simultaneous sends for the same pair race past the application
/// pre-check; the pair index turns the loser into the same 409 conflict.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_send_requests_single_pending(pool: PgPool) {
    let app = build_test_app(pool);
    let (alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, bob) = register_user(&app, "bob").await;

    let (res_a, res_b) = tokio::join!(
        send_request(&app, &alice, bob_id),
        send_request(&app, &bob, alice_id),
    );

    let statuses = [res_a.status(), res_b.status()];
    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(created, 1, "exactly one send must win, got {statuses:?}");
    assert_eq!(conflicts, 1, "the loser must conflict, got {statuses:?}");

    // Exactly one pending record exists for the pair.
    let alice_sent =
        body_json(get(app.clone(), "/api/v1/friendships/requests/sent", Some(&alice)).await)
            .await["requests"]
            .as_array()
            .unwrap()
            .len();
    let bob_sent =
        body_json(get(app.clone(), "/api/v1/friendships/requests/sent", Some(&bob)).await)
            .await["requests"]
            .as_array()
            .unwrap()
            .len();
    assert_eq!(alice_sent + bob_sent, 1);
}

/// Accepted friends get a 409 on a fresh request; responding twice is 400.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_already_friends_conflict(pool: PgPool) {
    let app = build_test_app(pool);
    let (_alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, bob) = register_user(&app, "bob").await;

    let json = body_json(send_request(&app, &alice, bob_id).await).await;
    let request_id = json["id"].as_i64().unwrap();

    post_empty(
        app.clone(),
        &format!("/api/v1/friendships/requests/{request_id}/accept"),
        Some(&bob),
    )
    .await;

    let response = send_request(&app, &alice, bob_id).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "You are already friends with this user."
    );

    // The request is no longer pending, so a second response is rejected.
    let response = post_empty(
        app.clone(),
        &format!("/api/v1/friendships/requests/{request_id}/decline"),
        Some(&bob),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Declining keeps the record but lets the requester try again later.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_decline_then_re_request(pool: PgPool) {
    let app = build_test_app(pool);
    let (_alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, bob) = register_user(&app, "bob").await;

    let json = body_json(send_request(&app, &alice, bob_id).await).await;
    let request_id = json["id"].as_i64().unwrap();

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/friendships/requests/{request_id}/decline"),
        Some(&bob),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Bob's pending list is empty again.
    let json = body_json(
        get(app.clone(), "/api/v1/friendships/requests/pending", Some(&bob)).await,
    )
    .await;
    assert!(json["requests"].as_array().unwrap().is_empty());

    // Alice can re-request; the declined record is replaced by a fresh pending.
    let response = send_request(&app, &alice, bob_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_ne!(json["id"].as_i64().unwrap(), request_id);
}

/// Only the addressee can respond; only the requester can cancel.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_respond_and_cancel_authorization(pool: PgPool) {
    let app = build_test_app(pool);
    let (_alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, bob) = register_user(&app, "bob").await;
    let (_carol_id, carol) = register_user(&app, "carol").await;

    let json = body_json(send_request(&app, &alice, bob_id).await).await;
    let request_id = json["id"].as_i64().unwrap();

    // The requester cannot accept their own request.
    let response = post_empty(
        app.clone(),
        &format!("/api/v1/friendships/requests/{request_id}/accept"),
        Some(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A third party cannot cancel it.
    let response = delete(
        app.clone(),
        &format!("/api/v1/friendships/requests/{request_id}"),
        Some(&carol),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The requester can.
    let response = delete(
        app.clone(),
        &format!("/api/v1/friendships/requests/{request_id}"),
        Some(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The record is gone.
    let json = body_json(
        get(app.clone(), "/api/v1/friendships/requests/pending", Some(&bob)).await,
    )
    .await;
    assert!(json["requests"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// Blocking severs an existing friendship and prevents new requests from
/// either side.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_severs_friendship_and_prevents_requests(pool: PgPool) {
    let app = build_test_app(pool);
    let (alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, bob) = register_user(&app, "bob").await;

    // Become friends.
    let json = body_json(send_request(&app, &alice, bob_id).await).await;
    let request_id = json["id"].as_i64().unwrap();
    post_empty(
        app.clone(),
        &format!("/api/v1/friendships/requests/{request_id}/accept"),
        Some(&bob),
    )
    .await;

    // Alice blocks Bob.
    let response = post_json(
        app.clone(),
        "/api/v1/blocks",
        serde_json::json!({ "blocked_user_id": bob_id }),
        Some(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The friendship is gone from both sides.
    let json =
        body_json(get(app.clone(), "/api/v1/friendships/friends", Some(&alice)).await).await;
    assert!(json["friends"].as_array().unwrap().is_empty());
    let json = body_json(get(app.clone(), "/api/v1/friendships/friends", Some(&bob)).await).await;
    assert!(json["friends"].as_array().unwrap().is_empty());

    // Neither side can send a request while the block stands.
    let response = send_request(&app, &bob, alice_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Cannot send friend request to this user."
    );
    let response = send_request(&app, &alice, bob_id).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Blocking the same user twice is a conflict.
    let response = post_json(
        app.clone(),
        "/api/v1/blocks",
        serde_json::json!({ "blocked_user_id": bob_id }),
        Some(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Unblocking restores nothing but allows fresh requests again.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unblock_allows_new_requests(pool: PgPool) {
    let app = build_test_app(pool);
    let (_alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, bob) = register_user(&app, "bob").await;

    post_json(
        app.clone(),
        "/api/v1/blocks",
        serde_json::json!({ "blocked_user_id": bob_id }),
        Some(&alice),
    )
    .await;

    let json = body_json(get(app.clone(), "/api/v1/blocks", Some(&alice)).await).await;
    assert_eq!(json["blocks"].as_array().unwrap().len(), 1);
    assert_eq!(json["blocks"][0]["display_name"], "bob");

    let response = delete(app.clone(), &format!("/api/v1/blocks/{bob_id}"), Some(&alice)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // No friendship was restored.
    let json = body_json(get(app.clone(), "/api/v1/friendships/friends", Some(&bob)).await).await;
    assert!(json["friends"].as_array().unwrap().is_empty());

    // Requests flow again.
    let response = send_request(&app, &alice, bob_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Blocking yourself returns 400; unblocking a non-blocked user returns 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_edge_cases(pool: PgPool) {
    let app = build_test_app(pool);
    let (alice_id, alice) = register_user(&app, "alice").await;
    let (bob_id, _bob) = register_user(&app, "bob").await;

    let response = post_json(
        app.clone(),
        "/api/v1/blocks",
        serde_json::json!({ "blocked_user_id": alice_id }),
        Some(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete(app.clone(), &format!("/api/v1/blocks/{bob_id}"), Some(&alice)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
