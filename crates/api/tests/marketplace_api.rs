//! HTTP-level integration tests for the per-instance `/marketplace` API:
//! listing lifecycle, seller-only edits, search, and the purchase race.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_empty, post_json, put_json, register_user};
use sqlx::PgPool;

async fn create_instance(app: &axum::Router, token: &str) -> i64 {
    let body = serde_json::json!({
        "name": "Trade Hub",
        "access_type": "public",
        "capacity": 16,
    });
    let response = post_json(app.clone(), "/api/v1/instances", body, Some(token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_listing(app: &axum::Router, token: &str, instance_id: i64, item: &str) -> i64 {
    let body = serde_json::json!({
        "item_data": { "item": item },
        "purchase_conditions": { "price": 100 },
    });
    let response = post_json(
        app.clone(),
        &format!("/api/v1/instances/{instance_id}/marketplace"),
        body,
        Some(token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Create -> active in the instance board -> purchase -> sold with buyer set.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_purchase_flow(pool: PgPool) {
    let app = build_test_app(pool);
    let (seller_id, seller) = register_user(&app, "seller").await;
    let (buyer_id, buyer) = register_user(&app, "buyer").await;

    let instance_id = create_instance(&app, &seller).await;
    let listing_id = create_listing(&app, &seller, instance_id, "sword").await;
    let base = format!("/api/v1/instances/{instance_id}/marketplace");

    // Active board shows it to any viewer, payloads omitted.
    let json = body_json(get(app.clone(), &base, Some(&buyer)).await).await;
    let listings = json["listings"].as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["status"], "active");
    assert!(listings[0].get("item_data").is_none());

    // Detail view includes the payloads.
    let json =
        body_json(get(app.clone(), &format!("{base}/{listing_id}"), Some(&buyer)).await).await;
    assert_eq!(json["item_data"]["item"], "sword");
    assert_eq!(json["purchase_conditions"]["price"], 100);

    // Purchase.
    let response =
        post_empty(app.clone(), &format!("{base}/{listing_id}/purchase"), Some(&buyer)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "sold");
    assert_eq!(json["buyer_id"], buyer_id);
    assert_eq!(json["seller_id"], seller_id);

    // Sold listings leave the active board but stay in my-listings.
    let json = body_json(get(app.clone(), &base, Some(&buyer)).await).await;
    assert!(json["listings"].as_array().unwrap().is_empty());

    let json =
        body_json(get(app.clone(), &format!("{base}/my-listings"), Some(&seller)).await).await;
    assert_eq!(json["listings"][0]["status"], "sold");
}

/// Omitted purchase conditions default to an empty object.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_listing_without_purchase_conditions(pool: PgPool) {
    let app = build_test_app(pool);
    let (_seller_id, seller) = register_user(&app, "seller").await;

    let instance_id = create_instance(&app, &seller).await;
    let response = post_json(
        app.clone(),
        &format!("/api/v1/instances/{instance_id}/marketplace"),
        serde_json::json!({ "item_data": { "item": "sword" } }),
        Some(&seller),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["purchase_conditions"], serde_json::json!({}));
    assert_eq!(json["status"], "active");
}

/// Buying your own listing is rejected before any state change.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_purchase_own_listing(pool: PgPool) {
    let app = build_test_app(pool);
    let (_seller_id, seller) = register_user(&app, "seller").await;

    let instance_id = create_instance(&app, &seller).await;
    let listing_id = create_listing(&app, &seller, instance_id, "shield").await;

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/instances/{instance_id}/marketplace/{listing_id}/purchase"),
        Some(&seller),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Cannot purchase your own listing"
    );
}

/// Update and cancel are seller-only and active-only.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_cancel_guards(pool: PgPool) {
    let app = build_test_app(pool);
    let (_seller_id, seller) = register_user(&app, "seller").await;
    let (_buyer_id, buyer) = register_user(&app, "buyer").await;

    let instance_id = create_instance(&app, &seller).await;
    let listing_id = create_listing(&app, &seller, instance_id, "bow").await;
    let base = format!("/api/v1/instances/{instance_id}/marketplace/{listing_id}");

    // Non-seller cannot edit or cancel.
    let body = serde_json::json!({ "item_data": { "item": "crossbow" } });
    let response = put_json(app.clone(), &base, body, Some(&buyer)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = post_empty(app.clone(), &format!("{base}/cancel"), Some(&buyer)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Seller edits: partial update keeps untouched fields.
    let body = serde_json::json!({ "item_data": { "item": "crossbow" } });
    let response = put_json(app.clone(), &base, body, Some(&seller)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["item_data"]["item"], "crossbow");
    assert_eq!(json["purchase_conditions"]["price"], 100);

    // Seller cancels.
    let response = post_empty(app.clone(), &format!("{base}/cancel"), Some(&seller)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "cancelled");

    // Once cancelled, edits, cancels, and purchases are all invalid states.
    let body = serde_json::json!({ "item_data": { "item": "ballista" } });
    let response = put_json(app.clone(), &base, body, Some(&seller)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_empty(app.clone(), &format!("{base}/cancel"), Some(&seller)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_empty(app.clone(), &format!("{base}/purchase"), Some(&buyer)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Listing is not available for purchase"
    );
}

// ---------------------------------------------------------------------------
// Purchase race
// ---------------------------------------------------------------------------

/// Two concurrent purchases of the same listing: exactly one succeeds.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_purchase_single_winner(pool: PgPool) {
    let app = build_test_app(pool);
    let (_seller_id, seller) = register_user(&app, "seller").await;
    let (_a_id, buyer_a) = register_user(&app, "buyer_a").await;
    let (_b_id, buyer_b) = register_user(&app, "buyer_b").await;

    let instance_id = create_instance(&app, &seller).await;
    let listing_id = create_listing(&app, &seller, instance_id, "relic").await;
    let uri = format!("/api/v1/instances/{instance_id}/marketplace/{listing_id}/purchase");

    let (res_a, res_b) = tokio::join!(
        post_empty(app.clone(), &uri, Some(&buyer_a)),
        post_empty(app.clone(), &uri, Some(&buyer_b)),
    );

    let statuses = [res_a.status(), res_b.status()];
    let wins = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!(wins, 1, "exactly one purchase must win, got {statuses:?}");

    // The listing ends up sold exactly once.
    let json = body_json(
        get(
            app.clone(),
            &format!("/api/v1/instances/{instance_id}/marketplace/{listing_id}"),
            Some(&seller),
        )
        .await,
    )
    .await;
    assert_eq!(json["status"], "sold");
    assert!(json["buyer_id"].is_i64());
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Search filters by status and seller and paginates newest-first.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_filters_and_pagination(pool: PgPool) {
    let app = build_test_app(pool);
    let (seller_id, seller) = register_user(&app, "seller").await;
    let (_other_id, other) = register_user(&app, "other").await;

    let instance_id = create_instance(&app, &seller).await;
    let base = format!("/api/v1/instances/{instance_id}/marketplace");

    let first = create_listing(&app, &seller, instance_id, "one").await;
    let _second = create_listing(&app, &seller, instance_id, "two").await;
    let _third = create_listing(&app, &other, instance_id, "three").await;

    // Cancel the first listing so statuses differ.
    post_empty(app.clone(), &format!("{base}/{first}/cancel"), Some(&seller)).await;

    // Status filter.
    let json =
        body_json(get(app.clone(), &format!("{base}/search?status=cancelled"), Some(&other)).await)
            .await;
    let listings = json["listings"].as_array().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["id"], first);

    // Seller filter.
    let json = body_json(
        get(app.clone(), &format!("{base}/search?seller_id={seller_id}"), Some(&other)).await,
    )
    .await;
    assert_eq!(json["listings"].as_array().unwrap().len(), 2);

    // Pagination: one per page, newest first.
    let json = body_json(
        get(app.clone(), &format!("{base}/search?page=1&page_size=1"), Some(&other)).await,
    )
    .await;
    assert_eq!(json["listings"].as_array().unwrap().len(), 1);
    assert_eq!(json["page_size"], 1);

    let json = body_json(
        get(app.clone(), &format!("{base}/search?page=4&page_size=1"), Some(&other)).await,
    )
    .await;
    assert!(json["listings"].as_array().unwrap().is_empty());

    // Out-of-range page sizes are clamped rather than rejected.
    let json = body_json(
        get(app.clone(), &format!("{base}/search?page_size=10000"), Some(&other)).await,
    )
    .await;
    assert_eq!(json["page_size"], 100);
}
