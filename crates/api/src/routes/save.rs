//! Route definitions for the `/saves` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::save;
use crate::state::AppState;

/// Routes mounted at `/saves`.
///
/// ```text
/// GET    /              list save slots (payloads omitted)
/// PUT    /              create or overwrite a slot
/// GET    /{slot_name}   fetch a slot with payload
/// DELETE /{slot_name}   delete a slot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(save::list).put(save::save))
        .route(
            "/{slot_name}",
            get(save::get_slot).delete(save::delete_slot),
        )
}
