//! HTTP request handlers, one module per resource.

pub mod alliance;
pub mod auth;
pub mod block;
pub mod friendship;
pub mod instance;
pub mod marketplace;
pub mod player_data;
pub mod save;
pub mod world_view;
