//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where
//!   the resource supports partial updates

pub mod alliance;
pub mod friendship;
pub mod game_instance;
pub mod game_save;
pub mod marketplace;
pub mod player_data;
pub mod user;
pub mod user_block;
pub mod world_view;
