//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod alliance_repo;
pub mod friendship_repo;
pub mod game_instance_repo;
pub mod game_save_repo;
pub mod marketplace_repo;
pub mod player_data_repo;
pub mod user_block_repo;
pub mod user_repo;
pub mod world_view_repo;

pub use alliance_repo::AllianceRepo;
pub use friendship_repo::FriendshipRepo;
pub use game_instance_repo::GameInstanceRepo;
pub use game_save_repo::GameSaveRepo;
pub use marketplace_repo::MarketplaceListingRepo;
pub use player_data_repo::PlayerGameDataRepo;
pub use user_block_repo::UserBlockRepo;
pub use user_repo::UserRepo;
pub use world_view_repo::WorldViewRepo;
