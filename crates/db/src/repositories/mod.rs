//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod campaign_repo;
pub mod game_session_repo;
pub mod user_repo;

pub use campaign_repo::CampaignRepo;
pub use game_session_repo::GameSessionRepo;
pub use user_repo::UserRepo;
