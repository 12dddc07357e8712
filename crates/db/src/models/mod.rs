//! Row models and DTOs, one module per table family.

pub mod campaign;
pub mod game_session;
pub mod user;
