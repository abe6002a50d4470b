//! Web layer for the maps dashboard.
//!
//! Provides JSON endpoints the rendering collaborator uses to read state
//! and report user intent.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
