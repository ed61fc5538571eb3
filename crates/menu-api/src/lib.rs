//! # Menu API
//! 
//! HTTP handlers, DTOs, validation, and the router for the menu admin backend.

pub mod handlers;
pub mod dto;
pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
