//! # Menu Shared
//! 
//! Shared configuration, telemetry, and helpers for the menu admin application.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
