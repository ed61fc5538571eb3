//! HTTP handlers

pub mod health;
pub mod menu;
pub mod item;
