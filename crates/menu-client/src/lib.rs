//! # Menu Client
//! 
//! Headless client for the menu admin backend: HTTP calls, per-request state,
//! an incrementally filled item cache, and lazy tree expansion.

pub mod api;
pub mod cache;
pub mod error;
pub mod expansion;
pub mod explorer;
pub mod query;
pub mod state;
pub mod store;

pub use api::{CreateItem, MenuApiClient};
pub use cache::ItemCache;
pub use error::{ClientError, ErrorPayload};
pub use explorer::{ItemDraft, MenuExplorer};
pub use query::ItemQuery;
pub use state::{ApiState, Applied, Ticket};
pub use store::{ItemStore, MenuStore};
