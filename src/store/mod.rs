//! MongoDB document store integration.

pub mod client;
pub mod types;

pub use client::{MongoStore, StoreApi};
pub use types::{Collection, DEFAULT_LIST_LIMIT, StoreError};
