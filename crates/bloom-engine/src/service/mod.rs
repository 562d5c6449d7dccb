//! Service Layer
//!
//! Orchestrates domain logic behind the `FilterApi` port.

pub mod filter_service;

pub use filter_service::{FilterService, ITEM_ADDED_MESSAGE, SETTINGS_UPDATED_MESSAGE};
