//! Domain layer for the dexplorer plugin.
//!
//! Contains the catalog records, the tri-state [`Resource`] outcome and the
//! error types, independent of Zellij APIs and of the PokéAPI wire format.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: List and detail records plus derived display values
//! - [`resource`]: Success / error / loading outcome of a repository call

pub mod error;
pub mod item;
pub mod resource;

pub use error::{DexError, Result};
pub use item::{display_name, DetailItem, ListItem, Stat, StatLevel, MAX_STAT_VALUE};
pub use resource::Resource;
