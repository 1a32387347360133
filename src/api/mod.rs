//! Remote access layer for the PokéAPI.
//!
//! Declares the two read-only endpoints the plugin consumes, the wire
//! records their JSON maps to, and the typed request values the plugin shim
//! turns into Zellij `web_request` calls.
//!
//! # Modules
//!
//! - [`endpoints`]: URL construction for list, detail and sprite assets
//! - [`models`]: serde wire records
//! - [`request`]: typed requests, replies, and correlation context codec

pub mod endpoints;
pub mod models;
pub mod request;

pub use endpoints::{Endpoints, DEFAULT_API_BASE_URL, DEFAULT_SPRITE_BASE_URL};
pub use models::{DetailResponse, ListResponse, NamedResource};
pub use request::{ApiRequest, HttpReply, HttpRequest};
