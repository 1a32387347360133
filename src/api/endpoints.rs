//! Endpoint bindings for the PokéAPI.

use super::request::{ApiRequest, HttpRequest};

/// Default REST base URL (trailing slash included).
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Default static-asset host serving front sprites by numeric id.
pub const DEFAULT_SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/";

/// Base URLs the requests are built against.
///
/// Both bases are normalized to end with `/` so paths can be appended
/// without caring how they were configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base_url: String,
    sprite_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, DEFAULT_SPRITE_BASE_URL)
    }
}

impl Endpoints {
    #[must_use]
    pub fn new(api_base_url: &str, sprite_base_url: &str) -> Self {
        Self {
            api_base_url: with_trailing_slash(api_base_url),
            sprite_base_url: with_trailing_slash(sprite_base_url),
        }
    }

    /// `GET pokemon?limit=..&offset=..`
    #[must_use]
    pub fn list_url(&self, limit: u32, offset: u32) -> String {
        format!("{}pokemon?limit={limit}&offset={offset}", self.api_base_url)
    }

    /// `GET pokemon/{id}`
    #[must_use]
    pub fn detail_url(&self, id: u32) -> String {
        format!("{}pokemon/{id}", self.api_base_url)
    }

    /// Sprite image for a catalog number.
    #[must_use]
    pub fn sprite_url(&self, id: u32) -> String {
        format!("{}{id}.png", self.sprite_base_url)
    }

    /// Binds a request to the URL it is fetched from.
    ///
    /// Search has no endpoint of its own: it is one bulk list call starting
    /// at offset zero, filtered client-side.
    #[must_use]
    pub fn bind(&self, request: ApiRequest) -> HttpRequest {
        let url = match &request {
            ApiRequest::Page { limit, offset, .. } => self.list_url(*limit, *offset),
            ApiRequest::Search { limit, .. } => self.list_url(*limit, 0),
            ApiRequest::Detail { id, .. } => self.detail_url(*id),
        };
        HttpRequest { url, request }
    }
}

fn with_trailing_slash(base: &str) -> String {
    let trimmed = base.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}
