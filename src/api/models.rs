//! Wire records deserialized from PokéAPI JSON.
//!
//! Only the fields the plugin reads are declared; serde ignores the rest of
//! the (large) detail payload.

use serde::Deserialize;

/// Body of `GET pokemon?limit&offset`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListResponse {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A `{ name, url }` reference to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Body of `GET pokemon/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetailResponse {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatEntry>,
    pub sprites: Sprites,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: StatName,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatName {
    pub name: String,
}

/// Sprite URLs; any of them may be `null` for some catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}
