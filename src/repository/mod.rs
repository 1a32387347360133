//! Repository layer mapping API replies to domain records.
//!
//! The repository is the error boundary of the plugin: every reply is turned
//! into a [`Resource`], and any failure along the way (HTTP status, JSON
//! shape, resource URL) becomes a message prefixed with the operation that
//! failed. Screens never see a [`DexError`].
//!
//! Requests themselves are issued by the plugin shim; the repository only
//! binds [`ApiRequest`]s to URLs and decodes what comes back.

use crate::api::{ApiRequest, DetailResponse, Endpoints, HttpReply, HttpRequest, ListResponse};
use crate::domain::{display_name, DetailItem, DexError, ListItem, Resource, Result, Stat};

const PAGE_ERROR: &str = "Could not load the catalog";
const DETAIL_ERROR: &str = "Could not load this entry";
const SEARCH_ERROR: &str = "Search failed";

/// Pass-through between the remote API and the screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRepository {
    endpoints: Endpoints,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    /// Binds a request to its URL so the plugin shim can send it.
    #[must_use]
    pub fn prepare(&self, request: ApiRequest) -> HttpRequest {
        self.endpoints.bind(request)
    }

    /// Maps one browse page.
    ///
    /// The list endpoint does not return ids, so entry `i` of a page fetched
    /// at `offset` is numbered `offset + i + 1`.
    pub fn decode_page(&self, offset: u32, reply: &HttpReply) -> Resource<Vec<ListItem>> {
        let _span = tracing::debug_span!("decode_page", offset, status = reply.status).entered();

        let result = parse_list(reply).map(|response| {
            response
                .results
                .into_iter()
                .zip(offset + 1..)
                .map(|(entry, id)| self.list_item(id, &entry.name))
                .collect::<Vec<_>>()
        });

        log_outcome("page", &result);
        Resource::from_result(result, PAGE_ERROR)
    }

    /// Filters a bulk list reply by substring and maps the matches.
    ///
    /// Ids come from the trailing segment of each entry's resource URL. An
    /// empty match set is a success, not an error.
    pub fn decode_search(&self, query: &str, reply: &HttpReply) -> Resource<Vec<ListItem>> {
        let needle = query.to_lowercase();
        let _span = tracing::debug_span!("decode_search", query = %needle, status = reply.status)
            .entered();

        let result = parse_list(reply).and_then(|response| {
            let total = response.results.len();
            let matches = response
                .results
                .into_iter()
                .filter(|entry| entry.name.to_lowercase().contains(&needle))
                .map(|entry| id_from_url(&entry.url).map(|id| self.list_item(id, &entry.name)))
                .collect::<Result<Vec<_>>>()?;
            tracing::debug!(scanned = total, matched = matches.len(), "search filter applied");
            Ok(matches)
        });

        log_outcome("search", &result);
        Resource::from_result(result, SEARCH_ERROR)
    }

    /// Maps a detail reply.
    pub fn decode_detail(&self, reply: &HttpReply) -> Resource<DetailItem> {
        let _span = tracing::debug_span!("decode_detail", status = reply.status).entered();

        let result = reply
            .success_body()
            .and_then(|body| Ok(serde_json::from_slice::<DetailResponse>(body)?))
            .map(|response| self.detail_item(response));

        if let Err(e) = &result {
            tracing::debug!(error = %e, "detail request failed");
        }
        Resource::from_result(result, DETAIL_ERROR)
    }

    fn list_item(&self, id: u32, raw_name: &str) -> ListItem {
        ListItem {
            id,
            name: display_name(raw_name),
            image_url: self.endpoints.sprite_url(id),
        }
    }

    fn detail_item(&self, response: DetailResponse) -> DetailItem {
        let mut types = response.types;
        types.sort_by_key(|slot| slot.slot);

        let image_url = response
            .sprites
            .front_default
            .unwrap_or_else(|| self.endpoints.sprite_url(response.id));

        DetailItem {
            id: response.id,
            name: display_name(&response.name),
            height: response.height,
            weight: response.weight,
            types: types.into_iter().map(|slot| slot.kind.name).collect(),
            stats: response
                .stats
                .into_iter()
                .map(|entry| Stat {
                    name: entry.stat.name,
                    value: entry.base_stat,
                })
                .collect(),
            image_url,
        }
    }
}

fn parse_list(reply: &HttpReply) -> Result<ListResponse> {
    Ok(serde_json::from_slice(reply.success_body()?)?)
}

fn log_outcome(operation: &str, result: &Result<Vec<ListItem>>) {
    match result {
        Ok(items) => tracing::debug!(operation, count = items.len(), "catalog request succeeded"),
        Err(e) => tracing::debug!(operation, error = %e, "catalog request failed"),
    }
}

/// Extracts the numeric id from a resource URL such as
/// `https://pokeapi.co/api/v2/pokemon/25/`.
fn id_from_url(url: &str) -> Result<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
        .ok_or_else(|| DexError::ResourceUrl(url.to_string()))
}
