//! Dexplorer: a Zellij plugin for browsing the PokéAPI catalog.
//!
//! Dexplorer provides:
//! - A paginated catalog list that loads more entries as the cursor nears the end
//! - Debounced client-side search with match highlighting
//! - A detail screen with measurements, type chips and base-stat bars
//! - Retry of any failed request from the screen that shows the failure

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Keys, web requests, timers
//! └─────────────────────────────────────────────────────┘
//!                        │ Event / Action
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← List and detail screens
//! │  - Event handling, request epochs, debounce         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │
//! ┌───────────────┐   ┌─────────────────────────────────┐
//! │ UI Layer      │   │ Repository (repository/)        │
//! │ (ui/)         │   │ - Reply decoding, error strings │
//! │ - Components  │   ├─────────────────────────────────┤
//! │ - Theming     │   │ API bindings (api/)             │
//! └───────────────┘   │ - URLs, wire models, context    │
//!                     └─────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) and sandbox paths (infrastructure/)│
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← OTLP JSON to file
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Zellij performs HTTP calls on the plugin's behalf and reports each result
//! as a separate event, so the application layer never does I/O. It returns
//! [`Action`]s (fetch a URL, start a timer, hide the pane) that the shim
//! executes, and receives replies back as [`Event::ResponseReceived`].
//!
//! # Modules
//!
//! - [`api`]: Endpoint URLs, wire models and request correlation
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Catalog records, `Resource` and errors
//! - [`infrastructure`]: Sandbox paths
//! - [`repository`]: Maps replies to domain records
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/dexplorer.wasm" {
//!         page_size "20"
//!         search_debounce_ms "500"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use dexplorer::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! let Some(Action::Fetch(request)) = actions.first() else {
//!     panic!("expected the first page to be requested");
//! };
//! assert_eq!(request.url, "https://pokeapi.co/api/v2/pokemon?limit=20&offset=0");
//! # Ok::<(), dexplorer::DexError>(())
//! ```
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Tests**: run natively; the plugin shim is only compiled for wasm

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod repository;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, PagingConfig, Screen, SearchFocus};
pub use domain::{DexError, Result};
pub use ui::Theme;

use api::{Endpoints, DEFAULT_API_BASE_URL, DEFAULT_SPRITE_BASE_URL};
use repository::CatalogRepository;
use std::collections::BTreeMap;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/dexplorer.wasm" {
///     api_base_url "https://pokeapi.co/api/v2/"
///     page_size "20"
///     search_limit "1500"
///     search_debounce_ms "500"
///     prefetch_distance "3"
///     theme "catppuccin-mocha"
///     theme_file "~/themes/dex.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// REST base URL. Default: `https://pokeapi.co/api/v2/`
    pub api_base_url: String,

    /// Base URL for front sprites, addressed as `{base}{id}.png`.
    pub sprite_base_url: String,

    /// Entries per browse page. Default: 20
    pub page_size: u32,

    /// Entries fetched in one request when searching. Default: 1500
    pub search_limit: u32,

    /// Quiet period after the last keystroke before a search runs. Default: 500
    pub search_debounce_ms: u64,

    /// The next page loads when the cursor is this close to the end. Default: 3
    pub prefetch_distance: usize,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing filter for OpenTelemetry spans. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let paging = PagingConfig::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
            page_size: paging.page_size,
            search_limit: paging.search_limit,
            search_debounce_ms: 500,
            prefetch_distance: paging.prefetch_distance,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Every key falls back to its default on its own: a missing, empty or
    /// unparsable value never affects the other keys. Numeric values must be
    /// positive, except `prefetch_distance` which may be zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use dexplorer::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "50".to_string());
    /// map.insert("search_debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.page_size, 50);
    /// assert_eq!(config.search_debounce_ms, 500);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        Self {
            api_base_url: text_option(config, "api_base_url").unwrap_or(defaults.api_base_url),
            sprite_base_url: text_option(config, "sprite_base_url")
                .unwrap_or(defaults.sprite_base_url),
            page_size: positive_option(config, "page_size", defaults.page_size),
            search_limit: positive_option(config, "search_limit", defaults.search_limit),
            search_debounce_ms: positive_option(
                config,
                "search_debounce_ms",
                defaults.search_debounce_ms,
            ),
            prefetch_distance: number_option(config, "prefetch_distance", defaults.prefetch_distance),
            theme_name: text_option(config, "theme"),
            theme_file: text_option(config, "theme_file"),
            trace_level: text_option(config, "trace_level"),
        }
    }

    /// Reads only `trace_level`, leaving every other field at its default.
    ///
    /// Nothing is logged here, so the plugin can install tracing from this
    /// before [`Config::from_zellij`] reports invalid values.
    #[must_use]
    pub fn tracing_only(config: &BTreeMap<String, String>) -> Self {
        Self {
            trace_level: text_option(config, "trace_level"),
            ..Self::default()
        }
    }

    /// Paging and search tuning derived from this configuration.
    #[must_use]
    pub const fn paging(&self) -> PagingConfig {
        PagingConfig {
            page_size: self.page_size,
            search_limit: self.search_limit,
            search_debounce: Duration::from_millis(self.search_debounce_ms),
            prefetch_distance: self.prefetch_distance,
        }
    }
}

fn text_option(config: &BTreeMap<String, String>, key: &str) -> Option<String> {
    config
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(String::from)
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| DexError::Config(format!("{key}: expected a number, got '{raw}'")))
}

fn number_option<T: std::str::FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    let Some(raw) = config.get(key) else {
        return default;
    };
    parse_number(key, raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring configuration value");
        default
    })
}

fn positive_option<T>(config: &BTreeMap<String, String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + PartialEq + Default + Copy,
{
    let value = number_option(config, key, default);
    if value == T::default() {
        tracing::warn!(key, "configuration value must be positive, using default");
        return default;
    }
    value
}

/// Initializes the plugin with configuration.
///
/// The theme comes from `theme_file` if set, then `theme`, then the default;
/// a theme that fails to load falls back to the default.
///
/// # Example
///
/// ```rust
/// use dexplorer::{initialize, Config, Screen};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.screen(), Screen::List);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing dexplorer plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let repository = CatalogRepository::new(Endpoints::new(&config.api_base_url, &config.sprite_base_url));

    AppState::new(repository, config.paging(), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let config = Config::from_zellij(&map(&[
            ("api_base_url", "http://localhost:8000/api/v2"),
            ("sprite_base_url", "http://localhost:8000/sprites"),
            ("page_size", "50"),
            ("search_limit", "200"),
            ("search_debounce_ms", "250"),
            ("prefetch_distance", "0"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/dex.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_base_url, "http://localhost:8000/api/v2");
        assert_eq!(config.sprite_base_url, "http://localhost:8000/sprites");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.search_limit, 200);
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.prefetch_distance, 0);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("~/dex.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_values_fall_back_per_key() {
        let config = Config::from_zellij(&map(&[
            ("page_size", "0"),
            ("search_limit", "-5"),
            ("search_debounce_ms", "fast"),
            ("prefetch_distance", "2"),
            ("api_base_url", "   "),
        ]));

        let defaults = Config::default();
        assert_eq!(config.page_size, defaults.page_size);
        assert_eq!(config.search_limit, defaults.search_limit);
        assert_eq!(config.search_debounce_ms, defaults.search_debounce_ms);
        assert_eq!(config.api_base_url, defaults.api_base_url);
        assert_eq!(config.prefetch_distance, 2);
    }

    #[test]
    fn tracing_only_reads_the_trace_level() {
        let config = Config::tracing_only(&map(&[
            ("trace_level", " debug "),
            ("page_size", "0"),
            ("theme", "catppuccin-latte"),
        ]));

        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.page_size, Config::default().page_size);
        assert!(config.theme_name.is_none());
    }

    #[test]
    fn bad_number_is_a_config_error() {
        let err = parse_number::<u32>("page_size", "many").unwrap_err();
        assert!(matches!(err, DexError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: page_size: expected a number, got 'many'");
    }

    #[test]
    fn paging_uses_configured_values() {
        let config = Config {
            page_size: 10,
            search_debounce_ms: 120,
            ..Config::default()
        };

        let paging = config.paging();
        assert_eq!(paging.page_size, 10);
        assert_eq!(paging.search_debounce, Duration::from_millis(120));
    }

    #[test]
    fn initialize_binds_configured_api() {
        let config = Config {
            api_base_url: "http://localhost:8000/api/v2".to_string(),
            page_size: 5,
            ..Config::default()
        };
        let mut state = initialize(&config);

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let [Action::Fetch(request)] = actions.as_slice() else {
            panic!("expected one fetch, got {actions:?}");
        };
        assert_eq!(request.url, "http://localhost:8000/api/v2/pokemon?limit=5&offset=0");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("no-such-theme".to_string()),
            ..Config::default()
        };

        assert_eq!(initialize(&config).theme.name, Theme::default().name);
    }
}
