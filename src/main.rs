//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the dexplorer library and the
//! Zellij plugin system: it maps Zellij events to library events, and
//! library actions to Zellij API calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Initialize tracing, parse config, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `WebRequestResult`, `Timer` and
//!    `PermissionRequestResult` events
//! 3. **Permission**: Ask for `WebAccess`; the first page is requested once
//!    it is granted
//! 4. **Update**: Handle events, delegate to the library layer
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search and retry events, depending on screen and mode
//! - `WebRequestResult` → `Event::ResponseReceived` (request decoded from context)
//! - `Timer` → `Event::DebounceElapsed`
//! - `PermissionRequestResult` → `Event::PermissionsGranted` / `PermissionsDenied`
//!
//! # Keybindings
//!
//! Catalog list:
//! - `j`/`Down`/`Ctrl+n`: Move down
//! - `k`/`Up`/`Ctrl+p`: Move up
//! - `Enter`: Open detail
//! - `/`: Search
//! - `r`: Retry
//! - `Esc`: Clear search
//! - `q`: Close plugin
//!
//! While typing a search:
//! - Characters and `Backspace` edit the query
//! - `Enter`: Move to the results
//! - `Esc`: Exit search and clear it
//!
//! While navigating search results, list keys apply and `/` returns to the
//! query.
//!
//! Detail:
//! - `Esc`/`q`/`Backspace`/`Left`/`h`: Back to the list
//! - `r`: Retry

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use std::collections::BTreeMap;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
use dexplorer::api::{ApiRequest, HttpReply};
#[cfg(target_family = "wasm")]
use dexplorer::{handle_event, Action, Config, Event, InputMode, Screen, SearchFocus};

#[cfg(target_family = "wasm")]
register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
#[cfg(target_family = "wasm")]
struct State {
    app: dexplorer::AppState,
}

#[cfg(target_family = "wasm")]
impl Default for State {
    fn default() -> Self {
        Self {
            app: dexplorer::initialize(&Config::default()),
        }
    }
}

#[cfg(target_family = "wasm")]
impl ZellijPlugin for State {
    /// Parses configuration, requests web access and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        dexplorer::observability::init_tracing(&Config::tracing_only(&configuration));

        let _guard = tracing::debug_span!("plugin_load").entered();

        let config = Config::from_zellij(&configuration);

        tracing::debug!(api_base_url = %config.api_base_url, page_size = config.page_size, "parsed configuration");
        self.app = dexplorer::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, delegates to `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let _guard = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name)
            .entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    Self::execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        dexplorer::ui::render(&self.app, rows, cols);
    }
}

#[cfg(target_family = "wasm")]
impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the visible screen.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if self.app.screen() == Screen::Detail {
            return match key.bare_key {
                BareKey::Esc | BareKey::Backspace | BareKey::Left | BareKey::Char('q' | 'h') => {
                    Some(Event::Back)
                }
                BareKey::Char('r') => Some(Event::Retry),
                _ => None,
            };
        }

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Search(SearchFocus::Typing) => Some(match key.bare_key {
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Enter => Event::FocusResults,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::Search(SearchFocus::Navigating) => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char('/') => Event::FocusSearchBar,
                BareKey::Char('r') => Event::Retry,
                BareKey::Esc => Event::ExitSearch,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char('/') => Event::SearchMode,
                BareKey::Char('r') => Event::Retry,
                BareKey::Esc => Event::Escape,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Maps a web request result back to the request that produced it.
    ///
    /// Results without a dexplorer context are ignored.
    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        match ApiRequest::from_context(context) {
            Ok(Some(request)) => Some(Event::ResponseReceived {
                request,
                reply: HttpReply { status, body },
            }),
            Ok(None) => {
                tracing::debug!("ignoring web request result without request context");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "dropping web request result");
                None
            }
        }
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                let context = match request.request.to_context() {
                    Ok(context) => context,
                    Err(e) => {
                        tracing::warn!(error = %e, url = %request.url, "not sending web request");
                        return;
                    }
                };
                tracing::debug!(url = %request.url, "sending web request");
                web_request(&request.url, HttpVerb::Get, BTreeMap::new(), Vec::new(), context);
            }
            Action::StartTimer(delay) => {
                set_timeout(delay.as_secs_f64());
            }
        }
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("dexplorer is a Zellij plugin; build it with `cargo build --target wasm32-wasip1`");
}
