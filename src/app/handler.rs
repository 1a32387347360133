//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which the plugin shim
//! feeds key presses, permission results, timer firings and web request
//! replies into the application.
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenSelected`, `Back`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Mode Switching**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **System**: `PermissionsGranted`, `PermissionsDenied`, `DebounceElapsed`
//! - **Network**: `ResponseReceived` with the request it answers
//!
//! # Example
//!
//! ```rust
//! use dexplorer::app::{handle_event, Action, AppState, Event, PagingConfig};
//! use dexplorer::repository::CatalogRepository;
//! use dexplorer::ui::Theme;
//!
//! let mut state = AppState::new(CatalogRepository::default(), PagingConfig::default(), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(should_render);
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! # Ok::<(), dexplorer::DexError>(())
//! ```

use super::list::ListEffect;
use super::modes::{InputMode, SearchFocus};
use crate::api::{ApiRequest, HttpReply};
use crate::app::{Action, AppState};
use crate::domain::error::Result;

/// Events triggered by user input, Zellij, or completed web requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection cursor down by one position.
    KeyDown,
    /// Moves selection cursor up by one position.
    KeyUp,
    /// Opens the detail screen for the highlighted entry.
    OpenSelected,
    /// Leaves the detail screen.
    Back,
    /// Hides the plugin pane.
    CloseFocus,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Focuses the search input field (from navigating mode).
    FocusSearchBar,
    /// Focuses the search results list (from typing mode).
    FocusResults,
    /// Exits search mode and clears the query.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,
    /// Clears the search query and returns to normal mode.
    Escape,
    /// Re-issues the request that last failed on the visible screen.
    Retry,

    /// The user granted web access.
    PermissionsGranted,
    /// The user denied web access.
    PermissionsDenied,

    /// A `set_timeout` timer fired.
    DebounceElapsed,

    /// A web request issued by this plugin completed.
    ResponseReceived {
        /// The request decoded from the reply's context.
        request: ApiRequest,
        reply: HttpReply,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI should re-render, and the actions to execute in
/// order.
///
/// # Errors
///
/// Returns errors from state transitions; the current transitions are
/// infallible, failures of remote calls are carried as state instead.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %event_name(event)).entered();

    match event {
        Event::KeyDown => {
            if state.detail.is_some() {
                return Ok((false, vec![]));
            }
            let request = state.list.move_selection_down();
            Ok((true, fetch(state, request)))
        }
        Event::KeyUp => {
            if state.detail.is_some() {
                return Ok((false, vec![]));
            }
            state.list.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            if state.detail.is_some() {
                return Ok((false, vec![]));
            }
            let Some(request) = state.open_selected() else {
                tracing::debug!(web_access = ?state.list.web_access, "no detail opened");
                return Ok((false, vec![]));
            };
            Ok((true, fetch(state, Some(request))))
        }
        Event::Back => {
            let closed = state.close_detail();
            tracing::debug!(closed, "leaving detail screen");
            Ok((closed, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = if state.list.is_searching() {
                InputMode::Search(SearchFocus::Navigating)
            } else {
                InputMode::Normal
            };
            Ok((true, vec![]))
        }
        Event::ExitSearch | Event::Escape => {
            tracing::debug!(query = %state.list.search_text, "exiting search mode");
            state.input_mode = InputMode::Normal;
            let effects = state.list.set_search_text(String::new());
            Ok((true, apply_effects(state, effects)))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            let effects = state.list.push_search_char(*c);
            tracing::trace!(query = %state.list.search_text, char = %c, "search query updated");
            Ok((true, apply_effects(state, effects)))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search(SearchFocus::Typing) {
                return Ok((false, vec![]));
            }
            let effects = state.list.pop_search_char();
            Ok((true, apply_effects(state, effects)))
        }
        Event::Retry => {
            let request = match state.detail.as_mut() {
                Some(detail) => detail.retry(),
                None => state.list.retry(),
            };
            let should_render = request.is_some();
            Ok((should_render, fetch(state, request)))
        }
        Event::PermissionsGranted => {
            tracing::info!("web access granted, loading catalog");
            let request = state.list.grant_web_access();
            Ok((true, fetch(state, request)))
        }
        Event::PermissionsDenied => {
            tracing::warn!("web access denied");
            state.list.deny_web_access();
            Ok((true, vec![]))
        }
        Event::DebounceElapsed => {
            let request = state.list.on_debounce_elapsed();
            let should_render = request.is_some();
            Ok((should_render, fetch(state, request)))
        }
        Event::ResponseReceived { request, reply } => Ok(apply_response(state, request, reply)),
    }
}

/// Routes a reply to the screen that issued the request.
fn apply_response(state: &mut AppState, request: &ApiRequest, reply: &HttpReply) -> (bool, Vec<Action>) {
    tracing::debug!(request = ?request, status = reply.status, bytes = reply.body.len(), "response received");

    match request {
        ApiRequest::Page { offset, epoch, .. } => {
            if *epoch != state.list.epoch() {
                tracing::debug!(epoch, "ignoring page for superseded epoch");
                return (false, vec![]);
            }
            let outcome = state.repository.decode_page(*offset, reply);
            let changed = state.list.apply_page(*epoch, *offset, outcome);
            (changed, vec![])
        }
        ApiRequest::Search { query, epoch, .. } => {
            if *epoch != state.list.epoch() {
                tracing::debug!(epoch, "ignoring search for superseded epoch");
                return (false, vec![]);
            }
            let outcome = state.repository.decode_search(query, reply);
            let changed = state.list.apply_search(*epoch, outcome);
            (changed, vec![])
        }
        ApiRequest::Detail { id, epoch } => {
            let Some(detail) = state.detail.as_mut() else {
                tracing::debug!(id, "ignoring detail for closed screen");
                return (false, vec![]);
            };
            let outcome = state.repository.decode_detail(reply);
            let changed = detail.apply(*id, *epoch, outcome);
            (changed, vec![])
        }
    }
}

fn fetch(state: &AppState, request: Option<ApiRequest>) -> Vec<Action> {
    request
        .map(|request| Action::Fetch(state.repository.prepare(request)))
        .into_iter()
        .collect()
}

fn apply_effects(state: &AppState, effects: Vec<ListEffect>) -> Vec<Action> {
    effects
        .into_iter()
        .map(|effect| match effect {
            ListEffect::Fetch(request) => Action::Fetch(state.repository.prepare(request)),
            ListEffect::StartTimer(delay) => Action::StartTimer(delay),
        })
        .collect()
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::OpenSelected => "OpenSelected",
        Event::Back => "Back",
        Event::CloseFocus => "CloseFocus",
        Event::SearchMode => "SearchMode",
        Event::FocusSearchBar => "FocusSearchBar",
        Event::FocusResults => "FocusResults",
        Event::ExitSearch => "ExitSearch",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::Escape => "Escape",
        Event::Retry => "Retry",
        Event::PermissionsGranted => "PermissionsGranted",
        Event::PermissionsDenied => "PermissionsDenied",
        Event::DebounceElapsed => "DebounceElapsed",
        Event::ResponseReceived { .. } => "ResponseReceived",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{PagingConfig, Screen};
    use crate::repository::CatalogRepository;
    use crate::ui::Theme;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(
            CatalogRepository::default(),
            PagingConfig::default(),
            Theme::default(),
        )
    }

    fn requests(actions: &[Action]) -> Vec<ApiRequest> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Fetch(http) => Some(http.request.clone()),
                _ => None,
            })
            .collect()
    }

    fn page_reply(names: &[&str]) -> HttpReply {
        let results: Vec<String> = names
            .iter()
            .map(|name| format!(r#"{{"name":"{name}","url":"https://pokeapi.co/api/v2/pokemon/0/"}}"#))
            .collect();
        HttpReply {
            status: 200,
            body: format!(
                r#"{{"count":2,"next":null,"previous":null,"results":[{}]}}"#,
                results.join(",")
            )
            .into_bytes(),
        }
    }

    #[test]
    fn granting_permission_loads_first_page() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let Action::Fetch(http) = &actions[0] else {
            panic!("expected fetch");
        };
        assert_eq!(http.url, "https://pokeapi.co/api/v2/pokemon?limit=20&offset=0");
        assert_eq!(state.list.web_access, crate::app::WebAccess::Granted);
    }

    #[test]
    fn typing_arms_timer_only_while_typing() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Char('p')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        handle_event(&mut state, &Event::SearchMode).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::Char('p')).unwrap();
        assert_eq!(actions, vec![Action::StartTimer(Duration::from_millis(500))]);
    }

    #[test]
    fn debounced_search_flow() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('b')).unwrap();
        handle_event(&mut state, &Event::Char('u')).unwrap();

        let (render, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        assert!(!render);
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed).unwrap();
        let request = requests(&actions).remove(0);
        assert!(matches!(&request, ApiRequest::Search { query, limit: 1500, .. } if query == "bu"));

        let reply = HttpReply {
            status: 200,
            body: br#"{"count":2,"next":null,"previous":null,"results":[
                {"name":"bulbasaur","url":"https://pokeapi.co/api/v2/pokemon/1/"},
                {"name":"pikachu","url":"https://pokeapi.co/api/v2/pokemon/25/"}]}"#
                .to_vec(),
        };
        let (render, _) =
            handle_event(&mut state, &Event::ResponseReceived { request, reply }).unwrap();
        assert!(render);
        assert_eq!(state.list.items.len(), 1);
        assert_eq!(state.list.items[0].name, "Bulbasaur");
    }

    #[test]
    fn late_page_after_search_started_is_dropped() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let request = requests(&actions).remove(0);

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::ResponseReceived { request, reply: page_reply(&["bulbasaur", "ivysaur"]) },
        )
        .unwrap();
        assert!(!render);
        assert!(state.list.items.is_empty());
    }

    #[test]
    fn exit_search_restarts_pagination() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::ExitSearch).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(
            requests(&actions),
            vec![ApiRequest::Page { limit: 20, offset: 0, epoch: 2 }]
        );
    }

    #[test]
    fn open_detail_and_go_back() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let request = requests(&actions).remove(0);
        handle_event(
            &mut state,
            &Event::ResponseReceived { request, reply: page_reply(&["bulbasaur", "ivysaur"]) },
        )
        .unwrap();

        handle_event(&mut state, &Event::KeyDown).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        let Action::Fetch(http) = &actions[0] else {
            panic!("expected fetch");
        };
        assert_eq!(http.url, "https://pokeapi.co/api/v2/pokemon/2");
        assert_eq!(state.screen(), Screen::Detail);

        let (render, actions) = handle_event(&mut state, &Event::KeyDown).unwrap();
        assert!(!render && actions.is_empty());

        let (render, _) = handle_event(&mut state, &Event::Back).unwrap();
        assert!(render);
        assert_eq!(state.screen(), Screen::List);

        let detail_reply = HttpReply { status: 404, body: b"Not Found".to_vec() };
        let (render, _) = handle_event(
            &mut state,
            &Event::ResponseReceived { request: http.request.clone(), reply: detail_reply },
        )
        .unwrap();
        assert!(!render);
    }

    #[test]
    fn retry_targets_visible_screen() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        state.list.items = vec![crate::domain::ListItem {
            id: 7,
            name: "Squirtle".into(),
            image_url: "u".into(),
        }];
        let (_, actions) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        let request = requests(&actions).remove(0);
        handle_event(
            &mut state,
            &Event::ResponseReceived {
                request,
                reply: HttpReply { status: 500, body: vec![] },
            },
        )
        .unwrap();
        assert_eq!(
            state.detail.as_ref().and_then(|d| d.error.clone()).as_deref(),
            Some("Could not load this entry: HTTP 500: request failed")
        );

        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert_eq!(requests(&actions), vec![ApiRequest::Detail { id: 7, epoch: 1 }]);
    }

    #[test]
    fn keys_before_permission_do_not_fetch() {
        let mut state = state();
        for event in [Event::KeyDown, Event::Retry, Event::Escape, Event::OpenSelected] {
            let (_, actions) = handle_event(&mut state, &event).unwrap();
            assert!(requests(&actions).is_empty(), "{event:?} fetched before permission");
        }

        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        assert_eq!(
            requests(&actions),
            vec![ApiRequest::Page { limit: 20, offset: 0, epoch: 0 }]
        );
    }

    #[test]
    fn denied_permission_blocks_every_fetch() {
        let mut state = state();
        handle_event(&mut state, &Event::PermissionsDenied).unwrap();

        handle_event(&mut state, &Event::SearchMode).unwrap();
        handle_event(&mut state, &Event::Char('a')).unwrap();
        for event in [
            Event::DebounceElapsed,
            Event::KeyDown,
            Event::Retry,
            Event::ExitSearch,
            Event::KeyDown,
            Event::OpenSelected,
        ] {
            let (_, actions) = handle_event(&mut state, &event).unwrap();
            assert!(requests(&actions).is_empty(), "{event:?} fetched after denial");
        }
        assert!(!state.list.is_loading);
    }

    #[test]
    fn close_focus_hides_plugin() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
        assert!(!render);
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
