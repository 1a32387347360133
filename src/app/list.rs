//! List screen state and the pagination/search controller.
//!
//! The list screen either browses the catalog page by page or shows the
//! results of a client-side search. Which of the two is active is decided by
//! the search text alone: empty text means browsing.
//!
//! # Phases
//!
//! ```text
//!            near end / retry            page ok (full)
//!   Idle ───────────────────► LoadingPage ──────────► Idle
//!    ▲                          │  │ page short/empty
//!    │ text cleared             │  └──────────────► Exhausted
//!    │ (reset to page 0)        └─ page failed ───► Failed
//!    │
//!    │ text typed        timer elapsed          results
//!    └─────── SearchPending ──────────► Searching ──────► SearchResults
//! ```
//!
//! No request leaves the screen until web access is granted. Key presses and
//! timers before that only move the cursor and edit the text; granting
//! access issues whatever the screen is waiting for.
//!
//! Every request carries the screen's `epoch`. Changing the search text bumps
//! the epoch, which abandons whatever was in flight: the socket is not
//! cancelled, its reply is simply dropped when it arrives.

use crate::api::ApiRequest;
use crate::domain::{ListItem, Resource};
use std::time::Duration;

use super::debounce::Debouncer;

/// Pagination and search tuning, derived from [`crate::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    /// Entries requested per browse page.
    pub page_size: u32,
    /// Entries fetched in one call when searching.
    pub search_limit: u32,
    /// Input pause required before a search is issued.
    pub search_debounce: Duration,
    /// How close to the end of the list the cursor must get before the next
    /// page is requested.
    pub prefetch_distance: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            search_limit: 1500,
            search_debounce: Duration::from_millis(500),
            prefetch_distance: 3,
        }
    }
}

/// Observable state of the controller, derived from the screen fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    LoadingPage,
    Exhausted,
    Failed,
    SearchPending,
    Searching,
    SearchResults,
}

/// Outcome of the web access permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebAccess {
    Pending,
    Granted,
    Denied,
}

/// Side effect requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEffect {
    Fetch(ApiRequest),
    StartTimer(Duration),
}

/// State of the catalog list screen.
#[derive(Debug, Clone)]
pub struct ListScreen {
    /// Accumulated browse pages, or the current search results.
    pub items: Vec<ListItem>,
    /// A page or search request is outstanding for the current epoch.
    pub is_loading: bool,
    /// Last failure, rendered verbatim.
    pub error: Option<String>,
    /// The last browse page came back short.
    pub end_reached: bool,
    /// Next page to request (zero-based).
    pub page: u32,
    pub search_text: String,
    /// Cursor position within `items`.
    pub selected_index: usize,
    /// Requests are only produced once this is `Granted`.
    pub web_access: WebAccess,
    epoch: u64,
    debounce: Debouncer,
    paging: PagingConfig,
}

impl ListScreen {
    #[must_use]
    pub const fn new(paging: PagingConfig) -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
            end_reached: false,
            page: 0,
            search_text: String::new(),
            selected_index: 0,
            web_access: WebAccess::Pending,
            epoch: 0,
            debounce: Debouncer::new(paging.search_debounce),
            paging,
        }
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.search_text.is_empty()
    }

    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn phase(&self) -> ListPhase {
        if self.is_searching() {
            if self.debounce.is_pending() {
                ListPhase::SearchPending
            } else if self.is_loading {
                ListPhase::Searching
            } else {
                ListPhase::SearchResults
            }
        } else if self.is_loading {
            ListPhase::LoadingPage
        } else if self.error.is_some() {
            ListPhase::Failed
        } else if self.end_reached {
            ListPhase::Exhausted
        } else {
            ListPhase::Idle
        }
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&ListItem> {
        self.items.get(self.selected_index)
    }

    /// Records that web access was granted and issues the request the screen
    /// has been waiting for: the current page, or the search for text typed
    /// in the meantime.
    pub fn grant_web_access(&mut self) -> Option<ApiRequest> {
        self.web_access = WebAccess::Granted;
        self.retry()
    }

    pub fn deny_web_access(&mut self) {
        self.web_access = WebAccess::Denied;
    }

    /// Requests the next browse page.
    ///
    /// Refused without web access, while a request is outstanding, once the
    /// catalog is exhausted, and while search text is present.
    pub fn load_next_page(&mut self) -> Option<ApiRequest> {
        if self.web_access != WebAccess::Granted
            || self.is_loading
            || self.end_reached
            || self.is_searching()
        {
            tracing::debug!(
                web_access = ?self.web_access,
                is_loading = self.is_loading,
                end_reached = self.end_reached,
                searching = self.is_searching(),
                "page load skipped"
            );
            return None;
        }

        let limit = self.paging.page_size;
        let Some(offset) = self.page.checked_mul(limit) else {
            tracing::warn!(page = self.page, limit, "page offset out of range, treating catalog as exhausted");
            self.end_reached = true;
            return None;
        };
        self.is_loading = true;
        self.error = None;

        tracing::debug!(page = self.page, offset, limit, epoch = self.epoch, "loading page");
        Some(ApiRequest::Page {
            limit,
            offset,
            epoch: self.epoch,
        })
    }

    /// Applies a browse page reply. Returns `false` for superseded replies.
    pub fn apply_page(&mut self, epoch: u64, offset: u32, outcome: Resource<Vec<ListItem>>) -> bool {
        if epoch != self.epoch || self.is_searching() {
            tracing::debug!(epoch, current_epoch = self.epoch, offset, "dropping stale page");
            return false;
        }

        match outcome {
            Resource::Success(items) => {
                let received = items.len();
                self.end_reached = received < self.paging.page_size as usize;
                self.items.extend(items);
                self.page += 1;
                self.is_loading = false;
                tracing::debug!(
                    received,
                    total = self.items.len(),
                    end_reached = self.end_reached,
                    "page appended"
                );
            }
            Resource::Error(message) => {
                tracing::warn!(error = %message, offset, "page load failed");
                self.error = Some(message);
                self.is_loading = false;
            }
            Resource::Loading => self.is_loading = true,
        }
        true
    }

    /// Replaces the search text.
    ///
    /// Clearing the text resets the list to the start of pagination and
    /// requests page zero; any other text (re)arms the debounce timer.
    pub fn set_search_text(&mut self, text: String) -> Vec<ListEffect> {
        if text == self.search_text {
            return vec![];
        }

        self.search_text = text;
        self.epoch += 1;
        self.debounce.cancel();
        self.is_loading = false;

        if self.search_text.is_empty() {
            tracing::debug!(epoch = self.epoch, "search cleared, restarting pagination");
            self.items.clear();
            self.page = 0;
            self.end_reached = false;
            self.error = None;
            self.selected_index = 0;
            return self.load_next_page().map(ListEffect::Fetch).into_iter().collect();
        }

        tracing::trace!(query = %self.search_text, epoch = self.epoch, "search text changed");
        vec![ListEffect::StartTimer(self.debounce.arm())]
    }

    pub fn push_search_char(&mut self, c: char) -> Vec<ListEffect> {
        let mut text = self.search_text.clone();
        text.push(c);
        self.set_search_text(text)
    }

    pub fn pop_search_char(&mut self) -> Vec<ListEffect> {
        let mut text = self.search_text.clone();
        text.pop();
        self.set_search_text(text)
    }

    /// Handles a timer firing; issues the search when the timer was the
    /// live debounce timer.
    pub fn on_debounce_elapsed(&mut self) -> Option<ApiRequest> {
        if !self.debounce.on_timer() || !self.is_searching() {
            return None;
        }
        self.start_search()
    }

    /// Applies a search reply. Returns `false` for superseded replies.
    pub fn apply_search(&mut self, epoch: u64, outcome: Resource<Vec<ListItem>>) -> bool {
        if epoch != self.epoch || !self.is_searching() {
            tracing::debug!(epoch, current_epoch = self.epoch, "dropping stale search results");
            return false;
        }

        match outcome {
            Resource::Success(items) => {
                tracing::debug!(query = %self.search_text, matches = items.len(), "search results shown");
                self.items = items;
                self.error = None;
                self.is_loading = false;
            }
            Resource::Error(message) => {
                tracing::warn!(error = %message, "search failed");
                self.items.clear();
                self.error = Some(message);
                self.is_loading = false;
            }
            Resource::Loading => self.is_loading = true,
        }
        self.selected_index = 0;
        true
    }

    /// User-triggered retry after a failure.
    pub fn retry(&mut self) -> Option<ApiRequest> {
        if self.is_searching() {
            if self.is_loading || self.debounce.is_pending() {
                return None;
            }
            return self.start_search();
        }
        self.load_next_page()
    }

    /// Moves the cursor down; requests the next page when the cursor gets
    /// close to the end of a browse list.
    pub fn move_selection_down(&mut self) -> Option<ApiRequest> {
        if !self.items.is_empty() {
            self.selected_index = (self.selected_index + 1).min(self.items.len() - 1);
        }
        self.prefetch_if_near_end()
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Requests the next page if the cursor is within the prefetch distance
    /// of the end. Also used when the list first becomes visible.
    pub fn prefetch_if_near_end(&mut self) -> Option<ApiRequest> {
        let remaining = self.items.len().saturating_sub(self.selected_index + 1);
        if remaining <= self.paging.prefetch_distance && self.error.is_none() {
            self.load_next_page()
        } else {
            None
        }
    }

    fn start_search(&mut self) -> Option<ApiRequest> {
        if self.web_access != WebAccess::Granted {
            tracing::debug!(web_access = ?self.web_access, "search deferred");
            return None;
        }
        self.is_loading = true;
        self.error = None;
        let query = self.search_text.to_lowercase();
        tracing::debug!(query = %query, epoch = self.epoch, "issuing search");
        Some(ApiRequest::Search {
            query,
            limit: self.paging.search_limit,
            epoch: self.epoch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: std::ops::RangeInclusive<u32>) -> Vec<ListItem> {
        ids.map(|id| ListItem {
            id,
            name: format!("Entry{id}"),
            image_url: format!("https://img/{id}.png"),
        })
        .collect()
    }

    fn screen() -> ListScreen {
        let mut screen = ListScreen::new(PagingConfig::default());
        screen.web_access = WebAccess::Granted;
        screen
    }

    fn load_full_page(screen: &mut ListScreen) {
        let Some(ApiRequest::Page { offset, epoch, .. }) = screen.load_next_page() else {
            panic!("expected a page request");
        };
        assert!(screen.apply_page(epoch, offset, Resource::Success(items(offset + 1..=offset + 20))));
    }

    #[test]
    fn pages_advance_by_page_size() {
        let mut screen = screen();
        assert_eq!(
            screen.load_next_page(),
            Some(ApiRequest::Page { limit: 20, offset: 0, epoch: 0 })
        );
        assert_eq!(screen.phase(), ListPhase::LoadingPage);
        assert!(screen.apply_page(0, 0, Resource::Success(items(1..=20))));

        assert_eq!(
            screen.load_next_page(),
            Some(ApiRequest::Page { limit: 20, offset: 20, epoch: 0 })
        );
        assert_eq!(screen.page, 1);
        assert_eq!(screen.phase(), ListPhase::LoadingPage);
    }

    #[test]
    fn no_overlapping_page_requests() {
        let mut screen = screen();
        assert!(screen.load_next_page().is_some());
        assert!(screen.load_next_page().is_none());
        assert!(screen.move_selection_down().is_none());
    }

    #[test]
    fn short_page_exhausts_and_blocks_further_loads() {
        let mut screen = screen();
        load_full_page(&mut screen);
        screen.load_next_page();
        assert!(screen.apply_page(0, 20, Resource::Success(items(21..=25))));

        assert!(screen.end_reached);
        assert_eq!(screen.phase(), ListPhase::Exhausted);
        assert!(screen.load_next_page().is_none());
        assert_eq!(screen.items.len(), 25);
    }

    #[test]
    fn empty_page_exhausts() {
        let mut screen = screen();
        screen.load_next_page();
        assert!(screen.apply_page(0, 0, Resource::Success(vec![])));
        assert!(screen.end_reached);
    }

    #[test]
    fn failed_page_keeps_items_and_waits_for_retry() {
        let mut screen = screen();
        load_full_page(&mut screen);
        screen.load_next_page();
        assert!(screen.apply_page(0, 20, Resource::Error("boom".to_string())));

        assert_eq!(screen.items.len(), 20);
        assert_eq!(screen.phase(), ListPhase::Failed);
        screen.selected_index = 19;
        assert!(screen.move_selection_down().is_none());

        assert_eq!(
            screen.retry(),
            Some(ApiRequest::Page { limit: 20, offset: 20, epoch: 0 })
        );
        assert!(screen.error.is_none());
    }

    #[test]
    fn typing_arms_debounce_and_blocks_pagination() {
        let mut screen = screen();
        load_full_page(&mut screen);

        let effects = screen.push_search_char('p');
        assert_eq!(effects, vec![ListEffect::StartTimer(Duration::from_millis(500))]);
        assert_eq!(screen.phase(), ListPhase::SearchPending);
        assert!(screen.load_next_page().is_none());
    }

    #[test]
    fn only_the_last_keystroke_issues_a_search() {
        let mut screen = screen();
        screen.push_search_char('p');
        screen.push_search_char('i');

        assert!(screen.on_debounce_elapsed().is_none());
        let request = screen.on_debounce_elapsed();
        assert_eq!(
            request,
            Some(ApiRequest::Search { query: "pi".to_string(), limit: 1500, epoch: 2 })
        );
        assert_eq!(screen.phase(), ListPhase::Searching);

        assert!(screen.apply_search(2, Resource::Success(items(25..=25))));
        assert_eq!(screen.phase(), ListPhase::SearchResults);
        assert_eq!(screen.items.len(), 1);
    }

    #[test]
    fn search_with_no_matches_is_not_an_error() {
        let mut screen = screen();
        screen.push_search_char('x');
        screen.on_debounce_elapsed();
        screen.apply_search(1, Resource::Success(vec![]));

        assert!(screen.items.is_empty());
        assert!(screen.error.is_none());
        assert_eq!(screen.phase(), ListPhase::SearchResults);
    }

    #[test]
    fn clearing_search_restarts_pagination_from_zero() {
        let mut screen = screen();
        load_full_page(&mut screen);
        load_full_page(&mut screen);
        screen.push_search_char('a');
        screen.on_debounce_elapsed();
        screen.apply_search(1, Resource::Success(items(3..=4)));

        let effects = screen.set_search_text(String::new());

        assert_eq!(
            effects,
            vec![ListEffect::Fetch(ApiRequest::Page { limit: 20, offset: 0, epoch: 2 })]
        );
        assert!(screen.items.is_empty());
        assert_eq!(screen.page, 0);
        assert!(!screen.end_reached);
        assert_eq!(screen.selected_index, 0);
    }

    #[test]
    fn clearing_cancels_pending_search() {
        let mut screen = screen();
        screen.push_search_char('a');
        screen.pop_search_char();
        assert!(screen.on_debounce_elapsed().is_none());
    }

    #[test]
    fn replies_from_superseded_epochs_are_dropped() {
        let mut screen = screen();
        let Some(ApiRequest::Page { epoch, .. }) = screen.load_next_page() else {
            panic!("expected a page request");
        };
        screen.push_search_char('b');
        assert!(!screen.apply_page(epoch, 0, Resource::Success(items(1..=20))));
        assert!(screen.items.is_empty());

        screen.on_debounce_elapsed();
        screen.push_search_char('u');
        assert!(!screen.apply_search(1, Resource::Success(items(1..=3))));
        assert!(screen.items.is_empty());
    }

    #[test]
    fn cursor_near_end_prefetches_next_page() {
        let mut screen = screen();
        load_full_page(&mut screen);

        screen.selected_index = 15;
        assert!(screen.move_selection_down().is_none());
        assert_eq!(
            screen.move_selection_down(),
            Some(ApiRequest::Page { limit: 20, offset: 20, epoch: 0 })
        );
    }

    #[test]
    fn cursor_is_clamped() {
        let mut screen = screen();
        screen.move_selection_up();
        assert_eq!(screen.selected_index, 0);
        screen.items = items(1..=2);
        screen.end_reached = true;
        screen.move_selection_down();
        screen.move_selection_down();
        assert_eq!(screen.selected_index, 1);
    }

    #[test]
    fn failed_search_empties_results() {
        let mut screen = screen();
        load_full_page(&mut screen);
        screen.push_search_char('z');
        screen.on_debounce_elapsed();
        screen.apply_search(1, Resource::Error("Search failed: HTTP 500: x".to_string()));

        assert!(screen.items.is_empty());
        assert_eq!(screen.error.as_deref(), Some("Search failed: HTTP 500: x"));
        assert_eq!(
            screen.retry(),
            Some(ApiRequest::Search { query: "z".to_string(), limit: 1500, epoch: 1 })
        );
    }

    #[test]
    fn nothing_is_requested_before_access_is_granted() {
        let mut screen = ListScreen::new(PagingConfig::default());
        assert!(screen.move_selection_down().is_none());
        assert!(screen.retry().is_none());
        assert!(!screen.is_loading);
        assert_eq!(screen.phase(), ListPhase::Idle);

        assert_eq!(
            screen.grant_web_access(),
            Some(ApiRequest::Page { limit: 20, offset: 0, epoch: 0 })
        );
        assert_eq!(screen.phase(), ListPhase::LoadingPage);
    }

    #[test]
    fn search_typed_before_access_runs_once_granted() {
        let mut screen = ListScreen::new(PagingConfig::default());
        screen.push_search_char('m');
        assert!(screen.on_debounce_elapsed().is_none());
        assert_eq!(screen.phase(), ListPhase::SearchResults);

        assert_eq!(
            screen.grant_web_access(),
            Some(ApiRequest::Search { query: "m".to_string(), limit: 1500, epoch: 1 })
        );
    }

    #[test]
    fn denied_access_never_requests() {
        let mut screen = ListScreen::new(PagingConfig::default());
        screen.deny_web_access();
        assert!(screen.load_next_page().is_none());
        assert!(screen.set_search_text("a".to_string()).iter().all(|e| !matches!(e, ListEffect::Fetch(_))));
        assert!(screen.on_debounce_elapsed().is_none());
        assert!(screen.set_search_text(String::new()).is_empty());
        assert!(screen.retry().is_none());
        assert!(!screen.is_loading);
    }

    #[test]
    fn whitespace_query_is_searched_verbatim() {
        let mut screen = screen();
        screen.push_search_char(' ');
        assert_eq!(
            screen.on_debounce_elapsed(),
            Some(ApiRequest::Search { query: " ".to_string(), limit: 1500, epoch: 1 })
        );
    }

    #[test]
    fn page_offset_overflow_exhausts_the_catalog() {
        let mut screen = ListScreen::new(PagingConfig {
            page_size: u32::MAX,
            ..PagingConfig::default()
        });
        screen.web_access = WebAccess::Granted;
        screen.page = 2;

        assert!(screen.load_next_page().is_none());
        assert!(screen.end_reached);
        assert!(!screen.is_loading);
        assert_eq!(screen.phase(), ListPhase::Exhausted);
    }
}
