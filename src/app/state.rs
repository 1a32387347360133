//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the repository
//! that binds and decodes requests, the list screen, the detail screen when
//! one is open, the input mode, and the theme. View models are computed on
//! demand from state snapshots.
//!
//! # View Model Computation
//!
//! `compute_viewmodel` transforms state into a renderable representation:
//! windowing the list around the selection, highlighting search matches,
//! choosing status and empty-state messages, and sizing stat bars to the
//! pane width.
//!
//! # Example
//!
//! ```rust
//! use dexplorer::app::{AppState, PagingConfig};
//! use dexplorer::repository::CatalogRepository;
//! use dexplorer::ui::Theme;
//!
//! let state = AppState::new(CatalogRepository::default(), PagingConfig::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.title, " Catalog (0 loaded) ");
//! ```

use super::detail::DetailScreen;
use super::list::{ListPhase, ListScreen, PagingConfig, WebAccess};
use super::modes::{InputMode, Screen, SearchFocus};
use crate::api::ApiRequest;
use crate::domain::{display_name, DetailItem, ListItem};
use crate::repository::CatalogRepository;
use crate::ui::palette::category_color;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Chip, DetailView, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListView, SearchBarInfo,
    StatBar, StatusKind, StatusLine, UIViewModel, ViewBody,
};

/// Width of the catalog number column, including spacing.
const NUMBER_COLUMN_WIDTH: usize = 8;
/// Width of the name column, including spacing.
const NAME_COLUMN_WIDTH: usize = 30;
/// Longest name shown untruncated.
const MAX_NAME_CHARS: usize = 28;
const SAFETY_MARGIN: usize = 2;

/// Rows taken by everything but the table body in normal mode: blank line,
/// header, border, column headers, status line, border, footer.
const LIST_CHROME_ROWS: usize = 7;
/// Rows taken by the search box.
const SEARCH_BAR_ROWS: usize = 3;

/// Columns reserved next to a stat bar for its label and value.
pub const STAT_LABEL_WIDTH: usize = 18;
pub const STAT_VALUE_WIDTH: usize = 6;
const MIN_STAT_BAR_WIDTH: usize = 10;
const MAX_STAT_BAR_WIDTH: usize = 50;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Binds requests to URLs and decodes replies.
    pub repository: CatalogRepository,

    /// Catalog list and search state. Lives as long as the plugin.
    pub list: ListScreen,

    /// Open detail screen. `Some` exactly while the detail screen is shown.
    pub detail: Option<DetailScreen>,

    /// Input handling mode of the list screen.
    ///
    /// Survives opening and closing the detail screen so search results are
    /// still being navigated on return.
    pub input_mode: InputMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Generation counter handed to each opened detail screen.
    detail_generation: u64,
}

impl AppState {
    #[must_use]
    pub const fn new(repository: CatalogRepository, paging: PagingConfig, theme: Theme) -> Self {
        Self {
            repository,
            list: ListScreen::new(paging),
            detail: None,
            input_mode: InputMode::Normal,
            theme,
            detail_generation: 0,
        }
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        if self.detail.is_some() {
            Screen::Detail
        } else {
            Screen::List
        }
    }

    /// Opens the detail screen for the selected list item.
    ///
    /// Returns the fetch that populates it, or `None` when nothing is
    /// selected or web access has not been granted.
    pub fn open_selected(&mut self) -> Option<ApiRequest> {
        if self.list.web_access != WebAccess::Granted {
            return None;
        }
        let id = self.list.selected_item()?.id;
        self.detail_generation += 1;
        let (screen, request) = DetailScreen::open(id, self.detail_generation);
        self.detail = Some(screen);
        Some(request)
    }

    /// Returns to the list. Returns `false` when no detail screen was open.
    pub fn close_detail(&mut self) -> bool {
        self.detail.take().is_some()
    }

    /// Computes a renderable UI view model from current state and pane size.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome
    /// 2. Center the window around the selected index
    /// 3. Pull the window back when it runs past the end of the list
    /// 4. Compute the selection index relative to the window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match &self.detail {
            Some(screen) => ViewBody::Detail(Self::compute_detail_view(screen, cols)),
            None => ViewBody::List(self.compute_list_view(rows, cols)),
        };

        UIViewModel {
            header: self.compute_header(),
            footer: self.compute_footer(),
            body,
        }
    }

    fn compute_list_view(&self, rows: usize, cols: usize) -> ListView {
        let items = &self.list.items;
        let available_rows = self.calculate_available_rows(rows).max(1);
        let selected = self.list.selected_index.min(items.len().saturating_sub(1));

        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(items.len());
        if visible_end - visible_start < available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let needle = self.highlight_needle();
        let display_items = items[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, item)| {
                let is_selected = visible_start + relative_idx == selected;
                Self::compute_display_item(item, is_selected, cols, needle.as_deref())
            })
            .collect();

        ListView {
            display_items,
            selected_index: selected - visible_start,
            search_bar: self.compute_search_bar(),
            status: self.compute_status(),
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_display_item(
        item: &ListItem,
        is_selected: bool,
        cols: usize,
        needle: Option<&str>,
    ) -> DisplayItem {
        let max_url_width = cols.saturating_sub(NUMBER_COLUMN_WIDTH + NAME_COLUMN_WIDTH + SAFETY_MARGIN);
        let name = truncate(&item.name, MAX_NAME_CHARS);
        let name_len = name.chars().count();

        let highlight_ranges = needle.map_or_else(Vec::new, |needle| {
            match_ranges(&name, needle)
                .into_iter()
                .filter(|&(start, _)| start < name_len)
                .map(|(start, end)| (start, end.min(name_len)))
                .collect()
        });

        DisplayItem {
            number: format!("#{:03}", item.id),
            name,
            image_url: truncate_start(&item.image_url, max_url_width),
            is_selected,
            highlight_ranges,
        }
    }

    /// Lowercased search text when matches should be highlighted.
    fn highlight_needle(&self) -> Option<String> {
        let needle = self.list.search_text.to_lowercase();
        (!needle.is_empty() && self.list.phase() == ListPhase::SearchResults).then_some(needle)
    }

    fn compute_status(&self) -> Option<StatusLine> {
        let list = &self.list;
        if let Some(error) = &list.error {
            return Some(StatusLine {
                text: format!("{error}  (r: retry)"),
                kind: StatusKind::Error,
            });
        }

        let (text, kind) = match list.phase() {
            ListPhase::LoadingPage if list.items.is_empty() => {
                ("Loading catalog...".to_string(), StatusKind::Loading)
            }
            ListPhase::LoadingPage => ("Loading more entries...".to_string(), StatusKind::Loading),
            ListPhase::SearchPending => ("Waiting for input to settle...".to_string(), StatusKind::Info),
            ListPhase::Searching => ("Searching...".to_string(), StatusKind::Loading),
            ListPhase::Exhausted => (
                format!("End of catalog ({} entries)", list.items.len()),
                StatusKind::Info,
            ),
            ListPhase::SearchResults if !list.items.is_empty() => (
                format!("{} matching entries", list.items.len()),
                StatusKind::Info,
            ),
            ListPhase::SearchResults | ListPhase::Idle | ListPhase::Failed => return None,
        };

        Some(StatusLine { text, kind })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match self.list.web_access {
            WebAccess::Denied => {
                return Some(EmptyState {
                    message: "Web access denied".to_string(),
                    subtitle: "Grant the web access permission to browse the catalog".to_string(),
                });
            }
            WebAccess::Pending if self.list.items.is_empty() => {
                return Some(EmptyState {
                    message: "Waiting for permission".to_string(),
                    subtitle: "Allow web access to load the catalog".to_string(),
                });
            }
            WebAccess::Pending | WebAccess::Granted => {}
        }

        let no_matches = self.list.phase() == ListPhase::SearchResults
            && self.list.items.is_empty()
            && self.list.error.is_none();

        no_matches.then(|| EmptyState {
            message: "No matching entries".to_string(),
            subtitle: format!("Nothing in the catalog contains '{}'", self.list.search_text),
        })
    }

    fn compute_detail_view(screen: &DetailScreen, cols: usize) -> DetailView {
        let status = if screen.is_loading {
            Some(StatusLine {
                text: "Loading entry...".to_string(),
                kind: StatusKind::Loading,
            })
        } else {
            screen.error.as_ref().map(|error| StatusLine {
                text: format!("{error}  (r: retry)"),
                kind: StatusKind::Error,
            })
        };

        let Some(detail) = &screen.detail else {
            return DetailView {
                image_url: None,
                measurements: vec![],
                chips: vec![],
                stats: vec![],
                status,
            };
        };

        DetailView {
            image_url: Some(detail.image_url.clone()),
            measurements: vec![
                ("Height".to_string(), format!("{:.1} m", detail.height_meters())),
                ("Weight".to_string(), format!("{:.1} kg", detail.weight_kilograms())),
            ],
            chips: detail
                .types
                .iter()
                .map(|category| Chip {
                    label: display_name(category),
                    color: category_color(category).to_string(),
                })
                .collect(),
            stats: Self::compute_stat_bars(detail, cols),
            status,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn compute_stat_bars(detail: &DetailItem, cols: usize) -> Vec<StatBar> {
        let width = cols
            .saturating_sub(STAT_LABEL_WIDTH + STAT_VALUE_WIDTH + SAFETY_MARGIN * 2)
            .clamp(MIN_STAT_BAR_WIDTH, MAX_STAT_BAR_WIDTH);

        detail
            .stats
            .iter()
            .map(|stat| StatBar {
                label: stat.name.replace('-', " ").to_uppercase(),
                value: stat.value,
                filled: ((stat.fill_ratio() * width as f64).round() as usize).min(width),
                width,
                level: stat.level(),
            })
            .collect()
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.detail {
            Some(DetailScreen { detail: Some(detail), .. }) => {
                format!(" #{:03} {} ", detail.id, detail.name)
            }
            Some(screen) => format!(" #{:03} ", screen.id),
            None if self.list.is_searching() => {
                format!(" Search results ({}) ", self.list.items.len())
            }
            None => format!(" Catalog ({} loaded) ", self.list.items.len()),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.screen(), self.input_mode) {
            (Screen::Detail, _) => "Esc/q/h: back  r: retry",
            (Screen::List, InputMode::Search(SearchFocus::Typing)) => {
                "ESC: exit search  Enter: browse results  Ctrl+n/p: navigate  Type to search"
            }
            (Screen::List, InputMode::Search(SearchFocus::Navigating)) => {
                "ESC: exit search  /: edit query  j/k or Ctrl+n/p: navigate  Enter: open"
            }
            (Screen::List, InputMode::Normal) => {
                "j/k or Ctrl+n/p: navigate  Enter: open  /: search  r: retry  q: quit"
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        match self.input_mode {
            InputMode::Search(focus) => Some(SearchBarInfo {
                query: self.list.search_text.clone(),
                is_focused: focus == SearchFocus::Typing,
            }),
            InputMode::Normal => None,
        }
    }

    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        match self.input_mode {
            InputMode::Normal => total_rows.saturating_sub(LIST_CHROME_ROWS),
            InputMode::Search(_) => total_rows.saturating_sub(LIST_CHROME_ROWS + SEARCH_BAR_ROWS),
        }
    }
}

/// Character ranges of every non-overlapping occurrence of `needle` in
/// `text`, compared case-insensitively.
fn match_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        if haystack[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Truncates from the start, keeping the informative tail of a URL.
fn truncate_start(text: &str, max_chars: usize) -> String {
    let len = text.chars().count();
    if len > max_chars {
        let keep = max_chars.saturating_sub(3);
        let tail: String = text.chars().skip(len - keep).collect();
        format!("...{tail}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Resource, Stat};

    fn state() -> AppState {
        AppState::new(
            CatalogRepository::default(),
            PagingConfig::default(),
            Theme::default(),
        )
    }

    fn items(count: u32) -> Vec<ListItem> {
        (1..=count)
            .map(|id| ListItem {
                id,
                name: format!("Entry{id}"),
                image_url: format!("https://img/{id}.png"),
            })
            .collect()
    }

    fn list_view(state: &AppState, rows: usize) -> ListView {
        match state.compute_viewmodel(rows, 100).body {
            ViewBody::List(view) => view,
            ViewBody::Detail(_) => panic!("expected list body"),
        }
    }

    #[test]
    fn window_follows_selection() {
        let mut state = state();
        state.list.web_access = WebAccess::Granted;
        state.list.items = items(40);
        state.list.selected_index = 39;

        let view = list_view(&state, 17);
        assert_eq!(view.display_items.len(), 10);
        assert_eq!(view.display_items[0].number, "#031");
        assert_eq!(view.selected_index, 9);
        assert!(view.display_items[9].is_selected);
    }

    #[test]
    fn short_list_is_not_shifted() {
        let mut state = state();
        state.list.web_access = WebAccess::Granted;
        state.list.items = items(3);
        state.list.selected_index = 1;

        let view = list_view(&state, 40);
        assert_eq!(view.display_items.len(), 3);
        assert_eq!(view.selected_index, 1);
    }

    #[test]
    fn waiting_for_permission_shows_empty_state() {
        let view = list_view(&state(), 24);
        assert_eq!(view.empty_state.unwrap().message, "Waiting for permission");
    }

    #[test]
    fn empty_search_shows_not_found_rather_than_error() {
        let mut state = state();
        state.list.web_access = WebAccess::Granted;
        state.input_mode = InputMode::Search(SearchFocus::Typing);
        state.list.push_search_char('x');
        state.list.on_debounce_elapsed();
        state.list.apply_search(1, Resource::Success(vec![]));

        let view = list_view(&state, 24);
        assert_eq!(view.empty_state.unwrap().message, "No matching entries");
        assert!(view.status.is_none());
        assert_eq!(view.search_bar.map(|bar| bar.query), Some("x".to_string()));
    }

    #[test]
    fn failures_render_verbatim_with_retry_hint() {
        let mut state = state();
        state.list.web_access = WebAccess::Granted;
        state.list.load_next_page();
        state.list.apply_page(0, 0, Resource::Error("Could not load the catalog: HTTP 500: x".into()));

        let status = list_view(&state, 24).status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Could not load the catalog: HTTP 500: x  (r: retry)");
    }

    #[test]
    fn search_matches_are_highlighted() {
        let mut state = state();
        state.list.web_access = WebAccess::Granted;
        state.list.push_search_char('o');
        state.list.on_debounce_elapsed();
        state.list.apply_search(
            1,
            Resource::Success(vec![ListItem {
                id: 722,
                name: "Rowlet-o".to_string(),
                image_url: "u".to_string(),
            }]),
        );

        let view = list_view(&state, 24);
        assert_eq!(view.display_items[0].highlight_ranges, vec![(1, 2), (7, 8)]);
    }

    #[test]
    fn match_ranges_are_case_insensitive_and_disjoint() {
        assert_eq!(match_ranges("Aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert!(match_ranges("Pikachu", "").is_empty());
        assert!(match_ranges("Mew", "mewtwo").is_empty());
    }

    #[test]
    fn long_names_and_urls_are_truncated() {
        assert_eq!(truncate("abcdef", 5), "ab...");
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate_start("https://host/25.png", 10), ".../25.png");
    }

    #[test]
    fn detail_view_derives_measurements_chips_and_bars() {
        let mut state = state();
        state.list.web_access = WebAccess::Granted;
        state.list.items = items(6);
        state.list.selected_index = 5;
        let request = state.open_selected().unwrap();
        assert_eq!(request, ApiRequest::Detail { id: 6, epoch: 1 });

        let detail = DetailItem {
            id: 6,
            name: "Charizard".to_string(),
            height: 17,
            weight: 905,
            types: vec!["fire".to_string(), "flying".to_string()],
            stats: vec![
                Stat { name: "special-attack".to_string(), value: 255 },
                Stat { name: "hp".to_string(), value: 45 },
            ],
            image_url: "https://img/6.png".to_string(),
        };
        if let Some(screen) = state.detail.as_mut() {
            screen.apply(6, 1, Resource::Success(detail));
        }

        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.header.title, " #006 Charizard ");
        let ViewBody::Detail(view) = vm.body else {
            panic!("expected detail body");
        };
        assert_eq!(view.measurements[0].1, "1.7 m");
        assert_eq!(view.measurements[1].1, "90.5 kg");
        assert_eq!(view.chips[0], Chip { label: "Fire".into(), color: "#FF7F50".into() });
        assert_eq!(view.stats[0].label, "SPECIAL ATTACK");
        assert_eq!(view.stats[0].filled, view.stats[0].width);
        assert_eq!(view.stats[1].level, crate::domain::StatLevel::Low);
        assert!(view.status.is_none());
    }

    #[test]
    fn detail_does_not_open_without_web_access() {
        let mut state = state();
        state.list.items = items(2);
        assert!(state.open_selected().is_none());
        assert_eq!(state.screen(), Screen::List);

        state.list.deny_web_access();
        assert!(state.open_selected().is_none());
        assert!(state.detail.is_none());
    }

    #[test]
    fn reopening_detail_uses_a_new_generation() {
        let mut state = state();
        state.list.web_access = WebAccess::Granted;
        state.list.items = items(2);
        let first = state.open_selected().unwrap();
        assert!(state.close_detail());
        let second = state.open_selected().unwrap();
        assert_ne!(first.epoch(), second.epoch());
        assert!(state.close_detail());
        assert!(!state.close_detail());
    }
}
