//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: pre-formatted text, highlight
//! ranges, bar widths and chip colors.
//!
//! # Example
//!
//! ```rust
//! use dexplorer::ui::viewmodel::{FooterInfo, HeaderInfo, ListView, UIViewModel, ViewBody};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo { title: " Catalog (0 loaded) ".to_string() },
//!     footer: FooterInfo { keybindings: "q: quit".to_string() },
//!     body: ViewBody::List(ListView {
//!         display_items: vec![],
//!         selected_index: 0,
//!         search_bar: None,
//!         status: None,
//!         empty_state: None,
//!     }),
//! };
//! assert!(matches!(vm.body, ViewBody::List(_)));
//! ```

use crate::domain::StatLevel;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Header information (title).
    pub header: HeaderInfo,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,

    /// Screen-specific content.
    pub body: ViewBody,
}

/// Content area of the screen on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    List(ListView),
    Detail(DetailView),
}

/// Catalog list content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    /// Rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    /// Present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Loading, failure, or end-of-catalog line under the table.
    pub status: Option<StatusLine>,

    /// Replaces the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,
}

/// Display information for a single catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Catalog number, e.g. `#025`.
    pub number: String,

    /// Display name, truncated to the name column.
    pub name: String,

    /// Sprite URL.
    pub image_url: String,

    /// Whether this item is currently selected.
    pub is_selected: bool,

    /// Character ranges of `name` matching the search text.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text (e.g., "q: quit  /: search").
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No matching entries").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current search query text.
    pub query: String,

    /// Whether keystrokes go to the search field.
    pub is_focused: bool,
}

/// One-line status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
    Info,
}

/// Detail screen content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Sprite URL, once the entry has loaded.
    pub image_url: Option<String>,

    /// Label/value pairs such as height and weight.
    pub measurements: Vec<(String, String)>,

    /// Category chips in slot order.
    pub chips: Vec<Chip>,

    /// Stat bars in API order.
    pub stats: Vec<StatBar>,

    /// Loading or failure line.
    pub status: Option<StatusLine>,
}

/// A colored category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub label: String,
    /// Hex background color.
    pub color: String,
}

/// A horizontal progress bar for one stat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatBar {
    pub label: String,
    pub value: u32,
    /// Filled cells out of `width`.
    pub filled: usize,
    pub width: usize,
    pub level: StatLevel,
}
