//! Screen and input mode state types.
//!
//! The plugin shows one of two screens, and the list screen accepts input in
//! one of two modes:
//! - **Normal**: navigation and commands
//! - **Search**: typing a query, or navigating its results
//!
//! # Example
//!
//! ```rust
//! use dexplorer::app::{InputMode, Screen, SearchFocus};
//!
//! let input_mode = InputMode::Search(SearchFocus::Typing);
//! assert_ne!(input_mode, InputMode::Normal);
//! assert_ne!(Screen::List, Screen::Detail);
//! ```

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Paginated catalog list and search results.
    List,
    /// Single entry detail, reached from the list.
    Detail,
}

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through search results.
    ///
    /// Accepts j/k for movement, enter to open, and / to return to Typing.
    Navigating,
}

/// Current input handling mode of the list screen.
///
/// Controls which keybindings are active and the footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search mode with focus state.
    Search(SearchFocus),
}
