//! Composable UI component renderers.
//!
//! Each component renders one part of the interface at a given row and
//! returns the next free row.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box (border, query text)
//! - [`table`]: Catalog list with columns (NO., NAME, SPRITE)
//! - [`empty`]: Empty state message
//! - [`status`]: Loading / failure / end-of-catalog line
//! - [`detail`]: Detail panel with chips and stat bars
//!
//! # Layout
//!
//! Both screens share the frame below; the body differs.
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Body: search bar + table, or detail panel]
//! [Status line]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, ListView, UIViewModel};

use detail::render_detail_panel;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use search::render_search_bar;
use status::render_status_line;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders header, body separator, and returns the first body row.
fn render_top(vm: &UIViewModel, theme: &Theme, cols: usize) -> usize {
    let current_row = render_header(2, &vm.header, theme, cols);
    render_border(current_row, &theme.colors.border, cols)
}

/// Row the status line is drawn on; the body must end before it.
const fn status_row(rows: usize) -> usize {
    rows.saturating_sub(2)
}

fn render_bottom(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    render_border(rows.saturating_sub(1), &theme.colors.border, cols);
    render_footer(rows, &vm.footer, theme, cols);
}

/// Renders the catalog list screen.
///
/// The empty state, when present, replaces the table.
pub fn render_list_screen(vm: &UIViewModel, list: &ListView, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = render_top(vm, theme, cols);

    if let Some(search) = &list.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &list.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, theme);
        render_table_rows(current_row, &list.display_items, theme, cols);
    }

    render_status_line(status_row(rows), list.status.as_ref(), theme, cols);
    render_bottom(vm, theme, cols, rows);
}

/// Renders the detail screen.
pub fn render_detail_screen(vm: &UIViewModel, detail: &DetailView, theme: &Theme, cols: usize, rows: usize) {
    let current_row = render_top(vm, theme, cols);

    render_detail_panel(current_row + 1, detail, theme, cols, status_row(rows));

    render_status_line(status_row(rows), detail.status.as_ref(), theme, cols);
    render_bottom(vm, theme, cols, rows);
}
