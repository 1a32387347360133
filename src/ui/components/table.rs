//! Table component renderer.
//!
//! Renders the catalog as a three-column table (number, name, sprite URL)
//! with selection and search match highlighting.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const NUMBER_COLUMN: usize = 8;
const NAME_COLUMN: usize = 30;

/// Renders the table column headers at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{:<nw$}{:<mw$}{}", "NO.", "NAME", "SPRITE", nw = NUMBER_COLUMN, mw = NAME_COLUMN);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single table row.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Search match highlights (unless selected)
/// 3. Normal text color; the sprite column is dimmed
///
/// The row is padded to the full pane width so the selection background
/// covers the whole line.
fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!("{:<width$}", item.number, width = NUMBER_COLUMN);

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    let name_len = item.name.chars().count();
    print!("{}", " ".repeat(NAME_COLUMN.saturating_sub(name_len)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.image_url);

    let line_len = NUMBER_COLUMN.max(item.number.len())
        + NAME_COLUMN.max(name_len)
        + item.image_url.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
