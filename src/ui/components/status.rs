//! Status line component renderer.

use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

/// Renders a one-line status message, or clears the line when there is none.
///
/// Failures use the `error_fg` color so they stand out from progress and
/// informational messages.
pub fn render_status_line(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = match status.kind {
        StatusKind::Error => &theme.colors.error_fg,
        StatusKind::Loading => &theme.colors.empty_state_fg,
        StatusKind::Info => &theme.colors.text_dim,
    };
    print!("{}", Theme::fg(color));
    let text: String = format!(" {}", status.text).chars().take(cols).collect();
    print_padded(&text, cols);
    print!("{}", Theme::reset());

    row + 1
}
