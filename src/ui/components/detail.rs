//! Detail panel component renderer.
//!
//! Renders one catalog entry: sprite URL, measurements, category chips and
//! a colored progress bar per base stat.

use crate::app::state::{STAT_LABEL_WIDTH, STAT_VALUE_WIDTH};
use crate::ui::helpers::{position_cursor, print_padded};
use crate::ui::palette::chip_text_color;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Chip, DetailView, StatBar};

const INDENT: &str = "  ";
const FILLED_CELL: char = '█';
const EMPTY_CELL: char = '░';

/// Renders the detail panel starting at `row`, stopping before `last_row`.
///
/// # Returns
///
/// The next available row position.
pub fn render_detail_panel(row: usize, detail: &DetailView, theme: &Theme, cols: usize, last_row: usize) -> usize {
    let mut current_row = row;

    if let Some(url) = &detail.image_url {
        current_row = render_field(current_row, "Sprite", url, theme, cols) + 1;
    }

    if !detail.measurements.is_empty() {
        for (label, value) in &detail.measurements {
            current_row = render_field(current_row, label, value, theme, cols);
        }
        current_row += 1;
    }

    if !detail.chips.is_empty() {
        current_row = render_chips(current_row, &detail.chips, theme) + 1;
    }

    if !detail.stats.is_empty() && current_row < last_row {
        position_cursor(current_row, 1);
        print!("{INDENT}{}", Theme::bold());
        print!("{}Base stats{}", Theme::fg(&theme.colors.header_fg), Theme::reset());
        current_row += 1;

        for bar in &detail.stats {
            if current_row >= last_row {
                break;
            }
            current_row = render_stat_bar(current_row, bar, theme);
        }
    }

    current_row
}

fn render_field(row: usize, label: &str, value: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{INDENT}{}", Theme::fg(&theme.colors.text_dim));
    print!("{label:<10}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print_padded(value, cols.saturating_sub(INDENT.len() + 10));
    print!("{}", Theme::reset());
    row + 1
}

fn render_chips(row: usize, chips: &[Chip], theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{INDENT}{}", Theme::fg(&theme.colors.text_dim));
    print!("{:<10}", "Types");
    print!("{}", Theme::reset());

    for chip in chips {
        print!("{}", Theme::bg(&chip.color));
        print!("{}", Theme::fg(chip_text_color(&chip.color)));
        print!(" {} ", chip.label);
        print!("{} ", Theme::reset());
    }
    row + 1
}

fn render_stat_bar(row: usize, bar: &StatBar, theme: &Theme) -> usize {
    let label: String = bar.label.chars().take(STAT_LABEL_WIDTH - 1).collect();

    position_cursor(row, 1);
    print!("{INDENT}{}", Theme::fg(&theme.colors.text_dim));
    print!("{label:<width$}", width = STAT_LABEL_WIDTH);
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{:>width$} ", bar.value, width = STAT_VALUE_WIDTH - 1);

    print!("{}", Theme::fg(theme.stat_color(bar.level)));
    print!("{}", FILLED_CELL.to_string().repeat(bar.filled));
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}", EMPTY_CELL.to_string().repeat(bar.width.saturating_sub(bar.filled)));
    print!("{}", Theme::reset());
    row + 1
}
