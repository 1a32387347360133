//! Shared rendering utilities and helpers.
//!
//! Cursor positioning, line padding and search match highlighting, shared by
//! the components.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column.
///
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints `text` and pads the rest of a `width`-column line with spaces.
pub fn print_padded(text: &str, width: usize) {
    let len = text.chars().count();
    print!("{text}");
    print!("{}", " ".repeat(width.saturating_sub(len)));
}

/// Prints `text` centered in a `width`-column line, truncating if needed.
pub fn print_centered(text: &str, width: usize) {
    let shown: String = text.chars().take(width).collect();
    let len = shown.chars().count();
    let padding = width.saturating_sub(len) / 2;

    print!("{}", " ".repeat(padding));
    print!("{shown}");
    print!("{}", " ".repeat(width.saturating_sub(padding + len)));
}

/// Splits `text` into `(segment, highlighted)` runs.
///
/// Ranges are `(start, end)` character indices with exclusive end, sorted
/// and non-overlapping. Ranges past the end of the text are clipped.
#[must_use]
pub fn split_highlighted(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        if start > current_pos {
            segments.push((chars[current_pos..start].iter().collect(), false));
        }
        if end > start {
            segments.push((chars[start..end].iter().collect(), true));
        }
        current_pos = end;
    }

    if current_pos < chars.len() {
        segments.push((chars[current_pos..].iter().collect(), false));
    }
    segments
}

/// Renders text with highlighted character ranges for search matches.
///
/// When `is_selected` is `true`, match highlighting is disabled to avoid
/// conflicting with selection background colors.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in split_highlighted(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{segment}");
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{segment}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_into_runs() {
        assert_eq!(
            split_highlighted("Rowlet", &[(1, 2), (4, 6)]),
            vec![
                ("R".to_string(), false),
                ("o".to_string(), true),
                ("wl".to_string(), false),
                ("et".to_string(), true),
            ]
        );
    }

    #[test]
    fn out_of_range_highlights_are_clipped() {
        assert_eq!(
            split_highlighted("Mew", &[(2, 9), (7, 8)]),
            vec![("Me".to_string(), false), ("w".to_string(), true)]
        );
        assert_eq!(split_highlighted("", &[(0, 1)]), vec![]);
    }
}
