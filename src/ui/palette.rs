//! Fixed colors for catalog categories.
//!
//! Category chips keep the same color whatever theme is active, so a type is
//! recognizable across themes.

/// Chip color used for categories without an entry of their own.
pub const FALLBACK_CATEGORY_COLOR: &str = "#AAAAAA";

/// Returns the hex chip color for a category name (case-insensitive).
///
/// ```
/// use dexplorer::ui::palette::category_color;
///
/// assert_eq!(category_color("Fire"), "#FF7F50");
/// assert_eq!(category_color("shadow"), "#AAAAAA");
/// ```
#[must_use]
pub fn category_color(category: &str) -> &'static str {
    match category.to_ascii_lowercase().as_str() {
        "fire" => "#FF7F50",
        "water" => "#6495ED",
        "electric" => "#FFD700",
        "grass" => "#98FB98",
        "ice" | "flying" => "#87CEEB",
        "fighting" => "#CD5C5C",
        "poison" => "#9370DB",
        "ground" => "#DEB887",
        "psychic" => "#FF69B4",
        "bug" => "#9ACD32",
        "rock" => "#BDB76B",
        "ghost" => "#8A2BE2",
        "dark" => "#4A4A4A",
        "dragon" => "#7B68EE",
        "steel" => "#B8B8D0",
        "fairy" => "#FFB6C1",
        _ => FALLBACK_CATEGORY_COLOR,
    }
}

/// Picks black or white text for legibility on a chip of the given color.
#[must_use]
pub fn chip_text_color(background: &str) -> &'static str {
    let hex = background.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .map_or(0.0, f64::from)
    };
    let luminance = 0.114f64.mul_add(
        channel(4..6),
        0.299f64.mul_add(channel(0..2), 0.587 * channel(2..4)),
    );

    if luminance > 140.0 {
        "#1E1E1E"
    } else {
        "#FFFFFF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_text_contrasts_with_background() {
        assert_eq!(chip_text_color("#FFD700"), "#1E1E1E");
        assert_eq!(chip_text_color("#4A4A4A"), "#FFFFFF");
        assert_eq!(chip_text_color("#8A2BE2"), "#FFFFFF");
    }

    #[test]
    fn unknown_category_uses_fallback() {
        assert_eq!(category_color("unknown"), FALLBACK_CATEGORY_COLOR);
        assert_eq!(category_color("STEEL"), "#B8B8D0");
    }
}
