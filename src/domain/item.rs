//! Catalog records and the values derived from them for display.
//!
//! Records are flat and immutable by convention. Measurements are kept in the
//! API's units (decimetres, hectograms) and converted on demand.

use serde::{Deserialize, Serialize};

/// Highest base stat value the catalog uses; bars are scaled against it.
pub const MAX_STAT_VALUE: u32 = 255;

/// Stats below this value are rendered as low.
const LOW_STAT_THRESHOLD: u32 = 50;

/// Stats below this value (and at least [`LOW_STAT_THRESHOLD`]) are medium.
const MEDIUM_STAT_THRESHOLD: u32 = 100;

/// Entry shown in the scrollable browse list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Catalog number. Inferred from the page offset when browsing and parsed
    /// from the resource URL when searching.
    pub id: u32,
    /// Display name (first letter upper-cased).
    pub name: String,
    /// Sprite URL constructed from `id`.
    pub image_url: String,
}

/// Expanded record for a single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailItem {
    pub id: u32,
    pub name: String,
    /// Height in decimetres.
    pub height: u32,
    /// Weight in hectograms.
    pub weight: u32,
    /// Category names in API slot order.
    pub types: Vec<String>,
    /// Base stats in API order.
    pub stats: Vec<Stat>,
    pub image_url: String,
}

impl DetailItem {
    /// Height in metres.
    #[must_use]
    pub fn height_meters(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms.
    #[must_use]
    pub fn weight_kilograms(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

/// A named base stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

/// Coarse bucket a stat value falls into, used to color its bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatLevel {
    Low,
    Medium,
    High,
}

impl Stat {
    /// Fraction of [`MAX_STAT_VALUE`] this stat reaches, clamped to `[0, 1]`.
    #[must_use]
    pub fn fill_ratio(&self) -> f64 {
        (f64::from(self.value) / f64::from(MAX_STAT_VALUE)).clamp(0.0, 1.0)
    }

    #[must_use]
    pub const fn level(&self) -> StatLevel {
        if self.value < LOW_STAT_THRESHOLD {
            StatLevel::Low
        } else if self.value < MEDIUM_STAT_THRESHOLD {
            StatLevel::Medium
        } else {
            StatLevel::High
        }
    }
}

/// Upper-cases the first character of a catalog name.
///
/// ```
/// use dexplorer::domain::display_name;
///
/// assert_eq!(display_name("bulbasaur"), "Bulbasaur");
/// assert_eq!(display_name(""), "");
/// ```
#[must_use]
pub fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(value: u32) -> Stat {
        Stat { name: "speed".to_string(), value }
    }

    #[test]
    fn stat_levels_follow_thresholds() {
        assert_eq!(stat(0).level(), StatLevel::Low);
        assert_eq!(stat(49).level(), StatLevel::Low);
        assert_eq!(stat(50).level(), StatLevel::Medium);
        assert_eq!(stat(99).level(), StatLevel::Medium);
        assert_eq!(stat(100).level(), StatLevel::High);
        assert_eq!(stat(255).level(), StatLevel::High);
    }

    #[test]
    fn fill_ratio_is_scaled_and_clamped() {
        assert!((stat(0).fill_ratio() - 0.0).abs() < f64::EPSILON);
        assert!((stat(255).fill_ratio() - 1.0).abs() < f64::EPSILON);
        assert!((stat(300).fill_ratio() - 1.0).abs() < f64::EPSILON);
        assert!((stat(51).fill_ratio() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn measurements_convert_from_api_units() {
        let detail = DetailItem {
            id: 25,
            name: "Pikachu".to_string(),
            height: 4,
            weight: 60,
            types: vec!["electric".to_string()],
            stats: vec![],
            image_url: String::new(),
        };
        assert!((detail.height_meters() - 0.4).abs() < 1e-9);
        assert!((detail.weight_kilograms() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn display_name_handles_multibyte_first_char() {
        assert_eq!(display_name("élan"), "Élan");
        assert_eq!(display_name("mr-mime"), "Mr-mime");
    }
}
