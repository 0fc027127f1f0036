//! Static colour tables and theme presets.

use crate::domain::{ChartKind, Metric, ThemeName};

/// Colour used when a metric has no entry in `METRIC_COLORS`.
pub const NEUTRAL_COLOR: &str = "#1f77b4";

/// One fixed colour per metric, keyed by column name.
pub static METRIC_COLORS: [(&str, &str); 6] = [
    ("Subscribers", "#1f77b4"),
    ("Views", "#ff7f0e"),
    ("Watch Hours", "#2ca02c"),
    ("Likes", "#d62728"),
    ("Comments", "#9467bd"),
    ("Shares", "#8c564b"),
];

/// Default palettes per chart kind, used when several series share a chart.
pub static CHART_PALETTES: [(ChartKind, [&str; 4]); 4] = [
    (ChartKind::Bar, ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"]),
    (ChartKind::Area, ["#a6cee3", "#b2df8a", "#fb9a99", "#fdbf6f"]),
    (ChartKind::Line, ["#9467bd", "#8c564b", "#e377c2", "#7f7f7f"]),
    (ChartKind::Pie, ["#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3"]),
];

/// Colours applied to every chart for a given theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub name: ThemeName,
    pub background: &'static str,
    pub foreground: &'static str,
    pub grid: &'static str,
    pub axis: &'static str,
}

pub static THEME_PRESETS: [ThemePreset; 3] = [
    ThemePreset {
        name: ThemeName::Default,
        background: "#e5ecf6",
        foreground: "#2a3f5f",
        grid: "#ffffff",
        axis: "#2a3f5f",
    },
    ThemePreset {
        name: ThemeName::Light,
        background: "#ffffff",
        foreground: "#2a3f5f",
        grid: "#ebf0f8",
        axis: "#444444",
    },
    ThemePreset {
        name: ThemeName::Dark,
        background: "#111111",
        foreground: "#f2f5fa",
        grid: "#283442",
        axis: "#a2b1c6",
    },
];

/// Colour for a metric column name, or `NEUTRAL_COLOR` for unknown names.
pub fn color_for_name(name: &str) -> &'static str {
    METRIC_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .unwrap_or(NEUTRAL_COLOR)
}

pub fn metric_color(metric: Metric) -> &'static str {
    color_for_name(metric.column_name())
}

pub fn chart_palette(kind: ChartKind) -> &'static [&'static str] {
    CHART_PALETTES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, p)| p.as_slice())
        .unwrap_or(&[NEUTRAL_COLOR])
}

pub fn theme_preset(name: ThemeName) -> ThemePreset {
    THEME_PRESETS
        .iter()
        .copied()
        .find(|t| t.name == name)
        .unwrap_or(THEME_PRESETS[0])
}

/// Parse `#rrggbb` into RGB components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_metric_has_a_distinct_color() {
        let mut colors: Vec<_> = Metric::ALL.iter().map(|m| metric_color(*m)).collect();
        assert_eq!(metric_color(Metric::WatchHours), "#2ca02c");
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 6);
    }

    #[test]
    fn unknown_metric_name_is_neutral() {
        assert_eq!(color_for_name("Dislikes"), NEUTRAL_COLOR);
    }

    #[test]
    fn palettes_and_themes_cover_all_variants() {
        for kind in ChartKind::ALL {
            assert_eq!(chart_palette(kind).len(), 4);
        }
        assert_eq!(chart_palette(ChartKind::Area)[0], "#a6cee3");
        for name in ThemeName::ALL {
            assert_eq!(theme_preset(name).name, name);
        }
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#1f77b4"), Some((0x1f, 0x77, 0xb4)));
        assert_eq!(hex_to_rgb("1f77b4"), None);
        assert_eq!(hex_to_rgb("#12345"), None);
        assert_eq!(hex_to_rgb("#zz0000"), None);
    }
}
