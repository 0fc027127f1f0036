//! `ChartSpec` construction.
//!
//! A `ChartSpec` is a render-only description of one chart: shape, title,
//! colours and the data points. Renderers (`plot::ascii`, the TUI widget) only
//! read it, so every decision about what is drawn lives here.

use chrono::NaiveDate;

use crate::chart::palette::{ThemePreset, chart_palette, metric_color, theme_preset};
use crate::domain::{ChartKind, Metric, ResampledDataset, ThemeName, TimeBucket};

/// One x/y (or label/slice) data point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub label: String,
    pub value: u64,
}

/// One pie slice with its share of the total.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    /// Fraction of the total in `[0, 1]`; all zero when the total is zero.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub metric: Metric,
    pub bucket: TimeBucket,
    /// Single-series colour (the metric colour).
    pub color: &'static str,
    /// Kind default palette, only used for multi-series charts.
    pub palette: &'static [&'static str],
    pub theme: ThemePreset,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ChartPoint>,
}

/// Build a chart titled after the metric.
pub fn build_chart(data: &ResampledDataset, metric: Metric, kind: ChartKind, theme: ThemeName) -> ChartSpec {
    build_titled_chart(data, metric, kind, theme, metric.column_name())
}

/// Build a chart with a custom title; the bucket name is appended.
pub fn build_titled_chart(
    data: &ResampledDataset,
    metric: Metric,
    kind: ChartKind,
    theme: ThemeName,
    title: &str,
) -> ChartSpec {
    let points = data
        .rows
        .iter()
        .map(|r| ChartPoint {
            date: r.date,
            label: r.date.format("%Y-%m-%d").to_string(),
            value: r.metrics.get(metric),
        })
        .collect();

    ChartSpec {
        kind,
        title: format!("{title} ({})", data.bucket.display_name()),
        metric,
        bucket: data.bucket,
        color: metric_color(metric),
        palette: chart_palette(kind),
        theme: theme_preset(theme),
        x_label: "Date",
        y_label: metric.column_name(),
        points,
    }
}

impl ChartSpec {
    /// Empty charts render as a placeholder.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.points.iter().fold(0u64, |acc, p| acc.saturating_add(p.value))
    }

    /// Colour for series `idx` of `count`.
    ///
    /// A single series always uses the metric colour; the kind palette only
    /// applies when several series share the chart.
    pub fn series_color(&self, idx: usize, count: usize) -> &'static str {
        if count <= 1 || self.palette.is_empty() {
            return self.color;
        }
        self.palette[idx % self.palette.len()]
    }

    /// One slice per point, labelled by date.
    pub fn slices(&self) -> Vec<PieSlice> {
        let total = self.total();
        self.points
            .iter()
            .map(|p| PieSlice {
                label: p.label.clone(),
                value: p.value,
                share: if total == 0 { 0.0 } else { p.value as f64 / total as f64 },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_sample;
    use crate::resample::{clamp_range, filter_and_resample};

    fn monthly() -> ResampledDataset {
        let ds = generate_sample();
        let r = clamp_range(&ds, None, None).unwrap();
        filter_and_resample(&ds, r.start, r.end, TimeBucket::Monthly)
    }

    #[test]
    fn chart_uses_metric_color_and_bucket_title() {
        let data = monthly();
        let spec = build_chart(&data, Metric::Likes, ChartKind::Line, ThemeName::Dark);

        assert_eq!(spec.title, "Likes (Monthly)");
        assert_eq!(spec.color, "#d62728");
        assert_eq!(spec.series_color(0, 1), "#d62728");
        assert_eq!(spec.series_color(1, 2), "#8c564b");
        assert_eq!(spec.theme.name, ThemeName::Dark);
        assert_eq!(spec.points.len(), 12);
        assert_eq!(spec.points[0].label, "2019-01-31");
        assert_eq!(spec.points[0].value, data.rows[0].metrics.likes);
    }

    #[test]
    fn every_kind_builds_for_every_metric() {
        let data = monthly();
        for kind in ChartKind::ALL {
            for metric in Metric::ALL {
                let spec = build_chart(&data, metric, kind, ThemeName::Default);
                assert_eq!(spec.kind, kind);
                assert_eq!(spec.y_label, metric.column_name());
                assert_eq!(spec.points.len(), data.len());
            }
        }
    }

    #[test]
    fn pie_has_one_slice_per_bucket() {
        let data = monthly();
        let spec = build_chart(&data, Metric::Views, ChartKind::Pie, ThemeName::Light);
        let slices = spec.slices();
        assert_eq!(slices.len(), 12);
        let share_sum: f64 = slices.iter().map(|s| s.share).sum();
        assert!((share_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_data_builds_placeholder_chart() {
        let data = ResampledDataset::empty(TimeBucket::Weekly);
        for kind in ChartKind::ALL {
            let spec = build_titled_chart(&data, Metric::Shares, kind, ThemeName::Default, "Shares (Selected)");
            assert!(spec.is_empty());
            assert_eq!(spec.title, "Shares (Selected) (Weekly)");
            assert_eq!(spec.max_value(), 0);
            assert!(spec.slices().is_empty());
        }
    }
}
