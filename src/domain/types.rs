//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built once per run by the loader
//! - passed by reference through the resample/report/chart steps
//! - exported to CSV/XLSX/JSON through `io::export`

use chrono::NaiveDate;
use clap::ValueEnum;

/// Columns every input file must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Date",
    "Subscribers",
    "Views",
    "Watch Hours",
    "Likes",
    "Comments",
    "Shares",
    "Video Title",
];

/// One numeric channel metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Metric {
    #[default]
    Subscribers,
    Views,
    WatchHours,
    Likes,
    Comments,
    Shares,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Subscribers,
        Metric::Views,
        Metric::WatchHours,
        Metric::Likes,
        Metric::Comments,
        Metric::Shares,
    ];

    /// Metrics shown as headline cards on the dashboard.
    pub const HEADLINE: [Metric; 4] = [
        Metric::Subscribers,
        Metric::Views,
        Metric::WatchHours,
        Metric::Likes,
    ];

    /// Column name as it appears in input and export files.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Subscribers => "Subscribers",
            Metric::Views => "Views",
            Metric::WatchHours => "Watch Hours",
            Metric::Likes => "Likes",
            Metric::Comments => "Comments",
            Metric::Shares => "Shares",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// The six metric values of one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricValues {
    pub subscribers: u64,
    pub views: u64,
    pub watch_hours: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl MetricValues {
    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Subscribers => self.subscribers,
            Metric::Views => self.views,
            Metric::WatchHours => self.watch_hours,
            Metric::Likes => self.likes,
            Metric::Comments => self.comments,
            Metric::Shares => self.shares,
        }
    }

    pub fn set(&mut self, metric: Metric, value: u64) {
        match metric {
            Metric::Subscribers => self.subscribers = value,
            Metric::Views => self.views = value,
            Metric::WatchHours => self.watch_hours = value,
            Metric::Likes => self.likes = value,
            Metric::Comments => self.comments = value,
            Metric::Shares => self.shares = value,
        }
    }

    /// Field-wise saturating sum.
    pub fn accumulate(&mut self, other: &MetricValues) {
        for metric in Metric::ALL {
            self.set(metric, self.get(metric).saturating_add(other.get(metric)));
        }
    }
}

/// One input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub metrics: MetricValues,
    pub video_title: String,
}

/// Where the active dataset came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Sample,
    Upload { name: String },
}

impl DataSource {
    pub fn label(&self) -> &str {
        match self {
            DataSource::Sample => "sample data",
            DataSource::Upload { name } => name,
        }
    }
}

/// An immutable set of records, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub source: DataSource,
}

impl Dataset {
    pub fn new(records: Vec<Record>, source: DataSource) -> Self {
        Self { records, source }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest record dates.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }

    pub fn totals(&self) -> MetricValues {
        let mut out = MetricValues::default();
        for r in &self.records {
            out.accumulate(&r.metrics);
        }
        out
    }
}

/// Resampling granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum TimeBucket {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Daily,
        TimeBucket::Weekly,
        TimeBucket::Monthly,
        TimeBucket::Quarterly,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            TimeBucket::Daily => "Daily",
            TimeBucket::Weekly => "Weekly",
            TimeBucket::Monthly => "Monthly",
            TimeBucket::Quarterly => "Quarterly",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// One row of a resampled dataset.
///
/// `video_title` is only kept at daily granularity, where rows pass through
/// unchanged; summed rows have no meaningful title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResampledRow {
    pub date: NaiveDate,
    pub metrics: MetricValues,
    pub video_title: Option<String>,
}

/// Filtered + bucketed rows, strictly chronological.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResampledDataset {
    pub bucket: TimeBucket,
    pub rows: Vec<ResampledRow>,
}

impl ResampledDataset {
    pub fn empty(bucket: TimeBucket) -> Self {
        Self {
            bucket,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn totals(&self) -> MetricValues {
        let mut out = MetricValues::default();
        for r in &self.rows {
            out.accumulate(&r.metrics);
        }
        out
    }

    /// Whether exports should carry the `Video Title` column.
    pub fn has_titles(&self) -> bool {
        self.bucket == TimeBucket::Daily
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Chart shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum ChartKind {
    #[default]
    Bar,
    Area,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::Bar, ChartKind::Area, ChartKind::Line, ChartKind::Pie];

    pub fn display_name(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Named visual preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum ThemeName {
    #[default]
    Default,
    Light,
    Dark,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Default, ThemeName::Light, ThemeName::Dark];

    pub fn display_name(self) -> &'static str {
        match self {
            ThemeName::Default => "default",
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Export payload format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Json];

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "youtube_data.csv",
            ExportFormat::Excel => "youtube_data.xlsx",
            ExportFormat::Json => "youtube_data.json",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Excel => "Excel",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }
}

/// Which dashboard sections to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub all_time: bool,
    pub selected: bool,
    pub table: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            all_time: true,
            selected: true,
            table: true,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (or TUI state) once, then passed by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Requested start date; clamped to the dataset range, dataset min if absent.
    pub start: Option<NaiveDate>,
    /// Requested end date; clamped to the dataset range, dataset max if absent.
    pub end: Option<NaiveDate>,
    pub bucket: TimeBucket,
    pub chart_kind: ChartKind,
    pub theme: ThemeName,
    /// Metric plotted in the TUI chart.
    pub metric: Metric,
    pub sections: Sections,
    pub export_format: ExportFormat,
}

fn cycle<T: Copy + PartialEq>(all: &[T], cur: T, delta: isize) -> T {
    let len = all.len() as isize;
    let idx = all.iter().position(|v| *v == cur).unwrap_or(0) as isize;
    all[(idx + delta).rem_euclid(len) as usize]
}
