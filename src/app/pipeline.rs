//! Shared dashboard pipeline used by both CLI and TUI front-ends.
//!
//! load -> clamp range -> filter -> resample -> totals

use crate::domain::{DashboardConfig, DataSource, Dataset, DateRange, MetricValues, ResampledDataset};
use crate::error::LoadError;
use crate::io::ingest::LoadOutcome;
use crate::resample::{clamp_range, filter_and_resample};

/// All computed outputs of a single dashboard run.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub source: DataSource,
    pub dataset_rows: usize,
    /// Why an input file was replaced by the sample, if it was.
    pub warning: Option<LoadError>,
    /// The clamped range actually applied; `None` only for an empty dataset.
    pub range: Option<DateRange>,
    pub resampled: ResampledDataset,
    /// Totals over the whole dataset.
    pub all_time: MetricValues,
    /// Totals over the selected (filtered + resampled) rows.
    pub selected: MetricValues,
}

/// Execute the pipeline for a loaded dataset.
pub fn run_dashboard(loaded: &LoadOutcome, config: &DashboardConfig) -> DashboardRun {
    let mut run = run_on_dataset(&loaded.dataset, config);
    run.warning = loaded.warning.clone();
    run
}

/// Execute the pipeline on a dataset directly.
pub fn run_on_dataset(dataset: &Dataset, config: &DashboardConfig) -> DashboardRun {
    let range = clamp_range(dataset, config.start, config.end);
    let resampled = match range {
        Some(r) => filter_and_resample(dataset, r.start, r.end, config.bucket),
        None => ResampledDataset::empty(config.bucket),
    };

    DashboardRun {
        source: dataset.source.clone(),
        dataset_rows: dataset.len(),
        warning: None,
        range,
        all_time: dataset.totals(),
        selected: resampled.totals(),
        resampled,
    }
}
