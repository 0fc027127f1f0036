//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input rows and datasets (`Record`, `Dataset`, `MetricValues`)
//! - selector enums (`Metric`, `TimeBucket`, `ChartKind`, `ThemeName`, `ExportFormat`)
//! - resample outputs (`ResampledDataset`) and the run configuration (`DashboardConfig`)

pub mod types;

pub use types::*;
