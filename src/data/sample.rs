//! Generated sample dataset.
//!
//! Used whenever no file is supplied, and as the fallback when a supplied file
//! is rejected. The values are a deterministic linear ramp so totals are easy
//! to verify by hand.

use chrono::{Duration, NaiveDate};

use crate::domain::{DataSource, Dataset, MetricValues, Record};

/// Number of daily rows in the sample (all of 2019).
pub const SAMPLE_DAYS: u64 = 365;

/// Per-metric multipliers applied to the row index.
const SUBSCRIBERS_STEP: u64 = 10;
const VIEWS_STEP: u64 = 100;
const WATCH_HOURS_STEP: u64 = 5;
const LIKES_STEP: u64 = 20;
const COMMENTS_STEP: u64 = 2;
const SHARES_STEP: u64 = 1;

pub fn sample_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Build the sample dataset: one row per day starting 2019-01-01.
pub fn generate_sample() -> Dataset {
    let start = sample_start();
    let records = (0..SAMPLE_DAYS)
        .map(|i| Record {
            date: start + Duration::days(i as i64),
            metrics: MetricValues {
                subscribers: i * SUBSCRIBERS_STEP,
                views: i * VIEWS_STEP,
                watch_hours: i * WATCH_HOURS_STEP,
                likes: i * LIKES_STEP,
                comments: i * COMMENTS_STEP,
                shares: i * SHARES_STEP,
            },
            video_title: format!("Video {i}"),
        })
        .collect();

    Dataset::new(records, DataSource::Sample)
}
