//! Date-range filtering and bucket aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Dataset, DateRange, MetricValues, Record, ResampledDataset, ResampledRow, TimeBucket};
use crate::resample::bucket::period_end;

/// Resolve the requested range against the dataset bounds.
///
/// Missing bounds default to the dataset's first/last date; given bounds are
/// clamped into `[min, max]`. Returns `None` for an empty dataset.
pub fn clamp_range(ds: &Dataset, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<DateRange> {
    let (min, max) = ds.date_bounds()?;
    let start = start.unwrap_or(min).clamp(min, max);
    let end = end.unwrap_or(max).clamp(min, max);
    Some(DateRange { start, end })
}

/// Records with `start <= date <= end`, in input order.
pub fn filter_records(ds: &Dataset, range: DateRange) -> Vec<&Record> {
    ds.records.iter().filter(|r| range.contains(r.date)).collect()
}

/// Filter `ds` to `[start, end]` and aggregate into `bucket`s.
///
/// The bounds are expected to be clamped already (see `clamp_range`). An
/// inverted range yields an empty result.
pub fn filter_and_resample(ds: &Dataset, start: NaiveDate, end: NaiveDate, bucket: TimeBucket) -> ResampledDataset {
    let filtered = filter_records(ds, DateRange { start, end });
    let out = resample(&filtered, bucket);
    tracing::debug!(
        input = ds.len(),
        filtered = filtered.len(),
        rows = out.len(),
        bucket = bucket.display_name(),
        "resampled dataset"
    );
    out
}

/// Aggregate already-filtered records.
pub fn resample(records: &[&Record], bucket: TimeBucket) -> ResampledDataset {
    let rows = match bucket {
        TimeBucket::Daily => {
            let mut rows: Vec<ResampledRow> = records
                .iter()
                .map(|r| ResampledRow {
                    date: r.date,
                    metrics: r.metrics,
                    video_title: Some(r.video_title.clone()),
                })
                .collect();
            // Stable: same-day rows keep their input order.
            rows.sort_by_key(|r| r.date);
            rows
        }
        _ => {
            let mut buckets: BTreeMap<NaiveDate, MetricValues> = BTreeMap::new();
            for r in records {
                buckets
                    .entry(period_end(r.date, bucket))
                    .or_default()
                    .accumulate(&r.metrics);
            }
            buckets
                .into_iter()
                .map(|(date, metrics)| ResampledRow {
                    date,
                    metrics,
                    video_title: None,
                })
                .collect()
        }
    };

    ResampledDataset { bucket, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_sample;
    use crate::domain::{DataSource, Metric};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(date: NaiveDate, v: u64, title: &str) -> Record {
        Record {
            date,
            metrics: MetricValues {
                subscribers: v,
                views: v * 10,
                watch_hours: v,
                likes: v,
                comments: v,
                shares: v,
            },
            video_title: title.to_string(),
        }
    }

    fn full_range(ds: &Dataset) -> DateRange {
        clamp_range(ds, None, None).unwrap()
    }

    #[test]
    fn clamp_defaults_and_bounds() {
        let ds = generate_sample();
        let r = clamp_range(&ds, None, None).unwrap();
        assert_eq!(r, DateRange { start: d(2019, 1, 1), end: d(2019, 12, 31) });

        let r = clamp_range(&ds, Some(d(2018, 6, 1)), Some(d(2019, 2, 1))).unwrap();
        assert_eq!(r, DateRange { start: d(2019, 1, 1), end: d(2019, 2, 1) });

        let r = clamp_range(&ds, Some(d(2019, 5, 1)), Some(d(2025, 1, 1))).unwrap();
        assert_eq!(r, DateRange { start: d(2019, 5, 1), end: d(2019, 12, 31) });

        let empty = Dataset::new(Vec::new(), DataSource::Sample);
        assert!(clamp_range(&empty, None, None).is_none());
    }

    #[test]
    fn filter_is_inclusive() {
        let ds = generate_sample();
        let rows = filter_records(&ds, DateRange { start: d(2019, 1, 10), end: d(2019, 1, 20) });
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0].date, d(2019, 1, 10));
        assert_eq!(rows[10].date, d(2019, 1, 20));
    }

    #[test]
    fn daily_is_identity_over_filtered_rows() {
        let ds = generate_sample();
        let range = DateRange { start: d(2019, 3, 1), end: d(2019, 3, 31) };
        let out = filter_and_resample(&ds, range.start, range.end, TimeBucket::Daily);
        let filtered = filter_records(&ds, range);

        assert_eq!(out.len(), filtered.len());
        for (row, rec) in out.rows.iter().zip(filtered) {
            assert_eq!(row.date, rec.date);
            assert_eq!(row.metrics, rec.metrics);
            assert_eq!(row.video_title.as_deref(), Some(rec.video_title.as_str()));
        }
    }

    #[test]
    fn daily_sorts_unordered_input() {
        let ds = Dataset::new(
            vec![
                record(d(2020, 1, 3), 3, "c"),
                record(d(2020, 1, 1), 1, "a"),
                record(d(2020, 1, 2), 2, "b"),
            ],
            DataSource::Sample,
        );
        let r = full_range(&ds);
        let out = filter_and_resample(&ds, r.start, r.end, TimeBucket::Daily);
        let dates: Vec<_> = out.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2020, 1, 1), d(2020, 1, 2), d(2020, 1, 3)]);
    }

    #[test]
    fn monthly_sample_has_twelve_rows_with_expected_sums() {
        let ds = generate_sample();
        let r = full_range(&ds);
        let out = filter_and_resample(&ds, r.start, r.end, TimeBucket::Monthly);

        assert_eq!(out.len(), 12);
        assert!(out.rows.iter().all(|r| r.video_title.is_none()));

        // Expected: 10 * sum of day indices in each month.
        let days_in_month = [31u64, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        let mut first_idx = 0u64;
        for (row, days) in out.rows.iter().zip(days_in_month) {
            let last_idx = first_idx + days - 1;
            let idx_sum = (first_idx..=last_idx).sum::<u64>();
            assert_eq!(row.metrics.subscribers, 10 * idx_sum, "month ending {}", row.date);
            first_idx = last_idx + 1;
        }

        assert_eq!(out.rows[0].date, d(2019, 1, 31));
        assert_eq!(out.rows[1].date, d(2019, 2, 28));
        assert_eq!(out.rows[11].date, d(2019, 12, 31));
    }

    #[test]
    fn weekly_and_quarterly_sample_shapes() {
        let ds = generate_sample();
        let r = full_range(&ds);

        let weekly = filter_and_resample(&ds, r.start, r.end, TimeBucket::Weekly);
        assert_eq!(weekly.len(), 53);
        assert_eq!(weekly.rows[0].date, d(2019, 1, 6));
        assert_eq!(weekly.rows[52].date, d(2020, 1, 5));
        assert!(weekly.rows.windows(2).all(|w| w[0].date < w[1].date));

        let quarterly = filter_and_resample(&ds, r.start, r.end, TimeBucket::Quarterly);
        let dates: Vec<_> = quarterly.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2019, 3, 31), d(2019, 6, 30), d(2019, 9, 30), d(2019, 12, 31)]);
    }

    #[test]
    fn resampling_preserves_totals() {
        let ds = generate_sample();
        let start = d(2019, 2, 11);
        let end = d(2019, 10, 3);
        let filtered = filter_records(&ds, DateRange { start, end });

        for bucket in TimeBucket::ALL {
            let out = filter_and_resample(&ds, start, end, bucket);
            for metric in Metric::ALL {
                let expected: u64 = filtered.iter().map(|r| r.metrics.get(metric)).sum();
                let got: u64 = out.rows.iter().map(|r| r.metrics.get(metric)).sum();
                assert_eq!(got, expected, "{metric:?} @ {bucket:?}");
            }
        }
    }

    #[test]
    fn empty_buckets_are_omitted() {
        let ds = Dataset::new(
            vec![record(d(2020, 1, 15), 1, "a"), record(d(2020, 4, 2), 2, "b")],
            DataSource::Sample,
        );
        let r = full_range(&ds);
        let out = filter_and_resample(&ds, r.start, r.end, TimeBucket::Monthly);
        let dates: Vec<_> = out.rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2020, 1, 31), d(2020, 4, 30)]);
    }

    #[test]
    fn empty_selection_is_empty_result() {
        let ds = generate_sample();
        let out = filter_and_resample(&ds, d(2019, 6, 1), d(2019, 5, 1), TimeBucket::Weekly);
        assert!(out.is_empty());
        assert_eq!(out.bucket, TimeBucket::Weekly);
        assert_eq!(out.totals(), MetricValues::default());
    }

    #[test]
    fn uploaded_far_future_date_resamples_in_every_bucket() {
        let bytes = b"Date,Subscribers,Views,Watch Hours,Likes,Comments,Shares,Video Title\n\
                      +262142-12-31,1,1,1,1,1,1,x\n";
        let loaded = crate::io::ingest::load(Some(&bytes[..]));
        assert!(loaded.warning.is_none());

        let range = full_range(&loaded.dataset);
        for bucket in TimeBucket::ALL {
            let out = filter_and_resample(&loaded.dataset, range.start, range.end, bucket);
            assert_eq!(out.len(), 1, "{}", bucket.display_name());
            assert!(out.rows[0].date >= range.end);
            assert_eq!(out.totals().subscribers, 1);
        }
    }
}
