//! CSV ingest and validation.
//!
//! This module is responsible for turning an uploaded channel-metrics CSV into
//! a clean `Dataset`, or explaining why it could not.
//!
//! Design goals:
//! - **Strict schema** for required columns (missing columns reject the file)
//! - **All-or-nothing rows**: one bad row rejects the whole file
//! - **Never fatal**: `load*` degrades to the sample dataset and returns the
//!   rejection as a warning

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::data::generate_sample;
use crate::domain::{DataSource, Dataset, Metric, MetricValues, Record, REQUIRED_COLUMNS};
use crate::error::LoadError;

/// Loader output: the active dataset plus the reason it is the sample, if it
/// replaced a rejected file.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub warning: Option<LoadError>,
}

impl LoadOutcome {
    fn accepted(dataset: Dataset) -> Self {
        Self {
            dataset,
            warning: None,
        }
    }

    fn fallback(err: LoadError) -> Self {
        tracing::warn!(error = %err, "input rejected, using sample data");
        Self {
            dataset: generate_sample(),
            warning: Some(err),
        }
    }

    pub fn used_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

/// Load raw file bytes, or the sample dataset when no file was given.
pub fn load(source: Option<&[u8]>) -> LoadOutcome {
    match source {
        None => LoadOutcome::accepted(generate_sample()),
        Some(bytes) => load_upload(bytes, "upload"),
    }
}

/// Load uploaded bytes, labelling the dataset with `name`.
pub fn load_upload(bytes: &[u8], name: &str) -> LoadOutcome {
    match parse_dataset(bytes, name) {
        Ok(dataset) => {
            tracing::debug!(rows = dataset.len(), source = name, "loaded dataset");
            LoadOutcome::accepted(dataset)
        }
        Err(err) => LoadOutcome::fallback(err),
    }
}

/// Load a CSV file from disk (one blocking read), or the sample when `path` is `None`.
pub fn load_path(path: Option<&Path>) -> LoadOutcome {
    let Some(path) = path else {
        return load(None);
    };

    match std::fs::read(path) {
        Ok(bytes) => {
            let name = path
                .file_name()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| path.display().to_string());
            load_upload(&bytes, &name)
        }
        Err(e) => LoadOutcome::fallback(LoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}

/// Parse and validate CSV bytes into a `Dataset`.
pub fn parse_dataset(bytes: &[u8], name: &str) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Parse {
            line: 1,
            column: None,
            message: format!("Failed to read CSV header: {e}"),
        })?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record = result.map_err(|e| LoadError::Parse {
            line,
            column: None,
            message: format!("CSV parse error: {e}"),
        })?;

        let row = parse_row(&record, &header_map).map_err(|(column, message)| LoadError::Parse {
            line,
            column: Some(column),
            message,
        })?;
        records.push(row);
    }

    if records.is_empty() {
        return Err(LoadError::NoRows);
    }

    Ok(Dataset::new(
        records,
        DataSource::Upload {
            name: name.to_string(),
        },
    ))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report `Date` as missing.
    let name = name.trim().trim_start_matches('\u{feff}').trim();
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), LoadError> {
    let missing: Vec<&'static str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !header_map.contains_key(&normalize_header_name(col)))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingColumns { missing })
    }
}

type RowError = (&'static str, String);

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Record, RowError> {
    let date_raw = get_required(record, header_map, "Date")?;
    let date = parse_date(date_raw).map_err(|e| ("Date", e))?;

    let mut metrics = MetricValues::default();
    for metric in Metric::ALL {
        let column = metric.column_name();
        let raw = get_required(record, header_map, column)?;
        let value = parse_count(raw).map_err(|e| (column, format!("`{column}`: {e}")))?;
        metrics.set(metric, value);
    }

    let video_title = get_cell(record, header_map, "Video Title")?.to_string();

    Ok(Record {
        date,
        metrics,
        video_title,
    })
}

/// A cell that must exist on the row (may be empty).
fn get_cell<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    column: &'static str,
) -> Result<&'a str, RowError> {
    let idx = header_map
        .get(&normalize_header_name(column))
        .ok_or_else(|| (column, format!("Missing required column: `{column}`")))?;
    record.get(*idx).map(str::trim).ok_or_else(|| {
        (
            column,
            format!("Row has {} fields; `{column}` is missing", record.len()),
        )
    })
}

/// A cell that must exist and be non-empty.
fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    column: &'static str,
) -> Result<&'a str, RowError> {
    let value = get_cell(record, header_map, column)?;
    if value.is_empty() {
        return Err((column, format!("Missing required value: `{column}`")));
    }
    Ok(value)
}

/// Parse a calendar date.
///
/// ISO dates (`YYYY-MM-DD`) are the expected form, but spreadsheet exports use
/// a handful of others. Slash dates are read month-first. Date-times keep only
/// the date part.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const DATE_FMTS: [&str; 6] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%b %d, %Y", "%B %d, %Y"];
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    let s = s.trim();
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, DD-MM-YYYY, Mon DD, YYYY."
    ))
}

/// Parse a non-negative integer count. Whole-valued decimals (`12.0`) are accepted.
fn parse_count(s: &str) -> Result<u64, String> {
    if let Ok(v) = s.parse::<u64>() {
        return Ok(v);
    }

    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 => Ok(v as u64),
        Ok(v) if v.is_finite() && v < 0.0 => Err(format!("negative value '{s}'")),
        _ => Err(format!("expected a non-negative integer, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;

    const HEADER: &str = "Date,Subscribers,Views,Watch Hours,Likes,Comments,Shares,Video Title\n";

    fn csv(rows: &[&str]) -> Vec<u8> {
        let mut out = HEADER.to_string();
        for r in rows {
            out.push_str(r);
            out.push('\n');
        }
        out.into_bytes()
    }

    #[test]
    fn no_source_loads_sample() {
        let out = load(None);
        assert!(!out.used_fallback());
        assert_eq!(out.dataset.source, DataSource::Sample);
        assert_eq!(out.dataset.len(), 365);
    }

    #[test]
    fn valid_upload_is_accepted() {
        let bytes = csv(&[
            "2021-03-01,10,200,5,7,1,0,First upload",
            "2021-03-02,12,250,6,9,2,1,\"Second, with comma\"",
        ]);
        let out = load_upload(&bytes, "channel.csv");
        assert!(out.warning.is_none());

        let ds = out.dataset;
        assert_eq!(
            ds.source,
            DataSource::Upload {
                name: "channel.csv".to_string()
            }
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].date, NaiveDate::from_ymd_opt(2021, 3, 2).unwrap());
        assert_eq!(ds.records[1].metrics.views, 250);
        assert_eq!(ds.records[1].metrics.watch_hours, 6);
        assert_eq!(ds.records[1].video_title, "Second, with comma");
    }

    #[test]
    fn missing_columns_fall_back_to_sample() {
        let bytes = b"Date, Subscribers, Views\n2021-01-01,1,2\n";
        let out = load(Some(&bytes[..]));

        assert_eq!(out.dataset.source, DataSource::Sample);
        assert_eq!(out.dataset.len(), 365);

        let err = out.warning.unwrap();
        assert_eq!(err.kind(), LoadErrorKind::Validation);
        assert_eq!(
            err,
            LoadError::MissingColumns {
                missing: vec!["Watch Hours", "Likes", "Comments", "Shares", "Video Title"],
            }
        );
    }

    #[test]
    fn header_matching_tolerates_bom_case_and_extra_columns() {
        let bytes = "\u{feff}date, SUBSCRIBERS ,Views,watch hours,Likes,Comments,Shares,Video Title,Channel\n\
                     2022-05-01,1,2,3,4,5,6,Clip,main\n"
            .as_bytes()
            .to_vec();
        let ds = parse_dataset(&bytes, "x.csv").unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].metrics.shares, 6);
        assert_eq!(ds.records[0].video_title, "Clip");
    }

    #[test]
    fn bad_date_is_parse_error_with_line() {
        let bytes = csv(&["2021-01-01,1,1,1,1,1,1,ok", "not-a-date,1,1,1,1,1,1,bad"]);
        let err = parse_dataset(&bytes, "x.csv").unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Parse);
        match err {
            LoadError::Parse { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, Some("Date"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let out = load(Some(bytes.as_slice()));
        assert!(out.used_fallback());
        assert_eq!(out.dataset.source, DataSource::Sample);
    }

    #[test]
    fn negative_and_fractional_counts_are_rejected() {
        let neg = csv(&["2021-01-01,-1,1,1,1,1,1,t"]);
        let err = parse_dataset(&neg, "x.csv").unwrap_err();
        assert!(matches!(err, LoadError::Parse { column: Some("Subscribers"), .. }));

        let frac = csv(&["2021-01-01,1,1,1.5,1,1,1,t"]);
        let err = parse_dataset(&frac, "x.csv").unwrap_err();
        assert!(matches!(err, LoadError::Parse { column: Some("Watch Hours"), .. }));

        let whole = csv(&["2021-01-01,1,1,12.0,1,1,1,t"]);
        let ds = parse_dataset(&whole, "x.csv").unwrap();
        assert_eq!(ds.records[0].metrics.watch_hours, 12);
    }

    #[test]
    fn short_row_is_parse_error() {
        let bytes = csv(&["2021-01-01,1,1,1"]);
        let err = parse_dataset(&bytes, "x.csv").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, column: Some("Likes"), .. }));
    }

    #[test]
    fn counts_beyond_u64_are_rejected() {
        let max = csv(&["2021-01-01,18446744073709551615,1,1,1,1,1,t"]);
        let ds = parse_dataset(&max, "x.csv").unwrap();
        assert_eq!(ds.records[0].metrics.subscribers, u64::MAX);

        let over = csv(&["2021-01-01,1,18446744073709551616.0,1,1,1,1,t"]);
        let err = parse_dataset(&over, "x.csv").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, column: Some("Views"), .. }));
    }

    #[test]
    fn invalid_utf8_row_is_parse_error_without_column() {
        let mut bytes = csv(&["2021-01-01,1,1,1,1,1,1,ok"]);
        bytes.extend_from_slice(b"2021-01-02,1,1,1,1,1,1,bad \xff\xfe title\n");

        let err = parse_dataset(&bytes, "x.csv").unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Parse);
        assert!(matches!(err, LoadError::Parse { line: 3, column: None, .. }));

        let out = load(Some(bytes.as_slice()));
        assert!(out.used_fallback());
        assert_eq!(out.dataset.source, DataSource::Sample);
        assert!(matches!(out.warning, Some(LoadError::Parse { column: None, .. })));
    }

    #[test]
    fn empty_title_is_allowed() {
        let bytes = csv(&["2021-01-01,1,1,1,1,1,1,"]);
        let ds = parse_dataset(&bytes, "x.csv").unwrap();
        assert_eq!(ds.records[0].video_title, "");
    }

    #[test]
    fn header_only_file_is_rejected() {
        let err = parse_dataset(HEADER.as_bytes(), "x.csv").unwrap_err();
        assert_eq!(err, LoadError::NoRows);
        assert_eq!(err.kind(), LoadErrorKind::Validation);
    }

    #[test]
    fn unreadable_path_falls_back() {
        let out = load_path(Some(Path::new("/definitely/not/here.csv")));
        assert!(out.used_fallback());
        assert_eq!(out.warning.unwrap().kind(), LoadErrorKind::Io);
        assert_eq!(out.dataset.len(), 365);
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2019, 1, 2).unwrap();
        for s in [
            "2019-01-02",
            "2019/01/02",
            "01/02/2019",
            "02-01-2019",
            "Jan 02, 2019",
            "January 02, 2019",
            "2019-01-02 13:45:00",
            "2019-01-02T13:45:00",
            "2019-01-02T13:45:00+02:00",
        ] {
            assert_eq!(parse_date(s), Ok(expected), "format: {s}");
        }
        assert!(parse_date("2019-02-30").is_err());
        assert!(parse_date("yesterday").is_err());
    }
}
