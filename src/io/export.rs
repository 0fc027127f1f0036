//! Export the resampled dataset as CSV, XLSX or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Every encoder produces the same columns in the same order:
//! `Date, Subscribers, Views, Watch Hours, Likes, Comments, Shares` and, for daily
//! data only, `Video Title`.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;

use crate::domain::{ExportFormat, Metric, ResampledDataset, ResampledRow};
use crate::error::AppError;

const SHEET_NAME: &str = "YouTube Data";

/// Column headers for an export, in output order.
pub fn export_columns(include_title: bool) -> Vec<&'static str> {
    let mut cols = vec!["Date"];
    cols.extend(Metric::ALL.iter().map(|m| m.column_name()));
    if include_title {
        cols.push("Video Title");
    }
    cols
}

/// Encode the dataset in the requested format.
pub fn encode(data: &ResampledDataset, format: ExportFormat) -> Result<Vec<u8>, AppError> {
    match format {
        ExportFormat::Csv => encode_csv(data),
        ExportFormat::Excel => encode_xlsx(data),
        ExportFormat::Json => encode_json(data),
    }
}

/// Encode and write the payload to `path`.
pub fn write_export(path: &Path, data: &ResampledDataset, format: ExportFormat) -> Result<(), AppError> {
    let bytes = encode(data, format)?;
    fs::write(path, &bytes)
        .map_err(|e| AppError::new(2, format!("Failed to write export '{}': {e}", path.display())))?;

    tracing::info!(
        path = %path.display(),
        format = format.display_name(),
        rows = data.len(),
        bytes = bytes.len(),
        "wrote export"
    );
    Ok(())
}

fn encode_csv(data: &ResampledDataset) -> Result<Vec<u8>, AppError> {
    let titles = data.has_titles();
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(export_columns(titles))
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for row in &data.rows {
        let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
        record.extend(Metric::ALL.iter().map(|&m| row.metrics.get(m).to_string()));
        if titles {
            record.push(row.video_title.clone().unwrap_or_default());
        }
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))
}

fn encode_xlsx(data: &ResampledDataset) -> Result<Vec<u8>, AppError> {
    build_workbook(data).map_err(|e| AppError::new(4, format!("Failed to build XLSX export: {e}")))
}

fn build_workbook(data: &ResampledDataset) -> Result<Vec<u8>, XlsxError> {
    let titles = data.has_titles();
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in export_columns(titles).into_iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (idx, row) in data.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        worksheet.write_string(r, 0, row.date.format("%Y-%m-%d").to_string())?;
        for (offset, &metric) in Metric::ALL.iter().enumerate() {
            worksheet.write_number(r, offset as u16 + 1, row.metrics.get(metric) as f64)?;
        }
        if titles {
            let col = Metric::ALL.len() as u16 + 1;
            worksheet.write_string(r, col, row.video_title.as_deref().unwrap_or(""))?;
        }
    }

    workbook.save_to_buffer()
}

/// One JSON record; field order is the column order.
#[derive(Debug, Serialize)]
struct JsonRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Subscribers")]
    subscribers: u64,
    #[serde(rename = "Views")]
    views: u64,
    #[serde(rename = "Watch Hours")]
    watch_hours: u64,
    #[serde(rename = "Likes")]
    likes: u64,
    #[serde(rename = "Comments")]
    comments: u64,
    #[serde(rename = "Shares")]
    shares: u64,
    #[serde(rename = "Video Title", skip_serializing_if = "Option::is_none")]
    video_title: Option<&'a str>,
}

impl<'a> JsonRow<'a> {
    fn from_row(row: &'a ResampledRow, include_title: bool) -> Self {
        let m = &row.metrics;
        Self {
            date: row.date.format("%Y-%m-%d").to_string(),
            subscribers: m.subscribers,
            views: m.views,
            watch_hours: m.watch_hours,
            likes: m.likes,
            comments: m.comments,
            shares: m.shares,
            video_title: include_title.then(|| row.video_title.as_deref().unwrap_or("")),
        }
    }
}

fn encode_json(data: &ResampledDataset) -> Result<Vec<u8>, AppError> {
    let titles = data.has_titles();
    let rows: Vec<JsonRow<'_>> = data.rows.iter().map(|r| JsonRow::from_row(r, titles)).collect();
    serde_json::to_vec_pretty(&rows).map_err(|e| AppError::new(4, format!("Failed to encode JSON export: {e}")))
}
