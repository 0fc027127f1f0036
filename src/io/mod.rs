//! Input/output helpers.
//!
//! - CSV ingest + validation with sample fallback (`ingest`)
//! - CSV / XLSX / JSON exports of the resampled data (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
