//! Filter & resample engine.
//!
//! Responsibilities:
//!
//! - clamp a requested date range to the dataset bounds
//! - keep records inside the (inclusive) range
//! - sum records into daily/weekly/monthly/quarterly buckets, labelled by period end

pub mod bucket;
pub mod engine;

pub use bucket::*;
pub use engine::*;
