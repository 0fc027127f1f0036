//! Chart building.
//!
//! - static colour tables and theme presets (`palette`)
//! - `(data, metric, kind, theme) -> ChartSpec` (`builder`)

pub mod builder;
pub mod palette;

pub use builder::*;
pub use palette::*;
