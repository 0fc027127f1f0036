//! Text rendering of chart specs.

pub mod ascii;

pub use ascii::*;
