//! CLI command implementations.

mod extract;
mod measure;
mod merge_axes;

pub use extract::extract;
pub use measure::{MeasureOptions, measure};
pub use merge_axes::merge_axes;
