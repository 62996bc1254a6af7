//! # Designspace
//!
//! Read, edit and write designspace documents: the XML files describing a
//! variable font's axes, its master sources and its named instances.
//!
//! ## Example
//!
//! ```no_run
//! use designspace::{Axis, DesignSpace, normalize_axis_defaults};
//!
//! let mut doc = DesignSpace::load("master_ufo/Crispy.designspace").unwrap();
//! doc.axes.push(Axis::from_name("Contrast-e", 0.0, 100.0));
//! doc.save("master_ufo/Crispy-updated.designspace").unwrap();
//! normalize_axis_defaults("master_ufo/Crispy-updated.designspace", &doc).unwrap();
//! ```

mod defaults;
mod error;
mod model;
mod read;
mod write;

pub use defaults::{normalize_axis_defaults, rewrite_axis_defaults, rewrite_axis_defaults_in};
pub use error::{Error, Result};
pub use model::{Axis, AxisMap, DEFAULT_FORMAT, DesignSpace, Instance, Location, Source};
