//! Crispy Width Inspector - compare shaped text widths across font instances.
//!
//! A font source is compiled into one binary per named instance by an
//! external compiler (fontmake by default). Each binary is shaped with
//! rustybuzz and the summed advance of the sample text is reported next to
//! the instance's axis coordinates.
//!
//! # Example
//!
//! ```no_run
//! use width_inspector::{Compiler, ExportDir, Inspector};
//!
//! let mut inspector = Inspector::new("Crispy.glyphs", Compiler::default(), ExportDir::new("export"));
//! inspector.run_check("Hamburg");
//! print!("{}", inspector.report());
//! ```

mod app;
mod axes;
mod compile;
mod error;
mod export;
mod inspect;
mod measure;
mod report;

#[cfg(feature = "gui")]
pub mod gui;

pub use app::{Inspector, STATUS_MESSAGE_LIMIT, Status};
pub use axes::{Coordinates, FontAxes};
pub use compile::{Compiler, OutputFormat, input_flag};
pub use error::{Error, Result};
pub use export::ExportDir;
pub use inspect::measure_instances;
pub use measure::measure_text_width;
pub use report::{INSTANCE_COLUMN, PLACEHOLDER, Report, Row};
