//! Default paths and conventions for the Crispy source tree.

/// CSV mapping of named instances to axis values.
pub const MAPPING_CSV: &str = "sources/mapping.csv";

/// Designspace document the axis merge starts from.
pub const SOURCE_DESIGNSPACE: &str = "master_ufo/Crispy.designspace";

/// Directory holding the master UFOs referenced by the designspace.
pub const MASTER_DIR: &str = "master_ufo";

/// Directory receiving duplicated master UFOs.
pub const MASTER_OUTPUT_DIR: &str = "master_ufo";

/// Designspace document written by the axis merge.
pub const OUTPUT_DESIGNSPACE: &str = "master_ufo/Crispy-updated.designspace";

/// Substring marking a CSV column as an extension axis.
pub const EXTENSION_AXIS_MARKER: &str = "-e";

/// CSV column holding the instance style name.
pub const INSTANCE_COLUMN: &str = "Instance";

/// Family name given to duplicated sources that carry none.
pub const FAMILY_FALLBACK: &str = "Crispy";

/// Suffix appended to each extension axis name in duplicate file names.
pub const DUPLICATE_AXIS_SUFFIX: &str = "Max";

/// File extension of a designspace document.
pub const DESIGNSPACE_EXTENSION: &str = "designspace";

/// External compiler used by the width inspector.
pub const COMPILER_PROGRAM: &str = "fontmake";

/// Directory the width inspector compiles instances into.
pub const EXPORT_DIR: &str = "export";

/// Text measured when the inspector is given none.
pub const DEFAULT_SAMPLE_TEXT: &str = "H";
