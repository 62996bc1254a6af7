//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crispy_core::config::{
    COMPILER_PROGRAM, DEFAULT_SAMPLE_TEXT, EXPORT_DIR, EXTENSION_AXIS_MARKER, FAMILY_FALLBACK,
    INSTANCE_COLUMN, MAPPING_CSV, MASTER_DIR, MASTER_OUTPUT_DIR, OUTPUT_DESIGNSPACE,
    SOURCE_DESIGNSPACE,
};
use width_inspector::OutputFormat;

use crate::commands::{MeasureOptions, extract, measure, merge_axes};

#[derive(Parser)]
#[command(name = "crispy-fonts")]
#[command(about = "Designspace and measurement tools for the Crispy variable font")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct MergeArgs {
    /// CSV mapping of instance names to axis values
    #[arg(long, default_value = MAPPING_CSV)]
    pub csv: PathBuf,
    /// Designspace to extend
    #[arg(long, default_value = SOURCE_DESIGNSPACE)]
    pub designspace: PathBuf,
    /// Directory the source masters are looked up in
    #[arg(long, default_value = MASTER_DIR)]
    pub master_dir: PathBuf,
    /// Directory duplicated masters are written to
    #[arg(long, default_value = MASTER_OUTPUT_DIR)]
    pub output_dir: PathBuf,
    /// Designspace to write
    #[arg(short, long, default_value = OUTPUT_DESIGNSPACE)]
    pub output: PathBuf,
    /// Substring marking extension axis columns
    #[arg(long, default_value = EXTENSION_AXIS_MARKER, allow_hyphen_values = true)]
    pub marker: String,
    /// CSV column holding instance style names
    #[arg(long, default_value = INSTANCE_COLUMN)]
    pub instance_column: String,
    /// Family name for duplicated sources that have none
    #[arg(long, default_value = FAMILY_FALLBACK)]
    pub family_fallback: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the designspace of a compiled variable font
    Extract {
        /// Variable font file
        font: PathBuf,
        /// Output designspace (default: FONT_STEM.designspace)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Add CSV extension axes to a designspace and duplicate its masters
    MergeAxes {
        #[command(flatten)]
        args: MergeArgs,
    },
    /// Compile every instance of a source and print shaped text widths
    Measure {
        /// Font source (.glyphs, .glyphspackage, .designspace or .ufo)
        source: PathBuf,
        /// Text to shape
        #[arg(long, default_value = DEFAULT_SAMPLE_TEXT)]
        text: String,
        /// Compiler command line
        #[arg(long, default_value = COMPILER_PROGRAM)]
        compiler: String,
        #[arg(long, default_value = "otf")]
        format: OutputFormat,
        /// Scratch directory for compiled instances, removed afterwards
        #[arg(long, default_value = EXPORT_DIR)]
        export_dir: PathBuf,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Extract { font, output } => {
                extract(&font, output.as_deref())?;
            }
            Commands::MergeAxes { args } => {
                merge_axes(args.into())?;
            }
            Commands::Measure { source, text, compiler, format, export_dir } => {
                let report =
                    measure(&MeasureOptions { source, text, compiler, format, export_dir })?;
                if !report.is_empty() {
                    print!("{report}");
                }
            }
        }
        Ok(())
    }
}

impl From<MergeArgs> for axis_merger::MergeConfig {
    fn from(args: MergeArgs) -> Self {
        Self {
            csv: args.csv,
            designspace: args.designspace,
            master_dir: args.master_dir,
            output_dir: args.output_dir,
            output: args.output,
            marker: args.marker,
            instance_column: args.instance_column,
            family_fallback: args.family_fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn merge_defaults() {
        let cli = Cli::try_parse_from(["crispy-fonts", "merge-axes"]).unwrap();
        let Commands::MergeAxes { args } = cli.command else {
            panic!("expected merge-axes");
        };
        let config: axis_merger::MergeConfig = args.into();
        assert_eq!(config.csv, Path::new("sources/mapping.csv"));
        assert_eq!(config.output, Path::new("master_ufo/Crispy-updated.designspace"));
        assert_eq!(config.marker, "-e");
    }

    #[test]
    fn marker_accepts_leading_hyphen() {
        let cli = Cli::try_parse_from(["crispy-fonts", "merge-axes", "--marker", "-x"]).unwrap();
        let Commands::MergeAxes { args } = cli.command else {
            panic!("expected merge-axes");
        };
        assert_eq!(args.marker, "-x");
    }

    #[test]
    fn measure_arguments() {
        let cli = Cli::try_parse_from([
            "crispy-fonts",
            "measure",
            "Crispy.glyphs",
            "--text",
            "Hamburg",
            "--format",
            "ttf",
        ])
        .unwrap();
        let Commands::Measure { source, text, compiler, format, export_dir } = cli.command else {
            panic!("expected measure");
        };
        assert_eq!(source, Path::new("Crispy.glyphs"));
        assert_eq!(text, "Hamburg");
        assert_eq!(compiler, "fontmake");
        assert_eq!(format, OutputFormat::Ttf);
        assert_eq!(export_dir, Path::new("export"));
    }

    #[test]
    fn extract_output_is_optional() {
        let cli = Cli::try_parse_from(["crispy-fonts", "extract", "Crispy[wght].ttf"]).unwrap();
        assert!(matches!(cli.command, Commands::Extract { output: None, .. }));
    }
}
