use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use crispy_core::config::{COMPILER_PROGRAM, EXPORT_DIR};
use log::info;
use width_inspector::{Compiler, ExportDir, Inspector, OutputFormat, gui};

#[derive(Parser)]
#[command(name = "width-inspector", version)]
#[command(about = "Compile every instance of a font source and compare shaped text widths")]
struct Cli {
    /// Font source (.glyphs, .glyphspackage, .designspace or .ufo)
    source: PathBuf,

    /// Compiler command line
    #[arg(long, default_value = COMPILER_PROGRAM)]
    compiler: String,

    /// Binary format to compile instances to
    #[arg(long, default_value = "otf")]
    format: OutputFormat,

    /// Scratch directory for compiled instances, removed on exit
    #[arg(long, default_value = EXPORT_DIR)]
    export_dir: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage errors exit with 1, not clap's 2; --help and --version succeed.
        Err(e) => {
            e.print().ok();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    if !cli.source.exists() {
        eprintln!("Error: File not found: {}", cli.source.display());
        return ExitCode::FAILURE;
    }

    info!("Starting Font Width Inspector with {}", cli.source.display());
    let compiler = Compiler::from_command_line(&cli.compiler).with_format(cli.format);
    let inspector = Inspector::new(cli.source, compiler, ExportDir::new(cli.export_dir));

    match gui::run(inspector) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
