//! External instance compiler invocation.

use std::{
    ffi::OsString,
    fmt,
    path::Path,
    process::Command,
    str::FromStr,
};

use crispy_core::config::COMPILER_PROGRAM;
use log::{error, info};

use crate::error::{Error, Result};

/// Binary format the compiler is asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Otf,
    Ttf,
}

impl OutputFormat {
    /// Value passed to `-o`, also the extension of the generated files.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Otf => "otf",
            OutputFormat::Ttf => "ttf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "otf" => Ok(OutputFormat::Otf),
            "ttf" => Ok(OutputFormat::Ttf),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Compiler flag announcing the kind of `source`.
pub fn input_flag(source: &Path) -> Result<&'static str> {
    let extension = source
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "glyphs" | "glyphspackage" => Ok("-g"),
        "designspace" => Ok("-m"),
        "ufo" => Ok("-u"),
        _ => Err(Error::UnsupportedSource(source.to_path_buf())),
    }
}

/// A font compiler that writes one binary per named instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiler {
    pub program: String,
    /// Arguments placed before the generated ones (`python3 -m fontmake`)
    pub args: Vec<String>,
    pub format: OutputFormat,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(COMPILER_PROGRAM)
    }
}

impl Compiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), format: OutputFormat::default() }
    }

    /// Split a command line such as `python3 -m fontmake` on whitespace.
    pub fn from_command_line(command: &str) -> Self {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next().unwrap_or_else(|| COMPILER_PROGRAM.to_string());
        Self { program, args: words.collect(), format: OutputFormat::default() }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Arguments after the fixed prefix:
    /// `<flag> SOURCE -i -o FORMAT --output-dir DIR`.
    pub fn arguments(&self, source: &Path, output_dir: &Path) -> Result<Vec<OsString>> {
        let flag = input_flag(source)?;
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        args.extend([
            OsString::from(flag),
            source.as_os_str().to_owned(),
            OsString::from("-i"),
            OsString::from("-o"),
            OsString::from(self.format.as_str()),
            OsString::from("--output-dir"),
            output_dir.as_os_str().to_owned(),
        ]);
        Ok(args)
    }

    /// Run the compiler and wait for it to exit.
    pub fn compile(&self, source: &Path, output_dir: &Path) -> Result<()> {
        let args = self.arguments(source, output_dir)?;
        info!("Generating {} instances from {}...", self.format, source.display());

        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| Error::Spawn { program: self.program.clone(), source })?;

        if !status.success() {
            error!("{} failed: {status}", self.program);
            return Err(Error::CompilerFailed { program: self.program.clone(), status });
        }
        Ok(())
    }
}
