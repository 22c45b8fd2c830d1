//! `show-env`: print the build configuration a tool would run with

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Arg, ArgAction, Command, ValueEnum};
use serde::Serialize;
use tracing::debug;

use crate::args::ParsedArguments;
use crate::error::ToolError;
use crate::tool::BuildTool;

/// Output format of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Resolved build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEnvReport {
    pub build_root: PathBuf,
    pub compiler_type: Option<String>,
    pub compiler_path: Option<PathBuf>,
    pub thirdparty_dir: Option<PathBuf>,
}

/// Compiler executable for a compiler type such as `clang15` or `gcc12`
pub fn compiler_executable(compiler_type: &str) -> Option<&'static str> {
    if compiler_type.starts_with("clang") {
        Some("clang")
    } else if compiler_type.starts_with("gcc") {
        Some("gcc")
    } else {
        None
    }
}

/// Prints the standard build arguments after they have been reconciled with
/// the environment.
pub struct ShowEnvTool<W = io::Stdout> {
    out: W,
}

impl ShowEnvTool<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for ShowEnvTool<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ShowEnvTool<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn report(args: &ParsedArguments) -> Result<BuildEnvReport, ToolError> {
        let standard = args.standard().ok_or_else(|| {
            ToolError::invalid("show-env needs --build_root, --compiler_type and --thirdparty_dir")
        })?;

        let compiler_path = standard
            .compiler_type
            .as_deref()
            .and_then(compiler_executable)
            .and_then(|exe| which::which(exe).ok());
        debug!(?compiler_path, "resolved compiler");

        Ok(BuildEnvReport {
            build_root: standard.build_root,
            compiler_type: standard.compiler_type,
            compiler_path,
            thirdparty_dir: standard.thirdparty_dir,
        })
    }

    fn check_dirs(report: &BuildEnvReport) -> Result<(), ToolError> {
        check_dir("build root", &report.build_root, "--build_root")?;
        if let Some(dir) = &report.thirdparty_dir {
            check_dir("third-party directory", dir, "--thirdparty_dir")?;
        }
        Ok(())
    }

    fn write_text(&mut self, report: &BuildEnvReport) -> io::Result<()> {
        fn or_unset(value: Option<String>) -> String {
            value.unwrap_or_else(|| "(not set)".to_string())
        }

        writeln!(self.out, "build_root:     {}", report.build_root.display())?;
        writeln!(self.out, "compiler_type:  {}", or_unset(report.compiler_type.clone()))?;
        writeln!(
            self.out,
            "compiler_path:  {}",
            or_unset(report.compiler_path.as_ref().map(|p| p.display().to_string()))
        )?;
        writeln!(
            self.out,
            "thirdparty_dir: {}",
            or_unset(report.thirdparty_dir.as_ref().map(|p| p.display().to_string()))
        )
    }
}

fn check_dir(what: &str, dir: &Path, option: &str) -> Result<(), ToolError> {
    if dir.is_dir() {
        return Ok(());
    }
    Err(ToolError::invalid_with_hint(
        format!("{} {} does not exist", what, dir.display()),
        format!("Build first, or point {} at an existing directory", option),
    ))
}

impl<W: Write> BuildTool for ShowEnvTool<W> {
    fn description(&self) -> String {
        "Show the build root, compiler and third-party directory a build tool resolves".to_string()
    }

    fn add_command_line_args(&self, cmd: Command) -> Command {
        cmd.arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(clap::value_parser!(OutputFormat))
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Fail if the build root or third-party directory does not exist"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
    }

    fn run_impl(&mut self, args: &ParsedArguments) -> Result<(), ToolError> {
        let report = Self::report(args)?;
        if args.matches().get_flag("check") {
            Self::check_dirs(&report)?;
        }

        let format = args
            .matches()
            .get_one::<OutputFormat>("format")
            .copied()
            .unwrap_or(OutputFormat::Text);
        match format {
            OutputFormat::Text => self
                .write_text(&report)
                .context("Failed to write build environment report")?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut self.out, &report)
                    .context("Failed to serialize build environment report")?;
                writeln!(self.out).context("Failed to write build environment report")?;
            }
        }
        Ok(())
    }
}
