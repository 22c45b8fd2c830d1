//! The contract a concrete build tool implements

use clap::Command;

use crate::args::ParsedArguments;
use crate::error::ToolError;

/// A command-line tool that is part of the YugabyteDB build.
///
/// Only [`description`](BuildTool::description) is required. A tool that can
/// actually be run must also implement [`run_impl`](BuildTool::run_impl); the
/// default reports [`ToolError::NotImplemented`].
pub trait BuildTool {
    /// One-line description shown in `--help`
    fn description(&self) -> String;

    /// Program name used in usage messages
    fn name(&self) -> &'static str {
        "yb-build-tool"
    }

    /// Apply parser-level settings. Sets the description by default.
    fn configure_parser(&self, cmd: Command) -> Command {
        cmd.about(self.description())
    }

    /// Register tool-specific options
    fn add_command_line_args(&self, cmd: Command) -> Command {
        cmd
    }

    /// Do the tool's work with validated arguments
    fn run_impl(&mut self, _args: &ParsedArguments) -> Result<(), ToolError> {
        Err(ToolError::NotImplemented {
            tool: self.name().to_string(),
        })
    }
}
