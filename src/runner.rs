//! Lifecycle driver for build tools
//!
//! ```text
//! Uninitialized → ParserCreated → ArgumentsParsed → Validated → Executed
//! ```
//!
//! Each stage runs once, left to right. Any failure aborts the remaining
//! stages and is returned to the caller.

use std::ffi::{OsStr, OsString};
use std::fmt;

use clap::{Arg, Command};
use tracing::{debug, info};

use crate::args::{ParsedArguments, BUILD_ROOT_ARG, COMPILER_TYPE_ARG, THIRDPARTY_DIR_ARG};
use crate::env::{EnvStore, ProcessEnv, BUILD_ROOT, YB_COMPILER_TYPE, YB_THIRDPARTY_DIR};
use crate::error::ToolError;
use crate::tool::BuildTool;

/// Where a [`ToolRunner`] is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uninitialized,
    ParserCreated,
    ArgumentsParsed,
    Validated,
    Executed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Uninitialized => "uninitialized",
            Stage::ParserCreated => "parser created",
            Stage::ArgumentsParsed => "arguments parsed",
            Stage::Validated => "validated",
            Stage::Executed => "executed",
        };
        f.write_str(name)
    }
}

/// Runs a [`BuildTool`]: builds its parser, parses and validates the command
/// line against the environment, then hands over to the tool.
pub struct ToolRunner<T, E = ProcessEnv> {
    tool: T,
    env: E,
    arg_parser: Option<Command>,
    args: Option<ParsedArguments>,
    add_standard_build_args: bool,
    stage: Stage,
}

impl<T: BuildTool> ToolRunner<T, ProcessEnv> {
    /// Runner backed by the process environment
    pub fn new(tool: T) -> Self {
        Self::with_env(tool, ProcessEnv)
    }
}

impl<T: BuildTool, E: EnvStore> ToolRunner<T, E> {
    /// Runner backed by the given environment store
    pub fn with_env(tool: T, env: E) -> Self {
        Self {
            tool,
            env,
            arg_parser: None,
            args: None,
            add_standard_build_args: true,
            stage: Stage::Uninitialized,
        }
    }

    /// Whether to register `--build_root`, `--compiler_type` and `--thirdparty_dir`
    pub fn with_standard_build_args(mut self, enabled: bool) -> Self {
        self.add_standard_build_args = enabled;
        self
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut T {
        &mut self.tool
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn arg_parser(&self) -> Option<&Command> {
        self.arg_parser.as_ref()
    }

    pub fn args(&self) -> Option<&ParsedArguments> {
        self.args.as_ref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the tool with the process's command-line arguments
    pub fn run(&mut self) -> Result<(), ToolError> {
        self.run_from(std::env::args_os())
    }

    /// Run the tool with the given arguments, program name first
    pub fn run_from<I, S>(&mut self, argv: I) -> Result<(), ToolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        self.create_arg_parser()?;
        self.parse_args_from(argv)?;
        self.validate_and_process_args()?;
        self.run_impl()
    }

    /// Build the argument parser. May only be called once.
    pub fn create_arg_parser(&mut self) -> Result<(), ToolError> {
        if self.arg_parser.is_some() {
            return Err(ToolError::ParserAlreadyCreated);
        }

        // A repeated option keeps its last value
        let mut cmd = self
            .tool
            .configure_parser(Command::new(self.tool.name()).args_override_self(true));
        if self.add_standard_build_args {
            cmd = cmd
                .arg(self.standard_arg(
                    BUILD_ROOT_ARG,
                    BUILD_ROOT,
                    "DIR",
                    "YugabyteDB build root directory",
                ))
                .arg(self.standard_arg(
                    COMPILER_TYPE_ARG,
                    YB_COMPILER_TYPE,
                    "TYPE",
                    "Compiler type, e.g. gcc or clang",
                ))
                .arg(self.standard_arg(
                    THIRDPARTY_DIR_ARG,
                    YB_THIRDPARTY_DIR,
                    "DIR",
                    "YugabyteDB third-party dependencies directory",
                ));
        }
        let cmd = self.tool.add_command_line_args(cmd);

        debug!(
            tool = self.tool.name(),
            standard_args = self.add_standard_build_args,
            "created argument parser"
        );
        self.arg_parser = Some(cmd);
        self.stage = Stage::ParserCreated;
        Ok(())
    }

    /// `--<id>` option defaulting to the current value of `var`
    fn standard_arg(
        &self,
        id: &'static str,
        var: &'static str,
        value_name: &'static str,
        help: &'static str,
    ) -> Arg {
        let arg = Arg::new(id)
            .long(id)
            .value_name(value_name)
            .help(format!("{help} [env: {var}]"));
        match self.env.get(var) {
            Some(default) => arg.default_value(default),
            None => arg,
        }
    }

    /// Parse the process's command-line arguments
    pub fn parse_args(&mut self) -> Result<(), ToolError> {
        self.parse_args_from(std::env::args_os())
    }

    /// Parse the given arguments, program name first
    pub fn parse_args_from<I, S>(&mut self, argv: I) -> Result<(), ToolError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let cmd = match (self.stage, self.arg_parser.as_ref()) {
            (Stage::ParserCreated, Some(cmd)) => cmd,
            (stage, _) => {
                return Err(ToolError::OutOfOrder {
                    operation: "parse arguments",
                    stage,
                })
            }
        };

        let matches = cmd.clone().try_get_matches_from(argv)?;
        let args = ParsedArguments::from_matches(cmd, matches);
        for (name, value) in args.iter() {
            debug!(option = name, value = ?value, "parsed option");
        }

        self.args = Some(args);
        self.stage = Stage::ArgumentsParsed;
        Ok(())
    }

    /// Reconcile `--build_root` with the `BUILD_ROOT` environment variable and
    /// export the result. A no-op when the standard arguments were not
    /// registered. Safe to repeat once the state is consistent.
    pub fn validate_and_process_args(&mut self) -> Result<(), ToolError> {
        let args = match (self.stage, self.args.as_ref()) {
            (Stage::ArgumentsParsed | Stage::Validated, Some(args)) => args,
            (stage, _) => {
                return Err(ToolError::OutOfOrder {
                    operation: "validate arguments",
                    stage,
                })
            }
        };

        if args.contains(BUILD_ROOT_ARG) {
            let from_env = self.env.get_os(BUILD_ROOT);
            let Some(build_root) = args.build_root() else {
                return Err(match from_env {
                    Some(value) if value.to_str().is_none() => ToolError::NonUnicodeEnv {
                        var: BUILD_ROOT,
                        value: value.to_string_lossy().into_owned(),
                    },
                    _ => ToolError::BuildRootNotSpecified,
                });
            };

            match from_env {
                Some(from_env) if from_env.as_os_str() != OsStr::new(build_root) => {
                    return Err(ToolError::BuildRootConflict {
                        env: from_env.to_string_lossy().into_owned(),
                        option: build_root.to_string(),
                    });
                }
                Some(_) => {}
                None => info!(build_root, "exporting BUILD_ROOT"),
            }
            self.env.set(BUILD_ROOT, build_root);
        }

        self.stage = Stage::Validated;
        Ok(())
    }

    /// Hand over to the tool
    pub fn run_impl(&mut self) -> Result<(), ToolError> {
        let args = match (self.stage, self.args.as_ref()) {
            (Stage::Validated, Some(args)) => args,
            (stage, _) => {
                return Err(ToolError::OutOfOrder {
                    operation: "run the tool",
                    stage,
                })
            }
        };

        debug!(tool = self.tool.name(), "running tool");
        self.tool.run_impl(args)?;
        self.stage = Stage::Executed;
        Ok(())
    }
}
