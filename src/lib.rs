//! Base lifecycle for YugabyteDB command-line build tools
//!
//! A tool implements [`BuildTool`] and is driven by a [`ToolRunner`], which
//! builds the argument parser (with the standard `--build_root`,
//! `--compiler_type` and `--thirdparty_dir` options), parses the command line,
//! reconciles the build root with the `BUILD_ROOT` environment variable and
//! finally calls the tool's `run_impl`.
//!
//! ```text
//! ToolRunner → BuildTool::configure_parser / add_command_line_args
//!            → clap → ParsedArguments → validation (EnvStore) → BuildTool::run_impl
//! ```

pub mod args;
pub mod env;
pub mod error;
pub mod logging;
pub mod runner;
pub mod show_env;
pub mod tool;

pub use args::{ParsedArguments, StandardBuildArgs};
pub use env::{EnvStore, MemoryEnv, ProcessEnv};
pub use error::ToolError;
pub use runner::{Stage, ToolRunner};
pub use tool::BuildTool;
