//! Error types and helpers for user-friendly error messages
//!
//! Errors fall into three groups: programmer errors (a build tool misusing the
//! runner), validation errors (inconsistent build configuration) and argument
//! syntax errors reported by clap. Tool failures from `run_impl` are wrapped
//! as-is.

use thiserror::Error;

use crate::runner::Stage;

/// Exit code used for internal misuse of the runner (EX_SOFTWARE).
pub const PROGRAMMER_ERROR_EXIT_CODE: i32 = 70;

/// Errors produced while driving a build tool through its lifecycle
#[derive(Error, Debug)]
pub enum ToolError {
    /// The argument parser was created a second time
    #[error("argument parser has already been created")]
    ParserAlreadyCreated,

    /// A lifecycle operation was invoked in the wrong stage
    #[error("cannot {operation} while the tool runner is in stage '{stage}'")]
    OutOfOrder {
        operation: &'static str,
        stage: Stage,
    },

    /// The tool did not provide a `run_impl`
    #[error("{tool} does not implement run_impl")]
    NotImplemented { tool: String },

    /// Neither `--build_root` nor `BUILD_ROOT` supplied a build root
    #[error("--build_root (or BUILD_ROOT environment variable) not specified")]
    BuildRootNotSpecified,

    /// `--build_root` disagrees with the `BUILD_ROOT` environment variable
    #[error(
        "The BUILD_ROOT environment variable is {env} but the --build_root option \
         was specified as {option}"
    )]
    BuildRootConflict { env: String, option: String },

    /// An environment variable is set to something that is not valid UTF-8
    #[error("The {var} environment variable is set but is not valid UTF-8: {value}")]
    NonUnicodeEnv { var: &'static str, value: String },

    /// Tool-specific validation failure
    #[error("{message}")]
    Invalid {
        message: String,
        hint: Option<String>,
    },

    /// Malformed command line, or a help/version request
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// Failure inside the tool implementation
    #[error(transparent)]
    Tool(#[from] anyhow::Error),
}

impl ToolError {
    /// Create a tool-specific validation error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a tool-specific validation error with a hint
    pub fn invalid_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Whether this error signals a defect in the build tool rather than bad input
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            ToolError::ParserAlreadyCreated
                | ToolError::OutOfOrder { .. }
                | ToolError::NotImplemented { .. }
        )
    }

    /// Whether this error comes from reconciling the build configuration
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ToolError::BuildRootNotSpecified
                | ToolError::BuildRootConflict { .. }
                | ToolError::NonUnicodeEnv { .. }
                | ToolError::Invalid { .. }
        )
    }

    /// Actionable hint for the user, if there is one
    pub fn hint(&self) -> Option<String> {
        match self {
            ToolError::BuildRootNotSpecified => Some(hints::build_root_not_specified().to_string()),
            ToolError::BuildRootConflict { .. } => Some(hints::build_root_conflict().to_string()),
            ToolError::NonUnicodeEnv { var, .. } => Some(format!(
                "Export {var} as a UTF-8 path, or unset it and pass the option instead."
            )),
            ToolError::Invalid { hint, .. } => hint.clone(),
            ToolError::NotImplemented { .. } => Some(hints::not_implemented().to_string()),
            _ => None,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::Usage(e) => e.exit_code(),
            e if e.is_programmer_error() => PROGRAMMER_ERROR_EXIT_CODE,
            _ => 1,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        if self.is_programmer_error() {
            eprintln!("\n{} {}", style("INTERNAL ERROR:").red().bold(), self);
        } else {
            eprintln!("\n{} {}", style("ERROR:").red().bold(), self);
        }

        if let ToolError::Tool(err) = self {
            for cause in err.chain().skip(1) {
                eprintln!("  {} {}", style("caused by:").dim(), cause);
            }
        }

        if let Some(h) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    pub fn build_root_not_specified() -> &'static str {
        "Pass --build_root <DIR> or export BUILD_ROOT, e.g.:\n\
         • BUILD_ROOT=$PWD/build/debug-clang-dynamic <tool> ...\n\
         • <tool> --build_root build/release-gcc-dynamic ..."
    }

    pub fn build_root_conflict() -> &'static str {
        "Either drop --build_root and rely on BUILD_ROOT, or unset BUILD_ROOT \
         (or set it to the same directory) before running the tool."
    }

    pub fn not_implemented() -> &'static str {
        "This is a bug in the build tool: implement BuildTool::run_impl."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_both_values() {
        let err = ToolError::BuildRootConflict {
            env: "/tmp/y".to_string(),
            option: "/tmp/x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x"));
        assert!(msg.contains("/tmp/y"));
        assert!(err.is_validation_error());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_programmer_errors() {
        assert!(ToolError::ParserAlreadyCreated.is_programmer_error());
        assert!(ToolError::NotImplemented { tool: "t".into() }.is_programmer_error());
        assert!(!ToolError::BuildRootNotSpecified.is_programmer_error());
        let err = ToolError::OutOfOrder {
            operation: "run the tool",
            stage: Stage::ArgumentsParsed,
        };
        assert_eq!(
            err.to_string(),
            "cannot run the tool while the tool runner is in stage 'arguments parsed'"
        );
        assert_eq!(err.exit_code(), PROGRAMMER_ERROR_EXIT_CODE);
    }

    #[test]
    fn test_hints() {
        assert!(ToolError::BuildRootNotSpecified.hint().is_some());
        assert!(ToolError::invalid("bad").hint().is_none());
        assert_eq!(
            ToolError::invalid_with_hint("bad", "fix it").hint().as_deref(),
            Some("fix it")
        );
        assert!(ToolError::ParserAlreadyCreated.hint().is_none());

        let err = ToolError::NonUnicodeEnv {
            var: "BUILD_ROOT",
            value: "/tmp/\u{fffd}".to_string(),
        };
        assert!(err.is_validation_error());
        assert!(err.hint().unwrap().contains("BUILD_ROOT"));
    }
}
