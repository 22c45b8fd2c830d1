//! yb-build-tool - show the build configuration YugabyteDB build tools resolve
//!
//! Runs [`ShowEnvTool`] through the standard build tool lifecycle.

use yb_build_tool::logging::init_logging;
use yb_build_tool::show_env::ShowEnvTool;
use yb_build_tool::{ToolError, ToolRunner};

/// Environment variable that turns on debug logging like `--verbose`
const VERBOSE_VAR: &str = "YB_BUILD_TOOL_VERBOSE";

fn verbose_requested() -> bool {
    let from_env = std::env::var(VERBOSE_VAR)
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false);
    from_env
        || std::env::args_os()
            .skip(1)
            .any(|arg| arg == "-v" || arg == "--verbose")
}

fn main() {
    init_logging(verbose_requested());

    let mut runner = ToolRunner::new(ShowEnvTool::new());
    match runner.run() {
        Ok(()) => {}
        Err(ToolError::Usage(err)) => err.exit(),
        Err(err) => {
            err.display_with_hints();
            std::process::exit(err.exit_code());
        }
    }
}
