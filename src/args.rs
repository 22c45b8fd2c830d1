//! Parsed command-line arguments

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{ArgMatches, Command};
use serde::Serialize;

/// Option id of `--build_root`
pub const BUILD_ROOT_ARG: &str = "build_root";

/// Option id of `--compiler_type`
pub const COMPILER_TYPE_ARG: &str = "compiler_type";

/// Option id of `--thirdparty_dir`
pub const THIRDPARTY_DIR_ARG: &str = "thirdparty_dir";

/// Result of parsing the command line.
///
/// Every registered value-taking option has an entry, holding `None` when it
/// was neither given nor defaulted. An option that was never registered has no
/// entry at all, which is how validation tells "standard arguments disabled"
/// apart from "build root missing".
#[derive(Debug, Clone)]
pub struct ParsedArguments {
    values: BTreeMap<String, Option<String>>,
    matches: ArgMatches,
}

impl ParsedArguments {
    /// Collect the values of all value-taking options of `cmd` from `matches`
    pub fn from_matches(cmd: &Command, matches: ArgMatches) -> Self {
        let values = cmd
            .get_arguments()
            .filter(|arg| arg.get_action().takes_values())
            .map(|arg| {
                let id = arg.get_id().as_str();
                let value = matches
                    .try_get_raw(id)
                    .ok()
                    .flatten()
                    .and_then(|raw| raw.last())
                    .and_then(|v| v.to_str())
                    .map(str::to_string);
                (id.to_string(), value)
            })
            .collect();

        Self { values, matches }
    }

    /// Whether the option `name` was registered with the parser
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Resolved value of `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    /// Overwrite the value of `name`, registering it if needed
    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        self.values.insert(name.into(), value);
    }

    pub fn build_root(&self) -> Option<&str> {
        self.get(BUILD_ROOT_ARG)
    }

    pub fn compiler_type(&self) -> Option<&str> {
        self.get(COMPILER_TYPE_ARG)
    }

    pub fn thirdparty_dir(&self) -> Option<&str> {
        self.get(THIRDPARTY_DIR_ARG)
    }

    /// Raw clap matches, for typed access to tool-specific options
    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    /// Option ids and values, in id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Typed view of the standard build arguments, once a build root is known
    pub fn standard(&self) -> Option<StandardBuildArgs> {
        let build_root = self.build_root()?;
        Some(StandardBuildArgs {
            build_root: PathBuf::from(build_root),
            compiler_type: self.compiler_type().map(str::to_string),
            thirdparty_dir: self.thirdparty_dir().map(PathBuf::from),
        })
    }
}

/// The options every build tool in the family accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardBuildArgs {
    pub build_root: PathBuf,
    pub compiler_type: Option<String>,
    pub thirdparty_dir: Option<PathBuf>,
}
