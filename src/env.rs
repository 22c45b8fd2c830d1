//! Environment variable access
//!
//! The runner reads option defaults from, and exports `BUILD_ROOT` to, an
//! [`EnvStore`]. Production code uses the process environment; tests use an
//! in-memory map so they never touch global state.

use std::collections::BTreeMap;
use std::ffi::OsString;

/// Build root directory variable
pub const BUILD_ROOT: &str = "BUILD_ROOT";

/// Compiler type variable (e.g. gcc, clang)
pub const YB_COMPILER_TYPE: &str = "YB_COMPILER_TYPE";

/// Third-party dependencies directory variable
pub const YB_THIRDPARTY_DIR: &str = "YB_THIRDPARTY_DIR";

/// Key-value view of the environment
pub trait EnvStore {
    /// Value of `key`, or None if unset or not valid UTF-8
    fn get(&self, key: &str) -> Option<String>;

    /// Raw value of `key`, or None only if unset
    fn get_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }

    /// Set `key` to `value`
    fn set(&mut self, key: &str, value: &str);
}

/// The real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn get_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// In-memory environment
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_memory_env() {
        let mut env: MemoryEnv = [(BUILD_ROOT, "/tmp/b")].into_iter().collect();
        assert_eq!(env.get(BUILD_ROOT).as_deref(), Some("/tmp/b"));
        assert_eq!(env.get(YB_COMPILER_TYPE), None);

        env.set(YB_COMPILER_TYPE, "clang");
        assert_eq!(env.get(YB_COMPILER_TYPE).as_deref(), Some("clang"));
        assert_eq!(env.len(), 2);

        assert_eq!(env.remove(BUILD_ROOT).as_deref(), Some("/tmp/b"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    #[serial]
    fn test_process_env_round_trip() {
        let key = "YB_BUILD_TOOL_TEST_PROCESS_ENV";
        let mut env = ProcessEnv;
        assert_eq!(env.get(key), None);

        env.set(key, "value");
        assert_eq!(env.get(key).as_deref(), Some("value"));
        assert_eq!(std::env::var(key).ok().as_deref(), Some("value"));

        std::env::remove_var(key);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_process_env_non_unicode_is_still_set() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let key = "YB_BUILD_TOOL_TEST_NON_UNICODE";
        let value = OsStr::from_bytes(b"/tmp/\xff");
        std::env::set_var(key, value);

        let env = ProcessEnv;
        assert_eq!(env.get(key), None);
        assert_eq!(env.get_os(key).as_deref(), Some(value));

        std::env::remove_var(key);
    }

    #[test]
    fn test_memory_env_get_os() {
        let env: MemoryEnv = [(BUILD_ROOT, "/tmp/b")].into_iter().collect();
        assert_eq!(env.get_os(BUILD_ROOT), Some(OsString::from("/tmp/b")));
        assert_eq!(env.get_os(YB_THIRDPARTY_DIR), None);
    }
}
