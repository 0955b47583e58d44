// Fri Oct 16 2026 - Alex

use crate::platform::sizes::compilers;
use crate::source::PrintOptions;
use crate::walker::WALKER_NAMES;
use anyhow::Context as _;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tag generation modes and the strategy each one appends to the pipe.
pub const TAG_TYPES: &[(&str, &str)] = &[
    ("soft", "add_tag_group_soft"),
    ("force", "add_tag_group_force"),
    ("discrete", "add_tag_group_discrete"),
    ("force_discrete", "add_tag_group_force_discrete"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub walker: String,
    pub package: PathBuf,
    pub strategies: Vec<String>,
    pub compiler: String,
    pub arch: String,
    /// L1, L2 and L3 line sizes in bytes, missing levels default to 64.
    pub cache_lines: Vec<i64>,
    pub regex: String,
    pub deep: bool,
    pub backref: bool,
    pub recursive: bool,
    pub tag_group: String,
    /// Empty or `none` disables tag generation.
    pub tag_type: String,
    pub print: PrintOptions,
    /// Zero or less disables the deadline.
    pub timeout_seconds: i64,
    pub max_threads: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            walker: String::new(),
            package: PathBuf::new(),
            strategies: Vec::new(),
            compiler: "gc".to_string(),
            arch: "amd64".to_string(),
            cache_lines: vec![64, 64, 64],
            regex: ".*".to_string(),
            deep: false,
            backref: false,
            recursive: false,
            tag_group: String::new(),
            tag_type: String::new(),
            print: PrintOptions::default(),
            timeout_seconds: 0,
            max_threads: num_cpus::get(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config file, absent keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("can't read config file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("can't parse config file {}", path.display()))
    }

    pub fn with_walker(mut self, walker: impl Into<String>) -> Self {
        self.walker = walker.into();
        self
    }

    pub fn with_package(mut self, package: impl Into<PathBuf>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_strategies<S: Into<String>>(mut self, strategies: impl IntoIterator<Item = S>) -> Self {
        self.strategies = strategies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target(mut self, compiler: impl Into<String>, arch: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self.arch = arch.into();
        self
    }

    pub fn with_cache_lines(mut self, lines: Vec<i64>) -> Self {
        self.cache_lines = lines;
        self
    }

    pub fn with_regex(mut self, regex: impl Into<String>) -> Self {
        self.regex = regex.into();
        self
    }

    pub fn with_deep(mut self, deep: bool) -> Self {
        self.deep = deep;
        self
    }

    pub fn with_backref(mut self, backref: bool) -> Self {
        self.backref = backref;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_tags(mut self, tag_type: impl Into<String>, tag_group: impl Into<String>) -> Self {
        self.tag_type = tag_type.into();
        self.tag_group = tag_group.into();
        self
    }

    pub fn with_print(mut self, print: PrintOptions) -> Self {
        self.print = print;
        self
    }

    pub fn with_timeout(mut self, seconds: i64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Strategy appended to the pipe for the configured tag type.
    pub fn tag_strategy(&self) -> Option<&'static str> {
        TAG_TYPES
            .iter()
            .find(|(name, _)| *name == self.tag_type)
            .map(|(_, strategy)| *strategy)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !WALKER_NAMES.contains(&self.walker.as_str()) {
            return Err(format!(
                "unknown walker {:?}, expected one of {}",
                self.walker,
                WALKER_NAMES.join(", ")
            ));
        }
        if self.package.as_os_str().is_empty() {
            return Err("package path must be set".to_string());
        }
        if self.strategies.is_empty() {
            return Err("at least one strategy must be set".to_string());
        }
        if !compilers().contains(&self.compiler.as_str()) {
            return Err(format!("unknown compiler {:?}", self.compiler));
        }
        if self.cache_lines.len() > 3 {
            return Err(format!("at most 3 cache lines can be set, got {}", self.cache_lines.len()));
        }
        if let Err(err) = Regex::new(&self.regex) {
            return Err(format!("invalid regex {:?}: {}", self.regex, err));
        }
        if !self.tag_type.is_empty() && self.tag_type != "none" && self.tag_strategy().is_none() {
            return Err(format!("unknown tag type {:?}", self.tag_type));
        }
        if !self.print.use_tabs && self.print.indent == 0 {
            return Err("indent must be greater than 0 when tabs are off".to_string());
        }
        if self.max_threads == 0 {
            return Err("max_threads must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn valid() -> Config {
        Config::new()
            .with_walker("json_std")
            .with_package("./pkg")
            .with_strategies(["memory_pack"])
    }

    #[test]
    fn test_validate() {
        assert!(valid().validate().is_ok());
        assert!(Config::new().validate().is_err());
        assert!(valid().with_walker("xml").validate().is_err());
        assert!(valid().with_strategies(Vec::<String>::new()).validate().is_err());
        assert!(valid().with_cache_lines(vec![1, 2, 3, 4]).validate().is_err());
        assert!(valid().with_regex("(").validate().is_err());
        assert!(valid().with_target("tcc", "amd64").validate().is_err());
        assert!(valid().with_tags("loud", "").validate().is_err());
        assert!(valid().with_tags("none", "").validate().is_ok());
        let spaces = PrintOptions {
            indent: 0,
            use_tabs: false,
        };
        assert!(valid().with_print(spaces).validate().is_err());
    }

    #[test]
    fn test_tag_strategy() {
        assert_eq!(valid().tag_strategy(), None);
        assert_eq!(valid().with_tags("force", "g").tag_strategy(), Some("add_tag_group_force"));
    }

    #[test]
    fn test_load_partial_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("curator.json");
        fs::write(&path, r#"{"walker": "ast_std", "deep": true, "print": {"indent": 2, "use_tabs": false}}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.walker, "ast_std");
        assert!(config.deep);
        assert_eq!(config.print.indent, 2);
        assert_eq!(config.regex, ".*");
        assert!(Config::load(&tmp.path().join("missing.json")).is_err());
    }
}
