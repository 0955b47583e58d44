// Fri Oct 16 2026 - Alex

use crate::config::Config;
use crate::context::Context;
use crate::platform::{Oracle, Platform};
use crate::source::{DirParser, PackageParser};
use crate::strategy::{builder::is_tag_strategy, Builder, Strategy};
use crate::walker::{Curation, Walker, WalkerBuilder, Writer};
use anyhow::{anyhow, Context as _, Result};
use log::{debug, info, warn};
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

/// Cancels `ctx` when the process is interrupted, letting started writes
/// finish instead of dying mid-file.
pub fn cancel_on_interrupt(ctx: &Context) -> Result<()> {
    ctrlc::set_handler(interrupt_handler(ctx.clone())).context("can't install interrupt handler")
}

fn interrupt_handler(ctx: Context) -> impl FnMut() + Send + 'static {
    move || {
        warn!("interrupted, cancelling the run");
        ctx.cancel();
    }
}

/// Wires a validated configuration into a ready to run walker.
pub struct Cli {
    config: Config,
    regex: Regex,
    strategy: Arc<dyn Strategy>,
    walker: Box<dyn Walker>,
    pool: rayon::ThreadPool,
}

impl Cli {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_stream(config, Writer::stdout())
    }

    /// Same as `new`, with `*_std` walkers printing to `stream`.
    pub fn with_stream(config: Config, stream: Writer) -> Result<Self> {
        config.validate().map_err(|err| anyhow!("invalid configuration: {}", err))?;

        let oracle: Arc<dyn Oracle> = Arc::new(
            Platform::new(&config.compiler, &config.arch, &config.cache_lines)
                .context("can't build target platform")?,
        );
        let parser: Arc<dyn PackageParser> = Arc::new(DirParser::new(&config.package, config.recursive));
        let regex = Regex::new(&config.regex).with_context(|| format!("invalid regex {:?}", config.regex))?;

        let mut names = config.strategies.clone();
        if let Some(tag) = config.tag_strategy() {
            if !names.iter().any(|name| is_tag_strategy(name)) {
                names.push(tag.to_string());
            }
        }
        let pipe = Builder::new(Arc::clone(&oracle), config.tag_group.clone())
            .build(&names)
            .context("can't build strategy pipe")?;
        debug!("strategy pipe: {}", names.join(" -> "));

        let curation = Curation {
            parser,
            oracle,
            deep: config.deep,
            backref: config.backref,
        };
        let walker = WalkerBuilder::new(curation, config.print)
            .with_stream(stream)
            .build(&config.walker)?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_threads)
            .build()
            .context("can't build worker pool")?;

        Ok(Self {
            config,
            regex,
            strategy: Arc::new(pipe),
            walker,
            pool,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the walker under `ctx`, bounded by the configured timeout.
    pub fn run(&self, ctx: &Context) -> Result<()> {
        let ctx = if self.config.timeout_seconds > 0 {
            ctx.with_timeout(Duration::from_secs(self.config.timeout_seconds as u64))
        } else {
            ctx.child()
        };
        info!(
            "running walker {} on {} with {} worker threads",
            self.config.walker,
            self.config.package.display(),
            self.config.max_threads
        );
        let result = self
            .pool
            .install(|| self.walker.visit(&ctx, &self.regex, Arc::clone(&self.strategy)));
        ctx.cancel();
        result.with_context(|| {
            format!(
                "walker {} failed on package {}",
                self.config.walker,
                self.config.package.display()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::writer::tests::Buffer;
    use std::fs;
    use tempfile::TempDir;

    const SRC: &str = "package demo\n\ntype A struct {\n\ta bool\n\tb int64\n\tc bool\n}\n";

    fn config(dir: &std::path::Path, walker: &str, strategies: &[&str]) -> Config {
        Config::new()
            .with_walker(walker)
            .with_package(dir)
            .with_strategies(strategies.iter().copied())
    }

    #[test]
    fn test_interrupt_cancels_run() {
        let root = Context::background();
        let run = root.child();
        let mut handler = interrupt_handler(root.clone());
        assert!(run.check().is_ok());
        handler();
        assert_eq!(run.err(), Some(crate::context::ContextError::Cancelled));
    }

    #[test]
    fn test_huge_timeout_runs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.go"), SRC).unwrap();
        let buffer = Buffer::default();
        let cli = Cli::with_stream(
            config(tmp.path(), "json_std", &["ignore"]).with_timeout(i64::MAX),
            buffer.writer(),
        )
        .unwrap();
        cli.run(&Context::background()).unwrap();
        assert!(buffer.text().contains("\"A\""));
    }

    #[test]
    fn test_invalid_config() {
        let tmp = TempDir::new().unwrap();
        assert!(Cli::new(config(tmp.path(), "xml", &["memory_pack"])).is_err());
        assert!(Cli::new(config(tmp.path(), "json_std", &["no_such_strategy"])).is_err());
        assert!(Cli::new(config(tmp.path(), "json_std", &["memory_pack"]).with_target("gc", "z80")).is_err());
    }

    #[test]
    fn test_run_json_std() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.go"), SRC).unwrap();
        let buffer = Buffer::default();
        let cli = Cli::with_stream(config(tmp.path(), "json_std", &["memory_pack"]), buffer.writer()).unwrap();
        cli.run(&Context::background()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&buffer.text()).unwrap();
        assert_eq!(value[0]["name"], "A");
        assert_eq!(value[0]["fields"][0]["name"], "b");
        assert_eq!(value[0]["size"], 16);
    }

    #[test]
    fn test_run_with_tags_and_cancel() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.go"), SRC).unwrap();
        let buffer = Buffer::default();
        let cli = Cli::with_stream(
            config(tmp.path(), "ast_std", &["memory_pack"]).with_tags("force", "hot"),
            buffer.writer(),
        )
        .unwrap();
        cli.run(&Context::background()).unwrap();
        assert!(buffer.text().contains("curator:\"group:hot;memory_pack\""));

        let cancelled = Context::background();
        cancelled.cancel();
        assert!(cli.run(&cancelled).is_err());
    }
}
