// Fri Oct 16 2026 - Alex

use clap::Parser;
use colored::Colorize;
use layout_curator::{
    config::Config,
    context::Context,
    runner::{cancel_on_interrupt, Cli},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Struct layout curator for Go packages", long_about = None)]
struct Args {
    /// Walker: json_std, json_files, ast_std, ast_go or ast_copy
    walker: String,

    /// Package directory
    package: PathBuf,

    /// Strategies applied in order
    #[arg(required = true)]
    strategies: Vec<String>,

    #[arg(long)]
    compiler: Option<String>,

    #[arg(long)]
    arch: Option<String>,

    /// Cache line sizes for L1, L2 and L3
    #[arg(long, value_delimiter = ',')]
    cache_lines: Vec<i64>,

    /// Only structures whose name matches are curated
    #[arg(long)]
    regex: Option<String>,

    /// Also curate structures declared in function bodies
    #[arg(long)]
    deep: bool,

    /// Size named struct fields by their curated layout
    #[arg(long)]
    backref: bool,

    /// Load sub-packages too
    #[arg(long)]
    recursive: bool,

    #[arg(long)]
    tag_group: Option<String>,

    /// soft, force, discrete or force_discrete
    #[arg(long)]
    tag_type: Option<String>,

    /// Spaces per level, tabs are turned off when set
    #[arg(long)]
    indent: Option<usize>,

    #[arg(long)]
    use_tabs: bool,

    /// Seconds before the run is cancelled, 0 disables
    #[arg(long)]
    timeout: Option<i64>,

    #[arg(long, default_value = "warn")]
    log_level: String,

    /// JSON config file, flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

fn setup_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn config(args: Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.walker = args.walker;
    config.package = args.package;
    config.strategies = args.strategies;
    config.log_level = args.log_level;
    if let Some(compiler) = args.compiler {
        config.compiler = compiler;
    }
    if let Some(arch) = args.arch {
        config.arch = arch;
    }
    if !args.cache_lines.is_empty() {
        config.cache_lines = args.cache_lines;
    }
    if let Some(regex) = args.regex {
        config.regex = regex;
    }
    config.deep |= args.deep;
    config.backref |= args.backref;
    config.recursive |= args.recursive;
    if let Some(group) = args.tag_group {
        config.tag_group = group;
    }
    if let Some(tag_type) = args.tag_type {
        config.tag_type = tag_type;
    }
    if let Some(indent) = args.indent {
        config.print.indent = indent;
        config.print.use_tabs = false;
    }
    if args.use_tabs {
        config.print.use_tabs = true;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_seconds = timeout;
    }
    Ok(config)
}

fn main() {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let start_time = Instant::now();
    let cli = match config(args).and_then(Cli::new) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{} {:#}", "[!]".red(), e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "{} Curating {} with {}",
        "[*]".blue(),
        cli.config().package.display(),
        cli.config().strategies.join(", ")
    );

    let ctx = Context::background();
    if let Err(e) = cancel_on_interrupt(&ctx) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }

    if let Err(e) = cli.run(&ctx) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }

    eprintln!(
        "{} Done in {:.2}s",
        "[+]".green(),
        start_time.elapsed().as_secs_f64()
    );
}
