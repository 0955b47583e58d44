// Fri Oct 16 2026 - Alex

pub mod config;
pub mod context;
pub mod locator;
pub mod platform;
pub mod reconcile;
pub mod runner;
pub mod scope;
pub mod source;
pub mod strategy;
pub mod structure;
pub mod visitor;
pub mod walker;

pub use config::Config;
pub use context::{Context, ContextError};
pub use locator::{Identity, Locator};
pub use platform::{Oracle, Platform};
pub use runner::Cli;
pub use strategy::{Builder, Strategy, StrategyError};
pub use structure::{Field, Hierarchic, Struct};
pub use walker::{Walker, WalkerBuilder, WalkerError};
