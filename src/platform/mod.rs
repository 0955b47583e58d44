// Fri Oct 16 2026 - Alex

pub mod error;
pub mod oracle;
pub mod sizes;

pub use error::PlatformError;
pub use oracle::{Oracle, Platform, DEFAULT_CACHE_LINE};
pub use sizes::StdSizes;
