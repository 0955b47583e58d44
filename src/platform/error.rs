// Fri Oct 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("unsupported compiler {compiler} and architecture {arch} combination")]
    Unsupported { compiler: String, arch: String },
    #[error("at most 3 cache line levels can be configured, got {0}")]
    TooManyCacheLines(usize),
}
