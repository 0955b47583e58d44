// Fri Oct 16 2026 - Alex

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("context cancelled")]
    Cancelled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cooperative cancellation handle shared by every task of a run.
///
/// Cancelling a context cancels all contexts derived from it, never the
/// other way around.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
    parent: Option<Context>,
}

impl Context {
    pub fn background() -> Self {
        Self {
            inner: Arc::new(ContextInner {
                cancelled: AtomicBool::new(false),
                deadline: None,
                parent: None,
            }),
        }
    }

    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                cancelled: AtomicBool::new(false),
                deadline: None,
                parent: Some(self.clone()),
            }),
        }
    }

    /// Child context that expires after `timeout`; a timeout past the
    /// representable range never expires.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                cancelled: AtomicBool::new(false),
                deadline: Instant::now().checked_add(timeout),
                parent: Some(self.clone()),
            }),
        }
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn err(&self) -> Option<ContextError> {
        if self.inner.cancelled.load(Ordering::SeqCst) {
            return Some(ContextError::Cancelled);
        }
        if let Some(deadline) = self.inner.deadline {
            if Instant::now() >= deadline {
                return Some(ContextError::DeadlineExceeded);
            }
        }
        self.inner.parent.as_ref().and_then(|parent| parent.err())
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    pub fn check(&self) -> Result<(), ContextError> {
        match self.err() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("err", &self.err()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_propagates_to_children() {
        let root = Context::background();
        let child = root.child();
        assert!(child.check().is_ok());

        root.cancel();
        assert_eq!(child.err(), Some(ContextError::Cancelled));
    }

    #[test]
    fn test_child_cancel_does_not_touch_parent() {
        let root = Context::background();
        let child = root.child();
        child.cancel();

        assert!(child.is_done());
        assert!(!root.is_done());
    }

    #[test]
    fn test_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_millis(0));
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[test]
    fn test_huge_timeout_never_expires() {
        let root = Context::background();
        let ctx = root.with_timeout(Duration::from_secs(i64::MAX as u64));
        assert!(ctx.check().is_ok());
        root.cancel();
        assert_eq!(ctx.err(), Some(ContextError::Cancelled));
    }
}
