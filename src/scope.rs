//! Cancellable owning scope.
//!
//! A [`Scope`] bounds the lifetime of every container started on it.
//! Cancelling a scope terminates those containers and cascades to every
//! child scope; there is no way to un-cancel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Lightweight, cloneable handle on a cancellation scope.
///
/// Clones share the same state: cancelling any clone cancels them all.
#[derive(Clone, Default)]
pub struct Scope {
    inner: Arc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    cancelled: AtomicBool,
    notify: Notify,
    children: Mutex<Vec<Weak<ScopeInner>>>,
}

impl ScopeInner {
    fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
            let children = std::mem::take(&mut *self.children.lock());
            for child in children.iter().filter_map(Weak::upgrade) {
                child.cancel();
            }
        }
    }
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope that is cancelled together with this one.
    ///
    /// Cancelling the child leaves the parent untouched.
    pub fn child(&self) -> Scope {
        let child = Scope::new();
        let mut children = self.inner.children.lock();
        if self.is_cancelled() {
            drop(children);
            child.cancel();
        } else {
            children.retain(|weak| weak.strong_count() > 0);
            children.push(Arc::downgrade(&child.inner));
        }
        child
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.is_cancelled() {
            tracing::debug!("Scope cancelled");
        }
        self.inner.cancel();
    }

    /// Check if the scope has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        // Register with Notify before checking the flag: a cancel() landing
        // between the check and the await would otherwise be missed.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
