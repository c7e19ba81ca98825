//! Load state tracking for fetched resources.
//!
//! Provides [`LoadState`] and [`LoadHandle`] for tracking a single
//! asynchronous load: `Loading` until the read settles, then `Ready` or
//! `Failed`. A handle belongs to one mounted view. Unmounting invalidates any
//! outstanding [`LoadTicket`], so a read that completes afterwards is
//! discarded instead of updating state nobody is watching.
//!
//! # Usage
//!
//! ```rust
//! use vitrine_core::load::{LoadHandle, LoadState};
//!
//! let handle: LoadHandle<Vec<u32>> = LoadHandle::new("zkvms");
//! assert!(handle.state().is_loading());
//!
//! let ticket = handle.begin();
//! assert!(handle.resolve(ticket, Ok::<_, String>(vec![1, 2, 3])));
//! assert!(handle.state().is_ready());
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;

// ============================================================================
// LoadState
// ============================================================================

/// State of a resource load.
#[derive(Debug)]
pub enum LoadState<T> {
    /// Read issued, not yet settled.
    Loading,
    /// Read succeeded.
    Ready(Arc<T>),
    /// Read failed; the message is shown to the user as-is.
    Failed(String),
}

impl<T> Clone for LoadState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Ready(data) => Self::Ready(Arc::clone(data)),
            Self::Failed(message) => Self::Failed(message.clone()),
        }
    }
}

impl<T> LoadState<T> {
    /// Returns `true` while the read is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` once data is available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns `true` if the read failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The loaded data, if ready.
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// The failure message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> fmt::Display for LoadState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Ready(_) => write!(f, "ready"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

// ============================================================================
// LoadHandle
// ============================================================================

/// Proof that a load was started under a particular mount.
///
/// Only the ticket from the most recent [`LoadHandle::begin`] can settle the
/// handle, and only while the view is still mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Thread-safe handle for observing and settling a load.
///
/// Cheap to clone (Arc internals). State changes are broadcast to all
/// subscribers via a watch channel.
pub struct LoadHandle<T> {
    inner: Arc<LoadHandleInner<T>>,
}

struct LoadHandleInner<T> {
    name: String,
    tx: watch::Sender<LoadState<T>>,
    generation: Mutex<u64>,
    created_at: Instant,
}

impl<T> Clone for LoadHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> LoadHandle<T> {
    /// Create a new handle for the named resource.
    ///
    /// Initial state is [`LoadState::Loading`].
    pub fn new(name: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(LoadState::Loading);
        Self {
            inner: Arc::new(LoadHandleInner {
                name: name.into(),
                tx,
                generation: Mutex::new(0),
                created_at: Instant::now(),
            }),
        }
    }

    /// Get the resource name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the current load state.
    pub fn state(&self) -> LoadState<T> {
        self.inner.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.inner.tx.subscribe()
    }

    /// Start a load: resets state to `Loading` and returns the only ticket
    /// that may settle it.
    pub fn begin(&self) -> LoadTicket {
        let mut generation = self
            .inner
            .generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *generation += 1;
        self.inner.tx.send_replace(LoadState::Loading);
        log::debug!("Load '{}' started", self.inner.name);
        LoadTicket {
            generation: *generation,
        }
    }

    /// Settle the load with the outcome of the read.
    ///
    /// Returns `false` (and leaves state untouched) when the ticket is stale:
    /// the view was unmounted or a newer load was started.
    pub fn resolve<E: fmt::Display>(&self, ticket: LoadTicket, result: Result<T, E>) -> bool {
        let generation = self
            .inner
            .generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *generation != ticket.generation {
            log::debug!("Load '{}' settled after unmount, ignored", self.inner.name);
            return false;
        }

        let state = match result {
            Ok(data) => LoadState::Ready(Arc::new(data)),
            Err(e) => {
                log::warn!("Load '{}' failed: {e}", self.inner.name);
                LoadState::Failed(e.to_string())
            }
        };
        log::info!("Load '{}' → {state}", self.inner.name);
        self.inner.tx.send_replace(state);
        true
    }

    /// Detach the view: every outstanding ticket becomes stale.
    pub fn unmount(&self) {
        let mut generation = self
            .inner
            .generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *generation += 1;
        log::debug!("Load '{}' unmounted", self.inner.name);
    }

    /// Wait until the load is Ready or Failed, or the timeout elapses.
    pub async fn wait_settled(&self, timeout: Duration) -> Result<Arc<T>, String> {
        let mut rx = self.subscribe();
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        // Check current state first
        {
            let state = rx.borrow_and_update().clone();
            match state {
                LoadState::Ready(data) => return Ok(data),
                LoadState::Failed(message) => return Err(message),
                LoadState::Loading => {}
            }
        }

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    return Err(format!(
                        "Load '{}' not settled after {timeout:?}",
                        self.inner.name
                    ));
                }
                result = rx.changed() => {
                    if result.is_err() {
                        return Err(format!("Load '{}' channel closed", self.inner.name));
                    }
                    let state = rx.borrow().clone();
                    match state {
                        LoadState::Ready(data) => return Ok(data),
                        LoadState::Failed(message) => return Err(message),
                        LoadState::Loading => continue,
                    }
                }
            }
        }
    }

    /// Elapsed time since the handle was created.
    pub fn elapsed(&self) -> Duration {
        self.inner.created_at.elapsed()
    }
}

impl<T> fmt::Debug for LoadHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadHandle")
            .field("name", &self.inner.name)
            .field("state", &self.inner.tx.borrow().to_string())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_display() {
        assert_eq!(LoadState::<()>::Loading.to_string(), "loading");
        assert_eq!(LoadState::Ready(Arc::new(())).to_string(), "ready");
        assert_eq!(
            LoadState::<()>::Failed("HTTP 500".to_string()).to_string(),
            "failed: HTTP 500"
        );
    }

    #[test]
    fn test_load_state_accessors() {
        let ready = LoadState::Ready(Arc::new(7));
        assert!(ready.is_ready());
        assert_eq!(**ready.data().unwrap(), 7);
        assert!(ready.error().is_none());

        let failed = LoadState::<i32>::Failed("offline".to_string());
        assert!(failed.is_failed());
        assert_eq!(failed.error(), Some("offline"));
        assert!(failed.data().is_none());
    }

    #[test]
    fn test_handle_initial_state_is_loading() {
        let handle = LoadHandle::<Vec<u8>>::new("zkvms");
        assert_eq!(handle.name(), "zkvms");
        assert!(handle.state().is_loading());
    }

    #[test]
    fn test_resolve_ok_sets_ready() {
        let handle = LoadHandle::new("zkvms");
        let ticket = handle.begin();
        assert!(handle.resolve(ticket, Ok::<_, String>(vec!["sp1"])));
        let state = handle.state();
        assert_eq!(state.data().unwrap().as_slice(), &["sp1"]);
    }

    #[test]
    fn test_resolve_err_sets_failed_message() {
        let handle = LoadHandle::<Vec<u8>>::new("zkvms");
        let ticket = handle.begin();
        assert!(handle.resolve(ticket, Err("HTTP 404 Not Found")));
        assert_eq!(handle.state().error(), Some("HTTP 404 Not Found"));
    }

    #[test]
    fn test_resolve_after_unmount_is_noop() {
        let handle = LoadHandle::new("zkvms");
        let ticket = handle.begin();
        handle.unmount();
        assert!(!handle.resolve(ticket, Ok::<_, String>(1)));
        assert!(handle.state().is_loading());
    }

    #[test]
    fn test_stale_ticket_from_previous_begin_is_ignored() {
        let handle = LoadHandle::new("zkvms");
        let first = handle.begin();
        let second = handle.begin();
        assert!(!handle.resolve(first, Ok::<_, String>(1)));
        assert!(handle.resolve(second, Ok::<_, String>(2)));
        assert_eq!(**handle.state().data().unwrap(), 2);
    }

    #[test]
    fn test_clone_shares_state() {
        let h1 = LoadHandle::new("shared");
        let h2 = h1.clone();
        let ticket = h1.begin();
        h2.resolve(ticket, Ok::<_, String>("done"));
        assert!(h1.state().is_ready());
    }

    #[tokio::test]
    async fn test_wait_settled_ready() {
        let handle = LoadHandle::new("async");
        let h = handle.clone();
        let ticket = handle.begin();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.resolve(ticket, Ok::<_, String>(42));
        });

        let data = handle.wait_settled(Duration::from_secs(1)).await.unwrap();
        assert_eq!(*data, 42);
    }

    #[tokio::test]
    async fn test_wait_settled_failed() {
        let handle = LoadHandle::<u8>::new("broken");
        let h = handle.clone();
        let ticket = handle.begin();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            h.resolve(ticket, Err("connection refused"));
        });

        let err = handle.wait_settled(Duration::from_secs(1)).await.unwrap_err();
        assert!(err.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_wait_settled_timeout() {
        let handle = LoadHandle::<u8>::new("slow");
        handle.begin();
        let err = handle
            .wait_settled(Duration::from_millis(30))
            .await
            .unwrap_err();
        assert!(err.contains("not settled after"));
    }

    #[test]
    fn test_handle_debug() {
        let handle = LoadHandle::<u8>::new("debug-test");
        let debug = format!("{handle:?}");
        assert!(debug.contains("debug-test"));
        assert!(debug.contains("loading"));
    }

    // Compile-time check: LoadHandle must be Send + Sync
    fn _assert_send_sync<T: Send + Sync>() {}
    #[test]
    fn test_handle_send_sync() {
        _assert_send_sync::<LoadHandle<Vec<String>>>();
        _assert_send_sync::<LoadState<Vec<String>>>();
    }
}
