//! Theme store
//!
//! Single source of truth for the active [`ThemeMode`]. The store is created
//! `Uninitialized`, reads persisted state once in [`ThemeStore::initialize`],
//! and is `Ready` for the rest of its life. Every mode change is written
//! through to storage and mirrored onto the document marker.

use crate::marker::DocumentMarker;
use crate::mode::ThemeMode;
use crate::palette::Palette;
use crate::storage::ThemeStorage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Storage key used unless overridden
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Store lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Persisted mode not read yet; theme-dependent content must not render
    Uninitialized,
    Ready(ThemeMode),
}

/// Handle returned by [`ThemeStore::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(ThemeMode) + Send + Sync>;

/// Theme state shared with every consumer through explicit context passing
pub struct ThemeStore {
    key: String,
    storage: Box<dyn ThemeStorage>,
    marker: Box<dyn DocumentMarker>,
    lifecycle: RwLock<Lifecycle>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
}

impl ThemeStore {
    pub fn new(
        storage: impl ThemeStorage + 'static,
        marker: impl DocumentMarker + 'static,
    ) -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            storage: Box::new(storage),
            marker: Box::new(marker),
            lifecycle: RwLock::new(Lifecycle::Uninitialized),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Use a different storage key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolve the initial mode: the persisted tag if it is valid, otherwise
    /// `default_mode`. Runs once; later calls return the current mode.
    pub fn initialize(&self, default_mode: ThemeMode) -> ThemeMode {
        let mut lifecycle = self.lifecycle.write().unwrap_or_else(PoisonError::into_inner);
        if let Lifecycle::Ready(mode) = *lifecycle {
            tracing::debug!(%mode, "ThemeStore already initialized");
            return mode;
        }

        let mode = match self.storage.read(&self.key) {
            Ok(Some(raw)) => match ThemeMode::from_tag(raw.trim()) {
                Some(mode) => mode,
                None => {
                    tracing::debug!(value = %raw, "ignoring invalid persisted theme");
                    default_mode
                }
            },
            Ok(None) => default_mode,
            Err(e) => {
                tracing::warn!(error = %e, "theme storage read failed, using default");
                default_mode
            }
        };

        *lifecycle = Lifecycle::Ready(mode);
        drop(lifecycle);

        self.marker.apply(mode);
        tracing::debug!(%mode, "ThemeStore ready");
        mode
    }

    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.lifecycle(), Lifecycle::Ready(_))
    }

    /// Current mode, or `None` before initialization
    pub fn mode(&self) -> Option<ThemeMode> {
        match self.lifecycle() {
            Lifecycle::Ready(mode) => Some(mode),
            Lifecycle::Uninitialized => None,
        }
    }

    /// Palette of the current mode, or `None` before initialization
    pub fn palette(&self) -> Option<Palette> {
        self.mode().map(Palette::for_mode)
    }

    /// Mount gate: runs `render` with the current mode once the store is
    /// ready, and renders nothing before that.
    pub fn render<R>(&self, render: impl FnOnce(ThemeMode) -> R) -> Option<R> {
        self.mode().map(render)
    }

    /// Flip to the other mode. Ignored before initialization.
    pub fn toggle(&self) -> Option<ThemeMode> {
        let next = self.mode()?.toggle();
        self.set_mode(next);
        Some(next)
    }

    /// Set the mode directly. Setting the active mode again is a no-op.
    ///
    /// Storage and the marker are updated while the lifecycle lock is held, so
    /// concurrent writers persist in the same order they change the mode.
    /// Subscribers run after the lock is released.
    pub fn set_mode(&self, mode: ThemeMode) {
        let mut lifecycle = self.lifecycle.write().unwrap_or_else(PoisonError::into_inner);
        let previous = match *lifecycle {
            Lifecycle::Ready(current) => current,
            Lifecycle::Uninitialized => {
                tracing::debug!(%mode, "ignoring set_mode before initialization");
                return;
            }
        };
        if previous == mode {
            return;
        }
        *lifecycle = Lifecycle::Ready(mode);
        tracing::debug!(from = %previous, to = %mode, "ThemeStore::set_mode");
        self.persist(mode);
        self.marker.apply(mode);
        drop(lifecycle);

        self.notify(mode);
    }

    /// Set the mode from a string tag. Unknown tags are silently ignored.
    /// Returns whether the tag was valid.
    pub fn set_mode_tag(&self, tag: &str) -> bool {
        match ThemeMode::from_tag(tag) {
            Some(mode) => {
                self.set_mode(mode);
                true
            }
            None => {
                tracing::debug!(tag, "ignoring unknown theme tag");
                false
            }
        }
    }

    /// Register a callback run after every mode change. Callbacks may call
    /// back into the store, including to unsubscribe themselves.
    pub fn subscribe(&self, callback: impl Fn(ThemeMode) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers().push((id, Arc::new(callback)));
        id
    }

    /// Release a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    fn persist(&self, mode: ThemeMode) {
        if let Err(e) = self.storage.write(&self.key, mode.tag()) {
            tracing::warn!(error = %e, %mode, "theme storage write failed, keeping in-memory mode");
        }
    }

    fn notify(&self, mode: ThemeMode) {
        let callbacks: Vec<Subscriber> = self
            .subscribers()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(mode);
        }
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Subscriber)>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("key", &self.key)
            .field("lifecycle", &self.lifecycle())
            .finish_non_exhaustive()
    }
}
