//! Glint Theme System
//!
//! A two-mode site theme with best-effort persistence and a mount gate that
//! keeps theme-dependent content from rendering before the stored mode is
//! known.
//!
//! # Quick Start
//!
//! ```rust
//! use glint_theme::{MemoryStorage, RootClassList, ThemeMode, ThemeStore};
//! use std::sync::Arc;
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let root = Arc::new(RootClassList::new());
//! let store = ThemeStore::new(storage.clone(), root.clone());
//!
//! // Nothing theme-dependent renders before initialization
//! assert!(store.render(|mode| mode).is_none());
//!
//! store.initialize(ThemeMode::Default);
//! store.toggle();
//! assert_eq!(store.mode(), Some(ThemeMode::Alternate));
//! assert_eq!(storage.get("theme").as_deref(), Some("kawaii"));
//! assert!(root.contains("theme-kawaii"));
//! ```
//!
//! # Failure semantics
//!
//! Storage reads and writes may fail at any time. Failures are logged and
//! swallowed; the in-memory mode stays authoritative for the session.

pub mod error;
pub mod marker;
pub mod mode;
pub mod palette;
pub mod storage;
pub mod store;

pub use error::{ParseThemeModeError, StorageError};
pub use marker::{DocumentMarker, NoopMarker, RootClassList};
pub use mode::ThemeMode;
pub use palette::Palette;
pub use storage::{FileStorage, MemoryStorage, ThemeStorage};
pub use store::{Lifecycle, SubscriptionId, ThemeStore, DEFAULT_STORAGE_KEY};
