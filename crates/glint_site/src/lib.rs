//! Glint Site
//!
//! Integration glue for the portfolio site: loads `glint.toml`, initializes
//! the [`glint_theme::ThemeStore`] before anything theme-dependent renders,
//! and owns the [`glint_motion::MotionScheduler`] pages mount animators into.
//!
//! The `headless_*` modules drive a [`Site`] from JSON scenarios without a
//! browser, producing a machine-readable [`ScenarioReport`].
//!
//! ```rust
//! use glint_site::{Site, SiteConfig};
//! use glint_theme::{MemoryStorage, NoopMarker, ThemeMode};
//!
//! let mut site = Site::new(SiteConfig::default(), MemoryStorage::new(), NoopMarker);
//! assert_eq!(site.mode(), ThemeMode::Default);
//! assert_eq!(site.toggle_theme(), ThemeMode::Alternate);
//! ```

pub mod config;
pub mod error;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod site;

pub use config::{SiteConfig, CONFIG_FILE};
pub use error::ConfigError;
pub use headless_report::{ReportStatus, ScenarioReport};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use headless_runtime::HeadlessRunConfig;
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use site::Site;
