//! Site context
//!
//! One [`Site`] per page load. It owns the theme store and the motion
//! scheduler and is passed explicitly to whatever renders pages.

use crate::config::SiteConfig;
use glint_motion::{
    HoverAnimator, HoverConfig, HoverId, MotionScheduler, ParallaxAnimator, ParallaxId,
    RevealAnimator, RevealConfig, RevealId,
};
use glint_theme::{DocumentMarker, ThemeMode, ThemeStorage, ThemeStore};
use std::sync::Arc;

/// Theme store plus motion scheduler for one page load
pub struct Site {
    config: SiteConfig,
    storage: Arc<dyn ThemeStorage>,
    marker: Arc<dyn DocumentMarker>,
    theme: ThemeStore,
    motion: MotionScheduler,
    /// Mode last pushed into the scheduler
    synced_mode: ThemeMode,
}

impl Site {
    /// Initialize the theme store from storage and start an empty scheduler
    pub fn new(
        config: SiteConfig,
        storage: impl ThemeStorage + 'static,
        marker: impl DocumentMarker + 'static,
    ) -> Self {
        let storage: Arc<dyn ThemeStorage> = Arc::new(storage);
        let marker: Arc<dyn DocumentMarker> = Arc::new(marker);
        let (theme, mode) = Self::mount_theme(&config, &storage, &marker);

        let mut motion = MotionScheduler::new();
        motion.set_theme(mode);

        Self {
            config,
            storage,
            marker,
            theme,
            motion,
            synced_mode: mode,
        }
    }

    fn mount_theme(
        config: &SiteConfig,
        storage: &Arc<dyn ThemeStorage>,
        marker: &Arc<dyn DocumentMarker>,
    ) -> (ThemeStore, ThemeMode) {
        let theme = ThemeStore::new(Arc::clone(storage), Arc::clone(marker))
            .with_key(config.theme.storage_key.clone());
        let mode = theme.initialize(config.theme.default_mode);
        (theme, mode)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn motion(&self) -> &MotionScheduler {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionScheduler {
        &mut self.motion
    }

    /// Active mode. Always set once the site is constructed.
    pub fn mode(&self) -> ThemeMode {
        self.theme.mode().unwrap_or(self.config.theme.default_mode)
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle();
        self.sync_theme()
    }

    pub fn set_theme(&mut self, mode: ThemeMode) -> ThemeMode {
        self.theme.set_mode(mode);
        self.sync_theme()
    }

    /// Set the theme from a persisted-style tag. Unknown tags are ignored.
    pub fn set_theme_tag(&mut self, tag: &str) -> bool {
        let accepted = self.theme.set_mode_tag(tag);
        self.sync_theme();
        accepted
    }

    fn sync_theme(&mut self) -> ThemeMode {
        let mode = self.mode();
        if mode != self.synced_mode {
            self.motion.set_theme(mode);
            self.synced_mode = mode;
        }
        mode
    }

    /// Simulate a page reload: every animator unmounts and a fresh theme
    /// store rehydrates from the same storage.
    pub fn reload(&mut self) -> ThemeMode {
        tracing::debug!("reloading site");
        self.motion.clear();
        let (theme, mode) = Self::mount_theme(&self.config, &self.storage, &self.marker);
        self.theme = theme;
        self.motion.set_theme(mode);
        self.synced_mode = mode;
        mode
    }

    /// Reveal config carrying the site-wide defaults
    pub fn reveal_config(&self) -> RevealConfig {
        self.config.reveal_config()
    }

    pub fn mount_reveal(&mut self, reveal: RevealAnimator) -> RevealId {
        self.motion.mount_reveal(reveal)
    }

    pub fn mount_parallax(&mut self, parallax: ParallaxAnimator) -> ParallaxId {
        self.motion.mount_parallax(parallax)
    }

    /// Mount a hover with the site hover spring applied to `preset`
    pub fn mount_hover(&mut self, preset: HoverConfig) -> HoverId {
        let config = self.config.hover_config(preset);
        self.motion.mount_hover(HoverAnimator::new(config))
    }

    /// Advance one frame
    pub fn tick(&mut self, dt: f32) -> bool {
        self.sync_theme();
        self.motion.tick(dt)
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("theme", &self.theme)
            .field("motion", &self.motion)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Rect;
    use glint_theme::{MemoryStorage, NoopMarker, RootClassList};

    #[test]
    fn test_reload_keeps_persisted_mode() {
        let storage = Arc::new(MemoryStorage::new());
        let mut site = Site::new(SiteConfig::default(), storage.clone(), NoopMarker);
        assert_eq!(site.mode(), ThemeMode::Default);

        assert_eq!(site.toggle_theme(), ThemeMode::Alternate);
        assert_eq!(storage.get("theme").as_deref(), Some("kawaii"));

        site.mount_reveal(RevealAnimator::new(site.reveal_config()));
        assert_eq!(site.reload(), ThemeMode::Alternate);
        assert_eq!(site.motion().reveal_count(), 0);
    }

    #[test]
    fn test_marker_tracks_theme() {
        let classes = Arc::new(RootClassList::new());
        let mut site = Site::new(SiteConfig::default(), MemoryStorage::new(), classes.clone());
        assert!(classes.contains("theme-portfolio"));

        site.set_theme(ThemeMode::Alternate);
        assert!(classes.contains("theme-kawaii"));
        assert!(!classes.contains("theme-portfolio"));

        assert!(!site.set_theme_tag("neon"));
        assert_eq!(site.mode(), ThemeMode::Alternate);
    }

    #[test]
    fn test_hover_glow_follows_direct_store_changes() {
        let mut site = Site::new(SiteConfig::default(), MemoryStorage::new(), NoopMarker);
        let id = site.mount_hover(HoverConfig::card());

        // Bypass the site wrappers; the next frame picks it up
        site.theme().toggle();
        site.tick(1.0 / 60.0);

        let glow = site.motion().hover(id).unwrap().glow().unwrap();
        assert_eq!(glow.color, ThemeMode::Alternate.palette().glow);
    }

    #[test]
    fn test_reveal_uses_site_defaults() {
        let mut config = SiteConfig::default();
        config.reveal.distance = 40.0;
        let mut site = Site::new(config, MemoryStorage::new(), NoopMarker);

        let id = site.mount_reveal(
            RevealAnimator::new(site.reveal_config()).with_bounds(Rect::new(0.0, 0.0, 10.0, 10.0)),
        );
        let pose = site.motion().reveal(id).unwrap().pose();
        assert_eq!(pose.translate.y, 40.0);
    }
}
