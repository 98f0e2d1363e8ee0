//! Motion scheduler
//!
//! Owns every mounted animator and advances them each frame. Unmounting an
//! animator drops all of its state, so an in-flight animation is simply
//! discarded.

use crate::hover::HoverAnimator;
use crate::intersection::{GeometricObserver, IntersectionObserver};
use crate::parallax::{ParallaxAnimator, ParallaxReference};
use crate::reveal::RevealAnimator;
use glint_core::{Point, Rect};
use glint_theme::ThemeMode;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct RevealId;
    pub struct ParallaxId;
    pub struct HoverId;
}

/// Ticks all mounted animators and routes viewport / pointer input to them
pub struct MotionScheduler {
    reveals: SlotMap<RevealId, RevealAnimator>,
    parallaxes: SlotMap<ParallaxId, ParallaxAnimator>,
    hovers: SlotMap<HoverId, HoverAnimator>,
    observer: Box<dyn IntersectionObserver>,
    viewport: Option<Rect>,
    theme: ThemeMode,
}

impl MotionScheduler {
    /// Scheduler measuring intersections geometrically
    pub fn new() -> Self {
        Self::with_observer(GeometricObserver::new())
    }

    /// Scheduler with an injected intersection capability
    pub fn with_observer(observer: impl IntersectionObserver + 'static) -> Self {
        Self {
            reveals: SlotMap::with_key(),
            parallaxes: SlotMap::with_key(),
            hovers: SlotMap::with_key(),
            observer: Box::new(observer),
            viewport: None,
            theme: ThemeMode::Default,
        }
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    // ---- Reveals ----

    /// Mount a reveal. If the viewport is already known the reveal is
    /// evaluated right away, so content mounted on screen appears at once.
    pub fn mount_reveal(&mut self, reveal: RevealAnimator) -> RevealId {
        let id = self.reveals.insert(reveal);
        tracing::debug!(?id, "reveal mounted");
        self.observe_reveal(id);
        id
    }

    pub fn reveal(&self, id: RevealId) -> Option<&RevealAnimator> {
        self.reveals.get(id)
    }

    pub fn reveal_mut(&mut self, id: RevealId) -> Option<&mut RevealAnimator> {
        self.reveals.get_mut(id)
    }

    /// Update a reveal's layout bounds and re-check it against the viewport
    pub fn set_reveal_bounds(&mut self, id: RevealId, bounds: Rect) -> bool {
        match self.reveals.get_mut(id) {
            Some(reveal) => reveal.set_bounds(bounds),
            None => return false,
        }
        self.observe_reveal(id);
        true
    }

    pub fn unmount_reveal(&mut self, id: RevealId) -> Option<RevealAnimator> {
        let removed = self.reveals.remove(id);
        if removed.is_some() {
            tracing::debug!(?id, "reveal unmounted");
        }
        removed
    }

    // ---- Parallax ----

    pub fn mount_parallax(&mut self, mut parallax: ParallaxAnimator) -> ParallaxId {
        if parallax.config().reference == ParallaxReference::Viewport {
            if let Some(viewport) = self.viewport {
                parallax.set_reference(viewport);
            }
        }
        let id = self.parallaxes.insert(parallax);
        tracing::debug!(?id, "parallax mounted");
        id
    }

    pub fn parallax(&self, id: ParallaxId) -> Option<&ParallaxAnimator> {
        self.parallaxes.get(id)
    }

    pub fn parallax_mut(&mut self, id: ParallaxId) -> Option<&mut ParallaxAnimator> {
        self.parallaxes.get_mut(id)
    }

    pub fn unmount_parallax(&mut self, id: ParallaxId) -> Option<ParallaxAnimator> {
        let removed = self.parallaxes.remove(id);
        if removed.is_some() {
            tracing::debug!(?id, "parallax unmounted");
        }
        removed
    }

    // ---- Hover ----

    pub fn mount_hover(&mut self, mut hover: HoverAnimator) -> HoverId {
        hover.set_theme(self.theme);
        let id = self.hovers.insert(hover);
        tracing::debug!(?id, "hover mounted");
        id
    }

    pub fn hover(&self, id: HoverId) -> Option<&HoverAnimator> {
        self.hovers.get(id)
    }

    pub fn hover_mut(&mut self, id: HoverId) -> Option<&mut HoverAnimator> {
        self.hovers.get_mut(id)
    }

    pub fn hover_enter(&mut self, id: HoverId) -> bool {
        self.hovers
            .get_mut(id)
            .map_or(false, HoverAnimator::on_pointer_enter)
    }

    pub fn hover_leave(&mut self, id: HoverId) -> bool {
        self.hovers
            .get_mut(id)
            .map_or(false, HoverAnimator::on_pointer_leave)
    }

    pub fn unmount_hover(&mut self, id: HoverId) -> Option<HoverAnimator> {
        let removed = self.hovers.remove(id);
        if removed.is_some() {
            tracing::debug!(?id, "hover unmounted");
        }
        removed
    }

    /// Drop every mounted animator
    pub fn clear(&mut self) {
        tracing::debug!(
            reveals = self.reveals.len(),
            parallaxes = self.parallaxes.len(),
            hovers = self.hovers.len(),
            "unmounting all animators"
        );
        self.reveals.clear();
        self.parallaxes.clear();
        self.hovers.clear();
    }

    // ---- Input ----

    /// The visible page region changed (scroll or resize). Returns how many
    /// reveals changed state.
    pub fn update_viewport(&mut self, viewport: Rect) -> usize {
        self.viewport = Some(viewport);

        for (_, parallax) in self.parallaxes.iter_mut() {
            if parallax.config().reference == ParallaxReference::Viewport {
                parallax.set_reference(viewport);
            }
        }

        let mut changed = 0;
        for (_, reveal) in self.reveals.iter_mut() {
            let Some(bounds) = reveal.bounds() else {
                continue;
            };
            let ratio = self.observer.intersection_ratio(bounds, viewport);
            if reveal.on_intersection(ratio) {
                changed += 1;
            }
        }
        tracing::trace!(?viewport, changed, "viewport updated");
        changed
    }

    fn observe_reveal(&mut self, id: RevealId) {
        let Some(viewport) = self.viewport else {
            return;
        };
        if let Some(reveal) = self.reveals.get_mut(id) {
            if let Some(bounds) = reveal.bounds() {
                let ratio = self.observer.intersection_ratio(bounds, viewport);
                reveal.on_intersection(ratio);
            }
        }
    }

    /// Route a pointer move to every parallax. Returns how many tracked it.
    pub fn pointer_move(&mut self, pointer: Point) -> usize {
        let mut tracked = 0;
        for (_, parallax) in self.parallaxes.iter_mut() {
            if parallax.on_pointer_move(pointer) {
                tracked += 1;
            }
        }
        tracked
    }

    /// The pointer left the page
    pub fn pointer_leave(&mut self) {
        for (_, parallax) in self.parallaxes.iter_mut() {
            parallax.on_pointer_leave();
        }
    }

    /// Pass the active theme to every hover glow
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
        for (_, hover) in self.hovers.iter_mut() {
            hover.set_theme(mode);
        }
    }

    // ---- Frame ----

    /// Advance every animator by `dt` seconds. Returns true while anything
    /// is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        for (_, reveal) in self.reveals.iter_mut() {
            reveal.tick(dt);
        }
        for (_, parallax) in self.parallaxes.iter_mut() {
            parallax.tick(dt);
        }
        for (_, hover) in self.hovers.iter_mut() {
            hover.tick(dt);
        }
        self.has_active_animations()
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.reveals.iter().any(|(_, r)| !r.is_settled())
            || self.parallaxes.iter().any(|(_, p)| !p.is_settled())
            || self.hovers.iter().any(|(_, h)| !h.is_settled())
    }

    pub fn reveal_count(&self) -> usize {
        self.reveals.len()
    }

    pub fn parallax_count(&self) -> usize {
        self.parallaxes.len()
    }

    pub fn hover_count(&self) -> usize {
        self.hovers.len()
    }
}

impl Default for MotionScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MotionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionScheduler")
            .field("reveals", &self.reveals.len())
            .field("parallaxes", &self.parallaxes.len())
            .field("hovers", &self.hovers.len())
            .field("viewport", &self.viewport)
            .field("theme", &self.theme)
            .finish()
    }
}
