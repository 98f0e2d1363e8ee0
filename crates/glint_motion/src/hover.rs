//! Hover emphasis animator
//!
//! A single `emphasis` spring runs from 0 (rest) to 1 (hovered) and every
//! transform channel is a linear blend along it, so the subtree is always
//! somewhere on the segment between the rest and hover poses. Reversals start
//! from the current value and velocity.
//!
//! The glow layer has its own spring. Turning glow off never touches the
//! transform.

use glint_animation::{Spring, SpringConfig};
use glint_core::{event_types, Color, StateTransitions, Transform, Vec2};
use glint_theme::ThemeMode;
use serde::{Deserialize, Serialize};

/// Glow opacity at full hover
const GLOW_OPACITY: f32 = 0.8;
/// Extra glow scale at full hover
const GLOW_SPREAD: f32 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Scale at full hover
    pub scale: f32,
    /// Upward travel in pixels
    pub lift: f32,
    /// Rotation in degrees
    pub rotate: f32,
    pub glow: bool,
    /// Overrides the theme palette glow
    pub glow_color: Option<Color>,
    pub spring: SpringConfig,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            lift: 0.0,
            rotate: 0.0,
            glow: false,
            glow_color: None,
            spring: SpringConfig::hover(),
        }
    }
}

impl HoverConfig {
    /// Project / experience cards
    pub fn card() -> Self {
        Self {
            scale: 1.03,
            lift: 8.0,
            glow: true,
            ..Self::default()
        }
    }

    pub fn button() -> Self {
        Self {
            scale: 1.05,
            ..Self::default()
        }
    }

    /// Playful tilt used by the kawaii decorations
    pub fn sticker() -> Self {
        Self {
            scale: 1.1,
            rotate: 6.0,
            spring: SpringConfig::wobbly(),
            ..Self::default()
        }
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn lift(mut self, px: f32) -> Self {
        self.lift = px;
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn glow(mut self, enabled: bool) -> Self {
        self.glow = enabled;
        self
    }

    pub fn glow_color(mut self, color: Color) -> Self {
        self.glow = true;
        self.glow_color = Some(color);
        self
    }

    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Pose at full hover
    pub fn hover_transform(&self) -> Transform {
        Transform::translate(0.0, -self.lift)
            .with_rotate(self.rotate)
            .with_scale(self.scale)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoverState {
    #[default]
    Rest,
    Hovering,
}

impl StateTransitions for HoverState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (HoverState::Rest, POINTER_ENTER) => Some(HoverState::Hovering),
            (HoverState::Hovering, POINTER_LEAVE) => Some(HoverState::Rest),
            _ => None,
        }
    }
}

/// Secondary layer rendered behind the hovered subtree
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowLayer {
    pub color: Color,
    pub opacity: f32,
    pub scale: f32,
}

impl GlowLayer {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Clone, Debug)]
pub struct HoverAnimator {
    config: HoverConfig,
    state: HoverState,
    emphasis: Spring,
    glow: Spring,
    theme_glow: Color,
}

impl HoverAnimator {
    pub fn new(config: HoverConfig) -> Self {
        Self {
            emphasis: Spring::new(config.spring, 0.0),
            glow: Spring::new(config.spring, 0.0),
            config,
            state: HoverState::Rest,
            theme_glow: ThemeMode::Default.palette().glow,
        }
    }

    pub fn config(&self) -> &HoverConfig {
        &self.config
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn is_hovering(&self) -> bool {
        self.state == HoverState::Hovering
    }

    /// Pick up the glow color for `mode` unless the config overrides it
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme_glow = mode.palette().glow;
    }

    pub fn on_pointer_enter(&mut self) -> bool {
        self.handle_event(event_types::POINTER_ENTER)
    }

    pub fn on_pointer_leave(&mut self) -> bool {
        self.handle_event(event_types::POINTER_LEAVE)
    }

    /// Apply a pointer event. Returns true when the hover state changed.
    pub fn handle_event(&mut self, event: u32) -> bool {
        if !self.state.apply(event) {
            return false;
        }
        let target = match self.state {
            HoverState::Hovering => 1.0,
            HoverState::Rest => 0.0,
        };
        self.emphasis.set_target(target);
        self.glow.set_target(target);
        true
    }

    /// Returns true while either spring is moving
    pub fn tick(&mut self, dt: f32) -> bool {
        self.emphasis.step(dt);
        self.glow.step(dt);
        !self.is_settled()
    }

    pub fn is_settled(&self) -> bool {
        self.emphasis.is_settled() && self.glow.is_settled()
    }

    /// Blend factor between rest (0) and hover (1)
    pub fn emphasis(&self) -> f32 {
        self.emphasis.value().clamp(0.0, 1.0)
    }

    pub fn transform(&self) -> Transform {
        let t = self.emphasis();
        let hover = self.config.hover_transform();
        Transform {
            translate: Vec2::new(0.0, hover.translate.y * t),
            rotate: hover.rotate * t,
            scale: 1.0 + (hover.scale - 1.0) * t,
            opacity: 1.0,
        }
    }

    /// Glow layer, or `None` when glow is disabled
    pub fn glow(&self) -> Option<GlowLayer> {
        if !self.config.glow {
            return None;
        }
        let level = self.glow.value().clamp(0.0, 1.0);
        Some(GlowLayer {
            color: self.config.glow_color.unwrap_or(self.theme_glow),
            opacity: GLOW_OPACITY * level,
            scale: 1.0 + GLOW_SPREAD * level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(hover: &mut HoverAnimator, frames: usize) {
        for _ in 0..frames {
            hover.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_enter_and_leave() {
        let mut hover = HoverAnimator::new(HoverConfig::card());
        assert!(hover.on_pointer_enter());
        assert!(!hover.on_pointer_enter());
        assert!(hover.is_hovering());

        run(&mut hover, 120);
        let transform = hover.transform();
        assert!((transform.scale - 1.03).abs() < 1e-3);
        assert!((transform.translate.y + 8.0).abs() < 1e-2);

        assert!(hover.on_pointer_leave());
        run(&mut hover, 120);
        assert!(hover.transform().is_identity());
        assert!(!hover.glow().unwrap().is_visible());
    }

    #[test]
    fn test_glow_follows_theme_unless_overridden() {
        let mut hover = HoverAnimator::new(HoverConfig::card());
        hover.set_theme(ThemeMode::Alternate);
        assert_eq!(hover.glow().unwrap().color, ThemeMode::Alternate.palette().glow);

        let red = Color::from_hex(0xFF0000);
        let mut hover = HoverAnimator::new(HoverConfig::default().glow_color(red));
        hover.set_theme(ThemeMode::Alternate);
        assert_eq!(hover.glow().unwrap().color, red);
    }

    #[test]
    fn test_glow_disabled_keeps_transform() {
        let mut with_glow = HoverAnimator::new(HoverConfig::card());
        let mut without = HoverAnimator::new(HoverConfig::card().glow(false));
        with_glow.on_pointer_enter();
        without.on_pointer_enter();
        run(&mut with_glow, 10);
        run(&mut without, 10);

        assert!(without.glow().is_none());
        assert_eq!(with_glow.transform(), without.transform());
    }

    proptest! {
        #[test]
        fn rapid_toggles_stay_on_segment(
            steps in prop::collection::vec((any::<bool>(), 0usize..6), 1..40),
        ) {
            let config = HoverConfig::default().scale(1.2).lift(10.0).rotate(5.0);
            let mut hover = HoverAnimator::new(config);

            for (enter, frames) in steps {
                let before = hover.transform();
                if enter {
                    hover.on_pointer_enter();
                } else {
                    hover.on_pointer_leave();
                }
                // An event never moves the subtree by itself
                prop_assert_eq!(hover.transform(), before);

                run(&mut hover, frames);
                let t = hover.emphasis();
                prop_assert!((0.0..=1.0).contains(&t));

                let now = hover.transform();
                prop_assert!((now.scale - (1.0 + 0.2 * t)).abs() < 1e-4);
                prop_assert!((now.translate.y + 10.0 * t).abs() < 1e-3);
                prop_assert!((now.rotate - 5.0 * t).abs() < 1e-3);
            }
        }
    }
}
