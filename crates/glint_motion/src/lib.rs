//! Glint Motion
//!
//! Reusable animation wrappers every page composes around its own markup:
//!
//! - [`RevealAnimator`]: hidden → visible when the element scrolls into view,
//!   optionally staggering its children
//! - [`ParallaxAnimator`]: smoothed offset/rotation that follows the pointer
//! - [`HoverAnimator`]: scale / lift / rotate / glow while hovered
//! - [`MotionScheduler`]: owns mounted animators, ticks them each frame and
//!   releases them on unmount
//!
//! Animators never share mutable state. The only theme input is the glow
//! color, taken from the active [`glint_theme::ThemeMode`]'s palette.
//!
//! # Example
//!
//! ```rust
//! use glint_core::Rect;
//! use glint_motion::{MotionScheduler, RevealAnimator, RevealConfig, RevealDirection};
//!
//! let mut motion = MotionScheduler::new();
//! let id = motion.mount_reveal(
//!     RevealAnimator::new(RevealConfig::default().direction(RevealDirection::Left))
//!         .with_bounds(Rect::new(0.0, 900.0, 400.0, 200.0)),
//! );
//!
//! // Below the fold: nothing happens
//! motion.update_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
//! assert!(!motion.reveal(id).unwrap().is_revealed());
//!
//! // Scrolled into view
//! motion.update_viewport(Rect::new(0.0, 500.0, 800.0, 600.0));
//! assert!(motion.reveal(id).unwrap().is_revealed());
//! ```

pub mod hover;
pub mod intersection;
pub mod parallax;
pub mod pose;
pub mod reveal;
pub mod scheduler;
pub mod stagger;

pub use hover::{GlowLayer, HoverAnimator, HoverConfig, HoverState};
pub use intersection::{GeometricObserver, IntersectionObserver};
pub use parallax::{ParallaxAnimator, ParallaxConfig, ParallaxReference};
pub use pose::{Pose, RevealDirection, RevealPose};
pub use reveal::{RevealAnimator, RevealConfig, RevealState, DEFAULT_THRESHOLD};
pub use scheduler::{HoverId, MotionScheduler, ParallaxId, RevealId};
pub use stagger::{StaggerConfig, StaggerOrder};
