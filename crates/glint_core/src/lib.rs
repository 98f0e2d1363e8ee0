//! Glint Core
//!
//! Foundational primitives shared by the theme and motion layers of the Glint
//! site runtime:
//!
//! - **Geometry**: points, sizes, rectangles, and 2D vectors
//! - **Color**: RGBA colors
//! - **Transform**: the translate/rotate/scale/opacity output of an animator
//! - **Events**: pointer and viewport event identifiers for state machines
//! - **State**: the `StateTransitions` trait used by small interaction machines
//!
//! # Example
//!
//! ```rust
//! use glint_core::{Point, Rect};
//!
//! let card = Rect::new(0.0, 0.0, 200.0, 100.0);
//! assert_eq!(card.center(), Point::new(100.0, 50.0));
//! ```

pub mod color;
pub mod events;
pub mod geometry;
pub mod state;
pub mod transform;

pub use color::Color;
pub use events::{event_types, EventType};
pub use geometry::{Point, Rect, Size, Vec2};
pub use state::StateTransitions;
pub use transform::Transform;
