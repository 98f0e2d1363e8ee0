//! Small flat state machines
//!
//! Animators model their interaction state as plain enums that map
//! `(state, event)` pairs to a new state:
//!
//! ```rust
//! use glint_core::{event_types::*, StateTransitions};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Pressable {
//!     Idle,
//!     Hovered,
//! }
//!
//! impl StateTransitions for Pressable {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Pressable::Idle, POINTER_ENTER) => Some(Pressable::Hovered),
//!             (Pressable::Hovered, POINTER_LEAVE) => Some(Pressable::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = Pressable::Idle;
//! assert!(state.apply(POINTER_ENTER));
//! assert_eq!(state, Pressable::Hovered);
//! assert!(!state.apply(POINTER_ENTER));
//! ```

use std::hash::Hash;

/// Trait for state types that react to event identifiers
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place. Returns true when the state changed.
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                *self = next;
                true
            }
            _ => false,
        }
    }
}
