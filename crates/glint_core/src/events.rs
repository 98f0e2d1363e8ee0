//! Event identifiers consumed by the motion layer's state machines

/// Event type identifier
pub type EventType = u32;

/// Event types driving animator state machines
pub mod event_types {
    use super::EventType;

    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;

    /// Element crossed its intersection threshold while scrolling in
    pub const VIEWPORT_ENTER: EventType = 12;
    /// Element dropped below its intersection threshold
    pub const VIEWPORT_LEAVE: EventType = 13;
}
