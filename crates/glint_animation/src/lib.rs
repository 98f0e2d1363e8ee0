//! Glint Animation System
//!
//! Physics-based interpolation shared by every Glint animator.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Exponential Smoothing**: time-constant decay with no overshoot
//! - **Vector Smoothing**: 2D wrappers over either model
//! - **Interruptible**: retargeting keeps the current value and velocity, so
//!   reversals never jump

pub mod smoothing;
pub mod spring;

pub use smoothing::{ExponentialSmoother, SmoothedVec2, Smoothing};
pub use spring::{Spring, SpringConfig, SpringVec2};
