//! Verve Animation Core
//!
//! Easing curves, spring physics, tweens, and the cooperative frame
//! scheduler underneath every Verve motion effect.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Tweens**: Fixed-duration interpolation with easing, delay, and repeat
//! - **Transitions**: Declarative descriptors (timing or spring) applied to values
//! - **Animated Cells**: Scheduler-backed values that travel toward targets
//! - **Interruptible**: Retargeting continues from the current value and velocity
//! - **Injectable Clock**: Manual time source for deterministic tests

pub mod clock;
pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod transition;
pub mod tween;

pub use clock::{Clock, ManualClock, SystemClock};
pub use easing::Easing;
pub use scheduler::{Animated, AnimationScheduler, DriverId, SchedulerHandle};
pub use spring::{Spring, SpringConfig};
pub use transition::{Transition, TransitionKind};
pub use tween::{Repeat, RepeatCount, Tween};
