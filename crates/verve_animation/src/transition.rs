//! Transition descriptors
//!
//! A [`Transition`] describes how an animated cell should travel to its next
//! target: a fixed-duration easing curve or a physical spring, optionally
//! delayed, optionally repeating. Descriptors are plain values; applying one
//! to a cell is what spins up a driver.

use crate::easing::Easing;
use crate::spring::SpringConfig;
use crate::tween::Repeat;

/// The interpolation strategy for a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionKind {
    /// Fixed-duration interpolation along an easing curve.
    Timing { duration_ms: f32, easing: Easing },
    /// Spring physics; duration emerges from the configuration.
    Spring(SpringConfig),
}

/// A declarative description of how a value change should animate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub delay_ms: f32,
    pub repeat: Repeat,
}

impl Transition {
    /// A timing transition over `duration_ms` with linear easing.
    /// Negative durations behave as zero.
    pub fn timing(duration_ms: f32) -> Self {
        Self {
            kind: TransitionKind::Timing {
                duration_ms: duration_ms.max(0.0),
                easing: Easing::Linear,
            },
            delay_ms: 0.0,
            repeat: Repeat::none(),
        }
    }

    /// A spring transition with the given configuration.
    pub fn spring(config: SpringConfig) -> Self {
        Self {
            kind: TransitionKind::Spring(config),
            delay_ms: 0.0,
            repeat: Repeat::none(),
        }
    }

    /// Replace the easing curve. No effect on spring transitions.
    pub fn easing(mut self, easing: Easing) -> Self {
        if let TransitionKind::Timing { easing: e, .. } = &mut self.kind {
            *e = easing;
        }
        self
    }

    /// Defer the start; the cell holds its prior value until the delay has
    /// elapsed. Negative delays behave as zero.
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Replace the repeat policy. Springs settle once and ignore repeats.
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_inputs_clamp_to_zero() {
        let transition = Transition::timing(-200.0).delay(-50.0);
        assert_eq!(transition.delay_ms, 0.0);
        match transition.kind {
            TransitionKind::Timing { duration_ms, .. } => assert_eq!(duration_ms, 0.0),
            TransitionKind::Spring(_) => unreachable!(),
        }
    }

    #[test]
    fn test_easing_is_ignored_on_springs() {
        let transition = Transition::spring(SpringConfig::gentle()).easing(Easing::EaseOut);
        assert!(matches!(transition.kind, TransitionKind::Spring(_)));
    }

    #[test]
    fn test_builder_chains() {
        let transition = Transition::timing(300.0)
            .easing(Easing::EaseInOut)
            .delay(120.0)
            .repeat(Repeat::times(2).alternating());
        assert_eq!(transition.delay_ms, 120.0);
        assert!(transition.repeat.alternate);
    }
}
