//! Composite entrance, exit, and attention effects
//!
//! Each effect owns one or two [`Animated`] cells and maps them onto a
//! [`VisualSample`] the caller merges into its own styling. Effects start
//! when told to (mount), and dropping one vacates its scheduler slots, so an
//! unmounted effect stops mutating anything mid-flight.

use verve_animation::{Animated, Easing, Repeat, SchedulerHandle, SpringConfig, Transition};

/// Default vertical travel for fades, in logical pixels.
const FADE_DISTANCE: f32 = 12.0;

/// Default duration for timed entrance effects.
const FADE_DURATION_MS: f32 = 300.0;

/// One frame's worth of visual properties produced by an effect.
///
/// Callers merge this into whatever styling they already apply; properties an
/// effect does not drive stay at their resting values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualSample {
    /// 0.0 fully transparent, 1.0 fully opaque.
    pub opacity: f32,
    /// Vertical displacement from the resting position, in logical pixels.
    pub offset_y: f32,
    /// Uniform scale around the element center.
    pub scale: f32,
}

impl VisualSample {
    /// The sample of an element at rest: opaque, unscaled, in place.
    pub fn resting() -> Self {
        Self {
            opacity: 1.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Default for VisualSample {
    fn default() -> Self {
        Self::resting()
    }
}

// ============================================================================
// FadeIn
// ============================================================================

/// Entrance effect: opacity 0 to 1 while sliding up into place.
///
/// Runs once. Until [`start`](Self::start) the element sits hidden at its
/// offset position, so a delayed mount never flashes the final state.
pub struct FadeIn {
    opacity: Animated,
    offset: Animated,
    duration_ms: f32,
    delay_ms: f32,
    distance: f32,
    started: bool,
}

impl FadeIn {
    pub fn new(handle: &SchedulerHandle) -> Self {
        Self {
            opacity: Animated::new(handle.clone(), 0.0),
            offset: Animated::new(handle.clone(), FADE_DISTANCE),
            duration_ms: FADE_DURATION_MS,
            delay_ms: 0.0,
            distance: FADE_DISTANCE,
            started: false,
        }
    }

    /// Travel duration in milliseconds. Negative values behave as zero.
    pub fn duration(mut self, ms: f32) -> Self {
        self.duration_ms = ms.max(0.0);
        self
    }

    /// Hold the hidden state this long before travelling.
    pub fn delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms.max(0.0);
        self
    }

    /// Vertical travel distance in logical pixels.
    pub fn distance(mut self, px: f32) -> Self {
        self.distance = px;
        self.offset.set(px);
        self
    }

    /// Begin the entrance. Subsequent calls are ignored; the effect runs once.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let transition = Transition::timing(self.duration_ms)
            .easing(Easing::EaseOut)
            .delay(self.delay_ms);
        self.opacity.go(1.0, transition);
        self.offset.go(0.0, transition);
    }

    pub fn sample(&self) -> VisualSample {
        VisualSample {
            opacity: self.opacity.get().clamp(0.0, 1.0),
            offset_y: self.offset.get(),
            scale: 1.0,
        }
    }

    /// True once the element has fully arrived.
    pub fn is_complete(&self) -> bool {
        self.started && !self.opacity.is_animating() && !self.offset.is_animating()
    }
}

// ============================================================================
// FadeOut
// ============================================================================

/// Exit effect: opacity 1 to 0 while sliding down out of place.
///
/// The mirror of [`FadeIn`]; runs once.
pub struct FadeOut {
    opacity: Animated,
    offset: Animated,
    duration_ms: f32,
    delay_ms: f32,
    distance: f32,
    started: bool,
}

impl FadeOut {
    pub fn new(handle: &SchedulerHandle) -> Self {
        Self {
            opacity: Animated::new(handle.clone(), 1.0),
            offset: Animated::new(handle.clone(), 0.0),
            duration_ms: FADE_DURATION_MS,
            delay_ms: 0.0,
            distance: FADE_DISTANCE,
            started: false,
        }
    }

    pub fn duration(mut self, ms: f32) -> Self {
        self.duration_ms = ms.max(0.0);
        self
    }

    pub fn delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms.max(0.0);
        self
    }

    pub fn distance(mut self, px: f32) -> Self {
        self.distance = px;
        self
    }

    /// Begin the exit. Subsequent calls are ignored; the effect runs once.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let transition = Transition::timing(self.duration_ms)
            .easing(Easing::EaseIn)
            .delay(self.delay_ms);
        self.opacity.go(0.0, transition);
        self.offset.go(self.distance, transition);
    }

    pub fn sample(&self) -> VisualSample {
        VisualSample {
            opacity: self.opacity.get().clamp(0.0, 1.0),
            offset_y: self.offset.get(),
            scale: 1.0,
        }
    }

    /// True once the element has fully left.
    pub fn is_complete(&self) -> bool {
        self.started && !self.opacity.is_animating() && !self.offset.is_animating()
    }
}

// ============================================================================
// ScaleIn
// ============================================================================

/// Entrance effect: springs scale from 0.8 to 1.0 while fading in.
///
/// Spring-driven, so the scale overshoots slightly before settling. Runs
/// once.
pub struct ScaleIn {
    scale: Animated,
    opacity: Animated,
    spring: SpringConfig,
    delay_ms: f32,
    started: bool,
}

impl ScaleIn {
    pub fn new(handle: &SchedulerHandle) -> Self {
        Self {
            scale: Animated::new(handle.clone(), 0.8),
            opacity: Animated::new(handle.clone(), 0.0),
            spring: SpringConfig::stiff(),
            delay_ms: 0.0,
            started: false,
        }
    }

    /// Swap the spring character (stiffness, overshoot).
    pub fn spring(mut self, config: SpringConfig) -> Self {
        self.spring = config;
        self
    }

    /// Hold the shrunken state this long before springing in.
    pub fn delay(mut self, ms: f32) -> Self {
        self.delay_ms = ms.max(0.0);
        self
    }

    /// Begin the entrance. Subsequent calls are ignored; the effect runs once.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        let transition = Transition::spring(self.spring).delay(self.delay_ms);
        self.scale.go(1.0, transition);
        self.opacity.go(1.0, transition);
    }

    pub fn sample(&self) -> VisualSample {
        VisualSample {
            opacity: self.opacity.get().clamp(0.0, 1.0),
            offset_y: 0.0,
            scale: self.scale.get(),
        }
    }

    /// True once both springs have settled.
    pub fn is_complete(&self) -> bool {
        self.started && !self.scale.is_animating() && !self.opacity.is_animating()
    }
}

// ============================================================================
// Pulse
// ============================================================================

/// Attention effect: scale oscillates between a minimum and maximum forever.
///
/// Never completes on its own; dropping the effect is what stops it. Good for
/// notification badges and live indicators.
pub struct Pulse {
    scale: Animated,
    min_scale: f32,
    max_scale: f32,
    period_ms: f32,
    started: bool,
}

impl Pulse {
    pub fn new(handle: &SchedulerHandle) -> Self {
        Self {
            scale: Animated::new(handle.clone(), 1.0),
            min_scale: 1.0,
            max_scale: 1.05,
            period_ms: 1000.0,
            started: false,
        }
    }

    /// Oscillation bounds.
    pub fn range(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.scale.set(min_scale);
        self
    }

    /// Full min-to-max-to-min cycle length in milliseconds.
    pub fn period(mut self, ms: f32) -> Self {
        self.period_ms = ms.max(0.0);
        self
    }

    /// Begin oscillating. Subsequent calls are ignored.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        // Half the period out, half back, forever
        let transition = Transition::timing(self.period_ms / 2.0)
            .easing(Easing::EaseInOut)
            .repeat(Repeat::infinite().alternating());
        self.scale.go(self.max_scale, transition);
    }

    pub fn sample(&self) -> VisualSample {
        VisualSample {
            opacity: 1.0,
            offset_y: 0.0,
            scale: self.scale.get(),
        }
    }

    /// True while the oscillation is running (always, once started, until
    /// the effect is dropped).
    pub fn is_active(&self) -> bool {
        self.scale.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use verve_animation::{AnimationScheduler, ManualClock};

    fn test_scheduler() -> (AnimationScheduler, ManualClock) {
        let clock = ManualClock::new();
        let scheduler = AnimationScheduler::with_clock(Arc::new(clock.clone()));
        (scheduler, clock)
    }

    #[test]
    fn test_fade_in_travels_to_rest() {
        let (scheduler, clock) = test_scheduler();
        let mut fade = FadeIn::new(&scheduler.handle()).duration(200.0);

        let hidden = fade.sample();
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.offset_y, FADE_DISTANCE);

        fade.start();
        clock.advance_ms(300);
        scheduler.tick();

        let done = fade.sample();
        assert!((done.opacity - 1.0).abs() < 1e-4);
        assert!(done.offset_y.abs() < 1e-4);
        assert!(fade.is_complete());
    }

    #[test]
    fn test_fade_in_delay_holds_hidden_state() {
        let (scheduler, clock) = test_scheduler();
        let mut fade = FadeIn::new(&scheduler.handle()).duration(200.0).delay(100.0);
        fade.start();

        clock.advance_ms(50);
        scheduler.tick();
        let held = fade.sample();
        assert_eq!(held.opacity, 0.0);
        assert_eq!(held.offset_y, FADE_DISTANCE);
        assert!(!fade.is_complete());

        clock.advance_ms(300);
        scheduler.tick();
        let done = fade.sample();
        assert!((done.opacity - 1.0).abs() < 1e-4);
        assert!(fade.is_complete());
    }

    #[test]
    fn test_fade_in_starts_only_once() {
        let (scheduler, clock) = test_scheduler();
        let mut fade = FadeIn::new(&scheduler.handle()).duration(100.0);
        fade.start();

        clock.advance_ms(200);
        scheduler.tick();
        assert!(fade.is_complete());

        // A second start must not replay the entrance
        fade.start();
        assert!(fade.is_complete());
        assert!((fade.sample().opacity - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_fade_out_mirrors_fade_in() {
        let (scheduler, clock) = test_scheduler();
        let mut fade = FadeOut::new(&scheduler.handle()).duration(200.0).distance(20.0);
        assert_eq!(fade.sample().opacity, 1.0);

        fade.start();
        clock.advance_ms(300);
        scheduler.tick();

        let done = fade.sample();
        assert!(done.opacity.abs() < 1e-4);
        assert!((done.offset_y - 20.0).abs() < 1e-4);
        assert!(fade.is_complete());
    }

    #[test]
    fn test_scale_in_springs_to_full_size() {
        let (scheduler, clock) = test_scheduler();
        let mut scale_in = ScaleIn::new(&scheduler.handle());
        assert_eq!(scale_in.sample().scale, 0.8);

        scale_in.start();
        for _ in 0..180 {
            clock.advance_ms(16);
            scheduler.tick();
        }

        let done = scale_in.sample();
        assert_eq!(done.scale, 1.0);
        assert_eq!(done.opacity, 1.0);
        assert!(scale_in.is_complete());
    }

    #[test]
    fn test_scale_in_delay_holds_shrunken_state() {
        let (scheduler, clock) = test_scheduler();
        let mut scale_in = ScaleIn::new(&scheduler.handle()).delay(200.0);
        scale_in.start();

        clock.advance_ms(100);
        scheduler.tick();
        assert_eq!(scale_in.sample().scale, 0.8);
        assert_eq!(scale_in.sample().opacity, 0.0);
        assert!(!scale_in.is_complete());
    }

    #[test]
    fn test_pulse_oscillates_until_dropped() {
        let (scheduler, clock) = test_scheduler();
        {
            let mut pulse = Pulse::new(&scheduler.handle());
            pulse.start();

            for _ in 0..400 {
                clock.advance_ms(16);
                assert!(scheduler.tick());
                let s = pulse.sample();
                assert!(s.scale >= 1.0 - 1e-4 && s.scale <= 1.05 + 1e-4);
            }
            assert!(pulse.is_active());
        }

        // Unmounting the badge vacates its slot; nothing left to animate
        assert_eq!(scheduler.driver_count(), 0);
        clock.advance_ms(100);
        assert!(!scheduler.tick());
    }

    #[test]
    fn test_pulse_range_and_period() {
        let (scheduler, clock) = test_scheduler();
        let mut pulse = Pulse::new(&scheduler.handle()).range(0.9, 1.1).period(400.0);
        assert_eq!(pulse.sample().scale, 0.9);
        pulse.start();

        // Half a period reaches the maximum
        clock.advance_ms(200);
        scheduler.tick();
        assert!((pulse.sample().scale - 1.1).abs() < 1e-3);

        // A full period is back at the minimum
        clock.advance_ms(200);
        scheduler.tick();
        assert!((pulse.sample().scale - 0.9).abs() < 1e-3);
        assert!(pulse.is_active());
    }

    #[test]
    fn test_pulse_zero_period_never_terminal() {
        let (scheduler, clock) = test_scheduler();
        let mut pulse = Pulse::new(&scheduler.handle()).range(1.0, 1.05).period(0.0);
        pulse.start();

        // Degenerate period rests on the maximum but stays live until
        // dropped
        clock.advance_ms(100);
        assert!(scheduler.tick());
        assert!(pulse.is_active());
        assert!((pulse.sample().scale - 1.05).abs() < 1e-4);

        clock.advance_ms(100);
        assert!(scheduler.tick());
        assert!(pulse.is_active());
    }
}
