//! Animation scheduler
//!
//! The cooperative heart of the animation system. Components own [`Animated`]
//! cells; each in-flight transition holds one driver slot here, registered
//! through a weak [`SchedulerHandle`]. The embedding frame loop calls
//! [`AnimationScheduler::tick`] once per display refresh, which advances every
//! driver by the elapsed wall-clock time and reports whether anything still
//! wants a next frame.
//!
//! Drivers stay registered after finishing so their final value remains
//! readable; they leave the registry when the owning cell is dropped,
//! retargeted, or snapped. Dropping the scheduler itself turns every handle
//! operation into a no-op.

use std::sync::{Arc, Mutex, Weak};
use std::time::Instant;

use slotmap::{new_key_type, SlotMap};

use crate::clock::{Clock, SystemClock};
use crate::spring::{Spring, SpringConfig};
use crate::transition::{Transition, TransitionKind};
use crate::tween::Tween;

new_key_type! {
    /// Identifies a driver slot owned by the scheduler.
    pub struct DriverId;
}

// ============================================================================
// Drivers
// ============================================================================

/// The state advancing one animated cell.
enum Driver {
    Tween(Tween),
    Spring { spring: Spring, delay_ms: f32 },
}

impl Driver {
    fn from_transition(from: f32, to: f32, transition: &Transition) -> Self {
        match transition.kind {
            TransitionKind::Timing {
                duration_ms,
                easing,
            } => Driver::Tween(
                Tween::new(from, to, duration_ms)
                    .easing(easing)
                    .delay(transition.delay_ms)
                    .repeat(transition.repeat),
            ),
            TransitionKind::Spring(config) => Driver::Spring {
                spring: Spring::with_target(config, from, to),
                delay_ms: transition.delay_ms,
            },
        }
    }

    fn advance(&mut self, dt_ms: f32) {
        match self {
            Driver::Tween(tween) => tween.advance(dt_ms),
            Driver::Spring { spring, delay_ms } => {
                // The spring holds still until its delay is consumed
                let mut dt = dt_ms;
                if *delay_ms > 0.0 {
                    let held = dt.min(*delay_ms);
                    *delay_ms -= held;
                    dt -= held;
                }
                if dt > 0.0 {
                    spring.step(dt / 1000.0);
                }
            }
        }
    }

    fn value(&self) -> f32 {
        match self {
            Driver::Tween(tween) => tween.value(),
            Driver::Spring { spring, .. } => spring.value(),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            Driver::Tween(tween) => !tween.is_finished(),
            Driver::Spring { spring, delay_ms } => *delay_ms > 0.0 || !spring.is_settled(),
        }
    }
}

// ============================================================================
// Scheduler
// ============================================================================

struct SchedulerInner {
    drivers: SlotMap<DriverId, Driver>,
    last_tick: Instant,
}

/// Owns every in-flight animation and advances them on demand.
///
/// The scheduler is single-threaded and cooperative: nothing moves between
/// calls to [`tick`](Self::tick). Whoever owns the frame loop owns the
/// cadence; at rest (`tick` returned false) the loop can stop scheduling
/// frames until the next transition starts.
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
    clock: Arc<dyn Clock>,
}

impl AnimationScheduler {
    /// A scheduler on wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// A scheduler on an injected time source.
    ///
    /// Tests hand in a [`ManualClock`](crate::clock::ManualClock) and advance
    /// it by hand between ticks.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let inner = SchedulerInner {
            drivers: SlotMap::with_key(),
            last_tick: clock.now(),
        };
        Self {
            inner: Arc::new(Mutex::new(inner)),
            clock,
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance all drivers by the time elapsed since the previous tick.
    ///
    /// Returns true if any driver is still active (needs another tick).
    pub fn tick(&self) -> bool {
        let now = self.clock.now();
        let mut inner = self.inner.lock().unwrap();
        let dt_ms = now.duration_since(inner.last_tick).as_secs_f32() * 1000.0;
        inner.last_tick = now;

        for (_, driver) in inner.drivers.iter_mut() {
            driver.advance(dt_ms);
        }

        // Finished drivers are not removed here; their final value stays
        // readable until the owning cell drops or retargets.
        inner.drivers.iter().any(|(_, driver)| driver.is_active())
    }

    /// Check if any driver is still mid-flight
    pub fn has_active_animations(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.drivers.iter().any(|(_, driver)| driver.is_active())
    }

    /// Number of registered driver slots, finished ones included
    pub fn driver_count(&self) -> usize {
        self.inner.lock().unwrap().drivers.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Scheduler Handle
// ============================================================================

/// A cloneable weak reference to the scheduler.
///
/// Components keep handles, never the scheduler itself. Once the scheduler
/// has been dropped every operation through a handle becomes a no-op, so
/// long-lived components degrade to snapping instead of animating.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Check if the scheduler backing this handle still exists
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    fn register(&self, driver: Driver) -> Option<DriverId> {
        self.inner.upgrade().map(|inner| {
            let id = inner.lock().unwrap().drivers.insert(driver);
            tracing::trace!(?id, "driver registered");
            id
        })
    }

    fn remove(&self, id: DriverId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.lock().unwrap().drivers.remove(id);
        }
    }

    fn value(&self, id: DriverId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().drivers.get(id).map(|d| d.value()))
    }

    fn is_active(&self, id: DriverId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| inner.lock().unwrap().drivers.get(id).map(|d| d.is_active()))
            .unwrap_or(false)
    }

    /// Retarget an existing spring driver in place so velocity carries over.
    fn retarget_spring(&self, id: DriverId, config: SpringConfig, target: f32) -> bool {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(Driver::Spring { spring, delay_ms }) =
                inner.lock().unwrap().drivers.get_mut(id)
            {
                *delay_ms = 0.0;
                spring.set_config(config);
                spring.set_target(target);
                return true;
            }
        }
        false
    }
}

// ============================================================================
// Animated Value
// ============================================================================

/// A scheduler-backed animated value.
///
/// [`go`](Self::go) starts a transition toward a target from whatever the
/// value is at that instant, replacing any transition already in flight;
/// [`set`](Self::set) snaps without animating. Dropping the cell vacates its
/// driver slot, so nothing mutates once the owner is gone.
///
/// # Example
///
/// ```ignore
/// let mut opacity = Animated::new(scheduler.handle(), 0.0);
/// opacity.go(1.0, Transition::timing(200.0).easing(Easing::EaseOut));
///
/// // each frame:
/// scheduler.tick();
/// let current = opacity.get();
/// ```
pub struct Animated {
    handle: SchedulerHandle,
    driver: Option<DriverId>,
    target: f32,
}

impl Animated {
    /// A cell resting on `initial`.
    pub fn new(handle: SchedulerHandle, initial: f32) -> Self {
        Self {
            handle,
            driver: None,
            target: initial,
        }
    }

    /// Animate toward `target`, starting from the instantaneous current
    /// value.
    ///
    /// If the cell is mid-spring and the new transition is an undelayed
    /// spring too, the existing driver is retargeted in place so velocity
    /// carries across the interruption.
    pub fn go(&mut self, target: f32, transition: Transition) {
        let current = self.get();
        self.target = target;

        if transition.delay_ms <= 0.0 {
            if let TransitionKind::Spring(config) = transition.kind {
                if let Some(id) = self.driver {
                    if self.handle.retarget_spring(id, config, target) {
                        return;
                    }
                }
                if (target - current).abs() <= 0.001 {
                    // Already at rest on the target; nothing to drive
                    self.remove_driver();
                    return;
                }
            }
        }

        self.remove_driver();
        self.driver = self
            .handle
            .register(Driver::from_transition(current, target, &transition));
        if self.driver.is_none() {
            tracing::debug!(to = target, "scheduler gone; value snaps to target");
        }
    }

    /// Current sampled value.
    pub fn get(&self) -> f32 {
        self.driver
            .and_then(|id| self.handle.value(id))
            .unwrap_or(self.target)
    }

    /// Snap to `value` immediately, cancelling any in-flight transition.
    pub fn set(&mut self, value: f32) {
        self.remove_driver();
        self.target = value;
    }

    /// The value this cell is headed toward (or resting at).
    pub fn target(&self) -> f32 {
        self.target
    }

    /// True while a transition is in flight, delay included.
    pub fn is_animating(&self) -> bool {
        self.driver
            .map(|id| self.handle.is_active(id))
            .unwrap_or(false)
    }

    fn remove_driver(&mut self) {
        if let Some(id) = self.driver.take() {
            self.handle.remove(id);
        }
    }
}

impl Drop for Animated {
    fn drop(&mut self) {
        self.remove_driver();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::tween::Repeat;

    fn test_scheduler() -> (AnimationScheduler, ManualClock) {
        let clock = ManualClock::new();
        let scheduler = AnimationScheduler::with_clock(Arc::new(clock.clone()));
        (scheduler, clock)
    }

    #[test]
    fn test_timing_transition_reaches_target() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.0);
        value.go(10.0, Transition::timing(200.0));

        clock.advance_ms(100);
        scheduler.tick();
        assert!((value.get() - 5.0).abs() < 1e-3);
        assert!(value.is_animating());

        clock.advance_ms(150);
        scheduler.tick();
        assert!((value.get() - 10.0).abs() < 1e-3);
        assert!(!value.is_animating());
    }

    #[test]
    fn test_delay_holds_prior_value() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.25);
        value.go(1.0, Transition::timing(200.0).delay(100.0));

        clock.advance_ms(50);
        scheduler.tick();
        assert!((value.get() - 0.25).abs() < 1e-6);
        assert!(value.is_animating());

        clock.advance_ms(300);
        scheduler.tick();
        assert!((value.get() - 1.0).abs() < 1e-6);
        assert!(!value.is_animating());
    }

    #[test]
    fn test_interruption_continues_from_current_value() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.0);
        value.go(10.0, Transition::timing(100.0));

        clock.advance_ms(50);
        scheduler.tick();
        let midway = value.get();
        assert!((midway - 5.0).abs() < 1e-3);

        // Retarget mid-flight: the new transition starts at the current value
        value.go(0.0, Transition::timing(100.0));
        assert!((value.get() - midway).abs() < 1e-6);

        clock.advance_ms(50);
        scheduler.tick();
        assert!((value.get() - midway / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_repeat_restarts_from_original_start() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.0);
        value.go(1.0, Transition::timing(100.0).repeat(Repeat::times(2)));

        clock.advance_ms(110);
        scheduler.tick();
        // Second pass plays forward from the original start, not backwards
        assert!((value.get() - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_infinite_alternate_never_finishes() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 1.0);
        value.go(
            1.05,
            Transition::timing(400.0).repeat(Repeat::infinite().alternating()),
        );

        for _ in 0..500 {
            clock.advance_ms(16);
            assert!(scheduler.tick());
        }
        assert!(value.is_animating());
        let v = value.get();
        assert!((1.0..=1.05).contains(&v));
    }

    #[test]
    fn test_spring_transition_settles() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.0);
        value.go(1.0, Transition::spring(SpringConfig::stiff()));

        for _ in 0..180 {
            clock.advance_ms(16);
            scheduler.tick();
        }
        assert_eq!(value.get(), 1.0);
        assert!(!value.is_animating());
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_spring_retarget_keeps_driver_and_value() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.0);
        value.go(1.0, Transition::spring(SpringConfig::wobbly()));
        assert_eq!(scheduler.driver_count(), 1);

        clock.advance_ms(100);
        scheduler.tick();
        let mid = value.get();
        assert!(mid > 0.0);

        value.go(0.0, Transition::spring(SpringConfig::wobbly()));
        // Same slot, retargeted in place; no jump at the interruption
        assert_eq!(scheduler.driver_count(), 1);
        assert!((value.get() - mid).abs() < 1e-6);
    }

    #[test]
    fn test_delays_begin_in_order() {
        let (scheduler, clock) = test_scheduler();
        let mut first = Animated::new(scheduler.handle(), 0.0);
        let mut second = Animated::new(scheduler.handle(), 0.0);
        first.go(1.0, Transition::timing(100.0).delay(50.0));
        second.go(1.0, Transition::timing(100.0).delay(120.0));

        clock.advance_ms(80);
        scheduler.tick();
        assert!(first.get() > 0.0);
        assert!((second.get() - 0.0).abs() < 1e-6);

        clock.advance_ms(60);
        scheduler.tick();
        assert!(second.get() > 0.0);
        assert!(first.get() > second.get());
    }

    #[test]
    fn test_set_snaps_and_cancels() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.0);
        value.go(10.0, Transition::timing(500.0));

        clock.advance_ms(100);
        scheduler.tick();
        value.set(3.0);

        assert_eq!(value.get(), 3.0);
        assert!(!value.is_animating());
        assert_eq!(scheduler.driver_count(), 0);
    }

    #[test]
    fn test_drop_releases_driver_slot() {
        let (scheduler, clock) = test_scheduler();
        {
            let mut value = Animated::new(scheduler.handle(), 0.0);
            value.go(1.0, Transition::timing(1000.0));
            assert_eq!(scheduler.driver_count(), 1);

            clock.advance_ms(100);
            scheduler.tick();
        }
        // The cell is gone; its slot went with it and nothing ticks anymore
        assert_eq!(scheduler.driver_count(), 0);
        clock.advance_ms(100);
        assert!(!scheduler.tick());
        assert!(!scheduler.has_active_animations());
    }

    #[test]
    fn test_handle_outlives_scheduler() {
        let handle;
        {
            let scheduler = AnimationScheduler::new();
            handle = scheduler.handle();
            assert!(handle.is_alive());
        }
        assert!(!handle.is_alive());

        // Operations on a dead handle degrade to snapping
        let mut value = Animated::new(handle, 2.0);
        value.go(5.0, Transition::timing(100.0));
        assert_eq!(value.get(), 5.0);
        assert!(!value.is_animating());
    }

    #[test]
    fn test_tick_reports_active_drivers() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.0);
        value.go(1.0, Transition::timing(100.0));

        clock.advance_ms(50);
        assert!(scheduler.tick());

        clock.advance_ms(100);
        assert!(!scheduler.tick());
        assert!(!scheduler.has_active_animations());
        // Finished drivers keep their final value readable
        assert_eq!(scheduler.driver_count(), 1);
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let (scheduler, clock) = test_scheduler();
        let mut value = Animated::new(scheduler.handle(), 0.0);
        value.go(1.0, Transition::timing(-100.0));

        clock.advance_ms(16);
        scheduler.tick();
        assert_eq!(value.get(), 1.0);
        assert!(!value.is_animating());
    }
}
