//! Spring physics for value transitions
//!
//! RK4-integrated damped springs. A spring has no fixed duration; it settles
//! when position and velocity both drop inside the rest thresholds, and a
//! mid-flight retarget keeps the current value and velocity so interruptions
//! never jump.

/// Configuration for a spring transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// A gentle, slow spring (good for page-level transitions)
    pub fn gentle() -> Self {
        Self {
            stiffness: 120.0,
            damping: 14.0,
            mass: 1.0,
        }
    }

    /// A wobbly spring with visible overshoot (good for playful UI)
    pub fn wobbly() -> Self {
        Self {
            stiffness: 180.0,
            damping: 12.0,
            mass: 1.0,
        }
    }

    /// A stiff spring with slight overshoot (good for buttons and badges)
    pub fn stiff() -> Self {
        Self {
            stiffness: 400.0,
            damping: 30.0,
            mass: 1.0,
        }
    }

    /// A very stiff spring with minimal oscillation (good for quick responses)
    pub fn snappy() -> Self {
        Self {
            stiffness: 600.0,
            damping: 40.0,
            mass: 1.0,
        }
    }

    /// The damping value at which this stiffness/mass pair stops oscillating
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Ratio of configured damping to critical damping; below 1.0 oscillates
    pub fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

// Springs here drive unit-range UI properties (opacity, scale), so rest is a
// thousandth of the travel and a hundredth per second of drift.
const REST_DELTA: f32 = 0.001;
const REST_SPEED: f32 = 0.01;

// Integration never takes a step larger than one 60 Hz frame; bigger frame
// deltas are subdivided to keep RK4 stable.
const MAX_STEP: f32 = 1.0 / 60.0;

// Degenerate masses clamp up so the acceleration term stays finite.
const MIN_MASS: f32 = 0.001;

/// A damped spring integrating toward its target
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// A spring at rest on `initial`.
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// A spring starting at `initial` already headed for `target`.
    pub fn with_target(config: SpringConfig, initial: f32, target: f32) -> Self {
        let mut spring = Self::new(config, initial);
        spring.target = target;
        spring
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget mid-flight. Value and velocity are untouched, so motion
    /// continues smoothly from wherever the spring currently is.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Swap in a new configuration without disturbing value or velocity.
    pub fn set_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    /// Check if the spring has come to rest on its target
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Settled springs snap exactly onto the target and stop moving.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        if self.is_settled() {
            self.snap();
            return;
        }

        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            self.step_once(h);
            remaining -= h;
            if self.is_settled() {
                self.snap();
                break;
            }
        }
    }

    fn snap(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    /// One RK4 step over the (position, velocity) pair.
    fn step_once(&mut self, dt: f32) {
        let (k1x, k1v) = self.derivative(self.value, self.velocity);
        let (k2x, k2v) = self.derivative(
            self.value + k1x * dt * 0.5,
            self.velocity + k1v * dt * 0.5,
        );
        let (k3x, k3v) = self.derivative(
            self.value + k2x * dt * 0.5,
            self.velocity + k2v * dt * 0.5,
        );
        let (k4x, k4v) = self.derivative(self.value + k3x * dt, self.velocity + k3v * dt);

        self.value += (k1x + 2.0 * k2x + 2.0 * k3x + k4x) * dt / 6.0;
        self.velocity += (k1v + 2.0 * k2v + 2.0 * k3v + k4v) * dt / 6.0;
    }

    /// Derivative of the state: (dx/dt, dv/dt) at the given position/velocity.
    fn derivative(&self, x: f32, v: f32) -> (f32, f32) {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        let mass = self.config.mass.max(MIN_MASS);
        (v, (spring_force + damping_force) / mass)
    }
}
