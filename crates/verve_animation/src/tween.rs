//! Fixed-duration tweens
//!
//! A [`Tween`] carries a value from `from` to `to` over a fixed duration
//! along an easing curve, after an optional delay, optionally repeating.
//! It is advanced by milliseconds of elapsed time and sampled at any point;
//! the delay is modelled as negative elapsed time, so a freshly started
//! tween sits on `from` until the delay has been consumed.

use crate::easing::Easing;

/// How many passes a repeating tween makes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    /// Play this many passes in total, then finish.
    Finite(u32),
    /// Never finish.
    Infinite,
}

/// Repeat policy for a tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Repeat {
    pub count: RepeatCount,
    /// When set, every other pass plays backwards instead of restarting
    /// from the original start.
    pub alternate: bool,
}

impl Repeat {
    /// Single pass, no repetition.
    pub fn none() -> Self {
        Self {
            count: RepeatCount::Finite(1),
            alternate: false,
        }
    }

    /// A fixed number of passes. Zero is treated as one.
    pub fn times(n: u32) -> Self {
        Self {
            count: RepeatCount::Finite(n.max(1)),
            alternate: false,
        }
    }

    /// Repeat until cancelled.
    pub fn infinite() -> Self {
        Self {
            count: RepeatCount::Infinite,
            alternate: false,
        }
    }

    /// Play every other pass backwards (ping-pong).
    pub fn alternating(mut self) -> Self {
        self.alternate = true;
        self
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::none()
    }
}

/// A fixed-duration interpolation between two values.
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    easing: Easing,
    delay_ms: f32,
    repeat: Repeat,
    /// Elapsed time within the current pass; negative while the delay runs.
    elapsed_ms: f32,
    /// Passes completed so far.
    passes: u32,
    /// Whether the current pass plays backwards.
    reversed: bool,
    finished: bool,
}

impl Tween {
    /// A linear tween from `from` to `to` over `duration_ms`.
    ///
    /// Negative durations behave as zero: the value jumps to `to` on the
    /// first advance past the delay, finishing unless the repeat is
    /// infinite.
    pub fn new(from: f32, to: f32, duration_ms: f32) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            easing: Easing::Linear,
            delay_ms: 0.0,
            repeat: Repeat::none(),
            elapsed_ms: 0.0,
            passes: 0,
            reversed: false,
            finished: false,
        }
    }

    /// Replace the easing curve.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Hold on `from` for `delay_ms` before the first pass. Negative delays
    /// behave as zero.
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self.elapsed_ms = -self.delay_ms;
        self
    }

    /// Replace the repeat policy.
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Advance by `dt_ms` milliseconds of elapsed time.
    pub fn advance(&mut self, dt_ms: f32) {
        if self.finished || dt_ms <= 0.0 {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < 0.0 {
            // Still inside the delay window
            return;
        }
        if self.duration_ms <= 0.0 {
            // Zero-length passes rest on the target; only finite runs finish
            self.finished = matches!(self.repeat.count, RepeatCount::Finite(_));
            self.passes = self.passes.saturating_add(1);
            self.elapsed_ms = 0.0;
            return;
        }
        if self.elapsed_ms < self.duration_ms {
            return;
        }
        // Pass boundaries crossed by this advance, normalized in one division
        // rather than a subtraction loop: a duration below the float ulp of
        // the elapsed time would never shrink it. The cast saturates past
        // u32::MAX.
        let crossed = (self.elapsed_ms / self.duration_ms) as u32;
        if let RepeatCount::Finite(total) = self.repeat.count {
            if crossed >= total - self.passes {
                self.passes = total;
                self.finished = true;
                self.elapsed_ms = self.duration_ms;
                if self.repeat.alternate {
                    // The last pass keeps the parity it played with
                    self.reversed = total.saturating_sub(1) % 2 == 1;
                }
                return;
            }
        }
        self.passes = self.passes.saturating_add(crossed);
        self.elapsed_ms %= self.duration_ms;
        if self.repeat.alternate && crossed % 2 == 1 {
            self.reversed = !self.reversed;
        }
    }

    /// The interpolated value at the current elapsed time.
    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.fraction()
    }

    /// Eased progress through the current pass, with alternation applied.
    pub fn fraction(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            // Holds `from` through the delay, rests on `to` once a
            // zero-length pass has played
            return if self.passes > 0 { 1.0 } else { 0.0 };
        }
        let raw = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        let eased = self.easing.apply(raw);
        if self.reversed {
            1.0 - eased
        } else {
            eased
        }
    }

    /// True once every pass has played out. Infinite tweens never finish.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True while the initial delay is still being consumed.
    pub fn is_delayed(&self) -> bool {
        self.elapsed_ms < 0.0
    }

    /// Rewind to the beginning, re-arming the delay and the pass counter.
    pub fn restart(&mut self) {
        self.elapsed_ms = -self.delay_ms;
        self.passes = 0;
        self.reversed = false;
        self.finished = false;
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }
}
