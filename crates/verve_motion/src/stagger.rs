//! Staggered list reveals
//!
//! A [`StaggeredReveal`] fades a list of items in one after another: item `i`
//! starts after `base + i * increment` milliseconds. Items are positional
//! (index order is reveal order), so reordering the backing list mid-reveal
//! is not supported; restart the reveal instead.

use smallvec::SmallVec;
use verve_animation::SchedulerHandle;

use crate::effects::{FadeIn, VisualSample};

/// Which end of the list reveals first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// Reveal first to last
    #[default]
    Forward,
    /// Reveal last to first
    Reverse,
    /// Reveal from the center outward
    FromCenter,
}

/// Delay schedule for a staggered reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerConfig {
    /// Delay before the first item starts (ms)
    pub base_delay_ms: f32,
    /// Additional delay per step down the list (ms)
    pub increment_ms: f32,
    /// Which end of the list goes first
    pub direction: StaggerDirection,
    /// Optional cap on the per-item step, so very long lists do not trail
    /// forever
    pub limit: Option<usize>,
}

impl StaggerConfig {
    /// A forward cascade: item `i` starts at `base + i * increment`.
    /// Negative inputs behave as zero.
    pub fn new(base_delay_ms: f32, increment_ms: f32) -> Self {
        Self {
            base_delay_ms: base_delay_ms.max(0.0),
            increment_ms: increment_ms.max(0.0),
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    /// Reveal from last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Reveal from the center outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    /// Cap the per-item step at `n`
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// The start delay for a specific item index.
    pub fn delay_for_index(&self, index: usize, total: usize) -> f32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                if index <= center {
                    center - index
                } else {
                    index - center
                }
            }
        };

        let capped_index = match self.limit {
            Some(limit) => effective_index.min(limit),
            None => effective_index,
        };

        self.base_delay_ms + self.increment_ms * capped_index as f32
    }
}

/// A list of fade-in entrances sharing one delay schedule.
///
/// Items keep their input order; `sample(i)` always refers to the i-th item
/// as given. Dropping the reveal vacates every item's scheduler slots.
pub struct StaggeredReveal {
    handle: SchedulerHandle,
    config: StaggerConfig,
    duration_ms: f32,
    distance: f32,
    count: usize,
    items: SmallVec<[FadeIn; 8]>,
    started: bool,
}

impl StaggeredReveal {
    pub fn new(handle: &SchedulerHandle, count: usize, config: StaggerConfig) -> Self {
        Self {
            handle: handle.clone(),
            config,
            duration_ms: 300.0,
            distance: 12.0,
            count,
            items: SmallVec::new(),
            started: false,
        }
    }

    /// Per-item travel duration in milliseconds.
    pub fn duration(mut self, ms: f32) -> Self {
        self.duration_ms = ms.max(0.0);
        self
    }

    /// Per-item vertical travel in logical pixels.
    pub fn distance(mut self, px: f32) -> Self {
        self.distance = px;
        self
    }

    /// Begin the cascade. Subsequent calls are ignored; the reveal runs once.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        tracing::debug!(count = self.count, "staggered reveal started");
        for index in 0..self.count {
            let mut item = FadeIn::new(&self.handle)
                .duration(self.duration_ms)
                .distance(self.distance)
                .delay(self.config.delay_for_index(index, self.count));
            item.start();
            self.items.push(item);
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The i-th item's current visual state, `None` past the end.
    ///
    /// Before [`start`](Self::start) every item reports its hidden state.
    pub fn sample(&self, index: usize) -> Option<VisualSample> {
        if index >= self.count {
            return None;
        }
        match self.items.get(index) {
            Some(item) => Some(item.sample()),
            None => Some(VisualSample {
                opacity: 0.0,
                offset_y: self.distance,
                scale: 1.0,
            }),
        }
    }

    /// All items' visual states in input order.
    pub fn samples(&self) -> impl Iterator<Item = VisualSample> + '_ {
        (0..self.count).filter_map(|index| self.sample(index))
    }

    /// True once every item has fully arrived.
    pub fn is_complete(&self) -> bool {
        self.started && self.items.iter().all(|item| item.is_complete())
    }
}
