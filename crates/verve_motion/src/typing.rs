//! Typewriter text effect
//!
//! [`TypingText`] reveals a string one code point at a time on a fixed
//! interval, driven by `update(dt)` from the frame loop like any other widget
//! state. A completion callback fires exactly once per run, and an
//! independent cursor-blink oscillation keeps going whether or not the text
//! has finished.

use verve_animation::{Repeat, Tween};

/// Default reveal interval in milliseconds.
const DEFAULT_INTERVAL_MS: f32 = 50.0;

/// One half blink cycle; the caret fades out over this, then back in.
const CURSOR_BLINK_MS: f32 = 530.0;

/// Where a typing run currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingState {
    /// Constructed but not started; nothing revealed.
    Idle,
    /// Revealing one code point per interval.
    Typing,
    /// Everything revealed; the completion callback has fired.
    Done,
}

/// A typewriter reveal over a source string.
///
/// Driven by [`update`](Self::update) each frame. The revealed prefix always
/// falls on a character boundary, so multi-byte text is safe to slice.
pub struct TypingText {
    text: String,
    /// Code points revealed so far
    revealed: usize,
    /// Byte length of the revealed prefix
    byte_offset: usize,
    interval_ms: f32,
    /// Time accumulated toward the next reveal
    acc_ms: f32,
    state: TypingState,
    on_complete: Option<Box<dyn FnMut()>>,
    /// Caret opacity oscillation; never gated by typing progress
    cursor: Tween,
}

impl TypingText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revealed: 0,
            byte_offset: 0,
            interval_ms: DEFAULT_INTERVAL_MS,
            acc_ms: 0.0,
            state: TypingState::Idle,
            on_complete: None,
            cursor: Tween::new(1.0, 0.0, CURSOR_BLINK_MS).repeat(Repeat::infinite().alternating()),
        }
    }

    /// Milliseconds between reveals. Non-positive or non-finite values fall
    /// back to the default.
    pub fn interval(mut self, ms: f32) -> Self {
        self.interval_ms = if ms.is_finite() && ms > 0.0 {
            ms
        } else {
            DEFAULT_INTERVAL_MS
        };
        self
    }

    /// Called once, with no arguments, when the last code point lands.
    /// Restarting re-arms it.
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Begin revealing. Empty text completes on the spot.
    pub fn start(&mut self) {
        if self.state != TypingState::Idle {
            return;
        }
        self.state = TypingState::Typing;
        self.acc_ms = 0.0;
        if self.text.is_empty() {
            self.finish();
        }
    }

    /// Advance by `dt_ms` milliseconds of frame time.
    ///
    /// The cursor blink always advances; reveals only happen while typing.
    pub fn update(&mut self, dt_ms: f32) {
        if dt_ms <= 0.0 {
            return;
        }
        self.cursor.advance(dt_ms);

        if self.state != TypingState::Typing {
            return;
        }
        self.acc_ms += dt_ms;
        while self.acc_ms >= self.interval_ms && self.revealed < self.total() {
            self.acc_ms -= self.interval_ms;
            self.reveal_next();
        }
        if self.revealed == self.total() {
            self.finish();
        }
    }

    /// The revealed prefix: the first `k` code points of the source.
    pub fn visible(&self) -> &str {
        &self.text[..self.byte_offset]
    }

    /// The full source string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Code points revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == TypingState::Done
    }

    /// Caret opacity in `[0, 1]`; oscillates forever.
    pub fn cursor_opacity(&self) -> f32 {
        self.cursor.value().clamp(0.0, 1.0)
    }

    /// Caret visibility for callers that want a hard blink instead of a fade.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_opacity() >= 0.5
    }

    /// Replace the text and type it from the top. The completion callback is
    /// re-armed and will fire again for the new run.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.restart();
    }

    /// Type the current text again from the top, re-arming completion and
    /// resetting the caret phase.
    pub fn restart(&mut self) {
        self.revealed = 0;
        self.byte_offset = 0;
        self.acc_ms = 0.0;
        self.state = TypingState::Typing;
        self.cursor.restart();
        if self.text.is_empty() {
            self.finish();
        }
    }

    fn total(&self) -> usize {
        self.text.chars().count()
    }

    fn reveal_next(&mut self) {
        if let Some(ch) = self.text[self.byte_offset..].chars().next() {
            self.byte_offset += ch.len_utf8();
            self.revealed += 1;
        }
    }

    fn finish(&mut self) {
        if self.state == TypingState::Done {
            return;
        }
        self.state = TypingState::Done;
        tracing::debug!(chars = self.revealed, "typing run finished");
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }
}
