//! Verve Motion Effects
//!
//! Composite effects built on the animation core: entrance and exit fades,
//! spring scale-ins, attention pulses, staggered list reveals, and a
//! typewriter text effect with a blinking caret.
//!
//! Effects own their animated cells; constructing one is cheap, starting one
//! is the mount signal, and dropping one cancels everything it was driving.

pub mod effects;
pub mod stagger;
pub mod typing;

pub use effects::{FadeIn, FadeOut, Pulse, ScaleIn, VisualSample};
pub use stagger::{StaggerConfig, StaggerDirection, StaggeredReveal};
pub use typing::{TypingState, TypingText};
