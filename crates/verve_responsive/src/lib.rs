//! Verve Responsive Layout
//!
//! Width classification into size buckets, sparse per-bucket values with
//! mobile-first fallthrough, a cached viewport, and grid configuration.
//!
//! Pure math, no I/O: feed it a width, get buckets and resolved values back.

pub mod breakpoints;
pub mod grid;
pub mod value;
pub mod viewport;

pub use breakpoints::{Breakpoint, Breakpoints};
pub use grid::GridSpec;
pub use value::ResponsiveValue;
pub use viewport::Viewport;
