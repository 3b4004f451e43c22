//! Viewport state with a cached bucket

use crate::breakpoints::{Breakpoint, Breakpoints};
use crate::value::ResponsiveValue;

/// The current viewport width and the bucket it classifies into.
///
/// The bucket is computed on construction and on every width change, so
/// per-frame reads are just field accesses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    breakpoints: Breakpoints,
    bucket: Breakpoint,
}

impl Viewport {
    /// A viewport using the default thresholds.
    pub fn new(width: f32) -> Self {
        Self::with_breakpoints(width, Breakpoints::DEFAULT)
    }

    /// A viewport classifying against custom thresholds.
    pub fn with_breakpoints(width: f32, breakpoints: Breakpoints) -> Self {
        Self {
            width,
            breakpoints,
            bucket: breakpoints.bucket(width),
        }
    }

    /// Record a resize, reclassifying the bucket.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
        self.bucket = self.breakpoints.bucket(width);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn bucket(&self) -> Breakpoint {
        self.bucket
    }

    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    pub fn is_mobile(&self) -> bool {
        self.bucket == Breakpoint::Mobile
    }

    pub fn is_tablet(&self) -> bool {
        self.bucket == Breakpoint::Tablet
    }

    pub fn is_desktop(&self) -> bool {
        self.bucket == Breakpoint::Desktop
    }

    pub fn is_large_desktop(&self) -> bool {
        self.bucket == Breakpoint::LargeDesktop
    }

    /// Resolve a responsive value against the current bucket.
    pub fn resolve<'a, T>(&self, value: &'a ResponsiveValue<T>) -> &'a T {
        value.resolve(self.bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates_follow_width() {
        let mut viewport = Viewport::new(375.0);
        assert!(viewport.is_mobile());
        assert!(!viewport.is_tablet());

        viewport.set_width(800.0);
        assert!(viewport.is_tablet());

        viewport.set_width(1100.0);
        assert!(viewport.is_desktop());

        viewport.set_width(1920.0);
        assert!(viewport.is_large_desktop());
    }

    #[test]
    fn test_resolve_uses_cached_bucket() {
        let columns = ResponsiveValue::new(4u32).desktop(12);
        let viewport = Viewport::new(1700.0);
        // Desktop override carries to large-desktop widths
        assert_eq!(*viewport.resolve(&columns), 12);

        let narrow = Viewport::new(900.0);
        assert_eq!(*narrow.resolve(&columns), 4);
    }

    #[test]
    fn test_custom_thresholds_change_classification() {
        let breakpoints = Breakpoints {
            tablet: 600.0,
            desktop: 900.0,
            large_desktop: 1200.0,
        };
        let viewport = Viewport::with_breakpoints(700.0, breakpoints);
        assert!(viewport.is_tablet());
    }
}
