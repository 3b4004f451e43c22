//! Breakpoint buckets and width classification

use serde::{Deserialize, Serialize};

/// Size bucket a viewport width falls into.
///
/// Buckets are ordered; a wider bucket compares greater than a narrower one,
/// which is what makes the sparse-override fallthrough in
/// [`ResponsiveValue`](crate::value::ResponsiveValue) work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    /// Width < tablet threshold
    Mobile,
    /// tablet <= width < desktop
    Tablet,
    /// desktop <= width < large desktop
    Desktop,
    /// width >= large desktop threshold
    LargeDesktop,
}

impl Breakpoint {
    /// The next narrower bucket, or `None` at mobile.
    pub fn narrower(self) -> Option<Breakpoint> {
        match self {
            Breakpoint::Mobile => None,
            Breakpoint::Tablet => Some(Breakpoint::Mobile),
            Breakpoint::Desktop => Some(Breakpoint::Tablet),
            Breakpoint::LargeDesktop => Some(Breakpoint::Desktop),
        }
    }
}

/// Threshold widths in logical pixels. Intervals are half-open: a width
/// exactly on a threshold belongs to the wider bucket.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Lower edge of the tablet bucket - 768px
    pub tablet: f32,
    /// Lower edge of the desktop bucket - 1024px
    pub desktop: f32,
    /// Lower edge of the large-desktop bucket - 1440px
    pub large_desktop: f32,
}

impl Breakpoints {
    pub const DEFAULT: Self = Self {
        tablet: 768.0,
        desktop: 1024.0,
        large_desktop: 1440.0,
    };

    /// Classify a viewport width into its bucket.
    pub fn bucket(&self, width: f32) -> Breakpoint {
        match width {
            w if w < self.tablet => Breakpoint::Mobile,
            w if w < self.desktop => Breakpoint::Tablet,
            w if w < self.large_desktop => Breakpoint::Desktop,
            _ => Breakpoint::LargeDesktop,
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries_are_half_open() {
        let bp = Breakpoints::DEFAULT;
        assert_eq!(bp.bucket(375.0), Breakpoint::Mobile);
        assert_eq!(bp.bucket(767.0), Breakpoint::Mobile);
        assert_eq!(bp.bucket(768.0), Breakpoint::Tablet);
        assert_eq!(bp.bucket(1023.0), Breakpoint::Tablet);
        assert_eq!(bp.bucket(1024.0), Breakpoint::Desktop);
        assert_eq!(bp.bucket(1439.0), Breakpoint::Desktop);
        assert_eq!(bp.bucket(1440.0), Breakpoint::LargeDesktop);
        assert_eq!(bp.bucket(2560.0), Breakpoint::LargeDesktop);
    }

    #[test]
    fn test_buckets_are_ordered() {
        assert!(Breakpoint::Mobile < Breakpoint::Tablet);
        assert!(Breakpoint::Tablet < Breakpoint::Desktop);
        assert!(Breakpoint::Desktop < Breakpoint::LargeDesktop);
    }

    #[test]
    fn test_narrower_walks_down_to_mobile() {
        assert_eq!(
            Breakpoint::LargeDesktop.narrower(),
            Some(Breakpoint::Desktop)
        );
        assert_eq!(Breakpoint::Desktop.narrower(), Some(Breakpoint::Tablet));
        assert_eq!(Breakpoint::Tablet.narrower(), Some(Breakpoint::Mobile));
        assert_eq!(Breakpoint::Mobile.narrower(), None);
    }

    #[test]
    fn test_custom_thresholds() {
        let bp = Breakpoints {
            tablet: 600.0,
            desktop: 900.0,
            large_desktop: 1200.0,
        };
        assert_eq!(bp.bucket(599.0), Breakpoint::Mobile);
        assert_eq!(bp.bucket(600.0), Breakpoint::Tablet);
        assert_eq!(bp.bucket(1200.0), Breakpoint::LargeDesktop);
    }
}
