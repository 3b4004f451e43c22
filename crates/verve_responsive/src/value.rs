//! Sparse per-bucket values with downward fallthrough
//!
//! A [`ResponsiveValue`] carries a required base (mobile) value and optional
//! overrides for the wider buckets. Resolution is mobile-first: the override
//! at the current bucket wins; a missing override falls through to the next
//! narrower bucket, never to a wider one. A desktop-only override therefore
//! also applies at large-desktop widths, while a tablet-width viewport with
//! only a desktop override sees the base value.

use serde::{Deserialize, Serialize};

use crate::breakpoints::Breakpoint;

/// A value with sparse per-bucket overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveValue<T> {
    /// The mobile (and ultimate fallback) value.
    pub base: T,
    pub tablet: Option<T>,
    pub desktop: Option<T>,
    pub large_desktop: Option<T>,
}

impl<T> ResponsiveValue<T> {
    /// A value with no overrides; every bucket sees `base`.
    pub fn new(base: T) -> Self {
        Self {
            base,
            tablet: None,
            desktop: None,
            large_desktop: None,
        }
    }

    pub fn tablet(mut self, value: T) -> Self {
        self.tablet = Some(value);
        self
    }

    pub fn desktop(mut self, value: T) -> Self {
        self.desktop = Some(value);
        self
    }

    pub fn large_desktop(mut self, value: T) -> Self {
        self.large_desktop = Some(value);
        self
    }

    /// The value in effect at `bucket`, after fallthrough.
    pub fn resolve(&self, bucket: Breakpoint) -> &T {
        let mut current = Some(bucket);
        while let Some(b) = current {
            if let Some(value) = self.override_at(b) {
                return value;
            }
            current = b.narrower();
        }
        &self.base
    }

    fn override_at(&self, bucket: Breakpoint) -> Option<&T> {
        match bucket {
            Breakpoint::Mobile => None,
            Breakpoint::Tablet => self.tablet.as_ref(),
            Breakpoint::Desktop => self.desktop.as_ref(),
            Breakpoint::LargeDesktop => self.large_desktop.as_ref(),
        }
    }
}

impl<T> From<T> for ResponsiveValue<T> {
    fn from(base: T) -> Self {
        Self::new(base)
    }
}
