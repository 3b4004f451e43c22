//! Responsive grid configuration

use serde::{Deserialize, Serialize};

use crate::breakpoints::Breakpoint;
use crate::value::ResponsiveValue;

/// Column grid settings per bucket, loadable from app config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Column count per bucket.
    pub columns: ResponsiveValue<u32>,
    /// Gap between columns in logical pixels.
    pub gutter: ResponsiveValue<f32>,
    /// Content width cap in logical pixels; 0 disables the cap.
    pub max_width: ResponsiveValue<f32>,
}

impl GridSpec {
    pub fn columns_at(&self, bucket: Breakpoint) -> u32 {
        *self.columns.resolve(bucket)
    }

    pub fn gutter_at(&self, bucket: Breakpoint) -> f32 {
        *self.gutter.resolve(bucket)
    }

    /// The content width cap at `bucket`, `None` when uncapped.
    pub fn max_width_at(&self, bucket: Breakpoint) -> Option<f32> {
        let cap = *self.max_width.resolve(bucket);
        (cap > 0.0).then_some(cap)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: ResponsiveValue::new(4).tablet(8).desktop(12),
            gutter: ResponsiveValue::new(16.0).tablet(24.0).large_desktop(32.0),
            max_width: ResponsiveValue::new(0.0).desktop(1140.0).large_desktop(1320.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_ladder() {
        let grid = GridSpec::default();
        assert_eq!(grid.columns_at(Breakpoint::Mobile), 4);
        assert_eq!(grid.columns_at(Breakpoint::Tablet), 8);
        assert_eq!(grid.columns_at(Breakpoint::Desktop), 12);
        // No large-desktop override on columns; desktop carries up
        assert_eq!(grid.columns_at(Breakpoint::LargeDesktop), 12);

        assert_eq!(grid.max_width_at(Breakpoint::Mobile), None);
        assert_eq!(grid.max_width_at(Breakpoint::Desktop), Some(1140.0));
    }

    #[test]
    fn test_grid_deserializes_from_sparse_config() {
        let grid: GridSpec = serde_json::from_str(
            r#"{
                "columns": { "base": 2, "desktop": 10 },
                "gutter": { "base": 12.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(grid.columns_at(Breakpoint::Mobile), 2);
        assert_eq!(grid.columns_at(Breakpoint::Tablet), 2);
        assert_eq!(grid.columns_at(Breakpoint::LargeDesktop), 10);
        assert_eq!(grid.gutter_at(Breakpoint::Desktop), 12.0);
        // Omitted max_width falls back to the default ladder
        assert_eq!(grid.max_width_at(Breakpoint::Desktop), Some(1140.0));
    }
}
