//! Construction and growth settings for a [`GeometryBuffer`][crate::GeometryBuffer].

use serde::{Deserialize, Serialize};

/// Default number of points a new buffer can hold before growing.
pub const DEFAULT_POINTS: usize = 256;

/// Default number of structural slots a new buffer can hold before growing.
pub const DEFAULT_PARTS: usize = 64;

/// Floats added on top of every coordinate store reallocation.
pub const GROW_POINTS: usize = 512;

/// Slots added on top of every structural index reallocation.
pub const GROW_INDICES: usize = 64;

/// Initial sizes and growth margins of the two backing stores.
///
/// ```
/// use geometry_buffer::BufferOptions;
///
/// let options: BufferOptions = serde_json::from_str(r#"{"initial_points": 1024}"#).unwrap();
/// assert_eq!(options.initial_points, 1024);
/// assert_eq!(options.part_growth_margin, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferOptions {
    /// Points the coordinate store holds before its first reallocation.
    pub initial_points: usize,
    /// Slots the structural index holds before its first reallocation.
    pub initial_parts: usize,
    /// Floats added on top of the required size when the coordinate store grows.
    pub point_growth_margin: usize,
    /// Slots added on top of the required size when the structural index grows.
    pub part_growth_margin: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_points: DEFAULT_POINTS,
            initial_parts: DEFAULT_PARTS,
            point_growth_margin: GROW_POINTS,
            part_growth_margin: GROW_INDICES,
        }
    }
}

impl BufferOptions {
    /// Options with the given initial capacities and the default growth margins.
    pub fn with_capacity(initial_points: usize, initial_parts: usize) -> Self {
        Self {
            initial_points,
            initial_parts,
            ..Default::default()
        }
    }
}
