//! The geometry kind tag shared by the buffer and its consumers.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The kind of geometry currently held by a [`GeometryBuffer`][crate::GeometryBuffer].
///
/// Only one kind can be held at a time. The integer representation is the tag handed to
/// consumers of the encoded buffers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GeometryType {
    /// Nothing committed yet; any `start_*` operation may set the kind.
    #[default]
    None = 0,
    /// A point cloud.
    Point = 1,
    /// One or more line strings.
    Line = 2,
    /// One or more polygons, each with optional holes.
    Polygon = 3,
    /// Triangle mesh vertices.
    Mesh = 4,
}

impl GeometryType {
    /// The upper-case name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::None => "NONE",
            GeometryType::Point => "POINT",
            GeometryType::Line => "LINE",
            GeometryType::Polygon => "POLYGON",
            GeometryType::Mesh => "MESH",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
