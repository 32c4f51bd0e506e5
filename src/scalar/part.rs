use geo::{Coord, LineString};

use crate::array::{SPACER, TERMINATOR};

/// A decoded slot of the structural index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexEntry {
    /// A part holding this many floats.
    Run(usize),
    /// An empty part. Between polygon rings it closes the current polygon.
    Spacer,
    /// No parts follow.
    Terminator,
}

impl From<i16> for IndexEntry {
    fn from(value: i16) -> Self {
        match value {
            SPACER => IndexEntry::Spacer,
            v if v > 0 => IndexEntry::Run(v as usize),
            // any negative value ends traversal
            _ => IndexEntry::Terminator,
        }
    }
}

impl From<IndexEntry> for i16 {
    fn from(value: IndexEntry) -> Self {
        match value {
            IndexEntry::Run(n) => n as i16,
            IndexEntry::Spacer => SPACER,
            IndexEntry::Terminator => TERMINATOR,
        }
    }
}

/// The role of a part within the buffer's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// Points of a point cloud.
    Points,
    /// A line string.
    Line,
    /// The boundary of a polygon.
    OuterRing,
    /// A hole of the preceding outer ring.
    Hole,
    /// Mesh vertices.
    Mesh,
}

/// A non-empty run of coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part<'a> {
    pub(crate) kind: PartKind,
    pub(crate) coords: &'a [f32],
}

impl<'a> Part<'a> {
    /// The role of this part in its geometry.
    pub fn kind(&self) -> PartKind {
        self.kind
    }

    /// The interleaved `xy` floats of this part.
    pub fn values(&self) -> &'a [f32] {
        self.coords
    }

    /// The number of points in this part.
    pub fn num_points(&self) -> usize {
        self.coords.len() / 2
    }

    /// Iterate over the coordinates of this part.
    pub fn coords(&self) -> impl ExactSizeIterator<Item = Coord<f32>> + 'a {
        self.coords
            .chunks_exact(2)
            .map(|pair| Coord { x: pair[0], y: pair[1] })
    }

    /// Convert this part to a [`LineString`].
    pub fn to_line_string(&self) -> LineString<f32> {
        LineString::new(self.coords().collect())
    }
}
