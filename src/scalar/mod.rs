//! Borrowed views of the parts encoded in a [`GeometryBuffer`][crate::GeometryBuffer].

pub use part::{IndexEntry, Part, PartKind};
pub use polygon::PolygonRings;

mod part;
mod polygon;
