//! Iterators decoding the structural index of a [`GeometryBuffer`].

use std::iter::Peekable;

use crate::buffer::GeometryBuffer;
use crate::datatypes::GeometryType;
use crate::scalar::{IndexEntry, Part, PartKind, PolygonRings};

/// Iterator over the raw slots of the structural index, ending with the terminator.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    slots: std::slice::Iter<'a, i16>,
    done: bool,
}

impl<'a> Iterator for Entries<'a> {
    type Item = IndexEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let entry = IndexEntry::from(*self.slots.next()?);
        if entry == IndexEntry::Terminator {
            self.done = true;
        }
        Some(entry)
    }
}

/// Iterator over the non-empty parts of a [`GeometryBuffer`].
///
/// Zero-length slots are skipped. For polygons, the first ring after the start of the index or
/// after a spacer is an outer ring; the rings following it directly are its holes. Point and mesh
/// buffers yield a single part spanning every written coordinate.
#[derive(Debug, Clone)]
pub struct Parts<'a> {
    entries: Entries<'a>,
    coords: &'a [f32],
    offset: usize,
    geometry_type: GeometryType,
    in_polygon: bool,
}

impl<'a> Iterator for Parts<'a> {
    type Item = Part<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(kind) = flat_kind(self.geometry_type) {
            if self.entries.done || self.coords.is_empty() {
                return None;
            }
            self.entries.done = true;
            self.offset = self.coords.len();
            return Some(Part {
                kind,
                coords: self.coords,
            });
        }

        loop {
            let len = match self.entries.next()? {
                IndexEntry::Terminator => return None,
                IndexEntry::Spacer => {
                    self.in_polygon = false;
                    continue;
                }
                IndexEntry::Run(len) => len,
            };

            let coords = self.coords.get(self.offset..self.offset + len)?;
            self.offset += len;

            let kind = match self.geometry_type {
                GeometryType::Polygon if self.in_polygon => PartKind::Hole,
                GeometryType::Polygon => {
                    self.in_polygon = true;
                    PartKind::OuterRing
                }
                _ => PartKind::Line,
            };
            return Some(Part { kind, coords });
        }
    }
}

/// Kinds whose single part is the whole written extent rather than a run in the index.
fn flat_kind(geometry_type: GeometryType) -> Option<PartKind> {
    match geometry_type {
        GeometryType::None | GeometryType::Point => Some(PartKind::Points),
        GeometryType::Mesh => Some(PartKind::Mesh),
        GeometryType::Line | GeometryType::Polygon => None,
    }
}

/// Iterator grouping the rings of a polygon buffer into polygons.
#[derive(Debug, Clone)]
pub struct Polygons<'a> {
    parts: Peekable<Parts<'a>>,
}

impl<'a> Iterator for Polygons<'a> {
    type Item = PolygonRings<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let exterior = self.parts.next()?;
        let mut interiors = vec![];
        while let Some(hole) = self.parts.next_if(|p| p.kind == PartKind::Hole) {
            interiors.push(hole);
        }
        Some(PolygonRings {
            exterior,
            interiors,
        })
    }
}

impl<'a> Entries<'a> {
    pub(crate) fn new(index: &'a [i16]) -> Self {
        Self {
            slots: index.iter(),
            done: false,
        }
    }
}

impl<'a> Parts<'a> {
    pub(crate) fn new(coords: &'a [f32], index: &'a [i16], geometry_type: GeometryType) -> Self {
        Self {
            entries: Entries::new(index),
            coords,
            offset: 0,
            geometry_type,
            in_polygon: false,
        }
    }
}

impl<'a> Polygons<'a> {
    /// Yields nothing unless `parts` decodes a polygon buffer.
    pub(crate) fn new(mut parts: Parts<'a>) -> Self {
        if parts.geometry_type != GeometryType::Polygon {
            parts.entries.done = true;
        }
        Self {
            parts: parts.peekable(),
        }
    }
}

impl GeometryBuffer {
    /// Iterate over the decoded slots of the structural index.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self.index())
    }

    /// Iterate over the non-empty parts in encoding order.
    pub fn parts(&self) -> Parts<'_> {
        Parts::new(self.coords(), self.index(), self.geometry_type())
    }

    /// Iterate over the polygons of a polygon buffer.
    ///
    /// Yields nothing for other geometry types.
    pub fn polygons(&self) -> Polygons<'_> {
        Polygons::new(self.parts())
    }
}
