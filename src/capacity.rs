use geo::{Geometry, LineString, Polygon};

use crate::error::{GeometryBufferError, Result};

/// A counter for the buffer sizes of a [`GeometryBuffer`][crate::GeometryBuffer].
///
/// This can be used to reduce allocations by allocating once for exactly the geometry you are
/// about to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryCapacity {
    pub(crate) coord_capacity: usize,
    pub(crate) part_capacity: usize,
    geom_count: usize,
}

impl GeometryCapacity {
    /// Create a new capacity with known sizes.
    ///
    /// `coord_capacity` is counted in points, `part_capacity` in structural slots.
    pub fn new(coord_capacity: usize, part_capacity: usize) -> Self {
        Self {
            coord_capacity,
            part_capacity,
            geom_count: 0,
        }
    }

    /// Create a new empty capacity.
    pub fn new_empty() -> Self {
        Self::new(0, 0)
    }

    /// Return `true` if the capacity is empty.
    pub fn is_empty(&self) -> bool {
        self.coord_capacity == 0 && self.part_capacity == 0
    }

    /// The coordinate store capacity, in points
    pub fn coord_capacity(&self) -> usize {
        self.coord_capacity
    }

    /// The structural index capacity, in slots, including room for the terminator
    pub fn part_capacity(&self) -> usize {
        self.part_capacity + 1
    }

    /// Add the capacity of a single point
    #[inline]
    pub fn add_point(&mut self) {
        self.coord_capacity += 1;
        if self.part_capacity == 0 {
            self.part_capacity = 1;
        }
    }

    /// Add the capacity of the given LineString, encoded as its own part
    #[inline]
    pub fn add_line_string(&mut self, line_string: &LineString<f32>) {
        self.coord_capacity += line_string.0.len();
        self.part_capacity += 1;
        self.geom_count += 1;
    }

    /// Add the capacity of the given Polygon
    ///
    /// Every polygon after the first is separated from its predecessor by a spacer slot.
    #[inline]
    pub fn add_polygon(&mut self, polygon: &Polygon<f32>) {
        if self.geom_count > 0 {
            self.part_capacity += 1;
        }
        self.geom_count += 1;

        self.part_capacity += 1 + polygon.interiors().len();
        self.coord_capacity += polygon.exterior().0.len();
        for int_ring in polygon.interiors() {
            self.coord_capacity += int_ring.0.len();
        }
    }

    /// Add the capacity of the given Geometry
    ///
    /// The geometry must be a Point, LineString, Polygon or one of their Multi variants.
    pub fn add_geometry(&mut self, geometry: &Geometry<f32>) -> Result<()> {
        match geometry {
            Geometry::Point(_) => self.add_point(),
            Geometry::MultiPoint(mp) => mp.0.iter().for_each(|_| self.add_point()),
            Geometry::LineString(ls) => self.add_line_string(ls),
            Geometry::MultiLineString(mls) => {
                mls.0.iter().for_each(|ls| self.add_line_string(ls))
            }
            Geometry::Polygon(p) => self.add_polygon(p),
            Geometry::MultiPolygon(mp) => mp.0.iter().for_each(|p| self.add_polygon(p)),
            _ => {
                return Err(GeometryBufferError::General(
                    "Expected point, line string or polygon geometry".to_string(),
                ))
            }
        }
        Ok(())
    }

    /// Construct a new counter pre-filled with the given Polygons
    pub fn from_polygons<'a>(geoms: impl IntoIterator<Item = &'a Polygon<f32>>) -> Self {
        let mut counter = Self::new_empty();
        for polygon in geoms {
            counter.add_polygon(polygon);
        }
        counter
    }

    /// Construct a new counter pre-filled with the given LineStrings
    pub fn from_line_strings<'a>(geoms: impl IntoIterator<Item = &'a LineString<f32>>) -> Self {
        let mut counter = Self::new_empty();
        for line_string in geoms {
            counter.add_line_string(line_string);
        }
        counter
    }
}
