//! Conversion between [`GeometryBuffer`] and [`geo`] geometries.

use geo::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::buffer::GeometryBuffer;
use crate::capacity::GeometryCapacity;
use crate::datatypes::GeometryType;
use crate::error::{GeometryBufferError, Result};

impl GeometryBuffer {
    /// Add a [`geo::Point`] to a point buffer.
    pub fn add_geo_point(&mut self, point: &Point<f32>) -> Result<()> {
        self.start_points()?;
        self.add_coord(&point.0)
    }

    /// Add a [`geo::LineString`] as a new line part.
    pub fn add_line_string(&mut self, line_string: &LineString<f32>) -> Result<()> {
        self.start_line()?;
        self.extend_coords(line_string.coords())
    }

    /// Add a [`geo::Polygon`] as a new outer ring followed by one hole per interior ring.
    ///
    /// # Errors
    ///
    /// - if the buffer holds another geometry type
    /// - if the polygon has interior rings but an empty exterior
    pub fn add_polygon(&mut self, polygon: &Polygon<f32>) -> Result<()> {
        if polygon.exterior().0.is_empty() && !polygon.interiors().is_empty() {
            return Err(GeometryBufferError::General(
                "Polygon with interior rings must have a non-empty exterior".to_string(),
            ));
        }
        self.start_polygon()?;
        self.extend_coords(polygon.exterior().coords())?;
        for int_ring in polygon.interiors() {
            self.start_hole()?;
            self.extend_coords(int_ring.coords())?;
        }
        Ok(())
    }

    /// Add a geo geometry.
    ///
    /// The geometry must be a Point, LineString, Polygon or one of their Multi variants, and
    /// must match the geometry type already committed to this buffer.
    pub fn add_geometry(&mut self, geometry: &Geometry<f32>) -> Result<()> {
        match geometry {
            Geometry::Point(p) => self.add_geo_point(p)?,
            Geometry::MultiPoint(mp) => {
                for p in mp.iter() {
                    self.add_geo_point(p)?;
                }
            }
            Geometry::LineString(ls) => self.add_line_string(ls)?,
            Geometry::MultiLineString(mls) => {
                for ls in mls.iter() {
                    self.add_line_string(ls)?;
                }
            }
            Geometry::Polygon(p) => self.add_polygon(p)?,
            Geometry::MultiPolygon(mp) => {
                for p in mp.iter() {
                    self.add_polygon(p)?;
                }
            }
            _ => {
                return Err(GeometryBufferError::General(
                    "Expected point, line string or polygon geometry".to_string(),
                ))
            }
        }
        Ok(())
    }

    fn extend_coords<'a>(&mut self, coords: impl Iterator<Item = &'a Coord<f32>>) -> Result<()> {
        coords.into_iter().try_for_each(|c| self.add_coord(c))
    }

    /// Decode the buffer into a geo geometry.
    ///
    /// Points decode to a [`MultiPoint`], lines to a [`MultiLineString`] and polygons to a
    /// [`MultiPolygon`]. Returns `None` for an empty type tag and for meshes.
    pub fn to_geo(&self) -> Option<Geometry<f32>> {
        match self.geometry_type() {
            GeometryType::None | GeometryType::Mesh => None,
            GeometryType::Point => Some(Geometry::MultiPoint(MultiPoint::new(
                self.parts()
                    .flat_map(|part| part.coords())
                    .map(Point::from)
                    .collect(),
            ))),
            GeometryType::Line => Some(Geometry::MultiLineString(MultiLineString::new(
                self.parts().map(|part| part.to_line_string()).collect(),
            ))),
            GeometryType::Polygon => Some(Geometry::MultiPolygon(MultiPolygon::new(
                self.polygons().map(|rings| rings.to_polygon()).collect(),
            ))),
        }
    }
}

impl TryFrom<&Geometry<f32>> for GeometryBuffer {
    type Error = GeometryBufferError;

    fn try_from(value: &Geometry<f32>) -> Result<Self> {
        let mut capacity = GeometryCapacity::new_empty();
        capacity.add_geometry(value)?;
        let mut geom = GeometryBuffer::with_geometry_capacity(capacity);
        geom.add_geometry(value)?;
        Ok(geom)
    }
}
