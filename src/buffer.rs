//! Contains the [`GeometryBuffer`], a reusable encoder of one geometry into flat buffers.

use geo::Coord;

use crate::array::{CoordBufferBuilder, PartIndexBuilder, SPACER};
use crate::capacity::GeometryCapacity;
use crate::datatypes::GeometryType;
use crate::error::{GeometryBufferError, Result};
use crate::options::BufferOptions;

/// Temporary geometry data for processing.
///
/// Only one geometry type can be set at a time. Use [`clear`](Self::clear) to reset the internal
/// state and reuse the allocations for the next geometry.
///
/// Coordinates are stored interleaved as `xyxyxy`. The structural index stores the number of
/// floats in each part and encodes multi-linestrings and (multi-)polygons:
///
/// - a positive value is the run-length of a part in floats,
/// - `0` is an empty part; between polygon rings it closes the current polygon,
/// - `-1` terminates the index.
///
/// Polygon rings that follow each other without a `0` in between are holes of the first ring.
///
/// Point and mesh buffers keep a single part. Its slot saturates at `i16::MAX`, so for those
/// kinds the written extent of [`coords`](Self::coords) is authoritative.
///
/// ```
/// use geometry_buffer::GeometryBuffer;
///
/// let mut geom = GeometryBuffer::new();
/// geom.start_polygon()?
///     .add_point(0.0, 0.0)
///     .add_point(4.0, 0.0)
///     .add_point(4.0, 4.0);
/// geom.start_hole()?
///     .add_point(1.0, 1.0)
///     .add_point(2.0, 1.0)
///     .add_point(2.0, 2.0);
/// assert_eq!(geom.index(), &[6, 6, -1]);
/// # Ok::<(), geometry_buffer::error::GeometryBufferError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffer {
    pub(crate) coords: CoordBufferBuilder,
    pub(crate) index: PartIndexBuilder,
    geometry_type: GeometryType,
}

impl Default for GeometryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuffer {
    /// Creates a new empty [`GeometryBuffer`] with the default capacities.
    pub fn new() -> Self {
        Self::with_options(BufferOptions::default())
    }

    /// Creates a new [`GeometryBuffer`] holding `num_points` points and `num_parts` index slots
    /// before it needs to grow.
    pub fn with_capacity(num_points: usize, num_parts: usize) -> Self {
        Self::with_options(BufferOptions::with_capacity(num_points, num_parts))
    }

    /// Creates a new [`GeometryBuffer`] sized for the geometries counted in `capacity`.
    pub fn with_geometry_capacity(capacity: GeometryCapacity) -> Self {
        Self::with_capacity(capacity.coord_capacity(), capacity.part_capacity())
    }

    /// Creates a new [`GeometryBuffer`] from explicit sizes and growth margins.
    pub fn with_options(options: BufferOptions) -> Self {
        Self {
            coords: CoordBufferBuilder::with_capacity(options.initial_points)
                .with_growth_margin(options.point_growth_margin),
            index: PartIndexBuilder::with_capacity(options.initial_parts)
                .with_growth_margin(options.part_growth_margin),
            geometry_type: GeometryType::None,
        }
    }

    /// Creates a new [`GeometryBuffer`] on top of existing backing storage.
    ///
    /// Existing content is treated as unwritten capacity. An empty vector falls back to the
    /// default capacity of that store.
    ///
    /// # Errors
    ///
    /// - if `points` has an odd number of floats
    pub fn from_storage(points: Vec<f32>, index: Vec<i16>) -> Result<Self> {
        let coords = if points.is_empty() {
            CoordBufferBuilder::default()
        } else {
            CoordBufferBuilder::try_from_vec(points)?
        };
        Ok(Self {
            coords,
            index: PartIndexBuilder::from_vec(index),
            geometry_type: GeometryType::None,
        })
    }

    /// Reset the buffer, keeping its allocations.
    pub fn clear(&mut self) {
        self.coords.clear();
        self.index.reset();
        self.geometry_type = GeometryType::None;
    }

    /// Adds a point with the coordinate x, y to the open part.
    ///
    /// A buffer with no geometry type yet is committed to [`GeometryType::Point`].
    ///
    /// # Errors
    ///
    /// - if the open line or ring would hold more floats than a structural slot can count
    #[inline]
    pub fn try_add_point(&mut self, x: f32, y: f32) -> Result<()> {
        match self.geometry_type {
            GeometryType::Line | GeometryType::Polygon => self.index.try_extend_current(2)?,
            GeometryType::None => {
                self.geometry_type = GeometryType::Point;
                self.index.saturating_extend_current(2);
            }
            GeometryType::Point | GeometryType::Mesh => self.index.saturating_extend_current(2),
        }
        self.coords.push(x, y);
        Ok(())
    }

    /// Adds a point with the coordinate x, y to the open part.
    ///
    /// ## Panics
    ///
    /// - if the open line or ring would hold more floats than a structural slot can count
    #[inline]
    pub fn add_point(&mut self, x: f32, y: f32) -> &mut Self {
        self.try_add_point(x, y).unwrap();
        self
    }

    /// Adds a [`Coord`] to the open part.
    pub fn add_coord(&mut self, coord: &Coord<f32>) -> Result<()> {
        self.try_add_point(coord.x, coord.y)
    }

    /// Overwrite the point at position `pos`.
    ///
    /// # Errors
    ///
    /// - if `pos` is not a written point position
    pub fn set_point(&mut self, pos: usize, x: f32, y: f32) -> Result<()> {
        self.coords.set(pos, x, y)
    }

    /// The point at position `i`, by value.
    ///
    /// # Errors
    ///
    /// - if `i` is not a written point position
    pub fn get_point(&self, i: usize) -> Result<Coord<f32>> {
        self.coords.get(i)
    }

    /// Set geometry type for points.
    pub fn start_points(&mut self) -> Result<&mut Self> {
        self.set_or_check_kind(GeometryType::Point)?;
        Ok(self)
    }

    /// Set geometry type for mesh vertices.
    pub fn start_mesh(&mut self) -> Result<&mut Self> {
        self.set_or_check_kind(GeometryType::Mesh)?;
        Ok(self)
    }

    /// Start a new line. Sets geometry type for lines.
    ///
    /// Calling this while the open line is still empty does not open another part.
    pub fn start_line(&mut self) -> Result<&mut Self> {
        self.set_or_check_kind(GeometryType::Line)?;

        if self.index.current() != SPACER {
            self.index.push(SPACER);
        }
        self.index.terminate();
        Ok(self)
    }

    /// Start a new polygon. Sets geometry type for polygons.
    ///
    /// When the open ring has points it is closed with a spacer, so the next ring starts an
    /// unrelated polygon rather than a hole.
    pub fn start_polygon(&mut self) -> Result<&mut Self> {
        let first = self.geometry_type == GeometryType::None;
        self.set_or_check_kind(GeometryType::Polygon)?;

        if first {
            self.index.reset_current();
        } else if self.index.current() != SPACER {
            // end polygon, then next polygon start
            self.index.push(SPACER);
            self.index.push(SPACER);
        } else if self.is_open_hole() {
            // the empty hole becomes the spacer
            self.index.push(SPACER);
        }

        self.index.terminate();
        Ok(self)
    }

    /// Starts a new polygon hole (inner ring) of the current polygon.
    ///
    /// # Errors
    ///
    /// - if the geometry type is not [`GeometryType::Polygon`]
    pub fn start_hole(&mut self) -> Result<&mut Self> {
        self.check_kind(GeometryType::Polygon)?;

        if !self.is_open_hole() {
            self.index.push(SPACER);
        }
        self.index.terminate();
        Ok(self)
    }

    /// Whether the open slot is an empty part directly following a ring with points.
    fn is_open_hole(&self) -> bool {
        let pos = self.index.position();
        pos > 0 && self.index.current() == SPACER && self.index.raw()[pos - 1] > 0
    }

    fn set_or_check_kind(&mut self, kind: GeometryType) -> Result<()> {
        if self.geometry_type == kind {
            return Ok(());
        }
        if self.geometry_type != GeometryType::None {
            return Err(GeometryBufferError::InvalidState {
                expected: kind,
                found: self.geometry_type,
            });
        }
        self.geometry_type = kind;
        Ok(())
    }

    fn check_kind(&self, kind: GeometryType) -> Result<()> {
        if self.geometry_type != kind {
            return Err(GeometryBufferError::InvalidState {
                expected: kind,
                found: self.geometry_type,
            });
        }
        Ok(())
    }

    /// Make room for at least `num_points` points without further reallocation.
    pub fn ensure_point_capacity(&mut self, num_points: usize) {
        self.coords.ensure_capacity(num_points);
    }

    /// Make room for at least `num_slots` structural slots without further reallocation.
    pub fn ensure_part_capacity(&mut self, num_slots: usize) {
        self.index.ensure_capacity(num_slots);
        self.index.terminate();
    }

    /// The geometry type currently committed to this buffer.
    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    /// Whether the buffer holds points.
    pub fn is_point(&self) -> bool {
        self.geometry_type == GeometryType::Point
    }

    /// Whether the buffer holds line strings.
    pub fn is_line(&self) -> bool {
        self.geometry_type == GeometryType::Line
    }

    /// Whether the buffer holds polygons.
    pub fn is_polygon(&self) -> bool {
        self.geometry_type == GeometryType::Polygon
    }

    /// Whether the buffer holds mesh vertices.
    pub fn is_mesh(&self) -> bool {
        self.geometry_type == GeometryType::Mesh
    }

    /// The number of points written.
    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    /// The number of floats written.
    pub fn coordinate_count(&self) -> usize {
        self.coords.len_floats()
    }

    /// The slot of the currently open part.
    pub fn part_count(&self) -> usize {
        self.index.position()
    }

    /// Whether no point has been written since the last clear.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The number of points the coordinate store holds without reallocating.
    pub fn point_capacity(&self) -> usize {
        self.coords.capacity()
    }

    /// The number of slots the structural index holds without reallocating.
    pub fn part_capacity(&self) -> usize {
        self.index.capacity()
    }

    /// The written coordinates as interleaved `xy` floats.
    ///
    /// The view is invalidated by the next mutating call.
    pub fn coords(&self) -> &[f32] {
        self.coords.values()
    }

    /// The structural index up to and including its terminator.
    ///
    /// When the storage has no room after the open part, the terminator is absent and the
    /// slice ends with the open part.
    pub fn index(&self) -> &[i16] {
        self.index.as_slice()
    }

    pub(crate) fn coords_mut(&mut self) -> &mut CoordBufferBuilder {
        &mut self.coords
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn point_roundtrip() {
        let mut geom = GeometryBuffer::new();
        for (x, y) in [(0.0, 0.0), (-1.5, 2.25), (f32::MAX, f32::MIN_POSITIVE)] {
            geom.clear();
            geom.start_points().unwrap();
            geom.add_point(x, y);
            assert_eq!(geom.get_point(0).unwrap(), Coord { x, y });
            assert!(geom.is_point());
        }
    }

    #[test]
    fn growth_preserves_content() {
        let mut geom = GeometryBuffer::with_capacity(4, 2);
        geom.start_line().unwrap();
        for i in 0..1000 {
            geom.add_point(i as f32, -(i as f32));
        }
        assert_eq!(geom.num_points(), 1000);
        assert!(geom.point_capacity() >= 1000);
        for i in 0..1000 {
            assert_eq!(
                geom.get_point(i).unwrap(),
                Coord {
                    x: i as f32,
                    y: -(i as f32)
                }
            );
        }
        assert_eq!(geom.index(), &[2000, -1]);
    }

    #[test]
    fn kind_exclusivity() {
        let mut geom = GeometryBuffer::new();
        geom.start_line().unwrap();
        let err = geom.start_polygon().unwrap_err();
        assert_eq!(
            err,
            GeometryBufferError::InvalidState {
                expected: GeometryType::Polygon,
                found: GeometryType::Line,
            }
        );
        assert!(geom.start_points().is_err());
        assert!(geom.start_mesh().is_err());

        geom.clear();
        geom.start_polygon().unwrap();
        assert!(geom.is_polygon());
    }

    #[test]
    fn start_line_is_idempotent() {
        let mut geom = GeometryBuffer::new();
        geom.start_line().unwrap();
        geom.start_line().unwrap();
        assert_eq!(geom.part_count(), 0);
        assert_eq!(geom.index(), &[0, -1]);

        geom.add_point(0.0, 0.0).add_point(1.0, 1.0);
        geom.start_line().unwrap();
        geom.start_line().unwrap();
        assert_eq!(geom.part_count(), 1);
        assert_eq!(geom.index(), &[4, 0, -1]);
    }

    #[test]
    fn hole_requires_polygon() {
        let mut geom = GeometryBuffer::new();
        assert!(matches!(
            geom.start_hole(),
            Err(GeometryBufferError::InvalidState {
                expected: GeometryType::Polygon,
                found: GeometryType::None,
            })
        ));
        geom.start_line().unwrap();
        assert!(geom.start_hole().is_err());
    }

    fn add_square(geom: &mut GeometryBuffer) {
        geom.add_point(0.0, 0.0)
            .add_point(1.0, 0.0)
            .add_point(1.0, 1.0)
            .add_point(0.0, 1.0);
    }

    #[test]
    fn polygon_hole_polygon_encoding() {
        let mut geom = GeometryBuffer::new();
        geom.clear();
        geom.start_polygon().unwrap();
        add_square(&mut geom);
        geom.start_hole().unwrap();
        add_square(&mut geom);
        geom.start_polygon().unwrap();
        add_square(&mut geom);

        assert_eq!(geom.index(), &[8, 8, 0, 8, -1]);
        assert_eq!(geom.part_count(), 3);
        assert_eq!(geom.num_points(), 12);
    }

    #[test]
    fn first_polygon_starts_at_slot_zero() {
        let mut geom = GeometryBuffer::new();
        geom.start_polygon().unwrap();
        assert_eq!(geom.index(), &[0, -1]);
        // an empty ring is not closed with a spacer
        geom.start_polygon().unwrap();
        assert_eq!(geom.index(), &[0, -1]);
    }

    #[test]
    fn consecutive_polygons_are_spaced() {
        let mut geom = GeometryBuffer::new();
        geom.start_polygon().unwrap();
        add_square(&mut geom);
        geom.start_polygon().unwrap();
        add_square(&mut geom);
        geom.start_polygon().unwrap();
        add_square(&mut geom);
        assert_eq!(geom.index(), &[8, 0, 8, 0, 8, -1]);
    }

    #[test]
    fn empty_hole_then_polygon() {
        let mut geom = GeometryBuffer::new();
        geom.start_polygon().unwrap();
        add_square(&mut geom);
        geom.start_hole().unwrap();
        geom.start_hole().unwrap();
        assert_eq!(geom.index(), &[8, 0, -1]);

        geom.start_polygon().unwrap();
        add_square(&mut geom);
        assert_eq!(geom.index(), &[8, 0, 8, -1]);
    }

    #[test]
    fn multiple_holes() {
        let mut geom = GeometryBuffer::new();
        geom.start_polygon().unwrap();
        add_square(&mut geom);
        geom.start_hole().unwrap();
        add_square(&mut geom);
        geom.start_hole().unwrap();
        add_square(&mut geom);
        assert_eq!(geom.index(), &[8, 8, 8, -1]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut geom = GeometryBuffer::with_capacity(2, 2);
        geom.start_line().unwrap();
        for i in 0..100 {
            geom.start_line().unwrap();
            geom.add_point(i as f32, 0.0).add_point(0.0, i as f32);
        }
        let points = geom.point_capacity();
        let parts = geom.part_capacity();
        assert!(points >= 200);
        assert!(parts >= 100);

        geom.clear();
        assert!(geom.is_empty());
        assert_eq!(geom.geometry_type(), GeometryType::None);
        assert_eq!(geom.index(), &[0, -1]);

        geom.start_line().unwrap();
        for i in 0..100 {
            geom.start_line().unwrap();
            geom.add_point(i as f32, 0.0).add_point(0.0, i as f32);
        }
        assert_eq!(geom.point_capacity(), points);
        assert_eq!(geom.part_capacity(), parts);
    }

    #[test]
    fn clear_does_not_leak_stale_parts() {
        let mut geom = GeometryBuffer::new();
        geom.start_line().unwrap();
        geom.add_point(0.0, 0.0).add_point(1.0, 1.0);
        geom.start_line().unwrap();
        geom.add_point(2.0, 2.0).add_point(3.0, 3.0);
        geom.clear();
        geom.start_points().unwrap();
        geom.add_point(5.0, 5.0);
        assert_eq!(geom.index(), &[2, -1]);
    }

    #[test]
    fn set_point_is_bounds_checked() {
        let mut geom = GeometryBuffer::new();
        geom.add_point(1.0, 1.0);
        geom.set_point(0, 2.0, 3.0).unwrap();
        let p = geom.get_point(0).unwrap();
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 3.0);
        assert_eq!(
            geom.set_point(1, 0.0, 0.0),
            Err(GeometryBufferError::OutOfBounds { index: 1, len: 1 })
        );
        assert!(geom.get_point(7).is_err());
    }

    #[test]
    fn bare_add_point_commits_point_kind() {
        let mut geom = GeometryBuffer::new();
        geom.add_point(1.0, 2.0);
        assert!(geom.is_point());
        assert!(geom.start_polygon().is_err());
    }

    #[test]
    fn run_length_overflow_is_atomic() {
        let mut geom = GeometryBuffer::new();
        geom.start_line().unwrap();
        let max_points = i16::MAX as usize / 2;
        for _ in 0..max_points {
            geom.add_point(0.0, 0.0);
        }
        assert_eq!(geom.try_add_point(1.0, 1.0), Err(GeometryBufferError::Overflow));
        assert_eq!(geom.num_points(), max_points);

        // a fresh part has room again
        geom.start_line().unwrap();
        geom.try_add_point(1.0, 1.0).unwrap();
    }

    #[test]
    fn point_cloud_past_slot_range() {
        let num_points = 20_000;
        let mut geom = GeometryBuffer::new();
        geom.start_points().unwrap();
        for i in 0..num_points {
            geom.add_point(i as f32, -(i as f32));
        }
        assert_eq!(geom.num_points(), num_points);
        assert_eq!(geom.index(), &[i16::MAX, -1]);
        for i in [0, 16_383, 16_384, num_points - 1] {
            assert_eq!(geom.get_point(i).unwrap(), Coord { x: i as f32, y: -(i as f32) });
        }
        let parts: Vec<_> = geom.parts().collect();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].num_points(), num_points);
    }

    #[test]
    fn mesh_vertices_past_slot_range() {
        let num_points = 20_000;
        let mut geom = GeometryBuffer::new();
        geom.start_mesh().unwrap();
        for i in 0..num_points {
            geom.try_add_point(i as f32, 1.0).unwrap();
        }
        assert_eq!(geom.num_points(), num_points);
        assert_eq!(geom.coordinate_count(), 2 * num_points);
        assert_eq!(
            geom.get_point(num_points - 1).unwrap(),
            Coord { x: (num_points - 1) as f32, y: 1.0 }
        );
        assert_eq!(geom.parts().map(|p| p.num_points()).sum::<usize>(), num_points);
    }

    #[test]
    fn explicit_storage() {
        let geom = GeometryBuffer::from_storage(vec![0.0; 8], vec![7; 3]).unwrap();
        assert_eq!(geom.point_capacity(), 4);
        assert_eq!(geom.part_capacity(), 3);
        assert_eq!(geom.index(), &[0, -1]);
        assert!(GeometryBuffer::from_storage(vec![0.0; 5], vec![]).is_err());

        let geom = GeometryBuffer::from_storage(vec![], vec![]).unwrap();
        assert!(geom.point_capacity() > 0);
        assert!(geom.part_capacity() > 0);
    }

    #[test]
    fn terminator_needs_room() {
        let mut geom = GeometryBuffer::with_capacity(4, 1);
        geom.start_line().unwrap();
        geom.add_point(0.0, 0.0);
        assert_eq!(geom.index(), &[2]);
        geom.start_line().unwrap();
        assert_eq!(geom.index(), &[2, 0, -1]);
    }

    #[test]
    fn explicit_presizing() {
        let mut geom = GeometryBuffer::with_capacity(1, 1);
        geom.ensure_point_capacity(1000);
        geom.ensure_part_capacity(100);
        assert!(geom.point_capacity() >= 1000);
        assert!(geom.part_capacity() >= 100);
        assert_eq!(geom.index(), &[0, -1]);
    }
}
