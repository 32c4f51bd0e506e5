//! Zero-copy hand-off of an encoded [`GeometryBuffer`] to a tessellation stage.
//!
//! Triangulation itself is provided by the consumer through the [`Tessellator`] trait.

use crate::buffer::GeometryBuffer;
use crate::datatypes::GeometryType;
use crate::error::Result;
use crate::iterator::{Parts, Polygons};

/// Minimum number of floats in the first part for a geometry to be tessellated: one triangle.
const MIN_MESH_FLOATS: i16 = 6;

/// A borrowed view of the encoded buffers, valid until the next mutation of the source buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationInput<'a> {
    /// Interleaved `xy` floats up to the written extent.
    pub coords: &'a [f32],
    /// Part run-lengths in floats, up to and including the `-1` terminator.
    ///
    /// For point and mesh geometries the single slot saturates at `i16::MAX`; use `coords`.
    pub index: &'a [i16],
    /// The geometry type the index encodes.
    pub geometry_type: GeometryType,
}

impl<'a> TessellationInput<'a> {
    /// Iterate over the non-empty parts of the view.
    pub fn parts(&self) -> Parts<'a> {
        Parts::new(self.coords, self.index, self.geometry_type)
    }

    /// Iterate over the polygons of the view.
    pub fn polygons(&self) -> Polygons<'a> {
        Polygons::new(self.parts())
    }
}

impl GeometryBuffer {
    /// Export the written coordinates, the terminated index and the geometry type.
    pub fn as_tessellation_input(&self) -> TessellationInput<'_> {
        TessellationInput {
            coords: self.coords(),
            index: self.index(),
            geometry_type: self.geometry_type(),
        }
    }
}

/// Triangle mesh data: interleaved `xy` vertices and 16-bit triangle indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Interleaved `xy` vertex coordinates.
    pub vertices: Vec<f32>,
    /// Triangle corners, three per triangle, referring to vertex positions.
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 2
    }

    /// The number of triangle indices.
    pub fn num_indices(&self) -> usize {
        self.indices.len()
    }

    /// Whether the mesh holds no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Drop all vertices and indices, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

/// Triangulates polygons encoded in a [`TessellationInput`].
pub trait Tessellator {
    /// Append the triangulation of `input` to `mesh`.
    ///
    /// Appended indices refer to vertices of the whole mesh, so they are offset by the vertex
    /// count `mesh` had on entry. Returns the number of indices appended.
    fn tessellate(&mut self, input: &TessellationInput<'_>, mesh: &mut MeshData) -> Result<usize>;
}

/// Accumulates the tessellated meshes of many geometry buffers.
#[derive(Debug, Clone, Default)]
pub struct MeshLayer {
    mesh: MeshData,
    num_indices: usize,
}

impl MeshLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tessellate `geom` and append the result to this layer.
    ///
    /// Geometries whose first part holds fewer than three points are skipped. A failed
    /// tessellation leaves the layer as it was. Returns the number of indices added.
    pub fn add_mesh(
        &mut self,
        geom: &GeometryBuffer,
        tessellator: &mut impl Tessellator,
    ) -> usize {
        if geom.index().first().map_or(true, |&floats| floats < MIN_MESH_FLOATS) {
            return 0;
        }

        let num_vertices = self.mesh.vertices.len();
        let num_indices = self.mesh.indices.len();
        let added = match tessellator.tessellate(&geom.as_tessellation_input(), &mut self.mesh) {
            Ok(added) => added,
            Err(err) => {
                tracing::warn!(error = %err, "tessellation failed");
                self.mesh.vertices.truncate(num_vertices);
                self.mesh.indices.truncate(num_indices);
                0
            }
        };
        self.num_indices += added;

        if self.num_indices == 0 {
            tracing::debug!(index = ?geom.index(), "empty mesh");
            self.mesh.clear();
        }
        added
    }

    /// The accumulated mesh.
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn num_indices(&self) -> usize {
        self.num_indices
    }

    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    /// Release the accumulated mesh and return its data.
    pub fn take(&mut self) -> MeshData {
        self.num_indices = 0;
        std::mem::take(&mut self.mesh)
    }

    pub fn clear(&mut self) {
        self.num_indices = 0;
        self.mesh.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeometryBufferError;
    use crate::scalar::PartKind;
    use crate::test::polygon::filled_polygons;

    /// Triangle fan over each outer ring, ignoring holes.
    struct FanTessellator;

    impl Tessellator for FanTessellator {
        fn tessellate(
            &mut self,
            input: &TessellationInput<'_>,
            mesh: &mut MeshData,
        ) -> Result<usize> {
            let mut added = 0;
            for rings in input.polygons() {
                let base = mesh.num_vertices() as u16;
                let exterior = rings.exterior();
                mesh.vertices.extend_from_slice(exterior.values());
                for i in 1..exterior.num_points() as u16 - 1 {
                    mesh.indices.extend_from_slice(&[base, base + i, base + i + 1]);
                    added += 3;
                }
            }
            Ok(added)
        }
    }

    struct FailingTessellator;

    impl Tessellator for FailingTessellator {
        fn tessellate(
            &mut self,
            _input: &TessellationInput<'_>,
            mesh: &mut MeshData,
        ) -> Result<usize> {
            mesh.vertices.extend_from_slice(&[9.0, 9.0]);
            Err(GeometryBufferError::General("degenerate ring".to_string()))
        }
    }

    #[test]
    fn input_exposes_terminated_index() {
        let geom = filled_polygons();
        let input = geom.as_tessellation_input();
        assert_eq!(input.index, &[10, 10, 0, 10, -1]);
        assert_eq!(input.coords.len(), 30);
        assert_eq!(input.geometry_type, GeometryType::Polygon);
        let kinds: Vec<_> = input.parts().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![PartKind::OuterRing, PartKind::Hole, PartKind::OuterRing]
        );
    }

    #[test]
    fn accumulates_meshes() {
        let geom = filled_polygons();
        let mut layer = MeshLayer::new();

        // two closed 5-point rings, three triangles each
        assert_eq!(layer.add_mesh(&geom, &mut FanTessellator), 18);
        assert_eq!(layer.add_mesh(&geom, &mut FanTessellator), 18);
        assert_eq!(layer.num_indices(), 36);
        assert_eq!(layer.num_vertices(), 20);
        // indices of the second pass are offset past the first pass vertices
        assert_eq!(layer.mesh().indices[18], 10);

        let mesh = layer.take();
        assert_eq!(mesh.num_indices(), 36);
        assert!(layer.mesh().is_empty());
    }

    #[test]
    fn skips_short_first_part() {
        let mut geom = GeometryBuffer::new();
        geom.start_polygon().unwrap();
        geom.add_point(0.0, 0.0).add_point(1.0, 1.0);
        let mut layer = MeshLayer::new();
        assert_eq!(layer.add_mesh(&geom, &mut FanTessellator), 0);
        assert!(layer.mesh().is_empty());
    }

    #[test]
    fn failure_rolls_back() {
        let geom = filled_polygons();
        let mut layer = MeshLayer::new();
        layer.add_mesh(&geom, &mut FanTessellator);
        let before = layer.mesh().clone();

        assert_eq!(layer.add_mesh(&geom, &mut FailingTessellator), 0);
        assert_eq!(layer.mesh(), &before);
        assert_eq!(layer.num_indices(), 18);
    }

    #[test]
    fn empty_result_releases_mesh() {
        let geom = filled_polygons();
        let mut layer = MeshLayer::new();
        assert_eq!(layer.add_mesh(&geom, &mut FailingTessellator), 0);
        assert!(layer.mesh().vertices.is_empty());
        assert_eq!(layer.num_indices(), 0);
    }
}
