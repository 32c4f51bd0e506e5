use geo::{AffineTransform, Coord};

use crate::array::CoordBufferBuilder;
use crate::buffer::GeometryBuffer;

/// Apply an [`AffineTransform`] like [`scale`](AffineTransform::scale),
/// [`skew`](AffineTransform::skew), or [`rotate`](AffineTransform::rotate) to every written
/// coordinate, in place.
///
/// Multiple transformations can be composed in order to be efficiently applied in a single
/// pass. See [`AffineTransform`] for more on how to build up a transformation.
///
/// # Examples
/// ```
/// use geo::AffineTransform;
/// use geometry_buffer::algorithm::AffineOps;
/// use geometry_buffer::GeometryBuffer;
///
/// let mut geom = GeometryBuffer::new();
/// geom.start_points()?.add_point(1.0, 1.0);
///
/// // translate by (1, 0), then scale by 2
/// let transform = AffineTransform::new(2.0, 0.0, 2.0, 0.0, 2.0, 0.0);
/// geom.affine_transform(&transform);
///
/// assert_eq!(geom.coords(), &[4.0, 2.0]);
/// # Ok::<(), geometry_buffer::error::GeometryBufferError>(())
/// ```
pub trait AffineOps {
    fn affine_transform(&mut self, transform: &AffineTransform<f32>) -> &mut Self;
}

impl AffineOps for CoordBufferBuilder {
    fn affine_transform(&mut self, transform: &AffineTransform<f32>) -> &mut Self {
        self.map_coords_in_place(|x, y| transform.apply(Coord { x, y }).x_y());
        self
    }
}

impl AffineOps for GeometryBuffer {
    fn affine_transform(&mut self, transform: &AffineTransform<f32>) -> &mut Self {
        self.coords_mut().affine_transform(transform);
        self
    }
}
