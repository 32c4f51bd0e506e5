use crate::array::CoordBufferBuilder;
use crate::buffer::GeometryBuffer;

/// Scales coordinates about the origin.
///
/// Unlike `geo`'s scale, this does not scale about the bounding box center: tile-local
/// coordinates are scaled into their target range directly.
pub trait Scale {
    /// Multiply every written `x` by `x_factor` and every `y` by `y_factor`, in place.
    fn scale(&mut self, x_factor: f32, y_factor: f32) -> &mut Self;
}

impl Scale for CoordBufferBuilder {
    fn scale(&mut self, x_factor: f32, y_factor: f32) -> &mut Self {
        self.map_coords_in_place(|x, y| (x * x_factor, y * y_factor));
        self
    }
}

impl Scale for GeometryBuffer {
    fn scale(&mut self, x_factor: f32, y_factor: f32) -> &mut Self {
        self.coords_mut().scale(x_factor, y_factor);
        self
    }
}
