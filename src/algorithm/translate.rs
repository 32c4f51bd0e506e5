use crate::array::CoordBufferBuilder;
use crate::buffer::GeometryBuffer;

pub trait Translate {
    /// Translate every written coordinate along its axes by the given offsets, in place.
    ///
    /// The structural index is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use geometry_buffer::algorithm::Translate;
    /// use geometry_buffer::GeometryBuffer;
    ///
    /// let mut geom = GeometryBuffer::new();
    /// geom.start_line()?.add_point(0.0, 0.0).add_point(5.0, 5.0);
    ///
    /// geom.translate(1.5, 3.5);
    ///
    /// assert_eq!(geom.coords(), &[1.5, 3.5, 6.5, 8.5]);
    /// # Ok::<(), geometry_buffer::error::GeometryBufferError>(())
    /// ```
    fn translate(&mut self, x_offset: f32, y_offset: f32) -> &mut Self;
}

impl Translate for CoordBufferBuilder {
    fn translate(&mut self, x_offset: f32, y_offset: f32) -> &mut Self {
        self.map_coords_in_place(|x, y| (x + x_offset, y + y_offset));
        self
    }
}

impl Translate for GeometryBuffer {
    fn translate(&mut self, x_offset: f32, y_offset: f32) -> &mut Self {
        self.coords_mut().translate(x_offset, y_offset);
        self
    }
}
