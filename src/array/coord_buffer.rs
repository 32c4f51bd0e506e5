use geo::Coord;

use crate::error::{GeometryBufferError, Result};
use crate::options::GROW_POINTS;
use crate::util::grown_len;

/// A growable store of interleaved `xyxyxy` coordinates.
///
/// The backing vector is always fully initialized; `len` is the logical cursor marking how many
/// floats have been written. Growth copies the written content into a larger allocation and
/// never shrinks, so clearing and refilling up to a previous extent does not reallocate.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordBufferBuilder {
    coords: Vec<f32>,
    len: usize,
    growth_margin: usize,
}

impl Default for CoordBufferBuilder {
    fn default() -> Self {
        Self::with_capacity(GROW_POINTS / 2)
    }
}

impl CoordBufferBuilder {
    /// Create a new builder that can hold `capacity` points before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            coords: vec![0.0f32; capacity * 2],
            len: 0,
            growth_margin: GROW_POINTS,
        }
    }

    /// Wrap existing backing storage. Its content is treated as unwritten capacity.
    ///
    /// # Errors
    ///
    /// - if `coords` has an odd number of floats
    pub fn try_from_vec(coords: Vec<f32>) -> Result<Self> {
        if coords.len() % 2 != 0 {
            return Err(GeometryBufferError::General(format!(
                "coordinate storage must hold whole xy pairs; got {} floats",
                coords.len()
            )));
        }
        Ok(Self {
            coords,
            len: 0,
            growth_margin: GROW_POINTS,
        })
    }

    /// Set the number of floats added on top of the required size when growing.
    pub fn with_growth_margin(mut self, growth_margin: usize) -> Self {
        self.growth_margin = growth_margin;
        self
    }

    /// The number of points this builder can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.coords.len() / 2
    }

    /// The number of points written.
    pub fn len(&self) -> usize {
        self.len / 2
    }

    /// The number of floats written.
    pub fn len_floats(&self) -> usize {
        self.len
    }

    /// Whether no point has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Make room for at least `num_points` points, preserving written content.
    pub fn ensure_capacity(&mut self, num_points: usize) {
        let current = self.coords.len();
        if let Some(new_len) = grown_len(current, num_points * 2, self.growth_margin, true) {
            tracing::trace!(from = current, to = new_len, "growing coordinate store");
            self.coords.resize(new_len, 0.0);
        }
    }

    /// Append one coordinate pair, growing the store if needed.
    #[inline]
    pub fn push(&mut self, x: f32, y: f32) {
        if self.len + 2 > self.coords.len() {
            self.ensure_capacity(self.len / 2 + 1);
        }
        self.coords[self.len] = x;
        self.coords[self.len + 1] = y;
        self.len += 2;
    }

    /// The coordinate at point position `i`.
    ///
    /// # Errors
    ///
    /// - if `i` is not a written point position
    pub fn get(&self, i: usize) -> Result<Coord<f32>> {
        self.check_bounds(i)?;
        Ok(Coord {
            x: self.coords[i * 2],
            y: self.coords[i * 2 + 1],
        })
    }

    /// Overwrite the coordinate at point position `i`.
    ///
    /// # Errors
    ///
    /// - if `i` is not a written point position
    pub fn set(&mut self, i: usize, x: f32, y: f32) -> Result<()> {
        self.check_bounds(i)?;
        self.coords[i * 2] = x;
        self.coords[i * 2 + 1] = y;
        Ok(())
    }

    fn check_bounds(&self, i: usize) -> Result<()> {
        if i >= self.len() {
            return Err(GeometryBufferError::OutOfBounds {
                index: i,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// The written floats.
    pub fn values(&self) -> &[f32] {
        &self.coords[..self.len]
    }

    /// Apply `f` to every written coordinate pair in place.
    #[inline]
    pub fn map_coords_in_place(&mut self, mut f: impl FnMut(f32, f32) -> (f32, f32)) {
        for pair in self.coords[..self.len].chunks_exact_mut(2) {
            let (x, y) = f(pair[0], pair[1]);
            pair[0] = x;
            pair[1] = y;
        }
    }

    /// Forget all written coordinates, keeping the allocation.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_odd_storage() {
        CoordBufferBuilder::try_from_vec(vec![0.0; 3]).expect_err("odd float count");
        let builder = CoordBufferBuilder::try_from_vec(vec![0.0; 4]).unwrap();
        assert_eq!(builder.capacity(), 2);
        assert!(builder.is_empty());
    }

    #[test]
    fn grows_past_capacity() {
        let mut builder = CoordBufferBuilder::with_capacity(1).with_growth_margin(2);
        builder.push(1.0, 2.0);
        assert_eq!(builder.capacity(), 1);
        builder.push(3.0, 4.0);
        // max(4, 2 * 2) + 2 floats
        assert_eq!(builder.capacity(), 3);
        assert_eq!(builder.values(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn bounds_are_checked() {
        let mut builder = CoordBufferBuilder::with_capacity(8);
        builder.push(1.0, 2.0);
        assert_eq!(
            builder.get(1),
            Err(GeometryBufferError::OutOfBounds { index: 1, len: 1 })
        );
        assert!(builder.set(1, 0.0, 0.0).is_err());
        builder.set(0, 5.0, 6.0).unwrap();
        assert_eq!(builder.get(0).unwrap(), Coord { x: 5.0, y: 6.0 });
    }
}
