use std::fmt;

use crate::buffer::GeometryBuffer;

/// One line per non-empty part, each coordinate written as `[x,y]`.
impl fmt::Display for GeometryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in self.parts() {
            for coord in part.coords() {
                write!(f, "[{:?},{:?}]", coord.x, coord.y)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
