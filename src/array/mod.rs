//! The growable backing stores of a [`GeometryBuffer`][crate::GeometryBuffer].

pub use coord_buffer::CoordBufferBuilder;
pub use part_index::{PartIndexBuilder, SPACER, TERMINATOR};

pub mod coord_buffer;
pub mod part_index;
