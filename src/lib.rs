//! A compact, mutable, append-only encoding of 2D vector geometry (points, line strings,
//! polygons with holes, mesh vertices) into a flat coordinate buffer and a 16-bit part index,
//! ready to be handed to a tessellation stage without copying.
//!
//! A [`GeometryBuffer`] is meant to be constructed once and reused: fill it, hand its
//! [`coords`](GeometryBuffer::coords) and [`index`](GeometryBuffer::index) to a consumer, then
//! [`clear`](GeometryBuffer::clear) it for the next geometry.

#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use buffer::GeometryBuffer;
pub use capacity::GeometryCapacity;
pub use datatypes::GeometryType;
pub use options::BufferOptions;

pub mod algorithm;
pub mod array;
mod buffer;
pub mod capacity;
pub mod datatypes;
pub mod error;
pub mod io;
pub mod iterator;
pub mod options;
pub mod scalar;
pub mod tessellation;
mod util;
