//! Conversions to and from [`geo`] geometries, and the diagnostic text rendering.

mod display;
pub mod geo;
