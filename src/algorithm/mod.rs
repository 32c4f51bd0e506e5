//! In-place coordinate transforms over the written extent of a buffer.

pub use affine_ops::AffineOps;
pub use scale::Scale;
pub use translate::Translate;

mod affine_ops;
mod scale;
mod translate;
