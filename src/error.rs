//! Defines [`GeometryBufferError`], representing all errors returned by this crate.

use thiserror::Error;

use crate::datatypes::GeometryType;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeometryBufferError {
    /// A part was started whose kind does not match the kind already committed to the buffer.
    ///
    /// The buffer must be [cleared][crate::GeometryBuffer::clear] before it can hold a
    /// geometry of another kind.
    #[error("geometry not cleared between incompatible types: expected {expected}, found {found}")]
    InvalidState {
        /// The kind the operation requires.
        expected: GeometryType,
        /// The kind currently committed to the buffer.
        found: GeometryType,
    },

    /// A positional read or write past the written extent of the coordinate store.
    #[error("point index {index} out of bounds for buffer of {len} points")]
    OutOfBounds {
        /// The requested point position.
        index: usize,
        /// The number of points written.
        len: usize,
    },

    /// Whenever appending to a part fails because its run-length no longer fits a structural slot.
    #[error("Overflow")]
    Overflow,

    /// General error.
    #[error("General error: {0}")]
    General(String),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeometryBufferError>;
