//! Errors raised while classifying samples or building chunk meshes.

use thiserror::Error;

/// Hard failures of terrain generation.
///
/// Every variant is an invalid argument: generation is pure, so there is
/// nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerrainError {
    /// The sample grid handed to the mesh builder is not `D × D` tiles.
    #[error("sample grid holds {actual} tiles, expected {expected}")]
    GridSizeMismatch {
        /// `D * D` for the builder's chunk dimension.
        expected: usize,
        /// Length of the slice that was passed in.
        actual: usize,
    },
    /// A height curve was built without control points.
    #[error("height curve needs at least one control point")]
    EmptyCurve,
    /// Control point `index` has a smaller (or NaN) noise value than its predecessor.
    #[error("height curve control point {index} is out of order")]
    UnsortedCurve {
        /// Position of the offending point.
        index: usize,
    },
}
