//! Error types for piece editing operations.
//!
//! Every error here is recoverable: the operation that produced it left the
//! piece store untouched, and the caller decides how to report it.

use thiserror::Error;

/// Why a crop request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CropError {
    /// At least one grid axis is below 1.
    #[error("Crop values must both be greater than 0: x = {x}, y = {y}")]
    InvalidGrid { x: i32, y: i32 },

    /// A 1x1 grid would reproduce the piece unchanged.
    #[error("Crop grid is 1x1, nothing to subdivide")]
    NoOpGrid,
}

/// Errors from structural edits and session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A piece index does not refer to a stored piece, usually because it
    /// was not re-resolved after a crop or combine.
    #[error("Piece index {index} is out of range (store holds {len} pieces)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Both operands of a combine are the same piece.
    #[error("Cannot combine piece {0} with itself")]
    SamePiece(usize),

    /// The operation needs a loaded image.
    #[error("No image loaded")]
    NoImage,

    /// The operation needs a selected piece.
    #[error("No piece selected")]
    NoSelection,

    /// A combine or crop confirmation is still waiting for an answer.
    #[error("Another edit is waiting for confirmation")]
    DialogOpen,

    #[error(transparent)]
    Crop(#[from] CropError),
}
