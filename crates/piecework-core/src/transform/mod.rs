//! Structural piece operations: grid cropping and two-piece combining.
//!
//! These functions work on standalone [`Piece`](crate::piece::Piece) values
//! and never touch a store. [`PieceStore`](crate::store::PieceStore) wraps
//! them so that a failed operation leaves the store unchanged.
//!
//! # Coordinate System
//!
//! - All placement math happens in world space (piece-local + placement)
//! - Output regions are always expressed in their owning piece's local space
//! - Source rectangles are never scaled, only shifted and clipped

mod combine;
mod crop;

pub use combine::{absorb, best_snap, bind_pieces, SnapAnchor};
pub use crop::{crop_piece, validate_grid};
