//! Piecework Core - piece geometry engine
//!
//! This crate splits a loaded image into movable rectangular pieces, crops
//! pieces into grids and recombines them, while keeping an exact mapping
//! from every piece rectangle back to the source image. It only manipulates
//! rectangle metadata; decoding, drawing and input belong to the front end.
//!
//! # Module Structure
//!
//! - `geometry` - Rectangle algebra (intersection, overlap area, containment)
//! - `piece` - Regions, pieces, bounds computation and export layout
//! - `hit` - Point-to-piece hit testing
//! - `transform` - Grid cropping, binding and combining
//! - `store` - Index-addressed piece storage with atomic structural edits
//! - `session` - Interaction state for one loaded image
//! - `config` - Session configuration

pub mod config;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod piece;
pub mod session;
pub mod store;
pub mod transform;

pub use config::SessionConfig;
pub use error::{CropError, EditError};
pub use geometry::{Rectangle, Vector2};
pub use hit::{find_piece_at, HitMode};
pub use piece::{compute_bounds, ExportLayout, Piece, Region};
pub use session::{DragOutcome, EditorSession, PendingCombine};
pub use store::PieceStore;
pub use transform::{bind_pieces, crop_piece, SnapAnchor};
