//! Grid cropping of a single piece.
//!
//! The piece's world-space bounding box is divided into `grid_x * grid_y`
//! equal cells. Every region is clipped against every cell; each clip with a
//! positive area becomes a region of the cell's new piece, with its source
//! rectangle shifted by the same amount the clip moved away from the
//! region's destination origin. Cells that receive nothing are dropped.
//!
//! # Coordinate System
//!
//! - Cell sizes are `bounds / grid` in `f32`, no rounding to whole pixels
//! - Output pieces are placed at their cell's world-space top-left corner
//! - Output regions are re-based so the cell's top-left is the local origin
//!
//! # Example
//!
//! ```ignore
//! // A 100x100 piece at the origin
//! let piece = Piece::whole_image(100, 100, Vector2::ZERO);
//! let quarters = crop_piece(&piece, 2, 2)?;
//! assert_eq!(quarters.len(), 4);
//! assert_eq!(quarters[3].placement, Vector2::new(50.0, 50.0));
//! ```

use tracing::{error, warn};

use crate::error::CropError;
use crate::geometry::{Rectangle, Vector2};
use crate::piece::{Piece, Region};

/// Check crop grid dimensions before any geometry is touched.
pub fn validate_grid(grid_x: i32, grid_y: i32) -> Result<(), CropError> {
    if grid_x < 1 || grid_y < 1 {
        error!(grid_x, grid_y, "Crop failed: values must both be greater than 0");
        return Err(CropError::InvalidGrid {
            x: grid_x,
            y: grid_y,
        });
    }

    if grid_x == 1 && grid_y == 1 {
        warn!("Crop not done: a 1x1 grid leaves the piece unchanged");
        return Err(CropError::NoOpGrid);
    }

    Ok(())
}

/// Split `piece` into a `grid_x` by `grid_y` grid of new pieces.
///
/// # Returns
///
/// The non-empty cells as new pieces in row-major order (top row first,
/// left to right). The input piece is not modified; replacing it with the
/// output is the caller's job (see [`crate::store::PieceStore::crop`]).
///
/// # Errors
///
/// - [`CropError::InvalidGrid`] if either axis is below 1
/// - [`CropError::NoOpGrid`] for a 1x1 grid
///
/// # Panics
///
/// Panics if `piece` has no regions.
pub fn crop_piece(piece: &Piece, grid_x: i32, grid_y: i32) -> Result<Vec<Piece>, CropError> {
    validate_grid(grid_x, grid_y)?;

    let bounds = piece.world_bounds();
    let cell_size = Vector2::new(bounds.width / grid_x as f32, bounds.height / grid_y as f32);

    let mut pieces = Vec::new();
    for y in 0..grid_y {
        for x in 0..grid_x {
            let cell = Rectangle::new(
                bounds.x + x as f32 * cell_size.x,
                bounds.y + y as f32 * cell_size.y,
                cell_size.x,
                cell_size.y,
            );

            let regions: Vec<Region> = piece
                .regions
                .iter()
                .filter_map(|region| clip_region(region, piece.placement, &cell))
                .collect();

            if !regions.is_empty() {
                pieces.push(Piece::new(regions, cell.position()));
            }
        }
    }

    Ok(pieces)
}

/// Clip one region (of a piece placed at `placement`) against a world-space
/// cell, producing a region local to that cell.
fn clip_region(region: &Region, placement: Vector2, cell: &Rectangle) -> Option<Region> {
    let dest = region.world_destination(placement);
    let overlap = dest.intersect(cell);
    if overlap.area() <= 0.0 {
        return None;
    }

    let source = Rectangle::new(
        region.source.x + (overlap.x - dest.x),
        region.source.y + (overlap.y - dest.y),
        overlap.width,
        overlap.height,
    );
    let destination = overlap.translated(-cell.position());

    Some(Region::new(source, destination))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
