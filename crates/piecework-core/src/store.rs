//! Ordered, index-addressed storage for pieces.
//!
//! A piece's index is its only handle, and indices are **not stable**:
//!
//! - [`PieceStore::crop`] removes the cropped piece and appends its children
//!   at the end, shifting every later index down by one first
//! - [`PieceStore::combine`] removes the second operand, shifting every
//!   later index down by one
//!
//! Callers re-resolve indices (usually with a fresh hit test) after any
//! structural change. Both structural operations validate and stage their
//! work before touching the collection, so a failed call leaves the store
//! exactly as it was.

use std::ops::Index;

use tracing::info;

use crate::error::EditError;
use crate::geometry::Vector2;
use crate::hit::{find_piece_at, HitMode};
use crate::piece::{ExportLayout, Piece};
use crate::transform::{absorb, bind_pieces, crop_piece};

/// The pieces of one editing session, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PieceStore {
    pieces: Vec<Piece>,
}

impl PieceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the single whole-image piece.
    pub fn with_image(width: u32, height: u32, world_position: Vector2) -> Self {
        Self {
            pieces: vec![Piece::whole_image(width, height, world_position)],
        }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Layout of the piece at `index` for writing it out as its own image.
    /// See [`Piece::export_layout`].
    pub fn export(&self, index: usize) -> Result<ExportLayout, EditError> {
        self.check_index(index)?;
        Ok(self.pieces[index].export_layout())
    }

    fn check_index(&self, index: usize) -> Result<(), EditError> {
        if index < self.pieces.len() {
            Ok(())
        } else {
            Err(EditError::IndexOutOfRange {
                index,
                len: self.pieces.len(),
            })
        }
    }

    /// Move a piece by `delta` in world space.
    pub fn translate(&mut self, index: usize, delta: Vector2) -> Result<(), EditError> {
        self.check_index(index)?;
        self.pieces[index].placement += delta;
        Ok(())
    }

    /// Index of the piece under `point`. See [`find_piece_at`].
    pub fn find_at(&self, point: Vector2, mode: HitMode) -> Option<usize> {
        find_piece_at(&self.pieces, point, mode)
    }

    /// Replace the piece at `index` with its `grid_x` by `grid_y` crop.
    ///
    /// The children are appended at the end of the store in row-major order.
    ///
    /// # Returns
    ///
    /// The index range now occupied by the children.
    ///
    /// # Errors
    ///
    /// - [`EditError::IndexOutOfRange`] for a stale index
    /// - [`EditError::Crop`] for an invalid or 1x1 grid
    pub fn crop(
        &mut self,
        index: usize,
        grid_x: i32,
        grid_y: i32,
    ) -> Result<std::ops::Range<usize>, EditError> {
        self.check_index(index)?;
        let children = crop_piece(&self.pieces[index], grid_x, grid_y)?;

        self.pieces.remove(index);
        let start = self.pieces.len();
        self.pieces.extend(children);

        info!(
            index,
            grid_x,
            grid_y,
            created = self.pieces.len() - start,
            "Cropped piece"
        );
        Ok(start..self.pieces.len())
    }

    /// Run [`bind_pieces`] on two stored pieces, moving `second` next to `first`.
    ///
    /// # Returns
    ///
    /// The offset of `second`'s origin relative to `first`'s origin, to be
    /// passed to [`PieceStore::combine`].
    pub fn bind(&mut self, first: usize, second: usize, snap: bool) -> Result<Vector2, EditError> {
        self.check_pair(first, second)?;
        let (first_piece, second_piece) = self.pair_mut(first, second);
        Ok(bind_pieces(first_piece, second_piece, snap))
    }

    /// Merge `second` into `first` and remove `second`.
    ///
    /// Every region of `second` is translated by `delta` into `first`'s local
    /// space and appended after `first`'s regions. All indices above `second`
    /// shift down by one.
    ///
    /// # Returns
    ///
    /// The index of the merged piece after removal (`first - 1` when
    /// `first > second`, otherwise `first`).
    ///
    /// # Errors
    ///
    /// - [`EditError::IndexOutOfRange`] if either index is stale
    /// - [`EditError::SamePiece`] if both indices are equal
    pub fn combine(&mut self, first: usize, second: usize, delta: Vector2) -> Result<usize, EditError> {
        self.check_pair(first, second)?;

        let absorbed = self.pieces.remove(second);
        let merged = if first > second { first - 1 } else { first };
        absorb(&mut self.pieces[merged], absorbed, delta);

        info!(first, second, merged, "Combined pieces");
        Ok(merged)
    }

    fn check_pair(&self, first: usize, second: usize) -> Result<(), EditError> {
        self.check_index(first)?;
        self.check_index(second)?;
        if first == second {
            return Err(EditError::SamePiece(first));
        }
        Ok(())
    }

    /// Borrow two distinct pieces, the first shared and the second mutable.
    fn pair_mut(&mut self, first: usize, second: usize) -> (&Piece, &mut Piece) {
        if first < second {
            let (head, tail) = self.pieces.split_at_mut(second);
            (&head[first], &mut tail[0])
        } else {
            let (head, tail) = self.pieces.split_at_mut(first);
            (&tail[0], &mut head[second])
        }
    }
}

impl Index<usize> for PieceStore {
    type Output = Piece;

    fn index(&self, index: usize) -> &Piece {
        &self.pieces[index]
    }
}

impl From<Vec<Piece>> for PieceStore {
    fn from(pieces: Vec<Piece>) -> Self {
        debug_assert!(pieces.iter().all(|p| !p.regions.is_empty()));
        Self { pieces }
    }
}
