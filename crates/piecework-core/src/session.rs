//! A single-image editing session.
//!
//! [`EditorSession`] owns the piece store together with the interaction
//! state a front end needs between frames: the selected piece, the two
//! pieces picked for a combine and the piece waiting to be cropped. The
//! front end feeds it pointer positions (already in world space) and
//! dialog answers once per frame; the session never polls input itself.
//!
//! # Workflow
//!
//! 1. [`load_image`](EditorSession::load_image) creates the whole-image piece
//! 2. Primary press/drag selects and moves pieces, or asks the caller to pan
//! 3. Two secondary releases pick a pair to combine; while the combine is
//!    pending, [`refresh_bind`](EditorSession::refresh_bind) previews the
//!    placement each frame and [`resolve_combine`](EditorSession::resolve_combine)
//!    applies or drops it
//! 4. [`request_crop`](EditorSession::request_crop) marks the selection and
//!    [`resolve_crop`](EditorSession::resolve_crop) applies the grid
//!
//! 5. [`export_selected`](EditorSession::export_selected) lays the selection
//!    out for saving as its own image
//!
//! Only one confirmation can be pending at a time. Every structural change
//! forgets all held indices (selection, combine picks, pending dialogs),
//! since indices shift.

use std::ops::Range;

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::EditError;
use crate::geometry::Vector2;
use crate::hit::HitMode;
use crate::piece::{ExportLayout, Piece};
use crate::store::PieceStore;

/// What a primary-button drag did this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The piece at this index was moved with the pointer.
    MovedPiece(usize),
    /// Nothing is under the pointer; the caller should pan its camera by the
    /// negated delta.
    Pan(Vector2),
}

/// Two pieces waiting for the user to confirm a combine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCombine {
    pub first: usize,
    pub second: usize,
    /// Offset from the latest bind preview, if one has run.
    pub delta: Option<Vector2>,
}

/// Editing state for one loaded image.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: SessionConfig,
    store: PieceStore,
    image_size: Option<(u32, u32)>,
    selected: Option<usize>,
    combine_first: Option<usize>,
    pending_combine: Option<PendingCombine>,
    pending_crop: Option<usize>,
    pointer: Vector2,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            store: PieceStore::new(),
            image_size: None,
            selected: None,
            combine_first: None,
            pending_combine: None,
            pending_crop: None,
            pointer: Vector2::ZERO,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &PieceStore {
        &self.store
    }

    pub fn pieces(&self) -> &[Piece] {
        self.store.pieces()
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn has_image(&self) -> bool {
        self.image_size.is_some()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn pending_combine(&self) -> Option<PendingCombine> {
        self.pending_combine
    }

    pub fn pending_crop(&self) -> Option<usize> {
        self.pending_crop
    }

    /// Whether a combine or crop confirmation is waiting on the user.
    pub fn is_dialog_open(&self) -> bool {
        self.pending_combine.is_some() || self.pending_crop.is_some()
    }

    /// Start editing a decoded image of the given size.
    ///
    /// Replaces any previous pieces with one whole-image piece centred in the
    /// configured viewport and resets all interaction state.
    pub fn load_image(&mut self, width: u32, height: u32) {
        let position = self.config.centered_position(width, height);
        self.store = PieceStore::with_image(width, height, position);
        self.image_size = Some((width, height));
        self.reset_interaction();
        info!(width, height, "Loaded image");
    }

    /// Drop the image and every piece.
    pub fn close_image(&mut self) {
        self.store.clear();
        self.image_size = None;
        self.reset_interaction();
    }

    /// Forget every held piece index. Runs after any change that reorders
    /// the store.
    fn reset_interaction(&mut self) {
        self.selected = None;
        self.combine_first = None;
        self.pending_combine = None;
        self.pending_crop = None;
    }

    fn hit_mode(&self) -> HitMode {
        match self.pending_combine {
            Some(pending) => HitMode::PendingCombine {
                first: pending.first,
                second: pending.second,
            },
            None => HitMode::Normal,
        }
    }

    /// Index of the piece under `point`, honouring a pending combine.
    pub fn piece_at(&self, point: Vector2) -> Option<usize> {
        self.store.find_at(point, self.hit_mode())
    }

    /// Record the pointer position without any button held.
    pub fn move_pointer(&mut self, point: Vector2) {
        self.pointer = point;
    }

    /// Primary button went down: select whatever is under the pointer.
    pub fn press_primary(&mut self, point: Vector2) -> Option<usize> {
        self.pointer = point;
        self.selected = self.piece_at(point);
        debug!(selected = ?self.selected, "Selection changed");
        self.selected
    }

    /// Primary button is held and the pointer moved to `point`.
    ///
    /// With no selection, the piece under the pointer (if any) becomes
    /// selected first. When nothing can be moved the pointer stays anchored
    /// to its previous world position, matching a camera that pans with it.
    pub fn drag_primary(&mut self, point: Vector2) -> DragOutcome {
        let delta = point - self.pointer;

        if self.selected.is_none() {
            self.selected = self.piece_at(point);
        }

        if let Some(index) = self.selected {
            if self.store.translate(index, delta).is_ok() {
                self.pointer = point;
                return DragOutcome::MovedPiece(index);
            }
            // Stale selection; forget it and pan instead
            self.selected = None;
        }

        DragOutcome::Pan(delta)
    }

    /// Secondary button was released at `point`: pick combine candidates.
    ///
    /// The first release records the first candidate; the second opens a
    /// pending combine if it landed on a different piece. Ignored while a
    /// confirmation is pending.
    ///
    /// # Returns
    ///
    /// The piece picked by this release, if any.
    pub fn release_secondary(&mut self, point: Vector2) -> Option<usize> {
        self.pointer = point;
        if self.is_dialog_open() {
            return None;
        }

        let hit = self.piece_at(point);
        match (self.combine_first, hit) {
            (None, _) => self.combine_first = hit,
            (Some(first), Some(second)) if first != second => {
                self.pending_combine = Some(PendingCombine {
                    first,
                    second,
                    delta: None,
                });
                debug!(first, second, "Combine pending");
            }
            _ => {}
        }
        hit
    }

    /// Re-run the bind preview for the pending combine.
    ///
    /// Moves the second piece next to the first and stores the resulting
    /// offset. Returns `Ok(None)` when no combine is pending.
    ///
    /// # Errors
    ///
    /// [`EditError::IndexOutOfRange`] if the pending pair no longer names
    /// stored pieces; the pending combine is dropped.
    pub fn refresh_bind(&mut self, snap: bool) -> Result<Option<Vector2>, EditError> {
        let Some(pending) = self.pending_combine.as_mut() else {
            return Ok(None);
        };
        match self.store.bind(pending.first, pending.second, snap) {
            Ok(delta) => {
                pending.delta = Some(delta);
                Ok(Some(delta))
            }
            Err(err) => {
                warn!(%err, "Dropping pending combine");
                self.pending_combine = None;
                self.combine_first = None;
                Err(err)
            }
        }
    }

    /// Answer the combine confirmation.
    ///
    /// On confirm, merges the pair using the last previewed offset (binding
    /// without snap if no preview ran). The pending pair is cleared either way.
    ///
    /// # Returns
    ///
    /// The merged piece's index on confirm, `None` on cancel or when nothing
    /// was pending.
    pub fn resolve_combine(&mut self, confirm: bool) -> Result<Option<usize>, EditError> {
        let Some(pending) = self.pending_combine.take() else {
            return Ok(None);
        };
        self.combine_first = None;

        if !confirm {
            return Ok(None);
        }

        let delta = match pending.delta {
            Some(delta) => delta,
            None => self.store.bind(pending.first, pending.second, false)?,
        };
        let merged = self.store.combine(pending.first, pending.second, delta)?;
        self.reset_interaction();
        Ok(Some(merged))
    }

    /// Ask to crop the selected piece. The crop waits for
    /// [`resolve_crop`](EditorSession::resolve_crop).
    ///
    /// # Errors
    ///
    /// [`EditError::DialogOpen`] while a combine or crop is still pending.
    pub fn request_crop(&mut self) -> Result<usize, EditError> {
        if self.is_dialog_open() {
            warn!("Crop not started: another edit is waiting for confirmation");
            return Err(EditError::DialogOpen);
        }
        if !self.has_image() {
            warn!("No image loaded");
            return Err(EditError::NoImage);
        }
        let Some(index) = self.selected else {
            warn!("No piece selected");
            return Err(EditError::NoSelection);
        };

        self.pending_crop = Some(index);
        Ok(index)
    }

    /// Answer the crop confirmation with the grid the user chose.
    ///
    /// # Returns
    ///
    /// The index range of the new pieces on confirm, `None` on cancel or
    /// when nothing was pending.
    ///
    /// # Errors
    ///
    /// Grid and index errors from [`PieceStore::crop`]; the store is left
    /// untouched and the pending crop is still cleared.
    pub fn resolve_crop(
        &mut self,
        confirm: bool,
        grid_x: i32,
        grid_y: i32,
    ) -> Result<Option<Range<usize>>, EditError> {
        let Some(index) = self.pending_crop.take() else {
            return Ok(None);
        };

        if !confirm {
            return Ok(None);
        }

        let created = self.store.crop(index, grid_x, grid_y)?;
        self.reset_interaction();
        Ok(Some(created))
    }

    /// Lay out the selected piece for saving as its own image.
    ///
    /// # Errors
    ///
    /// [`EditError::NoSelection`] or [`EditError::NoImage`] when there is
    /// nothing to export.
    pub fn export_selected(&self) -> Result<ExportLayout, EditError> {
        let Some(index) = self.selected else {
            warn!("No piece selected");
            return Err(EditError::NoSelection);
        };
        if !self.has_image() {
            warn!("No image loaded");
            return Err(EditError::NoImage);
        }

        let layout = self.store.export(index)?;
        info!(
            index,
            width = layout.bounds.width,
            height = layout.bounds.height,
            "Exported piece"
        );
        Ok(layout)
    }
}
