//! WASM-compatible wrapper types for piece geometry.
//!
//! Points and offsets cross the boundary as small `Copy` structs with public
//! fields; piece indices cross as `i32` with `-1` meaning "no piece".

use piecework_core::{DragOutcome, Piece, Vector2};
use wasm_bindgen::prelude::*;

/// A point or offset for JavaScript.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsVector2 {
    pub x: f32,
    pub y: f32,
}

#[wasm_bindgen]
impl JsVector2 {
    #[wasm_bindgen(constructor)]
    pub fn new(x: f32, y: f32) -> JsVector2 {
        JsVector2 { x, y }
    }
}

impl From<Vector2> for JsVector2 {
    fn from(v: Vector2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Result of a primary-button drag.
///
/// When `piece` is `-1` nothing was moved and the caller should pan its
/// camera by `(-dx, -dy)`. Otherwise `piece` is the moved piece's index.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsDragOutcome {
    pub piece: i32,
    pub dx: f32,
    pub dy: f32,
}

impl From<DragOutcome> for JsDragOutcome {
    fn from(outcome: DragOutcome) -> Self {
        match outcome {
            DragOutcome::MovedPiece(index) => Self {
                piece: index_to_js(Some(index)),
                dx: 0.0,
                dy: 0.0,
            },
            DragOutcome::Pan(delta) => Self {
                piece: -1,
                dx: delta.x,
                dy: delta.y,
            },
        }
    }
}

/// Convert an optional piece index to the JS convention (`-1` = none).
pub(crate) fn index_to_js(index: Option<usize>) -> i32 {
    index
        .and_then(|i| i32::try_from(i).ok())
        .unwrap_or(-1)
}

/// Number of floats per region in [`region_quads`].
pub const QUAD_STRIDE: usize = 8;

/// Flatten a piece's regions for drawing.
///
/// Each region becomes eight floats: the source rectangle
/// `(x, y, width, height)` followed by the world-space destination
/// rectangle, in draw order. This maps directly onto
/// `CanvasRenderingContext2D.drawImage(image, sx, sy, sw, sh, dx, dy, dw, dh)`.
pub(crate) fn region_quads(piece: &Piece) -> Vec<f32> {
    let mut out = Vec::with_capacity(piece.regions.len() * QUAD_STRIDE);
    for region in &piece.regions {
        let s = region.source;
        let d = region.world_destination(piece.placement);
        out.extend_from_slice(&[s.x, s.y, s.width, s.height, d.x, d.y, d.width, d.height]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use piecework_core::{Rectangle, Region};

    #[test]
    fn test_index_to_js() {
        assert_eq!(index_to_js(None), -1);
        assert_eq!(index_to_js(Some(0)), 0);
        assert_eq!(index_to_js(Some(42)), 42);
    }

    #[test]
    fn test_drag_outcome_conversion() {
        let moved = JsDragOutcome::from(DragOutcome::MovedPiece(3));
        assert_eq!(moved.piece, 3);

        let pan = JsDragOutcome::from(DragOutcome::Pan(Vector2::new(2.0, -1.5)));
        assert_eq!(pan.piece, -1);
        assert_eq!((pan.dx, pan.dy), (2.0, -1.5));
    }

    #[test]
    fn test_region_quads_world_space() {
        let piece = Piece::new(
            vec![
                Region::new(
                    Rectangle::new(10.0, 20.0, 5.0, 6.0),
                    Rectangle::new(0.0, 0.0, 5.0, 6.0),
                ),
                Region::new(
                    Rectangle::new(0.0, 0.0, 2.0, 2.0),
                    Rectangle::new(5.0, 0.0, 2.0, 2.0),
                ),
            ],
            Vector2::new(100.0, 200.0),
        );

        let quads = region_quads(&piece);

        assert_eq!(quads.len(), 2 * QUAD_STRIDE);
        assert_eq!(
            &quads[..QUAD_STRIDE],
            &[10.0, 20.0, 5.0, 6.0, 100.0, 200.0, 5.0, 6.0]
        );
        assert_eq!(
            &quads[QUAD_STRIDE..],
            &[0.0, 0.0, 2.0, 2.0, 105.0, 200.0, 2.0, 2.0]
        );
    }
}
