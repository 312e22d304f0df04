//! Editing session bindings.
//!
//! [`JsEditorSession`] wraps the core `EditorSession` so a browser front end
//! can drive it once per animation frame: forward pointer events in world
//! coordinates, forward dialog answers, then redraw from
//! [`region_quads`](JsEditorSession::region_quads).
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditorSession(canvas.width, canvas.height);
//! session.load_image(bitmap.width, bitmap.height);
//!
//! canvas.onpointerdown = (e) => session.press_primary(e.offsetX, e.offsetY);
//!
//! function frame() {
//!   if (session.is_dialog_open) session.refresh_bind(shiftHeld);
//!   for (let i = 0; i < session.piece_count; i++) {
//!     const q = session.region_quads(i);
//!     for (let j = 0; j < q.length; j += 8) {
//!       ctx.drawImage(bitmap, q[j], q[j + 1], q[j + 2], q[j + 3], q[j + 4], q[j + 5], q[j + 6], q[j + 7]);
//!     }
//!   }
//!   requestAnimationFrame(frame);
//! }
//! ```

use piecework_core::{EditError, EditorSession, SessionConfig, Vector2};
use wasm_bindgen::prelude::*;

use crate::types::{index_to_js, region_quads, JsDragOutcome, JsVector2};

/// Convert an edit error to a JS error string, echoing it to the console.
fn to_js_error(err: EditError) -> JsValue {
    tracing::warn!(%err, "Edit rejected");
    let message = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// A single-image editing session for JavaScript.
#[wasm_bindgen]
pub struct JsEditorSession {
    inner: EditorSession,
}

#[wasm_bindgen]
impl JsEditorSession {
    /// Create a session whose new images are centred in a viewport of the
    /// given size.
    #[wasm_bindgen(constructor)]
    pub fn new(viewport_width: f32, viewport_height: f32) -> JsEditorSession {
        JsEditorSession {
            inner: EditorSession::new(SessionConfig::new(viewport_width, viewport_height)),
        }
    }

    /// Create a session from a plain config object, e.g.
    /// `{ viewport_width: 1280 }`. Missing fields use defaults.
    pub fn from_config(config: JsValue) -> Result<JsEditorSession, JsValue> {
        let config: SessionConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid session config: {}", e)))?;
        Ok(JsEditorSession {
            inner: EditorSession::new(config),
        })
    }

    /// Start editing an already-decoded image of the given size.
    pub fn load_image(&mut self, width: u32, height: u32) {
        self.inner.load_image(width, height);
    }

    /// Drop the image and all pieces.
    pub fn close_image(&mut self) {
        self.inner.close_image();
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Width of the loaded image, 0 when none is loaded.
    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> u32 {
        self.inner.image_size().map_or(0, |(width, _)| width)
    }

    /// Height of the loaded image, 0 when none is loaded.
    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> u32 {
        self.inner.image_size().map_or(0, |(_, height)| height)
    }

    /// The session config as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn piece_count(&self) -> usize {
        self.inner.pieces().len()
    }

    /// Selected piece index, or -1.
    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> i32 {
        index_to_js(self.inner.selected())
    }

    /// Piece pending crop confirmation, or -1.
    #[wasm_bindgen(getter)]
    pub fn pending_crop(&self) -> i32 {
        index_to_js(self.inner.pending_crop())
    }

    #[wasm_bindgen(getter)]
    pub fn is_dialog_open(&self) -> bool {
        self.inner.is_dialog_open()
    }

    /// Index of the piece under a world-space point, or -1.
    pub fn piece_at(&self, x: f32, y: f32) -> i32 {
        index_to_js(self.inner.piece_at(Vector2::new(x, y)))
    }

    pub fn move_pointer(&mut self, x: f32, y: f32) {
        self.inner.move_pointer(Vector2::new(x, y));
    }

    /// Primary button pressed; returns the newly selected index or -1.
    pub fn press_primary(&mut self, x: f32, y: f32) -> i32 {
        index_to_js(self.inner.press_primary(Vector2::new(x, y)))
    }

    /// Primary button held while moving.
    pub fn drag_primary(&mut self, x: f32, y: f32) -> JsDragOutcome {
        self.inner.drag_primary(Vector2::new(x, y)).into()
    }

    /// Secondary button released; returns the picked index or -1.
    pub fn release_secondary(&mut self, x: f32, y: f32) -> i32 {
        index_to_js(self.inner.release_secondary(Vector2::new(x, y)))
    }

    /// Preview the pending combine. Returns `undefined` when none is pending
    /// and throws if the pending pair went stale.
    pub fn refresh_bind(&mut self, snap: bool) -> Result<Option<JsVector2>, JsValue> {
        self.inner
            .refresh_bind(snap)
            .map(|delta| delta.map(JsVector2::from))
            .map_err(to_js_error)
    }

    /// Answer the combine dialog. Returns the merged index, or -1 on cancel.
    pub fn resolve_combine(&mut self, confirm: bool) -> Result<i32, JsValue> {
        self.inner
            .resolve_combine(confirm)
            .map(index_to_js)
            .map_err(to_js_error)
    }

    /// Mark the selected piece for cropping. Returns its index.
    pub fn request_crop(&mut self) -> Result<i32, JsValue> {
        self.inner
            .request_crop()
            .map(|index| index_to_js(Some(index)))
            .map_err(to_js_error)
    }

    /// Answer the crop dialog. Returns how many pieces were created
    /// (0 on cancel). New pieces occupy the last indices of the store.
    pub fn resolve_crop(&mut self, confirm: bool, grid_x: i32, grid_y: i32) -> Result<u32, JsValue> {
        self.inner
            .resolve_crop(confirm, grid_x, grid_y)
            .map(|created| created.map_or(0, |range| range.len() as u32))
            .map_err(to_js_error)
    }

    /// Source and world-space destination rectangles of a piece, eight
    /// floats per region. Empty for an invalid index.
    pub fn region_quads(&self, index: usize) -> Vec<f32> {
        self.inner
            .store()
            .get(index)
            .map(region_quads)
            .unwrap_or_default()
    }

    /// World-space bounds of a piece as `[x, y, width, height]`, empty for
    /// an invalid index.
    pub fn world_bounds(&self, index: usize) -> Vec<f32> {
        self.inner
            .store()
            .get(index)
            .map(|piece| {
                let b = piece.world_bounds();
                vec![b.x, b.y, b.width, b.height]
            })
            .unwrap_or_default()
    }

    /// Layout for saving the selected piece as its own image:
    /// `{ bounds, regions }` with `bounds` at the origin giving the output
    /// size and each region drawn from `source` to `destination`.
    pub fn export_selected(&self) -> Result<JsValue, JsValue> {
        let layout = self.inner.export_selected().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&layout).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Snapshot of every piece as plain JS objects.
    pub fn pieces(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.pieces()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
