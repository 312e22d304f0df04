//! Piecework WASM - WebAssembly bindings for Piecework
//!
//! This crate exposes the piecework-core editing session to JavaScript and
//! TypeScript front ends. The front end owns decoding, drawing, dialogs and
//! the camera; it forwards world-space pointer positions and dialog answers
//! and draws pieces from the flat rectangle arrays returned here.
//!
//! # Module Structure
//!
//! - `session` - `JsEditorSession`, the per-image editing session
//! - `types` - WASM-compatible point and drag-result types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditorSession } from '@piecework/wasm';
//!
//! await init();
//!
//! const session = new JsEditorSession(canvas.width, canvas.height);
//! session.load_image(bitmap.width, bitmap.height);
//! session.press_primary(x, y);
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod types;

pub use session::JsEditorSession;
pub use types::{JsDragOutcome, JsVector2};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
