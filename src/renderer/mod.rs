//! Rendering module
//!
//! `scene::render` turns the game state into a `Frame` display list. Only
//! the Canvas2D backend touches the browser.

pub mod frame;
pub mod icons;
pub mod palette;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use frame::{DrawCmd, Font, FontFamily, Frame, Stroke};
pub use palette::Color;
pub use scene::{RenderOptions, render};
