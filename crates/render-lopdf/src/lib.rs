//! PDF backend using lopdf.
//!
//! Text is set in the twelve standard PDF faces with WinAnsi encoding, so no
//! font data is embedded. Raster images become Flate-compressed RGB image
//! XObjects and vector math is drawn as filled paths.

mod encoding;
mod page;
mod renderer;

pub use encoding::{text_string, to_win_ansi};
pub use renderer::{LopdfRenderer, render_pdf};
