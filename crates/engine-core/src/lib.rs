//! engine-core: core 2D types and render-side collaborators for Rune controls.
//!
//! - Geometry and premultiplied linear color (`Rect`, `ColorLinPremul`).
//! - The sprite batch interface and a recording [`Painter`].
//! - [`Font`] services with a shared line layout ([`GlyphLayout`]).

mod color;
mod display_list;
mod painter;
mod scene;
mod text;
mod text_layout;

pub use display_list::*;
pub use painter::*;
pub use scene::*;
pub use text::{Font, FontdueFont, MonospaceFont};
pub use text_layout::{GlyphLayout, Justify, LayoutLine, PositionedGlyph, TextFrame};
