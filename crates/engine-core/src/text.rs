//! Font services for UI controls.
//!
//! A [`Font`] answers the questions an editable control asks every frame:
//! which caret stop is nearest a point, where a given stop is, how large a
//! string is, and how to emit its glyphs to a [`SpriteBatch`]. Implementations
//! only provide per-character metrics; the queries default to [`GlyphLayout`].
//!
//! Two fonts are provided:
//! - [`MonospaceFont`]: fixed advance, deterministic; used by tests and as a
//!   fallback when no font file is configured.
//! - [`FontdueFont`]: advances from a TrueType/OpenType face via `fontdue`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::painter::SpriteBatch;
use crate::scene::{ColorLinPremul, Rect, Sprite, TextureId, Uvs};
use crate::text_layout::{GlyphLayout, TextFrame};

/// Glyph metrics and text queries used by controls.
pub trait Font: Send + Sync {
    /// Horizontal advance of `ch` at `size` pixels.
    fn advance(&self, ch: char, size: f32) -> f32;

    /// Atlas texture holding this font's glyphs.
    fn texture(&self) -> TextureId;

    /// Atlas coordinates for `ch`, or `None` when the glyph has no image.
    fn glyph_uvs(&self, ch: char) -> Option<Uvs>;

    fn layout(&self, text: &str, frame: &TextFrame) -> GlyphLayout {
        GlyphLayout::new(text, *frame, |c| self.advance(c, frame.size))
    }

    /// Nearest insertion index for `location` and the caret location for it.
    fn index_at_location(
        &self,
        text: &str,
        frame: &TextFrame,
        location: [f32; 2],
    ) -> Option<(usize, [f32; 2])> {
        self.layout(text, frame).index_at_location(location)
    }

    /// Caret location for a character index in `0..=len`.
    fn location_at_index(&self, text: &str, frame: &TextFrame, index: usize) -> Option<[f32; 2]> {
        self.layout(text, frame).location_at_index(index)
    }

    /// Bounding box of the laid-out text.
    fn measure_text(&self, text: &str, frame: &TextFrame) -> Rect {
        self.layout(text, frame).bounds()
    }

    /// Emit one sprite per visible glyph, clipped to `clip`.
    fn draw_text(
        &self,
        batch: &mut dyn SpriteBatch,
        text: &str,
        frame: &TextFrame,
        color: ColorLinPremul,
        clip: Rect,
    ) {
        let layout = self.layout(text, frame);
        let texture = self.texture();
        for glyph in layout.glyphs() {
            if glyph.ch.is_whitespace() || glyph.rect.w <= 0.0 {
                continue;
            }
            let Some(uvs) = self.glyph_uvs(glyph.ch) else {
                continue;
            };
            batch.draw(Sprite {
                texture,
                dst: glyph.rect,
                uvs,
                color,
                clip,
            });
        }
    }
}

/// Fixed-advance font over a 16x16 code-point grid atlas (Latin-1 range).
#[derive(Clone, Debug)]
pub struct MonospaceFont {
    texture: TextureId,
    advance_ratio: f32,
}

impl MonospaceFont {
    /// Glyphs advance by `advance_ratio * size` pixels.
    pub fn new(texture: TextureId, advance_ratio: f32) -> Self {
        Self {
            texture,
            advance_ratio: advance_ratio.max(0.0),
        }
    }
}

impl Default for MonospaceFont {
    fn default() -> Self {
        Self::new(TextureId(0), 0.5)
    }
}

impl Font for MonospaceFont {
    fn advance(&self, _ch: char, size: f32) -> f32 {
        self.advance_ratio * size
    }

    fn texture(&self) -> TextureId {
        self.texture
    }

    fn glyph_uvs(&self, ch: char) -> Option<Uvs> {
        let code = ch as u32;
        if code > 0xFF {
            return None;
        }
        let cell = 1.0 / 16.0;
        let u1 = (code % 16) as f32 * cell;
        let v1 = (code / 16) as f32 * cell;
        Some(Uvs {
            u1,
            v1,
            u2: u1 + cell,
            v2: v1 + cell,
        })
    }
}

/// TrueType/OpenType font measured with `fontdue`.
///
/// Glyph images are expected in an atlas owned by the renderer; `set_glyph_uvs`
/// registers where each glyph landed. Glyphs without an atlas entry are measured
/// but not drawn.
pub struct FontdueFont {
    font: fontdue::Font,
    texture: TextureId,
    atlas: HashMap<char, Uvs>,
}

impl FontdueFont {
    pub fn from_bytes(bytes: &[u8], texture: TextureId) -> anyhow::Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| anyhow::anyhow!(e))?;
        Ok(Self {
            font,
            texture,
            atlas: HashMap::new(),
        })
    }

    pub fn load(path: impl AsRef<Path>, texture: TextureId) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read font file {}", path.display()))?;
        Self::from_bytes(&bytes, texture)
    }

    pub fn set_glyph_uvs(&mut self, ch: char, uvs: Uvs) {
        self.atlas.insert(ch, uvs);
    }
}

impl Font for FontdueFont {
    fn advance(&self, ch: char, size: f32) -> f32 {
        self.font.metrics(ch, size.max(1.0)).advance_width
    }

    fn texture(&self) -> TextureId {
        self.texture
    }

    fn glyph_uvs(&self, ch: char) -> Option<Uvs> {
        self.atlas.get(&ch).copied()
    }
}
