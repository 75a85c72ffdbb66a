//! Line layout shared by the font implementations.
//!
//! Text is laid out into fixed-height lines inside a [`TextFrame`]. All indices
//! are character indices (not bytes) into the laid-out string; caret stops sit
//! between characters, so a string of `n` chars has stops `0..=n`.

use crate::scene::Rect;

/// Horizontal alignment of each line within the layout area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

/// Parameters shared by every font query for one piece of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextFrame {
    /// Area the text is laid out in (absolute pixels).
    pub area: Rect,
    /// Font size in pixels; also the line height.
    pub size: f32,
    pub justify: Justify,
    /// Wrap lines at the area's right edge.
    pub wrap: bool,
    pub rtl: bool,
}

/// A laid-out glyph box. Whitespace and newlines get boxes too.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    pub ch: char,
    pub index: usize,
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutLine {
    /// First char index on the line.
    pub start: usize,
    /// One past the last char index on the line.
    pub end: usize,
    /// Left edge of the line box after alignment.
    pub x: f32,
    pub top: f32,
    pub width: f32,
}

/// Glyph positions for one string in one frame.
#[derive(Clone, Debug)]
pub struct GlyphLayout {
    frame: TextFrame,
    glyphs: Vec<PositionedGlyph>,
    /// Prefix sums of advances, restarting at zero for each line.
    line_offsets: Vec<f32>,
    lines: Vec<LayoutLine>,
}

impl GlyphLayout {
    /// Lay out `text` using `advance` to size each character.
    pub fn new<F>(text: &str, frame: TextFrame, advance: F) -> Self
    where
        F: Fn(char) -> f32,
    {
        let chars: Vec<char> = text.chars().collect();
        let advances: Vec<f32> = chars
            .iter()
            .map(|&c| if c == '\n' { 0.0 } else { advance(c).max(0.0) })
            .collect();

        // Break into (start, end) ranges first, then position.
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        let mut start = 0usize;
        let mut width = 0.0f32;
        // Index just after the most recent whitespace on the current line.
        let mut break_at: Option<usize> = None;
        let mut i = 0usize;
        while i < chars.len() {
            let c = chars[i];
            if c == '\n' {
                ranges.push((start, i + 1));
                start = i + 1;
                width = 0.0;
                break_at = None;
                i += 1;
                continue;
            }
            let overflows = frame.wrap && i > start && width + advances[i] > frame.area.w;
            if overflows && !c.is_whitespace() {
                // Prefer breaking after the last space; otherwise break mid-word.
                let brk = break_at.filter(|&b| b > start).unwrap_or(i);
                ranges.push((start, brk));
                start = brk;
                width = advances[start..i].iter().sum();
                break_at = None;
            }
            width += advances[i];
            if c.is_whitespace() {
                break_at = Some(i + 1);
            }
            i += 1;
        }
        ranges.push((start, chars.len()));

        let mut glyphs = Vec::with_capacity(chars.len());
        let mut line_offsets = vec![0.0f32; chars.len() + 1];
        let mut lines = Vec::with_capacity(ranges.len());
        for (n, &(s, e)) in ranges.iter().enumerate() {
            let width: f32 = advances[s..e].iter().sum();
            let x = match frame.justify {
                Justify::Left => frame.area.x,
                Justify::Center => frame.area.x + (frame.area.w - width) * 0.5,
                Justify::Right => frame.area.right() - width,
            };
            let top = frame.area.y + n as f32 * frame.size;
            let mut acc = 0.0f32;
            for idx in s..e {
                line_offsets[idx] = acc;
                let gx = if frame.rtl {
                    x + width - acc - advances[idx]
                } else {
                    x + acc
                };
                glyphs.push(PositionedGlyph {
                    ch: chars[idx],
                    index: idx,
                    rect: Rect::new(gx, top, advances[idx], frame.size),
                });
                acc += advances[idx];
            }
            if e == chars.len() {
                line_offsets[e] = acc;
            }
            lines.push(LayoutLine {
                start: s,
                end: e,
                x,
                top,
                width,
            });
        }

        Self {
            frame,
            glyphs,
            line_offsets,
            lines,
        }
    }

    pub fn frame(&self) -> &TextFrame {
        &self.frame
    }

    pub fn glyphs(&self) -> &[PositionedGlyph] {
        &self.glyphs
    }

    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    /// Number of characters laid out.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Caret location (top of the line box) for `index`, or `None` past the end.
    ///
    /// An index on a soft-wrap boundary belongs to the later line.
    pub fn location_at_index(&self, index: usize) -> Option<[f32; 2]> {
        if index > self.len() {
            return None;
        }
        let line = self
            .lines
            .iter()
            .rev()
            .find(|l| l.start <= index)
            .unwrap_or(&self.lines[0]);
        Some(self.caret_on_line(line, index))
    }

    /// Nearest caret stop to `location`, with the snapped caret location.
    ///
    /// Returns `None` when the point is above or below every line, or beside
    /// the horizontal extent of the line it falls on.
    pub fn index_at_location(&self, location: [f32; 2]) -> Option<(usize, [f32; 2])> {
        let [x, y] = location;
        let area = &self.frame.area;
        let total_h = self.lines.len() as f32 * self.frame.size;
        if !(y >= area.y && y <= area.y + total_h) || self.frame.size <= 0.0 {
            return None;
        }
        let row = (((y - area.y) / self.frame.size).floor() as usize).min(self.lines.len() - 1);
        let line = &self.lines[row];
        if x < line.x || x > line.x + line.width {
            return None;
        }

        // Only the final line owns its end stop; earlier lines hand it downstream.
        let last = if row + 1 == self.lines.len() {
            line.end
        } else {
            line.end.saturating_sub(1).max(line.start)
        };
        let mut best = line.start;
        let mut best_dist = f32::INFINITY;
        for idx in line.start..=last {
            let cx = self.caret_on_line(line, idx)[0];
            let d = (cx - x).abs();
            if d < best_dist {
                best = idx;
                best_dist = d;
            }
        }
        Some((best, self.caret_on_line(line, best)))
    }

    /// Bounding box of all line boxes. Empty lines contribute their height.
    pub fn bounds(&self) -> Rect {
        self.lines
            .iter()
            .map(|l| Rect::new(l.x, l.top, l.width, self.frame.size))
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }

    fn caret_on_line(&self, line: &LayoutLine, index: usize) -> [f32; 2] {
        let offset = if index >= line.end {
            if line.end == self.len() {
                self.line_offsets[line.end]
            } else {
                line.width
            }
        } else {
            self.line_offsets[index]
        };
        let x = if self.frame.rtl {
            line.x + line.width - offset
        } else {
            line.x + offset
        };
        [x, line.top]
    }
}
