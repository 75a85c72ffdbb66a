use crate::display_list::{Command, DisplayList, Viewport};
use crate::scene::*;

/// Sprite-batch interface. Controls and fonts submit textured quads here; the
/// implementation decides how they reach the GPU.
pub trait SpriteBatch {
    fn draw(&mut self, sprite: Sprite);
}

/// Records sprite draws into a [`DisplayList`] for a single frame.
pub struct Painter {
    list: DisplayList,
    clip_depth: usize,
}

impl Painter {
    pub fn begin_frame(viewport: Viewport) -> Self {
        Self {
            list: DisplayList {
                viewport,
                commands: Vec::new(),
            },
            clip_depth: 0,
        }
    }

    pub fn push_clip_rect(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.list.commands.push(Command::PushClip(ClipRect(rect)));
    }

    pub fn pop_clip(&mut self) {
        if self.clip_depth > 0 {
            self.clip_depth -= 1;
            self.list.commands.push(Command::PopClip);
        }
    }

    pub fn sprite(&mut self, sprite: Sprite) {
        self.list.commands.push(Command::DrawSprite(sprite));
    }

    /// Get a reference to the display list recorded so far.
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    pub fn finish(mut self) -> DisplayList {
        // Balance any clips left open by the caller.
        while self.clip_depth > 0 {
            self.pop_clip();
        }
        self.list
    }
}

impl SpriteBatch for Painter {
    fn draw(&mut self, sprite: Sprite) {
        self.sprite(sprite);
    }
}
