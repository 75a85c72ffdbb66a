use crate::scene::*;

#[derive(Clone, Copy, Debug, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug)]
pub enum Command {
    /// Textured quad. Glyphs and theme images both arrive here.
    DrawSprite(Sprite),
    PushClip(ClipRect),
    PopClip,
}

#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub viewport: Viewport,
    pub commands: Vec<Command>,
}

impl DisplayList {
    /// Iterate the sprites in submission order.
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.commands.iter().filter_map(|c| match c {
            Command::DrawSprite(sprite) => Some(sprite),
            _ => None,
        })
    }
}
