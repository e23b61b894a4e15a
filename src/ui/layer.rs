//! Layers of the display tree

use embedded_graphics::{
    image::Image,
    mono_font::MonoTextStyle,
    prelude::*,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use super::{
    layout::{BAR_BACKGROUND, BAR_FOREGROUND},
    ColorMode,
};
use crate::{
    clock::TextBuffer,
    resources::{Font, Image as ImageHandle},
    status::filled_width,
};

/// Something a layer can draw inside its frame
pub trait LayerContent {
    fn draw<D>(&self, frame: &Rectangle, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>;
}

/// Single visual element with a fixed frame
pub struct Layer<T> {
    frame: Rectangle,
    hidden: bool,
    dirty: bool,
    content: T,
}

impl<T> Layer<T>
where
    T: LayerContent,
{
    /// Create a visible layer, dirty until first drawn
    pub fn new(frame: Rectangle, content: T) -> Self {
        Self {
            frame,
            hidden: false,
            dirty: true,
            content,
        }
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hide or show the layer. Always marks it dirty.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Request a redraw
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    /// Mutable access to the content. Callers mark the layer dirty.
    pub fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    /// Draw unless hidden, and clear the dirty flag
    pub fn draw<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        if !self.hidden {
            self.content.draw(&self.frame, target)?;
        }
        self.dirty = false;
        Ok(())
    }
}

/// Bitmap anchored at the top left of the frame
pub struct Bitmap<'p> {
    image: ImageHandle<'p>,
}

impl<'p> Bitmap<'p> {
    pub fn new(image: ImageHandle<'p>) -> Self {
        Self { image }
    }
}

impl LayerContent for Bitmap<'_> {
    fn draw<D>(&self, frame: &Rectangle, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        Image::new(&*self.image, frame.top_left).draw(&mut target.color_converted())
    }
}

/// Horizontally centered text on a transparent background
pub struct TextLayer<'p, const N: usize> {
    font: Font<'p>,
    color: ColorMode,
    text: TextBuffer<N>,
}

impl<'p, const N: usize> TextLayer<'p, N> {
    pub fn new(font: Font<'p>, color: ColorMode, text: &str) -> Self {
        Self {
            font,
            color,
            text: TextBuffer::with_text(text),
        }
    }

    pub fn text(&self) -> &TextBuffer<N> {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextBuffer<N> {
        &mut self.text
    }
}

impl<const N: usize> LayerContent for TextLayer<'_, N> {
    fn draw<D>(&self, frame: &Rectangle, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let character_style = MonoTextStyle::new(*self.font, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let position = Point::new(frame.center().x, frame.top_left.y);

        Text::with_text_style(self.text.as_str(), position, character_style, text_style)
            .draw(target)?;
        Ok(())
    }
}

/// Horizontal bar filled in proportion to the battery charge
#[derive(Debug, Default)]
pub struct BatteryBar {
    level: u8,
}

impl BatteryBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Filled width within `frame`
    pub fn filled_width(&self, frame: &Rectangle) -> u32 {
        filled_width(self.level, frame.size.width)
    }
}

impl LayerContent for BatteryBar {
    fn draw<D>(&self, frame: &Rectangle, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        target.fill_solid(frame, BAR_BACKGROUND)?;

        let filled = Rectangle::new(
            frame.top_left,
            Size::new(self.filled_width(frame), frame.size.height),
        );
        target.fill_solid(&filled, BAR_FOREGROUND)
    }
}
