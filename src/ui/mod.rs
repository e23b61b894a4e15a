//! UI definitions module

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::{
    clock::{DATE_CAPACITY, TIME_CAPACITY},
    host::Subscriptions,
    resources::{self, FontId, ImageId, ResourcePool},
};

pub mod layer;
pub mod layout;
mod plain_watchface;
mod status_watchface;

pub use layer::{BatteryBar, Bitmap, Layer, LayerContent, TextLayer};
pub use plain_watchface::PlainWatchface;
pub use status_watchface::{StatusLayers, StatusWatchface};

/// Panel color format
pub type ColorMode = Rgb565;

/// A watch face owns its layer tree and every resource in it. Dropping the
/// face unloads it.
pub trait WatchFace<'p>: Sized {
    /// Acquire resources and compose the layer tree
    fn load(resources: &'p ResourcePool) -> Result<Self, resources::Error>;

    /// Events this face wants delivered
    fn subscriptions(&self) -> Subscriptions;

    /// Time and date text
    fn clock_layers(&mut self) -> &mut ClockLayers<'p>;

    /// Battery and connection indicators, if the face has them
    fn status_layers(&mut self) -> Option<&mut StatusLayers<'p>> {
        None
    }

    /// Whether any layer changed since the last render
    fn is_dirty(&self) -> bool;

    /// Redraw the whole layer tree
    fn render<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>;
}

/// Full-screen background bitmap
pub(crate) fn load_background(resources: &ResourcePool) -> Result<Layer<Bitmap<'_>>, resources::Error> {
    Ok(Layer::new(
        layout::BACKGROUND_FRAME,
        Bitmap::new(resources.load_image(ImageId::Background)?),
    ))
}

/// Time and date text layers shared by both faces
pub struct ClockLayers<'p> {
    // Release order: date font, then time font
    pub date: Layer<TextLayer<'p, DATE_CAPACITY>>,
    pub time: Layer<TextLayer<'p, TIME_CAPACITY>>,
}

impl<'p> ClockLayers<'p> {
    pub fn load(resources: &'p ResourcePool) -> Result<Self, resources::Error> {
        let time = Layer::new(
            layout::TIME_FRAME,
            TextLayer::new(
                resources.load_font(FontId::Time)?,
                layout::TIME_COLOR,
                layout::TIME_PLACEHOLDER,
            ),
        );
        let date = Layer::new(
            layout::DATE_FRAME,
            TextLayer::new(resources.load_font(FontId::Date)?, layout::DATE_COLOR, ""),
        );

        Ok(Self { date, time })
    }

    pub fn time_text(&self) -> &str {
        self.time.content().text().as_str()
    }

    pub fn date_text(&self) -> &str {
        self.date.content().text().as_str()
    }

    pub fn is_dirty(&self) -> bool {
        self.time.is_dirty() || self.date.is_dirty()
    }

    pub fn draw<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.time.draw(target)?;
        self.date.draw(target)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use core::convert::Infallible;

    use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

    use super::layout::{LCD_H, LCD_W};

    /// In-memory panel for render tests
    pub struct FrameBuffer {
        pixels: Vec<Option<Rgb565>>,
    }

    impl FrameBuffer {
        pub fn new() -> Self {
            Self {
                pixels: vec![None; (LCD_W * LCD_H) as usize],
            }
        }

        /// Color at `(x, y)`, `None` if never drawn
        pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
            self.pixels[(y as u32 * LCD_W + x as u32) as usize]
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            Size::new(LCD_W, LCD_H)
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if point.x >= 0 && point.y >= 0 && (point.x as u32) < LCD_W && (point.y as u32) < LCD_H {
                    self.pixels[(point.y as u32 * LCD_W + point.x as u32) as usize] = Some(color);
                }
            }
            Ok(())
        }
    }
}
