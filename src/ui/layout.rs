//! Screen layout
//!
//! Frames are in panel coordinates of the 240x240 PineTime display.

use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::{Rgb565, RgbColor},
    primitives::Rectangle,
};

pub const LCD_W: u32 = 240;
pub const LCD_H: u32 = 240;

/// Side length of the status icons
pub const ICON_SIZE: u32 = 30;

pub const BACKGROUND_FRAME: Rectangle = Rectangle::new(Point::zero(), Size::new(LCD_W, LCD_H));
pub const TIME_FRAME: Rectangle = Rectangle::new(Point::new(0, 40), Size::new(LCD_W, 50));
pub const DATE_FRAME: Rectangle = Rectangle::new(Point::new(0, 185), Size::new(LCD_W, 30));
pub const BATTERY_BAR_FRAME: Rectangle = Rectangle::new(Point::new(0, 110), Size::new(LCD_W, 4));
pub const BLUETOOTH_FRAME: Rectangle =
    Rectangle::new(Point::new(105, 130), Size::new(ICON_SIZE, ICON_SIZE));
pub const CHARGING_FRAME: Rectangle =
    Rectangle::new(Point::new(175, 130), Size::new(ICON_SIZE, ICON_SIZE));

// The background image is white above the battery bar and black below it.
pub const TIME_COLOR: Rgb565 = Rgb565::BLACK;
pub const DATE_COLOR: Rgb565 = Rgb565::WHITE;
pub const BAR_BACKGROUND: Rgb565 = Rgb565::BLACK;
pub const BAR_FOREGROUND: Rgb565 = Rgb565::WHITE;

/// Placeholder until the first clock update
pub const TIME_PLACEHOLDER: &str = "00:00";
