//! Display control module for PineTime

use display_interface_spi::SPIInterface;
use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26, SPI2},
    spim::Spim,
};
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use mipidsi::{models::ST7789, Builder, Orientation};
use pinetime_watchface::ui::layout::{LCD_H, LCD_W};

use super::backlight::{self, Backlight};

/// ST7789 panel on SPIM2
pub type Lcd = mipidsi::Display<
    SPIInterface<Spim<'static, SPI2>, Output<'static, P0_18>, Output<'static, P0_25>>,
    ST7789,
    Output<'static, P0_26>,
>;

pub struct Display {
    /// Display instance
    lcd: Lcd,
    /// Backlight pins
    backlight: Backlight,
}

impl Display {
    /// Configure display settings on boot
    pub fn init(
        spim: Spim<'static, SPI2>,
        cs_pin: Output<'static, P0_25>,
        dc_pin: Output<'static, P0_18>,
        rst_pin: Output<'static, P0_26>,
        backlight: Backlight,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
            .with_display_size(LCD_W as u16, LCD_H as u16)
            .with_orientation(Orientation::Portrait(false))
            .init(&mut Delay, Some(rst_pin))
            .map_err(|_| Error::Init)?;

        let mut display = Self { lcd, backlight };
        display.clear(Rgb565::BLACK)?;
        Ok(display)
    }

    /// Clear the display
    pub fn clear(&mut self, color: Rgb565) -> Result<(), Error> {
        self.lcd.clear(color).map_err(|_| Error::Draw)
    }

    /// Draw target for the watch face
    pub fn lcd(&mut self) -> &mut Lcd {
        &mut self.lcd
    }

    /// Set the backlight brightness (0–7)
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Error> {
        self.backlight.set(level).map_err(Error::Backlight)
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Panel did not initialize
    Init,
    /// SPI transfer failed while drawing
    Draw,
    Backlight(backlight::Error),
}
