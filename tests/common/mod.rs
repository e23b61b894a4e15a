#![allow(dead_code)]

use std::convert::Infallible;

use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use pinetime_watchface::{
    clock::HourPadding,
    host::{BatteryMonitor, Clock, ConnectionMonitor, Haptics},
    status::ChargeState,
    ui::layout::{LCD_H, LCD_W},
};

/// Scriptable host
pub struct FakeHost {
    pub now: NaiveDateTime,
    pub twenty_four_hour: bool,
    pub padding: HourPadding,
    pub battery: ChargeState,
    pub connected: bool,
    pub pulses: usize,
}

impl FakeHost {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now,
            twenty_four_hour: true,
            padding: HourPadding::Zero,
            battery: ChargeState::new(100, false),
            connected: true,
            pulses: 0,
        }
    }
}

impl Clock for FakeHost {
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn is_24h_style(&self) -> bool {
        self.twenty_four_hour
    }

    fn hour_padding(&self) -> HourPadding {
        self.padding
    }
}

impl BatteryMonitor for FakeHost {
    fn charge_state(&self) -> ChargeState {
        self.battery
    }
}

impl ConnectionMonitor for FakeHost {
    fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Haptics for FakeHost {
    fn double_pulse(&mut self) {
        self.pulses += 1;
    }
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

/// In-memory 240x240 panel
pub struct FrameBuffer {
    pixels: Vec<Option<Rgb565>>,
    pub draws: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![None; (LCD_W * LCD_H) as usize],
            draws: 0,
        }
    }

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
        self.draws += 1;
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 && (point.x as u32) < LCD_W && (point.y as u32) < LCD_H {
                self.pixels[(point.y as u32 * LCD_W + point.x as u32) as usize] = Some(color);
            }
        }
        Ok(())
    }
}

/// Panel whose bus always fails
pub struct FailingDisplay;

#[derive(Debug, PartialEq, Eq)]
pub struct BusError;

impl OriginDimensions for FailingDisplay {
    fn size(&self) -> Size {
        Size::new(LCD_W, LCD_H)
    }
}

impl DrawTarget for FailingDisplay {
    type Color = Rgb565;
    type Error = BusError;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Err(BusError)
    }
}
