//! Time and date only

use embedded_graphics::prelude::*;

use super::{load_background, Bitmap, ClockLayers, ColorMode, Layer, WatchFace};
use crate::{
    host::{Subscriptions, TimeUnit},
    resources::{self, ResourcePool},
};

/// Background, time and date
pub struct PlainWatchface<'p> {
    clock: ClockLayers<'p>,
    background: Layer<Bitmap<'p>>,
}

impl<'p> PlainWatchface<'p> {
    pub fn clock(&self) -> &ClockLayers<'p> {
        &self.clock
    }
}

impl<'p> WatchFace<'p> for PlainWatchface<'p> {
    fn load(resources: &'p ResourcePool) -> Result<Self, resources::Error> {
        let background = load_background(resources)?;
        let clock = ClockLayers::load(resources)?;
        info!("Plain watch face loaded");

        Ok(Self { clock, background })
    }

    fn subscriptions(&self) -> Subscriptions {
        Subscriptions {
            tick: Some(TimeUnit::Minute),
            ..Default::default()
        }
    }

    fn clock_layers(&mut self) -> &mut ClockLayers<'p> {
        &mut self.clock
    }

    fn is_dirty(&self) -> bool {
        self.background.is_dirty() || self.clock.is_dirty()
    }

    fn render<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.background.draw(target)?;
        self.clock.draw(target)
    }
}
