//! Watch face with battery and Bluetooth status

use embedded_graphics::prelude::*;

use super::{layout, load_background, BatteryBar, Bitmap, ClockLayers, ColorMode, Layer, WatchFace};
use crate::{
    host::{Subscriptions, TimeUnit},
    resources::{self, ImageId, ResourcePool},
};

/// Battery bar, charging icon and the two Bluetooth icons
pub struct StatusLayers<'p> {
    // Fields drop in declaration order, the reverse of `load`.
    bluetooth_connected: Layer<Bitmap<'p>>,
    bluetooth_disconnected: Layer<Bitmap<'p>>,
    charging: Layer<Bitmap<'p>>,
    battery_bar: Layer<BatteryBar>,
}

impl<'p> StatusLayers<'p> {
    pub fn load(resources: &'p ResourcePool) -> Result<Self, resources::Error> {
        let battery_bar = Layer::new(layout::BATTERY_BAR_FRAME, BatteryBar::new());

        let mut charging = Layer::new(
            layout::CHARGING_FRAME,
            Bitmap::new(resources.load_image(ImageId::Charging)?),
        );
        charging.set_hidden(true);

        // Both icons share a frame, only one is ever visible.
        let bluetooth_disconnected = Layer::new(
            layout::BLUETOOTH_FRAME,
            Bitmap::new(resources.load_image(ImageId::BluetoothDisconnected)?),
        );
        let mut bluetooth_connected = Layer::new(
            layout::BLUETOOTH_FRAME,
            Bitmap::new(resources.load_image(ImageId::BluetoothConnected)?),
        );
        bluetooth_connected.set_hidden(true);

        Ok(Self {
            bluetooth_connected,
            bluetooth_disconnected,
            charging,
            battery_bar,
        })
    }

    pub fn set_battery_level(&mut self, percent: u8) {
        self.battery_bar.content_mut().set_level(percent);
        self.battery_bar.mark_dirty();
    }

    pub fn set_charging(&mut self, charging: bool) {
        self.charging.set_hidden(!charging);
    }

    /// Show the icon matching `connected` and hide the other one
    pub fn set_connected(&mut self, connected: bool) {
        self.bluetooth_disconnected.set_hidden(connected);
        self.bluetooth_connected.set_hidden(!connected);
    }

    pub fn battery_bar(&self) -> &Layer<BatteryBar> {
        &self.battery_bar
    }

    pub fn is_charging_visible(&self) -> bool {
        !self.charging.is_hidden()
    }

    pub fn is_connected_visible(&self) -> bool {
        !self.bluetooth_connected.is_hidden()
    }

    pub fn is_disconnected_visible(&self) -> bool {
        !self.bluetooth_disconnected.is_hidden()
    }

    pub fn is_dirty(&self) -> bool {
        self.battery_bar.is_dirty()
            || self.charging.is_dirty()
            || self.bluetooth_disconnected.is_dirty()
            || self.bluetooth_connected.is_dirty()
    }

    pub fn draw<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.battery_bar.draw(target)?;
        self.charging.draw(target)?;
        self.bluetooth_disconnected.draw(target)?;
        self.bluetooth_connected.draw(target)
    }
}

/// Time, date, battery bar, charging and Bluetooth indicators
pub struct StatusWatchface<'p> {
    status: StatusLayers<'p>,
    clock: ClockLayers<'p>,
    background: Layer<Bitmap<'p>>,
}

impl<'p> StatusWatchface<'p> {
    pub fn status(&self) -> &StatusLayers<'p> {
        &self.status
    }

    pub fn clock(&self) -> &ClockLayers<'p> {
        &self.clock
    }
}

impl<'p> WatchFace<'p> for StatusWatchface<'p> {
    fn load(resources: &'p ResourcePool) -> Result<Self, resources::Error> {
        let background = load_background(resources)?;
        let clock = ClockLayers::load(resources)?;
        let status = StatusLayers::load(resources)?;
        info!("Status watch face loaded");

        Ok(Self {
            status,
            clock,
            background,
        })
    }

    fn subscriptions(&self) -> Subscriptions {
        Subscriptions {
            tick: Some(TimeUnit::Minute),
            battery: true,
            connection: true,
        }
    }

    fn clock_layers(&mut self) -> &mut ClockLayers<'p> {
        &mut self.clock
    }

    fn status_layers(&mut self) -> Option<&mut StatusLayers<'p>> {
        Some(&mut self.status)
    }

    fn is_dirty(&self) -> bool {
        self.background.is_dirty() || self.clock.is_dirty() || self.status.is_dirty()
    }

    fn render<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.background.draw(target)?;
        self.clock.draw(target)?;
        self.status.draw(target)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        pixelcolor::{Rgb565, RgbColor},
        primitives::PointsIter,
    };

    use super::*;
    use crate::ui::testing::FrameBuffer;

    #[test]
    fn load_acquires_every_resource() {
        let pool = ResourcePool::new();
        let face = StatusWatchface::load(&pool).unwrap();
        assert_eq!(pool.loaded_count(), 6);
        assert!(face.is_dirty());
        assert_eq!(face.clock().time_text(), "00:00");
    }

    #[test]
    fn drop_releases_in_reverse_order() {
        let pool = ResourcePool::new();
        drop(StatusWatchface::load(&pool).unwrap());
        assert_eq!(pool.loaded_count(), 0);
        assert_eq!(pool.out_of_order_releases(), 0);

        // A second window instance can load again
        assert!(StatusWatchface::load(&pool).is_ok());
    }

    #[test]
    fn second_load_fails_without_leaking() {
        let pool = ResourcePool::new();
        let _face = StatusWatchface::load(&pool).unwrap();
        assert!(StatusWatchface::load(&pool).is_err());
        assert_eq!(pool.loaded_count(), 6);
    }

    #[test]
    fn partial_load_is_rolled_back() {
        let pool = ResourcePool::new();
        let _held = pool.load_image(ImageId::BluetoothConnected).unwrap();
        assert_eq!(
            StatusWatchface::load(&pool).err(),
            Some(resources::Error::AlreadyLoaded(ImageId::BluetoothConnected.into()))
        );
        assert_eq!(pool.loaded_count(), 1);
        assert_eq!(pool.out_of_order_releases(), 0);
    }

    #[test]
    fn connection_icons_are_exclusive() {
        let pool = ResourcePool::new();
        let mut face = StatusWatchface::load(&pool).unwrap();
        let status = face.status_layers().unwrap();
        assert!(status.is_disconnected_visible() != status.is_connected_visible());

        for connected in [true, true, false, true, false, false] {
            status.set_connected(connected);
            assert_eq!(status.is_connected_visible(), connected);
            assert_eq!(status.is_disconnected_visible(), !connected);
        }
    }

    #[test]
    fn render_draws_battery_bar() {
        let pool = ResourcePool::new();
        let mut face = StatusWatchface::load(&pool).unwrap();
        face.status_layers().unwrap().set_battery_level(50);

        let mut display = FrameBuffer::new();
        face.render(&mut display).unwrap();
        assert!(!face.is_dirty());

        let bar = layout::BATTERY_BAR_FRAME;
        let y = bar.top_left.y;
        assert_eq!(display.pixel(0, y), Some(Rgb565::WHITE));
        assert_eq!(display.pixel(119, y), Some(Rgb565::WHITE));
        assert_eq!(display.pixel(120, y), Some(Rgb565::BLACK));
        assert_eq!(display.pixel(239, y + bar.size.height as i32 - 1), Some(Rgb565::BLACK));
    }

    #[test]
    fn hidden_icon_is_not_drawn() {
        let pool = ResourcePool::new();
        let mut face = StatusWatchface::load(&pool).unwrap();

        let mut display = FrameBuffer::new();
        face.render(&mut display).unwrap();
        let charging_area = layout::CHARGING_FRAME;
        let mut hidden = Vec::new();
        for point in charging_area.points() {
            hidden.push(display.pixel(point.x, point.y));
        }

        face.status_layers().unwrap().set_charging(true);
        assert!(face.is_dirty());
        face.render(&mut display).unwrap();
        let mut shown = Vec::new();
        for point in charging_area.points() {
            shown.push(display.pixel(point.x, point.y));
        }

        // The icon has lit pixels where the background below is black.
        assert_ne!(hidden, shown);
    }
}
