//! Compile-time resources and scoped handles
//!
//! Images are 1 bit per pixel, row-major, rows padded to whole bytes. Every
//! acquisition goes through a [`ResourcePool`] and hands out a [`Resource`]
//! handle which gives the resource back when dropped.

use core::{
    cell::{Cell, RefCell},
    ops::Deref,
};

use embedded_graphics::{image::ImageRaw, mono_font::MonoFont, pixelcolor::BinaryColor};
use heapless::Vec;
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

static BACKGROUND: &[u8] = include_bytes!("../resources/images/background.raw");
static CHARGING: &[u8] = include_bytes!("../resources/images/charging.raw");
static BLUETOOTH_CONNECTED: &[u8] = include_bytes!("../resources/images/bluetooth_connected.raw");
static BLUETOOTH_DISCONNECTED: &[u8] =
    include_bytes!("../resources/images/bluetooth_disconnected.raw");

/// Number of distinct resources, and so the most a pool can hold at once
const MAX_RESOURCES: usize = 6;

/// Bitmap resources
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageId {
    Background,
    Charging,
    BluetoothConnected,
    BluetoothDisconnected,
}

impl ImageId {
    /// Width in pixels
    pub fn width(self) -> u32 {
        match self {
            ImageId::Background => 240,
            ImageId::Charging | ImageId::BluetoothConnected | ImageId::BluetoothDisconnected => 30,
        }
    }

    fn data(self) -> &'static [u8] {
        match self {
            ImageId::Background => BACKGROUND,
            ImageId::Charging => CHARGING,
            ImageId::BluetoothConnected => BLUETOOTH_CONNECTED,
            ImageId::BluetoothDisconnected => BLUETOOTH_DISCONNECTED,
        }
    }
}

/// Font resources
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    /// Large digits for the time
    Time,
    /// Date line
    Date,
}

impl FontId {
    fn font(self) -> &'static MonoFont<'static> {
        match self {
            FontId::Time => &PROFONT_24_POINT,
            FontId::Date => &PROFONT_18_POINT,
        }
    }
}

/// Any resource the pool tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceId {
    Image(ImageId),
    Font(FontId),
}

impl From<ImageId> for ResourceId {
    fn from(id: ImageId) -> Self {
        ResourceId::Image(id)
    }
}

impl From<FontId> for ResourceId {
    fn from(id: FontId) -> Self {
        ResourceId::Font(id)
    }
}

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The resource is held by a live handle
    AlreadyLoaded(ResourceId),
    /// More handles than resources, only reachable through a bookkeeping bug
    PoolExhausted,
}

/// Bookkeeping for loaded resources.
///
/// Not `Sync`: handles and the pool stay on the thread that dispatches
/// events.
pub struct ResourcePool {
    /// Held resources in acquisition order
    held: RefCell<Vec<ResourceId, MAX_RESOURCES>>,
    out_of_order: Cell<u16>,
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourcePool {
    pub const fn new() -> Self {
        Self {
            held: RefCell::new(Vec::new()),
            out_of_order: Cell::new(0),
        }
    }

    /// Load a bitmap
    pub fn load_image(&self, id: ImageId) -> Result<Image<'_>, Error> {
        self.acquire(id.into())?;
        Ok(Resource {
            pool: self,
            id: id.into(),
            value: ImageRaw::new(id.data(), id.width()),
        })
    }

    /// Load a font
    pub fn load_font(&self, id: FontId) -> Result<Font<'_>, Error> {
        self.acquire(id.into())?;
        Ok(Resource {
            pool: self,
            id: id.into(),
            value: id.font(),
        })
    }

    /// Whether a live handle holds `id`
    pub fn is_loaded(&self, id: impl Into<ResourceId>) -> bool {
        self.held.borrow().contains(&id.into())
    }

    /// Number of live handles
    pub fn loaded_count(&self) -> usize {
        self.held.borrow().len()
    }

    /// Releases that did not free the most recently acquired resource
    pub fn out_of_order_releases(&self) -> u16 {
        self.out_of_order.get()
    }

    fn acquire(&self, id: ResourceId) -> Result<(), Error> {
        let mut held = self.held.borrow_mut();
        if held.contains(&id) {
            warn!("Resource {:?} is already loaded", id);
            return Err(Error::AlreadyLoaded(id));
        }
        held.push(id).map_err(|_| Error::PoolExhausted)?;
        trace!("Loaded {:?}", id);
        Ok(())
    }

    fn release(&self, id: ResourceId) {
        let mut held = self.held.borrow_mut();
        match held.iter().rposition(|held_id| *held_id == id) {
            Some(index) => {
                if index + 1 != held.len() {
                    warn!("Resource {:?} released out of order", id);
                    self.out_of_order.set(self.out_of_order.get().saturating_add(1));
                }
                held.remove(index);
                trace!("Released {:?}", id);
            }
            None => warn!("Release of unknown resource {:?}", id),
        }
    }
}

/// Scoped handle, released when dropped
pub struct Resource<'p, T> {
    pool: &'p ResourcePool,
    id: ResourceId,
    value: T,
}

impl<T> Resource<'_, T> {
    pub fn id(&self) -> ResourceId {
        self.id
    }
}

impl<T> Deref for Resource<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> Drop for Resource<'_, T> {
    fn drop(&mut self) {
        self.pool.release(self.id);
    }
}

/// Loaded bitmap
pub type Image<'p> = Resource<'p, ImageRaw<'static, BinaryColor>>;

/// Loaded font
pub type Font<'p> = Resource<'p, &'static MonoFont<'static>>;

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;

    #[test]
    fn image_dimensions_match_data() {
        for id in [
            ImageId::Background,
            ImageId::Charging,
            ImageId::BluetoothConnected,
            ImageId::BluetoothDisconnected,
        ] {
            let stride = (id.width() as usize + 7) / 8;
            assert_eq!(id.data().len() % stride, 0, "{:?}", id);
        }

        let pool = ResourcePool::new();
        let background = pool.load_image(ImageId::Background).unwrap();
        assert_eq!(background.size(), Size::new(240, 240));
        let icon = pool.load_image(ImageId::Charging).unwrap();
        assert_eq!(icon.size(), Size::new(30, 30));
    }

    #[test]
    fn handle_releases_on_drop() {
        let pool = ResourcePool::new();
        {
            let _font = pool.load_font(FontId::Time).unwrap();
            assert!(pool.is_loaded(FontId::Time));
            assert_eq!(pool.loaded_count(), 1);
        }
        assert!(!pool.is_loaded(FontId::Time));
        assert_eq!(pool.loaded_count(), 0);
    }

    #[test]
    fn double_load_is_rejected() {
        let pool = ResourcePool::new();
        let _first = pool.load_image(ImageId::Charging).unwrap();
        assert_eq!(
            pool.load_image(ImageId::Charging).err(),
            Some(Error::AlreadyLoaded(ResourceId::Image(ImageId::Charging)))
        );
        assert_eq!(pool.loaded_count(), 1);
    }

    #[test]
    fn reload_after_release() {
        let pool = ResourcePool::new();
        drop(pool.load_font(FontId::Date).unwrap());
        assert!(pool.load_font(FontId::Date).is_ok());
    }

    #[test]
    fn out_of_order_release_is_counted() {
        let pool = ResourcePool::new();
        let first = pool.load_font(FontId::Time).unwrap();
        let second = pool.load_font(FontId::Date).unwrap();
        drop(first);
        drop(second);
        assert_eq!(pool.out_of_order_releases(), 1);
        assert_eq!(pool.loaded_count(), 0);
    }

    #[test]
    fn reverse_release_is_clean() {
        let pool = ResourcePool::new();
        let first = pool.load_font(FontId::Time).unwrap();
        let second = pool.load_image(ImageId::Background).unwrap();
        drop(second);
        drop(first);
        assert_eq!(pool.out_of_order_releases(), 0);
    }
}
