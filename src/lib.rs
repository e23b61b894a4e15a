//! PineTime digital watch faces
//!
//! Hardware-agnostic half of the watch face: the host abstraction, resource
//! handles, clock formatting, status rendering and the layer tree. The
//! firmware binary (`pinetime` feature) plugs the nRF52832 peripherals into
//! the [`host`] traits.
//!
//! Two faces are provided:
//! - [`StatusWatchface`]: time, date, battery bar, charging and Bluetooth icons
//! - [`PlainWatchface`]: time and date only

#![cfg_attr(not(test), no_std)]

// Must stay first so the logging macros are visible to the other modules.
mod fmt;

pub mod app;
pub mod clock;
pub mod host;
pub mod resources;
pub mod status;
pub mod ui;

pub use app::WatchApp;
pub use host::{Event, Host, Subscriptions};
pub use resources::ResourcePool;
pub use ui::{PlainWatchface, StatusWatchface, WatchFace};
