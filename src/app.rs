//! Application state and event dispatch

use core::marker::PhantomData;

use embedded_graphics::prelude::*;

use crate::{
    clock::ClockFormatter,
    host::{Event, Host, Subscriptions},
    resources::{self, ResourcePool},
    status::StatusRenderer,
    ui::{ColorMode, WatchFace},
};

/// A running watch face.
///
/// Owns the face (the main window) and the last known status. The host
/// dispatches one event at a time through [`WatchApp::handle`]; nothing else
/// mutates the app.
pub struct WatchApp<'p, F>
where
    F: WatchFace<'p>,
{
    face: F,
    clock: ClockFormatter,
    status: StatusRenderer,
    _resources: PhantomData<&'p ResourcePool>,
}

impl<'p, F> WatchApp<'p, F>
where
    F: WatchFace<'p>,
{
    /// Load the main window and show the current state.
    ///
    /// The battery and connection snapshots are applied without haptic
    /// feedback.
    pub fn launch<H>(resources: &'p ResourcePool, host: &mut H) -> Result<Self, resources::Error>
    where
        H: Host + ?Sized,
    {
        let mut app = Self {
            face: F::load(resources)?,
            clock: ClockFormatter::new(),
            status: StatusRenderer::new(),
            _resources: PhantomData,
        };

        let now = host.now();
        app.clock.update(&now, &*host, app.face.clock_layers());

        if let Some(layers) = app.face.status_layers() {
            app.status.on_battery(layers, host.charge_state());
            app.status.apply_connection(layers, host.is_connected());
        }

        info!("Watch face launched");
        Ok(app)
    }

    /// Events the host should deliver
    pub fn subscriptions(&self) -> Subscriptions {
        self.face.subscriptions()
    }

    /// Dispatch one host event
    pub fn handle<H>(&mut self, host: &mut H, event: Event)
    where
        H: Host + ?Sized,
    {
        if !self.subscriptions().accepts(&event) {
            trace!("Ignoring {} event", event.name());
            return;
        }

        match event {
            Event::Tick(now) => self.clock.update(&now, &*host, self.face.clock_layers()),
            Event::Battery(state) => {
                if let Some(layers) = self.face.status_layers() {
                    self.status.on_battery(layers, state);
                }
            }
            Event::Connection(connected) => {
                if let Some(layers) = self.face.status_layers() {
                    self.status.on_connection(layers, connected, host);
                }
            }
        }
    }

    /// Redraw if anything changed. Returns whether the display was drawn.
    pub fn render<D>(&mut self, target: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        if !self.face.is_dirty() {
            return Ok(false);
        }
        self.face.render(target)?;
        Ok(true)
    }

    pub fn face(&self) -> &F {
        &self.face
    }

    /// Last known battery and connection state
    pub fn status(&self) -> &StatusRenderer {
        &self.status
    }

    /// Unload the main window, releasing every resource
    pub fn exit(self) {
        info!("Watch face exiting");
        drop(self);
    }
}
