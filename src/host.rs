//! Host framework abstraction
//!
//! The watch face never polls: the host owns the event loop and hands every
//! system event to [`WatchApp::handle`](crate::WatchApp::handle). The traits
//! below are the services the face may query synchronously.

use chrono::NaiveDateTime;

use crate::{clock::HourPadding, status::ChargeState};

/// Wall clock and the user's display preference
pub trait Clock {
    /// Current local time
    fn now(&self) -> NaiveDateTime;

    /// Whether the user selected the 24-hour format
    fn is_24h_style(&self) -> bool;

    /// Hour padding convention of the 12-hour format
    fn hour_padding(&self) -> HourPadding {
        HourPadding::Zero
    }
}

/// Battery state service
pub trait BatteryMonitor {
    /// Best-effort synchronous snapshot, used once at startup.
    fn charge_state(&self) -> ChargeState;
}

/// Phone connection service
pub trait ConnectionMonitor {
    /// Best-effort synchronous snapshot, used once at startup.
    fn is_connected(&self) -> bool;
}

/// Vibration motor
pub trait Haptics {
    /// Two short vibration pulses
    fn double_pulse(&mut self);
}

/// Everything a watch face may need from the host.
pub trait Host: Clock + BatteryMonitor + ConnectionMonitor + Haptics {}

impl<T> Host for T where T: Clock + BatteryMonitor + ConnectionMonitor + Haptics {}

/// Granularity of tick events
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

/// Events a face can subscribe to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Periodic wall clock notification
    Tick(NaiveDateTime),
    /// Battery charge or charging state changed
    Battery(ChargeState),
    /// Phone connected (`true`) or disconnected (`false`)
    Connection(bool),
}

impl Event {
    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            Event::Tick(_) => "tick",
            Event::Battery(_) => "battery",
            Event::Connection(_) => "connection",
        }
    }
}

/// Event sources a face listens to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscriptions {
    /// Tick granularity, `None` for no tick events
    pub tick: Option<TimeUnit>,
    pub battery: bool,
    pub connection: bool,
}

impl Subscriptions {
    /// Whether `event` should reach the face
    pub fn accepts(&self, event: &Event) -> bool {
        match event {
            Event::Tick(_) => self.tick.is_some(),
            Event::Battery(_) => self.battery,
            Event::Connection(_) => self.connection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_subscriptions_accept_nothing() {
        let subs = Subscriptions::default();
        assert!(!subs.accepts(&Event::Tick(noon())));
        assert!(!subs.accepts(&Event::Connection(true)));
        assert!(!subs.accepts(&Event::Battery(ChargeState::new(50, false))));
    }

    #[test]
    fn tick_only_subscription() {
        let subs = Subscriptions {
            tick: Some(TimeUnit::Minute),
            ..Default::default()
        };
        assert!(subs.accepts(&Event::Tick(noon())));
        assert!(!subs.accepts(&Event::Connection(false)));
    }
}
