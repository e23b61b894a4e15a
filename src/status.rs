//! Battery and connection status

use crate::{host::Haptics, ui::StatusLayers};

/// Battery state as reported by the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeState {
    /// Charge in percent (0–100)
    pub charge_percent: u8,
    /// Charger connected
    pub is_charging: bool,
}

impl ChargeState {
    pub const fn new(charge_percent: u8, is_charging: bool) -> Self {
        Self {
            charge_percent,
            is_charging,
        }
    }
}

/// Filled part of a bar `width` pixels wide at `percent` charge.
///
/// Rounds to the nearest pixel, values above 100 count as full.
pub const fn filled_width(percent: u8, width: u32) -> u32 {
    let percent = if percent > 100 { 100 } else { percent as u32 };
    (percent * width + 50) / 100
}

/// Last reported battery and connection state, and the rules applying them
/// to the status layers.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatusRenderer {
    battery_level: u8,
    connected: bool,
}

impl StatusRenderer {
    pub const fn new() -> Self {
        Self {
            battery_level: 0,
            connected: false,
        }
    }

    /// Battery level in percent
    pub fn battery_level(&self) -> u8 {
        self.battery_level
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Apply a battery notification
    pub fn on_battery(&mut self, layers: &mut StatusLayers<'_>, state: ChargeState) {
        self.battery_level = state.charge_percent.min(100);
        layers.set_battery_level(self.battery_level);
        layers.set_charging(state.is_charging);

        debug!(
            "Battery status: {}% ({})",
            self.battery_level,
            if state.is_charging {
                "charging"
            } else {
                "discharging"
            }
        );
    }

    /// Apply a connection notification.
    ///
    /// Every disconnected notification vibrates, repeated ones included.
    pub fn on_connection<H>(&mut self, layers: &mut StatusLayers<'_>, connected: bool, haptics: &mut H)
    where
        H: Haptics + ?Sized,
    {
        self.apply_connection(layers, connected);
        if !connected {
            haptics.double_pulse();
        }
    }

    /// Show the connection state without haptic feedback, used for the
    /// startup snapshot.
    pub fn apply_connection(&mut self, layers: &mut StatusLayers<'_>, connected: bool) {
        self.connected = connected;
        layers.set_connected(connected);
        debug!("Connection status: {}", if connected { "connected" } else { "disconnected" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_width_bounds() {
        assert_eq!(filled_width(0, 240), 0);
        assert_eq!(filled_width(100, 240), 240);
        assert_eq!(filled_width(255, 240), 240);
        assert_eq!(filled_width(100, 144), 144);
    }

    #[test]
    fn filled_width_rounds_to_nearest() {
        for width in [1u32, 2, 30, 144, 240] {
            for percent in 0..=100u8 {
                let exact = (percent as f64 * width as f64) / 100.0;
                assert_eq!(
                    filled_width(percent, width),
                    exact.round() as u32,
                    "{}% of {}",
                    percent,
                    width
                );
            }
        }
    }

    #[test]
    fn seventy_three_percent() {
        // 0.73 * 240 = 175.2
        assert_eq!(filled_width(73, 240), 175);
        // 0.73 * 144 = 105.12
        assert_eq!(filled_width(73, 144), 105);
    }
}
