//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use pinetime_watchface::status::ChargeState;

/// Battery configuration
struct BatteryConfig<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
}

/// Battery API
pub struct Battery {
    /// Battery configuration
    config: BatteryConfig<'static>,
    /// Last reading
    state: ChargeState,
}

impl Battery {
    /// Configure battery settings on boot and take a first reading
    pub async fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, P0_12>) -> Self {
        let mut battery = Self {
            config: BatteryConfig {
                adc,
                pin_charge_indication: charge_pin,
            },
            state: ChargeState::default(),
        };
        battery.update().await;
        battery
    }

    /// Last reading. To fetch current data, call `update()` first.
    pub fn state(&self) -> ChargeState {
        self.state
    }

    /// Read the hardware. Return whether the charge state changed.
    pub async fn update(&mut self) -> bool {
        let is_charging = self.config.pin_charge_indication.is_low();
        let charge_percent = match self.get_voltage().await {
            Ok(voltage) => percent_from_voltage(voltage),
            Err(Error::InvalidMeasurement) => {
                defmt::warn!("Invalid battery measurement");
                self.state.charge_percent
            }
        };

        let state = ChargeState::new(charge_percent, is_charging);
        let changed = state != self.state;
        self.state = state;
        changed
    }

    /// Battery voltage in millivolts
    async fn get_voltage(&mut self) -> Result<u16, Error> {
        let mut buf = [0; 1];
        self.config.adc.sample(&mut buf).await;
        convert_adc_measurement(buf[0])
    }
}

/// Convert a 12 bit ADC measurement into the battery voltage in millivolts.
fn convert_adc_measurement(raw_measurement: i16) -> Result<u16, Error> {
    match raw_measurement {
        0..=4095 => {
            // For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
            // Use u32 during calculation to prevent overflow
            Ok((raw_measurement as u32 * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

/// Estimate battery capacity from fixed data points with linear
/// interpolation in between.
fn percent_from_voltage(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    InvalidMeasurement,
}
