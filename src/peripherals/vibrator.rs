//! Control the vibration motor
//!
//! Implementation based upon https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Output, peripherals::P0_16};
use embassy_time::{Duration, Timer};

/// Length of one pulse, and of the pause between pulses
const PULSE_LENGTH: Duration = Duration::from_millis(100);

struct VibratorConfig<'a> {
    /// Motor enable pin (inverted)
    pin_enable: Output<'a, P0_16>,
}

pub struct Vibrator {
    /// Vibrator configuration
    config: VibratorConfig<'static>,
}

impl Vibrator {
    /// Configure vibrator on boot
    pub fn init(enable_pin: Output<'static, P0_16>) -> Self {
        let mut vibrator = Self {
            config: VibratorConfig {
                pin_enable: enable_pin,
            },
        };
        vibrator.off();
        vibrator
    }

    /// Two short pulses
    pub async fn double_pulse(&mut self) {
        self.on();
        Timer::after(PULSE_LENGTH).await;
        self.off();
        Timer::after(PULSE_LENGTH).await;
        self.on();
        Timer::after(PULSE_LENGTH).await;
        self.off();
    }

    fn on(&mut self) {
        self.config.pin_enable.set_low();
    }

    fn off(&mut self) {
        self.config.pin_enable.set_high();
    }
}
