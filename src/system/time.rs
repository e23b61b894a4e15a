//! Time keeping module for PineTime

use chrono::{DateTime, NaiveDateTime, Timelike};
use embassy_time::{Duration, Instant};

/// Wall clock derived from a reference epoch and the uptime
#[derive(Clone, Copy)]
pub struct TimeManager {
    /// Local time in seconds since the Unix epoch at boot
    boot_epoch: i64,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(utc_epoch: i64, utc_offset_secs: i64) -> Self {
        Self {
            boot_epoch: utc_epoch + utc_offset_secs,
        }
    }

    /// Current local time
    pub fn now(&self) -> NaiveDateTime {
        let uptime = Instant::now().as_secs() as i64;
        DateTime::from_timestamp(self.boot_epoch + uptime, 0)
            .map(|time| time.naive_utc())
            .unwrap_or(NaiveDateTime::UNIX_EPOCH)
    }

    /// Time left until the next minute boundary
    pub fn until_next_minute(&self) -> Duration {
        Duration::from_secs(60 - self.now().second() as u64)
    }
}
