//! Time and date formatting

use core::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::{host::Clock, ui::ClockLayers};

/// Capacity of the time text, `HH:MM`
pub const TIME_CAPACITY: usize = 5;
/// Capacity of the date text, `Www DD Mmm` with room to spare
pub const DATE_CAPACITY: usize = 15;

/// Fixed-capacity text.
///
/// Always holds valid UTF-8 within capacity. A write that does not fit keeps
/// the previous contents.
#[derive(Clone)]
pub struct TextBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for TextBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TextBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    /// Create a buffer holding `text`, truncated to fit
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::new();
        let mut end = text.len().min(N);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        buffer.buf[..end].copy_from_slice(&text.as_bytes()[..end]);
        buffer.len = end;
        buffer
    }

    /// Replace the contents with formatted text
    pub fn write(&mut self, args: fmt::Arguments) -> Result<(), fmt::Error> {
        let mut scratch = [0u8; N];
        let len = format_no_std::show(&mut scratch, args)?.len();
        self.buf = scratch;
        self.len = len;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> fmt::Debug for TextBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> PartialEq<&str> for TextBuffer<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Leading zero on the hour in 12-hour mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourPadding {
    /// `09:05`
    #[default]
    Zero,
    /// `9:05`
    Unpadded,
}

/// Renders the wall clock into the time and date text.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockFormatter;

impl ClockFormatter {
    pub const fn new() -> Self {
        Self
    }

    /// Format the time as `HH:MM`, or the 12-hour equivalent
    pub fn format_time<const N: usize>(
        &self,
        now: &NaiveDateTime,
        twenty_four_hour: bool,
        padding: HourPadding,
        buf: &mut TextBuffer<N>,
    ) -> Result<(), fmt::Error> {
        let minute = now.minute();
        if twenty_four_hour {
            return buf.write(format_args!("{:02}:{:02}", now.hour(), minute));
        }

        let (_, hour) = now.hour12();
        match padding {
            HourPadding::Zero => buf.write(format_args!("{:02}:{:02}", hour, minute)),
            HourPadding::Unpadded => buf.write(format_args!("{}:{:02}", hour, minute)),
        }
    }

    /// Format the date as `Www DD Mmm`
    pub fn format_date<const N: usize>(
        &self,
        now: &NaiveDateTime,
        buf: &mut TextBuffer<N>,
    ) -> Result<(), fmt::Error> {
        buf.write(format_args!(
            "{} {:02} {}",
            weekday_abbrev(now.weekday()),
            now.day(),
            month_abbrev(now.month0()),
        ))
    }

    /// Write the current time and date into the face's text layers.
    pub fn update<C>(&self, now: &NaiveDateTime, clock: &C, layers: &mut ClockLayers<'_>)
    where
        C: Clock + ?Sized,
    {
        let time = layers.time.content_mut().text_mut();
        if self
            .format_time(now, clock.is_24h_style(), clock.hour_padding(), time)
            .is_err()
        {
            warn!("Time does not fit the time buffer");
        }
        layers.time.mark_dirty();

        let date = layers.date.content_mut().text_mut();
        if self.format_date(now, date).is_err() {
            warn!("Date does not fit the date buffer");
        }
        layers.date.mark_dirty();

        debug!(
            "Clock updated: {} {}",
            layers.time.content().text().as_str(),
            layers.date.content().text().as_str()
        );
    }
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn month_abbrev(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Feb",
        2 => "Mar",
        3 => "Apr",
        4 => "May",
        5 => "Jun",
        6 => "Jul",
        7 => "Aug",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        11 => "Dec",
        _ => "",
    }
}
