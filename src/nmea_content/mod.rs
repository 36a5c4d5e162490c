//! # NMEA Content
//!
//! Typed values carried by the supported sentences and the decoders that
//! produce them.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod parse;
pub mod sentences;

pub use parse::{EPOCH_YEAR, parse_checksum, parse_coordinate, parse_date, parse_time};
pub use sentences::*;

/// A UTC date as reported by the receiver.
///
/// The two-digit year is expanded around the GPS epoch: `00..=79` maps to
/// 2000-2079 and `80..=99` to 1980-1999.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NmeaDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl NmeaDate {
    /// Converts to a calendar date, or `None` when the fields do not name a
    /// real day.
    pub fn to_date(self) -> Option<time::Date> {
        let month = time::Month::try_from(self.month).ok()?;
        time::Date::from_calendar_date(i32::from(self.year), month, self.day).ok()
    }
}

impl fmt::Display for NmeaDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A UTC time of day as reported by the receiver.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NmeaTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl NmeaTime {
    /// Converts to a time of day, or `None` when a field is out of range.
    pub fn to_time(self) -> Option<time::Time> {
        time::Time::from_hms_milli(self.hour, self.minute, self.second, self.millisecond).ok()
    }
}

impl fmt::Display for NmeaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// Latitude and longitude in decimal degrees, negative to the south and west.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Speed over ground and course over ground.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// Speed over ground in knots
    pub speed: f32,
    /// Course over ground in degrees
    pub heading: f32,
}
