//! # Time Report
//!
//! The compact date, time and signal summary served to other devices.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PositionFix, state::GpsFixState};

/// Highest signal strength a report carries.
pub const MAX_SIGNAL_STRENGTH: u8 = 9;

/// Errors returned when reading a report back from bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("report needs {expected} bytes, got {found}")]
    Truncated { expected: usize, found: usize },
}

/// UTC date and time of the latest RMC, with a signal strength taken from
/// the latest GGA.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{FixAggregator, TimeReport};
///
/// let mut aggregator = FixAggregator::default();
/// aggregator.ingest("$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A*74\n");
/// aggregator.ingest("$GPGGA,070812.000,3923.1196,N,11937.6931,W,1,10,0.81,1773.2,M,-21.2,M,,*62\n");
///
/// let report = TimeReport::from_state(aggregator.state());
/// assert_eq!(report.to_string(), "2015-11-23 07:08:12.000 dow 2 signal 9");
///
/// let bytes = report.to_bytes();
/// assert_eq!(TimeReport::from_bytes(&bytes), Ok(report));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeReport {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    /// 1 for Sunday through 7 for Saturday, 0 when the date is not a real day
    pub day_of_week: u8,
    /// Satellites tracked, capped at [`MAX_SIGNAL_STRENGTH`]
    pub signal_strength: u8,
}

impl TimeReport {
    /// Size of the encoded report.
    pub const LEN: usize = 11;

    pub fn from_state(state: &GpsFixState) -> Self {
        let PositionFix { date, time, .. } = state.position_fix.record;

        TimeReport {
            year: date.year,
            month: date.month,
            day: date.day,
            hour: time.hour,
            minute: time.minute,
            second: time.second,
            millisecond: time.millisecond,
            day_of_week: date
                .to_date()
                .map_or(0, |date| date.weekday().number_from_sunday()),
            signal_strength: state
                .altitude_fix
                .record
                .satellites_tracked
                .min(MAX_SIGNAL_STRENGTH),
        }
    }

    /// Encodes the report, multi-byte fields little endian.
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let [year_lo, year_hi] = self.year.to_le_bytes();
        let [ms_lo, ms_hi] = self.millisecond.to_le_bytes();

        [
            year_lo,
            year_hi,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            ms_lo,
            ms_hi,
            self.day_of_week,
            self.signal_strength,
        ]
    }

    /// Decodes a report from the first [`TimeReport::LEN`] bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReportError> {
        let Some(bytes) = bytes.first_chunk::<{ Self::LEN }>() else {
            return Err(ReportError::Truncated {
                expected: Self::LEN,
                found: bytes.len(),
            });
        };

        Ok(TimeReport {
            year: u16::from_le_bytes([bytes[0], bytes[1]]),
            month: bytes[2],
            day: bytes[3],
            hour: bytes[4],
            minute: bytes[5],
            second: bytes[6],
            millisecond: u16::from_le_bytes([bytes[7], bytes[8]]),
            day_of_week: bytes[9],
            signal_strength: bytes[10],
        })
    }

    /// Converts to a calendar date and time, or `None` when a field is out of
    /// range.
    pub fn to_datetime(&self) -> Option<time::PrimitiveDateTime> {
        let month = time::Month::try_from(self.month).ok()?;
        let date = time::Date::from_calendar_date(i32::from(self.year), month, self.day).ok()?;
        let time_of_day =
            time::Time::from_hms_milli(self.hour, self.minute, self.second, self.millisecond)
                .ok()?;

        Some(time::PrimitiveDateTime::new(date, time_of_day))
    }
}

impl fmt::Display for TimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03} dow {} signal {}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
            self.day_of_week,
            self.signal_strength
        )
    }
}
