use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Fields, Invalidity, Result,
    nmea_content::{Decodable, NmeaDate, NmeaTime, Position, SentenceKind, Velocity},
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 1112
///         |         | |       | |        |  |   |   |    |  | |
///  $GPRMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,ddmmyy,x.x,a,m*hh<CR><LF>
/// ```
///
/// Fields 10 and 11 (magnetic variation) are skipped. Both the status (2) and
/// the mode (12) must be `A`, otherwise [`Invalidity::STATUS`] is set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PositionFix {
    /// `A` for an active fix, `V` for a void one
    pub status: char,
    /// Positioning mode indicator
    pub mode: char,
    /// Fix date in UTC
    pub date: NmeaDate,
    /// Fix time in UTC
    pub time: NmeaTime,
    pub position: Position,
    pub velocity: Velocity,
    /// Checksum as transmitted
    pub checksum: u8,
}

impl Decodable for PositionFix {
    const KIND: SentenceKind = SentenceKind::Rmc;

    fn decode_fields(&mut self, fields: &mut Fields<'_>, invalidity: &mut Invalidity) -> Result<()> {
        self.time = fields.time(invalidity)?;
        self.status = fields.read()?;
        self.position = fields.position(invalidity)?;
        self.velocity.speed = fields.read()?;
        self.velocity.heading = fields.read()?;
        self.date = fields.date(invalidity)?;
        fields.skip()?;
        fields.skip()?;
        self.mode = fields.read()?;

        invalidity.set_if(Invalidity::STATUS, self.status != 'A' || self.mode != 'A');

        Ok(())
    }

    fn set_checksum(&mut self, checksum: u8) {
        self.checksum = checksum;
    }
}

impl fmt::Display for PositionFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RMC {} {}", self.date, self.time)?;
        writeln!(f, "  status:   {} mode {}", printable(self.status), printable(self.mode))?;
        writeln!(f, "  position: {}", self.position)?;
        write!(
            f,
            "  velocity: {:.2} kn, {:.2} deg",
            self.velocity.speed, self.velocity.heading
        )
    }
}

/// Empty char fields read as `'\0'`, which is rendered as `-`.
pub(crate) fn printable(c: char) -> char {
    if c == '\0' { '-' } else { c }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChecksumMode, Error, decode};

    #[test]
    fn test_rmc_decoding() {
        let sentence = "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A*74";
        let rmc = decode::<PositionFix>(sentence, ChecksumMode::Required).unwrap();
        assert!(rmc.is_valid(), "{}", rmc.invalidity);

        let fix = rmc.record;
        assert_eq!(fix.status, 'A');
        assert_eq!(fix.mode, 'A');
        assert_eq!(
            fix.date,
            NmeaDate {
                year: 2015,
                month: 11,
                day: 23
            }
        );
        assert_eq!(
            fix.time,
            NmeaTime {
                hour: 7,
                minute: 8,
                second: 12,
                millisecond: 0
            }
        );
        assert!((fix.position.latitude - 39.385327).abs() < 1e-6);
        assert!((fix.position.longitude + 119.628218).abs() < 1e-6);
        assert!((fix.velocity.speed - 0.09).abs() < 1e-6);
        assert!((fix.velocity.heading - 283.05).abs() < 1e-3);
        assert_eq!(fix.checksum, 0x74);
    }

    #[test]
    fn test_rmc_southern_eastern_hemisphere() {
        let sentence = "$GPRMC,070812.000,A,3923.1196,S,11937.6931,E,0.09,283.05,231115,,,D*7E";
        let rmc = decode::<PositionFix>(sentence, ChecksumMode::Required).unwrap();

        assert!(rmc.record.position.latitude < 0.0);
        assert!(rmc.record.position.longitude > 0.0);
        assert_eq!(rmc.record.mode, 'D');
        assert_eq!(rmc.invalidity, Invalidity::STATUS);
    }

    #[test]
    fn test_rmc_void() {
        let rmc = decode::<PositionFix>("$GPRMC,,V,,,,,,,,,,N*53", ChecksumMode::Required).unwrap();

        assert_eq!(rmc.record.status, 'V');
        assert_eq!(rmc.record.position, Position::default());
        assert!(rmc.invalidity.contains(Invalidity::STATUS));
        assert!(rmc.invalidity.contains(Invalidity::TIME));
        assert!(rmc.invalidity.contains(Invalidity::DATE));
        assert!(!rmc.invalidity.contains(Invalidity::CHECKSUM));
    }

    #[test]
    fn test_rmc_epoch_date() {
        let sentence = "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,010180,,,A*79";
        let rmc = decode::<PositionFix>(sentence, ChecksumMode::Required).unwrap();

        assert_eq!(rmc.invalidity, Invalidity::DATE);
        assert_eq!(rmc.record.date.year, 1980);
    }

    #[test]
    fn test_rmc_latitude_out_of_range() {
        let sentence = "$GPRMC,070812.000,A,9100.0000,N,11937.6931,W,0.09,283.05,231115,,,A*78";
        let rmc = decode::<PositionFix>(sentence, ChecksumMode::Required).unwrap();

        assert_eq!(rmc.invalidity, Invalidity::LATITUDE);
    }

    #[test]
    fn test_rmc_truncated() {
        let result = decode::<PositionFix>("$GPRMC,070812.000,A,3923.1196,N", ChecksumMode::Required);
        assert_eq!(result, Err(Error::MalformedSentence));
    }

    #[test]
    fn test_rmc_display() {
        let sentence = "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A*74";
        let rmc = decode::<PositionFix>(sentence, ChecksumMode::Required).unwrap();
        let dump = rmc.record.to_string();

        assert!(dump.starts_with("RMC 2015-11-23 07:08:12.000"));
        assert!(dump.contains("39.385327, -119.628218"));
    }
}
