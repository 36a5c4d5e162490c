use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Fields, Invalidity, Result,
    nmea_content::{Decodable, NmeaTime, Position, SentenceKind},
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $GPGGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// Both unit fields (10, 12) must be `M`, otherwise [`Invalidity::UNIT`] is
/// set. The DGPS fields (13, 14) are skipped.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AltitudeFix {
    /// Fix time in UTC
    pub time: NmeaTime,
    pub position: Position,
    /// GPS quality indicator, `0` when there is no fix
    pub fix_quality: u8,
    /// Number of satellites in use
    pub satellites_tracked: u8,
    /// Horizontal dilution of precision
    pub hdop: f32,
    /// Altitude above mean sea level in meters
    pub altitude: f32,
    /// Height of the geoid above the WGS84 ellipsoid in meters
    pub geoid_height: f32,
    /// Checksum as transmitted
    pub checksum: u8,
}

impl Decodable for AltitudeFix {
    const KIND: SentenceKind = SentenceKind::Gga;

    fn decode_fields(&mut self, fields: &mut Fields<'_>, invalidity: &mut Invalidity) -> Result<()> {
        self.time = fields.time(invalidity)?;
        self.position = fields.position(invalidity)?;
        self.fix_quality = fields.read()?;
        self.satellites_tracked = fields.read()?;
        self.hdop = fields.read()?;
        self.altitude = fields.read()?;
        let altitude_unit: char = fields.read()?;
        self.geoid_height = fields.read()?;
        let geoid_unit: char = fields.read()?;
        fields.skip()?;
        fields.skip()?;

        invalidity.set_if(Invalidity::UNIT, altitude_unit != 'M' || geoid_unit != 'M');

        Ok(())
    }

    fn set_checksum(&mut self, checksum: u8) {
        self.checksum = checksum;
    }
}

impl AltitudeFix {
    /// Returns `true` when the receiver reports a fix of any quality.
    pub fn has_fix(&self) -> bool {
        self.fix_quality != 0
    }
}

impl fmt::Display for AltitudeFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GGA {}", self.time)?;
        writeln!(
            f,
            "  quality:  {} with {} satellites, hdop {:.2}",
            self.fix_quality, self.satellites_tracked, self.hdop
        )?;
        writeln!(f, "  position: {}", self.position)?;
        write!(
            f,
            "  altitude: {:.1} m, geoid {:.1} m",
            self.altitude, self.geoid_height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChecksumMode, decode};

    const SENTENCE: &str =
        "$GPGGA,070812.000,3923.1196,N,11937.6931,W,1,10,0.81,1773.2,M,-21.2,M,,*62";

    #[test]
    fn test_gga_decoding() {
        let gga = decode::<AltitudeFix>(SENTENCE, ChecksumMode::Required).unwrap();
        assert!(gga.is_valid(), "{}", gga.invalidity);

        let fix = gga.record;
        assert_eq!(fix.time.hour, 7);
        assert_eq!(fix.time.second, 12);
        assert!((fix.position.latitude - 39.385327).abs() < 1e-6);
        assert!((fix.position.longitude + 119.628218).abs() < 1e-6);
        assert_eq!(fix.fix_quality, 1);
        assert!(fix.has_fix());
        assert_eq!(fix.satellites_tracked, 10);
        assert!((fix.hdop - 0.81).abs() < 1e-6);
        assert!((fix.altitude - 1773.2).abs() < 1e-3);
        assert!((fix.geoid_height + 21.2).abs() < 1e-5);
        assert_eq!(fix.checksum, 0x62);
    }

    #[test]
    fn test_gga_bad_unit() {
        let sentence = "$GPGGA,070812.000,3923.1196,N,11937.6931,W,1,10,0.81,1773.2,F,-21.2,M,,*69";
        let gga = decode::<AltitudeFix>(sentence, ChecksumMode::Required).unwrap();

        assert_eq!(gga.invalidity, Invalidity::UNIT);
        assert!((gga.record.altitude - 1773.2).abs() < 1e-3);
    }

    #[test]
    fn test_gga_no_fix() {
        let sentence = "$GPGGA,070812.000,,,,,0,00,,,M,,M,,*";
        let gga = decode::<AltitudeFix>(sentence, ChecksumMode::Optional).unwrap();

        assert!(!gga.record.has_fix());
        assert_eq!(gga.record.satellites_tracked, 0);
        assert!(gga.invalidity.contains(Invalidity::CHECKSUM));
    }
}
