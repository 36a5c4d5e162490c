use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Fields, Invalidity, Result,
    nmea_content::{Decodable, SentenceKind, sentences::rmc::printable},
};

/// Number of PRN slots carried by a GSA sentence.
pub const PRN_SLOTS: usize = 12;

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                        14 15  16  17
///         | | |                         |  |   |   |
///  $GPGSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DilutionOfPrecision {
    /// `M` for manual, `A` for automatic 2D/3D selection
    pub mode: char,
    /// `1` no fix, `2` 2D fix, `3` 3D fix
    pub fix_type: char,
    /// PRNs of the satellites used in the solution, `0` for an unused slot
    pub satellite_prn: [u8; PRN_SLOTS],
    pub pdop: f32,
    pub hdop: f32,
    pub vdop: f32,
    /// Checksum as transmitted
    pub checksum: u8,
}

impl Decodable for DilutionOfPrecision {
    const KIND: SentenceKind = SentenceKind::Gsa;

    fn decode_fields(&mut self, fields: &mut Fields<'_>, _: &mut Invalidity) -> Result<()> {
        self.mode = fields.read()?;
        self.fix_type = fields.read()?;
        for prn in &mut self.satellite_prn {
            *prn = fields.read()?;
        }
        self.pdop = fields.read()?;
        self.hdop = fields.read()?;
        self.vdop = fields.read()?;

        Ok(())
    }

    fn set_checksum(&mut self, checksum: u8) {
        self.checksum = checksum;
    }
}

impl DilutionOfPrecision {
    /// Returns the PRNs of the occupied slots, in slot order.
    ///
    /// ```rust
    /// use nmea0183_fix::{Decodable, DilutionOfPrecision};
    ///
    /// let gsa = DilutionOfPrecision::decode(
    ///     "$GPGSA,A,3,28,09,08,13,19,30,07,27,11,05,,,1.13,0.81,0.79*03",
    /// )
    /// .unwrap();
    /// assert_eq!(gsa.record.active_prns(), [28, 9, 8, 13, 19, 30, 7, 27, 11, 5]);
    /// ```
    pub fn active_prns(&self) -> heapless::Vec<u8, PRN_SLOTS> {
        self.satellite_prn
            .iter()
            .copied()
            .filter(|&prn| prn != 0)
            .collect()
    }
}

impl fmt::Display for DilutionOfPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "GSA mode {} fix {}",
            printable(self.mode),
            printable(self.fix_type)
        )?;
        write!(f, "  active:   ")?;
        for prn in self.active_prns() {
            write!(f, "{prn:02} ")?;
        }
        writeln!(f)?;
        write!(
            f,
            "  dop:      p {:.2} h {:.2} v {:.2}",
            self.pdop, self.hdop, self.vdop
        )
    }
}
