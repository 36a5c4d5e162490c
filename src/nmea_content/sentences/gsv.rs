use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Fields, Invalidity, Result,
    nmea_content::{Decodable, SentenceKind},
};

/// Satellites described by a single GSV sentence.
pub const SATELLITES_PER_SENTENCE: usize = 4;

/// One satellite entry of a GSV cycle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Satellite {
    /// Position of the satellite within the whole cycle, starting at 0
    pub index: u8,
    pub prn: u8,
    /// Elevation in degrees, 0-90
    pub elevation: u8,
    /// Azimuth in degrees from true north, 0-359
    pub azimuth: u16,
    /// Signal to noise ratio in dB-Hz, `0` when not tracking
    pub snr: u8,
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02} prn {:02} el {:02} az {:03} snr {:02}",
            self.index, self.prn, self.elevation, self.azimuth, self.snr
        )
    }
}

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $GPGSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
///
/// Sentence `n` of a cycle describes the satellites with absolute indices
/// `4 * (n - 1)` up to, but excluding, `min(4 * n, satellites_in_view)`. Each
/// is stored in slot `index % 4`; the remaining slots stay zeroed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SatelliteVisibility {
    /// Total number of GSV sentences in this cycle
    pub sentence_total: u8,
    /// Number of this sentence within the cycle, starting at 1
    pub sentence_number: u8,
    /// Total number of satellites in view
    pub satellites_in_view: u8,
    pub satellites: [Satellite; SATELLITES_PER_SENTENCE],
    /// Checksum as transmitted
    pub checksum: u8,
}

impl Decodable for SatelliteVisibility {
    const KIND: SentenceKind = SentenceKind::Gsv;

    fn decode_fields(&mut self, fields: &mut Fields<'_>, _: &mut Invalidity) -> Result<()> {
        self.sentence_total = fields.read()?;
        self.sentence_number = fields.read()?;
        self.satellites_in_view = fields.read()?;

        for index in self.indices() {
            self.satellites[usize::from(index) % SATELLITES_PER_SENTENCE] = Satellite {
                index,
                prn: fields.read()?,
                elevation: fields.read()?,
                azimuth: fields.read()?,
                snr: fields.read()?,
            };
        }

        Ok(())
    }

    fn set_checksum(&mut self, checksum: u8) {
        self.checksum = checksum;
    }
}

impl SatelliteVisibility {
    /// Absolute indices of the satellites this sentence describes.
    ///
    /// A sentence number of 0 describes none.
    pub fn indices(&self) -> core::ops::Range<u8> {
        let per_sentence = SATELLITES_PER_SENTENCE as u8;
        let end = self
            .sentence_number
            .saturating_mul(per_sentence)
            .min(self.satellites_in_view);
        let start = self
            .sentence_number
            .saturating_sub(1)
            .saturating_mul(per_sentence);

        if self.sentence_number == 0 { 0..0 } else { start..end }
    }

    /// Returns `true` for the last sentence of a cycle.
    pub fn is_last(&self) -> bool {
        self.sentence_number == self.sentence_total
    }

    /// The satellites this sentence filled in.
    pub fn present(&self) -> impl Iterator<Item = &Satellite> {
        let count = self.indices().len();
        self.satellites.iter().take(count)
    }
}

impl fmt::Display for SatelliteVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GSV {}/{} in view {}",
            self.sentence_number, self.sentence_total, self.satellites_in_view
        )?;
        for satellite in self.present() {
            write!(f, "\n  {satellite}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChecksumMode, Error, decode};

    #[test]
    fn test_gsv_first_sentence() {
        let sentence = "$GPGSV,4,1,13,07,66,049,21,30,62,322,20,28,48,239,23,09,41,161,22*74";
        let gsv = decode::<SatelliteVisibility>(sentence, ChecksumMode::Required).unwrap();
        assert!(gsv.is_valid(), "{}", gsv.invalidity);

        let gsv = gsv.record;
        assert_eq!(gsv.sentence_total, 4);
        assert_eq!(gsv.sentence_number, 1);
        assert_eq!(gsv.satellites_in_view, 13);
        assert_eq!(
            gsv.satellites[0],
            Satellite {
                index: 0,
                prn: 7,
                elevation: 66,
                azimuth: 49,
                snr: 21
            }
        );
        assert_eq!(gsv.satellites[3].index, 3);
        assert_eq!(gsv.satellites[3].prn, 9);
        assert_eq!(gsv.satellites[3].azimuth, 161);
        assert!(!gsv.is_last());
    }

    #[test]
    fn test_gsv_empty_snr() {
        let sentence = "$GPGSV,4,3,13,08,16,116,22,01,12,296,,27,05,114,,17,03,207,*7E";
        let gsv = decode::<SatelliteVisibility>(sentence, ChecksumMode::Required).unwrap();
        assert!(gsv.is_valid(), "{}", gsv.invalidity);

        let indices: Vec<_> = gsv.record.satellites.iter().map(|s| s.index).collect();
        assert_eq!(indices, [8, 9, 10, 11]);
        assert_eq!(gsv.record.satellites[1].snr, 0);
        assert_eq!(gsv.record.satellites[3].azimuth, 207);
    }

    #[test]
    fn test_gsv_partial_last_sentence() {
        let gsv = decode::<SatelliteVisibility>("$GPGSV,4,4,13,48,35,195,30*4F", ChecksumMode::Required)
            .unwrap();
        assert!(gsv.is_valid(), "{}", gsv.invalidity);

        let gsv = gsv.record;
        assert_eq!(gsv.indices(), 12..13);
        assert_eq!(
            gsv.satellites[0],
            Satellite {
                index: 12,
                prn: 48,
                elevation: 35,
                azimuth: 195,
                snr: 30
            }
        );
        assert_eq!(gsv.satellites[1..], [Satellite::default(); 3]);
        assert!(gsv.is_last());
        assert_eq!(gsv.present().count(), 1);
    }

    #[test]
    fn test_gsv_sentence_number_zero() {
        let gsv = decode::<SatelliteVisibility>("$GPGSV,4,0,13*", ChecksumMode::Optional).unwrap();

        assert_eq!(gsv.record.indices(), 0..0);
        assert_eq!(gsv.record.satellites, [Satellite::default(); 4]);
    }

    #[test]
    fn test_gsv_missing_satellite() {
        let result = decode::<SatelliteVisibility>("$GPGSV,1,1,02,07,66,049,21*", ChecksumMode::Optional);
        assert_eq!(result, Err(Error::MalformedSentence));
    }
}
