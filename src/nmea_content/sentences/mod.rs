mod gga;
mod gsa;
mod gsv;
mod rmc;

pub use gga::AltitudeFix;
pub use gsa::{DilutionOfPrecision, PRN_SLOTS};
pub use gsv::{SATELLITES_PER_SENTENCE, Satellite, SatelliteVisibility};
pub use rmc::PositionFix;

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ChecksumMode, Error, Fields, Invalidity, Result, checksum, verify_checksum};

/// The sentence types this crate decodes, identified by their fixed prefix.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceKind {
    /// Recommended Minimum Navigation Information
    Rmc,
    /// Global Positioning System Fix Data
    Gga,
    /// GPS DOP and active satellites
    Gsa,
    /// Satellites in View
    Gsv,
}

impl SentenceKind {
    pub const ALL: [SentenceKind; 4] = [
        SentenceKind::Rmc,
        SentenceKind::Gga,
        SentenceKind::Gsa,
        SentenceKind::Gsv,
    ];

    /// The seven bytes every sentence of this kind starts with.
    pub const fn prefix(self) -> &'static str {
        match self {
            SentenceKind::Rmc => "$GPRMC,",
            SentenceKind::Gga => "$GPGGA,",
            SentenceKind::Gsa => "$GPGSA,",
            SentenceKind::Gsv => "$GPGSV,",
        }
    }

    /// Identifies a sentence by its prefix. Unsupported sentences yield `None`.
    ///
    /// ```rust
    /// use nmea0183_fix::SentenceKind;
    ///
    /// assert_eq!(SentenceKind::identify("$GPGSA,A,3,,,,,,,,,,,,,,,*1E"), Some(SentenceKind::Gsa));
    /// assert_eq!(SentenceKind::identify("$GPVTG,054.7,T,034.4,M*2F"), None);
    /// ```
    pub fn identify(sentence: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| sentence.starts_with(kind.prefix()))
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SentenceKind::Rmc => "RMC",
            SentenceKind::Gga => "GGA",
            SentenceKind::Gsa => "GSA",
            SentenceKind::Gsv => "GSV",
        })
    }
}

/// A decoded record together with the validation flags raised while decoding it.
///
/// The record is complete and usable; `invalidity` tells which of its fields
/// should not be trusted.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Decoded<T> {
    pub record: T,
    pub invalidity: Invalidity,
}

impl<T> Decoded<T> {
    /// Returns `true` when no validation flag was raised.
    pub fn is_valid(&self) -> bool {
        self.invalidity.is_empty()
    }
}

/// A record decoded from one of the supported sentence types.
///
/// Implementors describe their field grammar in [`Decodable::decode_fields`];
/// the checksum, prefix and zero-filling steps are shared by [`decode`].
pub trait Decodable: Default {
    /// The sentence type this record is decoded from.
    const KIND: SentenceKind;

    /// Reads the fields following the prefix, in grammar order.
    ///
    /// Non-fatal problems are accumulated into `invalidity`. A missing field
    /// aborts with [`Error::MalformedSentence`].
    fn decode_fields(&mut self, fields: &mut Fields<'_>, invalidity: &mut Invalidity)
    -> Result<()>;

    /// Stores the checksum transmitted with the sentence.
    fn set_checksum(&mut self, checksum: u8);

    /// Decodes a full sentence with a required checksum.
    fn decode(sentence: &str) -> Result<Decoded<Self>> {
        decode(sentence, ChecksumMode::Required)
    }
}

/// Decodes a full sentence into `T`.
///
/// The checksum is computed over the sentence as received, before any field
/// is split off. A trailing line ending is tolerated.
///
/// # Errors
///
/// - [`Error::InvalidType`] when the sentence does not carry `T`'s prefix.
/// - [`Error::MalformedSentence`] when the sentence ends before `T`'s grammar
///   does, or when the checksum is required and absent.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{ChecksumMode, Error, Invalidity, PositionFix, decode};
///
/// let sentence = "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A*74";
/// let rmc = decode::<PositionFix>(sentence, ChecksumMode::Required).unwrap();
/// assert!(rmc.is_valid());
/// assert_eq!(rmc.record.checksum, 0x74);
///
/// let corrupted = "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A*75";
/// let rmc = decode::<PositionFix>(corrupted, ChecksumMode::Required).unwrap();
/// assert_eq!(rmc.invalidity, Invalidity::CHECKSUM);
///
/// let truncated = "$GPRMC,070812.000,A*4A";
/// assert_eq!(
///     decode::<PositionFix>(truncated, ChecksumMode::Required).unwrap_err(),
///     Error::MalformedSentence
/// );
/// ```
pub fn decode<T: Decodable>(sentence: &str, mode: ChecksumMode) -> Result<Decoded<T>> {
    let computed = checksum(sentence);

    let line = sentence.trim_end_matches(['\r', '\n']);
    let fragment = line
        .strip_prefix(T::KIND.prefix())
        .ok_or(Error::InvalidType)?;

    let mut record = T::default();
    let mut invalidity = Invalidity::empty();
    let mut fields = Fields::new(fragment);

    record.decode_fields(&mut fields, &mut invalidity)?;

    if mode == ChecksumMode::Required || fragment.contains('*') {
        let transmitted = fields.checksum()?;
        record.set_checksum(transmitted);
        invalidity |= verify_checksum(computed, transmitted);
    }

    Ok(Decoded { record, invalidity })
}

/// A decoded sentence of any supported type.
///
/// ```rust
/// use nmea0183_fix::{ChecksumMode, NmeaSentence};
///
/// let sentence = "$GPGSA,A,3,28,09,08,13,19,30,07,27,11,05,,,1.13,0.81,0.79*03";
/// match NmeaSentence::decode(sentence, ChecksumMode::Required) {
///     Some(Ok(NmeaSentence::GSA(gsa))) => {
///         assert!(gsa.is_valid());
///         assert_eq!(gsa.record.active_prns().len(), 10);
///     }
///     other => panic!("unexpected: {other:?}"),
/// }
///
/// assert!(NmeaSentence::decode("$GPZDA,123519,04,07,2025,,*", ChecksumMode::Required).is_none());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum NmeaSentence {
    /// Recommended Minimum Navigation Information
    RMC(Decoded<PositionFix>),
    /// Global Positioning System Fix Data
    GGA(Decoded<AltitudeFix>),
    /// GPS DOP and active satellites
    GSA(Decoded<DilutionOfPrecision>),
    /// Satellites in View
    GSV(Decoded<SatelliteVisibility>),
}

impl NmeaSentence {
    /// Identifies the sentence by its prefix and decodes it.
    ///
    /// Returns `None` for sentence types this crate does not decode.
    pub fn decode(sentence: &str, mode: ChecksumMode) -> Option<Result<Self>> {
        SentenceKind::identify(sentence).map(|kind| Self::decode_as(kind, sentence, mode))
    }

    /// Decodes the sentence as `kind`, failing with [`Error::InvalidType`]
    /// when its prefix says otherwise.
    pub fn decode_as(kind: SentenceKind, sentence: &str, mode: ChecksumMode) -> Result<Self> {
        match kind {
            SentenceKind::Rmc => decode(sentence, mode).map(Self::RMC),
            SentenceKind::Gga => decode(sentence, mode).map(Self::GGA),
            SentenceKind::Gsa => decode(sentence, mode).map(Self::GSA),
            SentenceKind::Gsv => decode(sentence, mode).map(Self::GSV),
        }
    }

    pub fn kind(&self) -> SentenceKind {
        match self {
            NmeaSentence::RMC(_) => SentenceKind::Rmc,
            NmeaSentence::GGA(_) => SentenceKind::Gga,
            NmeaSentence::GSA(_) => SentenceKind::Gsa,
            NmeaSentence::GSV(_) => SentenceKind::Gsv,
        }
    }

    pub fn invalidity(&self) -> Invalidity {
        match self {
            NmeaSentence::RMC(rmc) => rmc.invalidity,
            NmeaSentence::GGA(gga) => gga.invalidity,
            NmeaSentence::GSA(gsa) => gsa.invalidity,
            NmeaSentence::GSV(gsv) => gsv.invalidity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify() {
        for kind in SentenceKind::ALL {
            assert_eq!(kind.prefix().len(), 7);
            assert_eq!(SentenceKind::identify(kind.prefix()), Some(kind));
        }

        assert_eq!(SentenceKind::identify("$GPRMC"), None);
        assert_eq!(SentenceKind::identify("$GNRMC,"), None);
        assert_eq!(SentenceKind::identify("GPRMC,"), None);
        assert_eq!(SentenceKind::identify(""), None);
    }

    #[test]
    fn test_wrong_prefix() {
        let sentence = "$GPGGA,070812.000,3923.1196,N,11937.6931,W,1,10,0.81,1773.2,M,-21.2,M,,*62";
        assert_eq!(
            decode::<PositionFix>(sentence, ChecksumMode::Required),
            Err(Error::InvalidType)
        );
    }

    #[test]
    fn test_optional_checksum() {
        let sentence = "$GPGSA,A,3,28,09,08,13,19,30,07,27,11,05,,,1.13,0.81,0.79";

        let gsa = decode::<DilutionOfPrecision>(sentence, ChecksumMode::Optional).unwrap();
        assert!(gsa.is_valid());
        assert_eq!(gsa.record.checksum, 0);

        assert_eq!(
            decode::<DilutionOfPrecision>(sentence, ChecksumMode::Required),
            Err(Error::MalformedSentence)
        );

        let sentence = "$GPGSA,A,3,28,09,08,13,19,30,07,27,11,05,,,1.13,0.81,0.79*04";
        let gsa = decode::<DilutionOfPrecision>(sentence, ChecksumMode::Optional).unwrap();
        assert_eq!(gsa.invalidity, Invalidity::CHECKSUM);
    }

    #[test]
    fn test_line_ending_tolerated() {
        let sentence = "$GPGSA,A,3,28,09,08,13,19,30,07,27,11,05,,,1.13,0.81,0.79*03\r\n";
        let gsa = decode::<DilutionOfPrecision>(sentence, ChecksumMode::Required).unwrap();
        assert!(gsa.is_valid());
        assert_eq!(gsa.record.checksum, 0x03);
    }

    #[test]
    fn test_sentence_dispatch() {
        let sentence = "$GPGSV,4,1,13,07,66,049,21,30,62,322,20,28,48,239,23,09,41,161,22*74";
        let decoded = NmeaSentence::decode(sentence, ChecksumMode::Required)
            .unwrap()
            .unwrap();
        assert_eq!(decoded.kind(), SentenceKind::Gsv);
        assert!(decoded.invalidity().is_empty());

        assert!(NmeaSentence::decode("$GPGLL,4916.45,N,12311.12,W,225444,A*31", ChecksumMode::Required).is_none());
    }
}
