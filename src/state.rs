//! # Fix State
//!
//! The latest decoded record of every supported sentence type, and the
//! aggregator that keeps it current.

use core::fmt;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ChecksumMode, Error, Invalidity,
    nmea_content::{
        AltitudeFix, Decoded, DilutionOfPrecision, NmeaSentence, PositionFix, Satellite,
        SatelliteVisibility, SentenceKind,
    },
};

/// Number of GSV sentences kept per cycle.
pub const GSV_SLOTS: usize = 4;

/// Everything the receiver has reported so far.
///
/// Each record is replaced as a whole whenever a sentence of its type decodes
/// without a fatal error, even when some of its fields were flagged. The flags
/// are kept next to the record.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GpsFixState {
    /// Latest RMC
    pub position_fix: Decoded<PositionFix>,
    /// Latest GGA
    pub altitude_fix: Decoded<AltitudeFix>,
    /// Latest GSA
    pub dilution: Decoded<DilutionOfPrecision>,
    /// Latest GSV of each sentence number, slot `n - 1` for sentence `n`
    pub satellites: [Decoded<SatelliteVisibility>; GSV_SLOTS],
}

impl GpsFixState {
    /// Satellites described by the stored GSV sentences, in cycle order.
    ///
    /// Sentences of a cycle that has not been completed yet may be mixed with
    /// those of the previous one. Slots beyond the sentence total of the
    /// latest first sentence are cleared when it arrives.
    pub fn satellites_in_view(&self) -> impl Iterator<Item = &Satellite> {
        self.satellites.iter().flat_map(|gsv| gsv.record.present())
    }

    /// Satellites in view as reported by the most recent GSV cycle.
    pub fn satellites_in_view_count(&self) -> u8 {
        self.satellites[0].record.satellites_in_view
    }
}

impl fmt::Display for GpsFixState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.position_fix.record, self.position_fix.invalidity)?;
        writeln!(f, "{} [{}]", self.altitude_fix.record, self.altitude_fix.invalidity)?;
        writeln!(f, "{} [{}]", self.dilution.record, self.dilution.invalidity)?;
        write!(f, "satellites in view: {}", self.satellites_in_view_count())?;
        for satellite in self.satellites_in_view() {
            write!(f, "\n  {satellite}")?;
        }
        Ok(())
    }
}

/// Counters kept by a [`FixAggregator`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorStats {
    pub rmc: u32,
    pub gga: u32,
    pub gsa: u32,
    pub gsv: u32,
    /// Sentences dropped because decoding failed
    pub rejected: u32,
    /// Sentences of a type that is not decoded
    pub ignored: u32,
    /// GSV sentences whose number has no slot
    pub gsv_out_of_range: u32,
}

impl AggregatorStats {
    /// Sentences of `kind` stored so far.
    pub fn stored(&self, kind: SentenceKind) -> u32 {
        match kind {
            SentenceKind::Rmc => self.rmc,
            SentenceKind::Gga => self.gga,
            SentenceKind::Gsa => self.gsa,
            SentenceKind::Gsv => self.gsv,
        }
    }

    fn count(&mut self, kind: SentenceKind) {
        let counter = match kind {
            SentenceKind::Rmc => &mut self.rmc,
            SentenceKind::Gga => &mut self.gga,
            SentenceKind::Gsa => &mut self.gsa,
            SentenceKind::Gsv => &mut self.gsv,
        };
        *counter = counter.wrapping_add(1);
    }
}

/// What [`FixAggregator::ingest`] did with a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// The record replaced the previous one of its type.
    Stored {
        kind: SentenceKind,
        invalidity: Invalidity,
    },
    /// Decoding failed; the previous record is kept.
    Rejected { kind: SentenceKind, error: Error },
    /// A GSV sentence decoded, but its number has no slot.
    GsvOutOfRange(u8),
    /// The sentence type is not decoded.
    Ignored,
}

/// Dispatches framed sentences to their decoders and keeps the results.
///
/// The aggregator is the only writer of its [`GpsFixState`]; readers borrow
/// it between calls to [`FixAggregator::ingest`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{FixAggregator, Ingest, Invalidity, SentenceKind};
///
/// let mut aggregator = FixAggregator::default();
///
/// let outcome = aggregator.ingest("$GPGGA,070812.000,3923.1196,N,11937.6931,W,1,10,0.81,1773.2,M,-21.2,M,,*62\n");
/// assert_eq!(
///     outcome,
///     Ingest::Stored { kind: SentenceKind::Gga, invalidity: Invalidity::empty() }
/// );
/// assert_eq!(aggregator.state().altitude_fix.record.satellites_tracked, 10);
///
/// assert_eq!(aggregator.ingest("$GPVTG,054.7,T,034.4,M*2F\n"), Ingest::Ignored);
/// ```
#[derive(Debug, Default)]
pub struct FixAggregator {
    state: GpsFixState,
    checksum_mode: ChecksumMode,
    stats: AggregatorStats,
}

impl FixAggregator {
    pub fn new(checksum_mode: ChecksumMode) -> Self {
        FixAggregator {
            checksum_mode,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &GpsFixState {
        &self.state
    }

    pub fn stats(&self) -> AggregatorStats {
        self.stats
    }

    pub fn checksum_mode(&self) -> ChecksumMode {
        self.checksum_mode
    }

    /// Decodes one framed sentence and stores the result.
    pub fn ingest(&mut self, sentence: &str) -> Ingest {
        let Some(kind) = SentenceKind::identify(sentence) else {
            self.stats.ignored = self.stats.ignored.wrapping_add(1);
            trace!("ignoring {}", sentence.trim_end());
            return Ingest::Ignored;
        };

        match NmeaSentence::decode_as(kind, sentence, self.checksum_mode) {
            Ok(decoded) => self.store(decoded),
            Err(error) => {
                self.stats.rejected = self.stats.rejected.wrapping_add(1);
                debug!("{kind} rejected: {error} ({:04x})", error.code());
                Ingest::Rejected { kind, error }
            }
        }
    }

    fn store(&mut self, sentence: NmeaSentence) -> Ingest {
        let kind = sentence.kind();
        let invalidity = sentence.invalidity();

        match sentence {
            NmeaSentence::RMC(rmc) => self.state.position_fix = rmc,
            NmeaSentence::GGA(gga) => self.state.altitude_fix = gga,
            NmeaSentence::GSA(gsa) => self.state.dilution = gsa,
            NmeaSentence::GSV(gsv) => {
                let number = gsv.record.sentence_number;
                let slot = usize::from(number)
                    .checked_sub(1)
                    .and_then(|index| self.state.satellites.get_mut(index));

                let Some(slot) = slot else {
                    self.stats.gsv_out_of_range = self.stats.gsv_out_of_range.wrapping_add(1);
                    debug!("GSV sentence number {number} out of range");
                    return Ingest::GsvOutOfRange(number);
                };
                *slot = gsv;

                // a new cycle drops the sentences a shorter cycle will not send
                if number == 1 {
                    let total = usize::from(gsv.record.sentence_total).max(1);
                    for stale in self.state.satellites.iter_mut().skip(total) {
                        *stale = Decoded::default();
                    }
                }
            }
        }

        self.stats.count(kind);
        if invalidity.is_empty() {
            trace!("{kind} stored");
        } else {
            debug!("{kind} invalid: {:04x} ({invalidity})", invalidity.bits());
        }

        Ingest::Stored { kind, invalidity }
    }
}
