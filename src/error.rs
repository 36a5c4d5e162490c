//! # Error Types
//!
//! Decoding failures come in two tiers:
//!
//! - [`Error`] is fatal. The sentence could not be tokenized any further, the
//!   decoder aborted and whatever it had filled in so far is unusable.
//! - [`Invalidity`] is a set of non-fatal flags. Decoding completed and the
//!   record is usable, but some of its fields did not pass validation. Any
//!   combination of flags may be set on a single result.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Holds the result of a decode attempt.
pub type Result<T> = core::result::Result<T, Error>;

/// Fatal decoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The sentence does not carry the prefix the decoder expects.
    #[error("sentence type does not match the decoder")]
    InvalidType,

    /// A field was missing: the sentence ended before the grammar did.
    #[error("sentence ended before all fields were read")]
    MalformedSentence,
}

impl Error {
    /// Raw code of this error, sharing its bit space with [`Invalidity`].
    pub const fn code(self) -> u16 {
        match self {
            Error::InvalidType => 0x0001,
            Error::MalformedSentence => 0x0002,
        }
    }
}

/// A set of non-fatal validation flags raised while decoding a sentence.
///
/// The bit values form a raw 16-bit mask together with [`Error::code`], so
/// [`Invalidity::bits`] can be logged or published as-is.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::Invalidity;
///
/// let mut invalidity = Invalidity::empty();
/// invalidity |= Invalidity::STATUS;
/// invalidity |= Invalidity::CHECKSUM;
///
/// assert!(invalidity.contains(Invalidity::STATUS));
/// assert!(!invalidity.contains(Invalidity::DATE));
/// assert_eq!(invalidity.bits(), 0xC000);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Invalidity(u16);

impl Invalidity {
    /// The time field is not a plausible `hhmmss` time.
    pub const TIME: Invalidity = Invalidity(0x0004);
    /// The date field is not a plausible `ddmmyy` date, or carries the
    /// receiver's "no fix yet" year.
    pub const DATE: Invalidity = Invalidity(0x0008);
    /// Latitude outside of [-90, 90].
    pub const LATITUDE: Invalidity = Invalidity(0x0010);
    /// Longitude outside of [-180, 180].
    pub const LONGITUDE: Invalidity = Invalidity(0x0020);
    /// A unit field was not `M`.
    pub const UNIT: Invalidity = Invalidity(0x2000);
    /// A status or mode field was not `A`.
    pub const STATUS: Invalidity = Invalidity(0x4000);
    /// The transmitted checksum does not match the sentence content.
    pub const CHECKSUM: Invalidity = Invalidity(0x8000);

    const ALL: [(Invalidity, &'static str); 7] = [
        (Invalidity::TIME, "time"),
        (Invalidity::DATE, "date"),
        (Invalidity::LATITUDE, "latitude"),
        (Invalidity::LONGITUDE, "longitude"),
        (Invalidity::UNIT, "unit"),
        (Invalidity::STATUS, "status"),
        (Invalidity::CHECKSUM, "checksum"),
    ];

    /// No flag set: the record passed every check.
    pub const fn empty() -> Self {
        Invalidity(0)
    }

    /// Builds a set from a raw mask, dropping bits that are not flags.
    pub const fn from_bits_truncate(bits: u16) -> Self {
        Invalidity(bits & 0xE03C)
    }

    /// The raw mask.
    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when every flag of `other` is also set in `self`.
    pub const fn contains(self, other: Invalidity) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the flags of `other` when `condition` holds.
    pub fn set_if(&mut self, other: Invalidity, condition: bool) {
        if condition {
            self.0 |= other.0;
        }
    }

    /// Iterates over the names of the flags that are set.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::ALL
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for Invalidity {
    type Output = Invalidity;

    fn bitor(self, rhs: Self) -> Self::Output {
        Invalidity(self.0 | rhs.0)
    }
}

impl BitOrAssign for Invalidity {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Invalidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("valid");
        }

        for (n, name) in self.names().enumerate() {
            if n > 0 {
                f.write_str("|")?;
            }
            f.write_str(name)?;
        }

        Ok(())
    }
}
