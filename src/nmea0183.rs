//! # NMEA 0183 Framing
//!
//! Turns a raw byte stream into complete `$HHHHH,D1,D2,...,Dn*CC\r\n`
//! sentences and verifies their checksums.
//!
//! The framer keeps a single fixed-capacity buffer. A line that does not fit
//! is dropped as a whole, so decoders never see a partial sentence.

use log::{debug, warn};

use crate::Invalidity;

/// Default capacity of the sentence buffer, in bytes.
///
/// A sentence holds at most `SENTENCE_CAPACITY - 1` bytes including its `\n`.
pub const SENTENCE_CAPACITY: usize = 128;

/// Defines how decoders handle the trailing `*CC` checksum.
///
/// The checksum is a two-digit hexadecimal value representing the XOR of all
/// bytes between the `$` prefix and the `*` delimiter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    #[default]
    /// Checksum field is required.
    ///
    /// A sentence whose fields end before the checksum is malformed. A
    /// checksum that does not match sets [`Invalidity::CHECKSUM`].
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// A sentence without `*` is accepted unchecked. A present checksum that
    /// does not match sets [`Invalidity::CHECKSUM`].
    Optional,
}

/// Calculates the NMEA 0183 checksum of a full sentence.
///
/// Every byte after the leading `$` is XORed, up to the `*` delimiter or the
/// line ending. A sentence that does not start with `$` has a checksum of 0.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::checksum;
///
/// assert_eq!(checksum("$GPGSV,4,4,13,48,35,195,30*4F\r\n"), 0x4F);
/// assert_eq!(checksum("GPGSV,4,4,13,48,35,195,30*4F"), 0);
/// assert_eq!(checksum("$"), 0);
/// ```
pub fn checksum(sentence: &str) -> u8 {
    let Some(body) = sentence.strip_prefix('$') else {
        return 0;
    };

    body.bytes()
        .take_while(|&byte| !matches!(byte, b'*' | b'\r' | b'\n'))
        .fold(0u8, |accumulated_xor, byte| accumulated_xor ^ byte)
}

/// Compares a computed checksum with the transmitted one.
///
/// ```rust
/// use nmea0183_fix::{Invalidity, verify_checksum};
///
/// assert!(verify_checksum(0x4F, 0x4F).is_empty());
/// assert_eq!(verify_checksum(0x4F, 0x4E), Invalidity::CHECKSUM);
/// ```
pub fn verify_checksum(computed: u8, transmitted: u8) -> Invalidity {
    if computed == transmitted {
        Invalidity::empty()
    } else {
        Invalidity::CHECKSUM
    }
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// Counters kept by a [`SentenceFramer`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FramerStats {
    /// Sentences handed out
    pub sentences: u32,
    /// Lines dropped because they did not fit the buffer
    pub overflows: u32,
    /// Lines dropped because they were not ASCII
    pub rejected: u32,
}

/// Assembles sentences from a byte stream, one byte at a time.
///
/// `\r` is dropped and `\n` completes a sentence, which is returned with its
/// `\n`. When a line grows to `N - 1` bytes the buffer is discarded and the
/// framer skips ahead to the next `$` or `\n`, so the tail of an oversized
/// line is never taken for a sentence of its own.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::SentenceFramer;
///
/// let mut framer = SentenceFramer::<128>::new();
/// let mut sentences = b"$GPGSV,4,4,13,48,35,195,30*4F\r\n"
///     .iter()
///     .filter_map(|&byte| framer.push(byte));
///
/// assert_eq!(
///     sentences.next().as_deref(),
///     Some("$GPGSV,4,4,13,48,35,195,30*4F\n")
/// );
/// assert_eq!(sentences.next(), None);
/// ```
#[derive(Debug, Default)]
pub struct SentenceFramer<const N: usize = SENTENCE_CAPACITY> {
    buffer: heapless::Vec<u8, N>,
    resync: bool,
    stats: FramerStats,
}

impl<const N: usize> SentenceFramer<N> {
    pub fn new() -> Self {
        SentenceFramer {
            buffer: heapless::Vec::new(),
            resync: false,
            stats: FramerStats::default(),
        }
    }

    /// Feeds one byte, returning the sentence it completes, if any.
    pub fn push(&mut self, byte: u8) -> Option<heapless::String<N>> {
        if self.resync {
            self.skip(byte);
            return None;
        }

        if byte == b'\r' {
            return None;
        }

        if self.buffer.len() >= N.saturating_sub(1) || self.buffer.push(byte).is_err() {
            self.overflow();
            self.skip(byte);
            return None;
        }

        if byte == b'\n' {
            return self.complete();
        }

        None
    }

    /// Bytes of the sentence being assembled.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    pub fn stats(&self) -> FramerStats {
        self.stats
    }

    /// Drops the sentence being assembled.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.resync = false;
    }

    fn overflow(&mut self) {
        self.stats.overflows = self.stats.overflows.wrapping_add(1);
        warn!(
            "sentence exceeds {} bytes, dropping {} buffered bytes",
            N.saturating_sub(1),
            self.buffer.len()
        );
        self.buffer.clear();
        self.resync = true;
    }

    /// Discards bytes while resynchronising. A `$` starts a new sentence.
    fn skip(&mut self, byte: u8) {
        match byte {
            b'$' => {
                self.buffer.clear();
                self.resync = self.buffer.push(byte).is_err();
            }
            b'\n' => self.resync = false,
            _ => {}
        }
    }

    fn complete(&mut self) -> Option<heapless::String<N>> {
        let line = core::mem::take(&mut self.buffer);

        if !line.is_ascii() {
            self.stats.rejected = self.stats.rejected.wrapping_add(1);
            debug!("dropping non-ASCII line of {} bytes", line.len());
            return None;
        }

        let sentence = heapless::String::from_utf8(line).ok()?;
        self.stats.sentences = self.stats.sentences.wrapping_add(1);

        Some(sentence)
    }
}
