//! # Receiver
//!
//! Drives a [`SentenceFramer`] and a [`FixAggregator`] from a byte source,
//! one poll at a time.

use log::trace;

use crate::{
    ChecksumMode, FramerStats, SENTENCE_CAPACITY, SentenceFramer,
    state::{AggregatorStats, FixAggregator, GpsFixState, Ingest},
};

/// A non-blocking source of received bytes.
///
/// `next_byte` returns `None` as soon as no byte is ready; it must not wait
/// for one. Any iterator of bytes is a source.
pub trait ByteSource {
    fn next_byte(&mut self) -> Option<u8>;
}

impl<I> ByteSource for I
where
    I: Iterator<Item = u8>,
{
    fn next_byte(&mut self) -> Option<u8> {
        self.next()
    }
}

/// Frames received bytes and keeps the resulting fix state.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::GpsReceiverBuilder;
///
/// let mut receiver = GpsReceiverBuilder::new().build();
///
/// let mut uart = b"$GPGSV,4,4,13,48,35,195,30*4F\r\n$GPGSA,A,3,28".iter().copied();
/// assert_eq!(receiver.poll(&mut uart), 1);
/// assert_eq!(receiver.state().satellites[3].record.satellites[0].prn, 48);
///
/// // the GSA is completed by a later poll
/// let mut uart = b",09,08,13,19,30,07,27,11,05,,,1.13,0.81,0.79*03\r\n".iter().copied();
/// assert_eq!(receiver.poll(&mut uart), 1);
/// assert_eq!(receiver.state().dilution.record.satellite_prn[0], 28);
/// ```
#[derive(Debug, Default)]
pub struct GpsReceiver<const N: usize = SENTENCE_CAPACITY> {
    framer: SentenceFramer<N>,
    aggregator: FixAggregator,
}

impl<const N: usize> GpsReceiver<N> {
    /// Drains every byte the source has ready.
    ///
    /// Returns the number of complete sentences handed to the aggregator,
    /// whatever their outcome.
    pub fn poll<S: ByteSource + ?Sized>(&mut self, source: &mut S) -> usize {
        let mut sentences = 0;

        while let Some(byte) = source.next_byte() {
            if self.feed(byte).is_some() {
                sentences += 1;
            }
        }

        if sentences > 0 {
            trace!("poll ingested {sentences} sentences");
        }

        sentences
    }

    /// Feeds a single byte, returning the outcome of the sentence it
    /// completes, if any.
    pub fn feed(&mut self, byte: u8) -> Option<Ingest> {
        let sentence = self.framer.push(byte)?;
        Some(self.aggregator.ingest(&sentence))
    }

    pub fn state(&self) -> &GpsFixState {
        self.aggregator.state()
    }

    pub fn framer_stats(&self) -> FramerStats {
        self.framer.stats()
    }

    pub fn aggregator_stats(&self) -> AggregatorStats {
        self.aggregator.stats()
    }
}

/// Configures a [`GpsReceiver`].
///
/// The default settings are:
/// - Checksum mode: [`ChecksumMode::Required`]
/// - Sentence capacity: [`SENTENCE_CAPACITY`]
///
/// ```rust
/// use nmea0183_fix::{ChecksumMode, GpsReceiverBuilder};
///
/// let mut receiver = GpsReceiverBuilder::new()
///     .checksum_mode(ChecksumMode::Optional)
///     .build_with_capacity::<96>();
///
/// let mut uart = b"$GPGSV,4,4,13,48,35,195,30\n".iter().copied();
/// receiver.poll(&mut uart);
/// assert!(receiver.state().satellites[3].is_valid());
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy)]
pub struct GpsReceiverBuilder {
    checksum_mode: ChecksumMode,
}

impl GpsReceiverBuilder {
    pub fn new() -> Self {
        GpsReceiverBuilder {
            checksum_mode: ChecksumMode::Required,
        }
    }

    /// Sets how the trailing checksum of each sentence is handled.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Builds a receiver with the default sentence capacity.
    pub fn build(self) -> GpsReceiver {
        self.build_with_capacity()
    }

    /// Builds a receiver whose sentences hold at most `N - 1` bytes.
    pub fn build_with_capacity<const N: usize>(self) -> GpsReceiver<N> {
        GpsReceiver {
            framer: SentenceFramer::new(),
            aggregator: FixAggregator::new(self.checksum_mode),
        }
    }
}
