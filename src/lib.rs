//! # NMEA 0183 Fix Decoder
//!
//! This library turns the streaming NMEA 0183 output of a GPS receiver into
//! validated fix data:
//!
//! - [`SentenceFramer`] assembles sentences from raw bytes, dropping lines
//!   that do not fit its fixed-capacity buffer
//! - [`checksum`] and [`verify_checksum`] check the trailing `*CC`
//! - [`decode`] reads `$GPRMC`, `$GPGGA`, `$GPGSA` and `$GPGSV` sentences into
//!   typed records, together with an [`Invalidity`] set naming the fields
//!   that did not validate
//! - [`FixAggregator`] keeps the latest record of every type and reassembles
//!   the satellites in view from a GSV cycle
//! - [`GpsReceiver`] ties both to a non-blocking [`ByteSource`]
//!
//! Nothing on the decoding path allocates.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_fix::{ChecksumMode, GpsReceiverBuilder, Invalidity, TimeReport};
//!
//! let mut receiver = GpsReceiverBuilder::new()
//!     .checksum_mode(ChecksumMode::Required)
//!     .build();
//!
//! let mut uart = concat!(
//!     "$GPRMC,070812.000,A,3923.1196,N,11937.6931,W,0.09,283.05,231115,,,A*74\r\n",
//!     "$GPGGA,070812.000,3923.1196,N,11937.6931,W,1,10,0.81,1773.2,M,-21.2,M,,*62\r\n",
//! )
//! .bytes();
//! assert_eq!(receiver.poll(&mut uart), 2);
//!
//! let state = receiver.state();
//! assert_eq!(state.position_fix.invalidity, Invalidity::empty());
//! assert_eq!(state.altitude_fix.record.satellites_tracked, 10);
//!
//! let report = TimeReport::from_state(state);
//! assert_eq!(report.signal_strength, 9);
//! ```

pub mod error;
mod nmea0183;
pub mod nmea_content;
mod parse;
pub mod parsing;
pub mod receiver;
pub mod report;
pub mod state;

pub use error::{Error, Invalidity, Result};
pub use nmea_content::*;
pub use nmea0183::*;
pub use parse::{Fields, NmeaField};
pub use receiver::*;
pub use report::*;
pub use state::*;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
