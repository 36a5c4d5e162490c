use nom::{
    IResult, Parser,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt},
    sequence::preceded,
};

use crate::{
    Fields, Invalidity, Result,
    nmea_content::{NmeaDate, NmeaTime, Position},
    parsing::{fixed_digits, fraction, lenient},
};

/// Two-digit year the receiver reports before it has acquired a fix.
///
/// Receivers start counting from the GPS epoch (1980) and report it until the
/// first almanac arrives, so a year of `80` means the date is not known yet.
pub const EPOCH_YEAR: u16 = 80;

/// Parses a `ddmmyy` date field.
///
/// Sets [`Invalidity::DATE`] when the year is the epoch sentinel, when the
/// field is not six digits, or when the day or month are out of range.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{Invalidity, NmeaDate, parse_date};
///
/// let (date, invalidity) = parse_date("231115");
/// assert_eq!(date, NmeaDate { year: 2015, month: 11, day: 23 });
/// assert!(invalidity.is_empty());
///
/// let (date, invalidity) = parse_date("060180");
/// assert_eq!(date.year, 1980);
/// assert!(invalidity.contains(Invalidity::DATE));
///
/// let (_, invalidity) = parse_date("800101");
/// assert!(invalidity.contains(Invalidity::DATE));
/// ```
pub fn parse_date(token: &str) -> (NmeaDate, Invalidity) {
    let parsed: IResult<_, _> =
        all_consuming((fixed_digits(2), fixed_digits(2), fixed_digits(2))).parse(token);

    let Ok((_, (day, month, year))) = parsed else {
        return (NmeaDate::default(), Invalidity::DATE);
    };

    let mut invalidity = Invalidity::empty();
    invalidity.set_if(
        Invalidity::DATE,
        year == EPOCH_YEAR || !(1..=12).contains(&month) || !(1..=31).contains(&day),
    );

    let date = NmeaDate {
        year: year + if year < EPOCH_YEAR { 2000 } else { 1900 },
        month: month as u8,
        day: day as u8,
    };

    (date, invalidity)
}

/// Parses a `hhmmss[.sss]` time field.
///
/// Fractional seconds are scaled to milliseconds by their number of digits,
/// so `.5` is 500 ms and `.050` is 50 ms. Sets [`Invalidity::TIME`] when the
/// field does not start with six digits or a component is out of range (a
/// leap second of `60` is accepted).
///
/// ```rust
/// use nmea0183_fix::{NmeaTime, parse_time};
///
/// let (time, invalidity) = parse_time("070812.000");
/// assert_eq!(time, NmeaTime { hour: 7, minute: 8, second: 12, millisecond: 0 });
/// assert!(invalidity.is_empty());
/// ```
pub fn parse_time(token: &str) -> (NmeaTime, Invalidity) {
    let parsed: IResult<_, _> = (
        fixed_digits(2),
        fixed_digits(2),
        fixed_digits(2),
        opt(preceded(char('.'), digit1)),
    )
        .parse(token);

    let Ok((_, (hour, minute, second, frac))) = parsed else {
        return (NmeaTime::default(), Invalidity::TIME);
    };

    let mut invalidity = Invalidity::empty();
    invalidity.set_if(Invalidity::TIME, hour > 23 || minute > 59 || second > 60);

    let time = NmeaTime {
        hour: hour as u8,
        minute: minute as u8,
        second: second as u8,
        millisecond: frac.map_or(0, milliseconds),
    };

    (time, invalidity)
}

fn milliseconds(digits: &str) -> u16 {
    digits
        .bytes()
        .chain(core::iter::repeat(b'0'))
        .take(3)
        .fold(0, |ms, digit| ms * 10 + u16::from(digit - b'0'))
}

/// Parses a `DDMM.mmmm` latitude (`degree_digits == 2`) or `DDDMM.mmmm`
/// longitude (`degree_digits == 3`) into unsigned decimal degrees.
///
/// An empty or unreadable field reads as `0.0`.
///
/// ```rust
/// use nmea0183_fix::parse_coordinate;
///
/// assert_eq!(parse_coordinate("9000.0000", 2), 90.0);
/// assert_eq!(parse_coordinate("11930.0000", 3), 119.5);
/// assert_eq!(parse_coordinate("", 2), 0.0);
/// ```
pub fn parse_coordinate(token: &str, degree_digits: usize) -> f64 {
    lenient(
        (
            fixed_digits(degree_digits),
            fixed_digits(2),
            opt(preceded(char('.'), fraction)),
        )
            .map(|(degrees, minutes, frac)| {
                f64::from(degrees) + (f64::from(minutes) + frac.unwrap_or(0.0)) / 60.0
            }),
    )(token)
}

/// Parses the two hexadecimal digits that follow `*`.
///
/// A missing or unreadable checksum reads as `0`, which will then fail
/// verification against any sentence whose content does not XOR to zero.
///
/// ```rust
/// use nmea0183_fix::parse_checksum;
///
/// assert_eq!(parse_checksum("74"), 0x74);
/// assert_eq!(parse_checksum("0A"), 0x0A);
/// assert_eq!(parse_checksum("7"), 0x07);
/// assert_eq!(parse_checksum(""), 0);
/// ```
pub fn parse_checksum(token: &str) -> u8 {
    lenient(map_res(
        take_while_m_n(1, 2, |c: char| c.is_ascii_hexdigit()),
        |digits: &str| u8::from_str_radix(digits, 16),
    ))(token)
}

impl Fields<'_> {
    /// Reads a `ddmmyy` date, accumulating its flags into `invalidity`.
    pub fn date(&mut self, invalidity: &mut Invalidity) -> Result<NmeaDate> {
        let (date, flags) = parse_date(self.token()?);
        *invalidity |= flags;
        Ok(date)
    }

    /// Reads a `hhmmss.sss` time, accumulating its flags into `invalidity`.
    pub fn time(&mut self, invalidity: &mut Invalidity) -> Result<NmeaTime> {
        let (time, flags) = parse_time(self.token()?);
        *invalidity |= flags;
        Ok(time)
    }

    /// Reads the four fields of a position: latitude, `N`/`S`, longitude and
    /// `E`/`W`.
    ///
    /// Southern and western hemispheres are negated. Sets
    /// [`Invalidity::LATITUDE`] and [`Invalidity::LONGITUDE`] when the result
    /// falls outside of ±90 and ±180 degrees.
    pub fn position(&mut self, invalidity: &mut Invalidity) -> Result<Position> {
        let latitude = parse_coordinate(self.token()?, 2);
        let north_south = self.read::<char>()?;
        let longitude = parse_coordinate(self.token()?, 3);
        let east_west = self.read::<char>()?;

        let position = Position {
            latitude: if north_south == 'S' { -latitude } else { latitude },
            longitude: if east_west == 'W' { -longitude } else { longitude },
        };

        invalidity.set_if(
            Invalidity::LATITUDE,
            !(-90.0..=90.0).contains(&position.latitude),
        );
        invalidity.set_if(
            Invalidity::LONGITUDE,
            !(-180.0..=180.0).contains(&position.longitude),
        );

        Ok(position)
    }

    /// Reads the transmitted checksum from what is left of the sentence.
    ///
    /// Fields the grammar does not know about may precede it, so only the
    /// text after the last `*` is considered.
    pub fn checksum(&mut self) -> Result<u8> {
        let rest = self.remainder()?;
        let checksum = rest.rsplit_once('*').map_or(rest, |(_, checksum)| checksum);
        Ok(parse_checksum(checksum))
    }
}
