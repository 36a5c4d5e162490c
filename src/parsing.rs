//! # Parsing Utilities
//!
//! Small `nom` combinators shared by the field readers: fixed-width digit
//! groups, decimal fractions and a lenient runner that turns a failed token
//! parse into the zero value of the field.

use nom::{
    IResult, Parser, bytes::complete::take_while_m_n, character::complete::digit1,
    error::ParseError,
};

/// Takes exactly `n` ASCII digits and returns their decimal value.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::parsing::fixed_digits;
/// use nom::{IResult, Parser};
///
/// let result: IResult<_, _> = fixed_digits(2).parse("2311");
/// assert_eq!(result, Ok(("11", 23)));
///
/// let result: IResult<_, _> = fixed_digits(3).parse("12");
/// assert!(result.is_err());
/// ```
pub fn fixed_digits<'a, E>(n: usize) -> impl Parser<&'a str, Output = u16, Error = E>
where
    E: ParseError<&'a str>,
{
    take_while_m_n(n, n, |c: char| c.is_ascii_digit()).map(|digits: &str| {
        digits
            .bytes()
            .fold(0u16, |value, digit| value * 10 + u16::from(digit - b'0'))
    })
}

/// Parses the digits that follow a decimal point into their value in `[0, 1)`.
///
/// Each digit `d` at 1-based position `p` contributes `d * 10^-p`. Digits past
/// the fifteenth are below `f64` precision and are consumed but ignored.
///
/// ```rust
/// use nmea0183_fix::parsing::fraction;
/// use nom::IResult;
///
/// let result: IResult<_, _> = fraction("5,");
/// assert_eq!(result, Ok((",", 0.5)));
/// ```
pub fn fraction<'a, E>(i: &'a str) -> IResult<&'a str, f64, E>
where
    E: ParseError<&'a str>,
{
    digit1
        .map(|digits: &str| {
            let (numerator, places) = digits
                .bytes()
                .take(15)
                .fold((0u64, 0i32), |(value, places), digit| {
                    (value * 10 + u64::from(digit - b'0'), places + 1)
                });

            numerator as f64 / 10f64.powi(places)
        })
        .parse(i)
}

/// Runs `parser` on a whole token, falling back to the default value when the
/// token does not parse.
///
/// Receivers leave fields empty when they have nothing to report; decoded
/// records are zero-filled, so an unreadable token simply reads as zero.
///
/// ```rust
/// use nmea0183_fix::parsing::lenient;
/// use nom::character::complete::u8;
///
/// assert_eq!(lenient(u8)("07"), 7);
/// assert_eq!(lenient(u8)(""), 0);
/// ```
pub fn lenient<'a, P, O>(mut parser: P) -> impl FnMut(&'a str) -> O
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
    O: Default,
{
    move |token: &'a str| {
        parser
            .parse(token)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }
}
