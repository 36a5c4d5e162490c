use nom::{
    Parser,
    bytes::complete::take_till,
    character::complete::{anychar, char, i32, one_of},
    combinator::opt,
    sequence::preceded,
};

use crate::{
    Error, Result,
    parsing::{fraction, lenient},
};

/// Splits a sentence fragment into its fields.
///
/// Fields are delimited by `,` or by the `*` that introduces the checksum.
/// The last field is returned once, after which the sentence is exhausted and
/// every further read fails with [`Error::MalformedSentence`]. An empty
/// fragment still holds one empty field.
///
/// # Examples
///
/// ```rust
/// use nmea0183_fix::{Error, Fields};
///
/// let mut fields = Fields::new("A,3,,1.13*03");
/// assert_eq!(fields.read::<char>(), Ok('A'));
/// assert_eq!(fields.read::<u8>(), Ok(3));
/// assert_eq!(fields.read::<u8>(), Ok(0));
/// assert_eq!(fields.read::<f32>(), Ok(1.13));
/// assert_eq!(fields.remainder(), Ok("03"));
/// assert_eq!(fields.token(), Err(Error::MalformedSentence));
/// ```
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    rest: Option<&'a str>,
}

impl<'a> Fields<'a> {
    pub fn new(fragment: &'a str) -> Self {
        Fields {
            rest: Some(fragment),
        }
    }

    /// Returns `true` once the last field has been read.
    pub fn is_exhausted(&self) -> bool {
        self.rest.is_none()
    }

    /// Reads the next raw field.
    pub fn token(&mut self) -> Result<&'a str> {
        self.next().ok_or(Error::MalformedSentence)
    }

    /// Reads and discards the next field.
    pub fn skip(&mut self) -> Result<()> {
        self.token().map(|_| ())
    }

    /// Reads the next field as a `T`.
    pub fn read<T: NmeaField>(&mut self) -> Result<T> {
        self.token().map(T::from_token)
    }

    /// Takes everything left in the sentence as a single field, ignoring
    /// delimiters. This is how the checksum after `*` is read.
    pub fn remainder(&mut self) -> Result<&'a str> {
        self.rest.take().ok_or(Error::MalformedSentence)
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;

        let split: nom::IResult<_, _> =
            (take_till(|c: char| c == ',' || c == '*'), opt(one_of(",*"))).parse(rest);

        match split {
            Ok((rest, (token, Some(_)))) => {
                self.rest = Some(rest);
                Some(token)
            }
            Ok((_, (token, None))) => {
                self.rest = None;
                Some(token)
            }
            Err(_) => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Types that can be read from a single sentence field.
///
/// Reading never fails on content: a field that is empty or does not hold a
/// value of the expected shape reads as the zero value. Only a missing field
/// is an error, and that is reported by [`Fields`].
pub trait NmeaField: Sized {
    fn from_token(token: &str) -> Self;
}

macro_rules! impl_uints_type {
    ($($t:tt),*) => ($(
        impl NmeaField for $t {
            fn from_token(token: &str) -> Self {
                lenient(nom::character::complete::$t)(token)
            }
        }
    )*)
}

impl_uints_type!(u8, u16);

impl NmeaField for char {
    fn from_token(token: &str) -> Self {
        lenient(anychar)(token)
    }
}

impl NmeaField for f64 {
    /// Reads `[-]digits[.digits]`.
    ///
    /// The sign of the integer part is applied to the fractional part too, so
    /// `-21.2` reads as `-21.2`, while `-0.5` reads as `0.5` since its integer
    /// part carries no sign.
    fn from_token(token: &str) -> Self {
        lenient(
            (i32, opt(preceded(char('.'), fraction))).map(|(whole, frac)| {
                let sign = if whole < 0 { -1.0 } else { 1.0 };
                f64::from(whole) + sign * frac.unwrap_or(0.0)
            }),
        )(token)
    }
}

impl NmeaField for f32 {
    fn from_token(token: &str) -> Self {
        f64::from_token(token) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_split() {
        let fields: Vec<_> = Fields::new("231115,,,A*74").collect();
        assert_eq!(fields, vec!["231115", "", "", "A", "74"]);

        let fields: Vec<_> = Fields::new("").collect();
        assert_eq!(fields, vec![""]);

        let fields: Vec<_> = Fields::new("1,").collect();
        assert_eq!(fields, vec!["1", ""]);
    }

    #[test]
    fn test_read_exhausted() {
        let mut fields = Fields::new("07");
        assert_eq!(fields.read::<u8>(), Ok(7));
        assert!(fields.is_exhausted());
        assert_eq!(fields.read::<u8>(), Err(Error::MalformedSentence));
        assert_eq!(fields.remainder(), Err(Error::MalformedSentence));
    }

    #[test]
    fn test_parse_uints() {
        assert_eq!(u8::from_token("049"), 49);
        assert_eq!(u8::from_token("5"), 5);
        assert_eq!(u8::from_token(""), 0);
        assert_eq!(u8::from_token("x1"), 0);
        assert_eq!(u16::from_token("322"), 322);
        assert_eq!(u16::from_token("0007"), 7);
    }

    #[test]
    fn test_parse_char() {
        assert_eq!(char::from_token("A"), 'A');
        assert_eq!(char::from_token("AB"), 'A');
        assert_eq!(char::from_token(""), '\0');
    }

    #[test]
    fn test_parse_float() {
        assert!((f64::from_token("283.05") - 283.05).abs() < 1e-9);
        assert!((f64::from_token("0.09") - 0.09).abs() < 1e-9);
        assert!((f64::from_token("-21.2") + 21.2).abs() < 1e-9);
        assert!((f64::from_token("-1.5") + 1.5).abs() < 1e-9);
        assert!((f64::from_token("-0.5") - 0.5).abs() < 1e-9);
        assert_eq!(f64::from_token("12"), 12.0);
        assert_eq!(f64::from_token(""), 0.0);
        assert_eq!(f64::from_token(".5"), 0.0);
        assert!((f32::from_token("1773.2") - 1773.2).abs() < 1e-3);
    }
}
