/*!
Readers turn the raw string given on the command line into a typed value,
optionally validating it along the way.

Every option has exactly one reader. [`DefaultReader`] parses with the type's
[`FromStr`] implementation; [`range`] and [`one_of`] build readers that also
check the parsed value. Any `Fn(&str) -> Result<T, ReadError>` closure is a
reader too, for custom validation.
 */

use core::{
    fmt::Display,
    hash::Hash,
    ops::RangeInclusive,
    str::FromStr,
};
use std::collections::HashSet;

/// The reason an argument couldn't be turned into a value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ReadError {
    /// The argument isn't a valid instance of the type at all
    #[error("{message}")]
    Parse { message: String },

    /// The value was parsed, but is outside of the allowed bounds
    #[error("{value} is out of range {begin}..={end}")]
    OutOfRange {
        value: String,
        begin: String,
        end: String,
    },

    /// The value was parsed, but isn't one of the allowed values
    #[error("{value:?} is not an allowed value")]
    NotOneOf { value: String },

    /// Something else went wrong, usually in a custom reader
    #[error("{0}")]
    Custom(String),
}

impl ReadError {
    pub fn custom(message: impl Display) -> Self {
        Self::Custom(message.to_string())
    }
}

/// A function from a single command line argument to a `T`.
pub trait Reader<T> {
    fn read(&self, raw: &str) -> Result<T, ReadError>;
}

impl<T, F> Reader<T> for F
where
    F: Fn(&str) -> Result<T, ReadError>,
{
    #[inline]
    fn read(&self, raw: &str) -> Result<T, ReadError> {
        self(raw)
    }
}

/// Parse the entire argument with [`FromStr`], without any further
/// validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReader;

impl<T> Reader<T> for DefaultReader
where
    T: FromStr,
    T::Err: Display,
{
    #[inline]
    fn read(&self, raw: &str) -> Result<T, ReadError> {
        raw.parse().map_err(|err: T::Err| ReadError::Parse {
            message: err.to_string(),
        })
    }
}

/// Reader that requires the value to be within an inclusive range. Created
/// with [`range`].
#[derive(Debug, Clone)]
pub struct RangeReader<T> {
    bounds: RangeInclusive<T>,
}

/// Create a reader that accepts values from `begin` to `end`, inclusive.
#[must_use]
pub fn range<T: PartialOrd>(begin: T, end: T) -> RangeReader<T> {
    RangeReader {
        bounds: begin..=end,
    }
}

impl<T> Reader<T> for RangeReader<T>
where
    T: FromStr + PartialOrd + Display,
    T::Err: Display,
{
    fn read(&self, raw: &str) -> Result<T, ReadError> {
        let value: T = DefaultReader.read(raw)?;

        match self.bounds.contains(&value) {
            true => Ok(value),
            false => Err(ReadError::OutOfRange {
                value: raw.to_owned(),
                begin: self.bounds.start().to_string(),
                end: self.bounds.end().to_string(),
            }),
        }
    }
}

/// Reader that requires the value to be one of a fixed set. Created with
/// [`one_of`].
#[derive(Debug, Clone)]
pub struct OneOfReader<T> {
    allowed: HashSet<T>,
}

/// Create a reader that accepts only the given values.
#[must_use]
pub fn one_of<T: Hash + Eq>(values: impl IntoIterator<Item = T>) -> OneOfReader<T> {
    OneOfReader {
        allowed: values.into_iter().collect(),
    }
}

impl<T> Reader<T> for OneOfReader<T>
where
    T: FromStr + Hash + Eq,
    T::Err: Display,
{
    fn read(&self, raw: &str) -> Result<T, ReadError> {
        let value: T = DefaultReader.read(raw)?;

        match self.allowed.contains(&value) {
            true => Ok(value),
            false => Err(ReadError::NotOneOf {
                value: raw.to_owned(),
            }),
        }
    }
}
