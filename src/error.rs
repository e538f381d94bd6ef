use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Error {
    /// A (year, month) pair that does not name a month of the proleptic
    /// Gregorian calendar.
    InvalidDate { year: i32, month: u32 },
    /// A selection key that does not match the canonical zero-padded
    /// `yyyy-MM-dd` pattern or names a day that does not exist.
    InvalidKeyFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate { year, month } => {
                write!(f, "no month {month} in year {year}")
            }
            Self::InvalidKeyFormat(key) => {
                write!(f, "`{key}` is not a valid `yyyy-MM-dd` day key")
            }
        }
    }
}

impl std::error::Error for Error {}
