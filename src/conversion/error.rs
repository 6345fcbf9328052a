use std::error::Error;
use std::fmt;

/// The text or number given does not name a bit depth in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBitDepthError;

impl fmt::Display for ParseBitDepthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bit depth")
    }
}

impl Error for ParseBitDepthError {}

/// The text given does not name one of the supported tile formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFormatError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tile format {:?}", self.input)
    }
}

impl Error for ParseFormatError {}
