//! Error types for bit containers and their storage.

use thiserror::Error;

/// Errors reported by fallible container and storage operations.
///
/// Mutating operations that fail leave the container exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A length or capacity above what the storage can represent was
    /// requested.
    #[error("requested {requested} bits but the storage holds at most {max} bits")]
    CapacityExceeded {
        /// Number of bits requested
        requested: usize,
        /// Largest representable number of bits
        max: usize,
    },

    /// The memory provider could not supply a buffer.
    #[error("failed to allocate {words} words")]
    AllocFailed {
        /// Number of words requested from the provider
        words: usize,
    },

    /// A bit position outside the container was accessed.
    #[error("bit position {index} out of range for length {len}")]
    OutOfRange {
        /// The offending position
        index: usize,
        /// Length of the container
        len: usize,
    },

    /// A character other than the expected on/off symbols was found while
    /// parsing text.
    #[error("invalid character '{ch}' at position {pos} in bit string")]
    InvalidChar {
        /// The invalid character found
        ch: char,
        /// Character offset of the invalid character
        pos: usize,
    },

    /// Text or words of the wrong length were given for a fixed-size
    /// container.
    #[error("expected {expected} bits, found {actual}")]
    LengthMismatch {
        /// Length of the container
        expected: usize,
        /// Length of the input
        actual: usize,
    },
}

/// A specialized [`Result`](core::result::Result) for bit container
/// operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Unwraps `r`, panicking with the error's message.
#[track_caller]
#[inline]
pub(crate) fn or_panic<T>(r: Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}
