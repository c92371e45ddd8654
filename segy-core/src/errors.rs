//! Error types shared by `segy-core` and `segy-io`.
use std::ops::Range;

/// All the ways a descriptor, codec, or read-path operation in this
/// workspace can fail.
#[derive(Debug)]
pub enum SegyError {
    /// `TryFromSliceError` from the std library.
    TryFromSlice(std::array::TryFromSliceError),
    /// `FromUtf8Error` from the std library.
    TryFromUtf8(std::string::FromUtf8Error),
    /// `IoError` from the std library.
    StdIoError(std::io::Error),
    /// Two structured fields claim overlapping byte ranges.
    SchemaOverlap { a: String, b: String },
    /// A field's offset + width exceeds the declared `item_size`.
    SchemaOversize { field: String, item_size: usize },
    /// A text header's input string is longer than `rows * cols`.
    TextHeaderTooLong { len: usize, max: usize },
    /// `get(standard)` was called with a standard that was never registered.
    UnknownStandard { key: String },
    /// A field, header, or trace could not be decoded from its bytes.
    DecodeError { field: String, cause: String },
    /// The on-disk trace count does not evenly divide the remaining file
    /// length; advisory, the reader proceeds with the floor.
    MisalignedFile { remainder: usize },
    /// An index lookup asked for bytes past the end of a fetched buffer.
    TruncatedBuffer { expected: usize, actual: usize },
    /// One or more requested trace indices are out of `[0, trace_count)`.
    OutOfBounds { indices: Vec<i64>, max: usize },
    /// A slice selector had a zero step, or an otherwise malformed range.
    BadSlice { reason: String },
    /// Surfaced verbatim from the `RangeSource` collaborator.
    TransportError { message: String, retriable: bool },
    /// The read was cancelled by the caller or the transport.
    Cancelled,
    /// The mapped/opened file is too short to contain the headers it claims.
    FileTooShort,
    /// A 32-bit IBM float word could not be converted (reserved for future
    /// use; the current conversion never fails, it saturates).
    BitConversionError { msg: String },
    #[cfg(feature = "to_json")]
    /// Serialisation/deserialisation error.
    SerdeError(serde_json::Error),
}

impl From<std::array::TryFromSliceError> for SegyError {
    fn from(e: std::array::TryFromSliceError) -> Self {
        Self::TryFromSlice(e)
    }
}

impl From<std::string::FromUtf8Error> for SegyError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::TryFromUtf8(e)
    }
}

impl From<std::io::Error> for SegyError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}

impl SegyError {
    /// Build an [`SegyError::OutOfBounds`] from the violating indices and the
    /// valid half-open range `[0, max)`.
    pub fn out_of_bounds(indices: Vec<i64>, max: usize) -> Self {
        Self::OutOfBounds { indices, max }
    }

    /// Convenience constructor mirroring `Range<u64>` planner arithmetic.
    pub fn truncated(expected: Range<u64>, actual: usize) -> Self {
        Self::TruncatedBuffer {
            expected: (expected.end - expected.start) as usize,
            actual,
        }
    }
}

impl std::fmt::Display for SegyError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use self::SegyError::*;
        match self {
            #[cfg(feature = "to_json")]
            SerdeError(x) => write!(fmt, "{}", x),
            StdIoError(x) => write!(fmt, "{}", x),
            TryFromSlice(x) => write!(fmt, "{}", x),
            TryFromUtf8(x) => write!(fmt, "{}", x),
            SchemaOverlap { a, b } => write!(fmt, "fields '{}' and '{}' overlap", a, b),
            SchemaOversize { field, item_size } => write!(
                fmt,
                "field '{}' does not fit within item_size {}",
                field, item_size
            ),
            TextHeaderTooLong { len, max } => {
                write!(fmt, "text header input is {} bytes, max is {}", len, max)
            }
            UnknownStandard { key } => write!(fmt, "unknown or unregistered SEG-Y standard: {}", key),
            DecodeError { field, cause } => write!(fmt, "could not decode '{}': {}", field, cause),
            MisalignedFile { remainder } => write!(
                fmt,
                "file length is not a whole number of traces ({} leftover bytes)",
                remainder
            ),
            TruncatedBuffer { expected, actual } => write!(
                fmt,
                "expected {} bytes from transport, got {}",
                expected, actual
            ),
            OutOfBounds { indices, max } => write!(
                fmt,
                "indices {:?} are out of bounds; valid range is [0, {})",
                indices, max
            ),
            BadSlice { reason } => write!(fmt, "invalid slice: {}", reason),
            TransportError { message, retriable } => {
                write!(fmt, "transport error ({}): {}", if *retriable { "retriable" } else { "fatal" }, message)
            }
            Cancelled => write!(fmt, "read was cancelled"),
            FileTooShort => write!(fmt, "file is too short to be SEG-Y"),
            BitConversionError { msg } => write!(fmt, "bit conversion failed: {}", msg),
        }
    }
}

impl std::error::Error for SegyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use self::SegyError::*;
        match self {
            #[cfg(feature = "to_json")]
            SerdeError(x) => x.source(),
            StdIoError(x) => x.source(),
            TryFromSlice(x) => x.source(),
            TryFromUtf8(x) => x.source(),
            _ => None,
        }
    }
}
