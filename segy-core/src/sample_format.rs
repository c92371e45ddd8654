//! The binary file header's `sample_format_code` catalog and its mapping
//! onto [`ScalarType`].
//!
//! Grounded on `giga-segy-core::enums::SampleFormatCode`: same code table,
//! same `num`/`num-derive` `FromPrimitive` derive used to parse the raw
//! `u16` field, same "return a `Result` to make life simpler down the line"
//! constructor. Unlike the teacher, this crate does not need the enum for
//! trace decoding directly (the descriptor model decodes by [`ScalarType`],
//! not by this enum); it exists so the file facade (`segy-io`) can turn the
//! binary header's raw code into the `ScalarType`/`samples` specialization
//! the distilled spec's §4.6 step 3 asks for.
use crate::errors::SegyError;
use crate::scalar::ScalarType;
use num::FromPrimitive;

/// The sample format codes published by the SEG-Y binary file header,
/// bytes 3225-3226 (offset 24, 0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u16)]
pub enum SampleFormatCode {
    IbmFloat32 = 1,
    Int32 = 2,
    Int16 = 3,
    FixedPoint32 = 4, // obsolete
    Float32 = 5,
    Float64 = 6,
    Int24 = 7,
    Int8 = 8,
    Int64 = 9,
    UInt32 = 10,
    UInt16 = 11,
    UInt64 = 12,
    UInt24 = 15,
    UInt8 = 16,
}

impl SampleFormatCode {
    /// Parse the raw `u16` field value, failing with a [`SegyError::DecodeError`]
    /// rather than panicking on an unrecognized code.
    pub fn new(code: u16) -> Result<Self, SegyError> {
        SampleFormatCode::from_u16(code).ok_or_else(|| SegyError::DecodeError {
            field: "sample_format_code".to_string(),
            cause: format!("unrecognized sample format code {}", code),
        })
    }

    /// The [`ScalarType`] this code maps to. `Int24`/`UInt24`/`FixedPoint32`
    /// have no [`ScalarType`] counterpart (the catalog is a closed set of
    /// power-of-two widths per the distilled spec's §3 scalar list) and are
    /// reported as a [`SegyError::DecodeError`] rather than silently
    /// widened, so a caller never gets samples decoded at the wrong width.
    pub fn to_scalar_type(self) -> Result<ScalarType, SegyError> {
        use SampleFormatCode::*;
        match self {
            IbmFloat32 => Ok(ScalarType::Ibm32),
            Int32 => Ok(ScalarType::Int32),
            Int16 => Ok(ScalarType::Int16),
            Float32 => Ok(ScalarType::Float32),
            Float64 => Ok(ScalarType::Float64),
            Int8 => Ok(ScalarType::Int8),
            Int64 => Ok(ScalarType::Int64),
            UInt32 => Ok(ScalarType::UInt32),
            UInt16 => Ok(ScalarType::UInt16),
            UInt64 => Ok(ScalarType::UInt64),
            UInt8 => Ok(ScalarType::UInt8),
            FixedPoint32 | Int24 | UInt24 => Err(SegyError::DecodeError {
                field: "sample_format_code".to_string(),
                cause: format!("{:?} has no fixed-width ScalarType counterpart", self),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_the_distilled_spec_s_required_codes() {
        assert_eq!(SampleFormatCode::new(1).unwrap().to_scalar_type().unwrap(), ScalarType::Ibm32);
        assert_eq!(SampleFormatCode::new(2).unwrap().to_scalar_type().unwrap(), ScalarType::Int32);
        assert_eq!(SampleFormatCode::new(3).unwrap().to_scalar_type().unwrap(), ScalarType::Int16);
        assert_eq!(SampleFormatCode::new(5).unwrap().to_scalar_type().unwrap(), ScalarType::Float32);
        assert_eq!(SampleFormatCode::new(6).unwrap().to_scalar_type().unwrap(), ScalarType::Float64);
        assert_eq!(SampleFormatCode::new(8).unwrap().to_scalar_type().unwrap(), ScalarType::Int8);
    }

    #[test]
    fn unrecognized_code_is_a_decode_error() {
        assert!(SampleFormatCode::new(99).is_err());
    }

    #[test]
    fn obsolete_fixed_point_has_no_scalar_type() {
        assert!(SampleFormatCode::new(4).unwrap().to_scalar_type().is_err());
    }
}
