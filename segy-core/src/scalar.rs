//! The scalar type catalog: the leaf building block of every descriptor.
//!
//! A [`ScalarType`] tags a fixed-width primitive encoding. Structured fields,
//! trace data vectors, and decoded values are all built on top of this small,
//! closed set.
use crate::errors::SegyError;
use std::convert::TryInto;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The family a [`ScalarType`] belongs to. Used by the descriptor compiler
/// to validate field construction and by callers inspecting a decoded
/// record without matching on every concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Family {
    Int,
    UInt,
    Float,
    Ibm,
}

/// A fixed-width primitive encoding usable in a structured field or a trace
/// data vector.
///
/// `Ibm32` is the odd one out: its storage width is 4 bytes like `Float32`,
/// but its family is `Ibm` and it always decodes to `Float32` (see
/// [`ScalarType::decodes_to`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScalarType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    Ibm32,
}

impl ScalarType {
    /// Width of the on-disk storage, in bytes.
    pub fn width(self) -> usize {
        use ScalarType::*;
        match self {
            Int8 | UInt8 => 1,
            Int16 | UInt16 => 2,
            Int32 | UInt32 | Float32 | Ibm32 => 4,
            Int64 | UInt64 | Float64 => 8,
        }
    }

    /// The family this scalar belongs to.
    pub fn family(self) -> Family {
        use ScalarType::*;
        match self {
            Int8 | Int16 | Int32 | Int64 => Family::Int,
            UInt8 | UInt16 | UInt32 | UInt64 => Family::UInt,
            Float32 | Float64 => Family::Float,
            Ibm32 => Family::Ibm,
        }
    }

    /// Whether this scalar is a signed integer type.
    pub fn is_signed(self) -> bool {
        self.family() == Family::Int
    }

    /// The [`ScalarType`] a decoded value of this type is presented as to the
    /// caller. Identity for everything except `Ibm32`, which always decodes
    /// to `Float32` (per the family invariant in the data model).
    pub fn decodes_to(self) -> ScalarType {
        match self {
            ScalarType::Ibm32 => ScalarType::Float32,
            other => other,
        }
    }
}

/// Byte order of a field or trace data vector as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Endianness {
    Big,
    Little,
    /// Whatever the host happens to be; never swapped.
    Native,
}

impl Endianness {
    /// The endianness of the machine this code is compiled for.
    pub fn host() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    /// Whether a buffer declared as `self` needs a byte swap to be read
    /// natively on this host.
    pub fn needs_swap(self) -> bool {
        match self {
            Endianness::Native => false,
            other => other != Self::host(),
        }
    }
}

/// A decoded scalar value. `Ibm32` storage is never represented here: by the
/// time a field or sample is surfaced to the caller it has already been
/// converted to `F32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl ScalarValue {
    /// The scalar type this value was decoded as (post `Ibm32 -> Float32`).
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarValue::I8(_) => ScalarType::Int8,
            ScalarValue::U8(_) => ScalarType::UInt8,
            ScalarValue::I16(_) => ScalarType::Int16,
            ScalarValue::U16(_) => ScalarType::UInt16,
            ScalarValue::I32(_) => ScalarType::Int32,
            ScalarValue::U32(_) => ScalarType::UInt32,
            ScalarValue::I64(_) => ScalarType::Int64,
            ScalarValue::U64(_) => ScalarType::UInt64,
            ScalarValue::F32(_) => ScalarType::Float32,
            ScalarValue::F64(_) => ScalarType::Float64,
        }
    }

    /// Best-effort conversion to `f64`, useful for callers that just want a
    /// number regardless of the underlying storage type (e.g. displaying a
    /// coordinate field).
    pub fn as_f64(&self) -> f64 {
        match *self {
            ScalarValue::I8(v) => v as f64,
            ScalarValue::U8(v) => v as f64,
            ScalarValue::I16(v) => v as f64,
            ScalarValue::U16(v) => v as f64,
            ScalarValue::I32(v) => v as f64,
            ScalarValue::U32(v) => v as f64,
            ScalarValue::I64(v) => v as f64,
            ScalarValue::U64(v) => v as f64,
            ScalarValue::F32(v) => v as f64,
            ScalarValue::F64(v) => v,
        }
    }

    /// Best-effort conversion to `i64`, truncating floats.
    pub fn as_i64(&self) -> i64 {
        match *self {
            ScalarValue::I8(v) => v as i64,
            ScalarValue::U8(v) => v as i64,
            ScalarValue::I16(v) => v as i64,
            ScalarValue::U16(v) => v as i64,
            ScalarValue::I32(v) => v as i64,
            ScalarValue::U32(v) => v as i64,
            ScalarValue::I64(v) => v,
            ScalarValue::U64(v) => v as i64,
            ScalarValue::F32(v) => v as i64,
            ScalarValue::F64(v) => v as i64,
        }
    }
}

/// Decode a single scalar from a byte slice of exactly `format.width()`
/// bytes, honoring `endianness`. `Ibm32` words are converted to `f32`
/// through [`crate::bitconverter::ibm32_to_ieee754`].
///
/// ```
/// # use segy_core::scalar::{decode_scalar, ScalarType, ScalarValue, Endianness};
/// let bytes = 42i16.to_be_bytes();
/// let v = decode_scalar(&bytes, ScalarType::Int16, Endianness::Big).unwrap();
/// assert_eq!(v, ScalarValue::I16(42));
/// ```
pub fn decode_scalar(
    bytes: &[u8],
    format: ScalarType,
    endianness: Endianness,
) -> Result<ScalarValue, SegyError> {
    let width = format.width();
    if bytes.len() != width {
        return Err(SegyError::DecodeError {
            field: format!("{:?}", format),
            cause: format!("expected {} bytes, got {}", width, bytes.len()),
        });
    }
    let swap = endianness.needs_swap();
    let value = match format {
        ScalarType::Int8 => ScalarValue::I8(bytes[0] as i8),
        ScalarType::UInt8 => ScalarValue::U8(bytes[0]),
        ScalarType::Int16 => {
            let n = i16::from_ne_bytes(bytes.try_into()?);
            ScalarValue::I16(if swap { n.swap_bytes() } else { n })
        }
        ScalarType::UInt16 => {
            let n = u16::from_ne_bytes(bytes.try_into()?);
            ScalarValue::U16(if swap { n.swap_bytes() } else { n })
        }
        ScalarType::Int32 => {
            let n = i32::from_ne_bytes(bytes.try_into()?);
            ScalarValue::I32(if swap { n.swap_bytes() } else { n })
        }
        ScalarType::UInt32 => {
            let n = u32::from_ne_bytes(bytes.try_into()?);
            ScalarValue::U32(if swap { n.swap_bytes() } else { n })
        }
        ScalarType::Int64 => {
            let n = i64::from_ne_bytes(bytes.try_into()?);
            ScalarValue::I64(if swap { n.swap_bytes() } else { n })
        }
        ScalarType::UInt64 => {
            let n = u64::from_ne_bytes(bytes.try_into()?);
            ScalarValue::U64(if swap { n.swap_bytes() } else { n })
        }
        ScalarType::Float32 => {
            let bits = u32::from_ne_bytes(bytes.try_into()?);
            let bits = if swap { bits.swap_bytes() } else { bits };
            ScalarValue::F32(f32::from_bits(bits))
        }
        ScalarType::Float64 => {
            let bits = u64::from_ne_bytes(bytes.try_into()?);
            let bits = if swap { bits.swap_bytes() } else { bits };
            ScalarValue::F64(f64::from_bits(bits))
        }
        ScalarType::Ibm32 => {
            let bits = u32::from_ne_bytes(bytes.try_into()?);
            // IBM32 is always stored big-endian on the wire regardless of
            // the declared endianness of the surrounding record; the
            // descriptor's endianness field only governs the swap of the
            // raw word prior to bit-field extraction.
            let bits = if swap { bits.swap_bytes() } else { bits };
            ScalarValue::F32(crate::bitconverter::ibm32_to_ieee754(bits))
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_and_family_cover_every_scalar_type() {
        use ScalarType::*;
        for (t, width, family) in [
            (Int8, 1, Family::Int),
            (UInt8, 1, Family::UInt),
            (Int16, 2, Family::Int),
            (UInt16, 2, Family::UInt),
            (Int32, 4, Family::Int),
            (UInt32, 4, Family::UInt),
            (Int64, 8, Family::Int),
            (UInt64, 8, Family::UInt),
            (Float32, 4, Family::Float),
            (Float64, 8, Family::Float),
            (Ibm32, 4, Family::Ibm),
        ] {
            assert_eq!(t.width(), width, "{:?} width", t);
            assert_eq!(t.family(), family, "{:?} family", t);
        }
    }

    #[test]
    fn ibm32_decodes_to_float32() {
        assert_eq!(ScalarType::Ibm32.decodes_to(), ScalarType::Float32);
        assert_eq!(ScalarType::Int32.decodes_to(), ScalarType::Int32);
    }

    #[test]
    fn native_endianness_never_needs_a_swap() {
        assert!(!Endianness::Native.needs_swap());
    }

    #[test]
    fn non_host_endianness_needs_a_swap() {
        let non_host = if Endianness::host() == Endianness::Big {
            Endianness::Little
        } else {
            Endianness::Big
        };
        assert!(non_host.needs_swap());
        assert!(!Endianness::host().needs_swap());
    }

    #[test]
    fn decode_scalar_rejects_wrong_width() {
        match decode_scalar(&[0u8; 3], ScalarType::Int32, Endianness::Big) {
            Err(SegyError::DecodeError { .. }) => {}
            other => panic!("expected DecodeError, got {:?}", other),
        }
    }

    #[test]
    fn decode_scalar_honors_declared_endianness() {
        let be = decode_scalar(&300i32.to_be_bytes(), ScalarType::Int32, Endianness::Big).unwrap();
        assert_eq!(be, ScalarValue::I32(300));

        let le_bytes = 300i32.to_le_bytes();
        let as_big = decode_scalar(&le_bytes, ScalarType::Int32, Endianness::Big).unwrap();
        // Bytes were written little-endian but declared big-endian on a
        // little-endian host: a swap is applied, recovering the true value.
        if Endianness::host() == Endianness::Little {
            assert_eq!(as_big, ScalarValue::I32(300));
        }
    }

    #[test]
    fn decode_scalar_unsigned_and_float_round_trip() {
        let v = decode_scalar(&42u16.to_be_bytes(), ScalarType::UInt16, Endianness::Big).unwrap();
        assert_eq!(v, ScalarValue::U16(42));

        let bits = 1.5f64.to_be_bytes();
        let v = decode_scalar(&bits, ScalarType::Float64, Endianness::Big).unwrap();
        assert_eq!(v, ScalarValue::F64(1.5));
    }

    #[test]
    fn scalar_value_as_f64_and_as_i64_are_best_effort_conversions() {
        assert_eq!(ScalarValue::I16(-5).as_f64(), -5.0);
        assert_eq!(ScalarValue::F32(2.25).as_f64(), 2.25);
        assert_eq!(ScalarValue::F32(2.9).as_i64(), 2);
        assert_eq!(ScalarValue::U8(200).as_i64(), 200);
    }

    #[test]
    fn scalar_value_scalar_type_round_trips_through_decode() {
        let v = decode_scalar(&7i8.to_be_bytes(), ScalarType::Int8, Endianness::Big).unwrap();
        assert_eq!(v.scalar_type(), ScalarType::Int8);
    }
}
