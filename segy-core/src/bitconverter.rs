//! Numeric normalization: endian swapping and IBM 32-bit float decoding.
//!
//! This is the component that has to be bit-exact: one wrong offset or one
//! mis-assembled exponent corrupts every trace read through it.
use crate::scalar::ScalarType;

/// Convert a single big-endian IBM System/360 32-bit hexadecimal float word
/// to an IEEE-754 `f32`.
///
/// `sign = bit 31`, `exponent = bits 24..31 & 0x7F` (excess-64, base-16),
/// `fraction = bits 0..24` (24-bit mantissa, no implicit leading bit).
///
/// Assembles the IEEE bit pattern directly rather than going through
/// floating-point arithmetic, so there is no intermediate overflow: the
/// highest set bit of `fraction` gives the base-2 normalization shift, and
/// the base-16 exponent is converted to a base-2 one by the `* 4` below.
/// Values whose converted exponent falls outside the `f32` range saturate to
/// `±inf` (overflow) or `±0.0` (underflow); `fraction == 0` is always `±0.0`.
///
/// ```
/// # use segy_core::bitconverter::ibm32_to_ieee754;
/// assert_eq!(ibm32_to_ieee754(0x0000_0000), 0.0f32);
/// assert_eq!(ibm32_to_ieee754(0x8000_0000), -0.0f32);
/// assert_eq!(ibm32_to_ieee754(0x4110_0000), 1.0f32);
/// assert_eq!(ibm32_to_ieee754(0x4080_0000), 0.5f32);
/// assert_eq!(ibm32_to_ieee754(0xC080_0000), -0.5f32);
/// ```
pub fn ibm32_to_ieee754(word: u32) -> f32 {
    let sign = (word >> 31) & 1;
    let exponent = ((word >> 24) & 0x7F) as i32;
    let fraction = word & 0x00FF_FFFF;

    if fraction == 0 {
        return f32::from_bits(sign << 31);
    }

    // Position of the highest set bit within the 24-bit fraction (0..=23).
    let hi_bit = 31 - fraction.leading_zeros() as i32;

    // value = fraction * 16^(exponent-64) * 2^-24
    //       = (fraction / 2^hi_bit) * 2^(hi_bit - 24 + 4*(exponent-64))
    // and (fraction / 2^hi_bit) is already in [1, 2), i.e. a normalized
    // IEEE mantissa with an implicit leading one.
    let unbiased_exp = hi_bit - 24 + 4 * (exponent - 64);
    let biased_exp = unbiased_exp + 127;

    if biased_exp >= 0xFF {
        return f32::from_bits((sign << 31) | (0xFFu32 << 23));
    }
    if biased_exp <= 0 {
        return f32::from_bits(sign << 31);
    }

    let shift = 23 - hi_bit;
    let shifted = (fraction as u64) << shift;
    let mantissa = (shifted & 0x007F_FFFF) as u32;

    f32::from_bits((sign << 31) | ((biased_exp as u32) << 23) | mantissa)
}

/// Swap the bytes of every field in a structured buffer in place, given a
/// compiled `(offset, width)` layout. Gaps (bytes not covered by any
/// `(offset, width)` pair) are left untouched.
///
/// This is the structured-record analogue of a scalar byte swap: a record
/// may mix widths (a 2-byte field next to a 4-byte field), so the swap must
/// be driven by the compiled layout rather than a single fixed word size.
pub fn swap_fields_in_place(buf: &mut [u8], layout: &[(usize, usize)]) {
    for &(offset, width) in layout {
        buf[offset..offset + width].reverse();
    }
}

/// Convert a buffer of big-endian-normalized IBM32 words into `f32` samples.
/// `buf.len()` must be a multiple of 4; any remainder is ignored.
///
/// ```
/// # use segy_core::bitconverter::ibm32_buffer_to_f32;
/// let mut buf = Vec::new();
/// buf.extend_from_slice(&0x4110_0000u32.to_be_bytes());
/// buf.extend_from_slice(&0x4080_0000u32.to_be_bytes());
/// assert_eq!(ibm32_buffer_to_f32(&buf), vec![1.0f32, 0.5f32]);
/// ```
pub fn ibm32_buffer_to_f32(buf: &[u8]) -> Vec<f32> {
    buf.chunks_exact(4)
        .map(|chunk| {
            let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            ibm32_to_ieee754(word)
        })
        .collect()
}

/// A helper to convert a (possibly null-terminated) ASCII byte slice to a
/// `String`, truncating at the first null byte.
///
/// ```
/// # use segy_core::bitconverter::ascii_bytes_to_string;
/// assert_eq!(ascii_bytes_to_string(b"hello\0world"), "hello");
/// assert_eq!(ascii_bytes_to_string(b"no nulls here"), "no nulls here");
/// ```
pub fn ascii_bytes_to_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).to_string()
}

/// The byte width a given [`ScalarType`] occupies once decoded for the
/// caller (identical to [`ScalarType::width`] except informative for
/// `Ibm32`, which stores 4 bytes and decodes to a 4-byte `f32`).
pub fn decoded_width(format: ScalarType) -> usize {
    format.decodes_to().width()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// S3: concrete IBM32 -> IEEE754 scenarios from the testable-properties
    /// table (the zero and positive cases from the reference corpus).
    #[test]
    fn s3_concrete_conversions() {
        assert_eq!(ibm32_to_ieee754(0x0000_0000), 0.0f32);
        assert_eq!(ibm32_to_ieee754(0x8000_0000), -0.0f32);
        assert_eq!(ibm32_to_ieee754(0x4110_0000), 1.0f32);
        assert_eq!(ibm32_to_ieee754(0x4080_0000), 0.5f32);
        assert_eq!(ibm32_to_ieee754(0xC080_0000), -0.5f32);
    }

    #[test]
    fn zero_fraction_is_signed_zero_regardless_of_exponent() {
        // Exponent bits set but fraction zero: still +/-0.0 per the spec's
        // "fraction == 0 -> +/-0.0" rule, independent of the exponent.
        assert_eq!(ibm32_to_ieee754(0x7F00_0000), 0.0f32);
        assert_eq!(ibm32_to_ieee754(0xFF00_0000), -0.0f32);
    }

    #[test]
    fn overflow_saturates_to_infinity() {
        // Maximum IBM exponent (0x7F, unbiased +63) with a large fraction
        // converts to a base-2 exponent far beyond f32::MAX; must saturate
        // rather than wrap or panic.
        let huge = ibm32_to_ieee754(0x7FFF_FFFF);
        assert!(huge.is_infinite() && huge.is_sign_positive());
        let huge_neg = ibm32_to_ieee754(0xFFFF_FFFF);
        assert!(huge_neg.is_infinite() && huge_neg.is_sign_negative());
    }

    #[test]
    fn underflow_saturates_to_zero_without_trapping() {
        // Minimum IBM exponent (0x00, unbiased -64) with the smallest
        // nonzero fraction converts to a base-2 exponent far below f32::MIN,
        // which must saturate to zero rather than panic or produce NaN.
        let tiny = ibm32_to_ieee754(0x0000_0001);
        assert_eq!(tiny, 0.0f32);
        assert!(tiny.is_sign_positive());
    }

    #[test]
    fn conversion_is_elementwise_over_a_buffer() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0x4110_0000u32.to_be_bytes());
        buf.extend_from_slice(&0xC080_0000u32.to_be_bytes());
        buf.extend_from_slice(&0x0000_0000u32.to_be_bytes());
        assert_eq!(ibm32_buffer_to_f32(&buf), vec![1.0f32, -0.5f32, 0.0f32]);
    }

    #[test]
    fn swap_fields_in_place_respects_mixed_widths_and_leaves_gaps_untouched() {
        // A 2-byte field at 0, a gap at [2,4), a 4-byte field at 4.
        let mut buf = vec![0x11, 0x22, 0xAA, 0xBB, 0x33, 0x44, 0x55, 0x66];
        swap_fields_in_place(&mut buf, &[(0, 2), (4, 4)]);
        assert_eq!(buf, vec![0x22, 0x11, 0xAA, 0xBB, 0x66, 0x55, 0x44, 0x33]);
    }

    /// Invariant 4: swapping the same buffer twice is a no-op.
    #[test]
    fn swap_fields_in_place_is_an_involution() {
        let original = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let mut buf = original.clone();
        let layout = [(0, 2), (2, 4)];
        swap_fields_in_place(&mut buf, &layout);
        swap_fields_in_place(&mut buf, &layout);
        assert_eq!(buf, original);
    }

    #[test]
    fn ascii_bytes_to_string_truncates_at_first_null() {
        assert_eq!(ascii_bytes_to_string(b"hello\0\0\0"), "hello");
        assert_eq!(ascii_bytes_to_string(b""), "");
    }

    #[test]
    fn decoded_width_is_four_for_ibm32_like_float32() {
        assert_eq!(decoded_width(ScalarType::Ibm32), 4);
        assert_eq!(decoded_width(ScalarType::Float32), 4);
        assert_eq!(decoded_width(ScalarType::Float64), 8);
    }
}
