//! # Half-Precision Float Codec
//!
//! Bit-level conversion of IEEE 754 half-precision (16-bit) values to
//! single precision, used by the raw `.f16` decoder.
//!
//! Layout of the input pattern: 1 sign bit, 5 exponent bits, 10 mantissa
//! bits. The conversion is exact: every half value is representable in
//! single precision, so there are no rounding paths.

/// Converts an IEEE 754 half-precision bit pattern to an `f32`.
///
/// Handles all four encoding classes:
/// - signed zero (exponent 0, mantissa 0)
/// - subnormals (exponent 0, mantissa != 0): the mantissa is renormalised
///   by left-shifting until its implicit bit is set, decrementing the
///   exponent per shift, then rebias
/// - signed infinity (exponent 31, mantissa 0)
/// - NaN (exponent 31, mantissa != 0): quieted by forcing the top
///   mantissa bit
///
/// Normal values rebias the exponent by +112 (127 - 15) and shift the
/// mantissa into the 23-bit field.
#[inline]
#[must_use]
pub fn half_to_f32(bits: u16) -> f32 {
    let sign = u32::from(bits >> 15) & 0x1;
    let mut exponent = i32::from((bits >> 10) & 0x1F);
    let mut mantissa = u32::from(bits) & 0x3FF;

    let word = if exponent == 0 {
        if mantissa == 0 {
            // Signed zero
            sign << 31
        } else {
            // Subnormal: renormalise until the implicit bit appears
            while mantissa & 0x400 == 0 {
                mantissa <<= 1;
                exponent -= 1;
            }
            exponent += 1;
            mantissa &= !0x400;
            #[allow(clippy::cast_sign_loss)]
            let biased = (exponent + 112) as u32;
            (sign << 31) | (biased << 23) | (mantissa << 13)
        }
    } else if exponent == 31 {
        if mantissa == 0 {
            // Signed infinity
            (sign << 31) | 0x7F80_0000
        } else {
            // Quiet NaN
            (sign << 31) | 0x7FC0_0000 | (mantissa << 13)
        }
    } else {
        #[allow(clippy::cast_sign_loss)]
        let biased = (exponent + 112) as u32;
        (sign << 31) | (biased << 23) | (mantissa << 13)
    };

    f32::from_bits(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one() {
        assert_eq!(half_to_f32(0x3C00), 1.0);
    }

    #[test]
    fn test_signed_zero() {
        let pos = half_to_f32(0x0000);
        let neg = half_to_f32(0x8000);
        assert_eq!(pos, 0.0);
        assert_eq!(neg, 0.0);
        assert!(pos.is_sign_positive());
        assert!(neg.is_sign_negative());
    }

    #[test]
    fn test_infinities() {
        assert_eq!(half_to_f32(0x7C00), f32::INFINITY);
        assert_eq!(half_to_f32(0xFC00), f32::NEG_INFINITY);
    }

    #[test]
    fn test_nan_is_quiet() {
        let v = half_to_f32(0x7E00);
        assert!(v.is_nan());
        // Quiet bit must be set
        assert_eq!(v.to_bits() & 0x0040_0000, 0x0040_0000);
    }

    #[test]
    fn test_common_values() {
        assert_eq!(half_to_f32(0x4000), 2.0);
        assert_eq!(half_to_f32(0x3800), 0.5);
        assert_eq!(half_to_f32(0xC000), -2.0);
        assert_eq!(half_to_f32(0x7BFF), 65504.0); // largest finite half
    }

    #[test]
    fn test_smallest_subnormal() {
        // 0x0001 = 2^-24
        assert_eq!(half_to_f32(0x0001), 2.0_f32.powi(-24));
    }

    #[test]
    fn test_largest_subnormal() {
        // 0x03FF = (1023 / 1024) * 2^-14
        assert_eq!(half_to_f32(0x03FF), (1023.0 / 1024.0) * 2.0_f32.powi(-14));
    }
}
