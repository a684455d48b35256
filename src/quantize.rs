//! Signed square-root companding for AC coefficients.
//!
//! BlurHash's AC components carry more precision near zero than at the
//! extremes, so they are companded through a signed square root before
//! being packed into 19 discrete levels (0..=18), and expanded back through
//! the inverse (a signed square) on decode.

use crate::color::sign_pow;

/// Quantise a normalised AC coefficient `v` (nominally in `[-1, 1]`) into one
/// of 19 levels (`0..=18`).
///
/// # Examples
///
/// ```
/// use blurhash::quantize::quantize;
/// assert_eq!(quantize(-1.0), 0);
/// assert_eq!(quantize(0.0), 9);
/// assert_eq!(quantize(1.0), 18);
/// ```
#[inline]
pub fn quantize(v: f64) -> u64 {
    (sign_pow(v, 0.5) * 9.0 + 9.5).floor().clamp(0.0, 18.0) as u64
}

/// Inverse of [`quantize`]: expand a level `q` (`0..=18`) back into a float
/// in `[-1, 1]`.
///
/// # Examples
///
/// ```
/// use blurhash::quantize::dequantize;
/// assert_eq!(dequantize(0), -1.0);
/// assert_eq!(dequantize(9), 0.0);
/// assert_eq!(dequantize(18), 1.0);
/// ```
#[inline]
pub fn dequantize(q: u64) -> f64 {
    sign_pow((q as f64 - 9.0) / 9.0, 2.0)
}

/// f32 variant of [`dequantize`] used on the decode hot path.
#[inline]
pub fn dequantize_f32(q: u64) -> f32 {
    crate::color::sign_pow_f32((q as f32 - 9.0) / 9.0, 2.0)
}
