//! Color space conversion utilities for sRGB and linear RGB.
//!
//! The gamma curve (IEC 61966-2-1) is a piecewise function with an
//! irrational exponent (2.4), which isn't evaluable with `f64::powf` in a
//! const context. Both directions go through [`rational_pow`], a small
//! const-evaluable `base^(num/den)` via an integer power followed by an
//! integer root, so the conversion tables can be built once at compile time
//! instead of re-deriving the curve on every call.

/// Raise `base` to the integer power `exp` (`exp` is always small: 5 or 12
/// here), in a const context.
const fn int_pow(base: f64, exp: u32) -> f64 {
    let mut result = 1.0;
    let mut i = 0;
    while i < exp {
        result *= base;
        i += 1;
    }
    result
}

/// The `n`th root of `value`, found via Newton's method on `f(x) = x^n -
/// value`. Converges to within `1e-15` for the ranges this module calls it
/// with (`value` in `[0, 1]` or `[0, a few thousand]`, `n` in `{5, 12}`).
const fn int_root(value: f64, n: u32) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    if value == 1.0 {
        return 1.0;
    }

    let mut x = if value < 1.0 { 1.0 } else { value };
    let nf = n as f64;
    let nm1 = (n - 1) as f64;

    let mut iterations = 0;
    while iterations < 100 {
        let mut x_pow_nm1 = 1.0;
        let mut j = 0;
        while j < n - 1 {
            x_pow_nm1 *= x;
            j += 1;
        }
        let next = (nm1 * x + value / x_pow_nm1) / nf;
        let delta = if next > x { next - x } else { x - next };
        x = next;
        if delta < 1e-15 {
            break;
        }
        iterations += 1;
    }
    x
}

/// `base^(num/den)` for non-negative `base`, evaluated as `root_den(base^num)`.
/// Const-evaluable, used only to build the two LUTs below.
const fn rational_pow(base: f64, num: u32, den: u32) -> f64 {
    if base <= 0.0 {
        0.0
    } else {
        int_root(int_pow(base, num), den)
    }
}

/// `sRGB -> linear`, IEC 61966-2-1's inverse gamma: `((v + 0.055) /
/// 1.055)^2.4` above the linear segment, where `2.4 = 12/5`.
const fn srgb_to_linear_exact(value: f64) -> f64 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        rational_pow((value + 0.055) / 1.055, 12, 5)
    }
}

/// `linear -> sRGB` byte, IEC 61966-2-1's forward gamma: `1.055 *
/// v^(1/2.4) - 0.055` above the linear segment, where `1/2.4 = 5/12`.
const fn linear_to_srgb_exact(linear: f64) -> u8 {
    if linear <= 0.0 {
        return 0;
    }
    if linear >= 1.0 {
        return 255;
    }
    if linear <= 0.003_130_8 {
        return (linear * 12.92 * 255.0 + 0.5) as u8;
    }
    let gamma = rational_pow(linear, 5, 12);
    ((1.055 * gamma - 0.055) * 255.0 + 0.5) as u8
}

/// 256-entry sRGB-byte -> linear-float table, covering every possible input
/// byte exactly.
const fn build_srgb_to_linear_lut() -> [f64; 256] {
    let mut lut = [0.0f64; 256];
    let mut i = 0u32;
    while i < 256 {
        lut[i as usize] = srgb_to_linear_exact(i as f64 / 255.0);
        i += 1;
    }
    lut
}

const fn build_srgb_to_linear_lut_f32() -> [f32; 256] {
    let lut64 = build_srgb_to_linear_lut();
    let mut lut = [0.0f32; 256];
    let mut i = 0;
    while i < 256 {
        lut[i] = lut64[i] as f32;
        i += 1;
    }
    lut
}

/// Entries in the linear -> sRGB table. 4096 is a 12-bit quantization of
/// the linear range, precise enough for exact byte-level round-tripping
/// while keeping the table at 4 KiB.
const LINEAR_TO_SRGB_LUT_SIZE: usize = 4096;

const fn build_linear_to_srgb_lut() -> [u8; LINEAR_TO_SRGB_LUT_SIZE] {
    let mut lut = [0u8; LINEAR_TO_SRGB_LUT_SIZE];
    let mut i = 0u32;
    while i < LINEAR_TO_SRGB_LUT_SIZE as u32 {
        let linear = i as f64 / (LINEAR_TO_SRGB_LUT_SIZE as f64 - 1.0);
        lut[i as usize] = linear_to_srgb_exact(linear);
        i += 1;
    }
    lut
}

static SRGB_TO_LINEAR_LUT: [f64; 256] = build_srgb_to_linear_lut();
static SRGB_TO_LINEAR_LUT_F32: [f32; 256] = build_srgb_to_linear_lut_f32();
static LINEAR_TO_SRGB_LUT: [u8; LINEAR_TO_SRGB_LUT_SIZE] = build_linear_to_srgb_lut();

/// Convert an sRGB byte value (0..=255) to linear RGB (0.0..=1.0).
///
/// # Examples
///
/// ```
/// use blurhash::color::srgb_to_linear;
/// assert!((srgb_to_linear(0) - 0.0).abs() < 1e-10);
/// assert!((srgb_to_linear(255) - 1.0).abs() < 1e-10);
/// ```
#[inline]
pub fn srgb_to_linear(value: u8) -> f64 {
    SRGB_TO_LINEAR_LUT[value as usize]
}

/// f32 variant of [`srgb_to_linear`], used on the encode hot path.
#[inline]
pub fn srgb_to_linear_f32(value: u8) -> f32 {
    // SAFETY: value is a u8, so the index is always in 0..256.
    unsafe { *SRGB_TO_LINEAR_LUT_F32.get_unchecked(value as usize) }
}

/// Convert a linear RGB value (0.0..=1.0) to an sRGB byte (0..=255).
/// Out-of-range input is clamped.
///
/// # Examples
///
/// ```
/// use blurhash::color::linear_to_srgb;
/// assert_eq!(linear_to_srgb(0.0), 0);
/// assert_eq!(linear_to_srgb(1.0), 255);
/// ```
#[inline]
pub fn linear_to_srgb(value: f64) -> u8 {
    let clamped = value.clamp(0.0, 1.0);
    let index = (clamped * (LINEAR_TO_SRGB_LUT_SIZE as f64 - 1.0) + 0.5) as usize;
    LINEAR_TO_SRGB_LUT[index.min(LINEAR_TO_SRGB_LUT_SIZE - 1)]
}

/// f32 variant of [`linear_to_srgb`], used on the decode hot path.
#[inline]
pub fn linear_to_srgb_f32(value: f32) -> u8 {
    let clamped = value.clamp(0.0, 1.0);
    let index = (clamped * (LINEAR_TO_SRGB_LUT_SIZE as f32 - 1.0) + 0.5) as usize;
    // SAFETY: clamped is in [0.0, 1.0], so index lands in
    // [0, LINEAR_TO_SRGB_LUT_SIZE - 1] after the min() below.
    unsafe { *LINEAR_TO_SRGB_LUT.get_unchecked(index.min(LINEAR_TO_SRGB_LUT_SIZE - 1)) }
}

/// `sign(value) * |value|^exp`, preserving sign through a fractional power.
///
/// # Examples
///
/// ```
/// use blurhash::color::sign_pow;
/// assert!((sign_pow(4.0, 0.5) - 2.0).abs() < 1e-10);
/// assert!((sign_pow(-4.0, 0.5) - (-2.0)).abs() < 1e-10);
/// ```
#[inline]
pub fn sign_pow(value: f64, exp: f64) -> f64 {
    value.abs().powf(exp).copysign(value)
}

/// f32 variant of [`sign_pow`], with fast paths for the two exponents the
/// quantiser actually uses (`0.5` on encode, `2.0` on decode).
#[inline(always)]
pub fn sign_pow_f32(value: f32, exp: f32) -> f32 {
    let magnitude = value.abs();
    let result = if exp == 0.5 {
        magnitude.sqrt()
    } else if exp == 2.0 {
        magnitude * magnitude
    } else {
        magnitude.powf(exp)
    };
    result.copysign(value)
}
