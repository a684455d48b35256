//! # blurhash
//!
//! BlurHash encoding and decoding in pure Rust, extended with an optional
//! `<W:H>` size prefix and aspect-driven component-count inference.
//!
//! [BlurHash](https://blurha.sh/) is a compact representation of a
//! placeholder for an image: a short base83 string that decodes to a blurry
//! thumbnail, cheap enough to inline directly in an API response.
//!
//! ## Quick start
//!
//! ```
//! use blurhash::{encode, Ratio, Source, PixelMap};
//!
//! let pixels = PixelMap::new(vec![128u8; 4 * 4 * 3], 4, 4).unwrap();
//! let hash = encode(Source::Pixels(pixels), Ratio::Default, false).unwrap();
//!
//! let decoded = blurhash::decode(&hash, Some(32), Some(32), 1.0).unwrap();
//! assert_eq!(decoded.pixels().len(), 32 * 32 * 3);
//! ```
//!
//! This crate ships no image I/O: decoding a JPEG or PNG and sampling it
//! down to a handful of pixels is out of scope (see [`sampler`]), as is
//! anything GPU-accelerated.

pub mod aspect;
pub mod base83;
pub mod color;
pub mod decode;
pub mod encode;
pub mod error;
pub mod pixel;
pub mod quantize;
pub mod sampler;

#[cfg(feature = "simd")]
pub(crate) mod simd;

pub use error::BlurhashError;
pub use pixel::{Component, LinearMap, Orientation, PixelMap, SizePrefix};
pub use sampler::{clamp_resolution, OutputRenderer, PixelSampler};

/// How many DCT components [`encode`] should use along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ratio {
    /// Infer `(components_x, components_y)` from the source image's aspect
    /// ratio, via [`aspect::infer_components`].
    Infer,
    /// Use an explicit `(components_x, components_y)` pair; each must be
    /// `1..=9` or `encode` returns [`BlurhashError::InvalidComponentCount`].
    Explicit(u32, u32),
    /// Use [`aspect::DEFAULT_COMPONENTS`] regardless of aspect ratio.
    Default,
}

/// The pixel data [`encode`] consumes: gamma-encoded sRGB bytes, or
/// already-linear floats for callers that have their own conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Gamma-encoded sRGB pixels.
    Pixels(PixelMap),
    /// Pre-linearised floats, skipping the sRGB -> linear step.
    Linear(LinearMap),
}

impl Source {
    fn dimensions(&self) -> (u32, u32) {
        match self {
            Source::Pixels(p) => (p.width(), p.height()),
            Source::Linear(l) => (l.width(), l.height()),
        }
    }
}

fn resolve_components(ratio: Ratio, width: u32, height: u32) -> (u32, u32) {
    match ratio {
        Ratio::Explicit(x, y) => (x, y),
        Ratio::Infer => aspect::infer_components(width, height),
        Ratio::Default => aspect::DEFAULT_COMPONENTS,
    }
}

/// Encode `source` into a BlurHash string.
///
/// `ratio` selects how many DCT components to use along each axis (see
/// [`Ratio`]). When `prefix_size` is `true`, the source image's `<W:H>` is
/// prepended to the returned string, so a later [`decode_to_pixels`] call
/// can recover a correctly-proportioned output size without the caller
/// having to track it separately.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidComponentCount`] if `ratio` resolves to
/// a component count outside `1..=9`.
///
/// # Examples
///
/// ```
/// use blurhash::{encode, Ratio, Source, PixelMap};
///
/// let pixels = PixelMap::new(vec![200, 120, 40].repeat(9), 3, 3).unwrap();
/// let hash = encode(Source::Pixels(pixels), Ratio::Infer, true).unwrap();
/// assert!(hash.starts_with("<3:3>"));
/// ```
pub fn encode(source: Source, ratio: Ratio, prefix_size: bool) -> Result<String, BlurhashError> {
    let (width, height) = source.dimensions();
    let (components_x, components_y) = resolve_components(ratio, width, height);

    let hash = match &source {
        Source::Pixels(pixels) => encode::encode_pixels(pixels, components_x, components_y)?,
        Source::Linear(map) => encode::encode_linear(map, components_x, components_y)?,
    };

    if prefix_size {
        Ok(format!("{}{}", SizePrefix { width, height }.format(), hash))
    } else {
        Ok(hash)
    }
}

/// Decode `hash` into a [`PixelMap`] of `width` x `height` pixels.
///
/// If `hash` carries a `<W:H>` size prefix, `width`/`height` default to it
/// when not given explicitly. Giving only one of the two derives the other
/// from the prefix's aspect ratio (rather than from the prefix's raw value
/// on that axis), so `decode(hash, Some(320), None, 1.0)` on a
/// `<640:480>`-prefixed hash yields a 320x240 map, not 320x480. Giving both
/// overrides the prefix entirely. `punch` scales AC contrast (`1.0` =
/// unmodified).
///
/// # Errors
///
/// Returns [`BlurhashError::MalformedPrefix`] if `hash` starts with `<` but
/// the prefix isn't well-formed, and [`BlurhashError::MissingSizePrefix`] if
/// neither an explicit dimension nor a prefix supplies a missing axis.
///
/// # Examples
///
/// ```
/// use blurhash::decode;
/// let pixels = decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", Some(32), Some(32), 1.0).unwrap();
/// assert_eq!(pixels.width(), 32);
/// ```
pub fn decode(
    hash: &str,
    width: Option<u32>,
    height: Option<u32>,
    punch: f64,
) -> Result<PixelMap, BlurhashError> {
    let (prefix, body) = match SizePrefix::parse(hash)? {
        Some((prefix, rest)) => (Some(prefix), rest),
        None => (None, hash),
    };

    let (resolved_width, resolved_height) = match (width, height, prefix) {
        (Some(w), Some(h), _) => (w, h),
        // Only one side is explicit: derive the other from the prefix's
        // aspect ratio (spec.md §4.5 step 1), not from the prefix's raw
        // value on that axis alone.
        (Some(w), None, Some(p)) => (w, scale_dimension(w, p.width, p.height)),
        (None, Some(h), Some(p)) => (scale_dimension(h, p.height, p.width), h),
        (None, None, Some(p)) => (p.width, p.height),
        (Some(_), None, None) => {
            return Err(BlurhashError::MissingSizePrefix {
                reason: "no height given and hash carries no <W:H> prefix",
            })
        }
        (None, Some(_), None) => {
            return Err(BlurhashError::MissingSizePrefix {
                reason: "no width given and hash carries no <W:H> prefix",
            })
        }
        (None, None, None) => {
            return Err(BlurhashError::MissingSizePrefix {
                reason: "no width/height given and hash carries no <W:H> prefix",
            })
        }
    };

    decode::decode_pixels(body, resolved_width, resolved_height, punch)
}

/// Scale `known` (a length along one axis) to the corresponding length on
/// the other axis, given that axis's ratio pair, rounding to the nearest
/// integer and keeping the result within `1..=MAX_DIMENSION`.
fn scale_dimension(known: u32, known_axis: u32, other_axis: u32) -> u32 {
    let denom = (known_axis as u64).max(1);
    let numer = known as u64 * other_axis as u64;
    let scaled = (numer + denom / 2) / denom;
    scaled.clamp(1, pixel::MAX_DIMENSION as u64) as u32
}

/// Decode `hash` into a [`PixelMap`] whose shorter edge is `resolution`
/// pixels and whose longer edge preserves the aspect ratio carried by
/// `hash`'s `<W:H>` prefix.
///
/// `resolution` is clamped to [`sampler::MIN_RESOLUTION`]..=
/// [`sampler::MAX_RESOLUTION`] via [`clamp_resolution`].
///
/// # Errors
///
/// Returns [`BlurhashError::MissingSizePrefix`] if `hash` has no `<W:H>`
/// prefix to derive an aspect ratio from.
pub fn decode_to_pixels(hash: &str, resolution: u32) -> Result<PixelMap, BlurhashError> {
    let resolution = clamp_resolution(resolution);
    let (prefix, body) = match SizePrefix::parse(hash)? {
        Some((prefix, rest)) => (prefix, rest),
        None => {
            return Err(BlurhashError::MissingSizePrefix {
                reason: "decode_to_pixels requires a <W:H> size prefix",
            })
        }
    };

    let (width, height) = if prefix.width <= prefix.height {
        (resolution, scale_dimension(resolution, prefix.width, prefix.height))
    } else {
        (scale_dimension(resolution, prefix.height, prefix.width), resolution)
    };

    decode::decode_pixels(body, width, height, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_facade_roundtrip() {
        let pixels = PixelMap::new(vec![60, 90, 120].repeat(16), 4, 4).unwrap();
        let hash = encode(Source::Pixels(pixels), Ratio::Default, false).unwrap();
        let decoded = decode(&hash, Some(16), Some(16), 1.0).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
    }

    #[test]
    fn test_encode_with_prefix_round_trips_through_decode_to_pixels() {
        let pixels = PixelMap::new(vec![10, 20, 30].repeat(16 * 9), 16, 9).unwrap();
        let hash = encode(Source::Pixels(pixels), Ratio::Infer, true).unwrap();
        assert!(hash.starts_with("<16:9>"));

        let decoded = decode_to_pixels(&hash, 32).unwrap();
        // 16:9 is landscape, so height (the shorter edge) equals resolution.
        assert_eq!(decoded.height(), 32);
        assert!(decoded.width() > decoded.height());
    }

    #[test]
    fn test_decode_to_pixels_requires_prefix() {
        assert!(decode_to_pixels("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 32).is_err());
    }

    #[test]
    fn test_decode_without_prefix_or_dimensions_errors() {
        assert!(decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", None, None, 1.0).is_err());
    }

    #[test]
    fn test_decode_explicit_dimensions_override_prefix() {
        let hash = "<100:100>LEHV6nWB2yk8pyo0adR*.7kCMdnj";
        let decoded = decode(hash, Some(8), Some(8), 1.0).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn test_decode_single_dimension_derives_other_from_prefix_aspect() {
        let hash = "<640:480>LEHV6nWB2yk8pyo0adR*.7kCMdnj";
        let by_width = decode(hash, Some(320), None, 1.0).unwrap();
        assert_eq!((by_width.width(), by_width.height()), (320, 240));

        let by_height = decode(hash, None, Some(240), 1.0).unwrap();
        assert_eq!((by_height.width(), by_height.height()), (320, 240));
    }
}
