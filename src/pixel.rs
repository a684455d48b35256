//! The pixel/linear-light grid types the codec operates on.
//!
//! The teacher implementation this crate grew from took raw `&[u8]` slices
//! plus bare `width`/`height` parameters everywhere, re-checking the same
//! shape invariant (`pixels.len() == width * height * 3`) at both `encode`
//! and `decode`. Here that invariant is enforced once, at construction.

use crate::error::BlurhashError;

/// The largest width or height this crate will allocate for. Prevents a
/// malicious or malformed caller from triggering an out-of-memory abort via
/// `width * height * 3`.
pub const MAX_DIMENSION: u32 = 10_000;

/// A row-major RGB pixel grid, 8 bits per channel.
///
/// Construct with [`PixelMap::new`], which enforces that `width` and
/// `height` are both at least 1 and that `pixels` has exactly
/// `width * height * 3` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelMap {
    /// Build a `PixelMap` from a flat, row-major RGB byte buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::InvalidDimensions`] if `width` or `height`
    /// is zero, either exceeds [`MAX_DIMENSION`], or `pixels.len()` does not
    /// equal `width * height * 3`.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, BlurhashError> {
        if width == 0 || height == 0 {
            return Err(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "width and height must be > 0",
            });
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "dimensions must be <= 10000",
            });
        }
        let expected = (width as u64)
            .checked_mul(height as u64)
            .and_then(|v| v.checked_mul(3))
            .and_then(|v| usize::try_from(v).ok())
            .ok_or(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "dimensions overflow buffer size calculation",
            })?;
        if pixels.len() != expected {
            return Err(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "pixel buffer length does not match width * height * 3",
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The flat row-major RGB byte buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the map, returning its raw byte buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Same shape as [`PixelMap`], but each channel is linear-light float in
/// `[0.0, 1.0]` rather than a gamma-encoded byte.
///
/// Used by [`crate::Source::Linear`] for callers that have already
/// linearised their pixel data and want to skip the sRGB conversion step.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearMap {
    width: u32,
    height: u32,
    pixels: Vec<f32>,
}

impl LinearMap {
    /// Build a `LinearMap` from a flat, row-major linear RGB buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::InvalidDimensions`] under the same
    /// conditions as [`PixelMap::new`].
    pub fn new(pixels: Vec<f32>, width: u32, height: u32) -> Result<Self, BlurhashError> {
        if width == 0 || height == 0 {
            return Err(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "width and height must be > 0",
            });
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "dimensions must be <= 10000",
            });
        }
        let expected = (width as u64)
            .checked_mul(height as u64)
            .and_then(|v| v.checked_mul(3))
            .and_then(|v| usize::try_from(v).ok())
            .ok_or(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "dimensions overflow buffer size calculation",
            })?;
        if pixels.len() != expected {
            return Err(BlurhashError::InvalidDimensions {
                width,
                height,
                reason: "pixel buffer length does not match width * height * 3",
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The flat row-major linear RGB buffer.
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }
}

/// One DCT coefficient in linear-light space: the DC term when it is the
/// first of a component grid, an AC term otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Component {
    /// Red channel coefficient.
    pub r: f64,
    /// Green channel coefficient.
    pub g: f64,
    /// Blue channel coefficient.
    pub b: f64,
}

impl Component {
    /// The largest absolute value across the three channels.
    pub fn abs_max(&self) -> f64 {
        self.r.abs().max(self.g.abs()).max(self.b.abs())
    }
}

/// Whether an image is wider than it is tall, taller than it is wide, or
/// exactly square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Width greater than height.
    Landscape,
    /// Height greater than width.
    Portrait,
    /// Width equal to height.
    Square,
}

impl Orientation {
    /// Classify a `width` x `height` pair.
    pub fn of(width: u32, height: u32) -> Self {
        match width.cmp(&height) {
            std::cmp::Ordering::Greater => Orientation::Landscape,
            std::cmp::Ordering::Less => Orientation::Portrait,
            std::cmp::Ordering::Equal => Orientation::Square,
        }
    }
}

/// A parsed `<W:H>` size prefix, carrying a BlurHash string's source aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePrefix {
    /// The source image's width.
    pub width: u32,
    /// The source image's height.
    pub height: u32,
}

impl SizePrefix {
    /// Parse a leading `<W:H>` prefix off `input`.
    ///
    /// Returns `Ok(None)` if `input` does not start with `<` (no prefix was
    /// ever written). Returns an error only once a `<` commits us to a
    /// prefix that then turns out to be malformed.
    ///
    /// # Errors
    ///
    /// Returns [`BlurhashError::MalformedPrefix`] if the prefix is
    /// unterminated, missing the `:` separator, or has a non-numeric width
    /// or height.
    pub fn parse(input: &str) -> Result<Option<(SizePrefix, &str)>, BlurhashError> {
        if !input.starts_with('<') {
            return Ok(None);
        }
        let end = input
            .find('>')
            .ok_or_else(|| BlurhashError::MalformedPrefix("unterminated '<...>' prefix".into()))?;
        let body = &input[1..end];
        let (w_str, h_str) = body.split_once(':').ok_or_else(|| {
            BlurhashError::MalformedPrefix(format!("expected '<W:H>', got {input:?}"))
        })?;
        let width: u32 = w_str
            .parse()
            .map_err(|_| BlurhashError::MalformedPrefix(format!("invalid width {w_str:?}")))?;
        let height: u32 = h_str
            .parse()
            .map_err(|_| BlurhashError::MalformedPrefix(format!("invalid height {h_str:?}")))?;
        Ok(Some((SizePrefix { width, height }, &input[end + 1..])))
    }

    /// Render as a `<W:H>` prefix string.
    pub fn format(&self) -> String {
        format!("<{}:{}>", self.width, self.height)
    }
}
