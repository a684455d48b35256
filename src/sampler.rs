//! External collaborator interfaces.
//!
//! BlurHash encoding conceptually starts from a full-resolution image, but
//! this crate's contract begins at the [`PixelMap`](crate::PixelMap) level —
//! decoding an image file, picking a decoder backend, and scaling it down
//! to a sample grid are all someone else's job. These traits document that
//! boundary without implementing either side of it.

use crate::error::BlurhashError;
use crate::pixel::PixelMap;

/// The smallest resolution a [`PixelSampler`] will be asked for.
pub const MIN_RESOLUTION: u32 = 4;

/// The largest resolution a [`PixelSampler`] will be asked for.
pub const MAX_RESOLUTION: u32 = 128;

/// Produces a [`PixelMap`] from some opaque image handle, sampled so its
/// shorter edge is exactly the requested resolution and its longer edge
/// preserves aspect.
///
/// This crate ships no implementation: decoding a JPEG, PNG, or any other
/// on-disk format, and resampling it down to a handful of pixels, is
/// explicitly out of scope for the codec (see spec §1's non-goals). A
/// caller plugs in their own `image`-crate-backed (or platform-native)
/// sampler here.
pub trait PixelSampler {
    /// The opaque handle type this sampler accepts (a path, a decoded
    /// image buffer, a platform image handle, etc).
    type Handle;

    /// Sample `handle` down to a [`PixelMap`] whose shorter edge is
    /// `resolution` pixels.
    fn sample(&self, handle: &Self::Handle, resolution: u32) -> Result<PixelMap, BlurhashError>;
}

/// Renders a decoded [`PixelMap`] to some output representation (a file, a
/// byte stream, a data URI).
///
/// Like [`PixelSampler`], this is a documented seam with no implementation
/// in this crate — the codec's contract ends at the `PixelMap` it returns
/// from `decode`.
pub trait OutputRenderer {
    /// The rendered representation this renderer produces.
    type Output;

    /// Render `pixels` to this renderer's output representation.
    fn render(&self, pixels: &PixelMap) -> Result<Self::Output, BlurhashError>;
}

/// Clamp a caller-requested sampling resolution to `[MIN_RESOLUTION,
/// MAX_RESOLUTION]`, logging a warning if clamping was necessary.
///
/// This does not return an error: an out-of-range resolution is recoverable
/// by clamping, matching spec §7's "non-fatal, clamped with a warning" for
/// `ResolutionOutOfRange`.
pub fn clamp_resolution(requested: u32) -> u32 {
    let clamped = requested.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
    if clamped != requested {
        log::warn!(
            "{}",
            BlurhashError::ResolutionOutOfRange {
                requested,
                clamped,
            }
        );
    }
    clamped
}
