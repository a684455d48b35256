//! Error types for BlurHash encoding and decoding.

use thiserror::Error;

/// Errors that can occur during BlurHash encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlurhashError {
    /// The BlurHash string (after stripping any `<W:H>` prefix) has the
    /// wrong length for the component counts its header byte declares.
    #[error("invalid BlurHash length: expected {expected}, got {actual}")]
    InvalidHashLength {
        /// The expected length.
        expected: usize,
        /// The actual length.
        actual: usize,
    },

    /// The component count is out of the valid range (1..=9).
    #[error("component count out of range: {component} = {value} (must be 1..=9)")]
    InvalidComponentCount {
        /// Which component axis ("x" or "y").
        component: &'static str,
        /// The invalid value.
        value: u32,
    },

    /// An invalid character was encountered during base83 decoding, or in a
    /// `<W:H>` size prefix.
    #[error("invalid character in BlurHash: {0:?}")]
    InvalidCharacter(char),

    /// `Source::Linear` was used, but the data did not describe a
    /// pre-processed linear-light map (shape mismatch).
    #[error("invalid linear input: {0}")]
    InvalidLinearInput(String),

    /// A `<W:H>` size prefix was present but malformed (unterminated,
    /// missing the `:` separator, or containing a non-numeric width/height).
    #[error("malformed size prefix: {0}")]
    MalformedPrefix(String),

    /// A call needed a `<W:H>` size prefix to resolve a dimension — either
    /// [`decode_to_pixels`](crate::decode_to_pixels)'s aspect ratio, or
    /// [`decode`](crate::decode)'s other axis when only one of `width`/
    /// `height` was given explicitly — but `hash` carried none.
    #[error("missing size prefix: {reason}")]
    MissingSizePrefix {
        /// Which dimension was unresolvable and why.
        reason: &'static str,
    },

    /// The pixel map's dimensions are invalid: zero, jagged, or the pixel
    /// buffer length doesn't match `width * height * 3`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// The width value.
        width: u32,
        /// The height value.
        height: u32,
        /// Why the dimensions are invalid.
        reason: &'static str,
    },

    /// A base83 `encode` call was asked to pack a value that doesn't fit in
    /// the requested number of digits.
    #[error("value {value} is too large for {length} base83 digit(s) (max {max})")]
    ValueTooLarge {
        /// The value that didn't fit.
        value: u64,
        /// The requested digit count.
        length: usize,
        /// The largest value that *would* fit.
        max: u64,
    },

    /// A caller-requested sampling resolution fell outside `[4, 128]`. This
    /// variant exists to give `clamp_resolution`'s advisory warning a
    /// reusable `Display` message; callers are not handed an `Err` for it
    /// (see [`crate::sampler::clamp_resolution`]).
    #[error("resolution {requested} out of range [4, 128], clamped to {clamped}")]
    ResolutionOutOfRange {
        /// The resolution the caller requested.
        requested: u32,
        /// The resolution actually used.
        clamped: u32,
    },
}
