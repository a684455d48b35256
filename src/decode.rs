//! BlurHash decoding: convert a BlurHash string back into an RGB image.
//!
//! The decoder parses the base83-encoded string, extracts the DCT
//! components, and reconstructs an image of the requested dimensions using
//! a separable inverse DCT (two 1D passes) rather than a direct O(w*h*cx*cy)
//! evaluation.
//!
//! When the `parallel` feature is enabled, large images are decoded row by
//! row on rayon's work-stealing thread pool.

use std::f32::consts::PI;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::base83;
use crate::color::{linear_to_srgb_f32, srgb_to_linear_f32};
use crate::error::BlurhashError;
use crate::pixel::{PixelMap, MAX_DIMENSION};
use crate::quantize::dequantize_f32;

/// Minimum number of output pixels (width * height) before decoding switches
/// to row-parallel rayon dispatch.
#[cfg(feature = "parallel")]
const PARALLEL_PIXEL_THRESHOLD: usize = 4096; // ~64x64

/// Extract `(components_x, components_y)` from a BlurHash string's header
/// byte, without decoding the rest of it.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidHashLength`] if `hash` is shorter than
/// the 6-character minimum (header + DC).
///
/// # Examples
///
/// ```
/// use blurhash::decode::components;
/// let (cx, cy) = components("LEHV6nWB2yk8pyo0adR*.7kCMdnj").unwrap();
/// assert_eq!((cx, cy), (4, 3));
/// ```
pub fn components(hash: &str) -> Result<(u32, u32), BlurhashError> {
    if hash.len() < 6 {
        return Err(BlurhashError::InvalidHashLength {
            expected: 6,
            actual: hash.len(),
        });
    }
    let size_info = base83::decode(&hash[0..1])?;
    let size_y = (size_info / 9) + 1;
    let size_x = (size_info % 9) + 1;
    Ok((size_x as u32, size_y as u32))
}

/// Decode `hash` (with any `<W:H>` prefix already stripped) into a
/// [`PixelMap`] of exactly `width` x `height` pixels.
///
/// `punch` scales the AC range, boosting (`> 1.0`) or reducing (`< 1.0`)
/// contrast in the reconstructed image; `1.0` reproduces the algorithm as
/// specified.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidDimensions`] if `width` or `height` is
/// zero or exceeds the crate's maximum, and
/// [`BlurhashError::InvalidHashLength`] if `hash`'s length doesn't match the
/// component counts declared by its header byte.
///
/// # Examples
///
/// ```
/// use blurhash::decode::decode_pixels;
/// let pixels = decode_pixels("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 32, 32, 1.0).unwrap();
/// assert_eq!(pixels.pixels().len(), 32 * 32 * 3);
/// ```
pub fn decode_pixels(
    hash: &str,
    width: u32,
    height: u32,
    punch: f64,
) -> Result<PixelMap, BlurhashError> {
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
    if hash.len() < 6 {
        return Err(BlurhashError::InvalidHashLength {
            expected: 6,
            actual: hash.len(),
        });
    }

    let size_info = base83::decode(&hash[0..1])?;
    let size_y = (size_info / 9) + 1;
    let size_x = (size_info % 9) + 1;

    let expected_len = 4 + 2 * (size_x * size_y) as usize;
    if hash.len() != expected_len {
        return Err(BlurhashError::InvalidHashLength {
            expected: expected_len,
            actual: hash.len(),
        });
    }

    let quant_max_value = base83::decode(&hash[1..2])?;
    let real_max_value = (quant_max_value as f32 + 1.0) / 166.0 * punch as f32;

    let dc_value = base83::decode(&hash[2..6])?;
    let dc_r = srgb_to_linear_f32(((dc_value >> 16) & 255) as u8);
    let dc_g = srgb_to_linear_f32(((dc_value >> 8) & 255) as u8);
    let dc_b = srgb_to_linear_f32((dc_value & 255) as u8);

    let sx = size_x as usize;
    let sy = size_y as usize;
    let num_components = sx * sy;

    // colours[idx] = [r, g, b] for component idx = i + j * size_x.
    let mut colours = vec![[0.0f32; 3]; num_components];
    colours[0] = [dc_r, dc_g, dc_b];

    for component_idx in 1..num_components {
        let start = 4 + component_idx * 2;
        let ac_value = base83::decode(&hash[start..start + 2])?;

        let quant_r = ac_value / (19 * 19);
        let quant_g = (ac_value / 19) % 19;
        let quant_b = ac_value % 19;

        colours[component_idx] = [
            dequantize_f32(quant_r) * real_max_value,
            dequantize_f32(quant_g) * real_max_value,
            dequantize_f32(quant_b) * real_max_value,
        ];
    }

    let w = width as usize;
    let h = height as usize;
    let wf = width as f32;
    let hf = height as f32;

    // cos_x_table[i * w + x] = cos(PI * x * i / width)
    let mut cos_x_table = vec![0.0f32; sx * w];
    for i in 0..sx {
        let base = i * w;
        for x in 0..w {
            cos_x_table[base + x] = (PI * x as f32 * i as f32 / wf).cos();
        }
    }

    // cos_y_table[j * h + y] = cos(PI * y * j / height)
    let mut cos_y_table = vec![0.0f32; sy * h];
    for j in 0..sy {
        let base = j * h;
        for y in 0..h {
            cos_y_table[base + y] = (PI * y as f32 * j as f32 / hf).cos();
        }
    }

    // Separable inverse DCT, pass 1: sum over i for each (component row j,
    // pixel column x). partial_c[j * w + x] = sum_i(colours[j*sx+i][c] * cos_x[i*w+x]).
    let mut partial_r = vec![0.0f32; sy * w];
    let mut partial_g = vec![0.0f32; sy * w];
    let mut partial_b = vec![0.0f32; sy * w];

    for j in 0..sy {
        let colour_row_base = j * sx;
        let partial_row_base = j * w;
        for x in 0..w {
            let mut sr = 0.0f32;
            let mut sg = 0.0f32;
            let mut sb = 0.0f32;
            for i in 0..sx {
                let cos_val = cos_x_table[i * w + x];
                let colour = colours[colour_row_base + i];
                sr += colour[0] * cos_val;
                sg += colour[1] * cos_val;
                sb += colour[2] * cos_val;
            }
            partial_r[partial_row_base + x] = sr;
            partial_g[partial_row_base + x] = sg;
            partial_b[partial_row_base + x] = sb;
        }
    }

    // Pass 2: sum over j for each pixel (x, y), then convert to sRGB.
    let mut result = vec![0u8; w * h * 3];

    // cos_y_per_row[y * sy + j] = cos_y_table[j * h + y], gathered so pass 2
    // walks each row's cos_y values contiguously.
    let cos_y_per_row: Vec<f32> = {
        let mut table = vec![0.0f32; h * sy];
        for y in 0..h {
            for j in 0..sy {
                table[y * sy + j] = cos_y_table[j * h + y];
            }
        }
        table
    };

    let decode_row = |y: usize, row: &mut [u8]| {
        let cos_y_vals = &cos_y_per_row[y * sy..(y + 1) * sy];

        #[cfg(feature = "simd")]
        {
            crate::simd::decode_accumulate_row(
                cos_y_vals,
                &partial_r,
                &partial_g,
                &partial_b,
                w,
                sy,
                row,
                linear_to_srgb_f32,
            );
        }

        #[cfg(not(feature = "simd"))]
        {
            for x in 0..w {
                let mut pr = 0.0f32;
                let mut pg = 0.0f32;
                let mut pb = 0.0f32;
                for j in 0..sy {
                    let cy = cos_y_vals[j];
                    let idx = j * w + x;
                    pr += cy * partial_r[idx];
                    pg += cy * partial_g[idx];
                    pb += cy * partial_b[idx];
                }
                let idx = x * 3;
                row[idx] = linear_to_srgb_f32(pr);
                row[idx + 1] = linear_to_srgb_f32(pg);
                row[idx + 2] = linear_to_srgb_f32(pb);
            }
        }
    };

    let row_bytes = w * 3;

    #[cfg(feature = "parallel")]
    {
        if w * h >= PARALLEL_PIXEL_THRESHOLD {
            result
                .par_chunks_mut(row_bytes)
                .enumerate()
                .for_each(|(y, row)| decode_row(y, row));
        } else {
            for (y, row) in result.chunks_mut(row_bytes).enumerate() {
                decode_row(y, row);
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in result.chunks_mut(row_bytes).enumerate() {
            decode_row(y, row);
        }
    }

    PixelMap::new(result, width, height)
}
