//! BlurHash encoding: project an RGB image onto a 2D DCT basis and quantise
//! the resulting coefficients into a base83 string.

use std::f64::consts::PI;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::base83;
use crate::color::{linear_to_srgb, srgb_to_linear};
use crate::error::BlurhashError;
use crate::pixel::{Component, LinearMap, PixelMap};
use crate::quantize::quantize;

fn validate_components(components_x: u32, components_y: u32) -> Result<(), BlurhashError> {
    if !(1..=9).contains(&components_x) {
        return Err(BlurhashError::InvalidComponentCount {
            component: "x",
            value: components_x,
        });
    }
    if !(1..=9).contains(&components_y) {
        return Err(BlurhashError::InvalidComponentCount {
            component: "y",
            value: components_y,
        });
    }
    Ok(())
}

/// Encode an sRGB [`PixelMap`] into a BlurHash string with `components_x`
/// horizontal and `components_y` vertical DCT components.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidComponentCount`] if either component
/// count falls outside `1..=9`.
///
/// # Examples
///
/// ```
/// use blurhash::encode::encode_pixels;
/// use blurhash::PixelMap;
///
/// let pixels = PixelMap::new(vec![255, 0, 0].repeat(4), 2, 2).unwrap();
/// let hash = encode_pixels(&pixels, 4, 3).unwrap();
/// assert!(!hash.is_empty());
/// ```
pub fn encode_pixels(
    pixels: &PixelMap,
    components_x: u32,
    components_y: u32,
) -> Result<String, BlurhashError> {
    validate_components(components_x, components_y)?;
    let width = pixels.width() as usize;
    let height = pixels.height() as usize;
    let raw = pixels.pixels();
    let linear_pixels: Vec<[f64; 3]> = (0..width * height)
        .map(|idx| {
            let base = idx * 3;
            [
                srgb_to_linear(raw[base]),
                srgb_to_linear(raw[base + 1]),
                srgb_to_linear(raw[base + 2]),
            ]
        })
        .collect();
    encode_from_linear(&linear_pixels, width, height, components_x, components_y)
}

/// Encode a pre-linearised [`LinearMap`] into a BlurHash string, skipping
/// the sRGB-to-linear conversion step `encode_pixels` performs internally.
///
/// # Errors
///
/// Returns [`BlurhashError::InvalidComponentCount`] under the same
/// conditions as [`encode_pixels`].
pub fn encode_linear(
    map: &LinearMap,
    components_x: u32,
    components_y: u32,
) -> Result<String, BlurhashError> {
    validate_components(components_x, components_y)?;
    let width = map.width() as usize;
    let height = map.height() as usize;
    let raw = map.pixels();
    let linear_pixels: Vec<[f64; 3]> = (0..width * height)
        .map(|idx| {
            let base = idx * 3;
            [
                raw[base] as f64,
                raw[base + 1] as f64,
                raw[base + 2] as f64,
            ]
        })
        .collect();
    encode_from_linear(&linear_pixels, width, height, components_x, components_y)
}

fn encode_from_linear(
    linear_pixels: &[[f64; 3]],
    width: usize,
    height: usize,
    components_x: u32,
    components_y: u32,
) -> Result<String, BlurhashError> {
    let wf = width as f64;
    let hf = height as f64;
    let cx = components_x as usize;
    let cy = components_y as usize;

    // cos_x[i][x] = cos(PI * i * x / width), cos_y[j][y] analogous.
    let cos_x: Vec<Vec<f64>> = (0..cx)
        .map(|i| {
            (0..width)
                .map(|x| (PI * i as f64 * x as f64 / wf).cos())
                .collect()
        })
        .collect();
    let cos_y: Vec<Vec<f64>> = (0..cy)
        .map(|j| {
            (0..height)
                .map(|y| (PI * j as f64 * y as f64 / hf).cos())
                .collect()
        })
        .collect();

    let scale = 1.0 / (wf * hf);

    let compute_one = |idx: usize| -> Component {
        let i = idx % cx;
        let j = idx / cx;
        let norm_factor = if i == 0 && j == 0 { 1.0 } else { 2.0 };
        let cos_x_row = &cos_x[i];
        let cos_y_row = &cos_y[j];

        let mut r_sum = 0.0f64;
        let mut g_sum = 0.0f64;
        let mut b_sum = 0.0f64;
        for (y, &cos_y_val) in cos_y_row.iter().enumerate() {
            let row_offset = y * width;
            for (x, &cos_x_val) in cos_x_row.iter().enumerate() {
                let basis = norm_factor * cos_x_val * cos_y_val;
                let px = &linear_pixels[row_offset + x];
                r_sum += basis * px[0];
                g_sum += basis * px[1];
                b_sum += basis * px[2];
            }
        }

        Component {
            r: r_sum * scale,
            g: g_sum * scale,
            b: b_sum * scale,
        }
    };

    let num_components = cx * cy;

    #[cfg(feature = "parallel")]
    let components: Vec<Component> = (0..num_components).into_par_iter().map(compute_one).collect();
    #[cfg(not(feature = "parallel"))]
    let components: Vec<Component> = (0..num_components).map(compute_one).collect();

    assemble(&components, components_x, components_y)
}

/// Quantise a full component grid and assemble the base83 BlurHash string.
/// `components[0]` is the DC term; the rest are AC terms in row-major
/// `(i, j)` order.
fn assemble(
    components: &[Component],
    components_x: u32,
    components_y: u32,
) -> Result<String, BlurhashError> {
    let dc = components[0];
    let dc_value = ((linear_to_srgb(dc.r) as u64) << 16)
        | ((linear_to_srgb(dc.g) as u64) << 8)
        | (linear_to_srgb(dc.b) as u64);

    let max_ac_component = components[1..]
        .iter()
        .map(Component::abs_max)
        .fold(0.0f64, f64::max);
    let quant_max_ac = (max_ac_component * 166.0 - 0.5)
        .floor()
        .clamp(0.0, 82.0) as u64;
    let ac_norm = (quant_max_ac as f64 + 1.0) / 166.0;

    let mut ac_values: Vec<u64> = Vec::with_capacity(components.len() - 1);
    for c in &components[1..] {
        let qr = quantize(c.r / ac_norm);
        let qg = quantize(c.g / ac_norm);
        let qb = quantize(c.b / ac_norm);
        ac_values.push(qr * 19 * 19 + qg * 19 + qb);
    }

    let size_flag = (components_x - 1) + (components_y - 1) * 9;
    let estimated_len = 4 + 2 * components.len();
    let mut result = String::with_capacity(estimated_len);

    result.push_str(&base83::encode(size_flag as u64, 1)?);
    result.push_str(&base83::encode(quant_max_ac, 1)?);
    result.push_str(&base83::encode(dc_value, 4)?);
    for ac_value in &ac_values {
        result.push_str(&base83::encode(*ac_value, 2)?);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: [u8; 3], width: u32, height: u32) -> PixelMap {
        let mut pixels = vec![0u8; (width * height * 3) as usize];
        for px in pixels.chunks_mut(3) {
            px.copy_from_slice(&color);
        }
        PixelMap::new(pixels, width, height).unwrap()
    }

    #[test]
    fn test_encode_solid_black() {
        let pixels = solid([0, 0, 0], 4, 4);
        let hash = encode_pixels(&pixels, 4, 3).unwrap();
        assert!(!hash.is_empty());
        // Size flag for 4x3: (4-1) + (3-1)*9 = 21.
        let size_info = base83::decode(&hash[0..1]).unwrap();
        assert_eq!(size_info, 21);
    }

    #[test]
    fn test_encode_solid_white() {
        let pixels = solid([255, 255, 255], 4, 4);
        let hash = encode_pixels(&pixels, 4, 3).unwrap();
        assert!(!hash.is_empty());
    }

    #[test]
    fn test_encode_solid_red_length() {
        let pixels = solid([255, 0, 0], 2, 2);
        let hash = encode_pixels(&pixels, 4, 3).unwrap();
        assert_eq!(hash.len(), 4 + 2 * 4 * 3);
    }

    #[test]
    fn test_encode_component_count_validation() {
        let pixels = solid([0, 0, 0], 4, 4);
        assert!(encode_pixels(&pixels, 0, 3).is_err());
        assert!(encode_pixels(&pixels, 10, 3).is_err());
        assert!(encode_pixels(&pixels, 4, 0).is_err());
        assert!(encode_pixels(&pixels, 4, 10).is_err());
    }

    #[test]
    fn test_encode_hash_length() {
        let pixels = solid([128, 128, 128], 4, 4);
        let hash = encode_pixels(&pixels, 4, 3).unwrap();
        assert_eq!(hash.len(), 28);
    }

    #[test]
    fn test_encode_1x1_components() {
        let pixels = solid([100, 100, 100], 2, 2);
        let hash = encode_pixels(&pixels, 1, 1).unwrap();
        assert_eq!(hash.len(), 6);
    }

    #[test]
    fn test_encode_gradient() {
        let mut pixels = vec![0u8; 8 * 3];
        for x in 0..8 {
            let val = (x * 32).min(255) as u8;
            pixels[x * 3] = val;
            pixels[x * 3 + 1] = val;
            pixels[x * 3 + 2] = val;
        }
        let map = PixelMap::new(pixels, 8, 1).unwrap();
        let hash = encode_pixels(&map, 4, 1).unwrap();
        assert!(!hash.is_empty());
    }

    #[test]
    fn test_encode_linear_matches_manual_gamma() {
        // A mid-gray sRGB image should encode the same way through either
        // entry point, since encode_linear's input is just encode_pixels's
        // gamma step done ahead of time.
        let pixels = solid([128, 128, 128], 4, 4);
        let via_pixels = encode_pixels(&pixels, 3, 3).unwrap();

        let linear_value = srgb_to_linear(128) as f32;
        let linear = LinearMap::new(vec![linear_value; 4 * 4 * 3], 4, 4).unwrap();
        let via_linear = encode_linear(&linear, 3, 3).unwrap();

        assert_eq!(via_pixels, via_linear);
    }
}
