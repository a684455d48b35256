//! Auto-vectorizable inner loops for BlurHash encode/decode.
//!
//! These are the hot multiply-accumulate loops in the separable DCT,
//! written as plain safe Rust over contiguous slices. LLVM vectorizes
//! stride-1 float reductions like these on every target, so there is no
//! need to hand-write architecture-specific intrinsics to get the benefit.

/// Compute the dot product of `cos_row[0..len]` and `pixel_row[0..len]`.
///
/// This is the encode pass-1 inner loop:
///   partial = sum_x(cos_x[i*w + x] * linear_channel[y*w + x])
#[inline]
pub fn dot_product_f32(cos_row: &[f32], pixel_row: &[f32], len: usize) -> f32 {
    debug_assert!(cos_row.len() >= len);
    debug_assert!(pixel_row.len() >= len);
    cos_row[..len]
        .iter()
        .zip(&pixel_row[..len])
        .map(|(&c, &p)| c * p)
        .sum()
}

/// Compute three dot products simultaneously (one per color channel).
///
/// Returns `(sum_r, sum_g, sum_b)` where `sum_c = sum_x(cos_row[x] *
/// channel[x])` for `c` in `{r, g, b}`.
#[inline]
pub fn dot_product_3ch_f32(
    cos_row: &[f32],
    r_row: &[f32],
    g_row: &[f32],
    b_row: &[f32],
    len: usize,
) -> (f32, f32, f32) {
    debug_assert!(cos_row.len() >= len);
    debug_assert!(r_row.len() >= len);
    debug_assert!(g_row.len() >= len);
    debug_assert!(b_row.len() >= len);

    let mut sr = 0.0f32;
    let mut sg = 0.0f32;
    let mut sb = 0.0f32;
    for i in 0..len {
        let c = cos_row[i];
        sr += c * r_row[i];
        sg += c * g_row[i];
        sb += c * b_row[i];
    }
    (sr, sg, sb)
}

/// For each `x` in `0..width`, accumulate the second DCT pass:
///   out_r[x] = sum_j(cos_y_vals[j] * partial_r[j * width + x])
///   out_g[x] = sum_j(cos_y_vals[j] * partial_g[j * width + x])
///   out_b[x] = sum_j(cos_y_vals[j] * partial_b[j * width + x])
/// and write the converted sRGB bytes into `out_rgb` as interleaved
/// `[R, G, B, R, G, B, ...]`.
#[inline]
pub fn decode_accumulate_row(
    cos_y_vals: &[f32],
    partial_r: &[f32],
    partial_g: &[f32],
    partial_b: &[f32],
    width: usize,
    num_j: usize,
    out_rgb: &mut [u8],
    linear_to_srgb_fn: fn(f32) -> u8,
) {
    debug_assert!(cos_y_vals.len() >= num_j);
    debug_assert!(out_rgb.len() >= width * 3);

    for x in 0..width {
        let mut pr = 0.0f32;
        let mut pg = 0.0f32;
        let mut pb = 0.0f32;
        for j in 0..num_j {
            let cy = cos_y_vals[j];
            let idx = j * width + x;
            pr += cy * partial_r[idx];
            pg += cy * partial_g[idx];
            pb += cy * partial_b[idx];
        }
        let out_idx = x * 3;
        out_rgb[out_idx] = linear_to_srgb_fn(pr);
        out_rgb[out_idx + 1] = linear_to_srgb_fn(pg);
        out_rgb[out_idx + 2] = linear_to_srgb_fn(pb);
    }
}
