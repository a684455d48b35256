//! BlurHash Demo - Encode and decode example
//!
//! Run with: cargo run --example demo

use blurhash::{decode, decode_to_pixels, encode, Orientation, PixelMap, Ratio, Source};

fn main() {
    // Surfaces the `log::warn!` that `clamp_resolution` emits below; run
    // with `RUST_LOG=warn` to see it on stderr.
    env_logger::init();

    println!("=== BlurHash Demo ===\n");

    // Create a simple 16x9 gradient image (RGB), landscape so the aspect
    // helper and size prefix both have something interesting to do.
    let width = 16u32;
    let height = 9u32;
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);

    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / (width - 1) as f32) * 255.0) as u8;
            let g = ((y as f32 / (height - 1) as f32) * 255.0) as u8;
            let b = 128;
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
        }
    }
    let image = PixelMap::new(pixels, width, height).expect("valid pixel buffer");

    println!("1. Created a {width}x{height} gradient image");
    println!("   Orientation: {:?}", Orientation::of(width, height));
    println!("   Pixels (first 12 bytes): {:?}...\n", &image.pixels()[..12]);

    // Encode with inferred components and a size prefix, so a later decode
    // doesn't need to remember the source dimensions separately.
    let hash = encode(Source::Pixels(image), Ratio::Infer, true).expect("failed to encode");

    println!("2. Encoded to BlurHash: {hash}");
    println!("   Hash length: {} characters\n", hash.len());

    let (cx, cy) = blurhash::decode::components(&hash).expect("failed to read components");
    println!("3. Extracted components from hash: {cx}x{cy}\n");

    // Decode back at the source resolution using the facade, which reads
    // width/height straight off the <W:H> prefix.
    let punch = 1.0;
    let decoded = decode(&hash, None, None, punch).expect("failed to decode");

    println!(
        "4. Decoded to {}x{} image ({} bytes) using the <W:H> prefix",
        decoded.width(),
        decoded.height(),
        decoded.pixels().len()
    );
    println!(
        "   First pixel RGB: ({}, {}, {})",
        decoded.pixels()[0],
        decoded.pixels()[1],
        decoded.pixels()[2]
    );

    // Decode again at a different resolution, preserving the aspect ratio.
    let thumbnail = decode_to_pixels(&hash, 64).expect("failed to decode thumbnail");
    println!(
        "5. Decoded a {}x{} thumbnail preserving aspect ratio",
        thumbnail.width(),
        thumbnail.height()
    );

    // Asking for a resolution outside [MIN_RESOLUTION, MAX_RESOLUTION] is
    // clamped rather than rejected; clamp_resolution logs a warning when it
    // does so.
    let oversized = decode_to_pixels(&hash, 5_000).expect("failed to decode oversized thumbnail");
    println!(
        "6. Requested resolution 5000 was clamped to produce a {}x{} thumbnail (see warning log)",
        oversized.width(),
        oversized.height()
    );

    println!("\n=== Demo Complete ===");
}
