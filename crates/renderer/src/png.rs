//! PNG encoding for RGBA image data.
//!
//! Two encodings:
//! - **Indexed PNG (color type 3)** when the image has at most 256 unique
//!   colors. Colorized bitmaps of smooth fields usually do not, but legends
//!   and flat layers do.
//! - **RGBA PNG (color type 6)** otherwise.

use std::collections::HashMap;
use std::io::Write;

use fixedgrid_common::{ViewerError, ViewerResult};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

type Rgba = (u8, u8, u8, u8);

/// Encode straight-alpha RGBA pixels, choosing indexed output when the
/// colors fit in a palette.
pub fn encode_png_auto(pixels: &[u8], width: usize, height: usize) -> ViewerResult<Vec<u8>> {
    check_len(pixels.len(), width, height, 4)?;
    match extract_palette(pixels) {
        Some((palette, indices)) => encode_png_indexed(width, height, &palette, &indices),
        None => encode_png_rgba(pixels, width, height),
    }
}

/// Encode a tiny-skia pixmap. The pixmap stores premultiplied alpha; PNG
/// wants straight alpha, so every pixel is demultiplied first.
pub fn encode_pixmap(pixmap: &tiny_skia::Pixmap) -> ViewerResult<Vec<u8>> {
    let mut pixels = Vec::with_capacity(pixmap.data().len());
    for p in pixmap.pixels() {
        let c = p.demultiply();
        pixels.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    encode_png_auto(&pixels, pixmap.width() as usize, pixmap.height() as usize)
}

fn check_len(actual: usize, width: usize, height: usize, bytes_per_pixel: usize) -> ViewerResult<()> {
    if width == 0 || height == 0 {
        return Err(ViewerError::EncodeError(format!(
            "cannot encode empty image {}x{}",
            width, height
        )));
    }
    let expected = width * height * bytes_per_pixel;
    if actual != expected {
        return Err(ViewerError::EncodeError(format!(
            "pixel buffer is {} bytes, expected {} for {}x{}",
            actual, expected, width, height
        )));
    }
    Ok(())
}

/// Pack RGBA bytes into a u32 for faster hashing
#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24)
}

/// Palette and per-pixel indices, or None when there are too many colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<Rgba>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<Rgba> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);
        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push((chunk[0], chunk[1], chunk[2], chunk[3]));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Encode an indexed PNG (color type 3) from palette and indices.
pub fn encode_png_indexed(
    width: usize,
    height: usize,
    palette: &[Rgba],
    indices: &[u8],
) -> ViewerResult<Vec<u8>> {
    check_len(indices.len(), width, height, 1)?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(ViewerError::EncodeError(format!(
            "palette has {} entries",
            palette.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|&(r, g, b, _)| [r, g, b]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only when some entry is not opaque
    if palette.iter().any(|&(_, _, _, a)| a < 255) {
        let trns: Vec<u8> = palette.iter().map(|&(_, _, _, a)| a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    write_chunk(&mut png, b"IDAT", &deflate_scanlines(indices, width, height)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode an RGBA PNG (color type 6).
pub fn encode_png_rgba(pixels: &[u8], width: usize, height: usize) -> ViewerResult<Vec<u8>> {
    check_len(pixels.len(), width, height, 4)?;

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));
    write_chunk(&mut png, b"IDAT", &deflate_scanlines(pixels, width * 4, height)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix every `row_bytes` scanline with filter type 0 and zlib it.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> ViewerResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&uncompressed)
        .and_then(|_| encoder.finish())
        .map_err(|e| ViewerError::EncodeError(format!("IDAT compression failed: {}", e)))
}
