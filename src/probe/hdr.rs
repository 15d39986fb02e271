#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::ProbeImage;
use thiserror::Error;

/// Failure decoding a Radiance HDR byte stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("not a Radiance HDR stream")]
    BadSignature,
    #[error("malformed header line: {0}")]
    BadHeader(String),
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),
    #[error("unsupported scanline orientation: {0}")]
    UnsupportedOrientation(String),
    #[error("malformed RLE scanline")]
    BadScanline,
    #[error("truncated pixel data")]
    Truncated,
    #[error("pixel buffer does not match image dimensions")]
    BufferSize,
}

/// Decodes a Radiance HDR (RGBE) stream into linear floating-point radiance.
///
/// Flat, old-style RLE and new-style (per-component) RLE scanlines are all
/// accepted; only the standard `-Y <h> +X <w>` orientation is supported.
pub fn decode_radiance(bytes: &[u8]) -> Result<ProbeImage, DecodeError> {
    let mut cursor = Cursor::new(bytes);

    if !cursor.take_line()?.starts_with("#?") {
        return Err(DecodeError::BadSignature);
    }

    let mut exposure = 1.0f32;
    let mut format = None;

    loop {
        let line = cursor.take_line()?;

        if line.is_empty() {
            break; // end of header
        }

        if line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some(("FORMAT", value)) => format = Some(value.trim().to_owned()),
            Some(("EXPOSURE", value)) => {
                let value: f32 = value
                    .trim()
                    .parse()
                    .map_err(|_| DecodeError::BadHeader(line.clone()))?;

                if value > 0.0 {
                    exposure *= value;
                }
            }
            Some(_) => continue, // unknown variables are legal
            None => return Err(DecodeError::BadHeader(line)),
        }
    }

    match format.as_deref() {
        Some("32-bit_rle_rgbe") => {}
        Some(other) => return Err(DecodeError::UnsupportedFormat(other.to_owned())),
        None => return Err(DecodeError::UnsupportedFormat(String::from("missing"))),
    }

    let resolution = cursor.take_line()?;
    let fields: Vec<&str> = resolution.split_whitespace().collect();

    let (height, width) = match fields.as_slice() {
        ["-Y", h, "+X", w] => {
            let h: usize = h.parse().map_err(|_| DecodeError::BadHeader(resolution.clone()))?;
            let w: usize = w.parse().map_err(|_| DecodeError::BadHeader(resolution.clone()))?;
            (h, w)
        }
        _ => return Err(DecodeError::UnsupportedOrientation(resolution)),
    };

    if width == 0 || height == 0 {
        return Err(DecodeError::BadHeader(resolution));
    }

    let mut pixels = Vec::with_capacity(width * height * 3);
    let mut scanline = vec![0u8; width * 4];

    for _ in 0..height {
        read_scanline(&mut cursor, width, &mut scanline)?;

        for rgbe in scanline.chunks_exact(4) {
            let [r, g, b] = rgbe_to_linear([rgbe[0], rgbe[1], rgbe[2], rgbe[3]]);

            pixels.push(r / exposure);
            pixels.push(g / exposure);
            pixels.push(b / exposure);
        }
    }

    ProbeImage::from_pixels(width, height, 3, pixels)
}

/// Encodes linear RGB radiance as a Radiance HDR byte stream.
///
/// Scanlines in the RLE-eligible width range are written as new-style RLE
/// (literal runs only); anything else is written flat. The stream decodes
/// back to the input within RGBE mantissa precision.
pub fn encode_radiance(width: usize, height: usize, pixels: &[f32]) -> Result<Vec<u8>, DecodeError> {
    if width == 0 || height == 0 || pixels.len() != width * height * 3 {
        return Err(DecodeError::BufferSize);
    }

    let mut out = Vec::with_capacity(width * height * 4 + 64);

    out.extend_from_slice(b"#?RADIANCE\n");
    out.extend_from_slice(b"FORMAT=32-bit_rle_rgbe\n");
    out.extend_from_slice(b"\n");
    out.extend_from_slice(format!("-Y {} +X {}\n", height, width).as_bytes());

    let rle = (8..=0x7fff).contains(&width);
    let mut scanline = vec![0u8; width * 4];

    for row in pixels.chunks_exact(width * 3) {
        for (rgbe, rgb) in scanline.chunks_exact_mut(4).zip(row.chunks_exact(3)) {
            rgbe.copy_from_slice(&linear_to_rgbe([rgb[0], rgb[1], rgb[2]]));
        }

        if rle {
            out.extend_from_slice(&[2, 2, (width >> 8) as u8, width as u8]);

            for component in 0..4 {
                let values: Vec<u8> = scanline[component..].iter().step_by(4).copied().collect();

                for run in values.chunks(128) {
                    out.push(run.len() as u8);
                    out.extend_from_slice(run);
                }
            }
        } else {
            out.extend_from_slice(&scanline);
        }
    }

    Ok(out)
}

/// Converts one RGBE sample to a linear float triple.
pub fn rgbe_to_linear(rgbe: [u8; 4]) -> [f32; 3] {
    if rgbe[3] == 0 {
        return [0.0, 0.0, 0.0];
    }

    let scale = (2.0f32).powi(rgbe[3] as i32 - 136);

    [
        rgbe[0] as f32 * scale,
        rgbe[1] as f32 * scale,
        rgbe[2] as f32 * scale,
    ]
}

/// Converts a linear float triple to its RGBE encoding.
pub fn linear_to_rgbe(rgb: [f32; 3]) -> [u8; 4] {
    let max = rgb[0].max(rgb[1]).max(rgb[2]);

    if max < 1e-32 {
        return [0, 0, 0, 0];
    }

    let exponent = (max.log2().floor() as i32 + 1).min(127);
    let scale = (2.0f32).powi(8 - exponent);

    let quantize = |value: f32| (value * scale).min(255.0).max(0.0) as u8;

    [
        quantize(rgb[0]),
        quantize(rgb[1]),
        quantize(rgb[2]),
        (exponent + 128) as u8,
    ]
}

fn read_scanline(
    cursor: &mut Cursor,
    width: usize,
    scanline: &mut [u8],
) -> Result<(), DecodeError> {
    if !(8..=0x7fff).contains(&width) {
        return read_flat_pixels(cursor, width, scanline);
    }

    let marker = cursor.peek4()?;

    if marker[0] != 2 || marker[1] != 2 {
        return read_flat_pixels(cursor, width, scanline);
    }

    if ((marker[2] as usize) << 8 | marker[3] as usize) != width {
        return Err(DecodeError::BadScanline);
    }

    cursor.skip(4)?;

    // New-style RLE stores each of the four components contiguously.

    for component in 0..4 {
        let mut filled = 0;

        while filled < width {
            let count = cursor.take()? as usize;

            if count > 128 {
                let run = count - 128;
                let value = cursor.take()?;

                if filled + run > width {
                    return Err(DecodeError::BadScanline);
                }

                for _ in 0..run {
                    scanline[filled * 4 + component] = value;
                    filled += 1;
                }
            } else if count > 0 {
                if filled + count > width {
                    return Err(DecodeError::BadScanline);
                }

                for _ in 0..count {
                    scanline[filled * 4 + component] = cursor.take()?;
                    filled += 1;
                }
            } else {
                return Err(DecodeError::BadScanline);
            }
        }
    }

    Ok(())
}

fn read_flat_pixels(
    cursor: &mut Cursor,
    width: usize,
    scanline: &mut [u8],
) -> Result<(), DecodeError> {
    let mut filled = 0;
    let mut repeat_shift = 0u32;

    while filled < width {
        let rgbe = cursor.take4()?;

        // Old-style RLE marks a repeat of the previous pixel with (1, 1, 1).

        if rgbe[0] == 1 && rgbe[1] == 1 && rgbe[2] == 1 {
            if filled == 0 {
                return Err(DecodeError::BadScanline);
            }

            let run = (rgbe[3] as usize) << repeat_shift;

            if filled + run > width {
                return Err(DecodeError::BadScanline);
            }

            let previous = [
                scanline[filled * 4 - 4],
                scanline[filled * 4 - 3],
                scanline[filled * 4 - 2],
                scanline[filled * 4 - 1],
            ];

            for _ in 0..run {
                scanline[filled * 4..filled * 4 + 4].copy_from_slice(&previous);
                filled += 1;
            }

            repeat_shift += 8;
        } else {
            scanline[filled * 4..filled * 4 + 4].copy_from_slice(&rgbe);
            filled += 1;
            repeat_shift = 0;
        }
    }

    Ok(())
}

struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn take(&mut self) -> Result<u8, DecodeError> {
        let byte = *self
            .bytes
            .get(self.position)
            .ok_or(DecodeError::Truncated)?;

        self.position += 1;

        Ok(byte)
    }

    fn take4(&mut self) -> Result<[u8; 4], DecodeError> {
        let bytes = self.peek4()?;
        self.position += 4;

        Ok(bytes)
    }

    fn peek4(&self) -> Result<[u8; 4], DecodeError> {
        match self.bytes.get(self.position..self.position + 4) {
            Some(&[a, b, c, d]) => Ok([a, b, c, d]),
            _ => Err(DecodeError::Truncated),
        }
    }

    fn skip(&mut self, count: usize) -> Result<(), DecodeError> {
        if self.position + count > self.bytes.len() {
            return Err(DecodeError::Truncated);
        }

        self.position += count;

        Ok(())
    }

    fn take_line(&mut self) -> Result<String, DecodeError> {
        let mut line = Vec::new();

        loop {
            match self.take()? {
                b'\n' => break,
                byte => line.push(byte),
            }

            if line.len() > 256 {
                return Err(DecodeError::BadHeader(String::from("oversized line")));
            }
        }

        String::from_utf8(line).map_err(|_| DecodeError::BadHeader(String::from("not text")))
    }
}
