//! Loading the source picture. Binary PGM files get a strict header check; anything else goes
//! through the `image` crate.

use std::{io::Cursor, path::Path};

use log::info;

use crate::error::{NtscError, NtscResult};
use crate::ntsc::{ACTIVE_LINE_SAMPLES, IMAGE_HEIGHT};
use crate::types::Raster;

const PGM_MAGIC: &[u8] = b"P5";
const PGM_MAXVAL: usize = 255;

/// An owned grayscale picture whose dimensions already match the frame geometry.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Load a picture from disk, picking the PGM path or the `image` path by its magic bytes.
    pub fn load(path: impl AsRef<Path>) -> NtscResult<Self> {
        let path = path.as_ref();
        let buf = std::fs::read(path)?;
        info!("loaded {} ({} bytes)", path.display(), buf.len());

        if buf.starts_with(PGM_MAGIC) {
            Self::from_pgm_bytes(&buf)
        } else {
            Self::from_image_buf(&buf)
        }
    }

    /// Parse a binary PGM: `P5 <width> <height> 255\n` followed by exactly width × height bytes.
    pub fn from_pgm_bytes(buf: &[u8]) -> NtscResult<Self> {
        let mut header = HeaderReader { buf, pos: 0 };

        let magic = header.token("format token")?;
        if magic != PGM_MAGIC {
            return Err(NtscError::header(format!(
                "expected format token P5, found {:?}",
                String::from_utf8_lossy(magic)
            )));
        }

        let width = header.number("width")?;
        let height = header.number("height")?;
        let maxval = header.number("maximum value")?;

        if width != ACTIVE_LINE_SAMPLES {
            return Err(NtscError::Width {
                actual: width,
                expected: ACTIVE_LINE_SAMPLES,
            });
        }
        if height != IMAGE_HEIGHT {
            return Err(NtscError::Height {
                actual: height,
                expected: IMAGE_HEIGHT,
            });
        }
        if maxval != PGM_MAXVAL {
            return Err(NtscError::header(format!(
                "maximum value is {maxval} instead of {PGM_MAXVAL}"
            )));
        }

        match buf.get(header.pos) {
            Some(b'\n') => {}
            Some(&b) => {
                return Err(NtscError::header(format!(
                    "unexpected byte ({b}) where beginning of image should be"
                )))
            }
            None => return Err(NtscError::header("header ends before the image data")),
        }

        let payload = &buf[header.pos + 1..];
        Raster::new(payload, width, height)?;

        Ok(Self {
            pixels: payload.to_vec(),
        })
    }

    /// Decode any format the `image` crate recognizes and convert it to 8-bit luma.
    pub fn from_image_buf(buf: &[u8]) -> NtscResult<Self> {
        let img = image::io::Reader::new(Cursor::new(buf))
            .with_guessed_format()?
            .decode()?
            .into_luma8();

        Raster::from_gray_image(&img)?;

        Ok(Self {
            pixels: img.into_raw(),
        })
    }

    /// Build from an in-memory grayscale image.
    pub fn from_gray_image(img: image::GrayImage) -> NtscResult<Self> {
        Raster::from_gray_image(&img)?;
        Ok(Self {
            pixels: img.into_raw(),
        })
    }

    /// Borrow as the read-only view the encoder consumes.
    pub fn raster(&self) -> Raster<'_> {
        Raster::from_checked(&self.pixels)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Encode a picture as a binary PGM with the header `from_pgm_bytes` expects.
pub fn encode_pgm(width: usize, height: usize, pixels: &[u8]) -> Vec<u8> {
    let mut out = format!("P5 {width} {height} {PGM_MAXVAL}\n").into_bytes();
    out.extend_from_slice(pixels);
    out
}

/// Whitespace-separated header tokens, stopping right after the last one.
struct HeaderReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn token(&mut self, what: &str) -> NtscResult<&'a [u8]> {
        while self.buf.get(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }

        let start = self.pos;
        while self
            .buf
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace())
        {
            self.pos += 1;
        }

        if start == self.pos {
            return Err(NtscError::header(format!("missing {what}")));
        }
        Ok(&self.buf[start..self.pos])
    }

    fn number(&mut self, what: &str) -> NtscResult<usize> {
        let token = self.token(what)?;
        std::str::from_utf8(token)
            .ok()
            .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                NtscError::header(format!(
                    "{what} is not a number: {:?}",
                    String::from_utf8_lossy(token)
                ))
            })
    }
}
