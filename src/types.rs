use crate::error::{NtscError, NtscResult};
use crate::ntsc::{ACTIVE_LINE_SAMPLES, IMAGE_HEIGHT};

/// The floating point type for signal samples. The output path consumes 32-bit floats, and the
/// voltage range only needs a few bits of precision, so f32 is plenty.
pub type SignalFloat = f32;

/// The value of a sample from the signal, in volts.
pub type SampleValue = SignalFloat;

/// A duration in microseconds. Timing is kept in f64 so that quarter-microsecond arithmetic
/// never picks up error before it is rounded to a sample count.
pub type Micros = f64;

/// A borrowed, row-major 8-bit grayscale image with the exact geometry of one frame.
///
/// Only constructible through [`Raster::new`], so holding one means the dimensions already
/// matched and synthesis cannot fail on the input.
#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    pixels: &'a [u8],
}

impl<'a> Raster<'a> {
    /// Wrap a pixel buffer, checking width, height and payload size against the frame geometry.
    pub fn new(pixels: &'a [u8], width: usize, height: usize) -> NtscResult<Self> {
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
        if pixels.len() != width * height {
            return Err(NtscError::PayloadSize {
                actual: pixels.len(),
                expected: width * height,
            });
        }

        Ok(Self { pixels })
    }

    /// Wrap a buffer whose size was already validated by one of the constructors above.
    pub(crate) fn from_checked(pixels: &'a [u8]) -> Self {
        debug_assert_eq!(pixels.len(), ACTIVE_LINE_SAMPLES * IMAGE_HEIGHT);
        Self { pixels }
    }

    /// Wrap an `image` grayscale buffer.
    pub fn from_gray_image(img: &'a image::GrayImage) -> NtscResult<Self> {
        Self::new(img.as_raw(), img.width() as usize, img.height() as usize)
    }

    pub fn width(&self) -> usize {
        ACTIVE_LINE_SAMPLES
    }

    pub fn height(&self) -> usize {
        IMAGE_HEIGHT
    }

    /// One row of pixels. Panics if `y` is out of range, like slice indexing.
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * ACTIVE_LINE_SAMPLES;
        &self.pixels[start..start + ACTIVE_LINE_SAMPLES]
    }

    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_geometry() {
        let buf = vec![7u8; ACTIVE_LINE_SAMPLES * IMAGE_HEIGHT];
        let raster = Raster::new(&buf, ACTIVE_LINE_SAMPLES, IMAGE_HEIGHT).unwrap();
        assert_eq!(raster.row(479).len(), ACTIVE_LINE_SAMPLES);
        assert_eq!(raster.row(3)[0], 7);
    }

    #[test]
    fn rejects_wrong_width() {
        let buf = vec![0u8; 211 * IMAGE_HEIGHT];
        let err = Raster::new(&buf, 211, IMAGE_HEIGHT).unwrap_err();
        assert!(matches!(err, NtscError::Width { actual: 211, expected: 210 }));
    }

    #[test]
    fn rejects_wrong_height() {
        let buf = vec![0u8; ACTIVE_LINE_SAMPLES * 240];
        let err = Raster::new(&buf, ACTIVE_LINE_SAMPLES, 240).unwrap_err();
        assert!(matches!(err, NtscError::Height { actual: 240, expected: 480 }));
    }

    #[test]
    fn rejects_short_payload() {
        let buf = vec![0u8; ACTIVE_LINE_SAMPLES * IMAGE_HEIGHT - 1];
        let err = Raster::new(&buf, ACTIVE_LINE_SAMPLES, IMAGE_HEIGHT).unwrap_err();
        assert!(matches!(err, NtscError::PayloadSize { .. }));
    }
}
