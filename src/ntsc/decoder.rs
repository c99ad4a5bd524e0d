use image::GrayImage;
use log::debug;

use crate::error::{NtscError, NtscResult};
use crate::ntsc::*;
use crate::types::SampleValue;

/// The NTSC decoder, takes the samples of a synthesized frame and recovers the picture.
///
/// It trusts the frame's timing rather than locking onto sync, so it only understands frames laid
/// out by [`NtscEncoder`].
pub struct NtscDecoder;

impl NtscDecoder {
    /// Recover the grayscale image carried by a frame.
    pub fn decode_frame(samples: &[SampleValue]) -> NtscResult<GrayImage> {
        if samples.len() != FRAME_SAMPLES {
            return Err(NtscError::FrameLength {
                actual: samples.len(),
                expected: FRAME_SAMPLES,
            });
        }

        let mut pixels = vec![0u8; ACTIVE_LINE_SAMPLES * IMAGE_HEIGHT];

        for (field, parity) in samples
            .chunks_exact(FIELD_SAMPLES)
            .zip(FieldParity::FRAME_ORDER)
        {
            let picture = &field[parity.picture_offset()..];
            for (line, y) in picture.chunks_exact(SAMPLES_PER_LINE).zip(parity.rows()) {
                let row = &mut pixels[y * ACTIVE_LINE_SAMPLES..(y + 1) * ACTIVE_LINE_SAMPLES];
                for (pixel, &v) in row.iter_mut().zip(&line[HSYNC_SAMPLES..]) {
                    *pixel = to_intensity(v);
                }
            }
        }

        debug!("decoded {}x{} image", ACTIVE_LINE_SAMPLES, IMAGE_HEIGHT);

        GrayImage::from_raw(ACTIVE_LINE_SAMPLES as u32, IMAGE_HEIGHT as u32, pixels)
            .ok_or_else(|| NtscError::timing("decoded pixels do not fill the frame geometry"))
    }

    /// The fraction of samples sitting at the sync tip.
    pub fn sync_level_fraction(samples: &[SampleValue]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sync = samples.iter().filter(|&&v| v == SYNC_LEVEL).count();
        sync as f64 / samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Raster;

    #[test]
    fn decodes_what_was_encoded() {
        let tables = SyncTables::new().unwrap();
        let encoder = NtscEncoder::new(&tables);
        let pixels: Vec<u8> = (0..ACTIVE_LINE_SAMPLES * IMAGE_HEIGHT)
            .map(|i| ((i / ACTIVE_LINE_SAMPLES) ^ (i % ACTIVE_LINE_SAMPLES)) as u8)
            .collect();
        let image = Raster::new(&pixels, ACTIVE_LINE_SAMPLES, IMAGE_HEIGHT).unwrap();

        let frame = encoder.frame(&image).unwrap();
        let decoded = NtscDecoder::decode_frame(&frame).unwrap();
        assert_eq!(decoded.as_raw(), &pixels);
    }

    #[test]
    fn rejects_truncated_frame() {
        let err = NtscDecoder::decode_frame(&[BLACK_LEVEL; 100]).unwrap_err();
        assert!(matches!(err, NtscError::FrameLength { actual: 100, .. }));
    }

    #[test]
    fn sync_fraction() {
        assert_eq!(NtscDecoder::sync_level_fraction(&[]), 0.0);
        assert_eq!(
            NtscDecoder::sync_level_fraction(&[SYNC_LEVEL, BLACK_LEVEL]),
            0.5
        );
    }
}
