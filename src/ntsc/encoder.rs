use log::{debug, info};

use crate::error::{NtscError, NtscResult};
use crate::ntsc::*;
use crate::types::{Raster, SampleValue};

/// The NTSC encoder, turns a grayscale raster into the voltage samples of one interlaced
/// monochrome frame.
pub struct NtscEncoder<'t> {
    tables: &'t SyncTables,
}

impl<'t> NtscEncoder<'t> {
    /// Create an encoder reading its fixed waveforms from `tables`.
    pub fn new(tables: &'t SyncTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'t SyncTables {
        self.tables
    }

    /// The horizontal sync opening every scanline.
    pub fn hsync(&self) -> &'t [SampleValue] {
        self.tables.hsync()
    }

    /// A scanline carrying no picture: hsync followed by black.
    pub fn blanking_scanline(&self) -> &'t [SampleValue] {
        self.tables.blanking_scanline()
    }

    /// A scanline carrying one row of pixels, one sample per pixel.
    pub fn visible_scanline(&self, row: &[u8]) -> NtscResult<Vec<SampleValue>> {
        let mut line = Vec::with_capacity(SAMPLES_PER_LINE);
        self.write_visible_scanline(row, &mut line)?;
        Ok(line)
    }

    /// Append a visible scanline for `row` to `out`.
    pub fn write_visible_scanline(
        &self,
        row: &[u8],
        out: &mut Vec<SampleValue>,
    ) -> NtscResult<()> {
        if row.len() != ACTIVE_LINE_SAMPLES {
            return Err(NtscError::RowLength {
                actual: row.len(),
                expected: ACTIVE_LINE_SAMPLES,
            });
        }

        out.extend_from_slice(self.tables.hsync());
        out.extend(row.iter().map(|&p| self.tables.voltage(p)));
        Ok(())
    }

    /// Append one field of `image` to `out`, following the parity's layout.
    pub fn write_field(
        &self,
        image: &Raster,
        parity: FieldParity,
        out: &mut Vec<SampleValue>,
    ) -> NtscResult<()> {
        let start = out.len();

        for segment in parity.layout() {
            match segment {
                FieldSegment::VerticalSync => {
                    out.extend_from_slice(self.tables.pre_equalization());
                    out.extend_from_slice(self.tables.serration());
                    out.extend_from_slice(self.tables.post_equalization());
                }
                FieldSegment::Blanking(lines) => {
                    for _ in 0..lines {
                        out.extend_from_slice(self.tables.blanking_scanline());
                    }
                }
                FieldSegment::HalfLine => out.extend_from_slice(self.tables.half_line()),
                FieldSegment::Picture => {
                    for y in parity.rows() {
                        self.write_visible_scanline(image.row(y), out)?;
                    }
                }
            }
        }

        let written = out.len() - start;
        if written != FIELD_SAMPLES {
            return Err(NtscError::FrameLength {
                actual: written,
                expected: FIELD_SAMPLES,
            });
        }

        debug!("{parity:?} field: {written} samples");
        Ok(())
    }

    /// One field on its own.
    pub fn field(&self, image: &Raster, parity: FieldParity) -> NtscResult<Vec<SampleValue>> {
        let mut out = Vec::new();
        out.try_reserve_exact(FIELD_SAMPLES)?;
        self.write_field(image, parity, &mut out)?;
        Ok(out)
    }

    /// The first field: even-indexed image rows, half line after the picture.
    pub fn odd_field(&self, image: &Raster) -> NtscResult<Vec<SampleValue>> {
        self.field(image, FieldParity::Odd)
    }

    /// The second field: odd-indexed image rows, half line before the picture.
    pub fn even_field(&self, image: &Raster) -> NtscResult<Vec<SampleValue>> {
        self.field(image, FieldParity::Even)
    }

    /// The full 525-line frame, odd field then even field, in a buffer allocated once.
    pub fn frame(&self, image: &Raster) -> NtscResult<Vec<SampleValue>> {
        let mut out = Vec::new();
        out.try_reserve_exact(FRAME_SAMPLES)?;

        for parity in FieldParity::FRAME_ORDER {
            self.write_field(image, parity, &mut out)?;
        }

        if out.len() != FRAME_SAMPLES {
            return Err(NtscError::FrameLength {
                actual: out.len(),
                expected: FRAME_SAMPLES,
            });
        }

        info!("synthesized frame of {} samples", out.len());
        Ok(out)
    }
}
