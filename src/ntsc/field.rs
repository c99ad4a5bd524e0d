//! The interlace policy: which image rows each field carries and where each field puts its
//! half-line offset.

use std::iter::StepBy;
use std::ops::Range;

use crate::ntsc::*;

/// Blanking lines between the vertical sync block and the picture.
pub const LEADING_BLANK_LINES: usize = 2;

/// Blanking lines closing each field.
pub const TRAILING_BLANK_LINES: usize = 11;

/// One half of an interlaced frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldParity {
    /// The first field. Carries image rows 0, 2, 4, ... (picture lines 1, 3, 5, ...) and puts
    /// its half line after the picture.
    Odd,
    /// The second field. Carries image rows 1, 3, 5, ... and puts its half line before the
    /// picture, which staggers its lines halfway between the odd field's.
    Even,
}

/// Where the extra half scanline of a field sits relative to the visible region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfLineOffset {
    BeforePicture,
    AfterPicture,
}

/// A run of a field's waveform, in transmission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSegment {
    /// Pre-equalization, serration and post-equalization trains, nine lines.
    VerticalSync,
    /// Whole blanking scanlines.
    Blanking(usize),
    /// Half a scanline of black.
    HalfLine,
    /// The visible scanlines, built from [`FieldParity::rows`].
    Picture,
}

impl FieldSegment {
    /// The number of samples this segment occupies.
    pub fn samples(self) -> usize {
        match self {
            FieldSegment::VerticalSync => VSYNC_SAMPLES,
            FieldSegment::Blanking(lines) => lines * SAMPLES_PER_LINE,
            FieldSegment::HalfLine => HALF_LINE_SAMPLES,
            FieldSegment::Picture => FIELD_VISIBLE_SCANLINES * SAMPLES_PER_LINE,
        }
    }
}

impl FieldParity {
    /// Both fields in frame order.
    pub const FRAME_ORDER: [FieldParity; 2] = [FieldParity::Odd, FieldParity::Even];

    /// The first image row this field carries.
    pub fn first_row(self) -> usize {
        match self {
            FieldParity::Odd => 0,
            FieldParity::Even => 1,
        }
    }

    /// The image rows this field carries, top to bottom.
    pub fn rows(self) -> StepBy<Range<usize>> {
        (self.first_row()..IMAGE_HEIGHT).step_by(2)
    }

    pub fn half_line_offset(self) -> HalfLineOffset {
        match self {
            FieldParity::Odd => HalfLineOffset::AfterPicture,
            FieldParity::Even => HalfLineOffset::BeforePicture,
        }
    }

    /// The field's waveform as a sequence of segments.
    pub fn layout(self) -> [FieldSegment; 5] {
        use FieldSegment::*;

        match self.half_line_offset() {
            HalfLineOffset::AfterPicture => [
                VerticalSync,
                Blanking(LEADING_BLANK_LINES),
                Picture,
                HalfLine,
                Blanking(TRAILING_BLANK_LINES),
            ],
            HalfLineOffset::BeforePicture => [
                VerticalSync,
                Blanking(LEADING_BLANK_LINES),
                HalfLine,
                Picture,
                Blanking(TRAILING_BLANK_LINES),
            ],
        }
    }

    /// The total number of samples the layout adds up to.
    pub fn planned_samples(self) -> usize {
        self.layout().iter().map(|s| s.samples()).sum()
    }

    /// The sample offset of the first visible scanline within the field.
    pub fn picture_offset(self) -> usize {
        self.layout()
            .iter()
            .take_while(|s| **s != FieldSegment::Picture)
            .map(|s| s.samples())
            .sum()
    }
}
