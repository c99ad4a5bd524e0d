mod decoder;
mod encoder;
mod field;
mod pulse;
mod tables;

pub use decoder::*;
pub use encoder::*;
pub use field::*;
pub use pulse::*;
pub use tables::*;

use crate::error::{NtscError, NtscResult};
use crate::types::{Micros, SignalFloat};

/// The time between two output samples. The DAC path runs at a fixed 4 MS/s.
pub const SAMPLE_INTERVAL_US: Micros = 0.25;

/// The number of scanlines in a full interlaced frame.
pub const FRAME_SCANLINES: usize = 525;

/// The number of visible scanlines carried by each field.
pub const FIELD_VISIBLE_SCANLINES: usize = 240;

/// The length of one scanline.
pub const SCANLINE_US: Micros = 63.5;

/// Half a scanline, the unit of the vertical sync pulses and of the interlace offset.
pub const HALF_LINE_US: Micros = SCANLINE_US / 2.0;

// Horizontal sync segments.

pub const HSYNC_FRONT_PORCH_US: Micros = 1.5;
pub const HSYNC_SYNC_TIP_US: Micros = 4.75;
pub const HSYNC_BREEZEWAY_US: Micros = 0.5;
/// The color burst is not modeled, the interval is held at black.
pub const HSYNC_COLOR_BURST_US: Micros = 2.75;
pub const HSYNC_BACK_PORCH_US: Micros = 1.5;

/// The whole horizontal sync interval.
pub const HSYNC_US: Micros = HSYNC_FRONT_PORCH_US
    + HSYNC_SYNC_TIP_US
    + HSYNC_BREEZEWAY_US
    + HSYNC_COLOR_BURST_US
    + HSYNC_BACK_PORCH_US;

/// The part of a scanline carrying picture.
pub const ACTIVE_LINE_US: Micros = SCANLINE_US - HSYNC_US;

// Vertical sync pulses, each half a scanline long.

pub const EQUALIZATION_BLACK_US: Micros = 29.25;
pub const EQUALIZATION_SYNC_US: Micros = 2.5;
pub const SERRATION_SYNC_US: Micros = 27.0;
pub const SERRATION_BLACK_US: Micros = 4.75;

/// The number of pulses in each vertical sync train (three scanlines' worth).
pub const PULSES_PER_TRAIN: usize = 6;

// Voltage levels.

/// The blanking / black reference.
pub const BLACK_LEVEL: SignalFloat = 0.30;
/// Peak white.
pub const WHITE_LEVEL: SignalFloat = 1.00;
/// The sync tip.
pub const SYNC_LEVEL: SignalFloat = 0.00;

// Sample counts at SAMPLE_INTERVAL_US. Each one is the cached result of `to_samples` on the
// matching duration above (SCANLINE_US, HALF_LINE_US, HSYNC_US, ACTIVE_LINE_US), spelled out so
// they can size arrays and patterns. `SyncTables::new` refuses to build if any of them disagrees
// with `to_samples`.

pub const SAMPLES_PER_LINE: usize = 254;
pub const HALF_LINE_SAMPLES: usize = 127;
pub const HSYNC_SAMPLES: usize = 44;
pub const ACTIVE_LINE_SAMPLES: usize = 210;
pub const TRAIN_SAMPLES: usize = 3 * SAMPLES_PER_LINE;
pub const VSYNC_SAMPLES: usize = 3 * TRAIN_SAMPLES;

/// One field is 262.5 scanlines.
pub const FIELD_SAMPLES: usize = FRAME_SCANLINES * HALF_LINE_SAMPLES;

/// A frame is both fields back to back.
pub const FRAME_SAMPLES: usize = 2 * FIELD_SAMPLES;

/// The required input image height, both fields' visible lines.
pub const IMAGE_HEIGHT: usize = 2 * FIELD_VISIBLE_SCANLINES;

/// Convert a duration to a whole number of samples.
///
/// Every segment length in the crate goes through here, so there is exactly one rounding rule
/// (half away from zero). Only negative or non-finite durations fail.
pub fn to_samples(duration_us: Micros) -> NtscResult<usize> {
    if !duration_us.is_finite() || duration_us < 0.0 {
        return Err(NtscError::Duration(duration_us));
    }

    Ok((duration_us / SAMPLE_INTERVAL_US).round() as usize)
}

/// Map an 8-bit intensity onto the black..white voltage range.
///
/// Evaluated as a convex combination in f64 so that both endpoints land exactly on
/// `BLACK_LEVEL` and `WHITE_LEVEL` after narrowing.
pub fn to_voltage(intensity: u8) -> SignalFloat {
    let x = intensity as f64 / 255.0;
    let black = BLACK_LEVEL as f64;
    let white = WHITE_LEVEL as f64;

    (x * white + (1.0 - x) * black) as SignalFloat
}

/// The inverse of [`to_voltage`], rounding to the nearest intensity and clamping out-of-range
/// voltages.
pub fn to_intensity(voltage: SignalFloat) -> u8 {
    let black = BLACK_LEVEL as f64;
    let white = WHITE_LEVEL as f64;
    let x = (voltage as f64 - black) / (white - black);

    f64::clamp((x * 255.0).round(), 0.0, 255.0) as u8
}
