use log::debug;

use crate::error::{NtscError, NtscResult};
use crate::ntsc::*;
use crate::types::{Micros, SampleValue};

/// A stretch of constant voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub voltage: SampleValue,
    pub duration_us: Micros,
}

const fn level(voltage: SampleValue, duration_us: Micros) -> Level {
    Level {
        voltage,
        duration_us,
    }
}

/// [ 1.5us @ black ][ 4.75us @ sync ][ 0.5us @ black ][ 2.75us @ black ][ 1.5us @ black ]
pub const HSYNC_LEVELS: [Level; 5] = [
    level(BLACK_LEVEL, HSYNC_FRONT_PORCH_US),
    level(SYNC_LEVEL, HSYNC_SYNC_TIP_US),
    level(BLACK_LEVEL, HSYNC_BREEZEWAY_US),
    level(BLACK_LEVEL, HSYNC_COLOR_BURST_US),
    level(BLACK_LEVEL, HSYNC_BACK_PORCH_US),
];

/// [ 29.25us @ black ][ 2.5us @ sync ]
pub const EQUALIZATION_LEVELS: [Level; 2] = [
    level(BLACK_LEVEL, EQUALIZATION_BLACK_US),
    level(SYNC_LEVEL, EQUALIZATION_SYNC_US),
];

/// [ 27us @ sync ][ 4.75us @ black ]
pub const SERRATION_LEVELS: [Level; 2] = [
    level(SYNC_LEVEL, SERRATION_SYNC_US),
    level(BLACK_LEVEL, SERRATION_BLACK_US),
];

/// Render a run of levels into samples.
///
/// The per-segment counts must add up to the count of the total duration, otherwise rounding
/// would drift the waveform against the line clock.
pub fn render_levels(levels: &[Level]) -> NtscResult<Vec<SampleValue>> {
    let total_us: Micros = levels.iter().map(|l| l.duration_us).sum();
    let total = to_samples(total_us)?;

    let mut samples = Vec::with_capacity(total);
    for l in levels {
        let count = to_samples(l.duration_us)?;
        samples.extend(std::iter::repeat(l.voltage).take(count));
    }

    if samples.len() != total {
        return Err(NtscError::timing(format!(
            "segments render to {} samples but their {}us total is {} samples",
            samples.len(),
            total_us,
            total
        )));
    }

    Ok(samples)
}

/// The horizontal sync interval that opens every scanline.
pub fn build_hsync() -> NtscResult<Vec<SampleValue>> {
    let hsync = render_levels(&HSYNC_LEVELS)?;
    debug!("hsync: {} samples", hsync.len());
    Ok(hsync)
}

/// One equalization pulse, half a scanline long.
pub fn build_equalization_pulse() -> NtscResult<Vec<SampleValue>> {
    expect_half_line(render_levels(&EQUALIZATION_LEVELS)?, "equalization pulse")
}

/// One serration pulse, half a scanline long.
pub fn build_serration_pulse() -> NtscResult<Vec<SampleValue>> {
    expect_half_line(render_levels(&SERRATION_LEVELS)?, "serration pulse")
}

/// A train of [`PULSES_PER_TRAIN`] copies of `pulse`, three scanlines long.
pub fn build_train(pulse: &[SampleValue]) -> Vec<SampleValue> {
    pulse.repeat(PULSES_PER_TRAIN)
}

/// A constant-level run of `count` samples.
pub fn build_fill(voltage: SampleValue, count: usize) -> Vec<SampleValue> {
    vec![voltage; count]
}

fn expect_half_line(pulse: Vec<SampleValue>, name: &str) -> NtscResult<Vec<SampleValue>> {
    let half_line = to_samples(HALF_LINE_US)?;
    if pulse.len() != half_line {
        return Err(NtscError::timing(format!(
            "{name} is {} samples, expected half a line ({half_line})",
            pulse.len()
        )));
    }
    debug!("{name}: {} samples", pulse.len());
    Ok(pulse)
}
