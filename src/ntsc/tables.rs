use log::debug;

use crate::error::{NtscError, NtscResult};
use crate::ntsc::*;
use crate::types::{Micros, SampleValue};

/// Every data-independent waveform of the frame, built once up front.
///
/// The encoder and decoder only ever read from this, so one instance can be shared freely
/// (including across threads) once [`SyncTables::new`] has returned.
#[derive(Debug, Clone)]
pub struct SyncTables {
    hsync: Vec<SampleValue>,
    equalization_pulse: Vec<SampleValue>,
    serration_pulse: Vec<SampleValue>,
    equalization_train: Vec<SampleValue>,
    serration_train: Vec<SampleValue>,
    blanking_scanline: Vec<SampleValue>,
    half_line: Vec<SampleValue>,
    voltages: [SampleValue; 256],
}

impl SyncTables {
    /// Build and check every fixed waveform.
    pub fn new() -> NtscResult<Self> {
        check_count("scanline", SCANLINE_US, SAMPLES_PER_LINE)?;
        check_count("half line", HALF_LINE_US, HALF_LINE_SAMPLES)?;
        check_count("hsync", HSYNC_US, HSYNC_SAMPLES)?;
        check_count("active line", ACTIVE_LINE_US, ACTIVE_LINE_SAMPLES)?;

        let hsync = build_hsync()?;
        let equalization_pulse = build_equalization_pulse()?;
        let serration_pulse = build_serration_pulse()?;
        let equalization_train = build_train(&equalization_pulse);
        let serration_train = build_train(&serration_pulse);

        let mut blanking_scanline = hsync.clone();
        blanking_scanline.extend(build_fill(BLACK_LEVEL, to_samples(ACTIVE_LINE_US)?));
        let half_line = build_fill(BLACK_LEVEL, to_samples(HALF_LINE_US)?);

        if blanking_scanline.len() != SAMPLES_PER_LINE {
            return Err(NtscError::timing(format!(
                "blanking scanline is {} samples instead of {SAMPLES_PER_LINE}",
                blanking_scanline.len()
            )));
        }
        if equalization_train.len() != TRAIN_SAMPLES || serration_train.len() != TRAIN_SAMPLES {
            return Err(NtscError::timing("vertical sync trains are not three lines"));
        }

        let odd = FieldParity::Odd.planned_samples();
        let even = FieldParity::Even.planned_samples();
        if odd != even || odd != FIELD_SAMPLES {
            return Err(NtscError::timing(format!(
                "field layouts disagree: odd {odd}, even {even}, expected {FIELD_SAMPLES}"
            )));
        }

        let mut voltages = [BLACK_LEVEL; 256];
        for (intensity, v) in voltages.iter_mut().enumerate() {
            *v = to_voltage(intensity as u8);
        }

        debug!(
            "sync tables ready: {} samples/line, {} samples/field",
            SAMPLES_PER_LINE, FIELD_SAMPLES
        );

        Ok(Self {
            hsync,
            equalization_pulse,
            serration_pulse,
            equalization_train,
            serration_train,
            blanking_scanline,
            half_line,
            voltages,
        })
    }

    pub fn hsync(&self) -> &[SampleValue] {
        &self.hsync
    }

    pub fn equalization_pulse(&self) -> &[SampleValue] {
        &self.equalization_pulse
    }

    pub fn serration_pulse(&self) -> &[SampleValue] {
        &self.serration_pulse
    }

    pub fn pre_equalization(&self) -> &[SampleValue] {
        &self.equalization_train
    }

    pub fn serration(&self) -> &[SampleValue] {
        &self.serration_train
    }

    /// Same content as [`SyncTables::pre_equalization`], and the same buffer.
    pub fn post_equalization(&self) -> &[SampleValue] {
        &self.equalization_train
    }

    pub fn blanking_scanline(&self) -> &[SampleValue] {
        &self.blanking_scanline
    }

    /// Half a scanline of black, the interlace offset.
    pub fn half_line(&self) -> &[SampleValue] {
        &self.half_line
    }

    /// The voltage for one pixel intensity.
    #[inline]
    pub fn voltage(&self, intensity: u8) -> SampleValue {
        self.voltages[intensity as usize]
    }
}

fn check_count(name: &str, duration_us: Micros, expected: usize) -> NtscResult<()> {
    let actual = to_samples(duration_us)?;
    if actual != expected {
        return Err(NtscError::timing(format!(
            "{name} of {duration_us}us is {actual} samples, expected {expected}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_the_same_buffer() {
        let tables = SyncTables::new().unwrap();
        assert!(std::ptr::eq(tables.hsync(), tables.hsync()));
        assert!(std::ptr::eq(
            tables.blanking_scanline(),
            tables.blanking_scanline()
        ));
        assert!(std::ptr::eq(
            tables.pre_equalization(),
            tables.post_equalization()
        ));
    }

    #[test]
    fn rebuilt_tables_are_bit_identical() {
        let a = SyncTables::new().unwrap();
        let b = SyncTables::new().unwrap();
        let bits = |s: &[SampleValue]| s.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a.hsync()), bits(b.hsync()));
        assert_eq!(bits(a.serration()), bits(b.serration()));
        assert_eq!(bits(a.pre_equalization()), bits(b.pre_equalization()));
        assert_eq!(bits(a.blanking_scanline()), bits(b.blanking_scanline()));
    }

    #[test]
    fn blanking_scanline_is_hsync_then_black() {
        let tables = SyncTables::new().unwrap();
        let line = tables.blanking_scanline();
        assert_eq!(line.len(), SAMPLES_PER_LINE);
        assert_eq!(&line[..HSYNC_SAMPLES], tables.hsync());
        assert!(line[HSYNC_SAMPLES..].iter().all(|&v| v == BLACK_LEVEL));
    }

    #[test]
    fn voltage_table_matches_mapper() {
        let tables = SyncTables::new().unwrap();
        for i in 0..=255u8 {
            assert_eq!(tables.voltage(i), to_voltage(i));
        }
    }

    #[test]
    fn vertical_sync_trains() {
        let tables = SyncTables::new().unwrap();
        let pulse = tables.serration_pulse();
        for chunk in tables.serration().chunks(HALF_LINE_SAMPLES) {
            assert_eq!(chunk, pulse);
        }
        let pulse = tables.equalization_pulse();
        for chunk in tables.pre_equalization().chunks(HALF_LINE_SAMPLES) {
            assert_eq!(chunk, pulse);
        }
    }
}
