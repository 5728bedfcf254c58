//! Per-core tone voice: the timer-interrupt tick handler.

use crate::config::SynthConfig;
use crate::error::ConfigError;
use crate::fixed::Fix15;
use crate::io::dac::{DacChannel, DacOutput};
use crate::synth::{BeepEnvelope, Oscillator};
use crate::tables::DdsSineTable;

/// One core's tone generator. Owned exclusively by that core's timer
/// interrupt; every field is private to the tick handler.
///
/// [`tick()`](ToneVoice::tick) does a bounded, constant amount of work:
/// one phase step, one table lookup, two fixed-point multiplies, and one
/// DAC push. It must complete well within the tick period.
pub struct ToneVoice<'a> {
    oscillator: Oscillator,
    envelope: BeepEnvelope,
    table: &'a DdsSineTable,
    scale: Fix15,
    dc_offset: i32,
    channel: DacChannel,
}

impl<'a> ToneVoice<'a> {
    pub fn new(
        cfg: &SynthConfig,
        table: &'a DdsSineTable,
        channel: DacChannel,
    ) -> Result<ToneVoice<'a>, ConfigError> {
        let mut oscillator = Oscillator::new();
        oscillator.set_frequency(cfg.tone_hz, cfg.tick_hz);
        let mut envelope = BeepEnvelope::new(cfg)?;
        envelope.advance(cfg.startup_skew_ticks);
        Ok(ToneVoice {
            oscillator,
            envelope,
            table,
            scale: Fix15::from_f32(cfg.output_scale),
            dc_offset: cfg.dc_offset,
            channel,
        })
    }

    /// One synthesis tick: advance phase, shape the sample, push it out.
    ///
    /// The sample is truncated to the DAC word width by the wire format; a
    /// busy DAC drops the sample rather than stalling the interrupt (the
    /// peripheral buffers one pending write, so this does not happen at
    /// the configured rates).
    #[inline]
    pub fn tick<D: DacOutput>(&mut self, dac: &mut D) {
        let phase = self.oscillator.step();
        let sine = self.table.lookup(phase);
        let amplitude = self.envelope.tick();
        let sample = amplitude.mul(self.scale).mul(sine).to_int() + self.dc_offset;
        let _ = dac.push(self.channel, sample as u16);
    }

    pub fn envelope(&self) -> &BeepEnvelope {
        &self.envelope
    }

    pub fn channel(&self) -> DacChannel {
        self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DAC_MID, DAC_PEAK};
    use crate::synth::BeepState;

    struct RecordingDac {
        samples: heapless::Vec<(DacChannel, u16), 512>,
        reject: bool,
    }

    impl RecordingDac {
        fn new() -> Self {
            RecordingDac {
                samples: heapless::Vec::new(),
                reject: false,
            }
        }
    }

    impl DacOutput for RecordingDac {
        type Error = ();

        fn push(&mut self, channel: DacChannel, value: u16) -> Result<(), ()> {
            if self.reject {
                return Err(());
            }
            let _ = self.samples.push((channel, value));
            Ok(())
        }
    }

    fn test_config() -> SynthConfig {
        SynthConfig {
            tone_hz: 1000.0,
            attack_ticks: 40,
            decay_ticks: 40,
            beep_ticks: 160,
            repeat_ticks: 80,
            ..SynthConfig::default()
        }
    }

    #[test]
    fn one_sample_per_tick_on_own_channel() {
        let table = DdsSineTable::new(DAC_PEAK);
        let cfg = test_config();
        let mut voice = ToneVoice::new(&cfg, &table, DacChannel::B).unwrap();
        let mut dac = RecordingDac::new();

        for _ in 0..100 {
            voice.tick(&mut dac);
        }
        assert_eq!(dac.samples.len(), 100);
        assert!(dac.samples.iter().all(|&(ch, _)| ch == DacChannel::B));
    }

    #[test]
    fn first_tick_is_dc_offset_only() {
        // Envelope amplitude starts at zero, so the first sample is pure
        // DC offset regardless of oscillator phase.
        let table = DdsSineTable::new(DAC_PEAK);
        let mut voice = ToneVoice::new(&test_config(), &table, DacChannel::A).unwrap();
        let mut dac = RecordingDac::new();
        voice.tick(&mut dac);
        assert_eq!(dac.samples[0].1, DAC_MID as u16);
    }

    #[test]
    fn sustained_tone_swings_about_mid_scale() {
        let table = DdsSineTable::new(DAC_PEAK);
        let cfg = test_config();
        let mut voice = ToneVoice::new(&cfg, &table, DacChannel::A).unwrap();
        let mut dac = RecordingDac::new();

        // Skip attack, then record one full sustain cycle (40 ticks @ 1 kHz).
        for _ in 0..cfg.attack_ticks {
            voice.tick(&mut dac);
        }
        dac.samples.clear();
        for _ in 0..40 {
            voice.tick(&mut dac);
        }

        let min = dac.samples.iter().map(|&(_, s)| s).min().unwrap();
        let max = dac.samples.iter().map(|&(_, s)| s).max().unwrap();
        // Full amplitude at 0.5 scale: roughly mid +/- 1023.
        assert!(min < 1200, "min {}", min);
        assert!(max > 2900, "max {}", max);
        assert!(max <= 3072, "max {}", max);
    }

    #[test]
    fn silent_period_outputs_flat_dc() {
        let table = DdsSineTable::new(DAC_PEAK);
        let cfg = test_config();
        let mut voice = ToneVoice::new(&cfg, &table, DacChannel::A).unwrap();
        let mut dac = RecordingDac::new();

        for _ in 0..cfg.beep_ticks {
            voice.tick(&mut dac);
        }
        assert_eq!(voice.envelope().state(), BeepState::Silent);
        dac.samples.clear();
        for _ in 0..10 {
            voice.tick(&mut dac);
        }
        assert!(dac.samples.iter().all(|&(_, s)| s == DAC_MID as u16));
    }

    #[test]
    fn dac_failure_does_not_stall_the_tick() {
        let table = DdsSineTable::new(DAC_PEAK);
        let mut voice = ToneVoice::new(&test_config(), &table, DacChannel::A).unwrap();
        let mut dac = RecordingDac::new();
        dac.reject = true;

        // Ticks keep advancing the envelope even when every push fails.
        for _ in 0..50 {
            voice.tick(&mut dac);
        }
        assert!(voice.envelope().amplitude() > Fix15::ZERO);
    }

    #[test]
    fn startup_skew_offsets_the_cycle() {
        let table = DdsSineTable::new(DAC_PEAK);
        let cfg = SynthConfig {
            startup_skew_ticks: 160, // a whole beep
            ..test_config()
        };
        let voice = ToneVoice::new(&cfg, &table, DacChannel::A).unwrap();
        assert_eq!(voice.envelope().state(), BeepState::Silent);
    }
}
