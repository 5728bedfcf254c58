//! Host simulation of the full dual-core pipeline.
//!
//! Runs five simulated seconds: two beeping DDS voices ticking at 40 kHz
//! (one per virtual core), a simulated ADC delivering pre-synthesized
//! epochs at the capture rate, the FFT analyzer, an LED blinker, and the
//! ping-pong heartbeats reporting once per second through the log facade.
//!
//! ```text
//! RUST_LOG=info cargo run -p twotone-demos --bin combo_sim
//! ```

use std::cell::Cell;
use std::rc::Rc;

use log::info;

use twotone::analysis::SpectrumAnalyzer;
use twotone::capture::SampleSource;
use twotone::config::{CaptureConfig, HandshakeConfig, SynthConfig};
use twotone::constants::{CAPTURE_RATE_HZ, DAC_PEAK, DDS_TICK_HZ, NUM_SAMPLES};
use twotone::fft::FftEngine;
use twotone::io::dac::{DacChannel, DacOutput};
use twotone::io::display::SpectrumDisplay;
use twotone::sched::{BlinkTask, CoreScheduler, Heartbeat, Led, Semaphore};
use twotone::synth::ToneVoice;
use twotone::tables::{DdsSineTable, HannWindow};
use twotone::telemetry::{CoreId, LogSink, SharedTelemetry};

/// Microseconds per DDS tick at 40 kHz.
const TICK_US: u64 = 1_000_000 / DDS_TICK_HZ as u64;
/// Simulated run length.
const RUN_US: u64 = 5_000_000;
/// One capture epoch at 10 kHz.
const EPOCH_US: u64 = (NUM_SAMPLES as u64 * 1_000_000) / CAPTURE_RATE_HZ as u64;

/// DAC stand-in: tracks per-channel sample counts and extremes.
struct SimDac {
    count: [u64; 2],
    min: [u16; 2],
    max: [u16; 2],
}

impl SimDac {
    fn new() -> SimDac {
        SimDac {
            count: [0; 2],
            min: [u16::MAX; 2],
            max: [0; 2],
        }
    }
}

impl DacOutput for SimDac {
    type Error = std::convert::Infallible;

    fn push(&mut self, channel: DacChannel, value: u16) -> Result<(), Self::Error> {
        let i = match channel {
            DacChannel::A => 0,
            DacChannel::B => 1,
        };
        self.count[i] += 1;
        self.min[i] = self.min[i].min(value);
        self.max[i] = self.max[i].max(value);
        Ok(())
    }
}

/// ADC stand-in: cycles through pre-synthesized epochs, each "filling"
/// over one real epoch duration of simulated time. Shares the master
/// clock through a `Cell`, the way the real source watches its DMA
/// counter.
struct SimAdc {
    epochs: Vec<[u8; NUM_SAMPLES]>,
    current: usize,
    armed_at_us: u64,
    clock: Rc<Cell<u64>>,
}

impl SimAdc {
    fn new(epochs: Vec<[u8; NUM_SAMPLES]>, clock: Rc<Cell<u64>>) -> SimAdc {
        SimAdc {
            epochs,
            current: 0,
            armed_at_us: 0,
            clock,
        }
    }
}

impl SampleSource<NUM_SAMPLES> for SimAdc {
    fn epoch_complete(&self) -> bool {
        self.clock.get() - self.armed_at_us >= EPOCH_US
    }

    fn samples(&self) -> &[u8; NUM_SAMPLES] {
        &self.epochs[self.current]
    }

    fn rearm(&mut self) {
        self.armed_at_us = self.clock.get();
        self.current = (self.current + 1) % self.epochs.len();
    }
}

/// Display stand-in: swallows the bar plot, logs the peak readout.
struct SimDisplay;

impl SpectrumDisplay for SimDisplay {
    type Error = std::convert::Infallible;

    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), Self::Error> {
        log::debug!("display text @({}, {}): {}", x, y, text);
        Ok(())
    }

    fn draw_vline(&mut self, _x: u16, _y: u16, _len: u16) -> Result<(), Self::Error> {
        Ok(())
    }

    fn clear_vline(&mut self, _x: u16, _y: u16, _len: u16) -> Result<(), Self::Error> {
        Ok(())
    }

    fn clear_rect(&mut self, _x: u16, _y: u16, _w: u16, _h: u16) -> Result<(), Self::Error> {
        Ok(())
    }
}

struct SimLed {
    on: bool,
}

impl Led for SimLed {
    fn toggle(&mut self) {
        self.on = !self.on;
        log::trace!("LED {}", if self.on { "on" } else { "off" });
    }
}

/// Synthesize one epoch's worth of tone with a scratch voice, decimated
/// from the DDS rate down to the capture rate.
fn synthesize_epoch(table: &DdsSineTable, tone_hz: f32) -> [u8; NUM_SAMPLES] {
    struct Tap {
        samples: Vec<u16>,
    }

    impl DacOutput for Tap {
        type Error = std::convert::Infallible;

        fn push(&mut self, _c: DacChannel, v: u16) -> Result<(), Self::Error> {
            self.samples.push(v);
            Ok(())
        }
    }

    let cfg = SynthConfig {
        tone_hz,
        ..SynthConfig::default()
    };
    let mut voice = ToneVoice::new(&cfg, table, DacChannel::A).expect("valid synth config");
    let mut tap = Tap {
        samples: Vec::new(),
    };
    // Skip the attack so the epoch sits in the sustain region.
    for _ in 0..cfg.attack_ticks {
        voice.tick(&mut tap);
    }
    tap.samples.clear();
    let decimation = (DDS_TICK_HZ as f32 / CAPTURE_RATE_HZ) as usize;
    for _ in 0..NUM_SAMPLES * decimation {
        voice.tick(&mut tap);
    }

    let mut epoch = [0u8; NUM_SAMPLES];
    for (i, e) in epoch.iter_mut().enumerate() {
        *e = (tap.samples[i * decimation] >> 4) as u8;
    }
    epoch
}

fn main() {
    env_logger::init();

    // Init phase: tables, engine, shared state, virtual clock.
    let sine = DdsSineTable::new(DAC_PEAK);
    let window: HannWindow<NUM_SAMPLES> = HannWindow::new();
    let engine = FftEngine::<NUM_SAMPLES>::new().expect("epoch length is a power of two");
    let telemetry = SharedTelemetry::new();
    let go_0 = Semaphore::new(true);
    let go_1 = Semaphore::new(false);
    let clock = Rc::new(Cell::new(0u64));

    // Per-core voices; core 1 starts half a second out of phase.
    let mut voice_0 = ToneVoice::new(&SynthConfig::default(), &sine, DacChannel::B)
        .expect("valid synth config");
    let mut voice_1 = ToneVoice::new(
        &SynthConfig {
            startup_skew_ticks: DDS_TICK_HZ / 2,
            ..SynthConfig::default()
        },
        &sine,
        DacChannel::A,
    )
    .expect("valid synth config");
    let mut dac = SimDac::new();

    // The signal under analysis sweeps across three tones, one per epoch.
    let adc = SimAdc::new(
        vec![
            synthesize_epoch(&sine, 500.0),
            synthesize_epoch(&sine, 1000.0),
            synthesize_epoch(&sine, 2300.0),
        ],
        Rc::clone(&clock),
    );

    let handshake = HandshakeConfig::default();
    let mut heartbeat_0 =
        Heartbeat::new(CoreId::Core0, &go_0, &go_1, &telemetry, LogSink, &handshake)
            .expect("valid handshake config");
    let mut heartbeat_1 =
        Heartbeat::new(CoreId::Core1, &go_1, &go_0, &telemetry, LogSink, &handshake)
            .expect("valid handshake config");

    let mut analyzer = SpectrumAnalyzer::new(
        &CaptureConfig::default(),
        &window,
        &engine,
        adc,
        SimDisplay,
        &telemetry,
    )
    .expect("valid capture config");
    let mut blink = BlinkTask::new(SimLed { on: false }, 62_500);

    let mut core_0 = CoreScheduler::new();
    core_0.add(&mut heartbeat_0).expect("free task slot");
    core_0.add(&mut analyzer).expect("free task slot");

    let mut core_1 = CoreScheduler::new();
    core_1.add(&mut heartbeat_1).expect("free task slot");
    core_1.add(&mut blink).expect("free task slot");

    info!(
        "simulating {} s: 2 voices @ {} Hz ticks, {}-sample epochs @ {} Hz",
        RUN_US / 1_000_000,
        DDS_TICK_HZ,
        NUM_SAMPLES,
        CAPTURE_RATE_HZ
    );

    // The master loop stands in for both cores' timer interrupts and
    // scheduler loops: voices tick every 25 us, the schedulers poll once
    // per simulated millisecond.
    let mut now_us = 0u64;
    while now_us < RUN_US {
        clock.set(now_us);
        voice_0.tick(&mut dac);
        voice_1.tick(&mut dac);

        if now_us % 1_000 == 0 {
            core_0.poll_all(now_us);
            core_1.poll_all(now_us);
        }

        now_us += TICK_US;
    }

    drop(core_0);
    drop(core_1);

    info!(
        "done: ping-pong {}, last peak {:.0} Hz",
        telemetry.ping_pong(),
        telemetry.max_frequency()
    );
    info!(
        "DAC channel A: {} samples in [{}, {}]",
        dac.count[0], dac.min[0], dac.max[0]
    );
    info!(
        "DAC channel B: {} samples in [{}, {}]",
        dac.count[1], dac.min[1], dac.max[1]
    );
}
