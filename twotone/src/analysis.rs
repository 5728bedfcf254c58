//! The spectrum analyzer task: capture → FFT → peak → telemetry → display.
//!
//! Runs on the capture core's cooperative scheduler. Each poll either
//! yields (epoch still filling) or processes one complete epoch end to
//! end. The spectrum buffers are owned here and overwritten in place every
//! epoch.

use log::warn;

use crate::capture::{CapturePipeline, SampleSource};
use crate::config::CaptureConfig;
use crate::error::ConfigError;
use crate::fft::{self, FftEngine, Peak};
use crate::fixed::Fix15;
use crate::io::display::{SpectrumDisplay, SpectrumRenderer};
use crate::sched::{Poll, Task};
use crate::tables::HannWindow;
use crate::telemetry::SharedTelemetry;

/// Capture/FFT consumer task.
pub struct SpectrumAnalyzer<'a, S, D, const N: usize> {
    pipeline: CapturePipeline<'a, N>,
    engine: &'a FftEngine<N>,
    source: S,
    display: D,
    renderer: SpectrumRenderer,
    telemetry: &'a SharedTelemetry,
    sample_rate_hz: f32,
    re: [Fix15; N],
    im: [Fix15; N],
    last_peak: Peak,
}

impl<'a, S, D, const N: usize> SpectrumAnalyzer<'a, S, D, N>
where
    S: SampleSource<N>,
    D: SpectrumDisplay,
{
    pub fn new(
        cfg: &CaptureConfig,
        window: &'a HannWindow<N>,
        engine: &'a FftEngine<N>,
        source: S,
        display: D,
        telemetry: &'a SharedTelemetry,
    ) -> Result<SpectrumAnalyzer<'a, S, D, N>, ConfigError> {
        cfg.validate()?;
        let renderer = SpectrumRenderer::new();
        let mut display = display;
        // Static labels go up once; a dead display at startup is no more
        // fatal than one that dies later.
        if renderer.draw_chrome(&mut display).is_err() {
            warn!("display unavailable at startup");
        }
        Ok(SpectrumAnalyzer {
            pipeline: CapturePipeline::new(window),
            engine,
            source,
            display,
            renderer,
            telemetry,
            sample_rate_hz: cfg.sample_rate_hz,
            re: [Fix15::ZERO; N],
            im: [Fix15::ZERO; N],
            last_peak: Peak {
                bin: 0,
                magnitude: Fix15::ZERO,
            },
        })
    }

    /// The most recent peak (for tests and direct consumers; the shared
    /// value lives in telemetry).
    pub fn last_peak(&self) -> Peak {
        self.last_peak
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

impl<'a, S, D, const N: usize> Task for SpectrumAnalyzer<'a, S, D, N>
where
    S: SampleSource<N>,
    D: SpectrumDisplay,
{
    fn poll(&mut self, _now_us: u64) -> Poll {
        if self
            .pipeline
            .try_drain(&mut self.source, &mut self.re, &mut self.im)
            == Poll::Pending
        {
            return Poll::Pending;
        }

        // Capture is refilling behind us; transform our copy.
        self.engine.transform(&mut self.re, &mut self.im);
        self.telemetry.record_transform();

        fft::magnitudes(&mut self.re, &self.im);
        let peak = fft::find_peak(&self.re[..N / 2]);
        let peak_hz = fft::bin_frequency(peak.bin, self.sample_rate_hz, N);
        self.last_peak = peak;
        self.telemetry.publish_max_frequency(peak_hz);

        // Display trouble is non-fatal: skip this frame, keep analyzing.
        if self
            .renderer
            .render(&mut self.display, &self.re[..N / 2], peak_hz)
            .is_err()
        {
            warn!("display unavailable, spectrum frame dropped");
        }

        Poll::Ready
    }
}
