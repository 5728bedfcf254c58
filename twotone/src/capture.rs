//! Double-buffered sample capture.
//!
//! The acquisition collaborator (ADC + DMA on real hardware) fills a raw
//! sample buffer at a fixed rate. The pipeline waits for a full epoch,
//! widens and windows the samples into the FFT's working buffers, and
//! re-arms acquisition *before* the transform runs. The next epoch fills
//! while the current one is being computed, and the two buffers are never
//! mutated concurrently.

use crate::fixed::Fix15;
use crate::sched::Poll;
use crate::tables::HannWindow;

/// Acquisition source contract: delivers exactly `N` consecutively
/// captured 8-bit samples per epoch.
pub trait SampleSource<const N: usize> {
    /// Whether `N` samples have been gathered since the last [`rearm`](Self::rearm).
    fn epoch_complete(&self) -> bool;

    /// The filled epoch. Only meaningful once [`epoch_complete`](Self::epoch_complete)
    /// reports `true`.
    fn samples(&self) -> &[u8; N];

    /// Restart acquisition for the next epoch.
    fn rearm(&mut self);
}

/// Widens and windows completed epochs into FFT input buffers.
pub struct CapturePipeline<'a, const N: usize> {
    window: &'a HannWindow<N>,
}

impl<'a, const N: usize> CapturePipeline<'a, N> {
    pub fn new(window: &'a HannWindow<N>) -> CapturePipeline<'a, N> {
        CapturePipeline { window }
    }

    /// Drain one epoch if ready.
    ///
    /// Returns [`Poll::Pending`] while the epoch is incomplete; callers
    /// yield and re-poll rather than spin, so the wait suspends only the
    /// consuming task, never the core. On [`Poll::Ready`] the source has
    /// already been re-armed and `re`/`im` hold the windowed samples.
    pub fn try_drain<S: SampleSource<N>>(
        &self,
        source: &mut S,
        re: &mut [Fix15; N],
        im: &mut [Fix15; N],
    ) -> Poll {
        if !source.epoch_complete() {
            return Poll::Pending;
        }

        {
            let samples = source.samples();
            for i in 0..N {
                re[i] = Fix15::from_int(samples[i] as i32).mul(self.window[i]);
                im[i] = Fix15::ZERO;
            }
        }

        // Our copy is taken; let the hardware refill while we transform.
        source.rearm();
        Poll::Ready
    }
}
