//! Spectrum display contract and renderer.
//!
//! The display collaborator accepts text and vertical-line draw calls; the
//! renderer turns one epoch's magnitude spectrum into a bar plot plus a
//! peak-frequency readout. Display failures are non-fatal; the analyzer
//! logs and skips the frame.

use core::fmt::Write as _;

use heapless::String;

use crate::constants::{
    FREQ_LABEL_X, FREQ_LABEL_Y, FREQ_TEXT_H, FREQ_TEXT_W, FREQ_TEXT_X, FREQ_TEXT_Y,
    PEAK_MIN_BIN, SPECTRUM_BAR_SCALE, SPECTRUM_BASE_Y, SPECTRUM_HEIGHT, SPECTRUM_LEFT_X,
    SPECTRUM_TOP_Y,
};
use crate::fixed::Fix15;

/// Drawing primitives the core needs from a display.
pub trait SpectrumDisplay {
    type Error;

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), Self::Error>;

    /// Draw a vertical line from `(x, y)` downward for `len` pixels.
    fn draw_vline(&mut self, x: u16, y: u16, len: u16) -> Result<(), Self::Error>;

    /// Erase a vertical line from `(x, y)` downward for `len` pixels.
    fn clear_vline(&mut self, x: u16, y: u16, len: u16) -> Result<(), Self::Error>;

    /// Erase a `w` x `h` rectangle with its top-left corner at `(x, y)`.
    fn clear_rect(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), Self::Error>;
}

/// Renders the magnitude spectrum and detected peak once per epoch.
pub struct SpectrumRenderer {
    bar_scale: Fix15,
}

impl SpectrumRenderer {
    pub fn new() -> SpectrumRenderer {
        SpectrumRenderer {
            bar_scale: Fix15::from_int(SPECTRUM_BAR_SCALE),
        }
    }

    /// Draw the static labels. Call once after the display is up.
    pub fn draw_chrome<D: SpectrumDisplay>(&self, display: &mut D) -> Result<(), D::Error> {
        display.draw_text(FREQ_LABEL_X, FREQ_LABEL_Y, "max frequency:")
    }

    /// Draw one epoch: a bar per eligible bin (erase, then redraw at the
    /// new height) and the peak frequency as text.
    pub fn render<D: SpectrumDisplay>(
        &self,
        display: &mut D,
        magnitudes: &[Fix15],
        peak_hz: f32,
    ) -> Result<(), D::Error> {
        display.clear_rect(FREQ_TEXT_X, FREQ_TEXT_Y, FREQ_TEXT_W, FREQ_TEXT_H)?;
        let mut text: String<16> = String::new();
        let _ = write!(text, "{:.0}", peak_hz);
        display.draw_text(FREQ_TEXT_X, FREQ_TEXT_Y, &text)?;

        for (bin, &mag) in magnitudes.iter().enumerate().skip(PEAK_MIN_BIN) {
            let x = SPECTRUM_LEFT_X + bin as u16;
            display.clear_vline(x, SPECTRUM_TOP_Y, SPECTRUM_HEIGHT)?;
            let height = mag.mul(self.bar_scale).to_int();
            let height = height.clamp(0, SPECTRUM_HEIGHT as i32) as u16;
            display.draw_vline(x, SPECTRUM_BASE_Y - height, height)?;
        }
        Ok(())
    }
}

impl Default for SpectrumRenderer {
    fn default() -> Self {
        SpectrumRenderer::new()
    }
}
