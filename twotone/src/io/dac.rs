//! DAC output contract and MCP4822 driver.
//!
//! The synthesis tick pushes one word per tick and never waits: the
//! peripheral is assumed to buffer at least one pending write. A failed
//! push drops that sample rather than stalling the interrupt.

/// Which converter channel a sample is destined for. One channel per core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DacChannel {
    A,
    B,
}

/// Non-blocking sample output.
pub trait DacOutput {
    type Error;

    /// Push one sample. Only the low 12 bits of `value` reach the
    /// converter; higher bits are truncated by the wire format.
    fn push(&mut self, channel: DacChannel, value: u16) -> Result<(), Self::Error>;
}

#[cfg(feature = "mcp4822")]
mod mcp4822 {
    use embedded_hal::spi::SpiBus;

    use super::{DacChannel, DacOutput};

    // Command-word config bits (see the MCP4822 datasheet): channel select,
    // 1x gain, output active.
    const CONFIG_CHAN_A: u16 = 0b0011_0000_0000_0000;
    const CONFIG_CHAN_B: u16 = 0b1011_0000_0000_0000;

    /// Build the 16-bit command word for one sample.
    #[inline(always)]
    pub const fn frame(channel: DacChannel, value: u16) -> u16 {
        let config = match channel {
            DacChannel::A => CONFIG_CHAN_A,
            DacChannel::B => CONFIG_CHAN_B,
        };
        config | (value & 0x0fff)
    }

    /// MCP4822 dual 12-bit DAC over a 16-bit SPI bus.
    pub struct Mcp4822<SPI> {
        spi: SPI,
    }

    impl<SPI> Mcp4822<SPI>
    where
        SPI: SpiBus<u16>,
    {
        pub fn new(spi: SPI) -> Mcp4822<SPI> {
            Mcp4822 { spi }
        }

        /// Give the bus back.
        pub fn release(self) -> SPI {
            self.spi
        }
    }

    impl<SPI> DacOutput for Mcp4822<SPI>
    where
        SPI: SpiBus<u16>,
    {
        type Error = SPI::Error;

        #[inline]
        fn push(&mut self, channel: DacChannel, value: u16) -> Result<(), Self::Error> {
            self.spi.write(&[frame(channel, value)])
        }
    }
}

#[cfg(feature = "mcp4822")]
pub use mcp4822::{frame, Mcp4822};
