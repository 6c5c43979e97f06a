//! MCP3008: 8 channel, 10 bit SPI converter.
//!
//! <https://ww1.microchip.com/downloads/en/DeviceDoc/21295d.pdf> section 6.1
use embedded_hal::spi::{Error as _, SpiDevice};

use super::SampleSource;
use crate::band::RawSample;
use crate::errors::HardwareError;
use crate::logging::trace;

pub const CHANNELS: u8 = 8;

/// Largest count a 10 bit conversion can return.
pub const FULL_SCALE_COUNT: u16 = 1023;

const START: u8 = 0x01;
const SINGLE_ENDED: u8 = 0x08;

pub struct Mcp3008<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Mcp3008<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    /// Single-ended conversion of one channel.
    pub fn read_channel(&mut self, channel: u8) -> Result<u16, HardwareError> {
        if channel >= CHANNELS {
            return Err(HardwareError::InvalidChannel(channel));
        }

        // start bit, then mode and channel in the high nibble.
        // the third byte clocks out the low bits
        let mut buf = [START, (SINGLE_ENDED | channel) << 4, 0x00];

        self.spi
            .transfer_in_place(&mut buf)
            .map_err(|err| HardwareError::Spi(err.kind()))?;

        trace!("mcp3008 rx = {:?}", buf);

        // only the bottom 2 bits of the second byte are data. the rest is the null bit and noise
        let raw = (u16::from(buf[1] & 0x03) << 8) | u16::from(buf[2]);

        Ok(raw)
    }
}

impl<SPI: SpiDevice> SampleSource for Mcp3008<SPI> {
    fn read(&mut self, channel: u8) -> Result<RawSample, HardwareError> {
        self.read_channel(channel)
    }
}
