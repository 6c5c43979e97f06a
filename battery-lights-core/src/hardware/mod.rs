//! The two things the loop needs from the outside world. Everything else is pure.
pub mod mcp3008;
pub mod pins;

pub use mcp3008::Mcp3008;
pub use pins::PinLights;

use crate::band::RawSample;
use crate::errors::HardwareError;
use crate::indicator::{Line, OutputVector};

/// Something that can measure a converter channel.
pub trait SampleSource {
    fn read(&mut self, channel: u8) -> Result<RawSample, HardwareError>;
}

/// Something that can light a lamp.
pub trait OutputSink {
    fn set_line(&mut self, line: Line, level: bool) -> Result<(), HardwareError>;

    /// Red, then yellow, then green. Stops at the first failed write.
    fn set_lines(&mut self, outputs: OutputVector) -> Result<(), HardwareError> {
        for (line, level) in outputs.lines() {
            self.set_line(line, level)?;
        }

        Ok(())
    }
}

impl<T: SampleSource + ?Sized> SampleSource for &mut T {
    fn read(&mut self, channel: u8) -> Result<RawSample, HardwareError> {
        T::read(self, channel)
    }
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn set_line(&mut self, line: Line, level: bool) -> Result<(), HardwareError> {
        T::set_line(self, line, level)
    }
}
