use embedded_hal::digital::{Error as _, OutputPin, PinState};

use super::OutputSink;
use crate::errors::HardwareError;
use crate::indicator::Line;

/// One GPIO per lamp. High means lit.
pub struct PinLights<R, Y, G> {
    pub red: R,
    pub yellow: Y,
    pub green: G,
}

impl<R, Y, G> PinLights<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    pub fn new(red: R, yellow: Y, green: G) -> Self {
        Self { red, yellow, green }
    }
}

impl<R, Y, G> OutputSink for PinLights<R, Y, G>
where
    R: OutputPin,
    Y: OutputPin,
    G: OutputPin,
{
    fn set_line(&mut self, line: Line, level: bool) -> Result<(), HardwareError> {
        let state = PinState::from(level);

        let result = match line {
            Line::Red => self.red.set_state(state).map_err(|err| err.kind()),
            Line::Yellow => self.yellow.set_state(state).map_err(|err| err.kind()),
            Line::Green => self.green.set_state(state).map_err(|err| err.kind()),
        };

        result.map_err(|kind| HardwareError::Pin { line, kind })
    }
}
