use battery_lights_core::HardwareError;
use battery_lights_core::hardware::OutputSink;
use battery_lights_core::indicator::{Line, OutputVector};
use log::{info, trace};

/// Pretend lamps. The pattern is logged whenever it changes.
#[derive(Debug, Default)]
pub struct TerminalLights {
    current: OutputVector,
    shown: Option<OutputVector>,
}

impl TerminalLights {
    pub fn current(&self) -> OutputVector {
        self.current
    }
}

impl OutputSink for TerminalLights {
    fn set_line(&mut self, line: Line, level: bool) -> Result<(), HardwareError> {
        trace!("{line:?} = {level}");

        match line {
            Line::Red => self.current.red = level,
            Line::Yellow => self.current.yellow = level,
            Line::Green => self.current.green = level,
        }

        Ok(())
    }

    fn set_lines(&mut self, outputs: OutputVector) -> Result<(), HardwareError> {
        for (line, level) in outputs.lines() {
            self.set_line(line, level)?;
        }

        if self.shown != Some(self.current) {
            info!("lights: [{}]", self.current);
            self.shown = Some(self.current);
        }

        Ok(())
    }
}
