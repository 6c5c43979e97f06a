//! A fake battery. It discharges to `floor`, charges back to `start`, and repeats, with a little
//! jitter on every reading so the hysteresis has something to do.
use battery_lights_core::hardware::SampleSource;
use battery_lights_core::{HardwareError, RawSample};

/// Repeats forever. Small enough to flicker a naive indicator at every boundary.
const JITTER: [i32; 8] = [0, 3, -2, 4, -3, 1, -4, 2];

pub struct DischargeSimulator {
    start: u16,
    floor: u16,
    step: u16,
    full_scale: u16,
    level: i32,
    charging: bool,
    tick: usize,
}

impl DischargeSimulator {
    pub fn new(start: u16, floor: u16, step: u16, full_scale: u16) -> Self {
        let (start, floor) = if start >= floor {
            (start, floor)
        } else {
            (floor, start)
        };

        Self {
            start,
            floor,
            step: step.max(1),
            full_scale,
            level: start.into(),
            charging: false,
            tick: 0,
        }
    }

    fn advance(&mut self) {
        let step = i32::from(self.step);

        if self.charging {
            self.level += step;
            if self.level >= i32::from(self.start) {
                self.level = self.start.into();
                self.charging = false;
            }
        } else {
            self.level -= step;
            if self.level <= i32::from(self.floor) {
                self.level = self.floor.into();
                self.charging = true;
            }
        }
    }
}

impl SampleSource for DischargeSimulator {
    fn read(&mut self, _channel: u8) -> Result<RawSample, HardwareError> {
        let jitter = JITTER[self.tick % JITTER.len()];

        let raw = (self.level + jitter).clamp(0, self.full_scale.into());

        self.tick += 1;
        self.advance();

        Ok(raw as RawSample)
    }
}
