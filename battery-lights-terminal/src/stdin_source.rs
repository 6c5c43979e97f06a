use std::io::{BufRead, Lines};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use battery_lights_core::hardware::SampleSource;
use battery_lights_core::{HardwareError, RawSample};
use log::{info, warn};

/// One raw count per line. Useful for replaying a capture:
/// `cat log.txt | battery-lights --source stdin`
pub struct StdinSource<R> {
    lines: Lines<R>,
    running: Arc<AtomicBool>,
}

impl<R: BufRead> StdinSource<R> {
    /// Clears `running` once input runs out.
    pub fn new(input: R, running: Arc<AtomicBool>) -> Self {
        Self {
            lines: input.lines(),
            running,
        }
    }
}

impl<R: BufRead> SampleSource for StdinSource<R> {
    fn read(&mut self, _channel: u8) -> Result<RawSample, HardwareError> {
        let line = match self.lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                warn!("unable to read input: {err}");
                return Err(HardwareError::Malformed);
            }
            None => {
                info!("input finished");
                self.running.store(false, Ordering::SeqCst);
                return Err(HardwareError::Exhausted);
            }
        };

        line.trim().parse().map_err(|err| {
            warn!("{line:?} is not a raw count: {err}");
            HardwareError::Malformed
        })
    }
}
