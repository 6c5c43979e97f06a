use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

/// Sleep in short slices so a ctrl-c doesn't have to wait out a whole interval.
pub struct InterruptibleDelay {
    running: Arc<AtomicBool>,
    slice: Duration,
}

impl InterruptibleDelay {
    pub fn new(running: Arc<AtomicBool>) -> Self {
        Self {
            running,
            slice: Duration::from_millis(50),
        }
    }
}

impl DelayNs for InterruptibleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let deadline = Instant::now() + Duration::from_nanos(ns.into());

        while self.running.load(Ordering::SeqCst) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }

            thread::sleep(self.slice.min(deadline - now));
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        // delay_ns tops out at about 4 seconds
        for _ in 0..ms / 1_000 {
            self.delay_ns(1_000_000_000);
        }
        self.delay_ns((ms % 1_000) * 1_000_000);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;
    use std::time::{Duration, Instant};

    use embedded_hal::delay::DelayNs;

    use super::InterruptibleDelay;

    #[test]
    fn test_sleeps_while_running() {
        let mut delay = InterruptibleDelay::new(Arc::new(AtomicBool::new(true)));

        let start = Instant::now();
        delay.delay_ms(120);

        assert!(start.elapsed() >= Duration::from_millis(120));
    }

    #[test]
    fn test_returns_at_once_when_stopped() {
        let mut delay = InterruptibleDelay::new(Arc::new(AtomicBool::new(false)));

        let start = Instant::now();
        delay.delay_ms(5_000);

        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
