//! The sampling loop. Owns the indicator state and the hardware handles.
use embedded_hal::delay::DelayNs;

use crate::config::Settings;
use crate::errors::HardwareError;
use crate::hardware::{OutputSink, SampleSource};
use crate::hysteresis::IndicatorState;
use crate::indicator::encode;
use crate::logging::{debug, info, warn};
use crate::status::StatusRecord;

/// Receives a record after every successful tick. Reporting can't fail the tick.
pub trait StatusReport {
    fn report(&mut self, record: &StatusRecord);
}

impl<F: FnMut(&StatusRecord)> StatusReport for F {
    fn report(&mut self, record: &StatusRecord) {
        self(record)
    }
}

pub struct BatteryMonitor<S, O> {
    source: S,
    outputs: O,
    settings: Settings,
    state: IndicatorState,
    consecutive_failures: u32,
}

impl<S: SampleSource, O: OutputSink> BatteryMonitor<S, O> {
    pub fn new(source: S, outputs: O, settings: Settings) -> Self {
        Self {
            source,
            outputs,
            state: settings.initial_state,
            settings,
            consecutive_failures: 0,
        }
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// One read, decide, write cycle.
    ///
    /// On error nothing is committed. If a line write fails partway, the last good pattern is
    /// written back before the error is returned so the lamps never show a mix of two levels.
    pub fn tick(&mut self) -> Result<StatusRecord, HardwareError> {
        let raw = self.source.read(self.settings.channel)?;

        let full_scale = self.settings.calibration.full_scale_count;
        if raw > full_scale {
            return Err(HardwareError::SampleOutOfRange { raw, full_scale });
        }

        let (band, next) = self.settings.hysteresis.step(self.state, raw);

        let outputs = encode(next);

        if let Err(err) = self.outputs.set_lines(outputs) {
            if let Err(restore_err) = self.outputs.set_lines(encode(self.state)) {
                warn!("could not restore lights for level {}: {}", self.state, restore_err);
            }

            return Err(err);
        }

        if next != self.state {
            info!("level {} -> {} (raw {}, lights {})", self.state, next, raw, outputs);
        } else {
            debug!("raw {} is band {}. holding level {}", raw, band, next);
        }

        self.state = next;

        Ok(StatusRecord {
            raw,
            voltage: self.settings.calibration.voltage(raw),
            state: next,
        })
    }

    /// `tick`, plus failure bookkeeping and reporting. A failed tick is logged and dropped.
    pub fn poll<R: StatusReport + ?Sized>(&mut self, report: &mut R) -> Option<StatusRecord> {
        match self.tick() {
            Ok(record) => {
                if self.consecutive_failures > 0 {
                    info!(
                        "hardware recovered after {} failed ticks",
                        self.consecutive_failures
                    );
                    self.consecutive_failures = 0;
                }

                report.report(&record);

                Some(record)
            }
            Err(err) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);

                warn!(
                    "tick failed ({} in a row). keeping level {}: {}",
                    self.consecutive_failures, self.state, err
                );

                None
            }
        }
    }

    /// Tick every interval until `keep_running` says stop, then show the shutdown lights.
    ///
    /// `keep_running` is only checked between ticks. A tick always finishes its writes.
    pub fn run<D, R, F>(
        &mut self,
        delay: &mut D,
        report: &mut R,
        mut keep_running: F,
    ) -> Result<(), HardwareError>
    where
        D: DelayNs,
        R: StatusReport + ?Sized,
        F: FnMut() -> bool,
    {
        let interval_ms = u32::try_from(self.settings.interval.as_millis()).unwrap_or(u32::MAX);

        info!(
            "sampling channel {} every {}ms. starting at level {}",
            self.settings.channel, interval_ms, self.state
        );

        while keep_running() {
            self.poll(report);

            delay.delay_ms(interval_ms);
        }

        self.shutdown()
    }

    /// Leave the lamps in a known pattern.
    pub fn shutdown(&mut self) -> Result<(), HardwareError> {
        let outputs = self.settings.shutdown_outputs.outputs();

        info!("stopping. lights {}", outputs);

        self.outputs.set_lines(outputs)
    }

    pub fn release(self) -> (S, O) {
        (self.source, self.outputs)
    }
}
