use core::time::Duration;

use crate::band::{NUM_LEVELS, RawSample, ThresholdTable};
use crate::errors::ConfigError;
use crate::hardware::mcp3008;
use crate::hysteresis::{Hysteresis, IndicatorState};
use crate::indicator::OutputVector;

/// What the lamps show once the loop stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShutdownOutputs {
    #[default]
    AllOff,
    /// Same as over range. Reads as "unknown" to anyone who knows the table.
    AllOn,
}

impl ShutdownOutputs {
    pub fn outputs(self) -> OutputVector {
        match self {
            Self::AllOff => OutputVector::ALL_OFF,
            Self::AllOn => OutputVector::ALL_ON,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// MCP3008 input the battery is wired to. Checked against the converter's 8 channels even
    /// when another source is used, since every deployment reads through one
    pub channel: u8,
    /// 1-5 seconds
    pub interval_secs: u16,
    pub thresholds: [u16; NUM_LEVELS],
    /// counts a reading has to clear a boundary by before the lights change
    pub hysteresis_margin: u16,
    /// highest count the converter can return. 1023 for 10 bits
    pub full_scale_count: u16,
    /// volts at `full_scale_count`
    pub reference_voltage: f32,
    pub initial_state: u8,
    pub shutdown_outputs: ShutdownOutputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel: 0,
            interval_secs: 1,
            thresholds: [645, 655, 696, 737, 778, 819, 860],
            hysteresis_margin: 5,
            full_scale_count: 1023,
            reference_voltage: 5.0,
            initial_state: IndicatorState::INITIAL.index() as u8,
            shutdown_outputs: ShutdownOutputs::AllOff,
        }
    }
}

impl Config {
    pub const INTERVAL_SECS: core::ops::RangeInclusive<u16> = 1..=5;

    /// Check everything once so the loop never has to.
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        if self.channel >= mcp3008::CHANNELS {
            return Err(ConfigError::InvalidChannel {
                channel: self.channel,
                channels: mcp3008::CHANNELS,
            });
        }

        if !Self::INTERVAL_SECS.contains(&self.interval_secs) {
            return Err(ConfigError::InvalidInterval(self.interval_secs));
        }

        let calibration = Calibration::try_new(self.full_scale_count, self.reference_voltage)?;

        let thresholds = ThresholdTable::try_new(self.thresholds)?;

        if thresholds.highest() > calibration.full_scale_count {
            return Err(ConfigError::ThresholdAboveFullScale {
                value: thresholds.highest(),
                full_scale: calibration.full_scale_count,
            });
        }

        let initial_state = IndicatorState::try_from(self.initial_state)?;

        Ok(Settings {
            channel: self.channel,
            interval: Duration::from_secs(self.interval_secs.into()),
            hysteresis: Hysteresis::new(thresholds, self.hysteresis_margin),
            calibration,
            initial_state,
            shutdown_outputs: self.shutdown_outputs,
        })
    }
}

/// Counts to volts.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub full_scale_count: u16,
    pub reference_voltage: f32,
}

impl Calibration {
    pub fn try_new(full_scale_count: u16, reference_voltage: f32) -> Result<Self, ConfigError> {
        if full_scale_count == 0 {
            return Err(ConfigError::ZeroFullScale);
        }

        if !reference_voltage.is_finite() || reference_voltage <= 0.0 {
            return Err(ConfigError::InvalidReferenceVoltage(reference_voltage));
        }

        Ok(Self {
            full_scale_count,
            reference_voltage,
        })
    }

    pub fn voltage(&self, raw: RawSample) -> f32 {
        raw as f32 * self.reference_voltage / self.full_scale_count as f32
    }
}

/// A validated `Config`. Nothing in here changes while the loop runs.
#[derive(Clone, Copy, Debug)]
pub struct Settings {
    pub channel: u8,
    pub interval: Duration,
    pub hysteresis: Hysteresis,
    pub calibration: Calibration,
    pub initial_state: IndicatorState,
    pub shutdown_outputs: ShutdownOutputs,
}
