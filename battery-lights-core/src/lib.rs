//! Battery level indicator: sample a battery through an ADC, classify the reading into one of
//! seven bands, damp boundary noise with hysteresis, and drive a red/yellow/green indicator.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod band;
pub mod config;
pub mod errors;
pub mod hardware;
pub mod hysteresis;
pub mod indicator;
pub mod logging;
pub mod monitor;
pub mod status;

pub use band::{Band, NUM_LEVELS, RawSample, ThresholdTable, classify};
pub use config::{Calibration, Config, Settings, ShutdownOutputs};
pub use errors::{ConfigError, HardwareError, IndicatorError, IndicatorResult};
pub use hysteresis::{IndicatorState, transition};
pub use indicator::{Line, OutputVector, encode};
pub use monitor::{BatteryMonitor, StatusReport};
pub use status::StatusRecord;
