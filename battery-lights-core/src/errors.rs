use embedded_hal::{digital, spi};
use thiserror::Error;

use crate::indicator::Line;

/// Startup problems. Any of these keeps the sampling loop from starting.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("threshold {index} ({value}) is not greater than the threshold before it ({previous})")]
    ThresholdsNotAscending {
        index: usize,
        previous: u16,
        value: u16,
    },
    #[error("threshold {value} is above the converter's full scale of {full_scale}")]
    ThresholdAboveFullScale { value: u16, full_scale: u16 },
    #[error("interval of {0}s is outside 1..=5s")]
    InvalidInterval(u16),
    #[error("full scale count must be non-zero")]
    ZeroFullScale,
    #[error("reference voltage {0} must be positive and finite")]
    InvalidReferenceVoltage(f32),
    #[error("{0} is not an indicator level between 0 and 6")]
    InvalidLevel(u8),
    #[error("channel {channel} does not exist. the converter has {channels} channels")]
    InvalidChannel { channel: u8, channels: u8 },
}

/// A failed bus or pin transaction. These only ever cost a single tick.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    #[error("spi transfer failed: {0:?}")]
    Spi(spi::ErrorKind),
    #[error("{line:?} line write failed: {kind:?}")]
    Pin { line: Line, kind: digital::ErrorKind },
    #[error("channel {0} does not exist on this converter")]
    InvalidChannel(u8),
    #[error("sample {raw} is above the full scale of {full_scale}")]
    SampleOutOfRange { raw: u16, full_scale: u16 },
    #[error("sample source returned garbage")]
    Malformed,
    #[error("sample source has no more readings")]
    Exhausted,
}

/// Everything the crate can fail with. eyre doesn't work on no_std so this stays an enum.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("hardware error: {0}")]
    Hardware(#[from] HardwareError),
    #[error("postcard error: {0:?}")]
    Postcard(#[from] postcard::Error),
    #[error("cobs dest buffer too small: {0:?}")]
    CobsDestBufTooSmall(#[from] cobs::DestBufTooSmallError),
    #[error("cobs decode error: {0:?}")]
    CobsDecode(#[from] cobs::DecodeError),
    #[error("status frame is empty")]
    EmptyFrame,
    #[error("no room left for the frame delimiter")]
    FrameTooLarge,
}

pub type IndicatorResult<T> = Result<T, IndicatorError>;
