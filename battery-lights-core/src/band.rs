//! Raw ADC counts to coarse bands.
use core::fmt;

use crate::errors::ConfigError;

/// Bands, indicator states, and thresholds all come in sevens.
pub const NUM_LEVELS: usize = 7;

/// A single converter count. Only meaningful in `0..=full_scale_count`.
pub type RawSample = u16;

/// The instantaneous classification of one sample, before hysteresis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Band(u8);

impl Band {
    /// Below the usable range. Also the "empty" warning.
    pub const EMPTY: Self = Self(0);
    /// Above the usable range. Over-voltage.
    pub const OVER: Self = Self(NUM_LEVELS as u8 - 1);

    pub const fn new(x: u8) -> Option<Self> {
        if (x as usize) < NUM_LEVELS {
            Some(Self(x))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Bands 0 and 6 skip hysteresis entirely.
    #[inline]
    pub const fn is_extreme(self) -> bool {
        self.0 == Self::EMPTY.0 || self.0 == Self::OVER.0
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Seven strictly increasing counts. `T[i]` is the lower boundary of band `i`.
///
/// Band 0 covers everything up to and including `T[1]`. `T[0]` marks where "below range" starts
/// on the battery's discharge curve, but classification never needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdTable([u16; NUM_LEVELS]);

impl Default for ThresholdTable {
    /// Calibrated for a 1S lithium cell on a 10-bit converter with a 5V reference.
    fn default() -> Self {
        Self([645, 655, 696, 737, 778, 819, 860])
    }
}

impl ThresholdTable {
    pub fn try_new(thresholds: [u16; NUM_LEVELS]) -> Result<Self, ConfigError> {
        for (i, pair) in thresholds.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ConfigError::ThresholdsNotAscending {
                    index: i + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }

        Ok(Self(thresholds))
    }

    /// The lower boundary of the given band.
    #[inline]
    pub fn lower_bound(&self, band: Band) -> u16 {
        self.0[band.index()]
    }

    #[inline]
    pub fn highest(&self) -> u16 {
        self.0[NUM_LEVELS - 1]
    }

    pub fn as_array(&self) -> &[u16; NUM_LEVELS] {
        &self.0
    }
}

/// Every count lands in exactly one band. Higher counts never land in a lower band.
pub fn classify(raw: RawSample, thresholds: &ThresholdTable) -> Band {
    // bands 1..=5 are (T[i], T[i + 1]]. anything above T[6] is over range
    let band = thresholds.0[1..]
        .iter()
        .position(|&upper| raw <= upper)
        .unwrap_or(NUM_LEVELS - 1);

    Band(band as u8)
}

#[cfg(test)]
mod tests {
    use super::{Band, ThresholdTable, classify};
    use crate::errors::ConfigError;

    #[test]
    fn test_boundaries() {
        let t = ThresholdTable::default();

        assert_eq!(classify(0, &t), Band::EMPTY);
        assert_eq!(classify(645, &t), Band::EMPTY);
        assert_eq!(classify(655, &t), Band::EMPTY);
        assert_eq!(classify(656, &t), Band(1));
        assert_eq!(classify(696, &t), Band(1));
        assert_eq!(classify(697, &t), Band(2));
        assert_eq!(classify(733, &t), Band(2));
        assert_eq!(classify(737, &t), Band(2));
        assert_eq!(classify(738, &t), Band(3));
        assert_eq!(classify(778, &t), Band(3));
        assert_eq!(classify(819, &t), Band(4));
        assert_eq!(classify(822, &t), Band(5));
        assert_eq!(classify(860, &t), Band(5));
        assert_eq!(classify(861, &t), Band::OVER);
        assert_eq!(classify(u16::MAX, &t), Band::OVER);
    }

    #[test]
    fn test_rejects_flat_table() {
        let err = ThresholdTable::try_new([645, 655, 696, 696, 778, 819, 860]).unwrap_err();

        assert_eq!(
            err,
            ConfigError::ThresholdsNotAscending {
                index: 3,
                previous: 696,
                value: 696,
            }
        );
    }

    #[test]
    fn test_rejects_descending_table() {
        let err = ThresholdTable::try_new([860, 819, 778, 737, 696, 655, 645]).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::ThresholdsNotAscending { index: 1, .. }
        ));
    }

    #[test]
    fn test_band_range() {
        assert_eq!(Band::new(6), Some(Band::OVER));
        assert_eq!(Band::new(7), None);
        assert!(Band::EMPTY.is_extreme());
        assert!(Band::OVER.is_extreme());
        assert!(!Band(3).is_extreme());
    }
}
