//! Turn noisy band changes into stable indicator changes.
//!
//! A reading that wobbles a few counts around a boundary would otherwise flicker the lights. The
//! indicator only moves once a reading clears the boundary by `margin` counts. Empty and
//! over-voltage always take effect on the first reading.
use core::fmt;

use postcard::experimental::max_size::MaxSize;
use serde::{Deserialize, Serialize};

use crate::band::{Band, NUM_LEVELS, RawSample, ThresholdTable, classify};
use crate::errors::ConfigError;

/// The stabilized level shown on the lights.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, MaxSize,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(try_from = "u8", into = "u8")]
pub struct IndicatorState(u8);

impl IndicatorState {
    /// Assume full until the first real reading says otherwise.
    pub const INITIAL: Self = Self(NUM_LEVELS as u8 - 1);

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

    #[inline]
    pub const fn as_band(self) -> Band {
        match Band::new(self.0) {
            Some(x) => x,
            None => unreachable!(),
        }
    }
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl From<Band> for IndicatorState {
    fn from(band: Band) -> Self {
        Self(band.index() as u8)
    }
}

impl TryFrom<u8> for IndicatorState {
    type Error = ConfigError;

    fn try_from(x: u8) -> Result<Self, Self::Error> {
        Self::new(x).ok_or(ConfigError::InvalidLevel(x))
    }
}

impl From<IndicatorState> for u8 {
    fn from(x: IndicatorState) -> Self {
        x.0
    }
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Decide the next indicator state. Rules are checked in order and the first match wins:
///
/// 1. an extreme band (0 or 6) is taken as-is
/// 2. a lower band is taken once `raw` is below the current state's lower bound by more than
///    `margin`
/// 3. a higher band is taken once `raw` is above the new band's lower bound by more than `margin`
/// 4. otherwise nothing changes
pub fn transition(
    prev: IndicatorState,
    raw: RawSample,
    band: Band,
    thresholds: &ThresholdTable,
    margin: u16,
) -> IndicatorState {
    if band.is_extreme() {
        return band.into();
    }

    // widen so a small threshold minus a large margin can't wrap
    let raw = u32::from(raw);
    let margin = u32::from(margin);
    let current = prev.as_band();

    if band < current && raw + margin < u32::from(thresholds.lower_bound(current)) {
        return band.into();
    }

    if band > current && raw > u32::from(thresholds.lower_bound(band)) + margin {
        return band.into();
    }

    prev
}

/// Classification and hysteresis bundled with the table and margin they need.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hysteresis {
    pub thresholds: ThresholdTable,
    pub margin: u16,
}

impl Hysteresis {
    pub fn new(thresholds: ThresholdTable, margin: u16) -> Self {
        Self { thresholds, margin }
    }

    /// Returns the band the sample fell in and the state the indicator should show.
    pub fn step(&self, prev: IndicatorState, raw: RawSample) -> (Band, IndicatorState) {
        let band = classify(raw, &self.thresholds);

        let next = transition(prev, raw, band, &self.thresholds, self.margin);

        (band, next)
    }
}

#[cfg(test)]
mod tests {
    use super::{Hysteresis, IndicatorState, transition};
    use crate::band::{Band, ThresholdTable, classify};

    fn state(x: u8) -> IndicatorState {
        IndicatorState::new(x).unwrap()
    }

    fn step(prev: u8, raw: u16) -> IndicatorState {
        let t = ThresholdTable::default();
        let band = classify(raw, &t);
        transition(state(prev), raw, band, &t, 5)
    }

    #[test]
    fn test_falling_needs_margin() {
        // 733 is band 2, but the drop below 737 is only 4 counts
        assert_eq!(step(3, 733), state(3));
        assert_eq!(step(3, 732), state(3));
        assert_eq!(step(3, 731), state(2));
        assert_eq!(step(3, 730), state(2));
    }

    #[test]
    fn test_rising_needs_margin() {
        // 822 is band 5, but it needs to clear 819 + 5
        assert_eq!(step(2, 822), state(2));
        assert_eq!(step(2, 824), state(2));
        assert_eq!(step(2, 825), state(5));
    }

    #[test]
    fn test_same_band_is_sticky() {
        for prev in 1..=5 {
            let t = ThresholdTable::default();

            // a count just above the state's lower bound classifies into that same state
            let raw = t.lower_bound(Band::new(prev).unwrap()) + 1;

            assert_eq!(step(prev, raw), state(prev));
        }
    }

    #[test]
    fn test_extremes_are_immediate() {
        for prev in 0..=6 {
            assert_eq!(step(prev, 0), state(0));
            assert_eq!(step(prev, 655), state(0));
            assert_eq!(step(prev, 861), state(6));
            assert_eq!(step(prev, 1023), state(6));
        }
    }

    #[test]
    fn test_leaving_an_extreme() {
        // from empty, band 1 still has to clear 655 + 5
        assert_eq!(step(0, 658), state(0));
        assert_eq!(step(0, 661), state(1));

        // from over range, band 5 has to drop below 860 - 5
        assert_eq!(step(6, 858), state(6));
        assert_eq!(step(6, 854), state(5));
    }

    #[test]
    fn test_huge_margin_does_not_wrap() {
        let t = ThresholdTable::try_new([1, 2, 3, 4, 5, 6, 7]).unwrap();

        let band = classify(4, &t);
        assert_eq!(band, Band::new(2).unwrap());

        assert_eq!(transition(state(5), 4, band, &t, u16::MAX), state(5));
        assert_eq!(transition(state(1), 4, band, &t, u16::MAX), state(1));
    }

    #[test]
    fn test_step_matches_transition() {
        let h = Hysteresis::new(ThresholdTable::default(), 5);

        assert_eq!(h.step(state(3), 730), (Band::new(2).unwrap(), state(2)));
        assert_eq!(h.step(state(3), 733), (Band::new(2).unwrap(), state(3)));
    }

    #[test]
    fn test_level_range() {
        assert_eq!(IndicatorState::default(), state(6));
        assert!(IndicatorState::new(7).is_none());
        assert!(IndicatorState::try_from(9u8).is_err());
    }
}
