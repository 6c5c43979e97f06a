//! Properties of the classifier and the hysteresis rules over random threshold tables.

use battery_lights_core::{Band, IndicatorState, NUM_LEVELS, ThresholdTable, classify, transition};
use proptest::prelude::*;

const FULL_SCALE: u16 = 1023;

// seven distinct counts. a BTreeSet hands them back sorted
fn threshold_strategy() -> impl Strategy<Value = ThresholdTable> {
    prop::collection::btree_set(0..=FULL_SCALE, NUM_LEVELS).prop_map(|set| {
        let mut thresholds = [0u16; NUM_LEVELS];
        for (x, t) in thresholds.iter_mut().zip(set) {
            *x = t;
        }
        ThresholdTable::try_new(thresholds).expect("sorted and distinct")
    })
}

fn state_strategy() -> impl Strategy<Value = IndicatorState> {
    (0..NUM_LEVELS as u8).prop_map(|x| IndicatorState::new(x).unwrap())
}

proptest! {
    #[test]
    fn classify_is_in_range_and_monotonic(thresholds in threshold_strategy()) {
        let mut last = Band::EMPTY;

        for raw in 0..=FULL_SCALE {
            let band = classify(raw, &thresholds);

            prop_assert!(band.index() < NUM_LEVELS);
            prop_assert!(band >= last, "band dropped from {} to {} at {}", last, band, raw);

            last = band;
        }
    }

    #[test]
    fn same_band_keeps_state(
        thresholds in threshold_strategy(),
        raw in 0..=FULL_SCALE,
        margin in 0u16..100,
    ) {
        let band = classify(raw, &thresholds);
        let prev = IndicatorState::from(band);

        prop_assert_eq!(transition(prev, raw, band, &thresholds, margin), prev);
    }

    #[test]
    fn extremes_ignore_prev_and_margin(
        thresholds in threshold_strategy(),
        prev in state_strategy(),
        pick in 0..=FULL_SCALE,
        high in any::<bool>(),
        margin in any::<u16>(),
    ) {
        let t = thresholds.as_array();

        // land in band 0 (..=T[1]) or band 6 (T[6]+1..=FULL_SCALE)
        let raw = if high && t[6] < FULL_SCALE {
            t[6] + 1 + pick % (FULL_SCALE - t[6])
        } else {
            pick % (t[1] + 1)
        };

        let band = classify(raw, &thresholds);
        prop_assert!(band.is_extreme());

        prop_assert_eq!(
            transition(prev, raw, band, &thresholds, margin),
            IndicatorState::from(band)
        );
    }

    #[test]
    fn result_is_prev_or_band(
        thresholds in threshold_strategy(),
        prev in state_strategy(),
        raw in 0..=FULL_SCALE,
        margin in 0u16..100,
    ) {
        let band = classify(raw, &thresholds);
        let next = transition(prev, raw, band, &thresholds, margin);

        prop_assert!(next == prev || next == IndicatorState::from(band));
    }

    #[test]
    fn zero_margin_follows_the_band(
        thresholds in threshold_strategy(),
        prev in state_strategy(),
        raw in 0..=FULL_SCALE,
    ) {
        let band = classify(raw, &thresholds);
        let next = transition(prev, raw, band, &thresholds, 0);

        // without a margin only a reading sitting exactly on a falling boundary can hold
        if next != IndicatorState::from(band) {
            prop_assert!(band < prev.as_band());
            prop_assert_eq!(raw, thresholds.lower_bound(prev.as_band()));
        }
    }
}
