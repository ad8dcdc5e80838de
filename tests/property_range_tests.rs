use proptest::prelude::*;
use time_range_slider::core::{
    HandleKind, RangeState, hours_to_percent, percent_to_hours,
};

proptest! {
    #[test]
    fn accumulated_deltas_equal_single_delta_property(
        start_hours in 0u32..=24,
        deltas in prop::collection::vec(-60.0f64..60.0, 1..32)
    ) {
        let mut stepped = RangeState::new(start_hours, 24);
        for delta in &deltas {
            stepped.apply_delta(HandleKind::Start, *delta);
        }

        let total: f64 = deltas.iter().sum();
        let mut direct = RangeState::new(start_hours, 24);
        direct.apply_delta(HandleKind::Start, total);

        let stepped_percent = stepped.percent(HandleKind::Start);
        let direct_percent = direct.percent(HandleKind::Start);
        prop_assert!((stepped_percent - direct_percent).abs() <= 1e-9);

        // Skip inputs that sit on a rounding boundary within float noise.
        let raw_hours = direct_percent.clamp(0.0, 100.0) * 24.0 / 100.0;
        if (raw_hours.fract() - 0.5).abs() > 1e-6 {
            prop_assert_eq!(stepped.derive().start_hours, direct.derive().start_hours);
        }
    }

    #[test]
    fn clamping_has_no_hysteresis_property(
        start_hours in 0u32..=24,
        overshoot in 0.0f64..500.0,
        back in 0.0f64..100.0
    ) {
        let mut state = RangeState::new(start_hours, 24);
        let to_edge = 100.0 - state.percent(HandleKind::Start);
        state.apply_delta(HandleKind::Start, to_edge + overshoot);
        prop_assert_eq!(state.derive().clamped_start_percent, 100.0);
        prop_assert_eq!(state.derive().start_hours, 24);

        state.apply_delta(HandleKind::Start, -(overshoot + back));
        let expected = 100.0 - back;
        prop_assert!((state.percent(HandleKind::Start) - expected).abs() <= 1e-9);
    }

    #[test]
    fn whole_hours_round_trip_property(hours in 0u32..=24) {
        prop_assert_eq!(percent_to_hours(hours_to_percent(hours)), hours);
        let state = RangeState::new(hours, hours);
        prop_assert_eq!(state.derive().hours(), (hours, hours));
    }
}
