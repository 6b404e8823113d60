use plotgeom_rs::core::{Aes, Aesthetics};
use plotgeom_rs::position::{DodgePos, JitterPos, PositionAdjustment, StackPos, StackingMode};
use proptest::prelude::*;

fn column_snapshot(ys: Vec<f64>, groups: Vec<i32>) -> Aesthetics {
    let count = ys.len();
    Aesthetics::builder(count)
        .numeric_series(Aes::X, vec![0.0; count])
        .numeric_series(Aes::Y, ys)
        .group_series(groups)
        .build()
        .expect("valid snapshot")
}

proptest! {
    #[test]
    fn stacking_keeps_horizontal_positions_property(
        ys in proptest::collection::vec(-1_000.0f64..1_000.0, 1..32)
    ) {
        let groups = vec![0; ys.len()];
        let aesthetics = column_snapshot(ys, groups);
        let stack = StackPos::stack(&aesthetics, StackingMode::All);

        for p in aesthetics.data_points() {
            let location = p.finite_location().expect("finite location");
            let moved = stack.translate(location, &p);
            prop_assert_eq!(moved.x, location.x);
            prop_assert!(moved.y.abs() + 1e-9 >= location.y.abs());
            if location.y != 0.0 {
                prop_assert_eq!(moved.y.signum(), location.y.signum());
            }
        }
    }

    #[test]
    fn fill_tops_stay_within_the_unit_interval_property(
        ys in proptest::collection::vec(0.01f64..1_000.0, 1..24)
    ) {
        let groups: Vec<i32> = (0..ys.len() as i32).collect();
        let aesthetics = column_snapshot(ys, groups);
        let fill = StackPos::fill(&aesthetics, StackingMode::Groups);

        let tops: Vec<f64> = aesthetics
            .data_points()
            .map(|p| {
                fill.translate(p.finite_location().expect("finite location"), &p)
                    .y
            })
            .collect();

        for pair in tops.windows(2) {
            prop_assert!(pair[0] <= pair[1] + 1e-9);
        }
        for &top in &tops {
            prop_assert!(top > 0.0);
            prop_assert!(top <= 1.0 + 1e-9);
        }
        let last = tops.last().copied().expect("at least one point");
        prop_assert!((last - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn dodge_keeps_vertical_positions_property(
        ys in proptest::collection::vec(-1_000.0f64..1_000.0, 2..24),
        group_count in 1usize..5
    ) {
        let groups: Vec<i32> = (0..ys.len())
            .map(|index| (index % group_count) as i32)
            .collect();
        let aesthetics = column_snapshot(ys, groups);
        let dodge = DodgePos::new(&aesthetics, None);

        for p in aesthetics.data_points() {
            let location = p.finite_location().expect("finite location");
            let moved = dodge.translate(location, &p);
            prop_assert_eq!(moved.y, location.y);
            prop_assert!((moved.x - location.x).abs() <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn jitter_is_reproducible_and_bounded_property(
        ys in proptest::collection::vec(-100.0f64..100.0, 1..24),
        width in 0.0f64..2.0,
        height in 0.0f64..2.0,
        seed in 0u64..1_000
    ) {
        let groups = vec![0; ys.len()];
        let aesthetics = column_snapshot(ys, groups);
        let first = JitterPos::new(&aesthetics, Some(width), Some(height), seed);
        let second = JitterPos::new(&aesthetics, Some(width), Some(height), seed);
        let y_extent = height * aesthetics.resolution(Aes::Y);

        for p in aesthetics.data_points() {
            let location = p.finite_location().expect("finite location");
            let a = first.translate(location, &p);
            let b = second.translate(location, &p);
            prop_assert_eq!(a, b);
            prop_assert!((a.x - location.x).abs() <= width + 1e-9);
            prop_assert!((a.y - location.y).abs() <= y_extent + 1e-9);
        }
    }
}
