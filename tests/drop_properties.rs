//! Invariants of settled drops over random seeds and release positions

use plinko_sim::BoardSettings;
use plinko_sim::sim::{Chip, DropPhase, PegLayout, RngState, landing_slot, random_drop, simulate_drop, step};
use proptest::prelude::*;

fn default_board() -> (BoardSettings, PegLayout) {
    let settings = BoardSettings::default();
    let layout = PegLayout::from_settings(&settings);
    (settings, layout)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn landing_slot_always_on_board(x in prop::num::f64::ANY) {
        let settings = BoardSettings::default();
        prop_assert!(landing_slot(x, &settings) < settings.columns);
    }

    #[test]
    fn settled_drop_invariants(seed in any::<u64>(), drop_x in 10.0f64..590.0) {
        let (settings, layout) = default_board();
        let result = simulate_drop(&layout, &settings, drop_x, &mut RngState::new(seed).to_rng()).unwrap();

        prop_assert!(result.final_slot < settings.columns);
        prop_assert_eq!(result.score, settings.slot_prizes[result.final_slot as usize]);
        prop_assert_eq!(result.horizontal_distance, (result.final_x - result.drop_x).abs());
        prop_assert_eq!(result.drop_x, drop_x);
        prop_assert_eq!(result.path.len() as u32, result.frames);
        prop_assert!(result.final_x >= settings.chip_radius);
        prop_assert!(result.final_x <= settings.canvas_width - settings.chip_radius);
        prop_assert!(result.frames > 0);
    }

    #[test]
    fn same_seed_same_result(seed in any::<u64>()) {
        let (settings, layout) = default_board();
        let a = random_drop(&layout, &settings, &mut RngState::new(seed).to_rng()).unwrap();
        let b = random_drop(&layout, &settings, &mut RngState::new(seed).to_rng()).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn collisions_never_decrease(seed in any::<u64>(), drop_x in 10.0f64..590.0) {
        let (settings, layout) = default_board();
        let mut rng = RngState::new(seed).to_rng();
        let mut chip = Chip::launch(drop_x, &settings, &mut rng);

        let mut last = chip.peg_collisions;
        while step(&mut chip, &layout, &settings, &mut rng) == DropPhase::Falling {
            prop_assert!(chip.peg_collisions >= last);
            last = chip.peg_collisions;
            prop_assert!(chip.frames < settings.max_frames);
        }
    }
}
