//! Randomized checks for the pan translation gate
//!
//! The camera must follow the target by exactly the target delta during a user pan,
//! and must stay bit-for-bit where it was in every other situation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use viewcrate_core::{apply_pan_translation, InteractionMode, Point3d, DEFAULT_PAN_EPSILON};

const MODES: [InteractionMode; 7] = [
    InteractionMode::None,
    InteractionMode::Pan,
    InteractionMode::Pinch,
    InteractionMode::Orbit,
    InteractionMode::Dolly,
    InteractionMode::Tilt,
    InteractionMode::Other,
];

fn random_point(rng: &mut StdRng, extent: f64) -> Point3d {
    Point3d::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

/// Next target that is either identical, a tiny nudge, or a regular move
fn random_next_target(rng: &mut StdRng, prev: &Point3d) -> Point3d {
    match rng.gen_range(0..4) {
        0 => *prev,
        1 => prev + random_point(rng, 1e-9).coords,
        _ => prev + random_point(rng, 50.0).coords,
    }
}

fn same_bits(a: &Point3d, b: &Point3d) -> bool {
    a.x.to_bits() == b.x.to_bits() && a.y.to_bits() == b.y.to_bits() && a.z.to_bits() == b.z.to_bits()
}

#[test]
fn test_pan_translation_invariant_fuzz() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);
    let mut translated = 0usize;

    for _ in 0..50_000 {
        let camera = random_point(&mut rng, 500.0);
        let prev_target = random_point(&mut rng, 500.0);
        let next_target = random_next_target(&mut rng, &prev_target);
        let interacting = rng.gen_bool(0.5);
        let mode = MODES[rng.gen_range(0..MODES.len())];

        let result = apply_pan_translation(
            &camera,
            &prev_target,
            &next_target,
            interacting,
            mode,
            DEFAULT_PAN_EPSILON,
        );

        let delta = next_target - prev_target;
        let expected = interacting && mode == InteractionMode::Pan && delta.norm() > DEFAULT_PAN_EPSILON;
        assert_eq!(result.should_translate, expected);

        if expected {
            translated += 1;
            assert!(same_bits(&result.next_camera, &(camera + delta)));
        } else {
            assert!(same_bits(&result.next_camera, &camera));
        }
    }

    // the generator must actually exercise both branches
    assert!(translated > 1_000);
}

#[test]
fn test_pinch_never_translates_camera() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0002);

    for _ in 0..30_000 {
        let camera = random_point(&mut rng, 500.0);
        let prev_target = random_point(&mut rng, 500.0);
        let exponent = rng.gen_range(-12..6);
        let scale = 10f64.powi(exponent);
        let next_target = prev_target + random_point(&mut rng, 1.0).coords * scale;

        let result = apply_pan_translation(
            &camera,
            &prev_target,
            &next_target,
            true,
            InteractionMode::Pinch,
            DEFAULT_PAN_EPSILON,
        );

        assert!(!result.should_translate);
        assert!(same_bits(&result.next_camera, &camera));
    }
}
