//! Degenerate vectors poison state without stopping the simulation

use glam::DVec3;
use tether_core::config::RopeConfig;
use tether_core::diagnostics::{format_diagnostics, Diagnostics};
use tether_core::input::InputSnapshot;
use tether_core::scenario;
use tether_core::simulation::Simulation;
use tether_core::vector::{PointExt, VectorExt};

#[test]
fn test_unguarded_operations_yield_nan() {
    let mut v = DVec3::ZERO;
    v.normalize_in_place();
    assert!(v.is_nan());
    assert!(DVec3::ONE.direction_to(DVec3::ONE).is_nan());
    // The projection is guarded.
    assert_eq!(DVec3::ONE.projection_on(DVec3::ZERO), DVec3::ZERO);
}

#[test]
fn test_nan_spreads_down_the_chain_and_ticking_continues() {
    let config = RopeConfig {
        points: 5,
        ..RopeConfig::default()
    };
    let mut rope = scenario::rope(&config).unwrap();

    let mut poison = DVec3::ZERO;
    poison.normalize_in_place();
    rope.world_mut().masses[2].velocity = poison;

    rope.tick(&InputSnapshot::empty());
    let diagnostics = rope.diagnostics();
    assert_eq!(diagnostics.non_finite, vec![2, 3, 4]);
    assert!(format_diagnostics(&diagnostics).contains("3 non-finite"));

    for _ in 0..20 {
        rope.tick(&InputSnapshot::empty());
    }
    assert_eq!(rope.ticks(), 21);
    assert!(!Diagnostics::of(rope.world()).is_finite());
    assert_eq!(rope.world().masses[0].position, DVec3::ZERO);
}

#[test]
fn test_reset_recovers_from_divergence() {
    let mut rope = scenario::rope(&RopeConfig::default()).unwrap();
    rope.world_mut().masses[1].position = DVec3::splat(f64::NAN);
    rope.tick(&InputSnapshot::empty());
    assert!(!rope.diagnostics().is_finite());

    rope.reset();
    assert!(rope.diagnostics().is_finite());
}
