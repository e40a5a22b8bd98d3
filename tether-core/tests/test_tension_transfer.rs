//! Tension transfer along a hanging three-mass chain

use glam::DVec3;
use tether_core::config::SimulationConfig;
use tether_core::engine::World;
use tether_core::forces::{ChainTension, ForceModel};
use tether_core::input::InputSnapshot;
use tether_core::link::{resolve_all, Tension};
use tether_core::simulation::{MassSimulation, Simulation};
use tether_core::tests::test_helpers::{anchor, approx_eq_vec, empty_world, link_chain, movable};

/// Anchor at the origin, two masses hanging below it at rest length, the
/// tail moving straight down.
fn hanging_chain() -> (World, Vec<usize>) {
    let mut world = empty_world(DVec3::ZERO, 1.0);
    world.add_mass(anchor(DVec3::ZERO));
    world.add_mass(movable(DVec3::new(0.0, -5.0, 0.0)));
    world.add_mass(movable(DVec3::new(0.0, -10.0, 0.0)).with_velocity(DVec3::new(0.0, -2.0, 0.0)));
    let chain = link_chain(&mut world, 5.0);
    (world, chain)
}

#[test]
fn test_stretching_momentum_is_transferred_with_loss() {
    let (mut world, chain) = hanging_chain();
    let mut model = ChainTension::new(chain, 0.8, 0.0);
    model.apply(&mut world, &InputSnapshot::empty());

    // 0.8 of the tail's momentum along the rope lands on its neighbour...
    assert!(approx_eq_vec(world.masses[1].pending_acceleration(), DVec3::new(0.0, -1.6, 0.0), 1e-12));
    // ...and the tail's own component along the rope is cancelled.
    assert!(approx_eq_vec(world.masses[2].pending_acceleration(), DVec3::new(0.0, 2.0, 0.0), 1e-12));
    assert_eq!(world.masses[0].pending_acceleration(), DVec3::ZERO);
}

#[test]
fn test_tick_cancels_rope_component() {
    let (world, chain) = hanging_chain();
    let mut sim = MassSimulation::new("chain", world, ChainTension::new(chain, 0.8, 0.0));
    sim.tick(&InputSnapshot::empty());

    let world = sim.world();
    assert!(approx_eq_vec(world.masses[2].velocity, DVec3::ZERO, 1e-12));
    assert!(approx_eq_vec(world.masses[1].velocity, DVec3::new(0.0, -1.6, 0.0), 1e-12));
    // The neighbour moved past rest length and was clamped back.
    assert!(approx_eq_vec(world.masses[1].position, DVec3::new(0.0, -5.0, 0.0), 1e-12));
    assert_eq!(world.masses[0].position, DVec3::ZERO);
}

#[test]
fn test_compressing_motion_is_not_transferred() {
    let (mut world, _) = hanging_chain();
    world.masses[2].velocity = DVec3::new(0.0, 2.0, 0.0);
    let taut = resolve_all(&mut world.links, &mut world.masses, 0.8);

    assert_eq!(taut, 2);
    assert_eq!(world.masses[1].pending_acceleration(), DVec3::ZERO);
    assert_eq!(world.masses[2].pending_acceleration(), DVec3::ZERO);
}

#[test]
fn test_slack_link_transfers_nothing() {
    let (mut world, _) = hanging_chain();
    world.masses[2].position = DVec3::new(0.0, -7.0, 0.0);
    assert_eq!(
        world.links[1].resolve_tension(&mut world.masses, 0.8),
        Tension::Slack
    );
    assert_eq!(world.masses[1].pending_acceleration(), DVec3::ZERO);
}

#[test]
fn test_sideways_motion_is_not_transferred() {
    let (mut world, _) = hanging_chain();
    world.masses[2].velocity = DVec3::new(3.0, 0.0, 0.0);
    resolve_all(&mut world.links, &mut world.masses, 0.8);
    assert_eq!(world.masses[1].pending_acceleration(), DVec3::ZERO);
}

#[test]
fn test_middle_mass_stretching_anchor_segment() {
    let (mut world, chain) = hanging_chain();
    world.masses[1].velocity = DVec3::new(0.0, -2.0, 0.0);
    world.masses[2].velocity = DVec3::ZERO;
    let mut model = ChainTension::new(chain.clone(), 0.8, 0.0);
    model.apply(&mut world, &InputSnapshot::empty());

    // The anchor takes nothing; the middle loses its rope component.
    assert_eq!(world.masses[0].pending_acceleration(), DVec3::ZERO);
    assert!(approx_eq_vec(world.masses[1].pending_acceleration(), DVec3::new(0.0, 2.0, 0.0), 1e-12));
    assert_eq!(world.masses[2].pending_acceleration(), DVec3::ZERO);

    let (mut world, _) = hanging_chain();
    world.masses[1].velocity = DVec3::new(0.0, -2.0, 0.0);
    world.masses[2].velocity = DVec3::ZERO;
    let mut sim = MassSimulation::new("anchor segment", world, ChainTension::new(chain, 0.8, 0.0));
    sim.tick(&InputSnapshot::empty());
    let world = sim.world();
    assert!(approx_eq_vec(world.masses[1].velocity, DVec3::ZERO, 1e-12));
    assert!(approx_eq_vec(world.masses[1].position, DVec3::new(0.0, -5.0, 0.0), 1e-12));
    assert_eq!(world.masses[0].position, DVec3::ZERO);
}

#[test]
fn test_overloaded_link_breaks_and_releases_tail() {
    let config = SimulationConfig::new()
        .with_gravity(DVec3::ZERO)
        .with_friction(1.0)
        .with_max_link_energy(1.0);
    let mut world = World::new(&config);
    world.add_mass(anchor(DVec3::ZERO));
    world.add_mass(movable(DVec3::new(0.0, -5.0, 0.0)));
    world.add_mass(movable(DVec3::new(0.0, -10.0, 0.0)).with_velocity(DVec3::new(0.0, -2.0, 0.0)));
    let chain = link_chain(&mut world, 5.0);

    let mut sim = MassSimulation::new("breaking", world, ChainTension::new(chain, 0.8, 0.0));
    sim.tick(&InputSnapshot::empty());
    sim.tick(&InputSnapshot::empty());

    let world = sim.world();
    assert!(!world.links[0].broken);
    assert!(world.links[1].broken);
    // Nothing handed on and no clamping: the tail keeps flying.
    assert_eq!(world.masses[1].velocity, DVec3::ZERO);
    assert!(approx_eq_vec(world.masses[2].position, DVec3::new(0.0, -14.0, 0.0), 1e-12));
    assert_eq!(world.segments().count(), 1);
    assert_eq!(sim.diagnostics().broken_links, 1);

    sim.reset();
    assert!(sim.world().links.iter().all(|l| !l.broken));
}
