//! Identical construction and identical input give identical state

use tether_core::config::{NetConfig, RopeConfig, SwarmConfig};
use tether_core::input::{InputSnapshot, Key};
use tether_core::scenario;
use tether_core::simulation::Simulation;

/// Input pattern that changes every few ticks.
fn input_at(tick: u64) -> InputSnapshot {
    match (tick / 7) % 4 {
        0 => InputSnapshot::empty(),
        1 => InputSnapshot::empty().with(Key::NudgeLeft),
        2 => InputSnapshot::empty().with(Key::NudgeUp).with(Key::NudgeRight),
        _ => InputSnapshot::empty().with(Key::NudgeDown),
    }
}

fn drive(sim: &mut dyn Simulation, ticks: u64) {
    for tick in 0..ticks {
        sim.tick(&input_at(tick));
    }
}

#[test]
fn test_rope_is_deterministic() {
    let config = RopeConfig::default();
    let mut a = scenario::rope(&config).unwrap();
    let mut b = scenario::rope(&config).unwrap();
    drive(&mut a, 400);
    drive(&mut b, 400);
    assert_eq!(a.world().masses, b.world().masses);
}

#[test]
fn test_net_is_deterministic() {
    let config = NetConfig {
        size: 6,
        ..NetConfig::default()
    };
    let mut a = scenario::net(&config).unwrap();
    let mut b = scenario::net(&config).unwrap();
    drive(&mut a, 200);
    drive(&mut b, 200);
    assert_eq!(a.world().masses, b.world().masses);
}

#[test]
fn test_swarm_is_deterministic() {
    let config = SwarmConfig {
        points: 12,
        ..SwarmConfig::default()
    };
    let mut a = scenario::swarm(&config).unwrap();
    let mut b = scenario::swarm(&config).unwrap();
    drive(&mut a, 200);
    drive(&mut b, 200);
    assert_eq!(a.world().masses, b.world().masses);
}

#[test]
fn test_reset_replays_identically() {
    let config = NetConfig {
        size: 5,
        ..NetConfig::default()
    };
    let mut net = scenario::net(&config).unwrap();
    drive(&mut net, 150);
    let first_run = net.world().masses.clone();

    net.reset();
    assert_eq!(net.ticks(), 0);
    drive(&mut net, 150);
    assert_eq!(net.world().masses, first_run);
}
