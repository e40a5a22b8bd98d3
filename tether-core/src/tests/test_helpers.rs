//! Test helper utilities for tether tests

use crate::config::SimulationConfig;
use crate::engine::World;
use crate::mass::PointMass;
use crate::vector::Vector;
use glam::DVec3;

/// Check if two floating point values are approximately equal within tolerance
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Check if two vectors are component-wise equal within tolerance
pub fn approx_eq_vec(a: Vector, b: Vector, tol: f64) -> bool {
    approx_eq(a.x, b.x, tol) && approx_eq(a.y, b.y, tol) && approx_eq(a.z, b.z, tol)
}

/// A world with the given gravity and friction and no masses
pub fn empty_world(gravity: Vector, friction: f64) -> World {
    World::new(
        &SimulationConfig::default()
            .with_gravity(gravity)
            .with_friction(friction),
    )
}

/// A weightless, undamped world with unit masses at `positions`
pub fn world_with_masses(positions: &[Vector]) -> World {
    let mut world = empty_world(DVec3::ZERO, 1.0);
    for &p in positions {
        world.add_mass(movable(p));
    }
    world
}

/// Unit mass at `position`
pub fn movable(position: Vector) -> PointMass {
    match PointMass::new(1.0, position) {
        Ok(m) => m,
        Err(e) => panic!("unit mass rejected: {e}"),
    }
}

/// Unit anchor at `position`
pub fn anchor(position: Vector) -> PointMass {
    match PointMass::anchor(1.0, position) {
        Ok(m) => m,
        Err(e) => panic!("unit anchor rejected: {e}"),
    }
}

/// Link consecutive masses in `world` with `rest_length`; returns the chain indices
pub fn link_chain(world: &mut World, rest_length: f64) -> Vec<usize> {
    let chain: Vec<usize> = (0..world.masses.len()).collect();
    for pair in chain.windows(2) {
        if let Err(e) = world.link(pair[0], pair[1], rest_length) {
            panic!("chain link rejected: {e}");
        }
    }
    chain
}
