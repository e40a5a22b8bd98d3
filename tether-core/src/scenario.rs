//! Built-in scenarios.
//!
//! Each builder validates its configuration, lays out the initial world and
//! pairs it with the force model that drives it. Random layouts use a seeded
//! RNG, so a reset reproduces exactly the same initial state.

use crate::config::{NetConfig, RopeConfig, SwarmConfig};
use crate::engine::World;
use crate::error::SimError;
use crate::forces::{ChainTension, GridMeshTension, NBodyRepulsion};
use crate::mass::PointMass;
use crate::simulation::MassSimulation;
use glam::DVec3;
use log::debug;
use rand::prelude::*;

pub type Rope = MassSimulation<ChainTension>;
pub type Net = MassSimulation<GridMeshTension>;
pub type Swarm = MassSimulation<NBodyRepulsion>;

/// A horizontal chain hanging from an anchor at the origin.
///
/// Mass `i` starts at `(-i * rest_length, 0, 0)`; mass 0 is the anchor.
pub fn rope(config: &RopeConfig) -> Result<Rope, SimError> {
    let sim = &config.simulation;
    sim.validate()?;
    if config.points < 2 {
        return Err(SimError::TooFewPoints {
            count: config.points,
            min: 2,
        });
    }

    let mut world = World::new(sim);
    let mut chain = Vec::with_capacity(config.points);
    chain.push(world.add_mass(PointMass::anchor(config.mass, DVec3::ZERO)?));
    for i in 1..config.points {
        let position = DVec3::new(-(i as f64) * sim.rest_length, 0.0, 0.0);
        let index = world.add_mass(PointMass::new(config.mass, position)?);
        world.link(chain[i - 1], index, sim.rest_length)?;
        chain.push(index);
    }
    debug!("rope: {} masses, {} links", world.masses.len(), world.links.len());

    let model = ChainTension::new(chain, sim.tension_loss_ratio, sim.stiffness)
        .with_anchor_step(config.nudge_step);
    Ok(MassSimulation::new("rope", world, model))
}

/// Index of grid cell `(x, z)` in a net of `size × size` masses.
pub fn grid_index(size: usize, x: usize, z: usize) -> usize {
    x * size + z
}

/// A square net in the x/z plane with an immovable border.
///
/// Every mass is linked to its right and far neighbour with the pull
/// threshold as rest length.
pub fn net(config: &NetConfig) -> Result<Net, SimError> {
    let sim = &config.simulation;
    sim.validate()?;
    let size = config.size;
    if size < 3 {
        return Err(SimError::GridTooSmall { size });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut world = World::new(sim);
    let mut edges = Vec::new();
    let centre = (size - 1) as f64 / 2.0;
    let wobble = config.jitter * config.spacing;

    for x in 0..size {
        for z in 0..size {
            let jitter = DVec3::new(
                rng.gen_range(-1.0..=1.0) * wobble,
                0.0,
                rng.gen_range(-1.0..=1.0) * wobble,
            );
            let position = DVec3::new(
                (x as f64 - centre) * config.spacing,
                0.0,
                (z as f64 - centre) * config.spacing,
            ) + jitter;
            let border = x == 0 || z == 0 || x == size - 1 || z == size - 1;
            let mass = if border {
                PointMass::anchor(1.0, position)?
            } else {
                PointMass::new(1.0, position)?
            };
            let index = world.add_mass(mass);
            if border {
                edges.push(index);
            }
        }
    }

    for x in 0..size {
        for z in 0..size {
            let here = grid_index(size, x, z);
            if x + 1 < size {
                world.link(here, grid_index(size, x + 1, z), config.threshold)?;
            }
            if z + 1 < size {
                world.link(here, grid_index(size, x, z + 1), config.threshold)?;
            }
        }
    }
    debug!(
        "net: {size}x{size}, {} links, {} edge masses",
        world.links.len(),
        edges.len()
    );

    let model = GridMeshTension::new(config.pull, edges, config.edge_step);
    Ok(MassSimulation::new("net", world, model))
}

/// Mutually repelling masses scattered uniformly inside a sphere.
pub fn swarm(config: &SwarmConfig) -> Result<Swarm, SimError> {
    let sim = &config.simulation;
    sim.validate()?;
    if config.points < 2 {
        return Err(SimError::TooFewPoints {
            count: config.points,
            min: 2,
        });
    }
    let radius = config.radius;
    if !(radius.is_finite() && radius > 0.0) {
        return Err(SimError::InvalidRadius { radius });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut world = World::new(sim);
    while world.masses.len() < config.points {
        let candidate = DVec3::new(
            rng.gen_range(-radius..=radius),
            rng.gen_range(-radius..=radius),
            rng.gen_range(-radius..=radius),
        );
        if candidate.length() <= radius {
            world.add_mass(PointMass::new(config.mass, candidate)?);
        }
    }
    debug!("swarm: {} masses within radius {radius}", world.masses.len());

    let model = NBodyRepulsion::new(config.strength, radius);
    Ok(MassSimulation::new("swarm", world, model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mass::Status;
    use crate::simulation::Simulation;

    #[test]
    fn rope_layout() {
        let config = RopeConfig {
            points: 4,
            ..RopeConfig::default()
        };
        let rope = rope(&config).unwrap();
        let world = rope.world();
        assert_eq!(world.masses.len(), 4);
        assert_eq!(world.links.len(), 3);
        assert_eq!(world.masses[0].status, Status::Immovable);
        assert_eq!(world.masses[3].position, DVec3::new(-3.0, 0.0, 0.0));
        assert_eq!(rope.model().chain, vec![0, 1, 2, 3]);
    }

    #[test]
    fn rope_needs_two_points() {
        let config = RopeConfig {
            points: 1,
            ..RopeConfig::default()
        };
        assert_eq!(
            rope(&config).err(),
            Some(SimError::TooFewPoints { count: 1, min: 2 })
        );
    }

    #[test]
    fn net_border_is_anchored() {
        let config = NetConfig {
            size: 4,
            ..NetConfig::default()
        };
        let net = net(&config).unwrap();
        let world = net.world();
        assert_eq!(world.masses.len(), 16);
        // 2 * size * (size - 1) neighbour links.
        assert_eq!(world.links.len(), 24);
        assert_eq!(net.model().edges.len(), 12);
        assert!(world.masses[grid_index(4, 1, 1)].is_movable());
        assert!(!world.masses[grid_index(4, 0, 2)].is_movable());
        assert!(world.masses.iter().all(|m| m.position.y == 0.0));
    }

    #[test]
    fn net_rejects_tiny_grid() {
        let config = NetConfig {
            size: 2,
            ..NetConfig::default()
        };
        assert_eq!(net(&config).err(), Some(SimError::GridTooSmall { size: 2 }));
    }

    #[test]
    fn seeded_layouts_repeat() {
        let a = swarm(&SwarmConfig::default()).unwrap();
        let b = swarm(&SwarmConfig::default()).unwrap();
        assert_eq!(a.world().masses, b.world().masses);

        let other = swarm(&SwarmConfig {
            seed: 8,
            ..SwarmConfig::default()
        })
        .unwrap();
        assert_ne!(a.world().masses, other.world().masses);
    }

    #[test]
    fn swarm_starts_inside_sphere() {
        let config = SwarmConfig::default();
        let swarm = swarm(&config).unwrap();
        assert_eq!(swarm.world().masses.len(), config.points);
        assert!(swarm
            .world()
            .masses
            .iter()
            .all(|m| m.position.length() <= config.radius));
        assert_eq!(swarm.name(), "swarm");
    }

    #[test]
    fn swarm_rejects_bad_radius() {
        let config = SwarmConfig {
            radius: 0.0,
            ..SwarmConfig::default()
        };
        assert!(matches!(
            swarm(&config),
            Err(SimError::InvalidRadius { .. })
        ));
    }
}
