//! Per-scenario force models.
//!
//! A model runs in two places of a tick: [`ForceModel::apply`] before
//! integration (input reactions and force accumulation) and
//! [`ForceModel::correct`] after it (positional clamps).

use crate::engine::World;
use crate::input::{InputSnapshot, Key};
use crate::link::{clamp_all, resolve_all};
use crate::mass::PointMass;
use crate::stiffness::straighten;
use crate::vector::{PointExt, Vector};
use glam::DVec3;

pub trait ForceModel: Send {
    /// Accumulate forces on the world's masses for this tick.
    fn apply(&mut self, world: &mut World, input: &InputSnapshot);

    /// Correct positions after integration.
    fn correct(&mut self, _world: &mut World) {}
}

/// Displacement requested by the nudge keys, in the x/y plane.
pub fn nudge(input: &InputSnapshot, step: f64) -> Vector {
    DVec3::new(
        input.axis(Key::NudgeRight, Key::NudgeLeft),
        input.axis(Key::NudgeUp, Key::NudgeDown),
        0.0,
    ) * step
}

/// Inextensible rope along a chain of masses.
///
/// Before integration: tension transfer over every link, then the
/// straightening pass along `chain`. After integration: the links are
/// clamped back to their rest length in link order.
#[derive(Debug, Clone)]
pub struct ChainTension {
    /// Mass indices from the anchored end to the free end.
    pub chain: Vec<usize>,
    pub loss_ratio: f64,
    pub stiffness: f64,
    /// Anchor displacement per tick while a nudge key is held.
    pub anchor_step: f64,
}

impl ChainTension {
    pub fn new(chain: Vec<usize>, loss_ratio: f64, stiffness: f64) -> Self {
        Self {
            chain,
            loss_ratio,
            stiffness,
            anchor_step: 0.0,
        }
    }

    pub fn with_anchor_step(mut self, step: f64) -> Self {
        self.anchor_step = step;
        self
    }
}

impl ForceModel for ChainTension {
    fn apply(&mut self, world: &mut World, input: &InputSnapshot) {
        if let Some(&anchor) = self.chain.first() {
            let delta = nudge(input, self.anchor_step);
            if delta != DVec3::ZERO {
                world.masses[anchor].position += delta;
            }
        }
        resolve_all(&mut world.links, &mut world.masses, self.loss_ratio);
        straighten(&self.chain, &mut world.masses, self.stiffness);
    }

    fn correct(&mut self, world: &mut World) {
        clamp_all(&world.links, &mut world.masses);
    }
}

/// Threshold springs between grid neighbours.
///
/// Every link longer than its rest length pulls both endpoints towards each
/// other with `pull * connecting vector`. Border masses are anchors that the
/// nudge keys move directly.
#[derive(Debug, Clone)]
pub struct GridMeshTension {
    pub pull: f64,
    pub edges: Vec<usize>,
    pub edge_step: f64,
}

impl GridMeshTension {
    pub fn new(pull: f64, edges: Vec<usize>, edge_step: f64) -> Self {
        Self {
            pull,
            edges,
            edge_step,
        }
    }
}

impl ForceModel for GridMeshTension {
    fn apply(&mut self, world: &mut World, input: &InputSnapshot) {
        let delta = nudge(input, self.edge_step);
        if delta != DVec3::ZERO {
            for &i in &self.edges {
                world.masses[i].position += delta;
            }
        }

        for link in world.links.iter().filter(|l| !l.broken) {
            let a = world.masses[link.a].position;
            let b = world.masses[link.b].position;
            let connecting = a.connecting_vector_to(b);
            if connecting.length() > link.rest_length {
                let force = connecting * self.pull;
                world.masses[link.a].apply_force(force);
                world.masses[link.b].apply_force(-force);
            }
        }
    }
}

/// Pairwise inverse-square repulsion with a spherical boundary.
#[derive(Debug, Clone)]
pub struct NBodyRepulsion {
    /// `k` in `k / d²`.
    pub strength: f64,
    /// Masses further than this from the origin are pulled back onto the sphere.
    pub radius: f64,
}

impl NBodyRepulsion {
    pub fn new(strength: f64, radius: f64) -> Self {
        Self { strength, radius }
    }

    /// Total repulsive force on mass `i` from every other mass.
    pub fn force_on(&self, masses: &[PointMass], i: usize) -> Vector {
        let target = masses[i].position;
        masses
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, other)| {
                let distance = other.position.distance_to(target);
                if distance == 0.0 {
                    // No direction to push along.
                    return DVec3::ZERO;
                }
                other.position.direction_to(target) * (self.strength / (distance * distance))
            })
            .fold(DVec3::ZERO, |acc, f| acc + f)
    }

    /// Rescale any position outside the sphere back onto its surface.
    pub fn confine(&self, masses: &mut [PointMass]) {
        for mass in masses.iter_mut() {
            let distance = mass.position.length();
            if distance > self.radius {
                mass.position *= self.radius / distance;
            }
        }
    }
}

impl ForceModel for NBodyRepulsion {
    fn apply(&mut self, world: &mut World, _input: &InputSnapshot) {
        let forces: Vec<Vector> = (0..world.masses.len())
            .map(|i| self.force_on(&world.masses, i))
            .collect();
        for (mass, force) in world.masses.iter_mut().zip(forces) {
            mass.apply_force(force);
        }
    }

    fn correct(&mut self, world: &mut World) {
        self.confine(&mut world.masses);
    }
}
