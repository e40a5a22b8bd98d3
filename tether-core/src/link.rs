//! Rope links: a maximum separation between two masses.
//!
//! A link stores indices into the world's mass collection; it never owns
//! the masses it binds.

use crate::error::SimError;
use crate::mass::PointMass;
use crate::vector::{PointExt, Vector, VectorExt};
use log::debug;

/// Fraction of the stretching impulse passed on to the neighbour.
pub const DEFAULT_TENSION_LOSS_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub rest_length: f64,
    /// Energy one tension transfer may carry before the link breaks.
    /// `None` never breaks.
    pub max_energy: Option<f64>,
    /// A broken link transfers nothing, is never clamped and is not drawn.
    pub broken: bool,
}

/// State of a link at the moment tension was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tension {
    Slack,
    Taut,
    Broken,
}

impl Link {
    pub fn new(a: usize, b: usize, rest_length: f64) -> Result<Self, SimError> {
        if !(rest_length.is_finite() && rest_length > 0.0) {
            return Err(SimError::InvalidRestLength { rest_length });
        }
        Ok(Self {
            a,
            b,
            rest_length,
            max_energy: None,
            broken: false,
        })
    }

    pub fn with_max_energy(mut self, max_energy: Option<f64>) -> Self {
        self.max_energy = max_energy;
        self
    }

    /// Fail if either endpoint is not an index into `masses`.
    pub fn check_bounds(&self, count: usize) -> Result<(), SimError> {
        for index in [self.a, self.b] {
            if index >= count {
                return Err(SimError::LinkOutOfRange { index, count });
            }
        }
        Ok(())
    }

    pub fn length(&self, masses: &[PointMass]) -> f64 {
        masses[self.a].position.distance_to(masses[self.b].position)
    }

    /// How far the link is stretched past its rest length, or 0.
    pub fn overstretch(&self, masses: &[PointMass]) -> f64 {
        (self.length(masses) - self.rest_length).max(0.0)
    }

    /// Transfer stretching momentum across a taut link.
    ///
    /// Each movable endpoint moving away from the other has its momentum
    /// projected on the rope. `loss_ratio` of that impulse is applied to the
    /// other endpoint and the full projection is removed from the moving one.
    /// Both endpoints are checked against the momenta as they were before
    /// either transfer.
    ///
    /// When the kinetic energy of the projected momenta exceeds `max_energy`
    /// the link breaks instead and nothing is transferred.
    pub fn resolve_tension(&mut self, masses: &mut [PointMass], loss_ratio: f64) -> Tension {
        if self.broken {
            return Tension::Broken;
        }
        let pos_a = masses[self.a].position;
        let pos_b = masses[self.b].position;
        if pos_a.distance_to(pos_b) < self.rest_length {
            return Tension::Slack;
        }
        // Points from b to a: a stretches the rope moving along it, b against it.
        let rope_dir = pos_b.direction_to(pos_a);
        let from_a = stretching_impulse(&masses[self.a], rope_dir, rope_dir);
        let from_b = stretching_impulse(&masses[self.b], -rope_dir, rope_dir);

        if let Some(max_energy) = self.max_energy {
            let energy = impulse_energy(&masses[self.a], from_a)
                + impulse_energy(&masses[self.b], from_b);
            if energy > max_energy {
                debug!(
                    "link {}-{} broke carrying {energy:.3} (max {max_energy})",
                    self.a, self.b
                );
                self.broken = true;
                return Tension::Broken;
            }
        }

        if let Some(impulse) = from_a {
            masses[self.b].apply_force(impulse * loss_ratio);
            masses[self.a].apply_force(-impulse);
        }
        if let Some(impulse) = from_b {
            masses[self.a].apply_force(impulse * loss_ratio);
            masses[self.b].apply_force(-impulse);
        }
        Tension::Taut
    }

    /// Snap an overstretched link back to its rest length.
    ///
    /// The far end `b` is moved along the connecting vector from `a`; when
    /// `b` is an anchor and `a` is not, `a` is moved instead.
    pub fn clamp(&self, masses: &mut [PointMass]) -> bool {
        if self.broken {
            return false;
        }
        let near = masses[self.a].position;
        let far = masses[self.b].position;
        let connecting = near.connecting_vector_to(far);
        let length = connecting.length();
        if length <= self.rest_length {
            return false;
        }
        let scaled = connecting * (self.rest_length / length);
        if masses[self.b].is_movable() {
            masses[self.b].position = near + scaled;
        } else if masses[self.a].is_movable() {
            masses[self.a].position = far - scaled;
        } else {
            return false;
        }
        true
    }
}

/// Momentum along the rope of a movable endpoint moving `away` from the
/// other end. Anchors never hand on an impulse.
fn stretching_impulse(mass: &PointMass, away: Vector, rope_dir: Vector) -> Option<Vector> {
    if !mass.is_movable() {
        return None;
    }
    let momentum = mass.momentum();
    if !momentum.sharp_angle(away) {
        return None;
    }
    Some(momentum.projection_on(rope_dir))
}

fn impulse_energy(mass: &PointMass, impulse: Option<Vector>) -> f64 {
    impulse.map_or(0.0, |p| p.length_squared() / (2.0 * mass.mass()))
}

/// Resolve tension on every link in order. Returns how many were taut.
pub fn resolve_all(links: &mut [Link], masses: &mut [PointMass], loss_ratio: f64) -> usize {
    let mut taut = 0;
    for link in links.iter_mut() {
        if link.resolve_tension(masses, loss_ratio) == Tension::Taut {
            taut += 1;
        }
    }
    taut
}

/// Positional correction pass: clamp links in order, walking the chain from
/// the end it was built from. Returns how many masses were moved.
pub fn clamp_all(links: &[Link], masses: &mut [PointMass]) -> usize {
    let mut moved = 0;
    for link in links {
        if link.clamp(masses) {
            moved += 1;
        }
    }
    moved
}
