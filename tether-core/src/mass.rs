//! Point masses.

use crate::error::SimError;
use crate::vector::Vector;
use glam::DVec3;

/// Whether the integrator may move a mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Movable,
    /// Anchors: never moved by forces, gravity or friction. Scenarios may
    /// still reposition them directly from input.
    Immovable,
}

/// A positioned mass with velocity and a force accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMass {
    pub position: Vector,
    pub velocity: Vector,
    pending_acceleration: Vector,
    mass: f64,
    pub status: Status,
    pub affected_by_gravity: bool,
}

impl PointMass {
    /// Create a movable, gravity-affected mass at rest.
    ///
    /// Fails for zero, negative or non-finite `mass`: forces are divided by it.
    pub fn new(mass: f64, position: Vector) -> Result<Self, SimError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass { mass });
        }
        Ok(Self {
            position,
            velocity: DVec3::ZERO,
            pending_acceleration: DVec3::ZERO,
            mass,
            status: Status::Movable,
            affected_by_gravity: true,
        })
    }

    /// Create an immovable anchor.
    pub fn anchor(mass: f64, position: Vector) -> Result<Self, SimError> {
        Ok(Self::new(mass, position)?.with_status(Status::Immovable))
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn is_movable(&self) -> bool {
        self.status == Status::Movable
    }

    /// Acceleration accumulated since the last integration.
    pub fn pending_acceleration(&self) -> Vector {
        self.pending_acceleration
    }

    /// `velocity * mass`.
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    /// Accumulate `force / mass`. Ignored for immovable masses.
    pub fn apply_force(&mut self, force: Vector) {
        if self.is_movable() {
            self.pending_acceleration += force / self.mass;
        }
    }

    /// Accumulate an acceleration directly. Ignored for immovable masses.
    pub fn accelerate(&mut self, acceleration: Vector) {
        if self.is_movable() {
            self.pending_acceleration += acceleration;
        }
    }

    /// Advance one tick with semi-implicit Euler.
    ///
    /// Order: accumulated acceleration into velocity, velocity into position,
    /// clear the accumulator, then gravity into velocity, then friction.
    pub fn integrate(&mut self, gravity: Vector, friction: f64) {
        if !self.is_movable() {
            return;
        }
        self.velocity += self.pending_acceleration;
        self.position += self.velocity;
        self.pending_acceleration = DVec3::ZERO;
        if self.affected_by_gravity {
            self.velocity += gravity;
        }
        self.velocity *= friction;
    }

    /// Velocity plus position are finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}
