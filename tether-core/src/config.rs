//! Construction-time configuration.
//!
//! All values are plain numbers passed when a simulation or scheduler is
//! built; nothing here is reloaded while running.
//!
//! ```
//! use tether_core::config::SimulationConfig;
//! use glam::DVec3;
//!
//! let config = SimulationConfig::new()
//!     .with_gravity(DVec3::new(0.0, -0.1, 0.0))
//!     .with_friction(0.999)
//!     .with_rest_length(2.0);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::SimError;
use crate::link::DEFAULT_TENSION_LOSS_RATIO;
use crate::stiffness::DEFAULT_STIFFNESS;
use crate::vector::Vector;
use glam::DVec3;

/// Integration and constraint constants shared by every scenario.
///
/// Units are per tick: gravity is added to the velocity once per tick and
/// the velocity is multiplied by `friction` once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Default: (0, -0.1, 0).
    pub gravity: Vector,
    /// Velocity multiplier in (0, 1]. 1.0 = no damping. Default: 0.999.
    pub friction: f64,
    /// Maximum separation of linked masses. Default: 1.0.
    pub rest_length: f64,
    /// Share of a stretching impulse handed to the neighbour. Default: 0.8.
    pub tension_loss_ratio: f64,
    /// Chain straightening coefficient; 0 disables the pass. Default: 1e-4.
    pub stiffness: f64,
    /// Energy a link may carry in one tension transfer before it breaks.
    /// `None` keeps links unbreakable. Default: `None`.
    pub max_link_energy: Option<f64>,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            gravity: DVec3::new(0.0, -0.1, 0.0),
            friction: 0.999,
            rest_length: 1.0,
            tension_loss_ratio: DEFAULT_TENSION_LOSS_RATIO,
            stiffness: DEFAULT_STIFFNESS,
            max_link_energy: None,
        }
    }

    pub fn with_gravity(mut self, gravity: Vector) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_rest_length(mut self, rest_length: f64) -> Self {
        self.rest_length = rest_length;
        self
    }

    pub fn with_tension_loss_ratio(mut self, ratio: f64) -> Self {
        self.tension_loss_ratio = ratio;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_max_link_energy(mut self, max_energy: f64) -> Self {
        self.max_link_energy = Some(max_energy);
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(SimError::InvalidFriction {
                friction: self.friction,
            });
        }
        if !(self.rest_length.is_finite() && self.rest_length > 0.0) {
            return Err(SimError::InvalidRestLength {
                rest_length: self.rest_length,
            });
        }
        if !(0.0..=1.0).contains(&self.tension_loss_ratio) {
            return Err(SimError::InvalidLossRatio {
                ratio: self.tension_loss_ratio,
            });
        }
        if !(self.stiffness.is_finite() && self.stiffness >= 0.0) {
            return Err(SimError::InvalidStiffness {
                stiffness: self.stiffness,
            });
        }
        if let Some(max_energy) = self.max_link_energy {
            if !(max_energy.is_finite() && max_energy > 0.0) {
                return Err(SimError::InvalidMaxEnergy { max_energy });
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing of the scheduler loop.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Target tick rate. Default: 60.
    pub ticks_per_second: f64,
    /// Ticks run in one loop iteration before the remaining debt is dropped.
    /// Default: 10.
    pub max_catch_up: u32,
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self {
            ticks_per_second: 60.0,
            max_catch_up: 10,
        }
    }

    pub fn with_ticks_per_second(mut self, ticks_per_second: f64) -> Self {
        self.ticks_per_second = ticks_per_second;
        self
    }

    pub fn with_max_catch_up(mut self, max_catch_up: u32) -> Self {
        self.max_catch_up = max_catch_up.max(1);
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
            return Err(SimError::InvalidTickRate {
                ticks_per_second: self.ticks_per_second,
            });
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A chain hanging from an anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct RopeConfig {
    pub simulation: SimulationConfig,
    /// Number of masses including the anchor. Default: 20.
    pub points: usize,
    /// Mass of each chain element. Default: 1.0.
    pub mass: f64,
    /// Anchor displacement per tick while a nudge key is held. Default: 0.05.
    pub nudge_step: f64,
}

impl Default for RopeConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            points: 20,
            mass: 1.0,
            nudge_step: 0.05,
        }
    }
}

/// A square net whose border is held in place.
#[derive(Debug, Clone, PartialEq)]
pub struct NetConfig {
    /// `rest_length` is unused; the net links use `threshold`.
    pub simulation: SimulationConfig,
    /// Masses per side. Default: 16.
    pub size: usize,
    /// Distance between neighbouring masses at reset. Default: 80.
    pub spacing: f64,
    /// Random displacement of each mass at reset, as a fraction of `spacing`.
    /// Default: 0.5.
    pub jitter: f64,
    /// Neighbour distance above which the restoring pull engages. Default: 60.
    pub threshold: f64,
    /// Restoring pull per unit of neighbour distance. Default: 0.1.
    pub pull: f64,
    /// Border displacement per tick while a nudge key is held. Default: 2.0.
    pub edge_step: f64,
    pub seed: u64,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default()
                .with_gravity(DVec3::new(0.0, -1.0, 0.0))
                .with_friction(0.99),
            size: 16,
            spacing: 80.0,
            jitter: 0.5,
            threshold: 60.0,
            pull: 0.1,
            edge_step: 2.0,
            seed: 7,
        }
    }
}

/// Mutually repelling masses confined to a sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmConfig {
    /// `rest_length` and `stiffness` are unused.
    pub simulation: SimulationConfig,
    /// Default: 40.
    pub points: usize,
    pub mass: f64,
    /// Confinement radius around the origin. Default: 1000.
    pub radius: f64,
    /// Repulsion constant `k` in `k / d²`. Default: 1e7.
    pub strength: f64,
    pub seed: u64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default()
                .with_gravity(DVec3::ZERO)
                .with_friction(0.9),
            points: 40,
            mass: 1000.0,
            radius: 1000.0,
            strength: 1e7,
            seed: 7,
        }
    }
}
