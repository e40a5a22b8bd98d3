//! Error types for simulation construction and the scheduler.

use thiserror::Error;

/// Errors raised while building or running simulations.
///
/// Everything here is a construction-time or lifecycle failure. A tick never
/// fails: numerically degenerate state (NaN) keeps propagating and is
/// surfaced through [`crate::diagnostics::Diagnostics`] instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("mass must be positive and finite, got {mass}")]
    InvalidMass { mass: f64 },

    #[error("friction factor must be in (0, 1], got {friction}")]
    InvalidFriction { friction: f64 },

    #[error("rest length must be positive and finite, got {rest_length}")]
    InvalidRestLength { rest_length: f64 },

    #[error("tension loss ratio must be in [0, 1], got {ratio}")]
    InvalidLossRatio { ratio: f64 },

    #[error("stiffness must be non-negative and finite, got {stiffness}")]
    InvalidStiffness { stiffness: f64 },

    #[error("maximum link energy must be positive and finite, got {max_energy}")]
    InvalidMaxEnergy { max_energy: f64 },

    #[error("ticks per second must be positive and finite, got {ticks_per_second}")]
    InvalidTickRate { ticks_per_second: f64 },

    #[error("confinement radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f64 },

    #[error("grid must be at least 3x3, got {size}x{size}")]
    GridTooSmall { size: usize },

    #[error("scenario needs at least {min} points, got {count}")]
    TooFewPoints { count: usize, min: usize },

    #[error("link endpoint {index} out of range ({count} masses)")]
    LinkOutOfRange { index: usize, count: usize },

    #[error("failed to spawn simulation thread: {0}")]
    Spawn(String),

    #[error("simulation thread panicked")]
    LoopPanicked,

    #[error("scheduler is running; stop it first")]
    AlreadyRunning,
}
