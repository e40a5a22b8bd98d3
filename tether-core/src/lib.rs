pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod forces;
pub mod input;
pub mod integrator;
pub mod link;
pub mod mass;
pub mod render;
pub mod scenario;
pub mod scheduler;
pub mod simulation;
pub mod stiffness;
pub mod vector;

pub use config::{NetConfig, RopeConfig, SchedulerConfig, SimulationConfig, SwarmConfig};
pub use diagnostics::{format_diagnostics, Diagnostics};
pub use engine::World;
pub use error::SimError;
pub use forces::{ChainTension, ForceModel, GridMeshTension, NBodyRepulsion};
pub use input::{InputSnapshot, InputState, Key};
pub use link::{Link, Tension};
pub use mass::{PointMass, Status};
pub use render::{Canvas, Display, Headless, RecordingDisplay, Scene};
pub use scheduler::{Scheduler, TickAccumulator};
pub use simulation::{MassSimulation, Simulation};
pub use vector::{PointExt, Vector, VectorExt};

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
