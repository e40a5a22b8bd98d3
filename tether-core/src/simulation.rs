//! The capability set the scheduler drives, and the generic mass simulation.

use crate::diagnostics::Diagnostics;
use crate::engine::World;
use crate::forces::ForceModel;
use crate::input::InputSnapshot;
use crate::integrator::step;
use crate::render::Canvas;
use log::{info, warn};

/// Something the scheduler can advance, draw and reset.
pub trait Simulation: Send {
    fn name(&self) -> &str;

    /// Advance exactly one discrete tick using a single input snapshot.
    fn tick(&mut self, input: &InputSnapshot);

    /// Emit the current geometry.
    fn render(&self, canvas: &mut dyn Canvas);

    /// Replace all state with the initial configuration.
    fn reset(&mut self);

    /// Ticks advanced since construction or the last reset.
    fn ticks(&self) -> u64;
}

/// A world of point masses driven by one force model.
///
/// One tick: `model.apply` (input and forces) → integration →
/// `model.correct` (positional clamps).
pub struct MassSimulation<F: ForceModel> {
    name: String,
    world: World,
    initial: World,
    model: F,
    ticks: u64,
    diverged: bool,
}

impl<F: ForceModel> MassSimulation<F> {
    pub fn new(name: impl Into<String>, world: World, model: F) -> Self {
        Self {
            name: name.into(),
            initial: world.clone(),
            world,
            model,
            ticks: 0,
            diverged: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn model(&self) -> &F {
        &self.model
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::of(&self.world)
    }

    fn check_divergence(&mut self) {
        if self.diverged {
            return;
        }
        if let Some(index) = self.world.masses.iter().position(|m| !m.is_finite()) {
            warn!(
                "{}: mass {} became non-finite at tick {}",
                self.name, index, self.ticks
            );
            self.diverged = true;
        }
    }
}

impl<F: ForceModel> Simulation for MassSimulation<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tick(&mut self, input: &InputSnapshot) {
        self.model.apply(&mut self.world, input);
        step(&mut self.world);
        self.model.correct(&mut self.world);
        self.ticks += 1;
        self.check_divergence();
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        for (from, to) in self.world.segments() {
            canvas.segment(from, to);
        }
        for mass in &self.world.masses {
            canvas.point(mass.position, mass.mass());
        }
        canvas.label(&format!("{} tick {}", self.name, self.ticks));
    }

    fn reset(&mut self) {
        info!("{}: reset after {} ticks", self.name, self.ticks);
        self.world = self.initial.clone();
        self.ticks = 0;
        self.diverged = false;
    }

    fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::forces::ChainTension;
    use crate::mass::PointMass;
    use crate::render::Scene;
    use glam::DVec3;

    fn pendulum() -> MassSimulation<ChainTension> {
        let config = SimulationConfig::default();
        let mut world = World::new(&config);
        let a = world.add_mass(PointMass::anchor(1.0, DVec3::ZERO).unwrap());
        let b = world.add_mass(PointMass::new(1.0, DVec3::new(-1.0, 0.0, 0.0)).unwrap());
        world.link(a, b, 1.0).unwrap();
        MassSimulation::new("pendulum", world, ChainTension::new(vec![a, b], 0.8, 0.0))
    }

    #[test]
    fn reset_restores_initial_world() {
        let mut sim = pendulum();
        for _ in 0..25 {
            sim.tick(&InputSnapshot::empty());
        }
        assert_eq!(sim.ticks(), 25);
        assert_ne!(sim.world().masses[1].position, DVec3::new(-1.0, 0.0, 0.0));
        sim.reset();
        assert_eq!(sim.ticks(), 0);
        assert_eq!(sim.world().masses[1].position, DVec3::new(-1.0, 0.0, 0.0));
        assert_eq!(sim.world().masses[1].velocity, DVec3::ZERO);
    }

    #[test]
    fn render_emits_links_masses_and_label() {
        let sim = pendulum();
        let mut scene = Scene::new();
        sim.render(&mut scene);
        assert_eq!(scene.segments.len(), 1);
        assert_eq!(scene.points.len(), 2);
        assert_eq!(scene.labels, vec!["pendulum tick 0".to_string()]);
    }

    #[test]
    fn divergence_is_flagged_once() {
        let mut sim = pendulum();
        sim.world_mut().masses[1].velocity = DVec3::new(f64::NAN, 0.0, 0.0);
        sim.tick(&InputSnapshot::empty());
        sim.tick(&InputSnapshot::empty());
        assert!(!sim.diagnostics().is_finite());
        assert!(sim.diverged);
    }
}
