use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::link::Link;
use crate::mass::PointMass;
use crate::vector::Vector;

/// Masses, the links between them, and the global integration constants.
///
/// Masses are kept in insertion order; that order is the index used by links
/// and by renderers.
#[derive(Debug, Clone)]
pub struct World {
    pub masses: Vec<PointMass>,
    pub links: Vec<Link>,
    pub gravity: Vector,
    pub friction: f64,
    /// Applied to every link created through [`World::link`].
    pub max_link_energy: Option<f64>,
}

impl World {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            masses: Vec::new(),
            links: Vec::new(),
            gravity: config.gravity,
            friction: config.friction,
            max_link_energy: config.max_link_energy,
        }
    }

    /// Add a mass and return its index.
    pub fn add_mass(&mut self, mass: PointMass) -> usize {
        self.masses.push(mass);
        self.masses.len() - 1
    }

    /// Link two existing masses.
    pub fn link(&mut self, a: usize, b: usize, rest_length: f64) -> Result<usize, SimError> {
        let link = Link::new(a, b, rest_length)?.with_max_energy(self.max_link_energy);
        link.check_bounds(self.masses.len())?;
        self.links.push(link);
        Ok(self.links.len() - 1)
    }

    /// Endpoint positions of every intact link, in link order.
    pub fn segments(&self) -> impl Iterator<Item = (Vector, Vector)> + '_ {
        self.links
            .iter()
            .filter(|l| !l.broken)
            .map(|l| (self.masses[l.a].position, self.masses[l.b].position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn link_checks_endpoints() {
        let mut world = World::new(&SimulationConfig::default());
        let a = world.add_mass(PointMass::new(1.0, DVec3::ZERO).unwrap());
        assert_eq!(
            world.link(a, 1, 1.0),
            Err(SimError::LinkOutOfRange { index: 1, count: 1 })
        );
        let b = world.add_mass(PointMass::new(1.0, DVec3::X).unwrap());
        assert_eq!(world.link(a, b, 1.0), Ok(0));
        assert_eq!(world.segments().next(), Some((DVec3::ZERO, DVec3::X)));
    }

    #[test]
    fn links_inherit_max_energy_and_broken_ones_are_not_drawn() {
        let config = SimulationConfig::new().with_max_link_energy(5.0);
        let mut world = World::new(&config);
        let a = world.add_mass(PointMass::new(1.0, DVec3::ZERO).unwrap());
        let b = world.add_mass(PointMass::new(1.0, DVec3::X).unwrap());
        let c = world.add_mass(PointMass::new(1.0, DVec3::Y).unwrap());
        world.link(a, b, 1.0).unwrap();
        world.link(a, c, 1.0).unwrap();
        assert_eq!(world.links[0].max_energy, Some(5.0));

        world.links[0].broken = true;
        let segments: Vec<_> = world.segments().collect();
        assert_eq!(segments, vec![(DVec3::ZERO, DVec3::Y)]);
    }
}
