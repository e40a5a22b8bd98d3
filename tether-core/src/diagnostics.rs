//! Observability for simulation state.
//!
//! Ticks never fail; a degenerate direction or a zero distance shows up as
//! NaN or infinity in positions and velocities. This module makes that
//! state visible to tests and to the host.

use crate::engine::World;

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub masses: usize,
    /// Indices of masses whose position or velocity is not finite.
    pub non_finite: Vec<usize>,
    /// Largest `length - rest_length` over intact links, at least 0.
    pub max_overstretch: f64,
    pub broken_links: usize,
    pub kinetic_energy: f64,
}

impl Diagnostics {
    pub fn of(world: &World) -> Self {
        let non_finite = world
            .masses
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_finite())
            .map(|(i, _)| i)
            .collect();
        let max_overstretch = world
            .links
            .iter()
            .filter(|l| !l.broken)
            .map(|l| l.overstretch(&world.masses))
            .fold(0.0, f64::max);
        let broken_links = world.links.iter().filter(|l| l.broken).count();
        let kinetic_energy = world.masses.iter().map(|m| m.kinetic_energy()).sum();

        Self {
            masses: world.masses.len(),
            non_finite,
            max_overstretch,
            broken_links,
            kinetic_energy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.non_finite.is_empty()
    }
}

/// One-line summary for logs and status bars.
pub fn format_diagnostics(d: &Diagnostics) -> String {
    let mut msg = format!(
        "{} masses, energy {:.3}, max overstretch {:.4}",
        d.masses, d.kinetic_energy, d.max_overstretch
    );
    if !d.is_finite() {
        msg.push_str(&format!(", {} non-finite", d.non_finite.len()));
    }
    if d.broken_links > 0 {
        msg.push_str(&format!(", {} broken links", d.broken_links));
    }
    msg
}
