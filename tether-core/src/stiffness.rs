//! Bending resistance for chains: a three-point straightening force.

use crate::mass::PointMass;
use crate::vector::{PointExt, Vector};

pub const DEFAULT_STIFFNESS: f64 = 1e-4;

/// Pull the neighbours of every interior chain mass towards the positions
/// that would make the chain locally straight.
///
/// For a triple `(prev, curr, next)` the target of `next` continues the
/// `prev → curr` direction for `|curr → next|`; the target of `prev` is the
/// mirror image. The force on each neighbour is `stiffness * (target - pos)`.
/// Runs after tension resolution and before the positional correction pass.
pub fn straighten(chain: &[usize], masses: &mut [PointMass], stiffness: f64) {
    if stiffness == 0.0 {
        return;
    }
    for window in chain.windows(3) {
        let [prev, curr, next] = [window[0], window[1], window[2]];
        let p = masses[prev].position;
        let c = masses[curr].position;
        let n = masses[next].position;

        // No bending direction when two neighbours coincide.
        if p == c || c == n {
            continue;
        }

        let next_target = c + p.direction_to(c) * c.distance_to(n);
        let prev_target = c + n.direction_to(c) * c.distance_to(p);

        masses[next].apply_force(correction(next_target, n, stiffness));
        masses[prev].apply_force(correction(prev_target, p, stiffness));
    }
}

fn correction(target: Vector, actual: Vector, stiffness: f64) -> Vector {
    (target - actual) * stiffness
}
