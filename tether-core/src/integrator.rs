use crate::engine::World;

/// Advance every mass by one tick using semi-implicit Euler integration.
///
/// Accumulated forces move the velocity, the velocity moves the position,
/// then gravity and friction shape the velocity for the next tick.
/// Immovable masses are skipped.
pub fn step(world: &mut World) {
    let gravity = world.gravity;
    let friction = world.friction;
    for mass in world.masses.iter_mut() {
        mass.integrate(gravity, friction);
    }
}
