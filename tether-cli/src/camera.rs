//! Perspective camera driven by the shared input flags.

use glam::{DQuat, DVec2, DVec3};
use tether_core::input::{InputSnapshot, Key};

/// Points closer than this to the camera plane are not drawn.
const NEAR: f64 = 1e-3;

/// Looks down its local -Z axis with +Y up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    /// Rotation about world Y. Positive turns left.
    pub yaw: f64,
    /// Rotation about the camera's X axis. Positive looks up.
    pub pitch: f64,
    /// Screen units per unit of `x / depth`.
    pub focal: f64,
    /// Distance travelled per update while a movement key is held.
    pub speed: f64,
    /// Radians turned per update while a turn key is held.
    pub turn_rate: f64,
}

impl Camera {
    pub fn new(position: DVec3, speed: f64) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            focal: 1.0,
            speed,
            turn_rate: 0.02,
        }
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    fn rotation(&self) -> DQuat {
        DQuat::from_rotation_y(self.yaw) * DQuat::from_rotation_x(self.pitch)
    }

    pub fn forward(&self) -> DVec3 {
        self.rotation() * DVec3::NEG_Z
    }

    pub fn right(&self) -> DVec3 {
        self.rotation() * DVec3::X
    }

    /// Apply one update worth of held movement, turn and zoom keys.
    pub fn update(&mut self, input: &InputSnapshot) {
        let forward = input.axis(Key::Forward, Key::Backward);
        let strafe = input.axis(Key::Right, Key::Left);
        let lift = input.axis(Key::Up, Key::Down);
        self.position += (self.forward() * forward + self.right() * strafe + DVec3::Y * lift)
            * self.speed;

        self.yaw += input.axis(Key::TurnLeft, Key::TurnRight) * self.turn_rate;
        self.pitch = (self.pitch + input.axis(Key::TurnUp, Key::TurnDown) * self.turn_rate)
            .clamp(-1.5, 1.5);

        match input.axis(Key::ZoomIn, Key::ZoomOut) {
            z if z > 0.0 => self.focal *= 1.02,
            z if z < 0.0 => self.focal /= 1.02,
            _ => {}
        }
    }

    /// Project a world position to normalised screen coordinates (x right,
    /// y up, 1.0 = half the shorter screen side) plus its depth. `None` for
    /// points behind the camera.
    pub fn project(&self, point: DVec3) -> Option<(DVec2, f64)> {
        let local = self.rotation().inverse() * (point - self.position);
        let depth = -local.z;
        if depth <= NEAR {
            return None;
        }
        Some((DVec2::new(local.x, local.y) * (self.focal / depth), depth))
    }
}
