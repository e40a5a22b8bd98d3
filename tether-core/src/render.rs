//! Render contract between simulations and the host's display.
//!
//! Simulations only hand out geometry. Projection, colour and surface size
//! belong to whoever implements [`Canvas`] and [`Display`].

use crate::vector::Vector;

/// Drawing primitives a simulation emits during a render pass.
pub trait Canvas {
    /// A mass at `position`. `mass` lets the host size the dot.
    fn point(&mut self, position: Vector, mass: f64);

    /// A link between two positions.
    fn segment(&mut self, from: Vector, to: Vector);

    /// Free-form status line (simulation name, tick count, ...).
    fn label(&mut self, _text: &str) {}
}

/// The host side of a render pass.
pub trait Display: Send {
    /// A canvas for this frame, or `None` when no surface is available yet.
    /// The scheduler then skips rendering for the iteration and keeps ticking.
    fn canvas(&mut self) -> Option<&mut dyn Canvas>;

    /// Called after every simulation has drawn into the canvas.
    fn present(&mut self);
}

/// Recorded geometry of one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub points: Vec<(Vector, f64)>,
    pub segments: Vec<(Vector, Vector)>,
    pub labels: Vec<String>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.segments.clear();
        self.labels.clear();
    }
}

impl Canvas for Scene {
    fn point(&mut self, position: Vector, mass: f64) {
        self.points.push((position, mass));
    }

    fn segment(&mut self, from: Vector, to: Vector) {
        self.segments.push((from, to));
    }

    fn label(&mut self, text: &str) {
        self.labels.push(text.to_string());
    }
}

/// A display that records every presented frame. Useful without a window.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    current: Scene,
    pub frames: Vec<Scene>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for RecordingDisplay {
    fn canvas(&mut self) -> Option<&mut dyn Canvas> {
        self.current.clear();
        Some(&mut self.current)
    }

    fn present(&mut self) {
        self.frames.push(self.current.clone());
    }
}

/// A display that has no surface. Every render pass is skipped.
#[derive(Debug, Default)]
pub struct Headless;

impl Display for Headless {
    fn canvas(&mut self) -> Option<&mut dyn Canvas> {
        None
    }

    fn present(&mut self) {}
}
