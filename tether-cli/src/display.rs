//! Hand finished frames from the simulation thread to the egui thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tether_core::render::{Canvas, Display, Scene};

/// Read side, owned by the window.
#[derive(Clone)]
pub struct FrameHandle {
    latest: Arc<Mutex<Scene>>,
    ready: Arc<AtomicBool>,
}

impl FrameHandle {
    /// Copy of the most recently presented frame.
    pub fn latest(&self) -> Scene {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mark whether the window currently has an area to draw into.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }
}

/// Write side, owned by the scheduler.
pub struct SharedDisplay {
    drawing: Scene,
    latest: Arc<Mutex<Scene>>,
    ready: Arc<AtomicBool>,
    repaint: egui::Context,
}

impl SharedDisplay {
    pub fn new(repaint: egui::Context) -> (Self, FrameHandle) {
        let latest = Arc::new(Mutex::new(Scene::new()));
        let ready = Arc::new(AtomicBool::new(false));
        let handle = FrameHandle {
            latest: Arc::clone(&latest),
            ready: Arc::clone(&ready),
        };
        let display = Self {
            drawing: Scene::new(),
            latest,
            ready,
            repaint,
        };
        (display, handle)
    }
}

impl Display for SharedDisplay {
    fn canvas(&mut self) -> Option<&mut dyn Canvas> {
        if !self.ready.load(Ordering::Acquire) {
            return None;
        }
        self.drawing.clear();
        Some(&mut self.drawing)
    }

    fn present(&mut self) {
        {
            let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::swap(&mut *latest, &mut self.drawing);
        }
        self.repaint.request_repaint();
    }
}
