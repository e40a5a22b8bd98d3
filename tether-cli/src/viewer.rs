//! Interactive window for a running scheduler.
//!
//! The scheduler ticks on its own thread and presents frames through
//! [`SharedDisplay`]; this module maps keyboard state onto the input flags,
//! moves the camera and paints the latest frame.

use crate::camera::Camera;
use crate::display::{FrameHandle, SharedDisplay};
use log::{error, info};
use std::sync::Arc;
use tether_core::config::SchedulerConfig;
use tether_core::error::SimError;
use tether_core::input::{InputState, Key};
use tether_core::render::Scene;
use tether_core::scheduler::Scheduler;
use tether_core::simulation::Simulation;

/// Keyboard layout: WASD + Q/E to fly, arrows to look, PageUp/PageDown to
/// zoom, IJKL to nudge, R to reset.
const KEYMAP: [(egui::Key, Key); 17] = [
    (egui::Key::W, Key::Forward),
    (egui::Key::S, Key::Backward),
    (egui::Key::A, Key::Left),
    (egui::Key::D, Key::Right),
    (egui::Key::E, Key::Up),
    (egui::Key::Q, Key::Down),
    (egui::Key::ArrowUp, Key::TurnUp),
    (egui::Key::ArrowDown, Key::TurnDown),
    (egui::Key::ArrowLeft, Key::TurnLeft),
    (egui::Key::ArrowRight, Key::TurnRight),
    (egui::Key::PageUp, Key::ZoomIn),
    (egui::Key::PageDown, Key::ZoomOut),
    (egui::Key::R, Key::Reset),
    (egui::Key::I, Key::NudgeUp),
    (egui::Key::K, Key::NudgeDown),
    (egui::Key::J, Key::NudgeLeft),
    (egui::Key::L, Key::NudgeRight),
];

pub struct ViewerApp {
    scheduler: Scheduler<SharedDisplay>,
    frames: FrameHandle,
    input: Arc<InputState>,
    camera: Camera,
    last_error: Option<String>,
}

impl ViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        simulation: Box<dyn Simulation>,
        config: SchedulerConfig,
        camera: Camera,
    ) -> Result<Self, SimError> {
        let (display, frames) = SharedDisplay::new(cc.egui_ctx.clone());
        let mut scheduler = Scheduler::new(config, display)?;
        scheduler.add_simulation(simulation)?;
        scheduler.start()?;
        let input = scheduler.input();

        Ok(Self {
            scheduler,
            frames,
            input,
            camera,
            last_error: None,
        })
    }

    fn sync_keys(&self, ctx: &egui::Context) {
        ctx.input(|i| {
            for (pressed, key) in KEYMAP {
                self.input.set(key, i.key_down(pressed));
            }
        });
    }

    fn record(&mut self, result: Result<(), SimError>) {
        if let Err(e) = result {
            error!("{e}");
            self.last_error = Some(e.to_string());
        }
    }

    fn toggle_pause(&mut self) {
        let result = if self.scheduler.is_running() {
            self.scheduler.stop()
        } else {
            self.scheduler.start()
        };
        self.record(result);
    }

    fn reset(&mut self) {
        info!("reset requested");
        let result = self.reset_and_tick();
        self.record(result);
    }

    /// Reset every simulation and run its first tick, keeping the play state.
    fn reset_and_tick(&mut self) -> Result<(), SimError> {
        let was_running = self.scheduler.is_running();
        self.scheduler.stop()?;
        self.input.press(Key::Reset);
        let ticked = self.scheduler.tick_once();
        self.input.release(Key::Reset);
        ticked?;
        if was_running {
            self.scheduler.start()?;
        }
        Ok(())
    }

    fn step(&mut self) {
        let result = self.scheduler.tick_once();
        self.record(result);
    }

    fn controls(&mut self, ui: &mut egui::Ui, status: &[String]) {
        ui.horizontal(|ui| {
            let running = self.scheduler.is_running();
            if ui.button(if running { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.toggle_pause();
            }
            if ui.button("⏮ Reset").clicked() {
                self.reset();
            }
            if ui.add_enabled(!running, egui::Button::new("⏭ Step")).clicked() {
                self.step();
            }

            ui.separator();
            ui.label(format!(
                "Target: {} ticks/s",
                self.scheduler.config().ticks_per_second
            ));

            for line in status {
                ui.separator();
                ui.label(line);
            }
        });
    }

    fn paint(&self, painter: &egui::Painter, rect: egui::Rect, scene: &Scene) {
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(16));
        let centre = rect.center();
        let half = (rect.width().min(rect.height()) / 2.0) as f64;
        let to_screen = |p: glam::DVec2| centre + egui::vec2((p.x * half) as f32, (-p.y * half) as f32);

        for &(from, to) in &scene.segments {
            if let (Some((a, _)), Some((b, _))) = (self.camera.project(from), self.camera.project(to)) {
                painter.line_segment(
                    [to_screen(a), to_screen(b)],
                    egui::Stroke::new(1.0, egui::Color32::GRAY),
                );
            }
        }

        for &(position, mass) in &scene.points {
            if let Some((p, _)) = self.camera.project(position) {
                let radius = (2.0 + mass.ln().max(0.0) * 0.5).min(10.0) as f32;
                painter.circle_filled(to_screen(p), radius, egui::Color32::LIGHT_BLUE);
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_keys(ctx);
        self.camera.update(&self.input.snapshot());

        let scene = self.frames.latest();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui, &scene.labels);
        });

        if let Some(error) = self.last_error.clone() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(egui::RichText::new(format!("Error: {error}")).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            self.frames.set_ready(rect.width() > 0.0 && rect.height() > 0.0);
            self.paint(&painter, rect, &scene);
        });

        // Camera keys need frames even while the simulation is paused.
        if ctx.input(|i| !i.keys_down.is_empty()) {
            ctx.request_repaint();
        }
    }
}

/// Open the window and block until it is closed.
pub fn run(
    simulation: Box<dyn Simulation>,
    config: SchedulerConfig,
    camera: Camera,
) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!("tether: {}", simulation.name()))
            .with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };
    let title = simulation.name().to_string();
    eframe::run_native(
        &title,
        options,
        Box::new(
            move |cc: &eframe::CreationContext<'_>| -> Result<
                Box<dyn eframe::App>,
                Box<dyn std::error::Error + Send + Sync>,
            > {
                let app = ViewerApp::new(cc, simulation, config, camera)?;
                Ok(Box::new(app))
            },
        ),
    )
}
