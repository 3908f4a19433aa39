//! Viewer builder and the windowed render loop.
//!
//! [`Viewer`] wires the whole pipeline together: it builds the trail buffer,
//! spawns the generator thread, creates the window and GPU state, and then
//! runs the frame-paced render loop. Use method chaining to configure, then
//! call `.run()` to start:
//!
//! ```ignore
//! use phasetrail::prelude::*;
//!
//! Viewer::new()
//!     .with_capacity(100_000)
//!     .with_frame_rate(60)
//!     .run()?;
//! ```
//!
//! # Key bindings
//!
//! Active when the scene is the tunable bedhead attractor:
//!
//! | Key | Action |
//! |-----|--------|
//! | W / S / A / D | pan via the offset parameters |
//! | ↑ / ↓ | shift shape parameter A |
//! | → / ← | shift shape parameter B |
//! | `.` / `,` | zoom in / out via the multiplier |
//! | Enter | print the current parameter block |
//! | R | reset A, B and the multiplier to base values |
//! | Escape | quit |

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::attractor::{Attractor, Bedhead, BedheadParams};
use crate::clock::FrameClock;
use crate::config;
use crate::error::{GpuError, ViewerError};
use crate::generator::Generator;
use crate::gpu::GpuState;
use crate::input::{Input, KeyCode};
use crate::shader::color_seed;
use crate::trail::{LockedTrail, RelaxedTrail, TrailMode, TrailStore};

/// Builder for the attractor viewer.
pub struct Viewer {
    capacity: usize,
    group_size: usize,
    gen_delay: Duration,
    frame_rate: u32,
    trail_mode: TrailMode,
    title: String,
    attractor: Option<Box<dyn Attractor>>,
    params: Option<Arc<BedheadParams>>,
}

impl Viewer {
    /// Create a viewer with default settings: the bedhead attractor at its
    /// base parameters, a 100k-point relaxed trail, 60 FPS.
    pub fn new() -> Self {
        Self {
            capacity: config::DEFAULT_CAPACITY,
            group_size: config::DEFAULT_GROUP_SIZE,
            gen_delay: config::DEFAULT_GEN_DELAY,
            frame_rate: config::DEFAULT_FRAME_RATE,
            trail_mode: TrailMode::default(),
            title: config::TITLE.to_string(),
            attractor: None,
            params: None,
        }
    }

    /// Set the number of trail points retained. Clamped to at least one
    /// point; the ring's cursor wraps modulo capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Set the number of coordinate pairs per point group.
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Set the pause between generator samples. Zero runs flat out.
    pub fn with_generation_delay(mut self, delay: Duration) -> Self {
        self.gen_delay = delay;
        self
    }

    /// Set the target frame rate. Per-key deltas scale inversely with it.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Choose between the default torn-read trail and the mutex-guarded one.
    pub fn with_trail_mode(mut self, mode: TrailMode) -> Self {
        self.trail_mode = mode;
        self
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Use a bedhead attractor with the given base parameters. The keyboard
    /// bindings tune it live. The multiplier must be nonzero.
    pub fn with_bedhead(mut self, a: f64, b: f64, multiplier: f64) -> Self {
        let params = Arc::new(BedheadParams::new(a, b, multiplier));
        self.attractor = Some(Box::new(Bedhead::new(params.clone())));
        self.params = Some(params);
        self
    }

    /// Use an arbitrary attractor. Parameter-shift keys are inert for scenes
    /// without a tunable parameter block.
    pub fn with_attractor(mut self, attractor: Box<dyn Attractor>) -> Self {
        self.attractor = Some(attractor);
        self.params = None;
        self
    }

    /// Run the viewer. Blocks until the window is closed.
    pub fn run(self) -> Result<(), ViewerError> {
        let mut viewer = self;
        if viewer.attractor.is_none() {
            viewer = viewer.with_bedhead(config::BASE_A, config::BASE_B, config::BASE_M);
        }

        let trail: Arc<dyn TrailStore> = match viewer.trail_mode {
            TrailMode::Relaxed => Arc::new(RelaxedTrail::new(viewer.capacity, viewer.group_size)),
            TrailMode::Locked => Arc::new(LockedTrail::new(viewer.capacity, viewer.group_size)),
        };

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            title: viewer.title,
            window: None,
            gpu: None,
            init_error: None,
            trail,
            attractor: viewer.attractor,
            generator: None,
            params: viewer.params,
            gen_delay: viewer.gen_delay,
            input: Input::new(),
            clock: FrameClock::new(viewer.frame_rate),
            movement: config::movement_multiplier(viewer.frame_rate),
            snapshot: Vec::new(),
        };

        event_loop.run_app(&mut app)?;

        // Make sure the worker is gone even if the loop exited without a
        // close event.
        if let Some(generator) = app.generator.take() {
            generator.join();
        }

        match app.init_error.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    title: String,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    init_error: Option<GpuError>,
    trail: Arc<dyn TrailStore>,
    attractor: Option<Box<dyn Attractor>>,
    generator: Option<Generator>,
    params: Option<Arc<BedheadParams>>,
    gen_delay: Duration,
    input: Input,
    clock: FrameClock,
    movement: f64,
    snapshot: Vec<f32>,
}

impl App {
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(generator) = self.generator.take() {
            generator.join();
        }
        event_loop.exit();
    }

    /// Apply the key bindings for this frame.
    fn apply_bindings(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.key_held(KeyCode::Escape) {
            self.shutdown(event_loop);
            return;
        }

        let Some(params) = &self.params else {
            return;
        };
        let delta = 0.01 * self.movement;

        if self.input.key_held(KeyCode::W) {
            params.shift_y(-delta);
        }
        if self.input.key_held(KeyCode::S) {
            params.shift_y(delta);
        }
        if self.input.key_held(KeyCode::A) {
            params.shift_x(delta);
        }
        if self.input.key_held(KeyCode::D) {
            params.shift_x(-delta);
        }

        if self.input.key_held(KeyCode::Up) {
            params.shift_a(delta);
        }
        if self.input.key_held(KeyCode::Down) {
            params.shift_a(-delta);
        }
        if self.input.key_held(KeyCode::Right) {
            params.shift_b(delta);
        }
        if self.input.key_held(KeyCode::Left) {
            params.shift_b(-delta);
        }

        if self.input.key_held(KeyCode::Period) {
            params.shift_m(1.0 + delta);
        }
        if self.input.key_held(KeyCode::Comma) {
            params.shift_m(1.0 - delta);
        }

        if self.input.key_pressed(KeyCode::Enter) {
            println!("{:#?}", params);
        }
        if self.input.key_held(KeyCode::R) {
            params.reset();
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &mut self.gpu {
            self.trail.fill_snapshot(&mut self.snapshot);

            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos();

            match gpu.render(&self.snapshot, color_seed(nanos)) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                }),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    self.shutdown(event_loop);
                    return;
                }
                Err(e) => eprintln!("Render error: {:?}", e),
            }
        }

        self.apply_bindings(event_loop);
        self.input.end_frame();

        self.clock.pace();
        if let Some(fps) = self.clock.tick() {
            println!("FPS: {}", fps);
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(window, self.trail.len())) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                self.init_error = Some(e);
                event_loop.exit();
                return;
            }
        }

        if let Some(attractor) = self.attractor.take() {
            self.generator = Some(Generator::spawn(
                attractor,
                self.trail.clone(),
                self.gen_delay,
            ));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attractor::TrigMap;

    #[test]
    fn test_builder_defaults() {
        let viewer = Viewer::new();
        assert_eq!(viewer.capacity, config::DEFAULT_CAPACITY);
        assert_eq!(viewer.group_size, config::DEFAULT_GROUP_SIZE);
        assert_eq!(viewer.frame_rate, config::DEFAULT_FRAME_RATE);
        assert_eq!(viewer.trail_mode, TrailMode::Relaxed);
        assert!(viewer.attractor.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let viewer = Viewer::new()
            .with_capacity(512)
            .with_group_size(2)
            .with_generation_delay(Duration::from_micros(5))
            .with_frame_rate(30)
            .with_trail_mode(TrailMode::Locked)
            .with_title("test");

        assert_eq!(viewer.capacity, 512);
        assert_eq!(viewer.group_size, 2);
        assert_eq!(viewer.gen_delay, Duration::from_micros(5));
        assert_eq!(viewer.frame_rate, 30);
        assert_eq!(viewer.trail_mode, TrailMode::Locked);
        assert_eq!(viewer.title, "test");
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let viewer = Viewer::new().with_capacity(0);
        assert_eq!(viewer.capacity, 1);
    }

    #[test]
    fn test_bedhead_scene_exposes_params() {
        let viewer = Viewer::new().with_bedhead(-0.81, -0.92, 0.2);
        assert!(viewer.params.is_some());
        assert!(viewer.attractor.is_some());
    }

    #[test]
    fn test_custom_attractor_has_no_params() {
        let viewer = Viewer::new()
            .with_bedhead(-0.81, -0.92, 0.2)
            .with_attractor(Box::new(TrigMap::new(-2.0, -2.0, -1.2, 2.0, 0.3)));
        assert!(viewer.params.is_none());
    }
}
