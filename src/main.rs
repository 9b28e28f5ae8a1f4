//! Snowline - a scroll-driven flight over procedural snowy terrain
//!
//! Scroll (wheel, trackpad, or keys) to fly the camera along the path while
//! a glowing rock rolls ahead of it through the snow.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use snowline::cli::Args;
use snowline::params::{
    RecordingConfig, RecordingProgress, RenderConfig, SceneParams, ScrollParams,
};
use snowline::rendering::{RenderSystem, SceneUniforms};
use snowline::scene::Scene;
use snowline::scroll::ScrollController;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    scene: Scene,
    scroll: ScrollController,

    // Configuration
    render_config: RenderConfig,
    recording_config: Option<RecordingConfig>,
    recording: Option<RecordingProgress>,

    // Time tracking
    start_time: Instant,
    last_frame: Instant,
    sim_time_s: f32,
    last_section: Option<usize>,
}

impl App {
    fn new(
        scene: Scene,
        scroll: ScrollController,
        recording_config: Option<RecordingConfig>,
    ) -> Self {
        Self {
            window: None,
            render_system: None,
            scene,
            scroll,
            render_config: RenderConfig::default(),
            recording: recording_config.as_ref().map(RecordingProgress::new),
            recording_config,
            start_time: Instant::now(),
            last_frame: Instant::now(),
            sim_time_s: 0.0,
            last_section: None,
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::PageDown | KeyCode::Space => self.scroll.next_section(),
            KeyCode::PageUp => self.scroll.previous_section(),
            KeyCode::ArrowDown => self.scroll.scroll_lines(1.0),
            KeyCode::ArrowUp => self.scroll.scroll_lines(-1.0),
            KeyCode::Home => self.scroll.set_target(0.0),
            KeyCode::End => self.scroll.set_target(1.0),
            _ => {}
        }
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        // Wheel up (positive y) moves back toward the start
        match delta {
            MouseScrollDelta::LineDelta(_, y) => self.scroll.scroll_lines(-y),
            MouseScrollDelta::PixelDelta(pos) => {
                let height = self
                    .render_system
                    .as_ref()
                    .map(|r| r.size().1)
                    .unwrap_or(self.render_config.window_height);
                self.scroll.scroll_pixels(-pos.y as f32, height as f32);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Snowline")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.scene,
            &self.render_config,
            self.recording_config.clone(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Snowline is running! Scroll to fly, ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.start_time = Instant::now();
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key),
            WindowEvent::MouseWheel { delta, .. } => self.handle_wheel(delta),
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the scene and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        // Recording runs on a fixed timestep, interactive mode on wall time
        let now = Instant::now();
        let dt_s = match &self.recording_config {
            Some(config) => config.frame_dt(),
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.last_frame = now;
        self.sim_time_s += dt_s;

        let scroll_offset = self.scroll.update(dt_s);
        let section = self.scroll.section();
        if self.last_section != Some(section) {
            log::info!(
                "Section {}: {} (offset {:.2})",
                section + 1,
                self.scroll.section_title(),
                scroll_offset
            );
            self.last_section = Some(section);
        }

        let frame = self.scene.update(scroll_offset, dt_s);

        let Some(render_system) = &mut self.render_system else {
            return;
        };

        // Camera
        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;
        let (view_proj, camera_pos) = self
            .scene
            .camera
            .create_view_proj_matrix(&frame.camera, &self.render_config);
        render_system.update_uniforms(&SceneUniforms::new(
            view_proj,
            camera_pos,
            frame.rock.position,
            &self.render_config,
        ));

        // Dynamic objects
        render_system.update_rock(self.scene.rock.model_matrix(&frame.rock));
        if !self.scene.snow.is_empty() {
            render_system.update_snow(&self.scene.snow_positions(self.sim_time_s));
        }
        if frame.trail_rebuilt {
            render_system.update_trail(&self.scene.trail);
        }

        // Render; a recorded frame only counts once it reached the surface
        let frame_index = self.recording.as_ref().map_or(0, |p| p.next_index());
        let rendered = match render_system.render(frame_index) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
                false
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
                false
            }
            Err(e) => {
                log::error!("Render error: {:?}", e);
                false
            }
        };

        let (Some(config), Some(progress)) = (&self.recording_config, &mut self.recording) else {
            return;
        };
        if !rendered {
            log::warn!("Frame {} dropped, retrying", progress.next_index());
            return;
        }
        progress.frame_captured();
        if progress.captured() % config.fps as usize == 0 {
            log::info!(
                "Recorded {}/{} frames",
                progress.captured(),
                progress.total()
            );
        }
        if progress.is_complete(self.scroll.at_end()) {
            log::info!(
                "Recording complete: {} frames in {} ({:.1}s wall time)",
                progress.captured(),
                config.frames_dir(),
                self.start_time.elapsed().as_secs_f32()
            );
            event_loop.exit();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Snowline - scroll-driven snowy terrain flight");
    log::info!("Initializing scene...");

    let mut params = SceneParams::default();
    args.apply(&mut params);
    let scene = Scene::new(&params)?;

    let mut scroll = ScrollController::new(ScrollParams::default());
    if let Some(duration) = args.autoplay_duration() {
        log::info!("Autoplay: full journey in {:.1}s", duration);
        scroll = scroll.with_autoplay(duration);
    }
    log::debug!("Autoplay active: {}", scroll.is_autoplaying());

    let recording_config = args.create_recording_config()?;
    if let Some(config) = &recording_config {
        log::info!(
            "Recording {} frames at {} fps to {}",
            config.total_frames(),
            config.fps,
            config.frames_dir()
        );
    }

    let mut app = App::new(scene, scroll, recording_config);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
