//! Swellrover - drive a toy truck across rolling procedural terrain
//!
//! Sine-wave hills under a seven-part truck that hugs them as it drives.
//! An orbit camera watches from wherever you drag it.

mod camera;
mod cli;
mod geometry;
mod input;
mod params;
mod rendering;
mod terrain;
mod transform;
mod vehicle;

use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use camera::OrbitCamera;
use clap::Parser;
use cli::Args;
use geometry::MeshData;
use glam::Vec2;
use input::InputState;
use params::{RenderParams, SimParams};
use rendering::RenderSystem;
use terrain::Terrain;
use vehicle::{PartId, Vehicle, PART_COUNT};

const SCREENSHOT_PATH: &str = "screenshot.png";

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation state
    terrain: Terrain,
    vehicle: Vehicle,
    camera: OrbitCamera,
    input: InputState,

    // Configuration
    params: SimParams,

    // Time tracking
    last_frame: Instant,
}

impl App {
    fn new(params: SimParams) -> Result<Self, String> {
        let terrain = Terrain::new(&params.terrain);
        let vehicle = Vehicle::new(&params.vehicle)?;
        let camera = OrbitCamera::new(
            &params.camera,
            params.render.window_width,
            params.render.window_height,
        );

        Ok(Self {
            window: None,
            render_system: None,
            terrain,
            vehicle,
            camera,
            input: InputState::default(),
            params,
            last_frame: Instant::now(),
        })
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Swellrover")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.params.render.window_width,
                self.params.render.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        // Initialize rendering system
        let meshes = scene_meshes(&self.terrain, &self.params.render);
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.params.render,
            &meshes,
        ))
        .unwrap();

        println!("\nSwellrover is running!");
        println!("  W/S        throttle forward / backward");
        println!("  A/D        steer left / right");
        println!("  Left drag  orbit the camera");
        println!("  Scroll     zoom");
        println!("  P          save {}", SCREENSHOT_PATH);
        println!("  Esc        quit\n");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(ref mut render_system) = self.render_system {
                    render_system.resize(size.width, size.height);
                }
                self.camera.set_viewport(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, event);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.input.begin_drag(),
                ElementState::Released => self.input.end_drag(),
            },
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                if let Some(delta) = self.input.move_cursor(position) {
                    self.camera.update_orbit(delta, 0.0);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                self.camera.update_orbit(Vec2::ZERO, scroll);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    fn handle_key(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        event: KeyEvent,
    ) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;

        match code {
            KeyCode::Escape => {
                if pressed {
                    event_loop.exit();
                }
            }
            KeyCode::KeyW => self.input.forward = pressed,
            KeyCode::KeyS => self.input.backward = pressed,
            KeyCode::KeyA => self.input.steer_left = pressed,
            KeyCode::KeyD => self.input.steer_right = pressed,
            KeyCode::KeyP => {
                if pressed && !event.repeat {
                    self.input.screenshot_requested = true;
                }
            }
            _ => {}
        }
    }

    /// Advance the simulation by one frame and render it
    fn render_frame(&mut self) {
        let Some(ref render_system) = self.render_system else {
            return;
        };

        let now = Instant::now();
        // A stalled frame must not teleport the truck
        let dt_s = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let drive = self.input.drive();
        self.vehicle.update(dt_s, drive, &self.terrain);

        // One MVP per draw item: terrain sits at the origin, so its model
        // matrix is the identity
        let view_proj = self.camera.view_projection_matrix();
        let mut mvps = Vec::with_capacity(1 + PART_COUNT);
        mvps.push(view_proj);
        for model in self.vehicle.model_matrices() {
            mvps.push(view_proj * model);
        }

        let screenshot = if self.input.screenshot_requested {
            self.input.screenshot_requested = false;
            Some(SCREENSHOT_PATH)
        } else {
            None
        };

        if let Err(e) = render_system.render(&mvps, screenshot) {
            eprintln!("Render error: {:?}", e);
        }
    }
}

/// Build the draw-order mesh list: terrain first, then the truck parts
/// in `PartId::ALL` order.
fn scene_meshes(terrain: &Terrain, render: &RenderParams) -> Vec<MeshData> {
    let mut meshes = Vec::with_capacity(1 + PART_COUNT);
    meshes.push(terrain.mesh.clone());
    for part in PartId::ALL {
        let mesh = match part {
            PartId::Body => geometry::cube(render.body_color),
            PartId::Cabin => geometry::cube(render.cabin_color),
            _ => geometry::cylinder(render.wheel_color, render.wheel_segments),
        };
        meshes.push(mesh);
    }
    meshes
}

fn main() {
    let args = Args::parse();

    let mut params = SimParams::default();
    args.apply(&mut params);
    if let Err(e) = params.validate() {
        eprintln!("Invalid parameters: {}", e);
        std::process::exit(1);
    }

    println!("Swellrover - truck driving on procedural terrain");
    println!("Initializing...");

    let mut app = match App::new(params) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().unwrap();
    let _ = event_loop.run_app(&mut app);
}
