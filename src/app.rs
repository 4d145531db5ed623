use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::config::ViewerConfig;
use crate::gfx::{camera::Controls, rendering::render_engine::RenderEngine, scene::Scene};

pub struct App {
    event_loop: Option<EventLoop<()>>,
    state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    controls: Controls,
    ground_extent: f32,
}

impl App {
    /// Create a new viewer application with the given configuration
    pub fn new(config: ViewerConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new()?;
        let scene = Scene::new(&config);
        let controls = Controls::new(config.turn_step, config.move_step);

        Ok(Self {
            event_loop: Some(event_loop),
            state: AppState {
                window: None,
                render_engine: None,
                scene,
                controls,
                ground_extent: config.floor_half_extent,
            },
        })
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already consumed"))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.state)?;
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title("hexwalk")
            .with_inner_size(winit::dpi::LogicalSize::new(1200, 800));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();

        let ground_extent = self.ground_extent;
        let engine =
            pollster::block_on(RenderEngine::new(window.clone(), width, height, ground_extent));
        let engine = match engine {
            Ok(engine) => engine,
            Err(err) => {
                log::error!("failed to initialize renderer: {err}");
                event_loop.exit();
                return;
            }
        };

        self.scene
            .init_gpu_resources(engine.device(), engine.object_bind_group_layout());
        self.scene.arcball.resize(width.max(1), height.max(1));
        self.scene.camera.resize_projection(width.max(1), height.max(1));
        self.render_engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.controls
                    .on_cursor_moved(position, &mut self.scene.arcball, window);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.controls
                    .on_mouse_input(state, button, &mut self.scene.arcball);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if matches!(event.physical_key, PhysicalKey::Code(KeyCode::Escape)) {
                    event_loop.exit();
                    return;
                }
                self.controls.on_key(&event, &mut self.scene.camera, window);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                // a minimized window reports a zero-sized surface
                if width == 0 || height == 0 {
                    return;
                }
                self.scene.arcball.resize(width, height);
                self.scene.camera.resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.scene.update();
                render_engine.update(&mut self.scene);
                render_engine.render_frame(&self.scene);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // continuous rendering: every frame schedules the next
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
