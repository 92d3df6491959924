use anyhow::{Context, Result};
use coaster_render::{Camera, RenderContext, TrackRenderer};
use coaster_runtime::{Action, GameClock, InputState};
use coaster_track::{AnimationState, CameraMode, Ride};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::{Fullscreen, Window, WindowId};

pub struct RideApp {
    pub ride: Ride,
    pub state: AnimationState,

    pub clock: GameClock,
    pub input: InputState,

    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    renderer: Option<TrackRenderer>,
    camera: Camera,

    pub fullscreen: bool,
    scene_dirty: bool,
    failure: Option<anyhow::Error>,
}

impl RideApp {
    pub fn new(ride: Ride, fullscreen: bool) -> Self {
        let state = ride.initial_state();
        let config = ride.config();
        let clock = GameClock::new(config.tick_interval());
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let camera = Camera::new(&config.camera, aspect);
        Self {
            ride,
            state,
            clock,
            input: InputState::new(),
            window: None,
            render_context: None,
            renderer: None,
            camera,
            fullscreen,
            scene_dirty: true,
            failure: None,
        }
    }

    /// The error that stopped the event loop, if any
    pub fn take_failure(&mut self) -> Option<anyhow::Error> {
        self.failure.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.ride.config().window;
        let window_attrs = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height))
            .with_resizable(true);

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialize GPU")?;
        self.camera.aspect = render_context.aspect_ratio();

        let renderer = TrackRenderer::new(&render_context, self.ride.config().colors.background);

        self.render_context = Some(render_context);
        self.renderer = Some(renderer);
        self.scene_dirty = true;
        tracing::info!("ride window ready");
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn handle_actions(&mut self, event_loop: &ActiveEventLoop) {
        for action in self.input.actions_just_pressed() {
            match action {
                Action::ToggleCamera => {
                    self.state.toggle_camera();
                    self.update_title();
                    self.request_redraw();
                }
                Action::Quit => event_loop.exit(),
            }
        }
        self.input.end_frame();
    }

    /// Run every animation step that has come due.
    fn advance(&mut self) {
        self.clock.tick();

        while self.clock.should_fixed_update() {
            let (next, _report) = self.ride.tick(self.state);
            self.state = next;
            self.scene_dirty = true;
            self.clock.consume_fixed_step();
        }

        if self.scene_dirty {
            self.update_title();
            self.request_redraw();
        }
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let base = &self.ride.config().window.title;
        match self.state.camera_mode {
            CameraMode::Ride => window.set_title(&format!("{base} - speed {:.2}", self.state.speed)),
            CameraMode::Orbit => window.set_title(base),
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn render(&mut self) -> Result<()> {
        let (Some(context), Some(renderer)) = (&mut self.render_context, &mut self.renderer)
        else {
            return Ok(());
        };

        // Snapshot after the tick so geometry and camera agree
        let state = self.state;
        if self.scene_dirty {
            renderer.upload(context, &self.ride.build_scene(&state));
            self.scene_dirty = false;
        }

        self.camera.look_at(&self.ride.camera_for(&state));
        renderer
            .render(context, &self.camera)
            .context("Render failed")
    }
}

impl ApplicationHandler for RideApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.initialize(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                    self.camera.set_aspect(new_size.width, new_size.height);
                }
                self.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            self.input.process_key_down(key_code);
                            self.handle_actions(event_loop);
                        }
                        ElementState::Released => {
                            self.input.process_key_up(key_code);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    self.fail(event_loop, err);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }
        self.advance();
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_deadline()));
    }
}
