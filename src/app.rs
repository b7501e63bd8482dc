//! Winit application driving the trail simulation.
//!
//! The simulation draws into a [`PixelCanvas`] on ticker deadlines and the
//! window redraw presents it with the control panel on top.

use log::{error, info};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::error::{Result, TrailError};
use crate::gfx::{
    canvas::PixelCanvas,
    render_engine::RenderEngine,
    ui::{panel::render_trail_controls, UiManager},
};
use crate::simulation::{manager::SimulationManager, settings::TrailSettings};

pub struct TrailApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    manager: SimulationManager,
    canvas: PixelCanvas,
    show_ui: bool,
    error: Option<TrailError>,
}

impl TrailApp {
    /// Create the application and its simulation from `settings`
    pub fn new(settings: TrailSettings) -> Result<Self> {
        let event_loop = EventLoop::new()?;
        let canvas = PixelCanvas::new(settings.screen_width, settings.screen_height)?;
        let manager = SimulationManager::new(settings)?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                manager,
                canvas,
                show_ui: true,
                error: None,
            },
        })
    }

    /// Access the simulation before the event loop starts
    pub fn manager_mut(&mut self) -> &mut SimulationManager {
        &mut self.app_state.manager
    }

    /// Show the control panel, or only the FPS overlay; `H` toggles it at runtime
    pub fn set_show_ui(&mut self, show: bool) {
        self.app_state.show_ui = show;
    }

    /// Run until the window closes
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, e: TrailError) {
        error!("{}", e);
        self.error = Some(e);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = WindowAttributes::default()
            .with_title("Line Trails")
            .with_inner_size(LogicalSize::new(
                self.manager.settings().screen_width,
                self.manager.settings().screen_height,
            ));
        let window = Arc::new(event_loop.create_window(attributes)?);
        let PhysicalSize { width, height } = window.inner_size();

        let target = window.clone();
        let renderer = pollster::block_on(RenderEngine::new(target, width, height))?;

        let mut ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        info!("window ready at {}x{}", width, height);
        self.window = Some(window);
        self.render_engine = Some(renderer);
        self.ui_manager = Some(ui_manager);
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let (Some(render_engine), Some(window)) =
            (self.render_engine.as_mut(), self.window.as_ref())
        else {
            return Ok(());
        };
        render_engine.upload(&self.canvas);

        let Some(ui_manager) = self.ui_manager.as_mut() else {
            return render_engine.render_frame();
        };
        let manager = &mut self.manager;
        let show_ui = self.show_ui;
        render_engine.render_frame_with_ui(|device, queue, encoder, view| {
            ui_manager.draw(device, queue, encoder, window, view, |ui| {
                if show_ui {
                    render_trail_controls(ui, manager);
                } else {
                    manager.frame_clock().render_overlay(ui);
                }
            });
        })
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        if self.show_ui {
            if let Some(ui_manager) = self.ui_manager.as_mut() {
                let ui_event: winit::event::Event<()> = winit::event::Event::WindowEvent {
                    window_id,
                    event: event.clone(),
                };
                if ui_manager.handle_input(&window, &ui_event) {
                    window.request_redraw();
                    return;
                }
            }
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match key_code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyH => {
                    self.show_ui = !self.show_ui;
                    window.request_redraw();
                }
                KeyCode::Space => {
                    self.manager.set_paused(!self.manager.is_paused());
                }
                _ => (),
            },
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
                window.request_redraw();
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            WindowEvent::CursorMoved { .. } | WindowEvent::MouseInput { .. } => {
                // Keep the panel responsive while paused
                window.request_redraw();
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.manager.poll(Instant::now(), &mut self.canvas) {
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
        }

        match self.manager.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
