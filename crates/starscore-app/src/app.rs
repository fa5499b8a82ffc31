//! Core application state and lifecycle.

use kurbo::{Point, Size};
use peniko::Color;
use starscore_core::geometry::LABEL_GAP;
use starscore_core::{ChangeKind, PointerEvent, RatingConfig, RatingWidget};
use starscore_render::{RenderContext, RenderResult, Renderer, RendererError, SvgRenderer, VelloRenderer};
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::shortcuts::Shortcut;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Extra magnification applied on top of the monitor scale factor.
    pub zoom: f64,
    pub background_color: Color,
    /// Readout text color.
    pub text_color: Color,
    pub rating: RatingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "StarScore".to_string(),
            zoom: 2.0,
            background_color: Color::WHITE,
            text_color: Color::from_rgba8(60, 60, 60, 255),
            rating: RatingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default window settings around the given control configuration.
    pub fn with_rating(rating: RatingConfig) -> Self {
        Self {
            rating,
            ..Self::default()
        }
    }

    /// Logical window size that shows `widget` at its natural size.
    pub fn window_size(&self, widget: &RatingWidget) -> LogicalSize<f64> {
        let mut size = widget.intrinsic_size();
        if widget.shows_value_label() {
            size.width += widget.label_width() + LABEL_GAP;
        }
        LogicalSize::new(size.width * self.zoom, size.height * self.zoom)
    }

    /// Control frame for a physical window size.
    pub fn frame_for(&self, size: PhysicalSize<u32>, scale_factor: f64) -> Size {
        let logical = size.to_logical::<f64>(scale_factor);
        Size::new(logical.width / self.zoom, logical.height / self.zoom)
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    rating_renderer: VelloRenderer,
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    widget: RatingWidget,
    /// Last cursor position in control coordinates.
    cursor: Option<Point>,
}

impl AppState {
    /// Physical pixels per control unit.
    fn pixel_scale(&self, zoom: f64) -> f64 {
        self.window.scale_factor() * zoom
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window closes.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new().map_err(|e| AppError::EventLoop(e.to_string()))?;
        let mut app = App::with_config(config);
        Shortcut::print_all();
        event_loop
            .run_app(&mut app)
            .map_err(|e| AppError::EventLoop(e.to_string()))
    }

    /// Finish initialization after the surface is created.
    fn finish_init(&self, window: Arc<Window>, surface: RenderSurface<'static>) -> RenderResult<AppState> {
        let render_cx = self
            .render_cx
            .as_ref()
            .ok_or_else(|| RendererError::InitFailed("RenderContext not initialized".to_string()))?;
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let mut widget = RatingWidget::from_config(&self.config.rating);
        widget.on_value_changed(|event| match event.kind {
            ChangeKind::Commit => log::info!("Rating committed: {} -> {}", event.old, event.new),
            ChangeKind::Continuous => log::debug!("Rating changed: {} -> {}", event.old, event.new),
        });

        widget.set_frame(self.config.frame_for(window.inner_size(), window.scale_factor()));

        Ok(AppState {
            window,
            surface,
            vello_renderer,
            rating_renderer: VelloRenderer::new(),
            texture_blitter,
            widget,
            cursor: None,
        })
    }

    /// Resize the surface and refit the control to a new window size.
    fn apply_size(&mut self, state: &mut AppState, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        if let Some(render_cx) = self.render_cx.as_mut() {
            render_cx.resize_surface(&mut state.surface, size.width, size.height);
        }
        let frame = self.config.frame_for(size, state.window.scale_factor());
        state.widget.set_frame(frame);
    }

    fn handle_shortcut(&mut self, state: &mut AppState, shortcut: Shortcut, event_loop: &ActiveEventLoop) {
        match shortcut {
            Shortcut::Quit => event_loop.exit(),
            Shortcut::ExportSvg => {
                let mut svg = SvgRenderer::new();
                svg.build_scene(
                    &RenderContext::new(&state.widget)
                        .with_background(self.config.background_color)
                        .with_text_color(self.config.text_color),
                );
                println!("{}", svg.take_document());
            }
            _ => {
                if shortcut.apply(&mut state.widget) {
                    let size = self.config.window_size(&state.widget);
                    // `Some` means the size was applied without a Resized event.
                    if let Some(applied) = state.window.request_inner_size(size) {
                        self.apply_size(state, applied);
                    }
                }
                log::info!("{}", shortcut.description());
            }
        }
    }

    fn render(&mut self) -> RenderResult<()> {
        let Some(state) = self.state.as_mut() else {
            return Ok(());
        };
        let Some(render_cx) = self.render_cx.as_ref() else {
            return Ok(());
        };

        let scale = state.pixel_scale(self.config.zoom);
        state
            .rating_renderer
            .build_scene(
                &RenderContext::new(&state.widget)
                    .with_scale_factor(scale)
                    .with_text_color(self.config.text_color),
            );

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match state.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return Ok(());
            }
        };

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        let params = RenderParams {
            base_color: self.config.background_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a storage-bindable Rgba8Unorm target.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        state
            .vello_renderer
            .render_to_texture(
                device,
                queue,
                state.rating_renderer.scene(),
                &render_texture_view,
                &params,
            )
            .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
        state
            .texture_blitter
            .copy(device, &mut encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(encoder.finish()));

        surface_texture.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");

        let widget = RatingWidget::from_config(&self.config.rating);
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(self.config.window_size(&widget));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        log::info!("Surface size: {}x{}", size.width, size.height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);

        let surface: RenderSurface<'static> = match pollster::block_on(render_cx.create_surface(
            window.clone(),
            size.width,
            size.height,
            PresentMode::AutoVsync,
        )) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                event_loop.exit();
                return;
            }
        };

        match self.finish_init(window, surface) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::RedrawRequested) {
            if let Err(e) = self.render() {
                log::error!("{}", e);
            }
            return;
        }

        let zoom = self.config.zoom;
        let Some(mut state) = self.state.take() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => self.apply_size(&mut state, size),

            WindowEvent::CursorMoved { position, .. } => {
                let scale = state.pixel_scale(zoom);
                let point = Point::new(position.x / scale, position.y / scale);
                state.cursor = Some(point);
                if state.widget.is_focused() {
                    state.widget.handle_pointer_event(PointerEvent::Move { position: point });
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(position) = state.cursor {
                    let event = match button_state {
                        ElementState::Pressed => PointerEvent::Down { position },
                        ElementState::Released => PointerEvent::Up { position },
                    };
                    state.widget.handle_pointer_event(event);
                }
            }

            WindowEvent::Focused(false) => {
                if state.widget.is_focused() {
                    state.widget.handle_pointer_event(PointerEvent::Cancel);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let Some(shortcut) = Shortcut::from_key(&event.logical_key) {
                        self.handle_shortcut(&mut state, shortcut, event_loop);
                    }
                }
            }

            _ => {}
        }

        if state.widget.take_redraw_request() {
            state.window.request_redraw();
        }
        self.state = Some(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_fits_control() {
        let config = AppConfig::default();
        let widget = RatingWidget::new();
        let size = config.window_size(&widget);
        assert_eq!(size.width, 500.0);
        assert_eq!(size.height, 88.0);
    }

    #[test]
    fn test_window_includes_readout() {
        let config = AppConfig {
            zoom: 1.0,
            ..AppConfig::default()
        };
        let mut widget = RatingWidget::new();
        widget.set_show_value_label(true);
        // Five stars plus the readout and its gap.
        assert_eq!(config.window_size(&widget).width, 250.0 + 50.0 + LABEL_GAP);
        assert_eq!(
            widget.drawing_rect().width(),
            widget.frame().width - widget.label_width() - LABEL_GAP
        );
        widget.set_frame(Size::new(config.window_size(&widget).width, 44.0));
        assert_eq!(widget.drawing_rect().width(), widget.intrinsic_size().width);
    }

    #[test]
    fn test_applied_window_size_maps_back_to_frame() {
        let config = AppConfig::default();
        let mut widget = RatingWidget::new();
        widget.set_show_value_label(true);

        let logical = config.window_size(&widget);
        let physical: PhysicalSize<u32> = logical.to_physical(2.0);
        let frame = config.frame_for(physical, 2.0);
        assert_eq!(frame, Size::new(305.0, 44.0));

        widget.set_frame(frame);
        assert_eq!(widget.drawing_rect().width(), widget.intrinsic_size().width);
    }

    #[test]
    fn test_with_rating_keeps_window_defaults() {
        let rating = RatingConfig {
            star_count: 3,
            ..RatingConfig::default()
        };
        let config = AppConfig::with_rating(rating);
        assert_eq!(config.title, "StarScore");
        assert_eq!(config.rating.star_count, 3);
    }
}
