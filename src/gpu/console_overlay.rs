//! The parameter console drawn with egui over the animation.
//!
//! Only compiled with the `egui` feature.

use std::sync::Arc;

use winit::event::WindowEvent;
use winit::window::Window;

use crate::console::{Console, ConsoleAction};
use crate::params::ParamSet;

/// Egui state for the console window of one backdrop.
pub struct ConsoleOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// A tessellated console frame, ready to paint.
pub struct OverlayFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
}

impl ConsoleOverlay {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, window: &Arc<Window>) -> Self {
        let ctx = egui::Context::default();

        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        style.visuals.window_fill = egui::Color32::from_black_alpha(200);
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        // No depth, single sample, no dithering
        let renderer = egui_wgpu::Renderer::new(device, format, None, 1, false);

        Self { ctx, state, renderer }
    }

    /// Feed a window event to egui and report whether the scene should
    /// skip it.
    ///
    /// Only pointer motion and wheel input are withheld, and only while the
    /// console is open and egui is using them.
    pub fn claims(&mut self, window: &Window, event: &WindowEvent, console_open: bool) -> bool {
        let consumed = self.state.on_window_event(window, event).consumed;
        consumed
            && console_open
            && matches!(
                event,
                WindowEvent::CursorMoved { .. } | WindowEvent::MouseWheel { .. }
            )
    }

    /// Lay out the console against `params` for this frame.
    ///
    /// Slider edits land in `params`; the returned action says whether they
    /// should restart the animation.
    pub fn run(
        &mut self,
        window: &Window,
        console: &mut Console,
        params: &mut ParamSet,
        fps: f32,
    ) -> (ConsoleAction, OverlayFrame) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
        let action = console.show(&self.ctx, params, fps);
        let output = self.ctx.end_pass();

        // Clipboard writes from Export go out here
        self.state
            .handle_platform_output(window, output.platform_output);

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        let frame = OverlayFrame {
            paint_jobs,
            textures_delta: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        };
        (action, frame)
    }

    /// Record `frame` on top of whatever `view` already holds.
    ///
    /// The returned command buffers carry texture and vertex uploads and must
    /// be submitted before `encoder`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        frame: &OverlayFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };

        for (id, delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        let uploads =
            self.renderer
                .update_buffers(device, queue, encoder, &frame.paint_jobs, &screen);

        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Console Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut pass = pass.forget_lifetime();
            self.renderer.render(&mut pass, &frame.paint_jobs, &screen);
        }

        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }

        uploads
    }
}
