//! Viewport and input tracking.
//!
//! [`Viewport`] holds the environment signals the simulators read every tick:
//! drawing-surface size, pointer position and vertical scroll offset. It is
//! updated synchronously from window events, with no throttling, and the
//! next tick sees whatever was written last.
//!
//! A desktop window has no page to scroll, so wheel input accumulates into a
//! virtual scroll offset clamped to `[0, scroll_extent]`. Hosts that own real
//! scrolling can call [`Viewport::set_scroll`] directly.

use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

/// Pixels scrolled per wheel line.
pub const LINE_HEIGHT: f32 = 40.0;

/// Default height of the virtual page below the first screen.
pub const DEFAULT_SCROLL_EXTENT: f32 = 4000.0;

/// What a window event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The event is not one the viewport tracks.
    Ignored,
    Resized,
    PointerMoved,
    Scrolled,
    /// Modifier keys changed.
    Modifiers,
    /// The console chord (Ctrl+K or Cmd+K) was pressed.
    ToggleConsole,
}

/// Current size, pointer and scroll state.
#[derive(Debug, Clone)]
pub struct Viewport {
    size: Vec2,
    pointer: Vec2,
    pointer_seen: bool,
    scroll: f32,
    scroll_extent: f32,
    modifiers: ModifiersState,
}

impl Viewport {
    /// Create a viewport of the given size with the pointer at its center.
    pub fn new(width: f32, height: f32) -> Self {
        let size = Vec2::new(width, height);
        Self {
            size,
            pointer: size * 0.5,
            pointer_seen: false,
            scroll: 0.0,
            scroll_extent: DEFAULT_SCROLL_EXTENT,
            modifiers: ModifiersState::empty(),
        }
    }

    /// Drawing-surface size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Whether there is no area to draw on, as while a window is minimized.
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Pointer position in viewport pixels.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Vertical scroll offset in pixels.
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn scroll_extent(&self) -> f32 {
        self.scroll_extent
    }

    /// Change the drawing-surface size.
    ///
    /// Until the first pointer movement the pointer follows the center.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        if !self.pointer_seen {
            self.pointer = self.size * 0.5;
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
        self.pointer_seen = true;
    }

    /// Put the pointer back at the center, as if no input had been received.
    pub fn recenter_pointer(&mut self) {
        self.pointer = self.size * 0.5;
        self.pointer_seen = false;
    }

    /// Set the scroll offset directly, clamped to the scroll extent.
    pub fn set_scroll(&mut self, y: f32) {
        self.scroll = y.clamp(0.0, self.scroll_extent);
    }

    /// Scroll by a pixel delta. Positive values move down the page.
    pub fn scroll_by(&mut self, delta: f32) {
        self.set_scroll(self.scroll + delta);
    }

    /// Limit how far the virtual page can be scrolled.
    pub fn set_scroll_extent(&mut self, extent: f32) {
        self.scroll_extent = extent.max(0.0);
        self.set_scroll(self.scroll);
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) -> InputOutcome {
        match event {
            WindowEvent::Resized(size) => {
                self.resize(size.width as f32, size.height as f32);
                InputOutcome::Resized
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.set_pointer(position.x as f32, position.y as f32);
                InputOutcome::PointerMoved
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Wheel up (positive y) scrolls back towards the top
                let pixels = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.scroll_by(pixels);
                InputOutcome::Scrolled
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                InputOutcome::Modifiers
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event.physical_key, event.state, event.repeat)
            }

            _ => InputOutcome::Ignored,
        }
    }

    /// Process a key press or release against the tracked modifiers.
    pub fn handle_key(
        &mut self,
        key: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> InputOutcome {
        if state != ElementState::Pressed || repeat {
            return InputOutcome::Ignored;
        }
        match key {
            PhysicalKey::Code(code) if is_console_chord(code, self.modifiers) => {
                InputOutcome::ToggleConsole
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Modifier keys currently held.
    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }
}

/// Whether `key` with `modifiers` is the console chord: K with Ctrl or Cmd.
pub fn is_console_chord(key: KeyCode, modifiers: ModifiersState) -> bool {
    key == KeyCode::KeyK && (modifiers.control_key() || modifiers.super_key())
}
