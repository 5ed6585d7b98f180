//! Mount/unmount lifecycle for a backdrop.
//!
//! A [`Stage`] is what a host holds on to. While mounted it owns a live
//! [`Scene`], forwards input to it and advances it once per frame. Unmounting
//! drops the scene, stops listening to input and cancels the pending frame;
//! any frame or input delivered afterwards is ignored.
//!
//! ```ignore
//! let mut stage = Stage::new(ParamSet::default())?;
//! stage.mount(1920.0, 1080.0)?;
//! while stage.frame() {
//!     // compose and present
//! }
//! ```

use winit::event::WindowEvent;

use crate::error::ParamError;
use crate::params::ParamSet;
use crate::scene::Scene;
use crate::viewport::{InputOutcome, Viewport, DEFAULT_SCROLL_EXTENT};

/// Owns the scene for as long as the backdrop is mounted.
#[derive(Debug)]
pub struct Stage {
    params: ParamSet,
    seed: Option<u64>,
    scroll_extent: f32,
    scene: Option<Scene>,
    pending_frame: bool,
    listening: bool,
}

impl Stage {
    /// Create an unmounted stage. The parameter set is validated up front.
    pub fn new(params: ParamSet) -> Result<Self, ParamError> {
        params.validate()?;
        Ok(Self {
            params,
            seed: None,
            scroll_extent: DEFAULT_SCROLL_EXTENT,
            scene: None,
            pending_frame: false,
            listening: false,
        })
    }

    /// Spawn entities from a fixed seed instead of system entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Height of the virtual page scrolled by the mouse wheel.
    pub fn with_scroll_extent(mut self, extent: f32) -> Self {
        self.scroll_extent = extent;
        self
    }

    /// Start a fresh scene on a surface of the given size.
    ///
    /// Mounting an already mounted stage tears the old scene down first.
    pub fn mount(&mut self, width: f32, height: f32) -> Result<(), ParamError> {
        if self.is_mounted() {
            self.unmount();
        }

        let mut viewport = Viewport::new(width, height);
        viewport.set_scroll_extent(self.scroll_extent);

        let scene = match self.seed {
            Some(seed) => Scene::with_seed(self.params.clone(), viewport, seed)?,
            None => Scene::new(self.params.clone(), viewport)?,
        };

        log::debug!(
            "mounted {}x{} backdrop: {} glow layers, {} dust particles",
            width,
            height,
            scene.layers().len(),
            scene.particles().len()
        );

        self.scene = Some(scene);
        self.listening = true;
        self.pending_frame = true;
        Ok(())
    }

    /// Drop the scene, stop listening and cancel the pending frame.
    ///
    /// Safe to call any number of times.
    pub fn unmount(&mut self) {
        if self.scene.take().is_some() {
            log::debug!("unmounted backdrop");
        }
        self.listening = false;
        self.pending_frame = false;
    }

    /// Run one scheduled frame: advance the scene by a tick and schedule
    /// the next one.
    ///
    /// Returns `false` without touching anything when no frame is pending,
    /// which is always the case after [`unmount`](Self::unmount).
    pub fn frame(&mut self) -> bool {
        if !self.pending_frame {
            return false;
        }
        match self.scene.as_mut() {
            Some(scene) => {
                scene.tick();
                true
            }
            None => {
                self.pending_frame = false;
                false
            }
        }
    }

    /// Forward a window event to the viewport tracker while mounted.
    pub fn handle_event(&mut self, event: &WindowEvent) -> InputOutcome {
        if !self.listening {
            return InputOutcome::Ignored;
        }
        match self.scene.as_mut() {
            Some(scene) => {
                let outcome = scene.viewport_mut().handle_event(event);
                if outcome == InputOutcome::Resized {
                    let size = scene.viewport().size();
                    log::debug!("viewport resized to {}x{}", size.x, size.y);
                }
                outcome
            }
            None => InputOutcome::Ignored,
        }
    }

    /// Replace the parameter set and restart the animation under it.
    ///
    /// An invalid set is rejected and the running scene is left alone.
    pub fn set_params(&mut self, params: ParamSet) -> Result<(), ParamError> {
        if let Err(e) = params.validate() {
            log::warn!("rejected parameter set: {}", e);
            return Err(e);
        }
        if let Some(scene) = self.scene.as_mut() {
            scene.reset(params.clone())?;
        }
        self.params = params;
        Ok(())
    }

    /// The parameter set the next mount or restart uses.
    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn is_mounted(&self) -> bool {
        self.scene.is_some()
    }

    /// Whether another frame is scheduled.
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame
    }

    /// Whether window input is currently routed to the scene.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }
}
