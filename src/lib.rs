//! # aurora-backdrop
//!
//! An ambient, full-window background animation: soft aurora glows drifting
//! and pulsing beneath a field of twinkling stardust, both gently pushed away
//! by the pointer and parallax-shifted by scrolling.
//!
//! ## Quick Start
//!
//! ```ignore
//! use aurora_backdrop::prelude::*;
//!
//! fn main() -> Result<(), BackdropError> {
//!     Backdrop::new()
//!         .with_title("Portfolio")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Scene
//!
//! A [`Scene`] owns everything the animation needs: the viewport signals
//! (size, pointer, scroll), the aurora [`GlowLayer`]s and the stardust
//! [`DustParticle`]s. [`Scene::tick`] advances both sets by one frame and
//! [`Scene::reset`] rebuilds them under a new [`ParamSet`]. None of this
//! needs a window, so the simulation is fully testable headless:
//!
//! ```ignore
//! let mut scene = Scene::with_seed(ParamSet::default(), Viewport::new(800.0, 600.0), 7)?;
//! scene.viewport_mut().set_pointer(400.0, 300.0);
//! for _ in 0..60 {
//!     scene.tick();
//! }
//! ```
//!
//! ### Parameters
//!
//! [`AuroraParams`] and [`StardustParams`] are flat records of numbers.
//! Any change rebuilds the whole scene; there is no hot-patching of live
//! entities. Parameter sets round-trip through JSON with
//! [`ParamSet::load`] and [`ParamSet::save`].
//!
//! ### Stage
//!
//! A [`Stage`] adds the mount/unmount lifecycle a host needs: it forwards
//! window input while mounted, runs one tick per scheduled frame and
//! ignores everything after teardown.
//!
//! ### Console
//!
//! With the default `egui` feature, Ctrl+K (Cmd+K on macOS) toggles a panel
//! of sliders for every parameter, plus Reset and Export buttons. Export
//! logs the current set as JSON and copies it to the clipboard.
//!
//! ## Logging
//!
//! The library logs through the `log` facade. The `aurora-backdrop` binary
//! installs `env_logger`, so `RUST_LOG=aurora_backdrop=debug` shows
//! lifecycle events.

pub mod aurora;
mod backdrop;
pub mod compositor;
pub mod console;
pub mod error;
pub mod forces;
mod gpu;
pub mod params;
pub mod scene;
pub mod shader;
pub mod stage;
pub mod stardust;
pub mod time;
pub mod viewport;

pub use aurora::{AuroraField, GlowColor, GlowLayer};
pub use backdrop::Backdrop;
pub use compositor::{Compositor, Frame};
pub use console::{Console, ConsoleAction};
pub use error::{BackdropError, ConfigError, GpuError, ParamError};
pub use glam::Vec2;
pub use params::{AuroraParams, ParamKey, ParamSet, StardustParams, MAX_LAYERS, MAX_PARTICLES};
pub use scene::Scene;
pub use stage::Stage;
pub use stardust::{DustParticle, StardustField};
pub use viewport::{InputOutcome, Viewport};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use aurora_backdrop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::Backdrop;
    pub use crate::error::{BackdropError, ConfigError, ParamError};
    pub use crate::params::{AuroraParams, ParamSet, StardustParams};
    pub use crate::scene::Scene;
    pub use crate::stage::Stage;
    pub use crate::viewport::Viewport;
    pub use crate::Vec2;
}
