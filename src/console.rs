//! Parameter console: live tuning of both simulators.
//!
//! The console is hidden until the Ctrl+K / Cmd+K chord toggles it. Each
//! slider edit produces a new [`ParamSet`] which the host feeds back into
//! [`Stage::set_params`](crate::stage::Stage::set_params), restarting the
//! animation with freshly spawned entities.
//!
//! Edits are always clamped to the slider table and coupled across min/max
//! pairs, so the console can only ever produce valid parameter sets.

use crate::error::ConfigError;
use crate::params::{Bound, ParamKey, ParamSet};

#[cfg(feature = "egui")]
use crate::params::ParamGroup;

/// What the user did in the console this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    None,
    /// A slider moved.
    Changed,
    /// Both parameter sets were restored to defaults.
    Reset,
    /// The current parameters were exported.
    Export,
}

impl ConsoleAction {
    /// Whether the scene must be rebuilt with the edited parameters.
    pub fn requires_restart(self) -> bool {
        matches!(self, ConsoleAction::Changed | ConsoleAction::Reset)
    }
}

/// Visibility and export state of the parameter console.
#[derive(Debug, Default)]
pub struct Console {
    visible: bool,
    last_export: Option<String>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide the console. Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        log::debug!("console {}", if self.visible { "shown" } else { "hidden" });
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set one parameter from a slider value.
    ///
    /// The value is clamped and snapped to the key's slider. Moving one end
    /// of a min/max pair past the other drags the other end along. Returns
    /// `true` if anything changed.
    pub fn edit(&mut self, params: &mut ParamSet, key: ParamKey, value: f32) -> bool {
        let value = key.slider().quantize(value);
        if params.get(key) == value {
            return false;
        }
        params.set(key, value);

        if let Some((partner, bound)) = key.partner() {
            let other = params.get(partner);
            let crossed = match bound {
                Bound::Lower => value > other,
                Bound::Upper => value < other,
            };
            if crossed {
                params.set(partner, value);
            }
        }
        true
    }

    /// Restore both parameter sets to their built-in defaults.
    pub fn reset(&mut self, params: &mut ParamSet) {
        *params = ParamSet::default();
        log::debug!("console reset parameters to defaults");
    }

    /// Serialize the current parameters as pretty JSON and log them.
    pub fn export(&mut self, params: &ParamSet) -> Result<String, ConfigError> {
        let json = params.to_json()?;
        log::info!("exported animation parameters:\n{}", json);
        self.last_export = Some(json.clone());
        Ok(json)
    }

    /// The most recent export, if any.
    pub fn last_export(&self) -> Option<&str> {
        self.last_export.as_deref()
    }

    /// Draw the console panel and apply any edits to `params`.
    #[cfg(feature = "egui")]
    pub fn show(&mut self, ctx: &egui::Context, params: &mut ParamSet, fps: f32) -> ConsoleAction {
        if !self.visible {
            return ConsoleAction::None;
        }

        let mut action = ConsoleAction::None;

        egui::Window::new("Animation Controls")
            .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("{:.0} fps  ·  Ctrl+K to hide", fps))
                        .small()
                        .weak(),
                );

                for group in [ParamGroup::Aurora, ParamGroup::Stardust] {
                    ui.separator();
                    ui.heading(group.title());
                    for &key in group.keys() {
                        if self.slider(ui, params, key) {
                            action = ConsoleAction::Changed;
                        }
                    }
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        self.reset(params);
                        action = ConsoleAction::Reset;
                    }
                    if ui.button("Export").clicked() {
                        match self.export(params) {
                            Ok(json) => ui.ctx().copy_text(json),
                            Err(e) => log::error!("failed to export parameters: {}", e),
                        }
                        action = ConsoleAction::Export;
                    }
                });
            });

        action
    }

    #[cfg(feature = "egui")]
    fn slider(&mut self, ui: &mut egui::Ui, params: &mut ParamSet, key: ParamKey) -> bool {
        let range = key.slider();
        let mut value = params.get(key);

        let label = match key {
            ParamKey::StardustFriction => {
                format!("{} ({:.1}% drag)", key.label(), (1.0 - value) * 100.0)
            }
            _ => key.label().to_string(),
        };

        let response = ui.add(
            egui::Slider::new(&mut value, range.min..=range.max)
                .step_by(range.step as f64)
                .fixed_decimals(key.decimals())
                .text(label),
        );

        response.changed() && self.edit(params, key, value)
    }
}
