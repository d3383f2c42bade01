use bevy_app::App;
use bevy_ecs::entity::Entity;
use tracing::debug;

use crate::{AmbientTheme, Tooltip, TooltipConfig, TooltipError, runtime::spawn_tooltip};

/// Extension methods for configuring tooltips on a Bevy [`App`].
///
/// # Example
///
/// ```no_run
/// use bevy_anchor_tooltip::{
///     AppTooltipExt, TargetRect, Tooltip, TooltipPlugin, bevy_app::App,
/// };
///
/// let mut app = App::new();
/// app.add_plugins(TooltipPlugin);
/// app.load_tooltip_config("(min_panel_height: 120.0)")
///     .expect("config parses");
///
/// let button = app.world_mut().spawn(TargetRect::new(24.0, 300.0, 96.0, 32.0)).id();
/// let tooltip = Tooltip::builder("Saves the document")
///     .wrapping(button)
///     .build()
///     .expect("child supplied");
/// app.spawn_tooltip(tooltip);
/// ```
pub trait AppTooltipExt {
    /// Parse a RON [`TooltipConfig`] and install it, replacing the current one.
    ///
    /// Controllers already attached keep the settings they were created with.
    fn load_tooltip_config(&mut self, source: &str) -> Result<&mut Self, TooltipError>;

    /// Set the theming context that default tooltip themes contrast against.
    fn insert_ambient_theme(&mut self, theme: AmbientTheme) -> &mut Self;

    /// Spawn a configured tooltip and return its entity.
    fn spawn_tooltip(&mut self, tooltip: Tooltip) -> Entity;
}

impl AppTooltipExt for App {
    fn load_tooltip_config(&mut self, source: &str) -> Result<&mut Self, TooltipError> {
        let config = TooltipConfig::from_ron_str(source)?;
        debug!(?config, "tooltip config loaded");
        self.insert_resource(config);
        Ok(self)
    }

    fn insert_ambient_theme(&mut self, theme: AmbientTheme) -> &mut Self {
        self.insert_resource(theme);
        self
    }

    fn spawn_tooltip(&mut self, tooltip: Tooltip) -> Entity {
        spawn_tooltip(self.world_mut(), tooltip)
    }
}
