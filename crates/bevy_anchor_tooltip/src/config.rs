use std::time::Duration;

use anchor_tween::EaseFunction;
use bevy_ecs::prelude::*;
use bevy_math::Vec2;
use serde::Deserialize;

use crate::{
    TooltipError,
    arrow::DEFAULT_SHADOW_ELEVATION,
    geometry::{DEFAULT_ARROW_SIZE, DEFAULT_MIN_PANEL_HEIGHT, PlacementSettings},
    theme::{ThemePalette, ThemeSet},
};

pub const DEFAULT_PANEL_WIDTH: f32 = 280.0;
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Easing curve name accepted in config RON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TooltipEase {
    Linear,
    QuadraticInOut,
    #[default]
    BackOut,
}

impl From<TooltipEase> for EaseFunction {
    fn from(ease: TooltipEase) -> Self {
        match ease {
            TooltipEase::Linear => Self::Linear,
            TooltipEase::QuadraticInOut => Self::QuadraticInOut,
            TooltipEase::BackOut => Self::BackOut,
        }
    }
}

/// Raw config as written in RON. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
struct TooltipConfigFile {
    min_panel_height: f32,
    panel_width: f32,
    arrow_size: (f32, f32),
    shadow_elevation: f32,
    animation_duration_ms: u64,
    ease: TooltipEase,
    default_open_delay_ms: Option<u64>,
    dark: ThemePalette,
    light: ThemePalette,
}

impl Default for TooltipConfigFile {
    fn default() -> Self {
        Self {
            min_panel_height: DEFAULT_MIN_PANEL_HEIGHT,
            panel_width: DEFAULT_PANEL_WIDTH,
            arrow_size: (DEFAULT_ARROW_SIZE.x, DEFAULT_ARROW_SIZE.y),
            shadow_elevation: DEFAULT_SHADOW_ELEVATION,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION.as_millis() as u64,
            ease: TooltipEase::BackOut,
            default_open_delay_ms: None,
            dark: ThemePalette::dark(),
            light: ThemePalette::light(),
        }
    }
}

/// Process-wide tooltip settings.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TooltipConfig {
    pub min_panel_height: f32,
    pub panel_width: f32,
    pub arrow_size: Vec2,
    pub shadow_elevation: f32,
    pub animation_duration: Duration,
    pub ease: EaseFunction,
    /// Applied to tooltips that do not set their own open delay.
    pub default_open_delay: Option<Duration>,
    pub themes: ThemeSet,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            min_panel_height: DEFAULT_MIN_PANEL_HEIGHT,
            panel_width: DEFAULT_PANEL_WIDTH,
            arrow_size: DEFAULT_ARROW_SIZE,
            shadow_elevation: DEFAULT_SHADOW_ELEVATION,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            ease: EaseFunction::BackOut,
            default_open_delay: None,
            themes: ThemeSet::default(),
        }
    }
}

impl TooltipConfig {
    /// Parse a RON config. Missing fields keep their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, TooltipError> {
        let file: TooltipConfigFile = ron::from_str(source)?;

        Ok(Self {
            min_panel_height: file.min_panel_height,
            panel_width: file.panel_width,
            arrow_size: Vec2::new(file.arrow_size.0, file.arrow_size.1),
            shadow_elevation: file.shadow_elevation,
            animation_duration: Duration::from_millis(file.animation_duration_ms),
            ease: file.ease.into(),
            default_open_delay: file.default_open_delay_ms.map(Duration::from_millis),
            themes: ThemeSet {
                light: file.light.resolve(crate::Brightness::Light)?,
                dark: file.dark.resolve(crate::Brightness::Dark)?,
            },
        })
    }

    #[must_use]
    pub fn placement_settings(&self) -> PlacementSettings {
        PlacementSettings {
            min_panel_height: self.min_panel_height,
            arrow_size: self.arrow_size,
        }
    }

    /// Panel extent assumed for hit-testing, since content is never measured.
    #[must_use]
    pub fn assumed_panel_size(&self) -> Vec2 {
        Vec2::new(self.panel_width, self.min_panel_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_yields_defaults() {
        let config = TooltipConfig::from_ron_str("()").expect("empty config should parse");

        assert_eq!(config, TooltipConfig::default());
    }

    #[test]
    fn partial_ron_overrides_listed_fields() {
        let config = TooltipConfig::from_ron_str(
            r##"(
  min_panel_height: 96.0,
  arrow_size: (12.0, 6.0),
  animation_duration_ms: 120,
  ease: Linear,
  default_open_delay_ms: Some(500),
  dark: (surface: Rgb(0, 0, 0), text: Hex("#FFFFFF")),
)"##,
        )
        .expect("partial config should parse");

        assert_eq!(config.min_panel_height, 96.0);
        assert_eq!(config.arrow_size, Vec2::new(12.0, 6.0));
        assert_eq!(config.animation_duration, Duration::from_millis(120));
        assert_eq!(config.ease, EaseFunction::Linear);
        assert_eq!(config.default_open_delay, Some(Duration::from_millis(500)));
        assert_eq!(config.panel_width, DEFAULT_PANEL_WIDTH);
        assert_eq!(config.themes.light, ThemeSet::default().light);
        assert_eq!(config.placement_settings().min_panel_height, 96.0);
    }

    #[test]
    fn malformed_ron_is_an_error() {
        let error = TooltipConfig::from_ron_str("(min_panel_height: \"tall\")")
            .expect_err("string height should fail");

        assert!(matches!(error, TooltipError::InvalidConfig(_)));
    }

    #[test]
    fn bad_palette_color_is_an_error() {
        let error = TooltipConfig::from_ron_str(r##"(light: (surface: Hex("#nope"), text: Rgb(0, 0, 0)))"##)
            .expect_err("bad hex should fail");

        assert!(matches!(error, TooltipError::InvalidColor { .. }));
    }
}
