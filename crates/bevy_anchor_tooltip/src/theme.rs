use bevy_color::{Color, Srgba};
use bevy_ecs::prelude::*;
use serde::Deserialize;

use crate::TooltipError;

/// Light or dark appearance of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Brightness {
    #[default]
    Light,
    Dark,
}

impl Brightness {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Colors used to paint a tooltip panel and its arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipTheme {
    pub brightness: Brightness,
    /// Panel background and arrow fill.
    pub surface: Color,
    pub text: Color,
}

/// Host-provided theming context the tooltip contrasts against.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AmbientTheme {
    pub brightness: Brightness,
    pub surface: Color,
}

impl Default for AmbientTheme {
    fn default() -> Self {
        Self {
            brightness: Brightness::Light,
            surface: Color::WHITE,
        }
    }
}

/// Color value in config RON, e.g. `Hex("#0F172A")` or `Rgba(15, 23, 42, 255)`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ThemeColor {
    Hex(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, u8),
}

impl ThemeColor {
    pub fn resolve(&self) -> Result<Color, TooltipError> {
        match self {
            Self::Hex(value) => Srgba::hex(value)
                .map(Color::from)
                .map_err(|_| TooltipError::InvalidColor {
                    value: value.clone(),
                }),
            Self::Rgb(r, g, b) => Ok(Color::srgb_u8(*r, *g, *b)),
            Self::Rgba(r, g, b, a) => Ok(Color::srgba_u8(*r, *g, *b, *a)),
        }
    }
}

/// Panel palette for one brightness.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemePalette {
    pub surface: ThemeColor,
    pub text: ThemeColor,
}

impl ThemePalette {
    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface: ThemeColor::Hex("#0F172A".to_string()),
            text: ThemeColor::Hex("#E2E8F0".to_string()),
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            surface: ThemeColor::Hex("#F8FAFC".to_string()),
            text: ThemeColor::Hex("#0F172A".to_string()),
        }
    }

    pub fn resolve(&self, brightness: Brightness) -> Result<TooltipTheme, TooltipError> {
        Ok(TooltipTheme {
            brightness,
            surface: self.surface.resolve()?,
            text: self.text.resolve()?,
        })
    }
}

/// Resolved light/dark tooltip themes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSet {
    pub light: TooltipTheme,
    pub dark: TooltipTheme,
}

impl ThemeSet {
    #[must_use]
    pub fn for_brightness(&self, brightness: Brightness) -> TooltipTheme {
        match brightness {
            Brightness::Light => self.light,
            Brightness::Dark => self.dark,
        }
    }

    /// Theme contrasting `ambient`: a light context gets a dark panel and vice versa.
    #[must_use]
    pub fn inverse_of(&self, ambient: &AmbientTheme) -> TooltipTheme {
        self.for_brightness(ambient.brightness.inverse())
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self {
            light: TooltipTheme {
                brightness: Brightness::Light,
                surface: Color::srgb_u8(0xF8, 0xFA, 0xFC),
                text: Color::srgb_u8(0x0F, 0x17, 0x2A),
            },
            dark: TooltipTheme {
                brightness: Brightness::Dark,
                surface: Color::srgb_u8(0x0F, 0x17, 0x2A),
                text: Color::srgb_u8(0xE2, 0xE8, 0xF0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_context_gets_dark_panel() {
        let themes = ThemeSet::default();
        let ambient = AmbientTheme::default();

        assert_eq!(themes.inverse_of(&ambient).brightness, Brightness::Dark);

        let dark_ambient = AmbientTheme {
            brightness: Brightness::Dark,
            surface: Color::BLACK,
        };
        assert_eq!(themes.inverse_of(&dark_ambient).brightness, Brightness::Light);
    }

    #[test]
    fn built_in_palettes_match_the_default_theme_set() {
        let themes = ThemeSet::default();

        assert_eq!(
            ThemePalette::dark().resolve(Brightness::Dark).ok(),
            Some(themes.dark)
        );
        assert_eq!(
            ThemePalette::light().resolve(Brightness::Light).ok(),
            Some(themes.light)
        );
    }

    #[test]
    fn bad_hex_is_reported() {
        let error = ThemeColor::Hex("not-a-color".to_string())
            .resolve()
            .expect_err("invalid hex should fail");

        assert!(matches!(error, TooltipError::InvalidColor { .. }));
    }
}
