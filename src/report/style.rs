//! Difference-cell shading

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::MpfError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = MpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(MpfError::UnknownTheme(s.to_string())),
        }
    }
}

/// Sign of a difference cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Negative,
    Positive,
    Neutral,
}

impl Shade {
    /// Classify by the sign of the displayed (rounded) value; blank is neutral
    pub fn of(difference: Option<f64>) -> Self {
        match difference.map(f64::round) {
            Some(v) if v < 0.0 => Shade::Negative,
            Some(v) if v > 0.0 => Shade::Positive,
            _ => Shade::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Theme {
    pub fn background(&self, shade: Shade) -> Rgb {
        match (self, shade) {
            (Theme::Dark, Shade::Negative) => Rgb(0x4d, 0x00, 0x00),
            (Theme::Dark, Shade::Positive) => Rgb(0x00, 0x33, 0x00),
            (Theme::Dark, Shade::Neutral) => Rgb(0x33, 0x33, 0x33),
            (Theme::Light, Shade::Negative) => Rgb(0xff, 0xcc, 0xcc),
            (Theme::Light, Shade::Positive) => Rgb(0xcc, 0xff, 0xcc),
            (Theme::Light, Shade::Neutral) => Rgb(0xf2, 0xf2, 0xf2),
        }
    }
}

/// Wrap text in a 24-bit ANSI background colour
pub fn paint(text: &str, background: Rgb) -> String {
    format!(
        "\x1b[48;2;{};{};{}m{}\x1b[0m",
        background.0, background.1, background.2, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_by_rounded_sign() {
        assert_eq!(Shade::of(Some(-20.0)), Shade::Negative);
        assert_eq!(Shade::of(Some(20.0)), Shade::Positive);
        assert_eq!(Shade::of(Some(0.0)), Shade::Neutral);
        // Rounds to "0" on screen
        assert_eq!(Shade::of(Some(0.3)), Shade::Neutral);
        assert_eq!(Shade::of(None), Shade::Neutral);
    }

    #[test]
    fn test_theme_colours() {
        assert_eq!(Theme::Dark.background(Shade::Negative).to_string(), "#4d0000");
        assert_eq!(Theme::Dark.background(Shade::Positive).to_string(), "#003300");
        assert_eq!(Theme::Light.background(Shade::Neutral).to_string(), "#f2f2f2");
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_paint() {
        assert_eq!(paint("5", Rgb(0, 51, 0)), "\x1b[48;2;0;51;0m5\x1b[0m");
    }
}
