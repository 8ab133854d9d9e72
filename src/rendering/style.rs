//! Style options for text-on-path rendering.
//!
//! These are the canvas-like properties a render call consults: colors, text
//! alignment and baseline, overflow policy, justification and the minimum
//! path length able to carry text. They are plain values passed with each
//! call, never ambient state stored on a surface.

use std::fmt;
use std::str::FromStr;

use crate::core::error::{TextPathError, TextPathResult};

/// Marker appended by [`TextOverflow::Ellipsis`].
pub const ELLIPSIS: &str = "\u{2026}";

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create an opaque color from u8 values (0-255).
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque black, the default canvas stroke and fill style.
    pub const fn black() -> Self {
        Color::rgb(0, 0, 0)
    }

    /// Fully transparent black (`rgba(0,0,0,0)`).
    pub const fn transparent() -> Self {
        Color::rgba(0, 0, 0, 0)
    }

    /// Whether the color draws nothing.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = TextPathError;

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TextPathError::Surface(format!("Invalid color: '{}'", s));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        match hex.len() {
            3 => {
                let short = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }
}

/// Horizontal text alignment along the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the path origin (default)
    #[default]
    Left,
    /// Same as `Left` for left-to-right text
    Start,
    /// Text is centered on the path
    Center,
    /// Text ends at the path end
    Right,
    /// Same as `Right` for left-to-right text
    End,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Start => "start",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::End => "end",
        }
    }
}

impl FromStr for TextAlign {
    type Err = TextPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(TextAlign::Left),
            "start" => Ok(TextAlign::Start),
            "center" => Ok(TextAlign::Center),
            "right" => Ok(TextAlign::Right),
            "end" => Ok(TextAlign::End),
            other => Err(TextPathError::Surface(format!("Invalid text align: '{}'", other))),
        }
    }
}

/// Vertical placement of glyphs relative to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Hanging,
    /// Glyphs are vertically centered on the path
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Hanging => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Ideographic => "ideographic",
            TextBaseline::Bottom => "bottom",
        }
    }
}

impl FromStr for TextBaseline {
    type Err = TextPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(TextBaseline::Top),
            "hanging" => Ok(TextBaseline::Hanging),
            "middle" => Ok(TextBaseline::Middle),
            "alphabetic" => Ok(TextBaseline::Alphabetic),
            "ideographic" => Ok(TextBaseline::Ideographic),
            "bottom" => Ok(TextBaseline::Bottom),
            other => Err(TextPathError::Surface(format!("Invalid text baseline: '{}'", other))),
        }
    }
}

/// What to do with text longer than its path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TextOverflow {
    /// Drop trailing characters without a marker (default)
    #[default]
    Hidden,
    /// Draw everything, running past the path end
    Visible,
    /// Drop trailing characters and append `…`
    Ellipsis,
    /// Drop trailing characters and append the given marker
    Custom(String),
}

impl TextOverflow {
    /// The marker appended after truncation, `None` when text is never truncated.
    pub fn marker(&self) -> Option<&str> {
        match self {
            TextOverflow::Hidden => Some(""),
            TextOverflow::Visible => None,
            TextOverflow::Ellipsis => Some(ELLIPSIS),
            TextOverflow::Custom(marker) => Some(marker),
        }
    }
}

impl FromStr for TextOverflow {
    type Err = std::convert::Infallible;

    /// Any string other than the keywords is a literal marker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "" | "hidden" => TextOverflow::Hidden,
            "visible" => TextOverflow::Visible,
            "ellipsis" => TextOverflow::Ellipsis,
            other => TextOverflow::Custom(other.to_string()),
        })
    }
}

/// A parsed CSS-like font description such as `"bold 16px Arial"`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels
    pub size: f64,
    /// Font family name, with surrounding quotes removed
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FromStr for FontSpec {
    type Err = TextPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TextPathError::InvalidFont(s.to_string());
        let mut bold = false;
        let mut italic = false;
        let mut tokens = s.split_whitespace();

        let size = loop {
            let token = tokens.next().ok_or_else(invalid)?;
            match token {
                "normal" => {}
                "bold" | "bolder" => bold = true,
                "italic" | "oblique" => italic = true,
                _ => {
                    let value = token.strip_suffix("px").ok_or_else(invalid)?;
                    break value.parse::<f64>().map_err(|_| invalid())?;
                }
            }
        };
        if !size.is_finite() || size <= 0.0 {
            return Err(invalid());
        }

        let family = tokens.collect::<Vec<_>>().join(" ");
        let family = family.trim_matches(|c| c == '"' || c == '\'').to_string();
        if family.is_empty() {
            return Err(invalid());
        }

        Ok(FontSpec {
            size,
            family,
            bold,
            italic,
        })
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            write!(f, "italic ")?;
        }
        if self.bold {
            write!(f, "bold ")?;
        }
        write!(f, "{}px {}", self.size, self.family)
    }
}

/// Parse a font description.
pub fn parse_font(font: &str) -> TextPathResult<FontSpec> {
    font.parse()
}

/// Options for one text-on-path render call.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    /// Font description, e.g. `"16px Arial"`
    pub font: String,
    /// Overflow policy (default: Hidden)
    pub overflow: TextOverflow,
    /// Spread glyphs to span the whole path; takes precedence over `align`
    pub justify: bool,
    /// Alignment along the path (default: Left)
    pub align: TextAlign,
    /// Baseline (default: Alphabetic)
    pub baseline: TextBaseline,
    /// Paths shorter than this carry no text (default: 0)
    pub min_path_length: f64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        StyleOptions {
            font: "10px sans-serif".to_string(),
            overflow: TextOverflow::default(),
            justify: false,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            min_path_length: 0.0,
        }
    }
}

impl StyleOptions {
    /// Create options for the given font with default settings.
    pub fn new(font: impl Into<String>) -> Self {
        StyleOptions {
            font: font.into(),
            ..Self::default()
        }
    }

    pub fn with_overflow(mut self, overflow: TextOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_justify(mut self, justify: bool) -> Self {
        self.justify = justify;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_min_path_length(mut self, min_path_length: f64) -> Self {
        self.min_path_length = min_path_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse() {
        assert_eq!("#f00".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert_eq!("#102030".parse::<Color>().unwrap(), Color::rgb(16, 32, 48));
        assert_eq!(
            "#00000000".parse::<Color>().unwrap(),
            Color::transparent()
        );
        assert!("red".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(255, 0, 16).to_string(), "#ff0010ff");
        assert!(Color::transparent().is_transparent());
        assert!(!Color::black().is_transparent());
    }

    #[test]
    fn test_overflow_parse_and_marker() {
        assert_eq!("".parse::<TextOverflow>().unwrap(), TextOverflow::Hidden);
        assert_eq!("visible".parse::<TextOverflow>().unwrap(), TextOverflow::Visible);
        assert_eq!("ellipsis".parse::<TextOverflow>().unwrap(), TextOverflow::Ellipsis);
        assert_eq!(
            "~".parse::<TextOverflow>().unwrap(),
            TextOverflow::Custom("~".to_string())
        );

        assert_eq!(TextOverflow::Hidden.marker(), Some(""));
        assert_eq!(TextOverflow::Visible.marker(), None);
        assert_eq!(TextOverflow::Ellipsis.marker(), Some("…"));
        assert_eq!(TextOverflow::Custom("..".into()).marker(), Some(".."));
    }

    #[test]
    fn test_align_and_baseline_parse() {
        assert_eq!("center".parse::<TextAlign>().unwrap(), TextAlign::Center);
        assert_eq!("end".parse::<TextAlign>().unwrap(), TextAlign::End);
        assert!("middle".parse::<TextAlign>().is_err());
        assert_eq!("middle".parse::<TextBaseline>().unwrap(), TextBaseline::Middle);
        assert_eq!(TextBaseline::Middle.as_str(), "middle");
        assert_eq!(TextAlign::default(), TextAlign::Left);
    }

    #[test]
    fn test_font_parse() {
        let font = parse_font("48px Arial").unwrap();
        assert_eq!(font.size, 48.0);
        assert_eq!(font.family, "Arial");
        assert!(!font.bold);

        let font = parse_font("italic bold 12.5px \"Noto Sans\"").unwrap();
        assert_eq!(font.size, 12.5);
        assert_eq!(font.family, "Noto Sans");
        assert!(font.bold && font.italic);
        assert_eq!(font.to_string(), "italic bold 12.5px Noto Sans");
    }

    #[test]
    fn test_font_parse_errors() {
        assert!(matches!(parse_font("Arial"), Err(TextPathError::InvalidFont(_))));
        assert!(parse_font("12px").is_err());
        assert!(parse_font("").is_err());
        assert!(parse_font("0px Arial").is_err());
        assert!(parse_font("NaNpx Arial").is_err());
    }

    #[test]
    fn test_style_builder() {
        let style = StyleOptions::new("20px Arial")
            .with_justify(true)
            .with_overflow(TextOverflow::Ellipsis)
            .with_align(TextAlign::Center)
            .with_min_path_length(5.0);
        assert_eq!(style.font, "20px Arial");
        assert!(style.justify);
        assert_eq!(style.overflow, TextOverflow::Ellipsis);
        assert_eq!(style.align, TextAlign::Center);
        assert_eq!(style.baseline, TextBaseline::Alphabetic);
        assert_eq!(style.min_path_length, 5.0);
    }
}
