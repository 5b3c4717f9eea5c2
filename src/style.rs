use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// @module: Subtitle style catalogue for the burn-in renderer

// @const: Default font, covers traditional Chinese glyphs
pub const DEFAULT_FONT_NAME: &str = "Noto Sans CJK TC";

// @const: Default font size in points
pub const DEFAULT_FONT_SIZE: u32 = 18;

// @const: Largest font size accepted from configuration
pub const MAX_FONT_SIZE: u32 = 200;

/// Visual treatment requested for a subtitle track
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum StyleDescriptor {
    // @style: White text with black outline
    #[default]
    Default,
    // @style: Yellow text with black outline
    #[serde(alias = "yellow")]
    Highlighted,
    // @style: White text on a translucent box
    #[serde(alias = "white_box")]
    Boxed,
    // @style: Larger bold text with a heavier shadow
    #[serde(alias = "custom")]
    Emphasized,
}

impl StyleDescriptor {
    // @returns: Human readable style name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Default => "Default",
            Self::Highlighted => "Highlighted",
            Self::Boxed => "Boxed",
            Self::Emphasized => "Emphasized",
        }
    }

    // @returns: Lowercase style identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Default => "default".to_string(),
            Self::Highlighted => "highlighted".to_string(),
            Self::Boxed => "boxed".to_string(),
            Self::Emphasized => "emphasized".to_string(),
        }
    }

    pub fn all() -> [StyleDescriptor; 4] {
        [Self::Default, Self::Highlighted, Self::Boxed, Self::Emphasized]
    }

    /// Renderer parameters for this style with the given font
    pub fn parameters(&self, font_name: &str, font_size: u32) -> StyleParameters {
        let base = StyleParameters {
            font_name: font_name.to_string(),
            font_size,
            primary_colour: AssColour::WHITE,
            outline_colour: AssColour::BLACK,
            back_colour: AssColour::TRANSLUCENT_BLACK,
            bold: false,
            border_style: BorderStyle::Outline,
            outline: 3.0,
            shadow: 1.0,
            alignment: 2,
            margin_l: 10,
            margin_r: 10,
            margin_v: 10,
        };

        match self {
            Self::Default => base,
            Self::Highlighted => StyleParameters {
                primary_colour: AssColour::YELLOW,
                ..base
            },
            Self::Boxed => StyleParameters {
                border_style: BorderStyle::Box,
                outline: 1.0,
                shadow: 0.0,
                margin_v: 20,
                ..base
            },
            Self::Emphasized => StyleParameters {
                font_size: font_size.saturating_add(2),
                bold: true,
                shadow: 2.0,
                ..base
            },
        }
    }
}

impl fmt::Display for StyleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for StyleDescriptor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "highlighted" | "yellow" => Ok(Self::Highlighted),
            "boxed" | "white_box" => Ok(Self::Boxed),
            "emphasized" | "custom" => Ok(Self::Emphasized),
            _ => Err(anyhow!("Invalid subtitle style: {}", s)),
        }
    }
}

/// Colour in ASS `&HAABBGGRR` notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AssColour(pub u32);

impl AssColour {
    pub const WHITE: AssColour = AssColour(0x00FF_FFFF);
    pub const BLACK: AssColour = AssColour(0x0000_0000);
    pub const YELLOW: AssColour = AssColour(0x0000_FFFF);
    pub const TRANSLUCENT_BLACK: AssColour = AssColour(0x8000_0000);

    /// Build from red, green, blue and alpha (0 is opaque)
    pub fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        AssColour(
            (u32::from(alpha) << 24)
                | (u32::from(blue) << 16)
                | (u32::from(green) << 8)
                | u32::from(red),
        )
    }
}

impl fmt::Display for AssColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&H{:08X}", self.0)
    }
}

impl std::str::FromStr for AssColour {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .trim()
            .trim_start_matches('&')
            .trim_start_matches(['H', 'h'])
            .trim_end_matches('&');
        u32::from_str_radix(hex, 16)
            .map(AssColour)
            .map_err(|e| anyhow!("Invalid ASS colour '{}': {}", s, e))
    }
}

impl From<AssColour> for String {
    fn from(colour: AssColour) -> Self {
        colour.to_string()
    }
}

impl TryFrom<String> for AssColour {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// ASS border style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Outline and drop shadow
    Outline,
    /// Opaque box behind the text
    Box,
}

impl BorderStyle {
    pub fn code(&self) -> u8 {
        match self {
            Self::Outline => 1,
            // libass draws 4 as one box around the whole event
            Self::Box => 4,
        }
    }
}

/// Validated values handed to the subtitle renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleParameters {
    pub font_name: String,
    pub font_size: u32,
    pub primary_colour: AssColour,
    pub outline_colour: AssColour,
    pub back_colour: AssColour,
    pub bold: bool,
    pub border_style: BorderStyle,
    pub outline: f32,
    pub shadow: f32,
    /// Numpad-style alignment, 2 is bottom centre
    pub alignment: u8,
    pub margin_l: u32,
    pub margin_r: u32,
    pub margin_v: u32,
}

impl Default for StyleParameters {
    fn default() -> Self {
        StyleDescriptor::Default.parameters(DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE)
    }
}

impl StyleParameters {
    /// Check the values a renderer would reject
    pub fn validate(&self) -> Result<()> {
        if self.font_name.trim().is_empty() {
            return Err(anyhow!("Font name must not be empty"));
        }
        if self.font_name.contains([',', '\'', '=']) {
            return Err(anyhow!("Font name contains a reserved character: {}", self.font_name));
        }
        if self.font_size == 0 || self.font_size > MAX_FONT_SIZE {
            return Err(anyhow!(
                "Font size must be between 1 and {}, got {}",
                MAX_FONT_SIZE,
                self.font_size
            ));
        }
        if !(1..=9).contains(&self.alignment) {
            return Err(anyhow!("Alignment must be between 1 and 9, got {}", self.alignment));
        }
        if self.outline < 0.0 || self.shadow < 0.0 {
            return Err(anyhow!("Outline and shadow must not be negative"));
        }
        Ok(())
    }

    /// Value for the libass `force_style` option
    pub fn to_force_style(&self) -> String {
        format!(
            "FontName={},FontSize={},PrimaryColour={},OutlineColour={},BackColour={},Bold={},BorderStyle={},Outline={},Shadow={},Alignment={},MarginL={},MarginR={},MarginV={}",
            self.font_name,
            self.font_size,
            self.primary_colour,
            self.outline_colour,
            self.back_colour,
            if self.bold { 1 } else { 0 },
            self.border_style.code(),
            self.outline,
            self.shadow,
            self.alignment,
            self.margin_l,
            self.margin_r,
            self.margin_v
        )
    }
}

/// Style choice and font overrides from configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StyleConfig {
    /// Style applied when none is given on the command line
    #[serde(default)]
    pub style: StyleDescriptor,

    /// Font family override
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Base font size override
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

fn default_font_name() -> String {
    DEFAULT_FONT_NAME.to_string()
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            style: StyleDescriptor::default(),
            font_name: default_font_name(),
            font_size: default_font_size(),
        }
    }
}

impl StyleConfig {
    /// Resolve a descriptor into parameters, falling back to defaults when invalid
    pub fn resolve(&self, style: StyleDescriptor) -> StyleParameters {
        let parameters = style.parameters(&self.font_name, self.font_size);
        match parameters.validate() {
            Ok(()) => parameters,
            Err(e) => {
                log::warn!("Style override rejected, using defaults: {}", e);
                style.parameters(DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE)
            }
        }
    }
}
