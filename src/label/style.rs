use crate::foundation::error::{AnnotileError, AnnotileResult};

/// Horizontal alignment of text lines inside the label block.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlign {
    /// Lines flush with the block's left padding.
    #[default]
    Left,
    /// Lines centered within the block.
    Center,
    /// Lines flush with the block's right padding.
    Right,
}

/// Named anchor position of the label block relative to the image.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Top edge, horizontally centered.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Left edge, vertically centered.
    CenterLeft,
    /// Image center.
    Center,
    /// Right edge, vertically centered.
    CenterRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge, horizontally centered.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

/// Preset (text color, background color) pairing.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// White text over a black box.
    #[default]
    WhiteOnBlack,
    /// Black text over a white box.
    BlackOnWhite,
}

impl ColorScheme {
    /// Text (and glyph-fill) color as straight RGB.
    pub fn foreground(self) -> [u8; 3] {
        match self {
            Self::WhiteOnBlack => [255, 255, 255],
            Self::BlackOnWhite => [0, 0, 0],
        }
    }

    /// Background-box (and glyph-outline) color as straight RGB.
    pub fn background(self) -> [u8; 3] {
        match self {
            Self::WhiteOnBlack => [0, 0, 0],
            Self::BlackOnWhite => [255, 255, 255],
        }
    }
}

/// Immutable per-call styling for [`crate::LabelCompositor`].
///
/// Field names and defaults mirror the node parameters the host graph
/// supplies; all closed choices are enums so invalid configurations fail at
/// the deserialization/validation boundary rather than at render time.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct LabelStyle {
    /// Font family; `None` uses the font library's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font size in pixels.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Horizontal alignment of lines within the block.
    #[serde(default)]
    pub text_align: HorizontalAlign,
    /// Anchor position of the block.
    #[serde(default)]
    pub placement: Placement,
    /// Distance in pixels from the anchored image edges.
    #[serde(default = "default_edge_offset")]
    pub edge_offset: u32,
    /// Text/background color preset.
    #[serde(default)]
    pub color_scheme: ColorScheme,
    /// Padding in pixels between text extent and block edge.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Corner radius of the background box in pixels.
    #[serde(default = "default_corner_radius")]
    pub corner_radius: u32,
    /// Glyph outline width in pixels (0 disables the outline pass).
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,
    /// Background box opacity; 0 disables the box entirely.
    #[serde(default)]
    pub background_opacity: u8,
}

fn default_font_size() -> f32 {
    30.0
}

fn default_edge_offset() -> u32 {
    25
}

fn default_padding() -> u32 {
    18
}

fn default_corner_radius() -> u32 {
    15
}

fn default_stroke_width() -> u32 {
    1
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: default_font_size(),
            text_align: HorizontalAlign::default(),
            placement: Placement::default(),
            edge_offset: default_edge_offset(),
            color_scheme: ColorScheme::default(),
            padding: default_padding(),
            corner_radius: default_corner_radius(),
            stroke_width: default_stroke_width(),
            background_opacity: 0,
        }
    }
}

impl LabelStyle {
    /// Validate style invariants at the configuration boundary.
    ///
    /// Numeric ranges match the node parameters the host exposes.
    pub fn validate(&self) -> AnnotileResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(AnnotileError::config("font_size must be finite and > 0"));
        }
        if self.font_size > 256.0 {
            return Err(AnnotileError::config("font_size must be <= 256"));
        }
        if let Some(family) = &self.font_family
            && family.trim().is_empty()
        {
            return Err(AnnotileError::config(
                "font_family must be non-empty when set",
            ));
        }
        for (name, value, max) in [
            ("edge_offset", self.edge_offset, 4096),
            ("padding", self.padding, 256),
            ("corner_radius", self.corner_radius, 128),
            ("stroke_width", self.stroke_width, 20),
        ] {
            if value > max {
                return Err(AnnotileError::config(format!(
                    "{name} must be <= {max}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/label/style.rs"]
mod tests;
