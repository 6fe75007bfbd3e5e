use std::borrow::Cow;

use crate::fonts::library::FontLibrary;
use crate::foundation::error::{AnnotileError, AnnotileResult};

/// RGBA8 brush color carried through Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Measured extent of a shaped text block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    /// Widest line advance in pixels.
    pub width: f64,
    /// Summed line heights in pixels.
    pub height: f64,
}

/// Stateful helper shaping label text into Parley layouts.
///
/// Explicit `\n` line breaks are preserved; no width-based wrapping is
/// applied (labels are measured, then anchored, never reflowed).
pub struct TextShaper {
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    /// Construct a shaper with a fresh Parley layout context.
    pub fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape `text` in `family` at `size_px`, using fonts from `fonts`.
    pub fn shape(
        &mut self,
        fonts: &mut FontLibrary,
        text: &str,
        family: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> AnnotileResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AnnotileError::config("font size must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(fonts.context(), text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper").finish()
    }
}

/// Measure a shaped block: max line advance by summed line heights.
pub fn measure_block(layout: &parley::Layout<TextBrushRgba8>) -> TextExtent {
    let mut width = 0.0f64;
    let mut height = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        width = width.max(f64::from(m.advance));
        height += f64::from(m.ascent + m.descent + m.leading);
    }
    TextExtent { width, height }
}
