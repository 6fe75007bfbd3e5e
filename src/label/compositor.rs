use kurbo::Shape;

use crate::composite::over_in_place;
use crate::fonts::library::{FontLibrary, LoadedFont};
use crate::fonts::shape::{TextBrushRgba8, TextShaper, measure_block};
use crate::foundation::core::{Frame, FrameBatch};
use crate::foundation::error::{AnnotileError, AnnotileResult};
use crate::label::anchor::{BlockBox, resolve_block_origin};
use crate::label::style::{HorizontalAlign, LabelStyle};

/// Renders a styled text block onto copies of an input frame batch.
///
/// The compositor owns its font handle and shaping contexts; rendering is
/// deterministic and IO-free, so one instance can serve any number of
/// sequential calls (spawn separate instances for concurrent pipelines).
pub struct LabelCompositor {
    fonts: FontLibrary,
    shaper: TextShaper,
}

impl LabelCompositor {
    /// Construct a compositor over a prepared font library.
    pub fn new(fonts: FontLibrary) -> Self {
        Self {
            fonts,
            shaper: TextShaper::new(),
        }
    }

    /// The compositor's font library.
    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Mutable access to the font library (for late registration).
    pub fn fonts_mut(&mut self) -> &mut FontLibrary {
        &mut self.fonts
    }

    /// Composite `text` in `style` onto every frame of `images`.
    ///
    /// Inputs are never mutated; the output batch holds freshly allocated
    /// frames with the input dimensions. Empty text yields a byte-identical
    /// copy (a zero-size block draws nothing). An unresolvable font family
    /// degrades to the library default; with no fonts loaded at all only the
    /// background box is drawn.
    #[tracing::instrument(skip(self, images, text))]
    pub fn render(
        &mut self,
        images: &FrameBatch,
        text: &str,
        style: &LabelStyle,
    ) -> AnnotileResult<FrameBatch> {
        style.validate()?;
        let Some((img_w, img_h)) = images.dimensions() else {
            return Ok(FrameBatch::empty());
        };
        if text.is_empty() {
            return Ok(images.clone());
        }

        let font = self
            .fonts
            .resolve_or_default(style.font_family.as_deref())
            .cloned();
        if font.is_none() {
            tracing::warn!("font library holds no fonts, label glyphs will be skipped");
            if style.background_opacity == 0 {
                return Ok(images.clone());
            }
        }

        let layout = match &font {
            Some(f) => {
                let fg = style.color_scheme.foreground();
                let brush = TextBrushRgba8 {
                    r: fg[0],
                    g: fg[1],
                    b: fg[2],
                    a: 255,
                };
                Some(
                    self.shaper
                        .shape(&mut self.fonts, text, f.family(), style.font_size, brush)?,
                )
            }
            None => None,
        };

        let extent = layout.as_ref().map(measure_block).unwrap_or_default();
        let block_w = extent.width.ceil().max(0.0) as u32 + 2 * style.padding;
        let block_h = extent.height.ceil().max(0.0) as u32 + 2 * style.padding;
        if block_w == 0 || block_h == 0 {
            return Ok(images.clone());
        }

        let (x, y) = resolve_block_origin(
            style.placement,
            img_w,
            img_h,
            block_w,
            block_h,
            style.edge_offset,
        );
        let block = BlockBox {
            x,
            y,
            width: block_w,
            height: block_h,
        };
        tracing::debug!(?block, frames = images.len(), "compositing label block");

        let overlay = render_overlay(img_w, img_h, &block, layout.as_ref(), font.as_ref(), style)?;

        let mut out = Vec::with_capacity(images.len());
        for frame in images.iter() {
            let mut data = frame.data().to_vec();
            over_in_place(&mut data, &overlay, 1.0)?;
            out.push(Frame::from_premul_rgba8(img_w, img_h, data)?);
        }
        FrameBatch::new(out)
    }
}

impl std::fmt::Debug for LabelCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelCompositor")
            .field("fonts", &self.fonts)
            .finish()
    }
}

/// Rasterize the label block (background box + glyph passes) into a
/// transparent premultiplied RGBA8 overlay at frame size.
fn render_overlay(
    width: u32,
    height: u32,
    block: &BlockBox,
    layout: Option<&parley::Layout<TextBrushRgba8>>,
    font: Option<&LoadedFont>,
    style: &LabelStyle,
) -> AnnotileResult<Vec<u8>> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AnnotileError::render("canvas width exceeds u16 raster limit"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AnnotileError::render("canvas height exceeds u16 raster limit"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);

    if style.background_opacity > 0 {
        draw_background(&mut ctx, block, style);
    }
    if let (Some(layout), Some(font)) = (layout, font) {
        draw_text(&mut ctx, block, layout, font, style);
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

fn draw_background(ctx: &mut vello_cpu::RenderContext, block: &BlockBox, style: &LabelStyle) {
    let bg = style.color_scheme.background();
    let x0 = f64::from(block.x);
    let y0 = f64::from(block.y);
    let x1 = x0 + f64::from(block.width);
    let y1 = y0 + f64::from(block.height);
    // Radius is capped at half the short side, as in the source node.
    let radius = f64::from(style.corner_radius.min(block.width.min(block.height) / 2));

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        bg[0],
        bg[1],
        bg[2],
        style.background_opacity,
    ));
    fill_kurbo_shape(ctx, &kurbo::RoundedRect::new(x0, y0, x1, y1, radius));
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    block: &BlockBox,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &LoadedFont,
    style: &LabelStyle,
) {
    let fg = style.color_scheme.foreground();
    let outline = style.color_scheme.background();
    let origin_x = f64::from(block.x) + f64::from(style.padding);
    let origin_y = f64::from(block.y) + f64::from(style.padding);
    let text_width = f64::from(block.width) - 2.0 * f64::from(style.padding);

    for line in layout.lines() {
        let advance = f64::from(line.metrics().advance);
        let dx = match style.text_align {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => ((text_width - advance) / 2.0).max(0.0),
            HorizontalAlign::Right => (text_width - advance).max(0.0),
        };

        // Glyph positions are layout-absolute; only the per-line alignment
        // shift and the stamp offsets move between passes.
        let mut runs: Vec<(f32, Vec<vello_cpu::Glyph>)> = Vec::new();
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run
                .glyphs()
                .map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
                .collect();
            runs.push((run.run().font_size(), glyphs));
        }

        // Outline pass: stamp the fill in the outline color at 8 offsets.
        // Approximates a stroker with the glyph APIs available to us.
        if style.stroke_width > 0 {
            let s = f64::from(style.stroke_width);
            for (ox, oy) in [
                (-s, 0.0),
                (s, 0.0),
                (0.0, -s),
                (0.0, s),
                (-s, -s),
                (-s, s),
                (s, -s),
                (s, s),
            ] {
                stamp_runs(ctx, &runs, font, origin_x + dx + ox, origin_y + oy, outline);
            }
        }

        stamp_runs(ctx, &runs, font, origin_x + dx, origin_y, fg);
    }
}

fn stamp_runs(
    ctx: &mut vello_cpu::RenderContext,
    runs: &[(f32, Vec<vello_cpu::Glyph>)],
    font: &LoadedFont,
    tx: f64,
    ty: f64,
    rgb: [u8; 3],
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((tx, ty)));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        rgb[0], rgb[1], rgb[2], 255,
    ));
    for (font_size, glyphs) in runs {
        ctx.glyph_run(font.render_font())
            .font_size(*font_size)
            .fill_glyphs(glyphs.iter().copied());
    }
}

fn fill_kurbo_shape(ctx: &mut vello_cpu::RenderContext, shape: &impl Shape) {
    let mut p = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        p.push(el);
    }
    ctx.fill_path(&p);
}

#[cfg(test)]
#[path = "../../tests/unit/label/compositor.rs"]
mod tests;
