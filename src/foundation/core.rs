use anyhow::Context;

use crate::foundation::error::{AnnotileError, AnnotileResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgb};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel (premultiplied).
    pub r: u8,
    /// Green channel (premultiplied).
    pub g: u8,
    /// Blue channel (premultiplied).
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Fully opaque color.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Premultiply a straight-alpha color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channel values as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// One raster image: row-major premultiplied RGBA8 with fixed dimensions.
///
/// Frames are the unit both compositors consume and produce. The host's two
/// wire representations (byte RGB in `[0,255]`, float RGB in `[0,1]`) convert
/// at the boundary via [`Frame::from_rgb8`]/[`Frame::from_f32_rgb`] and the
/// matching exporters; internally everything is premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Wrap an existing premultiplied RGBA8 buffer.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> AnnotileResult<Self> {
        let expected = byte_len(width, height, 4)?;
        if data.len() != expected {
            return Err(AnnotileError::config(format!(
                "frame buffer holds {} bytes, expected {expected} for {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a frame filled with a constant color.
    pub fn solid(width: u32, height: u32, fill: Rgba8Premul) -> AnnotileResult<Self> {
        let len = byte_len(width, height, 4)?;
        let mut data = vec![0u8; len];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&fill.to_array());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Import byte-intensity RGB (opaque), the host's `[0,255]` representation.
    pub fn from_rgb8(width: u32, height: u32, rgb: &[u8]) -> AnnotileResult<Self> {
        let expected = byte_len(width, height, 3)?;
        if rgb.len() != expected {
            return Err(AnnotileError::config(format!(
                "rgb buffer holds {} bytes, expected {expected} for {width}x{height} rgb8",
                rgb.len()
            )));
        }
        let mut data = Vec::with_capacity(expected / 3 * 4);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Import float-intensity RGB in `[0,1]`, the host's tensor representation.
    ///
    /// Values are clamped to `[0,1]` and rounded to the nearest byte, matching
    /// the export direction of [`Frame::to_f32_rgb`].
    pub fn from_f32_rgb(width: u32, height: u32, rgb: &[f32]) -> AnnotileResult<Self> {
        let expected = byte_len(width, height, 3)?;
        if rgb.len() != expected {
            return Err(AnnotileError::config(format!(
                "rgb buffer holds {} samples, expected {expected} for {width}x{height} rgb",
                rgb.len()
            )));
        }
        let mut data = Vec::with_capacity(expected / 3 * 4);
        for px in rgb.chunks_exact(3) {
            let q = |v: f32| -> u8 { (v.clamp(0.0, 1.0) * 255.0).round() as u8 };
            data.extend_from_slice(&[q(px[0]), q(px[1]), q(px[2]), 255]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) into a premultiplied frame.
    pub fn decode(bytes: &[u8]) -> AnnotileResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut data = rgba.into_raw();
        premultiply_rgba8_in_place(&mut data);

        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame, returning its premultiplied RGBA8 buffer.
    pub fn into_premul_rgba8(self) -> Vec<u8> {
        self.data
    }

    /// Export as straight byte RGB, dropping alpha.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply_rgb([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    /// Export as straight float RGB in `[0,1]`, dropping alpha.
    pub fn to_f32_rgb(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            let [r, g, b] = unpremultiply_rgb([px[0], px[1], px[2], px[3]]);
            out.push(f32::from(r) / 255.0);
            out.push(f32::from(g) / 255.0);
            out.push(f32::from(b) / 255.0);
        }
        out
    }
}

/// An ordered sequence of frames sharing one set of dimensions.
///
/// Batches are caller-owned: compositors read them by reference and return
/// freshly allocated output batches, never aliasing input storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameBatch {
    frames: Vec<Frame>,
}

impl FrameBatch {
    /// Build a batch, validating that every frame shares dimensions.
    pub fn new(frames: Vec<Frame>) -> AnnotileResult<Self> {
        if let Some(first) = frames.first() {
            let dims = first.dimensions();
            for (i, f) in frames.iter().enumerate() {
                if f.dimensions() != dims {
                    return Err(AnnotileError::config(format!(
                        "batch frame {i} is {}x{}, expected {}x{}",
                        f.width(),
                        f.height(),
                        dims.0,
                        dims.1
                    )));
                }
            }
        }
        Ok(Self { frames })
    }

    /// An empty batch.
    pub fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    /// Append a frame, validating dimensions against the batch.
    pub fn push(&mut self, frame: Frame) -> AnnotileResult<()> {
        if let Some((w, h)) = self.dimensions()
            && frame.dimensions() != (w, h)
        {
            return Err(AnnotileError::config(format!(
                "pushed frame is {}x{}, batch is {w}x{h}",
                frame.width(),
                frame.height()
            )));
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when the batch holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Shared dimensions of all frames, `None` for an empty batch.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(Frame::dimensions)
    }

    /// Frames in batch order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Iterate frames in batch order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Consume the batch, returning its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

fn byte_len(width: u32, height: u32, channels: usize) -> AnnotileResult<usize> {
    if width == 0 || height == 0 {
        return Err(AnnotileError::config("frame dimensions must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| AnnotileError::render("frame byte length overflow"))
}
