use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Point, Rect, Rgba8Premul};
use crate::foundation::error::{PaintError, PaintResult};

/// In-memory premultiplied RGBA8 raster.
///
/// Pixels are tightly packed, row-major, and addressed in absolute coordinates: a surface whose
/// bounds start at `(40, 12)` stores pixel `(40, 12)` at offset 0. Reads outside the bounds yield
/// transparent; writes outside are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    bounds: Rect,
    data: Vec<u8>,
}

impl RasterSurface {
    /// Transparent surface of `width x height` anchored at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_bounds(Rect::from_size(width, height))
    }

    /// Transparent surface covering `bounds`.
    pub fn with_bounds(bounds: Rect) -> Self {
        let len = (bounds.area() as usize).saturating_mul(4);
        Self {
            bounds,
            data: vec![0; len],
        }
    }

    /// Surface covering `bounds` filled with `color`.
    pub fn filled(bounds: Rect, color: Rgba8Premul) -> Self {
        let mut s = Self::with_bounds(bounds);
        s.fill(color);
        s
    }

    /// Wrap existing premultiplied bytes.
    pub fn from_premul_bytes(bounds: Rect, data: Vec<u8>) -> PaintResult<Self> {
        let expected = (bounds.area() as usize).saturating_mul(4);
        if data.len() != expected {
            return Err(PaintError::validation(format!(
                "raster buffer has {} bytes, bounds {}x{} need {expected}",
                data.len(),
                bounds.width(),
                bounds.height()
            )));
        }
        Ok(Self { bounds, data })
    }

    /// Covered rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains_point(p) {
            return None;
        }
        let col = (p.x - self.bounds.x0) as usize;
        let row = (p.y - self.bounds.y0) as usize;
        Some((row * self.bounds.width() as usize + col) * 4)
    }

    /// Pixel at `p`, transparent outside the bounds.
    pub fn pixel(&self, p: Point) -> Rgba8Premul {
        match self.index(p) {
            Some(i) => Rgba8Premul::from_array([
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ]),
            None => Rgba8Premul::TRANSPARENT,
        }
    }

    /// Overwrite pixel at `p`; no-op outside the bounds.
    pub fn set_pixel(&mut self, p: Point, color: Rgba8Premul) {
        if let Some(i) = self.index(p) {
            self.data[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Make `self` an exact copy of `other`, reusing the allocation when sizes match.
    pub fn copy_from(&mut self, other: &Self) {
        if self.data.len() == other.data.len() {
            self.data.copy_from_slice(&other.data);
        } else {
            self.data.clone_from(&other.data);
        }
        self.bounds = other.bounds;
    }

    /// Straight-alpha RGBA8 copy of the pixels, suitable for image encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let c = Rgba8Premul::from_array([px[0], px[1], px[2], px[3]]);
            out.extend_from_slice(&c.to_straight_rgba());
        }
        out
    }

    /// Encode as PNG at `path`.
    pub fn save_png(&self, path: &Path) -> PaintResult<()> {
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width(),
            self.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
