use std::sync::Arc;

use crate::foundation::core::{Point, Rect, Rgba8Premul};
use crate::raster::surface::RasterSurface;

/// Premultiplied RGBA8 pixel as raw bytes.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff operator applied when a command writes into the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompositeOp {
    /// Source replaces destination (`Src`). Opaque over the whole target rectangle.
    #[default]
    Replace,
    /// Source is blended over destination (`Over`).
    Over,
}

impl CompositeOp {
    /// Combine one destination pixel with one source pixel seen through `coverage`.
    pub fn apply(self, dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
        match self {
            Self::Replace => replace(src, coverage),
            Self::Over => over(dst, src, coverage),
        }
    }
}

/// Pixel source for blits.
#[derive(Clone, Debug)]
pub enum Source {
    /// Uniform colour of unbounded extent.
    Solid(Rgba8Premul),
    /// Raster image; pixels outside its bounds are not drawn.
    Image(Arc<RasterSurface>),
}

impl Source {
    /// Region (in source space) that can produce pixels, `None` when unbounded.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Solid(_) => None,
            Self::Image(img) => Some(img.bounds()),
        }
    }

    /// Pixel at `p` in source space.
    pub fn at(&self, p: Point) -> PremulRgba8 {
        match self {
            Self::Solid(c) => c.to_array(),
            Self::Image(img) => img.pixel(p).to_array(),
        }
    }
}

/// Per-pixel coverage for masked blits.
#[derive(Clone, Debug)]
pub enum Mask {
    /// Same coverage everywhere.
    Uniform(u8),
    /// Coverage read from the alpha channel of an image.
    Image(Arc<RasterSurface>),
}

impl Mask {
    /// Region (in mask space) with defined coverage, `None` when unbounded.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Uniform(_) => None,
            Self::Image(img) => Some(img.bounds()),
        }
    }

    /// Coverage at `p` in mask space.
    pub fn at(&self, p: Point) -> u8 {
        match self {
            Self::Uniform(a) => *a,
            Self::Image(img) => img.pixel(p).a,
        }
    }
}

/// Composite `src` (and optionally `mask`) into `dst` over `rect`.
///
/// `src_origin` is the source pixel aligned with `rect`'s top-left corner; likewise `mask.1` for
/// the mask. The affected area is clipped to the destination and to the extent of any image
/// source or mask, so pixels the source cannot produce are left untouched.
pub fn draw(
    dst: &mut RasterSurface,
    rect: Rect,
    src: &Source,
    src_origin: Point,
    mask: Option<(&Mask, Point)>,
    op: CompositeOp,
) {
    let mut clip = rect.intersect(dst.bounds());
    if let Some(sb) = src.bounds() {
        clip = clip.intersect(sb.translate(rect.x0 - src_origin.x, rect.y0 - src_origin.y));
    }
    if let Some((m, mp)) = mask
        && let Some(mb) = m.bounds()
    {
        clip = clip.intersect(mb.translate(rect.x0 - mp.x, rect.y0 - mp.y));
    }
    if clip.is_empty() {
        return;
    }

    for y in clip.y0..clip.y1 {
        for x in clip.x0..clip.x1 {
            let (dx, dy) = (x - rect.x0, y - rect.y0);
            let s = src.at(src_origin.offset(dx, dy));
            let coverage = mask.map_or(255, |(m, mp)| m.at(mp.offset(dx, dy)));
            let p = Point::new(x, y);
            let d = dst.pixel(p).to_array();
            dst.set_pixel(p, Rgba8Premul::from_array(op.apply(d, s, coverage)));
        }
    }
}

/// Source-over with an extra coverage factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }

    let op = u16::from(coverage);
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Source scaled by coverage; the destination is discarded.
pub fn replace(src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 255 {
        return src;
    }
    let op = u16::from(coverage);
    src.map(|c| mul_div255(u16::from(c), op))
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
