use std::sync::Arc;

use crate::foundation::core::{Point, Rect, Rgba8Premul};
use crate::foundation::error::PaintResult;
use crate::paint::command::{Blit, DrawCmd, PaintCommand};
use crate::raster::composite::CompositeOp;
use crate::raster::surface::RasterSurface;
use crate::worms::world::TrailStyle;

/// Worm trail painted lazily: a private copy of the points, composited over the destination at
/// paint time.
#[derive(Clone, Debug)]
pub struct Trail {
    points: Vec<Point>,
    colour: Rgba8Premul,
    bounds: Rect,
}

impl Trail {
    /// Fails on an empty point list.
    pub fn new(points: &[Point], colour: Rgba8Premul) -> PaintResult<Self> {
        let bounds = Rect::covering(points)?;
        let mut points = points.to_vec();
        // A pixel is covered once however often the worm crosses it.
        points.sort_unstable_by_key(|p| (p.y, p.x));
        points.dedup();
        Ok(Self {
            points,
            colour,
            bounds,
        })
    }

    /// Distinct pixels covered.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Trail colour.
    pub fn colour(&self) -> Rgba8Premul {
        self.colour
    }
}

impl PaintCommand for Trail {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_partial(&self) -> bool {
        true
    }

    fn paint(&self, dst: &mut RasterSurface) {
        let src = self.colour.to_array();
        for &p in &self.points {
            if !dst.bounds().contains_point(p) {
                continue;
            }
            let out = CompositeOp::Over.apply(dst.pixel(p).to_array(), src, 255);
            dst.set_pixel(p, Rgba8Premul::from_array(out));
        }
    }
}

/// Worm trail rasterized up front into an image the size of its bounds, blitted with
/// [`CompositeOp::Over`].
pub fn trail_raster(points: &[Point], colour: Rgba8Premul) -> PaintResult<Blit> {
    let mut img = RasterSurface::with_bounds(Rect::covering(points)?);
    for &p in points {
        img.set_pixel(p, colour);
    }
    Ok(Blit::image(Arc::new(img), CompositeOp::Over))
}

impl TrailStyle {
    /// Build the trail command for `points` in this style.
    pub fn command(self, points: &[Point], colour: Rgba8Premul) -> PaintResult<DrawCmd> {
        Ok(match self {
            Self::Raster => trail_raster(points, colour)?.into(),
            Self::Lazy => DrawCmd::custom(Trail::new(points, colour)?),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/worms/trail.rs"]
mod tests;
