use std::fmt;
use std::sync::Arc;

use crate::foundation::core::{Point, Rect, Rgba8Premul};
use crate::raster::composite::{self, CompositeOp, Mask, Source};
use crate::raster::surface::RasterSurface;

/// Capability surface shared by every unit of paint work.
///
/// Implementors must return the same `bounds` and `is_partial` for their whole lifetime, and
/// `paint` must depend only on state captured at construction. Commands are queued and may be
/// painted long after the producer moved on, so they must never borrow or share the producer's
/// mutable buffers.
pub trait PaintCommand: Send + Sync + fmt::Debug {
    /// Region affected by [`PaintCommand::paint`].
    fn bounds(&self) -> Rect;

    /// `false` only if painting opaquely overwrites every pixel of [`PaintCommand::bounds`].
    fn is_partial(&self) -> bool;

    /// Render into `dst`.
    fn paint(&self, dst: &mut RasterSurface);
}

/// Copy `src` into the destination over `rect`.
#[derive(Clone, Debug)]
pub struct Blit {
    rect: Rect,
    src: Source,
    src_origin: Point,
    op: CompositeOp,
}

impl Blit {
    /// `src_origin` is the source pixel drawn at `rect`'s top-left corner.
    ///
    /// For image sources `rect` is shrunk to the part the image can actually cover, so the
    /// reported bounds never claim pixels the blit leaves untouched.
    pub fn new(rect: Rect, src: Source, src_origin: Point, op: CompositeOp) -> Self {
        let Some(sb) = src.bounds() else {
            return Self {
                rect,
                src,
                src_origin,
                op,
            };
        };
        let clipped = rect.intersect(sb.translate(rect.x0 - src_origin.x, rect.y0 - src_origin.y));
        Self {
            rect: clipped,
            src_origin: src_origin.offset(clipped.x0 - rect.x0, clipped.y0 - rect.y0),
            src,
            op,
        }
    }

    /// Opaque solid fill of `rect`.
    pub fn fill(rect: Rect, color: Rgba8Premul) -> Self {
        Self {
            rect,
            src: Source::Solid(color),
            src_origin: Point::ZERO,
            op: CompositeOp::Replace,
        }
    }

    /// Draw `img` at its own bounds.
    pub fn image(img: Arc<RasterSurface>, op: CompositeOp) -> Self {
        let rect = img.bounds();
        Self {
            rect,
            src: Source::Image(img),
            src_origin: rect.min(),
            op,
        }
    }

    /// Compositing operator.
    pub fn op(&self) -> CompositeOp {
        self.op
    }
}

impl PaintCommand for Blit {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn is_partial(&self) -> bool {
        self.op == CompositeOp::Over
    }

    fn paint(&self, dst: &mut RasterSurface) {
        composite::draw(dst, self.rect, &self.src, self.src_origin, None, self.op);
    }
}

/// A [`Blit`] seen through a per-pixel mask. Always partial: coverage depends on mask data.
#[derive(Clone, Debug)]
pub struct MaskedBlit {
    blit: Blit,
    mask: Mask,
    mask_origin: Point,
}

impl MaskedBlit {
    /// `mask_origin` is the mask pixel aligned with `rect`'s top-left corner.
    ///
    /// Like [`Blit::new`], `rect` is shrunk to the part both an image source and an image mask
    /// can cover.
    pub fn new(
        rect: Rect,
        src: Source,
        src_origin: Point,
        mask: Mask,
        mask_origin: Point,
        op: CompositeOp,
    ) -> Self {
        let mut blit = Blit::new(rect, src, src_origin, op);
        let mut mask_origin = mask_origin.offset(blit.rect.x0 - rect.x0, blit.rect.y0 - rect.y0);
        if let Some(mb) = mask.bounds() {
            let r = blit.rect;
            let clipped = r.intersect(mb.translate(r.x0 - mask_origin.x, r.y0 - mask_origin.y));
            let (dx, dy) = (clipped.x0 - r.x0, clipped.y0 - r.y0);
            blit.rect = clipped;
            blit.src_origin = blit.src_origin.offset(dx, dy);
            mask_origin = mask_origin.offset(dx, dy);
        }
        Self {
            blit,
            mask,
            mask_origin,
        }
    }
}

impl PaintCommand for MaskedBlit {
    fn bounds(&self) -> Rect {
        self.blit.rect
    }

    fn is_partial(&self) -> bool {
        true
    }

    fn paint(&self, dst: &mut RasterSurface) {
        composite::draw(
            dst,
            self.blit.rect,
            &self.blit.src,
            self.blit.src_origin,
            Some((&self.mask, self.mask_origin)),
            self.blit.op,
        );
    }
}

/// Unit of paint work carried over the painter channel.
#[derive(Clone, Debug)]
pub enum DrawCmd {
    /// Control sentinel: paint what is pending and present it. Never queued, never painted.
    Flush,
    /// Plain blit.
    Blit(Blit),
    /// Masked blit.
    MaskedBlit(MaskedBlit),
    /// Domain-specific command.
    Custom(Arc<dyn PaintCommand>),
}

impl DrawCmd {
    /// Wrap a domain-specific command.
    pub fn custom(cmd: impl PaintCommand + 'static) -> Self {
        Self::Custom(Arc::new(cmd))
    }

    /// Return `true` for the [`DrawCmd::Flush`] sentinel.
    pub fn is_flush(&self) -> bool {
        matches!(self, Self::Flush)
    }

    /// Region affected by painting. [`Rect::ZERO`] for flush.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Flush => Rect::ZERO,
            Self::Blit(c) => c.bounds(),
            Self::MaskedBlit(c) => c.bounds(),
            Self::Custom(c) => c.bounds(),
        }
    }

    /// See [`PaintCommand::is_partial`]. Flush counts as partial so it can never occlude.
    pub fn is_partial(&self) -> bool {
        match self {
            Self::Flush => true,
            Self::Blit(c) => c.is_partial(),
            Self::MaskedBlit(c) => c.is_partial(),
            Self::Custom(c) => c.is_partial(),
        }
    }

    /// Render into `dst`.
    pub fn paint(&self, dst: &mut RasterSurface) {
        match self {
            Self::Flush => {}
            Self::Blit(c) => c.paint(dst),
            Self::MaskedBlit(c) => c.paint(dst),
            Self::Custom(c) => c.paint(dst),
        }
    }
}

impl From<Blit> for DrawCmd {
    fn from(c: Blit) -> Self {
        Self::Blit(c)
    }
}

impl From<MaskedBlit> for DrawCmd {
    fn from(c: MaskedBlit) -> Self {
        Self::MaskedBlit(c)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/command.rs"]
mod tests;
