use crate::foundation::error::PaintResult;
use crate::raster::surface::RasterSurface;

pub(crate) mod memory;

/// Surface driver contract consumed by the painter.
///
/// Only the painter thread calls these, one frame at a time: `acquire`, paint, `present`.
/// `acquire` may return a private back buffer (then `present` copies it out) or the live screen
/// (then `present` is just a sync point); the painter never assumes either.
pub trait PaintDriver {
    /// Mutable drawable for the next frame.
    fn acquire(&mut self) -> PaintResult<&mut RasterSurface>;

    /// Show what was painted since the last `acquire`.
    fn present(&mut self) -> PaintResult<()>;
}

impl<D: PaintDriver + ?Sized> PaintDriver for Box<D> {
    fn acquire(&mut self) -> PaintResult<&mut RasterSurface> {
        (**self).acquire()
    }

    fn present(&mut self) -> PaintResult<()> {
        (**self).present()
    }
}
