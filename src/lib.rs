//! Coalescing draw-command queue and single-consumer painter.
//!
//! Producers submit [`DrawCmd`]s through cloned [`PainterHandle`]s. One [`Painter`] collects them
//! in a [`CoalescingQueue`], which drops commands hidden under a later opaque one, and on every
//! [`DrawCmd::Flush`] paints the survivors onto a [`PaintDriver`] surface and presents it.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod foundation;
mod paint;
mod raster;

pub mod worms;

pub use driver::PaintDriver;
pub use driver::memory::{Buffering, FrameDump, MemoryDriver};
pub use foundation::core::{Point, Rect, Rgba8Premul};
pub use foundation::error::{PaintError, PaintResult};
pub use paint::command::{Blit, DrawCmd, MaskedBlit, PaintCommand};
pub use paint::painter::{Finished, FlushPolicy, Painter, PainterHandle, PainterOpts, PainterStats};
pub use paint::queue::{CoalescingQueue, Drained, FifoQueue, PaintQueue, QueueKind};
pub use paint::ticker::{FlushTicker, TickerOpts};
pub use raster::composite::{CompositeOp, Mask, PremulRgba8, Source, draw};
pub use raster::surface::RasterSurface;
