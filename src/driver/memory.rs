use std::path::PathBuf;

use anyhow::Context as _;

use crate::driver::PaintDriver;
use crate::foundation::core::Rect;
use crate::foundation::error::{PaintError, PaintResult};
use crate::raster::surface::RasterSurface;

/// How [`MemoryDriver`] hands out its drawable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Buffering {
    /// Paint into a private back buffer, copied to the screen on present.
    #[default]
    Double,
    /// Paint straight into the screen; present is only a sync point.
    Direct,
}

/// Write every `every`-th presented frame to `dir` as `frame_NNNNN.png`.
#[derive(Clone, Debug)]
pub struct FrameDump {
    /// Output directory, created on demand.
    pub dir: PathBuf,
    /// Dump period in presented frames (must be >= 1).
    pub every: u64,
}

/// Headless driver backed by an in-memory "screen" surface.
#[derive(Debug)]
pub struct MemoryDriver {
    screen: RasterSurface,
    back: Option<RasterSurface>,
    buffering: Buffering,
    presents: u64,
    dump: Option<FrameDump>,
    dumped: u64,
}

impl MemoryDriver {
    /// Transparent `width x height` screen.
    pub fn new(width: u32, height: u32, buffering: Buffering) -> Self {
        Self {
            screen: RasterSurface::new(width, height),
            back: None,
            buffering,
            presents: 0,
            dump: None,
            dumped: 0,
        }
    }

    /// Enable PNG frame dumps.
    pub fn with_dump(mut self, dump: FrameDump) -> PaintResult<Self> {
        if dump.every == 0 {
            return Err(PaintError::validation("frame dump period must be >= 1"));
        }
        std::fs::create_dir_all(&dump.dir)
            .with_context(|| format!("create dump dir '{}'", dump.dir.display()))?;
        self.dump = Some(dump);
        Ok(self)
    }

    /// What is currently shown.
    pub fn screen(&self) -> &RasterSurface {
        &self.screen
    }

    /// Buffering mode.
    pub fn buffering(&self) -> Buffering {
        self.buffering
    }

    /// Number of completed presents.
    pub fn presents(&self) -> u64 {
        self.presents
    }

    /// Number of PNG files written.
    pub fn frames_dumped(&self) -> u64 {
        self.dumped
    }

    /// Replace the screen with a transparent surface of a new size, as a window resize would.
    ///
    /// The back buffer is reallocated on the next `acquire`.
    pub fn resize_screen(&mut self, width: u32, height: u32) {
        self.screen = RasterSurface::new(width, height);
    }

    fn dump_screen(&mut self) -> PaintResult<()> {
        let Some(dump) = &self.dump else {
            return Ok(());
        };
        if self.presents % dump.every != 0 {
            return Ok(());
        }
        let path = dump.dir.join(format!("frame_{:05}.png", self.presents));
        self.screen.save_png(&path)?;
        self.dumped += 1;
        tracing::debug!(path = %path.display(), "dumped frame");
        Ok(())
    }
}

impl PaintDriver for MemoryDriver {
    fn acquire(&mut self) -> PaintResult<&mut RasterSurface> {
        match self.buffering {
            Buffering::Direct => Ok(&mut self.screen),
            Buffering::Double => {
                let screen_bounds: Rect = self.screen.bounds();
                let stale = self
                    .back
                    .as_ref()
                    .is_none_or(|b| b.bounds() != screen_bounds);
                if stale {
                    self.back = Some(self.screen.clone());
                }
                self.back
                    .as_mut()
                    .ok_or_else(|| PaintError::surface("back buffer missing after allocation"))
            }
        }
    }

    fn present(&mut self) -> PaintResult<()> {
        if let (Buffering::Double, Some(back)) = (self.buffering, self.back.as_ref()) {
            self.screen.copy_from(back);
        }
        self.presents += 1;
        self.dump_screen()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/memory.rs"]
mod tests;
