use std::path::Path;

use rand::Rng;

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{PaintError, PaintResult};

/// How a worm turns its points into a draw command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailStyle {
    /// Rasterize into a private image up front and blit it over the destination.
    #[default]
    Raster,
    /// Keep the copied points and composite them at paint time.
    Lazy,
}

/// Immutable parameters of the worm world, shared by every producer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// World (and surface) width in pixels.
    pub width: u32,
    /// World (and surface) height in pixels.
    pub height: u32,
    /// Number of producer threads.
    pub worms: usize,
    /// Shortest worm, in points.
    pub min_len: usize,
    /// Longest worm, in points.
    pub max_len: usize,
    /// Shortest sleep between moves.
    pub min_step_ms: u64,
    /// Longest sleep between moves.
    pub max_step_ms: u64,
    /// Flush rate.
    pub fps: u32,
    /// Draw command flavour for trails.
    pub trail_style: TrailStyle,
    /// Fixed seed for reproducible worms; random when absent.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1650,
            height: 850,
            worms: 256,
            min_len: 3,
            max_len: 10,
            min_step_ms: 15,
            max_step_ms: 50,
            fps: 60,
            trail_style: TrailStyle::Raster,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Load and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_path(path: &Path) -> PaintResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PaintError::config(format!("read '{}': {e}", path.display())))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| PaintError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject empty worlds and inverted ranges.
    pub fn validate(&self) -> PaintResult<()> {
        if self.width < 2 || self.height < 2 {
            return Err(PaintError::validation("world width/height must be >= 2"));
        }
        if self.worms == 0 {
            return Err(PaintError::validation("world needs at least one worm"));
        }
        if self.min_len == 0 || self.min_len > self.max_len {
            return Err(PaintError::validation(format!(
                "worm length range {}..={} is invalid",
                self.min_len, self.max_len
            )));
        }
        if self.min_step_ms > self.max_step_ms {
            return Err(PaintError::validation(format!(
                "worm step range {}..={} ms is invalid",
                self.min_step_ms, self.max_step_ms
            )));
        }
        if self.fps == 0 {
            return Err(PaintError::validation("fps must be > 0"));
        }
        Ok(())
    }

    /// The whole world as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Return `true` when `p` lies inside the world.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains_point(p)
    }

    pub(crate) fn random_point(&self, rng: &mut impl Rng) -> Point {
        let b = self.bounds();
        Point::new(rng.gen_range(b.x0..b.x1), rng.gen_range(b.y0..b.y1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/worms/world.rs"]
mod tests;
