//! Crawling-worms demo: many producer threads, each submitting its worm's trail to a shared
//! painter.

pub(crate) mod producer;
pub(crate) mod trail;
pub(crate) mod world;
pub(crate) mod worm;

pub use producer::{clear_command, spawn_worm, spawn_worms};
pub use trail::{Trail, trail_raster};
pub use world::{TrailStyle, WorldConfig};
pub use worm::{Direction, Worm, random_colour};
