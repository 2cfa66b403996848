use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Context as _;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{PaintError, PaintResult};
use crate::paint::command::{Blit, DrawCmd};
use crate::paint::painter::PainterHandle;
use crate::worms::worm::{Worm, random_colour};
use crate::worms::world::WorldConfig;

/// Full-surface opaque black fill. Queued after each flush it starts the next frame from black
/// and tombstones every trail still pending underneath it.
pub fn clear_command(world: &WorldConfig) -> DrawCmd {
    Blit::fill(world.bounds(), Rgba8Premul::BLACK).into()
}

/// Start one worm producer thread.
///
/// The worm moves, sleeps its step, turns, and submits its trail until `stop` is set or the
/// painter goes away. The thread returns the number of trails submitted.
pub fn spawn_worm(
    handle: PainterHandle,
    world: Arc<WorldConfig>,
    seed: u64,
    stop: Arc<AtomicBool>,
) -> PaintResult<JoinHandle<PaintResult<u64>>> {
    let join = std::thread::Builder::new()
        .name(format!("worm-{seed:016x}"))
        .spawn(move || crawl(&handle, &world, seed, &stop))
        .context("spawn worm thread")?;
    Ok(join)
}

/// Start `world.worms` producers with seeds derived from `world.seed` (random when unset).
pub fn spawn_worms(
    handle: &PainterHandle,
    world: &Arc<WorldConfig>,
    stop: &Arc<AtomicBool>,
) -> PaintResult<Vec<JoinHandle<PaintResult<u64>>>> {
    let base = world.seed.unwrap_or_else(rand::random);
    tracing::info!(worms = world.worms, seed = base, "spawning worms");
    (0..world.worms as u64)
        .map(|i| {
            spawn_worm(
                handle.clone(),
                Arc::clone(world),
                base.wrapping_add(i),
                Arc::clone(stop),
            )
        })
        .collect()
}

fn crawl(
    handle: &PainterHandle,
    world: &WorldConfig,
    seed: u64,
    stop: &AtomicBool,
) -> PaintResult<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut worm = Worm::random(world, &mut rng);
    let colour = random_colour(&mut rng);
    let step = Duration::from_millis(rng.gen_range(world.min_step_ms..=world.max_step_ms));

    let mut submitted = 0u64;
    while !stop.load(Ordering::Relaxed) {
        worm.advance(world);
        std::thread::sleep(step);
        worm.turn(rng.gen_range(-1..=1));

        let cmd = world.trail_style.command(&worm.points(), colour)?;
        match handle.submit(cmd) {
            Ok(()) => submitted += 1,
            Err(PaintError::Disconnected) => break,
            Err(e) => return Err(e),
        }
    }
    tracing::trace!(seed, submitted, "worm stopped");
    Ok(submitted)
}

#[cfg(test)]
#[path = "../../tests/unit/worms/producer.rs"]
mod tests;
