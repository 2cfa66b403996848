use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context as _;

use crate::foundation::error::{PaintError, PaintResult};
use crate::paint::command::DrawCmd;
use crate::paint::painter::PainterHandle;

/// Flush ticker options.
#[derive(Clone, Debug)]
pub struct TickerOpts {
    /// Time between flushes.
    pub period: Duration,
    /// Submitted right after every flush, e.g. a full-surface clear to start the next frame from.
    pub after_flush: Option<DrawCmd>,
    /// Stop by itself after this many ticks.
    pub max_ticks: Option<u64>,
}

impl TickerOpts {
    /// Ticker at `fps` flushes per second.
    pub fn at_fps(fps: u32) -> PaintResult<Self> {
        if fps == 0 {
            return Err(PaintError::validation("ticker fps must be > 0"));
        }
        Ok(Self {
            period: Duration::from_secs(1) / fps,
            after_flush: None,
            max_ticks: None,
        })
    }
}

/// Fixed-rate thread submitting [`DrawCmd::Flush`] to a painter.
///
/// Ticks are scheduled against absolute deadlines so a slow painter does not make the rate drift;
/// missed deadlines are skipped rather than replayed in a burst.
#[derive(Debug)]
pub struct FlushTicker {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<u64>>,
}

impl FlushTicker {
    /// Start ticking. The ticker ends on [`FlushTicker::stop`], after `max_ticks`, or when the
    /// painter goes away.
    pub fn spawn(handle: PainterHandle, opts: TickerOpts) -> PaintResult<Self> {
        if opts.period.is_zero() {
            return Err(PaintError::validation("ticker period must be > 0"));
        }
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let join = std::thread::Builder::new()
            .name("flush-ticker".to_string())
            .spawn(move || tick_loop(&handle, &opts, &flag))
            .context("spawn flush ticker thread")?;
        Ok(Self {
            stop,
            join: Some(join),
        })
    }

    /// Return `true` once the ticker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the ticker to end by itself; returns the number of ticks.
    pub fn wait(mut self) -> PaintResult<u64> {
        self.join_thread()
    }

    /// Stop ticking and return the number of ticks.
    pub fn stop(mut self) -> PaintResult<u64> {
        self.stop.store(true, Ordering::Relaxed);
        self.join_thread()
    }

    fn join_thread(&mut self) -> PaintResult<u64> {
        let Some(join) = self.join.take() else {
            return Ok(0);
        };
        join.join().map_err(|_| {
            tracing::error!("flush ticker thread panicked");
            PaintError::Other(anyhow::anyhow!("flush ticker thread panicked"))
        })
    }
}

impl Drop for FlushTicker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

fn tick_loop(handle: &PainterHandle, opts: &TickerOpts, stop: &AtomicBool) -> u64 {
    let mut ticks = 0u64;
    let mut next = Instant::now() + opts.period;
    loop {
        if opts.max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        let now = Instant::now();
        if next > now {
            std::thread::sleep(next - now);
        }
        while next <= Instant::now() {
            next += opts.period;
        }
        if stop.load(Ordering::Relaxed) {
            break;
        }

        if handle.flush().is_err() {
            tracing::debug!(ticks, "painter gone; ticker exiting");
            break;
        }
        if let Some(cmd) = &opts.after_flush
            && handle.submit(cmd.clone()).is_err()
        {
            break;
        }
        ticks += 1;
    }
    ticks
}

#[cfg(test)]
#[path = "../../tests/unit/paint/ticker.rs"]
mod tests;
