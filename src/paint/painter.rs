use std::sync::mpsc::{self, TryRecvError};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::driver::PaintDriver;
use crate::foundation::error::{PaintError, PaintResult};
use crate::paint::command::DrawCmd;
use crate::paint::queue::{PaintQueue, QueueKind};

/// When a flush turns pending commands into a presented frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FlushPolicy {
    /// Paint exactly what arrived before the flush, then present.
    #[default]
    Immediate,
    /// After a flush, also take every message already waiting in the channel (without blocking)
    /// into the same frame. Fewer presents, possibly skipping intermediate states.
    Batched,
}

/// Painter construction options.
#[derive(Clone, Debug, Default)]
pub struct PainterOpts {
    /// Scheduling policy for flushes.
    pub policy: FlushPolicy,
    /// `None` for an unbounded channel; `Some(n)` blocks producers once `n` messages wait.
    pub channel_capacity: Option<usize>,
    /// Pending-command store.
    pub queue: QueueKind,
}

/// Counters accumulated by [`Painter::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PainterStats {
    /// Draw commands received (flushes excluded).
    pub commands_received: u64,
    /// Flush sentinels received, including ones folded into a batched frame.
    pub flushes: u64,
    /// Frames painted and presented.
    pub frames_presented: u64,
    /// Commands actually painted.
    pub commands_painted: u64,
    /// Commands discarded by the queue as fully occluded.
    pub commands_tombstoned: u64,
}

#[derive(Clone, Debug)]
enum CmdSender {
    Bounded(mpsc::SyncSender<DrawCmd>),
    Unbounded(mpsc::Sender<DrawCmd>),
}

impl CmdSender {
    fn send(&self, cmd: DrawCmd) -> PaintResult<()> {
        let res = match self {
            Self::Bounded(tx) => tx.send(cmd),
            Self::Unbounded(tx) => tx.send(cmd),
        };
        res.map_err(|_| PaintError::Disconnected)
    }
}

/// Producer side of the painter channel. Clone one per producer.
///
/// The painter stops once every handle is dropped.
#[derive(Clone, Debug)]
pub struct PainterHandle {
    tx: CmdSender,
}

impl PainterHandle {
    /// Enqueue one command. Blocks only when a bounded channel is full.
    pub fn submit(&self, cmd: impl Into<DrawCmd>) -> PaintResult<()> {
        self.tx.send(cmd.into())
    }

    /// Enqueue several commands in order.
    pub fn submit_all(&self, cmds: impl IntoIterator<Item = DrawCmd>) -> PaintResult<()> {
        for cmd in cmds {
            self.tx.send(cmd)?;
        }
        Ok(())
    }

    /// Request a paint + present of everything submitted so far.
    pub fn flush(&self) -> PaintResult<()> {
        self.tx.send(DrawCmd::Flush)
    }
}

/// Driver and counters handed back when a spawned painter stops.
#[derive(Debug)]
pub struct Finished<D> {
    /// The driver, with whatever was last presented.
    pub driver: D,
    /// Final counters.
    pub stats: PainterStats,
}

/// Single consumer that owns the queue and the drawable.
///
/// Every message goes through one loop: draw commands are added to the queue; a flush drains the
/// queue, paints the survivors in order onto the driver's drawable, and presents it. Nothing else
/// touches the queue or the driver, so neither needs a lock.
pub struct Painter<D> {
    driver: D,
    queue: Box<dyn PaintQueue + Send>,
    rx: mpsc::Receiver<DrawCmd>,
    policy: FlushPolicy,
    stats: PainterStats,
}

impl<D: PaintDriver> Painter<D> {
    /// Painter plus the first producer handle, using the queue selected in `opts`.
    pub fn new(driver: D, opts: PainterOpts) -> PaintResult<(Self, PainterHandle)> {
        let queue = opts.queue.build();
        Self::with_queue(driver, queue, opts)
    }

    /// Like [`Painter::new`] with a caller-provided queue (`opts.queue` is ignored).
    pub fn with_queue(
        driver: D,
        queue: Box<dyn PaintQueue + Send>,
        opts: PainterOpts,
    ) -> PaintResult<(Self, PainterHandle)> {
        let (tx, rx) = match opts.channel_capacity {
            Some(0) => {
                return Err(PaintError::validation(
                    "painter channel capacity must be >= 1 when set",
                ));
            }
            Some(cap) => {
                let (tx, rx) = mpsc::sync_channel(cap);
                (CmdSender::Bounded(tx), rx)
            }
            None => {
                let (tx, rx) = mpsc::channel();
                (CmdSender::Unbounded(tx), rx)
            }
        };
        let painter = Self {
            driver,
            queue,
            rx,
            policy: opts.policy,
            stats: PainterStats::default(),
        };
        Ok((painter, PainterHandle { tx }))
    }

    /// Borrow the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Counters so far.
    pub fn stats(&self) -> PainterStats {
        self.stats
    }

    /// Give the driver back.
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Process messages until every [`PainterHandle`] is dropped.
    ///
    /// A driver failure ends the loop with that error; commands still pending are dropped.
    /// Commands received after the last flush are never painted.
    ///
    /// The channel only closes once all producers are gone, so in [`FlushPolicy::Immediate`] a
    /// frame is never cut short by disconnection. In [`FlushPolicy::Batched`] a disconnect seen
    /// while sweeping still paints the frame, then stops.
    #[tracing::instrument(name = "painter", skip_all)]
    pub fn run(&mut self) -> PaintResult<PainterStats> {
        tracing::info!(policy = ?self.policy, "painter started");
        while let Ok(cmd) = self.rx.recv() {
            if !cmd.is_flush() {
                self.accept(cmd);
                continue;
            }

            self.stats.flushes += 1;
            let disconnected = match self.policy {
                FlushPolicy::Immediate => false,
                FlushPolicy::Batched => self.sweep(),
            };
            self.paint_frame()?;
            if disconnected {
                break;
            }
        }

        if !self.queue.is_empty() {
            tracing::debug!(
                pending = self.queue.len(),
                "dropping commands submitted after the last flush"
            );
        }
        tracing::info!(
            frames = self.stats.frames_presented,
            received = self.stats.commands_received,
            painted = self.stats.commands_painted,
            tombstoned = self.stats.commands_tombstoned,
            "painter stopped"
        );
        Ok(self.stats)
    }

    fn accept(&mut self, cmd: DrawCmd) {
        self.stats.commands_received += 1;
        self.queue.add(cmd);
    }

    // Returns `true` if the channel disconnected during the sweep.
    fn sweep(&mut self) -> bool {
        loop {
            match self.rx.try_recv() {
                Ok(DrawCmd::Flush) => self.stats.flushes += 1,
                Ok(cmd) => self.accept(cmd),
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => return true,
            }
        }
    }

    fn paint_frame(&mut self) -> PaintResult<()> {
        let drained = self.queue.drain();
        let dst = self.driver.acquire()?;
        let mut painted = 0u64;
        for cmd in drained.live() {
            cmd.paint(dst);
            painted += 1;
        }
        self.driver.present()?;

        let tombstoned = drained.tombstoned() as u64;
        self.stats.frames_presented += 1;
        self.stats.commands_painted += painted;
        self.stats.commands_tombstoned += tombstoned;
        tracing::debug!(
            frame = self.stats.frames_presented,
            painted,
            tombstoned,
            dirty = ?drained.bounds(),
            "presented frame"
        );
        Ok(())
    }
}

impl<D: PaintDriver + Send + 'static> Painter<D> {
    /// Run the loop on a dedicated `painter` thread.
    pub fn spawn(mut self) -> PaintResult<JoinHandle<PaintResult<Finished<D>>>> {
        let handle = std::thread::Builder::new()
            .name("painter".to_string())
            .spawn(move || -> PaintResult<Finished<D>> {
                let stats = self.run()?;
                Ok(Finished {
                    driver: self.driver,
                    stats,
                })
            })
            .context("spawn painter thread")?;
        Ok(handle)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/painter.rs"]
mod tests;
