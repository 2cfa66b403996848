use crate::foundation::core::Rect;
use crate::paint::command::DrawCmd;

/// Pending-command store fed by the painter between flushes.
///
/// Both operations run on the painter thread only; implementations need no internal locking.
pub trait PaintQueue {
    /// Accept a command. Implementations may discard earlier commands it makes redundant.
    fn add(&mut self, cmd: DrawCmd);

    /// Hand out everything pending, in add order, and reset to empty.
    fn drain(&mut self) -> Drained;

    /// Number of live (non-tombstoned) commands pending.
    fn len(&self) -> usize;

    /// Return `true` when nothing was added since the last drain.
    fn is_empty(&self) -> bool;
}

/// Result of [`PaintQueue::drain`]: ordered slots plus the accumulated dirty bounds.
///
/// Tombstoned slots are kept as `None` so positions match the order commands were added.
#[derive(Debug, Default)]
pub struct Drained {
    slots: Vec<Option<DrawCmd>>,
    bounds: Rect,
}

impl Drained {
    /// All slots, tombstones included.
    pub fn slots(&self) -> &[Option<DrawCmd>] {
        &self.slots
    }

    /// Union of the bounds of every command added since the previous drain.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Surviving commands in paint order.
    pub fn live(&self) -> impl Iterator<Item = &DrawCmd> {
        self.slots.iter().flatten()
    }

    /// Number of surviving commands.
    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Number of tombstoned slots.
    pub fn tombstoned(&self) -> usize {
        self.slots.len() - self.live_count()
    }

    /// Return `true` when no slot was drained.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Queue that drops commands hidden under a later opaque command.
///
/// Occlusion is decided on rectangles only: an earlier command is tombstoned when its whole
/// bounding rectangle lies inside the bounds of a later non-partial command. Commands that merely
/// overlap are always kept, so nothing that might still show through is ever discarded.
#[derive(Debug, Default)]
pub struct CoalescingQueue {
    pending: Vec<Option<DrawCmd>>,
    dirty: Rect,
    tombstoned: usize,
}

impl CoalescingQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current dirty bounds (union of everything added since the last drain).
    pub fn dirty_bounds(&self) -> Rect {
        self.dirty
    }

    /// Tombstones in the current pending set.
    pub fn tombstoned(&self) -> usize {
        self.tombstoned
    }
}

impl PaintQueue for CoalescingQueue {
    fn add(&mut self, cmd: DrawCmd) {
        if cmd.is_flush() {
            tracing::warn!("flush sentinel passed to CoalescingQueue::add; ignoring");
            return;
        }

        let bounds = cmd.bounds();
        let first = self.pending.is_empty();
        if !first && !cmd.is_partial() && bounds.overlaps(self.dirty) {
            for slot in &mut self.pending {
                if slot.as_ref().is_some_and(|c| c.bounds().is_inside(bounds)) {
                    *slot = None;
                    self.tombstoned += 1;
                }
            }
        }

        self.pending.push(Some(cmd));
        self.dirty = if first { bounds } else { self.dirty.union(bounds) };
        tracing::trace!(
            ?bounds,
            pending = self.pending.len(),
            tombstoned = self.tombstoned,
            "queued draw command"
        );
    }

    fn drain(&mut self) -> Drained {
        self.tombstoned = 0;
        Drained {
            slots: std::mem::take(&mut self.pending),
            bounds: std::mem::take(&mut self.dirty),
        }
    }

    fn len(&self) -> usize {
        self.pending.len() - self.tombstoned
    }

    fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Queue that keeps every command. Paints the same pixels as [`CoalescingQueue`], only slower.
#[derive(Debug, Default)]
pub struct FifoQueue {
    pending: Vec<Option<DrawCmd>>,
    dirty: Rect,
}

impl FifoQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PaintQueue for FifoQueue {
    fn add(&mut self, cmd: DrawCmd) {
        if cmd.is_flush() {
            return;
        }
        self.dirty = self.dirty.union(cmd.bounds());
        self.pending.push(Some(cmd));
    }

    fn drain(&mut self) -> Drained {
        Drained {
            slots: std::mem::take(&mut self.pending),
            bounds: std::mem::take(&mut self.dirty),
        }
    }

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Selects the [`PaintQueue`] a painter builds for itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QueueKind {
    /// [`CoalescingQueue`].
    #[default]
    Coalescing,
    /// [`FifoQueue`].
    Fifo,
}

impl QueueKind {
    /// Construct the queue.
    pub fn build(self) -> Box<dyn PaintQueue + Send> {
        match self {
            Self::Coalescing => Box::new(CoalescingQueue::new()),
            Self::Fifo => Box::new(FifoQueue::new()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/queue.rs"]
mod tests;
