use rand::Rng;

use crate::foundation::core::{Point, Rgba8Premul};
use crate::worms::world::WorldConfig;

/// Compass heading, clockwise from north. Screen coordinates: north is `-y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Up.
    N,
    /// Up-right.
    NE,
    /// Right.
    E,
    /// Down-right.
    SE,
    /// Down.
    S,
    /// Down-left.
    SW,
    /// Left.
    W,
    /// Up-left.
    NW,
}

impl Direction {
    /// All headings in clockwise order.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    fn index(self) -> i32 {
        self as i32
    }

    fn from_index(i: i32) -> Self {
        Self::ALL[i.rem_euclid(8) as usize]
    }

    /// Horizontal step.
    pub fn dx(self) -> i32 {
        match self {
            Self::NE | Self::E | Self::SE => 1,
            Self::SW | Self::W | Self::NW => -1,
            Self::N | Self::S => 0,
        }
    }

    /// Vertical step.
    pub fn dy(self) -> i32 {
        match self {
            Self::NW | Self::N | Self::NE => -1,
            Self::SE | Self::S | Self::SW => 1,
            Self::E | Self::W => 0,
        }
    }

    /// One step from `p`.
    pub fn advance(self, p: Point) -> Point {
        p.offset(self.dx(), self.dy())
    }

    /// Mirror across a vertical wall.
    pub fn reflect_x(self) -> Self {
        match self {
            Self::N | Self::S => self,
            other => Self::from_index(8 - other.index()),
        }
    }

    /// Mirror across a horizontal wall.
    pub fn reflect_y(self) -> Self {
        match self {
            Self::E | Self::W => self,
            other => Self::from_index(4 - other.index()),
        }
    }

    /// Rotate by `way` eighths of a turn (positive is clockwise).
    pub fn turn(self, way: i32) -> Self {
        Self::from_index(self.index() + way)
    }
}

/// A fixed-length chain of points that crawls around the world.
///
/// Points live in a ring buffer: once the worm reaches full length, each move overwrites the
/// tail with the new head.
#[derive(Clone, Debug)]
pub struct Worm {
    pts: Vec<Point>,
    len: usize,
    tail: usize,
    dir: Direction,
}

impl Worm {
    /// One-point worm at `start`, growing to `len` points as it moves.
    pub fn new(start: Point, len: usize, dir: Direction) -> Self {
        let len = len.max(1);
        let mut pts = Vec::with_capacity(len);
        pts.push(start);
        Self {
            pts,
            len,
            tail: 0,
            dir,
        }
    }

    /// Fully grown worm at a random place, length and heading.
    pub fn random(world: &WorldConfig, rng: &mut impl Rng) -> Self {
        let len = rng.gen_range(world.min_len..=world.max_len);
        let dir = Direction::ALL[rng.gen_range(0..8)];
        let mut worm = Self::new(world.random_point(rng), len, dir);
        while worm.pts.len() < worm.len {
            worm.advance(world);
            worm.turn(rng.gen_range(-1..=1));
        }
        worm
    }

    /// Current heading.
    pub fn direction(&self) -> Direction {
        self.dir
    }

    /// Newest point.
    pub fn head(&self) -> Point {
        let n = self.pts.len();
        self.pts[(self.tail + n - 1) % n]
    }

    /// Move one step, bouncing off the world edges.
    pub fn advance(&mut self, world: &WorldConfig) {
        let head = self.head();
        let slot = if self.pts.len() < self.len {
            self.pts.push(head);
            self.pts.len() - 1
        } else {
            let slot = self.tail;
            self.tail = (self.tail + 1) % self.pts.len();
            slot
        };

        let b = world.bounds();
        let mut next = self.dir.advance(head);
        let mut bounced = false;
        if !(b.x0..b.x1).contains(&next.x) {
            self.dir = self.dir.reflect_x();
            bounced = true;
        }
        if !(b.y0..b.y1).contains(&next.y) {
            self.dir = self.dir.reflect_y();
            bounced = true;
        }
        if bounced {
            next = self.dir.advance(head);
        }
        self.pts[slot] = next;
    }

    /// Change heading by `way` eighths of a turn.
    pub fn turn(&mut self, way: i32) {
        self.dir = self.dir.turn(way);
    }

    /// Copy of the points, tail first.
    pub fn points(&self) -> Vec<Point> {
        let (head_side, tail_side) = self.pts.split_at(self.tail);
        tail_side.iter().chain(head_side).copied().collect()
    }
}

/// Translucent greyish colour: each of the low three `bits` pushes one channel away from grey.
pub fn random_colour(rng: &mut impl Rng) -> Rgba8Premul {
    let bits: u32 = rng.gen_range(1..=6);
    let mut c = [0x88u8; 3];
    for (i, ch) in c.iter_mut().enumerate() {
        if bits & (1 << i) != 0 {
            let delta = 0x33 * (2 * rng.gen_range(0..5) - 3);
            *ch = (i32::from(*ch) + delta).rem_euclid(256) as u8;
        }
    }
    Rgba8Premul::from_straight_rgba(c[0], c[1], c[2], 0x44)
}

#[cfg(test)]
#[path = "../../tests/unit/worms/worm.rs"]
mod tests;
