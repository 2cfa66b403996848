use crate::foundation::error::{PaintError, PaintResult};

/// Integer pixel coordinate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Shorthand constructor.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise offset.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Half-open integer rectangle `[x0, x1) x [y0, y1)`.
///
/// Any rectangle with `x0 >= x1` or `y0 >= y1` is empty. Empty rectangles are absorbed by
/// [`Rect::union`] and are inside every other rectangle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rect {
    /// Inclusive left edge.
    pub x0: i32,
    /// Inclusive top edge.
    pub y0: i32,
    /// Exclusive right edge.
    pub x1: i32,
    /// Exclusive bottom edge.
    pub y1: i32,
}

impl Rect {
    /// The canonical empty rectangle.
    pub const ZERO: Self = Self {
        x0: 0,
        y0: 0,
        x1: 0,
        y1: 0,
    };

    /// Construct from edges, swapping them if given out of order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, clamp_dim(width), clamp_dim(height))
    }

    /// Minimal rectangle covering every point, treating each point as a 1x1 pixel.
    ///
    /// Fails on an empty slice and on a point at `i32::MAX`, whose exclusive edge does not fit.
    pub fn covering(points: &[Point]) -> PaintResult<Self> {
        let (first, rest) = points
            .split_first()
            .ok_or_else(|| PaintError::validation("cannot compute bounds of an empty point set"))?;

        let mut r = Self::pixel(*first)?;
        for &p in rest {
            r = r.union(Self::pixel(p)?);
        }
        Ok(r)
    }

    fn pixel(p: Point) -> PaintResult<Self> {
        match (p.x.checked_add(1), p.y.checked_add(1)) {
            (Some(x1), Some(y1)) => Ok(Self {
                x0: p.x,
                y0: p.y,
                x1,
                y1,
            }),
            _ => Err(PaintError::validation("point at i32::MAX has no exclusive edge")),
        }
    }

    /// Top-left corner.
    pub fn min(self) -> Point {
        Point::new(self.x0, self.y0)
    }

    /// Exclusive bottom-right corner.
    pub fn max(self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Width in pixels (0 for inverted spans).
    pub fn width(self) -> u32 {
        self.x1.saturating_sub(self.x0).max(0) as u32
    }

    /// Height in pixels (0 for inverted spans).
    pub fn height(self) -> u32 {
        self.y1.saturating_sub(self.y0).max(0) as u32
    }

    /// Number of pixels covered.
    pub fn area(self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Smallest rectangle containing both. Empty operands are ignored.
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Overlapping region, or [`Rect::ZERO`] when the two do not overlap.
    pub fn intersect(self, other: Self) -> Self {
        let r = Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if r.is_empty() { Self::ZERO } else { r }
    }

    /// Return `true` when both are non-empty and share at least one pixel.
    pub fn overlaps(self, other: Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x0 < other.x1
            && other.x0 < self.x1
            && self.y0 < other.y1
            && other.y0 < self.y1
    }

    /// Return `true` when every pixel of `self` lies within `outer`.
    ///
    /// An empty rectangle is inside everything.
    pub fn is_inside(self, outer: Self) -> bool {
        if self.is_empty() {
            return true;
        }
        outer.x0 <= self.x0 && self.x1 <= outer.x1 && outer.y0 <= self.y0 && self.y1 <= outer.y1
    }

    /// Return `true` when `inner` lies entirely within `self`.
    pub fn contains_rect(self, inner: Self) -> bool {
        inner.is_inside(self)
    }

    /// Return `true` when the pixel at `p` is covered.
    pub fn contains_point(self, p: Point) -> bool {
        self.x0 <= p.x && p.x < self.x1 && self.y0 <= p.y && p.y < self.y1
    }

    /// Shift by `(dx, dy)`.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    /// Split along the horizontal line `y` into `(top, bottom)`.
    ///
    /// A line outside the rectangle leaves it whole on one side and [`Rect::ZERO`] on the other.
    pub fn split_h(self, y: i32) -> (Self, Self) {
        if y <= self.y0 {
            (Self::ZERO, self)
        } else if y >= self.y1 {
            (self, Self::ZERO)
        } else {
            (Self { y1: y, ..self }, Self { y0: y, ..self })
        }
    }

    /// Split along the vertical line `x` into `(left, right)`.
    pub fn split_v(self, x: i32) -> (Self, Self) {
        if x <= self.x0 {
            (Self::ZERO, self)
        } else if x >= self.x1 {
            (self, Self::ZERO)
        } else {
            (Self { x1: x, ..self }, Self { x0: x, ..self })
        }
    }
}

fn clamp_dim(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque black.
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Convert back to straight alpha. Transparent pixels become all zero.
    pub fn to_straight_rgba(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let unpremul = |c: u8| -> u8 {
            let v = (u32::from(c) * 255 + u32::from(self.a) / 2) / u32::from(self.a);
            v.min(255) as u8
        };
        [unpremul(self.r), unpremul(self.g), unpremul(self.b), self.a]
    }

    /// Raw channel array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Inverse of [`Rgba8Premul::to_array`].
    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }

    /// Return `true` when alpha is 255.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
