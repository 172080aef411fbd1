use crate::foundation::error::{ConvertError, ConvertResult};

/// Integer pixel position in absolute canvas coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle, half-open: `[x0, x1) x [y0, y1)`.
///
/// A rectangle with `x0 >= x1` or `y0 >= y1` is empty. All empty rectangles
/// compare as empty through [`Rect::is_empty`], but keep their raw corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32, // exclusive
    pub y1: i32, // exclusive
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle of `width x height` pixels whose top-left corner sits at `origin`.
    pub fn from_origin_size(origin: Point, width: u32, height: u32) -> ConvertResult<Self> {
        let w = i32::try_from(width)
            .map_err(|_| ConvertError::validation("rect width does not fit in i32"))?;
        let h = i32::try_from(height)
            .map_err(|_| ConvertError::validation("rect height does not fit in i32"))?;
        let x1 = origin
            .x
            .checked_add(w)
            .ok_or_else(|| ConvertError::validation("rect x extent overflows"))?;
        let y1 = origin
            .y
            .checked_add(h)
            .ok_or_else(|| ConvertError::validation("rect y extent overflows"))?;
        Ok(Self::new(origin.x, origin.y, x1, y1))
    }

    pub fn min(self) -> Point {
        Point::new(self.x0, self.y0)
    }

    pub fn width(self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.x1 - self.x0) as u32
        }
    }

    pub fn height(self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.y1 - self.y0) as u32
        }
    }

    pub fn area(self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn is_empty(self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn contains(self, p: Point) -> bool {
        self.x0 <= p.x && p.x < self.x1 && self.y0 <= p.y && p.y < self.y1
    }

    pub fn contains_rect(self, other: Rect) -> bool {
        other.is_empty()
            || (self.x0 <= other.x0
                && other.x1 <= self.x1
                && self.y0 <= other.y0
                && other.y1 <= self.y1)
    }

    /// Smallest rectangle covering both. Empty operands are ignored.
    pub fn union(self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Overlap of both rectangles; [`Rect::default`] when they are disjoint.
    pub fn intersect(self, other: Rect) -> Rect {
        let r = Rect::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        );
        if r.is_empty() { Rect::default() } else { r }
    }
}
