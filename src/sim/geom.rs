//! Axis-aligned geometry for the rectangular field
//!
//! Everything is integer math on screen coordinates: x grows rightward,
//! y grows downward, so "up" is negative y. Blocks, the paddle hit-box,
//! the walls and the field itself are all [`Rect`]s; balls and alpha
//! particles are [`Circle`]s.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Strict corner ordering: `a` lies up-and-left of `b`.
///
/// Used to validate rectangle corners and the field bound.
#[inline]
pub fn up_and_left_from(a: IVec2, b: IVec2) -> bool {
    a.x < b.x && a.y < b.y
}

/// One of the four canonical axis directions.
///
/// Collision checks tag the overlapped side of a rect with the direction a
/// particle must be moving in for the contact to count, i.e. the direction
/// pointing from the side into the rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

impl Dir {
    /// Unit vector for this direction (y axis points down).
    #[inline]
    pub fn unit(self) -> IVec2 {
        match self {
            Dir::Left => IVec2::new(-1, 0),
            Dir::Right => IVec2::new(1, 0),
            Dir::Up => IVec2::new(0, -1),
            Dir::Down => IVec2::new(0, 1),
        }
    }

    /// Reflect a velocity across this axis: `Left`/`Right` negate the x
    /// component, `Up`/`Down` negate the y component.
    #[inline]
    pub fn mirror(self, v: IVec2) -> IVec2 {
        match self {
            Dir::Left | Dir::Right => IVec2::new(-v.x, v.y),
            Dir::Up | Dir::Down => IVec2::new(v.x, -v.y),
        }
    }
}

/// A circular extent: center point plus diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    pub center: IVec2,
    /// Diameter in field units, always positive.
    pub diameter: i32,
}

impl Circle {
    pub fn new(center: IVec2, diameter: i32) -> Self {
        debug_assert!(diameter > 0);
        Self { center, diameter }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.diameter / 2
    }

    /// Same circle translated by `v`.
    #[inline]
    pub fn translated(&self, v: IVec2) -> Self {
        Self {
            center: self.center + v,
            diameter: self.diameter,
        }
    }

    /// Lowest point of the circle (largest y).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.center.y + self.radius()
    }
}

/// An axis-aligned rectangle, top-left corner strictly up-and-left of the
/// bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub top_left: IVec2,
    pub bottom_right: IVec2,
}

impl Rect {
    pub fn new(top_left: IVec2, bottom_right: IVec2) -> Self {
        debug_assert!(up_and_left_from(top_left, bottom_right));
        Self {
            top_left,
            bottom_right,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom_right.y - self.top_left.y
    }

    /// Whether the whole circle (by radius) lies inside this rect.
    pub fn contains(&self, c: &Circle) -> bool {
        let r = c.radius();
        c.center.x - r >= self.top_left.x
            && c.center.x + r <= self.bottom_right.x
            && c.center.y - r >= self.top_left.y
            && c.center.y + r <= self.bottom_right.y
    }

    /// Whether another rect lies entirely inside this one.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.top_left.x >= self.top_left.x
            && other.top_left.y >= self.top_left.y
            && other.bottom_right.x <= self.bottom_right.x
            && other.bottom_right.y <= self.bottom_right.y
    }

    /// Determine which side of this rect the circle overlaps, if any.
    ///
    /// The left and right sides are only tested while the circle's center y
    /// is strictly between the rect's vertical bounds; the top and bottom
    /// sides only while its center x is strictly between the horizontal
    /// bounds. A side is overlapped when the center's perpendicular distance
    /// to it is at most the radius. Sides are tested left, right, top,
    /// bottom and the first match wins, so a circle at a corner resolves to
    /// whichever test fires first - callers rely on this exact order.
    ///
    /// The returned direction points into the rect: a particle with
    /// `velocity.dot(dir.unit()) > 0` is moving toward the overlapped side.
    pub fn collide_with(&self, c: &Circle) -> Option<Dir> {
        let r = c.radius();
        let p = c.center;
        if p.y > self.top_left.y && p.y < self.bottom_right.y {
            if (self.top_left.x - p.x).abs() <= r {
                return Some(Dir::Right); // left side
            }
            if (self.bottom_right.x - p.x).abs() <= r {
                return Some(Dir::Left); // right side
            }
        } else if p.x > self.top_left.x && p.x < self.bottom_right.x {
            if (self.top_left.y - p.y).abs() <= r {
                return Some(Dir::Down); // top side
            }
            if (self.bottom_right.y - p.y).abs() <= r {
                return Some(Dir::Up); // bottom side
            }
        }
        None
    }

    /// Clamp the circle's center so the whole circle stays inside this rect.
    ///
    /// Applied after movement to undo boundary overshoot.
    pub fn constrain(&self, c: &Circle) -> Circle {
        let r = c.radius();
        let x = c
            .center
            .x
            .max(self.top_left.x + r)
            .min(self.bottom_right.x - r);
        let y = c
            .center
            .y
            .max(self.top_left.y + r)
            .min(self.bottom_right.y - r);
        Circle {
            center: IVec2::new(x, y),
            diameter: c.diameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_axes() {
        let v = IVec2::new(3, -4);
        assert_eq!(Dir::Left.mirror(v), IVec2::new(-3, -4));
        assert_eq!(Dir::Right.mirror(v), IVec2::new(-3, -4));
        assert_eq!(Dir::Up.mirror(v), IVec2::new(3, 4));
        assert_eq!(Dir::Down.mirror(v), IVec2::new(3, 4));
    }

    #[test]
    fn test_collide_with_left_side() {
        // Circle center (0,5) r=1 against rect (1,1)-(3,8): overlaps the
        // left side, approach direction is Right.
        let rect = Rect::new(IVec2::new(1, 1), IVec2::new(3, 8));
        let c = Circle::new(IVec2::new(0, 5), 2);
        assert_eq!(rect.collide_with(&c), Some(Dir::Right));
    }

    #[test]
    fn test_collide_with_top_and_bottom() {
        let rect = Rect::new(IVec2::new(10, 10), IVec2::new(30, 20));
        // Above the top side, x within span
        let above = Circle::new(IVec2::new(20, 8), 6);
        assert_eq!(rect.collide_with(&above), Some(Dir::Down));
        // Below the bottom side
        let below = Circle::new(IVec2::new(20, 22), 6);
        assert_eq!(rect.collide_with(&below), Some(Dir::Up));
    }

    #[test]
    fn test_collide_with_requires_span() {
        let rect = Rect::new(IVec2::new(10, 10), IVec2::new(30, 20));
        // Close to the left side but y exactly on the top bound: the strict
        // span test excludes it, and x is outside the horizontal span too.
        let corner = Circle::new(IVec2::new(9, 10), 4);
        assert_eq!(rect.collide_with(&corner), None);
        // Too far away from every side
        let far = Circle::new(IVec2::new(0, 15), 2);
        assert_eq!(rect.collide_with(&far), None);
    }

    #[test]
    fn test_contains_circle() {
        let rect = Rect::new(IVec2::new(0, 0), IVec2::new(100, 100));
        assert!(rect.contains(&Circle::new(IVec2::new(50, 50), 20)));
        assert!(rect.contains(&Circle::new(IVec2::new(10, 10), 20)));
        // Sticks out past the left bound
        assert!(!rect.contains(&Circle::new(IVec2::new(5, 50), 20)));
    }

    #[test]
    fn test_constrain_clamps_center() {
        let rect = Rect::new(IVec2::new(0, 0), IVec2::new(100, 100));
        let c = Circle::new(IVec2::new(-20, 150), 10);
        let clamped = rect.constrain(&c);
        assert_eq!(clamped.center, IVec2::new(5, 95));
        assert_eq!(clamped.diameter, 10);
        assert!(rect.contains(&clamped));
        // Already inside: unchanged
        let inside = Circle::new(IVec2::new(40, 40), 10);
        assert_eq!(rect.constrain(&inside), inside);
    }

    #[test]
    fn test_up_and_left_is_strict() {
        assert!(up_and_left_from(IVec2::new(0, 0), IVec2::new(1, 1)));
        assert!(!up_and_left_from(IVec2::new(0, 0), IVec2::new(0, 1)));
        assert!(!up_and_left_from(IVec2::new(2, 0), IVec2::new(1, 1)));
    }
}
