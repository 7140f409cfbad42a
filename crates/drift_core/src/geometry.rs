//! Core geometry types
//!
//! Coordinates are CSS pixels. Element rects live in document space; the
//! viewport is a rect at `(0, scroll_y)` of the viewport's size.

use serde::{Deserialize, Serialize};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Centre point of a box of this size anchored at the origin
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }
}

impl From<Size> for Rect {
    /// Convert Size to Rect at origin (0, 0)
    fn from(size: Size) -> Self {
        Rect {
            origin: Point::ZERO,
            size,
        }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn area(&self) -> f32 {
        self.size.area()
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }

    /// Grow (positive) or shrink (negative) each edge independently
    pub fn expand(&self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Rect::new(
            self.origin.x - left,
            self.origin.y - top,
            (self.size.width + left + right).max(0.0),
            (self.size.height + top + bottom).max(0.0),
        )
    }

    /// Overlapping region, `None` when the rects are disjoint.
    ///
    /// Edge-adjacent rects produce a zero-area intersection rather than `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x().max(other.x());
        let top = self.y().max(other.y());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Fraction of this rect's area covered by `root`, in `[0, 1]`.
    ///
    /// A zero-area rect counts as fully covered when it touches `root`.
    pub fn visible_ratio(&self, root: &Rect) -> f32 {
        let Some(overlap) = self.intersection(root) else {
            return 0.0;
        };
        let area = self.area();
        if area <= 0.0 {
            return 1.0;
        }
        (overlap.area() / area).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert_eq!(a.intersection(&b), None);
        assert_eq!(a.visible_ratio(&b), 0.0);
    }

    #[test]
    fn test_visible_ratio_partial() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        let element = Rect::new(0.0, 80.0, 100.0, 40.0);
        assert!((element.visible_ratio(&viewport) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_expand_negative_bottom() {
        let viewport = Rect::new(0.0, 0.0, 100.0, 200.0);
        let shrunk = viewport.expand(0.0, 0.0, -20.0, 0.0);
        assert_eq!(shrunk, Rect::new(0.0, 0.0, 100.0, 180.0));
    }

    #[test]
    fn test_zero_area_touching() {
        let root = Rect::new(0.0, 0.0, 100.0, 100.0);
        let line = Rect::new(10.0, 100.0, 0.0, 0.0);
        assert_eq!(line.visible_ratio(&root), 1.0);
    }
}
