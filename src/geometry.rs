//! Shared geometry value types for the placement engine
//!
//! Coordinates are pixels in the canvas space of the base product photo,
//! with the origin at the photo's top-left corner.

use serde::{Deserialize, Serialize};

/// A 2D point in canvas pixel coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp the point into `[0, width] x [0, height]`
    pub fn clamped(&self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width),
            y: self.y.clamp(0.0, height),
        }
    }
}

/// One of the four draggable corner handles of an overlay box
///
/// The variant order matches the corner order used by [`Quad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Corner {
    /// Index of this corner in [`Quad::points`]
    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::BottomLeft => 1,
            Corner::TopRight => 2,
            Corner::BottomRight => 3,
        }
    }

    pub fn all() -> &'static [Corner] {
        &[
            Corner::TopLeft,
            Corner::BottomLeft,
            Corner::TopRight,
            Corner::BottomRight,
        ]
    }
}

/// An ordered quadrilateral
///
/// Corner order: top-left, bottom-left, top-right, bottom-right. The
/// homography solver matches source and destination points by position in
/// this array, so the order must be consistent between the two quads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quad {
    pub points: [Point; 4],
}

impl Quad {
    pub fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// The axis-aligned rectangle `[0, width] x [0, height]`
    pub fn from_rect(width: f64, height: f64) -> Self {
        Self {
            points: [
                Point::new(0.0, 0.0),
                Point::new(0.0, height),
                Point::new(width, 0.0),
                Point::new(width, height),
            ],
        }
    }

    pub fn corner(&self, corner: Corner) -> Point {
        self.points[corner.index()]
    }

    /// Copy of this quad with one corner replaced
    pub fn with_corner(&self, corner: Corner, point: Point) -> Self {
        let mut points = self.points;
        points[corner.index()] = point;
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rect_corner_order() {
        let quad = Quad::from_rect(640.0, 480.0);
        assert_eq!(quad.corner(Corner::TopLeft), Point::new(0.0, 0.0));
        assert_eq!(quad.corner(Corner::BottomLeft), Point::new(0.0, 480.0));
        assert_eq!(quad.corner(Corner::TopRight), Point::new(640.0, 0.0));
        assert_eq!(quad.corner(Corner::BottomRight), Point::new(640.0, 480.0));
    }

    #[test]
    fn test_with_corner_replaces_only_one_point() {
        let quad = Quad::from_rect(800.0, 800.0);
        let moved = quad.with_corner(Corner::TopRight, Point::new(700.0, 100.0));

        assert_eq!(moved.corner(Corner::TopRight), Point::new(700.0, 100.0));
        assert_eq!(moved.corner(Corner::TopLeft), quad.corner(Corner::TopLeft));
        assert_eq!(moved.corner(Corner::BottomLeft), quad.corner(Corner::BottomLeft));
        assert_eq!(moved.corner(Corner::BottomRight), quad.corner(Corner::BottomRight));
    }

    #[test]
    fn test_clamping() {
        let p = Point::new(900.0, -50.0).clamped(800.0, 600.0);
        assert_eq!(p, Point::new(800.0, 0.0));

        let inside = Point::new(123.0, 456.0).clamped(800.0, 600.0);
        assert_eq!(inside, Point::new(123.0, 456.0));
    }

    #[test]
    fn test_corner_indices_are_stable() {
        for (i, corner) in Corner::all().iter().enumerate() {
            assert_eq!(corner.index(), i);
        }
    }
}
