//! Core geometry types for the layout engine

use crate::node::Node;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Position of a node as given in the input
    pub fn of(node: &Node) -> Self {
        Self::new(node.x, node.y)
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A bounding box representing the spatial extent of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-sized box at a point
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    /// Smallest box containing all points, or `None` for an empty iterator
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::at(first), |bb, p| bb.expand_to_include(p)))
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Expand this bounding box to include a point
    pub fn expand_to_include(&self, point: Point) -> BoundingBox {
        let x = self.x.min(point.x);
        let y = self.y.min(point.y);
        let right = self.right().max(point.x);
        let bottom = self.bottom().max(point.y);
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

/// Horizontal side of the root a branch grows towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Side for the n-th child of the root: even indices go right
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Side::Right
        } else {
            Side::Left
        }
    }

    /// Sign applied to horizontal offsets
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_box() {
        let bb = BoundingBox::enclosing([
            Point::new(10.0, 5.0),
            Point::new(-30.0, 25.0),
            Point::new(0.0, -15.0),
        ])
        .unwrap();
        assert_eq!(bb, BoundingBox::new(-30.0, -15.0, 40.0, 40.0));
        assert_eq!(bb.center(), Point::new(-10.0, 5.0));
    }

    #[test]
    fn test_enclosing_empty() {
        assert!(BoundingBox::enclosing(Vec::new()).is_none());
    }

    #[test]
    fn test_side_alternates() {
        assert_eq!(Side::for_index(0), Side::Right);
        assert_eq!(Side::for_index(1), Side::Left);
        assert_eq!(Side::for_index(4).sign(), 1.0);
        assert_eq!(Side::for_index(7).sign(), -1.0);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
