//! Conversion between a node's local space and root space.

use cranpose_ui_graphics::{Point, Rect, Size};

/// Coordinate conversion supplied by the tree that owns the node under test.
///
/// Gestures are written in the node's local space; the dispatcher only
/// works in root space.
pub trait CoordinateMapper {
    fn local_to_root(&self, local: Point) -> Point;

    fn root_to_local(&self, root: Point) -> Point;

    /// Size of the node in its local space.
    fn size(&self) -> Size;
}

/// Translation-only mapper for a node placed at `bounds` inside the root.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeTransform {
    bounds: Rect,
}

impl NodeTransform {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// A node that covers the whole root.
    pub fn covering(size: Size) -> Self {
        Self::new(Rect::from_size(size))
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl CoordinateMapper for NodeTransform {
    fn local_to_root(&self, local: Point) -> Point {
        local + self.bounds.origin()
    }

    fn root_to_local(&self, root: Point) -> Point {
        root - self.bounds.origin()
    }

    fn size(&self) -> Size {
        self.bounds.size()
    }
}

impl<M: CoordinateMapper + ?Sized> CoordinateMapper for &M {
    fn local_to_root(&self, local: Point) -> Point {
        (**self).local_to_root(local)
    }

    fn root_to_local(&self, root: Point) -> Point {
        (**self).root_to_local(root)
    }

    fn size(&self) -> Size {
        (**self).size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_by_node_origin() {
        let node = NodeTransform::new(Rect::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(node.local_to_root(Point::new(1.0, 2.0)), Point::new(11.0, 22.0));
        assert_eq!(node.root_to_local(Point::new(11.0, 22.0)), Point::new(1.0, 2.0));
        assert_eq!(node.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn covering_node_is_identity() {
        let node = NodeTransform::covering(Size::new(80.0, 60.0));
        let point = Point::new(33.0, 44.0);
        assert_eq!(node.local_to_root(point), point);
        assert_eq!(node.root_to_local(point), point);
    }
}
