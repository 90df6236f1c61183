use super::{scale_point, Cached, PointShape, SegmentShape, ShapeKind, Transform};
use crate::collidable::{Collidable, ShapeRef};
use crate::kernel::{rect_contains_test, rect_crosses_test, rect_overlap_test, rect_point_test, rect_seg_query};
use crate::{BoundingBox, CollisionError, Fp, Precedence, Vec2};

/// An axis-aligned rectangle anchored at its top-left corner.
///
/// The center and the corners are cached until the rectangle moves or resizes. The
/// representation cannot express a rotated rectangle, so rotation always fails.
#[derive(Debug, Clone)]
pub struct RectShape {
    rect: BoundingBox,
    /// Center and corners, clockwise from the top-left.
    derived: Cached<(Vec2, [Vec2; 4])>,
}

impl RectShape {
    #[inline]
    pub fn new(x: Fp, y: Fp, w: Fp, h: Fp) -> RectShape {
        RectShape::from_box(BoundingBox::new(x, y, w, h))
    }
    #[inline]
    pub fn from_box(rect: BoundingBox) -> RectShape {
        RectShape { rect: BoundingBox::new(rect.x, rect.y, rect.w, rect.h), derived: Cached::new() }
    }
    #[inline]
    pub fn from_vecs(pos: Vec2, size: Vec2) -> RectShape {
        RectShape::new(pos.x, pos.y, size.x, size.y)
    }
    pub fn from_args(args: &[Fp]) -> Result<RectShape, CollisionError> {
        //! `[]` is empty at the origin, `[s]` an `s`-square at the origin, `[w, h]` a `w*h`
        //! rectangle at the origin, `[x, y, s]` an `s`-square at `(x, y)` and `[x, y, w, h]` is
        //! fully specified.
        match *args {
            [] => Ok(RectShape::new(0.0, 0.0, 0.0, 0.0)),
            [s] => Ok(RectShape::new(0.0, 0.0, s, s)),
            [w, h] => Ok(RectShape::new(0.0, 0.0, w, h)),
            [x, y, s] => Ok(RectShape::new(x, y, s, s)),
            [x, y, w, h] => Ok(RectShape::new(x, y, w, h)),
            _ => Err(CollisionError::InvalidArgument { kind: ShapeKind::Rect, count: args.len() }),
        }
    }

    #[inline]
    pub fn x(&self) -> Fp {
        self.rect.x
    }
    #[inline]
    pub fn y(&self) -> Fp {
        self.rect.y
    }
    #[inline]
    pub fn w(&self) -> Fp {
        self.rect.w
    }
    #[inline]
    pub fn h(&self) -> Fp {
        self.rect.h
    }
    #[inline]
    pub fn as_box(&self) -> &BoundingBox {
        &self.rect
    }

    pub fn set_size(&mut self, w: Fp, h: Fp) {
        self.rect = BoundingBox::new(self.rect.x, self.rect.y, w, h);
        self.derived.invalidate();
    }

    #[inline]
    fn derived(&self) -> (Vec2, [Vec2; 4]) {
        let rect = self.rect;
        self.derived.get(|| (rect.center(), rect.corners()))
    }
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.derived().0
    }
    #[inline]
    pub fn corners(&self) -> [Vec2; 4] {
        //! Clockwise from the top-left.
        self.derived().1
    }
    #[inline]
    pub fn area(&self) -> Fp {
        self.rect.w * self.rect.h
    }
    #[inline]
    pub fn perimeter(&self) -> Fp {
        2.0 * (self.rect.w + self.rect.h)
    }

    // ---------- Pairwise tests ---------- //

    #[inline]
    pub fn point_test(&self, p: &PointShape) -> bool {
        rect_point_test(&self.rect, p.pos)
    }
    #[inline]
    pub fn seg_query(&self, seg: &SegmentShape) -> Vec<Vec2> {
        //! Returns every point at which the segment crosses the rectangle's outline.
        rect_seg_query(&self.rect, seg.start(), seg.end())
    }
    pub fn seg_test(&self, seg: &SegmentShape) -> bool {
        //! Returns whether the segment crosses the outline or lies inside the rectangle.
        rect_point_test(&self.rect, seg.start()) || !self.seg_query(seg).is_empty()
    }
    #[inline]
    pub fn rect_test(&self, other: &RectShape) -> bool {
        rect_overlap_test(&self.rect, &other.rect)
    }
    #[inline]
    pub fn contains(&self, other: &RectShape) -> bool {
        //! Returns whether `other` is strictly inside `self`.
        rect_contains_test(&self.rect, &other.rect)
    }
    #[inline]
    pub fn crosses(&self, other: &RectShape) -> bool {
        rect_crosses_test(&self.rect, &other.rect)
    }
}

impl PartialEq for RectShape {
    fn eq(&self, other: &RectShape) -> bool {
        self.rect == other.rect
    }
}

impl Collidable for RectShape {
    #[inline]
    fn precedence(&self) -> Precedence {
        Precedence::RECT
    }
    #[inline]
    fn bounding_box(&self) -> BoundingBox {
        self.rect
    }
    #[inline]
    fn shape(&self) -> ShapeRef<'_> {
        ShapeRef::Rect(self)
    }
}

impl Transform for RectShape {
    #[inline]
    fn position(&self) -> Vec2 {
        self.rect.min()
    }
    fn set_position(&mut self, pos: Vec2) {
        self.rect.x = pos.x;
        self.rect.y = pos.y;
        self.derived.invalidate();
    }
    fn scale_about(&mut self, factor: Fp, origin: Vec2) {
        // a negative factor mirrors the corners, so the box is rebuilt from both of them
        let min = scale_point(self.rect.min(), factor, origin);
        let max = scale_point(self.rect.max(), factor, origin);
        self.rect = BoundingBox::from_points(min, max);
        self.derived.invalidate();
    }
    fn rotate_about(&mut self, _angle: Fp, _origin: Vec2) -> Result<(), CollisionError> {
        Err(CollisionError::UnsupportedOperation { kind: ShapeKind::Rect, op: "rotation" })
    }
}
