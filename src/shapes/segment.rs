use super::{rotate_point, scale_point, Cached, PointShape, ShapeKind, Transform};
use crate::collidable::{Collidable, ShapeRef};
use crate::kernel::{collinear_overlap_test, point_on_seg, points_equal, seg_seg_query};
use crate::{BoundingBox, CollisionError, Fp, Precedence, Vec2};

/// A line segment between two endpoints. Its length is cached until an endpoint moves.
#[derive(Debug, Clone)]
pub struct SegmentShape {
    start: Vec2,
    end: Vec2,
    length: Cached<Fp>,
}

impl SegmentShape {
    pub fn new(x1: Fp, y1: Fp, x2: Fp, y2: Fp) -> SegmentShape {
        SegmentShape::from_vecs(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }
    pub fn from_vecs(start: Vec2, end: Vec2) -> SegmentShape {
        SegmentShape { start, end, length: Cached::new() }
    }
    pub fn from_args(args: &[Fp]) -> Result<SegmentShape, CollisionError> {
        //! `[]` collapses on the origin, `[v]` runs from the origin to `(v, v)`, `[x, y]` from
        //! the origin to `(x, y)`, `[x, y, len]` from `(x, y)` along +x for `len`, and
        //! `[x1, y1, x2, y2]` is fully specified.
        match *args {
            [] => Ok(SegmentShape::new(0.0, 0.0, 0.0, 0.0)),
            [v] => Ok(SegmentShape::new(0.0, 0.0, v, v)),
            [x, y] => Ok(SegmentShape::new(0.0, 0.0, x, y)),
            [x, y, len] => Ok(SegmentShape::new(x, y, x + len, y)),
            [x1, y1, x2, y2] => Ok(SegmentShape::new(x1, y1, x2, y2)),
            _ => Err(CollisionError::InvalidArgument { kind: ShapeKind::Segment, count: args.len() }),
        }
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }
    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }
    pub fn set_start(&mut self, start: Vec2) {
        self.start = start;
        self.length.invalidate();
    }
    pub fn set_end(&mut self, end: Vec2) {
        self.end = end;
        self.length.invalidate();
    }
    pub fn set_endpoints(&mut self, start: Vec2, end: Vec2) {
        self.start = start;
        self.end = end;
        self.length.invalidate();
    }

    #[inline]
    pub fn length(&self) -> Fp {
        let (start, end) = (self.start, self.end);
        self.length.get(|| (end - start).length())
    }
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        points_equal(self.start, self.end)
    }

    // ---------- Pairwise tests ---------- //

    #[inline]
    pub fn point_test(&self, p: &PointShape) -> bool {
        //! Returns whether the point lies on the segment.
        point_on_seg(p.pos, self.start, self.end)
    }
    pub fn seg_query(&self, other: &SegmentShape) -> Option<Vec2> {
        //! Returns the unique crossing point of two segments. A zero-length segment reports
        //! its own location if it lies on the other.
        match (self.is_degenerate(), other.is_degenerate()) {
            (true, true) => Some(self.start).filter(|&p| points_equal(p, other.start)),
            (true, false) => Some(self.start).filter(|&p| point_on_seg(p, other.start, other.end)),
            (false, true) => Some(other.start).filter(|&p| point_on_seg(p, self.start, self.end)),
            (false, false) => seg_seg_query(self.start, self.end, other.start, other.end),
        }
    }
    pub fn seg_test(&self, other: &SegmentShape) -> bool {
        //! Returns whether the segments share any point, collinear overlaps included.
        self.seg_query(other).is_some() || collinear_overlap_test(self.start, self.end, other.start, other.end)
    }
}

impl PartialEq for SegmentShape {
    fn eq(&self, other: &SegmentShape) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Collidable for SegmentShape {
    #[inline]
    fn precedence(&self) -> Precedence {
        Precedence::SEGMENT
    }
    #[inline]
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.start, self.end)
    }
    #[inline]
    fn shape(&self) -> ShapeRef<'_> {
        ShapeRef::Segment(self)
    }
}

impl Transform for SegmentShape {
    #[inline]
    fn position(&self) -> Vec2 {
        self.start
    }
    fn set_position(&mut self, pos: Vec2) {
        //! Moves the start to `pos`, keeping the segment's direction and length.
        let delta = pos - self.start;
        self.set_endpoints(pos, self.end + delta);
    }
    fn scale_about(&mut self, factor: Fp, origin: Vec2) {
        self.set_endpoints(scale_point(self.start, factor, origin), scale_point(self.end, factor, origin));
    }
    fn rotate_about(&mut self, angle: Fp, origin: Vec2) -> Result<(), CollisionError> {
        self.set_endpoints(rotate_point(self.start, angle, origin), rotate_point(self.end, angle, origin));
        Ok(())
    }
}
