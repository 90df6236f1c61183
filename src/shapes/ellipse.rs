use super::{rotate_point, scale_point, Cached, PointShape, RectShape, SegmentShape, ShapeKind, Transform};
use crate::collidable::{Collidable, ShapeRef};
use crate::kernel::ellipse::{
    ellipse_perimeter, ellipse_point_test, ellipse_rect_overlap_test, ellipse_seg_overlap_test, ellipse_seg_query,
    is_degenerate, limiting_segment,
};
use crate::kernel::seg_seg_query;
use crate::{BoundingBox, CollisionError, Fp, Precedence, Vec2, EPSILON};
use std::f64::consts::PI;

/// An axis-aligned ellipse given by its center and semi-axes `a` (x) and `b` (y).
///
/// The perimeter has no closed form and is approximated once per size change. Axis-aligned
/// ellipses cannot express rotated axes, so only circles can be rotated.
#[derive(Debug, Clone)]
pub struct EllipseShape {
    center: Vec2,
    a: Fp,
    b: Fp,
    perimeter: Cached<Fp>,
}

impl EllipseShape {
    pub fn new(x: Fp, y: Fp, a: Fp, b: Fp) -> EllipseShape {
        EllipseShape { center: Vec2::new(x, y), a: a.abs(), b: b.abs(), perimeter: Cached::new() }
    }
    #[inline]
    pub fn circle(x: Fp, y: Fp, rad: Fp) -> EllipseShape {
        EllipseShape::new(x, y, rad, rad)
    }
    #[inline]
    pub fn from_vecs(center: Vec2, axes: Vec2) -> EllipseShape {
        EllipseShape::new(center.x, center.y, axes.x, axes.y)
    }
    pub fn from_args(args: &[Fp]) -> Result<EllipseShape, CollisionError> {
        //! `[]` collapses on the origin, `[r]` is a circle at the origin, `[a, b]` an ellipse at
        //! the origin, `[x, y, r]` a circle at `(x, y)` and `[x, y, a, b]` is fully specified.
        match *args {
            [] => Ok(EllipseShape::new(0.0, 0.0, 0.0, 0.0)),
            [r] => Ok(EllipseShape::circle(0.0, 0.0, r)),
            [a, b] => Ok(EllipseShape::new(0.0, 0.0, a, b)),
            [x, y, r] => Ok(EllipseShape::circle(x, y, r)),
            [x, y, a, b] => Ok(EllipseShape::new(x, y, a, b)),
            _ => Err(CollisionError::InvalidArgument { kind: ShapeKind::Ellipse, count: args.len() }),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }
    #[inline]
    pub fn a(&self) -> Fp {
        self.a
    }
    #[inline]
    pub fn b(&self) -> Fp {
        self.b
    }
    pub fn set_axes(&mut self, a: Fp, b: Fp) {
        self.a = a.abs();
        self.b = b.abs();
        self.perimeter.invalidate();
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        self.a == self.b
    }
    #[inline]
    pub fn radius(&self) -> Option<Fp> {
        if self.is_circle() { Some(self.a) } else { None }
    }
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        is_degenerate(self.a, self.b)
    }

    #[inline]
    pub fn perimeter(&self) -> Fp {
        let (a, b) = (self.a, self.b);
        self.perimeter.get(|| ellipse_perimeter(a, b))
    }
    #[inline]
    pub fn area(&self) -> Fp {
        PI * self.a * self.b
    }

    // ---------- Pairwise tests ---------- //

    #[inline]
    pub fn point_test(&self, p: &PointShape) -> bool {
        ellipse_point_test(self.center, self.a, self.b, p.pos)
    }
    pub fn seg_query(&self, seg: &SegmentShape) -> Vec<Vec2> {
        //! Returns the 0-2 points where the segment crosses the outline. A degenerate ellipse
        //! reports where the segment crosses the segment it collapses to.
        if self.is_degenerate() {
            let (e1, e2) = limiting_segment(self.center, self.a, self.b);
            return seg_seg_query(e1, e2, seg.start(), seg.end()).into_iter().collect();
        }
        ellipse_seg_query(self.center, self.a, self.b, seg.start(), seg.end())
    }
    #[inline]
    pub fn seg_test(&self, seg: &SegmentShape) -> bool {
        //! Returns whether the segment crosses the outline or lies inside the ellipse.
        ellipse_seg_overlap_test(self.center, self.a, self.b, seg.start(), seg.end())
    }
    #[inline]
    pub fn rect_test(&self, rect: &RectShape) -> bool {
        ellipse_rect_overlap_test(self.center, self.a, self.b, rect.as_box())
    }
    pub fn ellipse_test(&self, other: &EllipseShape) -> Result<bool, CollisionError> {
        //! Circle pairs touch when the centers are no further apart than the sum of the radii.
        //! A degenerate side is tested as the segment or point it collapses to. Two proper
        //! non-circular ellipses are not supported.
        match (self.is_degenerate(), other.is_degenerate()) {
            (true, true) => return Ok(self.limit().seg_test(&other.limit())),
            (true, false) => return Ok(other.seg_test(&self.limit())),
            (false, true) => return Ok(self.seg_test(&other.limit())),
            (false, false) => (),
        }
        match (self.radius(), other.radius()) {
            (Some(r1), Some(r2)) => {
                let reach = r1 + r2;
                Ok((self.center - other.center).length_squared() <= reach * reach + EPSILON)
            }
            _ => Err(CollisionError::NotImplemented("intersection of non-circular ellipses")),
        }
    }

    #[inline]
    fn limit(&self) -> SegmentShape {
        let (s1, s2) = limiting_segment(self.center, self.a, self.b);
        SegmentShape::from_vecs(s1, s2)
    }
}

impl PartialEq for EllipseShape {
    fn eq(&self, other: &EllipseShape) -> bool {
        self.center == other.center && self.a == other.a && self.b == other.b
    }
}

impl Collidable for EllipseShape {
    #[inline]
    fn precedence(&self) -> Precedence {
        Precedence::ELLIPSE
    }
    #[inline]
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.center.x - self.a, self.center.y - self.b, 2.0 * self.a, 2.0 * self.b)
    }
    #[inline]
    fn shape(&self) -> ShapeRef<'_> {
        ShapeRef::Ellipse(self)
    }
}

impl Transform for EllipseShape {
    #[inline]
    fn position(&self) -> Vec2 {
        self.center
    }
    #[inline]
    fn set_position(&mut self, pos: Vec2) {
        self.center = pos;
    }
    fn scale_about(&mut self, factor: Fp, origin: Vec2) {
        self.center = scale_point(self.center, factor, origin);
        self.set_axes(self.a * factor, self.b * factor);
    }
    fn rotate_about(&mut self, angle: Fp, origin: Vec2) -> Result<(), CollisionError> {
        //! Moves the center of a circle around `origin`. Non-circular ellipses cannot rotate.
        if !self.is_circle() {
            return Err(CollisionError::UnsupportedOperation { kind: ShapeKind::Ellipse, op: "rotation" });
        }
        self.center = rotate_point(self.center, angle, origin);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn args() {
        assert_eq!(EllipseShape::from_args(&[]).unwrap(), EllipseShape::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(EllipseShape::from_args(&[2.0]).unwrap(), EllipseShape::circle(0.0, 0.0, 2.0));
        assert_eq!(EllipseShape::from_args(&[2.0, 1.0]).unwrap(), EllipseShape::new(0.0, 0.0, 2.0, 1.0));
        assert_eq!(EllipseShape::from_args(&[1.0, 1.0, 3.0]).unwrap(), EllipseShape::circle(1.0, 1.0, 3.0));
        assert_eq!(EllipseShape::from_args(&[1.0, 2.0, 3.0, 4.0]).unwrap(), EllipseShape::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            EllipseShape::from_args(&[0.0; 7]),
            Err(CollisionError::InvalidArgument { kind: ShapeKind::Ellipse, count: 7 })
        );
    }

    #[test]
    fn perimeter_cache_follows_size() {
        let mut e = EllipseShape::circle(0.0, 0.0, 1.0);
        assert_relative_eq!(e.perimeter(), 2.0 * PI);
        assert_eq!(e.perimeter(), e.perimeter());

        e.translate(Vec2::new(3.0, 3.0));
        assert_relative_eq!(e.perimeter(), 2.0 * PI);

        e.scale(2.0);
        assert_relative_eq!(e.perimeter(), 4.0 * PI);
        assert_eq!(e.center(), Vec2::new(3.0, 3.0));

        e.set_axes(0.0, 0.0);
        assert_eq!(e.perimeter(), 0.0);
    }

    #[test]
    fn rotation_needs_a_circle() {
        let mut c = EllipseShape::circle(2.0, 0.0, 1.0);
        c.rotate(1.0).unwrap();
        assert_eq!(c.center(), Vec2::new(2.0, 0.0));
        c.rotate_about(FRAC_PI_2, Vec2::new(0.0, 0.0)).unwrap();
        assert_relative_eq!(c.center().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.center().y, 2.0, epsilon = 1e-12);

        let mut e = EllipseShape::new(0.0, 0.0, 2.0, 1.0);
        assert_eq!(
            e.rotate(0.5),
            Err(CollisionError::UnsupportedOperation { kind: ShapeKind::Ellipse, op: "rotation" })
        );
        assert_eq!(e.center(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn bounding_box() {
        let e = EllipseShape::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(e.bounding_box(), BoundingBox::new(-2.0, -2.0, 6.0, 8.0));
    }

    #[test]
    fn pairwise() {
        let c = EllipseShape::circle(0.0, 0.0, 5.0);
        assert!(c.point_test(&PointShape::new(3.0, 3.0)));
        assert!(!c.point_test(&PointShape::new(4.0, 4.0)));

        let hits = c.seg_query(&SegmentShape::new(-10.0, 0.0, 10.0, 0.0));
        assert_eq!(hits, vec![Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0)]);
        assert!(c.seg_test(&SegmentShape::new(0.0, 0.0, 1.0, 1.0)));
        assert!(!c.seg_test(&SegmentShape::new(6.0, -6.0, 6.0, 6.0)));

        assert!(c.rect_test(&RectShape::new(4.0, -1.0, 5.0, 2.0)));
        assert!(!c.rect_test(&RectShape::new(4.0, 4.0, 2.0, 2.0)));

        assert_eq!(c.ellipse_test(&EllipseShape::circle(12.0, 0.0, 5.0)), Ok(false));
        assert_eq!(c.ellipse_test(&EllipseShape::circle(10.0, 0.0, 5.0)), Ok(true));
        assert!(matches!(
            c.ellipse_test(&EllipseShape::new(1.0, 0.0, 2.0, 3.0)),
            Err(CollisionError::NotImplemented(_))
        ));
    }

    #[test]
    fn zero_radius_is_a_point() {
        let dot = EllipseShape::circle(1.0, 1.0, 0.0);
        assert!(dot.point_test(&PointShape::new(1.0, 1.0)));
        assert!(!dot.point_test(&PointShape::new(1.0, 1.5)));
        assert!(dot.seg_test(&SegmentShape::new(0.0, 0.0, 2.0, 2.0)));
        assert_eq!(dot.seg_query(&SegmentShape::new(0.0, 0.0, 2.0, 2.0)), Vec::<Vec2>::new());
        assert!(!dot.seg_test(&SegmentShape::new(0.0, 1.0, 0.5, 1.0)));
        assert!(dot.rect_test(&RectShape::new(0.0, 0.0, 2.0, 2.0)));
    }

    #[test]
    fn degenerate_ellipse_pairs() {
        let wide = EllipseShape::new(0.0, 0.0, 4.0, 2.0);
        let dot = EllipseShape::circle(0.0, 0.0, 0.0);
        assert_eq!(dot.ellipse_test(&wide), Ok(true));
        assert_eq!(wide.ellipse_test(&dot), Ok(true));
        assert_eq!(EllipseShape::circle(3.9, 1.9, 0.0).ellipse_test(&wide), Ok(false));

        let flat = EllipseShape::new(0.0, 0.0, 3.0, 0.0);
        let unit = EllipseShape::circle(0.0, 0.0, 1.0);
        assert_eq!(flat.ellipse_test(&unit), Ok(true));
        assert_eq!(unit.ellipse_test(&flat), Ok(true));
        assert_eq!(EllipseShape::new(0.0, 3.0, 3.0, 0.0).ellipse_test(&unit), Ok(false));

        // both degenerate: segment against segment, or point
        let tall = EllipseShape::new(1.0, 0.0, 0.0, 2.0);
        assert_eq!(flat.ellipse_test(&tall), Ok(true));
        assert_eq!(tall.ellipse_test(&EllipseShape::new(5.0, 0.0, 1.0, 0.0)), Ok(false));
        assert_eq!(dot.ellipse_test(&flat), Ok(true));
        assert_eq!(flat.ellipse_test(&dot), Ok(true));
    }
}
