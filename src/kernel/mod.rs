//! Stateless geometry kernel operating on raw coordinates.
//!
//! Every function is deterministic and tolerates degenerate input (zero-length lines,
//! zero-sized rectangles, zero-radius ellipses) by reporting "no intersection" rather than
//! dividing by zero.

pub mod ellipse;
pub mod numeric;

use crate::{Fp, Vec2, EPSILON};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ---------- Point & Line ---------- //

#[inline]
pub fn points_equal(a: Vec2, b: Vec2) -> bool {
    approx::abs_diff_eq!(a.x, b.x, epsilon = EPSILON) && approx::abs_diff_eq!(a.y, b.y, epsilon = EPSILON)
}

#[inline]
pub fn in_range(p: Vec2, l1: Vec2, l2: Vec2) -> bool {
    //! Returns whether `p` lies within the span of `l1->l2` along the line's dominant axis.
    //! Vertical lines compare the Y span only, shallow lines the X span only. `p` is expected to
    //! lie on the line, where one axis decides for both.
    let d = (l2 - l1).abs();
    let within = |v: Fp, a: Fp, b: Fp| v >= Fp::min(a, b) - EPSILON && v <= Fp::max(a, b) + EPSILON;
    if d.x >= d.y {
        within(p.x, l1.x, l2.x)
    } else {
        within(p.y, l1.y, l2.y)
    }
}

pub fn point_on_line(p: Vec2, l1: Vec2, l2: Vec2) -> bool {
    //! Returns whether `p` lies on the infinite line through `l1` and `l2`.
    //! A zero-length line degenerates to point equality.
    if l1 == l2 {
        return points_equal(p, l1);
    }
    if l1.x == l2.x {
        return (p.x - l1.x).abs() <= EPSILON;
    }
    if l1.y == l2.y {
        return (p.y - l1.y).abs() <= EPSILON;
    }

    let m = (l2.y - l1.y) / (l2.x - l1.x);
    let y = l1.y + m * (p.x - l1.x);
    (p.y - y).abs() <= EPSILON * (1.0 + m.abs())
}

#[inline]
pub fn point_on_seg(p: Vec2, s1: Vec2, s2: Vec2) -> bool {
    in_range(p, s1, s2) && point_on_line(p, s1, s2)
}

pub fn line_line_query(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    //! Returns the intersection of the infinite lines `a1->a2` and `b1->b2`.
    //! Parallel, coincident and zero-length lines yield `None`.
    let da = a2 - a1;
    let db = b2 - b1;
    if da == Vec2::ZERO || db == Vec2::ZERO {
        return None; // no direction, no line
    }

    match (da.x == 0.0, db.x == 0.0) {
        (true, true) => None,
        (true, false) => {
            let mb = db.y / db.x;
            Some(Vec2::new(a1.x, b1.y + mb * (a1.x - b1.x)))
        }
        (false, true) => {
            let ma = da.y / da.x;
            Some(Vec2::new(b1.x, a1.y + ma * (b1.x - a1.x)))
        }
        (false, false) => {
            let ma = da.y / da.x;
            let mb = db.y / db.x;
            if ma == mb {
                return None;
            }
            let ca = a1.y - ma * a1.x;
            let cb = b1.y - mb * b1.x;
            let x = (cb - ca) / (ma - mb);
            // y comes from the shallower line (the same one in either argument order);
            // horizontal lines keep their exact y
            let (m, c) = if (ma.abs(), ma) <= (mb.abs(), mb) { (ma, ca) } else { (mb, cb) };
            Some(Vec2::new(x, m * x + c))
        }
    }
}

#[inline]
pub fn line_seg_query(l1: Vec2, l2: Vec2, s1: Vec2, s2: Vec2) -> Option<Vec2> {
    //! Returns where the infinite line `l1->l2` crosses the segment `s1->s2`.
    line_line_query(l1, l2, s1, s2).filter(|&p| in_range(p, s1, s2))
}

#[inline]
pub fn seg_seg_query(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    //! Returns where the segments `a1->a2` and `b1->b2` cross.
    line_line_query(a1, a2, b1, b2).filter(|&p| in_range(p, a1, a2) && in_range(p, b1, b2))
}

pub fn collinear_overlap_test(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    //! Returns whether two segments lie on the same line and share at least one point.
    //! Each segment has to lie on the other's line, so the argument order never matters.
    if a1 == a2 {
        return point_on_seg(a1, b1, b2);
    }
    if b1 == b2 {
        return point_on_seg(b1, a1, a2);
    }
    let b_on_a = point_on_line(b1, a1, a2) && point_on_line(b2, a1, a2);
    let a_on_b = point_on_line(a1, b1, b2) && point_on_line(a2, b1, b2);
    if !(b_on_a && a_on_b) {
        return false;
    }
    // spans are compared along the axis the pair extends furthest in
    let d = (a2 - a1).abs() + (b2 - b1).abs();
    let (amin, amax, bmin, bmax) = if d.x >= d.y {
        (Fp::min(a1.x, a2.x), Fp::max(a1.x, a2.x), Fp::min(b1.x, b2.x), Fp::max(b1.x, b2.x))
    } else {
        (Fp::min(a1.y, a2.y), Fp::max(a1.y, a2.y), Fp::min(b1.y, b2.y), Fp::max(b1.y, b2.y))
    };
    amin <= bmax + EPSILON && bmin <= amax + EPSILON
}

// ---------- Bounding Box ---------- //

/// Axis-aligned rectangle given by its top-left corner and non-negative dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub x: Fp,
    pub y: Fp,
    pub w: Fp,
    pub h: Fp,
}

impl BoundingBox {
    #[inline]
    pub fn new(x: Fp, y: Fp, w: Fp, h: Fp) -> BoundingBox {
        //! Negative dimensions are flipped so that `(x, y)` stays the top-left corner.
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        BoundingBox { x, y, w, h }
    }
    pub fn from_points(a: Vec2, b: Vec2) -> BoundingBox {
        //! Smallest box containing both points.
        let min = a.min(b);
        let max = a.max(b);
        BoundingBox { x: min.x, y: min.y, w: max.x - min.x, h: max.y - min.y }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }
    pub fn corners(&self) -> [Vec2; 4] {
        //! Returns the corners clockwise from the top-left.
        let (x2, y2) = (self.x + self.w, self.y + self.h);
        [Vec2::new(self.x, self.y), Vec2::new(x2, self.y), Vec2::new(x2, y2), Vec2::new(self.x, y2)]
    }

    #[inline]
    pub fn as_array(&self) -> [Fp; 4] {
        [self.x, self.y, self.w, self.h]
    }

    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        rect_overlap_test(self, other)
    }
}

impl From<[Fp; 4]> for BoundingBox {
    fn from([x, y, w, h]: [Fp; 4]) -> Self {
        BoundingBox::new(x, y, w, h)
    }
}

// ---------- Rectangle ---------- //

#[inline]
pub fn rect_overlap_test(a: &BoundingBox, b: &BoundingBox) -> bool {
    //! Standard AABB overlap. Touching edges overlap.
    a.x <= b.x + b.w && a.x + a.w >= b.x && a.y <= b.y + b.h && a.y + a.h >= b.y
}

#[inline]
pub fn rect_contains_test(outer: &BoundingBox, inner: &BoundingBox) -> bool {
    //! Returns whether `inner` is strictly nested within `outer`.
    inner.x > outer.x
        && inner.x + inner.w < outer.x + outer.w
        && inner.y > outer.y
        && inner.y + inner.h < outer.y + outer.h
}

pub fn rect_crosses_test(a: &BoundingBox, b: &BoundingBox) -> bool {
    //! Returns whether the rectangles form a cross: one spans the other's full width while
    //! being vertically nested in it, or the other way around.
    fn spans_and_nests(a: &BoundingBox, b: &BoundingBox) -> bool {
        a.x < b.x && a.x + a.w > b.x + b.w && a.y > b.y && a.y + a.h < b.y + b.h
    }
    spans_and_nests(a, b) || spans_and_nests(b, a)
}

#[inline]
pub fn rect_point_test(rect: &BoundingBox, p: Vec2) -> bool {
    //! Inclusive point containment.
    p.x >= rect.x && p.x <= rect.x + rect.w && p.y >= rect.y && p.y <= rect.y + rect.h
}

pub fn rect_seg_query(rect: &BoundingBox, s1: Vec2, s2: Vec2) -> Vec<Vec2> {
    //! Returns every point at which the segment crosses an edge of `rect`, without duplicates
    //! (a segment through a corner hits two edges at the same point).
    let c = rect.corners();
    let mut hits: Vec<Vec2> = Vec::with_capacity(2);
    for i in 0..4 {
        if let Some(p) = seg_seg_query(c[i], c[(i + 1) % 4], s1, s2) {
            if !hits.iter().any(|&h| points_equal(h, p)) {
                hits.push(p);
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn range_vertical_and_general() {
        // vertical: only the y span matters
        assert!(in_range(Vec2::new(7.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(0.0, 2.0)));
        assert!(!in_range(Vec2::new(0.0, 3.0), Vec2::new(0.0, 0.0), Vec2::new(0.0, 2.0)));
        // shallow: only the x span matters
        assert!(in_range(Vec2::new(1.0, 100.0), Vec2::new(2.0, 0.0), Vec2::new(0.0, 0.0)));
        assert!(!in_range(Vec2::new(-0.5, 0.0), Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)));
        // steep: a tiny x span must not admit the whole line
        let (s1, s2) = (Vec2::new(0.0, -10.0), Vec2::new(1e-10, -5.0));
        assert!(!in_range(Vec2::new(2.4e-10, 2.0), s1, s2));
        assert!(in_range(Vec2::new(0.6e-10, -7.0), s1, s2));
    }

    #[test]
    fn near_vertical_segments() {
        let (a1, a2) = (Vec2::new(0.0, -10.0), Vec2::new(1e-10, -5.0));
        // the lines cross near (0, 2), well above the steep segment
        assert_eq!(seg_seg_query(a1, a2, Vec2::new(-1.0, -6.0), Vec2::new(1.0, 10.0)), None);
        let p = seg_seg_query(a1, a2, Vec2::new(-1.0, -8.0), Vec2::new(1.0, -6.0)).unwrap();
        assert_relative_eq!(p.y, -7.0, epsilon = 1e-6);
        assert!(rect_seg_query(&BoundingBox::new(-1.0, 0.0, 2.0, 2.0), a1, a2).is_empty());
    }

    #[test]
    fn line_line() {
        assert_eq!(
            line_line_query(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0), Vec2::new(10.0, 0.0)),
            Some(Vec2::new(5.0, 5.0))
        );
        // one vertical
        assert_eq!(
            line_line_query(Vec2::new(2.0, -1.0), Vec2::new(2.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)),
            Some(Vec2::new(2.0, 2.0))
        );
        assert_eq!(
            line_line_query(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, -1.0), Vec2::new(2.0, 1.0)),
            Some(Vec2::new(2.0, 2.0))
        );
        // both vertical, parallel, degenerate
        assert_eq!(line_line_query(Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)), None);
        assert_eq!(line_line_query(Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 3.0)), None);
        assert_eq!(line_line_query(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)), None);
    }

    #[test]
    fn seg_seg() {
        let p = seg_seg_query(Vec2::new(0.0, 0.0), Vec2::new(3.0, 1.0), Vec2::new(2.0, 1.0), Vec2::new(2.0, -4.0)).unwrap();
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 2.0 / 3.0);

        // the lines cross at (1, 1), outside the second segment
        assert_eq!(seg_seg_query(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0), Vec2::new(2.0, 0.0), Vec2::new(1.5, 0.5)), None);
        // touching at an endpoint counts
        assert!(seg_seg_query(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 5.0)).is_some());
        // line-seg ignores the span of the line
        assert!(line_seg_query(Vec2::new(0.0, 0.0), Vec2::new(0.1, 0.1), Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0)).is_some());
    }

    #[test]
    fn on_line() {
        assert!(point_on_line(Vec2::new(3.0, 3.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)));
        assert!(!point_on_line(Vec2::new(3.0, 3.1), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)));
        assert!(point_on_line(Vec2::new(4.0, 9.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 1.0)));
        assert!(point_on_line(Vec2::new(-9.0, 2.0), Vec2::new(0.0, 2.0), Vec2::new(1.0, 2.0)));
        assert!(point_on_seg(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)));
        assert!(!point_on_seg(Vec2::new(3.0, 3.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn collinear() {
        let (a1, a2) = (Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0));
        assert!(collinear_overlap_test(a1, a2, Vec2::new(3.0, 3.0), Vec2::new(6.0, 6.0)));
        assert!(!collinear_overlap_test(a1, a2, Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0)));
        assert!(!collinear_overlap_test(a1, a2, Vec2::new(1.0, 2.0), Vec2::new(2.0, 3.0)));

        // the steep segment lies on the vertical line within tolerance, the vertical one
        // does not lie on the steep line
        let (v1, v2) = (Vec2::new(3.0, 0.0), Vec2::new(3.0, 5.0));
        let (s1, s2) = (Vec2::new(3.0, -1.0), Vec2::new(3.0 + 5e-10, 0.0));
        assert_eq!(collinear_overlap_test(v1, v2, s1, s2), collinear_overlap_test(s1, s2, v1, v2));
        assert!(!collinear_overlap_test(s1, s2, v1, v2));
    }

    #[test]
    fn rects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect_overlap_test(&a, &BoundingBox::new(10.0, 10.0, 1.0, 1.0)));
        assert!(!rect_overlap_test(&a, &BoundingBox::new(20.0, 20.0, 5.0, 5.0)));

        assert!(rect_contains_test(&a, &BoundingBox::new(1.0, 1.0, 2.0, 2.0)));
        assert!(!rect_contains_test(&a, &BoundingBox::new(0.0, 1.0, 2.0, 2.0)));

        let bar = BoundingBox::new(-1.0, 4.0, 12.0, 2.0);
        assert!(rect_crosses_test(&bar, &a));
        assert!(rect_crosses_test(&a, &bar));
        assert!(!rect_crosses_test(&a, &BoundingBox::new(1.0, 1.0, 2.0, 2.0)));
    }

    #[test]
    fn bounding_box_normalizes() {
        assert_eq!(BoundingBox::new(5.0, 5.0, -2.0, -3.0), BoundingBox::new(3.0, 2.0, 2.0, 3.0));
        assert_eq!(BoundingBox::from_points(Vec2::new(3.0, 0.0), Vec2::new(1.0, 2.0)), BoundingBox::new(1.0, 0.0, 2.0, 2.0));
        assert_eq!(
            BoundingBox::new(0.0, 0.0, 2.0, 1.0).corners(),
            [Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(2.0, 1.0), Vec2::new(0.0, 1.0)]
        );
    }

    #[test]
    fn rect_seg_hits() {
        let r = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let hits = rect_seg_query(&r, Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0));
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&Vec2::new(0.0, 5.0)));
        assert!(hits.contains(&Vec2::new(10.0, 5.0)));

        // through the corner: one point, not two
        let hits = rect_seg_query(&r, Vec2::new(-1.0, -1.0), Vec2::new(0.0, 0.0));
        assert_eq!(hits, vec![Vec2::new(0.0, 0.0)]);

        assert!(rect_seg_query(&r, Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)).is_empty());
    }
}
