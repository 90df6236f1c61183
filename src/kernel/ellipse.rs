//! Axis-aligned ellipse kernel: ellipses are given by their center and semi-axes `a` (along x)
//! and `b` (along y).

use super::{collinear_overlap_test, in_range, point_on_seg, points_equal, rect_point_test, seg_seg_query, BoundingBox};
use super::numeric::solve_quadratic;
use crate::{Fp, Vec2, EPSILON};
use std::f64::consts::PI;

#[inline]
pub fn is_degenerate(a: Fp, b: Fp) -> bool {
    a <= 0.0 || b <= 0.0
}

#[inline]
pub fn limiting_segment(center: Vec2, a: Fp, b: Fp) -> (Vec2, Vec2) {
    //! The set a degenerate ellipse collapses to: a segment along its non-zero axis, or its center.
    let half = Vec2::new(a, b);
    (center - half, center + half)
}

pub fn ellipse_perimeter(a: Fp, b: Fp) -> Fp {
    //! Ramanujan's second approximation. The error grows with the fifth power of
    //! `(a - b) / (a + b)`, far below double precision for near-circular ellipses.
    let sum = a + b;
    if sum <= 0.0 {
        return 0.0;
    }
    let h = (a - b) * (a - b) / (sum * sum);
    PI * sum * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

pub fn ellipse_point_test(center: Vec2, a: Fp, b: Fp, p: Vec2) -> bool {
    //! Returns whether `p` lies inside or on the ellipse.
    if is_degenerate(a, b) {
        let (s1, s2) = limiting_segment(center, a, b);
        return point_on_seg(p, s1, s2);
    }
    let d = p - center;
    (d.x * d.x) / (a * a) + (d.y * d.y) / (b * b) <= 1.0 + EPSILON
}

pub fn ellipse_line_query(center: Vec2, a: Fp, b: Fp, l1: Vec2, l2: Vec2) -> Vec<Vec2> {
    //! Returns the 0, 1 (tangent) or 2 points where the infinite line `l1->l2` meets the
    //! ellipse outline. Degenerate ellipses and zero-length lines yield no points.
    if is_degenerate(a, b) || l1 == l2 {
        return Vec::new();
    }

    // substitute l1 + t*d into (x/a)^2 + (y/b)^2 = 1, relative to the center
    let o = l1 - center;
    let d = l2 - l1;
    let (ia2, ib2) = (1.0 / (a * a), 1.0 / (b * b));
    let qa = d.x * d.x * ia2 + d.y * d.y * ib2;
    let qb = 2.0 * (o.x * d.x * ia2 + o.y * d.y * ib2);
    let qc = o.x * o.x * ia2 + o.y * o.y * ib2 - 1.0;

    solve_quadratic(qa, qb, qc).as_slice().iter().map(|&t| l1 + d * t).collect()
}

#[inline]
pub fn ellipse_seg_query(center: Vec2, a: Fp, b: Fp, s1: Vec2, s2: Vec2) -> Vec<Vec2> {
    //! Returns the points where the segment `s1->s2` crosses the ellipse outline.
    let mut hits = ellipse_line_query(center, a, b, s1, s2);
    hits.retain(|&p| in_range(p, s1, s2));
    hits
}

pub fn ellipse_seg_overlap_test(center: Vec2, a: Fp, b: Fp, s1: Vec2, s2: Vec2) -> bool {
    //! Returns whether the segment crosses the outline or lies inside the ellipse.
    if is_degenerate(a, b) {
        let (e1, e2) = limiting_segment(center, a, b);
        if points_equal(s1, s2) {
            return point_on_seg(s1, e1, e2);
        }
        return seg_seg_query(e1, e2, s1, s2).is_some() || collinear_overlap_test(s1, s2, e1, e2);
    }
    ellipse_point_test(center, a, b, s1) || !ellipse_seg_query(center, a, b, s1, s2).is_empty()
}

pub fn ellipse_rect_overlap_test(center: Vec2, a: Fp, b: Fp, rect: &BoundingBox) -> bool {
    //! Returns whether any edge of `rect` overlaps the ellipse, or the ellipse's center lies
    //! in `rect` (which covers an ellipse wholly inside the rectangle).
    if rect_point_test(rect, center) {
        return true;
    }
    let c = rect.corners();
    (0..4).any(|i| ellipse_seg_overlap_test(center, a, b, c[i], c[(i + 1) % 4]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perimeter() {
        assert_relative_eq!(ellipse_perimeter(1.0, 1.0), 2.0 * PI);
        assert_relative_eq!(ellipse_perimeter(2.0, 1.0), 9.688_448_220_547_675, epsilon = 1e-6);
        assert_eq!(ellipse_perimeter(0.0, 0.0), 0.0);
        // flat ellipse: four times the semi-axis
        assert_relative_eq!(ellipse_perimeter(1.0, 0.0), 4.0, epsilon = 1e-2);
    }

    #[test]
    fn point_inside() {
        let o = Vec2::new(0.0, 0.0);
        assert!(ellipse_point_test(o, 5.0, 5.0, Vec2::new(3.0, 3.0)));
        assert!(ellipse_point_test(o, 5.0, 5.0, Vec2::new(5.0, 0.0)));
        assert!(!ellipse_point_test(o, 5.0, 2.0, Vec2::new(0.0, 3.0)));
        // degenerate: a vertical segment of half-length 2
        assert!(ellipse_point_test(o, 0.0, 2.0, Vec2::new(0.0, -1.5)));
        assert!(!ellipse_point_test(o, 0.0, 2.0, Vec2::new(0.1, 0.0)));
    }

    #[test]
    fn line_hits() {
        let o = Vec2::new(0.0, 0.0);
        let hits = ellipse_line_query(o, 1.0, 1.0, Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0));
        assert_eq!(hits, vec![Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)]);

        let hits = ellipse_line_query(o, 1.0, 1.0, Vec2::new(-2.0, 1.0), Vec2::new(2.0, 1.0));
        assert_eq!(hits, vec![Vec2::new(0.0, 1.0)]);

        assert!(ellipse_line_query(o, 1.0, 1.0, Vec2::new(-2.0, 2.0), Vec2::new(2.0, 2.0)).is_empty());
        assert!(ellipse_line_query(o, 0.0, 1.0, Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0)).is_empty());
        assert!(ellipse_line_query(o, 1.0, 1.0, Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5)).is_empty());
    }

    #[test]
    fn seg_hits() {
        let c = Vec2::new(0.0, 0.0);
        // the segment starts inside, so only the exit is a hit
        let hits = ellipse_seg_query(c, 2.0, 1.0, Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0));
        assert_eq!(hits, vec![Vec2::new(2.0, 0.0)]);
        assert!(ellipse_seg_overlap_test(c, 2.0, 1.0, Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0)));
        // wholly inside: no hits but overlapping
        assert!(ellipse_seg_query(c, 2.0, 1.0, Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)).is_empty());
        assert!(ellipse_seg_overlap_test(c, 2.0, 1.0, Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)));
        // wholly outside
        assert!(!ellipse_seg_overlap_test(c, 2.0, 1.0, Vec2::new(3.0, 0.0), Vec2::new(4.0, 0.0)));
        // degenerate ellipse crossed by a segment
        assert!(ellipse_seg_overlap_test(c, 0.0, 1.0, Vec2::new(-1.0, 0.5), Vec2::new(1.0, 0.5)));
    }

    #[test]
    fn rect_overlap() {
        let c = Vec2::new(0.0, 0.0);
        // an edge cuts through the ellipse while the center stays outside the rectangle
        assert!(ellipse_rect_overlap_test(c, 5.0, 5.0, &BoundingBox::new(3.0, -1.0, 10.0, 2.0)));
        // ellipse inside the rectangle
        assert!(ellipse_rect_overlap_test(c, 1.0, 1.0, &BoundingBox::new(-5.0, -5.0, 10.0, 10.0)));
        // rectangle inside the ellipse
        assert!(ellipse_rect_overlap_test(c, 5.0, 5.0, &BoundingBox::new(1.0, 1.0, 1.0, 1.0)));
        // bounding boxes overlap at the corner, the ellipse does not reach it
        assert!(!ellipse_rect_overlap_test(c, 5.0, 5.0, &BoundingBox::new(4.0, 4.0, 2.0, 2.0)));
    }
}
