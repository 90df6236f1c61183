//! Resolution of a query between two shapes into one concrete pairwise test.

use crate::collidable::{Collidable, ShapeRef};
use crate::kernel::rect_overlap_test;
use crate::response::{attr, Attributes, CollisionResponse, Participant};
use crate::shapes::{EllipseShape, PointShape, RectShape, SegmentShape, Shape, ShapeKind};
use crate::{BoundingBox, CollisionError, Vec2};
use log::{debug, trace};
use std::any::Any;

// ---------- Entry points ---------- //

pub fn collision_between<'a>(a: &'a dyn Collidable, b: &'a dyn Collidable) -> Result<CollisionResponse<'a>, CollisionError> {
    //! Tests `a` against `b`. The outcome does not depend on the argument order; the response
    //! keeps it regardless.
    let mut response = CollisionResponse::new(a, Participant::Shape(b));
    let colliding = resolve(a, b, response.attrs_mut())?;
    response.set_colliding(colliding);
    Ok(response)
}

pub fn collision_with_value<'a>(a: &'a dyn Collidable, value: &'a dyn Any) -> Result<CollisionResponse<'a>, CollisionError> {
    //! Tests `a` against a value that need not be a shape.
    //!
    //! Builtin shapes, `Vec2` (a point), `(Vec2, Vec2)` (a segment) and `BoundingBox` (a
    //! rectangle) are dispatched like shapes; anything else is handed to `a.value_test`.
    let mut response = CollisionResponse::new(a, Participant::Value(value));
    let colliding = resolve_value(a, value, response.attrs_mut())?;
    response.set_colliding(colliding);
    Ok(response)
}

fn resolve(a: &dyn Collidable, b: &dyn Collidable, attrs: &mut Attributes) -> Result<bool, CollisionError> {
    // fast reject: nothing finer runs once the boxes are apart
    let (abb, bbb) = (a.bounding_box(), b.bounding_box());
    if !rect_overlap_test(&abb, &bbb) {
        trace!("bounding boxes {:?} and {:?} are apart", abb, bbb);
        return Ok(false);
    }

    // the higher rank tests; on a tie the first argument does
    let (higher, lower) = if b.precedence() > a.precedence() { (b, a) } else { (a, b) };
    trace!("dispatching to precedence {} against precedence {}", higher.precedence(), lower.precedence());

    match higher.collision_test(lower, attrs)? {
        Some(colliding) => Ok(colliding),
        None => {
            debug!(
                "precedence {} has no test against precedence {}, treated as not colliding",
                higher.precedence(),
                lower.precedence()
            );
            Ok(false)
        }
    }
}

fn resolve_value(a: &dyn Collidable, value: &dyn Any, attrs: &mut Attributes) -> Result<bool, CollisionError> {
    // Converted values go through `resolve`, which never comes back here, so a value is
    // dispatched at most once and unknown values cannot loop.
    if let Some(shape) = builtin_as_collidable(value) {
        return resolve(a, shape, attrs);
    }
    if let Some(&pos) = value.downcast_ref::<Vec2>() {
        return resolve(a, &PointShape::from_vec(pos), attrs);
    }
    if let Some(&(start, end)) = value.downcast_ref::<(Vec2, Vec2)>() {
        return resolve(a, &SegmentShape::from_vecs(start, end), attrs);
    }
    if let Some(&rect) = value.downcast_ref::<BoundingBox>() {
        return resolve(a, &RectShape::from_box(rect), attrs);
    }

    match a.value_test(value, attrs)? {
        Some(colliding) => Ok(colliding),
        None => {
            debug!("precedence {} has no test against the given value, treated as not colliding", a.precedence());
            Ok(false)
        }
    }
}

fn builtin_as_collidable(value: &dyn Any) -> Option<&dyn Collidable> {
    let shape: &dyn Collidable = if let Some(s) = value.downcast_ref::<PointShape>() {
        s
    } else if let Some(s) = value.downcast_ref::<SegmentShape>() {
        s
    } else if let Some(s) = value.downcast_ref::<RectShape>() {
        s
    } else if let Some(s) = value.downcast_ref::<EllipseShape>() {
        s
    } else if let Some(s) = value.downcast_ref::<Shape>() {
        s
    } else {
        return None;
    };
    Some(shape)
}

// ---------- Builtin pair table ---------- //

type PairTest = fn(ShapeRef<'_>, ShapeRef<'_>, &mut Attributes) -> Result<bool, CollisionError>;

/// Defines a pairwise test over two `ShapeRef` variants. Rows of `PAIR_TABLE` are indexed by
/// kind, so any other pair of variants reaching the test is a table bug.
macro_rules! pair_test {
    ($name:ident, $hi:ident($h:ident), $lo:ident($l:ident), $attrs:ident => $body:expr) => {
        fn $name(hi: ShapeRef<'_>, lo: ShapeRef<'_>, $attrs: &mut Attributes) -> Result<bool, CollisionError> {
            match (hi, lo) {
                (ShapeRef::$hi($h), ShapeRef::$lo($l)) => $body,
                (hi, lo) => unreachable!(
                    "{} received {:?} against {:?}",
                    stringify!($name),
                    hi.kind(),
                    lo.kind()
                ),
            }
        }
    };
}

pair_test!(point_point, Point(a), Point(b), _attrs => Ok(a.point_test(b)));

pair_test!(seg_point, Segment(s), Point(p), _attrs => Ok(s.point_test(p)));
pair_test!(seg_seg, Segment(a), Segment(b), attrs => {
    match a.seg_query(b) {
        Some(p) => {
            attrs.set(attr::INTERSECTION_POINT, p);
            Ok(true)
        }
        None => Ok(a.seg_test(b)),
    }
});

pair_test!(rect_point, Rect(r), Point(p), _attrs => Ok(r.point_test(p)));
pair_test!(rect_seg, Rect(r), Segment(s), attrs => {
    let hits = r.seg_query(s);
    let colliding = !hits.is_empty() || r.seg_test(s);
    attrs.set(attr::NUM_INTERSECTIONS, hits.len());
    attrs.set(attr::INTERSECTION_POINTS, hits);
    Ok(colliding)
});
pair_test!(rect_rect, Rect(a), Rect(b), _attrs => Ok(a.rect_test(b)));

pair_test!(ellipse_point, Ellipse(e), Point(p), _attrs => Ok(e.point_test(p)));
pair_test!(ellipse_seg, Ellipse(e), Segment(s), attrs => {
    let hits = e.seg_query(s);
    let colliding = !hits.is_empty() || e.seg_test(s);
    attrs.set(attr::NUM_INTERSECTIONS, hits.len());
    attrs.set(attr::INTERSECTION_POINTS, hits);
    Ok(colliding)
});
pair_test!(ellipse_rect, Ellipse(e), Rect(r), _attrs => Ok(e.rect_test(r)));
pair_test!(ellipse_ellipse, Ellipse(a), Ellipse(b), _attrs => a.ellipse_test(b));

/// `PAIR_TABLE[higher][lower]`, indexed by `ShapeKind`. `None` marks a missing capability.
const PAIR_TABLE: [[Option<PairTest>; ShapeKind::COUNT]; ShapeKind::COUNT] = [
    // lower: point, segment, rect, ellipse
    [Some(point_point as PairTest), None, None, None],
    [Some(seg_point as PairTest), Some(seg_seg as PairTest), None, None],
    [Some(rect_point as PairTest), Some(rect_seg as PairTest), Some(rect_rect as PairTest), None],
    [
        Some(ellipse_point as PairTest),
        Some(ellipse_seg as PairTest),
        Some(ellipse_rect as PairTest),
        Some(ellipse_ellipse as PairTest),
    ],
];

pub fn builtin_test(higher: ShapeRef<'_>, lower: ShapeRef<'_>, attrs: &mut Attributes) -> Result<Option<bool>, CollisionError> {
    //! Runs the builtin test of `higher` against `lower`, or returns `None` when the pair has
    //! none (including any pair with a custom shape).
    match (higher.kind(), lower.kind()) {
        (Some(h), Some(l)) => match PAIR_TABLE[h.index()][l.index()] {
            Some(test) => test(higher, lower, attrs).map(Some),
            None => Ok(None),
        },
        _ => Ok(None),
    }
}
