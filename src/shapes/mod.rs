//! The builtin geometric primitives and the owned `Shape` union over them.

mod ellipse;
mod point;
mod rect;
mod segment;

pub use ellipse::EllipseShape;
pub use point::PointShape;
pub use rect::RectShape;
pub use segment::SegmentShape;

use crate::collidable::{Collidable, ShapeRef};
use crate::{BoundingBox, CollisionError, Fp, Precedence, Vec2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt::{Display, Formatter};

/// The builtin primitive kinds, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    Point,
    Segment,
    Rect,
    Ellipse,
}
impl ShapeKind {
    pub const COUNT: usize = 4;

    #[inline]
    pub fn precedence(self) -> Precedence {
        match self {
            ShapeKind::Point => Precedence::POINT,
            ShapeKind::Segment => Precedence::SEGMENT,
            ShapeKind::Rect => Precedence::RECT,
            ShapeKind::Ellipse => Precedence::ELLIPSE,
        }
    }
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            ShapeKind::Point => "point",
            ShapeKind::Segment => "segment",
            ShapeKind::Rect => "rectangle",
            ShapeKind::Ellipse => "ellipse",
        })
    }
}

// ---------- Transform ---------- //

/// In-place placement of a shape. Every shape has an anchor (`position`) which implicit
/// scaling and rotation pivot around: a point is its own anchor, a segment is anchored at its
/// start, a rectangle at its top-left corner and an ellipse at its center.
pub trait Transform {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);

    fn translate(&mut self, offset: Vec2) {
        let pos = self.position();
        self.set_position(pos + offset);
    }

    /// Uniform scaling about `origin`. Dimensions stay non-negative.
    fn scale_about(&mut self, factor: Fp, origin: Vec2);
    fn scale(&mut self, factor: Fp) {
        let anchor = self.position();
        self.scale_about(factor, anchor);
    }

    /// Rotation by `angle` radians about `origin`.
    fn rotate_about(&mut self, angle: Fp, origin: Vec2) -> Result<(), CollisionError>;
    fn rotate(&mut self, angle: Fp) -> Result<(), CollisionError> {
        let anchor = self.position();
        self.rotate_about(angle, anchor)
    }
}

#[inline]
pub(crate) fn rotate_point(p: Vec2, angle: Fp, origin: Vec2) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let d = p - origin;
    origin + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

#[inline]
pub(crate) fn scale_point(p: Vec2, factor: Fp, origin: Vec2) -> Vec2 {
    origin + (p - origin) * factor
}

// ---------- Cache ---------- //

/// A derived value recomputed on the first read after `invalidate`.
///
/// Reads go through `&self`, so the cache uses `Cell`s; shapes holding one are therefore
/// `!Sync` and must not be queried and mutated from several threads.
#[derive(Debug, Clone)]
pub(crate) struct Cached<T: Copy> {
    value: Cell<T>,
    dirty: Cell<bool>,
}
impl<T: Copy + Default> Cached<T> {
    pub fn new() -> Cached<T> {
        Cached { value: Cell::new(T::default()), dirty: Cell::new(true) }
    }

    #[inline]
    pub fn get(&self, compute: impl FnOnce() -> T) -> T {
        if self.dirty.get() {
            self.value.set(compute());
            self.dirty.set(false);
        }
        self.value.get()
    }
    #[inline]
    pub fn invalidate(&mut self) {
        self.dirty.set(true);
    }
    #[cfg(test)]
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }
}

// ---------- Shape ---------- //

/// An owned builtin primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(PointShape),
    Segment(SegmentShape),
    Rect(RectShape),
    Ellipse(EllipseShape),
}
impl Shape {
    pub fn from_args(kind: ShapeKind, args: &[Fp]) -> Result<Shape, CollisionError> {
        //! Runs the raw-array constructor of `kind`.
        Ok(match kind {
            ShapeKind::Point => Shape::Point(PointShape::from_args(args)?),
            ShapeKind::Segment => Shape::Segment(SegmentShape::from_args(args)?),
            ShapeKind::Rect => Shape::Rect(RectShape::from_args(args)?),
            ShapeKind::Ellipse => Shape::Ellipse(EllipseShape::from_args(args)?),
        })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Segment(_) => ShapeKind::Segment,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
        }
    }

    fn as_transform(&mut self) -> &mut dyn Transform {
        match self {
            Shape::Point(p) => p,
            Shape::Segment(s) => s,
            Shape::Rect(r) => r,
            Shape::Ellipse(e) => e,
        }
    }
}

impl Collidable for Shape {
    #[inline]
    fn precedence(&self) -> Precedence {
        self.kind().precedence()
    }
    fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Point(p) => p.bounding_box(),
            Shape::Segment(s) => s.bounding_box(),
            Shape::Rect(r) => r.bounding_box(),
            Shape::Ellipse(e) => e.bounding_box(),
        }
    }
    fn shape(&self) -> ShapeRef<'_> {
        match self {
            Shape::Point(p) => ShapeRef::Point(p),
            Shape::Segment(s) => ShapeRef::Segment(s),
            Shape::Rect(r) => ShapeRef::Rect(r),
            Shape::Ellipse(e) => ShapeRef::Ellipse(e),
        }
    }
}

impl Transform for Shape {
    fn position(&self) -> Vec2 {
        match self {
            Shape::Point(p) => p.position(),
            Shape::Segment(s) => s.position(),
            Shape::Rect(r) => r.position(),
            Shape::Ellipse(e) => e.position(),
        }
    }
    fn set_position(&mut self, pos: Vec2) {
        self.as_transform().set_position(pos)
    }
    fn translate(&mut self, offset: Vec2) {
        self.as_transform().translate(offset)
    }
    fn scale_about(&mut self, factor: Fp, origin: Vec2) {
        self.as_transform().scale_about(factor, origin)
    }
    fn scale(&mut self, factor: Fp) {
        self.as_transform().scale(factor)
    }
    fn rotate_about(&mut self, angle: Fp, origin: Vec2) -> Result<(), CollisionError> {
        self.as_transform().rotate_about(angle, origin)
    }
    fn rotate(&mut self, angle: Fp) -> Result<(), CollisionError> {
        self.as_transform().rotate(angle)
    }
}

impl From<PointShape> for Shape {
    fn from(p: PointShape) -> Self {
        Shape::Point(p)
    }
}
impl From<SegmentShape> for Shape {
    fn from(s: SegmentShape) -> Self {
        Shape::Segment(s)
    }
}
impl From<RectShape> for Shape {
    fn from(r: RectShape) -> Self {
        Shape::Rect(r)
    }
}
impl From<EllipseShape> for Shape {
    fn from(e: EllipseShape) -> Self {
        Shape::Ellipse(e)
    }
}
