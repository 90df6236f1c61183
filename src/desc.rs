//! Declarative shape descriptions, as a level or config loader would produce them.

use crate::shapes::{Shape, ShapeKind};
use crate::{CollisionError, Fp};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A shape kind plus the raw numeric arguments of its array constructor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeDesc {
    pub kind: ShapeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub args: Vec<Fp>,
}

impl ShapeDesc {
    pub fn new(kind: ShapeKind, args: &[Fp]) -> ShapeDesc {
        ShapeDesc { kind, args: args.to_vec() }
    }

    pub fn build(&self) -> Result<Shape, CollisionError> {
        //! Expands the arguments the way the kind's `from_args` does.
        Shape::from_args(self.kind, &self.args)
    }
}

impl From<&Shape> for ShapeDesc {
    fn from(shape: &Shape) -> Self {
        match shape {
            Shape::Point(p) => ShapeDesc::new(ShapeKind::Point, &[p.x(), p.y()]),
            Shape::Segment(s) => ShapeDesc::new(ShapeKind::Segment, &[s.start().x, s.start().y, s.end().x, s.end().y]),
            Shape::Rect(r) => ShapeDesc::new(ShapeKind::Rect, &[r.x(), r.y(), r.w(), r.h()]),
            Shape::Ellipse(e) => ShapeDesc::new(ShapeKind::Ellipse, &[e.center().x, e.center().y, e.a(), e.b()]),
        }
    }
}
