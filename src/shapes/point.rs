use super::{rotate_point, scale_point, ShapeKind, Transform};
use crate::collidable::{Collidable, ShapeRef};
use crate::kernel::points_equal;
use crate::{BoundingBox, CollisionError, Fp, Precedence, Vec2};

/// A single location. Area and perimeter are identically zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointShape {
    pub pos: Vec2,
}

impl PointShape {
    #[inline]
    pub fn new(x: Fp, y: Fp) -> PointShape {
        PointShape { pos: Vec2::new(x, y) }
    }
    #[inline]
    pub fn from_vec(pos: Vec2) -> PointShape {
        PointShape { pos }
    }
    pub fn from_args(args: &[Fp]) -> Result<PointShape, CollisionError> {
        //! `[]` is the origin, `[v]` is `(v, v)`, `[x, y]` is `(x, y)`.
        match *args {
            [] => Ok(PointShape::default()),
            [v] => Ok(PointShape::new(v, v)),
            [x, y] => Ok(PointShape::new(x, y)),
            _ => Err(CollisionError::InvalidArgument { kind: ShapeKind::Point, count: args.len() }),
        }
    }

    #[inline]
    pub fn x(&self) -> Fp {
        self.pos.x
    }
    #[inline]
    pub fn y(&self) -> Fp {
        self.pos.y
    }
    #[inline]
    pub fn area(&self) -> Fp {
        0.0
    }
    #[inline]
    pub fn perimeter(&self) -> Fp {
        0.0
    }

    #[inline]
    pub fn point_test(&self, other: &PointShape) -> bool {
        points_equal(self.pos, other.pos)
    }
}

impl Collidable for PointShape {
    #[inline]
    fn precedence(&self) -> Precedence {
        Precedence::POINT
    }
    #[inline]
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.pos.x, self.pos.y, 0.0, 0.0)
    }
    #[inline]
    fn shape(&self) -> ShapeRef<'_> {
        ShapeRef::Point(self)
    }
}

impl Transform for PointShape {
    #[inline]
    fn position(&self) -> Vec2 {
        self.pos
    }
    #[inline]
    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }
    fn scale_about(&mut self, factor: Fp, origin: Vec2) {
        self.pos = scale_point(self.pos, factor, origin);
    }
    fn rotate_about(&mut self, angle: Fp, origin: Vec2) -> Result<(), CollisionError> {
        self.pos = rotate_point(self.pos, angle, origin);
        Ok(())
    }
}
