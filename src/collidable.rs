//! The contract every collidable shape implements.

use crate::dispatch::{builtin_test, collision_between, collision_with_value};
use crate::response::{Attributes, CollisionResponse};
use crate::shapes::{EllipseShape, PointShape, RectShape, SegmentShape, ShapeKind};
use crate::{BoundingBox, CollisionError, Precedence};
use std::any::Any;

/// A borrowed view of a shape's concrete geometry, handed to pairwise tests.
#[derive(Debug, Clone, Copy)]
pub enum ShapeRef<'a> {
    Point(&'a PointShape),
    Segment(&'a SegmentShape),
    Rect(&'a RectShape),
    Ellipse(&'a EllipseShape),
    /// A user-defined shape, to be downcast by tests that know it.
    Custom(&'a dyn Any),
}
impl<'a> ShapeRef<'a> {
    #[inline]
    pub fn kind(&self) -> Option<ShapeKind> {
        //! Returns the builtin kind, or `None` for custom shapes.
        match self {
            ShapeRef::Point(_) => Some(ShapeKind::Point),
            ShapeRef::Segment(_) => Some(ShapeKind::Segment),
            ShapeRef::Rect(_) => Some(ShapeKind::Rect),
            ShapeRef::Ellipse(_) => Some(ShapeKind::Ellipse),
            ShapeRef::Custom(_) => None,
        }
    }
}

/// A shape that can take part in collision queries.
///
/// When two shapes are queried, the one with the higher [`Precedence`] runs its
/// `collision_test` with the other as `lower`; a tie runs the first argument's test. A shape
/// with precedence `N` is expected to handle every kind ranked `<= N`, but returning
/// `Ok(None)` ("no capability") is always allowed and makes the pair not collide.
///
/// User shapes rank above [`Precedence::MAX`] and override `collision_test`:
///
/// ```
/// use collidable::{collision_between, BoundingBox, Collidable, PointShape, Precedence, ShapeRef};
/// use collidable::response::Attributes;
/// use collidable::CollisionError;
///
/// /// Every point inside the box except its center.
/// struct Donut(BoundingBox);
///
/// impl Collidable for Donut {
///     fn precedence(&self) -> Precedence { Precedence::above_builtin(0) }
///     fn bounding_box(&self) -> BoundingBox { self.0 }
///     fn shape(&self) -> ShapeRef<'_> { ShapeRef::Custom(self) }
///     fn collision_test(&self, lower: &dyn Collidable, _: &mut Attributes) -> Result<Option<bool>, CollisionError> {
///         Ok(match lower.shape() {
///             ShapeRef::Point(p) => Some(p.pos != self.0.center()),
///             _ => None,
///         })
///     }
/// }
///
/// let donut = Donut(BoundingBox::new(0.0, 0.0, 2.0, 2.0));
/// assert!(collision_between(&PointShape::new(0.5, 0.5), &donut).unwrap().is_colliding());
/// assert!(!collision_between(&PointShape::new(1.0, 1.0), &donut).unwrap().is_colliding());
/// ```
pub trait Collidable {
    fn precedence(&self) -> Precedence;
    /// Computed from the current state on every call.
    fn bounding_box(&self) -> BoundingBox;
    fn shape(&self) -> ShapeRef<'_>;

    fn collision_test(&self, lower: &dyn Collidable, attrs: &mut Attributes) -> Result<Option<bool>, CollisionError> {
        //! Tests `self` against a shape of lower or equal precedence. The default covers the
        //! builtin pairs.
        builtin_test(self.shape(), lower.shape(), attrs)
    }

    fn value_test(&self, _value: &dyn Any, _attrs: &mut Attributes) -> Result<Option<bool>, CollisionError> {
        //! Tests `self` against a value that is not a shape. No capability by default.
        Ok(None)
    }

    fn colliding_with<'a>(&'a self, other: &'a dyn Collidable) -> Result<CollisionResponse<'a>, CollisionError>
    where
        Self: Sized,
    {
        collision_between(self, other)
    }

    fn colliding_with_value<'a>(&'a self, value: &'a dyn Any) -> Result<CollisionResponse<'a>, CollisionError>
    where
        Self: Sized,
    {
        collision_with_value(self, value)
    }
}

impl<'s> dyn Collidable + 's {
    pub fn colliding_with<'a>(&'a self, other: &'a dyn Collidable) -> Result<CollisionResponse<'a>, CollisionError> {
        collision_between(self, other)
    }

    pub fn colliding_with_value<'a>(&'a self, value: &'a dyn Any) -> Result<CollisionResponse<'a>, CollisionError> {
        collision_with_value(self, value)
    }
}
