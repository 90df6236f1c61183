//! 2D collision detection between points, segments, axis-aligned rectangles and axis-aligned
//! ellipses.
//!
//! Every shape implements [`Collidable`]. A query between two shapes is resolved by
//! [`collision_between`]: bounding boxes are compared first, then the shape with the higher
//! [`Precedence`] runs its pairwise test against the other. A pair without a test is simply
//! not colliding, so new shape kinds can be added without touching the existing ones.
//!
//! ```
//! use collidable::{collision_between, PointShape, RectShape};
//!
//! let point = PointShape::new(5.0, 5.0);
//! let rect = RectShape::new(0.0, 0.0, 10.0, 10.0);
//! assert!(collision_between(&point, &rect).unwrap().is_colliding());
//! ```

pub mod collidable;
pub mod desc;
pub mod dispatch;
pub mod error;
pub mod kernel;
pub mod precedence;
pub mod response;
pub mod shapes;

pub type Fp = f64;
pub type Vec2 = glam::DVec2;

/// Absolute tolerance of the kernel's equality-flavoured comparisons.
pub const EPSILON: Fp = 1e-9;

pub use crate::collidable::{Collidable, ShapeRef};
pub use crate::desc::ShapeDesc;
pub use crate::dispatch::{collision_between, collision_with_value};
pub use crate::error::CollisionError;
pub use crate::kernel::BoundingBox;
pub use crate::precedence::Precedence;
pub use crate::response::{attr, AttrType, AttrValue, CollisionResponse, Participant};
pub use crate::shapes::{EllipseShape, PointShape, RectShape, SegmentShape, Shape, ShapeKind, Transform};
