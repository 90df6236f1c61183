//! Query results and the typed attribute bag pairwise tests attach to them.

use crate::collidable::Collidable;
use crate::{CollisionError, Fp, Vec2};
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt::{Debug, Formatter};

/// Attribute names written by the builtin pairwise tests.
pub mod attr {
    /// `Vec2`: where two segments cross.
    pub const INTERSECTION_POINT: &str = "IntersectionPoint";
    /// `Vec<Vec2>`: where a segment crosses a rectangle's or an ellipse's outline.
    pub const INTERSECTION_POINTS: &str = "IntersectionPoints";
    /// `usize`: length of `IntersectionPoints`.
    pub const NUM_INTERSECTIONS: &str = "NumIntersections";
}

// ---------- Attributes ---------- //

/// Payload of a response attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Point(Vec2),
    Points(Vec<Vec2>),
    Count(usize),
    Scalar(Fp),
    Flag(bool),
}
impl AttrValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Point(_) => Vec2::TYPE_NAME,
            AttrValue::Points(_) => <Vec<Vec2>>::TYPE_NAME,
            AttrValue::Count(_) => usize::TYPE_NAME,
            AttrValue::Scalar(_) => Fp::TYPE_NAME,
            AttrValue::Flag(_) => bool::TYPE_NAME,
        }
    }
}

/// A Rust type storable as an attribute.
pub trait AttrType: Sized {
    const TYPE_NAME: &'static str;
    fn into_attr(self) -> AttrValue;
    fn from_attr(value: &AttrValue) -> Option<Self>;
}

macro_rules! attr_type {
    ($t:ty, $name:literal, $variant:ident) => {
        impl AttrType for $t {
            const TYPE_NAME: &'static str = $name;
            #[inline]
            fn into_attr(self) -> AttrValue {
                AttrValue::$variant(self)
            }
            #[inline]
            fn from_attr(value: &AttrValue) -> Option<Self> {
                match value {
                    AttrValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}
attr_type!(Vec2, "point", Point);
attr_type!(Vec<Vec2>, "point list", Points);
attr_type!(usize, "count", Count);
attr_type!(Fp, "scalar", Scalar);
attr_type!(bool, "flag", Flag);

/// Insertion-ordered, string-keyed attribute bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    map: IndexMap<String, AttrValue, FnvBuildHasher>,
}
impl Attributes {
    pub fn new() -> Attributes {
        Attributes::default()
    }

    #[inline]
    pub fn set<T: AttrType>(&mut self, name: &str, value: T) {
        self.map.insert(name.to_owned(), value.into_attr());
    }
    pub fn get<T: AttrType>(&self, name: &str) -> Result<T, CollisionError> {
        //! Fails when `name` is absent or holds another type than `T`.
        let value = self.map.get(name).ok_or_else(|| CollisionError::MissingAttribute(name.to_owned()))?;
        T::from_attr(value).ok_or_else(|| CollisionError::AttributeType {
            name: name.to_owned(),
            expected: T::TYPE_NAME,
            found: value.type_name(),
        })
    }
    #[inline]
    pub fn raw(&self, name: &str) -> Option<&AttrValue> {
        self.map.get(name)
    }
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ---------- Response ---------- //

/// The second side of a query: another shape, or a plain value probed against the first.
#[derive(Clone, Copy)]
pub enum Participant<'a> {
    Shape(&'a dyn Collidable),
    Value(&'a dyn Any),
}
impl<'a> Participant<'a> {
    #[inline]
    pub fn as_shape(&self) -> Option<&'a dyn Collidable> {
        match *self {
            Participant::Shape(s) => Some(s),
            Participant::Value(_) => None,
        }
    }
    #[inline]
    pub fn as_value(&self) -> Option<&'a dyn Any> {
        match *self {
            Participant::Shape(_) => None,
            Participant::Value(v) => Some(v),
        }
    }
}
impl Debug for Participant<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Participant::Shape(s) => f.debug_tuple("Shape").field(&s.precedence()).field(&s.bounding_box()).finish(),
            Participant::Value(_) => f.write_str("Value"),
        }
    }
}

/// Result of a collision query.
///
/// `collider_a`/`collider_b` keep the caller's argument order, whichever side's test ran.
/// Attributes are specific to the pairwise test that produced the response; see [`attr`].
pub struct CollisionResponse<'a> {
    collider_a: &'a dyn Collidable,
    collider_b: Participant<'a>,
    colliding: bool,
    attrs: Attributes,
}
impl<'a> CollisionResponse<'a> {
    pub fn new(collider_a: &'a dyn Collidable, collider_b: Participant<'a>) -> CollisionResponse<'a> {
        CollisionResponse { collider_a, collider_b, colliding: false, attrs: Attributes::new() }
    }

    #[inline]
    pub fn collider_a(&self) -> &'a dyn Collidable {
        self.collider_a
    }
    #[inline]
    pub fn collider_b(&self) -> Participant<'a> {
        self.collider_b
    }
    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }
    #[inline]
    pub fn set_colliding(&mut self, colliding: bool) {
        self.colliding = colliding;
    }

    #[inline]
    pub fn set_attr<T: AttrType>(&mut self, name: &str, value: T) {
        self.attrs.set(name, value)
    }
    #[inline]
    pub fn get_attr<T: AttrType>(&self, name: &str) -> Result<T, CollisionError> {
        self.attrs.get(name)
    }
    #[inline]
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }
    #[inline]
    pub(crate) fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }
}
impl Debug for CollisionResponse<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("CollisionResponse")
            .field("collider_a", &Participant::Shape(self.collider_a))
            .field("collider_b", &self.collider_b)
            .field("colliding", &self.colliding)
            .field("attrs", &self.attrs)
            .finish()
    }
}
