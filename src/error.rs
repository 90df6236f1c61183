use crate::shapes::ShapeKind;
use thiserror::Error;

/// Errors raised by shape construction, shape mutation and collision queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// A raw-array constructor received an argument count it cannot expand.
    #[error("{kind} cannot be built from {count} arguments")]
    InvalidArgument { kind: ShapeKind, count: usize },

    /// The shape's representation cannot express the result of the operation.
    #[error("{kind} does not support {op}")]
    UnsupportedOperation { kind: ShapeKind, op: &'static str },

    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("collision response has no attribute `{0}`")]
    MissingAttribute(String),

    #[error("attribute `{name}` holds {found}, not {expected}")]
    AttributeType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}
