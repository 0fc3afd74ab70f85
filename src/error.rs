use crate::shape::ShapeId;
use crate::tuple::Kind;

/// Errors raised by the ray tracer.
///
/// None of these are recovered from internally. A malformed scene or a
/// malformed geometric input aborts whatever operation detected it, and the
/// error is handed back to the caller as-is.
#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    /// A tuple operation received a point where a vector was required, or
    /// the other way around.
    #[error("invalid operand kind: expected a {expected}, found a {found}")]
    InvalidOperandKind { expected: Kind, found: Kind },

    /// A matrix without an inverse was inverted.
    #[error("matrix is singular and cannot be inverted")]
    SingularMatrix,

    /// A material was given a negative physical coefficient.
    #[error("invalid material: {0} must be non-negative")]
    InvalidMaterial(&'static str),

    /// A shape operation was invoked on a shape that has no meaning for it,
    /// e.g. asking a group for a surface normal.
    #[error("operation not applicable: {0}")]
    NotApplicable(&'static str),

    /// A group was asked to contain itself, directly or through descendants.
    #[error("adding {child:?} to {group:?} would make the group contain itself")]
    CyclicGroup { group: ShapeId, child: ShapeId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scene description error: {0}")]
    Scene(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TraceError>;
