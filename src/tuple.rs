use std::fmt;
use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;
use crate::error::{ Result, TraceError };

/// Whether a `Tuple` is a free vector or a position.
///
/// The discriminants double as the homogeneous `w` component, which is what
/// makes translation matrices move points but leave vectors alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Vector = 0,
    Point = 1,
}

impl Kind {
    /// The homogeneous `w` component for this kind.
    pub fn w(self) -> f64 {
        match self {
            Kind::Vector => 0.0,
            Kind::Point => 1.0,
        }
    }

    /// Recovers a kind from a homogeneous `w` component.
    ///
    /// Anything not (approximately) zero is treated as a point.
    pub fn from_w(w: f64) -> Kind {
        if feq(w, 0.0) {
            Kind::Vector
        } else {
            Kind::Point
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Vector => write!(f, "vector"),
            Kind::Point => write!(f, "point"),
        }
    }
}

/// A point or vector in 3D space.
///
/// Tuples are immutable values. Arithmetic carries the kind along with it:
/// subtracting two points yields a vector, and adding a vector to a point
/// yields a point.
///
/// # Examples
///
/// ```
/// use recursive_ray_tracer::tuple::Tuple;
///
/// let from = Tuple::point(1.0, 2.0, 3.0);
/// let to = Tuple::point(4.0, 6.0, 3.0);
///
/// let between = to - from;
/// assert!(between.is_vector());
/// assert_eq!(between.magnitude(), 5.0);
/// assert_eq!(from + between, to);
/// ```
#[derive(Copy, Clone, Debug, PartialOrd)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub kind: Kind,
}

/// Tuples are equal when their kinds match exactly and their components
/// match within `FEQ_EPSILON`.
impl PartialEq for Tuple {
    fn eq(&self, other: &Tuple) -> bool {
        self.kind == other.kind
            && feq(self.x, other.x)
            && feq(self.y, other.y)
            && feq(self.z, other.z)
    }
}

impl Tuple {
    pub fn new(x: f64, y: f64, z: f64, kind: Kind) -> Tuple {
        Tuple { x, y, z, kind }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, kind: Kind::Point }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, kind: Kind::Vector }
    }

    pub fn origin() -> Tuple {
        Tuple::point(0.0, 0.0, 0.0)
    }

    pub fn is_point(&self) -> bool {
        self.kind == Kind::Point
    }

    pub fn is_vector(&self) -> bool {
        self.kind == Kind::Vector
    }

    /// The homogeneous `w` component of this tuple.
    pub fn w(&self) -> f64 {
        self.kind.w()
    }

    /// Returns this tuple unchanged if it is of kind `expected`.
    pub fn check_kind(self, expected: Kind) -> Result<Tuple> {
        if self.kind == expected {
            Ok(self)
        } else {
            Err(TraceError::InvalidOperandKind { expected, found: self.kind })
        }
    }

    /// The Euclidean length of `(x, y, z)`. The kind plays no part.
    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    /// Scales a vector to unit length.
    pub fn normalize(&self) -> Result<Tuple> {
        self.check_kind(Kind::Vector)?;
        Ok(*self / self.magnitude())
    }

    pub fn dot(&self, other: &Tuple) -> Result<f64> {
        self.check_kind(Kind::Vector)?;
        other.check_kind(Kind::Vector)?;

        Ok(self.x * other.x + self.y * other.y + self.z * other.z)
    }

    pub fn cross(&self, other: &Tuple) -> Result<Tuple> {
        self.check_kind(Kind::Vector)?;
        other.check_kind(Kind::Vector)?;

        Ok(Tuple::vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        ))
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Tuple) -> Result<Tuple> {
        let d = self.dot(normal)?;
        Ok(*self - *normal * 2.0 * d)
    }
}

/// Component-wise addition; the result kind is the larger of the two kinds.
///
/// Point plus point is allowed and stays a point.
impl Add for Tuple {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            kind: self.kind.max(other.kind),
        }
    }
}

/// Component-wise subtraction; the result kind is `|kind1 - kind2|`, so two
/// points (or two vectors) give a vector and mixed operands give a point.
impl Sub for Tuple {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let kind = if self.kind == other.kind {
            Kind::Vector
        } else {
            Kind::Point
        };

        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            kind,
        }
    }
}

impl Neg for Tuple {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y, z: -self.z, kind: self.kind }
    }
}

impl Mul<f64> for Tuple {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self { x: self.x * s, y: self.y * s, z: self.z * s, kind: self.kind }
    }
}

impl Mul<Tuple> for f64 {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        t * self
    }
}

impl Div<f64> for Tuple {
    type Output = Self;

    fn div(self, s: f64) -> Self {
        Self { x: self.x / s, y: self.y / s, z: self.z / s, kind: self.kind }
    }
}

/* Tests */

#[test]
fn point_and_vector_kinds() {
    assert!(Tuple::point(4.3, -4.2, 3.1).is_point());
    assert!(Tuple::vector(4.3, -4.2, 3.1).is_vector());
    assert_ne!(Tuple::point(1.0, 2.0, 3.0), Tuple::vector(1.0, 2.0, 3.0));
}

#[test]
fn equality_is_approximate() {
    assert_eq!(Tuple::point(1.0, 2.0, 3.0), Tuple::point(1.00001, 2.0, 2.99999));
    assert_ne!(Tuple::point(1.0, 2.0, 3.0), Tuple::point(1.0, 2.1, 3.0));
}

#[test]
fn add_vector_to_point() {
    let p = Tuple::point(3.0, -2.0, 5.0);
    let v = Tuple::vector(-2.0, 3.0, 1.0);

    assert_eq!(p + v, Tuple::point(1.0, 1.0, 6.0));
}

#[test]
fn add_points_stays_a_point() {
    let a = Tuple::point(1.0, 1.0, 1.0);
    let b = Tuple::point(2.0, 2.0, 2.0);

    assert_eq!(a + b, Tuple::point(3.0, 3.0, 3.0));
}

#[test]
fn sub_points() {
    let p1 = Tuple::point(3.0, 2.0, 1.0);
    let p2 = Tuple::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Tuple::point(3.0, 2.0, 1.0);
    let v = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple::point(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vectors() {
    let v1 = Tuple::vector(3.0, 2.0, 1.0);
    let v2 = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(v1 - v2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn neg_keeps_kind() {
    let v = Tuple::vector(1.0, -2.0, 3.0);

    assert_eq!(-v, Tuple::vector(-1.0, 2.0, -3.0));
    assert!((-Tuple::origin()).is_point());
}

#[test]
fn mul_and_div_scalar() {
    let v = Tuple::vector(1.0, -2.0, 3.0);

    assert_eq!(v * 3.5, Tuple::vector(3.5, -7.0, 10.5));
    assert_eq!(0.5 * v, Tuple::vector(0.5, -1.0, 1.5));
    assert_eq!(v / 2.0, Tuple::vector(0.5, -1.0, 1.5));
}

#[test]
fn magnitude_ignores_kind() {
    assert_eq!(Tuple::vector(1.0, 2.0, 3.0).magnitude(), 14f64.sqrt());
    assert_eq!(Tuple::vector(-1.0, -2.0, -3.0).magnitude(), 14f64.sqrt());
    assert_eq!(Tuple::point(0.0, 3.0, 4.0).magnitude(), 5.0);
}

#[test]
fn normalize_vectors() {
    let v = Tuple::vector(1.0, 2.0, 3.0);
    let n = v.normalize().unwrap();
    let s = 14f64.sqrt();

    assert_eq!(Tuple::vector(4.0, 0.0, 0.0).normalize().unwrap(),
        Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(n, Tuple::vector(1.0 / s, 2.0 / s, 3.0 / s));
    approx::assert_abs_diff_eq!(n.magnitude(), 1.0, epsilon = 1e-10);
}

#[test]
fn normalizing_a_unit_vector_is_a_no_op() {
    let units = [
        Tuple::vector(1.0, 0.0, 0.0),
        Tuple::vector(0.0, -1.0, 0.0),
        Tuple::vector(0.6, 0.8, 0.0),
        Tuple::vector(3f64.sqrt() / 3.0, 3f64.sqrt() / 3.0, 3f64.sqrt() / 3.0),
    ];

    for v in units.iter() {
        assert_eq!(v.normalize().unwrap(), *v);
    }
}

#[test]
fn normalize_rejects_points() {
    let err = Tuple::point(1.0, 2.0, 3.0).normalize().unwrap_err();

    assert!(matches!(err, TraceError::InvalidOperandKind {
        expected: Kind::Vector, found: Kind::Point
    }));
}

#[test]
fn dot_vectors() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b).unwrap(), 20.0);
    assert!(a.dot(&Tuple::point(2.0, 3.0, 4.0)).is_err());
}

#[test]
fn cross_vectors() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b).unwrap(), Tuple::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a).unwrap(), Tuple::vector(1.0, -2.0, 1.0));
    assert!(Tuple::point(1.0, 2.0, 3.0).cross(&b).is_err());
}

#[test]
fn reflect_45() {
    let v = Tuple::vector(1.0, -1.0, 0.0);
    let n = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n).unwrap(), Tuple::vector(1.0, 1.0, 0.0));
}

#[test]
fn reflect_off_slanted_surface() {
    let v = Tuple::vector(0.0, -1.0, 0.0);
    let n = Tuple::vector(2f64.sqrt() / 2.0, 2f64.sqrt() / 2.0, 0.0);

    assert_eq!(v.reflect(&n).unwrap(), Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn reflect_rejects_points() {
    let n = Tuple::vector(0.0, 1.0, 0.0);

    assert!(Tuple::point(1.0, -1.0, 0.0).reflect(&n).is_err());
    assert!(Tuple::vector(1.0, -1.0, 0.0).reflect(&Tuple::origin()).is_err());
}
