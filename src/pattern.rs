use crate::feq;
use crate::error::Result;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::shape::ShapeRef;
use crate::tuple::Tuple;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatternKind {
    /// Alternates between `a` and `b` every unit along X.
    Stripe,

    /// Blends linearly from `a` to `b` across each unit along X.
    Gradient,

    /// Concentric rings in the XZ plane, alternating every unit of radius.
    Ring,

    /// Alternating unit cubes in all three dimensions.
    Checker,

    /// The sampled point itself, as a color.
    #[cfg(test)]
    Point,
}

/// A two-color pattern with its own transform.
///
/// Patterns are sampled in pattern space, which sits inside the object space
/// of the shape carrying them. Transforming a pattern moves it relative to
/// its shape; transforming the shape moves both.
///
/// # Examples
///
/// ```
/// # use recursive_ray_tracer::color::Color;
/// # use recursive_ray_tracer::tuple::Tuple;
/// # use recursive_ray_tracer::pattern::Pattern;
/// let stripes = Pattern::stripe(Color::white(), Color::black());
///
/// assert_eq!(stripes.at_point(Tuple::point(0.5, 3.0, 0.0)), Color::white());
/// assert_eq!(stripes.at_point(Tuple::point(1.5, 3.0, 0.0)), Color::black());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub a: Color,
    pub b: Color,

    transform: Matrix,
    inverse: Matrix,
}

impl Pattern {
    fn new(kind: PatternKind, a: Color, b: Color) -> Pattern {
        Pattern {
            kind,
            a,
            b,
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
        }
    }

    pub fn stripe(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Stripe, a, b)
    }

    pub fn gradient(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Gradient, a, b)
    }

    pub fn ring(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Ring, a, b)
    }

    pub fn checker(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternKind::Checker, a, b)
    }

    #[cfg(test)]
    pub(crate) fn point_color() -> Pattern {
        Pattern::new(PatternKind::Point, Color::black(), Color::black())
    }

    /// Replaces the pattern transform. Fails if `transform` is singular.
    pub fn with_transform(mut self, transform: Matrix) -> Result<Pattern> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(self)
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Samples the pattern at a point in pattern space.
    pub fn at_point(&self, p: Tuple) -> Color {
        match self.kind {
            PatternKind::Stripe => self.alternate(p.x.floor()),
            PatternKind::Gradient => {
                let fraction = p.x - p.x.floor();
                self.a + (self.b - self.a) * fraction
            },
            PatternKind::Ring => {
                self.alternate((p.x.powi(2) + p.z.powi(2)).sqrt().floor())
            },
            PatternKind::Checker => {
                self.alternate(p.x.floor() + p.y.floor() + p.z.floor())
            },
            #[cfg(test)]
            PatternKind::Point => Color::rgb(p.x, p.y, p.z),
        }
    }

    /// Samples the pattern on `shape` at a point given in world space.
    ///
    /// The point is carried into the shape's object space (through any
    /// parent groups), then into pattern space.
    pub fn at_object(&self, shape: ShapeRef, world_point: Tuple) -> Color {
        let object_point = shape.world_to_object(world_point);
        self.at_point(self.inverse * object_point)
    }

    /// `a` when `n` is even, `b` when odd.
    fn alternate(&self, n: f64) -> Color {
        if feq(n.rem_euclid(2.0), 0.0) {
            self.a
        } else {
            self.b
        }
    }
}

#[cfg(test)]
use crate::shape::{ Shape, Shapes };

#[test]
fn stripe_pattern_is_constant_along_y_and_z() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    for i in 0..3 {
        let n = i as f64;
        assert_eq!(pattern.at_point(Tuple::point(0.0, n, 0.0)), Color::white());
        assert_eq!(pattern.at_point(Tuple::point(0.0, 0.0, n)), Color::white());
    }
}

#[test]
fn stripe_pattern_alternates_along_x() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.at_point(Tuple::point( 0.0, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.at_point(Tuple::point( 0.9, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.at_point(Tuple::point( 1.0, 0.0, 0.0)), Color::black());
    assert_eq!(pattern.at_point(Tuple::point(-0.1, 0.0, 0.0)), Color::black());
    assert_eq!(pattern.at_point(Tuple::point(-1.0, 0.0, 0.0)), Color::black());
    assert_eq!(pattern.at_point(Tuple::point(-1.1, 0.0, 0.0)), Color::white());
}

#[test]
fn gradient_blends_between_colors() {
    let pattern = Pattern::gradient(Color::white(), Color::black());

    assert_eq!(pattern.at_point(Tuple::point(0.0, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.at_point(Tuple::point(0.25, 0.0, 0.0)),
        Color::rgb(0.75, 0.75, 0.75));
    assert_eq!(pattern.at_point(Tuple::point(0.5, 0.0, 0.0)),
        Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(pattern.at_point(Tuple::point(0.75, 0.0, 0.0)),
        Color::rgb(0.25, 0.25, 0.25));
}

#[test]
fn ring_extends_in_x_and_z() {
    let pattern = Pattern::ring(Color::white(), Color::black());

    assert_eq!(pattern.at_point(Tuple::point(0.0, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.at_point(Tuple::point(1.0, 0.0, 0.0)), Color::black());
    assert_eq!(pattern.at_point(Tuple::point(0.0, 0.0, 1.0)), Color::black());
    assert_eq!(pattern.at_point(Tuple::point(0.708, 0.0, 0.708)), Color::black());
}

#[test]
fn checkers_repeat_in_each_dimension() {
    let pattern = Pattern::checker(Color::white(), Color::black());

    assert_eq!(pattern.at_point(Tuple::point(0.0, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.at_point(Tuple::point(0.99, 0.0, 0.0)), Color::white());
    assert_eq!(pattern.at_point(Tuple::point(1.01, 0.0, 0.0)), Color::black());
    assert_eq!(pattern.at_point(Tuple::point(0.0, 1.01, 0.0)), Color::black());
    assert_eq!(pattern.at_point(Tuple::point(0.0, 0.0, 1.01)), Color::black());
}

#[test]
fn stripes_with_object_transform() {
    let mut shapes = Shapes::new();
    let sphere = Shape::sphere()
        .with_transform(Matrix::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let id = shapes.insert(sphere);
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.at_object(shapes.shape(id), Tuple::point(1.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn stripes_with_pattern_transform() {
    let mut shapes = Shapes::new();
    let id = shapes.insert(Shape::sphere());
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix::scaling(2.0, 2.0, 2.0))
        .unwrap();

    assert_eq!(pattern.at_object(shapes.shape(id), Tuple::point(1.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn stripes_with_object_and_pattern_transform() {
    let mut shapes = Shapes::new();
    let sphere = Shape::sphere()
        .with_transform(Matrix::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let id = shapes.insert(sphere);
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix::translation(0.5, 0.0, 0.0))
        .unwrap();

    assert_eq!(pattern.at_object(shapes.shape(id), Tuple::point(2.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn singular_pattern_transform_is_rejected() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert!(pattern.with_transform(Matrix::scaling(1.0, 0.0, 1.0)).is_err());
}

#[test]
fn stripes_on_a_child_of_transformed_groups() {
    let mut shapes = Shapes::new();
    let outer = shapes.insert(
        Shape::group()
            .with_transform(Matrix::rotation_y(std::f64::consts::PI / 2.0))
            .unwrap()
    );
    let inner = shapes.insert(
        Shape::group().with_transform(Matrix::scaling(2.0, 2.0, 2.0)).unwrap()
    );
    let s = shapes.insert(
        Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0)).unwrap()
    );
    shapes.add_child(outer, inner).unwrap();
    shapes.add_child(inner, s).unwrap();

    let stripes = Pattern::stripe(Color::white(), Color::black());
    let sampled = Pattern::point_color();
    let world_point = Tuple::point(-2.0, 0.0, -10.0);

    // Both groups' transforms apply before the sphere's own
    assert_eq!(sampled.at_object(shapes.shape(s), world_point),
        Color::rgb(0.0, 0.0, -1.0));
    assert_eq!(stripes.at_object(shapes.shape(s), world_point), Color::white());
}
