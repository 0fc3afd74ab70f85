use std::cmp::Ordering;
use std::ops::Index;

use crate::consts::{ SURFACE_OFFSET, VACUUM_RI };
use crate::error::Result;
use crate::ray::Ray;
use crate::shape::{ ShapeId, Shapes };
use crate::tuple::Tuple;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is the offset along the ray; `shape` identifies what was hit. `u` and `v`
/// locate the hit on surfaces that are parametrized, and are zero otherwise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub shape: ShapeId,
    pub u: f64,
    pub v: f64,
}

impl Intersection {
    pub fn new(t: f64, shape: ShapeId) -> Intersection {
        Intersection { t, shape, u: 0.0, v: 0.0 }
    }

    pub fn with_uv(t: f64, shape: ShapeId, u: f64, v: f64) -> Intersection {
        Intersection { t, shape, u, v }
    }
}

/// A collection of intersections, always sorted ascending by `t`.
///
/// # Examples
///
/// ```
/// # use recursive_ray_tracer::intersect::{ Intersection, Intersections };
/// # use recursive_ray_tracer::shape::{ Shape, Shapes };
/// let mut shapes = Shapes::new();
/// let s = shapes.insert(Shape::sphere());
///
/// let xs = Intersections::new(vec![
///     Intersection::new(5.0, s),
///     Intersection::new(7.0, s),
///     Intersection::new(-3.0, s),
///     Intersection::new(2.0, s),
/// ]);
/// assert_eq!(xs.hit().map(|i| i.t), Some(2.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intersections {
    intersections: Vec<Intersection>,
}

impl Intersections {
    /// Creates a sorted list of intersections.
    pub fn new(intersections: Vec<Intersection>) -> Intersections {
        let mut xs = Intersections { intersections };
        xs.sort();
        xs
    }

    pub fn empty() -> Intersections {
        Intersections { intersections: Vec::new() }
    }

    /// Merges several lists into one sorted list.
    pub fn aggregate(lists: Vec<Intersections>) -> Intersections {
        let all = lists.into_iter().flat_map(|xs| xs.intersections).collect();
        Intersections::new(all)
    }

    /// Stable sort by `t`. Unordered values (NaN) are left where they are
    /// relative to their neighbours.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(Ordering::Equal)
        );
    }

    /// The first intersection with a positive `t`, if there is one.
    ///
    /// Intersections behind the ray origin are never hits.
    pub fn hit(&self) -> Option<Intersection> {
        self.intersections.iter().find(|i| i.t > 0.0).copied()
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Intersection> {
        self.intersections.iter()
    }
}

impl Index<usize> for Intersections {
    type Output = Intersection;

    fn index(&self, i: usize) -> &Intersection {
        &self.intersections[i]
    }
}

impl From<Vec<Intersection>> for Intersections {
    fn from(intersections: Vec<Intersection>) -> Intersections {
        Intersections::new(intersections)
    }
}

/// A record for computations associated with an `Intersection`.
///
/// Mostly a superset of an `Intersection`: everything shading needs to know
/// about a hit, computed once.
#[derive(Copy, Clone, Debug)]
pub struct IntersectionComputation {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub shape: ShapeId,

    /// The point where the intersection occurs.
    pub point: Tuple,

    /// The eye vector for the intersection.
    pub eye_vector: Tuple,

    /// The surface normal, flipped to face the eye.
    pub normal: Tuple,

    /// Whether the ray started inside the object.
    pub inside: bool,

    /// The intersection ray, reflected across the normal.
    pub reflect_vector: Tuple,

    /// The refractive index of the material being exited.
    pub n1: f64,

    /// The refractive index of the material being entered.
    pub n2: f64,

    /// A point slightly above the intersected surface. Used to prevent an
    /// object from shadowing itself (this causes "acne").
    pub over_point: Tuple,

    /// A point slightly below the intersected surface, where refracted rays
    /// start.
    pub under_point: Tuple,
}

impl IntersectionComputation {
    /// Prepares the shading inputs for `hit`, an intersection of `ray`.
    ///
    /// `xs` is every intersection along the ray, needed to work out which
    /// transparent shapes the ray is inside. Without it, `hit` is treated as
    /// the only intersection.
    pub fn new(shapes: &Shapes, ray: &Ray, hit: &Intersection,
        xs: Option<&Intersections>) -> Result<IntersectionComputation> {
        let t = hit.t;
        let point = ray.position(t);
        let eye_vector = -ray.direction;
        let mut normal = shapes.shape(hit.shape).normal_at(point, hit)?;

        let inside = if normal.dot(&eye_vector)? < 0.0 {
            normal = -normal;
            true
        } else {
            false
        };

        let reflect_vector = ray.direction.reflect(&normal)?;
        let over_point = point + normal * SURFACE_OFFSET;
        let under_point = point - normal * SURFACE_OFFSET;

        let (n1, n2) = match xs {
            Some(xs) => Self::refractive_indices(shapes, hit, xs.iter()),
            None => Self::refractive_indices(shapes, hit, std::iter::once(hit)),
        };

        Ok(IntersectionComputation {
            t,
            shape: hit.shape,
            point,
            eye_vector,
            normal,
            inside,
            reflect_vector,
            n1,
            n2,
            over_point,
            under_point,
        })
    }

    /// Walks the intersections in order, tracking which shapes the ray is
    /// inside, and reads the indices on either side of `hit`.
    fn refractive_indices<'a, I>(shapes: &Shapes, hit: &Intersection, xs: I)
        -> (f64, f64)
        where I: Iterator<Item = &'a Intersection> {
        let top = |containers: &Vec<ShapeId>| match containers.last() {
            Some(&id) => shapes[id].material.refractive_index(),
            None => VACUUM_RI,
        };

        let mut n1 = VACUUM_RI;
        let mut n2 = VACUUM_RI;

        // Shapes entered but not yet exited, innermost last.
        let mut containers: Vec<ShapeId> = Vec::new();

        for i in xs {
            let is_hit = i == hit;
            if is_hit {
                n1 = top(&containers);
            }

            match containers.iter().position(|&id| id == i.shape) {
                Some(j) => { containers.remove(j); },
                None => containers.push(i.shape),
            }

            if is_hit {
                n2 = top(&containers);
                break;
            }
        }

        (n1, n2)
    }

    /// Calculates the reflectance of a hit using Schlick's approximation.
    ///
    /// The reflectance is a number between 0 and 1, representing what fraction
    /// of the light is reflected for the hit.
    pub fn schlick(&self) -> Result<f64> {
        let mut cos = self.eye_vector.dot(&self.normal)?;

        // Total internal reflection can only occur if n1 > n2.
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));

            if sin2_t > 1.0 {
                return Ok(1.0);
            }

            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        Ok(r0 + (1.0 - r0) * (1.0 - cos).powi(5))
    }
}

#[cfg(test)]
use crate::{ material::Material, matrix::Matrix, shape::Shape };

#[cfg(test)]
fn glass_sphere() -> Shape {
    let glass = Material::builder()
        .transparency(1.0)
        .refractive_index(1.5)
        .build()
        .unwrap();

    Shape::sphere().with_material(glass)
}

#[cfg(test)]
fn test_ray(origin: Tuple, direction: Tuple) -> Ray {
    Ray::new(origin, direction).unwrap()
}

#[test]
fn hit_with_all_positive() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = Intersections::new(vec![
        Intersection::new(2.0, s),
        Intersection::new(1.0, s),
    ]);

    assert_eq!(xs.hit(), Some(Intersection::new(1.0, s)));
}

#[test]
fn hit_with_some_negative() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = Intersections::new(vec![
        Intersection::new(1.0, s),
        Intersection::new(-1.0, s),
    ]);

    assert_eq!(xs.hit(), Some(Intersection::new(1.0, s)));
}

#[test]
fn hit_with_all_negative() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = Intersections::new(vec![
        Intersection::new(-2.0, s),
        Intersection::new(-1.0, s),
    ]);

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_ignores_zero() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = Intersections::new(vec![
        Intersection::new(0.0, s),
        Intersection::new(3.0, s),
    ]);

    assert_eq!(xs.hit().map(|i| i.t), Some(3.0));
}

#[test]
fn sort_is_stable() {
    let mut shapes = Shapes::new();
    let a = shapes.insert(Shape::sphere());
    let b = shapes.insert(Shape::sphere());
    let xs = Intersections::new(vec![
        Intersection::new(2.0, a),
        Intersection::new(1.0, a),
        Intersection::new(1.0, b),
    ]);

    assert_eq!(xs[0].shape, a);
    assert_eq!(xs[1].shape, b);
    assert_eq!(xs[2].t, 2.0);
}

#[test]
fn intersection_carries_uv() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let i = Intersection::with_uv(3.5, s, 0.2, 0.4);

    assert_eq!(i.u, 0.2);
    assert_eq!(i.v, 0.4);
    assert_eq!(Intersection::new(3.5, s).u, 0.0);
}

#[test]
fn precompute_outside_intersection() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, s);
    let comps = IntersectionComputation::new(&shapes, &r, &i, None).unwrap();

    assert_eq!(comps.t, 4.0);
    assert_eq!(comps.shape, s);
    assert_eq!(comps.point, Tuple::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eye_vector, Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normal, Tuple::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_intersection() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let r = test_ray(Tuple::point(0.0, 0.0, 0.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(1.0, s);
    let comps = IntersectionComputation::new(&shapes, &r, &i, None).unwrap();

    assert_eq!(comps.point, Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eye_vector, Tuple::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
    assert_eq!(comps.normal, Tuple::vector(0.0, 0.0, -1.0));
}

#[test]
fn precompute_reflection_vector() {
    let mut shapes = Shapes::new();
    let p = shapes.insert(Shape::plane());
    let r2 = 2f64.sqrt() / 2.0;
    let r = test_ray(Tuple::point(0.0, 1.0, -1.0), Tuple::vector(0.0, -r2, r2));
    let i = Intersection::new(2f64.sqrt(), p);
    let comps = IntersectionComputation::new(&shapes, &r, &i, None).unwrap();

    assert_eq!(comps.reflect_vector, Tuple::vector(0.0, r2, r2));
}

#[test]
fn hit_should_offset_point() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(
        Shape::sphere().with_transform(Matrix::translation(0.0, 0.0, 1.0)).unwrap()
    );
    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(5.0, s);
    let comps = IntersectionComputation::new(&shapes, &r, &i, None).unwrap();

    assert!(comps.over_point.z < -SURFACE_OFFSET / 2.0);
    assert!(comps.point.z > comps.over_point.z);
    assert!(comps.under_point.z > SURFACE_OFFSET / 2.0);
    assert!(comps.point.z < comps.under_point.z);
}

#[test]
fn finding_n1_and_n2_at_various_intersections() {
    let mut shapes = Shapes::new();
    let glass = |ri: f64, transform: Matrix| {
        let m = Material::builder()
            .transparency(1.0)
            .refractive_index(ri)
            .build()
            .unwrap();
        Shape::sphere().with_material(m).with_transform(transform).unwrap()
    };

    let a = shapes.insert(glass(1.5, Matrix::scaling(2.0, 2.0, 2.0)));
    let b = shapes.insert(glass(2.0, Matrix::translation(0.0, 0.0, -0.25)));
    let c = shapes.insert(glass(2.5, Matrix::translation(0.0, 0.0, 0.25)));

    let r = test_ray(Tuple::point(0.0, 0.0, -4.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = Intersections::new(vec![
        Intersection::new(2.0, a),
        Intersection::new(2.75, b),
        Intersection::new(3.25, c),
        Intersection::new(4.75, b),
        Intersection::new(5.25, c),
        Intersection::new(6.0, a),
    ]);

    let expected = [
        (1.0, 1.5), (1.5, 2.0), (2.0, 2.5), (2.5, 2.5), (2.5, 1.5), (1.5, 1.0),
    ];

    for (i, (n1, n2)) in expected.iter().enumerate() {
        let comps = IntersectionComputation::new(&shapes, &r, &xs[i], Some(&xs))
            .unwrap();
        assert_eq!((comps.n1, comps.n2), (*n1, *n2));
    }
}

#[test]
fn lone_intersection_uses_its_own_index() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(glass_sphere());
    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let comps = IntersectionComputation::new(&shapes, &r, &Intersection::new(4.0, s), None)
        .unwrap();

    assert_eq!((comps.n1, comps.n2), (1.0, 1.5));
}

#[test]
fn schlick_under_total_internal_reflection() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(glass_sphere());
    let r2 = 2f64.sqrt() / 2.0;
    let r = test_ray(Tuple::point(0.0, 0.0, r2), Tuple::vector(0.0, 1.0, 0.0));
    let xs = Intersections::new(vec![
        Intersection::new(-r2, s),
        Intersection::new(r2, s),
    ]);
    let comps = IntersectionComputation::new(&shapes, &r, &xs[1], Some(&xs)).unwrap();

    assert_eq!(comps.schlick().unwrap(), 1.0);
}

#[test]
fn schlick_with_perpendicular_viewing_angle() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(glass_sphere());
    let r = test_ray(Tuple::point(0.0, 0.0, 0.0), Tuple::vector(0.0, 1.0, 0.0));
    let xs = Intersections::new(vec![
        Intersection::new(-1.0, s),
        Intersection::new(1.0, s),
    ]);
    let comps = IntersectionComputation::new(&shapes, &r, &xs[1], Some(&xs)).unwrap();

    approx::assert_abs_diff_eq!(comps.schlick().unwrap(), 0.04, epsilon = 1e-4);
}

#[test]
fn schlick_with_small_angle_and_n2_greater() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(glass_sphere());
    let r = test_ray(Tuple::point(0.0, 0.99, -2.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = Intersections::new(vec![Intersection::new(1.8589, s)]);
    let comps = IntersectionComputation::new(&shapes, &r, &xs[0], Some(&xs)).unwrap();

    approx::assert_abs_diff_eq!(comps.schlick().unwrap(), 0.48873, epsilon = 1e-4);
}
