use crate::error::Result;
use crate::matrix::Matrix;
use crate::tuple::{ Kind, Tuple };

/// A ray with a point of origin and a direction.
///
/// The kinds are checked once, in `Ray::new`; every other operation keeps
/// them intact.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    /// Creates a ray. Fails unless `origin` is a point and `direction` is a
    /// vector.
    pub fn new(origin: Tuple, direction: Tuple) -> Result<Ray> {
        Ok(Ray {
            origin: origin.check_kind(Kind::Point)?,
            direction: direction.check_kind(Kind::Vector)?,
        })
    }

    /// The point `t` units of `direction` away from the origin.
    pub fn position(&self, t: f64) -> Tuple {
        self.origin + self.direction * t
    }

    pub fn transform(&self, m: &Matrix) -> Ray {
        Ray {
            origin: *m * self.origin,
            direction: *m * self.direction,
        }
    }
}

#[test]
fn ray_rejects_wrong_kinds() {
    let p = Tuple::point(1.0, 2.0, 3.0);
    let v = Tuple::vector(4.0, 5.0, 6.0);

    assert!(Ray::new(p, v).is_ok());
    assert!(Ray::new(v, v).is_err());
    assert!(Ray::new(p, p).is_err());
}

#[test]
fn ray_position() {
    let r = Ray::new(
                Tuple::point(2.0, 3.0, 4.0),
                Tuple::vector(1.0, 0.0, 0.0)
            ).unwrap();

    assert_eq!(r.position(0.0), Tuple::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple::point(4.5, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray::new(
                Tuple::point(1.0, 2.0, 3.0),
                Tuple::vector(0.0, 1.0, 0.0)
            ).unwrap();
    let t = r.transform(&Matrix::translation(3.0, 4.0, 5.0));

    assert_eq!(t.origin, Tuple::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(r.origin, Tuple::point(1.0, 2.0, 3.0));
}

#[test]
fn ray_scaling() {
    let r = Ray::new(
                Tuple::point(1.0, 2.0, 3.0),
                Tuple::vector(0.0, 1.0, 0.0)
            ).unwrap();
    let t = r.transform(&Matrix::scaling(2.0, 3.0, 4.0));

    assert_eq!(t.origin, Tuple::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 3.0, 0.0));
}
