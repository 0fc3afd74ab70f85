use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::feq;
use crate::error::{ Result, TraceError };
use crate::tuple::{ Kind, Tuple };

/// A 4x4 matrix encoding an affine transform in homogeneous coordinates.
///
/// Matrices compose by multiplication, which is not commutative: for a
/// point `p`, `C * B * A * p` applies `A` first, then `B`, then `C`.
///
/// Every shape, pattern and camera owns its own copy of its transform; the
/// type is a plain `Copy` value.
///
/// # Examples
///
/// Scale a point, then move it:
///
/// ```
/// # use recursive_ray_tracer::tuple::Tuple;
/// # use recursive_ray_tracer::matrix::Matrix;
/// let m = Matrix::translation(10.0, 5.0, 7.0) * Matrix::scaling(5.0, 5.0, 5.0);
/// let p = Tuple::point(1.0, 0.0, 1.0);
/// assert_eq!(m * p, Tuple::point(15.0, 5.0, 12.0));
///
/// let back = m.inverse().unwrap() * (m * p);
/// assert_eq!(back, p);
/// ```
#[derive(Copy, Clone, Debug, PartialOrd)]
pub struct Matrix {
    data: [f64; 16],
}

/// Matrices are compared element-wise within `FEQ_EPSILON`.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Default for Matrix {
    fn default() -> Matrix {
        Matrix::identity()
    }
}

impl Matrix {
    /// A matrix of all zeroes.
    pub fn zero() -> Matrix {
        Matrix { data: [0.0; 16] }
    }

    pub fn identity() -> Matrix {
        let mut m = Matrix::zero();
        for i in 0..4 {
            m[(i, i)] = 1.0;
        }

        m
    }

    /// Offsets points by `x`, `y` and `z`. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        let mut m = Matrix::identity();
        m[(0, 3)] = x;
        m[(1, 3)] = y;
        m[(2, 3)] = z;

        m
    }

    /// Scales along the X, Y and Z axes. Negative factors reflect.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
        let mut m = Matrix::identity();
        m[(0, 0)] = x;
        m[(1, 1)] = y;
        m[(2, 2)] = z;

        m
    }

    /// Rotation about the X axis by `r` radians.
    ///
    /// ```
    /// # use recursive_ray_tracer::tuple::Tuple;
    /// # use recursive_ray_tracer::matrix::Matrix;
    /// let m = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * Tuple::point(0.0, 1.0, 0.0), Tuple::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix {
        let mut m = Matrix::identity();
        m[(1, 1)] =  r.cos();
        m[(1, 2)] = -r.sin();
        m[(2, 1)] =  r.sin();
        m[(2, 2)] =  r.cos();

        m
    }

    /// Rotation about the Y axis by `r` radians.
    pub fn rotation_y(r: f64) -> Matrix {
        let mut m = Matrix::identity();
        m[(0, 0)] =  r.cos();
        m[(0, 2)] =  r.sin();
        m[(2, 0)] = -r.sin();
        m[(2, 2)] =  r.cos();

        m
    }

    /// Rotation about the Z axis by `r` radians.
    pub fn rotation_z(r: f64) -> Matrix {
        let mut m = Matrix::identity();
        m[(0, 0)] =  r.cos();
        m[(0, 1)] = -r.sin();
        m[(1, 0)] =  r.sin();
        m[(1, 1)] =  r.cos();

        m
    }

    /// Combined rotation about all three axes.
    ///
    /// The X rotation is applied first, then Y, then Z (the product is
    /// `Rz * Ry * Rx`).
    pub fn rotate(x: f64, y: f64, z: f64) -> Matrix {
        Matrix::rotation_z(z) * Matrix::rotation_y(y) * Matrix::rotation_x(x)
    }

    /// A shearing transform.
    ///
    /// Each parameter moves one coordinate in proportion to another; `xy`
    /// moves `x` in proportion to `y`, `zx` moves `z` in proportion to `x`,
    /// and so on.
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix {
        let mut m = Matrix::identity();
        m[(0, 1)] = xy;
        m[(0, 2)] = xz;
        m[(1, 0)] = yx;
        m[(1, 2)] = yz;
        m[(2, 0)] = zx;
        m[(2, 1)] = zy;

        m
    }

    /// Generates a view transformation.
    ///
    /// The eye sits at point `from`, looks toward point `to`, and `up` is a
    /// vector giving roughly which way is up. The result moves the *world*
    /// so that the eye ends up at the origin looking down -Z.
    pub fn view_transform(from: Tuple, to: Tuple, up: Tuple) -> Result<Matrix> {
        from.check_kind(Kind::Point)?;
        to.check_kind(Kind::Point)?;

        let forward = (to - from).normalize()?;
        let left = forward.cross(&up.normalize()?)?;
        let true_up = left.cross(&forward)?;

        let orientation: Matrix = [
             left.x,     left.y,     left.z,    0.0,
             true_up.x,  true_up.y,  true_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
             0.0,        0.0,        0.0,       1.0,
        ].into();

        Ok(orientation * Matrix::translation(-from.x, -from.y, -from.z))
    }

    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix::zero();
        for r in 0..4 {
            for c in 0..4 {
                t[(c, r)] = self[(r, c)];
            }
        }

        t
    }

    /// The determinant of the 3x3 matrix left after removing `row` and
    /// `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        let mut sub = [0.0; 9];
        let mut n = 0;

        for r in (0..4).filter(|&r| r != row) {
            for c in (0..4).filter(|&c| c != col) {
                sub[n] = self[(r, c)];
                n += 1;
            }
        }

        sub[0] * (sub[4] * sub[8] - sub[5] * sub[7])
            - sub[1] * (sub[3] * sub[8] - sub[5] * sub[6])
            + sub[2] * (sub[3] * sub[7] - sub[4] * sub[6])
    }

    /// The minor at `row`, `col`, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        if (row + col) % 2 == 0 { m } else { -m }
    }

    pub fn determinant(&self) -> f64 {
        (0..4).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }

    /// Calculates the inverse of this matrix.
    ///
    /// Fails with `SingularMatrix` when the determinant is zero.
    pub fn inverse(&self) -> Result<Matrix> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(TraceError::SingularMatrix);
        }

        let mut inv = Matrix::zero();
        for r in 0..4 {
            for c in 0..4 {
                inv[(c, r)] = self.cofactor(r, c) / det;
            }
        }

        Ok(inv)
    }
}

/// Row-major construction from 16 elements.
impl From<[f64; 16]> for Matrix {
    fn from(data: [f64; 16]) -> Matrix {
        Matrix { data }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 4) + index.1]
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Matrix {
        let mut res = Matrix::zero();

        for r in 0..4 {
            for c in 0..4 {
                res[(r, c)] = (0..4).map(|k| self[(r, k)] * other[(k, c)]).sum();
            }
        }

        res
    }
}

/// Transforms a tuple, treating it as the column `(x, y, z, w)`.
///
/// The kind of the result is read back from the transformed `w`. Affine
/// transforms therefore keep points as points and vectors as vectors.
impl Mul<Tuple> for Matrix {
    type Output = Tuple;

    fn mul(self, t: Tuple) -> Tuple {
        let col = [t.x, t.y, t.z, t.w()];
        let mut out = [0.0; 4];

        for (r, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|c| self[(r, c)] * col[c]).sum();
        }

        Tuple::new(out[0], out[1], out[2], Kind::from_w(out[3]))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            write!(f, "|")?;
            for c in 0..4 {
                write!(f, " {} |", self[(r, c)])?;
            }

            if r != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn identity() {
    let i = Matrix::identity();
    let a: Matrix = [ 0.0, 1.0,  2.0,  4.0,
                      1.0, 2.0,  4.0,  8.0,
                      2.0, 4.0,  8.0, 16.0,
                      4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(i * Tuple::point(1.0, 2.0, 3.0), Tuple::point(1.0, 2.0, 3.0));
}

#[test]
fn multiply() {
    let a: Matrix = [ 1.0, 2.0, 3.0, 4.0,
                      5.0, 6.0, 7.0, 8.0,
                      9.0, 8.0, 7.0, 6.0,
                      5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix = [ -2.0, 1.0, 2.0,  3.0,
                       3.0, 2.0, 1.0, -1.0,
                       4.0, 3.0, 6.0,  5.0,
                       1.0, 2.0, 7.0,  8.0, ].into();

    let c: Matrix = [ 20.0, 22.0,  50.0,  48.0,
                      44.0, 54.0, 114.0, 108.0,
                      40.0, 58.0, 110.0, 102.0,
                      16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, c);
}

#[test]
fn transpose() {
    let a: Matrix = [ 0.0, 9.0, 3.0, 0.0,
                      9.0, 8.0, 0.0, 8.0,
                      1.0, 8.0, 5.0, 3.0,
                      0.0, 0.0, 5.0, 8.0, ].into();

    let t: Matrix = [ 0.0, 9.0, 1.0, 0.0,
                      9.0, 8.0, 8.0, 0.0,
                      3.0, 0.0, 5.0, 5.0,
                      0.0, 8.0, 3.0, 8.0, ].into();

    assert_eq!(a.transpose(), t);
    assert_eq!(t.transpose(), a);
    assert_eq!(Matrix::identity().transpose(), Matrix::identity());
}

#[test]
fn determinant() {
    let a: Matrix = [ -2.0, -8.0,  3.0,  5.0,
                      -3.0,  1.0,  7.0,  3.0,
                       1.0,  2.0, -9.0,  6.0,
                      -6.0,  7.0,  7.0, -9.0, ].into();

    assert_eq!(a.cofactor(0, 0), 690.0);
    assert_eq!(a.cofactor(0, 1), 447.0);
    assert_eq!(a.cofactor(0, 2), 210.0);
    assert_eq!(a.cofactor(0, 3), 51.0);
    assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn inverse() {
    let a: Matrix = [  8.0, -5.0,  9.0,  2.0,
                       7.0,  5.0,  6.0,  1.0,
                      -6.0,  0.0,  9.0,  6.0,
                      -3.0,  0.0, -9.0, -4.0, ].into();

    let i: Matrix = [ -0.15385, -0.15385, -0.28205, -0.53846,
                      -0.07692,  0.12308,  0.02564,  0.03077,
                       0.35897,  0.35897,  0.43590,  0.92308,
                      -0.69231, -0.69231, -0.76923, -1.92308, ].into();

    assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn product_times_inverse() {
    let a: Matrix = [  3.0, -9.0,  7.0,  3.0,
                       3.0,  8.0,  2.0, -9.0,
                      -4.0,  4.0,  4.0,  1.0,
                      -6.0,  5.0, -1.0,  1.0, ].into();

    let b: Matrix = [ 8.0,  2.0, 2.0, 2.0,
                      3.0, -1.0, 7.0, 0.0,
                      7.0,  0.0, 5.0, 4.0,
                      6.0, -2.0, 0.0, 5.0, ].into();

    let c = a * b;
    assert_eq!(c * b.inverse().unwrap(), a);
}

#[test]
fn singular_matrix_has_no_inverse() {
    let a: Matrix = [ -4.0,  2.0, -2.0, -3.0,
                       9.0,  6.0,  2.0,  6.0,
                       0.0, -5.0,  1.0, -5.0,
                       0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(a.determinant(), 0.0);
    assert!(matches!(a.inverse(), Err(TraceError::SingularMatrix)));
    assert!(Matrix::scaling(0.0, 1.0, 1.0).inverse().is_err());
}

#[test]
fn inverse_undoes_transform() {
    let transforms = [
        Matrix::translation(5.0, -3.0, 2.0),
        Matrix::scaling(2.0, 0.5, -4.0),
        Matrix::rotate(0.3, -1.2, 2.5),
        Matrix::shearing(1.0, 0.0, 0.5, 0.0, 0.0, 2.0),
        Matrix::translation(1.0, 2.0, 3.0) * Matrix::rotation_y(0.7)
            * Matrix::scaling(3.0, 3.0, 3.0),
    ];
    let p = Tuple::point(-3.0, 4.0, 5.0);

    for m in transforms.iter() {
        assert_eq!(m.inverse().unwrap() * (*m * p), p);
    }
}

#[test]
fn translation() {
    let transform = Matrix::translation(5.0, -3.0, 2.0);
    let p = Tuple::point(-3.0, 4.0, 5.0);
    let v = Tuple::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * p, Tuple::point(2.0, 1.0, 7.0));
    assert_eq!(transform.inverse().unwrap() * p, Tuple::point(-8.0, 7.0, 3.0));
    assert_eq!(transform * v, v);
}

#[test]
fn scaling() {
    let transform = Matrix::scaling(2.0, 3.0, 4.0);

    assert_eq!(transform * Tuple::point(-4.0, 6.0, 8.0),
        Tuple::point(-8.0, 18.0, 32.0));
    assert_eq!(transform * Tuple::vector(-4.0, 6.0, 8.0),
        Tuple::vector(-8.0, 18.0, 32.0));
    assert_eq!(transform.inverse().unwrap() * Tuple::vector(-4.0, 6.0, 8.0),
        Tuple::vector(-2.0, 2.0, 2.0));
    assert_eq!(Matrix::scaling(-1.0, 1.0, 1.0) * Tuple::point(2.0, 3.0, 4.0),
        Tuple::point(-2.0, 3.0, 4.0));
}

#[test]
fn rotations() {
    let r2 = 2f64.sqrt() / 2.0;
    let quarter = std::f64::consts::PI / 2.0;
    let eighth = std::f64::consts::PI / 4.0;

    assert_eq!(Matrix::rotation_x(eighth) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(0.0, r2, r2));
    assert_eq!(Matrix::rotation_y(quarter) * Tuple::point(0.0, 0.0, 1.0),
        Tuple::point(1.0, 0.0, 0.0));
    assert_eq!(Matrix::rotation_y(eighth) * Tuple::point(0.0, 0.0, 1.0),
        Tuple::point(r2, 0.0, r2));
    assert_eq!(Matrix::rotation_z(quarter) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(-1.0, 0.0, 0.0));
    assert_eq!(Matrix::rotation_z(eighth) * Tuple::point(0.0, 1.0, 0.0),
        Tuple::point(-r2, r2, 0.0));
}

#[test]
fn combined_rotation_applies_x_first() {
    let quarter = std::f64::consts::PI / 2.0;
    let m = Matrix::rotate(quarter, quarter, 0.0);

    assert_eq!(m * Tuple::point(0.0, 1.0, 0.0), Tuple::point(1.0, 0.0, 0.0));
}

#[test]
fn shearing() {
    let p = Tuple::point(2.0, 3.0, 4.0);
    let cases = [
        ([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], Tuple::point(5.0, 3.0, 4.0)),
        ([0.0, 1.0, 0.0, 0.0, 0.0, 0.0], Tuple::point(6.0, 3.0, 4.0)),
        ([0.0, 0.0, 1.0, 0.0, 0.0, 0.0], Tuple::point(2.0, 5.0, 4.0)),
        ([0.0, 0.0, 0.0, 1.0, 0.0, 0.0], Tuple::point(2.0, 7.0, 4.0)),
        ([0.0, 0.0, 0.0, 0.0, 1.0, 0.0], Tuple::point(2.0, 3.0, 6.0)),
        ([0.0, 0.0, 0.0, 0.0, 0.0, 1.0], Tuple::point(2.0, 3.0, 7.0)),
    ];

    for (s, expected) in cases.iter() {
        let m = Matrix::shearing(s[0], s[1], s[2], s[3], s[4], s[5]);
        assert_eq!(m * p, *expected);
    }
}

#[test]
fn chained_transforms() {
    let a = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix::scaling(5.0, 5.0, 5.0);
    let c = Matrix::translation(10.0, 5.0, 7.0);
    let p = Tuple::point(1.0, 0.0, 1.0);

    assert_eq!(c * (b * (a * p)), Tuple::point(15.0, 0.0, 7.0));
    assert_eq!(c * b * a * p, Tuple::point(15.0, 0.0, 7.0));
}

#[test]
fn default_view() {
    let from = Tuple::point(0.0, 0.0, 0.0);
    let to = Tuple::point(0.0, 0.0, -1.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::view_transform(from, to, up).unwrap(), Matrix::identity());
}

#[test]
fn positive_z_view() {
    let from = Tuple::point(0.0, 0.0, 0.0);
    let to = Tuple::point(0.0, 0.0, 1.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::view_transform(from, to, up).unwrap(),
        Matrix::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Tuple::point(0.0, 0.0, 8.0);
    let to = Tuple::point(0.0, 0.0, 0.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::view_transform(from, to, up).unwrap(),
        Matrix::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple::point(1.0, 3.0, 2.0);
    let to = Tuple::point(4.0, -2.0, 8.0);
    let up = Tuple::vector(1.0, 1.0, 0.0);

    let a: Matrix = [ -0.50709, 0.50709,  0.67612, -2.36643,
                       0.76772, 0.60609,  0.12122, -2.82843,
                      -0.35857, 0.59761, -0.71714,  0.00000,
                       0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix::view_transform(from, to, up).unwrap(), a);
}

#[test]
fn view_rejects_mismatched_kinds() {
    let p = Tuple::point(0.0, 0.0, 0.0);
    let v = Tuple::vector(0.0, 1.0, 0.0);

    assert!(Matrix::view_transform(p, Tuple::point(0.0, 0.0, -1.0), p).is_err());
    assert!(Matrix::view_transform(p, v, v).is_err());
}
