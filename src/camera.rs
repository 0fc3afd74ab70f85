use std::time::Instant;

use log::{ debug, info };

use crate::canvas::Canvas;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::ray::Ray;
use crate::tuple::Tuple;
use crate::world::World;

/// A camera record for generating a canvas.
///
/// This record gives a "frame" of the world. Based on camera parameters,
/// different perspectives can be produced.
///
/// The camera sits at the origin of camera space looking down -Z, with the
/// canvas one unit in front of it. `transform` (typically a view transform)
/// orients the world relative to that.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    /// The angle describing "how much" the camera can see.
    pub field_of_view: f64,

    /// Render the last row and column of the canvas as well. Off by default,
    /// which leaves them black.
    pub full_coverage: bool,

    half_width: f64,
    half_height: f64,
    pixel_size: f64,

    transform: Matrix,
    inverse: Matrix,
}

impl Camera {
    /// Creates a camera. Fails if `transform` is singular.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64,
        transform: Matrix) -> Result<Camera> {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Ok(Camera {
            hsize,
            vsize,
            field_of_view,
            full_coverage: false,
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / (hsize as f64),
            transform,
            inverse: transform.inverse()?,
        })
    }

    pub fn set_transform(&mut self, transform: Matrix) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// The width of one (square) pixel, in camera-space units at the canvas.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// The ray from the camera through the center of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Result<Ray> {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The untransformed coordinates of the pixel; the camera looks toward
        // -Z, so +X is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Tuple::point(world_x, world_y, -1.0);
        let origin = self.inverse * Tuple::origin();
        let direction = (pixel - origin).normalize()?;

        Ray::new(origin, direction)
    }

    /// Renders `world` as seen by this camera, row by row.
    ///
    /// Unless `full_coverage` is set, the last row and column are skipped and
    /// left black.
    pub fn render(&self, world: &World) -> Result<Canvas> {
        let mut image = Canvas::new(self.hsize, self.vsize);

        let (rows, cols) = if self.full_coverage {
            (self.vsize, self.hsize)
        } else {
            (self.vsize.saturating_sub(1), self.hsize.saturating_sub(1))
        };

        info!("rendering {}x{} ({} bounces)", self.hsize, self.vsize,
            world.recursion_depth);
        let start = Instant::now();

        for y in 0..rows {
            for x in 0..cols {
                let ray = self.ray_for_pixel(x, y)?;
                let color = world.color_at(&ray, world.recursion_depth)?;
                image.write_pixel(x, y, color);
            }

            debug!("row {}/{} done", y + 1, rows);
        }

        info!("rendered in {:.2?}", start.elapsed());
        Ok(image)
    }
}

#[cfg(test)]
use crate::{ color::Color, light::PointLight, shape::Shape };

#[cfg(test)]
use std::f64::consts::PI;

#[test]
fn pixel_size_for_horizontal_canvas() {
    let c = Camera::new(200, 125, PI / 2.0, Matrix::identity()).unwrap();

    approx::assert_abs_diff_eq!(c.pixel_size(), 0.01, epsilon = 1e-9);
}

#[test]
fn pixel_size_for_vertical_canvas() {
    let c = Camera::new(125, 200, PI / 2.0, Matrix::identity()).unwrap();

    approx::assert_abs_diff_eq!(c.pixel_size(), 0.01, epsilon = 1e-9);
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, PI / 2.0, Matrix::identity()).unwrap();
    let r = c.ray_for_pixel(100, 50).unwrap();

    assert_eq!(r.origin, Tuple::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, PI / 2.0, Matrix::identity()).unwrap();
    let r = c.ray_for_pixel(0, 0).unwrap();

    assert_eq!(r.origin, Tuple::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, PI / 2.0,
        Matrix::rotation_y(PI / 4.0) * Matrix::translation(0.0, -2.0, 5.0))
        .unwrap();
    let r = c.ray_for_pixel(100, 50).unwrap();
    let r2 = 2f64.sqrt() / 2.0;

    assert_eq!(r.origin, Tuple::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction, Tuple::vector(r2, 0.0, -r2));
}

#[test]
fn singular_camera_transform_is_rejected() {
    assert!(Camera::new(10, 10, PI / 2.0, Matrix::scaling(0.0, 1.0, 1.0)).is_err());
}

#[test]
fn render_world_with_camera() {
    let w = World::default_world().unwrap();
    let from = Tuple::point(0.0, 0.0, -5.0);
    let to = Tuple::point(0.0, 0.0, 0.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);
    let c = Camera::new(11, 11, PI / 2.0, Matrix::view_transform(from, to, up).unwrap())
        .unwrap();

    let image = c.render(&w).unwrap();
    assert_eq!(image.pixel_at(5, 5).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn render_skips_last_row_and_column_unless_full_coverage() {
    // The camera sits inside a large sphere, so every ray hits something
    let light = PointLight::new(Color::white(), Tuple::origin()).unwrap();
    let mut w = World::new(light);
    w.add_object(
        Shape::sphere().with_transform(Matrix::scaling(10.0, 10.0, 10.0)).unwrap()
    );

    let mut c = Camera::new(4, 3, PI / 2.0, Matrix::identity()).unwrap();

    let partial = c.render(&w).unwrap();
    assert_ne!(partial.pixel_at(2, 1).unwrap(), Color::black());
    assert_eq!(partial.pixel_at(3, 1).unwrap(), Color::black());
    assert_eq!(partial.pixel_at(1, 2).unwrap(), Color::black());

    c.full_coverage = true;
    let full = c.render(&w).unwrap();
    assert_ne!(full.pixel_at(3, 1).unwrap(), Color::black());
    assert_ne!(full.pixel_at(1, 2).unwrap(), Color::black());
    assert_ne!(full.pixel_at(3, 2).unwrap(), Color::black());
}
