use std::fs;
use std::path::Path;

use crate::color::Color;
use crate::error::Result;

/// Longest line allowed in PPM output.
const PPM_LINE_WIDTH: usize = 70;

/// The largest value a channel takes in PPM output.
const PPM_MAX_VALUE: f64 = 255.0;

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. The `Camera`
/// generates one ray per pixel and writes the color seen along it here.
///
/// Colors are stored unclamped; they are only scaled and clamped when the
/// canvas is serialized.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored row by row.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height],
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `x` is the column and `y` the row,
    /// both zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use recursive_ray_tracer::color::Color;
    /// # use recursive_ray_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, purple);
    /// assert_eq!(canvas.pixel_at(4, 2), Some(purple));
    /// assert_eq!(canvas.pixel_at(8, 2), None);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = color;
    }

    /// Reads a color from a location on the `Canvas`, or `None` if the
    /// location is out-of-bounds.
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Serializes the canvas as a plain-text (P3) PPM image.
    ///
    /// Channels are scaled to 0-255, truncated and clamped. Values run
    /// row-major and are wrapped so that no line exceeds 70 columns. The
    /// output ends with a newline.
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n{}\n", self.width, self.height,
            PPM_MAX_VALUE as u32);

        let values = self.pixels.iter()
            .flat_map(|c| [c.r, c.g, c.b])
            .map(|channel| scale_channel(channel).to_string());

        let mut line = String::new();
        for value in values {
            if line.is_empty() {
                line.push_str(&value);
            } else if line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                out.push_str(&line);
                out.push('\n');
                line = value;
            } else {
                line.push(' ');
                line.push_str(&value);
            }
        }

        out.push_str(&line);
        out.push('\n');
        out
    }

    /// Saves a canvas to a PPM file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_ppm())?;
        Ok(())
    }
}

/// Scales a channel to `0..=255`, truncating toward zero.
fn scale_channel(channel: f64) -> u8 {
    (channel * PPM_MAX_VALUE).trunc().clamp(0.0, PPM_MAX_VALUE) as u8
}

#[test]
fn creating_a_canvas() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    assert!((0..20).all(|y| (0..10).all(|x| c.pixel_at(x, y) == Some(Color::black()))));
}

#[test]
fn write_and_read_pixel() {
    let mut c = Canvas::new(10, 20);
    let red = Color::rgb(1.0, 0.0, 0.0);

    c.write_pixel(2, 3, red);
    c.write_pixel(10, 3, red);

    assert_eq!(c.pixel_at(2, 3), Some(red));
    assert_eq!(c.pixel_at(3, 2), Some(Color::black()));
    assert_eq!(c.pixel_at(10, 3), None);
}

#[test]
fn ppm_header() {
    let c = Canvas::new(5, 3);

    assert!(c.to_ppm().starts_with("P3\n5 3\n255\n"));
}

#[test]
fn ppm_pixel_data_is_scaled_clamped_and_wrapped() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, Color::rgb(-0.5, 0.0, 1.0));

    let expected = "P3\n5 3\n255\n\
        255 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 127 0 0 0 0 0 0 0 0 0 0\n\
        0 0 0 0 0 0 0 0 0 0 0 255\n";

    assert_eq!(c.to_ppm(), expected);
}

#[test]
fn ppm_lines_never_exceed_70_columns() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, Color::rgb(1.0, 0.5, 0.0));
        }
    }

    let ppm = c.to_ppm();
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert!(body.iter().all(|line| line.len() <= 70));
    assert_eq!(body[0], ["255 127 0"; 7].join(" "));
    assert_eq!(body.iter().map(|l| l.split(' ').count()).sum::<usize>(), 60);
    assert!(ppm.ends_with('\n'));
}

#[test]
fn save_writes_ppm_file() {
    let mut c = Canvas::new(2, 1);
    c.write_pixel(1, 0, Color::white());

    let path = std::env::temp_dir()
        .join(format!("recursive-ray-tracer-{}.ppm", std::process::id()));
    c.save(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written, "P3\n2 1\n255\n0 0 0 255 255 255\n");
}
