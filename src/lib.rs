pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod color;
pub mod pattern;
pub mod material;

pub mod shape;
pub mod intersect;
pub mod light;
pub mod world;
pub mod camera;

pub mod canvas;
pub mod scene;

pub use error::{ Result, TraceError };

use consts::FEQ_EPSILON;

/// Approximate equality for two floats, within `FEQ_EPSILON`.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
