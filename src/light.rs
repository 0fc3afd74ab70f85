use crate::color::Color;
use crate::error::Result;
use crate::material::Material;
use crate::shape::ShapeRef;
use crate::tuple::{ Kind, Tuple };

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple,
}

impl PointLight {
    /// Creates a point light. Fails if `position` isn't a point.
    pub fn new(intensity: Color, position: Tuple) -> Result<PointLight> {
        Ok(PointLight {
            intensity,
            position: position.check_kind(Kind::Point)?,
        })
    }
}

/// Calculate the lighting of a point on a surface.
///
/// Uses the Phong reflection model: the ambient term always applies, and the
/// diffuse and specular terms apply unless the point is `in_shadow` or faces
/// away from the light.
///
/// If the material has a pattern, the surface color is sampled from it on
/// `shape`; otherwise the material color is used.
///
/// Fails unless `point` is a point and `eye_vector` and `normal` are vectors.
pub fn lighting(material: &Material, shape: ShapeRef, light: &PointLight,
    point: Tuple, eye_vector: Tuple, normal: Tuple, in_shadow: bool)
    -> Result<Color> {
    point.check_kind(Kind::Point)?;
    eye_vector.check_kind(Kind::Vector)?;
    normal.check_kind(Kind::Vector)?;

    let color = match material.pattern() {
        Some(pattern) => pattern.at_object(shape, point),
        None => material.color(),
    };

    // Combine surface color with light's color
    let effective_color = color * light.intensity;
    let ambient = effective_color * material.ambient();

    if in_shadow {
        return Ok(ambient);
    }

    let light_vector = (light.position - point).normalize()?;
    let light_dot_normal = light_vector.dot(&normal)?;

    // Light is on the other side of the surface
    if light_dot_normal < 0.0 {
        return Ok(ambient);
    }

    let diffuse = effective_color * material.diffuse() * light_dot_normal;

    let reflect_vector = (-light_vector).reflect(&normal)?;
    let reflect_dot_eye = reflect_vector.dot(&eye_vector)?;

    let specular = if reflect_dot_eye <= 0.0 {
        Color::black()
    } else {
        let factor = reflect_dot_eye.powf(material.shininess());
        light.intensity * material.specular() * factor
    };

    Ok(ambient + diffuse + specular)
}

#[cfg(test)]
use crate::{ pattern::Pattern, shape::{ Shape, Shapes } };

#[cfg(test)]
fn light_at(x: f64, y: f64, z: f64) -> PointLight {
    PointLight::new(Color::white(), Tuple::point(x, y, z)).unwrap()
}

#[cfg(test)]
fn light_sphere(eye_vector: Tuple, light: PointLight, in_shadow: bool) -> Color {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let m = Material::default();

    lighting(&m, shapes.shape(s), &light, Tuple::origin(), eye_vector,
        Tuple::vector(0.0, 0.0, -1.0), in_shadow).unwrap()
}

#[test]
fn point_light_requires_a_point() {
    assert!(PointLight::new(Color::white(), Tuple::vector(0.0, 0.0, 0.0)).is_err());
}

#[test]
fn eye_between_light_and_surface() {
    let res = light_sphere(Tuple::vector(0.0, 0.0, -1.0), light_at(0.0, 0.0, -10.0),
        false);

    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let r2 = 2f64.sqrt() / 2.0;
    let res = light_sphere(Tuple::vector(0.0, r2, -r2), light_at(0.0, 0.0, -10.0),
        false);

    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let res = light_sphere(Tuple::vector(0.0, 0.0, -1.0), light_at(0.0, 10.0, -10.0),
        false);

    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let r2 = 2f64.sqrt() / 2.0;
    let res = light_sphere(Tuple::vector(0.0, -r2, -r2), light_at(0.0, 10.0, -10.0),
        false);

    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let res = light_sphere(Tuple::vector(0.0, 0.0, -1.0), light_at(0.0, 0.0, 10.0),
        false);

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let res = light_sphere(Tuple::vector(0.0, 0.0, -1.0), light_at(0.0, 0.0, -10.0),
        true);

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_rejects_mismatched_kinds() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let m = Material::default();
    let light = light_at(0.0, 0.0, -10.0);
    let p = Tuple::origin();
    let v = Tuple::vector(0.0, 0.0, -1.0);

    assert!(lighting(&m, shapes.shape(s), &light, v, v, v, false).is_err());
    assert!(lighting(&m, shapes.shape(s), &light, p, p, v, false).is_err());
    assert!(lighting(&m, shapes.shape(s), &light, p, v, p, false).is_err());
}

#[test]
fn lighting_with_stripe_pattern() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());

    // Only ambient light contributes, so the result is the pattern color
    let m = Material::builder()
        .pattern(Pattern::stripe(Color::white(), Color::black()))
        .ambient(1.0)
        .diffuse(0.0)
        .specular(0.0)
        .build()
        .unwrap();

    let eye = Tuple::vector(0.0, 0.0, -1.0);
    let normal = Tuple::vector(0.0, 0.0, -1.0);
    let light = light_at(0.0, 0.0, -10.0);

    let c1 = lighting(&m, shapes.shape(s), &light, Tuple::point(0.9, 0.0, 0.0), eye,
        normal, false).unwrap();
    let c2 = lighting(&m, shapes.shape(s), &light, Tuple::point(1.1, 0.0, 0.0), eye,
        normal, false).unwrap();

    assert_eq!(c1, Color::white());
    assert_eq!(c2, Color::black());
}
