use crate::error::{ Result, TraceError };
use crate::color::Color;
use crate::pattern::Pattern;

/// A surface material.
///
/// Materials use the Phong reflection model (ambient, diffuse, specular and
/// shininess), plus reflectivity, transparency and a refractive index for
/// recursive shading.
///
/// Every coefficient is non-negative and not NaN. This is checked when the
/// material is built, so a `Material` value is always valid; the fields are
/// read-only for the same reason.
///
/// # Examples
///
/// ```
/// # use recursive_ray_tracer::color::Color;
/// # use recursive_ray_tracer::material::Material;
/// let glass = Material::builder()
///     .color(Color::black())
///     .transparency(1.0)
///     .refractive_index(1.5)
///     .build()
///     .unwrap();
/// assert_eq!(glass.refractive_index(), 1.5);
///
/// assert!(Material::builder().diffuse(-0.5).build().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    color: Color,
    pattern: Option<Pattern>,

    ambient: f64,
    diffuse: f64,
    specular: f64,
    shininess: f64,

    reflective: f64,
    transparency: f64,
    refractive_index: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,

            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// Starts a builder from the default material.
    pub fn builder() -> MaterialBuilder {
        MaterialBuilder { material: Material::default() }
    }

    /// Starts a builder from a copy of this material.
    pub fn to_builder(&self) -> MaterialBuilder {
        MaterialBuilder { material: *self }
    }

    pub fn color(&self) -> Color { self.color }
    pub fn pattern(&self) -> Option<&Pattern> { self.pattern.as_ref() }
    pub fn ambient(&self) -> f64 { self.ambient }
    pub fn diffuse(&self) -> f64 { self.diffuse }
    pub fn specular(&self) -> f64 { self.specular }
    pub fn shininess(&self) -> f64 { self.shininess }
    pub fn reflective(&self) -> f64 { self.reflective }
    pub fn transparency(&self) -> f64 { self.transparency }
    pub fn refractive_index(&self) -> f64 { self.refractive_index }

    fn validate(self) -> Result<Material> {
        let coefficients = [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("shininess", self.shininess),
            ("reflective", self.reflective),
            ("transparency", self.transparency),
            ("refractive_index", self.refractive_index),
        ];

        match coefficients.iter().find(|(_, v)| v.is_nan() || *v < 0.0) {
            Some((name, _)) => Err(TraceError::InvalidMaterial(*name)),
            None => Ok(self),
        }
    }
}

/// Collects material attributes; `build` validates them.
#[derive(Copy, Clone, Debug)]
pub struct MaterialBuilder {
    material: Material,
}

impl MaterialBuilder {
    pub fn color(mut self, color: Color) -> Self {
        self.material.color = color;
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.material.pattern = Some(pattern);
        self
    }

    pub fn ambient(mut self, ambient: f64) -> Self {
        self.material.ambient = ambient;
        self
    }

    pub fn diffuse(mut self, diffuse: f64) -> Self {
        self.material.diffuse = diffuse;
        self
    }

    pub fn specular(mut self, specular: f64) -> Self {
        self.material.specular = specular;
        self
    }

    pub fn shininess(mut self, shininess: f64) -> Self {
        self.material.shininess = shininess;
        self
    }

    pub fn reflective(mut self, reflective: f64) -> Self {
        self.material.reflective = reflective;
        self
    }

    pub fn transparency(mut self, transparency: f64) -> Self {
        self.material.transparency = transparency;
        self
    }

    pub fn refractive_index(mut self, refractive_index: f64) -> Self {
        self.material.refractive_index = refractive_index;
        self
    }

    /// Fails with `InvalidMaterial` naming the first negative or NaN
    /// coefficient.
    pub fn build(self) -> Result<Material> {
        self.material.validate()
    }
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color(), Color::white());
    assert!(m.pattern().is_none());
    assert_eq!(m.ambient(), 0.1);
    assert_eq!(m.diffuse(), 0.9);
    assert_eq!(m.specular(), 0.9);
    assert_eq!(m.shininess(), 200.0);
    assert_eq!(m.reflective(), 0.0);
    assert_eq!(m.transparency(), 0.0);
    assert_eq!(m.refractive_index(), 1.0);
}

#[test]
fn builder_sets_fields() {
    let m = Material::builder()
        .color(Color::rgb(0.8, 1.0, 0.6))
        .diffuse(0.7)
        .specular(0.2)
        .build()
        .unwrap();

    assert_eq!(m.color(), Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(m.diffuse(), 0.7);
    assert_eq!(m.specular(), 0.2);
    assert_eq!(m.ambient(), 0.1);
}

#[test]
fn to_builder_keeps_existing_fields() {
    let base = Material::builder().reflective(0.5).build().unwrap();
    let m = base.to_builder().transparency(0.25).build().unwrap();

    assert_eq!(m.reflective(), 0.5);
    assert_eq!(m.transparency(), 0.25);
    assert_eq!(base.transparency(), 0.0);
}

#[test]
fn negative_coefficients_are_rejected() {
    let cases = [
        ("ambient", Material::builder().ambient(-0.1)),
        ("diffuse", Material::builder().diffuse(-0.1)),
        ("specular", Material::builder().specular(-0.1)),
        ("shininess", Material::builder().shininess(-1.0)),
        ("reflective", Material::builder().reflective(-0.1)),
        ("transparency", Material::builder().transparency(-0.1)),
        ("refractive_index", Material::builder().refractive_index(-1.0)),
    ];

    for (field, builder) in cases.iter() {
        match builder.build() {
            Err(TraceError::InvalidMaterial(name)) => assert_eq!(name, *field),
            other => panic!("expected InvalidMaterial, got {:?}", other),
        }
    }
}

#[test]
fn zero_coefficients_are_valid() {
    let m = Material::builder()
        .ambient(0.0)
        .diffuse(0.0)
        .specular(0.0)
        .shininess(0.0)
        .build();

    assert!(m.is_ok());
}

#[test]
fn nan_coefficients_are_rejected() {
    let ambient = Material::builder().ambient(f64::NAN).build();
    let index = Material::builder().refractive_index(f64::NAN).build();

    assert!(matches!(ambient, Err(TraceError::InvalidMaterial("ambient"))));
    assert!(matches!(index, Err(TraceError::InvalidMaterial("refractive_index"))));
}
