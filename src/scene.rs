use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use log::info;
use serde::{ Serialize, Deserialize };

use crate::camera::Camera;
use crate::color::Color;
use crate::consts::DEFAULT_RECURSION_DEPTH;
use crate::error::{ Result, TraceError };
use crate::light::PointLight;
use crate::material::Material;
use crate::matrix::Matrix;
use crate::pattern::Pattern;
use crate::shape::{ Shape, ShapeId };
use crate::tuple::Tuple;
use crate::world::World;

/// A world and the camera to view it with, as loaded from a scene file.
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Parses and validates a JSON scene description.
    pub fn from_json(json: &str) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        Scene::try_from(scene_json)
    }

    /// Loads a JSON scene description from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let json = fs::read_to_string(path.as_ref())?;
        let scene = Scene::from_json(&json)?;

        info!("loaded {} ({} shapes)", path.as_ref().display(),
            scene.world.shapes().len());
        Ok(scene)
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = TraceError;

    fn try_from(scene_json: SceneJson) -> Result<Scene> {
        // Create the camera transform from the view parameters.
        let camera_transform = Matrix::view_transform(
            point(scene_json.camera_from),
            point(scene_json.camera_to),
            vector(scene_json.camera_up),
        )?;

        let mut camera = Camera::new(
            scene_json.canvas_width,
            scene_json.canvas_height,
            scene_json.field_of_view,
            camera_transform,
        )?;
        camera.full_coverage = scene_json.full_coverage;

        let light = PointLight::new(
            scene_json.light.intensity.into(),
            point(scene_json.light.position),
        )?;

        let mut world = World::new(light);
        world.recursion_depth = scene_json.recursion_depth;

        for shape_json in scene_json.shapes.iter() {
            shape_json.add_to(&mut world, None)?;
        }

        Ok(Scene { world, camera })
    }
}

fn point(p: [f64; 3]) -> Tuple {
    Tuple::point(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Tuple {
    Tuple::vector(v[0], v[1], v[2])
}

fn default_recursion_depth() -> usize {
    DEFAULT_RECURSION_DEPTH
}

/// The top level of a scene file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneJson {
    canvas_width: usize,
    canvas_height: usize,
    field_of_view: f64,

    camera_from: [f64; 3],
    camera_to: [f64; 3],
    camera_up: [f64; 3],

    #[serde(default = "default_recursion_depth")]
    recursion_depth: usize,

    #[serde(default)]
    full_coverage: bool,

    light: LightJson,

    #[serde(default)]
    shapes: Vec<ShapeJson>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct LightJson {
    intensity: [f64; 3],
    position: [f64; 3],
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShapeTy {
    Sphere,
    Plane,
    Group,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ShapeJson {
    ty: ShapeTy,

    #[serde(default)]
    transform: Vec<TransformJson>,

    #[serde(default)]
    material: Option<MaterialJson>,

    #[serde(default)]
    children: Vec<ShapeJson>,
}

impl ShapeJson {
    fn shape(&self) -> Result<Shape> {
        let shape = match self.ty {
            ShapeTy::Sphere => Shape::sphere(),
            ShapeTy::Plane => Shape::plane(),
            ShapeTy::Group => Shape::group(),
        };

        let material = match self.material {
            Some(ref m) => m.material()?,
            None => Material::default(),
        };

        shape.with_material(material).with_transform(compose(&self.transform))
    }

    /// Adds this shape to `world` (beneath `parent`, if given), then its
    /// children beneath it.
    fn add_to(&self, world: &mut World, parent: Option<ShapeId>) -> Result<ShapeId> {
        let shape = self.shape()?;
        let id = match parent {
            Some(group) => world.add_child(group, shape)?,
            None => world.add_object(shape),
        };

        for child in self.children.iter() {
            child.add_to(world, Some(id))?;
        }

        Ok(id)
    }
}

/// A single transform step.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransformJson {
    Translate([f64; 3]),
    Scale([f64; 3]),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Rotate([f64; 3]),
    Shear([f64; 6]),
}

impl TransformJson {
    fn matrix(&self) -> Matrix {
        match *self {
            TransformJson::Translate([x, y, z]) => Matrix::translation(x, y, z),
            TransformJson::Scale([x, y, z]) => Matrix::scaling(x, y, z),
            TransformJson::RotateX(r) => Matrix::rotation_x(r),
            TransformJson::RotateY(r) => Matrix::rotation_y(r),
            TransformJson::RotateZ(r) => Matrix::rotation_z(r),
            TransformJson::Rotate([x, y, z]) => Matrix::rotate(x, y, z),
            TransformJson::Shear([xy, xz, yx, yz, zx, zy])
                => Matrix::shearing(xy, xz, yx, yz, zx, zy),
        }
    }
}

/// Multiplies transform steps in the order listed, so the last step is the
/// first applied to a point.
fn compose(steps: &[TransformJson]) -> Matrix {
    steps.iter().fold(Matrix::identity(), |m, step| m * step.matrix())
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct MaterialJson {
    color: Option<[f64; 3]>,
    pattern: Option<PatternJson>,
    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
    reflective: Option<f64>,
    transparency: Option<f64>,
    refractive_index: Option<f64>,
}

impl MaterialJson {
    fn material(&self) -> Result<Material> {
        let mut builder = Material::builder();

        if let Some(color) = self.color {
            builder = builder.color(color.into());
        }
        if let Some(ref pattern) = self.pattern {
            builder = builder.pattern(pattern.pattern()?);
        }
        if let Some(ambient) = self.ambient {
            builder = builder.ambient(ambient);
        }
        if let Some(diffuse) = self.diffuse {
            builder = builder.diffuse(diffuse);
        }
        if let Some(specular) = self.specular {
            builder = builder.specular(specular);
        }
        if let Some(shininess) = self.shininess {
            builder = builder.shininess(shininess);
        }
        if let Some(reflective) = self.reflective {
            builder = builder.reflective(reflective);
        }
        if let Some(transparency) = self.transparency {
            builder = builder.transparency(transparency);
        }
        if let Some(refractive_index) = self.refractive_index {
            builder = builder.refractive_index(refractive_index);
        }

        builder.build()
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PatternTy {
    Stripe,
    Gradient,
    Ring,
    Checker,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PatternJson {
    ty: PatternTy,
    a: [f64; 3],
    b: [f64; 3],

    #[serde(default)]
    transform: Vec<TransformJson>,
}

impl PatternJson {
    fn pattern(&self) -> Result<Pattern> {
        let (a, b): (Color, Color) = (self.a.into(), self.b.into());
        let pattern = match self.ty {
            PatternTy::Stripe => Pattern::stripe(a, b),
            PatternTy::Gradient => Pattern::gradient(a, b),
            PatternTy::Ring => Pattern::ring(a, b),
            PatternTy::Checker => Pattern::checker(a, b),
        };

        pattern.with_transform(compose(&self.transform))
    }
}

#[cfg(test)]
const TEST_SCENE: &str = r#"{
    "canvas_width": 11,
    "canvas_height": 11,
    "field_of_view": 1.5707963267948966,
    "camera_from": [0, 0, -5],
    "camera_to": [0, 0, 0],
    "camera_up": [0, 1, 0],
    "light": { "intensity": [1, 1, 1], "position": [-10, 10, -10] },
    "shapes": [
        {
            "ty": "sphere",
            "material": { "color": [0.8, 1.0, 0.6], "diffuse": 0.7, "specular": 0.2 }
        },
        {
            "ty": "group",
            "children": [
                { "ty": "sphere", "transform": [{ "scale": [0.5, 0.5, 0.5] }] }
            ]
        },
        {
            "ty": "plane",
            "transform": [{ "translate": [0, -10, 0] }],
            "material": {
                "pattern": {
                    "ty": "checker",
                    "a": [1, 1, 1],
                    "b": [0, 0, 0],
                    "transform": [{ "scale": [2, 2, 2] }]
                }
            }
        }
    ]
}"#;

#[cfg(test)]
fn scene_with_shape(shape: &str) -> String {
    format!(r#"{{
        "canvas_width": 4, "canvas_height": 4, "field_of_view": 1.0,
        "camera_from": [0, 0, -5], "camera_to": [0, 0, 0], "camera_up": [0, 1, 0],
        "light": {{ "intensity": [1, 1, 1], "position": [-10, 10, -10] }},
        "shapes": [{}]
    }}"#, shape)
}

#[test]
fn load_scene_from_json() {
    let scene = Scene::from_json(TEST_SCENE).unwrap();

    assert_eq!(scene.camera.hsize, 11);
    assert_eq!(scene.camera.vsize, 11);
    assert!(!scene.camera.full_coverage);
    assert_eq!(scene.world.recursion_depth, 5);
    assert_eq!(scene.world.light.position, Tuple::point(-10.0, 10.0, -10.0));

    // The group's sphere is reached through the group, not the top level
    assert_eq!(scene.world.objects().len(), 3);
    assert_eq!(scene.world.shapes().len(), 4);

    let group = scene.world.shape(scene.world.objects()[1]);
    assert_eq!(group.shape().children().len(), 1);

    let plane = scene.world.shape(scene.world.objects()[2]);
    assert!(plane.material().pattern().is_some());
}

#[test]
fn rendered_scene_matches_programmatic_world() {
    let scene = Scene::from_json(TEST_SCENE).unwrap();
    let image = scene.camera.render(&scene.world).unwrap();

    assert_eq!(image.pixel_at(5, 5).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn transforms_apply_last_step_first() {
    let steps: Vec<TransformJson> = serde_json::from_str(
        r#"[{ "translate": [10, 5, 7] }, { "scale": [5, 5, 5] }, { "rotate_x": 1.5707963267948966 }]"#
    ).unwrap();
    let p = Tuple::point(1.0, 0.0, 1.0);

    assert_eq!(compose(&steps) * p, Tuple::point(15.0, 0.0, 7.0));
    assert_eq!(compose(&[]), Matrix::identity());
}

#[test]
fn optional_settings_are_read() {
    let json = r#"{
        "canvas_width": 4, "canvas_height": 2, "field_of_view": 1.0,
        "camera_from": [0, 0, -5], "camera_to": [0, 0, 0], "camera_up": [0, 1, 0],
        "recursion_depth": 2,
        "full_coverage": true,
        "light": { "intensity": [1, 1, 1], "position": [0, 0, -10] }
    }"#;
    let scene = Scene::from_json(json).unwrap();

    assert_eq!(scene.world.recursion_depth, 2);
    assert!(scene.camera.full_coverage);
    assert!(scene.world.objects().is_empty());
}

#[test]
fn negative_material_is_rejected() {
    let json = scene_with_shape(r#"{ "ty": "sphere", "material": { "ambient": -1 } }"#);

    assert!(matches!(Scene::from_json(&json),
        Err(TraceError::InvalidMaterial("ambient"))));
}

#[test]
fn singular_transform_is_rejected() {
    let json = scene_with_shape(
        r#"{ "ty": "sphere", "transform": [{ "scale": [1, 0, 1] }] }"#
    );

    assert!(matches!(Scene::from_json(&json), Err(TraceError::SingularMatrix)));
}

#[test]
fn children_require_a_group() {
    let json = scene_with_shape(
        r#"{ "ty": "sphere", "children": [{ "ty": "sphere" }] }"#
    );

    assert!(matches!(Scene::from_json(&json), Err(TraceError::NotApplicable(_))));
}

#[test]
fn malformed_json_is_a_scene_error() {
    let json = scene_with_shape(r#"{ "ty": "teapot" }"#);

    assert!(matches!(Scene::from_json(&json), Err(TraceError::Scene(_))));
    assert!(matches!(Scene::from_json("{"), Err(TraceError::Scene(_))));
}

#[test]
fn missing_scene_file_is_an_io_error() {
    let res = Scene::load("this/scene/does/not/exist.json");

    assert!(matches!(res, Err(TraceError::Io(_))));
}

#[test]
fn bundled_scenes_load() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes");

    let first = Scene::load(format!("{}/first_camera.json", dir)).unwrap();
    assert_eq!((first.camera.hsize, first.camera.vsize), (300, 150));
    assert_eq!(first.world.objects().len(), 6);

    let glass = Scene::load(format!("{}/glass_group.json", dir)).unwrap();
    assert!(glass.camera.full_coverage);
    assert_eq!(glass.world.objects().len(), 3);
    assert_eq!(glass.world.shapes().len(), 6);
}
