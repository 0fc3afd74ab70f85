use log::{ debug, trace };

use crate::color::Color;
use crate::consts::DEFAULT_RECURSION_DEPTH;
use crate::error::{ Result, TraceError };
use crate::intersect::{ Intersections, IntersectionComputation };
use crate::light::{ PointLight, lighting };
use crate::material::Material;
use crate::matrix::Matrix;
use crate::ray::Ray;
use crate::shape::{ Shape, ShapeId, ShapeRef, Shapes };
use crate::tuple::Tuple;

/// A world with objects and light.
///
/// The world owns every shape through its `Shapes` arena. `objects` lists
/// the top-level entries; shapes inside groups are reached through their
/// group.
///
/// Worlds collect all objects as well as light for rendering. Most shading
/// logic is performed within worlds for the ray tracer.
#[derive(Clone, Debug)]
pub struct World {
    pub light: PointLight,

    /// How many reflective/refractive bounces `color_at` is given by the
    /// camera.
    pub recursion_depth: usize,

    shapes: Shapes,
    objects: Vec<ShapeId>,
}

impl World {
    /// Creates an empty world lit by `light`.
    pub fn new(light: PointLight) -> World {
        World {
            light,
            recursion_depth: DEFAULT_RECURSION_DEPTH,
            shapes: Shapes::new(),
            objects: Vec::new(),
        }
    }

    /// The standard two-sphere test world.
    ///
    /// A white light at `(-10, 10, -10)`, a unit sphere with color
    /// `(0.8, 1.0, 0.6)`, diffuse 0.7 and specular 0.2, and a default sphere
    /// of half that size inside it.
    pub fn default_world() -> Result<World> {
        let light = PointLight::new(
            Color::white(),
            Tuple::point(-10.0, 10.0, -10.0),
        )?;

        let outer = Material::builder()
            .color(Color::rgb(0.8, 1.0, 0.6))
            .diffuse(0.7)
            .specular(0.2)
            .build()?;

        let mut world = World::new(light);
        world.add_object(Shape::sphere().with_material(outer));
        world.add_object(
            Shape::sphere().with_transform(Matrix::scaling(0.5, 0.5, 0.5))?
        );

        Ok(world)
    }

    /// Adds a top-level shape.
    pub fn add_object(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.insert(shape);
        self.objects.push(id);

        id
    }

    /// Adds a shape as a child of `group`, which must already be in the
    /// world.
    pub fn add_child(&mut self, group: ShapeId, shape: Shape) -> Result<ShapeId> {
        if !self.shapes[group].is_group() {
            return Err(TraceError::NotApplicable("add_child on a non-group shape"));
        }

        let id = self.shapes.insert(shape);
        self.shapes.add_child(group, id)?;

        Ok(id)
    }

    /// Moves a shape already in the world beneath `group`.
    ///
    /// A top-level object stops being top-level; a member of another group
    /// leaves that group.
    pub fn attach(&mut self, group: ShapeId, child: ShapeId) -> Result<()> {
        self.shapes.add_child(group, child)?;
        self.objects.retain(|&id| id != child);

        Ok(())
    }

    pub fn shapes(&self) -> &Shapes {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> ShapeRef<'_> {
        self.shapes.shape(id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    /// The top-level objects, in insertion order.
    pub fn objects(&self) -> &[ShapeId] {
        &self.objects
    }

    /// Intersects a ray against all objects in a world.
    pub fn intersect_world(&self, ray: &Ray) -> Result<Intersections> {
        let mut all = Vec::with_capacity(self.objects.len());
        for &id in self.objects.iter() {
            all.push(self.shapes.shape(id).intersect(ray)?);
        }

        Ok(Intersections::aggregate(all))
    }

    /// Determines whether anything lies between `point` and the light.
    pub fn is_shadowed(&self, point: Tuple) -> Result<bool> {
        let v = self.light.position - point;
        let distance = v.magnitude();

        let ray = Ray::new(point, v.normalize()?)?;
        let hit = self.intersect_world(&ray)?.hit();

        Ok(matches!(hit, Some(i) if i.t < distance))
    }

    /// The color seen along `ray`, allowing `remaining` further bounces.
    pub fn color_at(&self, ray: &Ray, remaining: usize) -> Result<Color> {
        let xs = self.intersect_world(ray)?;

        match xs.hit() {
            None => Ok(Color::black()),
            Some(hit) => {
                let comps = IntersectionComputation::new(
                    &self.shapes, ray, &hit, Some(&xs)
                )?;
                self.shade_hit(&comps, remaining)
            },
        }
    }

    /// Calculates the color for a hit: direct light (respecting shadows)
    /// plus any reflected and refracted light.
    pub fn shade_hit(&self, comps: &IntersectionComputation, remaining: usize)
        -> Result<Color> {
        let shape = self.shapes.shape(comps.shape);
        let material = shape.material();

        let shadowed = self.is_shadowed(comps.over_point)?;
        let surface = lighting(material, shape, &self.light, comps.point,
            comps.eye_vector, comps.normal, shadowed)?;

        let reflected = self.reflected_color(comps, remaining)?;
        let refracted = self.refracted_color(comps, remaining)?;

        if material.reflective() > 0.0 && material.transparency() > 0.0 {
            let reflectance = comps.schlick()?;
            Ok(surface + reflected * reflectance + refracted * (1.0 - reflectance))
        } else {
            Ok(surface + reflected + refracted)
        }
    }

    /// The color reflected off a hit, scaled by the material's reflectivity.
    pub fn reflected_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Result<Color> {
        let reflective = self.shapes[comps.shape].material.reflective();
        if reflective == 0.0 {
            return Ok(Color::black());
        }

        if remaining == 0 {
            trace!("reflection budget exhausted at {:?}", comps.shape);
            return Ok(Color::black());
        }

        let ray = Ray::new(comps.over_point, comps.reflect_vector)?;
        Ok(self.color_at(&ray, remaining - 1)? * reflective)
    }

    /// The color refracted through a hit, scaled by the material's
    /// transparency. Black under total internal reflection.
    pub fn refracted_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Result<Color> {
        let transparency = self.shapes[comps.shape].material.transparency();
        if transparency == 0.0 {
            return Ok(Color::black());
        }

        if remaining == 0 {
            trace!("refraction budget exhausted at {:?}", comps.shape);
            return Ok(Color::black());
        }

        // Snell's law, from the ratio of the two indices
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eye_vector.dot(&comps.normal)?;
        let sin2_t = n_ratio.powi(2) * (1.0 - cos_i.powi(2));

        if sin2_t > 1.0 {
            debug!("total internal reflection at {:?}", comps.shape);
            return Ok(Color::black());
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normal * (n_ratio * cos_i - cos_t)
            - comps.eye_vector * n_ratio;

        let ray = Ray::new(comps.under_point, direction)?;
        Ok(self.color_at(&ray, remaining - 1)? * transparency)
    }
}

#[cfg(test)]
use crate::{ intersect::Intersection, pattern::Pattern };

#[cfg(test)]
fn test_ray(origin: Tuple, direction: Tuple) -> Ray {
    Ray::new(origin, direction).unwrap()
}

#[cfg(test)]
fn set_material(w: &mut World, id: ShapeId,
    f: impl FnOnce(crate::material::MaterialBuilder) -> crate::material::MaterialBuilder) {
    let shape = w.shape_mut(id).unwrap();
    shape.material = f(shape.material.to_builder()).build().unwrap();
}

#[test]
fn creating_a_world() {
    let light = PointLight::new(Color::white(), Tuple::point(0.0, 0.0, 0.0)).unwrap();
    let w = World::new(light);

    assert!(w.objects().is_empty());
    assert!(w.shapes().is_empty());
    assert_eq!(w.recursion_depth, 5);
}

#[test]
fn the_default_world() {
    let w = World::default_world().unwrap();

    assert_eq!(w.light.position, Tuple::point(-10.0, 10.0, -10.0));
    assert_eq!(w.light.intensity, Color::white());
    assert_eq!(w.objects().len(), 2);

    let outer = w.shape(w.objects()[0]);
    assert_eq!(outer.material().color(), Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(outer.material().diffuse(), 0.7);
    assert_eq!(outer.material().specular(), 0.2);

    let inner = w.shape(w.objects()[1]);
    assert_eq!(*inner.shape().transform(), Matrix::scaling(0.5, 0.5, 0.5));
}

#[test]
fn intersect_default_world_with_ray() {
    let w = World::default_world().unwrap();
    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = w.intersect_world(&r).unwrap();
    let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();

    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn intersect_world_reaches_into_groups() {
    let mut w = World::default_world().unwrap();
    let g = w.add_object(
        Shape::group().with_transform(Matrix::translation(0.0, 0.0, 10.0)).unwrap()
    );
    let s = w.add_child(g, Shape::sphere()).unwrap();

    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = w.intersect_world(&r).unwrap();

    assert_eq!(xs.len(), 6);
    assert_eq!(xs[4].shape, s);
    assert_eq!(xs[4].t, 14.0);
}

#[test]
fn attaching_an_object_removes_it_from_the_top_level() {
    let mut w = World::default_world().unwrap();
    let g = w.add_object(Shape::group());
    let inner = w.objects()[1];

    w.attach(g, inner).unwrap();

    assert_eq!(w.objects().len(), 2);
    assert!(!w.objects().contains(&inner));
    assert_eq!(w.shapes()[inner].parent(), Some(g));

    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    assert_eq!(w.intersect_world(&r).unwrap().len(), 4);
}

#[test]
fn add_child_requires_a_group() {
    let mut w = World::default_world().unwrap();
    let outer = w.objects()[0];

    assert!(w.add_child(outer, Shape::sphere()).is_err());
    assert_eq!(w.shapes().len(), 2);
}

#[test]
fn shade_intersection_from_outside() {
    let w = World::default_world().unwrap();
    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, w.objects()[0]);

    let comps = IntersectionComputation::new(w.shapes(), &r, &i, None).unwrap();
    let c = w.shade_hit(&comps, 5).unwrap();

    assert_eq!(c, Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w = World::default_world().unwrap();
    w.light = PointLight::new(Color::white(), Tuple::point(0.0, 0.25, 0.0)).unwrap();

    let r = test_ray(Tuple::point(0.0, 0.0, 0.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(0.5, w.objects()[1]);

    let comps = IntersectionComputation::new(w.shapes(), &r, &i, None).unwrap();
    let c = w.shade_hit(&comps, 5).unwrap();

    assert_eq!(c, Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    let light = PointLight::new(Color::white(), Tuple::point(0.0, 0.0, -10.0)).unwrap();
    let mut w = World::new(light);
    w.add_object(Shape::sphere());
    let s2 = w.add_object(
        Shape::sphere().with_transform(Matrix::translation(0.0, 0.0, 10.0)).unwrap()
    );

    let r = test_ray(Tuple::point(0.0, 0.0, 5.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, s2);
    let comps = IntersectionComputation::new(w.shapes(), &r, &i, None).unwrap();

    assert_eq!(w.shade_hit(&comps, 5).unwrap(), Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn color_ray_miss() {
    let w = World::default_world().unwrap();
    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&r, 5).unwrap(), Color::black());
}

#[test]
fn color_ray_hit() {
    let w = World::default_world().unwrap();
    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));

    assert_eq!(w.color_at(&r, 5).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_behind_ray() {
    let mut w = World::default_world().unwrap();
    let outer = w.objects()[0];
    let inner = w.objects()[1];
    set_material(&mut w, outer, |m| m.ambient(1.0));
    set_material(&mut w, inner, |m| m.ambient(1.0));

    let r = test_ray(Tuple::point(0.0, 0.0, 0.75), Tuple::vector(0.0, 0.0, -1.0));

    assert_eq!(w.color_at(&r, 5).unwrap(), w.shape(inner).material().color());
}

#[test]
fn shadow_tests() {
    let w = World::default_world().unwrap();

    assert!(!w.is_shadowed(Tuple::point(0.0, 10.0, 0.0)).unwrap());
    assert!(w.is_shadowed(Tuple::point(10.0, -10.0, 10.0)).unwrap());
    assert!(!w.is_shadowed(Tuple::point(-20.0, 20.0, -20.0)).unwrap());
    assert!(!w.is_shadowed(Tuple::point(-2.0, 2.0, -2.0)).unwrap());
}

#[test]
fn reflected_color_for_nonreflective_material() {
    let mut w = World::default_world().unwrap();
    let inner = w.objects()[1];
    set_material(&mut w, inner, |m| m.ambient(1.0));

    let r = test_ray(Tuple::point(0.0, 0.0, 0.0), Tuple::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(1.0, inner);
    let comps = IntersectionComputation::new(w.shapes(), &r, &i, None).unwrap();

    assert_eq!(w.reflected_color(&comps, 5).unwrap(), Color::black());
}

#[cfg(test)]
fn with_reflective_plane(w: &mut World) -> ShapeId {
    let m = Material::builder().reflective(0.5).build().unwrap();
    w.add_object(
        Shape::plane()
            .with_material(m)
            .with_transform(Matrix::translation(0.0, -1.0, 0.0))
            .unwrap()
    )
}

#[test]
fn reflected_color_for_reflective_material() {
    let mut w = World::default_world().unwrap();
    let plane = with_reflective_plane(&mut w);
    let r2 = 2f64.sqrt() / 2.0;

    let r = test_ray(Tuple::point(0.0, 0.0, -3.0), Tuple::vector(0.0, -r2, r2));
    let i = Intersection::new(2f64.sqrt(), plane);
    let comps = IntersectionComputation::new(w.shapes(), &r, &i, None).unwrap();

    assert_eq!(w.reflected_color(&comps, 5).unwrap(),
        Color::rgb(0.19032, 0.2379, 0.14274));
    assert_eq!(w.shade_hit(&comps, 5).unwrap(),
        Color::rgb(0.87677, 0.92436, 0.82918));
}

#[test]
fn reflected_color_at_maximum_depth() {
    let mut w = World::default_world().unwrap();
    let plane = with_reflective_plane(&mut w);
    let r2 = 2f64.sqrt() / 2.0;

    let r = test_ray(Tuple::point(0.0, 0.0, -3.0), Tuple::vector(0.0, -r2, r2));
    let i = Intersection::new(2f64.sqrt(), plane);
    let comps = IntersectionComputation::new(w.shapes(), &r, &i, None).unwrap();

    assert_eq!(w.reflected_color(&comps, 0).unwrap(), Color::black());
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let light = PointLight::new(Color::white(), Tuple::point(0.0, 0.0, 0.0)).unwrap();
    let mut w = World::new(light);
    let mirror = Material::builder().reflective(1.0).build().unwrap();

    w.add_object(
        Shape::plane()
            .with_material(mirror)
            .with_transform(Matrix::translation(0.0, -1.0, 0.0))
            .unwrap()
    );
    w.add_object(
        Shape::plane()
            .with_material(mirror)
            .with_transform(Matrix::translation(0.0, 1.0, 0.0))
            .unwrap()
    );

    let r = test_ray(Tuple::point(0.0, 0.0, 0.0), Tuple::vector(0.0, 1.0, 0.0));
    assert!(w.color_at(&r, 5).is_ok());
}

#[test]
fn refracted_color_of_opaque_surface() {
    let w = World::default_world().unwrap();
    let shape = w.objects()[0];
    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = Intersections::new(vec![
        Intersection::new(4.0, shape),
        Intersection::new(6.0, shape),
    ]);
    let comps = IntersectionComputation::new(w.shapes(), &r, &xs[0], Some(&xs))
        .unwrap();

    assert_eq!(w.refracted_color(&comps, 5).unwrap(), Color::black());
}

#[test]
fn refracted_color_at_maximum_depth() {
    let mut w = World::default_world().unwrap();
    let shape = w.objects()[0];
    set_material(&mut w, shape, |m| m.transparency(1.0).refractive_index(1.5));

    let r = test_ray(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = Intersections::new(vec![
        Intersection::new(4.0, shape),
        Intersection::new(6.0, shape),
    ]);
    let comps = IntersectionComputation::new(w.shapes(), &r, &xs[0], Some(&xs))
        .unwrap();

    assert_eq!(w.refracted_color(&comps, 0).unwrap(), Color::black());
}

#[test]
fn refracted_color_under_total_internal_reflection() {
    let mut w = World::default_world().unwrap();
    let shape = w.objects()[0];
    set_material(&mut w, shape, |m| m.transparency(1.0).refractive_index(1.5));

    let r2 = 2f64.sqrt() / 2.0;
    let r = test_ray(Tuple::point(0.0, 0.0, r2), Tuple::vector(0.0, 1.0, 0.0));
    let xs = Intersections::new(vec![
        Intersection::new(-r2, shape),
        Intersection::new(r2, shape),
    ]);
    let comps = IntersectionComputation::new(w.shapes(), &r, &xs[1], Some(&xs))
        .unwrap();

    assert_eq!(w.refracted_color(&comps, 5).unwrap(), Color::black());
}

#[cfg(test)]
fn with_glass_core(w: &mut World) -> (ShapeId, ShapeId) {
    let outer = w.objects()[0];
    let inner = w.objects()[1];
    set_material(w, outer, |m| m.ambient(1.0).pattern(Pattern::point_color()));
    set_material(w, inner, |m| m.transparency(1.0).refractive_index(1.5));

    (outer, inner)
}

#[test]
fn refracted_color_with_refracted_ray() {
    let mut w = World::default_world().unwrap();
    let (outer, inner) = with_glass_core(&mut w);

    let r = test_ray(Tuple::point(0.0, 0.0, 0.1), Tuple::vector(0.0, 1.0, 0.0));
    let xs = Intersections::new(vec![
        Intersection::new(-0.9899, outer),
        Intersection::new(-0.4899, inner),
        Intersection::new(0.4899, inner),
        Intersection::new(0.9899, outer),
    ]);
    let comps = IntersectionComputation::new(w.shapes(), &r, &xs[2], Some(&xs))
        .unwrap();

    assert_eq!(w.refracted_color(&comps, 5).unwrap(),
        Color::rgb(0.0, 0.99888, 0.04725));
}

#[test]
fn color_at_tracks_the_shapes_a_ray_starts_inside() {
    let mut w = World::default_world().unwrap();
    with_glass_core(&mut w);

    // Leaving the glass core is a move from index 1.5 to 1.0
    let r = test_ray(Tuple::point(0.0, 0.0, 0.1), Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(w.color_at(&r, 5).unwrap(), Color::rgb(0.1, 1.09888, 0.14725));
}

#[test]
fn color_at_leaving_glass_at_an_angle() {
    let mut w = World::default_world().unwrap();
    with_glass_core(&mut w);

    let r = test_ray(Tuple::point(0.0, 0.0, 0.1), Tuple::vector(0.6, 0.8, 0.0));
    assert_eq!(w.color_at(&r, 5).unwrap(), Color::rgb(0.69933, 0.89911, 0.14725));
}

#[cfg(test)]
fn with_glass_floor_and_ball(w: &mut World, reflective: f64) -> ShapeId {
    let floor = Material::builder()
        .transparency(0.5)
        .refractive_index(1.5)
        .reflective(reflective)
        .build()
        .unwrap();
    let floor = w.add_object(
        Shape::plane()
            .with_material(floor)
            .with_transform(Matrix::translation(0.0, -1.0, 0.0))
            .unwrap()
    );

    let ball = Material::builder()
        .color(Color::rgb(1.0, 0.0, 0.0))
        .ambient(0.5)
        .build()
        .unwrap();
    w.add_object(
        Shape::sphere()
            .with_material(ball)
            .with_transform(Matrix::translation(0.0, -3.5, -0.5))
            .unwrap()
    );

    floor
}

#[test]
fn shade_hit_with_transparent_material() {
    let mut w = World::default_world().unwrap();
    let floor = with_glass_floor_and_ball(&mut w, 0.0);
    let r2 = 2f64.sqrt() / 2.0;

    let r = test_ray(Tuple::point(0.0, 0.0, -3.0), Tuple::vector(0.0, -r2, r2));
    let xs = Intersections::new(vec![Intersection::new(2f64.sqrt(), floor)]);
    let comps = IntersectionComputation::new(w.shapes(), &r, &xs[0], Some(&xs))
        .unwrap();

    assert_eq!(w.shade_hit(&comps, 5).unwrap(),
        Color::rgb(0.93642, 0.68642, 0.68642));
}

#[test]
fn shade_hit_with_reflective_transparent_material() {
    let mut w = World::default_world().unwrap();
    let floor = with_glass_floor_and_ball(&mut w, 0.5);
    let r2 = 2f64.sqrt() / 2.0;

    let r = test_ray(Tuple::point(0.0, 0.0, -3.0), Tuple::vector(0.0, -r2, r2));
    let xs = Intersections::new(vec![Intersection::new(2f64.sqrt(), floor)]);
    let comps = IntersectionComputation::new(w.shapes(), &r, &xs[0], Some(&xs))
        .unwrap();

    assert_eq!(w.shade_hit(&comps, 5).unwrap(),
        Color::rgb(0.93391, 0.69643, 0.69243));
}
