use std::ops::Index;

use log::debug;

use crate::consts::FEQ_EPSILON;
use crate::error::{ Result, TraceError };
use crate::intersect::{ Intersection, Intersections };
use crate::material::Material;
use crate::matrix::Matrix;
use crate::ray::Ray;
use crate::tuple::{ Kind, Tuple };

/// A handle to a shape stored in a `Shapes` arena.
///
/// Handles compare by identity: two shapes with identical geometry and
/// material still have distinct ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// A unit sphere with its center at the object-space origin.
    Sphere,

    /// The XZ plane of object space, extending indefinitely.
    Plane,

    /// A group of shapes. Has no surface of its own; its transform applies
    /// to every child.
    Group(Vec<ShapeId>),
}

/// A shape record: geometry, transform and material.
///
/// The inverse transform is computed once, when the transform is assigned.
/// `parent` is a non-owning back-reference to the containing group, if any.
#[derive(Clone, Debug)]
pub struct Shape {
    kind: ShapeKind,
    pub material: Material,

    transform: Matrix,
    inverse: Matrix,
    parent: Option<ShapeId>,
}

impl Shape {
    fn new(kind: ShapeKind) -> Shape {
        Shape {
            kind,
            material: Material::default(),
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
            parent: None,
        }
    }

    /// Creates a unit sphere with identity transform and default material.
    pub fn sphere() -> Shape {
        Shape::new(ShapeKind::Sphere)
    }

    /// Creates a plane with a normal pointing up along the Y axis.
    pub fn plane() -> Shape {
        Shape::new(ShapeKind::Plane)
    }

    /// Creates an empty group.
    pub fn group() -> Shape {
        Shape::new(ShapeKind::Group(Vec::new()))
    }

    pub fn with_transform(mut self, transform: Matrix) -> Result<Shape> {
        self.set_transform(transform)?;
        Ok(self)
    }

    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// Sets the shape's transform. Fails, leaving the shape unchanged, if
    /// `transform` is singular.
    pub fn set_transform(&mut self, transform: Matrix) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group(_))
    }

    /// The children of a group; empty for any other shape.
    pub fn children(&self) -> &[ShapeId] {
        match self.kind {
            ShapeKind::Group(ref children) => children,
            _ => &[],
        }
    }
}

/// An arena owning every shape of a scene.
///
/// Shapes are addressed by the `ShapeId` returned from `insert`; ids are
/// never reused or invalidated. Indexing with an id from another arena is a
/// logic error and panics like an out-of-bounds slice index.
#[derive(Clone, Debug, Default)]
pub struct Shapes {
    nodes: Vec<Shape>,
}

impl Index<ShapeId> for Shapes {
    type Output = Shape;

    fn index(&self, id: ShapeId) -> &Shape {
        &self.nodes[id.0]
    }
}

impl Shapes {
    pub fn new() -> Shapes {
        Shapes { nodes: Vec::new() }
    }

    /// Moves a shape into the arena.
    ///
    /// The shape is inserted without a parent and, if it is a group, with
    /// no children; membership is only ever changed through `add_child`.
    pub fn insert(&mut self, mut shape: Shape) -> ShapeId {
        shape.parent = None;
        if let ShapeKind::Group(ref mut children) = shape.kind {
            children.clear();
        }

        self.nodes.push(shape);
        ShapeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrows a shape together with the arena, for operations that need to
    /// walk the group hierarchy.
    pub fn shape(&self, id: ShapeId) -> ShapeRef<'_> {
        ShapeRef { shapes: self, id }
    }

    /// Makes `child` a member of `group`.
    ///
    /// Membership is by identity. Adding a current member again does
    /// nothing; adding a shape that belongs to another group moves it here.
    ///
    /// Fails with `NotApplicable` if `group` is not a group, and with
    /// `CyclicGroup` if `child` is `group` itself or one of its ancestors.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) -> Result<()> {
        if !self[group].is_group() {
            return Err(TraceError::NotApplicable("add_child on a non-group shape"));
        }

        if self[child].parent == Some(group) {
            return Ok(());
        }

        let mut ancestor = Some(group);
        while let Some(id) = ancestor {
            if id == child {
                return Err(TraceError::CyclicGroup { group, child });
            }
            ancestor = self[id].parent;
        }

        if let Some(old) = self[child].parent {
            if let ShapeKind::Group(ref mut siblings) = self.nodes[old.0].kind {
                siblings.retain(|&s| s != child);
            }
            debug!("moving {:?} from {:?} to {:?}", child, old, group);
        } else {
            debug!("adding {:?} to {:?}", child, group);
        }

        if let ShapeKind::Group(ref mut children) = self.nodes[group.0].kind {
            children.push(child);
        }
        self.nodes[child.0].parent = Some(group);

        Ok(())
    }
}

/// A shape borrowed together with the arena it lives in.
///
/// Everything that depends on the group hierarchy (intersection through
/// groups, coordinate-space conversion through parents) goes through this
/// view.
#[derive(Copy, Clone, Debug)]
pub struct ShapeRef<'a> {
    shapes: &'a Shapes,
    id: ShapeId,
}

impl<'a> ShapeRef<'a> {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn shape(&self) -> &'a Shape {
        &self.shapes[self.id]
    }

    pub fn material(&self) -> &'a Material {
        &self.shape().material
    }

    pub fn parent(&self) -> Option<ShapeRef<'a>> {
        self.shape().parent.map(|id| self.shapes.shape(id))
    }

    /// Intersects a world-space ray with this shape.
    ///
    /// The ray is carried into object space by the inverse transform, then
    /// handed to `local_intersect`. The result is sorted by `t`.
    pub fn intersect(&self, ray: &Ray) -> Result<Intersections> {
        let local_ray = ray.transform(self.shape().inverse());
        self.local_intersect(&local_ray)
    }

    pub fn local_intersect(&self, ray: &Ray) -> Result<Intersections> {
        match self.shape().kind {
            ShapeKind::Sphere => self.intersect_sphere(ray),
            ShapeKind::Plane => Ok(self.intersect_plane(ray)),
            ShapeKind::Group(ref children) => {
                let mut all = Vec::new();
                for &child in children.iter() {
                    all.push(self.shapes.shape(child).intersect(ray)?);
                }

                Ok(Intersections::aggregate(all))
            },
        }
    }

    /// The world-space surface normal at `world_point`.
    ///
    /// Fails if `world_point` is not a point, or if this shape is a group.
    pub fn normal_at(&self, world_point: Tuple, hit: &Intersection)
        -> Result<Tuple> {
        world_point.check_kind(Kind::Point)?;

        let local_point = self.world_to_object(world_point);
        let local_normal = self.local_normal_at(local_point, hit)?;
        self.normal_to_world(local_normal)
    }

    /// The object-space normal at an object-space point.
    pub fn local_normal_at(&self, point: Tuple, _hit: &Intersection)
        -> Result<Tuple> {
        match self.shape().kind {
            ShapeKind::Sphere => Ok(point - Tuple::origin()),
            ShapeKind::Plane => Ok(Tuple::vector(0.0, 1.0, 0.0)),
            ShapeKind::Group(_) => {
                Err(TraceError::NotApplicable("local_normal_at on a group"))
            },
        }
    }

    /// Converts a point from world space to this shape's object space.
    ///
    /// The outermost group's inverse is applied first, then each group
    /// beneath it, then this shape's own inverse.
    pub fn world_to_object(&self, point: Tuple) -> Tuple {
        let point = match self.parent() {
            Some(parent) => parent.world_to_object(point),
            None => point,
        };

        *self.shape().inverse() * point
    }

    /// Converts an object-space normal to world space.
    ///
    /// The reverse of `world_to_object`: this shape's inverse-transpose is
    /// applied first, renormalizing at each level, then each parent's.
    pub fn normal_to_world(&self, normal: Tuple) -> Result<Tuple> {
        let n = self.shape().inverse().transpose() * normal;
        let n = Tuple::vector(n.x, n.y, n.z).normalize()?;

        match self.parent() {
            Some(parent) => parent.normal_to_world(n),
            None => Ok(n),
        }
    }

    /// Intersects a ray with the unit sphere.
    ///
    /// A ray tangent to the sphere yields two equal intersections.
    fn intersect_sphere(&self, ray: &Ray) -> Result<Intersections> {
        let sphere_to_ray = ray.origin - Tuple::origin();

        let a = ray.direction.dot(&ray.direction)?;
        let b = 2.0 * ray.direction.dot(&sphere_to_ray)?;
        let c = sphere_to_ray.dot(&sphere_to_ray)? - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);
        if discriminant < 0.0 {
            return Ok(Intersections::empty());
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        Ok(Intersections::new(vec![
            Intersection::new(t1, self.id),
            Intersection::new(t2, self.id),
        ]))
    }

    /// Intersects a ray with the XZ plane. Rays parallel to the plane miss,
    /// including rays lying in it.
    fn intersect_plane(&self, ray: &Ray) -> Intersections {
        if ray.direction.y.abs() < FEQ_EPSILON {
            return Intersections::empty();
        }

        let t = -ray.origin.y / ray.direction.y;
        Intersections::new(vec![Intersection::new(t, self.id)])
    }
}

#[cfg(test)]
fn test_ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray {
    Ray::new(
        Tuple::point(origin.0, origin.1, origin.2),
        Tuple::vector(direction.0, direction.1, direction.2),
    ).unwrap()
}

#[cfg(test)]
fn ts(xs: &Intersections) -> Vec<f64> {
    xs.iter().map(|i| i.t).collect()
}

#[test]
fn ray_intersects_sphere_at_two_points() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = shapes.shape(s).intersect(&test_ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)))
        .unwrap();

    assert_eq!(ts(&xs), vec![4.0, 6.0]);
    assert!(xs.iter().all(|i| i.shape == s));
}

#[test]
fn ray_is_tangent_to_sphere() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = shapes.shape(s).intersect(&test_ray((0.0, 1.0, -5.0), (0.0, 0.0, 1.0)))
        .unwrap();

    assert_eq!(ts(&xs), vec![5.0, 5.0]);
}

#[test]
fn ray_misses_sphere() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = shapes.shape(s).intersect(&test_ray((0.0, 2.0, -5.0), (0.0, 0.0, 1.0)))
        .unwrap();

    assert!(xs.is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = shapes.shape(s).intersect(&test_ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)))
        .unwrap();

    assert_eq!(ts(&xs), vec![-1.0, 1.0]);
}

#[test]
fn sphere_is_behind_ray() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let xs = shapes.shape(s).intersect(&test_ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0)))
        .unwrap();

    assert_eq!(ts(&xs), vec![-6.0, -4.0]);
}

#[test]
fn intersect_scaled_and_translated_spheres() {
    let mut shapes = Shapes::new();
    let scaled = shapes.insert(
        Shape::sphere().with_transform(Matrix::scaling(2.0, 2.0, 2.0)).unwrap()
    );
    let moved = shapes.insert(
        Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0)).unwrap()
    );
    let r = test_ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));

    assert_eq!(ts(&shapes.shape(scaled).intersect(&r).unwrap()), vec![3.0, 7.0]);
    assert!(shapes.shape(moved).intersect(&r).unwrap().is_empty());
}

#[test]
fn intersect_is_repeatable() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(
        Shape::sphere().with_transform(Matrix::scaling(2.0, 2.0, 2.0)).unwrap()
    );
    let r = test_ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));

    let first = ts(&shapes.shape(s).intersect(&r).unwrap());
    let second = ts(&shapes.shape(s).intersect(&r).unwrap());

    assert_eq!(first, second);
    assert_eq!(r, test_ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));
}

#[test]
fn singular_shape_transform_is_rejected() {
    let mut s = Shape::sphere();

    assert!(s.set_transform(Matrix::scaling(0.0, 0.0, 0.0)).is_err());
    assert_eq!(*s.transform(), Matrix::identity());
}

#[test]
fn normals_on_sphere() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let hit = Intersection::new(0.0, s);
    let sphere = shapes.shape(s);
    let r3 = 3f64.sqrt() / 3.0;

    assert_eq!(sphere.normal_at(Tuple::point(1.0, 0.0, 0.0), &hit).unwrap(),
        Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(sphere.normal_at(Tuple::point(0.0, 1.0, 0.0), &hit).unwrap(),
        Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(sphere.normal_at(Tuple::point(0.0, 0.0, 1.0), &hit).unwrap(),
        Tuple::vector(0.0, 0.0, 1.0));

    let n = sphere.normal_at(Tuple::point(r3, r3, r3), &hit).unwrap();
    assert_eq!(n, Tuple::vector(r3, r3, r3));
    assert_eq!(n, n.normalize().unwrap());
}

#[test]
fn normal_on_translated_sphere() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(
        Shape::sphere().with_transform(Matrix::translation(0.0, 1.0, 0.0)).unwrap()
    );
    let n = shapes.shape(s)
        .normal_at(Tuple::point(0.0, 1.70711, -0.70711), &Intersection::new(0.0, s))
        .unwrap();

    assert_eq!(n, Tuple::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_transformed_sphere() {
    let mut shapes = Shapes::new();
    let transform = Matrix::scaling(1.0, 0.5, 1.0)
        * Matrix::rotation_z(std::f64::consts::PI / 5.0);
    let s = shapes.insert(Shape::sphere().with_transform(transform).unwrap());
    let r2 = 2f64.sqrt() / 2.0;
    let n = shapes.shape(s)
        .normal_at(Tuple::point(0.0, r2, -r2), &Intersection::new(0.0, s))
        .unwrap();

    assert_eq!(n, Tuple::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_at_rejects_vectors() {
    let mut shapes = Shapes::new();
    let s = shapes.insert(Shape::sphere());
    let res = shapes.shape(s)
        .normal_at(Tuple::vector(1.0, 0.0, 0.0), &Intersection::new(0.0, s));

    assert!(matches!(res, Err(TraceError::InvalidOperandKind { .. })));
}

#[test]
fn normal_on_plane_is_constant() {
    let mut shapes = Shapes::new();
    let p = shapes.insert(Shape::plane());
    let plane = shapes.shape(p);
    let hit = Intersection::new(0.0, p);

    for point in [
        Tuple::point(0.0, 0.0, 0.0),
        Tuple::point(10.0, 0.0, -10.0),
        Tuple::point(-5.0, 0.0, 150.0),
    ].iter() {
        assert_eq!(plane.local_normal_at(*point, &hit).unwrap(),
            Tuple::vector(0.0, 1.0, 0.0));
    }
}

#[test]
fn ray_parallel_to_plane() {
    let mut shapes = Shapes::new();
    let p = shapes.insert(Shape::plane());
    let plane = shapes.shape(p);

    let above = test_ray((0.0, 10.0, 0.0), (0.0, 0.0, 1.0));
    let coplanar = test_ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));

    assert!(plane.local_intersect(&above).unwrap().is_empty());
    assert!(plane.local_intersect(&coplanar).unwrap().is_empty());
}

#[test]
fn ray_intersecting_plane_from_above_and_below() {
    let mut shapes = Shapes::new();
    let p = shapes.insert(Shape::plane());
    let plane = shapes.shape(p);

    let from_above = plane.local_intersect(&test_ray((0.0, 1.0, 0.0), (0.0, -1.0, 0.0)))
        .unwrap();
    let from_below = plane.local_intersect(&test_ray((0.0, -1.0, 0.0), (0.0, 1.0, 0.0)))
        .unwrap();

    assert_eq!(ts(&from_above), vec![1.0]);
    assert_eq!(from_above[0].shape, p);
    assert_eq!(ts(&from_below), vec![1.0]);
}

#[test]
fn creating_a_shape_group() {
    let g = Shape::group();

    assert!(g.is_group());
    assert!(g.children().is_empty());
    assert_eq!(*g.transform(), Matrix::identity());
}

#[test]
fn adding_a_child_to_a_shape_group() {
    let mut shapes = Shapes::new();
    let g = shapes.insert(Shape::group());
    let s = shapes.insert(Shape::sphere());

    shapes.add_child(g, s).unwrap();

    assert_eq!(shapes[g].children(), &[s]);
    assert_eq!(shapes[s].parent(), Some(g));
}

#[test]
fn group_membership_is_by_identity() {
    let mut shapes = Shapes::new();
    let g = shapes.insert(Shape::group());
    let s1 = shapes.insert(Shape::sphere());
    let s2 = shapes.insert(Shape::sphere());

    shapes.add_child(g, s1).unwrap();
    shapes.add_child(g, s2).unwrap();
    shapes.add_child(g, s1).unwrap();

    assert_eq!(shapes[g].children(), &[s1, s2]);
}

#[test]
fn adding_a_member_of_another_group_moves_it() {
    let mut shapes = Shapes::new();
    let g1 = shapes.insert(Shape::group());
    let g2 = shapes.insert(Shape::group());
    let s = shapes.insert(Shape::sphere());

    shapes.add_child(g1, s).unwrap();
    shapes.add_child(g2, s).unwrap();

    assert!(shapes[g1].children().is_empty());
    assert_eq!(shapes[g2].children(), &[s]);
    assert_eq!(shapes[s].parent(), Some(g2));
}

#[test]
fn groups_cannot_contain_themselves() {
    let mut shapes = Shapes::new();
    let outer = shapes.insert(Shape::group());
    let inner = shapes.insert(Shape::group());
    shapes.add_child(outer, inner).unwrap();

    assert!(matches!(shapes.add_child(outer, outer),
        Err(TraceError::CyclicGroup { .. })));
    assert!(matches!(shapes.add_child(inner, outer),
        Err(TraceError::CyclicGroup { .. })));
    assert_eq!(shapes[outer].parent(), None);
}

#[test]
fn only_groups_have_children() {
    let mut shapes = Shapes::new();
    let s1 = shapes.insert(Shape::sphere());
    let s2 = shapes.insert(Shape::sphere());

    assert!(matches!(shapes.add_child(s1, s2),
        Err(TraceError::NotApplicable(_))));
}

#[test]
fn groups_have_no_normal() {
    let mut shapes = Shapes::new();
    let g = shapes.insert(Shape::group());
    let res = shapes.shape(g)
        .local_normal_at(Tuple::point(0.0, 0.0, 0.0), &Intersection::new(0.0, g));

    assert!(matches!(res, Err(TraceError::NotApplicable(_))));
}

#[test]
fn intersecting_ray_with_empty_group() {
    let mut shapes = Shapes::new();
    let g = shapes.insert(Shape::group());
    let xs = shapes.shape(g).local_intersect(&test_ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)))
        .unwrap();

    assert!(xs.is_empty());
}

#[test]
fn intersecting_ray_with_nonempty_group() {
    let mut shapes = Shapes::new();
    let g = shapes.insert(Shape::group());
    let s1 = shapes.insert(Shape::sphere());
    let s2 = shapes.insert(
        Shape::sphere().with_transform(Matrix::translation(0.0, 0.0, -3.0)).unwrap()
    );
    let s3 = shapes.insert(
        Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0)).unwrap()
    );

    shapes.add_child(g, s1).unwrap();
    shapes.add_child(g, s2).unwrap();
    shapes.add_child(g, s3).unwrap();

    let xs = shapes.shape(g).local_intersect(&test_ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)))
        .unwrap();
    let hit_shapes: Vec<ShapeId> = xs.iter().map(|i| i.shape).collect();

    assert_eq!(hit_shapes, vec![s2, s2, s1, s1]);
    assert_eq!(ts(&xs), vec![1.0, 3.0, 4.0, 6.0]);
}

#[test]
fn intersecting_a_transformed_group() {
    let mut shapes = Shapes::new();
    let g = shapes.insert(
        Shape::group().with_transform(Matrix::scaling(2.0, 2.0, 2.0)).unwrap()
    );
    let s = shapes.insert(
        Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0)).unwrap()
    );
    shapes.add_child(g, s).unwrap();

    let xs = shapes.shape(g).intersect(&test_ray((10.0, 0.0, -10.0), (0.0, 0.0, 1.0)))
        .unwrap();
    assert_eq!(xs.len(), 2);
}

#[cfg(test)]
fn nested_groups(inner_scale: Matrix) -> (Shapes, ShapeId) {
    let mut shapes = Shapes::new();
    let g1 = shapes.insert(
        Shape::group()
            .with_transform(Matrix::rotation_y(std::f64::consts::PI / 2.0))
            .unwrap()
    );
    let g2 = shapes.insert(Shape::group().with_transform(inner_scale).unwrap());
    let s = shapes.insert(
        Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0)).unwrap()
    );

    shapes.add_child(g1, g2).unwrap();
    shapes.add_child(g2, s).unwrap();

    (shapes, s)
}

#[test]
fn converting_a_point_from_world_to_object_space() {
    let (shapes, s) = nested_groups(Matrix::scaling(2.0, 2.0, 2.0));
    let p = shapes.shape(s).world_to_object(Tuple::point(-2.0, 0.0, -10.0));

    assert_eq!(p, Tuple::point(0.0, 0.0, -1.0));
}

#[test]
fn converting_a_normal_from_object_to_world_space() {
    let (shapes, s) = nested_groups(Matrix::scaling(1.0, 2.0, 3.0));
    let r3 = 3f64.sqrt() / 3.0;
    let n = shapes.shape(s).normal_to_world(Tuple::vector(r3, r3, r3)).unwrap();

    assert_eq!(n, Tuple::vector(0.2857, 0.4286, -0.8571));
}

#[test]
fn finding_the_normal_on_a_child_object() {
    let (shapes, s) = nested_groups(Matrix::scaling(1.0, 2.0, 3.0));
    let n = shapes.shape(s)
        .normal_at(Tuple::point(1.7321, 1.1547, -5.5774), &Intersection::new(0.0, s))
        .unwrap();

    assert_eq!(n, Tuple::vector(0.2857, 0.4286, -0.8571));
}
