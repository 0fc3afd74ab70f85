use std::f64::consts::PI;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use log::{ error, info };

use recursive_ray_tracer::Result;
use recursive_ray_tracer::camera::Camera;
use recursive_ray_tracer::color::Color;
use recursive_ray_tracer::light::PointLight;
use recursive_ray_tracer::material::Material;
use recursive_ray_tracer::matrix::Matrix;
use recursive_ray_tracer::scene::Scene;
use recursive_ray_tracer::shape::Shape;
use recursive_ray_tracer::tuple::Tuple;
use recursive_ray_tracer::world::World;

const DEMO_WIDTH: usize = 300;
const DEMO_HEIGHT: usize = 150;

/// Renders a scene to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// JSON scene description. Renders a built-in demo scene if omitted.
    scene: Option<PathBuf>,

    /// Where to write the rendered image.
    #[clap(short, long, default_value = "out.ppm")]
    output: PathBuf,

    /// Override the scene's reflection/refraction recursion depth.
    #[clap(short, long)]
    depth: Option<usize>,

    /// Render every pixel, including the last row and column.
    #[clap(long)]
    full_coverage: bool,
}

/// Three spheres in a room with two walls, lit from above-left.
fn demo_scene() -> Result<Scene> {
    let room = Material::builder()
        .color(Color::rgb(1.0, 0.9, 0.9))
        .specular(0.0)
        .build()?;

    let flatten = Matrix::scaling(10.0, 0.01, 10.0);
    let wall_base = Matrix::translation(0.0, 0.0, 5.0);

    let floor = Shape::sphere()
        .with_material(room)
        .with_transform(flatten)?;
    let left_wall = Shape::sphere()
        .with_material(room)
        .with_transform(wall_base * Matrix::rotate(PI / 2.0, -PI / 4.0, 0.0) * flatten)?;
    let right_wall = Shape::sphere()
        .with_material(room)
        .with_transform(wall_base * Matrix::rotate(PI / 2.0, PI / 4.0, 0.0) * flatten)?;

    let ball = |color: Color| Material::builder()
        .color(color)
        .diffuse(0.7)
        .specular(0.3)
        .build();

    let middle = Shape::sphere()
        .with_material(ball(Color::rgb(0.1, 1.0, 0.5))?)
        .with_transform(Matrix::translation(-0.5, 1.0, 0.5))?;
    let right = Shape::sphere()
        .with_material(ball(Color::rgb(0.5, 1.0, 0.1))?)
        .with_transform(Matrix::translation(1.5, 0.5, -0.5)
            * Matrix::scaling(0.5, 0.5, 0.5))?;
    let left = Shape::sphere()
        .with_material(ball(Color::rgb(1.0, 0.8, 0.1))?)
        .with_transform(Matrix::translation(-1.5, 0.33, -0.75)
            * Matrix::scaling(0.33, 0.33, 0.33))?;

    let light = PointLight::new(Color::white(), Tuple::point(-10.0, 10.0, -10.0))?;
    let mut world = World::new(light);
    for shape in [floor, left_wall, right_wall, middle, right, left] {
        world.add_object(shape);
    }

    let camera = Camera::new(DEMO_WIDTH, DEMO_HEIGHT, PI / 3.0,
        Matrix::view_transform(
            Tuple::point(0.0, 1.5, -5.0),
            Tuple::point(0.0, 1.0, 0.0),
            Tuple::vector(0.0, 1.0, 0.0),
        )?)?;

    Ok(Scene { world, camera })
}

fn run(args: Args) -> Result<()> {
    let Scene { mut world, mut camera } = match args.scene {
        Some(ref path) => Scene::load(path)?,
        None => {
            info!("no scene given, rendering the demo scene");
            demo_scene()?
        }
    };

    if let Some(depth) = args.depth {
        world.recursion_depth = depth;
    }
    camera.full_coverage |= args.full_coverage;

    let start = Instant::now();
    let image = camera.render(&world)?;
    image.save(&args.output)?;

    info!("wrote {} in {:.2?}", args.output.display(), start.elapsed());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    if let Err(e) = run(Args::parse()) {
        error!("{}", e);
        process::exit(1);
    }
}
