// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Distance a spawned ray's origin is nudged off a surface. Kept separate from
// FEQ_EPSILON; it only has to beat the rounding error of an intersection.
pub const SURFACE_OFFSET: f64 = 0.0001;

// Maximum number of reflective/refractive bounces per primary ray
pub const DEFAULT_RECURSION_DEPTH: usize = 5;

// Refraction index outside every shape
pub const VACUUM_RI: f64 = 1.0;
