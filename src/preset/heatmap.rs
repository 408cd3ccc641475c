/// The default side length of the heatmap grid.
pub const SPATIAL_SIZE_DEFAULT: usize = 64;

/// The smallest side length of the coordinate grid.
///
/// The normalization divides by `spatial_size - 1`.
pub const SPATIAL_SIZE_MIN: usize = 2;

/// The default standard deviation of the Gaussian in normalized coordinates.
pub const SIGMA_DEFAULT: f64 = 0.1;
