//! Normalized coordinate grids.

pub use burn::tensor::{backend::Backend, Int, Tensor};

use crate::{error::Error, preset::heatmap::SPATIAL_SIZE_MIN};

/// Making a square grid of normalized coordinates.
///
/// ## Shapes
///
/// * `output` - `[S, S, 2]`, where `S` is `spatial_size`.
///
/// ## Details
///
/// The entry at `[row, col]` is `(x[col], y[row])`,
/// where both axes map the index range `[0, S - 1]` linearly onto `[-1, 1]`:
///
/// `c(i) = 2 * (i / (S - 1)) - 1`
///
/// The element type is the float element of `B`.
///
/// ## Errors
///
/// `spatial_size` should be at least [`SPATIAL_SIZE_MIN`].
///
/// ## Examples
///
/// ```rust
/// use burn::backend::NdArray;
/// use kpmap::function::grid::make_coordinate_grid;
///
/// let grid = make_coordinate_grid::<NdArray>(3, &Default::default()).unwrap();
/// assert_eq!(grid.dims(), [3, 3, 2]);
///
/// let values = grid.into_data().to_vec::<f32>().unwrap();
/// assert_eq!(&values[0..2], &[-1.0, -1.0]);
/// assert_eq!(&values[2..4], &[0.0, -1.0]);
/// assert_eq!(&values[16..18], &[1.0, 1.0]);
/// ```
pub fn make_coordinate_grid<B: Backend>(
    spatial_size: usize,
    device: &B::Device,
) -> Result<Tensor<B, 3>, Error> {
    validate_spatial_size(spatial_size)?;

    // S
    let size = spatial_size;

    // [S]
    let axis = make_coordinate_axis::<B>(size, device);

    // [S, S, 1]
    let x = axis.to_owned().reshape([1, size, 1]).expand([size, size, 1]);
    let y = axis.reshape([size, 1, 1]).expand([size, size, 1]);

    // [S, S, 2]
    Ok(Tensor::cat(vec![x, y], 2))
}

/// `spatial_size` should be at least [`SPATIAL_SIZE_MIN`].
pub(crate) fn validate_spatial_size(spatial_size: usize) -> Result<(), Error> {
    if spatial_size < SPATIAL_SIZE_MIN {
        return Err(Error::Validation(
            "spatial_size".into(),
            format!("at least {SPATIAL_SIZE_MIN}, but got {spatial_size}"),
        ));
    }
    Ok(())
}

/// Normalized coordinates of one axis, `[S]`.
fn make_coordinate_axis<B: Backend>(
    size: usize,
    device: &B::Device,
) -> Tensor<B, 1> {
    Tensor::<B, 1, Int>::arange(0..size as i64, device)
        .float()
        .div_scalar((size - 1) as f64)
        .mul_scalar(2.0)
        .sub_scalar(1.0)
}
