//! Sampling blocks for encoders and decoders.
//!
//! Each block is `convolution -> instance normalization -> ReLU`
//! with a 2x spatial resampling before (up) or after (down) it.

pub mod down;
pub mod up;

pub use crate::{error::Error, function::tensor_extensions::TensorFloatExtension};
pub use burn::{
    config::Config,
    module::Module,
    tensor::{backend::Backend, Tensor},
};
pub use down::*;
pub use up::*;

use burn::tensor::{
    module::interpolate,
    ops::{InterpolateMode, InterpolateOptions},
};

/// Nearest-neighbor upsampling by 2 along the last two axes.
///
/// ## Shapes
///
/// * `input` - `[N, C, H, W]`
/// * `output` - `[N, C, 2 * H, 2 * W]`
pub fn upsample_2d<B: Backend>(input: Tensor<B, 4>) -> Tensor<B, 4> {
    let [_, _, height, width] = input.dims();
    interpolate(
        input,
        [height * 2, width * 2],
        InterpolateOptions::new(InterpolateMode::Nearest),
    )
}

/// Nearest-neighbor upsampling by `(1, 2, 2)`.
///
/// ## Shapes
///
/// * `input` - `[N, C, D, H, W]`
/// * `output` - `[N, C, D, 2 * H, 2 * W]`
pub fn upsample_3d<B: Backend>(input: Tensor<B, 5>) -> Tensor<B, 5> {
    input.map_frames(upsample_2d)
}

/// The feature counts should be non-zero.
fn validate_features(
    in_features: usize,
    out_features: usize,
) -> Result<(), Error> {
    if in_features == 0 || out_features == 0 {
        return Err(Error::Validation(
            "The feature counts".into(),
            format!(
                "non-zero, but got {in_features} (input) and {out_features} (output)"
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn upsample_2d_nearest() {
        use super::*;
        use burn::backend::NdArray;

        let device = Default::default();

        let input =
            Tensor::<NdArray<f32>, 4>::from_data([[[[1.0, 2.0], [3.0, 4.0]]]], &device);
        let output = upsample_2d(input);
        output.into_data().assert_eq(
            &Tensor::<NdArray<f32>, 4>::from_data(
                [[[
                    [1.0, 1.0, 2.0, 2.0],
                    [1.0, 1.0, 2.0, 2.0],
                    [3.0, 3.0, 4.0, 4.0],
                    [3.0, 3.0, 4.0, 4.0],
                ]]],
                &device,
            )
            .into_data(),
            true,
        );
    }

    #[test]
    fn upsample_3d_keeps_depth() {
        use super::*;
        use burn::{backend::NdArray, tensor::TensorData};

        let device = Default::default();

        // Three frames of 1x1 pixels
        let input = Tensor::<NdArray<f32>, 5>::from_data(
            TensorData::new(vec![1.0_f32, 2.0, 3.0], [1, 1, 3, 1, 1]),
            &device,
        );
        let output = upsample_3d(input);
        assert_eq!(output.dims(), [1, 1, 3, 2, 2]);
        output.into_data().assert_eq(
            &TensorData::new(
                vec![
                    1.0_f32, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0,
                ],
                [1, 1, 3, 2, 2],
            ),
            true,
        );
    }
}
