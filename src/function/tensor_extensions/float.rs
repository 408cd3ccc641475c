use burn::tensor::{backend, Float, Tensor};

pub trait TensorFloatExtension<B: backend::Backend> {
    fn map_frames<F>(
        self,
        f: F,
    ) -> Self
    where
        F: FnOnce(Tensor<B, 4>) -> Tensor<B, 4>;
}

impl<B: backend::Backend> TensorFloatExtension<B> for Tensor<B, 5, Float> {
    /// Applying a 2D operator to each frame of a volume.
    ///
    /// ## Shapes
    ///
    /// * `self` - `[N, C, D, H, W]`
    /// * `f` - `[N * D, C, H, W]` to `[N * D, C', H', W']`
    /// * `output` - `[N, C', D, H', W']`
    fn map_frames<F>(
        self,
        f: F,
    ) -> Self
    where
        F: FnOnce(Tensor<B, 4>) -> Tensor<B, 4>,
    {
        let [batch, channels, depth, height, width] = self.dims();
        let frames = self
            .swap_dims(1, 2)
            .reshape([batch * depth, channels, height, width]);

        let frames = f(frames);

        let [count, channels, height, width] = frames.dims();
        assert_eq!(
            count,
            batch * depth,
            "The frame count should be preserved, \
            but got {count} instead of {} for batch = {batch} and depth = {depth}",
            batch * depth,
        );
        frames
            .reshape([batch, depth, channels, height, width])
            .swap_dims(1, 2)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn map_frames_identity() {
        use super::*;
        use burn::backend::NdArray;

        let device = Default::default();

        let input = Tensor::<NdArray<f32>, 1, burn::tensor::Int>::arange(
            0..2 * 3 * 4 * 2 * 2,
            &device,
        )
        .float()
        .reshape([2, 3, 4, 2, 2]);
        let output = input.to_owned().map_frames(|frames| {
            assert_eq!(frames.dims(), [8, 3, 2, 2]);
            frames
        });
        output.into_data().assert_eq(&input.into_data(), true);
    }

    #[test]
    fn map_frames_per_frame() {
        use super::*;
        use burn::{backend::NdArray, tensor::TensorData};

        let device = Default::default();

        // Frame d of every sample is filled with d
        let input = Tensor::<NdArray<f32>, 1, burn::tensor::Int>::arange(
            0..3,
            &device,
        )
        .float()
        .reshape([1, 1, 3, 1, 1])
        .expand([2, 1, 3, 2, 2]);

        let output = input.map_frames(|frames| frames.sum_dim(3).sum_dim(2));
        assert_eq!(output.dims(), [2, 1, 3, 1, 1]);
        output.into_data().assert_eq(
            &TensorData::new(
                vec![0.0_f32, 4.0, 8.0, 0.0, 4.0, 8.0],
                [2, 1, 3, 1, 1],
            ),
            true,
        );
    }
}
