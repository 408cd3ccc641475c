//! Downsampling blocks.

pub use super::*;
pub use burn::nn::{
    conv::{Conv2d, Conv3d},
    pool::AvgPool2d,
    InstanceNorm, Relu,
};

use burn::nn::{
    conv::{Conv2dConfig, Conv3dConfig},
    pool::AvgPool2dConfig,
    InstanceNormConfig, PaddingConfig2d, PaddingConfig3d,
};

/// The configuration for [`DownBlock2d`].
#[derive(Config, Copy, Debug)]
pub struct DownBlock2dConfig {
    /// Input channels.
    pub in_features: usize,
    /// Output channels.
    pub out_features: usize,
}

/// The configuration for [`DownBlock3d`].
#[derive(Config, Copy, Debug)]
pub struct DownBlock3dConfig {
    /// Input channels.
    pub in_features: usize,
    /// Output channels.
    pub out_features: usize,
}

/// Encoder block processing each frame separately.
///
/// `AvgPool_2x2(ReLU(InstanceNorm(Conv_3x3(input))))`
#[derive(Debug, Module)]
pub struct DownBlock2d<B: Backend> {
    pub conv: Conv2d<B>,
    pub norm: InstanceNorm<B>,
    pub ac: Relu,
    pub pool: AvgPool2d,
}

/// Encoder block processing video.
///
/// `AvgPool_1x2x2(ReLU(InstanceNorm(Conv_3x3x3(input))))`
#[derive(Debug, Module)]
pub struct DownBlock3d<B: Backend> {
    pub conv: Conv3d<B>,
    pub norm: InstanceNorm<B>,
    pub ac: Relu,
    /// Applied to each frame.
    pub pool: AvgPool2d,
}

impl DownBlock2dConfig {
    /// Initialize from the configuration.
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<DownBlock2d<B>, Error> {
        validate_features(self.in_features, self.out_features)?;

        let conv = Conv2dConfig::new([self.in_features, self.out_features], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let norm = InstanceNormConfig::new(self.out_features)
            .with_affine(true)
            .init(device);
        let ac = Relu::new();
        let pool = init_pool();
        Ok(DownBlock2d {
            conv,
            norm,
            ac,
            pool,
        })
    }
}

impl DownBlock3dConfig {
    /// Initialize from the configuration.
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<DownBlock3d<B>, Error> {
        validate_features(self.in_features, self.out_features)?;

        let conv =
            Conv3dConfig::new([self.in_features, self.out_features], [3, 3, 3])
                .with_padding(PaddingConfig3d::Explicit(1, 1, 1))
                .init(device);
        let norm = InstanceNormConfig::new(self.out_features)
            .with_affine(true)
            .init(device);
        let ac = Relu::new();
        let pool = init_pool();
        Ok(DownBlock3d {
            conv,
            norm,
            ac,
            pool,
        })
    }
}

impl<B: Backend> DownBlock2d<B> {
    /// Applies the forward pass on the input tensor.
    ///
    /// ## Shapes
    ///
    /// * `input` - `[N, in_features, H, W]`
    /// * `output` - `[N, out_features, H / 2, W / 2]`
    pub fn forward(
        &self,
        mut input: Tensor<B, 4>,
    ) -> Tensor<B, 4> {
        input = self.conv.forward(input);
        input = self.norm.forward(input);
        input = self.ac.forward(input);
        input = self.pool.forward(input);
        input
    }
}

impl<B: Backend> DownBlock3d<B> {
    /// Applies the forward pass on the input tensor.
    ///
    /// ## Shapes
    ///
    /// * `input` - `[N, in_features, D, H, W]`
    /// * `output` - `[N, out_features, D, H / 2, W / 2]`
    pub fn forward(
        &self,
        mut input: Tensor<B, 5>,
    ) -> Tensor<B, 5> {
        input = self.conv.forward(input);
        input = self.norm.forward(input);
        input = self.ac.forward(input);
        input = input.map_frames(|frames| self.pool.forward(frames));
        input
    }
}

fn init_pool() -> AvgPool2d {
    AvgPool2dConfig::new([2, 2]).with_strides([2, 2]).init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{backend::NdArray, tensor::Distribution};

    type B = NdArray<f32>;

    #[test]
    fn down_block_2d_shapes() {
        let device = Default::default();

        let block = DownBlock2dConfig::new(3, 8).init::<B>(&device).unwrap();
        let input =
            Tensor::<B, 4>::random([2, 3, 16, 12], Distribution::Default, &device);
        let output = block.forward(input);
        assert_eq!(output.dims(), [2, 8, 8, 6]);

        // Odd sides are floored
        let input =
            Tensor::<B, 4>::random([1, 3, 7, 5], Distribution::Default, &device);
        let output = block.forward(input);
        assert_eq!(output.dims(), [1, 8, 3, 2]);
    }

    #[test]
    fn down_block_2d_non_negative() {
        let device = Default::default();

        let block = DownBlock2dConfig::new(4, 4).init::<B>(&device).unwrap();
        let input =
            Tensor::<B, 4>::random([2, 4, 8, 8], Distribution::Normal(0.0, 1.0), &device);
        let output = block.forward(input);
        for value in output.into_data().to_vec::<f32>().unwrap() {
            assert!(value >= 0.0, "{value}");
        }
    }

    #[test]
    fn down_block_3d_shapes() {
        let device = Default::default();

        let block = DownBlock3dConfig::new(2, 5).init::<B>(&device).unwrap();
        let input =
            Tensor::<B, 5>::random([2, 2, 4, 8, 6], Distribution::Default, &device);
        let output = block.forward(input);
        assert_eq!(output.dims(), [2, 5, 4, 4, 3]);
    }

    #[test]
    fn zero_features() {
        let device = Default::default();

        let error = DownBlock2dConfig::new(0, 4).init::<B>(&device).unwrap_err();
        assert!(matches!(error, Error::Validation(..)), "{error}");

        let error = DownBlock3dConfig::new(4, 0).init::<B>(&device).unwrap_err();
        assert!(matches!(error, Error::Validation(..)), "{error}");
    }
}
