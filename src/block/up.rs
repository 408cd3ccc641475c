//! Upsampling blocks.

pub use super::*;
pub use burn::nn::{
    conv::{Conv2d, Conv3d},
    InstanceNorm, Relu,
};

use burn::nn::{
    conv::{Conv2dConfig, Conv3dConfig},
    InstanceNormConfig, PaddingConfig2d, PaddingConfig3d,
};

/// The configuration for [`UpBlock2d`].
#[derive(Config, Copy, Debug)]
pub struct UpBlock2dConfig {
    /// Input channels.
    pub in_features: usize,
    /// Output channels.
    pub out_features: usize,
}

/// The configuration for [`UpBlock3d`].
#[derive(Config, Copy, Debug)]
pub struct UpBlock3dConfig {
    /// Input channels.
    pub in_features: usize,
    /// Output channels.
    pub out_features: usize,
}

/// Decoder block processing each frame separately.
///
/// `ReLU(InstanceNorm(Conv_3x3(Upsample_2x2(input))))`
#[derive(Debug, Module)]
pub struct UpBlock2d<B: Backend> {
    pub conv: Conv2d<B>,
    pub norm: InstanceNorm<B>,
    pub ac: Relu,
}

/// Decoder block processing video.
///
/// `ReLU(InstanceNorm(Conv_3x3x3(Upsample_1x2x2(input))))`
#[derive(Debug, Module)]
pub struct UpBlock3d<B: Backend> {
    pub conv: Conv3d<B>,
    pub norm: InstanceNorm<B>,
    pub ac: Relu,
}

impl UpBlock2dConfig {
    /// Initialize from the configuration.
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<UpBlock2d<B>, Error> {
        validate_features(self.in_features, self.out_features)?;

        let conv = Conv2dConfig::new([self.in_features, self.out_features], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let norm = InstanceNormConfig::new(self.out_features)
            .with_affine(true)
            .init(device);
        let ac = Relu::new();
        Ok(UpBlock2d { conv, norm, ac })
    }
}

impl UpBlock3dConfig {
    /// Initialize from the configuration.
    pub fn init<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<UpBlock3d<B>, Error> {
        validate_features(self.in_features, self.out_features)?;

        let conv =
            Conv3dConfig::new([self.in_features, self.out_features], [3, 3, 3])
                .with_padding(PaddingConfig3d::Explicit(1, 1, 1))
                .init(device);
        let norm = InstanceNormConfig::new(self.out_features)
            .with_affine(true)
            .init(device);
        let ac = Relu::new();
        Ok(UpBlock3d { conv, norm, ac })
    }
}

impl<B: Backend> UpBlock2d<B> {
    /// Applies the forward pass on the input tensor.
    ///
    /// ## Shapes
    ///
    /// * `input` - `[N, in_features, H, W]`
    /// * `output` - `[N, out_features, 2 * H, 2 * W]`
    pub fn forward(
        &self,
        mut input: Tensor<B, 4>,
    ) -> Tensor<B, 4> {
        input = upsample_2d(input);
        input = self.conv.forward(input);
        input = self.norm.forward(input);
        input = self.ac.forward(input);
        input
    }
}

impl<B: Backend> UpBlock3d<B> {
    /// Applies the forward pass on the input tensor.
    ///
    /// ## Shapes
    ///
    /// * `input` - `[N, in_features, D, H, W]`
    /// * `output` - `[N, out_features, D, 2 * H, 2 * W]`
    pub fn forward(
        &self,
        mut input: Tensor<B, 5>,
    ) -> Tensor<B, 5> {
        input = upsample_3d(input);
        input = self.conv.forward(input);
        input = self.norm.forward(input);
        input = self.ac.forward(input);
        input
    }
}
