//! Keypoint heatmaps.
//!
//! Sparse keypoints in normalized coordinates are turned into dense Gaussian maps
//! over a square coordinate grid.

pub use crate::{error::Error, function::grid::make_coordinate_grid};
pub use burn::{
    config::Config,
    module::Module,
    tensor::{backend::Backend, Tensor},
};

use crate::{
    function::grid::validate_spatial_size,
    preset::heatmap::{SIGMA_DEFAULT, SPATIAL_SIZE_DEFAULT},
};

/// The configuration for [`KeypointHeatmap`].
#[derive(Config, Copy, Debug)]
pub struct KeypointHeatmapConfig {
    /// Side length of the output heatmaps.
    #[config(default = "SPATIAL_SIZE_DEFAULT")]
    pub spatial_size: usize,
    /// Standard deviation of the Gaussian in normalized coordinates.
    #[config(default = "SIGMA_DEFAULT")]
    pub sigma: f64,
}

/// Represent normalized keypoints as Gaussian heatmaps.
///
/// `exp(-|grid - keypoint|^2 / (2 * sigma^2))`
#[derive(Clone, Debug, Module)]
pub struct KeypointHeatmap {
    /// Side length of the output heatmaps.
    pub spatial_size: usize,
    /// Standard deviation of the Gaussian.
    pub sigma: f64,
}

impl KeypointHeatmapConfig {
    /// Initialize from the configuration.
    ///
    /// ## Errors
    ///
    /// * `spatial_size` should be at least
    ///   [`SPATIAL_SIZE_MIN`](crate::preset::heatmap::SPATIAL_SIZE_MIN).
    /// * `sigma` should be positive and finite.
    pub fn init(&self) -> Result<KeypointHeatmap, Error> {
        let heatmap = KeypointHeatmap {
            spatial_size: self.spatial_size,
            sigma: self.sigma,
        };
        heatmap.validate()?;
        Ok(heatmap)
    }
}

impl KeypointHeatmap {
    /// Applies the forward pass on the keypoints.
    ///
    /// ## Shapes
    ///
    /// * `keypoints` - `[..., N, 2]`, with `(x, y)` in `[-1, 1]`
    /// * `output` - `[..., N, S, S]`, where `S` is [`Self::spatial_size`]
    ///
    /// `D2` should be `D + 1`.
    ///
    /// ## Details
    ///
    /// The leading dimensions are preserved.
    /// The value at `[..., n, row, col]` is the Gaussian of the distance
    /// from the `n`-th keypoint to `grid[row, col]`,
    /// where `grid` is made by [`make_coordinate_grid`].
    ///
    /// The process is differentiable with respect to `keypoints`.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use burn::backend::NdArray;
    /// use kpmap::heatmap::{KeypointHeatmapConfig, Tensor};
    ///
    /// let heatmap = KeypointHeatmapConfig::new()
    ///     .with_spatial_size(65)
    ///     .with_sigma(0.1)
    ///     .init()
    ///     .unwrap();
    ///
    /// let keypoints = Tensor::<NdArray, 3>::zeros([4, 10, 2], &Default::default());
    /// let output: Tensor<NdArray, 4> = heatmap.forward(keypoints).unwrap();
    /// assert_eq!(output.dims(), [4, 10, 65, 65]);
    /// ```
    pub fn forward<B: Backend, const D: usize, const D2: usize>(
        &self,
        keypoints: Tensor<B, D>,
    ) -> Result<Tensor<B, D2>, Error> {
        self.validate()?;

        let dims_output = self.output_dims::<D, D2>(keypoints.dims())?;
        let size = self.spatial_size;
        // M = prod(...) * N
        let count = dims_output[..D - 1].iter().product::<usize>();

        #[cfg(debug_assertions)]
        {
            use humansize::{format_size, BINARY};

            let byte_count =
                count * size * size * std::mem::size_of::<B::FloatElem>();
            log::debug!(
                target: "kpmap::heatmap",
                "KeypointHeatmap::forward > {:?} -> {:?} ({})",
                keypoints.dims(),
                dims_output,
                format_size(byte_count, BINARY),
            );
        }

        let device = keypoints.device();

        // [M, S, S, 2]
        let grid = make_coordinate_grid::<B>(size, &device)?
            .unsqueeze::<4>()
            .expand([count, size, size, 2]);

        // [M, 1, 1, 2]
        let keypoints = keypoints.reshape([count, 1, 1, 2]);

        // [M, S, S]
        let distances_squared =
            (grid - keypoints).powf_scalar(2.0).sum_dim(3).squeeze::<3>(3);

        let heatmaps = distances_squared
            .div_scalar(2.0 * self.sigma.powi(2))
            .neg()
            .exp();

        Ok(heatmaps.reshape(dims_output))
    }

    /// Returns the output dimensions for keypoints of dimensions `dims`.
    ///
    /// It fails without allocating if the ranks or the trailing dimension mismatch.
    pub fn output_dims<const D: usize, const D2: usize>(
        &self,
        dims: [usize; D],
    ) -> Result<[usize; D2], Error> {
        if D < 2 || dims[D - 1] != 2 {
            return Err(Error::MismatchedShape(
                "keypoints.dims()".into(),
                "[..., N, 2]".into(),
                dims.to_vec(),
            ));
        }
        if D2 != D + 1 {
            return Err(Error::Validation(
                "The rank of heatmaps".into(),
                format!("{} for keypoints of rank {D}, but got {D2}", D + 1),
            ));
        }

        dims[..D - 1]
            .iter()
            .copied()
            .chain([self.spatial_size; 2])
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|dims_output| {
                Error::MismatchedShape(
                    "The dimensions of heatmaps".into(),
                    format!("of rank {D2}"),
                    dims_output,
                )
            })
    }

    fn validate(&self) -> Result<(), Error> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(Error::Validation(
                "sigma".into(),
                format!("positive and finite, but got {}", self.sigma),
            ));
        }
        validate_spatial_size(self.spatial_size)
    }
}

impl Default for KeypointHeatmapConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
