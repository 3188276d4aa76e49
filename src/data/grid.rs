use burn::{prelude::*, tensor::Distribution};

/// One batch of input/target functions sampled on a regular 1-D grid.
#[derive(Debug, Clone)]
pub struct GridPair<B: Backend> {
    /// [batch, in_channels, n_points]
    pub x: Tensor<B, 3>,
    /// [batch, out_channels, n_points]
    pub y: Tensor<B, 3>,
}

impl<B: Backend> GridPair<B> {
    pub fn random(
        batch_size:   usize,
        in_channels:  usize,
        out_channels: usize,
        n_points:     usize,
        device:       &B::Device,
    ) -> Self {
        Self {
            x: Tensor::random([batch_size, in_channels, n_points], Distribution::Default, device),
            y: Tensor::random([batch_size, out_channels, n_points], Distribution::Default, device),
        }
    }

    pub fn n_points(&self) -> usize {
        self.x.dims()[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_channel_layout() {
        let pair = GridPair::<NdArray>::random(4, 1, 3, 128, &Default::default());
        assert_eq!(pair.x.dims(), [4, 1, 128]);
        assert_eq!(pair.y.dims(), [4, 3, 128]);
        assert_eq!(pair.n_points(), 128);
    }
}
