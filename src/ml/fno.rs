// ============================================================
// Layer 5 — Fourier Neural Operator, 1-D (Burn)
// ============================================================
// Maps a function sampled on a regular 1-D grid to another
// function on the same grid:
//
//   x [batch, in, N]
//     │  lifting:    in → lifting → hidden   (pointwise, GELU between)
//     ▼
//   Fourier block × L:
//     h = spectral_conv(h) + skip(h)         GELU after every block
//                                            except the last
//     │  projection: hidden → projection → out (pointwise, GELU between)
//     ▼
//   y [batch, out, N]
//
// "Pointwise" layers act on the channel axis only, i.e. they
// are 1×1 convolutions, written as a Linear over channels.
//
// Reference: Li et al. (2021) Fourier Neural Operator
//            Kossaifi et al. neuraloperator library (FNO1d layout)

use anyhow::Result;
use burn::{
    nn::{
        loss::{MseLoss, Reduction},
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::gelu,
};

use crate::ml::spectral::{DftBasis, SpectralConv1d, SpectralConv1dConfig};

#[derive(Config, Debug)]
pub struct FnoConfig {
    /// Fourier modes kept by every spectral convolution
    pub n_modes:             usize,
    pub hidden_channels:     usize,
    pub in_channels:         usize,
    pub out_channels:        usize,
    pub lifting_channels:    usize,
    pub projection_channels: usize,
    /// Number of Fourier blocks
    pub layers:              usize,
}

impl FnoConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Fno1d<B> {
        let blocks = (0..self.layers)
            .map(|_| FourierBlock {
                spectral: SpectralConv1dConfig::new(
                    self.hidden_channels, self.hidden_channels, self.n_modes,
                ).init(device),
                skip: LinearConfig::new(self.hidden_channels, self.hidden_channels)
                    .with_bias(false)
                    .init(device),
            })
            .collect();

        Fno1d {
            lifting_in:     LinearConfig::new(self.in_channels, self.lifting_channels).init(device),
            lifting_out:    LinearConfig::new(self.lifting_channels, self.hidden_channels).init(device),
            blocks,
            projection_in:  LinearConfig::new(self.hidden_channels, self.projection_channels).init(device),
            projection_out: LinearConfig::new(self.projection_channels, self.out_channels).init(device),
            n_modes:        self.n_modes,
        }
    }
}

/// Apply a Linear to the channel axis of a [batch, channels, n] tensor.
fn pointwise<B: Backend>(linear: &Linear<B>, x: Tensor<B, 3>) -> Tensor<B, 3> {
    linear.forward(x.swap_dims(1, 2)).swap_dims(1, 2)
}

#[derive(Module, Debug)]
pub struct FourierBlock<B: Backend> {
    pub spectral: SpectralConv1d<B>,
    pub skip:     Linear<B>,
}

impl<B: Backend> FourierBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>, basis: &DftBasis<B>) -> Tensor<B, 3> {
        self.spectral.forward(x.clone(), basis) + pointwise(&self.skip, x)
    }
}

#[derive(Module, Debug)]
pub struct Fno1d<B: Backend> {
    pub lifting_in:     Linear<B>,
    pub lifting_out:    Linear<B>,
    pub blocks:         Vec<FourierBlock<B>>,
    pub projection_in:  Linear<B>,
    pub projection_out: Linear<B>,
    pub n_modes:        usize,
}

impl<B: Backend> Fno1d<B> {
    /// DFT basis for inputs with `n_points` grid points.
    /// Building it once and reusing it keeps the trigonometry
    /// out of every forward pass. Fails when the grid is too
    /// coarse for `n_modes`.
    pub fn basis(&self, n_points: usize, device: &B::Device) -> Result<DftBasis<B>> {
        DftBasis::new(n_points, self.n_modes, device)
    }

    /// x: [batch, in, n_points] → [batch, out, n_points]
    pub fn forward_with_basis(&self, x: Tensor<B, 3>, basis: &DftBasis<B>) -> Tensor<B, 3> {
        let x = gelu(pointwise(&self.lifting_in, x));
        let mut x = pointwise(&self.lifting_out, x);

        let last = self.blocks.len().saturating_sub(1);
        for (i, block) in self.blocks.iter().enumerate() {
            x = block.forward(x, basis);
            if i < last {
                x = gelu(x);
            }
        }

        let x = gelu(pointwise(&self.projection_in, x));
        pointwise(&self.projection_out, x)
    }

    /// Mean squared error against `target` [batch, out, n_points]
    pub fn forward_loss(
        &self,
        x:      Tensor<B, 3>,
        target: Tensor<B, 3>,
        basis:  &DftBasis<B>,
    ) -> Tensor<B, 1> {
        let pred = self.forward_with_basis(x, basis);
        MseLoss::new().forward(pred, target, Reduction::Mean)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::trainer::fit_epochs;
    use burn::{
        backend::{Autodiff, NdArray},
        optim::AdamConfig,
        tensor::Distribution,
    };

    type TestBackend  = NdArray;
    type TestAutodiff = Autodiff<NdArray>;

    fn config(layers: usize) -> FnoConfig {
        FnoConfig::new(4, 6, 1, 3, 8, 8, layers)
    }

    #[test]
    fn test_one_block_per_layer() {
        let model = config(3).init::<TestBackend>(&Default::default());
        assert_eq!(model.blocks.len(), 3);
        assert!(model.blocks.iter().all(|b| b.skip.bias.is_none()));
    }

    #[test]
    fn test_forward_keeps_grid_and_maps_channels() {
        let device = Default::default();
        let model  = config(2).init::<TestBackend>(&device);
        let x     = Tensor::<TestBackend, 3>::random([2, 1, 16], Distribution::Default, &device);
        let basis = model.basis(16, &device).unwrap();

        assert_eq!(model.forward_with_basis(x, &basis).dims(), [2, 3, 16]);
    }

    #[test]
    fn test_reused_basis_gives_identical_outputs() {
        let device = Default::default();
        let model  = config(2).init::<TestBackend>(&device);
        let x      = Tensor::<TestBackend, 3>::random([2, 1, 16], Distribution::Default, &device);
        let basis  = model.basis(16, &device).unwrap();

        let a = model.forward_with_basis(x.clone(), &basis).into_data().to_vec::<f32>().unwrap();
        let b = model.forward_with_basis(x, &basis).into_data().to_vec::<f32>().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_grid_too_coarse_for_modes_is_an_error() {
        // 4 modes need at least 6 grid points
        let model = config(1).init::<TestBackend>(&Default::default());
        assert!(model.basis(5, &Default::default()).is_err());
        assert!(model.basis(6, &Default::default()).is_ok());
    }

    #[test]
    fn test_training_reduces_loss() {
        let device = Default::default();
        let model  = config(1).init::<TestAutodiff>(&device);
        let basis  = model.basis(16, &device).unwrap();
        let x      = Tensor::<TestAutodiff, 3>::random([2, 1, 16], Distribution::Default, &device);
        let y      = Tensor::<TestAutodiff, 3>::random([2, 3, 16], Distribution::Default, &device);

        let initial = model
            .forward_loss(x.clone(), y.clone(), &basis)
            .into_scalar()
            .elem::<f64>();

        let mut optim = AdamConfig::new().init();
        let (_, final_loss) = fit_epochs(model, &mut optim, 1e-2, 50, |m: &Fno1d<TestAutodiff>| {
            m.forward_loss(x.clone(), y.clone(), &basis)
        })
        .unwrap();

        assert!(final_loss < initial, "loss {initial} → {final_loss}");
    }
}
