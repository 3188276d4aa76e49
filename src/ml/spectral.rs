// ============================================================
// Layer 5 — Spectral Convolution (1-D)
// ============================================================
// The building block that makes an FNO a *Fourier* operator:
//
//   x ──rfft──► X[0..modes] ──W_k·──► Y[0..modes] ──irfft──► y
//
// Only the lowest `modes` frequencies survive; each surviving
// frequency k mixes channels with its own complex matrix W_k.
//
// Burn has no FFT, so both transforms are written as matmuls
// against precomputed basis matrices. With θ = 2π·k·n / N:
//
//   Re X_k =  Σ_n x_n cos θ          Im X_k = -Σ_n x_n sin θ
//   y_n    = (1/N) Σ_k c_k (Re Y_k cos θ - Im Y_k sin θ)
//
// where c_k = 1 for the DC term (and Nyquist when N is even)
// and 2 otherwise, because the negative frequencies of a real
// signal mirror the positive ones. For modes ≤ N/2 + 1 this is
// exactly irfft(W · rfft(x)[..modes], N).
//
// The cost is O(N · modes) per channel instead of O(N log N),
// which is cheaper than a full FFT at the usual modes ≪ N.
//
// Reference: Li et al. (2021) Fourier Neural Operator
//            Burn Book §3 (Building Blocks)

use anyhow::{bail, Result};
use burn::{
    module::Param,
    prelude::*,
    tensor::Distribution,
};
use std::f64::consts::PI;

// ─── DFT Basis ────────────────────────────────────────────────────────────────
/// Truncated real DFT / inverse DFT for a fixed grid size.
///
/// Not a Module: it holds constants, not parameters, and is
/// built once per (grid size, modes, device).
#[derive(Debug, Clone)]
pub struct DftBasis<B: Backend> {
    /// [n_points, modes]
    cos_fwd:      Tensor<B, 2>,
    /// [n_points, modes]
    sin_fwd:      Tensor<B, 2>,
    /// [modes, n_points], already scaled by c_k / N
    cos_inv:      Tensor<B, 2>,
    /// [modes, n_points], already scaled by c_k / N
    sin_inv:      Tensor<B, 2>,
    pub n_points: usize,
    pub modes:    usize,
}

impl<B: Backend> DftBasis<B> {
    /// Fails unless `modes` is in `1..=n_points / 2 + 1`.
    pub fn new(n_points: usize, modes: usize, device: &B::Device) -> Result<Self> {
        if modes == 0 || modes > n_points / 2 + 1 {
            bail!(
                "modes ({}) must be in 1..={} for {} grid points",
                modes, n_points / 2 + 1, n_points
            );
        }

        let n_f = n_points as f64;
        let angle = |k: usize, n: usize| 2.0 * PI * ((k * n) % n_points) as f64 / n_f;

        let mut cos_fwd = Vec::with_capacity(n_points * modes);
        let mut sin_fwd = Vec::with_capacity(n_points * modes);
        for n in 0..n_points {
            for k in 0..modes {
                cos_fwd.push(angle(k, n).cos() as f32);
                sin_fwd.push(angle(k, n).sin() as f32);
            }
        }

        let mut cos_inv = Vec::with_capacity(modes * n_points);
        let mut sin_inv = Vec::with_capacity(modes * n_points);
        for k in 0..modes {
            let is_nyquist = n_points % 2 == 0 && k == n_points / 2;
            let weight = if k == 0 || is_nyquist { 1.0 } else { 2.0 };
            for n in 0..n_points {
                cos_inv.push((weight * angle(k, n).cos() / n_f) as f32);
                sin_inv.push((weight * angle(k, n).sin() / n_f) as f32);
            }
        }

        let matrix = |values: Vec<f32>, rows: usize, cols: usize| {
            Tensor::<B, 1>::from_floats(values.as_slice(), device).reshape([rows, cols])
        };

        Ok(Self {
            cos_fwd: matrix(cos_fwd, n_points, modes),
            sin_fwd: matrix(sin_fwd, n_points, modes),
            cos_inv: matrix(cos_inv, modes, n_points),
            sin_inv: matrix(sin_inv, modes, n_points),
            n_points,
            modes,
        })
    }

    /// [batch, channels, n_points] → (re, im), each [batch, channels, modes]
    pub fn forward(&self, x: Tensor<B, 3>) -> (Tensor<B, 3>, Tensor<B, 3>) {
        let [batch, channels, n_points] = x.dims();
        debug_assert_eq!(n_points, self.n_points);

        let flat = x.reshape([batch * channels, n_points]);
        let re = flat.clone()
            .matmul(self.cos_fwd.clone())
            .reshape([batch, channels, self.modes]);
        let im = flat
            .matmul(self.sin_fwd.clone())
            .neg()
            .reshape([batch, channels, self.modes]);
        (re, im)
    }

    /// (re, im), each [batch, channels, modes] → [batch, channels, n_points]
    pub fn inverse(&self, re: Tensor<B, 3>, im: Tensor<B, 3>) -> Tensor<B, 3> {
        let [batch, channels, modes] = re.dims();
        debug_assert_eq!(modes, self.modes);

        let re = re.reshape([batch * channels, modes]);
        let im = im.reshape([batch * channels, modes]);
        (re.matmul(self.cos_inv.clone()) - im.matmul(self.sin_inv.clone()))
            .reshape([batch, channels, self.n_points])
    }
}

// ─── SpectralConv1d ───────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct SpectralConv1dConfig {
    pub in_channels:  usize,
    pub out_channels: usize,
    pub modes:        usize,
}

impl SpectralConv1dConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SpectralConv1d<B> {
        // Small complex weights keep the spectral path from dominating
        // the skip connection at initialisation.
        let std   = 1.0 / (self.in_channels * self.out_channels) as f64;
        let shape = [self.modes, self.in_channels, self.out_channels];
        let weight_re = Tensor::<B, 3>::random(shape, Distribution::Normal(0.0, std), device);
        let weight_im = Tensor::<B, 3>::random(shape, Distribution::Normal(0.0, std), device);

        SpectralConv1d {
            weight_re: Param::from_tensor(weight_re),
            weight_im: Param::from_tensor(weight_im),
            modes:     self.modes,
        }
    }
}

#[derive(Module, Debug)]
pub struct SpectralConv1d<B: Backend> {
    /// Real part of W_k - [modes, in, out]
    pub weight_re: Param<Tensor<B, 3>>,
    /// Imaginary part of W_k - [modes, in, out]
    pub weight_im: Param<Tensor<B, 3>>,
    pub modes:     usize,
}

impl<B: Backend> SpectralConv1d<B> {
    /// x: [batch, in, n_points] → [batch, out, n_points]
    pub fn forward(&self, x: Tensor<B, 3>, basis: &DftBasis<B>) -> Tensor<B, 3> {
        debug_assert_eq!(basis.modes, self.modes);
        let (re, im) = basis.forward(x);

        // Put modes first so each frequency is one batched matmul:
        // [modes, batch, in] × [modes, in, out] → [modes, batch, out]
        let re = re.permute([2, 0, 1]);
        let im = im.permute([2, 0, 1]);
        let w_re = self.weight_re.val();
        let w_im = self.weight_im.val();

        // (a + ib)(c + id) = (ac - bd) + i(ad + bc)
        let out_re = re.clone().matmul(w_re.clone()) - im.clone().matmul(w_im.clone());
        let out_im = re.matmul(w_im) + im.matmul(w_re);

        basis.inverse(out_re.permute([1, 2, 0]), out_im.permute([1, 2, 0]))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn signal(values: Vec<f32>, channels: usize) -> Tensor<TestBackend, 3> {
        let n = values.len() / channels;
        Tensor::<TestBackend, 1>::from_floats(values.as_slice(), &Default::default())
            .reshape([1, channels, n])
    }

    fn assert_close(a: Tensor<TestBackend, 3>, b: Tensor<TestBackend, 3>, tol: f32) {
        let a = a.into_data().to_vec::<f32>().unwrap();
        let b = b.into_data().to_vec::<f32>().unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < tol, "{x} vs {y}");
        }
    }

    #[test]
    fn test_all_modes_reconstruct_the_signal() {
        // Both an even and an odd grid, so the Nyquist weighting is covered
        for n in [8usize, 9] {
            let device = Default::default();
            let values: Vec<f32> = (0..n).map(|i| ((i * 7 + 3) % 5) as f32 - 1.5).collect();
            let x      = signal(values, 1);
            let basis  = DftBasis::<TestBackend>::new(n, n / 2 + 1, &device).unwrap();

            let (re, im) = basis.forward(x.clone());
            assert_close(basis.inverse(re, im), x, 1e-4);
        }
    }

    #[test]
    fn test_forward_matches_known_spectrum() {
        // A constant signal has all its energy in the DC bin
        let device = Default::default();
        let basis  = DftBasis::<TestBackend>::new(8, 3, &device).unwrap();
        let (re, im) = basis.forward(signal(vec![2.0; 8], 1));

        let re = re.into_data().to_vec::<f32>().unwrap();
        let im = im.into_data().to_vec::<f32>().unwrap();
        assert!((re[0] - 16.0).abs() < 1e-4);
        assert!(re[1..].iter().all(|v| v.abs() < 1e-4));
        assert!(im.iter().all(|v| v.abs() < 1e-4));
    }

    #[test]
    fn test_truncation_drops_high_frequencies() {
        // 1 + cos(2π·3n/N) keeping modes 0..3 leaves only the constant
        let n      = 16;
        let device = Default::default();
        let values: Vec<f32> = (0..n)
            .map(|i| 1.0 + (2.0 * PI * 3.0 * i as f64 / n as f64).cos() as f32)
            .collect();
        let basis = DftBasis::<TestBackend>::new(n, 3, &device).unwrap();

        let (re, im) = basis.forward(signal(values, 1));
        assert_close(basis.inverse(re, im), signal(vec![1.0; n], 1), 1e-4);
    }

    #[test]
    fn test_mode_count_is_checked_against_grid() {
        let device = Default::default();
        assert!(DftBasis::<TestBackend>::new(8, 5, &device).is_ok());
        assert!(DftBasis::<TestBackend>::new(8, 6, &device).is_err());
        assert!(DftBasis::<TestBackend>::new(9, 6, &device).is_err());
        assert!(DftBasis::<TestBackend>::new(8, 0, &device).is_err());
    }

    #[test]
    fn test_spectral_conv_output_shape() {
        let device = Default::default();
        let conv   = SpectralConv1dConfig::new(2, 5, 4).init::<TestBackend>(&device);
        let basis  = DftBasis::<TestBackend>::new(16, 4, &device).unwrap();
        let x      = Tensor::<TestBackend, 3>::random([3, 2, 16], Distribution::Default, &device);

        assert_eq!(conv.forward(x, &basis).dims(), [3, 5, 16]);
    }

    #[test]
    fn test_identity_weights_act_as_low_pass_filter() {
        // W_k = 1 for every kept mode, single channel → plain truncation
        let device = Default::default();
        let modes  = 3;
        let conv = SpectralConv1d::<TestBackend> {
            weight_re: Param::from_tensor(Tensor::ones([modes, 1, 1], &device)),
            weight_im: Param::from_tensor(Tensor::zeros([modes, 1, 1], &device)),
            modes,
        };
        let basis = DftBasis::<TestBackend>::new(8, modes, &device).unwrap();
        let x     = signal(vec![0.5, 1.0, -0.25, 2.0, 0.0, -1.0, 0.75, 0.1], 1);

        let (re, im) = basis.forward(x.clone());
        let expected = basis.inverse(re, im);
        assert_close(conv.forward(x, &basis), expected, 1e-5);
    }
}
