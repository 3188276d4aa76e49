// ============================================================
// Layer 5 — DeepONet (Burn)
// ============================================================
// Deep Operator Network: learns a map G from an input function
// u (sampled at m sensor points) to an output function G(u)
// evaluated at a query location y.
//
//   u [batch, m]     ──► branch FNN ──► b [batch, p] ─┐
//                                                     ├─► Σ_p b·t + bias
//   y [batch, dim_y] ──► trunk  FNN ──► t [batch, p] ─┘     [batch, 1]
//
// Layer sizes for depth L with hidden width w and latent size p:
//   branch: [m]     + [w] × L + [p]   tanh on hidden layers only
//   trunk:  [dim_y] + [w] × L + [p]   tanh on every layer
//
// Weights use Glorot (Xavier) normal initialisation; every
// bias starts at zero.
//
// Reference: Lu et al. (2021) DeepONet, Nature Machine Intelligence
//            Burn Book §3 (Building Blocks)

use burn::{
    module::Param,
    nn::{
        loss::{MseLoss, Reduction},
        Initializer, Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::tanh,
};

#[derive(Config, Debug)]
pub struct DeepOnetConfig {
    /// Sensor points sampling the input function (m)
    pub sensors: usize,
    /// Dimension of a query location (dim_y)
    pub dim_y:   usize,
    /// Width of every hidden layer
    pub width:   usize,
    /// Output size shared by branch and trunk (p)
    pub latent:  usize,
    /// Number of hidden layers in each of branch and trunk
    pub layers:  usize,
}

impl DeepOnetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> DeepOnet<B> {
        DeepOnet {
            branch: build_fnn(&self.layer_sizes(self.sensors), false, device),
            trunk:  build_fnn(&self.layer_sizes(self.dim_y), true, device),
            bias:   Param::from_tensor(Tensor::zeros([1], device)),
        }
    }

    /// [input] + [width] × layers + [latent]
    pub fn layer_sizes(&self, input: usize) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.layers + 2);
        sizes.push(input);
        sizes.extend(std::iter::repeat(self.width).take(self.layers));
        sizes.push(self.latent);
        sizes
    }
}

fn build_fnn<B: Backend>(sizes: &[usize], activate_output: bool, device: &B::Device) -> Fnn<B> {
    let linears = sizes
        .windows(2)
        .map(|pair| {
            let mut linear = LinearConfig::new(pair[0], pair[1])
                .with_initializer(Initializer::XavierNormal { gain: 1.0 })
                .init(device);
            // The initializer also draws the bias; Glorot normal only covers weights
            linear.bias = Some(Param::from_tensor(Tensor::zeros([pair[1]], device)));
            linear
        })
        .collect();
    Fnn { linears, activate_output }
}

/// Fully connected tanh network.
#[derive(Module, Debug)]
pub struct Fnn<B: Backend> {
    pub linears:         Vec<Linear<B>>,
    pub activate_output: bool,
}

impl<B: Backend> Fnn<B> {
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        let last = self.linears.len().saturating_sub(1);
        let mut x = x;
        for (i, linear) in self.linears.iter().enumerate() {
            x = linear.forward(x);
            if i < last || self.activate_output {
                x = tanh(x);
            }
        }
        x
    }
}

#[derive(Module, Debug)]
pub struct DeepOnet<B: Backend> {
    pub branch: Fnn<B>,
    pub trunk:  Fnn<B>,
    pub bias:   Param<Tensor<B, 1>>,
}

impl<B: Backend> DeepOnet<B> {
    /// u: [batch, m], y: [batch, dim_y] → [batch, 1]
    pub fn forward(&self, u: Tensor<B, 2>, y: Tensor<B, 2>) -> Tensor<B, 2> {
        let b = self.branch.forward(u);
        let t = self.trunk.forward(y);
        (b * t).sum_dim(1) + self.bias.val().unsqueeze::<2>()
    }

    /// Mean squared error against `target` [batch, 1]
    pub fn forward_loss(
        &self,
        u:      Tensor<B, 2>,
        y:      Tensor<B, 2>,
        target: Tensor<B, 2>,
    ) -> Tensor<B, 1> {
        let pred = self.forward(u, y);
        MseLoss::new().forward(pred, target, Reduction::Mean)
    }
}

/// Mean over rows of ‖pred_i - target_i‖₂ / ‖target_i‖₂.
pub fn mean_l2_relative_error<B: Backend>(pred: Tensor<B, 2>, target: Tensor<B, 2>) -> f64 {
    let diff_norm   = (pred - target.clone()).powf_scalar(2.0).sum_dim(1).sqrt();
    let target_norm = target.powf_scalar(2.0).sum_dim(1).sqrt();
    (diff_norm / target_norm).mean().into_scalar().elem::<f64>()
}
