// ============================================================
// Layer 5 — Per-Family Depth Benchmarks
// ============================================================
// For one depth, each benchmark does two independent rounds:
//
//   Forward round
//     setup:  fresh model → model.valid() (inner backend,
//             no autodiff graph), fresh random inputs
//     timed:  N × (forward + read result back to host)
//
//   Training round
//     setup:  fresh model on the autodiff backend, fresh Adam,
//             fresh random data
//     timed:  N × (E epochs of fit_epochs, plus the test-set
//             metric for DeepONet)
//
// Model and optimiser carry over from one timed training call
// to the next, just like re-running a statement against a
// single setup.
//
// Reference: Burn Book §5 (Training)
//            std::time::Instant

use anyhow::Result;
use burn::{
    module::AutodiffModule,
    optim::AdamConfig,
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::bench_use_case::{DeepOnetSettings, FnoSettings};
use crate::data::{grid::GridPair, triple::TripleData};
use crate::domain::bench_result::LayerTiming;
use crate::domain::operator::OperatorFamily;
use crate::domain::traits::DepthBenchmark;
use crate::infra::timer::{time_fold, time_repeated, TimedRun};
use crate::ml::deeponet::{mean_l2_relative_error, DeepOnet, DeepOnetConfig};
use crate::ml::fno::{Fno1d, FnoConfig};
use crate::ml::trainer::{fit_epochs, read_back};

// ─── DeepONet ─────────────────────────────────────────────────────────────────
pub struct DeepOnetBench<B: AutodiffBackend> {
    settings: DeepOnetSettings,
    device:   B::Device,
}

impl<B: AutodiffBackend> DeepOnetBench<B> {
    pub fn new(settings: DeepOnetSettings, device: B::Device) -> Self {
        Self { settings, device }
    }

    fn model_config(&self, layers: usize) -> DeepOnetConfig {
        let s = &self.settings;
        DeepOnetConfig::new(s.sensors, s.dim_y, s.width, s.latent, layers)
    }

    fn data<BK: Backend>(&self) -> TripleData<BK>
    where
        BK: Backend<Device = B::Device>,
    {
        let s = &self.settings;
        TripleData::random(s.batch_size, s.test_size, s.sensors, s.dim_y, &self.device)
    }

    fn time_forward(&self, layers: usize) -> Result<TimedRun> {
        let model = self.model_config(layers).init::<B>(&self.device).valid();
        let data  = self.data::<B::InnerBackend>();

        time_repeated("deeponet forward", self.settings.iterations, || {
            let pred = model.forward(data.u_train.clone(), data.y_train.clone());
            read_back(pred);
            Ok(())
        })
    }

    fn time_training(&self, layers: usize) -> Result<TimedRun> {
        let model: DeepOnet<B> = self.model_config(layers).init(&self.device);
        let data  = self.data::<B>();
        let (run, _) = self.train_rounds(model, &data, self.settings.iterations)?;
        Ok(run)
    }

    /// Time `iterations` training calls against one model and one
    /// Adam state, returning the model as the last call left it.
    pub fn train_rounds(
        &self,
        model:      DeepOnet<B>,
        data:       &TripleData<B>,
        iterations: usize,
    ) -> Result<(TimedRun, DeepOnet<B>)> {
        let s     = &self.settings;
        let optim = AdamConfig::new().init::<B, DeepOnet<B>>();

        let mut last = (f64::NAN, f64::NAN);
        let (run, (model, _)) = time_fold("deeponet train", iterations, (model, optim), |(model, mut optim)| {
            let (model, loss) = fit_epochs(model, &mut optim, s.lr, s.epochs, |m: &DeepOnet<B>| {
                m.forward_loss(data.u_train.clone(), data.y_train.clone(), data.target_train.clone())
            })?;

            // Test metric on the updated weights, as a compiled model reports after training
            let eval = model.valid();
            let pred = eval.forward(data.u_test.clone().inner(), data.y_test.clone().inner());
            let rel  = mean_l2_relative_error(pred, data.target_test.clone().inner());

            last = (loss, rel);
            Ok((model, optim))
        })?;

        tracing::debug!(
            "DeepONet {} hidden layer(s): final train loss {:.6}, test l2 relative error {:.6}",
            model.branch.linears.len() - 1, last.0, last.1
        );
        Ok((run, model))
    }
}

impl<B: AutodiffBackend> DepthBenchmark for DeepOnetBench<B> {
    fn family(&self) -> OperatorFamily {
        OperatorFamily::DeepOnet
    }

    fn epochs(&self) -> usize {
        self.settings.epochs
    }

    fn measure(&self, layers: usize) -> Result<LayerTiming> {
        let forward = self.time_forward(layers)?;
        let train   = self.time_training(layers)?;
        Ok(LayerTiming::new(layers, forward.mean_ms(), train.mean_ms()))
    }
}

// ─── FNO ──────────────────────────────────────────────────────────────────────
pub struct FnoBench<B: AutodiffBackend> {
    settings: FnoSettings,
    device:   B::Device,
}

impl<B: AutodiffBackend> FnoBench<B> {
    pub fn new(settings: FnoSettings, device: B::Device) -> Self {
        Self { settings, device }
    }

    fn model_config(&self, layers: usize) -> FnoConfig {
        let s = &self.settings;
        FnoConfig::new(
            s.n_modes,
            s.hidden_channels,
            s.in_channels,
            s.out_channels,
            s.lifting_channels,
            s.projection_channels,
            layers,
        )
    }

    fn data<BK: Backend>(&self) -> GridPair<BK>
    where
        BK: Backend<Device = B::Device>,
    {
        let s = &self.settings;
        GridPair::random(s.batch_size, s.in_channels, s.out_channels, s.n_points, &self.device)
    }

    fn time_forward(&self, layers: usize) -> Result<TimedRun> {
        let model = self.model_config(layers).init::<B>(&self.device).valid();
        let data  = self.data::<B::InnerBackend>();
        let basis = model.basis(data.n_points(), &self.device)?;

        time_repeated("fno forward", self.settings.iterations, || {
            let pred = model.forward_with_basis(data.x.clone(), &basis);
            read_back(pred);
            Ok(())
        })
    }

    fn time_training(&self, layers: usize) -> Result<TimedRun> {
        let model: Fno1d<B> = self.model_config(layers).init(&self.device);
        let data  = self.data::<B>();
        let (run, _) = self.train_rounds(model, &data, self.settings.iterations)?;
        Ok(run)
    }

    /// Time `iterations` training calls against one model and one
    /// Adam state, returning the model as the last call left it.
    pub fn train_rounds(
        &self,
        model:      Fno1d<B>,
        data:       &GridPair<B>,
        iterations: usize,
    ) -> Result<(TimedRun, Fno1d<B>)> {
        let s     = &self.settings;
        let optim = AdamConfig::new().init::<B, Fno1d<B>>();
        let basis = model.basis(data.n_points(), &self.device)?;

        let mut last_loss = f64::NAN;
        let (run, (model, _)) = time_fold("fno train", iterations, (model, optim), |(model, mut optim)| {
            let (model, loss) = fit_epochs(model, &mut optim, s.lr, s.epochs, |m: &Fno1d<B>| {
                m.forward_loss(data.x.clone(), data.y.clone(), &basis)
            })?;
            last_loss = loss;
            Ok((model, optim))
        })?;

        tracing::debug!("FNO {} block(s): final train loss {:.6}", model.blocks.len(), last_loss);
        Ok((run, model))
    }
}

impl<B: AutodiffBackend> DepthBenchmark for FnoBench<B> {
    fn family(&self) -> OperatorFamily {
        OperatorFamily::Fno
    }

    fn epochs(&self) -> usize {
        self.settings.epochs
    }

    fn measure(&self, layers: usize) -> Result<LayerTiming> {
        let forward = self.time_forward(layers)?;
        let train   = self.time_training(layers)?;
        Ok(LayerTiming::new(layers, forward.mean_ms(), train.mean_ms()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    type TestAutodiff = Autodiff<NdArray>;

    fn values<const D: usize>(tensor: Tensor<TestAutodiff, D>) -> Vec<f32> {
        read_back(tensor).to_vec::<f32>().unwrap()
    }

    /// (L2 distance, largest single-element change) between two weight snapshots
    fn drift(from: &[f32], to: &[f32]) -> (f32, f32) {
        let diffs = from.iter().zip(to).map(|(a, b)| (a - b).abs());
        let l2    = diffs.clone().map(|d| d * d).sum::<f32>().sqrt();
        (l2, diffs.fold(0.0, f32::max))
    }

    fn deeponet_settings() -> DeepOnetSettings {
        DeepOnetSettings {
            iterations: 3,
            batch_size: 4,
            sensors:    6,
            dim_y:      1,
            width:      8,
            latent:     5,
            test_size:  2,
            lr:         1e-3,
            epochs:     2,
        }
    }

    fn fno_settings() -> FnoSettings {
        FnoSettings {
            iterations:          3,
            batch_size:          2,
            n_points:            16,
            n_modes:             4,
            hidden_channels:     6,
            in_channels:         1,
            out_channels:        3,
            lifting_channels:    8,
            projection_channels: 8,
            lr:                  1e-4,
            epochs:              2,
        }
    }

    #[test]
    fn test_deeponet_measure_reports_depth_and_times() {
        let bench  = DeepOnetBench::<TestAutodiff>::new(deeponet_settings(), Default::default());
        let timing = bench.measure(2).unwrap();

        assert_eq!(timing.layers, 2);
        assert!(timing.is_valid());
        assert_eq!(bench.family(), OperatorFamily::DeepOnet);
        assert_eq!(bench.epochs(), 2);
    }

    #[test]
    fn test_fno_measure_reports_depth_and_times() {
        let bench  = FnoBench::<TestAutodiff>::new(fno_settings(), Default::default());
        let timing = bench.measure(3).unwrap();

        assert_eq!(timing.layers, 3);
        assert!(timing.is_valid());
        assert_eq!(bench.family(), OperatorFamily::Fno);
    }

    #[test]
    fn test_training_round_times_every_iteration() {
        let bench = FnoBench::<TestAutodiff>::new(fno_settings(), Default::default());
        let run   = bench.time_training(1).unwrap();
        assert_eq!(run.iterations, 3);
    }

    #[test]
    fn test_deeponet_training_keeps_updating_one_model() {
        let bench   = DeepOnetBench::<TestAutodiff>::new(deeponet_settings(), Default::default());
        let model   = bench.model_config(2).init::<TestAutodiff>(&bench.device);
        let data    = bench.data::<TestAutodiff>();
        let initial = values(model.branch.linears[0].weight.val());

        let (_, once)     = bench.train_rounds(model.clone(), &data, 1).unwrap();
        let (run, thrice) = bench.train_rounds(model, &data, 3).unwrap();
        assert_eq!(run.iterations, 3);

        let (after_one, _)         = drift(&initial, &values(once.branch.linears[0].weight.val()));
        let (after_three, largest) = drift(&initial, &values(thrice.branch.linears[0].weight.val()));

        // Three calls of 2 Adam steps each walk further than one call,
        // but stay within a few learning rates of the starting weights
        assert!(after_one > 0.0);
        assert!(after_three > after_one, "{after_one} vs {after_three}");
        assert!(largest < 6.0 * 4.0 * 1e-3, "moved {largest}");
    }

    #[test]
    fn test_fno_training_keeps_updating_one_model() {
        let bench   = FnoBench::<TestAutodiff>::new(fno_settings(), Default::default());
        let model   = bench.model_config(2).init::<TestAutodiff>(&bench.device);
        let data    = bench.data::<TestAutodiff>();
        let initial = values(model.lifting_in.weight.val());

        let (_, once)     = bench.train_rounds(model.clone(), &data, 1).unwrap();
        let (run, thrice) = bench.train_rounds(model, &data, 3).unwrap();
        assert_eq!(run.iterations, 3);

        let (after_one, _)         = drift(&initial, &values(once.lifting_in.weight.val()));
        let (after_three, largest) = drift(&initial, &values(thrice.lifting_in.weight.val()));

        assert!(after_one > 0.0);
        assert!(after_three > after_one, "{after_one} vs {after_three}");
        assert!(largest < 6.0 * 4.0 * 1e-4, "moved {largest}");
    }
}
