// ============================================================
// Layer 5 — Backend Selection
// ============================================================
// Turns the runtime BackendKind into a concrete Burn backend
// type, then hands the caller a DepthBenchmark for the chosen
// operator family. Everything after this point is generic over
// B: AutodiffBackend, so the rest of the code never matches on
// the backend again.
//
//   BackendKind::NdArray → Autodiff<NdArray>  (CPU)
//   BackendKind::Wgpu    → Autodiff<Wgpu>     (GPU)
//
// Reference: Burn Book §2 (Backends)

use anyhow::Result;
use burn::{
    backend::{Autodiff, NdArray, Wgpu},
    tensor::backend::AutodiffBackend,
};

use crate::application::bench_use_case::BenchConfig;
use crate::domain::operator::{BackendKind, OperatorFamily};
use crate::domain::traits::DepthBenchmark;
use crate::ml::bench::{DeepOnetBench, FnoBench};

type NdArrayTrain = Autodiff<NdArray>;
type WgpuTrain    = Autodiff<Wgpu>;

/// Build the benchmark for `family` on the configured backend's
/// default device and pass it to `run`.
pub fn with_benchmark<T, F>(cfg: &BenchConfig, family: OperatorFamily, run: F) -> Result<T>
where
    F: FnOnce(&dyn DepthBenchmark) -> Result<T>,
{
    match cfg.backend {
        BackendKind::NdArray => {
            let device = burn::backend::ndarray::NdArrayDevice::default();
            tracing::info!("Using ndarray device: {:?}", device);
            dispatch::<NdArrayTrain, T, F>(cfg, family, device, run)
        }
        BackendKind::Wgpu => {
            let device = burn::backend::wgpu::WgpuDevice::default();
            tracing::info!("Using WGPU device: {:?}", device);
            dispatch::<WgpuTrain, T, F>(cfg, family, device, run)
        }
    }
}

fn dispatch<B, T, F>(cfg: &BenchConfig, family: OperatorFamily, device: B::Device, run: F) -> Result<T>
where
    B: AutodiffBackend,
    F: FnOnce(&dyn DepthBenchmark) -> Result<T>,
{
    match family {
        OperatorFamily::DeepOnet => run(&DeepOnetBench::<B>::new(cfg.deeponet.clone(), device)),
        OperatorFamily::Fno      => run(&FnoBench::<B>::new(cfg.fno.clone(), device)),
    }
}
