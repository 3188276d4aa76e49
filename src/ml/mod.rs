// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here. The domain and application
// layers only see the DepthBenchmark trait.
//
// What's in this layer:
//
//   deeponet.rs - branch/trunk DeepONet with tanh FNNs
//   spectral.rs - truncated real DFT + spectral convolution
//   fno.rs      - 1-D Fourier Neural Operator built on spectral.rs
//   trainer.rs  - short full-batch Adam loop shared by both models
//   bench.rs    - per-family forward/training timing at one depth
//   backend.rs  - BackendKind → concrete Burn backend dispatch
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// DeepONet architecture
pub mod deeponet;

/// Spectral convolution and its DFT basis
pub mod spectral;

/// Fourier Neural Operator (1-D)
pub mod fno;

/// Training loop shared by both operator families
pub mod trainer;

/// DepthBenchmark implementations
pub mod bench;

/// Runtime backend selection
pub mod backend;
