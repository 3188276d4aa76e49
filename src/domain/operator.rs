// ============================================================
// Layer 3 — Operator Families and Backends
// ============================================================
// The two axes of a benchmark run:
//
//   OperatorFamily - which neural operator architecture is measured
//                    (DeepONet or a 1-D Fourier Neural Operator)
//
//   BackendKind    - which Burn backend executes the model
//                    (ndarray on the CPU, wgpu on the GPU)
//
// Both are serialisable so they can live in the JSON config.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};
use std::fmt;

/// A neural operator architecture under benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorFamily {
    /// Branch/trunk network pair combined by an inner product
    DeepOnet,
    /// Fourier Neural Operator over a 1-D grid
    Fno,
}

impl OperatorFamily {
    /// Every family, in the order tables are printed.
    pub const ALL: [OperatorFamily; 2] = [OperatorFamily::DeepOnet, OperatorFamily::Fno];

    /// Heading used for the markdown table
    pub fn title(&self) -> &'static str {
        match self {
            OperatorFamily::DeepOnet => "DeepONet",
            OperatorFamily::Fno      => "FNO",
        }
    }
}

impl fmt::Display for OperatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The Burn backend a run executes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Pure-Rust CPU backend; always available
    #[default]
    NdArray,
    /// WebGPU backend (Vulkan / Metal / DX12)
    Wgpu,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::NdArray => f.write_str("ndarray"),
            BackendKind::Wgpu    => f.write_str("wgpu"),
        }
    }
}
