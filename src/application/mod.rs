// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish a
// benchmark run.
//
// Rules for this layer:
//   - No model code here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 6)
//   - Only workflow coordination and run configuration
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The depth-sweep benchmark workflow and its configuration
pub mod bench_use_case;
