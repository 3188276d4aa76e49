// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one layer:
//
//   timer.rs        - Timing harness
//                     Runs a statement N times back to back
//                     after an untimed setup and reports the
//                     total and per-call wall-clock time.
//
//   config_store.rs - Benchmark config persistence
//                     Saves/loads BenchConfig as pretty JSON so
//                     a sweep can be reproduced or hand-edited.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Repeated-statement wall-clock timing
pub mod timer;

/// BenchConfig JSON load/save
pub mod config_store;
