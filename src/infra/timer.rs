// ============================================================
// Layer 6 — Timing Harness
// ============================================================
// Measures the wall-clock time of a statement executed N times
// in a row, after its setup has already happened outside the
// timed region:
//
//   setup (untimed)  →  start clock  →  stmt × N  →  stop clock
//
// Two flavours:
//
//   time_repeated - stmt borrows its inputs; used for forward
//                   passes where nothing changes between calls
//
//   time_fold     - stmt takes ownership of a state value and
//                   returns the next one; used for training,
//                   where Burn's optimiser consumes the model
//                   and hands back the updated copy
//
// There is no warm-up and no variance estimate: the reported
// figure is simply total / N.
//
// Reference: std::time::Instant
//            Rust Book §13 (Closures: FnMut)

use anyhow::{bail, Result};
use std::time::{Duration, Instant};

/// Total elapsed time of `iterations` back-to-back invocations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedRun {
    pub total:      Duration,
    pub iterations: usize,
}

impl TimedRun {
    /// Mean milliseconds per invocation
    pub fn mean_ms(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total.as_secs_f64() / self.iterations as f64 * 1000.0
    }
}

/// Run `stmt` `iterations` times and return the total elapsed time.
/// Stops at and returns the first error.
pub fn time_repeated<F>(label: &str, iterations: usize, mut stmt: F) -> Result<TimedRun>
where
    F: FnMut() -> Result<()>,
{
    if iterations == 0 {
        bail!("'{label}': iteration count must be at least 1");
    }

    let start = Instant::now();
    for _ in 0..iterations {
        stmt()?;
    }
    let total = start.elapsed();

    let run = TimedRun { total, iterations };
    tracing::debug!("{}: {} iterations in {:?} ({:.4} ms each)",
        label, iterations, total, run.mean_ms());
    Ok(run)
}

/// Like `time_repeated`, but threads an owned state through every
/// invocation and returns the final state alongside the timing.
pub fn time_fold<S, F>(
    label:      &str,
    iterations: usize,
    state:      S,
    mut step:   F,
) -> Result<(TimedRun, S)>
where
    F: FnMut(S) -> Result<S>,
{
    if iterations == 0 {
        bail!("'{label}': iteration count must be at least 1");
    }

    let mut state = state;
    let start = Instant::now();
    for _ in 0..iterations {
        state = step(state)?;
    }
    let total = start.elapsed();

    let run = TimedRun { total, iterations };
    tracing::debug!("{}: {} iterations in {:?} ({:.4} ms each)",
        label, iterations, total, run.mean_ms());
    Ok((run, state))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_statement_exactly_n_times() {
        let mut calls = 0usize;
        let run = time_repeated("count", 7, || {
            calls += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 7);
        assert_eq!(run.iterations, 7);
        assert!(run.mean_ms() >= 0.0);
    }

    #[test]
    fn test_fold_threads_state() {
        let (run, total) = time_fold("sum", 4, 0usize, |acc| Ok(acc + 10)).unwrap();
        assert_eq!(total, 40);
        assert_eq!(run.iterations, 4);
    }

    #[test]
    fn test_first_error_stops_the_loop() {
        let mut calls = 0usize;
        let result = time_repeated("fail", 5, || {
            calls += 1;
            if calls == 2 {
                anyhow::bail!("boom");
            }
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(time_repeated("none", 0, || Ok(())).is_err());
        assert!(time_fold("none", 0, (), |s| Ok(s)).is_err());
    }

    #[test]
    fn test_mean_is_total_over_iterations() {
        let run = TimedRun { total: Duration::from_millis(500), iterations: 100 };
        assert!((run.mean_ms() - 5.0).abs() < 1e-9);
    }
}
