//! Averaging component sizes over repeated runs.

use serde::{Deserialize, Serialize};

use crate::events::DissolutionStep;

/// One point of an averaged series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragedStep {
    /// Dissolutions at this step, taken from the first run.
    pub dissolutions: usize,
    /// Mean of the k-th largest distinct component size, largest first.
    pub sizes: Vec<f64>,
}

/// Average the k-th largest component size across `runs`.
///
/// The series is cut to the shortest run. Components smaller than
/// `min_size` are ignored, and a run lacking a k-th size contributes zero.
pub fn average_runs(runs: &[Vec<DissolutionStep>], min_size: usize) -> Vec<AveragedStep> {
    let Some(steps) = runs.iter().map(Vec::len).min() else {
        return Vec::new();
    };
    let trials = runs.len() as f64;

    (0..steps)
        .map(|i| {
            let mut sums: Vec<f64> = Vec::new();
            for run in runs {
                let kept = run[i].snapshot.sizes().filter(|&size| size >= min_size);
                for (k, size) in kept.enumerate() {
                    if k == sums.len() {
                        sums.push(0.0);
                    }
                    sums[k] += size as f64;
                }
            }
            AveragedStep {
                dissolutions: runs[0][i].dissolutions,
                sizes: sums.into_iter().map(|sum| sum / trials).collect(),
            }
        })
        .collect()
}
