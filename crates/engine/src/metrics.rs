// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Timing metrics for one harness run.

use std::time::Duration;

/// Wall-clock time spent in each phase of a run.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Container load time.
    pub load_duration: Duration,
    /// Engine build time.
    pub build_duration: Duration,
    /// Total time inside `Engine::execute`.
    pub execute_duration: Duration,
    /// Time spent writing outputs.
    pub write_duration: Duration,
    /// Number of batches executed.
    pub batches: usize,
}

impl RunMetrics {
    /// Creates empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one executed batch.
    pub fn record_batch(&mut self, execute: Duration, write: Duration) {
        self.execute_duration += execute;
        self.write_duration += write;
        self.batches += 1;
    }

    /// Sum of every phase.
    pub fn total(&self) -> Duration {
        self.load_duration + self.build_duration + self.execute_duration + self.write_duration
    }

    /// Mean execution time per batch.
    pub fn mean_execute(&self) -> Duration {
        if self.batches == 0 {
            return Duration::ZERO;
        }
        self.execute_duration / self.batches as u32
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Run: {:.2}ms total, load {:.2}ms, build {:.2}ms, {} batch(es) executed in {:.2}ms ({:.2}ms/batch), write {:.2}ms",
            ms(self.total()),
            ms(self.load_duration),
            ms(self.build_duration),
            self.batches,
            ms(self.execute_duration),
            ms(self.mean_execute()),
            ms(self.write_duration),
        )
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
