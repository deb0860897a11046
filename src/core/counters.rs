// src/core/counters.rs
//
// Operational counters exposed to the operator telemetry channel (§6).
// Every sieve worker and the combiner share one `Counters` through an
// `Arc`, each field an independent atomic so no lock is needed across the
// sieve phase's parallel workers.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct Counters {
    pub invalid_sieve_array: AtomicUsize,
    pub unable_to_output: AtomicUsize,
    pub unable_to_solve_system: AtomicUsize,
    pub cant_factor: AtomicUsize,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            invalid_sieve_array: self.invalid_sieve_array.load(Ordering::Relaxed),
            unable_to_output: self.unable_to_output.load(Ordering::Relaxed),
            unable_to_solve_system: self.unable_to_solve_system.load(Ordering::Relaxed),
            cant_factor: self.cant_factor.load(Ordering::Relaxed),
        }
    }

    pub fn log_summary(&self) {
        let s = self.snapshot();
        log::info!(
            "counters: invalid_sieve_array={} unable_to_output={} unable_to_solve_system={} cant_factor={}",
            s.invalid_sieve_array, s.unable_to_output, s.unable_to_solve_system, s.cant_factor
        );
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bump_invalid_sieve_array(&self) {
        Self::bump(&self.invalid_sieve_array);
    }

    pub fn bump_unable_to_output(&self) {
        Self::bump(&self.unable_to_output);
    }

    pub fn bump_unable_to_solve_system(&self) {
        Self::bump(&self.unable_to_solve_system);
    }

    pub fn bump_cant_factor(&self) {
        Self::bump(&self.cant_factor);
    }
}

#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct CountersSnapshot {
    pub invalid_sieve_array: usize,
    pub unable_to_output: usize,
    pub unable_to_solve_system: usize,
    pub cant_factor: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let c = Counters::new();
        let s = c.snapshot();
        assert_eq!(s.invalid_sieve_array, 0);
        assert_eq!(s.cant_factor, 0);
    }

    #[test]
    fn bumps_are_independent() {
        let c = Counters::new();
        c.bump_invalid_sieve_array();
        c.bump_invalid_sieve_array();
        c.bump_cant_factor();
        let s = c.snapshot();
        assert_eq!(s.invalid_sieve_array, 2);
        assert_eq!(s.cant_factor, 1);
        assert_eq!(s.unable_to_output, 0);
    }
}
