// src/orchestrator/mod.rs
//
// §4.9 Orchestrator: sequences parse N -> build F -> write shards -> launch
// sieve workers -> collect smooth relations -> run Combiner -> emit pair.

pub mod broadcast;
pub mod shard_io;

pub use broadcast::BroadcastParams;

use crate::combine;
use crate::core::cancellation_token::CancellationToken;
use crate::core::counters::Counters;
use crate::core::errors::QsError;
use crate::factor_base::FactorBase;
use crate::sieve::smoothness::sieve_shard;
use crate::sieve::{InputBuilder, SieveArray};
use num::BigInt;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub struct Orchestrator {
    shard_length: usize,
    mask_cap: u64,
    pub counters: Arc<Counters>,
    pub cancellation: CancellationToken,
}

impl Orchestrator {
    /// `shard_length` of 0 defers to `InputBuilder::suggested_shard_length`.
    pub fn new(shard_length: usize, mask_cap: u64) -> Self {
        Orchestrator {
            shard_length,
            mask_cap,
            counters: Arc::new(Counters::new()),
            cancellation: CancellationToken::new(),
        }
    }

    /// In-memory run: shards never leave the process, going straight from
    /// `InputBuilder` into the sieve workers.
    pub fn run(&self, n: &BigInt, worker_threads: Option<usize>) -> Result<(BigInt, BigInt), QsError> {
        self.run_with_shard_dir(n, worker_threads, None)
    }

    /// File-based run mode (§6 "Shard file format"): shards are written to
    /// one file under `shard_dir` and read back through
    /// `shard_io::read_shard_directory` before sieving, the way a
    /// MapReduce-style job would actually hand shards to workers. Passing
    /// `shard_dir = None` is equivalent to `run`.
    pub fn run_with_shard_dir(
        &self,
        n: &BigInt,
        worker_threads: Option<usize>,
        shard_dir: Option<&Path>,
    ) -> Result<(BigInt, BigInt), QsError> {
        if n < &BigInt::from(2) {
            return Err(QsError::InvalidArgument(format!("N must be >= 2, got {}", n)));
        }

        log::info!("building factor base for N={}", n);
        let factor_base = FactorBase::build(n)?;
        log::info!("factor base has {} primes", factor_base.len());

        let shard_length =
            if self.shard_length > 0 { self.shard_length } else { InputBuilder::suggested_shard_length() };

        let shards = InputBuilder::write_shards(n, shard_length);
        log::info!("sieve interval split into {} shards of length {}", shards.len(), shard_length);

        let shards = match shard_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let shard_path = dir.join("shards.txt");
                shard_io::write_shard_file(&shard_path, &shards, &self.counters)?;
                log::info!("wrote {} shards to {}", shards.len(), shard_path.display());

                let loaded = shard_io::read_shard_directory(dir, &self.counters)?;
                log::info!("read back {} shards from {}", loaded.len(), dir.display());
                loaded
            }
            None => shards,
        };

        let pool = Self::build_pool(worker_threads)?;
        let relations = pool.install(|| {
            shards
                .par_iter()
                .map(|shard| sieve_shard(shard, &factor_base))
                .reduce(SieveArray::new, |mut acc, next| {
                    acc.extend(next);
                    acc
                })
        });
        log::info!("{} smooth relations survived the sieve", relations.len());

        let result =
            combine::run(n, &relations, &factor_base, self.mask_cap, &self.cancellation, &self.counters);
        self.counters.log_summary();
        result
    }

    fn build_pool(worker_threads: Option<usize>) -> Result<rayon::ThreadPool, QsError> {
        let threads = worker_threads.unwrap_or_else(num_cpus::get);
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| QsError::IOFailure(format!("failed to build worker pool: {}", e)))
    }
}
