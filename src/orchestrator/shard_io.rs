// src/orchestrator/shard_io.rs
//
// §6 "Shard file format": one shard per line, each line a SieveArray
// serialization (§4.4). Lines are independent and may be reordered without
// changing correctness.

use crate::core::counters::Counters;
use crate::core::errors::QsError;
use crate::sieve::SieveArray;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes one line per shard to `path`, overwriting any existing file. Bumps
/// `unable_to_output` before propagating any I/O failure, since this is the
/// file-based run mode's output emission step (§6/§7).
pub fn write_shard_file(
    path: impl AsRef<Path>,
    shards: &[SieveArray],
    counters: &Counters,
) -> Result<(), QsError> {
    let mut file = fs::File::create(path).map_err(|e| {
        counters.bump_unable_to_output();
        QsError::from(e)
    })?;
    for shard in shards {
        writeln!(file, "{}", shard).map_err(|e| {
            counters.bump_unable_to_output();
            QsError::from(e)
        })?;
    }
    Ok(())
}

/// Reads every line of `path` as a `SieveArray`. A malformed line bumps
/// `invalid_sieve_array` and is skipped rather than failing the whole read,
/// per §5/§7's per-shard error policy.
pub fn read_shard_file(path: impl AsRef<Path>, counters: &Counters) -> Result<Vec<SieveArray>, QsError> {
    let contents = fs::read_to_string(path)?;
    let mut shards = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<SieveArray>() {
            Ok(shard) => shards.push(shard),
            Err(e) => {
                log::warn!("shard file line {} is malformed, skipping: {}", line_no, e);
                counters.bump_invalid_sieve_array();
            }
        }
    }
    Ok(shards)
}

/// Discovers shard files in a directory via the `shards/*.txt` convention
/// and reads every line of every matching file, skipping malformed shards.
pub fn read_shard_directory(dir: impl AsRef<Path>, counters: &Counters) -> Result<Vec<SieveArray>, QsError> {
    let pattern = format!("{}/*.txt", dir.as_ref().display());
    let mut shards = Vec::new();
    let entries = glob::glob(&pattern).map_err(|e| QsError::IOFailure(e.to_string()))?;
    for entry in entries {
        let path = entry.map_err(|e| QsError::IOFailure(e.to_string()))?;
        shards.extend(read_shard_file(path, counters)?);
    }
    Ok(shards)
}
