// src/sieve/mod.rs

pub mod input_builder;
pub mod sieve_array;
pub mod smoothness;

pub use input_builder::InputBuilder;
pub use sieve_array::SieveArray;
pub use smoothness::sieve_shard;
