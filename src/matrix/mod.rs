// src/matrix/mod.rs

pub mod bit_matrix;

pub use bit_matrix::BitMatrix;
