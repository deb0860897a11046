// src/matrix/bit_matrix.rs
//
// §4.7 BitMatrix: dense GF(2) matrix, word-packed via `bitvec`, with a
// full-pivoting Gauss-Jordan solver for the combiner's kernel search.

use crate::core::errors::QsError;
use bitvec::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Row-major GF(2) matrix. Each row is a `BitVec<u32, Lsb0>`, so storage is
/// word-packed exactly as §4.7 specifies without this crate managing word
/// indices by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    rows: Vec<BitVec<u32, Lsb0>>,
    cols: usize,
}

impl BitMatrix {
    pub fn new(r: usize, c: usize) -> Self {
        BitMatrix { rows: vec![bitvec![u32, Lsb0; 0; c]; r], cols: c }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.rows[i][j] as u8
    }

    pub fn set(&mut self, i: usize, j: usize, v: u8) {
        self.rows[i].set(j, v != 0);
    }

    pub fn transpose(&self) -> BitMatrix {
        let mut t = BitMatrix::new(self.cols, self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            for j in 0..self.cols {
                if row[j] {
                    t.set(j, i, 1);
                }
            }
        }
        t
    }

    /// Swaps rows `a` and `b` in columns `[first_col, cols)`.
    pub fn exchange_rows(&mut self, a: usize, b: usize, first_col: usize) {
        if a == b {
            return;
        }
        for j in first_col..self.cols {
            let va = self.rows[a][j];
            let vb = self.rows[b][j];
            self.rows[a].set(j, vb);
            self.rows[b].set(j, va);
        }
    }

    /// XORs `pivot`'s bits into `target` from `first_col` onward, but only
    /// when `target`'s bit at `first_col` is set - a no-op otherwise.
    pub fn reduce_row(&mut self, pivot: usize, target: usize, first_col: usize) {
        if !self.rows[target][first_col] {
            return;
        }
        for j in first_col..self.cols {
            let v = self.rows[pivot][j] ^ self.rows[target][j];
            self.rows[target].set(j, v);
        }
    }

    fn swap_columns(&mut self, j1: usize, j2: usize) {
        if j1 == j2 {
            return;
        }
        for row in self.rows.iter_mut() {
            let a = row[j1];
            let b = row[j2];
            row.set(j1, b);
            row.set(j2, a);
        }
    }

    /// Full-pivoting Gauss-Jordan elimination followed by back-substitution,
    /// per §4.7. `indeterminates` supplies values for the free variables in
    /// order; any free variable beyond its length defaults to 0. Clones the
    /// matrix internally, so repeated calls (once per candidate mask) never
    /// see each other's pivoting state.
    pub fn solve(&self, indeterminates: &[u8]) -> Result<Vec<u8>, QsError> {
        let r = self.rows.len();
        let c = self.cols;
        if r == 0 || c == 0 {
            return Err(QsError::InvalidArgument("matrix must have at least one row and column".into()));
        }

        let mut m = self.clone();
        let var_cols = c - 1;
        let mut pi: Vec<usize> = (0..var_cols).collect();

        let mut rstar = 0usize;
        let mut jstar = 0usize;
        while rstar < r && jstar < var_cols {
            let mut found = None;
            'outer: for i in rstar..r {
                for j in jstar..var_cols {
                    if m.get(i, j) == 1 {
                        found = Some((i, j));
                        break 'outer;
                    }
                }
            }
            let (i, j) = match found {
                Some(p) => p,
                None => break,
            };

            m.exchange_rows(i, rstar, jstar);
            if j != jstar {
                m.swap_columns(j, jstar);
                pi.swap(j, jstar);
            }
            for i2 in (rstar + 1)..r {
                m.reduce_row(rstar, i2, jstar);
            }
            rstar += 1;
            jstar += 1;
        }

        let rank = rstar;

        for i in rank..r {
            if m.get(i, c - 1) == 1 {
                return Err(QsError::Inconsistent);
            }
        }

        let mut res = vec![0u8; var_cols];
        for i in rank..var_cols {
            let idx = i - rank;
            res[i] = indeterminates.get(idx).copied().unwrap_or(0);
        }
        for i in (0..rank).rev() {
            let mut v = m.get(i, c - 1);
            for j in (i + 1)..var_cols {
                if m.get(i, j) == 1 {
                    v ^= res[j];
                }
            }
            res[i] = v;
        }

        let mut final_res = vec![0u8; var_cols];
        for (k, &original) in pi.iter().enumerate() {
            final_res[original] = res[k];
        }
        Ok(final_res)
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            write!(f, "[")?;
            for j in 0..self.cols {
                write!(f, "{}", row[j] as u8)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl FromStr for BitMatrix {
    type Err = QsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        let mut width = None;

        for (line_no, line) in s.split('\n').enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !line.starts_with('[') || !line.ends_with(']') {
                return Err(QsError::parse_at(format!("row {} not bracketed", line_no), line_no));
            }
            let bits = &line[1..line.len() - 1];
            match width {
                None => width = Some(bits.len()),
                Some(w) if w != bits.len() => {
                    return Err(QsError::parse_at(
                        format!("row {} has length {}, expected {}", line_no, bits.len(), w),
                        line_no,
                    ))
                }
                _ => {}
            }

            let mut row = bitvec![u32, Lsb0; 0; bits.len()];
            for (j, ch) in bits.char_indices() {
                match ch {
                    '0' => row.set(j, false),
                    '1' => row.set(j, true),
                    _ => {
                        return Err(QsError::parse_at(
                            format!("invalid bit character {:?} in row {}", ch, line_no),
                            line_no,
                        ))
                    }
                }
            }
            rows.push(row);
        }

        let cols = width.unwrap_or(0);
        Ok(BitMatrix { rows, cols })
    }
}
