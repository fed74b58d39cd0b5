//! Thomas algorithm for nearest-neighbour systems.
//!
//! Row `i` reads `a[i]·x[i-1] + b[i]·x[i] + c[i]·x[i+1] = d[i]`; `a[0]` and
//! `c[n-1]` are ignored. There is no pivoting. With unchecked solves a zero
//! pivot silently yields NaN or ∞, which is the caller's to detect.

use crate::ASSEMBLY_MIN_CHUNK;
use crate::error::{SolverError, SolverResult};
use rayon::prelude::*;
use std::convert::Infallible;

/// Coefficients of a single row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Row {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Row {
    /// `x[i] = value`
    pub fn fixed(value: f64) -> Self {
        Self {
            a: 0.0,
            b: 1.0,
            c: 0.0,
            d: value,
        }
    }

    /// `x[0] = x[1]`
    pub fn copy_next() -> Self {
        Self {
            a: 0.0,
            b: 1.0,
            c: -1.0,
            d: 0.0,
        }
    }

    /// `x[n-1] = x[n-2]`
    pub fn copy_previous() -> Self {
        Self {
            a: -1.0,
            b: 1.0,
            c: 0.0,
            d: 0.0,
        }
    }
}

/// Four coefficient sequences of equal length, built fresh for every solve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TridiagonalSystem {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub c: Vec<f64>,
    pub d: Vec<f64>,
}

impl TridiagonalSystem {
    pub fn zeros(n: usize) -> Self {
        Self {
            a: vec![0.0; n],
            b: vec![0.0; n],
            c: vec![0.0; n],
            d: vec![0.0; n],
        }
    }

    /// Build a system whose interior rows come from `interior(i)` for
    /// `i in 1..n-1`, evaluated in parallel. Each row only writes its own slot.
    pub fn assemble<F>(n: usize, first: Row, last: Row, interior: F) -> Self
    where
        F: Fn(usize) -> Row + Sync + Send,
    {
        let mut rows = Vec::with_capacity(n);
        rows.push(first);
        rows.par_extend(
            (1..n.saturating_sub(1))
                .into_par_iter()
                .with_min_len(ASSEMBLY_MIN_CHUNK)
                .map(interior),
        );
        if n > 1 {
            rows.push(last);
        }
        Self::from_rows(&rows)
    }

    pub fn from_rows(rows: &[Row]) -> Self {
        let mut sys = Self::zeros(rows.len());
        for (i, r) in rows.iter().enumerate() {
            sys.a[i] = r.a;
            sys.b[i] = r.b;
            sys.c[i] = r.c;
            sys.d[i] = r.d;
        }
        sys
    }

    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    pub fn row(&self, i: usize) -> Row {
        Row {
            a: self.a[i],
            b: self.b[i],
            c: self.c[i],
            d: self.d[i],
        }
    }

    pub fn set_row(&mut self, i: usize, row: Row) {
        self.a[i] = row.a;
        self.b[i] = row.b;
        self.c[i] = row.c;
        self.d[i] = row.d;
    }

    /// Solve without pivot checks.
    pub fn solve(&self) -> Vec<f64> {
        let Ok(x) = self.sweep(|_, m| Ok::<f64, Infallible>(m));
        x
    }

    /// Solve, rejecting zero or non-finite pivots.
    pub fn solve_checked(&self) -> SolverResult<Vec<f64>> {
        self.sweep(|row, m| {
            if m == 0.0 || !m.is_finite() {
                Err(SolverError::SingularSystem { row })
            } else {
                Ok(m)
            }
        })
    }

    /// Dispatch on a pivot-check flag.
    pub fn solve_with(&self, check_pivots: bool) -> SolverResult<Vec<f64>> {
        if check_pivots {
            self.solve_checked()
        } else {
            Ok(self.solve())
        }
    }

    /// Largest absolute row residual `|A x - d|`.
    pub fn residual(&self, x: &[f64]) -> f64 {
        let n = self.len();
        (0..n)
            .map(|i| {
                let mut lhs = self.b[i] * x[i];
                if i > 0 {
                    lhs += self.a[i] * x[i - 1];
                }
                if i + 1 < n {
                    lhs += self.c[i] * x[i + 1];
                }
                (lhs - self.d[i]).abs()
            })
            .fold(0.0, f64::max)
    }

    /// Forward elimination and back substitution. `pivot` sees every pivot
    /// before it is divided by.
    fn sweep<E>(&self, pivot: impl Fn(usize, f64) -> Result<f64, E>) -> Result<Vec<f64>, E> {
        let n = self.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut c_star = vec![0.0; n];
        let mut d_star = vec![0.0; n];

        let m0 = pivot(0, self.b[0])?;
        c_star[0] = self.c[0] / m0;
        d_star[0] = self.d[0] / m0;
        for i in 1..n {
            let m = pivot(i, self.b[i] - self.a[i] * c_star[i - 1])?;
            c_star[i] = self.c[i] / m;
            d_star[i] = (self.d[i] - self.a[i] * d_star[i - 1]) / m;
        }

        let mut x = d_star;
        for i in (0..n - 1).rev() {
            x[i] -= c_star[i] * x[i + 1];
        }
        Ok(x)
    }
}
