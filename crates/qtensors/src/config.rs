//! Numeric options and process-wide settings.

use std::sync::atomic::{AtomicUsize, Ordering};

use faer::Par;
use tracing::info;

use crate::error::{QuantumError, Result};

/// Tolerance used by [`QuantumObject::is_hermitian`](crate::QuantumObject::is_hermitian).
pub const DEFAULT_HERMITIAN_TOLERANCE: f64 = 1e-12;

/// Options for the sparse matrix exponential.
///
/// `drop_tolerance` is lossy: entries with magnitude at or below it are
/// discarded after every Taylor term and every squaring to keep the result
/// sparse. Set it to `0.0` to keep every nonzero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpmOptions {
    /// Stop the series once a term's infinity norm falls below this.
    pub series_tolerance: f64,
    pub drop_tolerance: f64,
    /// Upper bound on Taylor terms; reaching it is logged, not an error.
    pub max_terms: usize,
}

impl Default for ExpmOptions {
    fn default() -> Self {
        Self {
            series_tolerance: 1e-14,
            drop_tolerance: 1e-20,
            max_terms: 256,
        }
    }
}

impl ExpmOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.series_tolerance > 0.0 && self.series_tolerance.is_finite()) {
            return Err(QuantumError::InvalidArgument {
                message: format!(
                    "series_tolerance must be positive and finite, got {}",
                    self.series_tolerance
                ),
            });
        }
        if !(self.drop_tolerance >= 0.0 && self.drop_tolerance.is_finite()) {
            return Err(QuantumError::InvalidArgument {
                message: format!(
                    "drop_tolerance must be non-negative, got {}",
                    self.drop_tolerance
                ),
            });
        }
        if self.max_terms == 0 {
            return Err(QuantumError::InvalidArgument {
                message: "max_terms must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Options for the Floquet steady state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloquetOptions {
    /// Highest harmonic kept in the continued fraction.
    pub n_max: usize,
    /// Entries of the sideband propagators below this magnitude are zeroed.
    pub tol: f64,
}

impl Default for FloquetOptions {
    fn default() -> Self {
        Self {
            n_max: 4,
            tol: 1e-15,
        }
    }
}

impl FloquetOptions {
    pub fn validate(&self) -> Result<()> {
        if self.n_max == 0 {
            return Err(QuantumError::InvalidArgument {
                message: "n_max must be at least 1".into(),
            });
        }
        if !(self.tol >= 0.0 && self.tol.is_finite()) {
            return Err(QuantumError::InvalidArgument {
                message: format!("tol must be non-negative, got {}", self.tol),
            });
        }
        Ok(())
    }
}

/// Thread usage of the dense linear-algebra kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    /// Rayon pool with this many threads; `0` uses every available thread.
    Threads(usize),
}

// 0 = sequential, n + 1 = Threads(n)
static PARALLELISM: AtomicUsize = AtomicUsize::new(0);

/// Set the process-wide thread count for matrix products, factorizations
/// and solves. Calling it again with the same value has no further effect.
/// Kernels read the setting when they start, so it should be called during
/// start-up before any computation.
pub fn init_parallelism(parallelism: Parallelism) {
    let par = match parallelism {
        Parallelism::Sequential | Parallelism::Threads(1) => Par::Seq,
        Parallelism::Threads(n) => Par::rayon(n),
    };
    let encoded = match parallelism {
        Parallelism::Sequential => 0,
        Parallelism::Threads(n) => n + 1,
    };
    let previous = PARALLELISM.swap(encoded, Ordering::Relaxed);
    faer::set_global_parallelism(par);
    if previous != encoded {
        info!(?parallelism, "numeric parallelism configured");
    }
}

/// The value last passed to [`init_parallelism`] (sequential by default).
pub fn current_parallelism() -> Parallelism {
    match PARALLELISM.load(Ordering::Relaxed) {
        0 => Parallelism::Sequential,
        n => Parallelism::Threads(n - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let expm = ExpmOptions::default();
        assert_eq!(expm.series_tolerance, 1e-14);
        assert_eq!(expm.drop_tolerance, 1e-20);
        assert!(expm.validate().is_ok());

        let floquet = FloquetOptions::default();
        assert_eq!(floquet.n_max, 4);
        assert_eq!(floquet.tol, 1e-15);
        assert!(floquet.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad = ExpmOptions {
            drop_tolerance: -1.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = ExpmOptions {
            series_tolerance: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = FloquetOptions {
            n_max: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = FloquetOptions {
            tol: f64::NAN,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_init_parallelism_is_idempotent() {
        init_parallelism(Parallelism::Sequential);
        init_parallelism(Parallelism::Sequential);
        assert_eq!(current_parallelism(), Parallelism::Sequential);
    }
}
