use std::fmt;
use std::str::FromStr;

use wide::{f32x4, f32x8};

use crate::complex::C;
use crate::error::Error;

pub mod lanes;
pub mod scalar;
pub mod simd;

pub use lanes::Lane;
pub use scalar::ScalarSolver;
pub use simd::SimdSolver;

/// Number of samples a solver processes per call.
pub const BATCH: usize = 32;

/// Default iteration budget.
pub const ITERATIONS: u16 = 100;

/// Square of the escape radius 2.
pub const ESCAPE_THRESHOLD: f32 = 4.0;

pub type Batch = [C<f32>; BATCH];
pub type Counts = [u32; BATCH];

const _: () = assert!(BATCH % <f32x8 as Lane>::WIDTH == 0);
const _: () = assert!(BATCH % <f32x4 as Lane>::WIDTH == 0);
const _: () = assert!(BATCH % <f32 as Lane>::WIDTH == 0);

pub trait Solver {
    /// Escape iteration (1-based) of every sample in the batch, or 0 when the
    /// sample is still bounded after `iterations()` steps.
    fn escape_counts(&self, batch: &Batch) -> Counts;

    fn iterations(&self) -> u16;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn escape_counts(&self, batch: &Batch) -> Counts {
        (**self).escape_counts(batch)
    }

    fn iterations(&self) -> u16 {
        (**self).iterations()
    }
}

pub type DefaultSolver = SimdSolver<f32x8>;

pub fn compute_escape_counts(batch: &Batch) -> Counts {
    DefaultSolver::default().escape_counts(batch)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolverKind {
    Simd8,
    Simd4,
    Scalar,
}

impl SolverKind {
    pub fn build(self, iterations: u16) -> Box<dyn Solver> {
        match self {
            Self::Simd8 => Box::new(SimdSolver::<f32x8>::with_iterations(iterations)),
            Self::Simd4 => Box::new(SimdSolver::<f32x4>::with_iterations(iterations)),
            Self::Scalar => Box::new(ScalarSolver::with_iterations(iterations)),
        }
    }
}

impl FromStr for SolverKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simd8" => Ok(Self::Simd8),
            "simd4" => Ok(Self::Simd4),
            "scalar" => Ok(Self::Scalar),
            _ => Err(Error::UnknownSolver(s.to_string())),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Simd8 => "simd8",
            Self::Simd4 => "simd4",
            Self::Scalar => "scalar",
        };
        f.write_str(name)
    }
}
