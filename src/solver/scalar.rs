use crate::solver::{Batch, Counts, Solver, BATCH, ESCAPE_THRESHOLD, ITERATIONS};

/// Reference solver: one sample at a time, leaving the loop on escape.
#[derive(Clone, Debug)]
pub struct ScalarSolver {
    iterations: u16,
}

impl ScalarSolver {
    pub fn with_iterations(iterations: u16) -> Self {
        Self { iterations }
    }
}

impl Default for ScalarSolver {
    fn default() -> Self {
        Self::with_iterations(ITERATIONS)
    }
}

impl Solver for ScalarSolver {
    fn escape_counts(&self, batch: &Batch) -> Counts {
        let iterations = self.iterations as u32;
        let mut counts = [0; BATCH];
        for (t, c) in counts.iter_mut().zip(batch) {
            let mut z_re: f32 = 0.0;
            let mut z_im: f32 = 0.0;
            while *t < iterations {
                let re2 = z_re * z_re;
                let im2 = z_im * z_im;
                // NaN counts as escaped
                if !(re2 + im2 < ESCAPE_THRESHOLD) {
                    break;
                }
                *t += 1;
                let tmp_re = re2 - im2 + c.re;
                z_im = 2.0 * z_im * z_re + c.im;
                z_re = tmp_re;
            }
            if *t >= iterations {
                *t = 0;
            }
        }
        counts
    }

    fn iterations(&self) -> u16 {
        self.iterations
    }
}
