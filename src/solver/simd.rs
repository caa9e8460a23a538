use std::marker::PhantomData;

use wide::f32x8;

use crate::solver::{Batch, Counts, Lane, Solver, BATCH, ESCAPE_THRESHOLD, ITERATIONS};

/// Branchless escape-time solver running `L::WIDTH` samples per instruction.
///
/// Every lane is advanced for the full iteration budget. A lane adds one to
/// its count for each step it starts inside the escape radius, so escaped
/// lanes stop counting without leaving the loop.
#[derive(Clone, Debug)]
pub struct SimdSolver<L = f32x8> {
    iterations: u16,
    lane: PhantomData<L>,
}

impl<L: Lane> SimdSolver<L> {
    pub fn with_iterations(iterations: u16) -> Self {
        Self {
            iterations,
            lane: PhantomData,
        }
    }

    fn solve_lanes(&self, c_re: L, c_im: L) -> L {
        let zero = L::splat(0.0);
        let one = L::splat(1.0);
        let two = L::splat(2.0);
        let threshold = L::splat(ESCAPE_THRESHOLD);
        let budget = L::splat(self.iterations as f32);

        let mut z_re = zero;
        let mut z_im = zero;
        let mut t = zero;
        for _ in 0..self.iterations {
            let re2 = z_re * z_re;
            let im2 = z_im * z_im;
            t = t + one.and((re2 + im2).less_than(threshold));
            let tmp_re = re2 - im2 + c_re;
            z_im = two * z_im * z_re + c_im;
            z_re = tmp_re;
        }
        t.less_than(budget).and(t)
    }
}

impl<L: Lane> Default for SimdSolver<L> {
    fn default() -> Self {
        Self::with_iterations(ITERATIONS)
    }
}

impl<L: Lane> Solver for SimdSolver<L> {
    fn escape_counts(&self, batch: &Batch) -> Counts {
        let mut c_re = [0.0; BATCH];
        let mut c_im = [0.0; BATCH];
        for (i, c) in batch.iter().enumerate() {
            c_re[i] = c.re;
            c_im[i] = c.im;
        }

        let mut t = [0.0; BATCH];
        for ((re, im), out) in c_re
            .chunks_exact(L::WIDTH)
            .zip(c_im.chunks_exact(L::WIDTH))
            .zip(t.chunks_exact_mut(L::WIDTH))
        {
            self.solve_lanes(L::load(re), L::load(im)).store(out);
        }

        let mut counts = [0; BATCH];
        for (count, v) in counts.iter_mut().zip(t) {
            *count = v as u32;
        }
        counts
    }

    fn iterations(&self) -> u16 {
        self.iterations
    }
}
