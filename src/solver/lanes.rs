use std::ops::{Add, Mul, Sub};

use wide::{f32x4, f32x8, CmpLt};

/// A group of single-precision lanes advanced in lock-step.
///
/// Comparisons produce bit masks: every bit set in lanes where the comparison
/// holds, every bit clear elsewhere. Masks combine with values through `and`.
pub trait Lane: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> {
    const WIDTH: usize;

    fn splat(value: f32) -> Self;

    /// Loads exactly `WIDTH` values.
    fn load(values: &[f32]) -> Self;

    /// Stores exactly `WIDTH` values.
    fn store(self, out: &mut [f32]);

    /// Ordered less-than, false for NaN lanes.
    fn less_than(self, rhs: Self) -> Self;

    /// Bitwise and of the lane bits.
    fn and(self, rhs: Self) -> Self;
}

impl Lane for f32x8 {
    const WIDTH: usize = 8;

    fn splat(value: f32) -> Self {
        f32x8::splat(value)
    }

    fn load(values: &[f32]) -> Self {
        let mut lanes = [0.0; 8];
        lanes.copy_from_slice(values);
        f32x8::new(lanes)
    }

    fn store(self, out: &mut [f32]) {
        out.copy_from_slice(&self.to_array());
    }

    fn less_than(self, rhs: Self) -> Self {
        self.cmp_lt(rhs)
    }

    fn and(self, rhs: Self) -> Self {
        self & rhs
    }
}

impl Lane for f32x4 {
    const WIDTH: usize = 4;

    fn splat(value: f32) -> Self {
        f32x4::splat(value)
    }

    fn load(values: &[f32]) -> Self {
        let mut lanes = [0.0; 4];
        lanes.copy_from_slice(values);
        f32x4::new(lanes)
    }

    fn store(self, out: &mut [f32]) {
        out.copy_from_slice(&self.to_array());
    }

    fn less_than(self, rhs: Self) -> Self {
        self.cmp_lt(rhs)
    }

    fn and(self, rhs: Self) -> Self {
        self & rhs
    }
}

// Single lane fallback, same mask semantics as the vector types.
impl Lane for f32 {
    const WIDTH: usize = 1;

    fn splat(value: f32) -> Self {
        value
    }

    fn load(values: &[f32]) -> Self {
        values[0]
    }

    fn store(self, out: &mut [f32]) {
        out[0] = self;
    }

    fn less_than(self, rhs: Self) -> Self {
        f32::from_bits(if self < rhs { u32::MAX } else { 0 })
    }

    fn and(self, rhs: Self) -> Self {
        f32::from_bits(self.to_bits() & rhs.to_bits())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn check_mask<L: Lane>() {
        let mut values = vec![0.0; L::WIDTH];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as f32;
        }
        values[0] = f32::NAN;
        let half = L::splat(L::WIDTH as f32 / 2.0);
        let mask = L::load(&values).less_than(half);
        let ones = mask.and(L::splat(1.0));

        let mut out = vec![-1.0; L::WIDTH];
        ones.store(&mut out);
        for (i, v) in out.iter().enumerate() {
            let expected = if i != 0 && (i as f32) < L::WIDTH as f32 / 2.0 {
                1.0
            } else {
                0.0
            };
            assert_eq!(*v, expected, "lane {} of {}", i, L::WIDTH);
        }
    }

    #[test]
    fn test_masks() {
        check_mask::<f32x8>();
        check_mask::<f32x4>();
        check_mask::<f32>();
    }

    #[test]
    fn test_load_store() {
        let values: Vec<f32> = (0..8).map(|i| i as f32 * 1.5).collect();
        let mut out = vec![0.0; 8];
        (f32x8::load(&values) + f32x8::splat(1.0)).store(&mut out);
        let expected: Vec<f32> = values.iter().map(|v| v + 1.0).collect();
        assert_eq!(out, expected);
    }
}
