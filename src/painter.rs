use lazy_static::lazy_static;

use crate::solver::ITERATIONS;

lazy_static! {
    static ref DEFAULT_RAMP: ColorRamp = ColorRamp::new(ITERATIONS);
}

pub const BACKGROUND: u32 = 0x000000;

/// Packs channel intensities in [0, 1] as `0x00RRGGBB`, clamping each one.
pub fn rgb(r: f32, g: f32, b: f32) -> u32 {
    let channel = |x: f32| (255.0 * x).max(0.0).min(255.0) as u32;
    (channel(r) << 16) | (channel(g) << 8) | channel(b)
}

/// Piecewise-linear blue -> green -> red ramp over `v` in [0, 1].
pub fn ramp_color(v: f32) -> u32 {
    let r = 4.0 * v - 2.0;
    let g = 2.0 - 4.0 * (v - 0.5).abs();
    let b = 2.0 - 4.0 * v;
    rgb(r, g, b)
}

pub fn escape_count_to_color(count: u32) -> u32 {
    if count == 0 {
        BACKGROUND
    } else {
        ramp_color(0.01 * count as f32)
    }
}

pub fn rgb_channels(pixel: u32) -> [u8; 3] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
}

/// Colors of every count up to an iteration budget, computed once.
#[derive(Clone, Debug)]
pub struct ColorRamp {
    colors: Vec<u32>,
}

impl ColorRamp {
    pub fn new(iterations: u16) -> Self {
        let colors = (0..=iterations as u32).map(escape_count_to_color).collect();
        Self { colors }
    }

    pub fn color(&self, count: u32) -> u32 {
        match self.colors.get(count as usize) {
            Some(color) => *color,
            None => escape_count_to_color(count),
        }
    }
}

/// Shared ramp for the default budget, used by every driver running with
/// `ITERATIONS`.
pub fn default_ramp() -> &'static ColorRamp {
    &DEFAULT_RAMP
}
