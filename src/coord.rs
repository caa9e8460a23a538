use crate::complex::*;
use crate::solver::{Batch, BATCH};

pub const DEFAULT_ZOOM: f32 = 5.0;
pub const DEFAULT_CENTER_RE: f32 = -0.75;
pub const DEFAULT_CENTER_IM: f32 = 0.0;

/// Visible region of the complex plane.
///
/// `zoom` is the number of plane units spanned by each viewport dimension,
/// `center` the plane coordinate shown in the middle of the viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewState {
    pub zoom: f32,
    pub center: C<f32>,
}

impl ViewState {
    pub fn new(zoom: f32, center: C<f32>) -> Self {
        Self { zoom, center }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pan by a pointer drag of `dx`, `dy` pixels on a `width` x `height` viewport.
    pub fn pan(&mut self, dx: f32, dy: f32, width: usize, height: usize) {
        self.center.re -= self.zoom * dx / width as f32;
        self.center.im -= self.zoom * dy / height as f32;
    }

    /// Zoom by a vertical pointer drag of `dy` pixels; dragging down zooms in.
    pub fn zoom_by(&mut self, dy: f32, height: usize) {
        self.zoom -= self.zoom * dy / height as f32;
    }

    pub fn pixel_to_complex(&self, index: usize, width: usize, height: usize) -> C<f32> {
        let px = index % width;
        let py = index / width;
        let nx = px as f32 / width as f32 - 0.5;
        let ny = py as f32 / height as f32 - 0.5;
        c(self.zoom * nx + self.center.re, self.zoom * ny + self.center.im)
    }

    /// Coordinates of the `BATCH` consecutive pixels starting at `start`.
    ///
    /// Indices past the end of the buffer still map to plane coordinates
    /// (rows below the viewport), which lets callers pad the last batch.
    pub fn batch_at(&self, start: usize, width: usize, height: usize) -> Batch {
        let mut batch = [cr(0.0); BATCH];
        for (k, coord) in batch.iter_mut().enumerate() {
            *coord = self.pixel_to_complex(start + k, width, height);
        }
        batch
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM, c(DEFAULT_CENTER_RE, DEFAULT_CENTER_IM))
    }
}

pub fn pixel_to_complex(index: usize, width: usize, height: usize, view: ViewState) -> C<f32> {
    view.pixel_to_complex(index, width, height)
}
