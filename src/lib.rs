use std::borrow::Cow;
use std::time::Instant;

use image::RgbImage;
use log::{debug, trace};

use crate::coord::ViewState;
use crate::error::{Error, Result};
use crate::painter::{default_ramp, rgb_channels, ColorRamp};
use crate::solver::{Solver, SolverKind, BATCH, ITERATIONS};

pub mod bench;
pub mod complex;
pub mod coord;
pub mod error;
#[cfg(feature = "gui")]
pub mod gui;
pub mod painter;
pub mod solver;
pub mod stats;

/// Row-major buffer of packed `0x00RRGGBB` pixels.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Returns true when the dimensions changed.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        debug!("resize {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, 0);
        true
    }

    pub fn to_image(&self) -> Result<RgbImage> {
        let width: u32 = self
            .width
            .try_into()
            .map_err(|_| Error::InvalidDimensions(self.width, self.height))?;
        let height: u32 = self
            .height
            .try_into()
            .map_err(|_| Error::InvalidDimensions(self.width, self.height))?;
        let raw: Vec<u8> = self.pixels.iter().flat_map(|p| rgb_channels(*p)).collect();
        RgbImage::from_raw(width, height, raw).ok_or(Error::InvalidDimensions(self.width, self.height))
    }
}

/// Per-frame driver: maps pixels to the plane, solves them a batch at a time
/// and writes their colors.
pub struct Mandelbrot {
    pub solver: Box<dyn Solver>,
    pub view: ViewState,
    ramp: Cow<'static, ColorRamp>,
}

impl Mandelbrot {
    pub fn new(solver: Box<dyn Solver>) -> Self {
        let ramp = match solver.iterations() {
            ITERATIONS => Cow::Borrowed(default_ramp()),
            n => Cow::Owned(ColorRamp::new(n)),
        };
        Self {
            solver,
            view: ViewState::default(),
            ramp,
        }
    }

    pub fn with_kind(kind: SolverKind, iterations: u16) -> Self {
        Self::new(kind.build(iterations))
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn reset(&mut self) {
        debug!("reset view");
        self.view.reset();
    }

    pub fn pan(&mut self, dx: f32, dy: f32, width: usize, height: usize) {
        self.view.pan(dx, dy, width, height);
    }

    pub fn zoom(&mut self, dy: f32, height: usize) {
        self.view.zoom_by(dy, height);
    }

    /// Renders the current view into `frame`.
    pub fn render(&self, frame: &mut FrameBuffer) -> Result<()> {
        let FrameBuffer {
            width,
            height,
            pixels,
        } = frame;
        render_frame(self.solver.as_ref(), self.ramp(), self.view, pixels, *width, *height)
    }
}

/// Renders `view` into a `width` x `height` pixel sink.
///
/// The view is copied in, so the whole frame sees one snapshot. The last batch
/// is padded with the coordinates of pixels past the end of the buffer, which
/// are solved but not written.
pub fn render_frame(
    solver: &dyn Solver,
    ramp: &ColorRamp,
    view: ViewState,
    pixels: &mut [u32],
    width: usize,
    height: usize,
) -> Result<()> {
    let expected = width * height;
    if pixels.len() != expected {
        return Err(Error::BufferSize {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }
    let start = Instant::now();
    for (n, chunk) in pixels.chunks_mut(BATCH).enumerate() {
        let batch = view.batch_at(n * BATCH, width, height);
        let counts = solver.escape_counts(&batch);
        for (pixel, count) in chunk.iter_mut().zip(counts) {
            *pixel = ramp.color(count);
        }
    }
    trace!("frame {}x{} in {:?}", width, height, start.elapsed());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::painter::escape_count_to_color;
    use crate::solver::{compute_escape_counts, ScalarSolver};

    fn expected_pixel(view: ViewState, index: usize, width: usize, height: usize) -> u32 {
        let c = view.pixel_to_complex(index, width, height);
        escape_count_to_color(compute_escape_counts(&[c; BATCH])[0])
    }

    #[test]
    fn test_render_every_pixel() {
        // 37 * 11 is not a multiple of the batch size
        let m = Mandelbrot::with_kind(SolverKind::Simd8, 100);
        let mut frame = FrameBuffer::new(37, 11);
        m.render(&mut frame).unwrap();
        for i in 0..37 * 11 {
            assert_eq!(frame.pixels()[i], expected_pixel(m.view, i, 37, 11), "pixel {}", i);
        }
        // the corners of the default view lie outside the set
        assert_ne!(frame.pixel(0, 0), 0);
        assert_ne!(frame.pixel(36, 10), 0);
    }

    #[test]
    fn test_resize_between_frames() {
        let m = Mandelbrot::with_kind(SolverKind::Simd4, 100);
        let mut frame = FrameBuffer::new(64, 48);
        m.render(&mut frame).unwrap();
        assert!(frame.resize(50, 30));
        assert!(!frame.resize(50, 30));
        m.render(&mut frame).unwrap();
        assert_eq!(frame.pixels().len(), 1500);
        for y in 0..30 {
            for x in 0..50 {
                let i = y * 50 + x;
                assert_eq!(frame.pixel(x, y), expected_pixel(m.view, i, 50, 30));
            }
        }
    }

    #[test]
    fn test_solvers_render_alike() {
        let simd = Mandelbrot::with_kind(SolverKind::Simd8, 100);
        let scalar = Mandelbrot::new(Box::new(ScalarSolver::default()));
        let mut a = FrameBuffer::new(40, 30);
        let mut b = FrameBuffer::new(40, 30);
        simd.render(&mut a).unwrap();
        scalar.render(&mut b).unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_default_budget_shares_ramp() {
        let m = Mandelbrot::with_kind(SolverKind::Simd8, ITERATIONS);
        assert!(std::ptr::eq(m.ramp(), default_ramp()));

        let m = Mandelbrot::with_kind(SolverKind::Scalar, 20);
        assert!(!std::ptr::eq(m.ramp(), default_ramp()));
        for count in 0..=20 {
            assert_eq!(m.ramp().color(count), escape_count_to_color(count));
        }
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let m = Mandelbrot::with_kind(SolverKind::Simd8, 100);
        let mut pixels = vec![0; 10];
        let err = render_frame(m.solver.as_ref(), &ColorRamp::new(100), m.view, &mut pixels, 4, 4);
        assert!(matches!(err, Err(Error::BufferSize { expected: 16, actual: 10, .. })));
    }

    #[test]
    fn test_empty_frame() {
        let m = Mandelbrot::with_kind(SolverKind::Simd8, 100);
        let mut frame = FrameBuffer::new(0, 0);
        assert!(m.render(&mut frame).is_ok());
    }

    #[test]
    fn test_view_updates() {
        let mut m = Mandelbrot::with_kind(SolverKind::Scalar, 100);
        m.pan(32.0, 0.0, 64, 64);
        m.zoom(32.0, 64);
        assert_eq!(m.view.zoom, 2.5);
        assert_eq!(m.view.center.re, -3.25);
        m.reset();
        assert_eq!(m.view, ViewState::default());
    }

    #[test]
    fn test_to_image() {
        let m = Mandelbrot::with_kind(SolverKind::Simd8, 100);
        let mut frame = FrameBuffer::new(8, 4);
        m.render(&mut frame).unwrap();
        let img = frame.to_image().unwrap();
        assert_eq!(img.dimensions(), (8, 4));
        let p = img.get_pixel(3, 2).0;
        assert_eq!(p, rgb_channels(frame.pixel(3, 2)));
    }
}
