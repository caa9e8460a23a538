use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("pixel buffer holds {actual} pixels, expected {expected} for {width}x{height}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unknown solver {0:?}, expected one of simd8, simd4, scalar")]
    UnknownSolver(String),
    #[error("invalid image dimensions {0}x{1}")]
    InvalidDimensions(usize, usize),
    #[error("image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
