use num::complex::Complex;

pub type C<T> = Complex<T>;

pub fn c(re: f32, im: f32) -> C<f32> {
    Complex::new(re, im)
}

pub fn cr(re: f32) -> C<f32> {
    c(re, 0.0)
}
