use simdbrot::bench::{Benchmark, BenchmarkReport};
use simdbrot::solver::{SolverKind, ITERATIONS};
use simdbrot::{FrameBuffer, Mandelbrot};

const REPEATS: usize = 10;

fn benchmark_frame(kind: SolverKind, width: usize, height: usize) -> Benchmark {
    let mandelbrot = Mandelbrot::with_kind(kind, ITERATIONS);
    let frame = std::cell::RefCell::new(FrameBuffer::new(width, height));
    let f = move || {
        mandelbrot
            .render(&mut frame.borrow_mut())
            .expect("frame buffer matches its dimensions");
    };
    let name = format!("frame-{}-{}x{}", kind, width, height);
    Benchmark::iter(&name, REPEATS, (width * height) as u64, f)
}

fn main() {
    env_logger::init();
    let mut benches = vec![];
    for (width, height) in [(640, 480), (1280, 720), (1920, 1080)] {
        benches.push(benchmark_frame(SolverKind::Scalar, width, height));
        benches.push(benchmark_frame(SolverKind::Simd8, width, height));
    }
    BenchmarkReport::with_benches(&benches).report("frame");
}
