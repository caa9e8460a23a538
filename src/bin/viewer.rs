use druid::{AppLauncher, PlatformError, WindowDesc};
use log::info;
use structopt::StructOpt;

use simdbrot::gui::widget::MandelbrotWidget;
use simdbrot::solver::SolverKind;
use simdbrot::Mandelbrot;

#[derive(Debug, StructOpt)]
#[structopt(name = "simdbrot-viewer", about = "Explore the Mandelbrot set")]
struct Opt {
    /// Initial window width
    #[structopt(long, default_value = "640")]
    width: u32,
    /// Initial window height
    #[structopt(long, default_value = "480")]
    height: u32,
    /// Solver: simd8, simd4 or scalar
    #[structopt(long, default_value = "simd8")]
    solver: SolverKind,
    #[structopt(long, default_value = "100")]
    iterations: u16,
}

fn main() -> Result<(), PlatformError> {
    env_logger::init();
    let opt = Opt::from_args();
    info!("solver {} with {} iterations", opt.solver, opt.iterations);

    let mandelbrot = Mandelbrot::with_kind(opt.solver, opt.iterations);
    AppLauncher::with_window(
        WindowDesc::new(MandelbrotWidget::new(mandelbrot))
            .title("Mandelbrot")
            .window_size((opt.width as f64, opt.height as f64)),
    )
    .launch(())?;
    Ok(())
}
